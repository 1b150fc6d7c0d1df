//! Constant-time analysis hooks.
//!
//! Tools such as Valgrind's memcheck can detect secret
//! dependent branches if secret memory is marked as
//! "undefined". A [`Timecop`] marks memory as secret
//! ([`poison`]) and as public again ([`unpoison`]).
//!
//! By default both operations are no-ops. A hook can be
//! installed once per process with [`set_timecop`].

use spin::Once;

/// Marks memory as secret or public for constant-time
/// analysis.
pub trait Timecop: Sync {
    /// Marks `data` as secret.
    fn poison(&self, data: &[u8]);

    /// Marks `data` as public.
    fn unpoison(&self, data: &[u8]);
}

static TIMECOP: Once<&'static dyn Timecop> = Once::new();

/// Installs the process-wide [`Timecop`].
///
/// Returns `false` if a hook was already installed, in which
/// case `tc` is ignored.
pub fn set_timecop(tc: &'static dyn Timecop) -> bool {
    let mut installed = false;
    TIMECOP.call_once(|| {
        installed = true;
        tc
    });
    installed
}

/// Marks `data` as secret.
#[inline]
pub fn poison(data: &[u8]) {
    if let Some(tc) = TIMECOP.get() {
        tc.poison(data);
    }
}

/// Marks `data` as public.
#[inline]
pub fn unpoison(data: &[u8]) {
    if let Some(tc) = TIMECOP.get() {
        tc.unpoison(data);
    }
}

#[cfg(test)]
mod tests {
    use core::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct Counter {
        poisoned: AtomicUsize,
        unpoisoned: AtomicUsize,
    }

    impl Timecop for Counter {
        fn poison(&self, data: &[u8]) {
            self.poisoned.fetch_add(data.len(), Ordering::SeqCst);
        }

        fn unpoison(&self, data: &[u8]) {
            self.unpoisoned.fetch_add(data.len(), Ordering::SeqCst);
        }
    }

    static COUNTER: Counter = Counter {
        poisoned: AtomicUsize::new(0),
        unpoisoned: AtomicUsize::new(0),
    };

    static OTHER: Counter = Counter {
        poisoned: AtomicUsize::new(0),
        unpoisoned: AtomicUsize::new(0),
    };

    #[test]
    fn test_set_timecop() {
        assert!(set_timecop(&COUNTER));
        assert!(!set_timecop(&OTHER));

        poison(&[0u8; 3]);
        unpoison(&[0u8; 5]);
        assert_eq!(COUNTER.poisoned.load(Ordering::SeqCst), 3);
        assert_eq!(COUNTER.unpoisoned.load(Ordering::SeqCst), 5);
        assert_eq!(OTHER.poisoned.load(Ordering::SeqCst), 0);
    }
}
