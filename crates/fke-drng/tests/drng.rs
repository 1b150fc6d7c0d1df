//! End to end tests for the DRNGs.

use std::sync::atomic::{AtomicUsize, Ordering};

use fke_drng::{
    any::{AnyDrng, DrngKind},
    selftest::{self, Algorithm, Status},
    Drng, HashCryptSha512, Timecop, Xdrbg256,
};
use proptest::{collection::vec, prelude::*};
use test_log::test;

fn all_seeded(seed: &[u8], pers: &[u8]) -> Vec<AnyDrng> {
    DrngKind::ALL
        .into_iter()
        .map(|kind| {
            let mut d = AnyDrng::new(kind).expect("every DRNG is enabled");
            d.seed(seed, pers).expect("seed");
            d
        })
        .collect()
}

/// Every selftest passes once its algorithm has been used.
#[test]
fn test_selftests_pass() {
    for mut d in all_seeded(b"seed", b"") {
        d.generate(b"", &mut [0u8; 16]).expect("generate");
    }
    let mut hc = HashCryptSha512::new();
    hc.setkey(b"key", b"").expect("setkey");

    for alg in [
        Algorithm::Xdrbg128,
        Algorithm::Xdrbg256,
        Algorithm::KmacDrng,
        Algorithm::ChaCha20Drng,
        Algorithm::HashDrbgSha256,
        Algorithm::HashDrbgSha512,
        Algorithm::HashCrypt,
    ] {
        assert_eq!(selftest::status(alg), Status::Passed, "{alg}");
    }
}

/// No two DRNGs produce the same stream from the same seed.
#[test]
fn test_distinct_streams() {
    let outputs: Vec<[u8; 32]> = all_seeded(b"seed", b"pers")
        .iter_mut()
        .map(|d| {
            let mut out = [0u8; 32];
            d.generate(b"", &mut out).expect("generate");
            out
        })
        .collect();
    for (i, a) in outputs.iter().enumerate() {
        for (j, b) in outputs.iter().enumerate().skip(i + 1) {
            assert_ne!(a, b, "{} and {}", DrngKind::ALL[i], DrngKind::ALL[j]);
        }
    }
}

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

/// Seeds are marked secret and output is marked public.
#[test]
fn test_timecop() {
    assert!(fke_drng::set_timecop(&COUNTER));

    let before = COUNTER.unpoisoned.load(Ordering::SeqCst);
    let mut d = Xdrbg256::from_seed(&[0u8; 48], b"").expect("seed");
    assert!(COUNTER.poisoned.load(Ordering::SeqCst) >= 48);
    d.generate(b"", &mut [0u8; 100]).expect("generate");
    assert!(COUNTER.unpoisoned.load(Ordering::SeqCst) >= before + 100);
}

proptest! {
    /// Reseeding always changes the stream, for every DRNG.
    #[test]
    fn proptest_reseed_changes_output(
        seed in vec(any::<u8>(), 1..100),
        reseed in vec(any::<u8>(), 1..100),
        pers in vec(any::<u8>(), 0..100),
    ) {
        let mut a = all_seeded(&seed, &pers);
        let mut b = all_seeded(&seed, &pers);
        for (a, b) in a.iter_mut().zip(b.iter_mut()) {
            a.seed(&reseed, b"").expect("reseed");
            let mut x = [0u8; 32];
            let mut y = [0u8; 32];
            a.generate(b"", &mut x).expect("generate");
            b.generate(b"", &mut y).expect("generate");
            prop_assert_ne!(x, y, "{}", a.name());
        }
    }

    /// Splitting a request never repeats output.
    #[test]
    fn proptest_no_repeats(
        seed in vec(any::<u8>(), 1..100),
        sizes in vec(1..200usize, 1..8),
    ) {
        for mut d in all_seeded(&seed, b"") {
            let mut seen = Vec::new();
            for &n in &sizes {
                let mut out = vec![0u8; n.max(16)];
                d.generate(b"", &mut out).expect("generate");
                let head: [u8; 16] = out[..16].try_into().expect("16 bytes");
                prop_assert!(!seen.contains(&head), "{}", d.name());
                seen.push(head);
            }
        }
    }
}
