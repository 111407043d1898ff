use std::sync::{Arc, Barrier};
use std::thread;

use version_gate::{Registry, RegistryError, VersionIdentifier};

const THREADS: usize = 16;

#[test]
fn concurrent_overlapping_registrations_admit_exactly_one() {
    let registry: Arc<Registry<usize>> = Arc::new(Registry::new("race"));
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let registry = Arc::clone(&registry);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                registry.register(
                    "f",
                    i,
                    Some(VersionIdentifier::from(1u64)),
                    Some(VersionIdentifier::from(2u64)),
                )
            })
        })
        .collect();

    let results: Vec<Result<(), RegistryError>> =
        handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(
        results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| matches!(e, RegistryError::OverlappingVersion { .. }))
    );
    assert_eq!(registry.num_versions("f"), 1);
}

#[test]
fn concurrent_disjoint_registrations_all_succeed_while_readers_run() {
    let registry: Arc<Registry<u64>> = Arc::new(Registry::new("race"));

    let writers: Vec<_> = (0..THREADS as u64)
        .map(|i| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                registry.register(
                    "f",
                    i,
                    Some(VersionIdentifier::from(i)),
                    Some(VersionIdentifier::from(i + 1)),
                )
            })
        })
        .collect();

    let reader = {
        let registry = Arc::clone(&registry);
        thread::spawn(move || {
            for _ in 0..1000 {
                let seen = registry.num_versions("f");
                assert!(seen <= THREADS);
                if let Ok(found) = registry.resolve("f", &VersionIdentifier::from(3u64)) {
                    assert_eq!(found, 3);
                }
            }
        })
    };

    for writer in writers {
        writer.join().unwrap().unwrap();
    }
    reader.join().unwrap();

    assert_eq!(registry.num_versions("f"), THREADS);
    for i in 0..THREADS as u64 {
        assert_eq!(registry.resolve("f", &VersionIdentifier::from(i)), Ok(i));
    }
}
