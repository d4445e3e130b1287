//! Basic usage example for threadsafe
//!
//! A pool of workers claims jobs from a shared `SyncMap` with `pull`, so each job
//! runs exactly once, and records finished job ids in a shared `SyncVec`.
//!
//! Run with `RUST_LOG=debug cargo run --example basic_usage` to see the
//! container log output.

use std::sync::Arc;
use std::thread;
use threadsafe::{Error, ExclusiveMap, MetricsCollector, SyncMap, SyncVec};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("threadsafe Basic Usage Example");
    println!("==============================");

    // Map basics
    println!("\n1. Map Operations:");
    let map = SyncMap::new();
    map.set("a", 1);
    map.set("b", 2);
    println!("   Keys: {:?}", map.keys());
    println!("   Pull a: {:?}", map.pull("a"));
    println!("   Get a after pull: {:?}", map.get("a"));
    println!("   Len: {}", map.len());

    // Sequence basics, checked and panicking accessors
    println!("\n2. Sequence Operations:");
    let seq: SyncVec<i32> = SyncVec::from(vec![10, 20, 30]);
    println!("   Deleted index 1: {}", seq.delete(1));
    println!("   Contents: {:?}", seq.to_vec());
    match seq.try_delete(5) {
        Ok(value) => println!("   Unexpectedly deleted {}", value),
        Err(Error::OutOfBounds { index, len }) => {
            println!("   try_delete({}) rejected, length is {}", index, len)
        }
    }
    seq.try_insert(1, 20)?;
    println!("   After try_insert(1, 20): {:?}", seq.to_vec());
    println!("   First element above 15: {:?}", seq.position(|&n| n > 15));

    // Consume-once job distribution
    println!("\n3. Job Distribution:");
    let jobs: Arc<ExclusiveMap<u32, String>> = Arc::new(ExclusiveMap::default());
    for id in 0..20 {
        jobs.set(id, format!("resize image {}", id));
    }
    let finished: Arc<SyncVec<u32>> = Arc::new(SyncVec::new());

    let workers: Vec<_> = (0..4)
        .map(|worker| {
            let jobs = Arc::clone(&jobs);
            let finished = Arc::clone(&finished);
            thread::spawn(move || {
                let mut claimed = 0;
                for id in 0..20 {
                    if let Some(job) = jobs.pull(&id) {
                        log::debug!("worker {} running '{}'", worker, job);
                        finished.append(id);
                        claimed += 1;
                    }
                }
                claimed
            })
        })
        .collect();

    for (worker, handle) in workers.into_iter().enumerate() {
        let claimed = handle.join().map_err(|_| "worker panicked")?;
        println!("   Worker {} claimed {} jobs", worker, claimed);
    }
    println!("   Jobs left: {}", jobs.len());
    println!("   Jobs finished: {}", finished.len());

    let metrics = jobs.metrics();
    println!("\n4. Lock Metrics (job map):");
    println!("   Acquisitions: {}", metrics.total_acquisitions());
    println!("   Contention rate: {:.2}%", metrics.contention_rate());
    println!("   Max wait: {:?}", metrics.max_wait());

    Ok(())
}
