//! Throughput Demo - Ring latency dan throughput
//!
//! Usage:
//!   RUST_LOG=hermes_ring=debug cargo run --release --example throughput_demo

use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Instant;

use hermes_ring::{CursorAdvance, Ring, RingConfig, CACHE_LINE};

const ITERATIONS: usize = 1_000_000;
const SLOTS: usize = 65536;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("🚀 Hermes Ring - Lock-Free MPMC");
    println!("================================\n");
    println!("  Cache line: {} bytes", CACHE_LINE);
    match hermes_ring::core::detected_line_size() {
        Some(size) => println!("  Host L1d line: {} bytes\n", size),
        None => println!("  Host L1d line: unknown\n"),
    }

    let values: Vec<u64> = (0..ITERATIONS as u64).collect();

    for advance in [CursorAdvance::Exclusive, CursorAdvance::Optimistic] {
        single_thread_latency(&values, advance);
        mpmc_throughput(&values, advance, 4, 4);
    }

    println!("\n✅ All benchmarks complete!");
}

fn single_thread_latency(values: &[u64], advance: CursorAdvance) {
    println!("📊 Single-thread latency ({:?})", advance);
    println!("-----------------------------------------");

    let rb: Ring<'_, u64> = match RingConfig::new(SLOTS).advance(advance).build() {
        Ok(rb) => rb,
        Err(err) => {
            eprintln!("  failed to build ring: {err}");
            return;
        }
    };

    // Benchmark put
    let start = Instant::now();
    for v in values {
        while rb.put(v).is_err() {
            let _ = rb.get();
        }
    }
    let put_duration = start.elapsed();

    // Drain
    while rb.get().is_ok() {}

    for v in &values[..rb.usable_capacity()] {
        let _ = rb.put(v);
    }

    // Benchmark get
    let drained = rb.len();
    let start = Instant::now();
    while rb.get().is_ok() {}
    let get_duration = start.elapsed();

    let put_ns = put_duration.as_nanos() as f64 / values.len() as f64;
    let get_ns = get_duration.as_nanos() as f64 / drained.max(1) as f64;

    println!("  Operations: {}", values.len());
    println!("  Put latency: {:.2} ns/op", put_ns);
    println!("  Get latency: {:.2} ns/op", get_ns);
    println!(
        "  Throughput:  {:.2} M ops/sec\n",
        values.len() as f64 / put_duration.as_secs_f64() / 1_000_000.0
    );
}

fn mpmc_throughput(values: &[u64], advance: CursorAdvance, producers: usize, consumers: usize) {
    println!(
        "📊 MPMC throughput ({:?}, {}P x {}C)",
        advance, producers, consumers
    );
    println!("-----------------------------------------");

    let rb: Ring<'_, u64> = match RingConfig::new(1024).advance(advance).build() {
        Ok(rb) => rb,
        Err(err) => {
            eprintln!("  failed to build ring: {err}");
            return;
        }
    };
    let received = AtomicUsize::new(0);
    let producers_done = AtomicUsize::new(0);
    let per_producer = values.len() / producers;

    let start = Instant::now();
    thread::scope(|s| {
        for chunk in values.chunks(per_producer).take(producers) {
            let (rb, done) = (&rb, &producers_done);
            s.spawn(move || {
                for v in chunk {
                    while rb.put(v).is_err() {
                        thread::yield_now();
                    }
                }
                done.fetch_add(1, Ordering::Release);
            });
        }

        for _ in 0..consumers {
            let (rb, received, done) = (&rb, &received, &producers_done);
            s.spawn(move || loop {
                match rb.get() {
                    Ok(_) => {
                        received.fetch_add(1, Ordering::Relaxed);
                    }
                    Err(_) if done.load(Ordering::Acquire) == producers => break,
                    Err(_) => thread::yield_now(),
                }
            });
        }
    });
    let elapsed = start.elapsed();

    let total = received.load(Ordering::Relaxed);
    println!("  Received: {} / {}", total, per_producer * producers);
    println!(
        "  Throughput: {:.2} M msgs/sec\n",
        total as f64 / elapsed.as_secs_f64() / 1_000_000.0
    );
}
