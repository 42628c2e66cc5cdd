//! Release/Acquire Handshake Latency Report
//!
//! Two threads ping-pong a sequence number through one shared region using
//! only `put_i64_ordered` and `get_i64_volatile`, then report round-trip
//! latency percentiles and the page faults taken while doing so. A hot path
//! that neither allocates nor copies should take none.
//!
//! Usage: `cargo run --release --bin handshake_latency [round_trips]`

use std::thread;
use std::time::Instant;

use atomic_buffer::util::{HexDump, CACHE_LINE_LENGTH};
use atomic_buffer::AtomicBuffer;
use crossbeam_utils::CachePadded;

#[cfg(target_os = "linux")]
use std::mem::MaybeUninit;

const DEFAULT_ROUND_TRIPS: usize = 200_000;
const WARMUP_ROUND_TRIPS: usize = 10_000;

/// Ping lives on its own cache line, pong on the next.
const PING: usize = 0;
const PONG: usize = CACHE_LINE_LENGTH;
const REGION_LEN: usize = 2 * CACHE_LINE_LENGTH;

fn main() {
    let round_trips = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(DEFAULT_ROUND_TRIPS);

    println!("# Release/Acquire Handshake Report\n");

    let mut region = Box::new(CachePadded::new([0u8; REGION_LEN]));
    let buffer = AtomicBuffer::wrap(&mut region[..]);

    println!("- Region: {} bytes at {:p}", buffer.capacity(), buffer.ptr());
    println!("- Round trips: {} (+{} warmup)", round_trips, WARMUP_ROUND_TRIPS);

    run(buffer, WARMUP_ROUND_TRIPS);
    buffer.fill(0);

    let faults_before = minor_page_faults();
    let mut samples = run(buffer, round_trips);
    let faults_after = minor_page_faults();

    samples.sort_unstable();

    println!("\n## Round-trip latency (ns)");
    println!("| p50 | p90 | p99 | p99.9 | max |");
    println!("|-----|-----|-----|-------|-----|");
    println!(
        "| {} | {} | {} | {} | {} |",
        percentile(&samples, 0.50),
        percentile(&samples, 0.90),
        percentile(&samples, 0.99),
        percentile(&samples, 0.999),
        samples.last().copied().unwrap_or(0)
    );

    match (faults_before, faults_after) {
        (Some(before), Some(after)) => {
            println!("\n## Page faults during measurement");
            println!("- Minor faults delta: {}", after - before);
        }
        _ => println!("\n> [SKIP] Page fault accounting requires Linux (getrusage)."),
    }

    println!("\n## Final region state");
    println!("```");
    let mut snapshot = [0u8; 16];
    buffer.get_bytes(0, &mut snapshot);
    println!("{}", HexDump(&snapshot));
    buffer.get_bytes(PONG, &mut snapshot);
    println!("{}", HexDump(&snapshot));
    println!("```");

    let ping = buffer.get_i64_volatile(PING);
    let pong = buffer.get_i64_volatile(PONG);
    if ping == round_trips as i64 && pong == ping {
        println!("\n> [PASS] every ping was answered");
    } else {
        println!("\n> [FAIL] ping {} / pong {}", ping, pong);
        std::process::exit(1);
    }
}

/// Runs `round_trips` ping-pongs and returns per-round-trip nanoseconds.
fn run(buffer: AtomicBuffer<'_>, round_trips: usize) -> Vec<u64> {
    let mut samples = Vec::with_capacity(round_trips);

    thread::scope(|s| {
        s.spawn(move || {
            for seq in 1..=round_trips as i64 {
                while buffer.get_i64_volatile(PING) != seq {
                    std::hint::spin_loop();
                }
                buffer.put_i64_ordered(PONG, seq);
            }
        });

        for seq in 1..=round_trips as i64 {
            let start = Instant::now();
            buffer.put_i64_ordered(PING, seq);
            while buffer.get_i64_volatile(PONG) != seq {
                std::hint::spin_loop();
            }
            samples.push(start.elapsed().as_nanos() as u64);
        }
    });

    samples
}

fn percentile(sorted: &[u64], p: f64) -> u64 {
    if sorted.is_empty() {
        return 0;
    }
    let rank = ((sorted.len() - 1) as f64 * p).round() as usize;
    sorted[rank]
}

#[cfg(target_os = "linux")]
fn minor_page_faults() -> Option<i64> {
    let mut usage = MaybeUninit::<libc::rusage>::uninit();
    unsafe {
        if libc::getrusage(libc::RUSAGE_SELF, usage.as_mut_ptr()) == 0 {
            Some(usage.assume_init().ru_minflt as i64)
        } else {
            None
        }
    }
}

#[cfg(not(target_os = "linux"))]
fn minor_page_faults() -> Option<i64> {
    None
}
