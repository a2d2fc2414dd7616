//! Benchmarks for realistic control and audio workloads.

mod articulation;

pub use articulation::bench_articulation;
