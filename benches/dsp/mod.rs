//! Benchmarks for low-level DSP primitives.

mod biquad;
mod response;

pub use biquad::bench_biquad;
pub use response::bench_response;
