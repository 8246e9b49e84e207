//! Real-world scenario benchmarks.
//!
//! These render whole engine blocks the way the audio callback does.

mod engine;

pub use engine::bench_engine;
