//! Benchmarks for the control thread.

mod mapper;

pub use mapper::bench_mapper;
