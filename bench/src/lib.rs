//! Benchmark utilities for the ECS core.
//!
//! - **Microbenchmarks**: individual world operations (create, attach/detach, destroy, lookups)
//! - **Shuffled workloads**: removal in random order, which is where index bookkeeping costs show
//!
//! # Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench -p rusty_ecs_bench
//!
//! # Run specific benchmark group
//! cargo bench -p rusty_ecs_bench -- destroy
//! ```
//!
//! Results are written to `target/criterion/` with HTML reports for visualization.

pub mod components;
pub mod workload;
