//! Core library for the `logsurge` CLI.
//!
//! This crate provides the internal building blocks used by the binary: CLI
//! argument types, configuration parsing, the fixed-payload request workload,
//! the virtual-user iteration driver, and check aggregation. The primary
//! user-facing interface is the `logsurge` command-line application; library
//! APIs may evolve as the CLI grows.
pub mod args;
pub mod config;
pub mod error;
pub mod http;
pub mod metrics;
pub mod shutdown;
