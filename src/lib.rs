//! Core library for the `apifuzz` CLI.
//!
//! This crate provides the internal building blocks used by the binary:
//! CLI argument types, endpoint sources, payload generation, request
//! construction, the fuzzing engine, and the HTTP transport capability.
//! The primary user-facing interface is the `apifuzz` command-line
//! application; library APIs may evolve as the CLI grows.
pub mod args;
pub mod config;
pub mod engine;
pub mod error;
pub mod http;
pub mod logger;
pub mod payload;
pub mod report;
pub mod request;
pub mod shutdown;
pub mod shutdown_handlers;
pub mod source;
