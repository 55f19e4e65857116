//! Core types for result-space environment resolution
//!
//! A result space is a build output directory whose generated setup script,
//! when sourced, yields the complete environment for using that build's
//! artifacts. This crate provides the shared vocabulary for working with
//! result spaces:
//! - the [`Environment`] map type and the `KEY=VALUE` dump parser
//! - shell family normalization and selection for clean sourcing
//! - the directory contract of a valid result space
//! - the error taxonomy for resolution failures

pub mod environment;
pub mod errors;
pub mod paths;
pub mod shell;

pub use environment::{BLACKLISTED_KEYS, Environment, parse_env_str};
pub use errors::{Error, Result};
pub use shell::{DEFAULT_SHELL, ShellFamily, ShellSelection};
