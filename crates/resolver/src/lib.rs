//! Resolution and caching of result-space environments
//!
//! Sourcing another build's generated setup script yields the environment a
//! workspace needs to chain that build's artifacts. This crate implements
//! the pipeline around that: fingerprinting of environment hooks to detect
//! staleness, construction and execution of the sourcing command through a
//! clean shell, filtering of shell-invocation artifacts, per-path caching of
//! the outcome, and application of a resolved environment to the calling
//! process.
//!
//! The subprocess engine is a collaborator behind the [`CommandRunner`]
//! trait; [`ShellRunner`] is the default implementation. Resolution is
//! synchronous and blocking: a call returns once the sourcing subprocess has
//! terminated and its output has been consumed.

pub mod cache;
pub mod executor;
pub mod fingerprint;
pub mod resolver;

pub use cache::EnvCache;
pub use executor::{CommandRunner, OutputChunks, ShellRunner, SourceCommand};
pub use fingerprint::hook_fingerprints;
pub use resolver::{ResolveOptions, Resolver, build_source_command};
