/* src/ingest/mod.rs */

//!
//! Pipelines that turn raw input into a complete [`Snapshot`](crate::Snapshot).
//!
//! Both pipelines start from the registry defaults and are total: malformed
//! entries are dropped, never reported as failures. Neither installs the
//! result; see [`Features`](crate::Features) for replace and notify.

mod env;
mod map;

pub use env::{EnvSource, ProcessEnv, from_environment};
pub use map::from_map;
