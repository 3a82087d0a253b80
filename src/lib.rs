// src/lib.rs

//! modsync
//!
//! Build-time mod dependency resolver and installer for Beat Saber plugin
//! projects.
//!
//! # Architecture
//!
//! - Catalog-first: game versions and their aliases are snapshotted once per
//!   run and every version string resolves through that snapshot
//! - Registry order is authority: the registry's version-descending payload
//!   order drives first-match-wins resolution
//! - Fallback sources: mods absent from the registry resolve against the
//!   release assets of configured `owner/repo` repositories
//! - Sequential installs: requirements resolve and install one at a time, so
//!   a fatal download stops the run at a well-defined point

pub mod catalog;
pub mod config;
pub mod env_file;
mod error;
pub mod fallback;
pub mod http;
pub mod installer;
pub mod pool;
pub mod project;
pub mod registry;
pub mod resolver;

pub use error::{Error, Result};
