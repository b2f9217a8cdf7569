// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # convscope-observability
//!
//! Console logging for convscope with per-crate debug flags.
//!
//! Log lines from the computational crates carry a bracketed subsystem tag
//! (`[CONV2D]`, `[CONV3D]`, `[ANIMATION]`, `[SESSION]`), so a single
//! `--debug-convscope-engine` flag is usually enough to follow one computation.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod init;

pub use cli::*;
pub use init::*;

/// Known convscope crate names for debug flags
pub const KNOWN_CRATES: &[&str] = &[
    "convscope-structures",
    "convscope-engine",
    "convscope-animation",
    "convscope-session",
    "convscope-config",
    "convscope-observability",
];
