//! Shared test utilities for the blockline workspace.
//!
//! This crate provides standardised test fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only and never published.
//!
//! # Modules
//!
//! - [`spy`]: recording [`BlockDelegate`](blockline_core::BlockDelegate) for
//!   asserting notification order and counts
//! - [`fixtures`]: locate and read the shared stream fixtures
//! - [`matchers`]: ready-made matchers for those fixtures
//! - [`logging`]: tracing subscriber setup for test binaries

pub mod fixtures;
pub mod logging;
pub mod matchers;
pub mod spy;
