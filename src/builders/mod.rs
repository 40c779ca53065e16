//! # Builders
//!
//! This module provides builder patterns for configuring the decrypt pipeline.
//!
//! ## Modules
//!
//! - [`decrypt_opts`] - Options for a single [`decrypt`](crate::decrypt) call
//!
//! ## Usage
//!
//! Builders provide a fluent API with safe defaults and optional customization.

pub mod decrypt_opts;

pub use decrypt_opts::DecryptOpts;
