//! Foundation helpers for the bootstrapper.
//!
//! This module provides the small primitives used by every other module:
//! - [`escape_project_name`] - ASCII-safe, whitespace-free module key fragments
//! - [`native_path`], [`is_within`] - path separator and containment helpers
//! - [`line_at_offset`] - 1-based line numbers for byte offsets
//! - Domain constants (file extensions, derived property names)
//!
//! This module has NO dependencies on other vsproject modules.

pub mod constants;
mod escape;
mod paths;
mod position;

pub use escape::escape_project_name;
pub use paths::{absolute, is_within, native_path, resolve_relative};
pub use position::line_at_offset;
