//! Module tree synthesis.
//!
//! [`ModelBuilder`] drives the whole pipeline for one analyzed root:
//!
//! ```text
//! locate .sln ─► solution::parse ─► per entry: filter ─► project::parse
//!                                               ─► classify files ─► locate artifact
//!                                               ─► Module ─► ModuleSink::add_module
//! ```
//!
//! The host tree is only touched through [`ModuleSink`], so parsers and the
//! artifact locator stay independent of it.

mod model_builder;
mod sink;

pub use model_builder::ModelBuilder;
pub use sink::{Module, ModuleSink, RootModule};
