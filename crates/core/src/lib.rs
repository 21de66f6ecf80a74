//! # csprojman-core
//!
//! Shared vocabulary for csprojman: the element, attribute and file-name
//! constants used when patching MSBuild projects, and the [`Diagnostic`]
//! type every recoverable problem is reported through.

pub mod constants;
pub mod diagnostic;

pub use diagnostic::Diagnostic;
