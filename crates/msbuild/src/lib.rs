//! # csprojman-msbuild
//!
//! MSBuild project file support for csprojman.
//!
//! Parses `.csproj` files with quick-xml into an editable [`ProjectDocument`]
//! that writes back everything it does not touch, finds `Import` and
//! `PropertyGroup` entries in it, and provides the two project edits the CLI
//! applies: StyleCop target injection and `OutputPath` rewriting.

pub mod document;
pub mod finder;
pub mod output_path;
pub mod patch;
pub mod style_cop;

pub use document::{ElementId, ProjectDocument};
pub use patch::{OutputPathPatch, ProjectPatch, StyleCopPatch};
