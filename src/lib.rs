//! Core library for cilsurf, rendering API surface snapshots of compiled
//! .NET modules.
//!
//! The input is a module metadata document (see [`model`]); the output is a
//! deterministic, diffable text rendition of the module's public API surface.
//! The high-level [`Surface`] builder orchestrates visibility filtering,
//! annotation classification, ordering and rendering, and is UI-agnostic: the
//! bundled CLI is one frontend over it.

/// Document loading and cross-module reference resolution.
pub mod loader;

/// The module metadata document model.
pub mod model;

/// Filtering, ordering, rendering and styling of API surfaces.
pub mod surface;

pub use crate::surface::{
	EnumLiteralStyle, MarkdownStyle, OutputStyle, PlainStyle, Result, Surface, SurfError,
	VisibilityLevel,
};
