//! The surface pipeline: visibility filtering, deterministic ordering and
//! declaration rendering, followed by style framing.

/// Compiler-synthesized annotation classification.
pub mod annotations;
/// Error types.
pub mod error;
/// Deterministic namespace/type/member ordering.
pub mod order;
pub(crate) mod render;
/// Output style strategies.
pub mod style;
/// Visibility and attribute filtering.
pub mod visibility;

pub use error::{Result, SurfError};
pub use render::{EnumLiteralStyle, NamespaceBlock, RenderedSurface};
pub use style::{MarkdownStyle, OutputStyle, PlainStyle};
pub use visibility::VisibilityLevel;

use crate::loader::Resolver;
use crate::model::ModuleDoc;
use render::Env;
use visibility::AttributeFilter;

/// Configuration for one surface render, assembled builder-style.
///
/// ```
/// use cilsurf::model::ModuleDoc;
/// use cilsurf::loader::Resolver;
/// use cilsurf::surface::{Surface, VisibilityLevel};
///
/// let doc = ModuleDoc::new("Lib");
/// let text = Surface::new()
/// 	.with_visibility(VisibilityLevel::PublicAndInternal)
/// 	.render(&doc, &Resolver::empty())
/// 	.unwrap();
/// assert!(text.starts_with("// Assembly: Lib"));
/// ```
pub struct Surface {
	level: VisibilityLevel,
	include_attributes: Vec<String>,
	exclude_attributes: Vec<String>,
	enum_style: EnumLiteralStyle,
	style: Box<dyn OutputStyle>,
}

impl Default for Surface {
	fn default() -> Self {
		Self::new()
	}
}

impl Surface {
	/// Public-only surface in the plain style, with no attribute filters.
	pub fn new() -> Self {
		Self {
			level: VisibilityLevel::default(),
			include_attributes: Vec::new(),
			exclude_attributes: Vec::new(),
			enum_style: EnumLiteralStyle::default(),
			style: Box::new(PlainStyle),
		}
	}

	/// Set the visibility level.
	pub fn with_visibility(mut self, level: VisibilityLevel) -> Self {
		self.level = level;
		self
	}

	/// Set the output style.
	pub fn with_style(mut self, style: Box<dyn OutputStyle>) -> Self {
		self.style = style;
		self
	}

	/// Add an attribute include pattern (`*`/`?` wildcards). Any include
	/// pattern switches attribute rendering to allow-list semantics.
	pub fn with_included_attribute(mut self, pattern: impl Into<String>) -> Self {
		self.include_attributes.push(pattern.into());
		self
	}

	/// Add an attribute exclude pattern (`*`/`?` wildcards).
	pub fn with_excluded_attribute(mut self, pattern: impl Into<String>) -> Self {
		self.exclude_attributes.push(pattern.into());
		self
	}

	/// Set how enum member values are written.
	pub fn with_enum_style(mut self, enum_style: EnumLiteralStyle) -> Self {
		self.enum_style = enum_style;
		self
	}

	/// Render the module's surface to its final text form.
	///
	/// Output is a pure function of the document content and this
	/// configuration; the declaration order inside `module` never shows
	/// through.
	pub fn render(&self, module: &ModuleDoc, resolver: &Resolver) -> Result<String> {
		let filter = AttributeFilter::new(&self.include_attributes, &self.exclude_attributes)?;
		let env = Env {
			module,
			resolver,
			level: self.level,
			attrs: &filter,
			enum_style: self.enum_style,
		};
		let rendered = render::render_surface(&env)?;
		Ok(self.style.emit(&rendered))
	}
}
