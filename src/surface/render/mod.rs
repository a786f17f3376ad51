//! Reconstruction of C# declaration syntax from the metadata model.
//!
//! The renderer walks the filtered, ordered type tree and produces logical
//! output lines grouped by namespace. It never frames or reorders its own
//! output; that is the style strategy's job.

/// Attribute block rendering.
pub(crate) mod attrs;
/// Type and member declaration rendering.
pub(crate) mod decls;
/// Literal and enum-value rendering.
pub(crate) mod literals;
/// Member signature rendering.
pub(crate) mod members;
/// Type-name rendering.
pub(crate) mod types;

use super::annotations::NullableScope;
use super::error::Result;
use super::order::order_namespaces;
use super::visibility::{AttributeFilter, VisibilityLevel};
use crate::loader::Resolver;
use crate::model::{ModuleDoc, TypeDef};

/// Number of spaces per indentation level in rendered output.
const INDENT: &str = "    ";

/// How enum literal member values are written in enum declarations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnumLiteralStyle {
	/// Render values as hexadecimal (`0x03`).
	pub hexadecimal: bool,
	/// Render values as binary (`0b0000_0011`).
	pub binary: bool,
	/// Render values as character literals when the value maps to one.
	pub character: bool,
}

/// Immutable per-render configuration and collaborators, shared by reference
/// across the whole traversal.
pub(crate) struct Env<'a> {
	/// The module being rendered.
	pub module: &'a ModuleDoc,
	/// Resolver for externally defined enums.
	pub resolver: &'a Resolver,
	/// Configured visibility level.
	pub level: VisibilityLevel,
	/// Attribute retention policy.
	pub attrs: &'a AttributeFilter,
	/// Enum literal style options.
	pub enum_style: EnumLiteralStyle,
}

/// Immutable rendering context threaded by value down the call chain: the
/// current namespace (for abbreviating qualified names), the enclosing
/// nullability scope, and the indentation level. Never stored anywhere
/// long-lived.
#[derive(Clone, Copy)]
pub(crate) struct Ctx<'a> {
	/// Namespace the cursor is currently inside; empty at the global level.
	pub namespace: &'a str,
	/// Nullability default of the enclosing scope.
	pub scope: NullableScope,
	/// Current indentation depth, in units of four spaces.
	pub indent: usize,
}

impl<'a> Ctx<'a> {
	fn new(namespace: &'a str, scope: NullableScope) -> Self {
		Self {
			namespace,
			scope,
			indent: 0,
		}
	}

	/// Context one indentation level deeper.
	pub fn deeper(self) -> Self {
		Self {
			indent: self.indent + 1,
			..self
		}
	}

	/// Context with a nullability scope nested for an inner element.
	pub fn with_scope(self, scope: NullableScope) -> Self {
		Self { scope, ..self }
	}
}

/// Append one indented line.
pub(crate) fn push_line(lines: &mut Vec<String>, indent: usize, text: &str) {
	let mut line = String::with_capacity(indent * INDENT.len() + text.len());
	for _ in 0..indent {
		line.push_str(INDENT);
	}
	line.push_str(text);
	lines.push(line);
}

/// Append an empty separator line.
pub(crate) fn push_blank(lines: &mut Vec<String>) {
	lines.push(String::new());
}

/// One namespace worth of rendered lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceBlock {
	/// Namespace name; empty for the global namespace.
	pub name: String,
	/// Rendered type declarations, starting at column 0. Styles that wrap
	/// the block in a namespace declaration indent these as framing.
	pub lines: Vec<String>,
}

/// The renderer's complete logical output for one module, before styling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSurface {
	/// Simple name of the rendered assembly.
	pub assembly: String,
	/// Rendered assembly-level attribute lines.
	pub assembly_attributes: Vec<String>,
	/// Namespace sections in emission order.
	pub namespaces: Vec<NamespaceBlock>,
}

/// Render the module's filtered surface into logical lines.
pub(crate) fn render_surface(env: &Env<'_>) -> Result<RenderedSurface> {
	let module_scope = NullableScope::from_chain([env.module.attributes.as_slice()]);

	let assembly_attributes = attrs::attribute_lines(
		env,
		Ctx::new("", module_scope),
		&env.module.attributes,
		Some("assembly"),
	);

	let visible: Vec<&TypeDef> = env
		.module
		.types
		.iter()
		.filter(|ty| env.level.admits_type(ty))
		.collect();
	let groups = order_namespaces(&visible)?;

	let mut namespaces = Vec::with_capacity(groups.len());
	for group in groups {
		let mut lines = Vec::new();
		// Lines start at column 0; a style supplies any wrapper indentation.
		let ctx = Ctx::new(&group.name, module_scope);
		let mut first = true;
		for ty in group.types {
			if !first {
				push_blank(&mut lines);
			}
			first = false;
			decls::render_type(env, ctx, ty, &mut lines)?;
		}
		namespaces.push(NamespaceBlock {
			name: group.name.clone(),
			lines,
		});
	}

	Ok(RenderedSurface {
		assembly: env.module.assembly.clone(),
		assembly_attributes,
		namespaces,
	})
}
