//! Output style strategies.
//!
//! A style takes the renderer's logical output and frames it for a target
//! medium. Styles only add framing (headers, wrappers, fences, wrapper
//! indentation); they never reorder, drop or reword declaration lines, so
//! every style is diffable against every other.

use super::render::RenderedSurface;

/// Placeholder heading for the global namespace in styles that need one.
const GLOBAL_NAMESPACE_LABEL: &str = "<global>";

/// Frames a [`RenderedSurface`] into final output text.
pub trait OutputStyle {
	/// Emit the complete output document, trailing newline included.
	fn emit(&self, surface: &RenderedSurface) -> String;
}

/// C#-like plain text: a header comment, assembly attributes, then each
/// namespace wrapped in a `namespace` block. Global-namespace types appear
/// unwrapped at the top level.
#[derive(Debug, Default)]
pub struct PlainStyle;

impl OutputStyle for PlainStyle {
	fn emit(&self, surface: &RenderedSurface) -> String {
		let mut out = Vec::new();
		out.push(format!("// Assembly: {}", surface.assembly));

		if !surface.assembly_attributes.is_empty() {
			out.push(String::new());
			out.extend(surface.assembly_attributes.iter().cloned());
		}

		for block in &surface.namespaces {
			out.push(String::new());
			if block.name.is_empty() {
				out.extend(block.lines.iter().cloned());
			} else {
				out.push(format!("namespace {}", block.name));
				out.push("{".to_string());
				out.extend(block.lines.iter().map(|l| indent_one_level(l)));
				out.push("}".to_string());
			}
		}

		let mut text = out.join("\n");
		text.push('\n');
		text
	}
}

/// Markdown: a title heading per assembly, a heading per namespace, and the
/// declarations inside fenced `csharp` code blocks.
#[derive(Debug, Default)]
pub struct MarkdownStyle;

impl OutputStyle for MarkdownStyle {
	fn emit(&self, surface: &RenderedSurface) -> String {
		let mut out = Vec::new();
		out.push(format!("# {}", surface.assembly));

		if !surface.assembly_attributes.is_empty() {
			out.push(String::new());
			out.push("## Assembly attributes".to_string());
			out.push(String::new());
			out.push("```csharp".to_string());
			out.extend(surface.assembly_attributes.iter().cloned());
			out.push("```".to_string());
		}

		for block in &surface.namespaces {
			let label = if block.name.is_empty() {
				GLOBAL_NAMESPACE_LABEL
			} else {
				block.name.as_str()
			};
			out.push(String::new());
			out.push(format!("## {label}"));
			out.push(String::new());
			out.push("```csharp".to_string());
			out.extend(block.lines.iter().cloned());
			out.push("```".to_string());
		}

		let mut text = out.join("\n");
		text.push('\n');
		text
	}
}

/// Wrapper indentation for lines inside a `namespace` block. Blank separator
/// lines stay empty so the output carries no trailing whitespace.
fn indent_one_level(line: &str) -> String {
	if line.is_empty() {
		String::new()
	} else {
		format!("    {line}")
	}
}
