//! Attribute block rendering.

use super::literals::render_constant;
use super::types::qualify;
use super::{Ctx, Env};
use crate::model::Attribute;

/// Render retained attributes as one `[...]` block per line, optionally with
/// a target specifier such as `assembly`. Lines carry no indentation; callers
/// indent them where they land.
pub(crate) fn attribute_lines(
	env: &Env<'_>,
	ctx: Ctx<'_>,
	attributes: &[Attribute],
	target: Option<&str>,
) -> Vec<String> {
	env.attrs
		.retained(attributes)
		.into_iter()
		.map(|attr| match target {
			Some(target) => format!("[{target}: {}]", render_attribute(env, ctx, attr)),
			None => format!("[{}]", render_attribute(env, ctx, attr)),
		})
		.collect()
}

/// Render retained attributes as inline blocks preceding a declaration
/// fragment, e.g. a parameter. Returns an empty string when nothing survives
/// filtering; otherwise the blocks come with a trailing space.
pub(crate) fn inline_attributes(env: &Env<'_>, ctx: Ctx<'_>, attributes: &[Attribute]) -> String {
	let retained = env.attrs.retained(attributes);
	if retained.is_empty() {
		return String::new();
	}
	let blocks: Vec<_> = retained
		.iter()
		.map(|attr| format!("[{}]", render_attribute(env, ctx, attr)))
		.collect();
	format!("{} ", blocks.join(" "))
}

fn render_attribute(env: &Env<'_>, ctx: Ctx<'_>, attribute: &Attribute) -> String {
	let name = display_name(ctx, &attribute.name);
	let mut args: Vec<String> = attribute
		.args
		.iter()
		.map(|value| render_constant(env, ctx, value))
		.collect();

	// Named arguments render after positionals, sorted by name so the output
	// does not depend on blob encoding order.
	let mut named: Vec<_> = attribute.named.iter().collect();
	named.sort_by(|a, b| a.name.cmp(&b.name));
	for arg in named {
		args.push(format!("{} = {}", arg.name, render_constant(env, ctx, &arg.value)));
	}

	if args.is_empty() {
		name
	} else {
		format!("{name}({})", args.join(", "))
	}
}

/// Attribute names drop the conventional `Attribute` suffix in source form.
fn display_name(ctx: Ctx<'_>, full_name: &str) -> String {
	let qualified = qualify(ctx, full_name);
	match qualified.strip_suffix("Attribute") {
		Some(stripped) if !stripped.is_empty() && !stripped.ends_with('.') => {
			stripped.to_string()
		}
		_ => qualified,
	}
}
