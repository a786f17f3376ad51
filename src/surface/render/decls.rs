//! Type declaration rendering.

use super::super::annotations;
use super::super::error::Result;
use super::super::order::order_members;
use super::attrs::{attribute_lines, inline_attributes};
use super::literals::enum_member_value;
use super::members::{
	annotated_type, render_constructor, render_event, render_field, render_method,
	render_property,
};
use super::types::qualify;
use super::{Ctx, Env, push_blank, push_line};
use crate::model::{
	Attribute, ConstantValue, GenericParam, Method, TypeDef, TypeKind, TypeRef, Variance,
};

fn has_attr(attributes: &[Attribute], name: &str) -> bool {
	attributes.iter().any(|a| a.name == name)
}

/// Generic parameter list with variance keywords, e.g. `<out T, U>`.
fn generic_param_list(params: &[GenericParam]) -> String {
	if params.is_empty() {
		return String::new();
	}
	let rendered: Vec<_> = params
		.iter()
		.map(|p| match p.variance {
			Variance::Covariant => format!("out {}", p.name),
			Variance::Contravariant => format!("in {}", p.name),
			Variance::None => p.name.clone(),
		})
		.collect();
	format!("<{}>", rendered.join(", "))
}

/// One `where` clause for a generic parameter, or `None` when the parameter
/// is unconstrained. Primary constraints come first, type constraints sorted
/// by rendered name, `new()` last; a `struct` constraint subsumes `new()`.
pub(crate) fn constraint_clause(ctx: Ctx<'_>, param: &GenericParam) -> Option<String> {
	let mut parts: Vec<String> = Vec::new();
	if param.value_constraint {
		if has_attr(&param.attributes, annotations::IS_UNMANAGED) {
			parts.push("unmanaged".to_string());
		} else {
			parts.push("struct".to_string());
		}
	} else if param.reference_constraint {
		parts.push("class".to_string());
	}

	// System.ValueType backs the struct/unmanaged constraints and never
	// appears in source form.
	let mut type_constraints: Vec<String> = param
		.constraints
		.iter()
		.filter(|c| !matches!(c.unmodified(), TypeRef::Named { name, .. } if name == "System.ValueType"))
		.map(|c| annotated_type(ctx, &param.attributes, c))
		.collect();
	type_constraints.sort();
	parts.extend(type_constraints);

	if param.ctor_constraint && !param.value_constraint {
		parts.push("new()".to_string());
	}

	if parts.is_empty() {
		None
	} else {
		Some(format!("where {} : {}", param.name, parts.join(", ")))
	}
}

/// Modifier keywords preceding the kind keyword of a type header.
fn type_modifiers(ty: &TypeDef) -> String {
	let mut out = String::new();
	out.push_str(ty.access.keyword());
	out.push(' ');
	match ty.kind {
		TypeKind::Class => {
			// Abstract and sealed together is how `static class` compiles.
			if ty.is_abstract && ty.is_sealed {
				out.push_str("static ");
			} else if ty.is_abstract {
				out.push_str("abstract ");
			} else if ty.is_sealed {
				out.push_str("sealed ");
			}
		}
		TypeKind::Struct => {
			if has_attr(&ty.attributes, annotations::IS_READONLY) {
				out.push_str("readonly ");
			}
			if has_attr(&ty.attributes, annotations::IS_BYREF_LIKE) {
				out.push_str("ref ");
			}
		}
		TypeKind::Interface | TypeKind::Enum | TypeKind::Delegate => {}
	}
	out
}

/// Base-class and interface clause, `: Base, IFirst, ISecond`. Implicit bases
/// (`System.Object`, `System.ValueType`, `System.Enum`) are elided; interfaces
/// re-sort by rendered name so declaration order cannot leak through.
fn base_clause(env: &Env<'_>, ctx: Ctx<'_>, ty: &TypeDef) -> String {
	const IMPLICIT_BASES: &[&str] = &["System.Object", "System.ValueType", "System.Enum"];

	let mut entries: Vec<String> = Vec::new();
	if let Some(base) = &ty.base {
		let implicit = matches!(
			base.unmodified(),
			TypeRef::Named { name, .. } if IMPLICIT_BASES.contains(&name.as_str())
		);
		if !implicit {
			entries.push(annotated_type(ctx, &ty.attributes, base));
		}
	}

	let mut interfaces: Vec<String> = ty
		.interfaces
		.iter()
		.map(|i| {
			format!(
				"{}{}",
				inline_attributes(env, ctx, &i.attributes),
				annotated_type(ctx, &i.attributes, &i.ty)
			)
		})
		.collect();
	interfaces.sort();
	entries.extend(interfaces);

	if entries.is_empty() {
		String::new()
	} else {
		format!(" : {}", entries.join(", "))
	}
}

/// Render one type declaration, nested types included, into `lines`.
pub(crate) fn render_type(
	env: &Env<'_>,
	ctx: Ctx<'_>,
	ty: &TypeDef,
	lines: &mut Vec<String>,
) -> Result<()> {
	let ctx = ctx.with_scope(ctx.scope.nest(&ty.attributes));
	for attr_line in attribute_lines(env, ctx, &ty.attributes, None) {
		push_line(lines, ctx.indent, &attr_line);
	}

	match ty.kind {
		TypeKind::Enum => render_enum(env, ctx, ty, lines),
		TypeKind::Delegate => render_delegate(env, ctx, ty, lines),
		_ => render_body_type(env, ctx, ty, lines)?,
	}
	Ok(())
}

fn render_enum(env: &Env<'_>, ctx: Ctx<'_>, ty: &TypeDef, lines: &mut Vec<String>) {
	let mut header = format!("{}enum {}", type_modifiers(ty), ty.name);
	let underlying = ty.enum_underlying();
	let implicit = matches!(&underlying, TypeRef::Named { name, .. } if name == "System.Int32");
	if !implicit {
		if let TypeRef::Named { name, .. } = &underlying {
			header.push_str(" : ");
			header.push_str(&qualify(ctx, name));
		}
	}
	push_line(lines, ctx.indent, &header);
	push_line(lines, ctx.indent, "{");

	// Literal members order by value, not name, so that flag enums read in
	// bit order.
	let mut literals: Vec<(i128, &str, &[Attribute])> = ty
		.enum_literals()
		.filter_map(|f| {
			f.constant
				.as_ref()
				.and_then(ConstantValue::as_integer)
				.map(|v| (v, f.name.as_str(), f.attributes.as_slice()))
		})
		.collect();
	literals.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));

	let body = ctx.deeper();
	for (value, name, attributes) in literals {
		for attr_line in attribute_lines(env, body, attributes, None) {
			push_line(lines, body.indent, &attr_line);
		}
		let rendered = enum_member_value(env, value);
		push_line(lines, body.indent, &format!("{name} = {rendered},"));
	}
	push_line(lines, ctx.indent, "}");
}

fn render_delegate(env: &Env<'_>, ctx: Ctx<'_>, ty: &TypeDef, lines: &mut Vec<String>) {
	// The signature lives on the compiler-generated Invoke method.
	let invoke = ty.methods.iter().find(|m| m.name == "Invoke");

	let (ret, params) = match invoke {
		Some(invoke) => (
			annotated_type(ctx, &invoke.returns.attributes, &invoke.returns.ty),
			delegate_params(env, ctx, invoke),
		),
		None => ("void".to_string(), String::new()),
	};

	let mut line = format!(
		"{}delegate {ret} {}{}({params})",
		type_modifiers(ty),
		ty.name,
		generic_param_list(&ty.generic_params)
	);
	for param in &ty.generic_params {
		if let Some(clause) = constraint_clause(ctx, param) {
			line.push(' ');
			line.push_str(&clause);
		}
	}
	line.push(';');
	push_line(lines, ctx.indent, &line);
}

fn delegate_params(env: &Env<'_>, ctx: Ctx<'_>, invoke: &Method) -> String {
	use crate::model::RefKind;
	let rendered: Vec<_> = invoke
		.params
		.iter()
		.map(|p| {
			let mut out = inline_attributes(env, ctx, &p.attributes);
			match p.by_ref {
				Some(RefKind::Ref) => out.push_str("ref "),
				Some(RefKind::Out) => out.push_str("out "),
				Some(RefKind::In) => out.push_str("in "),
				None => {}
			}
			out.push_str(&annotated_type(ctx, &p.attributes, &p.ty));
			out.push(' ');
			out.push_str(&p.name);
			out
		})
		.collect();
	rendered.join(", ")
}

fn kind_keyword(kind: TypeKind) -> &'static str {
	match kind {
		TypeKind::Class => "class",
		TypeKind::Struct => "struct",
		TypeKind::Interface => "interface",
		TypeKind::Enum => "enum",
		TypeKind::Delegate => "delegate",
	}
}

fn render_body_type(
	env: &Env<'_>,
	ctx: Ctx<'_>,
	ty: &TypeDef,
	lines: &mut Vec<String>,
) -> Result<()> {
	let header = format!(
		"{}{} {}{}{}",
		type_modifiers(ty),
		kind_keyword(ty.kind),
		ty.name,
		generic_param_list(&ty.generic_params),
		base_clause(env, ctx, ty)
	);
	push_line(lines, ctx.indent, &header);
	for param in &ty.generic_params {
		if let Some(clause) = constraint_clause(ctx, param) {
			push_line(lines, ctx.indent + 1, &clause);
		}
	}
	push_line(lines, ctx.indent, "{");

	let in_interface = ty.kind == TypeKind::Interface;
	let body = ctx.deeper();
	let members = order_members(ty, env.level)?;

	for field in &members.fields {
		render_field(env, body, field, lines);
	}
	for ctor in &members.constructors {
		render_constructor(env, body, &ty.name, ctor, lines);
	}
	for property in &members.properties {
		render_property(env, body, in_interface, property, lines);
	}
	for event in &members.events {
		render_event(env, body, in_interface, event, lines);
	}
	for method in &members.methods {
		render_method(env, body, in_interface, method, lines);
	}
	for nested in &members.nested {
		push_blank(lines);
		render_type(env, body, nested, lines)?;
	}

	push_line(lines, ctx.indent, "}");
	Ok(())
}
