//! Recursive type-name rendering.
//!
//! This is the one place that walks type structure, so it is also the one
//! place that advances the occurrence cursor: every node visited here maps to
//! exactly one [`visit_node`] call, keeping annotation slots aligned with the
//! rendered syntax.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::super::annotations::{Nullability, OccurrenceCursor, visit_node};
use super::Ctx;
use crate::model::{CallConv, TypeRef};

/// Fixed primitive-to-keyword substitutions.
static PRIMITIVE_KEYWORDS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
	HashMap::from([
		("System.Void", "void"),
		("System.Boolean", "bool"),
		("System.Char", "char"),
		("System.SByte", "sbyte"),
		("System.Byte", "byte"),
		("System.Int16", "short"),
		("System.UInt16", "ushort"),
		("System.Int32", "int"),
		("System.UInt32", "uint"),
		("System.Int64", "long"),
		("System.UInt64", "ulong"),
		("System.Single", "float"),
		("System.Double", "double"),
		("System.String", "string"),
		("System.Object", "object"),
		("System.Decimal", "decimal"),
	])
});

/// Abbreviate a fully qualified name against the current namespace.
pub(crate) fn qualify(ctx: Ctx<'_>, full_name: &str) -> String {
	if let Some(keyword) = PRIMITIVE_KEYWORDS.get(full_name) {
		return (*keyword).to_string();
	}
	if !ctx.namespace.is_empty() {
		if let Some(rest) = full_name.strip_prefix(ctx.namespace) {
			if let Some(simple) = rest.strip_prefix('.') {
				return simple.to_string();
			}
		}
	}
	full_name.to_string()
}

/// Render a type reference, consuming occurrence slots from `cursor`.
pub(crate) fn render_type_name(
	ctx: Ctx<'_>,
	cursor: &mut OccurrenceCursor<'_>,
	ty: &TypeRef,
) -> String {
	match ty {
		TypeRef::Named { name, args, .. } => {
			let facts = visit_node(cursor, ty);

			// Boxed nullable value type: Nullable<T> renders as T?.
			if name == "System.Nullable" && args.len() == 1 {
				let inner = render_type_name(ctx, cursor, &args[0]);
				return format!("{inner}?");
			}

			// Tuples, including the arity>7 flattening.
			if name == "System.ValueTuple" && args.len() >= 2 {
				return render_tuple(ctx, cursor, args);
			}

			if facts.native_int {
				return match name.as_str() {
					"System.UIntPtr" => "nuint".to_string(),
					_ => "nint".to_string(),
				};
			}

			if name == "System.Object" && facts.dynamic {
				return "dynamic".to_string();
			}

			let mut rendered = qualify(ctx, name);
			if !args.is_empty() {
				let rendered_args: Vec<_> = args
					.iter()
					.map(|arg| render_type_name(ctx, cursor, arg))
					.collect();
				rendered = format!("{rendered}<{}>", rendered_args.join(", "));
			}
			if facts.nullability == Nullability::Nullable && !is_value_type(ty) {
				rendered.push('?');
			}
			rendered
		}
		TypeRef::Array { element, rank } => {
			let facts = visit_node(cursor, ty);
			let inner = render_type_name(ctx, cursor, element);
			let commas = ",".repeat((*rank as usize).saturating_sub(1));
			let mut rendered = format!("{inner}[{commas}]");
			if facts.nullability == Nullability::Nullable {
				rendered.push('?');
			}
			rendered
		}
		TypeRef::Pointer { pointee } => {
			visit_node(cursor, ty);
			let inner = render_type_name(ctx, cursor, pointee);
			format!("{inner}*")
		}
		TypeRef::FnPtr { conv, params, ret } => {
			visit_node(cursor, ty);
			// Return slot precedes parameters in the signature blob, so it
			// consumes its slots first even though it renders last.
			let ret_rendered = render_type_name(ctx, cursor, ret);
			let mut rendered_params: Vec<_> = params
				.iter()
				.map(|p| render_type_name(ctx, cursor, p))
				.collect();
			rendered_params.push(ret_rendered);
			format!(
				"delegate*{}<{}>",
				calling_convention(*conv),
				rendered_params.join(", ")
			)
		}
		TypeRef::TypeParam { name, .. } => {
			let facts = visit_node(cursor, ty);
			if facts.nullability == Nullability::Nullable {
				format!("{name}?")
			} else {
				name.clone()
			}
		}
		TypeRef::Modified {
			modifier,
			required,
			inner,
		} => {
			// Only two modifiers have recognized syntax, and both are handled
			// at their use sites (the unmanaged constraint and ref-readonly
			// returns). Anything else is uninterpretable and surfaces as an
			// inline comment so it stays visible in diffs.
			let rendered = render_type_name(ctx, cursor, inner);
			let kind = if *required { "modreq" } else { "modopt" };
			format!("{rendered} /* {kind}({modifier}) */")
		}
	}
}

fn calling_convention(conv: CallConv) -> &'static str {
	match conv {
		CallConv::Managed => "",
		CallConv::Unmanaged => " unmanaged",
		CallConv::Cdecl => " unmanaged[Cdecl]",
		CallConv::Stdcall => " unmanaged[Stdcall]",
		CallConv::Thiscall => " unmanaged[Thiscall]",
		CallConv::Fastcall => " unmanaged[Fastcall]",
	}
}

fn is_value_type(ty: &TypeRef) -> bool {
	matches!(ty.unmodified(), TypeRef::Named { value_type: true, .. })
}

fn is_rest_tuple(ty: &TypeRef) -> Option<&[TypeRef]> {
	match ty.unmodified() {
		TypeRef::Named { name, args, .. } if name == "System.ValueTuple" && args.len() >= 2 => {
			Some(args)
		}
		_ => None,
	}
}

/// Render a tuple type, flattening the synthetic `Rest` slot used for arities
/// beyond seven. The synthetic slot advances the name cursor and the nested
/// tuple's structural slots without contributing an element of its own.
fn render_tuple(ctx: Ctx<'_>, cursor: &mut OccurrenceCursor<'_>, args: &[TypeRef]) -> String {
	let mut parts: Vec<String> = Vec::new();
	let mut current = args;
	loop {
		let flatten = if current.len() == 8 {
			is_rest_tuple(&current[7])
		} else {
			None
		};
		match flatten {
			Some(nested) => {
				for element in &current[..7] {
					parts.push(render_tuple_element(ctx, cursor, element));
				}
				cursor.skip_synthetic_tuple_slot();
				visit_node(cursor, &current[7]);
				current = nested;
			}
			None => {
				for element in current {
					parts.push(render_tuple_element(ctx, cursor, element));
				}
				break;
			}
		}
	}
	format!("({})", parts.join(", "))
}

fn render_tuple_element(
	ctx: Ctx<'_>,
	cursor: &mut OccurrenceCursor<'_>,
	element: &TypeRef,
) -> String {
	let name = cursor.tuple_element_name();
	let rendered = render_type_name(ctx, cursor, element);
	match name {
		Some(name) => format!("{rendered} {name}"),
		None => rendered,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::{Attribute, ConstantValue};
	use crate::surface::annotations::{
		AnnotationReader, DYNAMIC, NULLABLE, NullableScope, TUPLE_NAMES,
	};

	fn ctx() -> Ctx<'static> {
		Ctx {
			namespace: "N",
			scope: NullableScope::oblivious(),
			indent: 0,
		}
	}

	fn render_plain(ty: &TypeRef) -> String {
		let reader = AnnotationReader::empty();
		let mut cursor = OccurrenceCursor::new(&reader);
		render_type_name(ctx(), &mut cursor, ty)
	}

	fn render_with(attrs: Vec<Attribute>, ty: &TypeRef) -> String {
		let reader = AnnotationReader::for_element(&attrs, &NullableScope::oblivious());
		let mut cursor = OccurrenceCursor::new(&reader);
		render_type_name(ctx(), &mut cursor, ty)
	}

	fn nullable_attr(values: Vec<u8>) -> Attribute {
		Attribute::with_args(
			NULLABLE,
			vec![ConstantValue::Array(
				values.into_iter().map(ConstantValue::U1).collect(),
			)],
		)
	}

	#[test]
	fn primitive_keywords_substitute() {
		assert_eq!(render_plain(&TypeRef::named("System.Int32", true)), "int");
		assert_eq!(
			render_plain(&TypeRef::named("System.String", false)),
			"string"
		);
	}

	#[test]
	fn names_abbreviate_against_current_namespace() {
		assert_eq!(render_plain(&TypeRef::named("N.Widget", false)), "Widget");
		assert_eq!(
			render_plain(&TypeRef::named("Other.Widget", false)),
			"Other.Widget"
		);
	}

	#[test]
	fn boxed_nullable_unwraps() {
		let ty = TypeRef::generic(
			"System.Nullable",
			true,
			vec![TypeRef::named("System.Int32", true)],
		);
		assert_eq!(render_plain(&ty), "int?");
	}

	#[test]
	fn nullable_reference_gets_suffix() {
		let ty = TypeRef::named("System.String", false);
		assert_eq!(render_with(vec![nullable_attr(vec![2])], &ty), "string?");
		assert_eq!(render_with(vec![nullable_attr(vec![1])], &ty), "string");
	}

	#[test]
	fn nullable_array_of_nullable_elements() {
		let ty = TypeRef::Array {
			element: Box::new(TypeRef::named("System.String", false)),
			rank: 1,
		};
		assert_eq!(
			render_with(vec![nullable_attr(vec![2, 2])], &ty),
			"string?[]?"
		);
		assert_eq!(
			render_with(vec![nullable_attr(vec![1, 2])], &ty),
			"string?[]"
		);
	}

	#[test]
	fn multi_rank_arrays_render_commas() {
		let ty = TypeRef::Array {
			element: Box::new(TypeRef::named("System.Int32", true)),
			rank: 3,
		};
		assert_eq!(render_plain(&ty), "int[,,]");
	}

	#[test]
	fn dynamic_replaces_object_only_when_flagged() {
		let ty = TypeRef::named("System.Object", false);
		assert_eq!(render_plain(&ty), "object");
		let attrs = vec![Attribute::with_args(
			DYNAMIC,
			vec![ConstantValue::Array(vec![ConstantValue::Bool(true)])],
		)];
		assert_eq!(render_with(attrs, &ty), "dynamic");
	}

	#[test]
	fn pointer_types_render() {
		let ty = TypeRef::Pointer {
			pointee: Box::new(TypeRef::named("System.Byte", true)),
		};
		assert_eq!(render_plain(&ty), "byte*");
	}

	#[test]
	fn function_pointer_renders_convention() {
		let ty = TypeRef::FnPtr {
			conv: CallConv::Cdecl,
			params: vec![TypeRef::named("System.Int32", true)],
			ret: Box::new(TypeRef::named("System.Void", true)),
		};
		assert_eq!(render_plain(&ty), "delegate* unmanaged[Cdecl]<int, void>");
	}

	#[test]
	fn tuple_renders_element_names() {
		let ty = TypeRef::generic(
			"System.ValueTuple",
			true,
			vec![
				TypeRef::named("System.Int32", true),
				TypeRef::named("System.String", false),
			],
		);
		let attrs = vec![Attribute::with_args(
			TUPLE_NAMES,
			vec![ConstantValue::Array(vec![
				ConstantValue::Str("count".into()),
				ConstantValue::Str("label".into()),
			])],
		)];
		assert_eq!(render_with(attrs, &ty), "(int count, string label)");
	}

	#[test]
	fn nine_tuple_flattens_rest_slot() {
		let int = || TypeRef::named("System.Int32", true);
		let rest = TypeRef::generic("System.ValueTuple", true, vec![int(), int()]);
		let ty = TypeRef::generic(
			"System.ValueTuple",
			true,
			vec![
				int(),
				int(),
				int(),
				int(),
				int(),
				int(),
				int(),
				rest,
			],
		);
		assert_eq!(
			render_plain(&ty),
			"(int, int, int, int, int, int, int, int, int)"
		);
	}

	#[test]
	fn unrecognized_modifier_becomes_inline_comment() {
		let ty = TypeRef::Modified {
			modifier: "System.Runtime.CompilerServices.IsVolatile".into(),
			required: true,
			inner: Box::new(TypeRef::named("System.Int32", true)),
		};
		assert_eq!(
			render_plain(&ty),
			"int /* modreq(System.Runtime.CompilerServices.IsVolatile) */"
		);
	}

	#[test]
	fn generic_instantiation_renders_arguments() {
		let ty = TypeRef::generic(
			"System.Collections.Generic.List",
			false,
			vec![TypeRef::named("N.Widget", false)],
		);
		assert_eq!(
			render_plain(&ty),
			"System.Collections.Generic.List<Widget>"
		);
	}
}
