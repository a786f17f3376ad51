//! Constant and enum-value rendering.
//!
//! Constants coming out of metadata are raw primitive values; this module
//! turns them back into the source expressions a reader expects, including
//! resolving enum-typed constants against their defining enum so `1` renders
//! as `SeekOrigin.Current` rather than a bare number.

use super::types::qualify;
use super::{Ctx, Env};
use crate::model::{ConstantValue, TypeDef};

/// Render a constant as a C# expression.
pub(crate) fn render_constant(env: &Env<'_>, ctx: Ctx<'_>, value: &ConstantValue) -> String {
	match value {
		ConstantValue::Null => "null".to_string(),
		ConstantValue::Bool(true) => "true".to_string(),
		ConstantValue::Bool(false) => "false".to_string(),
		ConstantValue::Char(c) => char_literal(*c),
		ConstantValue::I1(v) => v.to_string(),
		ConstantValue::U1(v) => v.to_string(),
		ConstantValue::I2(v) => v.to_string(),
		ConstantValue::U2(v) => v.to_string(),
		ConstantValue::I4(v) => v.to_string(),
		ConstantValue::U4(v) => format!("{v}u"),
		ConstantValue::I8(v) => format!("{v}L"),
		ConstantValue::U8(v) => format!("{v}UL"),
		ConstantValue::R4(v) => float_literal(*v),
		ConstantValue::R8(v) => double_literal(*v),
		ConstantValue::Str(s) => string_literal(s),
		ConstantValue::Type(name) => format!("typeof({})", qualify(ctx, name)),
		ConstantValue::Array(values) => {
			let parts: Vec<_> = values
				.iter()
				.map(|v| render_constant(env, ctx, v))
				.collect();
			format!("new[] {{ {} }}", parts.join(", "))
		}
		ConstantValue::Enum { enum_type, value } => enum_constant(env, ctx, enum_type, value),
	}
}

/// Render an enum-typed constant by name where possible.
///
/// Resolution order: an exact literal match, then a flags decomposition for
/// `[Flags]` enums, then a forced cast of the raw value. An enum whose
/// definition cannot be located anywhere also falls back to the cast form so
/// the value stays readable.
fn enum_constant(env: &Env<'_>, ctx: Ctx<'_>, enum_type: &str, value: &ConstantValue) -> String {
	let rendered_type = qualify(ctx, enum_type);
	let (Some(def), Some(raw)) = (
		env.resolver.find_enum(env.module, enum_type),
		value.as_integer(),
	) else {
		return forced_cast(env, ctx, &rendered_type, value);
	};

	for field in def.enum_literals() {
		if literal_value(field.constant.as_ref()) == Some(raw) {
			return format!("{rendered_type}.{}", field.name);
		}
	}

	if def.is_flags_enum() {
		if let Some(expr) = flags_expression(&rendered_type, def, raw) {
			return expr;
		}
	}

	forced_cast(env, ctx, &rendered_type, value)
}

fn literal_value(constant: Option<&ConstantValue>) -> Option<i128> {
	constant.and_then(ConstantValue::as_integer)
}

fn forced_cast(env: &Env<'_>, ctx: Ctx<'_>, rendered_type: &str, value: &ConstantValue) -> String {
	let raw = match value.as_integer() {
		Some(v) => v.to_string(),
		None => render_constant(env, ctx, value),
	};
	format!("({rendered_type}){raw}")
}

/// Decompose a flags value into an OR of member names, ascending by value.
/// Zero-valued members never participate. Bits not covered by any member are
/// emitted as one trailing cast term; a value matching no member at all yields
/// `None` so the caller can fall back to a plain cast.
fn flags_expression(rendered_type: &str, def: &TypeDef, raw: i128) -> Option<String> {
	let mut literals: Vec<(i128, &str)> = def
		.enum_literals()
		.filter_map(|f| literal_value(f.constant.as_ref()).map(|v| (v, f.name.as_str())))
		.filter(|(v, _)| *v != 0)
		.collect();
	literals.sort_by_key(|(v, _)| *v);

	let mut remaining = raw;
	let mut parts: Vec<String> = Vec::new();
	for (value, name) in literals {
		if remaining & value == value && value != 0 {
			parts.push(format!("{rendered_type}.{name}"));
			remaining &= !value;
		}
	}
	if parts.is_empty() {
		return None;
	}
	if remaining != 0 {
		parts.push(format!("({rendered_type}){remaining}"));
	}
	Some(parts.join(" | "))
}

/// Render an enum member's declared value inside its enum body, honoring the
/// configured literal style. Style priority is character, then hexadecimal,
/// then binary; negative values always render as plain decimal.
pub(crate) fn enum_member_value(env: &Env<'_>, value: i128) -> String {
	if env.enum_style.character && value >= 0 {
		if let Some(c) = u32::try_from(value).ok().and_then(char::from_u32) {
			if !c.is_control() && c != '\u{FFFD}' {
				return char_literal(c);
			}
		}
	}
	if env.enum_style.hexadecimal && value >= 0 {
		return format!("0x{value:02X}");
	}
	if env.enum_style.binary && value >= 0 {
		return binary_literal(value as u128);
	}
	value.to_string()
}

fn binary_literal(value: u128) -> String {
	let bits = format!("{value:b}");
	// Pad to a whole number of nibbles and group by four.
	let width = bits.len().div_ceil(4) * 4;
	let padded = format!("{value:0width$b}");
	let grouped: Vec<&str> = padded
		.as_bytes()
		.chunks(4)
		.map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
		.collect();
	format!("0b{}", grouped.join("_"))
}

fn double_literal(v: f64) -> String {
	if v.is_nan() {
		return "double.NaN".to_string();
	}
	if v == f64::INFINITY {
		return "double.PositiveInfinity".to_string();
	}
	if v == f64::NEG_INFINITY {
		return "double.NegativeInfinity".to_string();
	}
	// .NET's double.Epsilon is the smallest subnormal, bit pattern 1.
	if v.to_bits() == 1 {
		return "double.Epsilon".to_string();
	}
	if v.to_bits() == f64::MAX.to_bits() {
		return "double.MaxValue".to_string();
	}
	if v.to_bits() == f64::MIN.to_bits() {
		return "double.MinValue".to_string();
	}
	format!("{v:?}")
}

fn float_literal(v: f32) -> String {
	if v.is_nan() {
		return "float.NaN".to_string();
	}
	if v == f32::INFINITY {
		return "float.PositiveInfinity".to_string();
	}
	if v == f32::NEG_INFINITY {
		return "float.NegativeInfinity".to_string();
	}
	if v.to_bits() == 1 {
		return "float.Epsilon".to_string();
	}
	if v.to_bits() == f32::MAX.to_bits() {
		return "float.MaxValue".to_string();
	}
	if v.to_bits() == f32::MIN.to_bits() {
		return "float.MinValue".to_string();
	}
	format!("{v:?}f")
}

fn char_literal(c: char) -> String {
	match c {
		'\'' => "'\\''".to_string(),
		'\\' => "'\\\\'".to_string(),
		_ => match escape_common(c) {
			Some(escaped) => format!("'{escaped}'"),
			None => format!("'{c}'"),
		},
	}
}

fn string_literal(s: &str) -> String {
	let mut out = String::with_capacity(s.len() + 2);
	out.push('"');
	for c in s.chars() {
		match c {
			'"' => out.push_str("\\\""),
			'\\' => out.push_str("\\\\"),
			_ => match escape_common(c) {
				Some(escaped) => out.push_str(&escaped),
				None => out.push(c),
			},
		}
	}
	out.push('"');
	out
}

fn escape_common(c: char) -> Option<String> {
	match c {
		'\0' => Some("\\0".to_string()),
		'\n' => Some("\\n".to_string()),
		'\r' => Some("\\r".to_string()),
		'\t' => Some("\\t".to_string()),
		c if c.is_control() => Some(format!("\\u{:04X}", c as u32)),
		_ => None,
	}
}
