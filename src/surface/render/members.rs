//! Member declaration rendering: fields, constructors, methods, operators,
//! properties, indexers and events.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::super::annotations::{
	self, AnnotationReader, OccurrenceCursor,
};
use super::attrs::{attribute_lines, inline_attributes};
use super::literals::render_constant;
use super::types::render_type_name;
use super::{Ctx, Env, push_line};
use crate::model::{
	Accessibility, Accessor, Attribute, Event, Field, MemberFlags, Method, Param, Property,
	RefKind, TypeRef,
};

/// Binary and unary operator method names and their C# operator tokens.
/// Conversion operators (`op_Implicit`/`op_Explicit`) take a different
/// declaration shape and are handled separately.
static OPERATOR_TOKENS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
	HashMap::from([
		("op_UnaryPlus", "+"),
		("op_UnaryNegation", "-"),
		("op_LogicalNot", "!"),
		("op_OnesComplement", "~"),
		("op_Increment", "++"),
		("op_Decrement", "--"),
		("op_True", "true"),
		("op_False", "false"),
		("op_Addition", "+"),
		("op_Subtraction", "-"),
		("op_Multiply", "*"),
		("op_Division", "/"),
		("op_Modulus", "%"),
		("op_BitwiseAnd", "&"),
		("op_BitwiseOr", "|"),
		("op_ExclusiveOr", "^"),
		("op_LeftShift", "<<"),
		("op_RightShift", ">>"),
		("op_UnsignedRightShift", ">>>"),
		("op_Equality", "=="),
		("op_Inequality", "!="),
		("op_LessThan", "<"),
		("op_GreaterThan", ">"),
		("op_LessThanOrEqual", "<="),
		("op_GreaterThanOrEqual", ">="),
		("op_CheckedAddition", "checked +"),
		("op_CheckedSubtraction", "checked -"),
		("op_CheckedMultiply", "checked *"),
		("op_CheckedDivision", "checked /"),
		("op_CheckedIncrement", "checked ++"),
		("op_CheckedDecrement", "checked --"),
		("op_CheckedUnaryNegation", "checked -"),
		("op_AdditionAssignment", "+="),
		("op_SubtractionAssignment", "-="),
		("op_MultiplicationAssignment", "*="),
		("op_DivisionAssignment", "/="),
		("op_ModulusAssignment", "%="),
		("op_BitwiseAndAssignment", "&="),
		("op_BitwiseOrAssignment", "|="),
		("op_ExclusiveOrAssignment", "^="),
		("op_LeftShiftAssignment", "<<="),
		("op_RightShiftAssignment", ">>="),
		("op_UnsignedRightShiftAssignment", ">>>="),
	])
});

/// Render a type reference under an element's own annotation attributes.
pub(crate) fn annotated_type(ctx: Ctx<'_>, attributes: &[Attribute], ty: &TypeRef) -> String {
	let reader = AnnotationReader::for_element(attributes, &ctx.scope);
	let mut cursor = OccurrenceCursor::new(&reader);
	render_type_name(ctx, &mut cursor, ty)
}

fn has_attr(attributes: &[Attribute], name: &str) -> bool {
	attributes.iter().any(|a| a.name == name)
}

/// Accessibility rank, most permissive first, used to pick the property-level
/// accessibility from its accessors.
fn access_rank(access: Accessibility) -> u8 {
	match access {
		Accessibility::Public => 6,
		Accessibility::ProtectedInternal => 5,
		Accessibility::Protected => 4,
		Accessibility::Internal => 3,
		Accessibility::PrivateProtected => 2,
		Accessibility::Private => 1,
	}
}

/// Inheritance-related modifier keywords reconstructed from metadata flags.
///
/// The flag combinations are not one-to-one with source keywords: an override
/// is a virtual method that reuses its base slot, and a method that is both
/// final and slot-reusing was declared `sealed override`. A virtual method
/// that is final in its own new slot is an interface-implementation artifact
/// and carries no source keyword at all.
fn inheritance_modifiers(flags: MemberFlags, attributes: &[Attribute]) -> &'static str {
	if flags.contains(MemberFlags::ABSTRACT) {
		return if flags.contains(MemberFlags::VIRTUAL) && !flags.contains(MemberFlags::NEW_SLOT) {
			"abstract override "
		} else {
			"abstract "
		};
	}
	if has_attr(attributes, annotations::PRESERVE_BASE_OVERRIDES) {
		// Covariant override: the runtime needs a new slot, the source said
		// `override`.
		return "override ";
	}
	if flags.contains(MemberFlags::VIRTUAL) {
		if !flags.contains(MemberFlags::NEW_SLOT) {
			return if flags.contains(MemberFlags::FINAL) {
				"sealed override "
			} else {
				"override "
			};
		}
		if !flags.contains(MemberFlags::FINAL) {
			return "virtual ";
		}
	}
	""
}

fn member_prefix(
	access: Accessibility,
	flags: MemberFlags,
	attributes: &[Attribute],
	in_interface: bool,
) -> String {
	let mut out = String::new();
	if !in_interface {
		out.push_str(access.keyword());
		out.push(' ');
	}
	if flags.contains(MemberFlags::STATIC) {
		out.push_str("static ");
	}
	if !in_interface {
		out.push_str(inheritance_modifiers(flags, attributes));
	}
	if flags.contains(MemberFlags::READONLY) {
		out.push_str("readonly ");
	}
	out
}

/// Render one field declaration.
pub(crate) fn render_field(env: &Env<'_>, ctx: Ctx<'_>, field: &Field, lines: &mut Vec<String>) {
	let ctx = ctx.with_scope(ctx.scope.nest(&field.attributes));
	for attr_line in attribute_lines(env, ctx, &field.attributes, None) {
		push_line(lines, ctx.indent, &attr_line);
	}

	let mut line = String::new();
	line.push_str(field.access.keyword());
	line.push(' ');
	if field.is_literal {
		line.push_str("const ");
	} else {
		if field.is_static {
			line.push_str("static ");
		}
		if field.is_readonly {
			line.push_str("readonly ");
		}
		if has_attr(&field.attributes, annotations::REQUIRED_MEMBER) {
			line.push_str("required ");
		}
	}
	line.push_str(&annotated_type(ctx, &field.attributes, &field.ty));
	line.push(' ');
	line.push_str(&field.name);
	if let Some(constant) = &field.constant {
		line.push_str(" = ");
		line.push_str(&render_constant(env, ctx, constant));
	}
	line.push(';');
	push_line(lines, ctx.indent, &line);
}

fn render_param(env: &Env<'_>, ctx: Ctx<'_>, param: &Param, is_extension_this: bool) -> String {
	let mut out = inline_attributes(env, ctx, &param.attributes);
	if is_extension_this {
		out.push_str("this ");
	}
	if has_attr(&param.attributes, annotations::PARAM_ARRAY) {
		out.push_str("params ");
	}
	match param.by_ref {
		Some(RefKind::Ref) => out.push_str("ref "),
		Some(RefKind::Out) => out.push_str("out "),
		Some(RefKind::In) => out.push_str("in "),
		None => {}
	}
	out.push_str(&annotated_type(ctx, &param.attributes, &param.ty));
	out.push(' ');
	out.push_str(&param.name);
	if let Some(default) = &param.default {
		out.push_str(" = ");
		out.push_str(&render_constant(env, ctx, default));
	}
	out
}

fn render_params(env: &Env<'_>, ctx: Ctx<'_>, method: &Method) -> String {
	let extension = has_attr(&method.attributes, annotations::EXTENSION);
	let rendered: Vec<_> = method
		.params
		.iter()
		.enumerate()
		.map(|(i, p)| render_param(env, ctx, p, extension && i == 0))
		.collect();
	rendered.join(", ")
}

/// Peel the `modreq(InAttribute)` wrapper off a `ref readonly` return type;
/// the keyword form carries the information instead.
fn peel_in_modifier(ty: &TypeRef) -> &TypeRef {
	match ty {
		TypeRef::Modified {
			modifier,
			required: true,
			inner,
		} if modifier == annotations::IN_ATTRIBUTE => inner,
		other => other,
	}
}

fn return_prefix(method: &Method) -> &'static str {
	if method.returns.by_ref {
		if method.returns.readonly {
			"ref readonly "
		} else {
			"ref "
		}
	} else {
		""
	}
}

fn generic_param_names(method: &Method) -> String {
	if method.generic_params.is_empty() {
		return String::new();
	}
	let names: Vec<_> = method
		.generic_params
		.iter()
		.map(|p| p.name.as_str())
		.collect();
	format!("<{}>", names.join(", "))
}

/// Inline `where` clauses for a method's generic parameters.
fn method_constraints(ctx: Ctx<'_>, method: &Method) -> String {
	let mut out = String::new();
	for param in &method.generic_params {
		if let Some(clause) = super::decls::constraint_clause(ctx, param) {
			out.push(' ');
			out.push_str(&clause);
		}
	}
	out
}

/// Render one constructor. Instance constructors take the declaring type's
/// simple name; a `.cctor` becomes a parameterless static constructor.
pub(crate) fn render_constructor(
	env: &Env<'_>,
	ctx: Ctx<'_>,
	type_name: &str,
	method: &Method,
	lines: &mut Vec<String>,
) {
	let ctx = ctx.with_scope(ctx.scope.nest(&method.attributes));
	for attr_line in attribute_lines(env, ctx, &method.attributes, None) {
		push_line(lines, ctx.indent, &attr_line);
	}

	let line = if method.name == ".cctor" {
		format!("static {type_name}();")
	} else {
		format!(
			"{}{type_name}({});",
			method.access.keyword().to_owned() + " ",
			render_params(env, ctx, method)
		)
	};
	push_line(lines, ctx.indent, &line);
}

/// Render one method, operator or conversion declaration.
pub(crate) fn render_method(
	env: &Env<'_>,
	ctx: Ctx<'_>,
	in_interface: bool,
	method: &Method,
	lines: &mut Vec<String>,
) {
	let ctx = ctx.with_scope(ctx.scope.nest(&method.attributes));
	for attr_line in attribute_lines(env, ctx, &method.attributes, None) {
		push_line(lines, ctx.indent, &attr_line);
	}
	for attr_line in attribute_lines(env, ctx, &method.returns.attributes, Some("return")) {
		push_line(lines, ctx.indent, &attr_line);
	}

	let prefix = member_prefix(method.access, method.flags, &method.attributes, in_interface);
	let params = render_params(env, ctx, method);

	let line = if method.name == "op_Implicit"
		|| method.name == "op_Explicit"
		|| method.name == "op_CheckedExplicit"
	{
		let keyword = match method.name.as_str() {
			"op_Implicit" => "implicit operator",
			"op_Explicit" => "explicit operator",
			_ => "explicit operator checked",
		};
		let target = annotated_type(
			ctx,
			&method.returns.attributes,
			peel_in_modifier(&method.returns.ty),
		);
		format!("{prefix}{keyword} {target}({params});")
	} else if let Some(token) = method
		.name
		.strip_prefix("op_")
		.and(OPERATOR_TOKENS.get(method.name.as_str()))
	{
		let ret = annotated_type(
			ctx,
			&method.returns.attributes,
			peel_in_modifier(&method.returns.ty),
		);
		format!("{prefix}{ret} operator {token}({params});")
	} else {
		let ret = annotated_type(
			ctx,
			&method.returns.attributes,
			peel_in_modifier(&method.returns.ty),
		);
		let marker = if method.name.starts_with("op_") {
			// A special name without a source-level spelling stays visible
			// rather than being silently dropped.
			" /* unmapped operator */"
		} else {
			""
		};
		format!(
			"{prefix}{}{ret} {}{}({params}){};{marker}",
			return_prefix(method),
			method.name,
			generic_param_names(method),
			method_constraints(ctx, method)
		)
	};
	push_line(lines, ctx.indent, &line);
}

fn accessor_keyword(
	accessor: Option<&Accessor>,
	keyword: &str,
	owner_access: Accessibility,
	in_interface: bool,
) -> Option<String> {
	let accessor = accessor?;
	if !in_interface && access_rank(accessor.access) < access_rank(owner_access) {
		Some(format!("{} {keyword};", accessor.access.keyword()))
	} else {
		Some(format!("{keyword};"))
	}
}

/// Render one property or indexer declaration.
pub(crate) fn render_property(
	env: &Env<'_>,
	ctx: Ctx<'_>,
	in_interface: bool,
	property: &Property,
	lines: &mut Vec<String>,
) {
	let ctx = ctx.with_scope(ctx.scope.nest(&property.attributes));
	for attr_line in attribute_lines(env, ctx, &property.attributes, None) {
		push_line(lines, ctx.indent, &attr_line);
	}

	// The property's own accessibility is the most permissive of its visible
	// accessors; narrower accessors restate theirs inline.
	let access = property
		.getter
		.iter()
		.chain(property.setter.iter())
		.filter(|acc| env.level.admits(acc.access))
		.map(|acc| acc.access)
		.max_by_key(|a| access_rank(*a))
		.unwrap_or(Accessibility::Public);

	let mut line = member_prefix(access, property.flags, &property.attributes, in_interface);
	if !in_interface && has_attr(&property.attributes, annotations::REQUIRED_MEMBER) {
		line.push_str("required ");
	}
	line.push_str(&annotated_type(ctx, &property.attributes, &property.ty));
	line.push(' ');
	if property.is_indexer() {
		let params: Vec<_> = property
			.index_params
			.iter()
			.map(|p| render_param(env, ctx, p, false))
			.collect();
		line.push_str(&format!("this[{}]", params.join(", ")));
	} else {
		line.push_str(&property.name);
	}

	let mut accessors = Vec::new();
	if let Some(get) = accessor_keyword(
		property.getter.as_ref().filter(|a| env.level.admits(a.access)),
		"get",
		access,
		in_interface,
	) {
		accessors.push(get);
	}
	if let Some(set) = accessor_keyword(
		property.setter.as_ref().filter(|a| env.level.admits(a.access)),
		"set",
		access,
		in_interface,
	) {
		accessors.push(set);
	}
	line.push_str(&format!(" {{ {} }}", accessors.join(" ")));
	push_line(lines, ctx.indent, &line);
}

/// Render one event declaration.
pub(crate) fn render_event(
	env: &Env<'_>,
	ctx: Ctx<'_>,
	in_interface: bool,
	event: &Event,
	lines: &mut Vec<String>,
) {
	let ctx = ctx.with_scope(ctx.scope.nest(&event.attributes));
	for attr_line in attribute_lines(env, ctx, &event.attributes, None) {
		push_line(lines, ctx.indent, &attr_line);
	}

	// Event accessibility follows the add accessor, matching the visibility
	// decision.
	let access = event
		.add
		.as_ref()
		.map(|a| a.access)
		.unwrap_or(Accessibility::Public);
	let mut line = member_prefix(access, event.flags, &event.attributes, in_interface);
	line.push_str("event ");
	line.push_str(&annotated_type(ctx, &event.attributes, &event.ty));
	line.push(' ');
	line.push_str(&event.name);
	line.push(';');
	push_line(lines, ctx.indent, &line);
}

#[cfg(test)]
mod tests {
	use super::super::EnumLiteralStyle;
	use super::*;
	use crate::loader::Resolver;
	use crate::model::{ConstantValue, ModuleDoc, ReturnSig};
	use crate::surface::annotations::NullableScope;
	use crate::surface::visibility::{AttributeFilter, VisibilityLevel};

	struct Fixture {
		module: ModuleDoc,
		resolver: Resolver,
		filter: AttributeFilter,
	}

	impl Fixture {
		fn new() -> Self {
			Self {
				module: ModuleDoc::new("Lib"),
				resolver: Resolver::empty(),
				filter: AttributeFilter::default(),
			}
		}

		fn env(&self) -> Env<'_> {
			Env {
				module: &self.module,
				resolver: &self.resolver,
				level: VisibilityLevel::PublicOnly,
				attrs: &self.filter,
				enum_style: EnumLiteralStyle::default(),
			}
		}
	}

	fn ctx() -> Ctx<'static> {
		Ctx {
			namespace: "N",
			scope: NullableScope::oblivious(),
			indent: 0,
		}
	}

	fn int() -> TypeRef {
		TypeRef::named("System.Int32", true)
	}

	fn public_method(name: &str) -> Method {
		Method {
			name: name.into(),
			access: Accessibility::Public,
			flags: MemberFlags::empty(),
			generic_params: Vec::new(),
			params: Vec::new(),
			returns: ReturnSig::void(),
			attributes: Vec::new(),
		}
	}

	fn rendered(f: impl FnOnce(&Env<'_>, &mut Vec<String>)) -> Vec<String> {
		let fx = Fixture::new();
		let env = fx.env();
		let mut lines = Vec::new();
		f(&env, &mut lines);
		lines
	}

	#[test]
	fn const_field_renders_value() {
		let field = Field {
			name: "MaxSize".into(),
			access: Accessibility::Public,
			ty: int(),
			is_static: true,
			is_readonly: false,
			is_literal: true,
			constant: Some(ConstantValue::I4(100)),
			attributes: Vec::new(),
		};
		let lines = rendered(|env, lines| render_field(env, ctx(), &field, lines));
		assert_eq!(lines, vec!["public const int MaxSize = 100;".to_string()]);
	}

	#[test]
	fn static_readonly_field() {
		let field = Field {
			name: "Shared".into(),
			access: Accessibility::Public,
			ty: TypeRef::named("System.String", false),
			is_static: true,
			is_readonly: true,
			is_literal: false,
			constant: None,
			attributes: Vec::new(),
		};
		let lines = rendered(|env, lines| render_field(env, ctx(), &field, lines));
		assert_eq!(
			lines,
			vec!["public static readonly string Shared;".to_string()]
		);
	}

	#[test]
	fn plain_method_signature() {
		let mut method = public_method("Add");
		method.params.push(Param::new("left", int()));
		method.params.push(Param::new("right", int()));
		method.returns = ReturnSig::of(int());
		let lines = rendered(|env, lines| render_method(env, ctx(), false, &method, lines));
		assert_eq!(
			lines,
			vec!["public int Add(int left, int right);".to_string()]
		);
	}

	#[test]
	fn override_reconstructed_from_slot_reuse() {
		let mut method = public_method("ToString");
		method.flags = MemberFlags::VIRTUAL;
		method.returns = ReturnSig::of(TypeRef::named("System.String", false));
		let lines = rendered(|env, lines| render_method(env, ctx(), false, &method, lines));
		assert_eq!(lines, vec!["public override string ToString();".to_string()]);
	}

	#[test]
	fn fresh_virtual_slot_renders_virtual() {
		let mut method = public_method("Run");
		method.flags = MemberFlags::VIRTUAL | MemberFlags::NEW_SLOT;
		let lines = rendered(|env, lines| render_method(env, ctx(), false, &method, lines));
		assert_eq!(lines, vec!["public virtual void Run();".to_string()]);
	}

	#[test]
	fn sealed_override_and_interface_plumbing() {
		let mut method = public_method("Run");
		method.flags = MemberFlags::VIRTUAL | MemberFlags::FINAL;
		let lines = rendered(|env, lines| render_method(env, ctx(), false, &method, lines));
		assert_eq!(lines, vec!["public sealed override void Run();".to_string()]);

		// Final in its own new slot: no source keyword existed.
		let mut method = public_method("Run");
		method.flags = MemberFlags::VIRTUAL | MemberFlags::FINAL | MemberFlags::NEW_SLOT;
		let lines = rendered(|env, lines| render_method(env, ctx(), false, &method, lines));
		assert_eq!(lines, vec!["public void Run();".to_string()]);
	}

	#[test]
	fn covariant_return_marker_means_override() {
		let mut method = public_method("Clone");
		method.flags = MemberFlags::VIRTUAL | MemberFlags::NEW_SLOT;
		method
			.attributes
			.push(Attribute::marker(annotations::PRESERVE_BASE_OVERRIDES));
		method.returns = ReturnSig::of(TypeRef::named("N.Widget", false));
		let lines = rendered(|env, lines| render_method(env, ctx(), false, &method, lines));
		assert_eq!(lines, vec!["public override Widget Clone();".to_string()]);
	}

	#[test]
	fn interface_members_have_no_accessibility() {
		let method = public_method("Run");
		let lines = rendered(|env, lines| render_method(env, ctx(), true, &method, lines));
		assert_eq!(lines, vec!["void Run();".to_string()]);
	}

	#[test]
	fn binary_operator_renders_token() {
		let mut method = public_method("op_Addition");
		method.flags = MemberFlags::STATIC;
		method.params.push(Param::new("left", TypeRef::named("N.C", false)));
		method.params.push(Param::new("right", TypeRef::named("N.C", false)));
		method.returns = ReturnSig::of(TypeRef::named("N.C", false));
		let lines = rendered(|env, lines| render_method(env, ctx(), false, &method, lines));
		assert_eq!(
			lines,
			vec!["public static C operator +(C left, C right);".to_string()]
		);
	}

	#[test]
	fn implicit_conversion_shape() {
		let mut method = public_method("op_Implicit");
		method.flags = MemberFlags::STATIC;
		method.params.push(Param::new("value", TypeRef::named("N.C", false)));
		method.returns = ReturnSig::of(int());
		let lines = rendered(|env, lines| render_method(env, ctx(), false, &method, lines));
		assert_eq!(
			lines,
			vec!["public static implicit operator int(C value);".to_string()]
		);
	}

	#[test]
	fn unmapped_operator_name_stays_visible() {
		let mut method = public_method("op_Assign");
		method.flags = MemberFlags::STATIC;
		let lines = rendered(|env, lines| render_method(env, ctx(), false, &method, lines));
		assert_eq!(
			lines,
			vec!["public static void op_Assign(); /* unmapped operator */".to_string()]
		);
	}

	#[test]
	fn parameter_modes_and_defaults() {
		let mut method = public_method("Mix");
		let mut by_ref = Param::new("a", int());
		by_ref.by_ref = Some(RefKind::Ref);
		let mut out = Param::new("b", int());
		out.by_ref = Some(RefKind::Out);
		let mut opt = Param::new("c", int());
		opt.default = Some(ConstantValue::I4(7));
		method.params.extend([by_ref, out, opt]);
		let lines = rendered(|env, lines| render_method(env, ctx(), false, &method, lines));
		assert_eq!(
			lines,
			vec!["public void Mix(ref int a, out int b, int c = 7);".to_string()]
		);
	}

	#[test]
	fn params_array_and_extension_this() {
		let mut method = public_method("Join");
		method.flags = MemberFlags::STATIC;
		method.attributes.push(Attribute::marker(annotations::EXTENSION));
		let target = Param::new("source", TypeRef::named("System.String", false));
		let mut rest = Param::new(
			"parts",
			TypeRef::Array {
				element: Box::new(TypeRef::named("System.String", false)),
				rank: 1,
			},
		);
		rest.attributes.push(Attribute::marker(annotations::PARAM_ARRAY));
		method.params.extend([target, rest]);
		let lines = rendered(|env, lines| render_method(env, ctx(), false, &method, lines));
		assert_eq!(
			lines,
			vec!["public static void Join(this string source, params string[] parts);".to_string()]
		);
	}

	#[test]
	fn ref_readonly_return_peels_modifier() {
		let mut method = public_method("Current");
		method.returns = ReturnSig {
			ty: TypeRef::Modified {
				modifier: annotations::IN_ATTRIBUTE.into(),
				required: true,
				inner: Box::new(int()),
			},
			by_ref: true,
			readonly: true,
			attributes: Vec::new(),
		};
		let lines = rendered(|env, lines| render_method(env, ctx(), false, &method, lines));
		assert_eq!(lines, vec!["public ref readonly int Current();".to_string()]);
	}

	#[test]
	fn constructors_take_the_type_name() {
		let mut method = Method {
			name: ".ctor".into(),
			..public_method("")
		};
		method.params.push(Param::new("size", int()));
		let lines = rendered(|env, lines| render_constructor(env, ctx(), "C", &method, lines));
		assert_eq!(lines, vec!["public C(int size);".to_string()]);

		let cctor = Method {
			name: ".cctor".into(),
			..public_method("")
		};
		let lines = rendered(|env, lines| render_constructor(env, ctx(), "C", &cctor, lines));
		assert_eq!(lines, vec!["static C();".to_string()]);
	}

	#[test]
	fn property_with_narrower_setter() {
		let property = Property {
			name: "Count".into(),
			ty: int(),
			index_params: Vec::new(),
			getter: Some(Accessor::new(Accessibility::Public)),
			setter: Some(Accessor::new(Accessibility::Protected)),
			flags: MemberFlags::empty(),
			attributes: Vec::new(),
		};
		let lines = rendered(|env, lines| render_property(env, ctx(), false, &property, lines));
		assert_eq!(
			lines,
			vec!["public int Count { get; protected set; }".to_string()]
		);
	}

	#[test]
	fn invisible_setter_is_omitted() {
		let property = Property {
			name: "Count".into(),
			ty: int(),
			index_params: Vec::new(),
			getter: Some(Accessor::new(Accessibility::Public)),
			setter: Some(Accessor::new(Accessibility::Private)),
			flags: MemberFlags::empty(),
			attributes: Vec::new(),
		};
		let lines = rendered(|env, lines| render_property(env, ctx(), false, &property, lines));
		assert_eq!(lines, vec!["public int Count { get; }".to_string()]);
	}

	#[test]
	fn indexer_renders_this_with_parameters() {
		let property = Property {
			name: "Item".into(),
			ty: TypeRef::named("System.String", false),
			index_params: vec![Param::new("index", int())],
			getter: Some(Accessor::new(Accessibility::Public)),
			setter: None,
			flags: MemberFlags::empty(),
			attributes: Vec::new(),
		};
		let lines = rendered(|env, lines| render_property(env, ctx(), false, &property, lines));
		assert_eq!(
			lines,
			vec!["public string this[int index] { get; }".to_string()]
		);
	}

	#[test]
	fn event_renders_handler_type() {
		let event = Event {
			name: "Changed".into(),
			ty: TypeRef::named("System.EventHandler", false),
			add: Some(Accessor::new(Accessibility::Public)),
			remove: Some(Accessor::new(Accessibility::Public)),
			flags: MemberFlags::empty(),
			attributes: Vec::new(),
		};
		let lines = rendered(|env, lines| render_event(env, ctx(), false, &event, lines));
		assert_eq!(
			lines,
			vec!["public event System.EventHandler Changed;".to_string()]
		);
	}

	#[test]
	fn return_attributes_take_the_return_target() {
		let fx = Fixture::new();
		let env = fx.env();
		let mut method = public_method("Run");
		method
			.returns
			.attributes
			.push(Attribute::marker("N.MarkerAttribute"));
		let mut lines = Vec::new();
		render_method(&env, ctx(), false, &method, &mut lines);
		assert_eq!(
			lines,
			vec![
				"[return: Marker]".to_string(),
				"public void Run();".to_string()
			]
		);
	}
}
