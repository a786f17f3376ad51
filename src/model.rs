//! Read-only model of a module metadata document.
//!
//! A metadata reader (external to this crate) walks a compiled .NET module and
//! serializes its type/member/attribute graph into the document shape defined
//! here. Everything downstream — filtering, ordering, rendering — consumes
//! these types without mutating them.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Root of a module metadata document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleDoc {
	/// Simple name of the assembly the module belongs to.
	pub assembly: String,
	/// Assembly-level custom attributes.
	#[serde(default)]
	pub attributes: Vec<Attribute>,
	/// Names of external modules referenced by this one.
	#[serde(default)]
	pub references: Vec<String>,
	/// Top-level type definitions. Nested types live inside their enclosing
	/// [`TypeDef`], never in this list.
	#[serde(default)]
	pub types: Vec<TypeDef>,
}

impl ModuleDoc {
	/// Create an empty document for the named assembly.
	pub fn new(assembly: impl Into<String>) -> Self {
		Self {
			assembly: assembly.into(),
			attributes: Vec::new(),
			references: Vec::new(),
			types: Vec::new(),
		}
	}

	/// Walk every type in the document, nested types included, depth-first.
	pub fn all_types(&self) -> Vec<&TypeDef> {
		fn collect<'a>(types: &'a [TypeDef], out: &mut Vec<&'a TypeDef>) {
			for ty in types {
				out.push(ty);
				collect(&ty.nested, out);
			}
		}
		let mut out = Vec::new();
		collect(&self.types, &mut out);
		out
	}
}

/// Accessibility of a type or member, as recorded in metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accessibility {
	/// Visible everywhere.
	Public,
	/// Visible to derived types (`protected`).
	Protected,
	/// Visible to derived types or the declaring assembly (`protected internal`).
	ProtectedInternal,
	/// Visible within the declaring assembly (`internal`).
	Internal,
	/// Visible to derived types within the declaring assembly (`private protected`).
	PrivateProtected,
	/// Visible only to the declaring type.
	Private,
}

impl Accessibility {
	/// C# keyword rendering for this accessibility.
	pub fn keyword(self) -> &'static str {
		match self {
			Self::Public => "public",
			Self::Protected => "protected",
			Self::ProtectedInternal => "protected internal",
			Self::Internal => "internal",
			Self::PrivateProtected => "private protected",
			Self::Private => "private",
		}
	}
}

/// Shape of a type definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
	/// Reference type.
	Class,
	/// Value type.
	Struct,
	/// Interface.
	Interface,
	/// Enumeration. Literal members are static literal fields; the underlying
	/// type is carried by the instance field named `value__`.
	Enum,
	/// Delegate. The signature is carried by the method named `Invoke`.
	Delegate,
}

/// A type definition with its members and nested types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeDef {
	/// Namespace the type is declared in; empty for the global namespace.
	/// Nested types carry their enclosing type's namespace.
	#[serde(default)]
	pub namespace: String,
	/// Simple name, without namespace and without generic arity suffix.
	pub name: String,
	/// Declaration shape.
	pub kind: TypeKind,
	/// Declared accessibility.
	pub access: Accessibility,
	/// Abstract flag. Combined with [`TypeDef::is_sealed`] it signals a
	/// static type.
	#[serde(default)]
	pub is_abstract: bool,
	/// Sealed flag.
	#[serde(default)]
	pub is_sealed: bool,
	/// Base type, if any. `System.Object`, `System.ValueType` and
	/// `System.Enum` bases are present in the document but elided in output.
	#[serde(default)]
	pub base: Option<TypeRef>,
	/// Implemented interfaces, in declaration order (re-sorted before output).
	#[serde(default)]
	pub interfaces: Vec<InterfaceImpl>,
	/// Generic parameters, in declaration order.
	#[serde(default)]
	pub generic_params: Vec<GenericParam>,
	/// Fields.
	#[serde(default)]
	pub fields: Vec<Field>,
	/// Methods, including constructors and operators. Property and event
	/// accessor methods are folded into their owning member and do not
	/// appear here.
	#[serde(default)]
	pub methods: Vec<Method>,
	/// Properties, including indexers.
	#[serde(default)]
	pub properties: Vec<Property>,
	/// Events.
	#[serde(default)]
	pub events: Vec<Event>,
	/// Nested type definitions.
	#[serde(default)]
	pub nested: Vec<TypeDef>,
	/// Custom attributes on the type.
	#[serde(default)]
	pub attributes: Vec<Attribute>,
}

impl TypeDef {
	/// Create an empty type definition.
	pub fn new(
		namespace: impl Into<String>,
		name: impl Into<String>,
		kind: TypeKind,
		access: Accessibility,
	) -> Self {
		Self {
			namespace: namespace.into(),
			name: name.into(),
			kind,
			access,
			is_abstract: false,
			is_sealed: false,
			base: None,
			interfaces: Vec::new(),
			generic_params: Vec::new(),
			fields: Vec::new(),
			methods: Vec::new(),
			properties: Vec::new(),
			events: Vec::new(),
			nested: Vec::new(),
			attributes: Vec::new(),
		}
	}

	/// Namespace-qualified name, e.g. `System.Collections.Generic.List`.
	pub fn full_name(&self) -> String {
		if self.namespace.is_empty() {
			self.name.clone()
		} else {
			format!("{}.{}", self.namespace, self.name)
		}
	}

	/// Simple name as it appears in metadata: generic types carry an arity
	/// suffix (`List\`1`) so that same-named types of different arity remain
	/// distinct.
	pub fn metadata_name(&self) -> String {
		if self.generic_params.is_empty() {
			self.name.clone()
		} else {
			format!("{}`{}", self.name, self.generic_params.len())
		}
	}

	/// Underlying primitive type of an enum, read from the `value__` field.
	/// Defaults to `System.Int32` when the field is absent.
	pub fn enum_underlying(&self) -> TypeRef {
		self.fields
			.iter()
			.find(|f| f.name == "value__")
			.map(|f| f.ty.clone())
			.unwrap_or_else(|| TypeRef::named("System.Int32", true))
	}

	/// Literal members of an enum, i.e. static literal fields with constants.
	pub fn enum_literals(&self) -> impl Iterator<Item = &Field> {
		self.fields
			.iter()
			.filter(|f| f.is_literal && f.constant.is_some())
	}

	/// Whether the type carries `System.FlagsAttribute`.
	pub fn is_flags_enum(&self) -> bool {
		self.kind == TypeKind::Enum
			&& self.attributes.iter().any(|a| a.name == "System.FlagsAttribute")
	}
}

/// An implemented interface together with its inline attributes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterfaceImpl {
	/// The interface type.
	pub ty: TypeRef,
	/// Attributes attached to the interface implementation entry.
	#[serde(default)]
	pub attributes: Vec<Attribute>,
}

/// Variance of a generic parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variance {
	/// Invariant.
	#[default]
	None,
	/// Covariant (`out`).
	Covariant,
	/// Contravariant (`in`).
	Contravariant,
}

/// A generic parameter declaration on a type or method.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenericParam {
	/// Parameter name.
	pub name: String,
	/// Declared variance.
	#[serde(default)]
	pub variance: Variance,
	/// `class` constraint flag.
	#[serde(default)]
	pub reference_constraint: bool,
	/// `struct` constraint flag (non-nullable value type).
	#[serde(default)]
	pub value_constraint: bool,
	/// `new()` constraint flag (default constructor).
	#[serde(default)]
	pub ctor_constraint: bool,
	/// Type constraints.
	#[serde(default)]
	pub constraints: Vec<TypeRef>,
	/// Custom attributes on the parameter. The `unmanaged` constraint is
	/// encoded here as `System.Runtime.CompilerServices.IsUnmanagedAttribute`.
	#[serde(default)]
	pub attributes: Vec<Attribute>,
}

impl GenericParam {
	/// Create an unconstrained, invariant parameter.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			variance: Variance::None,
			reference_constraint: false,
			value_constraint: false,
			ctor_constraint: false,
			constraints: Vec::new(),
			attributes: Vec::new(),
		}
	}
}

/// A structural reference to a type, as it appears in signatures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeRef {
	/// A named (possibly generic) type.
	Named {
		/// Namespace-qualified name without arity suffix.
		name: String,
		/// Generic arguments, left to right.
		#[serde(default)]
		args: Vec<TypeRef>,
		/// Whether the named type is a value type. Drives nullable-occurrence
		/// counting and boxed-`Nullable` unwrapping.
		#[serde(default)]
		value_type: bool,
	},
	/// A single- or multi-dimensional array.
	Array {
		/// Element type.
		element: Box<TypeRef>,
		/// Rank; 1 for `T[]`, 2 for `T[,]`, and so on.
		#[serde(default = "default_rank")]
		rank: u32,
	},
	/// An unmanaged pointer.
	Pointer {
		/// Pointee type.
		pointee: Box<TypeRef>,
	},
	/// A function pointer.
	FnPtr {
		/// Calling convention.
		#[serde(default)]
		conv: CallConv,
		/// Parameter types, left to right.
		#[serde(default)]
		params: Vec<TypeRef>,
		/// Return type.
		ret: Box<TypeRef>,
	},
	/// A reference to a generic parameter of the enclosing type or method.
	TypeParam {
		/// Parameter name.
		name: String,
		/// Whether the parameter belongs to a method rather than a type.
		#[serde(default)]
		method: bool,
	},
	/// A type wrapped in a custom modifier (modreq/modopt).
	Modified {
		/// Fully qualified name of the modifier type.
		modifier: String,
		/// Whether the modifier is required (modreq) rather than optional.
		#[serde(default)]
		required: bool,
		/// The modified type.
		inner: Box<TypeRef>,
	},
}

fn default_rank() -> u32 {
	1
}

impl TypeRef {
	/// Shorthand for a non-generic named type.
	pub fn named(name: impl Into<String>, value_type: bool) -> Self {
		Self::Named {
			name: name.into(),
			args: Vec::new(),
			value_type,
		}
	}

	/// Shorthand for a generic named type.
	pub fn generic(name: impl Into<String>, value_type: bool, args: Vec<TypeRef>) -> Self {
		Self::Named {
			name: name.into(),
			args,
			value_type,
		}
	}

	/// Strip custom modifiers, returning the underlying type.
	pub fn unmodified(&self) -> &TypeRef {
		match self {
			Self::Modified { inner, .. } => inner.unmodified(),
			other => other,
		}
	}

	/// Whether this is the named type `System.Void`.
	pub fn is_void(&self) -> bool {
		matches!(self.unmodified(), Self::Named { name, .. } if name == "System.Void")
	}
}

/// Calling convention of a function pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallConv {
	/// Managed calling convention.
	#[default]
	Managed,
	/// Unmanaged, platform default.
	Unmanaged,
	/// Unmanaged cdecl.
	Cdecl,
	/// Unmanaged stdcall.
	Stdcall,
	/// Unmanaged thiscall.
	Thiscall,
	/// Unmanaged fastcall.
	Fastcall,
}

bitflags! {
	/// Modifier flags shared by methods, properties and events, mirroring the
	/// metadata flag soup they are reconstructed from.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
	pub struct MemberFlags: u32 {
		/// Static member.
		const STATIC = 1 << 0;
		/// Abstract member.
		const ABSTRACT = 1 << 1;
		/// Virtual member.
		const VIRTUAL = 1 << 2;
		/// Final (sealed) virtual member.
		const FINAL = 1 << 3;
		/// Member introduces a new vtable slot.
		const NEW_SLOT = 1 << 4;
		/// Readonly instance member on a struct.
		const READONLY = 1 << 5;
	}
}

// Wire form is the raw bits; unknown bits are dropped rather than rejected so
// newer documents stay readable.
impl Serialize for MemberFlags {
	fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_u32(self.bits())
	}
}

impl<'de> Deserialize<'de> for MemberFlags {
	fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		Ok(Self::from_bits_truncate(u32::deserialize(deserializer)?))
	}
}

/// Direction of a by-reference parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefKind {
	/// `ref` parameter.
	Ref,
	/// `out` parameter.
	Out,
	/// `in` (readonly reference) parameter.
	In,
}

/// A method or indexer parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Param {
	/// Parameter name.
	pub name: String,
	/// Parameter type.
	pub ty: TypeRef,
	/// By-reference passing mode, if any.
	#[serde(default)]
	pub by_ref: Option<RefKind>,
	/// Default value for optional parameters.
	#[serde(default)]
	pub default: Option<ConstantValue>,
	/// Custom attributes on the parameter. `params` arrays are encoded as
	/// `System.ParamArrayAttribute`.
	#[serde(default)]
	pub attributes: Vec<Attribute>,
}

impl Param {
	/// Create a by-value parameter with no default.
	pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
		Self {
			name: name.into(),
			ty,
			by_ref: None,
			default: None,
			attributes: Vec::new(),
		}
	}
}

/// A method return slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnSig {
	/// Return type; `System.Void` for void methods.
	pub ty: TypeRef,
	/// Whether the method returns by reference.
	#[serde(default)]
	pub by_ref: bool,
	/// Whether a by-reference return is readonly (`ref readonly`).
	#[serde(default)]
	pub readonly: bool,
	/// Custom attributes on the return slot.
	#[serde(default)]
	pub attributes: Vec<Attribute>,
}

impl ReturnSig {
	/// A plain by-value return of the given type.
	pub fn of(ty: TypeRef) -> Self {
		Self {
			ty,
			by_ref: false,
			readonly: false,
			attributes: Vec::new(),
		}
	}

	/// A `System.Void` return.
	pub fn void() -> Self {
		Self::of(TypeRef::named("System.Void", true))
	}
}

/// A field definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
	/// Field name.
	pub name: String,
	/// Declared accessibility.
	pub access: Accessibility,
	/// Field type.
	pub ty: TypeRef,
	/// Static flag.
	#[serde(default)]
	pub is_static: bool,
	/// Init-only flag (`readonly`).
	#[serde(default)]
	pub is_readonly: bool,
	/// Literal flag (`const`); implies a constant value.
	#[serde(default)]
	pub is_literal: bool,
	/// Compile-time constant, for literal fields and enum members.
	#[serde(default)]
	pub constant: Option<ConstantValue>,
	/// Custom attributes.
	#[serde(default)]
	pub attributes: Vec<Attribute>,
}

/// A method definition. Constructors keep their encoded names (`.ctor`,
/// `.cctor`); operators and conversions keep their `op_*` special names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Method {
	/// Encoded method name.
	pub name: String,
	/// Declared accessibility.
	pub access: Accessibility,
	/// Modifier flags.
	#[serde(default)]
	pub flags: MemberFlags,
	/// Generic parameters, in declaration order.
	#[serde(default)]
	pub generic_params: Vec<GenericParam>,
	/// Parameters, in declaration order.
	#[serde(default)]
	pub params: Vec<Param>,
	/// Return slot.
	pub returns: ReturnSig,
	/// Custom attributes.
	#[serde(default)]
	pub attributes: Vec<Attribute>,
}

/// Accessibility of a single property or event accessor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Accessor {
	/// Declared accessibility of the accessor method.
	pub access: Accessibility,
}

impl Accessor {
	/// Accessor with the given accessibility.
	pub fn new(access: Accessibility) -> Self {
		Self { access }
	}
}

/// A property definition, indexers included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
	/// Property name; indexers are conventionally named `Item`.
	pub name: String,
	/// Property type.
	pub ty: TypeRef,
	/// Index parameters; empty for non-indexer properties.
	#[serde(default)]
	pub index_params: Vec<Param>,
	/// Getter accessor, if present.
	#[serde(default)]
	pub getter: Option<Accessor>,
	/// Setter accessor, if present.
	#[serde(default)]
	pub setter: Option<Accessor>,
	/// Modifier flags shared by the accessors.
	#[serde(default)]
	pub flags: MemberFlags,
	/// Custom attributes.
	#[serde(default)]
	pub attributes: Vec<Attribute>,
}

impl Property {
	/// Whether the property is an indexer.
	pub fn is_indexer(&self) -> bool {
		!self.index_params.is_empty()
	}
}

/// An event definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
	/// Event name.
	pub name: String,
	/// Handler delegate type.
	pub ty: TypeRef,
	/// Add accessor. Event visibility derives from this accessor alone.
	#[serde(default)]
	pub add: Option<Accessor>,
	/// Remove accessor. Its visibility is deliberately ignored.
	#[serde(default)]
	pub remove: Option<Accessor>,
	/// Modifier flags shared by the accessors.
	#[serde(default)]
	pub flags: MemberFlags,
	/// Custom attributes.
	#[serde(default)]
	pub attributes: Vec<Attribute>,
}

/// A custom attribute instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
	/// Fully qualified name of the attribute type, e.g. `System.FlagsAttribute`.
	pub name: String,
	/// Fixed constructor arguments, in signature order.
	#[serde(default)]
	pub args: Vec<ConstantValue>,
	/// Named field/property arguments.
	#[serde(default)]
	pub named: Vec<NamedArg>,
}

impl Attribute {
	/// Attribute with no arguments.
	pub fn marker(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			args: Vec::new(),
			named: Vec::new(),
		}
	}

	/// Attribute with fixed arguments only.
	pub fn with_args(name: impl Into<String>, args: Vec<ConstantValue>) -> Self {
		Self {
			name: name.into(),
			args,
			named: Vec::new(),
		}
	}
}

/// A named (field or property) attribute argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedArg {
	/// Field or property name.
	pub name: String,
	/// Whether the target is a field rather than a property.
	#[serde(default)]
	pub is_field: bool,
	/// Argument value.
	pub value: ConstantValue,
}

/// A literal constant, used for field constants, parameter defaults and
/// attribute arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ConstantValue {
	/// Null reference.
	Null,
	/// Boolean.
	Bool(bool),
	/// 16-bit Unicode character.
	Char(char),
	/// Signed 8-bit integer.
	I1(i8),
	/// Unsigned 8-bit integer.
	U1(u8),
	/// Signed 16-bit integer.
	I2(i16),
	/// Unsigned 16-bit integer.
	U2(u16),
	/// Signed 32-bit integer.
	I4(i32),
	/// Unsigned 32-bit integer.
	U4(u32),
	/// Signed 64-bit integer.
	I8(i64),
	/// Unsigned 64-bit integer.
	U8(u64),
	/// 32-bit float.
	R4(f32),
	/// 64-bit float.
	R8(f64),
	/// String literal.
	Str(String),
	/// A `System.Type` argument, by fully qualified name.
	Type(String),
	/// Array of constants.
	Array(Vec<ConstantValue>),
	/// Enum-typed constant: the enum's fully qualified name plus the raw
	/// underlying value.
	Enum {
		/// Fully qualified enum type name.
		enum_type: String,
		/// Raw underlying value.
		value: Box<ConstantValue>,
	},
}

impl ConstantValue {
	/// Widen an integral constant to `i128` for bit arithmetic; `None` for
	/// non-integral constants.
	pub fn as_integer(&self) -> Option<i128> {
		match self {
			Self::I1(v) => Some(i128::from(*v)),
			Self::U1(v) => Some(i128::from(*v)),
			Self::I2(v) => Some(i128::from(*v)),
			Self::U2(v) => Some(i128::from(*v)),
			Self::I4(v) => Some(i128::from(*v)),
			Self::U4(v) => Some(i128::from(*v)),
			Self::I8(v) => Some(i128::from(*v)),
			Self::U8(v) => Some(i128::from(*v)),
			Self::Char(v) => Some(i128::from(*v as u32)),
			Self::Bool(v) => Some(i128::from(*v)),
			Self::Enum { value, .. } => value.as_integer(),
			_ => None,
		}
	}
}
