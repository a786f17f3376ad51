//! Classification of compiler-synthesized annotations.
//!
//! Roslyn encodes surface facts that metadata cannot express directly —
//! nullability of reference types, `nint` vs `System.IntPtr`, `dynamic` vs
//! `object`, tuple element names — as custom attributes whose payloads are
//! indexed by *occurrence*: one slot per position in a fixed left-to-right
//! traversal of the type structure. The reader of those slots and the renderer
//! of the type structure must walk in exactly the same order or every value
//! after the first mismatch is misaligned. [`OccurrenceCursor`] is the single
//! owner of that walk: both sides advance through it.

use crate::model::{Attribute, ConstantValue, TypeRef};

/// `System.Runtime.CompilerServices.NullableAttribute`.
pub const NULLABLE: &str = "System.Runtime.CompilerServices.NullableAttribute";
/// `System.Runtime.CompilerServices.NullableContextAttribute`.
pub const NULLABLE_CONTEXT: &str = "System.Runtime.CompilerServices.NullableContextAttribute";
/// `System.Runtime.CompilerServices.DynamicAttribute`.
pub const DYNAMIC: &str = "System.Runtime.CompilerServices.DynamicAttribute";
/// `System.Runtime.CompilerServices.NativeIntegerAttribute`.
pub const NATIVE_INTEGER: &str = "System.Runtime.CompilerServices.NativeIntegerAttribute";
/// `System.Runtime.CompilerServices.TupleElementNamesAttribute`.
pub const TUPLE_NAMES: &str = "System.Runtime.CompilerServices.TupleElementNamesAttribute";
/// `System.ParamArrayAttribute`, rendered as the `params` keyword.
pub const PARAM_ARRAY: &str = "System.ParamArrayAttribute";
/// `System.Runtime.CompilerServices.IsReadOnlyAttribute`.
pub const IS_READONLY: &str = "System.Runtime.CompilerServices.IsReadOnlyAttribute";
/// `System.Runtime.CompilerServices.IsByRefLikeAttribute`.
pub const IS_BYREF_LIKE: &str = "System.Runtime.CompilerServices.IsByRefLikeAttribute";
/// `System.Runtime.CompilerServices.IsUnmanagedAttribute`, the `unmanaged` constraint.
pub const IS_UNMANAGED: &str = "System.Runtime.CompilerServices.IsUnmanagedAttribute";
/// `System.Runtime.CompilerServices.ExtensionAttribute`.
pub const EXTENSION: &str = "System.Runtime.CompilerServices.ExtensionAttribute";
/// `System.Runtime.CompilerServices.PreserveBaseOverridesAttribute`, the
/// covariant-return marker.
pub const PRESERVE_BASE_OVERRIDES: &str =
	"System.Runtime.CompilerServices.PreserveBaseOverridesAttribute";
/// `System.Runtime.CompilerServices.RequiredMemberAttribute`.
pub const REQUIRED_MEMBER: &str = "System.Runtime.CompilerServices.RequiredMemberAttribute";
/// Modifier type marking the `unmanaged` constraint on `System.ValueType`.
pub const UNMANAGED_MODIFIER: &str = "System.Runtime.InteropServices.UnmanagedType";
/// Modifier type marking a `ref readonly` return.
pub const IN_ATTRIBUTE: &str = "System.Runtime.InteropServices.InAttribute";

/// Nullability of one reference-type occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nullability {
	/// No nullability information; pre-nullable-era metadata.
	Oblivious,
	/// Annotated not-null.
	NotNull,
	/// Annotated nullable.
	Nullable,
}

impl Nullability {
	fn from_byte(b: u8) -> Self {
		match b {
			1 => Self::NotNull,
			2 => Self::Nullable,
			// 0 and anything unrecognized stay oblivious; never guess.
			_ => Self::Oblivious,
		}
	}
}

/// Scope-level nullability default, resolved by walking outward from the
/// element through its enclosing method, enclosing types and finally the
/// module.
#[derive(Debug, Clone, Copy)]
pub struct NullableScope {
	default: Nullability,
}

impl NullableScope {
	/// An oblivious scope with no default anywhere up the chain.
	pub fn oblivious() -> Self {
		Self {
			default: Nullability::Oblivious,
		}
	}

	/// Resolve the scope default from a chain of attribute sets ordered
	/// innermost first (method, then enclosing types, then module). The first
	/// `NullableContext` found wins.
	pub fn from_chain<'a, I>(chain: I) -> Self
	where
		I: IntoIterator<Item = &'a [Attribute]>,
	{
		for attrs in chain {
			if let Some(b) = single_byte_arg(attrs, NULLABLE_CONTEXT) {
				return Self {
					default: Nullability::from_byte(b),
				};
			}
		}
		Self::oblivious()
	}

	/// The default nullability this scope assigns to unannotated occurrences.
	pub fn default_nullability(&self) -> Nullability {
		self.default
	}

	/// Nest an inner attribute set inside this scope: an inner
	/// `NullableContext` overrides, otherwise the outer default is inherited.
	pub fn nest(&self, attrs: &[Attribute]) -> Self {
		match single_byte_arg(attrs, NULLABLE_CONTEXT) {
			Some(b) => Self {
				default: Nullability::from_byte(b),
			},
			None => *self,
		}
	}
}

fn find_attr<'a>(attrs: &'a [Attribute], name: &str) -> Option<&'a Attribute> {
	attrs.iter().find(|a| a.name == name)
}

fn single_byte_arg(attrs: &[Attribute], name: &str) -> Option<u8> {
	let attr = find_attr(attrs, name)?;
	match attr.args.first() {
		Some(ConstantValue::U1(b)) => Some(*b),
		_ => None,
	}
}

/// Per-occurrence payload of a flag annotation: absent, one value applied to
/// every occurrence, or an array indexed by occurrence.
#[derive(Debug, Clone)]
enum FlagSlots<T> {
	Absent,
	Uniform(T),
	PerOccurrence(Vec<T>),
}

impl<T: Copy> FlagSlots<T> {
	fn get(&self, occurrence: usize) -> Option<T> {
		match self {
			Self::Absent => None,
			Self::Uniform(v) => Some(*v),
			Self::PerOccurrence(values) => values.get(occurrence).copied(),
		}
	}
}

fn nullable_slots(attrs: &[Attribute]) -> FlagSlots<Nullability> {
	let Some(attr) = find_attr(attrs, NULLABLE) else {
		return FlagSlots::Absent;
	};
	match attr.args.first() {
		Some(ConstantValue::U1(b)) => FlagSlots::Uniform(Nullability::from_byte(*b)),
		Some(ConstantValue::Array(items)) => FlagSlots::PerOccurrence(
			items
				.iter()
				.map(|item| match item {
					ConstantValue::U1(b) => Nullability::from_byte(*b),
					_ => Nullability::Oblivious,
				})
				.collect(),
		),
		// Present but unreadable: deliberately conservative.
		_ => FlagSlots::Uniform(Nullability::Oblivious),
	}
}

fn bool_slots(attrs: &[Attribute], name: &str) -> FlagSlots<bool> {
	let Some(attr) = find_attr(attrs, name) else {
		return FlagSlots::Absent;
	};
	match attr.args.first() {
		// An argument-less instance flags the single eligible occurrence.
		None => FlagSlots::Uniform(true),
		Some(ConstantValue::Bool(b)) => FlagSlots::Uniform(*b),
		Some(ConstantValue::Array(items)) => FlagSlots::PerOccurrence(
			items
				.iter()
				.map(|item| matches!(item, ConstantValue::Bool(true)))
				.collect(),
		),
		_ => FlagSlots::Absent,
	}
}

fn tuple_name_slots(attrs: &[Attribute]) -> Vec<Option<String>> {
	let Some(attr) = find_attr(attrs, TUPLE_NAMES) else {
		return Vec::new();
	};
	match attr.args.first() {
		Some(ConstantValue::Array(items)) => items
			.iter()
			.map(|item| match item {
				ConstantValue::Str(s) => Some(s.clone()),
				_ => None,
			})
			.collect(),
		_ => Vec::new(),
	}
}

/// Resolved annotation facts for one element (field type, parameter, return
/// slot, base-type reference, ...), ready for occurrence-indexed lookup.
#[derive(Debug, Clone)]
pub struct AnnotationReader {
	nullable: FlagSlots<Nullability>,
	dynamic: FlagSlots<bool>,
	native_int: FlagSlots<bool>,
	tuple_names: Vec<Option<String>>,
	scope_default: Nullability,
}

impl AnnotationReader {
	/// Build a reader from the element's own attributes and the enclosing
	/// scope's nullability default.
	pub fn for_element(attrs: &[Attribute], scope: &NullableScope) -> Self {
		Self {
			nullable: nullable_slots(attrs),
			dynamic: bool_slots(attrs, DYNAMIC),
			native_int: bool_slots(attrs, NATIVE_INTEGER),
			tuple_names: tuple_name_slots(attrs),
			scope_default: scope.default_nullability(),
		}
	}

	/// A reader with no annotations at all, for synthesized positions.
	pub fn empty() -> Self {
		Self {
			nullable: FlagSlots::Absent,
			dynamic: FlagSlots::Absent,
			native_int: FlagSlots::Absent,
			tuple_names: Vec::new(),
			scope_default: Nullability::Oblivious,
		}
	}

	/// Nullability of the given occurrence, falling back to the scope default.
	pub fn nullability(&self, occurrence: usize) -> Nullability {
		self.nullable.get(occurrence).unwrap_or(self.scope_default)
	}

	/// Whether the given occurrence is `dynamic` rather than `object`.
	pub fn is_dynamic(&self, occurrence: usize) -> bool {
		self.dynamic.get(occurrence).unwrap_or(false)
	}

	/// Whether the given occurrence is a native integer (`nint`/`nuint`).
	pub fn is_native_int(&self, occurrence: usize) -> bool {
		self.native_int.get(occurrence).unwrap_or(false)
	}

	/// Tuple element name at the given tuple-name occurrence.
	pub fn tuple_name(&self, occurrence: usize) -> Option<&str> {
		self.tuple_names.get(occurrence).and_then(|n| n.as_deref())
	}
}

/// Walks the fixed occurrence order over a type structure, advancing four
/// independent counters (nullability, dynamic, native integer, tuple names).
///
/// The renderer calls exactly one structural method per node it visits, in
/// rendering order; the counters can therefore never drift from the values the
/// compiler laid down, because this cursor is the only place they move.
///
/// Counting rules:
/// - every structural node consumes one dynamic slot;
/// - reference types, generic parameters, arrays and *generic* value types
///   consume one nullability slot; non-generic value types, pointers and
///   function pointers do not;
/// - each occurrence of `System.IntPtr`/`System.UIntPtr` consumes one
///   native-integer slot;
/// - each flattened tuple element consumes one tuple-name slot, including the
///   skipped synthetic eighth slot of an arity>7 tuple.
#[derive(Debug)]
pub struct OccurrenceCursor<'a> {
	reader: &'a AnnotationReader,
	nullable_idx: usize,
	dynamic_idx: usize,
	native_idx: usize,
	tuple_idx: usize,
}

/// Facts the cursor hands back for one structural node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeFacts {
	/// Resolved nullability of the node, if the node consumed a nullable slot.
	pub nullability: Nullability,
	/// Whether the node is flagged dynamic.
	pub dynamic: bool,
	/// Whether the node is flagged as a native integer.
	pub native_int: bool,
}

impl<'a> OccurrenceCursor<'a> {
	/// Start a walk over one annotated element.
	pub fn new(reader: &'a AnnotationReader) -> Self {
		Self {
			reader,
			nullable_idx: 0,
			dynamic_idx: 0,
			native_idx: 0,
			tuple_idx: 0,
		}
	}

	fn take_nullable(&mut self) -> Nullability {
		let value = self.reader.nullability(self.nullable_idx);
		self.nullable_idx += 1;
		value
	}

	fn take_dynamic(&mut self) -> bool {
		let value = self.reader.is_dynamic(self.dynamic_idx);
		self.dynamic_idx += 1;
		value
	}

	fn take_native(&mut self) -> bool {
		let value = self.reader.is_native_int(self.native_idx);
		self.native_idx += 1;
		value
	}

	/// Visit a named reference type (class, interface, delegate).
	pub fn reference_type(&mut self) -> NodeFacts {
		NodeFacts {
			nullability: self.take_nullable(),
			dynamic: self.take_dynamic(),
			native_int: false,
		}
	}

	/// Visit a named value type. Only generic value types consume a
	/// nullability slot.
	pub fn value_type(&mut self, generic: bool) -> NodeFacts {
		let nullability = if generic {
			self.take_nullable()
		} else {
			Nullability::Oblivious
		};
		NodeFacts {
			nullability,
			dynamic: self.take_dynamic(),
			native_int: false,
		}
	}

	/// Visit an occurrence of `System.IntPtr` or `System.UIntPtr`. Consumes a
	/// native-integer slot on top of the ordinary value-type slots.
	pub fn native_int_candidate(&mut self) -> NodeFacts {
		let dynamic = self.take_dynamic();
		NodeFacts {
			nullability: Nullability::Oblivious,
			dynamic,
			native_int: self.take_native(),
		}
	}

	/// Visit an array node. The array consumes its slots before its element
	/// type is descended into.
	pub fn array(&mut self) -> NodeFacts {
		NodeFacts {
			nullability: self.take_nullable(),
			dynamic: self.take_dynamic(),
			native_int: false,
		}
	}

	/// Visit a generic parameter reference.
	pub fn type_param(&mut self) -> NodeFacts {
		NodeFacts {
			nullability: self.take_nullable(),
			dynamic: self.take_dynamic(),
			native_int: false,
		}
	}

	/// Visit a pointer or function-pointer node: no nullability slot for the
	/// node itself, nested types consume their own.
	pub fn pointer(&mut self) -> NodeFacts {
		NodeFacts {
			nullability: Nullability::Oblivious,
			dynamic: self.take_dynamic(),
			native_int: false,
		}
	}

	/// Take the next tuple element name.
	pub fn tuple_element_name(&mut self) -> Option<String> {
		let name = self.reader.tuple_name(self.tuple_idx).map(str::to_owned);
		self.tuple_idx += 1;
		name
	}

	/// Advance past the synthetic `Rest` slot of an arity>7 tuple without
	/// producing a name.
	pub fn skip_synthetic_tuple_slot(&mut self) {
		self.tuple_idx += 1;
	}
}

/// Decide which cursor method a type node maps to and invoke it. This is the
/// one mapping from structure to occurrence slots; the renderer funnels every
/// node through here.
pub fn visit_node(cursor: &mut OccurrenceCursor<'_>, ty: &TypeRef) -> NodeFacts {
	match ty {
		TypeRef::Named {
			name,
			args,
			value_type,
		} => {
			if name == "System.IntPtr" || name == "System.UIntPtr" {
				cursor.native_int_candidate()
			} else if *value_type {
				cursor.value_type(!args.is_empty())
			} else {
				cursor.reference_type()
			}
		}
		TypeRef::Array { .. } => cursor.array(),
		TypeRef::Pointer { .. } | TypeRef::FnPtr { .. } => cursor.pointer(),
		TypeRef::TypeParam { .. } => cursor.type_param(),
		// Modifiers are transparent: the wrapped type consumes the slots.
		TypeRef::Modified { inner, .. } => visit_node(cursor, inner),
	}
}
