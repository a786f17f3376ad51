//! Total, stable ordering of namespaces, types and members.
//!
//! Every comparison here is ordinal (byte-wise on UTF-8), never
//! locale-sensitive, so the emission order is identical on every platform.
//! Same-name/same-signature duplicates are treated as a metadata anomaly and
//! abort the render instead of being ordered arbitrarily.

use std::collections::BTreeMap;

use super::error::{Result, SurfError};
use super::visibility::VisibilityLevel;
use crate::model::{Event, Field, Method, Property, TypeDef, TypeRef};

/// Types of one namespace, in emission order.
#[derive(Debug)]
pub struct NamespaceGroup<'a> {
	/// Namespace name; empty for the global namespace.
	pub name: String,
	/// Types sorted by metadata simple name.
	pub types: Vec<&'a TypeDef>,
}

/// Group the filtered top-level types by namespace and fix the emission order.
///
/// Namespaces sort lexicographically with the empty (global) namespace using
/// its literal empty-string key; types sort by metadata simple name. A second
/// type with the same (namespace, simple-name) pair is a hard failure.
pub fn order_namespaces<'a>(types: &[&'a TypeDef]) -> Result<Vec<NamespaceGroup<'a>>> {
	let mut groups: BTreeMap<String, Vec<&'a TypeDef>> = BTreeMap::new();
	for ty in types {
		groups.entry(ty.namespace.clone()).or_default().push(ty);
	}

	let mut out = Vec::with_capacity(groups.len());
	for (name, mut members) in groups {
		members.sort_by(|a, b| a.metadata_name().cmp(&b.metadata_name()));
		for pair in members.windows(2) {
			if pair[0].metadata_name() == pair[1].metadata_name() {
				return Err(SurfError::DuplicateType {
					namespace: name.clone(),
					name: pair[0].metadata_name(),
				});
			}
		}
		out.push(NamespaceGroup {
			name,
			types: members,
		});
	}
	Ok(out)
}

/// Members of one type, filtered and in emission order.
#[derive(Debug)]
pub struct OrderedMembers<'a> {
	/// Fields, by name.
	pub fields: Vec<&'a Field>,
	/// Constructors (`.ctor`/`.cctor`), by signature string.
	pub constructors: Vec<&'a Method>,
	/// Properties; non-indexers by name, indexers by signature string.
	pub properties: Vec<&'a Property>,
	/// Events, by name.
	pub events: Vec<&'a Event>,
	/// Remaining methods (operators included), by name then signature string.
	pub methods: Vec<&'a Method>,
	/// Nested types, by metadata simple name.
	pub nested: Vec<&'a TypeDef>,
}

/// Filter a type's members by visibility and fix their emission order.
pub fn order_members<'a>(ty: &'a TypeDef, level: VisibilityLevel) -> Result<OrderedMembers<'a>> {
	let declaring = ty.full_name();

	let mut fields: Vec<&Field> = ty.fields.iter().filter(|f| level.admits_field(f)).collect();
	fields.sort_by(|a, b| a.name.cmp(&b.name));
	check_unique(fields.iter().map(|f| f.name.as_str()), &declaring)?;

	let mut events: Vec<&Event> = ty.events.iter().filter(|e| level.admits_event(e)).collect();
	events.sort_by(|a, b| a.name.cmp(&b.name));
	check_unique(events.iter().map(|e| e.name.as_str()), &declaring)?;

	let mut properties: Vec<&Property> = ty
		.properties
		.iter()
		.filter(|p| level.admits_property(p))
		.collect();
	properties.sort_by_key(|p| property_sort_key(p));
	for pair in properties.windows(2) {
		if property_sort_key(pair[0]) == property_sort_key(pair[1]) {
			return Err(SurfError::DuplicateMember {
				declaring_type: declaring.clone(),
				member: pair[0].name.clone(),
				signature: property_signature(pair[0]),
			});
		}
	}

	let visible_methods: Vec<&Method> = ty
		.methods
		.iter()
		.filter(|m| level.admits_method(m))
		.collect();
	let mut constructors: Vec<&Method> = Vec::new();
	let mut methods: Vec<&Method> = Vec::new();
	for method in visible_methods {
		if method.name == ".ctor" || method.name == ".cctor" {
			constructors.push(method);
		} else {
			methods.push(method);
		}
	}
	constructors.sort_by_key(|m| method_signature(m));
	methods.sort_by_key(|m| (m.name.clone(), method_signature(m)));
	for pair in constructors.windows(2).chain(methods.windows(2)) {
		if pair[0].name == pair[1].name && method_signature(pair[0]) == method_signature(pair[1]) {
			return Err(SurfError::DuplicateMember {
				declaring_type: declaring.clone(),
				member: pair[0].name.clone(),
				signature: method_signature(pair[0]),
			});
		}
	}

	let mut nested: Vec<&TypeDef> = ty.nested.iter().filter(|n| level.admits_type(n)).collect();
	nested.sort_by_key(|n| n.metadata_name());
	for pair in nested.windows(2) {
		if pair[0].metadata_name() == pair[1].metadata_name() {
			return Err(SurfError::DuplicateType {
				namespace: ty.namespace.clone(),
				name: pair[0].metadata_name(),
			});
		}
	}

	Ok(OrderedMembers {
		fields,
		constructors,
		properties,
		events,
		methods,
		nested,
	})
}

fn check_unique<'a, I>(names: I, declaring: &str) -> Result<()>
where
	I: Iterator<Item = &'a str>,
{
	let mut previous: Option<&str> = None;
	for name in names {
		if previous == Some(name) {
			return Err(SurfError::DuplicateMember {
				declaring_type: declaring.to_string(),
				member: name.to_string(),
				signature: name.to_string(),
			});
		}
		previous = Some(name);
	}
	Ok(())
}

fn property_sort_key(property: &Property) -> (String, String) {
	if property.is_indexer() {
		(property.name.clone(), property_signature(property))
	} else {
		(property.name.clone(), String::new())
	}
}

/// Signature string of a property: index parameter types plus the property
/// type, used to order and disambiguate indexers.
pub fn property_signature(property: &Property) -> String {
	let params: Vec<_> = property
		.index_params
		.iter()
		.map(|p| signature_type(&p.ty))
		.collect();
	format!("({}):{}", params.join(","), signature_type(&property.ty))
}

/// Signature string of a method. Includes the generic arity suffix, since
/// arity is not otherwise captured by parameter and return types.
pub fn method_signature(method: &Method) -> String {
	let mut sig = String::new();
	if !method.generic_params.is_empty() {
		sig.push('`');
		sig.push_str(&method.generic_params.len().to_string());
	}
	sig.push('(');
	let params: Vec<_> = method
		.params
		.iter()
		.map(|p| {
			let mut s = signature_type(&p.ty);
			if p.by_ref.is_some() {
				s.push('&');
			}
			s
		})
		.collect();
	sig.push_str(&params.join(","));
	sig.push_str("):");
	sig.push_str(&signature_type(&method.returns.ty));
	if method.returns.by_ref {
		sig.push('&');
	}
	sig
}

/// Structural stringification of a type reference, independent of annotations
/// and rendering context. Generic parameters use the ECMA `!`/`!!` spelling so
/// that a type parameter can never collide with a named type.
pub fn signature_type(ty: &TypeRef) -> String {
	match ty {
		TypeRef::Named { name, args, .. } => {
			if args.is_empty() {
				name.clone()
			} else {
				let rendered: Vec<_> = args.iter().map(signature_type).collect();
				format!("{}<{}>", name, rendered.join(","))
			}
		}
		TypeRef::Array { element, rank } => {
			format!(
				"{}[{}]",
				signature_type(element),
				",".repeat((*rank as usize).saturating_sub(1))
			)
		}
		TypeRef::Pointer { pointee } => format!("{}*", signature_type(pointee)),
		TypeRef::FnPtr { params, ret, .. } => {
			let rendered: Vec<_> = params.iter().map(signature_type).collect();
			format!("fnptr({}):{}", rendered.join(","), signature_type(ret))
		}
		TypeRef::TypeParam { name, method } => {
			if *method {
				format!("!!{name}")
			} else {
				format!("!{name}")
			}
		}
		TypeRef::Modified {
			modifier,
			required,
			inner,
		} => {
			let kind = if *required { "modreq" } else { "modopt" };
			format!("{} {kind}({modifier})", signature_type(inner))
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::{Accessibility, MemberFlags, Param, ReturnSig, TypeKind};

	fn ty(name: &str) -> TypeDef {
		TypeDef::new("N", name, TypeKind::Class, Accessibility::Public)
	}

	fn method(name: &str, params: Vec<Param>) -> Method {
		Method {
			name: name.into(),
			access: Accessibility::Public,
			flags: MemberFlags::empty(),
			generic_params: Vec::new(),
			params,
			returns: ReturnSig::void(),
			attributes: Vec::new(),
		}
	}

	fn int_param(name: &str) -> Param {
		Param::new(name, TypeRef::named("System.Int32", true))
	}

	#[test]
	fn namespaces_sort_with_global_first() {
		let a = {
			let mut t = ty("A");
			t.namespace = String::new();
			t
		};
		let b = ty("B");
		let types = vec![&b, &a];
		let groups = order_namespaces(&types).unwrap();
		assert_eq!(groups[0].name, "");
		assert_eq!(groups[1].name, "N");
	}

	#[test]
	fn declaration_order_does_not_matter() {
		let a = ty("Alpha");
		let b = ty("Beta");
		let forward = order_namespaces(&[&a, &b]).unwrap();
		let reverse = order_namespaces(&[&b, &a]).unwrap();
		let names =
			|groups: &[NamespaceGroup]| -> Vec<String> {
				groups[0].types.iter().map(|t| t.name.clone()).collect()
			};
		assert_eq!(names(&forward), names(&reverse));
	}

	#[test]
	fn same_name_different_arity_is_not_a_duplicate() {
		let plain = ty("List");
		let mut generic = ty("List");
		generic
			.generic_params
			.push(crate::model::GenericParam::new("T"));
		assert!(order_namespaces(&[&plain, &generic]).is_ok());
	}

	#[test]
	fn duplicate_type_is_fatal() {
		let first = ty("C");
		let second = ty("C");
		let err = order_namespaces(&[&first, &second]).unwrap_err();
		assert!(matches!(err, SurfError::DuplicateType { .. }));
	}

	#[test]
	fn overloads_order_by_signature_string() {
		let mut t = ty("C");
		t.methods.push(method("M", vec![int_param("a"), int_param("b")]));
		t.methods.push(method("M", Vec::new()));
		t.methods.push(method(
			"M",
			vec![Param::new("s", TypeRef::named("System.String", false))],
		));
		let ordered = order_members(&t, VisibilityLevel::PublicOnly).unwrap();
		let sigs: Vec<_> = ordered.methods.iter().map(|m| method_signature(m)).collect();
		let mut sorted = sigs.clone();
		sorted.sort();
		assert_eq!(sigs, sorted);
	}

	#[test]
	fn duplicate_method_signature_is_fatal() {
		let mut t = ty("C");
		t.methods.push(method("M", vec![int_param("a")]));
		t.methods.push(method("M", vec![int_param("renamed")]));
		let err = order_members(&t, VisibilityLevel::PublicOnly).unwrap_err();
		assert!(matches!(err, SurfError::DuplicateMember { .. }));
	}

	#[test]
	fn generic_arity_disambiguates_method_overloads() {
		let mut t = ty("C");
		let mut generic = method("M", Vec::new());
		generic
			.generic_params
			.push(crate::model::GenericParam::new("T"));
		t.methods.push(method("M", Vec::new()));
		t.methods.push(generic);
		assert!(order_members(&t, VisibilityLevel::PublicOnly).is_ok());
	}

	#[test]
	fn duplicate_field_after_filtering_is_fatal() {
		let mut t = ty("C");
		for _ in 0..2 {
			t.fields.push(crate::model::Field {
				name: "X".into(),
				access: Accessibility::Public,
				ty: TypeRef::named("System.Int32", true),
				is_static: false,
				is_readonly: false,
				is_literal: false,
				constant: None,
				attributes: Vec::new(),
			});
		}
		let err = order_members(&t, VisibilityLevel::PublicOnly).unwrap_err();
		assert!(matches!(err, SurfError::DuplicateMember { .. }));
	}

	#[test]
	fn invisible_duplicate_does_not_trip_detection() {
		let mut t = ty("C");
		t.methods.push(method("M", vec![int_param("a")]));
		let mut hidden = method("M", vec![int_param("a")]);
		hidden.access = Accessibility::Private;
		t.methods.push(hidden);
		assert!(order_members(&t, VisibilityLevel::PublicOnly).is_ok());
	}

	#[test]
	fn byref_marks_signature_types() {
		let mut m = method("M", vec![int_param("a")]);
		m.params[0].by_ref = Some(crate::model::RefKind::Ref);
		assert_eq!(method_signature(&m), "(System.Int32&):System.Void");
	}

	#[test]
	fn signature_type_distinguishes_param_owners() {
		let on_type = TypeRef::TypeParam {
			name: "T".into(),
			method: false,
		};
		let on_method = TypeRef::TypeParam {
			name: "T".into(),
			method: true,
		};
		assert_ne!(signature_type(&on_type), signature_type(&on_method));
	}
}
