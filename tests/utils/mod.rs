//! Shared builders for integration tests.
#![allow(dead_code)]

use cilsurf::model::{
	Accessibility, Accessor, Attribute, ConstantValue, Field, MemberFlags, Method, ModuleDoc,
	Param, Property, ReturnSig, TypeDef, TypeKind, TypeRef,
};

pub fn module(assembly: &str, types: Vec<TypeDef>) -> ModuleDoc {
	let mut doc = ModuleDoc::new(assembly);
	doc.types = types;
	doc
}

pub fn class(namespace: &str, name: &str) -> TypeDef {
	TypeDef::new(namespace, name, TypeKind::Class, Accessibility::Public)
}

pub fn interface(namespace: &str, name: &str) -> TypeDef {
	TypeDef::new(namespace, name, TypeKind::Interface, Accessibility::Public)
}

pub fn int() -> TypeRef {
	TypeRef::named("System.Int32", true)
}

pub fn string() -> TypeRef {
	TypeRef::named("System.String", false)
}

pub fn field(name: &str, ty: TypeRef) -> Field {
	Field {
		name: name.into(),
		access: Accessibility::Public,
		ty,
		is_static: false,
		is_readonly: false,
		is_literal: false,
		constant: None,
		attributes: Vec::new(),
	}
}

pub fn const_field(name: &str, ty: TypeRef, constant: ConstantValue) -> Field {
	Field {
		is_static: true,
		is_literal: true,
		constant: Some(constant),
		..field(name, ty)
	}
}

pub fn method(name: &str, params: Vec<Param>, returns: ReturnSig) -> Method {
	Method {
		name: name.into(),
		access: Accessibility::Public,
		flags: MemberFlags::empty(),
		generic_params: Vec::new(),
		params,
		returns,
		attributes: Vec::new(),
	}
}

pub fn auto_property(name: &str, ty: TypeRef) -> Property {
	Property {
		name: name.into(),
		ty,
		index_params: Vec::new(),
		getter: Some(Accessor::new(Accessibility::Public)),
		setter: Some(Accessor::new(Accessibility::Public)),
		flags: MemberFlags::empty(),
		attributes: Vec::new(),
	}
}

/// An enum definition with `i32`-backed literal members, optionally flagged.
pub fn enum_def(namespace: &str, name: &str, flags: bool, members: &[(&str, i32)]) -> TypeDef {
	let mut ty = TypeDef::new(namespace, name, TypeKind::Enum, Accessibility::Public);
	if flags {
		ty.attributes.push(Attribute::marker("System.FlagsAttribute"));
	}
	let self_ty = TypeRef::named(format!("{namespace}.{name}"), true);
	for (member, value) in members {
		ty.fields.push(Field {
			access: Accessibility::Public,
			..const_field(member, self_ty.clone(), ConstantValue::I4(*value))
		});
	}
	ty
}
