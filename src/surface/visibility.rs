//! Decides which metadata elements belong to the rendered surface.

use regex::Regex;

use super::annotations;
use super::error::{Result, SurfError};
use crate::model::{Accessibility, Attribute, Event, Field, Method, Property, TypeDef};

/// Configured visibility level for a render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisibilityLevel {
	/// Only elements reachable by external consumers.
	#[default]
	PublicOnly,
	/// Additionally include internal-equivalent elements.
	PublicAndInternal,
}

impl VisibilityLevel {
	/// Whether an element with the given accessibility belongs to the surface.
	///
	/// Protected and protected-internal members count as public API under
	/// both levels: derived types outside the assembly can see them.
	pub fn admits(self, access: Accessibility) -> bool {
		match access {
			Accessibility::Public
			| Accessibility::Protected
			| Accessibility::ProtectedInternal => true,
			Accessibility::Internal | Accessibility::PrivateProtected => {
				self == Self::PublicAndInternal
			}
			Accessibility::Private => false,
		}
	}

	/// Whether a type definition is part of the surface.
	pub fn admits_type(self, ty: &TypeDef) -> bool {
		self.admits(ty.access)
	}

	/// Whether a field is part of the surface.
	pub fn admits_field(self, field: &Field) -> bool {
		self.admits(field.access)
	}

	/// Whether a method is part of the surface.
	pub fn admits_method(self, method: &Method) -> bool {
		self.admits(method.access)
	}

	/// Whether a property is part of the surface: visible when either
	/// accessor is.
	pub fn admits_property(self, property: &Property) -> bool {
		property
			.getter
			.iter()
			.chain(property.setter.iter())
			.any(|acc| self.admits(acc.access))
	}

	/// Whether an event is part of the surface. Derived solely from the
	/// add-accessor; the remove-accessor's visibility is ignored on purpose.
	pub fn admits_event(self, event: &Event) -> bool {
		event
			.add
			.as_ref()
			.is_some_and(|acc| self.admits(acc.access))
	}
}

/// Attributes that are consumed by syntax reconstruction and therefore never
/// rendered as attribute blocks.
const IMPLICIT_ATTRIBUTES: &[&str] = &[
	annotations::NULLABLE,
	annotations::NULLABLE_CONTEXT,
	annotations::DYNAMIC,
	annotations::NATIVE_INTEGER,
	annotations::TUPLE_NAMES,
	annotations::PARAM_ARRAY,
	annotations::IS_READONLY,
	annotations::IS_BYREF_LIKE,
	annotations::IS_UNMANAGED,
	annotations::EXTENSION,
	annotations::PRESERVE_BASE_OVERRIDES,
	annotations::REQUIRED_MEMBER,
];

/// Compile one `*`/`?` wildcard pattern into an anchored regex. All other
/// characters match literally.
fn compile_wildcard(pattern: &str) -> Result<Regex> {
	let mut escaped = String::with_capacity(pattern.len() * 2 + 2);
	escaped.push('^');
	for ch in pattern.chars() {
		match ch {
			'*' => escaped.push_str(".*"),
			'?' => escaped.push('.'),
			'\\' | '.' | '+' | '(' | ')' | '[' | ']' | '{' | '}' | '^' | '$' | '|' => {
				escaped.push('\\');
				escaped.push(ch);
			}
			_ => escaped.push(ch),
		}
	}
	escaped.push('$');
	Regex::new(&escaped)
		.map_err(|e| SurfError::Config(format!("invalid attribute pattern `{pattern}`: {e}")))
}

/// Include/exclude policy for rendered attributes.
#[derive(Debug, Default)]
pub struct AttributeFilter {
	includes: Vec<Regex>,
	excludes: Vec<Regex>,
}

impl AttributeFilter {
	/// Build a filter from wildcard include and exclude patterns. A non-empty
	/// include list flips the default from allow-all to deny-all.
	pub fn new(includes: &[String], excludes: &[String]) -> Result<Self> {
		Ok(Self {
			includes: includes
				.iter()
				.map(|p| compile_wildcard(p))
				.collect::<Result<_>>()?,
			excludes: excludes
				.iter()
				.map(|p| compile_wildcard(p))
				.collect::<Result<_>>()?,
		})
	}

	/// Whether the attribute survives filtering and should be rendered.
	pub fn retains(&self, attribute: &Attribute) -> bool {
		let name = attribute.name.as_str();
		if IMPLICIT_ATTRIBUTES.contains(&name) {
			return false;
		}
		if self.includes.iter().any(|re| re.is_match(name)) {
			return true;
		}
		if !self.includes.is_empty() {
			// Allow-list semantics: anything not explicitly included is out.
			return false;
		}
		!self.excludes.iter().any(|re| re.is_match(name))
	}

	/// Filter an attribute list down to the retained entries.
	pub fn retained<'a>(&self, attributes: &'a [Attribute]) -> Vec<&'a Attribute> {
		attributes.iter().filter(|a| self.retains(a)).collect()
	}
}
