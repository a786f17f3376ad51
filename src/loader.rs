//! Loading module metadata documents, resolving cross-module references and
//! writing the rendered snapshot to its destination.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::model::{ModuleDoc, TypeDef, TypeKind};
use crate::surface::error::{Result, SurfError};

/// Load one module metadata document from disk.
pub fn load_document(path: &Path) -> Result<ModuleDoc> {
	if !path.is_file() {
		return Err(SurfError::InputNotFound(path.to_path_buf()));
	}
	let text = fs::read_to_string(path)?;
	Ok(serde_json::from_str(&text)?)
}

/// Write a rendered snapshot to `target`, or to stdout when `target` is
/// `None` or the `-` sentinel. Destination directories are never created; a
/// missing parent directory is an error.
pub fn write_snapshot(target: Option<&Path>, text: &str) -> Result<()> {
	match target {
		None => print!("{text}"),
		Some(path) if path == Path::new("-") => print!("{text}"),
		Some(path) => {
			if let Some(dir) = path.parent() {
				if !dir.as_os_str().is_empty() && !dir.is_dir() {
					return Err(SurfError::OutputDirMissing(dir.to_path_buf()));
				}
			}
			fs::write(path, text)?;
		}
	}
	Ok(())
}

/// Resolves type lookups that cross module boundaries.
///
/// Every module named in the input document's reference list must be loadable
/// as `<name>.json` from the input's own directory or one of the configured
/// search directories; a missing reference is an error up front rather than a
/// degraded render later. Documents are keyed by module name in a sorted map
/// so fallback lookups scan in a fixed order.
#[derive(Debug, Default)]
pub struct Resolver {
	referenced: BTreeMap<String, ModuleDoc>,
}

impl Resolver {
	/// A resolver with no referenced modules.
	pub fn empty() -> Self {
		Self::default()
	}

	/// Load every module the document references, searching `base_dir` first
	/// and then each of `search_dirs` in order.
	pub fn load(doc: &ModuleDoc, base_dir: &Path, search_dirs: &[PathBuf]) -> Result<Self> {
		let mut dirs: Vec<PathBuf> = Vec::with_capacity(search_dirs.len() + 1);
		dirs.push(base_dir.to_path_buf());
		dirs.extend(search_dirs.iter().cloned());

		let mut referenced = BTreeMap::new();
		for module in &doc.references {
			let file_name = format!("{module}.json");
			let found = dirs.iter().map(|d| d.join(&file_name)).find(|p| p.is_file());
			let Some(path) = found else {
				return Err(SurfError::UnresolvedReference {
					module: module.clone(),
					searched: dirs,
				});
			};
			let text = fs::read_to_string(&path)?;
			referenced.insert(module.clone(), serde_json::from_str::<ModuleDoc>(&text)?);
		}
		Ok(Self { referenced })
	}

	/// Find the enum definition behind a fully qualified name, looking in the
	/// current module first and then in every referenced module.
	pub fn find_enum<'a>(&'a self, current: &'a ModuleDoc, full_name: &str) -> Option<&'a TypeDef> {
		if let Some(found) = find_enum_in(&current.types, full_name) {
			return Some(found);
		}
		self.referenced
			.values()
			.find_map(|doc| find_enum_in(&doc.types, full_name))
	}
}

/// Walk a type tree matching dotted full names; nested types take their
/// enclosing type's name as a path segment (`N.Outer.Inner`).
fn find_enum_in<'a>(types: &'a [TypeDef], full_name: &str) -> Option<&'a TypeDef> {
	fn walk<'a>(types: &'a [TypeDef], prefix: &str, target: &str) -> Option<&'a TypeDef> {
		for ty in types {
			let qualified = if prefix.is_empty() {
				ty.full_name()
			} else {
				format!("{prefix}.{}", ty.name)
			};
			if qualified == target && ty.kind == TypeKind::Enum {
				return Some(ty);
			}
			if target.starts_with(qualified.as_str())
				&& target.as_bytes().get(qualified.len()) == Some(&b'.')
			{
				if let Some(found) = walk(&ty.nested, &qualified, target) {
					return Some(found);
				}
			}
		}
		None
	}
	walk(types, "", full_name)
}
