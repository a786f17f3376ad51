use std::fmt;
use std::path::PathBuf;

use serde_json::Error as SerdeError;

/// Aggregate errors produced while loading and rendering a surface snapshot.
#[derive(Debug)]
pub enum SurfError {
	/// Invalid configuration (bad style name, bad pattern, and so on).
	Config(String),
	/// The input module document does not exist.
	InputNotFound(PathBuf),
	/// The directory of the requested output file does not exist.
	OutputDirMissing(PathBuf),
	/// A referenced module document could not be located in the search path.
	UnresolvedReference {
		/// Name of the missing module reference.
		module: String,
		/// Directories that were searched.
		searched: Vec<PathBuf>,
	},
	/// Two types share one (namespace, simple-name) pair after filtering.
	DuplicateType {
		/// Namespace of the colliding types.
		namespace: String,
		/// Metadata simple name of the colliding types.
		name: String,
	},
	/// Two members of one type are indistinguishable after filtering.
	DuplicateMember {
		/// Namespace-qualified name of the declaring type.
		declaring_type: String,
		/// Member name.
		member: String,
		/// Signature string the orderer could not disambiguate.
		signature: String,
	},
	/// Failed to encode or decode a module document.
	Serialization(SerdeError),
	/// Failed to perform IO operations.
	Io(std::io::Error),
}

impl fmt::Display for SurfError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Config(message) => write!(f, "{message}"),
			Self::InputNotFound(path) => {
				write!(f, "input module document not found: {}", path.display())
			}
			Self::OutputDirMissing(path) => write!(
				f,
				"output directory does not exist: {}",
				path.display()
			),
			Self::UnresolvedReference { module, searched } => {
				write!(
					f,
					"referenced module `{module}` was not found; searched: "
				)?;
				if searched.is_empty() {
					write!(f, "(no directories)")?;
				} else {
					let dirs: Vec<_> =
						searched.iter().map(|p| p.display().to_string()).collect();
					write!(f, "{}", dirs.join(", "))?;
				}
				write!(f, ". Add the containing directory with --search-dir.")
			}
			Self::DuplicateType { namespace, name } => {
				let qualified = if namespace.is_empty() {
					name.clone()
				} else {
					format!("{namespace}.{name}")
				};
				write!(
					f,
					"duplicate type definition `{qualified}` in the filtered surface"
				)
			}
			Self::DuplicateMember {
				declaring_type,
				member,
				signature,
			} => write!(
				f,
				"duplicate member `{member}` on `{declaring_type}` with signature `{signature}`"
			),
			Self::Serialization(err) => write!(f, "{err}"),
			Self::Io(err) => write!(f, "{err}"),
		}
	}
}

impl std::error::Error for SurfError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Self::Serialization(err) => Some(err),
			Self::Io(err) => Some(err),
			_ => None,
		}
	}
}

impl From<SerdeError> for SurfError {
	fn from(err: SerdeError) -> Self {
		Self::Serialization(err)
	}
}

impl From<std::io::Error> for SurfError {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

/// Result type returned throughout the crate.
pub type Result<T> = std::result::Result<T, SurfError>;
