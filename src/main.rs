//! CLI entrypoint.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, ValueEnum};
use cilsurf::loader::{Resolver, load_document, write_snapshot};
use cilsurf::{
	EnumLiteralStyle, MarkdownStyle, OutputStyle, PlainStyle, Surface, SurfError,
	VisibilityLevel,
};
use owo_colors::OwoColorize;

#[derive(Debug, Clone, Copy, ValueEnum)]
/// Available output styles.
enum StyleOpt {
	/// C#-like plain text with namespace blocks.
	Plain,
	/// Markdown with per-namespace headings and fenced code blocks.
	Markdown,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
/// Visibility levels accepted by `--visibility`.
enum VisibilityOpt {
	/// Externally visible elements only.
	Public,
	/// Additionally include internal-equivalent elements.
	Internal,
}

impl From<VisibilityOpt> for VisibilityLevel {
	fn from(opt: VisibilityOpt) -> Self {
		match opt {
			VisibilityOpt::Public => Self::PublicOnly,
			VisibilityOpt::Internal => Self::PublicAndInternal,
		}
	}
}

#[derive(Debug, Clone, Copy, ValueEnum)]
/// Enum member value renditions accepted by `--enum-style`.
enum EnumStyleOpt {
	/// Hexadecimal values (`0x03`).
	Hex,
	/// Binary values (`0b0000_0011`).
	Binary,
	/// Character literals where the value maps to one.
	Char,
}

#[derive(Parser)]
#[command(
	name = "cilsurf",
	version,
	about = "Render a deterministic API surface snapshot of a compiled .NET module"
)]
struct Cli {
	/// Path to the module metadata document (JSON)
	input: PathBuf,

	/// Write the snapshot to this file instead of stdout; `-` forces stdout
	#[arg(short = 'o', long)]
	output: Option<PathBuf>,

	/// Select the output style
	#[arg(short = 's', long, value_enum, default_value = "plain")]
	style: StyleOpt,

	/// Select the visibility level of the rendered surface
	#[arg(long, value_enum, default_value = "public")]
	visibility: VisibilityOpt,

	/// Render only attributes matching a wildcard pattern (repeatable)
	#[arg(long = "include-attribute", value_name = "PATTERN")]
	include_attribute: Vec<String>,

	/// Drop attributes matching a wildcard pattern (repeatable)
	#[arg(long = "exclude-attribute", value_name = "PATTERN")]
	exclude_attribute: Vec<String>,

	/// How enum member values are written (repeatable, combined)
	#[arg(long = "enum-style", value_enum, value_delimiter = ',')]
	enum_style: Vec<EnumStyleOpt>,

	/// Additional directory to search for referenced module documents (repeatable)
	#[arg(long = "search-dir", value_name = "DIR")]
	search_dir: Vec<PathBuf>,

	/// Disable ANSI colors in error output
	#[arg(long, default_value_t = false)]
	no_color: bool,
}

fn should_color_output(cli: &Cli) -> bool {
	if cli.no_color {
		return false;
	}
	if std::env::var_os("NO_COLOR").is_some() {
		return false;
	}
	if std::env::var("TERM").ok().as_deref() == Some("dumb") {
		return false;
	}
	std::io::stderr().is_terminal()
}

/// Process exit code for an error, mirroring the documented CLI contract.
fn exit_code(err: &SurfError) -> i32 {
	match err {
		SurfError::InputNotFound(_) => 3,
		SurfError::OutputDirMissing(_) => 4,
		SurfError::UnresolvedReference { .. } => 5,
		SurfError::DuplicateType { .. } | SurfError::DuplicateMember { .. } => 6,
		_ => 1,
	}
}

fn enum_style(opts: &[EnumStyleOpt]) -> EnumLiteralStyle {
	let mut style = EnumLiteralStyle::default();
	for opt in opts {
		match opt {
			EnumStyleOpt::Hex => style.hexadecimal = true,
			EnumStyleOpt::Binary => style.binary = true,
			EnumStyleOpt::Char => style.character = true,
		}
	}
	style
}

fn run(cli: &Cli) -> Result<(), SurfError> {
	let doc = load_document(&cli.input)?;
	let base_dir = cli.input.parent().unwrap_or_else(|| Path::new("."));
	let resolver = Resolver::load(&doc, base_dir, &cli.search_dir)?;

	let style: Box<dyn OutputStyle> = match cli.style {
		StyleOpt::Plain => Box::new(PlainStyle),
		StyleOpt::Markdown => Box::new(MarkdownStyle),
	};

	let mut surface = Surface::new()
		.with_visibility(cli.visibility.into())
		.with_style(style)
		.with_enum_style(enum_style(&cli.enum_style));
	for pattern in &cli.include_attribute {
		surface = surface.with_included_attribute(pattern.as_str());
	}
	for pattern in &cli.exclude_attribute {
		surface = surface.with_excluded_attribute(pattern.as_str());
	}

	let text = surface.render(&doc, &resolver)?;
	write_snapshot(cli.output.as_deref(), &text)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn exit_codes_follow_the_documented_contract() {
		assert_eq!(exit_code(&SurfError::InputNotFound("x.json".into())), 3);
		assert_eq!(exit_code(&SurfError::OutputDirMissing("out".into())), 4);
		assert_eq!(
			exit_code(&SurfError::UnresolvedReference {
				module: "Dep".into(),
				searched: Vec::new(),
			}),
			5
		);
		assert_eq!(
			exit_code(&SurfError::DuplicateType {
				namespace: "N".into(),
				name: "C".into(),
			}),
			6
		);
		assert_eq!(
			exit_code(&SurfError::DuplicateMember {
				declaring_type: "N.C".into(),
				member: "Run".into(),
				signature: "Run()".into(),
			}),
			6
		);
	}

	#[test]
	fn enum_style_flags_combine() {
		let style = enum_style(&[EnumStyleOpt::Hex, EnumStyleOpt::Char]);
		assert!(style.hexadecimal);
		assert!(style.character);
		assert!(!style.binary);
	}
}

fn main() {
	let cli = Cli::parse();
	let color = should_color_output(&cli);

	if let Err(e) = run(&cli) {
		if color {
			eprintln!("{} {e}", "error:".red().bold());
		} else {
			eprintln!("error: {e}");
		}
		process::exit(exit_code(&e));
	}
}
