use std::{io, path::PathBuf};

use thiserror::Error;

use crate::render::ArtifactKind;

/// A required input is missing or unusable; raised before anything is scanned.
#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("no {role} directory given")]
	EmptyPath { role: &'static str },
	#[error("{role} directory {} does not exist", path.display())]
	Missing { role: &'static str, path: PathBuf },
	#[error("{role} path {} is not a directory", path.display())]
	NotADirectory { role: &'static str, path: PathBuf },
}

/// The scanned directory could not be read or contains malformed source.
#[derive(Debug, Error)]
pub enum ParseError {
	#[error("failed to read {}: {source}", path.display())]
	Read {
		path: PathBuf,
		#[source]
		source: io::Error,
	},
	#[error("{}:{line}:{column}: {message}", path.display())]
	Syntax {
		path: PathBuf,
		line: usize,
		column: usize,
		message: String,
	},
}

/// Expanding or writing one artifact failed.
#[derive(Debug, Error)]
pub enum RenderError {
	#[error("template `{template}`: `{name}` is not a valid identifier")]
	InvalidIdent {
		template: &'static str,
		name: String,
	},
	#[error("template `{template}`: kind `{name}` is declared by more than one registry: {}", registries.join(", "))]
	DuplicateKind {
		template: &'static str,
		name: String,
		registries: Vec<String>,
	},
	#[error("template `{template}`: {option} `{value}` is not a valid path: {message}")]
	InvalidPath {
		template: &'static str,
		option: &'static str,
		value: String,
		message: String,
	},
	#[error("rustfmt failed on {}: {message}", path.display())]
	Format { path: PathBuf, message: String },
	#[error("failed to write {}: {source}", path.display())]
	Write {
		path: PathBuf,
		#[source]
		source: io::Error,
	},
}

#[derive(Debug, Error)]
pub enum GenerateError {
	#[error(transparent)]
	Config(#[from] ConfigError),
	#[error(transparent)]
	Parse(#[from] ParseError),
	#[error("{} of {requested} artifacts failed in {}: {}", failed.len(), dir.display(), itertools::join(failed, ", "))]
	Artifacts {
		dir: PathBuf,
		failed: Vec<ArtifactKind>,
		requested: usize,
	},
}
