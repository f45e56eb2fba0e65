//! `.kindgen.yaml` support.
//!
//! The file may sit anywhere above the scanned directory; the nearest one
//! wins. Command-line flags override whatever it sets.

use std::{
	fs,
	path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use kindgen::RenderOptions;
use serde::Deserialize;

pub const CONFIG_FILE_NAME: &str = ".kindgen.yaml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct KindgenConfig {
	/// Path under which generated code reaches the runtime crate.
	#[serde(default)]
	pub runtime_crate: Option<String>,
	/// Path from the generated client to the scanned types.
	#[serde(default)]
	pub types_path: Option<String>,
	/// Run generated files through rustfmt.
	#[serde(default)]
	pub format: Option<bool>,
}

impl KindgenConfig {
	/// Load config by searching from the given directory upward
	pub fn load_from_directory(start_dir: &Path) -> Result<Option<Self>> {
		find_config_file(start_dir)
			.map(|path| Self::load_from_file(&path))
			.transpose()
	}

	pub fn load_from_file(path: &Path) -> Result<Self> {
		let content = fs::read_to_string(path)
			.with_context(|| format!("failed to read config file: {}", path.display()))?;
		if content.trim().is_empty() {
			return Ok(Self::default());
		}
		serde_yaml_with_quirks::from_str(&content)
			.with_context(|| format!("failed to parse config file: {}", path.display()))
	}

	/// Values set here replace the ones in `other`.
	pub fn merged_over(self, other: Self) -> Self {
		Self {
			runtime_crate: self.runtime_crate.or(other.runtime_crate),
			types_path: self.types_path.or(other.types_path),
			format: self.format.or(other.format),
		}
	}

	pub fn into_render_options(self) -> RenderOptions {
		let defaults = RenderOptions::default();
		RenderOptions {
			runtime_crate: self.runtime_crate.unwrap_or(defaults.runtime_crate),
			types_path: self.types_path.unwrap_or(defaults.types_path),
			format: self.format.unwrap_or(defaults.format),
		}
	}
}

/// Search for a config file starting from `start_dir` and walking up to the filesystem root
pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
	let start = start_dir
		.canonicalize()
		.unwrap_or_else(|_| start_dir.to_path_buf());
	start
		.ancestors()
		.map(|dir| dir.join(CONFIG_FILE_NAME))
		.find(|path| path.is_file())
}
