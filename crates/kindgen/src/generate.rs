//! Runs the scanner and the templates over one directory.
//!
//! Inputs are validated first, then the directory is scanned once. A scan
//! failure aborts the run; after that every artifact is attempted on its own
//! and its outcome recorded in the [`Report`].

use std::path::{Path, PathBuf};

use tracing::{error, info, instrument};

use crate::{
	error::{ConfigError, GenerateError, RenderError},
	model::CodeTemplate,
	render::{self, ArtifactKind, RenderOptions},
	scan,
};

#[derive(Debug)]
pub enum ArtifactStatus {
	Written,
	/// Nothing to emit for this kind.
	Skipped,
	Failed(RenderError),
}

#[derive(Debug)]
pub struct ArtifactOutcome {
	pub kind: ArtifactKind,
	pub path: PathBuf,
	pub status: ArtifactStatus,
}

/// What a run did, per artifact kind, in [`ArtifactKind`] order.
#[derive(Debug)]
pub struct Report {
	pub dir: PathBuf,
	pub artifacts: Vec<ArtifactOutcome>,
}

impl Report {
	pub fn written(&self) -> impl Iterator<Item = &ArtifactOutcome> {
		self.artifacts
			.iter()
			.filter(|a| matches!(a.status, ArtifactStatus::Written))
	}

	/// Artifacts the emission policy asked for, whatever their outcome.
	pub fn requested(&self) -> impl Iterator<Item = &ArtifactOutcome> {
		self.artifacts
			.iter()
			.filter(|a| !matches!(a.status, ArtifactStatus::Skipped))
	}

	pub fn failures(&self) -> impl Iterator<Item = (ArtifactKind, &RenderError)> {
		self.artifacts.iter().filter_map(|a| match &a.status {
			ArtifactStatus::Failed(e) => Some((a.kind, e)),
			_ => None,
		})
	}

	pub fn is_success(&self) -> bool {
		self.failures().next().is_none()
	}

	/// Turns a run with failed artifacts into an error naming them.
	pub fn ensure_success(self) -> Result<Self, GenerateError> {
		if self.is_success() {
			return Ok(self);
		}
		Err(GenerateError::Artifacts {
			failed: self.failures().map(|(kind, _)| kind).collect(),
			requested: self.requested().count(),
			dir: self.dir,
		})
	}
}

/// Generates object metadata and the registry helper next to the scanned
/// types.
pub fn generate_objects(dir: &Path, options: &RenderOptions) -> Result<Report, GenerateError> {
	generate_objects_into(dir, dir, options)
}

/// Like [`generate_objects`], writing into `out` instead of the scanned
/// directory.
#[instrument(skip_all, fields(src = %src.display(), out = %out.display()))]
pub fn generate_objects_into(
	src: &Path,
	out: &Path,
	options: &RenderOptions,
) -> Result<Report, GenerateError> {
	validate_dir("source", src)?;
	validate_dir("output", out)?;
	let model = scan::scan(src)?;

	let mut kinds = Vec::new();
	if model.has_api_objects() {
		kinds.extend(ArtifactKind::OBJECT_METADATA);
	}
	if model.has_api_objects() || model.has_registries() {
		kinds.push(ArtifactKind::Helper);
	}

	Ok(run(&model, out, &ArtifactKind::OBJECTS, &kinds, options))
}

/// Generates the typed client for the registries of `src` into `out`.
///
/// A client is written even when `src` declares no registries.
#[instrument(skip_all, fields(src = %src.display(), out = %out.display()))]
pub fn generate_client(
	src: &Path,
	out: &Path,
	options: &RenderOptions,
) -> Result<Report, GenerateError> {
	validate_dir("source", src)?;
	validate_dir("output", out)?;
	let model = scan::scan(src)?;
	Ok(run(&model, out, &[ArtifactKind::Client], &[ArtifactKind::Client], options))
}

fn validate_dir(role: &'static str, path: &Path) -> Result<(), ConfigError> {
	if path.as_os_str().is_empty() {
		return Err(ConfigError::EmptyPath { role });
	}
	if !path.exists() {
		return Err(ConfigError::Missing {
			role,
			path: path.to_owned(),
		});
	}
	if !path.is_dir() {
		return Err(ConfigError::NotADirectory {
			role,
			path: path.to_owned(),
		});
	}
	Ok(())
}

/// Renders `emit` out of the `group`; kinds of the group not in `emit` are
/// reported as skipped.
fn run(
	model: &CodeTemplate,
	out: &Path,
	group: &[ArtifactKind],
	emit: &[ArtifactKind],
	options: &RenderOptions,
) -> Report {
	let artifacts = group
		.iter()
		.map(|&kind| {
			let path = out.join(kind.file_name());
			let status = if !emit.contains(&kind) {
				ArtifactStatus::Skipped
			} else {
				match render::render(kind.template(), model, options, &path) {
					Ok(()) => ArtifactStatus::Written,
					Err(cause) => {
						error!(dir = %out.display(), artifact = %kind, %cause, "generation failed");
						ArtifactStatus::Failed(cause)
					}
				}
			};
			ArtifactOutcome { kind, path, status }
		})
		.collect::<Vec<_>>();

	let report = Report {
		dir: out.to_owned(),
		artifacts,
	};
	info!(
		written = report.written().count(),
		failed = report.failures().count(),
		"done"
	);
	report
}

#[cfg(test)]
mod tests {
	use std::fs;

	use assert_matches::assert_matches;

	use super::*;

	fn options() -> RenderOptions {
		RenderOptions {
			format: false,
			..RenderOptions::default()
		}
	}

	#[test]
	fn empty_path() {
		let err = generate_objects(Path::new(""), &options()).unwrap_err();
		assert_matches!(err, GenerateError::Config(ConfigError::EmptyPath { role: "source" }));
	}

	#[test]
	fn missing_dir() {
		let dir = tempfile::tempdir().unwrap();
		let absent = dir.path().join("absent");
		let err = generate_objects(&absent, &options()).unwrap_err();
		assert_matches!(err, GenerateError::Config(ConfigError::Missing { path, .. }) if path == absent);
	}

	#[test]
	fn file_is_not_a_dir() {
		let dir = tempfile::tempdir().unwrap();
		let file = dir.path().join("types.rs");
		fs::write(&file, "").unwrap();
		let err = generate_client(dir.path(), &file, &options()).unwrap_err();
		assert_matches!(
			err,
			GenerateError::Config(ConfigError::NotADirectory { role: "output", .. })
		);
	}

	#[test]
	fn nothing_found_skips_everything() {
		let dir = tempfile::tempdir().unwrap();
		fs::write(dir.path().join("lib.rs"), "pub struct Plain;").unwrap();
		let report = generate_objects(dir.path(), &options()).unwrap();
		assert_eq!(report.artifacts.len(), 4);
		assert_eq!(report.written().count(), 0);
		assert!(report.is_success());
		assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
	}

	#[test]
	fn ensure_success_names_failures() {
		let dir = tempfile::tempdir().unwrap();
		fs::write(
			dir.path().join("types.rs"),
			"pub struct Host { base: core::BaseApiObj }",
		)
		.unwrap();
		fs::create_dir(dir.path().join("zz_generated.encode.rs")).unwrap();

		let err = generate_objects(dir.path(), &options())
			.unwrap()
			.ensure_success()
			.unwrap_err();
		assert_matches!(
			&err,
			GenerateError::Artifacts { failed, requested: 4, .. } if failed == &[ArtifactKind::Encode]
		);
		assert!(err.to_string().starts_with("1 of 4 artifacts failed in "));
		assert!(err.to_string().ends_with(": encode"));
	}

	#[test]
	fn skipped_kinds_are_not_counted_as_requested() {
		let dir = tempfile::tempdir().unwrap();
		fs::write(
			dir.path().join("registries.rs"),
			"pub struct NodeRegistry { r: registry::Registry }",
		)
		.unwrap();
		fs::create_dir(dir.path().join("zz_generated.helper.rs")).unwrap();

		let report = generate_objects(dir.path(), &options()).unwrap();
		assert_eq!(report.requested().count(), 1);
		let err = report.ensure_success().unwrap_err();
		assert_matches!(
			&err,
			GenerateError::Artifacts { failed, requested: 1, .. } if failed == &[ArtifactKind::Helper]
		);
		assert!(err.to_string().starts_with("1 of 1 artifacts failed in "));
	}
}
