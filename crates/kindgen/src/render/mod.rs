//! Expands templates against a [`CodeTemplate`] and writes the result.

use std::{
	fmt,
	fs::File,
	io::Write,
	path::Path,
	str::FromStr,
};

use itertools::Itertools;
use proc_macro2::{Ident, TokenStream};
use tracing::{debug, instrument};

use crate::{error::RenderError, model::CodeTemplate, util};

mod client;
mod helper;
mod objects;

pub use client::ClientTemplate;
pub use helper::HelperTemplate;
pub use objects::{DeepCopyTemplate, EncodeTemplate, HashTemplate};

/// One category of generated code, rendered into its own file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArtifactKind {
	Encode,
	Hash,
	DeepCopy,
	Helper,
	Client,
}

impl ArtifactKind {
	pub const ALL: [Self; 5] = [
		Self::Encode,
		Self::Hash,
		Self::DeepCopy,
		Self::Helper,
		Self::Client,
	];

	/// Kinds emitted once per API object.
	pub const OBJECT_METADATA: [Self; 3] = [Self::Encode, Self::Hash, Self::DeepCopy];

	/// Kinds written by an objects run: the metadata group plus the helper.
	pub const OBJECTS: [Self; 4] = [Self::Encode, Self::Hash, Self::DeepCopy, Self::Helper];

	pub fn name(self) -> &'static str {
		self.template().name()
	}

	pub fn file_name(self) -> String {
		format!("{}.{}.rs", util::GENERATED_PREFIX, self.name())
	}

	pub fn template(self) -> &'static dyn Template {
		match self {
			Self::Encode => &EncodeTemplate,
			Self::Hash => &HashTemplate,
			Self::DeepCopy => &DeepCopyTemplate,
			Self::Helper => &HelperTemplate,
			Self::Client => &ClientTemplate,
		}
	}
}

impl fmt::Display for ArtifactKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for ArtifactKind {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|kind| kind.name() == s)
			.ok_or_else(|| format!("unknown artifact kind `{s}`"))
	}
}

/// A named template producing Rust items from the model.
pub trait Template {
	fn name(&self) -> &'static str;

	fn expand(&self, model: &CodeTemplate, cx: &Context) -> Result<TokenStream, RenderError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
	/// Path under which generated code reaches `kindgen-runtime`.
	pub runtime_crate: String,
	/// Path from the client file to the scanned types.
	pub types_path: String,
	/// Run the output through `rustfmt`.
	pub format: bool,
}

impl Default for RenderOptions {
	fn default() -> Self {
		Self {
			runtime_crate: "::kindgen_runtime".to_owned(),
			types_path: "super".to_owned(),
			format: true,
		}
	}
}

/// Resolved options of one expansion.
pub struct Context {
	template: &'static str,
	pub runtime: syn::Path,
	pub types: syn::Path,
}

impl Context {
	pub fn new(template: &'static str, options: &RenderOptions) -> Result<Self, RenderError> {
		let path = |option: &'static str, value: &str| {
			syn::parse_str::<syn::Path>(value).map_err(|e| RenderError::InvalidPath {
				template,
				option,
				value: value.to_owned(),
				message: e.to_string(),
			})
		};
		Ok(Self {
			template,
			runtime: path("runtime crate", &options.runtime_crate)?,
			types: path("types path", &options.types_path)?,
		})
	}

	/// `name` as an identifier, rejecting empty names and keywords.
	pub fn ident(&self, name: &str) -> Result<Ident, RenderError> {
		syn::parse_str::<Ident>(name).map_err(|_| RenderError::InvalidIdent {
			template: self.template,
			name: name.to_owned(),
		})
	}

	/// Fails when two registries map to the same kind name, as with
	/// `Host { r: registry::Registry }` next to `HostRegistry`.
	pub fn ensure_unique_kinds(&self, model: &CodeTemplate) -> Result<(), RenderError> {
		let Some((first, _)) = model
			.registries()
			.iter()
			.tuple_windows()
			.find(|(a, b)| a.name == b.name)
		else {
			return Ok(());
		};
		Err(RenderError::DuplicateKind {
			template: self.template,
			name: first.name.clone(),
			registries: model
				.registries()
				.iter()
				.filter(|r| r.name == first.name)
				.map(|r| r.registry_type_name.clone())
				.collect(),
		})
	}

	pub fn api_object_idents(&self, model: &CodeTemplate) -> Result<Vec<Ident>, RenderError> {
		model
			.api_object_names()
			.iter()
			.map(|name| self.ident(name))
			.collect()
	}
}

/// Expands `template` and writes it to `output`, replacing any previous
/// contents.
#[instrument(skip_all, fields(template = template.name(), output = %output.display()))]
pub fn render(
	template: &dyn Template,
	model: &CodeTemplate,
	options: &RenderOptions,
	output: &Path,
) -> Result<(), RenderError> {
	let cx = Context::new(template.name(), options)?;
	let mut text = template.expand(model, &cx)?.to_string();
	if options.format {
		text = util::reformat(&text).map_err(|message| RenderError::Format {
			path: output.to_owned(),
			message,
		})?;
	}
	let contents = format!(
		"// Code generated by kindgen from package `{}` (template `{}`). DO NOT EDIT.\n\n{}\n",
		model.package_name(),
		template.name(),
		text.trim_end(),
	);
	write_file(output, &contents)?;
	debug!(bytes = contents.len(), "written");
	Ok(())
}

fn write_file(path: &Path, contents: &str) -> Result<(), RenderError> {
	let write_error = |source: std::io::Error| RenderError::Write {
		path: path.to_owned(),
		source,
	};
	let mut file = File::create(path).map_err(write_error)?;
	file.write_all(contents.as_bytes()).map_err(write_error)?;
	file.flush().map_err(write_error)
}

#[cfg(test)]
mod tests {
	use std::fs;

	use assert_matches::assert_matches;

	use super::*;
	use crate::model::{Findings, RegistryDescriptor};

	pub(super) fn host_model() -> CodeTemplate {
		CodeTemplate::build(Findings {
			package_name: "api".to_owned(),
			api_objects: vec!["Host".to_owned(), "ConfigMap".to_owned()],
			registries: vec![
				RegistryDescriptor {
					name: "Host".to_owned(),
					registry_type_name: "HostRegistry".to_owned(),
					namespaced: true,
				},
				RegistryDescriptor {
					name: "Node".to_owned(),
					registry_type_name: "NodeRegistry".to_owned(),
					namespaced: false,
				},
			],
		})
	}

	pub(super) fn expand(template: &dyn Template, model: &CodeTemplate) -> String {
		let cx = Context::new(template.name(), &RenderOptions::default()).unwrap();
		let text = template.expand(model, &cx).unwrap().to_string();
		syn::parse_file(&text).expect("generated code parses");
		text
	}

	fn unformatted() -> RenderOptions {
		RenderOptions {
			format: false,
			..RenderOptions::default()
		}
	}

	#[test]
	fn kinds_round_trip_through_names() {
		for kind in ArtifactKind::ALL {
			assert_eq!(kind.name().parse::<ArtifactKind>().unwrap(), kind);
			assert!(kind.file_name().starts_with("zz_generated."));
		}
		assert_eq!(ArtifactKind::DeepCopy.file_name(), "zz_generated.deepcopy.rs");
		assert!("yaml".parse::<ArtifactKind>().is_err());
	}

	#[test]
	fn writes_header_and_truncates() {
		let dir = tempfile::tempdir().unwrap();
		let output = dir.path().join("zz_generated.hash.rs");
		fs::write(&output, "x".repeat(100_000)).unwrap();

		render(&HashTemplate, &host_model(), &unformatted(), &output).unwrap();

		let written = fs::read_to_string(&output).unwrap();
		assert!(written.starts_with(
			"// Code generated by kindgen from package `api` (template `hash`). DO NOT EDIT.\n"
		));
		assert!(!written.contains("xxx"));
		syn::parse_file(&written).unwrap();
	}

	#[test]
	fn missing_directory() {
		let dir = tempfile::tempdir().unwrap();
		let output = dir.path().join("absent").join("zz_generated.hash.rs");
		let err = render(&HashTemplate, &host_model(), &unformatted(), &output).unwrap_err();
		assert_matches!(err, RenderError::Write { path, .. } if path == output);
	}

	#[test]
	fn invalid_runtime_path() {
		let options = RenderOptions {
			runtime_crate: "kindgen runtime".to_owned(),
			..unformatted()
		};
		let dir = tempfile::tempdir().unwrap();
		let output = dir.path().join("zz_generated.encode.rs");
		let err = render(&EncodeTemplate, &host_model(), &options, &output).unwrap_err();
		assert_matches!(
			err,
			RenderError::InvalidPath { template: "encode", option: "runtime crate", .. }
		);
		assert!(!output.exists());
	}

	#[test]
	fn identifiers_are_validated() {
		let cx = Context::new("helper", &RenderOptions::default()).unwrap();
		assert!(cx.ident("Host").is_ok());
		for bad in ["", "type", "Config Map", "1st"] {
			assert_matches!(cx.ident(bad), Err(RenderError::InvalidIdent { template: "helper", .. }));
		}
	}

	#[test]
	fn custom_runtime_path() {
		let options = RenderOptions {
			runtime_crate: "crate::runtime".to_owned(),
			..RenderOptions::default()
		};
		let cx = Context::new("deepcopy", &options).unwrap();
		let text = DeepCopyTemplate.expand(&host_model(), &cx).unwrap().to_string();
		assert!(text.contains("impl crate :: runtime :: DeepCopy for Host"));
	}
}
