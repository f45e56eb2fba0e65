//! Classifies the struct declarations of one directory by marker field.

use std::{
	fs,
	path::{Path, PathBuf},
};

use syn::{
	Attribute, Expr, ExprLit, Fields, GenericArgument, Item, ItemStruct, Lit, Meta, PathArguments,
	Type,
};
use tracing::{debug, instrument, warn};

use crate::{
	error::ParseError,
	model::{CodeTemplate, Findings, RegistryDescriptor},
	util::{is_generated_file, is_test_file, package_name},
};

/// Doc comment line that makes a registry's kind namespaced.
pub const NAMESPACED_DIRECTIVE: &str = "+namespaced=true";

const REGISTRY_SUFFIX: &str = "Registry";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
	ApiObject,
	Registry,
}

/// `(qualifier, name)` of the field types that classify a declaration.
pub const MARKERS: [(&str, &str, Marker); 2] = [
	("core", "BaseApiObj", Marker::ApiObject),
	("registry", "Registry", Marker::Registry),
];

/// Scans `dir` and builds its [`CodeTemplate`].
pub fn scan(dir: &Path) -> Result<CodeTemplate, ParseError> {
	scan_findings(dir).map(CodeTemplate::build)
}

/// Raw findings of every eligible `.rs` file in `dir`, in file-name order.
#[instrument(skip_all, fields(dir = %dir.display()))]
pub fn scan_findings(dir: &Path) -> Result<Findings, ParseError> {
	let mut findings = Findings {
		package_name: dir
			.file_name()
			.map(|name| package_name(&name.to_string_lossy()))
			.unwrap_or_default(),
		..Findings::default()
	};

	for path in source_files(dir)? {
		let source = fs::read_to_string(&path).map_err(|source| ParseError::Read {
			path: path.clone(),
			source,
		})?;
		let file = syn::parse_file(&source).map_err(|e| {
			let start = e.span().start();
			ParseError::Syntax {
				path: path.clone(),
				line: start.line,
				column: start.column + 1,
				message: e.to_string(),
			}
		})?;
		debug!(file = %path.display(), items = file.items.len(), "parsed");

		for item in &file.items {
			if let Item::Struct(decl) = item {
				classify(decl, &mut findings);
			}
		}
	}

	Ok(findings)
}

fn source_files(dir: &Path) -> Result<Vec<PathBuf>, ParseError> {
	let read_error = |source: std::io::Error| ParseError::Read {
		path: dir.to_owned(),
		source,
	};
	let mut files = Vec::new();
	for entry in fs::read_dir(dir).map_err(read_error)? {
		let entry = entry.map_err(read_error)?;
		let path = entry.path();
		if path.extension().map_or(true, |ext| ext != "rs") {
			continue;
		}
		// follows symlinks, unlike `DirEntry::file_type`
		let metadata = fs::metadata(&path).map_err(|source| ParseError::Read {
			path: path.clone(),
			source,
		})?;
		if !metadata.is_file() {
			continue;
		}
		let file_name = entry.file_name();
		let file_name = file_name.to_string_lossy();
		let stem = path.file_stem().unwrap_or_default().to_string_lossy();
		if is_generated_file(&file_name) || is_test_file(&stem) {
			debug!(file = %file_name, "skipped");
			continue;
		}
		files.push(path);
	}
	files.sort();
	Ok(files)
}

fn classify(decl: &ItemStruct, findings: &mut Findings) {
	let name = decl.ident.to_string();
	let mut seen = Vec::new();

	for field_ty in field_types(&decl.fields) {
		let Some(marker) = marker_of(field_ty) else {
			continue;
		};
		if seen.contains(&marker) {
			warn!(declaration = %name, ?marker, "marker repeated, only the first field counts");
			continue;
		}
		seen.push(marker);

		match marker {
			Marker::ApiObject => {
				debug!(declaration = %name, "api object");
				for field in shared_fields(&decl.fields) {
					warn!(declaration = %name, %field, "field is shared, not copied, by deep_copy");
				}
				findings.api_objects.push(name.clone());
			}
			Marker::Registry => {
				let descriptor = RegistryDescriptor {
					name: name.strip_suffix(REGISTRY_SUFFIX).unwrap_or(&name).to_owned(),
					registry_type_name: name.clone(),
					namespaced: is_namespaced(&decl.attrs),
				};
				debug!(declaration = %name, namespaced = descriptor.namespaced, "registry");
				findings.registries.push(descriptor);
			}
		}
	}
}

/// Wrappers whose `Clone` shares the wrapped value.
const SHARED_WRAPPERS: [&str; 6] = ["Rc", "Arc", "Cell", "RefCell", "Mutex", "RwLock"];

/// Names (or tuple indices) of fields holding a [`SHARED_WRAPPERS`] type at
/// any depth of generic arguments.
fn shared_fields(fields: &Fields) -> Vec<String> {
	fields
		.iter()
		.enumerate()
		.filter(|(_, field)| mentions_shared(&field.ty))
		.map(|(i, field)| {
			field
				.ident
				.as_ref()
				.map_or_else(|| i.to_string(), ToString::to_string)
		})
		.collect()
}

fn mentions_shared(ty: &Type) -> bool {
	match ty {
		Type::Path(ty) => ty.path.segments.iter().any(|segment| {
			SHARED_WRAPPERS.iter().any(|w| segment.ident == w)
				|| match &segment.arguments {
					PathArguments::AngleBracketed(args) => args.args.iter().any(|arg| {
						matches!(arg, GenericArgument::Type(inner) if mentions_shared(inner))
					}),
					_ => false,
				}
		}),
		Type::Array(ty) => mentions_shared(&ty.elem),
		Type::Slice(ty) => mentions_shared(&ty.elem),
		Type::Tuple(ty) => ty.elems.iter().any(mentions_shared),
		Type::Paren(ty) => mentions_shared(&ty.elem),
		Type::Group(ty) => mentions_shared(&ty.elem),
		_ => false,
	}
}

fn field_types(fields: &Fields) -> impl Iterator<Item = &Type> {
	fields.iter().map(|field| &field.ty)
}

/// Matches `qualifier::Name` exactly: two segments, no generics, no leading
/// `::`.
fn marker_of(ty: &Type) -> Option<Marker> {
	let Type::Path(ty) = ty else {
		return None;
	};
	if ty.qself.is_some() || ty.path.leading_colon.is_some() || ty.path.segments.len() != 2 {
		return None;
	}
	let mut segments = ty.path.segments.iter();
	let (qualifier, name) = (segments.next()?, segments.next()?);
	if !matches!(qualifier.arguments, PathArguments::None)
		|| !matches!(name.arguments, PathArguments::None)
	{
		return None;
	}
	MARKERS
		.iter()
		.find(|(q, n, _)| qualifier.ident == q && name.ident == n)
		.map(|(_, _, marker)| *marker)
}

fn is_namespaced(attrs: &[Attribute]) -> bool {
	doc_lines(attrs).any(|line| line.trim() == NAMESPACED_DIRECTIVE)
}

fn doc_lines(attrs: &[Attribute]) -> impl Iterator<Item = String> + '_ {
	attrs
		.iter()
		.filter_map(|attr| match &attr.meta {
			Meta::NameValue(nv) if nv.path.is_ident("doc") => match &nv.value {
				Expr::Lit(ExprLit {
					lit: Lit::Str(doc), ..
				}) => Some(doc.value()),
				_ => None,
			},
			_ => None,
		})
		.flat_map(|doc| doc.lines().map(str::to_owned).collect::<Vec<_>>())
}

#[cfg(test)]
mod tests {
	use indoc::indoc;
	use rstest::rstest;

	use super::*;

	fn findings_of(source: &str) -> Findings {
		let file = syn::parse_file(source).unwrap();
		let mut findings = Findings::default();
		for item in &file.items {
			if let Item::Struct(decl) = item {
				classify(decl, &mut findings);
			}
		}
		findings
	}

	#[test]
	fn api_object_and_registry() {
		let findings = findings_of(indoc! {"
			pub struct Host {
				#[serde(flatten)]
				pub base: core::BaseApiObj,
				pub address: String,
			}

			/// Hosts are scoped to a namespace.
			/// +namespaced=true
			pub struct HostRegistry {
				registry: registry::Registry,
			}
		"});
		assert_eq!(findings.api_objects, ["Host"]);
		assert_eq!(
			findings.registries,
			[RegistryDescriptor {
				name: "Host".to_owned(),
				registry_type_name: "HostRegistry".to_owned(),
				namespaced: true,
			}]
		);
	}

	#[test]
	fn tuple_structs_match() {
		let findings = findings_of("pub struct Node(core::BaseApiObj, u32);");
		assert_eq!(findings.api_objects, ["Node"]);
	}

	#[rstest]
	#[case("Core::BaseApiObj")]
	#[case("core::baseApiObj")]
	#[case("BaseApiObj::core")]
	#[case("Registry::registry")]
	#[case("registry::registry")]
	#[case("::core::BaseApiObj")]
	#[case("crate::core::BaseApiObj")]
	#[case("BaseApiObj")]
	#[case("core::BaseApiObj<u8>")]
	#[case("Box<core::BaseApiObj>")]
	#[case("&'static registry::Registry")]
	fn near_misses_are_ignored(#[case] ty: &str) {
		let findings = findings_of(&format!("struct FooRegistry {{ field: {ty} }}"));
		assert_eq!(findings, Findings::default());
	}

	#[rstest]
	#[case("/// +namespaced=true", true)]
	#[case("///   +namespaced=true  ", true)]
	#[case("/** Scoped.\n +namespaced=true\n */", true)]
	#[case("#[doc = \"+namespaced=true\"]", true)]
	#[case("/// +namespaced=false", false)]
	#[case("/// +namespaced=TRUE", false)]
	#[case("/// +namespaced = true", false)]
	#[case("/// see +namespaced=true", false)]
	#[case("// +namespaced=true", false)]
	#[case("", false)]
	fn namespaced_directive(#[case] doc: &str, #[case] expected: bool) {
		let findings = findings_of(&format!(
			"{doc}\npub struct PodRegistry {{ r: registry::Registry }}"
		));
		assert_eq!(findings.registries.len(), 1);
		assert_eq!(findings.registries[0].namespaced, expected);
	}

	#[test]
	fn registry_suffix_removed_once() {
		let findings = findings_of(indoc! {"
			struct RegistryRegistry { r: registry::Registry }
			struct Registry { r: registry::Registry }
			struct Pool { r: registry::Registry }
		"});
		let names: Vec<_> = findings.registries.iter().map(|r| r.name.as_str()).collect();
		assert_eq!(names, ["Registry", "", "Pool"]);
	}

	#[test]
	fn repeated_marker_counts_once() {
		let findings = findings_of(indoc! {"
			struct Twice {
				a: core::BaseApiObj,
				b: core::BaseApiObj,
			}
		"});
		assert_eq!(findings.api_objects, ["Twice"]);
	}

	#[test]
	fn both_markers_on_one_declaration() {
		let findings = findings_of(indoc! {"
			struct ZoneRegistry {
				base: core::BaseApiObj,
				registry: registry::Registry,
			}
		"});
		assert_eq!(findings.api_objects, ["ZoneRegistry"]);
		assert_eq!(findings.registries[0].name, "Zone");
	}

	#[rstest]
	#[case("struct Host { base: core::BaseApiObj, cache: std::rc::Rc<String> }", &["cache"])]
	#[case("struct Host { base: core::BaseApiObj, peers: Vec<Arc<Mutex<u8>>> }", &["peers"])]
	#[case("struct Host { base: core::BaseApiObj, hits: [Cell<u32>; 2], n: (u8, RefCell<u8>) }", &["hits", "n"])]
	#[case("struct Host(core::BaseApiObj, Option<RwLock<u8>>);", &["1"])]
	#[case("struct Host { base: core::BaseApiObj, tags: Vec<String>, owner: Box<str> }", &[])]
	fn shared_fields_are_found(#[case] source: &str, #[case] expected: &[&str]) {
		let file = syn::parse_file(source).unwrap();
		let Item::Struct(decl) = &file.items[0] else {
			unreachable!()
		};
		assert_eq!(shared_fields(&decl.fields), expected);
	}

	#[test]
	fn only_top_level_structs() {
		let findings = findings_of(indoc! {"
			mod nested {
				struct Hidden { base: core::BaseApiObj }
			}
			enum Choice { A(core::BaseApiObj) }
			fn f() {
				struct Local { base: core::BaseApiObj }
			}
		"});
		assert_eq!(findings, Findings::default());
	}
}
