//! The canonical intermediate representation handed from the scanner to the
//! renderer.

use itertools::Itertools;

/// One declaration carrying a `registry::Registry` field.
///
/// Ordered by `name`, then `registry_type_name`, then `namespaced` (cluster
/// scoped first).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegistryDescriptor {
	/// Kind name: the declaration name without its `Registry` suffix.
	pub name: String,
	pub registry_type_name: String,
	pub namespaced: bool,
}

/// Unordered scan results, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Findings {
	pub package_name: String,
	pub api_objects: Vec<String>,
	pub registries: Vec<RegistryDescriptor>,
}

/// Sorted, deduplicated view of one directory.
///
/// Built once per run by [`CodeTemplate::build`]; renderers only read it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTemplate {
	package_name: String,
	api_object_names: Vec<String>,
	registries: Vec<RegistryDescriptor>,
}

impl CodeTemplate {
	pub fn build(findings: Findings) -> Self {
		let Findings {
			package_name,
			api_objects,
			registries,
		} = findings;
		Self {
			package_name,
			api_object_names: api_objects.into_iter().sorted().dedup().collect(),
			registries: registries.into_iter().sorted().dedup().collect(),
		}
	}

	pub fn package_name(&self) -> &str {
		&self.package_name
	}

	/// Strictly ascending.
	pub fn api_object_names(&self) -> &[String] {
		&self.api_object_names
	}

	pub fn registries(&self) -> &[RegistryDescriptor] {
		&self.registries
	}

	pub fn has_api_objects(&self) -> bool {
		!self.api_object_names.is_empty()
	}

	pub fn has_registries(&self) -> bool {
		!self.registries.is_empty()
	}
}
