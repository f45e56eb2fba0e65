//! Object metadata shared by every API object.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Identity and bookkeeping fields of a managed resource.
///
/// Embed it into a struct (usually with `#[serde(flatten)]`) to mark that
/// struct as an API object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseApiObj {
	#[serde(default)]
	pub name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub namespace: Option<String>,
	#[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
	pub labels: BTreeMap<String, String>,
	#[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
	pub annotations: BTreeMap<String, String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub resource_version: Option<String>,
}

impl BaseApiObj {
	/// Metadata for a cluster-scoped object.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			..Self::default()
		}
	}

	/// Metadata for an object living in `namespace`.
	pub fn namespaced(name: impl Into<String>, namespace: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			namespace: Some(namespace.into()),
			..Self::default()
		}
	}

	#[must_use]
	pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.labels.insert(key.into(), value.into());
		self
	}

	#[must_use]
	pub fn with_annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.annotations.insert(key.into(), value.into());
		self
	}
}
