use std::collections::BTreeMap;

use kindgen_runtime::{core, registry};
use serde::{Deserialize, Serialize};

/// A machine workloads are scheduled onto.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Host {
	#[serde(flatten)]
	pub base: core::BaseApiObj,
	pub address: String,
	#[serde(default)]
	pub cpus: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
	#[serde(flatten)]
	pub base: core::BaseApiObj,
	pub image: String,
	#[serde(default = "one")]
	pub replicas: u32,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub host_names: Vec<String>,
}

fn one() -> u32 {
	1
}

/// Cluster-wide node inventory entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
	#[serde(flatten)]
	pub base: core::BaseApiObj,
	#[serde(default)]
	pub ready: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigMap {
	#[serde(flatten)]
	pub base: core::BaseApiObj,
	#[serde(default)]
	pub data: BTreeMap<String, String>,
}

/// Hosts belong to a tenant namespace.
/// +namespaced=true
#[derive(Debug, Default)]
pub struct HostRegistry {
	pub registry: registry::Registry,
}

/// +namespaced=true
#[derive(Debug, Default)]
pub struct ApplicationRegistry {
	pub registry: registry::Registry,
}

#[derive(Debug, Default)]
pub struct NodeRegistry {
	pub registry: registry::Registry,
}
