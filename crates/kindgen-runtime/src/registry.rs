//! Kind descriptors and the runtime object registry.

use std::collections::BTreeMap;

/// Marker embedded into registry declarations.
///
/// The registry's kind is the declaration name without its `Registry`
/// suffix. A `+namespaced=true` doc line makes the kind namespaced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Registry;

/// Identity and scope of one resource kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KindInfo {
	pub name: &'static str,
	/// Lowercase plural used as the REST resource segment.
	pub resource: &'static str,
	pub namespaced: bool,
}

impl KindInfo {
	pub const fn new(name: &'static str, resource: &'static str, namespaced: bool) -> Self {
		Self {
			name,
			resource,
			namespaced,
		}
	}
}

/// Implemented for every registry declaration by `zz_generated.helper.rs`.
pub trait Kind {
	const INFO: KindInfo;

	fn name() -> &'static str {
		Self::INFO.name
	}

	fn is_namespaced() -> bool {
		Self::INFO.namespaced
	}
}

/// Lookup table of known kinds, keyed by kind name.
#[derive(Debug, Clone, Default)]
pub struct ObjectRegistry {
	kinds: BTreeMap<&'static str, KindInfo>,
}

impl ObjectRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers `info`, returning the descriptor it replaced.
	pub fn register(&mut self, info: KindInfo) -> Option<KindInfo> {
		self.kinds.insert(info.name, info)
	}

	pub fn register_kind<K: Kind>(&mut self) -> Option<KindInfo> {
		self.register(K::INFO)
	}

	pub fn lookup(&self, name: &str) -> Option<KindInfo> {
		self.kinds.get(name).copied()
	}

	/// `None` when the kind is unknown.
	pub fn is_namespaced(&self, name: &str) -> Option<bool> {
		self.lookup(name).map(|info| info.namespaced)
	}

	/// Finds a kind by its REST resource segment.
	pub fn by_resource(&self, resource: &str) -> Option<KindInfo> {
		self.kinds.values().find(|info| info.resource == resource).copied()
	}

	/// Registered kinds, ordered by name.
	pub fn kinds(&self) -> impl Iterator<Item = KindInfo> + '_ {
		self.kinds.values().copied()
	}

	pub fn len(&self) -> usize {
		self.kinds.len()
	}

	pub fn is_empty(&self) -> bool {
		self.kinds.is_empty()
	}
}
