//! Runtime support for code generated by `kindgen`.
//!
//! Declarations opt into code generation by carrying a field of type
//! [`core::BaseApiObj`] (API objects) or [`registry::Registry`] (registries):
//!
//! ```
//! use kindgen_runtime::{core, registry};
//!
//! pub struct Host {
//! 	pub base: core::BaseApiObj,
//! 	pub address: String,
//! }
//!
//! /// +namespaced=true
//! pub struct HostRegistry {
//! 	pub registry: registry::Registry,
//! }
//! ```
//!
//! The generated `zz_generated.*.rs` files implement the traits of this crate
//! for those declarations.

pub mod core;
pub mod encode;
pub mod hash;
pub mod registry;
pub mod rest;

pub use encode::{Encode, EncodeError, Envelope};
pub use hash::{ContentHash, Fingerprint};

/// Produces a copy sharing no mutable state with the original.
///
/// Generated impls delegate to [`Clone`], which only holds for types whose
/// `Clone` duplicates everything they own. Fields behind `Rc`, `Arc`,
/// `Cell`, `RefCell`, `Mutex` or `RwLock` stay shared between the copies;
/// `kindgen` warns when an API object declares one.
pub trait DeepCopy: Sized {
	fn deep_copy(&self) -> Self;

	/// Overwrites `out` with a deep copy of `self`.
	fn deep_copy_into(&self, out: &mut Self) {
		*out = self.deep_copy();
	}
}

/// Name of the resource kind an API object belongs to.
pub trait ObjectKind {
	const KIND: &'static str;
}
