//! Source generator for resource kinds.
//!
//! A directory of Rust sources is scanned for struct declarations carrying a
//! `core::BaseApiObj` field (API objects) or a `registry::Registry` field
//! (registries). The findings are normalized into a [`CodeTemplate`] and
//! rendered into `zz_generated.*.rs` files meant to be pulled in with
//! `include!`:
//!
//! - `encode`, `hash` and `deepcopy` implement the `kindgen-runtime` traits
//!   for every API object;
//! - `helper` describes every kind of the package;
//! - `client` is a typed REST client with one accessor per registry.
//!
//! ```no_run
//! use std::path::Path;
//!
//! use kindgen::{generate_objects, RenderOptions};
//!
//! let report = generate_objects(Path::new("src/api"), &RenderOptions::default())?;
//! for artifact in report.written() {
//! 	println!("{}", artifact.path.display());
//! }
//! # Ok::<(), kindgen::GenerateError>(())
//! ```

pub mod error;
pub mod generate;
pub mod model;
pub mod render;
pub mod scan;
mod util;

pub use error::{ConfigError, GenerateError, ParseError, RenderError};
pub use generate::{
	generate_client, generate_objects, generate_objects_into, ArtifactOutcome, ArtifactStatus,
	Report,
};
pub use model::{CodeTemplate, Findings, RegistryDescriptor};
pub use render::{ArtifactKind, RenderOptions, Template};
pub use util::GENERATED_PREFIX;
