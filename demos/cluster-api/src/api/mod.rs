//! Resource kinds and the code kindgen generates for them at build time.

mod types;

pub use generated::*;
pub use types::*;

#[allow(clippy::pedantic, clippy::nursery)]
mod generated {
	use super::*;

	include!(concat!(env!("OUT_DIR"), "/zz_generated.deepcopy.rs"));
	include!(concat!(env!("OUT_DIR"), "/zz_generated.encode.rs"));
	include!(concat!(env!("OUT_DIR"), "/zz_generated.hash.rs"));
	include!(concat!(env!("OUT_DIR"), "/zz_generated.helper.rs"));
}
