use std::{env, path::PathBuf};

use anyhow::{Context, Result};
use kindgen::RenderOptions;

fn main() -> Result<()> {
	let src = PathBuf::from("src/api");
	let out = PathBuf::from(env::var("OUT_DIR").context("OUT_DIR is set by cargo")?);
	println!("cargo:rerun-if-changed={}", src.display());

	let options = RenderOptions {
		types_path: "crate::api".to_owned(),
		format: false,
		..RenderOptions::default()
	};
	kindgen::generate_objects_into(&src, &out, &options)?.ensure_success()?;
	kindgen::generate_client(&src, &out, &options)?.ensure_success()?;
	Ok(())
}
