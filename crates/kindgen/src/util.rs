use xshell::{cmd, Shell};

/// Every file the engine writes starts with this, and the scanner skips
/// files that do.
pub const GENERATED_PREFIX: &str = "zz_generated";

pub fn is_generated_file(file_name: &str) -> bool {
	file_name.starts_with(GENERATED_PREFIX)
}

pub fn is_test_file(stem: &str) -> bool {
	stem == "tests" || stem.ends_with("_test") || stem.ends_with("_tests")
}

pub fn pluralize(s: &str) -> String {
	let lower = s.to_ascii_lowercase();
	if ["s", "x", "z", "ch", "sh"]
		.iter()
		.any(|suffix| lower.ends_with(suffix))
	{
		return format!("{s}es");
	}
	if let Some(stem) = s.strip_suffix(|c: char| c == 'y' || c == 'Y') {
		let vowel_before = stem
			.chars()
			.last()
			.is_some_and(|c| "aeiouAEIOU".contains(c));
		if !stem.is_empty() && !vowel_before {
			return format!("{stem}ies");
		}
	}
	format!("{s}s")
}

pub fn to_lower_snake_case(s: &str) -> String {
	let mut buf = String::with_capacity(s.len());
	let mut prev = false;
	for c in s.chars() {
		if c.is_ascii_uppercase() && prev {
			buf.push('_')
		}
		prev = true;

		buf.push(c.to_ascii_lowercase());
	}
	buf
}

pub fn package_name(dir_name: &str) -> String {
	dir_name.replace('-', "_")
}

/// Pipes `text` through `rustfmt`.
pub fn reformat(text: &str) -> Result<String, String> {
	let sh = Shell::new().map_err(|e| e.to_string())?;
	cmd!(sh, "rustfmt --edition 2021")
		.stdin(text)
		.read()
		.map_err(|e| e.to_string())
}
