//! Canonical JSON encoding and the `{OpCode, OpDesc, Data}` wire envelope.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EncodeError {
	#[error("failed to serialize object: {0}")]
	Serialize(#[source] serde_json::Error),
	#[error("failed to deserialize object: {0}")]
	Deserialize(#[source] serde_json::Error),
}

/// Response envelope shared by every endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
	#[serde(rename = "OpCode", default)]
	pub op_code: i64,
	#[serde(rename = "OpDesc", default)]
	pub op_desc: String,
	#[serde(rename = "Data", default = "Option::default")]
	pub data: Option<T>,
}

impl<T> Envelope<T> {
	/// Successful envelope carrying `data`.
	pub fn ok(data: T) -> Self {
		Self {
			op_code: 0,
			op_desc: String::new(),
			data: Some(data),
		}
	}

	/// Envelope without a payload.
	pub fn empty() -> Self {
		Self {
			op_code: 0,
			op_desc: String::new(),
			data: None,
		}
	}
}

/// Serialization implemented by the generated `zz_generated.encode.rs`.
pub trait Encode: Serialize + DeserializeOwned {
	fn encode(&self) -> Result<Vec<u8>, EncodeError>;

	fn decode(bytes: &[u8]) -> Result<Self, EncodeError>;

	/// Wraps the canonical form of `self` into a successful [`Envelope`].
	fn encode_envelope(&self) -> Result<Vec<u8>, EncodeError> {
		let data = to_canonical_value(self)?;
		serde_json::to_vec(&Envelope::ok(data)).map_err(EncodeError::Serialize)
	}
}

/// Converts `value` to JSON with every object's keys in ascending order.
pub fn to_canonical_value<T: Serialize + ?Sized>(value: &T) -> Result<Value, EncodeError> {
	let value = serde_json::to_value(value).map_err(EncodeError::Serialize)?;
	Ok(canonicalize(value))
}

/// Canonical JSON bytes of `value`; equal values always produce equal bytes.
pub fn to_canonical_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, EncodeError> {
	let value = to_canonical_value(value)?;
	serde_json::to_vec(&value).map_err(EncodeError::Serialize)
}

pub fn from_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, EncodeError> {
	serde_json::from_slice(bytes).map_err(EncodeError::Deserialize)
}

// serde_json may be built with `preserve_order`, so key order of a `Map` can
// not be relied upon.
fn canonicalize(value: Value) -> Value {
	match value {
		Value::Object(map) => {
			let mut entries: Vec<(String, Value)> = map.into_iter().collect();
			entries.sort_by(|(a, _), (b, _)| a.cmp(b));
			Value::Object(
				entries
					.into_iter()
					.map(|(key, value)| (key, canonicalize(value)))
					.collect(),
			)
		}
		Value::Array(items) => Value::Array(items.into_iter().map(canonicalize).collect()),
		other => other,
	}
}
