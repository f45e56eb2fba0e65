//! Request building for generated clients.
//!
//! Generated clients never perform I/O themselves: every call becomes a
//! [`Request`] handed to a [`Transport`]. Requests are addressed as
//! `{endpoint}/api/{apiVersion}[/namespaces/{namespace}]/{resource}[/{name}]`
//! and responses are decoded from the `{OpCode, OpDesc, Data}` envelope.

use std::{borrow::Cow, fmt};

use serde::{
	de::{DeserializeOwned, IgnoredAny},
	Serialize,
};
use thiserror::Error;

use crate::encode::{to_canonical_json, EncodeError, Envelope};

pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
	Get,
	Post,
	Put,
	Delete,
}

impl Method {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Get => "GET",
			Self::Post => "POST",
			Self::Put => "PUT",
			Self::Delete => "DELETE",
		}
	}
}

impl fmt::Display for Method {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
	pub method: Method,
	pub url: String,
	pub query: Vec<(String, String)>,
	pub body: Option<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
	pub status: u16,
	/// Reason phrase of the status line, e.g. `Not Found`.
	pub reason: String,
	pub body: Vec<u8>,
}

impl Response {
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	pub fn status_line(&self) -> String {
		if self.reason.is_empty() {
			self.status.to_string()
		} else {
			format!("{} {}", self.status, self.reason)
		}
	}
}

/// Executes requests, typically over HTTP.
pub trait Transport {
	fn execute(&self, request: Request) -> Result<Response, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
	fn execute(&self, request: Request) -> Result<Response, TransportError> {
		(**self).execute(request)
	}
}

impl<T: Transport + ?Sized> Transport for Box<T> {
	fn execute(&self, request: Request) -> Result<Response, TransportError> {
		(**self).execute(request)
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
	/// Base URL, e.g. `https://cluster.example:8443`.
	pub endpoint: String,
	pub api_version: String,
}

impl ClientConfig {
	pub fn new(endpoint: impl Into<String>, api_version: impl Into<String>) -> Self {
		Self {
			endpoint: endpoint.into(),
			api_version: api_version.into(),
		}
	}
}

/// Optional filters of a list call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
	pub label_selector: Option<String>,
	pub field_selector: Option<String>,
	pub limit: Option<u32>,
}

impl ListOptions {
	pub fn query_pairs(&self) -> Vec<(String, String)> {
		let mut pairs = Vec::new();
		if let Some(selector) = &self.label_selector {
			pairs.push(("labelSelector".to_owned(), selector.clone()));
		}
		if let Some(selector) = &self.field_selector {
			pairs.push(("fieldSelector".to_owned(), selector.clone()));
		}
		if let Some(limit) = self.limit {
			pairs.push(("limit".to_owned(), limit.to_string()));
		}
		pairs
	}
}

#[derive(Debug, Error)]
pub enum ClientError {
	#[error("request to {url} failed: {source}")]
	Transport {
		url: String,
		#[source]
		source: TransportError,
	},
	/// Non-2xx response. `message` is the envelope's `OpDesc`, or the status
	/// line when that is empty.
	#[error("{message}")]
	Status {
		method: Method,
		url: String,
		status: u16,
		message: String,
	},
	#[error(transparent)]
	Encode(#[from] EncodeError),
	#[error("malformed response from {url}: {source}")]
	Decode {
		url: String,
		#[source]
		source: serde_json::Error,
	},
	#[error("response from {url} carried no data")]
	MissingData { url: String },
}

/// Path of a resource collection, or of one object when `name` is given.
///
/// `namespace` and `name` are percent-encoded, so each stays a single path
/// segment.
pub fn resource_path(
	api_version: &str,
	namespace: Option<&str>,
	resource: &str,
	name: Option<&str>,
) -> String {
	let mut path = format!("/api/{api_version}");
	if let Some(namespace) = namespace {
		path.push_str("/namespaces/");
		path.push_str(&path_segment(namespace));
	}
	path.push('/');
	path.push_str(resource);
	if let Some(name) = name {
		path.push('/');
		path.push_str(&path_segment(name));
	}
	path
}

fn path_segment(value: &str) -> Cow<'_, str> {
	match value {
		// `.` and `..` pass through `encode` unchanged
		"." => Cow::Borrowed("%2E"),
		".." => Cow::Borrowed("%2E%2E"),
		_ => urlencoding::encode(value),
	}
}

/// Transport plus the endpoint configuration it is used with.
#[derive(Debug, Clone)]
pub struct RestClient<T> {
	transport: T,
	config: ClientConfig,
}

impl<T: Transport> RestClient<T> {
	pub fn new(transport: T, config: ClientConfig) -> Self {
		Self { transport, config }
	}

	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	pub fn transport(&self) -> &T {
		&self.transport
	}

	pub fn resource_url(&self, namespace: Option<&str>, resource: &str, name: Option<&str>) -> String {
		format!(
			"{}{}",
			self.config.endpoint.trim_end_matches('/'),
			resource_path(&self.config.api_version, namespace, resource, name)
		)
	}

	pub fn request(
		&self,
		method: Method,
		namespace: Option<&str>,
		resource: &str,
		name: Option<&str>,
	) -> RequestBuilder<'_, T> {
		RequestBuilder {
			client: self,
			request: Request {
				method,
				url: self.resource_url(namespace, resource, name),
				query: Vec::new(),
				body: None,
			},
		}
	}
}

pub struct RequestBuilder<'a, T> {
	client: &'a RestClient<T>,
	request: Request,
}

impl<'a, T: Transport> RequestBuilder<'a, T> {
	#[must_use]
	pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.request.query.push((key.into(), value.into()));
		self
	}

	#[must_use]
	pub fn list_options(mut self, options: &ListOptions) -> Self {
		self.request.query.extend(options.query_pairs());
		self
	}

	/// Sets the body to the canonical JSON form of `body`.
	pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ClientError> {
		self.request.body = Some(to_canonical_json(body)?);
		Ok(self)
	}

	pub fn build(self) -> Request {
		self.request
	}

	/// Sends the request and returns the envelope's `Data`.
	pub fn send<R: DeserializeOwned>(self) -> Result<R, ClientError> {
		let (url, envelope) = self.send_envelope::<R>()?;
		envelope.data.ok_or(ClientError::MissingData { url })
	}

	/// Sends the request, ignoring any `Data` in the response.
	pub fn send_empty(self) -> Result<(), ClientError> {
		self.send_envelope::<IgnoredAny>().map(|_| ())
	}

	fn send_envelope<R: DeserializeOwned>(self) -> Result<(String, Envelope<R>), ClientError> {
		let method = self.request.method;
		let url = self.request.url.clone();
		let response = self
			.client
			.transport
			.execute(self.request)
			.map_err(|source| ClientError::Transport {
				url: url.clone(),
				source,
			})?;
		let envelope = decode_response(method, &url, &response)?;
		Ok((url, envelope))
	}
}

/// Maps a raw response to its envelope, surfacing non-2xx statuses as
/// [`ClientError::Status`].
pub fn decode_response<R: DeserializeOwned>(
	method: Method,
	url: &str,
	response: &Response,
) -> Result<Envelope<R>, ClientError> {
	if !response.is_success() {
		let op_desc = serde_json::from_slice::<Envelope<IgnoredAny>>(&response.body)
			.ok()
			.map(|envelope| envelope.op_desc)
			.filter(|desc| !desc.is_empty());
		return Err(ClientError::Status {
			method,
			url: url.to_owned(),
			status: response.status,
			message: op_desc.unwrap_or_else(|| response.status_line()),
		});
	}
	if response.body.iter().all(u8::is_ascii_whitespace) {
		return Ok(Envelope::empty());
	}
	serde_json::from_slice(&response.body).map_err(|source| ClientError::Decode {
		url: url.to_owned(),
		source,
	})
}
