//! Rdio login strategies for Rust: OAuth 1.0a and OAuth 2.0 handshakes that end in a
//! normalized user profile, with transport-aware observability hooks.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod oauth;
pub mod obs;
pub mod profile;
pub mod strategy;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for tests; enabled via `cfg(test)` or the `test`
	//! crate feature.

	pub use crate::_prelude::*;

	// std
	use std::collections::VecDeque;
	// crates.io
	use oauth2::{HttpRequest, HttpResponse, http::StatusCode};
	// self
	use crate::{
		error::TransportError,
		http::{ApiHttpClient, HttpFuture},
	};

	/// Canned outcome served by [`RecordingHttpClient`].
	#[derive(Clone, Debug)]
	pub enum CannedResponse {
		/// Responds with the given status code and body.
		Body {
			/// HTTP status code.
			status: u16,
			/// Response body.
			body: String,
		},
		/// Fails the request with a network error carrying the message.
		NetworkFailure(String),
	}
	impl CannedResponse {
		/// Successful `200 OK` response with the provided body.
		pub fn ok(body: impl Into<String>) -> Self {
			Self::Body { status: 200, body: body.into() }
		}
	}

	/// Snapshot of a request observed by [`RecordingHttpClient`].
	#[derive(Clone, Debug)]
	pub struct RecordedRequest {
		/// HTTP method.
		pub method: String,
		/// Full request URI.
		pub url: String,
		/// Header pairs with lowercase names.
		pub headers: Vec<(String, String)>,
		/// Body decoded as UTF-8.
		pub body: String,
	}
	impl RecordedRequest {
		fn capture(request: &HttpRequest) -> Self {
			Self {
				method: request.method().to_string(),
				url: request.uri().to_string(),
				headers: request
					.headers()
					.iter()
					.map(|(name, value)| {
						(name.as_str().to_owned(), value.to_str().unwrap_or_default().to_owned())
					})
					.collect(),
				body: String::from_utf8_lossy(request.body()).into_owned(),
			}
		}

		/// Returns the first header value matching `name` (case-insensitive).
		pub fn header(&self, name: &str) -> Option<&str> {
			self.headers
				.iter()
				.find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
				.map(|(_, value)| value.as_str())
		}
	}

	/// Transport double that replays canned responses in order and records every request.
	#[derive(Debug, Default)]
	pub struct RecordingHttpClient {
		responses: Mutex<VecDeque<CannedResponse>>,
		requests: Mutex<Vec<RecordedRequest>>,
	}
	impl RecordingHttpClient {
		/// Creates a client that serves `responses` in order.
		pub fn new(responses: impl IntoIterator<Item = CannedResponse>) -> Self {
			Self {
				responses: Mutex::new(responses.into_iter().collect()),
				requests: Mutex::default(),
			}
		}

		/// Returns a snapshot of every request dispatched so far.
		pub fn requests(&self) -> Vec<RecordedRequest> {
			self.requests.lock().clone()
		}
	}
	impl ApiHttpClient for RecordingHttpClient {
		fn execute(&self, request: HttpRequest) -> HttpFuture<'_> {
			self.requests.lock().push(RecordedRequest::capture(&request));

			let next = self
				.responses
				.lock()
				.pop_front()
				.expect("RecordingHttpClient should have a canned response left.");

			Box::pin(async move {
				match next {
					CannedResponse::Body { status, body } => {
						let mut response = HttpResponse::new(body.into_bytes());

						*response.status_mut() = StatusCode::from_u16(status)
							.expect("Canned status code should be valid.");

						Ok(response)
					},
					CannedResponse::NetworkFailure(message) =>
						Err(TransportError::network(std::io::Error::other(message))),
				}
			})
		}
	}
}

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use parking_lot::Mutex;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::Value;
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{BoxError, Error, Result};
}

/// Crate version reported to hosts that surface strategy metadata.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn reports_a_version() {
		assert!(!VERSION.is_empty());
		assert_eq!(VERSION, env!("CARGO_PKG_VERSION"));
	}
}
