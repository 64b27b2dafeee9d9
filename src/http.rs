//! Transport primitives shared by both strategies.
//!
//! [`ApiHttpClient`] is the only dependency the strategies have on an HTTP stack. It
//! executes one [`HttpRequest`] and yields the [`HttpResponse`] untouched; status
//! interpretation happens in [`read_success_body`]. [`OAuth2Transport`] lets the
//! `oauth2` crate drive its token exchange through the same client, so tests and
//! custom stacks only implement a single trait.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
use oauth2::{AsyncHttpClient, HttpRequest, HttpResponse};
// self
use crate::{_prelude::*, error::TransportError};

/// Boxed future returned by [`ApiHttpClient::execute`].
pub type HttpFuture<'a> =
	Pin<Box<dyn Future<Output = Result<HttpResponse, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP transports used for handshakes and current-user calls.
///
/// Implementations must be `Send + Sync + 'static` so strategies can be shared across
/// request handlers behind an `Arc`. Non-2xx responses are returned as `Ok`; only
/// failures to obtain a response at all map to [`TransportError`].
pub trait ApiHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Dispatches `request` and resolves with the provider's response.
	fn execute(&self, request: HttpRequest) -> HttpFuture<'_>;
}

/// Borrowing adapter that exposes an [`ApiHttpClient`] as an `oauth2` [`AsyncHttpClient`].
pub struct OAuth2Transport<'a, C>(pub &'a C)
where
	C: ?Sized + ApiHttpClient;
impl<'c, C> AsyncHttpClient<'c> for OAuth2Transport<'_, C>
where
	C: ?Sized + ApiHttpClient,
{
	type Error = TransportError;
	type Future = HttpFuture<'c>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		self.0.execute(request)
	}
}

/// Returns the body of a 2xx response as text, or a [`TransportError::Status`] otherwise.
pub fn read_success_body(response: HttpResponse) -> Result<String, TransportError> {
	let status = response.status();
	let body = String::from_utf8_lossy(response.body()).into_owned();

	if status.is_success() {
		Ok(body)
	} else {
		Err(TransportError::Status { status: status.as_u16(), body })
	}
}

/// Executes `request` and returns the body of a 2xx response.
pub async fn fetch_success_body<C>(
	http_client: &C,
	request: HttpRequest,
) -> Result<String, TransportError>
where
	C: ?Sized + ApiHttpClient,
{
	let response = http_client.execute(request).await?;

	read_success_body(response)
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ApiHttpClient for ReqwestHttpClient {
	fn execute(&self, request: HttpRequest) -> HttpFuture<'_> {
		let client = self.0.clone();

		Box::pin(async move {
			let request = reqwest::Request::try_from(request)?;
			let response = client.execute(request).await?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let mut converted = HttpResponse::new(response.bytes().await?.to_vec());

			*converted.status_mut() = status;
			*converted.headers_mut() = headers;

			Ok(converted)
		})
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use oauth2::http::StatusCode;
	// self
	use super::*;

	fn response(status: StatusCode, body: &str) -> HttpResponse {
		let mut response = HttpResponse::new(body.as_bytes().to_vec());

		*response.status_mut() = status;

		response
	}

	#[test]
	fn success_bodies_pass_through_verbatim() {
		let body = read_success_body(response(StatusCode::OK, "{\"status\": \"ok\"}"))
			.expect("2xx responses should yield their body.");

		assert_eq!(body, "{\"status\": \"ok\"}");
	}

	#[test]
	fn non_success_statuses_become_transport_errors() {
		let err = read_success_body(response(StatusCode::UNAUTHORIZED, "denied"))
			.expect_err("401 responses should fail.");

		match err {
			TransportError::Status { status, body } => {
				assert_eq!(status, 401);
				assert_eq!(body, "denied");
			},
			other => panic!("Unexpected transport error: {other:?}."),
		}
	}
}
