//! Strategy-level error types shared across configuration, handshakes, and profile loading.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Boxed error used for opaque causes (transport internals, verify callbacks).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Message attached when the current-user call fails.
pub const FETCH_PROFILE_FAILED: &str = "failed to fetch user profile";
/// Message attached when the OAuth 1.0a request-token step fails.
pub const REQUEST_TOKEN_FAILED: &str = "failed to obtain request token";
/// Message attached when an access-token exchange fails.
pub const ACCESS_TOKEN_FAILED: &str = "failed to obtain access token";

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Remote OAuth or API call failed; see [`InternalOAuthError::cause`].
	#[error(transparent)]
	InternalOAuth(#[from] InternalOAuthError),
	/// Response body could not be decoded into the expected shape.
	#[error(transparent)]
	Parse(#[from] ParseError),

	/// State returned through the authorization redirect did not match.
	#[error("Authorization state mismatch.")]
	StateMismatch,
	/// Host verify callback failed.
	#[error("Verify callback failed.")]
	Verify {
		/// Error raised by the callback.
		#[source]
		source: BoxError,
	},
}
impl Error {
	/// Returns the wrapped [`InternalOAuthError`], if any.
	pub fn as_internal_oauth(&self) -> Option<&InternalOAuthError> {
		match self {
			Self::InternalOAuth(inner) => Some(inner),
			_ => None,
		}
	}
}

/// Remote failure wrapped with a fixed, human-readable message.
#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct InternalOAuthError {
	/// Fixed description of the operation that failed.
	pub message: &'static str,
	/// Underlying failure.
	#[source]
	pub cause: OAuthCause,
}
impl InternalOAuthError {
	/// Wraps `cause` under `message`.
	pub fn new(message: &'static str, cause: impl Into<OAuthCause>) -> Self {
		Self { message, cause: cause.into() }
	}

	/// Convenience constructor for current-user failures.
	pub fn fetch_profile(cause: impl Into<OAuthCause>) -> Self {
		Self::new(FETCH_PROFILE_FAILED, cause)
	}
}

/// Root cause carried by an [`InternalOAuthError`].
#[derive(Debug, ThisError)]
pub enum OAuthCause {
	/// The HTTP call itself failed.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// The provider answered with a well-formed payload that signals failure.
	#[error("Provider reported an error: {}.", message.as_deref().unwrap_or("no message supplied"))]
	Provider {
		/// Provider-supplied message, when present.
		message: Option<String>,
	},
	/// The provider answered with a payload the handshake could not interpret.
	#[error("Provider returned a malformed response: {detail}.")]
	Malformed {
		/// What was missing or invalid.
		detail: String,
	},
}

/// Configuration and validation failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// A configured URL cannot be parsed.
	#[error("The {field} URL is invalid.")]
	InvalidUrl {
		/// Option name.
		field: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// A configured URL uses a scheme other than HTTP(S).
	#[error("The {field} URL must use http or https: {url}.")]
	UnsupportedScheme {
		/// Option name.
		field: &'static str,
		/// Offending URL.
		url: String,
	},
	/// A required credential is missing or blank.
	#[error("The {field} option is required.")]
	MissingCredential {
		/// Option name.
		field: &'static str,
	},
	/// Requested scopes cannot be normalized.
	#[error("Requested scopes are invalid.")]
	InvalidScope(#[from] crate::auth::ScopeValidationError),
	/// Scope separator is a control character.
	#[error("Scope separator must be a printable character.")]
	InvalidScopeSeparator {
		/// Rejected separator.
		separator: char,
	},
	/// HMAC key could not be initialized from the consumer/token secrets.
	#[error("OAuth 1.0a signing key is invalid.")]
	InvalidSigningKey,
	/// Token endpoint returned an excessively large `expires_in`.
	#[error("The expires_in value exceeds the supported range.")]
	ExpiresInOutOfRange,
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Response body decoding failures; surfaced as-is rather than wrapped.
#[derive(Debug, ThisError)]
pub enum ParseError {
	/// Body is not valid JSON.
	#[error("Response body is not valid JSON.")]
	Syntax(#[source] serde_json::Error),
	/// Body is JSON but lacks the expected fields.
	#[error("Response body does not match the current-user shape at `{}`.", .0.path())]
	Shape(#[source] serde_path_to_error::Error<serde_json::Error>),
}

/// Transport-level failures (network, IO, unexpected status).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the provider.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the provider.")]
	Io(#[from] std::io::Error),
	/// Provider answered with a non-success status code.
	#[error("Provider responded with HTTP {status}.")]
	Status {
		/// HTTP status code.
		status: u16,
		/// Response body, kept for diagnostics.
		body: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
