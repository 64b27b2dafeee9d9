//! Credentials produced by the OAuth 1.0a and OAuth 2.0 handshakes.

// self
use crate::{_prelude::*, auth::{ScopeSet, Secret}};

/// Temporary credentials issued by the OAuth 1.0a request-token endpoint.
///
/// Hosts persist this value (typically under the strategy's session key) between the
/// authorization redirect and the callback.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestToken {
	/// `oauth_token` value.
	pub token: Secret,
	/// `oauth_token_secret` value.
	pub token_secret: Secret,
	/// Whether the provider acknowledged the callback (`oauth_callback_confirmed`).
	pub callback_confirmed: bool,
	/// Rdio's non-standard `login_url` response parameter.
	pub login_url: Option<Url>,
}

/// Token credentials issued by the OAuth 1.0a access-token endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCredentials {
	/// `oauth_token` value.
	pub token: Secret,
	/// `oauth_token_secret` value.
	pub token_secret: Secret,
	/// Remaining response parameters, passed through untouched.
	pub params: BTreeMap<String, String>,
}

/// Tokens issued by the OAuth 2.0 token endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessGrant {
	/// Bearer access token.
	pub access_token: Secret,
	/// Refresh token, when the provider issued one.
	pub refresh_token: Option<Secret>,
	/// Lifetime reported by `expires_in`.
	pub expires_in: Option<Duration>,
	/// Scopes reported by the provider, when echoed back.
	pub scope: Option<ScopeSet>,
}
