//! OAuth 1.0a strategy options.

// self
use crate::{
	_prelude::*,
	auth::Secret,
	config::{require_identifier, require_secret, resolve_optional_url, resolve_url},
	error::ConfigError,
};

/// Default OAuth 1.0a request-token endpoint.
pub const LEGACY_REQUEST_TOKEN_URL: &str = "http://api.rdio.com/oauth/request_token";
/// Default OAuth 1.0a access-token endpoint.
pub const LEGACY_ACCESS_TOKEN_URL: &str = "http://api.rdio.com/oauth/access_token";
/// Default OAuth 1.0a user-authorization endpoint.
///
/// Rdio returns a `login_url` with the request token instead of documenting this
/// endpoint, so the well-known URL is assumed here.
pub const LEGACY_USER_AUTHORIZATION_URL: &str = "https://www.rdio.com/oauth/authorize";
/// Default API endpoint for the current-user call.
pub const LEGACY_PROFILE_URL: &str = "http://api.rdio.com/1/";
/// Default session key under which hosts store request tokens.
pub const LEGACY_SESSION_KEY: &str = "oauth:rdio";

/// Caller-supplied options for [`LegacyStrategy`](crate::strategy::LegacyStrategy).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegacyOptions {
	/// Identifies the client to Rdio.
	pub consumer_key: String,
	/// Secret used to establish ownership of the consumer key.
	pub consumer_secret: Secret,
	/// URL Rdio redirects to after authorization; `oob` is sent when absent.
	pub callback_url: Option<String>,
	/// Overrides [`LEGACY_REQUEST_TOKEN_URL`].
	pub request_token_url: Option<String>,
	/// Overrides [`LEGACY_ACCESS_TOKEN_URL`].
	pub access_token_url: Option<String>,
	/// Overrides [`LEGACY_USER_AUTHORIZATION_URL`].
	pub user_authorization_url: Option<String>,
	/// Overrides [`LEGACY_PROFILE_URL`].
	pub profile_url: Option<String>,
	/// Overrides [`LEGACY_SESSION_KEY`].
	pub session_key: Option<String>,
}
impl LegacyOptions {
	/// Creates options for the provided consumer credentials.
	pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<Secret>) -> Self {
		Self {
			consumer_key: consumer_key.into(),
			consumer_secret: consumer_secret.into(),
			..Default::default()
		}
	}

	/// Sets the callback URL.
	pub fn with_callback_url(mut self, url: impl Into<String>) -> Self {
		self.callback_url = Some(url.into());

		self
	}

	/// Overrides the request-token endpoint.
	pub fn with_request_token_url(mut self, url: impl Into<String>) -> Self {
		self.request_token_url = Some(url.into());

		self
	}

	/// Overrides the access-token endpoint.
	pub fn with_access_token_url(mut self, url: impl Into<String>) -> Self {
		self.access_token_url = Some(url.into());

		self
	}

	/// Overrides the user-authorization endpoint.
	pub fn with_user_authorization_url(mut self, url: impl Into<String>) -> Self {
		self.user_authorization_url = Some(url.into());

		self
	}

	/// Overrides the current-user API endpoint.
	pub fn with_profile_url(mut self, url: impl Into<String>) -> Self {
		self.profile_url = Some(url.into());

		self
	}

	/// Overrides the session key.
	pub fn with_session_key(mut self, key: impl Into<String>) -> Self {
		self.session_key = Some(key.into());

		self
	}

	/// Merges Rdio defaults into a validated, immutable [`LegacyConfig`].
	pub fn resolve(&self) -> Result<LegacyConfig, ConfigError> {
		Ok(LegacyConfig {
			consumer_key: require_identifier("consumer_key", &self.consumer_key)?,
			consumer_secret: require_secret("consumer_secret", &self.consumer_secret)?,
			callback_url: resolve_optional_url("callback", self.callback_url.as_deref())?,
			request_token_url: resolve_url(
				"request_token",
				self.request_token_url.as_deref(),
				LEGACY_REQUEST_TOKEN_URL,
			)?,
			access_token_url: resolve_url(
				"access_token",
				self.access_token_url.as_deref(),
				LEGACY_ACCESS_TOKEN_URL,
			)?,
			user_authorization_url: resolve_url(
				"user_authorization",
				self.user_authorization_url.as_deref(),
				LEGACY_USER_AUTHORIZATION_URL,
			)?,
			profile_url: resolve_url("profile", self.profile_url.as_deref(), LEGACY_PROFILE_URL)?,
			session_key: self.session_key.clone().unwrap_or_else(|| LEGACY_SESSION_KEY.into()),
		})
	}
}

/// Validated OAuth 1.0a configuration with every default filled in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LegacyConfig {
	/// Consumer key.
	pub consumer_key: String,
	/// Consumer secret.
	pub consumer_secret: Secret,
	/// Callback URL, if configured.
	pub callback_url: Option<Url>,
	/// Request-token endpoint.
	pub request_token_url: Url,
	/// Access-token endpoint.
	pub access_token_url: Url,
	/// User-authorization endpoint.
	pub user_authorization_url: Url,
	/// Current-user API endpoint.
	pub profile_url: Url,
	/// Session key for request-token storage.
	pub session_key: String,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn resolve_fills_rdio_defaults() {
		let config = LegacyOptions::new("ABC123", "secret")
			.resolve()
			.expect("Minimal options should resolve.");

		assert_eq!(config.request_token_url.as_str(), LEGACY_REQUEST_TOKEN_URL);
		assert_eq!(config.access_token_url.as_str(), LEGACY_ACCESS_TOKEN_URL);
		assert_eq!(config.user_authorization_url.as_str(), LEGACY_USER_AUTHORIZATION_URL);
		assert_eq!(config.profile_url.as_str(), LEGACY_PROFILE_URL);
		assert_eq!(config.session_key, "oauth:rdio");
		assert_eq!(config.callback_url, None);
	}

	#[test]
	fn resolve_keeps_caller_values_and_leaves_options_untouched() {
		let options = LegacyOptions::new("ABC123", "secret")
			.with_callback_url("https://www.example.net/auth/rdio/callback")
			.with_request_token_url("https://proxy.example.net/request_token")
			.with_session_key("custom:rdio");
		let before = options.clone();
		let config = options.resolve().expect("Overridden options should resolve.");

		assert_eq!(options, before);
		assert_eq!(config.request_token_url.as_str(), "https://proxy.example.net/request_token");
		assert_eq!(config.access_token_url.as_str(), LEGACY_ACCESS_TOKEN_URL);
		assert_eq!(config.session_key, "custom:rdio");
		assert_eq!(
			config.callback_url.as_ref().map(Url::as_str),
			Some("https://www.example.net/auth/rdio/callback")
		);
	}

	#[test]
	fn resolve_requires_consumer_credentials() {
		let err = LegacyOptions::new("", "secret")
			.resolve()
			.expect_err("Missing consumer key should fail.");

		assert!(matches!(err, ConfigError::MissingCredential { field: "consumer_key" }));

		let err = LegacyOptions::new("ABC123", "")
			.resolve()
			.expect_err("Missing consumer secret should fail.");

		assert!(matches!(err, ConfigError::MissingCredential { field: "consumer_secret" }));
	}

	#[test]
	fn resolve_stores_consumer_key_as_given() {
		let config = LegacyOptions::new(" ABC123 ", "secret")
			.resolve()
			.expect("Padded consumer key should resolve.");

		assert_eq!(config.consumer_key, " ABC123 ");
	}

	#[test]
	fn options_deserialize_with_partial_fields() {
		let options: LegacyOptions = serde_json::from_str(
			"{\"consumer_key\":\"ABC123\",\"consumer_secret\":\"secret\",\"profile_url\":\"http://localhost:8080/1/\"}",
		)
		.expect("Partial options should deserialize.");
		let config = options.resolve().expect("Deserialized options should resolve.");

		assert_eq!(config.profile_url.as_str(), "http://localhost:8080/1/");
		assert_eq!(config.request_token_url.as_str(), LEGACY_REQUEST_TOKEN_URL);
	}
}
