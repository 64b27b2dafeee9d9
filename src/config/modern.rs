//! OAuth 2.0 strategy options.

// self
use crate::{
	_prelude::*,
	auth::{ScopeSet, Secret},
	config::{require_identifier, require_secret, resolve_optional_url, resolve_url},
	error::ConfigError,
};

/// Default OAuth 2.0 authorization endpoint.
pub const MODERN_AUTHORIZATION_URL: &str = "https://www.rdio.com/oauth2/authorize";
/// Default OAuth 2.0 token endpoint.
pub const MODERN_TOKEN_URL: &str = "https://services.rdio.com/oauth2/token";
/// Default API endpoint for the current-user call.
pub const MODERN_PROFILE_URL: &str = "https://services.rdio.com/api/1/";

/// Caller-supplied options for [`ModernStrategy`](crate::strategy::ModernStrategy).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModernOptions {
	/// OAuth 2.0 client identifier.
	pub client_id: String,
	/// OAuth 2.0 client secret.
	pub client_secret: Secret,
	/// Redirect URI registered with Rdio.
	pub callback_url: Option<String>,
	/// Scopes requested during authorization, sent in this order with duplicates dropped.
	pub scope: Option<Vec<String>>,
	/// Separator used when joining scopes; defaults to a single space.
	pub scope_separator: Option<char>,
	/// Overrides [`MODERN_AUTHORIZATION_URL`].
	pub authorization_url: Option<String>,
	/// Overrides [`MODERN_TOKEN_URL`].
	pub token_url: Option<String>,
	/// Overrides [`MODERN_PROFILE_URL`].
	pub profile_url: Option<String>,
	/// Overrides the derived `oauth2:<authorization host>` session key.
	pub session_key: Option<String>,
}
impl ModernOptions {
	/// Creates options for the provided client credentials.
	pub fn new(client_id: impl Into<String>, client_secret: impl Into<Secret>) -> Self {
		Self { client_id: client_id.into(), client_secret: client_secret.into(), ..Default::default() }
	}

	/// Sets the redirect URI.
	pub fn with_callback_url(mut self, url: impl Into<String>) -> Self {
		self.callback_url = Some(url.into());

		self
	}

	/// Sets the requested scopes.
	pub fn with_scope<I, S>(mut self, scope: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.scope = Some(scope.into_iter().map(Into::into).collect());

		self
	}

	/// Overrides the scope separator.
	pub fn with_scope_separator(mut self, separator: char) -> Self {
		self.scope_separator = Some(separator);

		self
	}

	/// Overrides the authorization endpoint.
	pub fn with_authorization_url(mut self, url: impl Into<String>) -> Self {
		self.authorization_url = Some(url.into());

		self
	}

	/// Overrides the token endpoint.
	pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
		self.token_url = Some(url.into());

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

	/// Merges Rdio defaults into a validated, immutable [`ModernConfig`].
	pub fn resolve(&self) -> Result<ModernConfig, ConfigError> {
		let authorization_url = resolve_url(
			"authorization",
			self.authorization_url.as_deref(),
			MODERN_AUTHORIZATION_URL,
		)?;
		let scope_separator = self.scope_separator.unwrap_or(' ');

		if scope_separator.is_control() {
			return Err(ConfigError::InvalidScopeSeparator { separator: scope_separator });
		}

		let scope = match &self.scope {
			Some(values) => ScopeSet::new(values.iter().cloned())?,
			None => ScopeSet::default(),
		};
		let session_key = match &self.session_key {
			Some(key) => key.clone(),
			None => format!("oauth2:{}", authorization_url.host_str().unwrap_or_default()),
		};

		Ok(ModernConfig {
			client_id: require_identifier("client_id", &self.client_id)?,
			client_secret: require_secret("client_secret", &self.client_secret)?,
			callback_url: resolve_optional_url("callback", self.callback_url.as_deref())?,
			scope,
			scope_separator,
			token_url: resolve_url("token", self.token_url.as_deref(), MODERN_TOKEN_URL)?,
			profile_url: resolve_url("profile", self.profile_url.as_deref(), MODERN_PROFILE_URL)?,
			authorization_url,
			session_key,
		})
	}
}

/// Validated OAuth 2.0 configuration with every default filled in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModernConfig {
	/// Client identifier.
	pub client_id: String,
	/// Client secret.
	pub client_secret: Secret,
	/// Redirect URI, if configured.
	pub callback_url: Option<Url>,
	/// Requested scopes.
	pub scope: ScopeSet,
	/// Separator used when joining scopes.
	pub scope_separator: char,
	/// Authorization endpoint.
	pub authorization_url: Url,
	/// Token endpoint.
	pub token_url: Url,
	/// Current-user API endpoint.
	pub profile_url: Url,
	/// Session key for authorization-state storage.
	pub session_key: String,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn resolve_fills_rdio_defaults() {
		let config = ModernOptions::new("ABC123", "secret")
			.resolve()
			.expect("Minimal options should resolve.");

		assert_eq!(config.authorization_url.as_str(), MODERN_AUTHORIZATION_URL);
		assert_eq!(config.token_url.as_str(), MODERN_TOKEN_URL);
		assert_eq!(config.profile_url.as_str(), MODERN_PROFILE_URL);
		assert_eq!(config.session_key, "oauth2:www.rdio.com");
		assert!(config.scope.is_empty());
		assert_eq!(config.scope_separator, ' ');
	}

	#[test]
	fn session_key_follows_overridden_authorization_host() {
		let config = ModernOptions::new("ABC123", "secret")
			.with_authorization_url("https://auth.example.net/authorize")
			.resolve()
			.expect("Overridden authorization endpoint should resolve.");

		assert_eq!(config.session_key, "oauth2:auth.example.net");
		assert_eq!(config.token_url.as_str(), MODERN_TOKEN_URL);
	}

	#[test]
	fn resolve_validates_scope_and_separator() {
		let err = ModernOptions::new("ABC123", "secret")
			.with_scope(["bad scope"])
			.resolve()
			.expect_err("Whitespace scopes should be rejected.");

		assert!(matches!(err, ConfigError::InvalidScope(_)));

		let err = ModernOptions::new("ABC123", "secret")
			.with_scope_separator('\n')
			.resolve()
			.expect_err("Control separators should be rejected.");

		assert!(matches!(err, ConfigError::InvalidScopeSeparator { separator: '\n' }));
	}

	#[test]
	fn resolve_requires_client_credentials() {
		let err = ModernOptions::default()
			.resolve()
			.expect_err("Default options lack credentials.");

		assert!(matches!(err, ConfigError::MissingCredential { field: "client_id" }));
	}
}
