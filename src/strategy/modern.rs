//! OAuth 2.0 strategy against Rdio's services API.

// crates.io
use oauth2::{
	HttpRequest,
	http::{
		Method,
		header::{AUTHORIZATION, CONTENT_TYPE},
	},
};
// self
use crate::{
	_prelude::*,
	auth::{AccessGrant, Secret},
	config::{ModernConfig, ModernOptions},
	error::{ConfigError, InternalOAuthError},
	http::{self, ApiHttpClient},
	oauth::{self, ConfiguredBasicClient},
	obs::{FlowSpan, StrategyKind},
	profile::{self, Profile, ProfileFields},
	strategy::{self, Authenticated, Strategy, Verify},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

const KIND: StrategyKind = StrategyKind::Modern;
const STATE_LEN: usize = 24;
const CURRENT_USER_BODY: &str = "method=currentUser&extras=email%2CvanityName";

#[cfg(feature = "reqwest")]
/// Modern strategy specialized for the crate's default reqwest transport.
pub type ReqwestModernStrategy<V> = ModernStrategy<ReqwestHttpClient, V>;

/// Redirect produced by [`ModernStrategy::begin`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModernAuthorization {
	/// Authorization URL the user agent should visit.
	pub url: Url,
	/// Opaque `state` value the host must keep until the callback.
	pub state: String,
}
impl ModernAuthorization {
	/// Checks the `state` echoed back on the redirect.
	pub fn validate_state(&self, returned: &str) -> Result<()> {
		if self.state == returned { Ok(()) } else { Err(Error::StateMismatch) }
	}
}

/// Rdio login over OAuth 2.0.
pub struct ModernStrategy<C, V>
where
	C: ?Sized + ApiHttpClient,
	V: Verify<AccessGrant>,
{
	config: ModernConfig,
	client: ConfiguredBasicClient,
	http_client: Arc<C>,
	verify: V,
}
impl<C, V> ModernStrategy<C, V>
where
	C: ?Sized + ApiHttpClient,
	V: Verify<AccessGrant>,
{
	/// Creates a strategy that reuses the caller-provided transport.
	pub fn with_http_client(
		options: &ModernOptions,
		verify: V,
		http_client: impl Into<Arc<C>>,
	) -> Result<Self> {
		let config = options.resolve()?;
		let client = oauth::build_client(&config)?;

		Ok(Self { config, client, http_client: http_client.into(), verify })
	}

	/// Resolved configuration.
	pub fn config(&self) -> &ModernConfig {
		&self.config
	}

	/// Builds the authorization redirect with a fresh random `state`.
	pub fn begin(&self) -> ModernAuthorization {
		let span = FlowSpan::start(KIND, "begin");
		let authorization = span.in_scope(|| {
			let state = oauth::random_string(STATE_LEN);
			let url = oauth::authorize_url(&self.client, &self.config, state.clone());

			ModernAuthorization { url, state }
		});

		span.succeed();

		authorization
	}

	/// Exchanges the authorization code returned on the redirect.
	pub async fn exchange_code(&self, code: &str) -> Result<AccessGrant> {
		strategy::observe(KIND, "exchange_code", async {
			oauth::exchange_code(&self.client, self.http_client.as_ref(), code).await
		})
		.await
	}

	/// Loads the current user's profile, including username and email.
	///
	/// Issues exactly one bearer-authorized `currentUser` call. Transport failures and
	/// payloads whose `status` is `error` are wrapped in [`InternalOAuthError`]; undecodable
	/// bodies surface as parse errors.
	pub async fn user_profile(&self, access_token: &Secret) -> Result<Profile> {
		strategy::observe(KIND, "user_profile", async {
			let request = current_user_request(&self.config.profile_url, access_token)?;
			let raw = http::fetch_success_body(self.http_client.as_ref(), request)
				.await
				.map_err(InternalOAuthError::fetch_profile)?;
			let json = profile::parse_body(&raw)?;

			profile::ensure_ok_status(&json)?;

			Ok(profile::normalize(raw, json, ProfileFields::WithContact)?)
		})
		.await
	}

	/// Finishes a login from the redirect's authorization code.
	pub async fn complete(&self, code: &str) -> Result<Authenticated<V::User>> {
		let grant = self.exchange_code(code).await?;
		let profile = self.user_profile(&grant.access_token).await?;

		strategy::run_verify(&self.verify, &grant, profile).await
	}
}
#[cfg(feature = "reqwest")]
impl<V> ModernStrategy<ReqwestHttpClient, V>
where
	V: Verify<AccessGrant>,
{
	/// Creates a strategy backed by a default reqwest client.
	pub fn new(options: &ModernOptions, verify: V) -> Result<Self> {
		Self::with_http_client(options, verify, ReqwestHttpClient::default())
	}
}
impl<C, V> Strategy for ModernStrategy<C, V>
where
	C: ?Sized + ApiHttpClient,
	V: Verify<AccessGrant>,
{
	fn session_key(&self) -> &str {
		&self.config.session_key
	}
}
impl<C, V> Debug for ModernStrategy<C, V>
where
	C: ?Sized + ApiHttpClient,
	V: Verify<AccessGrant>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ModernStrategy")
			.field("client_id", &self.config.client_id)
			.field("session_key", &self.config.session_key)
			.finish()
	}
}

fn current_user_request(url: &Url, access_token: &Secret) -> Result<HttpRequest, ConfigError> {
	oauth2::http::Request::builder()
		.method(Method::POST)
		.uri(url.as_str())
		.header(CONTENT_TYPE, "application/x-www-form-urlencoded")
		.header(AUTHORIZATION, format!("Bearer {}", access_token.expose()))
		.body(CURRENT_USER_BODY.as_bytes().to_vec())
		.map_err(ConfigError::from)
}
