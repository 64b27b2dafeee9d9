//! OAuth 1.0a strategy against Rdio's original API.
//!
//! The handshake follows the classic three-legged dance: [`LegacyStrategy::begin`]
//! fetches a request token and builds the redirect, the host stores the
//! [`RequestToken`] under [`Strategy::session_key`], and [`LegacyStrategy::complete`]
//! trades it plus the returned verifier for token credentials before loading the profile.

// crates.io
use oauth2::HttpRequest;
// self
use crate::{
	_prelude::*,
	auth::{RequestToken, Secret, TokenCredentials},
	config::{LegacyConfig, LegacyOptions},
	error::{ACCESS_TOKEN_FAILED, InternalOAuthError, OAuthCause, REQUEST_TOKEN_FAILED},
	http::{self, ApiHttpClient},
	oauth::oauth1::{OAuth1Signer, TokenPair},
	obs::StrategyKind,
	profile::{self, Profile, ProfileFields},
	strategy::{self, Authenticated, Strategy, Verify},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

const KIND: StrategyKind = StrategyKind::Legacy;
const OUT_OF_BAND: &str = "oob";
const CURRENT_USER_FORM: [(&str, &str); 1] = [("method", "currentUser")];

#[cfg(feature = "reqwest")]
/// Legacy strategy specialized for the crate's default reqwest transport.
pub type ReqwestLegacyStrategy<V> = LegacyStrategy<ReqwestHttpClient, V>;

/// Redirect produced by [`LegacyStrategy::begin`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LegacyAuthorization {
	/// User-authorization URL carrying `oauth_token`.
	pub url: Url,
	/// Temporary credentials the host must keep until the callback.
	pub request_token: RequestToken,
}

/// Rdio login over OAuth 1.0a.
pub struct LegacyStrategy<C, V>
where
	C: ?Sized + ApiHttpClient,
	V: Verify<TokenCredentials>,
{
	config: LegacyConfig,
	signer: OAuth1Signer,
	http_client: Arc<C>,
	verify: V,
}
impl<C, V> LegacyStrategy<C, V>
where
	C: ?Sized + ApiHttpClient,
	V: Verify<TokenCredentials>,
{
	/// Creates a strategy that reuses the caller-provided transport.
	pub fn with_http_client(
		options: &LegacyOptions,
		verify: V,
		http_client: impl Into<Arc<C>>,
	) -> Result<Self> {
		let config = options.resolve()?;
		let signer = OAuth1Signer::new(config.consumer_key.clone(), config.consumer_secret.clone());

		Ok(Self { config, signer, http_client: http_client.into(), verify })
	}

	/// Resolved configuration.
	pub fn config(&self) -> &LegacyConfig {
		&self.config
	}

	/// Obtains temporary credentials from the request-token endpoint.
	pub async fn request_token(&self) -> Result<RequestToken> {
		strategy::observe(KIND, "request_token", async {
			let callback =
				self.config.callback_url.as_ref().map(Url::as_str).unwrap_or(OUT_OF_BAND);
			let request = self.signer.signed_post(
				&self.config.request_token_url,
				None,
				&[("oauth_callback", callback)],
				&[],
			)?;
			let mut params = self.dispatch_form(request, REQUEST_TOKEN_FAILED).await?;
			let token = take_required(&mut params, "oauth_token", REQUEST_TOKEN_FAILED)?;
			let token_secret =
				take_required(&mut params, "oauth_token_secret", REQUEST_TOKEN_FAILED)?;
			let callback_confirmed =
				params.remove("oauth_callback_confirmed").is_some_and(|value| value == "true");
			let login_url = params.remove("login_url").and_then(|raw| Url::parse(&raw).ok());

			Ok(RequestToken { token, token_secret, callback_confirmed, login_url })
		})
		.await
	}

	/// Builds the user-authorization redirect for `request_token`.
	pub fn authorize_url(&self, request_token: &RequestToken) -> Url {
		let mut url = self.config.user_authorization_url.clone();

		url.query_pairs_mut().append_pair("oauth_token", request_token.token.expose());

		url
	}

	/// Trades an authorized request token and its verifier for token credentials.
	pub async fn access_token(
		&self,
		request_token: &RequestToken,
		verifier: &str,
	) -> Result<TokenCredentials> {
		strategy::observe(KIND, "access_token", async {
			let pair =
				TokenPair { token: &request_token.token, secret: &request_token.token_secret };
			let request = self.signer.signed_post(
				&self.config.access_token_url,
				Some(pair),
				&[("oauth_verifier", verifier)],
				&[],
			)?;
			let mut params = self.dispatch_form(request, ACCESS_TOKEN_FAILED).await?;
			let token = take_required(&mut params, "oauth_token", ACCESS_TOKEN_FAILED)?;
			let token_secret =
				take_required(&mut params, "oauth_token_secret", ACCESS_TOKEN_FAILED)?;

			Ok(TokenCredentials { token, token_secret, params })
		})
		.await
	}

	/// Loads the current user's profile with the given token credentials.
	///
	/// Issues exactly one signed `currentUser` call. Transport failures are wrapped in
	/// [`InternalOAuthError`]; undecodable bodies surface as parse errors. The response
	/// `status` field is not inspected.
	pub async fn user_profile(&self, credentials: &TokenCredentials) -> Result<Profile> {
		strategy::observe(KIND, "user_profile", async {
			let pair = TokenPair { token: &credentials.token, secret: &credentials.token_secret };
			let request = self.signer.signed_post(
				&self.config.profile_url,
				Some(pair),
				&[],
				&CURRENT_USER_FORM,
			)?;
			let raw = http::fetch_success_body(self.http_client.as_ref(), request)
				.await
				.map_err(InternalOAuthError::fetch_profile)?;
			let json = profile::parse_body(&raw)?;

			Ok(profile::normalize(raw, json, ProfileFields::Basic)?)
		})
		.await
	}

	/// Starts a login: fetches a request token and builds the redirect.
	pub async fn begin(&self) -> Result<LegacyAuthorization> {
		let request_token = self.request_token().await?;
		let url = self.authorize_url(&request_token);

		Ok(LegacyAuthorization { url, request_token })
	}

	/// Finishes a login from the callback's `oauth_verifier`.
	pub async fn complete(
		&self,
		request_token: &RequestToken,
		verifier: &str,
	) -> Result<Authenticated<V::User>> {
		let credentials = self.access_token(request_token, verifier).await?;
		let profile = self.user_profile(&credentials).await?;

		strategy::run_verify(&self.verify, &credentials, profile).await
	}

	async fn dispatch_form(
		&self,
		request: HttpRequest,
		message: &'static str,
	) -> Result<BTreeMap<String, String>> {
		let body = http::fetch_success_body(self.http_client.as_ref(), request)
			.await
			.map_err(|cause| InternalOAuthError::new(message, cause))?;

		Ok(url::form_urlencoded::parse(body.as_bytes()).into_owned().collect())
	}
}
#[cfg(feature = "reqwest")]
impl<V> LegacyStrategy<ReqwestHttpClient, V>
where
	V: Verify<TokenCredentials>,
{
	/// Creates a strategy backed by a default reqwest client.
	pub fn new(options: &LegacyOptions, verify: V) -> Result<Self> {
		Self::with_http_client(options, verify, ReqwestHttpClient::default())
	}
}
impl<C, V> Strategy for LegacyStrategy<C, V>
where
	C: ?Sized + ApiHttpClient,
	V: Verify<TokenCredentials>,
{
	fn session_key(&self) -> &str {
		&self.config.session_key
	}
}
impl<C, V> Debug for LegacyStrategy<C, V>
where
	C: ?Sized + ApiHttpClient,
	V: Verify<TokenCredentials>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("LegacyStrategy")
			.field("consumer_key", &self.config.consumer_key)
			.field("session_key", &self.config.session_key)
			.finish()
	}
}

fn take_required(
	params: &mut BTreeMap<String, String>,
	name: &'static str,
	message: &'static str,
) -> Result<Secret, InternalOAuthError> {
	params.remove(name).filter(|value| !value.is_empty()).map(Secret::new).ok_or_else(|| {
		InternalOAuthError::new(message, OAuthCause::Malformed { detail: format!("missing {name}") })
	})
}
