//! OAuth protocol plumbing: the OAuth 2.0 client facade and the OAuth 1.0a signer.

pub mod oauth1;

pub use oauth2;

// crates.io
use oauth2::{
	AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, EndpointNotSet, EndpointSet,
	RedirectUrl, RequestTokenError, TokenResponse, TokenUrl,
	basic::{BasicClient, BasicErrorResponse, BasicTokenResponse},
};
use rand::{Rng, distr::Alphanumeric};
// self
use crate::{
	_prelude::*,
	auth::{AccessGrant, ScopeSet, Secret},
	config::ModernConfig,
	error::{ACCESS_TOKEN_FAILED, ConfigError, InternalOAuthError, OAuthCause, TransportError},
	http::{ApiHttpClient, OAuth2Transport},
};

pub(crate) type ConfiguredBasicClient =
	BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

/// Builds the `oauth2` client for a resolved [`ModernConfig`].
pub(crate) fn build_client(config: &ModernConfig) -> Result<ConfiguredBasicClient, ConfigError> {
	let auth_url = AuthUrl::new(config.authorization_url.to_string())
		.map_err(|source| ConfigError::InvalidUrl { field: "authorization", source })?;
	let token_url = TokenUrl::new(config.token_url.to_string())
		.map_err(|source| ConfigError::InvalidUrl { field: "token", source })?;
	let mut client = BasicClient::new(ClientId::new(config.client_id.clone()))
		.set_client_secret(ClientSecret::new(config.client_secret.expose().to_owned()))
		.set_auth_uri(auth_url)
		.set_token_uri(token_url);

	if let Some(callback) = &config.callback_url {
		let redirect_url = RedirectUrl::new(callback.to_string())
			.map_err(|source| ConfigError::InvalidUrl { field: "callback", source })?;

		client = client.set_redirect_uri(redirect_url);
	}

	Ok(client)
}

/// Builds the authorization redirect URL carrying `state` and the configured scopes.
pub(crate) fn authorize_url(
	client: &ConfiguredBasicClient,
	config: &ModernConfig,
	state: String,
) -> Url {
	let mut request = client.authorize_url(|| CsrfToken::new(state));

	if let Some(scope) = config.scope.join(config.scope_separator) {
		request = request.add_extra_param("scope", scope);
	}

	let (url, _state) = request.url();

	url
}

/// Exchanges an authorization code at the token endpoint.
pub(crate) async fn exchange_code<C>(
	client: &ConfiguredBasicClient,
	http_client: &C,
	code: &str,
) -> Result<AccessGrant>
where
	C: ?Sized + ApiHttpClient,
{
	let transport = OAuth2Transport(http_client);
	let response = client
		.exchange_code(AuthorizationCode::new(code.to_owned()))
		.request_async(&transport)
		.await
		.map_err(map_request_error)?;

	map_token_response(response)
}

fn map_token_response(response: BasicTokenResponse) -> Result<AccessGrant> {
	let expires_in = response
		.expires_in()
		.map(|lifetime| i64::try_from(lifetime.as_secs()).map(Duration::seconds))
		.transpose()
		.map_err(|_| ConfigError::ExpiresInOutOfRange)?;
	let scope = response
		.scopes()
		.map(|scopes| ScopeSet::new(scopes.iter().map(|scope| scope.as_str().to_owned())))
		.transpose()
		.map_err(ConfigError::from)?;

	Ok(AccessGrant {
		access_token: Secret::new(response.access_token().secret().to_owned()),
		refresh_token: response.refresh_token().map(|token| Secret::new(token.secret().to_owned())),
		expires_in,
		scope,
	})
}

fn map_request_error(err: RequestTokenError<TransportError, BasicErrorResponse>) -> Error {
	let cause = match err {
		RequestTokenError::ServerResponse(response) => OAuthCause::Provider {
			message: Some(
				response
					.error_description()
					.cloned()
					.unwrap_or_else(|| response.error().as_ref().to_owned()),
			),
		},
		RequestTokenError::Request(error) => OAuthCause::Transport(error),
		RequestTokenError::Parse(error, _body) => OAuthCause::Malformed { detail: error.to_string() },
		RequestTokenError::Other(message) => OAuthCause::Malformed { detail: message },
	};

	InternalOAuthError::new(ACCESS_TOKEN_FAILED, cause).into()
}

/// Random alphanumeric string used for OAuth 1.0a nonces and OAuth 2.0 state values.
pub(crate) fn random_string(len: usize) -> String {
	rand::rng().sample_iter(Alphanumeric).take(len).map(char::from).collect()
}
