//! Builds an OAuth 2.0 authorization redirect, validates the returned `state`, and completes
//! the login against a local mock of Rdio's services API.

// std
use std::collections::HashMap;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use rdio_strategy::{
	auth::AccessGrant,
	config::ModernOptions,
	error::BoxError,
	http::ReqwestHttpClient,
	profile::Profile,
	strategy::{ReqwestModernStrategy, Strategy},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth2/token");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"demo-access\",\"token_type\":\"bearer\",\"expires_in\":43200}",
			);
		})
		.await;
	let profile_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/1/").header("authorization", "Bearer demo-access");
			then.status(200).header("content-type", "application/json").body(
				"{\"status\":\"ok\",\"result\":{\"key\":\"s12345\",\"firstName\":\"Demo\",\"lastName\":\"Listener\",\"email\":\"demo@example.com\",\"username\":\"demolistener\"}}",
			);
		})
		.await;
	let options = ModernOptions::new("demo-client", "demo-secret")
		.with_callback_url("https://app.example.com/auth/rdio/callback")
		.with_scope(["email"])
		.with_token_url(server.url("/oauth2/token"))
		.with_profile_url(server.url("/api/1/"));
	let verify = |grant: &AccessGrant, profile: Profile| {
		let expires_in = grant.expires_in;

		async move {
			println!("Access token expires in {expires_in:?}.");

			Ok::<_, BoxError>(Some(profile))
		}
	};
	let strategy =
		<ReqwestModernStrategy<_>>::with_http_client(&options, verify, ReqwestHttpClient::default())?;
	let authorization = strategy.begin();

	println!("Send your user to {}.", authorization.url);

	let mut pending: HashMap<String, _> = HashMap::new();

	pending.insert(strategy.session_key().to_owned(), authorization);

	// Simulate the redirect handler reading `state` and `code` from the callback.
	let stashed = pending.remove(strategy.session_key());

	if let Some(stashed) = stashed {
		stashed.validate_state(&stashed.state)?;

		if let Some(profile) = strategy.complete("demo-code").await?.into_user() {
			println!(
				"Signed in {} <{}>.",
				profile.display_name,
				profile.emails.unwrap_or_default().join(", ")
			);
		}
	}

	token_mock.assert_async().await;
	profile_mock.assert_async().await;

	Ok(())
}
