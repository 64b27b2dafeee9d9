//! Drives the OAuth 1.0a handshake against a local mock of Rdio's legacy API, from the
//! request token through the verify callback.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use rdio_strategy::{
	auth::TokenCredentials,
	config::LegacyOptions,
	error::BoxError,
	http::ReqwestHttpClient,
	profile::Profile,
	strategy::{Authenticated, ReqwestLegacyStrategy, Strategy},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let request_token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/request_token");
			then.status(200).body(
				"oauth_token=demo-request&oauth_token_secret=demo-request-secret&oauth_callback_confirmed=true",
			);
		})
		.await;
	let access_token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/access_token");
			then.status(200).body("oauth_token=demo-access&oauth_token_secret=demo-access-secret");
		})
		.await;
	let profile_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/1/").body("method=currentUser");
			then.status(200).header("content-type", "application/json").body(
				"{\"status\":\"ok\",\"result\":{\"key\":\"s12345\",\"firstName\":\"Demo\",\"lastName\":\"Listener\"}}",
			);
		})
		.await;
	let options = LegacyOptions::new("demo-consumer", "demo-consumer-secret")
		.with_callback_url("https://app.example.com/auth/rdio/callback")
		.with_request_token_url(server.url("/oauth/request_token"))
		.with_access_token_url(server.url("/oauth/access_token"))
		.with_profile_url(server.url("/1/"));
	let verify = |credentials: &TokenCredentials, profile: Profile| {
		let token_set = !credentials.token.is_blank();

		async move {
			println!("Verifying {} ({}), token present: {token_set}.", profile.display_name, profile.id);

			Ok::<_, BoxError>(Some(profile.id))
		}
	};
	let strategy =
		<ReqwestLegacyStrategy<_>>::with_http_client(&options, verify, ReqwestHttpClient::default())?;
	let authorization = strategy.begin().await?;

	println!("Store the request token under `{}`.", strategy.session_key());
	println!("Send your user to {}.", authorization.url);

	// Simulate Rdio redirecting back with `oauth_verifier`.
	match strategy.complete(&authorization.request_token, "demo-verifier").await? {
		Authenticated::User(user_id) => println!("Signed in as {user_id}."),
		Authenticated::Rejected => eprintln!("Login was rejected by the verify callback."),
	}

	request_token_mock.assert_async().await;
	access_token_mock.assert_async().await;
	profile_mock.assert_async().await;

	Ok(())
}
