#![cfg(all(feature = "reqwest", feature = "test"))]

// crates.io
use httpmock::prelude::*;
// self
use rdio_strategy::{
	_preludet::*,
	auth::TokenCredentials,
	config::LegacyOptions,
	error::{OAuthCause, TransportError},
	http::ReqwestHttpClient,
	profile::Profile,
	strategy::{Authenticated, LegacyStrategy, Strategy},
};

const PROFILE_BODY: &str =
	"{\"result\":{\"firstName\":\"Jared\",\"lastName\":\"Hanson\",\"key\":\"x1111\"}}";

type VerifyFn = fn(&TokenCredentials, Profile) -> std::future::Ready<Result<Option<String>, BoxError>>;

fn verify(
	credentials: &TokenCredentials,
	profile: Profile,
) -> std::future::Ready<Result<Option<String>, BoxError>> {
	std::future::ready(Ok(Some(format!("{}@{}", profile.id, credentials.token.expose()))))
}

fn build_strategy(server: &MockServer) -> LegacyStrategy<ReqwestHttpClient, VerifyFn> {
	let options = LegacyOptions::new("consumer-it", "consumer-secret-it")
		.with_callback_url("https://app.example.com/auth/rdio/callback")
		.with_request_token_url(server.url("/oauth/request_token"))
		.with_access_token_url(server.url("/oauth/access_token"))
		.with_user_authorization_url(server.url("/oauth/authorize"))
		.with_profile_url(server.url("/1/"));

	LegacyStrategy::with_http_client(&options, verify as VerifyFn, ReqwestHttpClient::default())
		.expect("Legacy strategy should build against the mock server.")
}

#[tokio::test]
async fn full_handshake_produces_verified_user() {
	let server = MockServer::start_async().await;
	let strategy = build_strategy(&server);
	let request_token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/request_token").header_exists("authorization");
			then.status(200).header("content-type", "application/x-www-form-urlencoded").body(
				"oauth_token=request-it&oauth_token_secret=request-secret-it&oauth_callback_confirmed=true",
			);
		})
		.await;
	let authorization = strategy.begin().await.expect("Request token step should succeed.");

	request_token_mock.assert_async().await;

	assert_eq!(strategy.session_key(), "oauth:rdio");
	assert_eq!(authorization.url.path(), "/oauth/authorize");
	assert_eq!(authorization.url.query(), Some("oauth_token=request-it"));
	assert!(authorization.request_token.callback_confirmed);

	let access_token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/access_token").header_exists("authorization");
			then.status(200)
				.header("content-type", "application/x-www-form-urlencoded")
				.body("oauth_token=access-it&oauth_token_secret=access-secret-it");
		})
		.await;
	let profile_mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/1/")
				.header("content-type", "application/x-www-form-urlencoded")
				.body("method=currentUser");
			then.status(200).header("content-type", "application/json").body(PROFILE_BODY);
		})
		.await;
	let outcome = strategy
		.complete(&authorization.request_token, "verifier-it")
		.await
		.expect("Handshake should complete.");

	access_token_mock.assert_async().await;
	profile_mock.assert_async().await;

	assert_eq!(outcome, Authenticated::User("x1111@access-it".into()));
}

#[tokio::test]
async fn profile_status_errors_are_wrapped() {
	let server = MockServer::start_async().await;
	let strategy = build_strategy(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/1/");
			then.status(403).body("Developer Inactive");
		})
		.await;
	let credentials = TokenCredentials {
		token: "access-it".into(),
		token_secret: "access-secret-it".into(),
		params: Default::default(),
	};
	let err = strategy
		.user_profile(&credentials)
		.await
		.expect_err("Forbidden responses should fail the call.");

	mock.assert_async().await;

	match err {
		Error::InternalOAuth(inner) => {
			assert_eq!(inner.to_string(), "failed to fetch user profile");
			assert!(matches!(
				inner.cause,
				OAuthCause::Transport(TransportError::Status { status: 403, ref body })
					if body == "Developer Inactive"
			));
		},
		other => panic!("Unexpected error: {other:?}."),
	}
}
