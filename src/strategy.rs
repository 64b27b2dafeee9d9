//! Rdio login strategies and the contracts they share with the host.
//!
//! [`LegacyStrategy`] speaks OAuth 1.0a and [`ModernStrategy`] speaks OAuth 2.0. Both end
//! their handshake the same way: one current-user call produces a [`Profile`], which is
//! handed to the host's [`Verify`] callback together with the credentials that fetched it.

pub mod legacy;
pub mod modern;

pub use legacy::*;
pub use modern::*;

// self
use crate::{
	_prelude::*,
	obs::{FlowSpan, StrategyKind},
	profile::{PROVIDER_NAME, Profile},
};

/// Boxed future returned by [`Verify::verify`].
pub type VerifyFuture<'a, U> =
	Pin<Box<dyn Future<Output = Result<Option<U>, BoxError>> + 'a + Send>>;

/// Identity every strategy reports to the host's authentication framework.
pub trait Strategy {
	/// Strategy name used for routing; always `"rdio"`.
	fn name(&self) -> &'static str {
		PROVIDER_NAME
	}

	/// Session key under which the host stores handshake state.
	fn session_key(&self) -> &str;
}

/// Host callback that turns credentials plus a profile into an application user.
///
/// Resolving to `Ok(None)` rejects the login without signalling an error. Any closure
/// `Fn(&Credentials, Profile) -> impl Future<Output = Result<Option<User>, BoxError>>`
/// implements this trait.
pub trait Verify<Credentials>
where
	Self: Send + Sync,
{
	/// Application user produced on success.
	type User;

	/// Maps the authenticated credentials and profile to a user.
	fn verify<'a>(
		&'a self,
		credentials: &'a Credentials,
		profile: Profile,
	) -> VerifyFuture<'a, Self::User>;
}
impl<Credentials, F, Fut, U> Verify<Credentials> for F
where
	F: Send + Sync + Fn(&Credentials, Profile) -> Fut,
	Fut: 'static + Send + Future<Output = Result<Option<U>, BoxError>>,
{
	type User = U;

	fn verify<'a>(&'a self, credentials: &'a Credentials, profile: Profile) -> VerifyFuture<'a, U> {
		Box::pin(self(credentials, profile))
	}
}

/// Result of a completed handshake.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Authenticated<User> {
	/// The verify callback accepted the login.
	User(User),
	/// The verify callback declined the login.
	Rejected,
}
impl<User> Authenticated<User> {
	/// Returns the accepted user, if any.
	pub fn into_user(self) -> Option<User> {
		match self {
			Self::User(user) => Some(user),
			Self::Rejected => None,
		}
	}
}

async fn run_verify<Credentials, V>(
	verify: &V,
	credentials: &Credentials,
	profile: Profile,
) -> Result<Authenticated<V::User>>
where
	V: ?Sized + Verify<Credentials>,
{
	match verify.verify(credentials, profile).await {
		Ok(Some(user)) => Ok(Authenticated::User(user)),
		Ok(None) => Ok(Authenticated::Rejected),
		Err(source) => Err(Error::Verify { source }),
	}
}

async fn observe<T, Fut>(kind: StrategyKind, stage: &'static str, fut: Fut) -> Result<T>
where
	Fut: Future<Output = Result<T>>,
{
	let span = FlowSpan::start(kind, stage);
	let result = span.instrument(fut).await;

	span.finish(&result);

	result
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::profile::{self, ProfileFields};

	fn profile() -> Profile {
		let body = "{\"result\":{\"firstName\":\"Jared\",\"lastName\":\"Hanson\",\"key\":\"x1111\"}}";
		let json = profile::parse_body(body).expect("Fixture should be valid JSON.");

		profile::normalize(body.into(), json, ProfileFields::Basic)
			.expect("Fixture should normalize.")
	}

	#[tokio::test]
	async fn closures_act_as_verify_callbacks() {
		let accept = |credentials: &String, profile: Profile| {
			let owner = credentials.clone();

			async move { Ok::<_, BoxError>(Some(format!("{owner}:{}", profile.id))) }
		};
		let reject =
			|_: &String, _: Profile| async move { Ok::<Option<String>, BoxError>(None) };
		let credentials = "token".to_owned();

		assert_eq!(
			run_verify(&accept, &credentials, profile())
				.await
				.expect("Accepting callback should succeed."),
			Authenticated::User("token:x1111".into())
		);
		assert_eq!(
			run_verify(&reject, &credentials, profile())
				.await
				.expect("Rejecting callback should still succeed."),
			Authenticated::Rejected
		);
	}

	#[tokio::test]
	async fn verify_failures_are_wrapped() {
		let failing = |_: &String, _: Profile| async move {
			Err::<Option<String>, BoxError>("database unavailable".into())
		};
		let err = run_verify(&failing, &"token".to_owned(), profile())
			.await
			.expect_err("Failing callback should surface an error.");

		match err {
			Error::Verify { source } => assert_eq!(source.to_string(), "database unavailable"),
			other => panic!("Unexpected error: {other:?}."),
		}
	}

	#[tokio::test]
	async fn observe_passes_results_through() {
		let value = observe(StrategyKind::Modern, "exchange_code", async { Ok(7) })
			.await
			.expect("Successful future should pass through.");

		assert_eq!(value, 7);
		assert!(
			observe::<(), _>(StrategyKind::Legacy, "access_token", async { Err(Error::StateMismatch) })
				.await
				.is_err()
		);
	}
}
