//! Normalized user profile and the current-user response mapping.
//!
//! Rdio answers the `currentUser` API method with
//! `{"status": "ok", "result": {"key", "firstName", "lastName", ...}}`, or with
//! `{"status": "error", "message": ...}` when the call is rejected. The helpers here keep
//! the three failure categories apart: invalid JSON and unexpected shapes surface as
//! [`ParseError`], while an `error` status becomes an [`InternalOAuthError`] so hosts treat
//! it like any other provider failure.

// self
use crate::{
	_prelude::*,
	error::{InternalOAuthError, OAuthCause, ParseError},
};

/// Provider name carried by every [`Profile`] and reported by both strategies.
pub const PROVIDER_NAME: &str = "rdio";

const ERROR_STATUS: &str = "error";

/// Provider-agnostic identity record handed to the host's verify callback.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
	/// Always [`PROVIDER_NAME`].
	pub provider: &'static str,
	/// Rdio user key.
	pub id: String,
	/// `firstName` and `lastName` joined by a single space.
	pub display_name: String,
	/// Structured name parts.
	pub name: ProfileName,
	/// Rdio username, when requested and returned.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub username: Option<String>,
	/// Email addresses, when requested and returned.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub emails: Option<Vec<String>>,
	/// Response body exactly as received.
	#[serde(rename = "_raw")]
	pub raw: String,
	/// Parsed response body.
	#[serde(rename = "_json")]
	pub json: Value,
}

/// Family and given name parts of a [`Profile`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileName {
	/// Rdio `lastName`.
	pub family_name: String,
	/// Rdio `firstName`.
	pub given_name: String,
}

/// Selects which optional current-user fields are copied into the profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProfileFields {
	/// Identifier and name only.
	Basic,
	/// Identifier, name, username, and email.
	WithContact,
}

#[derive(Debug, Deserialize)]
struct CurrentUserEnvelope {
	result: CurrentUser,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CurrentUser {
	key: String,
	first_name: String,
	last_name: String,
	email: Option<String>,
	username: Option<String>,
}

/// Parses a response body into a JSON value.
pub fn parse_body(body: &str) -> Result<Value, ParseError> {
	serde_json::from_str(body).map_err(ParseError::Syntax)
}

/// Fails when the payload's `status` field is the `error` sentinel.
pub fn ensure_ok_status(json: &Value) -> Result<(), InternalOAuthError> {
	if json.get("status").and_then(Value::as_str) != Some(ERROR_STATUS) {
		return Ok(());
	}

	let message = json.get("message").and_then(Value::as_str).map(ToOwned::to_owned);

	Err(InternalOAuthError::fetch_profile(OAuthCause::Provider { message }))
}

/// Maps a parsed current-user payload into a [`Profile`].
pub fn normalize(raw: String, json: Value, fields: ProfileFields) -> Result<Profile, ParseError> {
	let CurrentUserEnvelope { result } =
		serde_path_to_error::deserialize(&json).map_err(ParseError::Shape)?;
	let CurrentUser { key, first_name, last_name, email, username } = result;
	let (username, emails) = match fields {
		ProfileFields::Basic => (None, None),
		ProfileFields::WithContact => (username, email.map(|email| vec![email])),
	};

	Ok(Profile {
		provider: PROVIDER_NAME,
		id: key,
		display_name: format!("{first_name} {last_name}"),
		name: ProfileName { family_name: last_name, given_name: first_name },
		username,
		emails,
		raw,
		json,
	})
}
