//! Strategy configuration: caller-facing options and the validated configs they resolve to.
//!
//! Options are plain serde structs where every endpoint is optional. Resolving them is a
//! pure function: defaults for Rdio's endpoints and session keys are merged into a fresh
//! immutable config and the options value is left untouched.

pub mod legacy;
pub mod modern;

pub use legacy::*;
pub use modern::*;

// self
use crate::{_prelude::*, auth::Secret, error::ConfigError};

fn resolve_url(
	field: &'static str,
	value: Option<&str>,
	default: &'static str,
) -> Result<Url, ConfigError> {
	parse_url(field, value.unwrap_or(default))
}

fn resolve_optional_url(
	field: &'static str,
	value: Option<&str>,
) -> Result<Option<Url>, ConfigError> {
	value.map(|raw| parse_url(field, raw)).transpose()
}

fn parse_url(field: &'static str, raw: &str) -> Result<Url, ConfigError> {
	let url = Url::parse(raw).map_err(|source| ConfigError::InvalidUrl { field, source })?;

	match url.scheme() {
		"http" | "https" => Ok(url),
		_ => Err(ConfigError::UnsupportedScheme { field, url: url.to_string() }),
	}
}

fn require_identifier(field: &'static str, value: &str) -> Result<String, ConfigError> {
	if value.trim().is_empty() {
		Err(ConfigError::MissingCredential { field })
	} else {
		Ok(value.to_owned())
	}
}

fn require_secret(field: &'static str, value: &Secret) -> Result<Secret, ConfigError> {
	if value.is_blank() { Err(ConfigError::MissingCredential { field }) } else { Ok(value.clone()) }
}
