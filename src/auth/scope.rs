//! Scope modeling for the OAuth 2.0 authorization request.

// std
use std::str::FromStr;
// crates.io
use serde::{Deserializer, de::Error as DeError};
// self
use crate::_prelude::*;

/// Errors emitted when validating scopes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum ScopeValidationError {
	/// Empty scope entries are not allowed.
	#[error("Scope entries cannot be empty.")]
	Empty,
	/// Scopes cannot contain embedded whitespace characters.
	#[error("Scope contains whitespace: {scope}.")]
	ContainsWhitespace {
		/// The offending scope string.
		scope: String,
	},
}

/// Deduplicated OAuth scopes kept in the order the caller requested them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ScopeSet(Vec<String>);
impl ScopeSet {
	/// Creates a normalized scope set from any iterator.
	pub fn new<I, S>(scopes: I) -> Result<Self, ScopeValidationError>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let mut values: Vec<String> = Vec::new();

		for scope in scopes {
			let owned: String = scope.into();

			if owned.is_empty() {
				return Err(ScopeValidationError::Empty);
			}
			if owned.chars().any(char::is_whitespace) {
				return Err(ScopeValidationError::ContainsWhitespace { scope: owned });
			}

			if !values.contains(&owned) {
				values.push(owned);
			}
		}

		Ok(Self(values))
	}

	/// Number of distinct scopes.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true if no scopes are defined.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Returns true if the set contains the provided scope.
	pub fn contains(&self, scope: &str) -> bool {
		self.0.iter().any(|candidate| candidate == scope)
	}

	/// Iterator over scopes in request order.
	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(String::as_str)
	}

	/// Joins the scopes with `separator`, returning `None` for an empty set.
	pub fn join(&self, separator: char) -> Option<String> {
		if self.is_empty() {
			return None;
		}

		let mut buf = String::new();

		for (idx, value) in self.iter().enumerate() {
			if idx > 0 {
				buf.push(separator);
			}

			buf.push_str(value);
		}

		Some(buf)
	}
}
impl Display for ScopeSet {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.join(' ').unwrap_or_default())
	}
}
impl FromStr for ScopeSet {
	type Err = ScopeValidationError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		if s.is_empty() {
			return Ok(Self::default());
		}
		if s.chars().all(char::is_whitespace) {
			return Err(ScopeValidationError::Empty);
		}

		Self::new(s.split_whitespace())
	}
}
impl<'de> Deserialize<'de> for ScopeSet {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let values = <Vec<String>>::deserialize(deserializer)?;

		ScopeSet::new(values).map_err(DeError::custom)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn scopes_dedupe_in_request_order_and_join() {
		let scopes = ScopeSet::new(["playlist", "email", "playlist", "email"])
			.expect("Scope fixture should be valid.");

		assert_eq!(scopes.len(), 2);
		assert!(scopes.contains("email"));
		assert!(!scopes.contains("collection"));
		assert_eq!(scopes.iter().collect::<Vec<_>>(), ["playlist", "email"]);
		assert_eq!(scopes.join(' ').as_deref(), Some("playlist email"));
		assert_eq!(scopes.join(',').as_deref(), Some("playlist,email"));
		assert_eq!(ScopeSet::default().join(' '), None);
	}

	#[test]
	fn scopes_reject_blank_and_padded_entries() {
		assert_eq!(ScopeSet::new([""]), Err(ScopeValidationError::Empty));
		assert!(matches!(
			ScopeSet::new([" email "]),
			Err(ScopeValidationError::ContainsWhitespace { .. })
		));
		assert!(ScopeSet::from_str("").is_ok(), "Empty string represents an empty scope set.");
		assert!(ScopeSet::from_str("   ").is_err(), "Whitespace-only input must be rejected.");
	}

	#[test]
	fn deserialization_enforces_validation() {
		let scopes: ScopeSet = serde_json::from_str("[\"email\",\"collection\"]")
			.expect("Scope list should deserialize.");

		assert_eq!(scopes.to_string(), "email collection");
		assert!(serde_json::from_str::<ScopeSet>("[\"with space\"]").is_err());
	}
}
