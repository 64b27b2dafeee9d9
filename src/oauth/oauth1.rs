//! OAuth 1.0a (RFC 5849) HMAC-SHA1 request signing.
//!
//! Only the subset Rdio's legacy API uses is implemented: form-encoded POST requests
//! authorized through the `Authorization: OAuth ...` header. Protocol parameters, URL
//! query parameters, and form parameters all contribute to the signature base string.

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use oauth2::{
	HttpRequest,
	http::{
		Method,
		header::{AUTHORIZATION, CONTENT_TYPE},
	},
};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use sha1::Sha1;
// self
use crate::{_prelude::*, auth::Secret, error::ConfigError, oauth};

const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');
const NONCE_LEN: usize = 32;
const SIGNATURE_METHOD: &str = "HMAC-SHA1";
const VERSION: &str = "1.0";

/// Token/secret pair that authorizes a signed request on behalf of a user.
#[derive(Clone, Copy, Debug)]
pub struct TokenPair<'a> {
	/// `oauth_token` value.
	pub token: &'a Secret,
	/// Secret half of the signing key.
	pub secret: &'a Secret,
}

/// Signs requests with the consumer credentials and an optional token pair.
#[derive(Clone, Debug)]
pub struct OAuth1Signer {
	consumer_key: String,
	consumer_secret: Secret,
}
impl OAuth1Signer {
	/// Creates a signer for the provided consumer credentials.
	pub fn new(consumer_key: impl Into<String>, consumer_secret: Secret) -> Self {
		Self { consumer_key: consumer_key.into(), consumer_secret }
	}

	/// Builds a signed, form-encoded POST request.
	///
	/// `protocol` carries additional `oauth_*` parameters such as `oauth_callback` or
	/// `oauth_verifier`; `form` becomes the request body.
	pub fn signed_post(
		&self,
		url: &Url,
		token: Option<TokenPair<'_>>,
		protocol: &[(&str, &str)],
		form: &[(&str, &str)],
	) -> Result<HttpRequest, ConfigError> {
		let nonce = oauth::random_string(NONCE_LEN);
		let timestamp = OffsetDateTime::now_utc().unix_timestamp();
		let header =
			self.authorization_header("POST", url, token, protocol, form, &nonce, timestamp)?;
		let body = url::form_urlencoded::Serializer::new(String::new())
			.extend_pairs(form.iter())
			.finish();

		oauth2::http::Request::builder()
			.method(Method::POST)
			.uri(url.as_str())
			.header(AUTHORIZATION, header)
			.header(CONTENT_TYPE, "application/x-www-form-urlencoded")
			.body(body.into_bytes())
			.map_err(ConfigError::from)
	}

	/// Computes the `Authorization` header value for a request.
	#[allow(clippy::too_many_arguments)]
	pub fn authorization_header(
		&self,
		method: &str,
		url: &Url,
		token: Option<TokenPair<'_>>,
		protocol: &[(&str, &str)],
		form: &[(&str, &str)],
		nonce: &str,
		timestamp: i64,
	) -> Result<String, ConfigError> {
		let timestamp = timestamp.to_string();
		let mut oauth_params: Vec<(&str, &str)> = vec![
			("oauth_consumer_key", self.consumer_key.as_str()),
			("oauth_nonce", nonce),
			("oauth_signature_method", SIGNATURE_METHOD),
			("oauth_timestamp", timestamp.as_str()),
			("oauth_version", VERSION),
		];

		if let Some(pair) = token {
			oauth_params.push(("oauth_token", pair.token.expose()));
		}

		oauth_params.extend_from_slice(protocol);

		let query: Vec<(String, String)> = url.query_pairs().into_owned().collect();
		let all_params = oauth_params
			.iter()
			.copied()
			.chain(query.iter().map(|(key, value)| (key.as_str(), value.as_str())))
			.chain(form.iter().copied());
		let base = signature_base_string(method, url, all_params);
		let signature = self.sign(&base, token.map(|pair| pair.secret))?;

		oauth_params.push(("oauth_signature", signature.as_str()));
		oauth_params.sort_unstable();

		let fields = oauth_params
			.iter()
			.map(|(key, value)| format!("{}=\"{}\"", encode(key), encode(value)))
			.collect::<Vec<_>>()
			.join(", ");

		Ok(format!("OAuth {fields}"))
	}

	fn sign(&self, base: &str, token_secret: Option<&Secret>) -> Result<String, ConfigError> {
		let key = format!(
			"{}&{}",
			encode(self.consumer_secret.expose()),
			token_secret.map(|secret| encode(secret.expose())).unwrap_or_default()
		);
		let mut mac = <Hmac<Sha1>>::new_from_slice(key.as_bytes())
			.map_err(|_| ConfigError::InvalidSigningKey)?;

		mac.update(base.as_bytes());

		Ok(STANDARD.encode(mac.finalize().into_bytes()))
	}
}

fn signature_base_string<'a>(
	method: &str,
	url: &Url,
	params: impl Iterator<Item = (&'a str, &'a str)>,
) -> String {
	let mut encoded: Vec<(String, String)> =
		params.map(|(key, value)| (encode(key), encode(value))).collect();

	encoded.sort_unstable();

	let normalized = encoded
		.iter()
		.map(|(key, value)| format!("{key}={value}"))
		.collect::<Vec<_>>()
		.join("&");

	format!(
		"{}&{}&{}",
		method.to_ascii_uppercase(),
		encode(&base_string_uri(url)),
		encode(&normalized)
	)
}

fn base_string_uri(url: &Url) -> String {
	let host = url.host_str().unwrap_or_default();

	match url.port() {
		Some(port) => format!("{}://{host}:{port}{}", url.scheme(), url.path()),
		None => format!("{}://{host}{}", url.scheme(), url.path()),
	}
}

fn encode(value: &str) -> String {
	utf8_percent_encode(value, UNRESERVED).to_string()
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn url(value: &str) -> Url {
		Url::parse(value).expect("Fixture URL should parse.")
	}

	#[test]
	fn base_string_matches_reference_example() {
		let url = url("http://photos.example.net/photos?file=vacation.jpg&size=original");
		let base = signature_base_string(
			"get",
			&url,
			[
				("oauth_consumer_key", "dpf43f3p2l4k3l03"),
				("oauth_token", "nnch734d00sl2jdk"),
				("oauth_signature_method", "HMAC-SHA1"),
				("oauth_timestamp", "1191242096"),
				("oauth_nonce", "kllo9940pd9333jh"),
				("oauth_version", "1.0"),
				("file", "vacation.jpg"),
				("size", "original"),
			]
			.into_iter(),
		);

		assert_eq!(
			base,
			"GET&http%3A%2F%2Fphotos.example.net%2Fphotos&file%3Dvacation.jpg%26oauth_consumer_key%3Ddpf43f3p2l4k3l03%26oauth_nonce%3Dkllo9940pd9333jh%26oauth_signature_method%3DHMAC-SHA1%26oauth_timestamp%3D1191242096%26oauth_token%3Dnnch734d00sl2jdk%26oauth_version%3D1.0%26size%3Doriginal"
		);
	}

	#[test]
	fn header_matches_reference_signature() {
		let signer = OAuth1Signer::new("dpf43f3p2l4k3l03", Secret::new("kd94hf93k423kf44"));
		let token = Secret::new("nnch734d00sl2jdk");
		let secret = Secret::new("pfkkdhi9sl3r4s00");
		let header = signer
			.authorization_header(
				"GET",
				&url("http://photos.example.net/photos?file=vacation.jpg&size=original"),
				Some(TokenPair { token: &token, secret: &secret }),
				&[],
				&[],
				"kllo9940pd9333jh",
				1191242096,
			)
			.expect("Reference request should sign.");

		assert!(header.starts_with("OAuth "));
		assert!(header.contains("oauth_signature=\"tR3%2BTy81lMeYAr%2FFid0kMTYa%2FWM%3D\""));
		assert!(header.contains("oauth_token=\"nnch734d00sl2jdk\""));
		assert!(!header.contains("file="), "Non-protocol parameters stay out of the header.");
	}

	#[test]
	fn base_string_uri_keeps_only_non_default_ports() {
		assert_eq!(base_string_uri(&url("HTTP://API.Rdio.com:80/1/")), "http://api.rdio.com/1/");
		assert_eq!(
			base_string_uri(&url("http://127.0.0.1:8080/1/?x=1")),
			"http://127.0.0.1:8080/1/"
		);
	}

	#[test]
	fn encoding_uses_rfc3986_unreserved_set() {
		assert_eq!(encode("a b+c/~-._"), "a%20b%2Bc%2F~-._");
		assert_eq!(encode("email,vanityName"), "email%2CvanityName");
	}

	#[test]
	fn signed_post_builds_form_request() {
		let signer = OAuth1Signer::new("ABC123", Secret::new("secret"));
		let request = signer
			.signed_post(
				&url("http://api.rdio.com/1/"),
				None,
				&[("oauth_callback", "oob")],
				&[("method", "currentUser")],
			)
			.expect("Signed request should build.");
		let header = request
			.headers()
			.get(AUTHORIZATION)
			.and_then(|value| value.to_str().ok())
			.expect("Authorization header should be present.");

		assert_eq!(request.method(), Method::POST);
		assert_eq!(request.body().as_slice(), b"method=currentUser");
		assert!(header.contains("oauth_callback=\"oob\""));
		assert!(header.contains("oauth_consumer_key=\"ABC123\""));
		assert!(!header.contains("oauth_token="));
	}
}
