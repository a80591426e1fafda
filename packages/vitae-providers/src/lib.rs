pub mod gemini;

use color_eyre::Result;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};

const API_KEY_HEADER: &str = "x-goog-api-key";

pub fn auth_headers(api_key: &str) -> Result<HeaderMap> {
	let mut headers = HeaderMap::new();

	headers.insert(HeaderName::from_static(API_KEY_HEADER), api_key.parse()?);
	headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

	Ok(headers)
}
