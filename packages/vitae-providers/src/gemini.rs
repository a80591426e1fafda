use std::time::Duration;

use color_eyre::Result;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
	contents: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
	role: &'static str,
	parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
	text: &'a str,
}

pub fn generate_url(cfg: &vitae_config::Provider) -> String {
	format!("{}/models/{}:generateContent", cfg.api_base, cfg.model)
}

/// Sends `prompt` as a single user turn and returns the first text part of the first candidate.
///
/// `Ok(None)` means the model answered without any text.
pub async fn generate(cfg: &vitae_config::Provider, prompt: &str) -> Result<Option<String>> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let body = GenerateRequest {
		contents: [Content { role: "user", parts: [Part { text: prompt }] }],
	};
	let res = client
		.post(generate_url(cfg))
		.headers(crate::auth_headers(cfg.api_key())?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	Ok(parse_generate_response(&json))
}

fn parse_generate_response(json: &Value) -> Option<String> {
	json.get("candidates")
		.and_then(|v| v.as_array())
		.and_then(|candidates| candidates.first())
		.and_then(|candidate| candidate.get("content"))
		.and_then(|content| content.get("parts"))
		.and_then(|v| v.as_array())
		.and_then(|parts| parts.first())
		.and_then(|part| part.get("text"))
		.and_then(|text| text.as_str())
		.map(str::to_string)
}
