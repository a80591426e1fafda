use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use vitae_config::{Config, Error};

const SAMPLE_CONFIG_TEMPLATE_TOML: &str = include_str!("fixtures/sample_config.template.toml");

fn sample_toml_with(section: &str, key: &str, value: Value) -> String {
	let mut root: Value =
		toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.");
	let table = root
		.as_table_mut()
		.and_then(|root| root.get_mut(section))
		.and_then(Value::as_table_mut)
		.expect("Template config must include the requested section.");

	table.insert(key.to_string(), value);

	toml::to_string(&root).expect("Failed to render template config.")
}

fn sample_toml_without(section: &str, key: &str) -> String {
	let mut root: Value =
		toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.");
	let table = root
		.as_table_mut()
		.and_then(|root| root.get_mut(section))
		.and_then(Value::as_table_mut)
		.expect("Template config must include the requested section.");

	table.remove(key);

	toml::to_string(&root).expect("Failed to render template config.")
}

fn write_temp_config(payload: String) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("vitae_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn load_payload(payload: String) -> vitae_config::Result<Config> {
	let path = write_temp_config(payload);
	let result = vitae_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	result
}

fn base_config() -> Config {
	load_payload(SAMPLE_CONFIG_TEMPLATE_TOML.to_string()).expect("Failed to load sample config.")
}

#[test]
fn sample_config_loads_with_default_tables() {
	let cfg = base_config();

	assert_eq!(cfg.corpus.chunk_size, 800);
	assert_eq!(cfg.retrieval.top_k, 3);
	assert_eq!(cfg.retrieval.subject, "aman");
	assert_eq!(cfg.retrieval.weights.whole_word, vitae_config::DEFAULT_WHOLE_WORD_WEIGHT);
	assert!(cfg.retrieval.pronouns.iter().any(|word| word == "your"));
	assert!(cfg.retrieval.stop_words.iter().any(|word| word == "does"));
	assert_eq!(
		cfg.retrieval.synonyms.get("react").map(Vec::as_slice),
		Some(["react.js".to_string(), "reactjs".to_string()].as_slice())
	);
	assert_eq!(cfg.provider.api_base, "https://generativelanguage.googleapis.com/v1beta");
	assert_eq!(cfg.provider.api_key(), "test-key");
}

#[test]
fn omitted_chunk_size_and_model_use_defaults() {
	let payload = sample_toml_without("corpus", "chunk_size");
	let mut root: Value = toml::from_str(&payload).expect("Failed to parse payload.");

	root.get_mut("provider")
		.and_then(Value::as_table_mut)
		.expect("Payload must include [provider].")
		.remove("model");

	let cfg = load_payload(toml::to_string(&root).expect("Failed to render payload."))
		.expect("Expected config to load.");

	assert_eq!(cfg.corpus.chunk_size, vitae_config::DEFAULT_CHUNK_SIZE);
	assert_eq!(cfg.provider.model, vitae_config::DEFAULT_MODEL);
}

#[test]
fn chunk_size_must_be_positive() {
	let err = load_payload(sample_toml_with("corpus", "chunk_size", Value::Integer(0)))
		.expect_err("Expected chunk_size validation error.");

	assert!(
		err.to_string().contains("corpus.chunk_size must be greater than zero."),
		"Unexpected error: {err}"
	);
}

#[test]
fn top_k_must_be_positive() {
	let mut cfg = base_config();

	cfg.retrieval.top_k = 0;

	let err = vitae_config::validate(&cfg).expect_err("Expected top_k validation error.");

	assert!(
		err.to_string().contains("retrieval.top_k must be greater than zero."),
		"Unexpected error: {err}"
	);
}

#[test]
fn http_bind_must_be_a_socket_address() {
	let err = load_payload(sample_toml_with(
		"service",
		"http_bind",
		Value::String("localhost".to_string()),
	))
	.expect_err("Expected http_bind validation error.");

	assert!(err.to_string().contains("service.http_bind"), "Unexpected error: {err}");
}

#[test]
fn blank_api_key_without_env_is_rejected() {
	let payload = sample_toml_with("provider", "api_key", Value::String("  ".to_string()));
	let err = load_payload(payload).expect_err("Expected missing api key error.");

	assert!(
		matches!(&err, Error::MissingApiKey { env } if env == "VITAE_TEST_UNUSED_KEY"),
		"Unexpected error: {err}"
	);
}

#[test]
fn api_key_env_is_used_when_key_is_absent() {
	let var = format!("VITAE_TEST_KEY_{}", std::process::id());
	let payload = sample_toml_without("provider", "api_key");
	let mut root: Value = toml::from_str(&payload).expect("Failed to parse payload.");

	root.get_mut("provider")
		.and_then(Value::as_table_mut)
		.expect("Payload must include [provider].")
		.insert("api_key_env".to_string(), Value::String(var.clone()));

	// SAFETY: the variable name is unique to this test process and test.
	unsafe { env::set_var(&var, "from-env") };

	let result = load_payload(toml::to_string(&root).expect("Failed to render payload."));

	// SAFETY: see above.
	unsafe { env::remove_var(&var) };

	let cfg = result.expect("Expected config to load from env key.");

	assert_eq!(cfg.provider.api_key(), "from-env");
}

#[test]
fn empty_out_of_scope_reply_is_rejected() {
	let mut cfg = base_config();

	cfg.answer.out_of_scope_reply = " ".to_string();

	let err = vitae_config::validate(&cfg).expect_err("Expected reply validation error.");

	assert!(
		err.to_string().contains("answer.out_of_scope_reply must be non-empty."),
		"Unexpected error: {err}"
	);
}

#[test]
fn synonym_entries_must_be_non_empty() {
	let mut cfg = base_config();

	cfg.retrieval.synonyms.insert("react".to_string(), vec![String::new()]);

	let err = vitae_config::validate(&cfg).expect_err("Expected synonym validation error.");

	assert!(err.to_string().contains("retrieval.synonyms"), "Unexpected error: {err}");
}

#[test]
fn missing_file_reports_path() {
	let path = env::temp_dir().join("vitae_config_test_missing.toml");
	let err = vitae_config::load(&path).expect_err("Expected read error.");

	assert!(matches!(err, Error::ReadConfig { .. }), "Unexpected error: {err}");
}

#[test]
fn cors_origins_must_be_http_origins() {
	let bad_origins =
		["aman.dev", "https://", "https://aman.dev/path", "https://am an.dev", "https://é.dev"];

	for bad in bad_origins {
		let origins = vec![
			Value::String("https://aman.dev".to_string()),
			Value::String(bad.to_string()),
		];
		let payload = sample_toml_with("service", "cors_allowed_origins", Value::Array(origins));
		let err = load_payload(payload).expect_err("Expected cors origin validation error.");

		assert!(
			err.to_string().contains("service.cors_allowed_origins"),
			"Unexpected error for {bad:?}: {err}"
		);
	}
}

#[test]
fn cors_origins_are_trimmed() {
	let payload = sample_toml_with(
		"service",
		"cors_allowed_origins",
		Value::Array(vec![Value::String(" http://localhost:3000 ".to_string())]),
	);
	let cfg = load_payload(payload).expect("Failed to load config.");

	assert_eq!(cfg.service.cors_allowed_origins, ["http://localhost:3000"]);
}
