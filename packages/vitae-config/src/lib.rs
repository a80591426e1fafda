mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Answer, Config, Corpus, DEFAULT_CHUNK_SIZE, DEFAULT_MODEL, DEFAULT_ORIGINAL_KEYWORD_BONUS,
	DEFAULT_SUBSTRING_WEIGHT, DEFAULT_TOP_K, DEFAULT_WHOLE_WORD_WEIGHT, Provider, Retrieval,
	RetrievalWeights, Service, default_pronouns, default_stop_words, default_synonyms,
};

use std::{env, fs, net::SocketAddr, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	resolve_api_key(&mut cfg.provider)?;

	validate(&cfg)?;

	Ok(cfg)
}

/// Fills `api_key` from the environment variable named by `api_key_env` when the file leaves it
/// empty.
pub fn resolve_api_key(provider: &mut Provider) -> Result<()> {
	if provider.api_key.is_some() {
		return Ok(());
	}

	match env::var(&provider.api_key_env) {
		Ok(value) if !value.trim().is_empty() => {
			provider.api_key = Some(value.trim().to_string());

			Ok(())
		},
		_ => Err(Error::MissingApiKey { env: provider.api_key_env.clone() }),
	}
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.parse::<SocketAddr>().is_err() {
		return Err(Error::Validation {
			message: "service.http_bind must be a socket address such as 127.0.0.1:5000."
				.to_string(),
		});
	}
	for origin in &cfg.service.cors_allowed_origins {
		if !is_valid_origin(origin) {
			return Err(Error::Validation {
				message: format!(
					"service.cors_allowed_origins entries must be http(s) origins, got {origin:?}."
				),
			});
		}
	}
	if cfg.corpus.chunk_size == 0 {
		return Err(Error::Validation {
			message: "corpus.chunk_size must be greater than zero.".to_string(),
		});
	}
	if cfg.retrieval.top_k == 0 {
		return Err(Error::Validation {
			message: "retrieval.top_k must be greater than zero.".to_string(),
		});
	}
	if cfg.retrieval.subject.is_empty() {
		return Err(Error::Validation {
			message: "retrieval.subject must be non-empty.".to_string(),
		});
	}
	if cfg.retrieval.weights.whole_word == 0 {
		return Err(Error::Validation {
			message: "retrieval.weights.whole_word must be greater than zero.".to_string(),
		});
	}

	for (label, words) in [
		("retrieval.pronouns", &cfg.retrieval.pronouns),
		("retrieval.stop_words", &cfg.retrieval.stop_words),
	] {
		if words.iter().any(|word| word.is_empty()) {
			return Err(Error::Validation {
				message: format!("{label} must not contain empty entries."),
			});
		}
	}

	for (key, synonyms) in &cfg.retrieval.synonyms {
		if key.is_empty() || synonyms.iter().any(|word| word.is_empty()) {
			return Err(Error::Validation {
				message: "retrieval.synonyms must not contain empty keys or entries.".to_string(),
			});
		}
	}

	for (label, value) in [
		("provider.api_base", &cfg.provider.api_base),
		("provider.model", &cfg.provider.model),
		("answer.persona", &cfg.answer.persona),
		("answer.out_of_scope_reply", &cfg.answer.out_of_scope_reply),
	] {
		if value.trim().is_empty() {
			return Err(Error::Validation { message: format!("{label} must be non-empty.") });
		}
	}

	if cfg.provider.api_key().is_empty() {
		return Err(Error::Validation {
			message: "provider.api_key must be non-empty.".to_string(),
		});
	}
	if cfg.provider.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "provider.timeout_ms must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

fn is_valid_origin(origin: &str) -> bool {
	let Some(host) = origin.strip_prefix("https://").or_else(|| origin.strip_prefix("http://"))
	else {
		return false;
	};

	!host.is_empty()
		&& !host.contains('/')
		&& origin.chars().all(|c| c.is_ascii_graphic())
}

fn normalize(cfg: &mut Config) {
	if cfg.provider.api_key.as_deref().map(|key| key.trim().is_empty()).unwrap_or(false) {
		cfg.provider.api_key = None;
	}

	cfg.provider.api_base = cfg.provider.api_base.trim().trim_end_matches('/').to_string();
	cfg.retrieval.subject = cfg.retrieval.subject.trim().to_lowercase();

	for word in cfg.retrieval.pronouns.iter_mut().chain(cfg.retrieval.stop_words.iter_mut()) {
		*word = word.trim().to_lowercase();
	}

	cfg.retrieval.synonyms = std::mem::take(&mut cfg.retrieval.synonyms)
		.into_iter()
		.map(|(key, synonyms)| {
			let synonyms = synonyms.into_iter().map(|word| word.trim().to_lowercase()).collect();

			(key.trim().to_lowercase(), synonyms)
		})
		.collect();
	cfg.service.cors_allowed_origins = std::mem::take(&mut cfg.service.cors_allowed_origins)
		.into_iter()
		.map(|origin| origin.trim().to_string())
		.filter(|origin| !origin.is_empty())
		.collect();
}
