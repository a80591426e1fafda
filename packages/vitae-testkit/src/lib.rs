//! Answer provider doubles and config builders shared by integration tests.

use std::{
	path::PathBuf,
	sync::{
		Arc, Mutex,
		atomic::{AtomicUsize, Ordering},
	},
};

use color_eyre::eyre;

use vitae_config::{
	Answer, Config, Corpus, DEFAULT_CHUNK_SIZE, DEFAULT_MODEL, DEFAULT_TOP_K, Provider, Retrieval,
	RetrievalWeights, Service,
};
use vitae_service::{AnswerProvider, BoxFuture};

pub const SUBJECT: &str = "aman";
pub const PERSONA: &str = "Aman Verma";
pub const OUT_OF_SCOPE_REPLY: &str = "I'm sorry, but I can only answer questions related to Aman Verma’s professional experience, skills, and projects.";

/// Records every prompt and answers with a fixed reply.
#[derive(Clone)]
pub struct SpyProvider {
	calls: Arc<AtomicUsize>,
	prompts: Arc<Mutex<Vec<String>>>,
	reply: String,
}
impl SpyProvider {
	pub fn new(reply: impl Into<String>) -> Self {
		Self {
			calls: Arc::new(AtomicUsize::new(0)),
			prompts: Arc::new(Mutex::new(Vec::new())),
			reply: reply.into(),
		}
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}

	pub fn prompts(&self) -> Vec<String> {
		self.prompts.lock().unwrap_or_else(|err| err.into_inner()).clone()
	}
}
impl AnswerProvider for SpyProvider {
	fn generate<'a>(
		&'a self,
		_cfg: &'a Provider,
		prompt: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<Option<String>>> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		self.prompts.lock().unwrap_or_else(|err| err.into_inner()).push(prompt.to_string());

		let reply = self.reply.clone();

		Box::pin(async move { Ok(Some(reply)) })
	}
}

/// Fails every call with an upstream-looking error.
#[derive(Clone, Default)]
pub struct FailingProvider {
	calls: Arc<AtomicUsize>,
}
impl FailingProvider {
	pub const ERROR: &'static str = "upstream returned 503: secret-internal-detail";

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}
impl AnswerProvider for FailingProvider {
	fn generate<'a>(
		&'a self,
		_cfg: &'a Provider,
		_prompt: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<Option<String>>> {
		self.calls.fetch_add(1, Ordering::SeqCst);

		Box::pin(async { Err(eyre::eyre!(Self::ERROR)) })
	}
}

/// Answers with the configured text, which may be `None` or blank.
#[derive(Clone, Default)]
pub struct EmptyProvider {
	reply: Option<String>,
}
impl EmptyProvider {
	pub fn blank() -> Self {
		Self { reply: Some("  \n ".to_string()) }
	}
}
impl AnswerProvider for EmptyProvider {
	fn generate<'a>(
		&'a self,
		_cfg: &'a Provider,
		_prompt: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<Option<String>>> {
		let reply = self.reply.clone();

		Box::pin(async move { Ok(reply) })
	}
}

/// A valid config that never reaches the network or the filesystem on its own.
pub fn test_config(data_dir: PathBuf) -> Config {
	Config {
		service: Service {
			http_bind: "127.0.0.1:0".to_string(),
			log_level: "info".to_string(),
			cors_allowed_origins: Vec::new(),
		},
		corpus: Corpus { data_dir, chunk_size: DEFAULT_CHUNK_SIZE },
		retrieval: Retrieval {
			top_k: DEFAULT_TOP_K,
			subject: SUBJECT.to_string(),
			pronouns: vitae_config::default_pronouns(),
			stop_words: vitae_config::default_stop_words(),
			synonyms: vitae_config::default_synonyms(),
			weights: RetrievalWeights::default(),
		},
		provider: Provider {
			api_base: "http://127.0.0.1:9".to_string(),
			api_key: Some("test-key".to_string()),
			api_key_env: "VITAE_TESTKIT_UNUSED_KEY".to_string(),
			model: DEFAULT_MODEL.to_string(),
			timeout_ms: 1_000,
		},
		answer: Answer {
			persona: PERSONA.to_string(),
			out_of_scope_reply: OUT_OF_SCOPE_REPLY.to_string(),
		},
	}
}
