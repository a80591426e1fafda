pub mod chat;
pub mod compose;
pub mod corpus;

mod error;

use std::{future::Future, pin::Pin, sync::Arc};

pub use chat::ChatOutcome;
pub use compose::{ComposeFailure, ComposeOutcome, PromptTemplate};
pub use corpus::KnowledgeBase;
pub use error::{Error, Result};

use vitae_config::Config;
use vitae_retrieval::Retriever;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Turns a fully built prompt into model text.
///
/// `Ok(None)` means the model answered without text.
pub trait AnswerProvider
where
	Self: Send + Sync,
{
	fn generate<'a>(
		&'a self,
		cfg: &'a vitae_config::Provider,
		prompt: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<Option<String>>>;
}

pub struct VitaeService {
	pub cfg: Config,
	pub knowledge: KnowledgeBase,
	pub retriever: Retriever,
	pub template: PromptTemplate,
	pub provider: Arc<dyn AnswerProvider>,
}
impl VitaeService {
	/// Loads the knowledge base from `corpus.data_dir` and talks to Gemini.
	pub fn new(cfg: Config) -> Result<Self> {
		let knowledge = KnowledgeBase::load(&cfg.corpus)?;

		Self::with_provider(cfg, knowledge, Arc::new(GeminiProvider))
	}

	pub fn with_provider(
		cfg: Config,
		knowledge: KnowledgeBase,
		provider: Arc<dyn AnswerProvider>,
	) -> Result<Self> {
		let retriever = Retriever::from_config(&cfg.retrieval)?;
		let template = PromptTemplate::from_config(&cfg.answer);

		tracing::info!(
			chunks = knowledge.chunks().len(),
			corpus_bytes = knowledge.corpus().len(),
			top_k = retriever.top_k(),
			"Knowledge base ready."
		);

		Ok(Self { cfg, knowledge, retriever, template, provider })
	}
}

struct GeminiProvider;
impl AnswerProvider for GeminiProvider {
	fn generate<'a>(
		&'a self,
		cfg: &'a vitae_config::Provider,
		prompt: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<Option<String>>> {
		Box::pin(vitae_providers::gemini::generate(cfg, prompt))
	}
}
