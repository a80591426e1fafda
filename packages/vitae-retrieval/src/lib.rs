//! Lexical retrieval over a fixed list of profile chunks.
//!
//! A question is lowercased, its pronouns are resolved to the profile subject, stop words are
//! dropped, and the remaining keywords are expanded one level through a synonym table. Chunks are
//! scored against those keywords and ranked by a strict pass; a broad substring pass runs only
//! when the strict pass admits nothing.

mod error;
mod lexicon;
mod pass;
mod query;
mod scoring;

pub use error::{Error, Result};
pub use lexicon::Lexicon;
pub use pass::{BroadPass, RankingPass, StrictPass};
pub use query::QueryTerms;
pub use scoring::{ScoredChunk, Scorer};

/// Outcome of one retrieval call, kept for logging and tests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ranked {
	/// Name of the pass that produced `chunks`, `None` when nothing was admitted.
	pub pass: Option<&'static str>,
	pub chunks: Vec<ScoredChunk>,
}

pub struct Retriever {
	lexicon: Lexicon,
	passes: Vec<Box<dyn RankingPass>>,
	top_k: usize,
}
impl Retriever {
	pub fn new(lexicon: Lexicon, top_k: usize) -> Self {
		let passes: Vec<Box<dyn RankingPass>> = vec![Box::new(StrictPass), Box::new(BroadPass)];

		Self { lexicon, passes, top_k }
	}

	pub fn from_config(cfg: &vitae_config::Retrieval) -> Result<Self> {
		Ok(Self::new(Lexicon::from_config(cfg)?, cfg.top_k as usize))
	}

	pub fn top_k(&self) -> usize {
		self.top_k
	}

	/// Returns up to `top_k` relevant chunk texts, best first.
	pub fn retrieve<'c, T>(&self, question: &str, chunks: &'c [T]) -> Result<Vec<&'c str>>
	where
		T: AsRef<str>,
	{
		let ranked = self.rank(question, chunks)?;

		Ok(ranked.chunks.iter().map(|item| chunks[item.index].as_ref()).collect())
	}

	/// Scores every chunk and applies the passes in order until one admits something.
	pub fn rank<T>(&self, question: &str, chunks: &[T]) -> Result<Ranked>
	where
		T: AsRef<str>,
	{
		let terms = QueryTerms::parse(question, &self.lexicon);

		if terms.is_empty() || chunks.is_empty() || self.top_k == 0 {
			tracing::debug!(keywords = terms.original.len(), "Nothing to retrieve.");

			return Ok(Ranked { pass: None, chunks: Vec::new() });
		}

		let scorer = Scorer::new(&terms, &self.lexicon)?;
		let texts: Vec<String> = chunks.iter().map(|chunk| chunk.as_ref().to_lowercase()).collect();
		let scored: Vec<ScoredChunk> = texts
			.iter()
			.enumerate()
			.map(|(index, text)| scorer.score(index, text, &terms))
			.collect();

		for pass in &self.passes {
			let admitted = pass.rank(&scored, &texts, &terms, self.top_k);

			if !admitted.is_empty() {
				tracing::debug!(
					pass = pass.name(),
					keywords = ?terms.original,
					expanded = terms.expanded.len(),
					selected = admitted.len(),
					top_score = admitted[0].score,
					"Retrieved chunks."
				);

				return Ok(Ranked { pass: Some(pass.name()), chunks: admitted });
			}
		}

		tracing::debug!(keywords = ?terms.original, "No chunk matched the question.");

		Ok(Ranked { pass: None, chunks: Vec::new() })
	}
}
