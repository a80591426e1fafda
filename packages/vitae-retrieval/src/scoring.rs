use regex::Regex;

use crate::{Error, Result, lexicon::Lexicon, query::QueryTerms};
use vitae_config::RetrievalWeights;

/// A chunk's position in the input sequence together with its relevance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoredChunk {
	pub index: usize,
	pub score: u32,
	/// Portion of `score` earned by terms other than the subject's name.
	pub topic_score: u32,
}

#[derive(Debug)]
struct TermMatcher {
	term: String,
	whole_word: Regex,
	is_subject: bool,
	is_original: bool,
}

/// Compiled matchers for one query.
#[derive(Debug)]
pub struct Scorer {
	matchers: Vec<TermMatcher>,
	weights: RetrievalWeights,
}
impl Scorer {
	pub fn new(terms: &QueryTerms, lexicon: &Lexicon) -> Result<Self> {
		let mut matchers = Vec::with_capacity(terms.expanded.len());

		for term in &terms.expanded {
			// Word boundaries are ASCII-only: a non-ASCII letter ends a word.
			let whole_word = Regex::new(&format!(r"(?-u:\b){}(?-u:\b)", regex::escape(term)))
				.map_err(|source| Error::Pattern { what: "keyword", source })?;

			matchers.push(TermMatcher {
				term: term.clone(),
				whole_word,
				is_subject: lexicon.is_subject_term(term),
				is_original: terms.original.contains(term),
			});
		}

		Ok(Self { matchers, weights: lexicon.weights() })
	}

	/// Scores `text`, which must already be lowercase.
	///
	/// Every expanded keyword adds the whole-word weight, or the substring weight when it only
	/// appears inside a longer word. Original keywords found as whole words add the bonus on top,
	/// once per occurrence in the question.
	pub fn score(&self, index: usize, text: &str, terms: &QueryTerms) -> ScoredChunk {
		let mut score = 0_u32;
		let mut topic_score = 0_u32;

		for matcher in &self.matchers {
			let whole = matcher.whole_word.is_match(text);
			let mut points = if whole {
				self.weights.whole_word
			} else if text.contains(matcher.term.as_str()) {
				self.weights.substring
			} else {
				0
			};

			if whole && matcher.is_original {
				let occurrences = terms.original.iter().filter(|word| **word == matcher.term).count();

				points += self.weights.original_keyword_bonus * occurrences as u32;
			}

			score += points;

			if !matcher.is_subject {
				topic_score += points;
			}
		}

		ScoredChunk { index, score, topic_score }
	}
}
