use std::collections::{BTreeMap, HashMap, HashSet};

use regex::Regex;

use crate::{Error, Result, query::tokenize};
use vitae_config::RetrievalWeights;

/// Immutable lookup tables the retriever consults: pronouns, stop words, synonyms, and weights.
///
/// Built once from configuration and shared by every request.
#[derive(Debug)]
pub struct Lexicon {
	subject: String,
	subject_terms: HashSet<String>,
	pronouns: Option<Regex>,
	stop_words: HashSet<String>,
	synonyms: HashMap<String, Vec<String>>,
	weights: RetrievalWeights,
}
impl Lexicon {
	pub fn new(
		subject: &str,
		pronouns: &[String],
		stop_words: &[String],
		synonyms: &BTreeMap<String, Vec<String>>,
		weights: RetrievalWeights,
	) -> Result<Self> {
		let subject = subject.trim().to_lowercase();
		let subject_terms: HashSet<String> = tokenize(&subject).map(str::to_string).collect();

		if subject_terms.is_empty() {
			return Err(Error::EmptySubject);
		}

		Ok(Self {
			subject,
			subject_terms,
			pronouns: pronoun_pattern(pronouns)?,
			stop_words: stop_words.iter().map(|word| word.to_lowercase()).collect(),
			synonyms: synonyms
				.iter()
				.map(|(key, words)| {
					(key.to_lowercase(), words.iter().map(|word| word.to_lowercase()).collect())
				})
				.collect(),
			weights,
		})
	}

	pub fn from_config(cfg: &vitae_config::Retrieval) -> Result<Self> {
		Self::new(&cfg.subject, &cfg.pronouns, &cfg.stop_words, &cfg.synonyms, cfg.weights)
	}

	pub fn weights(&self) -> RetrievalWeights {
		self.weights
	}

	/// Replaces every whole-word pronoun in `text` with the subject name.
	pub fn resolve_pronouns(&self, text: &str) -> String {
		match &self.pronouns {
			Some(pattern) => pattern.replace_all(text, self.subject.as_str()).into_owned(),
			None => text.to_string(),
		}
	}

	pub fn is_stop_word(&self, word: &str) -> bool {
		self.stop_words.contains(word)
	}

	/// True when `term` is one of the words of the subject's name.
	pub fn is_subject_term(&self, term: &str) -> bool {
		self.subject_terms.contains(term)
	}

	pub fn synonyms_of(&self, word: &str) -> &[String] {
		self.synonyms.get(word).map(Vec::as_slice).unwrap_or_default()
	}
}

fn pronoun_pattern(pronouns: &[String]) -> Result<Option<Regex>> {
	let mut words: Vec<String> = pronouns
		.iter()
		.map(|word| word.trim().to_lowercase())
		.filter(|word| !word.is_empty())
		.collect();

	if words.is_empty() {
		return Ok(None);
	}

	// Longest first so "yourself" wins over "your".
	words.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
	words.dedup();

	let alternation = words.iter().map(|word| regex::escape(word)).collect::<Vec<_>>().join("|");

	Regex::new(&format!(r"(?-u:\b)(?:{alternation})(?-u:\b)"))
		.map(Some)
		.map_err(|source| Error::Pattern { what: "pronoun", source })
}
