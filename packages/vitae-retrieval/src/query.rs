use std::collections::HashSet;

use crate::lexicon::Lexicon;

/// Keywords extracted from one question.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryTerms {
	/// Keywords left after pronoun resolution and stop-word removal, in question order.
	pub original: Vec<String>,
	/// `original` plus one level of synonyms, deduplicated, first-seen order.
	pub expanded: Vec<String>,
	/// Whether any original keyword is something other than the subject's name.
	pub has_topic: bool,
}
impl QueryTerms {
	pub fn parse(question: &str, lexicon: &Lexicon) -> Self {
		let resolved = lexicon.resolve_pronouns(&question.to_lowercase());
		let original: Vec<String> = tokenize(&resolved)
			.filter(|word| !lexicon.is_stop_word(word))
			.map(str::to_string)
			.collect();
		let mut seen = HashSet::new();
		let mut expanded = Vec::new();

		for keyword in &original {
			for term in std::iter::once(keyword).chain(lexicon.synonyms_of(keyword)) {
				if seen.insert(term.as_str()) {
					expanded.push(term.clone());
				}
			}
		}

		let has_topic = original.iter().any(|word| !lexicon.is_subject_term(word));

		Self { original, expanded, has_topic }
	}

	pub fn is_empty(&self) -> bool {
		self.original.is_empty()
	}
}

/// Splits on whitespace and the sentence punctuation `? . , !`.
pub(crate) fn tokenize(text: &str) -> impl Iterator<Item = &str> {
	text.split(|ch: char| ch.is_whitespace() || matches!(ch, '?' | '.' | ',' | '!'))
		.filter(|token| !token.is_empty())
}
