use crate::{query::QueryTerms, scoring::ScoredChunk};

/// One way of deciding which scored chunks are worth returning.
///
/// Admitted chunks are always ordered by descending score with ties kept in input order, then
/// truncated to `top_k`; passes only differ in which chunks they admit.
pub trait RankingPass
where
	Self: Send + Sync,
{
	fn name(&self) -> &'static str;

	/// `text` is the lowercase chunk text.
	fn admits(&self, scored: &ScoredChunk, text: &str, terms: &QueryTerms) -> bool;

	fn rank(
		&self,
		scored: &[ScoredChunk],
		texts: &[String],
		terms: &QueryTerms,
		top_k: usize,
	) -> Vec<ScoredChunk> {
		let mut admitted: Vec<ScoredChunk> = scored
			.iter()
			.filter(|item| self.admits(item, &texts[item.index], terms))
			.copied()
			.collect();

		// `sort_by` is stable, which keeps equal scores in document order.
		admitted.sort_by(|a, b| b.score.cmp(&a.score));
		admitted.truncate(top_k);

		admitted
	}
}

/// Admits chunks with a positive score.
///
/// When the question names a topic besides the subject, the score must come partly from that
/// topic; a chunk that only mentions the subject's name is not relevant.
#[derive(Clone, Copy, Debug, Default)]
pub struct StrictPass;
impl RankingPass for StrictPass {
	fn name(&self) -> &'static str {
		"strict"
	}

	fn admits(&self, scored: &ScoredChunk, _text: &str, terms: &QueryTerms) -> bool {
		if terms.has_topic { scored.topic_score > 0 } else { scored.score > 0 }
	}
}

/// Admits chunks containing any original keyword as a plain substring, the subject's name
/// included.
///
/// Only consulted when [`StrictPass`] admits nothing, so questions like "introduce yourself" still
/// reach the profile through the subject's name.
#[derive(Clone, Copy, Debug, Default)]
pub struct BroadPass;
impl RankingPass for BroadPass {
	fn name(&self) -> &'static str {
		"broad"
	}

	fn admits(&self, _scored: &ScoredChunk, text: &str, terms: &QueryTerms) -> bool {
		terms.original.iter().any(|word| text.contains(word.as_str()))
	}
}
