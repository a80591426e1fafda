pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Failed to compile {what} pattern.")]
	Pattern { what: &'static str, source: regex::Error },
	#[error("Lexicon subject must contain at least one word.")]
	EmptySubject,
}
