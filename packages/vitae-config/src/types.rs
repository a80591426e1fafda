use std::collections::BTreeMap;

use serde::Deserialize;

/// Points for an expanded keyword found as a whole word.
pub const DEFAULT_WHOLE_WORD_WEIGHT: u32 = 3;
/// Points for an expanded keyword found only as a substring.
pub const DEFAULT_SUBSTRING_WEIGHT: u32 = 1;
/// Extra points for an original (pre-expansion) keyword found as a whole word.
pub const DEFAULT_ORIGINAL_KEYWORD_BONUS: u32 = 2;

pub const DEFAULT_CHUNK_SIZE: usize = 800;
pub const DEFAULT_TOP_K: u32 = 3;
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub corpus: Corpus,
	pub retrieval: Retrieval,
	pub provider: Provider,
	pub answer: Answer,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	#[serde(default = "default_log_level")]
	pub log_level: String,
	/// Empty means any origin may call the API.
	#[serde(default)]
	pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct Corpus {
	pub data_dir: std::path::PathBuf,
	#[serde(default = "default_chunk_size")]
	pub chunk_size: usize,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Retrieval {
	#[serde(default = "default_top_k")]
	pub top_k: u32,
	/// Lowercase name that pronouns resolve to.
	pub subject: String,
	#[serde(default = "default_pronouns")]
	pub pronouns: Vec<String>,
	#[serde(default = "default_stop_words")]
	pub stop_words: Vec<String>,
	#[serde(default = "default_synonyms")]
	pub synonyms: BTreeMap<String, Vec<String>>,
	#[serde(default)]
	pub weights: RetrievalWeights,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RetrievalWeights {
	pub whole_word: u32,
	pub substring: u32,
	pub original_keyword_bonus: u32,
}
impl Default for RetrievalWeights {
	fn default() -> Self {
		Self {
			whole_word: DEFAULT_WHOLE_WORD_WEIGHT,
			substring: DEFAULT_SUBSTRING_WEIGHT,
			original_keyword_bonus: DEFAULT_ORIGINAL_KEYWORD_BONUS,
		}
	}
}

#[derive(Debug, Deserialize)]
pub struct Provider {
	pub api_base: String,
	#[serde(default)]
	pub api_key: Option<String>,
	#[serde(default = "default_api_key_env")]
	pub api_key_env: String,
	#[serde(default = "default_model")]
	pub model: String,
	pub timeout_ms: u64,
}
impl Provider {
	/// Resolved key. Only meaningful after [`crate::load`] or [`crate::resolve_api_key`].
	pub fn api_key(&self) -> &str {
		self.api_key.as_deref().unwrap_or_default()
	}
}

#[derive(Debug, Deserialize)]
pub struct Answer {
	/// Full name of the profile owner, used in the instruction block.
	pub persona: String,
	pub out_of_scope_reply: String,
}

pub fn default_pronouns() -> Vec<String> {
	["he", "him", "his", "he's", "you", "your", "yourself"].map(String::from).to_vec()
}

pub fn default_stop_words() -> Vec<String> {
	[
		"what", "where", "when", "why", "how", "which", "who", "whose", "can", "could", "would",
		"should", "is", "are", "do", "does", "did", "have", "has", "the", "a", "an", "and", "or",
		"but", "?",
	]
	.map(String::from)
	.to_vec()
}

pub fn default_synonyms() -> BTreeMap<String, Vec<String>> {
	let table: [(&str, &[&str]); 10] = [
		("experience", &["worked", "years", "expertise", "skilled", "proficiency"]),
		("react", &["react.js", "reactjs"]),
		("node", &["node.js", "nodejs"]),
		("skill", &["skills", "expertise", "proficiency", "experience"]),
		("project", &["projects", "work", "assignment", "developed"]),
		("company", &["companies", "organization", "firm"]),
		("live", &["located", "location", "place", "city", "country"]),
		("backend", &["server", "api", "backend development"]),
		("frontend", &["ui", "client", "frontend", "interface"]),
		("full", &["fullstack", "full-stack", "stack"]),
	];

	table
		.into_iter()
		.map(|(key, synonyms)| {
			(key.to_string(), synonyms.iter().map(|word| word.to_string()).collect())
		})
		.collect()
}

fn default_log_level() -> String {
	"info".to_string()
}

fn default_chunk_size() -> usize {
	DEFAULT_CHUNK_SIZE
}

fn default_top_k() -> u32 {
	DEFAULT_TOP_K
}

fn default_api_key_env() -> String {
	"GEMINI_API_KEY".to_string()
}

fn default_model() -> String {
	DEFAULT_MODEL.to_string()
}
