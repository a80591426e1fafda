use std::{
	fs,
	path::{Path, PathBuf},
};

use vitae_chunking::Chunk;

use crate::{Error, Result};

/// The concatenated knowledge base and its chunks, built once at startup.
#[derive(Debug)]
pub struct KnowledgeBase {
	corpus: String,
	chunks: Vec<Chunk>,
}
impl KnowledgeBase {
	pub fn load(cfg: &vitae_config::Corpus) -> Result<Self> {
		let corpus = load_documents(&cfg.data_dir)?;

		Ok(Self::from_corpus(corpus, cfg.chunk_size))
	}

	pub fn from_corpus(corpus: String, chunk_size: usize) -> Self {
		let chunks = vitae_chunking::split_text(&corpus, chunk_size);

		if chunks.is_empty() {
			tracing::warn!("Knowledge base is empty; every question will be out of scope.");
		}

		Self { corpus, chunks }
	}

	pub fn corpus(&self) -> &str {
		&self.corpus
	}

	pub fn chunks(&self) -> &[Chunk] {
		&self.chunks
	}
}

/// Reads every regular file in `dir`, sorted by file name, into one string.
///
/// Each file contributes a blank line, a `Source: <file name>` marker line, then its content.
pub fn load_documents(dir: &Path) -> Result<String> {
	let mut files: Vec<PathBuf> = Vec::new();

	for entry in fs::read_dir(dir).map_err(read_error(dir))? {
		let entry = entry.map_err(read_error(dir))?;
		let path = entry.path();

		if fs::metadata(&path).map_err(read_error(&path))?.is_file() {
			files.push(path);
		}
	}

	files.sort();

	let mut combined = String::new();

	for path in &files {
		let name = path
			.file_name()
			.and_then(|name| name.to_str())
			.ok_or_else(|| Error::InvalidFileName { path: path.clone() })?;
		let content = fs::read_to_string(path).map_err(read_error(path))?;

		combined.push_str("\n\nSource: ");
		combined.push_str(name);
		combined.push('\n');
		combined.push_str(&content);
	}

	tracing::info!(
		dir = %dir.display(),
		files = files.len(),
		chars = combined.chars().count(),
		"Loaded knowledge base documents."
	);

	Ok(combined)
}

fn read_error(path: &Path) -> impl FnOnce(std::io::Error) -> Error {
	let path = path.to_path_buf();

	move |source| Error::ReadCorpus { path, source }
}
