pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Failed to read knowledge base at {path:?}.")]
	ReadCorpus { path: std::path::PathBuf, source: std::io::Error },
	#[error("Knowledge base file name {path:?} is not valid UTF-8.")]
	InvalidFileName { path: std::path::PathBuf },
	#[error(transparent)]
	Retrieval(#[from] vitae_retrieval::Error),
}
