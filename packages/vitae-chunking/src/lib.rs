#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chunk {
	pub chunk_index: usize,
	/// Byte offset of the first character in the source text.
	pub start_offset: usize,
	/// Byte offset one past the last character in the source text.
	pub end_offset: usize,
	pub text: String,
}
impl AsRef<str> for Chunk {
	fn as_ref(&self) -> &str {
		&self.text
	}
}

/// Slices `text` into consecutive windows of `chunk_size` characters.
///
/// Windows never overlap and are not trimmed; the last one may be shorter. A `chunk_size` of zero
/// yields a single chunk holding the whole text.
pub fn split_text(text: &str, chunk_size: usize) -> Vec<Chunk> {
	if text.is_empty() {
		return Vec::new();
	}
	if chunk_size == 0 {
		tracing::warn!("Chunk size is zero; keeping the text as a single chunk.");

		return vec![Chunk {
			chunk_index: 0,
			start_offset: 0,
			end_offset: text.len(),
			text: text.to_string(),
		}];
	}

	let mut chunks = Vec::with_capacity(text.len() / chunk_size + 1);
	let mut start = 0_usize;
	let mut chars_in_window = 0_usize;

	for (idx, _) in text.char_indices() {
		if chars_in_window == chunk_size {
			chunks.push(Chunk {
				chunk_index: chunks.len(),
				start_offset: start,
				end_offset: idx,
				text: text[start..idx].to_string(),
			});

			start = idx;
			chars_in_window = 0;
		}

		chars_in_window += 1;
	}

	chunks.push(Chunk {
		chunk_index: chunks.len(),
		start_offset: start,
		end_offset: text.len(),
		text: text[start..].to_string(),
	});

	tracing::debug!(chunk_count = chunks.len(), chunk_size, "Split text into chunks.");

	chunks
}
