use crate::{ComposeOutcome, Result, VitaeService, compose};

pub const CONTEXT_SEPARATOR: &str = "\n\n";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChatOutcome {
	/// No chunk matched; the provider was not called.
	OutOfScope { reply: String },
	Answered { reply: String },
	Failed { message: &'static str, status: u16 },
}

impl VitaeService {
	/// Answers one question against the knowledge base.
	///
	/// `message` must already be validated as a non-empty string by the caller.
	pub async fn chat(&self, message: &str) -> Result<ChatOutcome> {
		let chunks = self.retriever.retrieve(message, self.knowledge.chunks())?;

		if chunks.is_empty() {
			tracing::info!("No relevant chunk; replying out of scope.");

			return Ok(ChatOutcome::OutOfScope { reply: self.cfg.answer.out_of_scope_reply.clone() });
		}

		let context = chunks.join(CONTEXT_SEPARATOR);

		tracing::debug!(chunks = chunks.len(), context_len = context.len(), "Composing answer.");

		let outcome = compose::compose(
			self.provider.as_ref(),
			&self.cfg.provider,
			&self.template,
			message,
			&context,
		)
		.await;

		Ok(match outcome {
			ComposeOutcome::Answered(reply) => ChatOutcome::Answered { reply },
			ComposeOutcome::Failed(failure) => {
				ChatOutcome::Failed { message: failure.message, status: failure.status }
			},
		})
	}
}
