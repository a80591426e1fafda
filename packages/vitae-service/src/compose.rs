use crate::AnswerProvider;

pub const NO_RESPONSE_MESSAGE: &str = "No response from AI model.";
pub const UNAVAILABLE_MESSAGE: &str = "AI service is temporarily unavailable.";
pub const SERVER_ERROR_STATUS: u16 = 500;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ComposeOutcome {
	Answered(String),
	Failed(ComposeFailure),
}

/// A user-safe failure message with the HTTP status the caller should answer with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ComposeFailure {
	pub message: &'static str,
	pub status: u16,
}

/// Fixed instruction block wrapped around every question.
#[derive(Clone, Debug)]
pub struct PromptTemplate {
	persona: String,
	refusal: String,
}
impl PromptTemplate {
	pub fn new(persona: impl Into<String>, refusal: impl Into<String>) -> Self {
		Self { persona: persona.into(), refusal: refusal.into() }
	}

	pub fn from_config(cfg: &vitae_config::Answer) -> Self {
		Self::new(cfg.persona.trim(), cfg.out_of_scope_reply.trim())
	}

	pub fn build(&self, context: &str, question: &str) -> String {
		let Self { persona, refusal } = self;

		format!(
			"\
You are an AI assistant for {persona}'s portfolio website.

You must answer ONLY using the provided portfolio context.

Guidelines:
- If the question is unclear, interpret it as related to {persona}'s profile.
- Look for keywords in these categories:
  - Skills: frontend, React.js, Node.js, and similar technologies.
  - Experience: companies worked at and roles held.
  - Total experience: years of experience overall or per technology.
  - Contact: email, phone number, LinkedIn profile, portfolio link.
  - Projects: project name, description, technologies used, role.

Formatting:
- Use GitHub-flavored Markdown.
- Use bullet points (-) for lists such as skills or projects.
- Use paragraphs for explanations.
- Make links clickable with [text](url).
- Format an email address as [Email](mailto:someone@example.com).
- Format a phone number as [Call](tel:+911234567890).

If the answer is not found in the context, politely reply:
'{refusal}'

Context:
{context}

Question:
{question}

Answer:
"
		)
	}
}

/// Asks the model once and folds every failure into a fixed, user-safe message.
pub async fn compose(
	provider: &dyn AnswerProvider,
	cfg: &vitae_config::Provider,
	template: &PromptTemplate,
	question: &str,
	context: &str,
) -> ComposeOutcome {
	let prompt = template.build(context, question);

	match provider.generate(cfg, &prompt).await {
		Ok(Some(text)) if !text.trim().is_empty() => ComposeOutcome::Answered(text),
		Ok(_) => {
			tracing::warn!(model = %cfg.model, "Model returned no text.");

			ComposeOutcome::Failed(ComposeFailure {
				message: NO_RESPONSE_MESSAGE,
				status: SERVER_ERROR_STATUS,
			})
		},
		Err(err) => {
			tracing::error!(error = ?err, model = %cfg.model, "Model call failed.");

			ComposeOutcome::Failed(ComposeFailure {
				message: UNAVAILABLE_MESSAGE,
				status: SERVER_ERROR_STATUS,
			})
		},
	}
}
