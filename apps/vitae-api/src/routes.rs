use std::any::Any;

use axum::{
	Json, Router,
	extract::{State, rejection::JsonRejection},
	http::{HeaderValue, Method, StatusCode, header},
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::Serialize;
use serde_json::Value;
use tower_http::{
	catch_panic::CatchPanicLayer,
	cors::{Any as AnyOrigin, CorsLayer},
	trace::TraceLayer,
};
use tracing::Instrument;
use uuid::Uuid;

use vitae_service::ChatOutcome;

use crate::state::AppState;

pub const INVALID_MESSAGE: &str = "Message is required and must be a string.";
pub const INTERNAL_ERROR: &str = "Internal server error.";

#[derive(Debug, Serialize)]
struct ChatBody {
	success: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	reply: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	error: Option<String>,
}
impl ChatBody {
	fn reply(reply: String) -> Self {
		Self { success: true, reply: Some(reply), error: None }
	}

	fn error(message: impl Into<String>) -> Self {
		Self { success: false, reply: None, error: Some(message.into()) }
	}
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	message: String,
}
impl ApiError {
	fn new(status: StatusCode, message: impl Into<String>) -> Self {
		Self { status, message: message.into() }
	}

	fn invalid_message() -> Self {
		Self::new(StatusCode::BAD_REQUEST, INVALID_MESSAGE)
	}

	fn internal() -> Self {
		Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR)
	}
}

impl From<vitae_service::Error> for ApiError {
	fn from(err: vitae_service::Error) -> Self {
		tracing::error!(error = %err, "Chat request failed.");

		Self::internal()
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		(self.status, Json(ChatBody::error(self.message))).into_response()
	}
}

pub fn router(state: AppState) -> Router {
	let cors = cors_layer(&state.service.cfg.service.cors_allowed_origins);

	Router::new()
		.route("/health", get(health))
		.route("/chat", post(chat))
		.layer(CatchPanicLayer::custom(panic_response))
		.layer(TraceLayer::new_for_http())
		.layer(cors)
		.with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
	let cors = CorsLayer::new()
		.allow_methods([Method::GET, Method::POST, Method::OPTIONS])
		.allow_headers([header::CONTENT_TYPE]);

	if origins.is_empty() {
		return cors.allow_origin(AnyOrigin);
	}

	let origins: Vec<HeaderValue> = origins
		.iter()
		.filter_map(|origin| match origin.parse::<HeaderValue>() {
			Ok(value) => Some(value),
			Err(err) => {
				tracing::warn!(%origin, error = %err, "Skipping unusable CORS origin.");

				None
			},
		})
		.collect();

	// Allows no origin when every entry was skipped.
	cors.allow_origin(origins)
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
	let detail = err
		.downcast_ref::<String>()
		.map(String::as_str)
		.or_else(|| err.downcast_ref::<&str>().copied())
		.unwrap_or("unknown panic");

	tracing::error!(panic = detail, "Request handler panicked.");

	ApiError::internal().into_response()
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn chat(
	State(state): State<AppState>,
	payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ChatBody>, ApiError> {
	let request_id = Uuid::new_v4();
	let span = tracing::info_span!("chat", %request_id);

	async move {
		let message = extract_message(payload)?;
		let outcome = state.service.chat(&message).await?;

		match outcome {
			ChatOutcome::OutOfScope { reply } | ChatOutcome::Answered { reply } => {
				Ok(Json(ChatBody::reply(reply)))
			},
			ChatOutcome::Failed { message, status } => Err(ApiError::new(
				StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
				message,
			)),
		}
	}
	.instrument(span)
	.await
}

/// Accepts only a JSON object whose `message` is a non-empty string.
fn extract_message(payload: Result<Json<Value>, JsonRejection>) -> Result<String, ApiError> {
	let Json(body) = payload.map_err(|err| {
		tracing::debug!(error = %err, "Rejected chat body.");

		ApiError::invalid_message()
	})?;

	match body.get("message") {
		Some(Value::String(message)) if !message.is_empty() => Ok(message.clone()),
		_ => Err(ApiError::invalid_message()),
	}
}
