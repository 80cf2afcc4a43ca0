//! 问答 handler
//!
//! - POST /api/chat - 自然语言问句，返回结构化结果
//!
//! 请求体可带 `system` 提示；问句未点名系统时以提示为准。
//! 无法识别的问句返回 `kind = unknown`，不作为错误处理。

use crate::AppState;
use crate::utils::response::chat_answer_to_dto;
use crate::utils::{normalize_message, parse_optional_system, within_deadline};
use api_contract::{ApiResponse, ChatRequest};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::info;

pub async fn chat(State(state): State<AppState>, Json(payload): Json<ChatRequest>) -> Response {
    let message = match normalize_message(payload.message) {
        Ok(message) => message,
        Err(response) => return response,
    };
    let hint = match parse_optional_system(payload.system.as_deref()) {
        Ok(hint) => hint,
        Err(response) => return response,
    };
    info!(message = %message, hint = ?hint, "chat question");
    let answer = match within_deadline(&state, "chat", state.chat.answer(&message, hint)).await {
        Ok(answer) => answer,
        Err(response) => return response,
    };
    (
        StatusCode::OK,
        Json(ApiResponse::success(chat_answer_to_dto(answer))),
    )
        .into_response()
}
