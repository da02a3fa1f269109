// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// 请求体缺失或不是有效JSON时的提示文案
pub const INVALID_BODY_MESSAGE: &str = "Solicitud inválida.";

/// 话题缺失或为空时的提示文案
pub const MISSING_TOPIC_MESSAGE: &str = "No se proporcionó un tópico para analizar.";

const INTERNAL_MESSAGE: &str = "Error interno del servidor.";

/// API错误类型
///
/// 错误负载保持前端约定的固定形状（`{"summary": ...}`）。
/// 内部错误的具体原因只进日志，从不随响应外泄
#[derive(Debug)]
pub enum ApiError {
    /// 客户端请求无效
    BadRequest(&'static str),
    /// 服务端内部错误
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE),
        };

        (status, Json(json!({ "summary": message }))).into_response()
    }
}
