// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::header,
    response::{Html, IntoResponse},
    routing::{get, post},
    Router,
};

use crate::engines::traits::TweetProvider;
use crate::presentation::handlers::analyze_handler;

/// 创建应用路由
///
/// 泛型参数决定处理器使用的推文来源实现；服务与来源实例
/// 由调用方通过`Extension`层附加
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes<TP>() -> Router
where
    TP: TweetProvider + 'static,
{
    Router::new()
        .route("/", get(index))
        .route("/static/js/scripts.js", get(frontend_script))
        .route("/health", get(health_check))
        .route("/v1/version", get(version))
        .route("/analyze", post(analyze_handler::analyze::<TP>))
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// 前端页面
async fn index() -> Html<&'static str> {
    Html(include_str!("../../../static/index.html"))
}

/// 前端脚本
async fn frontend_script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        include_str!("../../../static/js/scripts.js"),
    )
}
