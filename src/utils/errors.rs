// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

/// 会话存储错误类型
///
/// 凭证文件缺失、不可读或格式损坏都会阻止会话引导，
/// 因此这些错误对请求是致命的
#[derive(Error, Debug)]
pub enum StorageError {
    /// 凭证文件不存在或不可读
    #[error("session file unavailable at {path}: {source}")]
    Unavailable {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 凭证文件不是有效的JSON
    #[error("session file at {path} is not valid credential data: {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// 会话引导错误类型
#[derive(Error, Debug)]
pub enum BootstrapError {
    /// 凭证加载失败
    #[error("session credentials unavailable: {0}")]
    Storage(#[from] StorageError),
    /// 浏览器启动失败
    #[error("browser launch failed: {0}")]
    Launch(String),
    /// 页面导航失败
    #[error("navigation failed: {0}")]
    Navigation(String),
    /// 凭证注入失败
    #[error("credential injection failed: {0}")]
    CookieInjection(String),
}

/// 语言模型后端错误类型
///
/// 摘要与情感分类共用同一后端；这些错误不致命，
/// 调用方以固定的降级结果继续处理请求
#[derive(Error, Debug)]
pub enum ChatError {
    /// API密钥未配置
    #[error("LLM API key not configured")]
    MissingApiKey,
    /// 请求发送失败
    #[error("request to LLM backend failed: {0}")]
    Request(#[from] reqwest::Error),
    /// 后端返回非成功状态码
    #[error("LLM backend returned {status}: {body}")]
    Backend { status: u16, body: String },
    /// 响应结构与期望模式不符
    #[error("unexpected response shape from LLM backend: {0}")]
    Decode(String),
}

/// 词云渲染错误类型
#[derive(Error, Debug)]
pub enum WordCloudError {
    /// 请求发送失败
    #[error("request to word cloud renderer failed: {0}")]
    Request(#[from] reqwest::Error),
    /// 渲染端返回非成功状态码
    #[error("word cloud renderer returned {0}")]
    Backend(u16),
}
