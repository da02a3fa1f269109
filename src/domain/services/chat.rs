// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

use crate::config::settings::LlmSettings;
use crate::utils::errors::ChatError;

/// chat-completions请求体
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub stream: bool,
    pub max_completion_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// chat-completions响应模式
///
/// 单一解码步骤：响应整体按此模式反序列化，任何结构不符
/// 都作为`ChatError::Decode`失败，而不是逐字段探测
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
pub struct AssistantMessage {
    pub content: String,
}

/// 语言模型后端客户端
///
/// 面向OpenAI兼容的chat-completions服务（原部署使用Cerebras）。
/// 摘要与情感分类服务共享同一客户端配置
pub struct ChatClient {
    http: reqwest::Client,
    api_key: Option<String>,
    model: String,
    api_base_url: String,
    temperature: f32,
}

impl ChatClient {
    pub fn new(settings: &LlmSettings) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            api_base_url: settings.api_base_url.clone(),
            temperature: settings.temperature,
        }
    }

    /// 发起一次补全请求并返回助手消息正文
    ///
    /// # 参数
    ///
    /// * `system` - 系统提示词
    /// * `user` - 用户消息
    /// * `max_completion_tokens` - 完成令牌上限
    ///
    /// # 错误
    ///
    /// * 密钥未配置、传输失败、非成功状态码或响应结构不符时返回错误
    pub async fn complete(
        &self,
        system: &str,
        user: &str,
        max_completion_tokens: u32,
    ) -> Result<String, ChatError> {
        let api_key = self.api_key.as_ref().ok_or(ChatError::MissingApiKey)?;

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user.to_string(),
                },
            ],
            stream: false,
            max_completion_tokens,
            temperature: self.temperature,
            top_p: 1.0,
        };

        let url = format!("{}/chat/completions", self.api_base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::Backend {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let decoded: ChatResponse =
            serde_json::from_str(&body).map_err(|e| ChatError::Decode(e.to_string()))?;

        let content = decoded
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ChatError::Decode("response contained no choices".to_string()))?;

        Ok(content.trim().to_string())
    }
}
