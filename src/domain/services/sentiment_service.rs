// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use tracing::warn;

use crate::config::settings::LlmSettings;
use crate::domain::models::analysis::{Sentiment, SentimentDistribution};
use crate::domain::services::chat::ChatClient;
use crate::utils::errors::ChatError;

const SYSTEM_PROMPT: &str = "Eres un clasificador de sentimiento. Responde únicamente con una \
     de estas palabras: positivo, negativo o neutral.";

// The answer is a single word; a small completion budget keeps the
// classifier from elaborating.
const CLASSIFY_MAX_TOKENS: u32 = 8;

/// 情感分类服务
///
/// 逐条将推文送入语言模型后端，取回三个固定标签之一
pub struct SentimentService {
    chat: ChatClient,
}

impl SentimentService {
    pub fn new(settings: &LlmSettings) -> Self {
        Self {
            chat: ChatClient::new(settings),
        }
    }

    /// 对单条文本分类
    ///
    /// # 错误
    ///
    /// * 后端失败或回答无法解析为已知标签时返回错误
    pub async fn classify(&self, text: &str) -> Result<Sentiment, ChatError> {
        let user = format!("Clasifica el sentimiento del siguiente tweet:\n{text}");
        let answer = self
            .chat
            .complete(SYSTEM_PROMPT, &user, CLASSIFY_MAX_TOKENS)
            .await?;

        Sentiment::parse(&answer)
            .ok_or_else(|| ChatError::Decode(format!("unrecognized sentiment label: {answer}")))
    }

    /// 统计一组推文的情感分布
    ///
    /// 分类失败的条目计入`neutral`并记录日志，分布总数始终
    /// 等于输入条数
    pub async fn distribution(&self, texts: &[String]) -> SentimentDistribution {
        let mut distribution = SentimentDistribution::default();
        for text in texts {
            match self.classify(text).await {
                Ok(sentiment) => distribution.record(sentiment),
                Err(error) => {
                    warn!("sentiment classification failed, counting as neutral: {error}");
                    distribution.record(Sentiment::Neutral);
                }
            }
        }
        distribution
    }
}
