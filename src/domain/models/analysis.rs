// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 情感标签
///
/// 分类器只返回这三个固定标签之一
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positivo,
    Negativo,
    Neutral,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positivo => "positivo",
            Sentiment::Negativo => "negativo",
            Sentiment::Neutral => "neutral",
        }
    }

    /// 从分类器的自由文本回答中解析标签
    ///
    /// 容忍大小写、标点和围绕标签的客套话；无法识别时返回`None`
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.to_lowercase();
        if normalized.contains("positivo") {
            Some(Sentiment::Positivo)
        } else if normalized.contains("negativo") {
            Some(Sentiment::Negativo)
        } else if normalized.contains("neutral") {
            Some(Sentiment::Neutral)
        } else {
            None
        }
    }
}

/// 情感分布
///
/// 三个固定标签到计数的映射，序列化后即前端消费的
/// `sentiment_distribution`字段
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentDistribution {
    pub positivo: usize,
    pub negativo: usize,
    pub neutral: usize,
}

impl SentimentDistribution {
    pub fn record(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::Positivo => self.positivo += 1,
            Sentiment::Negativo => self.negativo += 1,
            Sentiment::Neutral => self.neutral += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.positivo + self.negativo + self.neutral
    }
}
