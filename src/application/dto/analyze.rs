// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::models::analysis::SentimentDistribution;

/// 分析请求体
///
/// 话题缺失或为空都是客户端错误；仅含空白的话题与原行为
/// 一致地被接受
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct AnalyzeRequestDto {
    #[validate(length(min = 1, message = "Topic cannot be empty"))]
    pub topic: Option<String>,
}

/// 分析响应体
///
/// 字段名即前端消费的线上格式；词云渲染失败时省略图像字段
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeResponseDto {
    pub tweets: Vec<String>,
    pub summary: String,
    pub sentiment_distribution: SentimentDistribution,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wordcloud_img: Option<String>,
}
