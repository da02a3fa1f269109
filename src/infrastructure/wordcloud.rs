// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde_json::json;
use tracing::warn;

use crate::config::settings::WordCloudSettings;
use crate::utils::errors::WordCloudError;
use crate::utils::text;

/// 词云渲染客户端
///
/// 外部渲染端接收纯文本、返回PNG字节（QuickChart风格接口）。
/// 渲染失败不影响请求：记录日志并省略图像字段
pub struct WordCloudRenderer {
    http: reqwest::Client,
    api_url: String,
    width: u32,
    height: u32,
}

impl WordCloudRenderer {
    pub fn new(settings: &WordCloudSettings) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: settings.api_url.clone(),
            width: settings.width,
            height: settings.height,
        }
    }

    /// 渲染词云
    ///
    /// # 参数
    ///
    /// * `texts` - 采集到的推文文本
    ///
    /// # 返回值
    ///
    /// base64编码的PNG；语料为空或渲染失败时为`None`
    pub async fn render(&self, texts: &[String]) -> Option<String> {
        let corpus = text::cleaned_corpus(texts);
        if corpus.is_empty() {
            return None;
        }

        match self.request_png(&corpus).await {
            Ok(bytes) => Some(BASE64.encode(bytes)),
            Err(error) => {
                warn!("word cloud rendering failed, omitting image: {error}");
                None
            }
        }
    }

    async fn request_png(&self, corpus: &str) -> Result<Vec<u8>, WordCloudError> {
        let body = json!({
            "format": "png",
            "width": self.width,
            "height": self.height,
            "removeStopwords": true,
            "language": "es",
            "text": corpus,
        });

        let response = self.http.post(&self.api_url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WordCloudError::Backend(status.as_u16()));
        }

        Ok(response.bytes().await?.to_vec())
    }
}
