// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use tracing::{error, warn};

use crate::config::settings::LlmSettings;
use crate::domain::services::chat::ChatClient;

/// 输入为空时返回的固定回退文案
pub const EMPTY_FALLBACK: &str = "No se encontraron tweets para resumir.";

/// 后端失败时返回的固定回退文案
pub const FAILURE_FALLBACK: &str = "Error al generar el resumen.";

const SYSTEM_PROMPT: &str = "Eres un asistente que resume textos de Tweets en un tono neutral, \
     generando un resumen cohesivo en párrafos que describa el contexto general.";

/// 摘要生成服务
///
/// 将采集到的推文合并后请求语言模型后端生成中立的多段摘要。
/// 该服务从不失败：空输入与后端错误都以固定文案降级，
/// 请求照常完成
pub struct SummaryService {
    chat: ChatClient,
    max_completion_tokens: u32,
}

impl SummaryService {
    pub fn new(settings: &LlmSettings) -> Self {
        Self {
            chat: ChatClient::new(settings),
            max_completion_tokens: settings.max_completion_tokens,
        }
    }

    /// 生成摘要
    ///
    /// # 参数
    ///
    /// * `texts` - 采集到的推文文本，按发现顺序
    ///
    /// # 返回值
    ///
    /// 摘要字符串；输入为空或后端失败时为对应的固定回退文案
    pub async fn summarize(&self, texts: &[String]) -> String {
        if texts.is_empty() {
            warn!("no tweets provided for summarization");
            return EMPTY_FALLBACK.to_string();
        }

        let combined = texts.join("\n");
        let user = format!(
            "Resume los siguientes tweets de manera clara y neutral, \
             generando varios párrafos que describan el contexto general:\n{combined}"
        );

        match self
            .chat
            .complete(SYSTEM_PROMPT, &user, self.max_completion_tokens)
            .await
        {
            Ok(summary) => summary,
            Err(error) => {
                error!("summary generation failed: {error}");
                FAILURE_FALLBACK.to_string()
            }
        }
    }
}
