// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::time::Duration;

use chromiumoxide::error::CdpError;
use tracing::{debug, warn};
use url::form_urlencoded;

use crate::config::settings::CollectorSettings;
use crate::domain::models::post::PostAccumulator;
use crate::engines::browser_session::BrowserSession;

/// 默认目标推文数量
pub const DEFAULT_DESIRED_COUNT: usize = 10;

/// 默认最大滚动尝试次数
pub const DEFAULT_MAX_SCROLLS: u32 = 10;

const SCROLL_TO_BOTTOM: &str = "window.scrollTo(0, document.body.scrollHeight);";

/// 采集请求
///
/// 目标数量与滚动预算都是有限值：即使目标数量永远达不到，
/// 循环也会在滚动预算耗尽后终止
#[derive(Debug, Clone)]
pub struct CollectionRequest {
    pub topic: String,
    pub desired_count: usize,
    pub max_scrolls: u32,
}

impl CollectionRequest {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            desired_count: DEFAULT_DESIRED_COUNT,
            max_scrolls: DEFAULT_MAX_SCROLLS,
        }
    }

    pub fn desired_count(mut self, desired_count: usize) -> Self {
        self.desired_count = desired_count;
        self
    }

    pub fn max_scrolls(mut self, max_scrolls: u32) -> Self {
        self.max_scrolls = max_scrolls;
        self
    }
}

/// 构造话题搜索URL
///
/// 话题按表单编码拼入查询串（空格编码为`+`，其余字符按需
/// 百分号编码）
pub fn search_url(base_url: &str, topic: &str) -> String {
    let query: String = form_urlencoded::byte_serialize(topic.as_bytes()).collect();
    format!("{base_url}/search?q={query}&src=typed_query")
}

/// 推文采集器
///
/// 在活动会话上执行有界的滚动轮询循环。失败策略为"开放失败"：
/// 导航或单次轮询的异常只记录日志，循环以已采集的数据继续，
/// 采集本身从不向调用方抛错
pub struct Collector<'a> {
    settings: &'a CollectorSettings,
    base_url: &'a str,
}

impl<'a> Collector<'a> {
    pub fn new(settings: &'a CollectorSettings, base_url: &'a str) -> Self {
        Self { settings, base_url }
    }

    /// 执行一次采集
    ///
    /// # 参数
    ///
    /// * `session` - 活动浏览器会话
    /// * `request` - 采集请求
    ///
    /// # 返回值
    ///
    /// 按发现顺序排列、去重后的推文文本，至多`desired_count`条；
    /// 搜索无结果时为空序列而非错误
    pub async fn collect(
        &self,
        session: &BrowserSession,
        request: &CollectionRequest,
    ) -> Vec<String> {
        if request.desired_count == 0 {
            debug!("zero posts requested, skipping collection");
            return Vec::new();
        }

        let url = search_url(self.base_url, &request.topic);
        debug!(url = %url, "navigating to topic search");
        if let Err(error) = session.page().goto(url.as_str()).await {
            warn!("search navigation failed, returning no posts: {error}");
            return Vec::new();
        }

        let mut accumulator = PostAccumulator::new();
        let mut scrolls = 0u32;

        while accumulator.len() < request.desired_count && scrolls < request.max_scrolls {
            // Fixed settle wait for asynchronously rendered content; a
            // DOM-stability poll was traded away for simplicity.
            tokio::time::sleep(Duration::from_secs(self.settings.settle_secs)).await;

            match self.visible_posts(session).await {
                Ok(texts) => {
                    accumulator.merge(texts);
                    debug!(
                        collected = accumulator.len(),
                        scrolls, "post poll finished"
                    );
                }
                Err(error) => {
                    warn!(
                        "post query failed, continuing with {} collected: {error}",
                        accumulator.len()
                    );
                }
            }

            if accumulator.len() >= request.desired_count {
                break;
            }

            if let Err(error) = session.page().evaluate(SCROLL_TO_BOTTOM).await {
                warn!(
                    "scroll failed, continuing with {} collected: {error}",
                    accumulator.len()
                );
            }
            scrolls += 1;
        }

        accumulator.into_first(request.desired_count)
    }

    /// 读取当前页面上所有推文正文，保持DOM顺序
    async fn visible_posts(&self, session: &BrowserSession) -> Result<Vec<String>, CdpError> {
        let elements = session
            .page()
            .find_elements(self.settings.post_selector.as_str())
            .await?;

        let mut texts = Vec::with_capacity(elements.len());
        for element in elements {
            if let Some(text) = element.inner_text().await? {
                let text = text.trim();
                if !text.is_empty() {
                    texts.push(text.to_string());
                }
            }
        }
        Ok(texts)
    }
}
