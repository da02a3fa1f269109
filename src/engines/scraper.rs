// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::config::settings::Settings;
use crate::engines::browser_session::SessionBootstrapper;
use crate::engines::collector::{CollectionRequest, Collector};
use crate::engines::traits::TweetProvider;
use crate::infrastructure::session_store::SessionStore;
use crate::utils::errors::BootstrapError;

/// 浏览器抓取链
///
/// 串联凭证加载、会话引导与采集循环。每次请求独占一个
/// 浏览器实例，请求之间不共享任何可变状态；会话存储在
/// 服务路径上只读
pub struct BrowserScraper {
    store: Arc<SessionStore>,
    settings: Arc<Settings>,
}

impl BrowserScraper {
    pub fn new(store: Arc<SessionStore>, settings: Arc<Settings>) -> Self {
        Self { store, settings }
    }
}

#[async_trait]
impl TweetProvider for BrowserScraper {
    async fn tweets_for(&self, topic: &str) -> Result<Vec<String>, BootstrapError> {
        // Credentials load strictly before any browser work: a missing or
        // corrupt session file must not leave a Chromium process behind.
        let credentials = self.store.load()?;

        let bootstrapper =
            SessionBootstrapper::new(&self.settings.session, &self.settings.browser);
        let session = bootstrapper.bootstrap(credentials).await?;

        let collector = Collector::new(&self.settings.collector, &self.settings.session.base_url);
        let request = CollectionRequest::new(topic)
            .desired_count(self.settings.collector.desired_count)
            .max_scrolls(self.settings.collector.max_scrolls);

        // collect never fails; whatever was accumulated is the result.
        let posts = collector.collect(&session, &request).await;
        session.close().await;

        info!(topic = %topic, collected = posts.len(), "collection run finished");
        Ok(posts)
    }
}
