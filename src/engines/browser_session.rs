// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::time::Duration;

use chromiumoxide::cdp::browser_protocol::network::SetCookiesParams;
use chromiumoxide::{Browser, BrowserConfig, Page};
use chrono::Utc;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::settings::{BrowserSettings, SessionSettings};
use crate::domain::models::credential::SessionCredential;
use crate::utils::errors::BootstrapError;

/// 浏览器会话
///
/// 绑定到单个站点源的活动浏览器实例句柄，独占于一次采集请求。
/// 持有浏览器进程、CDP页面与事件泵任务；必须通过[`close`]显式
/// 释放，否则会泄漏操作系统级的浏览器进程
///
/// [`close`]: BrowserSession::close
pub struct BrowserSession {
    browser: Browser,
    page: Page,
    event_task: JoinHandle<()>,
}

impl BrowserSession {
    /// 当前页面句柄
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// 关闭会话
    ///
    /// 先尝试优雅关闭，再强制结束进程，确保不留下僵尸Chromium
    pub async fn close(mut self) {
        if let Err(error) = self.browser.close().await {
            debug!("graceful browser close failed: {error}");
        }
        let _ = self.browser.kill().await;
        self.event_task.abort();
        info!("browser session closed");
    }
}

/// 会话引导器
///
/// 从持久化凭证产出一个已认证的活动浏览器会话
pub struct SessionBootstrapper<'a> {
    session: &'a SessionSettings,
    browser: &'a BrowserSettings,
}

impl<'a> SessionBootstrapper<'a> {
    pub fn new(session: &'a SessionSettings, browser: &'a BrowserSettings) -> Self {
        Self { session, browser }
    }

    /// 引导会话
    ///
    /// 启动可见窗口的浏览器（目标站点的机器人检测对headless上下文
    /// 表现不同，因此headless不可配置），导航到站点根，注入改写过
    /// 域的凭证，并强制刷新使服务端识别会话。
    ///
    /// # 参数
    ///
    /// * `credentials` - 已从会话存储加载的凭证
    ///
    /// # 错误
    ///
    /// * 启动、导航或注入任一步骤失败都会中止引导；已启动的
    ///   浏览器在错误返回前被关闭，不会留下孤儿进程
    pub async fn bootstrap(
        &self,
        credentials: Vec<SessionCredential>,
    ) -> Result<BrowserSession, BootstrapError> {
        let config = BrowserConfig::builder()
            .with_head()
            .no_sandbox()
            .window_size(self.browser.window_width, self.browser.window_height)
            .request_timeout(Duration::from_secs(self.browser.request_timeout_secs))
            .build()
            .map_err(BootstrapError::Launch)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| BootstrapError::Launch(e.to_string()))?;

        // Drain CDP events for the lifetime of the session; the handler
        // ending means Chromium disconnected.
        let event_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        match self.install_session(&browser, credentials).await {
            Ok(page) => {
                info!("browser session bootstrapped for {}", self.session.base_url);
                Ok(BrowserSession {
                    browser,
                    page,
                    event_task,
                })
            }
            Err(error) => {
                // The caller never sees the half-built browser, so teardown
                // happens here.
                let mut browser = browser;
                let _ = browser.close().await;
                let _ = browser.kill().await;
                event_task.abort();
                Err(error)
            }
        }
    }

    async fn install_session(
        &self,
        browser: &Browser,
        credentials: Vec<SessionCredential>,
    ) -> Result<Page, BootstrapError> {
        // Cookie installation requires a page already under the target
        // domain, so navigation comes first.
        let page = browser
            .new_page(self.session.base_url.as_str())
            .await
            .map_err(|e| BootstrapError::Navigation(e.to_string()))?;

        let now = Utc::now();
        let mut params = Vec::with_capacity(credentials.len());
        let mut skipped = 0usize;
        for credential in &credentials {
            if credential.is_expired(now) {
                skipped += 1;
                continue;
            }
            params.push(
                credential
                    .to_cookie_param(&self.session.cookie_domain)
                    .map_err(BootstrapError::CookieInjection)?,
            );
        }
        if skipped > 0 {
            warn!("skipped {skipped} expired session credentials");
        }
        if params.is_empty() {
            return Err(BootstrapError::CookieInjection(
                "no usable session credentials".to_string(),
            ));
        }

        debug!("injecting {} session credentials", params.len());
        page.execute(SetCookiesParams::new(params))
            .await
            .map_err(|e| BootstrapError::CookieInjection(e.to_string()))?;

        // Full reload so the server recognizes the injected session.
        page.reload()
            .await
            .map_err(|e| BootstrapError::Navigation(e.to_string()))?;

        Ok(page)
    }
}
