// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 一次性登录捕获流程
//!
//! 用环境变量`X_USERNAME`/`X_PASSWORD`中的账号走一遍登录表单，
//! 然后把浏览器cookie罐持久化到会话存储。服务路径从不调用
//! 此流程；它是凭证文件的唯一生产者

use std::time::Duration;

use anyhow::{bail, Context, Result};
use chromiumoxide::{Browser, BrowserConfig};
use futures::StreamExt;
use tracing::info;

use tweetlens::config::settings::Settings;
use tweetlens::domain::models::credential::SessionCredential;
use tweetlens::infrastructure::session_store::SessionStore;
use tweetlens::utils::telemetry;

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_telemetry();

    let settings = Settings::new()?;
    let username = std::env::var("X_USERNAME").context("X_USERNAME is not set")?;
    let password = std::env::var("X_PASSWORD").context("X_PASSWORD is not set")?;

    let config = BrowserConfig::builder()
        .with_head()
        .no_sandbox()
        .window_size(
            settings.browser.window_width,
            settings.browser.window_height,
        )
        .build()
        .map_err(anyhow::Error::msg)?;

    let (mut browser, mut handler) = Browser::launch(config).await?;
    let event_task = tokio::spawn(async move {
        while let Some(event) = handler.next().await {
            if event.is_err() {
                break;
            }
        }
    });

    let result = walk_login_flow(&browser, &settings, &username, &password).await;

    let _ = browser.close().await;
    let _ = browser.kill().await;
    event_task.abort();

    let credentials = result?;
    let store = SessionStore::new(&settings.session.cookies_file);
    store.save(&credentials)?;
    info!(
        "saved {} session credentials to {}",
        credentials.len(),
        settings.session.cookies_file
    );

    Ok(())
}

/// 走完两步登录表单并读出cookie罐
///
/// 表单分步渲染，这里沿用固定等待而不是轮询字段出现
async fn walk_login_flow(
    browser: &Browser,
    settings: &Settings,
    username: &str,
    password: &str,
) -> Result<Vec<SessionCredential>> {
    let page = browser
        .new_page(settings.session.login_url.as_str())
        .await?;
    tokio::time::sleep(Duration::from_secs(5)).await;

    let username_field = page
        .find_element("input[name='text']")
        .await
        .context("username field not found on login page")?;
    username_field.click().await?;
    username_field.type_str(username).await?;
    username_field.press_key("Enter").await?;
    tokio::time::sleep(Duration::from_secs(3)).await;

    let password_field = page
        .find_element("input[name='password']")
        .await
        .context("password field not found on login page")?;
    password_field.click().await?;
    password_field.type_str(password).await?;
    password_field.press_key("Enter").await?;
    tokio::time::sleep(Duration::from_secs(5)).await;

    let cookies = page.get_cookies().await?;
    if cookies.is_empty() {
        bail!("login flow produced no cookies");
    }

    Ok(cookies
        .iter()
        .map(SessionCredential::from_browser_cookie)
        .collect())
}
