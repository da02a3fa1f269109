// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// 应用程序配置设置
///
/// 包含服务器、会话、浏览器、采集、语言模型后端与词云渲染等所有配置项。
/// 在进程启动时构造一次，按引用传入各组件构造函数
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 指标导出配置
    pub metrics: MetricsSettings,
    /// 会话凭证配置
    pub session: SessionSettings,
    /// 浏览器配置
    pub browser: BrowserSettings,
    /// 采集循环配置
    pub collector: CollectorSettings,
    /// 语言模型后端配置
    pub llm: LlmSettings,
    /// 词云渲染配置
    pub wordcloud: WordCloudSettings,
}

/// 服务器配置设置
#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 指标导出配置设置
#[derive(Debug, Deserialize)]
pub struct MetricsSettings {
    /// Prometheus导出器监听地址
    pub listen: String,
}

/// 会话凭证配置设置
#[derive(Debug, Deserialize)]
pub struct SessionSettings {
    /// 凭证文件路径
    pub cookies_file: String,
    /// 站点根URL，引导时先导航到此处再注入凭证
    pub base_url: String,
    /// 规范cookie域，注入前所有凭证的域都被改写为该值
    pub cookie_domain: String,
    /// 登录流程URL，仅由会话捕获流程使用
    pub login_url: String,
}

/// 浏览器配置设置
#[derive(Debug, Deserialize)]
pub struct BrowserSettings {
    /// 窗口宽度
    pub window_width: u32,
    /// 窗口高度
    pub window_height: u32,
    /// CDP请求超时时间（秒）
    pub request_timeout_secs: u64,
}

/// 采集循环配置设置
#[derive(Debug, Deserialize)]
pub struct CollectorSettings {
    /// 默认目标推文数量
    pub desired_count: usize,
    /// 最大滚动尝试次数
    pub max_scrolls: u32,
    /// 每次轮询前的固定等待时间（秒）
    pub settle_secs: u64,
    /// 推文正文的CSS选择器
    pub post_selector: String,
}

/// 语言模型后端配置设置
///
/// 后端为OpenAI兼容的chat-completions服务
#[derive(Debug, Deserialize)]
pub struct LlmSettings {
    /// API密钥
    pub api_key: Option<String>,
    /// 模型名称
    pub model: String,
    /// API基础URL
    pub api_base_url: String,
    /// 摘要生成的最大完成令牌数
    pub max_completion_tokens: u32,
    /// 采样温度
    pub temperature: f32,
}

/// 词云渲染配置设置
#[derive(Debug, Deserialize)]
pub struct WordCloudSettings {
    /// 渲染端点URL
    pub api_url: String,
    /// 图像宽度
    pub width: u32,
    /// 图像高度
    pub height: u32,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从环境变量加载配置，支持默认值
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            // Start with default settings
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("metrics.listen", "0.0.0.0:9000")?
            // Default session settings
            .set_default("session.cookies_file", "cookies/twitter_cookies.json")?
            .set_default("session.base_url", "https://x.com")?
            .set_default("session.cookie_domain", ".x.com")?
            .set_default("session.login_url", "https://x.com/i/flow/login")?
            // Default browser settings
            .set_default("browser.window_width", 1280)?
            .set_default("browser.window_height", 900)?
            .set_default("browser.request_timeout_secs", 30)?
            // Default collector settings
            .set_default("collector.desired_count", 10)?
            .set_default("collector.max_scrolls", 10)?
            .set_default("collector.settle_secs", 3)?
            .set_default("collector.post_selector", "article div[lang]")?
            // Default LLM settings
            .set_default("llm.model", "llama3.1-8b")?
            .set_default("llm.api_base_url", "https://api.cerebras.ai/v1")?
            .set_default("llm.max_completion_tokens", 5000)?
            .set_default("llm.temperature", 0.2)?
            // Default word cloud settings
            .set_default("wordcloud.api_url", "https://quickchart.io/wordcloud")?
            .set_default("wordcloud.width", 600)?
            .set_default("wordcloud.height", 400)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("TWEETLENS").separator("__"));

        builder.build()?.try_deserialize()
    }
}
