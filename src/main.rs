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

use axum::Extension;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use tweetlens::config::settings::Settings;
use tweetlens::domain::services::sentiment_service::SentimentService;
use tweetlens::domain::services::summary_service::SummaryService;
use tweetlens::engines::scraper::BrowserScraper;
use tweetlens::infrastructure::session_store::SessionStore;
use tweetlens::infrastructure::wordcloud::WordCloudRenderer;
use tweetlens::presentation::routes;
use tweetlens::utils::telemetry;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting tweetlens...");

    // 2. Load configuration
    let settings = Arc::new(Settings::new()?);
    info!("Configuration loaded");

    // Initialize Prometheus Metrics
    tweetlens::infrastructure::metrics::init_metrics(&settings.metrics.listen);

    if settings.llm.api_key.is_none() {
        warn!("LLM API key not configured; summaries and sentiment will fall back to fixed responses");
    }

    // 3. Initialize Components
    let store = Arc::new(SessionStore::new(&settings.session.cookies_file));
    let provider = Arc::new(BrowserScraper::new(store, settings.clone()));
    let summarizer = Arc::new(SummaryService::new(&settings.llm));
    let sentiments = Arc::new(SentimentService::new(&settings.llm));
    let wordcloud = Arc::new(WordCloudRenderer::new(&settings.wordcloud));

    // 4. Start HTTP server
    let app = routes::routes::<BrowserScraper>()
        .layer(Extension(provider))
        .layer(Extension(summarizer))
        .layer(Extension(sentiments))
        .layer(Extension(wordcloud))
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
