// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Extension, Router,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use tower::util::ServiceExt;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tweetlens::application::dto::analyze::AnalyzeResponseDto;
use tweetlens::config::settings::{LlmSettings, Settings, WordCloudSettings};
use tweetlens::domain::services::sentiment_service::SentimentService;
use tweetlens::domain::services::summary_service::{self, SummaryService};
use tweetlens::engines::scraper::BrowserScraper;
use tweetlens::engines::traits::TweetProvider;
use tweetlens::infrastructure::session_store::SessionStore;
use tweetlens::infrastructure::wordcloud::WordCloudRenderer;
use tweetlens::presentation::routes;
use tweetlens::utils::errors::BootstrapError;

/// 固定返回预置推文的桩来源
struct StubProvider {
    tweets: Vec<String>,
}

#[async_trait]
impl TweetProvider for StubProvider {
    async fn tweets_for(&self, _topic: &str) -> Result<Vec<String>, BootstrapError> {
        Ok(self.tweets.clone())
    }
}

/// 始终引导失败的桩来源
struct FailingProvider;

#[async_trait]
impl TweetProvider for FailingProvider {
    async fn tweets_for(&self, _topic: &str) -> Result<Vec<String>, BootstrapError> {
        Err(BootstrapError::Launch("chromium exploded".to_string()))
    }
}

fn llm_settings(api_base_url: &str, api_key: Option<&str>) -> LlmSettings {
    LlmSettings {
        api_key: api_key.map(str::to_string),
        model: "llama3.1-8b".to_string(),
        api_base_url: api_base_url.to_string(),
        max_completion_tokens: 512,
        temperature: 0.0,
    }
}

fn wordcloud_settings(api_url: &str) -> WordCloudSettings {
    WordCloudSettings {
        api_url: api_url.to_string(),
        width: 600,
        height: 400,
    }
}

fn app<TP>(provider: TP, llm: &LlmSettings, wordcloud: &WordCloudSettings) -> Router
where
    TP: TweetProvider + 'static,
{
    routes::routes::<TP>()
        .layer(Extension(Arc::new(provider)))
        .layer(Extension(Arc::new(SummaryService::new(llm))))
        .layer(Extension(Arc::new(SentimentService::new(llm))))
        .layer(Extension(Arc::new(WordCloudRenderer::new(wordcloud))))
}

fn analyze_request(body: &str) -> Request<Body> {
    Request::builder()
        .uri("/analyze")
        .method("POST")
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// 健康检查测试
#[tokio::test]
async fn health_check_works() {
    let llm = llm_settings("http://127.0.0.1:1", None);
    let wordcloud = wordcloud_settings("http://127.0.0.1:1");
    let app = app(StubProvider { tweets: vec![] }, &llm, &wordcloud);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

/// 空话题返回400与固定负载
#[tokio::test]
async fn empty_topic_returns_400_with_fixed_payload() {
    let llm = llm_settings("http://127.0.0.1:1", None);
    let wordcloud = wordcloud_settings("http://127.0.0.1:1");
    let app = app(StubProvider { tweets: vec![] }, &llm, &wordcloud);

    let response = app.oneshot(analyze_request(r#"{"topic": ""}"#)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert_eq!(
        json,
        serde_json::json!({"summary": "No se proporcionó un tópico para analizar."})
    );
}

/// 缺失话题字段返回400
#[tokio::test]
async fn missing_topic_returns_400() {
    let llm = llm_settings("http://127.0.0.1:1", None);
    let wordcloud = wordcloud_settings("http://127.0.0.1:1");
    let app = app(StubProvider { tweets: vec![] }, &llm, &wordcloud);

    let response = app.oneshot(analyze_request(r#"{}"#)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert_eq!(
        json,
        serde_json::json!({"summary": "No se proporcionó un tópico para analizar."})
    );
}

/// 无JSON请求体返回400
#[tokio::test]
async fn missing_body_returns_400() {
    let llm = llm_settings("http://127.0.0.1:1", None);
    let wordcloud = wordcloud_settings("http://127.0.0.1:1");
    let app = app(StubProvider { tweets: vec![] }, &llm, &wordcloud);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/analyze")
                .method("POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert_eq!(json, serde_json::json!({"summary": "Solicitud inválida."}));
}

/// 引导失败返回500且不暴露内部原因
#[tokio::test]
async fn bootstrap_failure_returns_generic_500() {
    let llm = llm_settings("http://127.0.0.1:1", None);
    let wordcloud = wordcloud_settings("http://127.0.0.1:1");
    let app = app(FailingProvider, &llm, &wordcloud);

    let response = app
        .oneshot(analyze_request(r#"{"topic": "rust"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = response_json(response).await;
    assert_eq!(
        json,
        serde_json::json!({"summary": "Error interno del servidor."})
    );
}

/// 凭证文件缺失时请求以服务端错误结束，且不会走到浏览器启动
#[tokio::test]
async fn missing_session_file_returns_500_before_any_browser_work() {
    let dir = tempfile::tempdir().unwrap();
    let mut settings = Settings::new().unwrap();
    settings.session.cookies_file = dir
        .path()
        .join("absent_cookies.json")
        .to_string_lossy()
        .to_string();
    let settings = Arc::new(settings);

    let store = Arc::new(SessionStore::new(&settings.session.cookies_file));
    let provider = BrowserScraper::new(store, settings.clone());

    let llm = llm_settings("http://127.0.0.1:1", None);
    let wordcloud = wordcloud_settings("http://127.0.0.1:1");
    let app = app(provider, &llm, &wordcloud);

    let response = app
        .oneshot(analyze_request(r#"{"topic": "rust"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = response_json(response).await;
    assert_eq!(
        json,
        serde_json::json!({"summary": "Error interno del servidor."})
    );
}

/// 搜索无结果时仍为200：空推文列表加固定回退摘要
#[tokio::test]
async fn zero_posts_still_succeeds_with_fallback_summary() {
    // No backend configured: empty input never reaches the LLM anyway
    let llm = llm_settings("http://127.0.0.1:1", None);
    let wordcloud = wordcloud_settings("http://127.0.0.1:1");
    let app = app(StubProvider { tweets: vec![] }, &llm, &wordcloud);

    let response = app
        .oneshot(analyze_request(r#"{"topic": "tema sin resultados"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    let dto: AnalyzeResponseDto = serde_json::from_value(json).unwrap();

    assert!(dto.tweets.is_empty());
    assert_eq!(dto.summary, summary_service::EMPTY_FALLBACK);
    assert_eq!(dto.sentiment_distribution.total(), 0);
    assert!(dto.wordcloud_img.is_none());
}

/// 全链路：桩来源 + 打桩的摘要/情感/词云后端
#[tokio::test]
async fn full_analysis_with_stubbed_backends() {
    let backend = MockServer::start().await;

    // The summary and the classifier share the endpoint; the prompts
    // distinguish them.
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("Resume los siguientes tweets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": "Resumen de prueba."}}]
        })))
        .mount(&backend)
        .await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("Clasifica el sentimiento"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": "positivo"}}]
        })))
        .mount(&backend)
        .await;

    let png = vec![0x89u8, b'P', b'N', b'G'];
    Mock::given(method("POST"))
        .and(path("/wordcloud"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(png.clone())
                .insert_header("content-type", "image/png"),
        )
        .mount(&backend)
        .await;

    let llm = llm_settings(&backend.uri(), Some("test-key"));
    let wordcloud = wordcloud_settings(&format!("{}/wordcloud", backend.uri()));
    let tweets = vec![
        "El nuevo modelo es impresionante".to_string(),
        "Gran avance para la comunidad".to_string(),
    ];
    let app = app(StubProvider { tweets: tweets.clone() }, &llm, &wordcloud);

    let response = app
        .oneshot(analyze_request(r#"{"topic": "machine learning"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    let dto: AnalyzeResponseDto = serde_json::from_value(json).unwrap();

    assert_eq!(dto.tweets, tweets);
    assert_eq!(dto.summary, "Resumen de prueba.");
    assert_eq!(dto.sentiment_distribution.positivo, 2);
    assert_eq!(dto.sentiment_distribution.total(), 2);
    assert_eq!(dto.wordcloud_img.as_deref(), Some(BASE64.encode(&png).as_str()));
}
