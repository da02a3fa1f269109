// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tweetlens::config::settings::LlmSettings;
use tweetlens::domain::models::analysis::Sentiment;
use tweetlens::domain::services::sentiment_service::SentimentService;

fn settings(api_base_url: &str) -> LlmSettings {
    LlmSettings {
        api_key: Some("test-key".to_string()),
        model: "llama3.1-8b".to_string(),
        api_base_url: api_base_url.to_string(),
        max_completion_tokens: 512,
        temperature: 0.0,
    }
}

fn classifier_response(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "choices": [{"message": {"role": "assistant", "content": content}}]
    }))
}

fn tweets(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// 标签解析容忍标点与大小写
#[tokio::test]
async fn classify_parses_noisy_label() {
    let backend = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(classifier_response("Negativo."))
        .mount(&backend)
        .await;

    let service = SentimentService::new(&settings(&backend.uri()));
    let sentiment = service.classify("qué desastre de lanzamiento").await.unwrap();

    assert_eq!(sentiment, Sentiment::Negativo);
}

/// 分布统计覆盖全部输入
#[tokio::test]
async fn distribution_covers_every_text() {
    let backend = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(classifier_response("positivo"))
        .expect(3)
        .mount(&backend)
        .await;

    let service = SentimentService::new(&settings(&backend.uri()));
    let distribution = service.distribution(&tweets(&["a", "b", "c"])).await;

    assert_eq!(distribution.positivo, 3);
    assert_eq!(distribution.total(), 3);
}

/// 无法识别的回答计入neutral
#[tokio::test]
async fn unrecognized_label_counts_as_neutral() {
    let backend = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(classifier_response("no estoy seguro"))
        .mount(&backend)
        .await;

    let service = SentimentService::new(&settings(&backend.uri()));
    let distribution = service.distribution(&tweets(&["a", "b"])).await;

    assert_eq!(distribution.neutral, 2);
    assert_eq!(distribution.total(), 2);
}

/// 后端失败计入neutral，请求不中断
#[tokio::test]
async fn backend_failure_counts_as_neutral() {
    let backend = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&backend)
        .await;

    let service = SentimentService::new(&settings(&backend.uri()));
    let distribution = service.distribution(&tweets(&["a"])).await;

    assert_eq!(distribution.neutral, 1);
    assert_eq!(distribution.total(), 1);
}
