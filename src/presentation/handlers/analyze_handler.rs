// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Json};
use metrics::counter;
use std::sync::Arc;
use tracing::{debug, error, warn};
use validator::Validate;

use crate::{
    application::dto::analyze::{AnalyzeRequestDto, AnalyzeResponseDto},
    domain::services::{sentiment_service::SentimentService, summary_service::SummaryService},
    engines::traits::TweetProvider,
    infrastructure::wordcloud::WordCloudRenderer,
    presentation::errors::{ApiError, INVALID_BODY_MESSAGE, MISSING_TOPIC_MESSAGE},
};

/// 处理话题分析请求
///
/// 编排推文来源 → 摘要 → 情感分布 → 词云，并组装响应。
/// 凭证或会话引导失败对请求致命，以通用服务端错误返回；
/// 分析各阶段都以降级结果继续，采集为空时响应仍为200
///
/// # 参数
///
/// * `provider` - 推文来源实例
/// * `summarizer` - 摘要服务实例
/// * `sentiments` - 情感分类服务实例
/// * `wordcloud` - 词云渲染实例
/// * `payload` - 分析请求体，缺失或不是JSON时为拒绝值
///
/// # 错误
///
/// * 请求体缺失或话题为空返回400
/// * 凭证加载或会话引导失败返回500
pub async fn analyze<TP>(
    Extension(provider): Extension<Arc<TP>>,
    Extension(summarizer): Extension<Arc<SummaryService>>,
    Extension(sentiments): Extension<Arc<SentimentService>>,
    Extension(wordcloud): Extension<Arc<WordCloudRenderer>>,
    payload: Result<Json<AnalyzeRequestDto>, JsonRejection>,
) -> Result<Json<AnalyzeResponseDto>, ApiError>
where
    TP: TweetProvider + 'static,
{
    counter!("analyze_requests_total").increment(1);

    let Ok(Json(payload)) = payload else {
        warn!("analysis request without a valid JSON body");
        return Err(ApiError::BadRequest(INVALID_BODY_MESSAGE));
    };

    if payload.validate().is_err() {
        warn!("analysis request with an empty topic");
        return Err(ApiError::BadRequest(MISSING_TOPIC_MESSAGE));
    }
    let Some(topic) = payload.topic else {
        warn!("analysis request without a topic");
        return Err(ApiError::BadRequest(MISSING_TOPIC_MESSAGE));
    };

    debug!(topic = %topic, "topic received for analysis");

    let tweets = provider.tweets_for(&topic).await.map_err(|error| {
        error!("tweet collection failed: {error}");
        ApiError::Internal
    })?;
    counter!("posts_collected_total").increment(tweets.len() as u64);

    let summary = summarizer.summarize(&tweets).await;
    let sentiment_distribution = sentiments.distribution(&tweets).await;
    let wordcloud_img = wordcloud.render(&tweets).await;

    debug!(
        topic = %topic,
        tweets = tweets.len(),
        "analysis finished"
    );

    Ok(Json(AnalyzeResponseDto {
        tweets,
        summary,
        sentiment_distribution,
        wordcloud_img,
    }))
}
