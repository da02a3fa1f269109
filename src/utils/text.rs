// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use regex::Regex;

static URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://\S+").expect("invalid URL pattern"));

static MENTION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@\w+").expect("invalid mention pattern"));

static WHITESPACE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("invalid whitespace pattern"));

/// 将采集到的推文合并为用于词云渲染的语料
///
/// 移除URL和@提及，折叠空白字符。话题标签保留其词面
/// （去掉`#`前缀），因为它们通常承载主题词。
///
/// # 参数
///
/// * `texts` - 采集到的推文文本
///
/// # 返回值
///
/// 清洗后的单一语料字符串；输入为空时返回空字符串
pub fn cleaned_corpus(texts: &[String]) -> String {
    let joined = texts.join(" ");
    let without_urls = URL_PATTERN.replace_all(&joined, " ");
    let without_mentions = MENTION_PATTERN.replace_all(&without_urls, " ");
    let without_hash = without_mentions.replace('#', " ");
    WHITESPACE_PATTERN
        .replace_all(&without_hash, " ")
        .trim()
        .to_string()
}
