// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::HashSet;

/// 推文累积器
///
/// 按发现顺序收集采集到的推文文本，并按精确文本去重。
/// 滚动轮询会重复观察到已采集的推文；重复观察既不增加
/// 计数也不改变先前条目的顺序
#[derive(Debug, Default)]
pub struct PostAccumulator {
    posts: Vec<String>,
    seen: HashSet<String>,
}

impl PostAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 合并一次轮询观察到的文本，保持首次出现的顺序
    pub fn merge<I>(&mut self, texts: I)
    where
        I: IntoIterator<Item = String>,
    {
        for text in texts {
            if self.seen.insert(text.clone()) {
                self.posts.push(text);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// 按累积顺序返回前`count`条推文
    pub fn into_first(self, count: usize) -> Vec<String> {
        let mut posts = self.posts;
        posts.truncate(count);
        posts
    }
}
