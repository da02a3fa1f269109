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

use async_trait::async_trait;

use crate::utils::errors::BootstrapError;

/// 推文来源接口
///
/// 对处理器隐藏会话引导与采集的细节，测试时以桩实现替换
#[async_trait]
pub trait TweetProvider: Send + Sync {
    /// 为一个话题产出按发现顺序排列的推文文本
    ///
    /// # 错误
    ///
    /// * 凭证加载或会话引导失败时返回错误；采集本身从不失败，
    ///   部分结果照常返回
    async fn tweets_for(&self, topic: &str) -> Result<Vec<String>, BootstrapError>;
}
