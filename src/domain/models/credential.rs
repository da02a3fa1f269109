// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chromiumoxide::cdp::browser_protocol::network::{Cookie, CookieParam, TimeSinceEpoch};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 会话凭证
///
/// 一条持久化的浏览器cookie，承载免登录的已认证身份。
/// 由会话捕获流程写入磁盘，服务路径只读取，从不修改或删除。
///
/// 磁盘格式为camelCase JSON；来源文件中未知的额外字段会被忽略
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCredential {
    pub name: String,
    pub value: String,
    pub domain: Option<String>,
    pub path: Option<String>,
    /// 过期时间，UNIX秒。会话cookie为负值或缺省
    pub expiry: Option<f64>,
    pub secure: Option<bool>,
    pub http_only: Option<bool>,
}

impl SessionCredential {
    /// 从CDP cookie记录构造凭证，由会话捕获流程使用
    pub fn from_browser_cookie(cookie: &Cookie) -> Self {
        Self {
            name: cookie.name.clone(),
            value: cookie.value.clone(),
            domain: Some(cookie.domain.clone()),
            path: Some(cookie.path.clone()),
            expiry: Some(cookie.expires),
            secure: Some(cookie.secure),
            http_only: Some(cookie.http_only),
        }
    }

    /// 判断凭证是否已过期
    ///
    /// 无过期时间或负值（会话cookie）视为未过期
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.expiry {
            Some(expiry) => expiry > 0.0 && expiry < now.timestamp() as f64,
            None => false,
        }
    }

    /// 转换为可注入的CDP cookie参数
    ///
    /// 域字段总是被改写为`canonical_domain`，不论捕获时记录的是什么：
    /// 登录流程签发的cookie可能作用于与抓取入口不一致的子域
    ///
    /// # 参数
    ///
    /// * `canonical_domain` - 目标站点的规范cookie域
    pub fn to_cookie_param(&self, canonical_domain: &str) -> Result<CookieParam, String> {
        let mut builder = CookieParam::builder()
            .name(self.name.as_str())
            .value(self.value.as_str())
            .domain(canonical_domain)
            .path(self.path.as_deref().unwrap_or("/"));

        if let Some(secure) = self.secure {
            builder = builder.secure(secure);
        }
        if let Some(http_only) = self.http_only {
            builder = builder.http_only(http_only);
        }
        if let Some(expiry) = self.expiry {
            if expiry > 0.0 {
                builder = builder.expires(TimeSinceEpoch::new(expiry));
            }
        }

        builder.build()
    }
}
