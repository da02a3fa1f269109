// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::domain::models::credential::SessionCredential;
use crate::utils::errors::StorageError;

/// 会话凭证存储
///
/// 在固定路径上持久化cookie记录。`load`由服务路径调用；
/// `save`只由会话捕获流程调用。文件缺失不被容忍：没有凭证
/// 就无法引导会话，缺失是要向调用方暴露的错误
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 加载全部凭证
    ///
    /// # 错误
    ///
    /// * 文件缺失或不可读时返回`StorageError::Unavailable`
    /// * 文件不是有效的凭证JSON时返回`StorageError::Malformed`
    pub fn load(&self) -> Result<Vec<SessionCredential>, StorageError> {
        let raw = fs::read_to_string(&self.path).map_err(|source| StorageError::Unavailable {
            path: self.path.display().to_string(),
            source,
        })?;

        let credentials: Vec<SessionCredential> =
            serde_json::from_str(&raw).map_err(|source| StorageError::Malformed {
                path: self.path.display().to_string(),
                source,
            })?;

        debug!(
            "loaded {} session credentials from {}",
            credentials.len(),
            self.path.display()
        );
        Ok(credentials)
    }

    /// 保存凭证
    ///
    /// 写入同目录的临时文件后原子替换，崩溃不会留下截断的文件
    pub fn save(&self, credentials: &[SessionCredential]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| StorageError::Unavailable {
                    path: parent.display().to_string(),
                    source,
                })?;
            }
        }

        let serialized = serde_json::to_string_pretty(credentials).map_err(|source| {
            StorageError::Malformed {
                path: self.path.display().to_string(),
                source,
            }
        })?;

        // Same directory as the target so the rename stays on one filesystem.
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, serialized).map_err(|source| StorageError::Unavailable {
            path: staging.display().to_string(),
            source,
        })?;
        fs::rename(&staging, &self.path).map_err(|source| StorageError::Unavailable {
            path: self.path.display().to_string(),
            source,
        })?;

        debug!(
            "saved {} session credentials to {}",
            credentials.len(),
            self.path.display()
        );
        Ok(())
    }
}
