//! 错误类型
//!
//! 会话、下载、断点文件各自的失败都归到 `DownloadError`，
//! 编排层统一用 `anyhow::Result` 传播并补充上下文。

use std::path::PathBuf;
use thiserror::Error;

/// 下载流程中的错误
#[derive(Debug, Error)]
pub enum DownloadError {
    /// 浏览器会话无法打开
    #[error("打开浏览器会话失败: {0}")]
    SessionOpen(String),

    /// 登录失败
    #[error("登录失败: {0}")]
    Login(String),

    /// 退出登录失败
    #[error("退出登录失败: {0}")]
    Logout(String),

    /// 页面导航失败
    #[error("导航到 {url} 失败: {reason}")]
    Navigation { url: String, reason: String },

    /// 执行页面脚本（提取链接等）失败
    #[error("执行页面脚本失败: {0}")]
    Script(String),

    /// 下载文件内容失败
    #[error("下载 {url} 失败: {reason}")]
    Fetch { url: String, reason: String },

    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 断点文件读写失败
    #[error("断点文件操作失败 ({path}): {source}")]
    Checkpoint {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 目录清单加载失败
    #[error("加载目录清单失败 ({path}): {reason}")]
    Catalog { path: PathBuf, reason: String },

    /// 用户中断
    #[error("下载已被中断")]
    Aborted,
}

impl From<chromiumoxide::error::CdpError> for DownloadError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        DownloadError::Script(err.to_string())
    }
}

impl From<serde_json::Error> for DownloadError {
    fn from(err: serde_json::Error) -> Self {
        DownloadError::Script(err.to_string())
    }
}

impl DownloadError {
    /// 构造导航错误
    pub fn navigation(url: impl Into<String>, reason: impl ToString) -> Self {
        DownloadError::Navigation {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// 构造下载错误
    pub fn fetch(url: impl Into<String>, reason: impl ToString) -> Self {
        DownloadError::Fetch {
            url: url.into(),
            reason: reason.to_string(),
        }
    }
}

/// 下载结果类型
pub type DownloadResult<T> = Result<T, DownloadError>;
