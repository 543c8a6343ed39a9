//! 远程会话
//!
//! 编排层只通过这里的两个 trait 使用浏览器：
//! `SessionDriver` 打开会话，`Session` 提供登录、导航、提取链接、下载和关闭能力。
//! 一个会话在整个运行期间只被编排层独占，按顺序使用。

pub mod browser_session;
pub mod link_strategy;

pub use browser_session::{BrowserDriver, BrowserSession};
pub use link_strategy::{LinkStrategy, DEFAULT_LINK_STRATEGIES};

use crate::config::{Config, Credentials};
use crate::error::DownloadResult;

/// 已打开的远程会话
#[allow(async_fn_in_trait)]
pub trait Session {
    async fn login(&mut self, credentials: &Credentials) -> DownloadResult<()>;

    async fn logout(&mut self) -> DownloadResult<()>;

    async fn navigate(&mut self, url: &str) -> DownloadResult<()>;

    /// 在当前页面查找可下载文件的链接，找不到时返回 `None`
    async fn find_artifact_link(&mut self) -> DownloadResult<Option<String>>;

    async fn fetch_bytes(&mut self, url: &str) -> DownloadResult<Vec<u8>>;

    /// 释放会话资源；按值接收，保证每个会话只关闭一次
    async fn close(self);
}

/// 会话工厂
#[allow(async_fn_in_trait)]
pub trait SessionDriver {
    type Session: Session;

    async fn open(&self, config: &Config) -> DownloadResult<Self::Session>;
}
