//! # Journal Downloader
//!
//! 从需要登录的站点批量下载期刊文章，支持断点续传
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `browser/` - 连接或启动浏览器
//! - `infrastructure/` - `JsExecutor`，唯一的 page owner
//! - `session/` - `Session` / `SessionDriver` 抽象及浏览器实现
//!
//! ### ② 业务能力层（Services）
//! - `CheckpointStore` - 每本期刊一个 `cursor` 断点文件
//! - `with_retry` - 单篇文章的有限次重试
//!
//! ### ③ 流程层（Workflow）
//! - `ArticleFlow` - 一篇文章的一次尝试（导航 → 找链接 → 下载 → 保存 → 限速）
//! - `Progress` - 日志中的进度标识
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/downloader` - 会话生命周期、期刊遍历、退出码
//! - `orchestrator/journal_processor` - 单本期刊的断点与文章遍历
//!
//! ## 模块结构

pub mod browser;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod session;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::{Config, Credentials};
pub use error::{DownloadError, DownloadResult};
pub use models::{load_catalog, Article, Batch, Journal};
pub use orchestrator::{AbortHandle, Downloader, Outcome, RunContext, RunSummary};
pub use services::{CheckpointStore, Pause, TokioPause};
pub use session::{BrowserDriver, BrowserSession, Session, SessionDriver};
pub use workflow::{ArticleFlow, Progress};
