//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `downloader` - 批量下载器
//! - 管理会话生命周期（打开、登录、退出、关闭）
//! - 按顺序遍历期刊
//! - 汇总运行结果并给出退出码
//!
//! ### `journal_processor` - 单本期刊处理器
//! - 读取、推进、删除断点
//! - 在安全点检查中断标志
//! - 对每篇文章调用重试控制
//!
//! ### `run_context` - 运行上下文
//! - 警告/错误计数
//! - 中断标志
//!
//! ## 层次关系
//!
//! ```text
//! downloader (处理 Vec<Journal>)
//!     ↓
//! journal_processor (处理 Vec<Article>)
//!     ↓
//! services::retry (处理单篇文章的多次尝试)
//!     ↓
//! workflow::ArticleFlow (一次尝试)
//!     ↓
//! session (浏览器能力)
//! ```

pub mod downloader;
pub mod journal_processor;
pub mod run_context;

pub use downloader::{Downloader, RunSummary};
pub use journal_processor::{JournalProcessor, JournalStats};
pub use run_context::{AbortHandle, Outcome, RunContext};
