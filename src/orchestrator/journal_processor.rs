//! 单本期刊处理器 - 编排层
//!
//! ## 职责
//!
//! 按顺序处理一本期刊的所有文章，并维护这本期刊的断点。
//!
//! ## 断点规则
//!
//! - 开始前创建输出目录，再读取断点（没有断点从 0 开始）
//! - 每篇文章开始前先写入它的序号，崩溃后会从这篇重新开始
//! - 写完断点后检查中断标志，已中断则停止并返回 `Aborted`
//! - 所有文章都处理过（不论成败）才删除断点

use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

use crate::error::DownloadError;
use crate::models::Journal;
use crate::orchestrator::RunContext;
use crate::services::{with_retry, CheckpointStore, Pause, RetryOutcome, RetryPolicy};
use crate::session::Session;
use crate::workflow::{ArticleAttempt, ArticleFlow, ArticleJob, Progress};

/// 单本期刊的处理统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct JournalStats {
    /// 本次运行开始的位置
    pub resumed_at: usize,
    pub completed: usize,
    pub failed: usize,
}

/// 单本期刊处理器
///
/// 借用会话和各项能力，不持有任何资源
pub struct JournalProcessor<'a, S, P> {
    pub session: &'a mut S,
    pub pause: &'a P,
    pub flow: &'a ArticleFlow,
    pub store: &'a CheckpointStore,
    pub policy: RetryPolicy,
}

impl<S, P> JournalProcessor<'_, S, P>
where
    S: Session,
    P: Pause,
{
    /// 处理一本期刊
    ///
    /// # 返回
    /// 完整处理完返回统计；目录或断点文件出错、或被中断时返回错误，断点保留
    pub async fn process(
        &mut self,
        ctx: &mut RunContext,
        journal: &Journal,
        journal_dir: &Path,
    ) -> Result<JournalStats> {
        fs::create_dir_all(journal_dir)
            .await
            .with_context(|| format!("无法创建目录: {}", journal_dir.display()))?;

        let total = journal.articles.len();
        let resumed_at = self.store.read_cursor(journal_dir).await.min(total);
        if resumed_at > 0 {
            ctx.info(None, format!("↪️ 从第 {} 篇继续 (共 {} 篇)", resumed_at + 1, total));
        }

        let mut stats = JournalStats {
            resumed_at,
            ..Default::default()
        };

        for (index, article) in journal.articles.iter().enumerate().skip(resumed_at) {
            self.store.write_cursor(journal_dir, index).await?;

            if ctx.is_aborted() {
                return Err(DownloadError::Aborted.into());
            }

            let progress = Progress::new(index + 1, total, 1, self.policy.max_trials);
            let mut attempt = ArticleAttempt {
                flow: self.flow,
                session: &mut *self.session,
                pause: self.pause,
                job: ArticleJob {
                    journal_dir,
                    index,
                    article,
                },
            };

            match with_retry(ctx, self.pause, self.policy, progress, &mut attempt).await {
                RetryOutcome::Succeeded { .. } => stats.completed += 1,
                RetryOutcome::Exhausted => stats.failed += 1,
            }
        }

        self.store.remove_cursor(journal_dir).await?;
        Ok(stats)
    }
}
