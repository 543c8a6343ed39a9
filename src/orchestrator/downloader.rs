//! 批量下载器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个下载任务的入口，负责会话生命周期和期刊遍历。
//!
//! ## 流程
//!
//! 1. **打开会话**：失败记错误直接返回（没有会话可关闭）
//! 2. **登录**：失败记错误，跳过下载和退出登录，直接关闭会话
//! 3. **遍历期刊**：按输入顺序，委托 `JournalProcessor` 处理每本期刊；
//!    某本期刊出现致命错误时记错误并停止剩余期刊
//! 4. **退出登录**：失败只记错误
//! 5. **关闭会话**：只要会话打开过，无论结果如何都关闭一次
//!
//! 退出码只看错误计数：有错误为 1，只有警告为 0。

use anyhow::{Context, Result};
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::error::DownloadError;
use crate::models::{journal_dir, Batch};
use crate::orchestrator::journal_processor::JournalProcessor;
use crate::orchestrator::{AbortHandle, Outcome, RunContext};
use crate::services::{CheckpointStore, Pause, RetryPolicy, TokioPause};
use crate::session::{Session, SessionDriver};
use crate::utils::logging;
use crate::workflow::ArticleFlow;

/// 一次运行的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub outcome: Outcome,
    pub exit_code: i32,
    pub elapsed: Duration,
}

/// 批量下载器
///
/// 唯一持有会话的模块；会话只在 `run` 期间存在
pub struct Downloader<D, P = TokioPause> {
    driver: D,
    pause: P,
    config: Config,
    store: CheckpointStore,
    abort: AbortHandle,
}

impl<D> Downloader<D, TokioPause>
where
    D: SessionDriver,
{
    pub fn new(driver: D, config: Config) -> Self {
        Self {
            driver,
            pause: TokioPause,
            config,
            store: CheckpointStore::new(),
            abort: AbortHandle::new(),
        }
    }
}

impl<D, P> Downloader<D, P>
where
    D: SessionDriver,
    P: Pause,
{
    /// 替换挂起实现（测试中用于记录等待）
    pub fn with_pause<Q: Pause>(self, pause: Q) -> Downloader<D, Q> {
        Downloader {
            driver: self.driver,
            pause,
            config: self.config,
            store: self.store,
            abort: self.abort,
        }
    }

    /// 中断句柄，可交给信号处理
    pub fn abort_handle(&self) -> AbortHandle {
        self.abort.clone()
    }

    /// 请求中断：当前文章完成后停止
    pub fn abort(&self) {
        self.abort.abort();
    }

    /// 运行整个批次
    pub async fn run(&self, batch: &Batch) -> RunSummary {
        let started = Instant::now();
        let mut ctx = RunContext::new(self.abort.clone());

        logging::log_run_start(&self.config, batch);

        let mut session = match self.driver.open(&self.config).await {
            Ok(session) => session,
            Err(e) => {
                ctx.error(None, e.to_string());
                return finish(ctx, started);
            }
        };

        match session.login(&self.config.credentials()).await {
            Err(e) => ctx.error(None, e.to_string()),
            Ok(()) => {
                match self.process_journals(&mut session, &mut ctx, batch).await {
                    Err(e) => ctx.error(None, format!("{:#}", e)),
                    Ok(()) if ctx.is_aborted() => ctx.error(None, DownloadError::Aborted.to_string()),
                    Ok(()) => {}
                }

                if let Err(e) = session.logout().await {
                    ctx.error(None, e.to_string());
                }
            }
        }

        session.close().await;
        finish(ctx, started)
    }

    /// 按顺序处理所有期刊，遇到期刊级错误立即停止
    async fn process_journals(
        &self,
        session: &mut D::Session,
        ctx: &mut RunContext,
        batch: &Batch,
    ) -> Result<()> {
        let flow = ArticleFlow::new(&self.config);
        let policy = RetryPolicy::new(self.config.max_trials(), self.config.retry_interval());
        let total = batch.journals.len();

        for (index, journal) in batch.journals.iter().enumerate() {
            let dir = journal_dir(&self.config.output_dir, &self.config.source_name, journal);
            logging::log_journal_start(index + 1, total, journal, &dir);

            let mut processor = JournalProcessor {
                session: &mut *session,
                pause: &self.pause,
                flow: &flow,
                store: &self.store,
                policy,
            };

            let stats = processor
                .process(ctx, journal, &dir)
                .await
                .with_context(|| format!("期刊 {} 处理中止", journal.label()))?;

            logging::log_journal_complete(index + 1, &stats, journal.articles.len());
        }

        Ok(())
    }
}

fn finish(ctx: RunContext, started: Instant) -> RunSummary {
    let outcome = ctx.finish();
    let summary = RunSummary {
        outcome,
        exit_code: outcome.exit_code(),
        elapsed: started.elapsed(),
    };
    logging::print_final_stats(&summary);
    summary
}
