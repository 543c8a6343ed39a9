//! 文章下载流程 - 流程层
//!
//! 一次尝试的完整过程：
//! 1. 打开文章页面
//! 2. 按策略链查找下载链接（找不到时记警告，视为已处理，不重试）
//! 3. 下载内容并保存为 `NN 标题.ext`
//! 4. 保存成功后按配置限速等待
//!
//! 任何一步出错都原样返回，交给重试控制处理。

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::debug;

use crate::config::Config;
use crate::error::DownloadError;
use crate::models::{artifact_file_name, Article};
use crate::orchestrator::RunContext;
use crate::services::{Attempt, Pause};
use crate::session::Session;
use crate::utils::logging::truncate_text;
use crate::workflow::Progress;

/// 单次尝试的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleOutcome {
    /// 已保存到指定路径
    Saved(PathBuf),
    /// 页面上没有可下载的文件
    NoArtifact,
}

/// 文章下载流程
///
/// 不持有会话，只描述"一篇文章"怎么下载
#[derive(Debug, Clone)]
pub struct ArticleFlow {
    extension: String,
    throttle: Duration,
}

impl ArticleFlow {
    pub fn new(config: &Config) -> Self {
        Self {
            extension: config.artifact_extension.clone(),
            throttle: config.throttle(),
        }
    }

    /// 文章的保存路径，`index` 从 0 开始
    pub fn artifact_path(&self, journal_dir: &Path, index: usize, article: &Article) -> PathBuf {
        journal_dir.join(artifact_file_name(index, &article.title, &self.extension))
    }

    /// 下载并保存一篇文章
    pub async fn fetch_and_save<S, P>(
        &self,
        session: &mut S,
        pause: &P,
        ctx: &mut RunContext,
        progress: &Progress,
        job: &ArticleJob<'_>,
    ) -> Result<ArticleOutcome>
    where
        S: Session,
        P: Pause,
    {
        let article = job.article;
        ctx.info(Some(progress), format!("📄 {}", truncate_text(&article.title, 80)));

        session.navigate(&article.url).await?;

        let Some(link) = session.find_artifact_link().await? else {
            ctx.warn(
                Some(progress),
                format!("未找到下载链接，跳过: {} ({})", article.title, article.url),
            );
            return Ok(ArticleOutcome::NoArtifact);
        };

        let bytes = session.fetch_bytes(&link).await?;

        let path = self.artifact_path(job.journal_dir, job.index, article);
        write_artifact(&path, &bytes).await?;
        ctx.info(
            Some(progress),
            format!("✓ 已保存: {} ({} 字节)", path.display(), bytes.len()),
        );

        if !self.throttle.is_zero() {
            ctx.info(
                Some(progress),
                format!("⏳ 等待 {} 秒", self.throttle.as_secs_f64()),
            );
            pause.pause(self.throttle).await;
        }

        Ok(ArticleOutcome::Saved(path))
    }
}

/// 先写临时文件再改名，中途中断不会留下半个文件；失败时清掉临时文件
async fn write_artifact(path: &Path, bytes: &[u8]) -> Result<(), DownloadError> {
    let partial = path.with_extension("part");
    if let Err(source) = fs::write(&partial, bytes).await {
        discard_partial(&partial).await;
        return Err(DownloadError::Write {
            path: partial,
            source,
        });
    }
    if let Err(source) = fs::rename(&partial, path).await {
        discard_partial(&partial).await;
        return Err(DownloadError::Write {
            path: path.to_path_buf(),
            source,
        });
    }
    Ok(())
}

async fn discard_partial(partial: &Path) {
    if let Err(e) = fs::remove_file(partial).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            debug!("清理临时文件失败 ({}): {}", partial.display(), e);
        }
    }
}

/// 待下载的一篇文章及其位置
#[derive(Debug, Clone, Copy)]
pub struct ArticleJob<'a> {
    pub journal_dir: &'a Path,
    /// 期刊内序号，从 0 开始
    pub index: usize,
    pub article: &'a Article,
}

/// 把一篇文章的下载包装成可重试的操作
pub struct ArticleAttempt<'a, S, P> {
    pub flow: &'a ArticleFlow,
    pub session: &'a mut S,
    pub pause: &'a P,
    pub job: ArticleJob<'a>,
}

impl<S, P> Attempt for ArticleAttempt<'_, S, P>
where
    S: Session,
    P: Pause,
{
    async fn attempt(&mut self, ctx: &mut RunContext, progress: &Progress) -> Result<()> {
        self.flow
            .fetch_and_save(&mut *self.session, self.pause, ctx, progress, &self.job)
            .await
            .map(|_| ())
    }
}
