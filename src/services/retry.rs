//! 重试控制 - 业务能力层
//!
//! 对单篇文章的一次下载做有限次数、固定间隔的重试。
//! 最后一次仍失败时记一个错误并返回，不影响后续文章。

use std::time::Duration;
use tokio::time::sleep;

use crate::orchestrator::RunContext;
use crate::workflow::Progress;

/// 挂起能力，重试间隔和限速等待都经过这里
#[allow(async_fn_in_trait)]
pub trait Pause {
    async fn pause(&self, duration: Duration);
}

/// 基于 `tokio::time::sleep` 的挂起
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioPause;

impl Pause for TokioPause {
    async fn pause(&self, duration: Duration) {
        sleep(duration).await;
    }
}

/// 一次可重试的操作
#[allow(async_fn_in_trait)]
pub trait Attempt {
    async fn attempt(&mut self, ctx: &mut RunContext, progress: &Progress) -> anyhow::Result<()>;
}

/// 重试策略
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// 最多尝试次数（首次 + 重试）
    pub max_trials: usize,
    /// 两次尝试之间的等待
    pub interval: Duration,
}

impl RetryPolicy {
    pub fn new(max_trials: usize, interval: Duration) -> Self {
        Self {
            max_trials: max_trials.max(1),
            interval,
        }
    }
}

/// 重试结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryOutcome {
    /// 第 `trial` 次（从 1 开始）成功
    Succeeded { trial: usize },
    /// 所有尝试都失败
    Exhausted,
}

/// 执行操作直到成功或次数用完
///
/// # 参数
/// - `progress`: 当前文章的进度，`trial` 字段会按尝试次数覆盖
pub async fn with_retry<A, P>(
    ctx: &mut RunContext,
    pause: &P,
    policy: RetryPolicy,
    progress: Progress,
    op: &mut A,
) -> RetryOutcome
where
    A: Attempt,
    P: Pause,
{
    let max_trials = policy.max_trials.max(1);

    for trial in 0..max_trials {
        let progress = Progress {
            max_trial: max_trials,
            ..progress.at_trial(trial + 1)
        };

        let err = match op.attempt(ctx, &progress).await {
            Ok(()) => return RetryOutcome::Succeeded { trial: trial + 1 },
            Err(e) => e,
        };

        if trial + 1 < max_trials {
            if policy.interval.is_zero() {
                ctx.warn(Some(&progress), format!("下载失败，立即重试: {:#}", err));
            } else {
                ctx.warn(
                    Some(&progress),
                    format!(
                        "下载失败，{} 秒后重试: {:#}",
                        policy.interval.as_secs_f64(),
                        err
                    ),
                );
                pause.pause(policy.interval).await;
            }
        } else {
            ctx.error(
                Some(&progress),
                format!("下载失败，已尝试 {} 次，放弃: {:#}", max_trials, err),
            );
        }
    }

    RetryOutcome::Exhausted
}
