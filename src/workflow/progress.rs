//! 进度标识
//!
//! 只用于日志前缀，不持久化：`NN/MM: trial/max_trial`

use std::fmt::Display;

/// 当前处理位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// 文章序号（从 1 开始）
    pub count: usize,
    /// 文章总数
    pub total: usize,
    /// 第几次尝试（从 1 开始）
    pub trial: usize,
    /// 最多尝试次数
    pub max_trial: usize,
}

impl Progress {
    pub fn new(count: usize, total: usize, trial: usize, max_trial: usize) -> Self {
        Self {
            count,
            total,
            trial,
            max_trial,
        }
    }

    /// 同一篇文章的另一次尝试
    pub fn at_trial(self, trial: usize) -> Self {
        Self { trial, ..self }
    }
}

impl Display for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:02}/{:02}: {}/{}",
            self.count, self.total, self.trial, self.max_trial
        )
    }
}
