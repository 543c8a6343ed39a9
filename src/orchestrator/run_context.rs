//! 运行上下文
//!
//! 一次运行的警告/错误计数和中断标志都放在这里，由编排层独占并显式传递。
//! 所有警告和错误都必须经过 `RunContext` 输出，这样计数才准确。

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::workflow::Progress;

/// 运行结果计数
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub warnings: usize,
    pub errors: usize,
}

impl Outcome {
    /// 进程退出码：没有错误时为 0
    pub fn exit_code(&self) -> i32 {
        if self.errors > 0 {
            1
        } else {
            0
        }
    }
}

/// 中断句柄
///
/// 可以在信号处理中随时调用 `abort()`，只设置标志；
/// 编排层只在每篇文章开始前检查它。
#[derive(Debug, Clone, Default)]
pub struct AbortHandle {
    flag: Arc<AtomicBool>,
}

impl AbortHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// 请求中断，重复调用无副作用
    pub fn abort(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_aborted(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// 一次运行的上下文
#[derive(Debug)]
pub struct RunContext {
    outcome: Outcome,
    abort: AbortHandle,
}

impl RunContext {
    pub fn new(abort: AbortHandle) -> Self {
        Self {
            outcome: Outcome::default(),
            abort,
        }
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_aborted(&self) -> bool {
        self.abort.is_aborted()
    }

    pub fn info(&self, progress: Option<&Progress>, message: impl AsRef<str>) {
        match progress {
            Some(p) => info!("[{}] {}", p, message.as_ref()),
            None => info!("{}", message.as_ref()),
        }
    }

    pub fn warn(&mut self, progress: Option<&Progress>, message: impl AsRef<str>) {
        self.outcome.warnings += 1;
        match progress {
            Some(p) => warn!("[{}] ⚠️ {}", p, message.as_ref()),
            None => warn!("⚠️ {}", message.as_ref()),
        }
    }

    pub fn error(&mut self, progress: Option<&Progress>, message: impl AsRef<str>) {
        self.outcome.errors += 1;
        match progress {
            Some(p) => error!("[{}] ❌ {}", p, message.as_ref()),
            None => error!("❌ {}", message.as_ref()),
        }
    }

    /// 结束运行，交出计数
    pub fn finish(self) -> Outcome {
        self.outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_call_counts_once() {
        let mut ctx = RunContext::new(AbortHandle::new());
        let progress = Progress::new(1, 2, 1, 3);
        ctx.info(Some(&progress), "只是信息");
        ctx.warn(Some(&progress), "警告");
        ctx.warn(None, "警告");
        ctx.error(None, "错误");

        let outcome = ctx.finish();
        assert_eq!(outcome.warnings, 2);
        assert_eq!(outcome.errors, 1);
        assert_eq!(outcome.exit_code(), 1);
    }

    #[test]
    fn warnings_alone_do_not_fail() {
        let outcome = Outcome {
            warnings: 7,
            errors: 0,
        };
        assert_eq!(outcome.exit_code(), 0);
    }

    #[test]
    fn abort_is_shared_and_idempotent() {
        let handle = AbortHandle::new();
        let ctx = RunContext::new(handle.clone());
        assert!(!ctx.is_aborted());
        handle.abort();
        handle.abort();
        assert!(ctx.is_aborted());
    }
}
