mod common;

use std::time::Duration;

use anyhow::{anyhow, Result};
use common::RecordingPause;
use journal_downloader::services::{with_retry, Attempt, RetryOutcome, RetryPolicy};
use journal_downloader::{AbortHandle, Progress, RunContext};

/// 前 `fail_times` 次失败，之后成功
struct Flaky {
    fail_times: usize,
    calls: usize,
    seen: Vec<Progress>,
}

impl Flaky {
    fn new(fail_times: usize) -> Self {
        Self {
            fail_times,
            calls: 0,
            seen: Vec::new(),
        }
    }
}

impl Attempt for Flaky {
    async fn attempt(&mut self, _ctx: &mut RunContext, progress: &Progress) -> Result<()> {
        self.calls += 1;
        self.seen.push(*progress);
        if self.calls <= self.fail_times {
            Err(anyhow!("服务器返回 503"))
        } else {
            Ok(())
        }
    }
}

fn progress() -> Progress {
    Progress::new(1, 1, 1, 1)
}

#[tokio::test]
async fn always_failing_logs_retries_as_warnings_and_last_as_error() {
    let mut ctx = RunContext::new(AbortHandle::new());
    let pause = RecordingPause::default();
    let mut op = Flaky::new(usize::MAX);

    let result = with_retry(
        &mut ctx,
        &pause,
        RetryPolicy::new(5, Duration::from_secs(10)),
        progress(),
        &mut op,
    )
    .await;

    assert_eq!(result, RetryOutcome::Exhausted);
    assert_eq!(op.calls, 5);
    let outcome = ctx.finish();
    assert_eq!(outcome.warnings, 4);
    assert_eq!(outcome.errors, 1);
    assert_eq!(pause.calls(), vec![Duration::from_secs(10); 4]);
}

#[tokio::test]
async fn zero_interval_retries_without_pausing() {
    let mut ctx = RunContext::new(AbortHandle::new());
    let pause = RecordingPause::default();
    let mut op = Flaky::new(usize::MAX);

    with_retry(&mut ctx, &pause, RetryPolicy::new(3, Duration::ZERO), progress(), &mut op).await;

    assert_eq!(op.calls, 3);
    assert!(pause.calls().is_empty());
    let outcome = ctx.finish();
    assert_eq!(outcome.warnings, 2);
    assert_eq!(outcome.errors, 1);
}

#[tokio::test]
async fn success_stops_further_trials() {
    let mut ctx = RunContext::new(AbortHandle::new());
    let pause = RecordingPause::default();
    let mut op = Flaky::new(2);

    let result = with_retry(
        &mut ctx,
        &pause,
        RetryPolicy::new(5, Duration::from_secs(1)),
        progress(),
        &mut op,
    )
    .await;

    assert_eq!(result, RetryOutcome::Succeeded { trial: 3 });
    assert_eq!(op.calls, 3);
    assert_eq!(pause.calls().len(), 2);
    let outcome = ctx.finish();
    assert_eq!(outcome.errors, 0);
    assert_eq!(outcome.warnings, 2);
}

#[tokio::test]
async fn single_trial_failure_is_an_error_without_warning() {
    let mut ctx = RunContext::new(AbortHandle::new());
    let pause = RecordingPause::default();
    let mut op = Flaky::new(1);

    let result = with_retry(
        &mut ctx,
        &pause,
        RetryPolicy::new(1, Duration::from_secs(30)),
        progress(),
        &mut op,
    )
    .await;

    assert_eq!(result, RetryOutcome::Exhausted);
    assert!(pause.calls().is_empty());
    let outcome = ctx.finish();
    assert_eq!(outcome.warnings, 0);
    assert_eq!(outcome.errors, 1);
}

#[tokio::test]
async fn progress_reports_each_trial() {
    let mut ctx = RunContext::new(AbortHandle::new());
    let pause = RecordingPause::default();
    let mut op = Flaky::new(1);

    with_retry(
        &mut ctx,
        &pause,
        RetryPolicy::new(3, Duration::ZERO),
        Progress::new(4, 9, 1, 3),
        &mut op,
    )
    .await;

    let rendered: Vec<String> = op.seen.iter().map(|p| p.to_string()).collect();
    assert_eq!(rendered, vec!["04/09: 1/3", "04/09: 2/3"]);
}

#[test]
fn zero_trials_still_attempts_once() {
    assert_eq!(RetryPolicy::new(0, Duration::ZERO).max_trials, 1);
}
