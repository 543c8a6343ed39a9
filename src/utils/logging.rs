//! 日志工具模块
//!
//! 提供运行过程中的日志格式化和输出辅助函数

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::config::Config;
use crate::models::{Batch, Journal};
use crate::orchestrator::{JournalStats, RunSummary};

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 期刊批量下载");
    info!("📁 输出目录: {}", config.output_dir.display());
    info!(
        "🔁 重试: {} 次, 间隔 {} 秒, 限速 {} 秒",
        config.retry, config.retry_interval_secs, config.throttle_secs
    );
    info!("{}", "=".repeat(60));
}

/// 记录批次开始信息
pub fn log_run_start(config: &Config, batch: &Batch) {
    info!(
        "✓ 共 {} 本期刊, {} 篇文章, 数据源: {}",
        batch.journals.len(),
        batch.article_count(),
        config.source_name
    );
}

/// 记录期刊开始信息
///
/// # 参数
/// - `journal_num`: 期刊编号（从 1 开始）
/// - `total`: 期刊总数
pub fn log_journal_start(journal_num: usize, total: usize, journal: &Journal, dir: &Path) {
    info!("\n{}", "=".repeat(60));
    info!("📚 [{}/{}] {}", journal_num, total, journal.label());
    info!("📄 文章数: {}", journal.articles.len());
    info!("📁 目录: {}", dir.display());
    info!("{}", "=".repeat(60));
}

/// 记录期刊完成信息
pub fn log_journal_complete(journal_num: usize, stats: &JournalStats, total: usize) {
    info!("\n{}", "─".repeat(60));
    info!(
        "✓ 第 {} 本期刊完成: 本次处理 {}, 失败 {}, 共 {} 篇 (从第 {} 篇开始)",
        journal_num,
        stats.completed + stats.failed,
        stats.failed,
        total,
        stats.resumed_at + 1
    );
    info!("{}", "─".repeat(60));
}

/// 打印最终统计信息
pub fn print_final_stats(summary: &RunSummary) {
    info!("\n{}", "=".repeat(60));
    info!("📊 下载结束统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("⚠️ 警告: {}", summary.outcome.warnings);
    info!("❌ 错误: {}", summary.outcome.errors);
    info!("⏱️ 用时: {:.1} 秒", summary.elapsed.as_secs_f64());
    info!("退出码: {}", summary.exit_code);
    info!("{}", "=".repeat(60));
}

/// 把运行结果追加到日志文件
pub fn append_run_summary(log_file_path: &str, summary: &RunSummary) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)
        .with_context(|| format!("无法打开日志文件: {}", log_file_path))?;

    let line = format!(
        "{} | 警告 {} | 错误 {} | 用时 {:.1} 秒 | 退出码 {}\n",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        summary.outcome.warnings,
        summary.outcome.errors,
        summary.elapsed.as_secs_f64(),
        summary.exit_code
    );
    file.write_all(line.as_bytes())?;
    Ok(())
}

/// 截断长文本用于日志显示
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
