use crate::error::DownloadError;
use crate::models::catalog::Batch;
use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

/// 解析 TOML 格式的期刊清单
///
/// ```toml
/// [[journals]]
/// name = "Journal of Examples"
/// volume = "12"
/// issue = "3"
/// date = "2024-03"
///
/// [[journals.articles]]
/// title = "On Examples"
/// url = "https://example.org/article/1"
/// ```
pub fn parse_catalog(content: &str, source: &Path) -> Result<Batch> {
    let batch: Batch = toml::from_str(content).map_err(|e| DownloadError::Catalog {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(batch)
}

/// 从 TOML 文件加载期刊清单
pub async fn load_catalog(path: &Path) -> Result<Batch> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("无法读取清单文件: {}", path.display()))?;

    let batch = parse_catalog(&content, path)?;

    tracing::info!(
        "清单加载完成: {} 本期刊, {} 篇文章",
        batch.journals.len(),
        batch.article_count()
    );

    Ok(batch)
}
