//! 断点存储 - 业务能力层
//!
//! 每本期刊的输出目录下一个 `cursor` 文件，内容是下一篇要处理的文章序号（十进制文本）。
//! 文件不存在表示从 0 开始；全部文章处理完后删除。

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

use crate::error::{DownloadError, DownloadResult};

/// 断点文件名
pub const CURSOR_FILE_NAME: &str = "cursor";

/// 断点存储
///
/// 职责：
/// - 读写单本期刊的断点
/// - 不关心文章内容和下载流程
#[derive(Debug, Clone)]
pub struct CheckpointStore {
    file_name: String,
}

impl CheckpointStore {
    pub fn new() -> Self {
        Self {
            file_name: CURSOR_FILE_NAME.to_string(),
        }
    }

    /// 使用自定义文件名创建
    pub fn with_file_name(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }

    /// 断点文件路径
    pub fn cursor_path(&self, journal_dir: &Path) -> PathBuf {
        journal_dir.join(&self.file_name)
    }

    /// 读取断点，不存在或内容损坏时返回 0
    pub async fn read_cursor(&self, journal_dir: &Path) -> usize {
        let path = self.cursor_path(journal_dir);
        match fs::read_to_string(&path).await {
            Ok(content) => match content.trim().parse::<usize>() {
                Ok(index) => {
                    debug!("读取断点 {}: {}", path.display(), index);
                    index
                }
                Err(e) => {
                    warn!("断点文件内容无效 ({}): {}，从头开始", path.display(), e);
                    0
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => 0,
            Err(e) => {
                warn!("无法读取断点文件 ({}): {}，从头开始", path.display(), e);
                0
            }
        }
    }

    /// 写入断点
    pub async fn write_cursor(&self, journal_dir: &Path, index: usize) -> DownloadResult<()> {
        let path = self.cursor_path(journal_dir);
        fs::write(&path, index.to_string())
            .await
            .map_err(|source| DownloadError::Checkpoint {
                path: path.clone(),
                source,
            })?;
        debug!("写入断点 {}: {}", path.display(), index);
        Ok(())
    }

    /// 删除断点，文件不存在时忽略
    pub async fn remove_cursor(&self, journal_dir: &Path) -> DownloadResult<()> {
        let path = self.cursor_path(journal_dir);
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!("已删除断点 {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(DownloadError::Checkpoint { path, source }),
        }
    }
}

impl Default for CheckpointStore {
    fn default() -> Self {
        Self::new()
    }
}
