//! 期刊目录数据模型
//!
//! 一次运行处理一个 `Batch`：按顺序的期刊列表，每本期刊包含按顺序的文章。
//! 文章在期刊内只按位置区分，位置就是断点续传的单位。

use serde::{Deserialize, Serialize};

use crate::models::naming::sanitize_file_name;

/// 一次下载任务的全部期刊
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Batch {
    #[serde(default)]
    pub journals: Vec<Journal>,
}

impl Batch {
    pub fn new(journals: Vec<Journal>) -> Self {
        Self { journals }
    }

    /// 所有期刊的文章总数
    pub fn article_count(&self) -> usize {
        self.journals.iter().map(|j| j.articles.len()).sum()
    }
}

/// 一期期刊
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Journal {
    pub name: String,
    pub volume: String,
    pub issue: String,
    /// 出版日期，如 "2024-03"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default)]
    pub articles: Vec<Article>,
}

impl Journal {
    pub fn new(name: impl Into<String>, volume: impl Into<String>, issue: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            volume: volume.into(),
            issue: issue.into(),
            date: None,
            articles: Vec::new(),
        }
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn with_articles(mut self, articles: Vec<Article>) -> Self {
        self.articles = articles;
        self
    }

    /// 由期刊标识得到的目录名：`<日期> Vol.<卷> No.<期>`
    pub fn folder_name(&self) -> String {
        let issue_part = format!("Vol.{} No.{}", self.volume, self.issue);
        let raw = match self.date.as_deref().map(str::trim) {
            Some(date) if !date.is_empty() => format!("{} {}", date, issue_part),
            _ => issue_part,
        };
        sanitize_file_name(&raw)
    }

    /// 日志中显示的期刊标识
    pub fn label(&self) -> String {
        format!("{} Vol.{} No.{}", self.name, self.volume, self.issue)
    }
}

/// 一篇文章
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub url: String,
}

impl Article {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}
