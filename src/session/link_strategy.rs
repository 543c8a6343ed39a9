//! 下载链接提取策略
//!
//! 文章页面可能同时匹配多个选择器，按列表顺序尝试，第一个非空结果胜出。

use std::future::Future;

use crate::error::DownloadResult;

/// 单个提取策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStrategy {
    /// 取匹配 `<a>` 元素的绝对 href
    Anchor(&'static str),
    /// 取 `<meta name=...>` 的 content
    Meta(&'static str),
}

/// 默认策略链：站点的下载按钮、指向 PDF 的链接、引用元数据
pub const DEFAULT_LINK_STRATEGIES: &[LinkStrategy] = &[
    LinkStrategy::Anchor("a.download-pdf, a[data-track-action='download pdf']"),
    LinkStrategy::Anchor("a[href$='.pdf'], a[href*='/pdf/']"),
    LinkStrategy::Meta("citation_pdf_url"),
];

impl LinkStrategy {
    /// 在页面中执行的脚本，没找到时返回空字符串
    pub fn script(&self) -> String {
        match self {
            LinkStrategy::Anchor(selector) => format!(
                r#"
                (() => {{
                    const el = document.querySelector({});
                    return el && el.href ? el.href : '';
                }})()
                "#,
                js_string(selector)
            ),
            LinkStrategy::Meta(name) => format!(
                r#"
                (() => {{
                    const el = document.querySelector('meta[name="' + {} + '"]');
                    return el && el.content ? new URL(el.content, document.baseURI).href : '';
                }})()
                "#,
                js_string(name)
            ),
        }
    }
}

fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}

/// 去掉空白；空字符串视为没找到
pub fn normalize_candidate(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// 按顺序执行策略，返回第一个命中的策略和链接
///
/// `evaluate` 负责在页面中执行单个策略；出错时立即返回，不再尝试后续策略
pub async fn first_link<F, Fut>(
    strategies: &[LinkStrategy],
    mut evaluate: F,
) -> DownloadResult<Option<(LinkStrategy, String)>>
where
    F: FnMut(LinkStrategy) -> Fut,
    Fut: Future<Output = DownloadResult<Option<String>>>,
{
    for strategy in strategies {
        if let Some(link) = normalize_candidate(evaluate(*strategy).await?) {
            return Ok(Some((*strategy, link)));
        }
    }
    Ok(None)
}
