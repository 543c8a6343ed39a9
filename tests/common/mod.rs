#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use journal_downloader::{
    AbortHandle, Article, Config, Credentials, DownloadError, DownloadResult, Journal, Pause,
    Session, SessionDriver,
};

/// 模拟文章页面
#[derive(Debug, Clone, Default)]
pub struct MockPage {
    /// 页面上的下载链接
    pub link: Option<String>,
    /// 前几次导航失败，`usize::MAX` 表示一直失败
    pub failures: usize,
    /// 前几次下载失败，`usize::MAX` 表示一直失败
    pub fetch_failures: usize,
}

impl MockPage {
    pub fn with_link(link: &str) -> Self {
        Self {
            link: Some(link.to_string()),
            ..Default::default()
        }
    }

    pub fn without_link() -> Self {
        Self::default()
    }

    pub fn failing(link: &str, failures: usize) -> Self {
        Self {
            link: Some(link.to_string()),
            failures,
            ..Default::default()
        }
    }

    pub fn failing_fetch(link: &str, fetch_failures: usize) -> Self {
        Self {
            link: Some(link.to_string()),
            fetch_failures,
            ..Default::default()
        }
    }
}

#[derive(Debug, Default)]
pub struct MockState {
    pub open_fails: bool,
    pub login_fails: bool,
    pub logout_fails: bool,
    pub pages: HashMap<String, MockPage>,
    pub navigations: Vec<String>,
    pub current: Option<String>,
    pub login_calls: usize,
    pub logout_calls: usize,
    pub close_calls: usize,
    /// 第 n 次导航后触发中断
    pub abort_after: Option<(usize, AbortHandle)>,
}

/// 可在测试中检查状态的模拟驱动
#[derive(Debug, Clone, Default)]
pub struct MockDriver {
    pub state: Arc<Mutex<MockState>>,
}

impl MockDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(self, url: &str, page: MockPage) -> Self {
        self.state.lock().unwrap().pages.insert(url.to_string(), page);
        self
    }

    pub fn update(self, f: impl FnOnce(&mut MockState)) -> Self {
        f(&mut self.state.lock().unwrap());
        self
    }

    pub fn navigations(&self) -> Vec<String> {
        self.state.lock().unwrap().navigations.clone()
    }

    pub fn close_calls(&self) -> usize {
        self.state.lock().unwrap().close_calls
    }

    pub fn logout_calls(&self) -> usize {
        self.state.lock().unwrap().logout_calls
    }

    pub fn login_calls(&self) -> usize {
        self.state.lock().unwrap().login_calls
    }
}

pub struct MockSession {
    state: Arc<Mutex<MockState>>,
}

impl SessionDriver for MockDriver {
    type Session = MockSession;

    async fn open(&self, _config: &Config) -> DownloadResult<MockSession> {
        if self.state.lock().unwrap().open_fails {
            return Err(DownloadError::SessionOpen("浏览器不可用".to_string()));
        }
        Ok(MockSession {
            state: self.state.clone(),
        })
    }
}

impl Session for MockSession {
    async fn login(&mut self, _credentials: &Credentials) -> DownloadResult<()> {
        let mut state = self.state.lock().unwrap();
        state.login_calls += 1;
        if state.login_fails {
            return Err(DownloadError::Login("密码错误".to_string()));
        }
        Ok(())
    }

    async fn logout(&mut self) -> DownloadResult<()> {
        let mut state = self.state.lock().unwrap();
        state.logout_calls += 1;
        if state.logout_fails {
            return Err(DownloadError::Logout("会话已过期".to_string()));
        }
        Ok(())
    }

    async fn navigate(&mut self, url: &str) -> DownloadResult<()> {
        let mut state = self.state.lock().unwrap();
        state.navigations.push(url.to_string());
        state.current = Some(url.to_string());

        let count = state.navigations.len();
        if let Some((after, handle)) = &state.abort_after {
            if count >= *after {
                handle.abort();
            }
        }

        let page = state
            .pages
            .get_mut(url)
            .ok_or_else(|| DownloadError::navigation(url, "404"))?;
        if page.failures > 0 {
            if page.failures != usize::MAX {
                page.failures -= 1;
            }
            return Err(DownloadError::navigation(url, "连接超时"));
        }
        Ok(())
    }

    async fn find_artifact_link(&mut self) -> DownloadResult<Option<String>> {
        let state = self.state.lock().unwrap();
        let link = state
            .current
            .as_ref()
            .and_then(|url| state.pages.get(url))
            .and_then(|page| page.link.clone());
        Ok(link)
    }

    async fn fetch_bytes(&mut self, url: &str) -> DownloadResult<Vec<u8>> {
        let mut state = self.state.lock().unwrap();
        let current = state.current.clone();
        if let Some(page) = current.and_then(|page_url| state.pages.get_mut(&page_url)) {
            if page.fetch_failures > 0 {
                if page.fetch_failures != usize::MAX {
                    page.fetch_failures -= 1;
                }
                return Err(DownloadError::fetch(url, "HTTP 503"));
            }
        }
        Ok(format!("%PDF {}", url).into_bytes())
    }

    async fn close(self) {
        self.state.lock().unwrap().close_calls += 1;
    }
}

/// 只记录等待时长，不真正等待
#[derive(Debug, Clone, Default)]
pub struct RecordingPause {
    pub calls: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingPause {
    pub fn calls(&self) -> Vec<Duration> {
        self.calls.lock().unwrap().clone()
    }
}

impl Pause for RecordingPause {
    async fn pause(&self, duration: Duration) {
        self.calls.lock().unwrap().push(duration);
    }
}

/// 测试用配置：没有等待，输出到临时目录
pub fn test_config(output_dir: &Path) -> Config {
    Config {
        output_dir: output_dir.to_path_buf(),
        source_name: "source".to_string(),
        retry: 0,
        retry_interval_secs: 0,
        throttle_secs: 0,
        ..Default::default()
    }
}

/// 测试期刊，目录名为 `Vol.1 No.<issue>`
pub fn journal(issue: &str, articles: &[(&str, &str)]) -> Journal {
    Journal::new("Test Journal", "1", issue).with_articles(
        articles
            .iter()
            .map(|(title, url)| Article::new(*title, *url))
            .collect(),
    )
}
