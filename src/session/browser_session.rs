//! 基于 chromiumoxide 的会话实现
//!
//! 页面内完成登录和链接提取；文件内容用 reqwest 下载，并带上页面的 Cookie。

use std::future::Future;
use std::time::Duration;

use chromiumoxide::Browser;
use reqwest::header::COOKIE;
use serde_json::json;
use tracing::{debug, info};

use crate::browser;
use crate::config::{Config, Credentials};
use crate::error::{DownloadError, DownloadResult};
use crate::infrastructure::JsExecutor;
use crate::services::retry::{Pause, TokioPause};
use crate::session::link_strategy::{first_link, LinkStrategy, DEFAULT_LINK_STRATEGIES};
use crate::session::{Session, SessionDriver};

/// 提交登录表单后检查跳转结果的次数和间隔
const LOGIN_SETTLE_CHECKS: usize = 20;
const LOGIN_SETTLE_INTERVAL: Duration = Duration::from_millis(500);

/// 打开浏览器会话
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserDriver;

impl SessionDriver for BrowserDriver {
    type Session = BrowserSession;

    async fn open(&self, config: &Config) -> DownloadResult<BrowserSession> {
        let (browser, page, owns_browser) = match config.browser_debug_port {
            Some(port) => {
                let (browser, page) = browser::connect_to_browser(port).await?;
                (browser, page, false)
            }
            None => {
                let (browser, page) =
                    browser::launch_headless_browser(config.chrome_executable.as_deref()).await?;
                (browser, page, true)
            }
        };

        let http = reqwest::Client::builder()
            .timeout(config.fetch_timeout())
            .build()
            .map_err(|e| DownloadError::SessionOpen(format!("创建 HTTP 客户端失败: {}", e)))?;

        Ok(BrowserSession {
            browser,
            executor: JsExecutor::new(page),
            http,
            login_url: config.login_url.clone(),
            logout_url: config.logout_url.clone(),
            strategies: DEFAULT_LINK_STRATEGIES.to_vec(),
            owns_browser,
        })
    }
}

/// 浏览器会话
pub struct BrowserSession {
    browser: Browser,
    executor: JsExecutor,
    http: reqwest::Client,
    login_url: String,
    logout_url: String,
    strategies: Vec<LinkStrategy>,
    /// 自己启动的浏览器在关闭时一并退出；连接的浏览器只关闭页面
    owns_browser: bool,
}

impl BrowserSession {
    async fn login_form_present(&self) -> DownloadResult<bool> {
        self.executor
            .eval_as::<bool>("document.querySelector('input[type=\"password\"]') !== null")
            .await
    }
}

impl Session for BrowserSession {
    async fn login(&mut self, credentials: &Credentials) -> DownloadResult<()> {
        if self.login_url.is_empty() {
            return Err(DownloadError::Login("未配置登录地址".to_string()));
        }

        info!("🔐 正在登录: {}", self.login_url);
        self.executor
            .goto(&self.login_url)
            .await
            .map_err(|e| DownloadError::Login(e.to_string()))?;

        let js_code = format!(
            r#"
            (() => {{
                const user = document.querySelector('input[type="email"], input[name="username"], input[name="email"], input[type="text"]');
                const pass = document.querySelector('input[type="password"]');
                if (!user || !pass) return false;
                const fill = (el, value) => {{
                    el.focus();
                    el.value = value;
                    el.dispatchEvent(new Event('input', {{ bubbles: true }}));
                    el.dispatchEvent(new Event('change', {{ bubbles: true }}));
                }};
                fill(user, {});
                fill(pass, {});
                const form = pass.form;
                const submit = (form && form.querySelector('[type="submit"]')) || document.querySelector('button[type="submit"]');
                if (submit) {{ submit.click(); }} else if (form) {{ form.submit(); }} else {{ return false; }}
                return true;
            }})()
            "#,
            json!(credentials.username),
            json!(credentials.password)
        );

        let submitted = self
            .executor
            .eval_as::<bool>(js_code)
            .await
            .map_err(|e| DownloadError::Login(e.to_string()))?;
        if !submitted {
            return Err(DownloadError::Login("页面上找不到登录表单".to_string()));
        }

        let this = &*self;
        wait_login_settled(
            &TokioPause,
            LOGIN_SETTLE_CHECKS,
            LOGIN_SETTLE_INTERVAL,
            || this.login_form_present(),
        )
        .await?;

        info!("✓ 登录成功");
        Ok(())
    }

    async fn logout(&mut self) -> DownloadResult<()> {
        if self.logout_url.is_empty() {
            debug!("未配置退出地址，跳过");
            return Ok(());
        }

        info!("🔓 正在退出登录");
        self.executor
            .goto(&self.logout_url)
            .await
            .map_err(|e| DownloadError::Logout(e.to_string()))?;
        Ok(())
    }

    async fn navigate(&mut self, url: &str) -> DownloadResult<()> {
        debug!("导航到: {}", url);
        self.executor.goto(url).await
    }

    async fn find_artifact_link(&mut self) -> DownloadResult<Option<String>> {
        let executor = &self.executor;
        let found = first_link(&self.strategies, |strategy| async move {
            executor.eval_optional::<String>(strategy.script()).await
        })
        .await?;

        Ok(found.map(|(strategy, link)| {
            debug!("链接策略 {:?} 命中: {}", strategy, link);
            link
        }))
    }

    async fn fetch_bytes(&mut self, url: &str) -> DownloadResult<Vec<u8>> {
        let cookies = self.executor.cookie_header().await?;

        let response = self
            .http
            .get(url)
            .header(COOKIE, cookies)
            .send()
            .await
            .map_err(|e| DownloadError::fetch(url, e))?
            .error_for_status()
            .map_err(|e| DownloadError::fetch(url, e))?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| DownloadError::fetch(url, e))?;
        debug!("下载完成: {} ({} 字节)", url, bytes.len());

        Ok(bytes.to_vec())
    }

    async fn close(self) {
        let BrowserSession {
            mut browser,
            executor,
            owns_browser,
            ..
        } = self;

        if owns_browser {
            if let Err(e) = browser.close().await {
                info!("关闭浏览器时出现问题: {}", e);
            }
            if let Err(e) = browser.wait().await {
                debug!("等待浏览器进程退出失败: {}", e);
            }
        } else if let Err(e) = executor.into_page().close().await {
            info!("关闭页面时出现问题: {}", e);
        }
        info!("浏览器会话已关闭");
    }
}

/// 等待登录表单消失
///
/// 表单提交后页面可能还没开始跳转，也可能正在跳转（此时脚本会失败），
/// 所以反复检查，直到密码框消失或次数用完。
async fn wait_login_settled<P, F, Fut>(
    pause: &P,
    checks: usize,
    interval: Duration,
    mut form_present: F,
) -> DownloadResult<()>
where
    P: Pause,
    F: FnMut() -> Fut,
    Fut: Future<Output = DownloadResult<bool>>,
{
    for _ in 0..checks {
        pause.pause(interval).await;
        match form_present().await {
            Ok(false) => return Ok(()),
            Ok(true) => {}
            Err(e) => debug!("页面跳转中: {}", e),
        }
    }
    Err(DownloadError::Login("提交后仍停留在登录页".to_string()))
}
