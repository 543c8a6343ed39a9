use std::path::Path;

use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::error::{DownloadError, DownloadResult};

/// 启动无头浏览器并打开一个空白页面
pub async fn launch_headless_browser(
    chrome_executable: Option<&str>,
) -> DownloadResult<(Browser, Page)> {
    info!("🚀 启动无头浏览器...");

    let mut builder = BrowserConfig::builder().new_headless_mode().args(vec![
        "--disable-gpu",
        "--no-sandbox",
        "--disable-dev-shm-usage",
    ]);
    if let Some(executable) = chrome_executable {
        debug!("使用浏览器: {}", executable);
        builder = builder.chrome_executable(Path::new(executable));
    }

    let config = builder.build().map_err(|e| {
        error!("配置无头浏览器失败: {}", e);
        DownloadError::SessionOpen(format!("配置无头浏览器失败: {}", e))
    })?;

    let (browser, mut handler) = Browser::launch(config).await.map_err(|e| {
        error!("启动无头浏览器失败: {}", e);
        DownloadError::SessionOpen(format!("启动无头浏览器失败: {}", e))
    })?;
    debug!("无头浏览器启动成功");

    // 在后台处理浏览器事件
    tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    sleep(tokio::time::Duration::from_millis(300)).await;

    let page = browser.new_page("about:blank").await.map_err(|e| {
        error!("创建页面失败: {}", e);
        DownloadError::SessionOpen(format!("创建页面失败: {}", e))
    })?;

    info!("✅ 无头浏览器已就绪");
    Ok((browser, page))
}
