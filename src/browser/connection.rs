use chromiumoxide::{Browser, Page};
use futures::StreamExt;
use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::error::{DownloadError, DownloadResult};

/// 连接到已开启远程调试的浏览器，并新建一个页面
pub async fn connect_to_browser(port: u16) -> DownloadResult<(Browser, Page)> {
    let browser_url = format!("http://localhost:{}", port);
    info!("正在连接到浏览器: {}", browser_url);

    let (browser, mut handler) = Browser::connect(&browser_url).await.map_err(|e| {
        error!("连接浏览器失败: {}", e);
        DownloadError::SessionOpen(format!("无法连接到 {}: {}", browser_url, e))
    })?;
    debug!("浏览器连接成功");

    // 在后台处理浏览器事件
    tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    // 等待浏览器状态同步
    sleep(tokio::time::Duration::from_millis(300)).await;

    let page = browser.new_page("about:blank").await.map_err(|e| {
        error!("创建新页面失败: {}", e);
        DownloadError::SessionOpen(format!("创建页面失败: {}", e))
    })?;
    debug!("已创建下载用页面");

    Ok((browser, page))
}
