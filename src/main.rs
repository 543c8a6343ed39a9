use anyhow::Result;
use journal_downloader::utils::logging;
use journal_downloader::{load_catalog, logger, BrowserDriver, Config, Downloader};
use tracing::{error, warn};

/// 连续收到这么多次 Ctrl-C 后强制退出
const FORCE_EXIT_SIGNALS: usize = 3;

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::from_env();

    // 初始化日志
    logger::init(config.verbose_logging);
    logger::init_log_file(&config.output_log_file)?;
    logging::log_startup(&config);

    let batch = match load_catalog(&config.catalog_file).await {
        Ok(batch) => batch,
        Err(e) => {
            error!("❌ {:#}", e);
            std::process::exit(1);
        }
    };

    let log_file = config.output_log_file.clone();
    let downloader = Downloader::new(BrowserDriver, config);

    // 第一次 Ctrl-C 请求中断，之后继续按则强制退出
    let abort = downloader.abort_handle();
    tokio::spawn(async move {
        let mut received = 0;
        while tokio::signal::ctrl_c().await.is_ok() {
            received += 1;
            if received >= FORCE_EXIT_SIGNALS {
                error!("强制退出");
                std::process::exit(130);
            }
            warn!(
                "收到中断信号，当前文章完成后停止 (再按 {} 次强制退出)",
                FORCE_EXIT_SIGNALS - received
            );
            abort.abort();
        }
    });

    let summary = downloader.run(&batch).await;

    if let Err(e) = logging::append_run_summary(&log_file, &summary) {
        warn!("写入日志文件失败: {:#}", e);
    }

    std::process::exit(summary.exit_code);
}
