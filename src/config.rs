use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 浏览器调试端口（设置后连接已有浏览器，否则启动无头浏览器）
    pub browser_debug_port: Option<u16>,
    /// 无头模式下使用的浏览器可执行文件
    pub chrome_executable: Option<String>,
    /// 登录页地址
    pub login_url: String,
    /// 退出登录地址（为空时跳过导航）
    pub logout_url: String,
    pub username: String,
    pub password: String,
    /// 数据源名称，作为输出目录的第一层
    pub source_name: String,
    /// 输出根目录
    pub output_dir: PathBuf,
    /// 期刊目录清单（TOML）
    pub catalog_file: PathBuf,
    // --- 重试与限速 ---
    /// 每篇文章失败后的重试次数
    pub retry: usize,
    /// 两次尝试之间的等待秒数
    pub retry_interval_secs: u64,
    /// 每篇文章保存成功后的等待秒数
    pub throttle_secs: u64,
    /// 单次下载超时秒数
    pub fetch_timeout_secs: u64,
    /// 保存文件的扩展名
    pub artifact_extension: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            browser_debug_port: None,
            chrome_executable: None,
            login_url: String::new(),
            logout_url: String::new(),
            username: String::new(),
            password: String::new(),
            source_name: "journals".to_string(),
            output_dir: PathBuf::from("output"),
            catalog_file: PathBuf::from("catalog.toml"),
            retry: 3,
            retry_interval_secs: 10,
            throttle_secs: 3,
            fetch_timeout_secs: 60,
            artifact_extension: "pdf".to_string(),
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            browser_debug_port: std::env::var("BROWSER_DEBUG_PORT").ok().and_then(|v| v.parse().ok()).or(default.browser_debug_port),
            chrome_executable: std::env::var("CHROME_EXECUTABLE").ok().or(default.chrome_executable),
            login_url: std::env::var("LOGIN_URL").unwrap_or(default.login_url),
            logout_url: std::env::var("LOGOUT_URL").unwrap_or(default.logout_url),
            username: std::env::var("DOWNLOAD_USERNAME").unwrap_or(default.username),
            password: std::env::var("DOWNLOAD_PASSWORD").unwrap_or(default.password),
            source_name: std::env::var("SOURCE_NAME").unwrap_or(default.source_name),
            output_dir: std::env::var("OUTPUT_DIR").map(PathBuf::from).unwrap_or(default.output_dir),
            catalog_file: std::env::var("CATALOG_FILE").map(PathBuf::from).unwrap_or(default.catalog_file),
            retry: std::env::var("RETRY").ok().and_then(|v| v.parse().ok()).unwrap_or(default.retry),
            retry_interval_secs: std::env::var("RETRY_INTERVAL").ok().and_then(|v| v.parse().ok()).unwrap_or(default.retry_interval_secs),
            throttle_secs: std::env::var("THROTTLE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.throttle_secs),
            fetch_timeout_secs: std::env::var("FETCH_TIMEOUT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.fetch_timeout_secs),
            artifact_extension: std::env::var("ARTIFACT_EXTENSION").unwrap_or(default.artifact_extension),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
        }
    }

    /// 每篇文章最多尝试的次数（首次 + 重试）
    pub fn max_trials(&self) -> usize {
        1 + self.retry
    }

    pub fn retry_interval(&self) -> Duration {
        Duration::from_secs(self.retry_interval_secs)
    }

    pub fn throttle(&self) -> Duration {
        Duration::from_secs(self.throttle_secs)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

/// 登录凭据
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}
