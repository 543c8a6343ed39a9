//! 页面执行器 - 基础设施层
//!
//! 持有唯一的 page 资源，只暴露"导航、执行 JS、读取 Cookie"的能力

use chromiumoxide::Page;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use crate::error::{DownloadError, DownloadResult};

/// JS 执行器
///
/// 职责：
/// - 持有唯一的 Page 资源
/// - 不认识期刊 / 文章
/// - 不处理下载流程
pub struct JsExecutor {
    page: Page,
}

impl JsExecutor {
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    /// 交出 page（用于关闭）
    pub fn into_page(self) -> Page {
        self.page
    }

    /// 导航到指定地址，等待页面加载完成
    pub async fn goto(&self, url: &str) -> DownloadResult<()> {
        self.page
            .goto(url)
            .await
            .map_err(|e| DownloadError::navigation(url, e))?;
        Ok(())
    }

    /// 执行 JS 代码并返回 JSON 结果
    pub async fn eval(&self, js_code: impl Into<String>) -> DownloadResult<JsonValue> {
        let result = self.page.evaluate(js_code.into()).await?;
        Ok(result.value().cloned().unwrap_or(JsonValue::Null))
    }

    /// 执行 JS 代码并反序列化为指定类型
    pub async fn eval_as<T: DeserializeOwned>(&self, js_code: impl Into<String>) -> DownloadResult<T> {
        let json_value = self.eval(js_code).await?;
        let typed_value = serde_json::from_value(json_value)?;
        Ok(typed_value)
    }

    /// 执行 JS 代码，`null` / `undefined` 视为 `None`
    pub async fn eval_optional<T: DeserializeOwned>(
        &self,
        js_code: impl Into<String>,
    ) -> DownloadResult<Option<T>> {
        let result = self.page.evaluate(js_code.into()).await?;
        optional_value(result.value())
    }

    /// 当前页面的 Cookie，拼成请求头格式
    pub async fn cookie_header(&self) -> DownloadResult<String> {
        let cookies = self.page.get_cookies().await?;
        Ok(cookies
            .iter()
            .map(|c| format!("{}={}", c.name, c.value))
            .collect::<Vec<_>>()
            .join("; "))
    }
}

/// CDP 对 `null` 不返回 value 字段，两种情况都当作没有值
pub fn optional_value<T: DeserializeOwned>(value: Option<&JsonValue>) -> DownloadResult<Option<T>> {
    match value {
        None | Some(JsonValue::Null) => Ok(None),
        Some(v) => Ok(Some(serde_json::from_value(v.clone())?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_value_is_none() {
        let value: Option<String> = optional_value(None).unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn null_value_is_none() {
        let null = json!(null);
        let value: Option<String> = optional_value(Some(&null)).unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn string_value_is_kept() {
        let link = json!("https://site/a.pdf");
        let value: Option<String> = optional_value(Some(&link)).unwrap();
        assert_eq!(value.as_deref(), Some("https://site/a.pdf"));
    }

    #[test]
    fn mismatched_type_is_an_error() {
        let number = json!(42);
        assert!(optional_value::<String>(Some(&number)).is_err());
    }
}
