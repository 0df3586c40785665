// Native支付辅助接口
// 长链接转短链接, 用于扫码支付场景缩短二维码内容

use super::error::WxPayError;
use super::types::SignType;
use super::{Result, WxPay};

/// 长链接转短链接
pub async fn short_url(pay: &WxPay, long_url: &str) -> Result<String> {
    let mut params = pay.base_params();
    params.insert("appid".to_string(), pay.config.appid.clone());
    params.insert("long_url".to_string(), long_url.to_string());
    let result = pay
        .exchange("/tools/shorturl", params, SignType::Md5, false)
        .await?;
    result
        .get("short_url")
        .cloned()
        .ok_or_else(|| WxPayError::Parse("missing short_url".to_string()))
}
