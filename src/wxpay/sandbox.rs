// 沙箱环境接口
// 用正式API密钥换取沙箱签名密钥, 仅在启动阶段调用

use super::error::WxPayError;
use super::types::SignType;
use super::{Result, WxPay};

/// 换取沙箱签名密钥
///
/// 请求以正式API密钥签名, 换取成功后调用方负责替换客户端密钥
pub async fn get_sign_key(pay: &WxPay) -> Result<String> {
    let params = pay.base_params();
    let result = pay
        .exchange("/pay/getsignkey", params, SignType::Md5, false)
        .await?;
    result
        .get("sandbox_signkey")
        .cloned()
        .ok_or_else(|| WxPayError::Parse("missing sandbox_signkey".to_string()))
}
