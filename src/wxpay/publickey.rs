// 商户RSA公钥获取
// 走风控网关域名, 需要商户证书

use super::error::WxPayError;
use super::types::SignType;
use super::{Result, WxPay};

/// 风控网关公钥接口地址
const GETPUBLICKEY_URL: &str = "https://fraud.mch.weixin.qq.com/risk/getpublickey";

/// 获取商户RSA公钥
pub async fn get_public_key(pay: &WxPay) -> Result<String> {
    let mut params = pay.base_params();
    // 该接口要求显式携带sign_type
    params.insert("sign_type".to_string(), SignType::Md5.as_str().to_string());
    let result = pay
        .exchange(GETPUBLICKEY_URL, params, SignType::Md5, true)
        .await?;
    result
        .get("pub_key")
        .cloned()
        .ok_or_else(|| WxPayError::Parse("missing pub_key".to_string()))
}
