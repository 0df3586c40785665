// 通知回调与客户端支付参数
// 支付结果通知验签, 退款通知req_info解密, 预支付应答二次签名

use aes::cipher::{generic_array::GenericArray, BlockDecrypt, KeyInit};
use aes::Aes256;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use md5::{Digest, Md5};

use super::error::{Result, WxPayError};
use super::types::{Params, SignType};
use super::{check_result, sign, xml, WxPay};

/// 解析并验签支付结果通知
pub fn payment_notify(pay: &WxPay, body: &str) -> Result<Params> {
    let params = xml::from_xml(body)?;
    check_result(&params)?;
    let sign_type = match params.get("sign_type").map(String::as_str) {
        Some("HMAC-SHA256") => SignType::HmacSha256,
        _ => SignType::Md5,
    };
    if !sign::verify(&params, &pay.config.api_key, sign_type) {
        return Err(WxPayError::BadSignature);
    }
    Ok(params)
}

/// 解析退款结果通知并解密req_info明细
///
/// 退款通知不带签名, 明细以商户API密钥派生的AES-256-ECB密钥加密,
/// 解密出的字段合并进返回的参数表
pub fn refund_notify(pay: &WxPay, body: &str) -> Result<Params> {
    let mut params = xml::from_xml(body)?;
    check_result(&params)?;
    let cipher_text = params
        .remove("req_info")
        .ok_or_else(|| WxPayError::Parse("missing req_info".to_string()))?;
    let detail = decrypt_req_info(&cipher_text, &pay.config.api_key)?;
    params.extend(detail);
    Ok(params)
}

/// 通知应答: 接收成功
pub fn response_success() -> String {
    "<xml><return_code><![CDATA[SUCCESS]]></return_code><return_msg><![CDATA[OK]]></return_msg></xml>"
        .to_string()
}

/// 通知应答: 接收失败, 网关将按策略重试
pub fn response_fail(msg: &str) -> String {
    format!(
        "<xml><return_code><![CDATA[FAIL]]></return_code><return_msg><![CDATA[{}]]></return_msg></xml>",
        msg
    )
}

/// 构造APP拉起支付所需的客户端参数并签名
pub fn app_payment_params(pay: &WxPay, prepay_id: &str) -> Params {
    let mut params = Params::new();
    params.insert("appid".to_string(), pay.config.appid.clone());
    params.insert("partnerid".to_string(), pay.config.mchid.clone());
    params.insert("prepayid".to_string(), prepay_id.to_string());
    params.insert("package".to_string(), "Sign=WXPay".to_string());
    params.insert("noncestr".to_string(), sign::nonce_str());
    params.insert(
        "timestamp".to_string(),
        chrono::Utc::now().timestamp().to_string(),
    );
    let signature = sign::sign(&params, &pay.config.api_key, SignType::Md5);
    params.insert("sign".to_string(), signature);
    params
}

/// 解密req_info密文
///
/// AES-256-ECB, 密钥为API密钥MD5摘要的小写十六进制, PKCS#7填充
fn decrypt_req_info(cipher_b64: &str, api_key: &str) -> Result<Params> {
    let data = BASE64
        .decode(cipher_b64.trim())
        .map_err(|e| WxPayError::Decrypt(format!("base64: {}", e)))?;
    if data.is_empty() || data.len() % 16 != 0 {
        return Err(WxPayError::Decrypt(
            "ciphertext is not block aligned".to_string(),
        ));
    }

    let mut hasher = Md5::new();
    hasher.update(api_key.as_bytes());
    let key = hex::encode(hasher.finalize());
    let cipher = Aes256::new_from_slice(key.as_bytes())
        .map_err(|e| WxPayError::Decrypt(e.to_string()))?;

    let mut plain = Vec::with_capacity(data.len());
    for chunk in data.chunks_exact(16) {
        let mut block = GenericArray::clone_from_slice(chunk);
        cipher.decrypt_block(&mut block);
        plain.extend_from_slice(&block);
    }

    let pad = usize::from(*plain.last().unwrap_or(&0));
    if pad == 0 || pad > 16 || pad > plain.len() {
        return Err(WxPayError::Decrypt("bad padding".to_string()));
    }
    plain.truncate(plain.len() - pad);

    let text = String::from_utf8(plain)
        .map_err(|_| WxPayError::Decrypt("plaintext is not utf-8".to_string()))?;
    xml::from_xml(&text)
}

#[cfg(test)]
mod tests {
    use super::super::tests::test_pay;
    use super::*;

    fn signed_notify_body(pay: &WxPay) -> String {
        let mut params = Params::new();
        params.insert("return_code".to_string(), "SUCCESS".to_string());
        params.insert("result_code".to_string(), "SUCCESS".to_string());
        params.insert("appid".to_string(), pay.config.appid.clone());
        params.insert("mch_id".to_string(), pay.config.mchid.clone());
        params.insert("out_trade_no".to_string(), "NO.10086".to_string());
        params.insert("transaction_id".to_string(), "4200000000202008120000".to_string());
        params.insert("total_fee".to_string(), "201".to_string());
        params.insert("nonce_str".to_string(), "ibuaiVcKdpRxkhJA".to_string());
        let signature = sign::sign(&params, &pay.config.api_key, SignType::Md5);
        params.insert("sign".to_string(), signature);
        xml::to_xml(&params)
    }

    #[test]
    fn test_payment_notify_accepts_signed_body() {
        let pay = test_pay();
        let body = signed_notify_body(&pay);
        let params = payment_notify(&pay, &body).unwrap();
        assert_eq!(params.get("out_trade_no").unwrap(), "NO.10086");
        assert_eq!(params.get("total_fee").unwrap(), "201");
    }

    #[test]
    fn test_payment_notify_rejects_tampered_body() {
        let pay = test_pay();
        let body = signed_notify_body(&pay).replace("201", "1");
        assert!(matches!(
            payment_notify(&pay, &body),
            Err(WxPayError::BadSignature)
        ));
    }

    #[test]
    fn test_payment_notify_rejects_gateway_fail() {
        let pay = test_pay();
        let body = "<xml><return_code><![CDATA[FAIL]]></return_code><return_msg><![CDATA[busy]]></return_msg></xml>";
        assert!(matches!(
            payment_notify(&pay, body),
            Err(WxPayError::Gateway { .. })
        ));
    }

    // 密文由 api_key=192006250b4c09247ec02edce69f6a2d 的派生密钥离线加密生成
    const REQ_INFO_CIPHER: &str = "9qsI8MWfniYpyz+bDkv0WvM+Q/yN4apQiodR8gB0AZ3SiriaJTpLMgt2o7K72+57sH8vY/H7M6XsY5trwzYXUqk536YX/dQ+yd2McPLw+jmEDhgGIKulWDAjHBZRUiATENQlDVl4YcM6G2ZaZT1fpj0bt5Kp82THKrtbqD7R0Vo=";

    #[test]
    fn test_refund_notify_decrypts_req_info() {
        let pay = test_pay();
        let body = format!(
            "<xml><return_code><![CDATA[SUCCESS]]></return_code><mch_id><![CDATA[10000100]]></mch_id><req_info><![CDATA[{}]]></req_info></xml>",
            REQ_INFO_CIPHER
        );
        let params = refund_notify(&pay, &body).unwrap();
        assert_eq!(params.get("out_refund_no").unwrap(), "NO.10086_REFUND");
        assert_eq!(params.get("refund_status").unwrap(), "SUCCESS");
        assert!(!params.contains_key("req_info"));
    }

    #[test]
    fn test_refund_notify_rejects_bad_cipher() {
        let pay = test_pay();
        let body = "<xml><return_code><![CDATA[SUCCESS]]></return_code><req_info><![CDATA[AAAA]]></req_info></xml>";
        assert!(matches!(
            refund_notify(&pay, body),
            Err(WxPayError::Decrypt(_))
        ));

        let body = "<xml><return_code><![CDATA[SUCCESS]]></return_code></xml>";
        assert!(matches!(refund_notify(&pay, body), Err(WxPayError::Parse(_))));
    }

    #[test]
    fn test_app_payment_params_are_signed() {
        let pay = test_pay();
        let params = app_payment_params(&pay, "wx20200812prepay");
        assert_eq!(params.get("appid").unwrap(), &pay.config.appid);
        assert_eq!(params.get("partnerid").unwrap(), &pay.config.mchid);
        assert_eq!(params.get("prepayid").unwrap(), "wx20200812prepay");
        assert_eq!(params.get("package").unwrap(), "Sign=WXPay");
        assert!(sign::verify(&params, &pay.config.api_key, SignType::Md5));
    }

    #[test]
    fn test_response_bodies() {
        assert!(response_success().contains("SUCCESS"));
        let fail = response_fail("invalid signature");
        assert!(fail.contains("FAIL"));
        assert!(fail.contains("invalid signature"));
    }
}
