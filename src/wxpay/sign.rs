// 签名工具函数
// 按字典序拼接非空参数并追加API密钥, 摘要后转大写十六进制

use hmac::{Hmac, Mac};
use md5::{Digest, Md5};
use rand::{distributions::Alphanumeric, Rng};
use sha2::Sha256;

use super::types::{Params, SignType};

type HmacSha256 = Hmac<Sha256>;

/// 随机字符串长度 (协议上限32字符)
const NONCE_LEN: usize = 32;

/// 生成随机字符串
pub fn nonce_str() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(NONCE_LEN)
        .map(char::from)
        .collect()
}

/// 计算参数签名
///
/// 空值与sign字段不参与签名
///
/// # Arguments
/// * `params` - 待签名参数表
/// * `api_key` - 商户API密钥
/// * `sign_type` - 签名算法
///
/// # Returns
/// * 大写十六进制签名字符串
pub fn sign(params: &Params, api_key: &str, sign_type: SignType) -> String {
    let mut pieces: Vec<String> = Vec::with_capacity(params.len() + 1);
    for (key, value) in params {
        if key == "sign" || value.is_empty() {
            continue;
        }
        pieces.push(format!("{}={}", key, value));
    }
    pieces.push(format!("key={}", api_key));
    let plain = pieces.join("&");

    let digest = match sign_type {
        SignType::Md5 => {
            let mut hasher = Md5::new();
            hasher.update(plain.as_bytes());
            hex::encode(hasher.finalize())
        }
        SignType::HmacSha256 => {
            let mut mac = HmacSha256::new_from_slice(api_key.as_bytes())
                .expect("HMAC can take key of any size");
            mac.update(plain.as_bytes());
            hex::encode(mac.finalize().into_bytes())
        }
    };

    digest.to_uppercase()
}

/// 校验参数表自带的sign字段
pub fn verify(params: &Params, api_key: &str, sign_type: SignType) -> bool {
    match params.get("sign") {
        Some(expected) => sign(params, api_key, sign_type).eq_ignore_ascii_case(expected),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 微信支付签名文档示例参数
    fn doc_example_params() -> Params {
        let mut params = Params::new();
        params.insert("appid".to_string(), "wxd930ea5d5a258f4f".to_string());
        params.insert("mch_id".to_string(), "10000100".to_string());
        params.insert("device_info".to_string(), "1000".to_string());
        params.insert("body".to_string(), "test".to_string());
        params.insert("nonce_str".to_string(), "ibuaiVcKdpRxkhJA".to_string());
        params
    }

    const DOC_EXAMPLE_KEY: &str = "192006250b4c09247ec02edce69f6a2d";

    #[test]
    fn test_md5_sign_matches_doc_example() {
        let signature = sign(&doc_example_params(), DOC_EXAMPLE_KEY, SignType::Md5);
        assert_eq!(signature, "9A0A8659F005D6984697E2CA0A9CF3B7");
    }

    #[test]
    fn test_hmac_sha256_sign() {
        let signature = sign(&doc_example_params(), DOC_EXAMPLE_KEY, SignType::HmacSha256);
        assert_eq!(
            signature,
            "6A9AE1657590FD6257D693A078E1C3E4BB6BA4DC30B23E0EE2496E54170DACD6"
        );
    }

    #[test]
    fn test_sign_skips_empty_values_and_sign_field() {
        let mut params = doc_example_params();
        let baseline = sign(&params, DOC_EXAMPLE_KEY, SignType::Md5);

        params.insert("attach".to_string(), String::new());
        params.insert("sign".to_string(), "SHOULD_NOT_PARTICIPATE".to_string());
        assert_eq!(sign(&params, DOC_EXAMPLE_KEY, SignType::Md5), baseline);
    }

    #[test]
    fn test_verify() {
        let mut params = doc_example_params();
        let signature = sign(&params, DOC_EXAMPLE_KEY, SignType::Md5);
        params.insert("sign".to_string(), signature.to_lowercase());
        // 网关偶发返回小写签名, 比较须大小写不敏感
        assert!(verify(&params, DOC_EXAMPLE_KEY, SignType::Md5));

        params.insert("sign".to_string(), "0".repeat(32));
        assert!(!verify(&params, DOC_EXAMPLE_KEY, SignType::Md5));

        params.remove("sign");
        assert!(!verify(&params, DOC_EXAMPLE_KEY, SignType::Md5));
    }

    #[test]
    fn test_nonce_str_shape() {
        let nonce = nonce_str();
        assert_eq!(nonce.len(), 32);
        assert!(nonce.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(nonce, nonce_str());
    }
}
