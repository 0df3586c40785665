// 微信支付v2网关客户端
// 负责参数签名、XML封包、HTTPS传输与应答解析, 证书接口走双向TLS

pub mod download;
pub mod error;
pub mod native;
pub mod order;
pub mod profitsharing;
pub mod publickey;
pub mod refund;
pub mod sandbox;
pub mod server;
pub mod sign;
pub mod types;
pub mod xml;

pub use error::{Result, WxPayError};
pub use types::{Params, SignType};

use std::time::Duration;

use reqwest::Client;

/// 正式环境网关地址
const API_HOST: &str = "https://api.mch.weixin.qq.com";
/// 沙箱环境路径前缀
const SANDBOX_PREFIX: &str = "/sandboxnew";
/// 网关请求超时时间 (秒)
const REQUEST_TIMEOUT: u64 = 30;

/// 微信支付商户配置
#[derive(Debug, Clone)]
pub struct Config {
    /// 应用ID
    pub appid: String,
    /// 商户号
    pub mchid: String,
    /// API签名密钥 (沙箱模式下启动时被沙箱签名密钥替换)
    pub api_key: String,
    /// PKCS#12商户证书路径, 证书接口必需, 导入密码为商户号
    pub cert: Option<String>,
    /// 沙箱模式开关
    pub sandbox: bool,
}

/// 微信支付网关客户端
pub struct WxPay {
    pub config: Config,
    client: Client,
    secure_client: Option<Client>,
}

impl WxPay {
    /// 创建网关客户端, 配置了商户证书时同时构建双向TLS客户端
    pub fn new(config: Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT))
            .user_agent(concat!("wxpay-demo/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let secure_client = match &config.cert {
            Some(path) => {
                let der = std::fs::read(path)
                    .map_err(|e| WxPayError::Cert(format!("read {}: {}", path, e)))?;
                let identity = reqwest::Identity::from_pkcs12_der(&der, &config.mchid)
                    .map_err(|e| WxPayError::Cert(e.to_string()))?;
                Some(
                    Client::builder()
                        .timeout(Duration::from_secs(REQUEST_TIMEOUT))
                        .user_agent(concat!("wxpay-demo/", env!("CARGO_PKG_VERSION")))
                        .identity(identity)
                        .build()?,
                )
            }
            None => None,
        };

        Ok(Self {
            config,
            client,
            secure_client,
        })
    }

    /// 替换API密钥, 仅在启动阶段沙箱密钥换取成功后调用一次
    pub fn set_api_key(&mut self, api_key: String) {
        self.config.api_key = api_key;
    }

    /// 拼接网关地址, 沙箱模式下走/sandboxnew路径
    pub(crate) fn endpoint(&self, path: &str) -> String {
        if path.starts_with("https://") {
            path.to_string()
        } else if self.config.sandbox {
            format!("{}{}{}", API_HOST, SANDBOX_PREFIX, path)
        } else {
            format!("{}{}", API_HOST, path)
        }
    }

    /// 商户身份公共参数 (mch_id + nonce_str)
    pub(crate) fn base_params(&self) -> Params {
        let mut params = Params::new();
        params.insert("mch_id".to_string(), self.config.mchid.clone());
        params.insert("nonce_str".to_string(), sign::nonce_str());
        params
    }

    /// 填入sign_type并生成签名
    pub(crate) fn sign_params(&self, params: &mut Params, sign_type: SignType) {
        if sign_type == SignType::HmacSha256 {
            params.insert("sign_type".to_string(), sign_type.as_str().to_string());
        }
        let signature = sign::sign(params, &self.config.api_key, sign_type);
        params.insert("sign".to_string(), signature);
    }

    /// 选择传输客户端, 沙箱网关不校验客户端证书
    fn transport(&self, secure: bool) -> Result<&Client> {
        if !secure {
            return Ok(&self.client);
        }
        match &self.secure_client {
            Some(client) => Ok(client),
            None if self.config.sandbox => Ok(&self.client),
            None => Err(WxPayError::CertMissing),
        }
    }

    /// 发送XML报文并返回原始应答
    pub(crate) async fn post(&self, url: &str, params: &Params, secure: bool) -> Result<Vec<u8>> {
        let body = xml::to_xml(params);
        let response = self
            .transport(secure)?
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "text/xml; charset=utf-8")
            .body(body)
            .send()
            .await?;
        let bytes = response.error_for_status()?.bytes().await?;
        Ok(bytes.to_vec())
    }

    /// 标准接口调用: 签名 -> 封包 -> POST -> 解析 -> 校验结果与应答签名
    pub(crate) async fn exchange(
        &self,
        path: &str,
        mut params: Params,
        sign_type: SignType,
        secure: bool,
    ) -> Result<Params> {
        self.sign_params(&mut params, sign_type);
        let raw = self.post(&self.endpoint(path), &params, secure).await?;
        let text = String::from_utf8(raw)
            .map_err(|e| WxPayError::Parse(format!("non-utf8 response: {}", e)))?;
        let result = xml::from_xml(&text)?;
        check_result(&result)?;
        if result.contains_key("sign") && !sign::verify(&result, &self.config.api_key, sign_type) {
            return Err(WxPayError::BadSignature);
        }
        Ok(result)
    }

    /// 账单类接口调用: 正常应答为账单原文, XML应答表示网关返回了错误
    pub(crate) async fn exchange_raw(
        &self,
        path: &str,
        mut params: Params,
        sign_type: SignType,
        secure: bool,
    ) -> Result<Vec<u8>> {
        self.sign_params(&mut params, sign_type);
        let raw = self.post(&self.endpoint(path), &params, secure).await?;
        check_raw_body(&raw)?;
        Ok(raw)
    }
}

/// 账单应答嗅探: 以<xml>开头的应答是网关错误报文而非账单数据
pub(crate) fn check_raw_body(raw: &[u8]) -> Result<()> {
    let head = String::from_utf8_lossy(&raw[..raw.len().min(64)]);
    if head.trim_start().starts_with("<xml") {
        let text = String::from_utf8_lossy(raw);
        let result = xml::from_xml(&text)?;
        check_result(&result)?;
    }
    Ok(())
}

/// 校验通信标识与业务结果
pub(crate) fn check_result(result: &Params) -> Result<()> {
    let return_code = result.get("return_code").map(String::as_str).unwrap_or("");
    if return_code != "SUCCESS" {
        return Err(WxPayError::Gateway {
            return_code: return_code.to_string(),
            return_msg: result.get("return_msg").cloned().unwrap_or_default(),
        });
    }
    if let Some(result_code) = result.get("result_code") {
        if result_code != "SUCCESS" {
            return Err(WxPayError::Business {
                err_code: result.get("err_code").cloned().unwrap_or_default(),
                err_code_des: result.get("err_code_des").cloned().unwrap_or_default(),
            });
        }
    }
    Ok(())
}
