// 配置管理模块
// 负责从.env文件与环境变量加载应用程序配置

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;

/// 应用程序配置结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// 服务器配置
    pub server: ServerConfig,
    /// 商户配置
    pub payment: PaymentConfig,
    /// 通知回调配置
    pub notify: NotifyConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 服务器监听地址
    pub listen: String,
    /// 优雅停机超时时间 (秒)
    pub shutdown_timeout: u64,
}

/// 商户配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentConfig {
    /// 应用ID
    pub appid: String,
    /// 商户号
    pub mchid: String,
    /// API签名密钥
    pub api_key: String,
    /// PKCS#12商户证书路径
    pub cert: Option<String>,
    /// 沙箱模式开关
    pub sandbox: bool,
}

/// 通知回调配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyConfig {
    /// 支付结果通知地址
    pub payment_url: String,
    /// 退款结果通知地址
    pub refund_url: String,
}

impl Config {
    /// 从环境变量加载配置
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok(); // 加载.env文件, 忽略缺失

        Ok(Config {
            server: ServerConfig {
                listen: env::var("LISTEN").unwrap_or_else(|_| "127.0.0.1:8080".to_string()),
                shutdown_timeout: env::var("SHUTDOWN_TIMEOUT")
                    .unwrap_or_else(|_| "5".to_string())
                    .parse()
                    .context("Invalid SHUTDOWN_TIMEOUT")?,
            },
            payment: PaymentConfig {
                appid: env::var("APPID").context("APPID environment variable is required")?,
                mchid: env::var("MCHID").context("MCHID environment variable is required")?,
                api_key: env::var("APIKEY").context("APIKEY environment variable is required")?,
                cert: env::var("CERT").ok().filter(|path| !path.is_empty()),
                sandbox: env::var("SANDBOX")
                    .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                    .unwrap_or(false),
            },
            notify: NotifyConfig {
                payment_url: env::var("NOTIFYURL").unwrap_or_default(),
                refund_url: env::var("REFUND_NOTIFY_URL").unwrap_or_default(),
            },
        })
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        if self.payment.appid.is_empty() {
            anyhow::bail!("APPID cannot be empty");
        }
        if self.payment.mchid.is_empty() {
            anyhow::bail!("MCHID cannot be empty");
        }
        if self.payment.api_key.is_empty() {
            anyhow::bail!("APIKEY cannot be empty");
        }
        self.server
            .listen
            .parse::<std::net::SocketAddr>()
            .context("Invalid LISTEN address")?;
        Ok(())
    }

    /// 获取服务器绑定地址
    pub fn bind_address(&self) -> &str {
        &self.server.listen
    }

    /// 创建测试配置
    #[cfg(test)]
    pub fn for_test() -> Self {
        Config {
            server: ServerConfig {
                listen: "127.0.0.1:8080".to_string(),
                shutdown_timeout: 5,
            },
            payment: PaymentConfig {
                appid: "wxd930ea5d5a258f4f".to_string(),
                mchid: "10000100".to_string(),
                api_key: "192006250b4c09247ec02edce69f6a2d".to_string(),
                cert: None,
                sandbox: true,
            },
            notify: NotifyConfig {
                payment_url: "https://merchant.example.com/api/weixin/paymentnotify".to_string(),
                refund_url: "https://merchant.example.com/api/weixin/refundnotify".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_test_config() {
        assert!(Config::for_test().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_credentials() {
        let mut config = Config::for_test();
        config.payment.api_key.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_listen_address() {
        let mut config = Config::for_test();
        config.server.listen = "not-an-address".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_env() {
        env::set_var("APPID", "wxd930ea5d5a258f4f");
        env::set_var("MCHID", "10000100");
        env::set_var("APIKEY", "192006250b4c09247ec02edce69f6a2d");
        env::set_var("SANDBOX", "true");
        env::set_var("LISTEN", "0.0.0.0:9090");
        env::remove_var("CERT");

        let config = Config::from_env().unwrap();
        assert_eq!(config.payment.mchid, "10000100");
        assert!(config.payment.sandbox);
        assert!(config.payment.cert.is_none());
        assert_eq!(config.bind_address(), "0.0.0.0:9090");
        assert!(config.validate().is_ok());
    }
}
