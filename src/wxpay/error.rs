// 网关错误类型
// 区分通信层失败、业务层失败与本地处理失败

use thiserror::Error;

pub type Result<T> = std::result::Result<T, WxPayError>;

/// 网关调用错误
#[derive(Debug, Error)]
pub enum WxPayError {
    /// 网络传输失败
    #[error("gateway transport failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// 通信层失败 (return_code != SUCCESS)
    #[error("gateway returned {return_code}: {return_msg}")]
    Gateway {
        return_code: String,
        return_msg: String,
    },

    /// 业务层失败 (result_code != SUCCESS)
    #[error("gateway business error {err_code}: {err_code_des}")]
    Business {
        err_code: String,
        err_code_des: String,
    },

    /// 应答报文解析失败
    #[error("malformed gateway response: {0}")]
    Parse(String),

    /// 签名校验失败
    #[error("signature verification failed")]
    BadSignature,

    /// 接口要求商户证书但未配置
    #[error("client certificate is required but not configured")]
    CertMissing,

    /// 商户证书加载失败
    #[error("client certificate error: {0}")]
    Cert(String),

    /// 退款通知明细解密失败
    #[error("refund notification decrypt failed: {0}")]
    Decrypt(String),
}
