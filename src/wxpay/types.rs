// 参数表与协议常量
// v2协议所有接口以键值对报文交互

use std::collections::BTreeMap;

/// 接口参数表, BTreeMap迭代即字典序, 签名串拼接直接复用
pub type Params = BTreeMap<String, String>;

/// 签名算法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignType {
    Md5,
    HmacSha256,
}

impl SignType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignType::Md5 => "MD5",
            SignType::HmacSha256 => "HMAC-SHA256",
        }
    }
}

/// APP支付交易类型
pub const TRADE_TYPE_APP: &str = "APP";

/// 交易账单类型: 全部订单
pub const BILL_TYPE_ALL: &str = "ALL";

/// 资金账单账户类型: 基本账户
pub const ACCOUNT_TYPE_BASIC: &str = "Basic";
