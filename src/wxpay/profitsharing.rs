// 分账接口
// 单次分账与分账结果查询, 仅支持HMAC-SHA256签名

use serde::{Deserialize, Serialize};

use super::error::WxPayError;
use super::types::{Params, SignType};
use super::{Result, WxPay};

/// 分账接收方
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Receiver {
    /// 接收方类型 (MERCHANT_ID / PERSONAL_OPENID)
    #[serde(rename = "type")]
    pub kind: String,
    /// 接收方账号
    pub account: String,
    /// 分账金额, 单位分
    pub amount: u64,
    /// 分账描述
    pub description: String,
}

/// 单次分账参数
#[derive(Debug, Clone)]
pub struct ProfitSharingParams {
    /// 微信支付订单号
    pub transaction_id: String,
    /// 商户分账单号
    pub out_order_no: String,
    /// 分账接收方列表
    pub receivers: Vec<Receiver>,
}

/// 请求单次分账, 需要商户证书
pub async fn profit_sharing(pay: &WxPay, p: ProfitSharingParams) -> Result<Params> {
    let receivers = serde_json::to_string(&p.receivers)
        .map_err(|e| WxPayError::Parse(format!("encode receivers: {}", e)))?;
    let mut params = pay.base_params();
    params.insert("appid".to_string(), pay.config.appid.clone());
    params.insert("transaction_id".to_string(), p.transaction_id);
    params.insert("out_order_no".to_string(), p.out_order_no);
    params.insert("receivers".to_string(), receivers);
    pay.exchange("/secapi/pay/profitsharing", params, SignType::HmacSha256, true)
        .await
}

/// 查询分账结果
pub async fn profit_sharing_query(
    pay: &WxPay,
    transaction_id: &str,
    out_order_no: &str,
) -> Result<Params> {
    let mut params = pay.base_params();
    params.insert("transaction_id".to_string(), transaction_id.to_string());
    params.insert("out_order_no".to_string(), out_order_no.to_string());
    pay.exchange("/pay/profitsharingquery", params, SignType::HmacSha256, false)
        .await
}
