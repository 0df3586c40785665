// 退款接口
// 申请退款走证书通道, 退款查询走普通通道

use super::types::{Params, SignType};
use super::{Result, WxPay};

/// 申请退款参数
#[derive(Debug, Clone)]
pub struct RefundParams {
    /// 商户订单号
    pub out_trade_no: String,
    /// 商户退款单号
    pub out_refund_no: String,
    /// 订单总金额, 单位分
    pub total_fee: String,
    /// 退款金额, 单位分
    pub refund_fee: String,
    /// 退款结果通知地址, 可为空
    pub notify_url: String,
}

/// 申请退款, 需要商户证书
pub async fn refund(pay: &WxPay, p: RefundParams) -> Result<Params> {
    let mut params = pay.base_params();
    params.insert("appid".to_string(), pay.config.appid.clone());
    params.insert("out_trade_no".to_string(), p.out_trade_no);
    params.insert("out_refund_no".to_string(), p.out_refund_no);
    params.insert("total_fee".to_string(), p.total_fee);
    params.insert("refund_fee".to_string(), p.refund_fee);
    if !p.notify_url.is_empty() {
        params.insert("notify_url".to_string(), p.notify_url);
    }
    pay.exchange("/secapi/pay/refund", params, SignType::Md5, true)
        .await
}

/// 按商户订单号查询退款
pub async fn refund_query(pay: &WxPay, out_trade_no: &str) -> Result<Params> {
    let mut params = pay.base_params();
    params.insert("appid".to_string(), pay.config.appid.clone());
    params.insert("out_trade_no".to_string(), out_trade_no.to_string());
    pay.exchange("/pay/refundquery", params, SignType::Md5, false)
        .await
}
