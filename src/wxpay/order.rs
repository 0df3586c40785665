// 订单接口
// 统一下单 / 查询订单 / 关闭订单

use super::types::{Params, SignType};
use super::{Result, WxPay};

/// 统一下单参数
#[derive(Debug, Clone)]
pub struct UnifiedOrderParams {
    /// 商品描述
    pub body: String,
    /// 商户订单号
    pub out_trade_no: String,
    /// 订单金额, 单位分
    pub total_fee: String,
    /// 终端IP
    pub spbill_create_ip: String,
    /// 支付结果通知地址
    pub notify_url: String,
    /// 交易类型
    pub trade_type: String,
}

/// 统一下单, 成功应答包含prepay_id
pub async fn unified_order(pay: &WxPay, p: UnifiedOrderParams) -> Result<Params> {
    let mut params = pay.base_params();
    params.insert("appid".to_string(), pay.config.appid.clone());
    params.insert("body".to_string(), p.body);
    params.insert("out_trade_no".to_string(), p.out_trade_no);
    params.insert("total_fee".to_string(), p.total_fee);
    params.insert("spbill_create_ip".to_string(), p.spbill_create_ip);
    params.insert("notify_url".to_string(), p.notify_url);
    params.insert("trade_type".to_string(), p.trade_type);
    pay.exchange("/pay/unifiedorder", params, SignType::Md5, false)
        .await
}

/// 按商户订单号查询订单
pub async fn order_query(pay: &WxPay, out_trade_no: &str) -> Result<Params> {
    let mut params = pay.base_params();
    params.insert("appid".to_string(), pay.config.appid.clone());
    params.insert("out_trade_no".to_string(), out_trade_no.to_string());
    pay.exchange("/pay/orderquery", params, SignType::Md5, false)
        .await
}

/// 关闭订单
pub async fn close_order(pay: &WxPay, out_trade_no: &str) -> Result<Params> {
    let mut params = pay.base_params();
    params.insert("appid".to_string(), pay.config.appid.clone());
    params.insert("out_trade_no".to_string(), out_trade_no.to_string());
    pay.exchange("/pay/closeorder", params, SignType::Md5, false)
        .await
}
