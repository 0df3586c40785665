// 对账下载接口
// 交易账单 / 资金账单 / 评价数据, 应答为账单原文而非XML

use super::types::SignType;
use super::{Result, WxPay};

/// 交易账单下载参数
#[derive(Debug, Clone)]
pub struct DownloadBillParams {
    /// 账单日期, 格式yyyyMMdd
    pub bill_date: String,
    /// 账单类型
    pub bill_type: String,
    /// 压缩格式, 空为明文, GZIP为压缩包
    pub tar_type: String,
}

/// 下载交易账单
pub async fn download_bill(pay: &WxPay, p: DownloadBillParams) -> Result<Vec<u8>> {
    let mut params = pay.base_params();
    params.insert("appid".to_string(), pay.config.appid.clone());
    params.insert("bill_date".to_string(), p.bill_date);
    params.insert("bill_type".to_string(), p.bill_type);
    if !p.tar_type.is_empty() {
        params.insert("tar_type".to_string(), p.tar_type);
    }
    pay.exchange_raw("/pay/downloadbill", params, SignType::Md5, false)
        .await
}

/// 资金账单下载参数
#[derive(Debug, Clone)]
pub struct DownloadFundFlowParams {
    /// 账单日期, 格式yyyyMMdd
    pub bill_date: String,
    /// 资金账户类型
    pub account_type: String,
    /// 压缩格式
    pub tar_type: String,
}

/// 下载资金账单, 需要商户证书, 仅支持HMAC-SHA256签名
pub async fn download_fund_flow(pay: &WxPay, p: DownloadFundFlowParams) -> Result<Vec<u8>> {
    let mut params = pay.base_params();
    params.insert("appid".to_string(), pay.config.appid.clone());
    params.insert("bill_date".to_string(), p.bill_date);
    params.insert("account_type".to_string(), p.account_type);
    if !p.tar_type.is_empty() {
        params.insert("tar_type".to_string(), p.tar_type);
    }
    pay.exchange_raw("/pay/downloadfundflow", params, SignType::HmacSha256, true)
        .await
}

/// 评价数据拉取参数
#[derive(Debug, Clone)]
pub struct BatchQueryCommentParams {
    /// 起始时间, 格式yyyyMMddHHmmss
    pub begin_time: String,
    /// 结束时间, 格式yyyyMMddHHmmss
    pub end_time: String,
    /// 位移
    pub offset: String,
    /// 单次拉取条数
    pub limit: String,
}

/// 批量拉取评价数据, 需要商户证书, 仅支持HMAC-SHA256签名
pub async fn batch_query_comment(pay: &WxPay, p: BatchQueryCommentParams) -> Result<Vec<u8>> {
    let mut params = pay.base_params();
    params.insert("appid".to_string(), pay.config.appid.clone());
    params.insert("begin_time".to_string(), p.begin_time);
    params.insert("end_time".to_string(), p.end_time);
    params.insert("offset".to_string(), p.offset);
    if !p.limit.is_empty() {
        params.insert("limit".to_string(), p.limit);
    }
    pay.exchange_raw(
        "/billcommentsp/batchquerycomment",
        params,
        SignType::HmacSha256,
        true,
    )
    .await
}
