// 数据模型定义
// 标准API响应格式与各接口的请求参数结构

use serde::{Deserialize, Serialize};

/// 标准API响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// 响应状态码
    pub code: i32,
    /// 响应消息
    pub message: String,
    /// 响应数据
    pub data: Option<T>,
    /// 响应时间戳
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 创建成功响应
    pub fn success(data: T) -> Self {
        Self {
            code: 200,
            message: "Success".to_string(),
            data: Some(data),
            timestamp: chrono::Utc::now(),
        }
    }
}

impl ApiResponse<()> {
    /// 创建错误响应
    pub fn error(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
            timestamp: chrono::Utc::now(),
        }
    }
}

/// 统一下单请求参数, 缺省值沿用演示订单
#[derive(Debug, Deserialize)]
pub struct UnifiedOrderQuery {
    /// 订单金额, 单位分
    pub fee: String,
    /// 商户订单号
    pub out_trade_no: Option<String>,
    /// 商品描述
    pub body: Option<String>,
}

/// 商户订单号查询参数
#[derive(Debug, Deserialize)]
pub struct TradeNoQuery {
    pub out_trade_no: String,
}

/// 账单下载参数
#[derive(Debug, Deserialize)]
pub struct BillQuery {
    /// 账单日期, 格式yyyyMMdd
    pub date: String,
    /// 压缩格式, 可选GZIP
    pub tar_type: Option<String>,
}

/// 评价数据拉取参数
#[derive(Debug, Deserialize)]
pub struct CommentQuery {
    /// 起始时间, 格式yyyyMMddHHmmss
    pub begin_time: String,
    /// 结束时间, 格式yyyyMMddHHmmss
    pub end_time: String,
    /// 位移, 默认0
    pub offset: Option<String>,
    /// 单次拉取条数, 默认100
    pub limit: Option<String>,
}

/// 退款申请参数
#[derive(Debug, Deserialize)]
pub struct RefundRequest {
    /// 商户订单号
    pub out_trade_no: String,
    /// 商户退款单号, 默认为订单号加_REFUND后缀
    pub out_refund_no: Option<String>,
    /// 订单总金额, 单位分
    pub total_fee: String,
    /// 退款金额, 默认全额退款
    pub refund_fee: Option<String>,
}

/// 短链接转换参数
#[derive(Debug, Deserialize)]
pub struct ShortUrlQuery {
    pub url: String,
}

/// 分账请求体
#[derive(Debug, Deserialize)]
pub struct ProfitSharingRequest {
    /// 微信支付订单号
    pub transaction_id: String,
    /// 商户分账单号
    pub out_order_no: String,
    /// 分账接收方列表
    pub receivers: Vec<ReceiverRequest>,
}

/// 分账接收方
#[derive(Debug, Deserialize)]
pub struct ReceiverRequest {
    #[serde(rename = "type")]
    pub kind: String,
    pub account: String,
    /// 分账金额, 单位分
    pub amount: u64,
    pub description: String,
}

/// 分账结果查询参数
#[derive(Debug, Deserialize)]
pub struct ProfitSharingQuery {
    pub transaction_id: String,
    pub out_order_no: String,
}
