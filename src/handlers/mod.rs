// API处理器模块
// 包含所有HTTP请求处理逻辑

pub mod download_handlers;
pub mod health_handlers;
pub mod native_handlers;
pub mod notify_handlers;
pub mod order_handlers;
pub mod profitsharing_handlers;
pub mod refund_handlers;

// 重新导出处理器
pub use download_handlers::*;
pub use health_handlers::*;
pub use native_handlers::*;
pub use notify_handlers::*;
pub use order_handlers::*;
pub use profitsharing_handlers::*;
pub use refund_handlers::*;

use actix_web::HttpResponse;

use crate::models::ApiResponse;
use crate::wxpay::WxPayError;

/// 网关调用错误映射为HTTP响应
///
/// 证书/配置问题算服务端错误, 业务拒绝算请求错误, 其余算网关错误
pub(crate) fn gateway_error(context: &str, err: WxPayError) -> HttpResponse {
    log::error!("{}: {}", context, err);
    match err {
        WxPayError::CertMissing | WxPayError::Cert(_) => {
            HttpResponse::InternalServerError().json(ApiResponse::error(500, err.to_string()))
        }
        WxPayError::Business { .. } => {
            HttpResponse::BadRequest().json(ApiResponse::error(400, err.to_string()))
        }
        _ => HttpResponse::BadGateway().json(ApiResponse::error(502, err.to_string())),
    }
}
