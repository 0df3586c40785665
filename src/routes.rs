// API路由配置
// 定义所有HTTP接口的路由规则

use actix_web::{web, Scope};

use crate::handlers::*;

/// 支付网关操作路由
pub fn wxpay_routes() -> Scope {
    web::scope("/api/wxpay")
        // 订单
        .route("/unifiedorder", web::get().to(unified_order))
        .route("/orderquery", web::get().to(order_query))
        .route("/closeorder", web::get().to(close_order))
        // 对账下载
        .route("/downloadbill", web::get().to(download_bill))
        .route("/downloadfundflow", web::get().to(download_fund_flow))
        .route("/batchquerycomment", web::get().to(batch_query_comment))
        // 退款
        .route("/refund", web::get().to(refund))
        .route("/refundquery", web::get().to(refund_query))
        // 辅助能力
        .route("/shorturl", web::get().to(short_url))
        .route("/getpublickey", web::get().to(get_public_key))
        // 分账
        .route("/profitsharing", web::post().to(profit_sharing))
        .route("/profitsharingquery", web::get().to(profit_sharing_query))
}

/// 异步通知回调路由
pub fn notify_routes() -> Scope {
    web::scope("/api/weixin")
        .route("/paymentnotify", web::post().to(payment_notify))
        .route("/refundnotify", web::post().to(refund_notify))
}

/// 公共路由 (无需认证)
pub fn public_routes() -> Scope {
    web::scope("")
        .route("/health", web::get().to(health_check))
        .route("/version", web::get().to(version_info))
}
