// 退款API处理器
// 申请退款与退款查询的路由适配

use actix_web::{web, HttpResponse, Result as ActixResult};

use crate::handlers::gateway_error;
use crate::models::{ApiResponse, RefundRequest, TradeNoQuery};
use crate::state::AppStateData;
use crate::wxpay::refund::{self, RefundParams};

/// 申请退款
///
/// GET /api/wxpay/refund?out_trade_no=NO.10086&total_fee=201
///
/// 未指定退款单号时按订单号加_REFUND后缀生成, 未指定退款金额时全额退款
pub async fn refund(
    data: AppStateData,
    query: web::Query<RefundRequest>,
) -> ActixResult<HttpResponse> {
    let query = query.into_inner();
    let out_refund_no = query
        .out_refund_no
        .unwrap_or_else(|| format!("{}_REFUND", query.out_trade_no));
    let refund_fee = query.refund_fee.unwrap_or_else(|| query.total_fee.clone());

    let params = RefundParams {
        out_trade_no: query.out_trade_no.clone(),
        out_refund_no: out_refund_no.clone(),
        total_fee: query.total_fee,
        refund_fee,
        notify_url: data.config.notify.refund_url.clone(),
    };

    match refund::refund(&data.pay, params).await {
        Ok(result) => {
            log::info!(
                "refund accepted, out_trade_no: {}, out_refund_no: {}",
                query.out_trade_no,
                out_refund_no
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(result)))
        }
        Err(e) => Ok(gateway_error("refund failed", e)),
    }
}

/// 查询退款
///
/// GET /api/wxpay/refundquery?out_trade_no=NO.10086
pub async fn refund_query(
    data: AppStateData,
    query: web::Query<TradeNoQuery>,
) -> ActixResult<HttpResponse> {
    match refund::refund_query(&data.pay, &query.out_trade_no).await {
        Ok(result) => Ok(HttpResponse::Ok().json(ApiResponse::success(result))),
        Err(e) => Ok(gateway_error("refund query failed", e)),
    }
}
