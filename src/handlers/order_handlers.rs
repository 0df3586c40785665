// 订单API处理器
// 统一下单、订单查询、关闭订单的路由适配

use actix_web::{web, HttpRequest, HttpResponse, Result as ActixResult};

use crate::handlers::gateway_error;
use crate::models::{ApiResponse, TradeNoQuery, UnifiedOrderQuery};
use crate::state::AppStateData;
use crate::wxpay::order::{self, UnifiedOrderParams};
use crate::wxpay::{server, types, WxPayError};

/// 演示订单号, 请求未携带out_trade_no时使用
const DEMO_TRADE_NO: &str = "NO.10086";
/// 演示商品描述
const DEMO_BODY: &str = "BODY";

/// 统一下单
///
/// GET /api/wxpay/unifiedorder?fee=201
///
/// 以APP交易类型下单, 成功后返回拉起支付所需的客户端参数
pub async fn unified_order(
    data: AppStateData,
    query: web::Query<UnifiedOrderQuery>,
    req: HttpRequest,
) -> ActixResult<HttpResponse> {
    let query = query.into_inner();
    let client_ip = req
        .connection_info()
        .realip_remote_addr()
        .unwrap_or("127.0.0.1")
        .to_string();

    let params = UnifiedOrderParams {
        body: query.body.unwrap_or_else(|| DEMO_BODY.to_string()),
        out_trade_no: query
            .out_trade_no
            .unwrap_or_else(|| DEMO_TRADE_NO.to_string()),
        total_fee: query.fee,
        spbill_create_ip: client_ip,
        notify_url: data.config.notify.payment_url.clone(),
        trade_type: types::TRADE_TYPE_APP.to_string(),
    };

    match order::unified_order(&data.pay, params).await {
        Ok(result) => match result.get("prepay_id") {
            Some(prepay_id) => {
                log::info!("unified order created, prepay_id: {}", prepay_id);
                let payment_params = server::app_payment_params(&data.pay, prepay_id);
                Ok(HttpResponse::Ok().json(ApiResponse::success(payment_params)))
            }
            None => Ok(gateway_error(
                "unified order failed",
                WxPayError::Parse("missing prepay_id".to_string()),
            )),
        },
        Err(e) => Ok(gateway_error("unified order failed", e)),
    }
}

/// 查询订单
///
/// GET /api/wxpay/orderquery?out_trade_no=NO.10086
pub async fn order_query(
    data: AppStateData,
    query: web::Query<TradeNoQuery>,
) -> ActixResult<HttpResponse> {
    match order::order_query(&data.pay, &query.out_trade_no).await {
        Ok(result) => Ok(HttpResponse::Ok().json(ApiResponse::success(result))),
        Err(e) => Ok(gateway_error("order query failed", e)),
    }
}

/// 关闭订单
///
/// GET /api/wxpay/closeorder?out_trade_no=NO.10086
pub async fn close_order(
    data: AppStateData,
    query: web::Query<TradeNoQuery>,
) -> ActixResult<HttpResponse> {
    match order::close_order(&data.pay, &query.out_trade_no).await {
        Ok(result) => {
            log::info!("order closed: {}", query.out_trade_no);
            Ok(HttpResponse::Ok().json(ApiResponse::success(result)))
        }
        Err(e) => Ok(gateway_error("close order failed", e)),
    }
}
