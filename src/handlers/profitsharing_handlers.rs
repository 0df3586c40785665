// 分账API处理器
// 单次分账、分账查询与商户公钥获取的路由适配

use actix_web::{web, HttpResponse, Result as ActixResult};

use crate::handlers::gateway_error;
use crate::models::{ApiResponse, ProfitSharingQuery, ProfitSharingRequest};
use crate::state::AppStateData;
use crate::wxpay::profitsharing::{self, ProfitSharingParams, Receiver};
use crate::wxpay::publickey;

/// 请求单次分账
///
/// POST /api/wxpay/profitsharing
///
/// 请求体: ProfitSharingRequest
pub async fn profit_sharing(
    data: AppStateData,
    request: web::Json<ProfitSharingRequest>,
) -> ActixResult<HttpResponse> {
    let request = request.into_inner();
    if request.receivers.is_empty() {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error(400, "receivers cannot be empty")));
    }

    let receivers = request
        .receivers
        .into_iter()
        .map(|r| Receiver {
            kind: r.kind,
            account: r.account,
            amount: r.amount,
            description: r.description,
        })
        .collect();

    let params = ProfitSharingParams {
        transaction_id: request.transaction_id.clone(),
        out_order_no: request.out_order_no.clone(),
        receivers,
    };

    match profitsharing::profit_sharing(&data.pay, params).await {
        Ok(result) => {
            log::info!(
                "profit sharing accepted, transaction_id: {}, out_order_no: {}",
                request.transaction_id,
                request.out_order_no
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(result)))
        }
        Err(e) => Ok(gateway_error("profit sharing failed", e)),
    }
}

/// 查询分账结果
///
/// GET /api/wxpay/profitsharingquery?transaction_id=...&out_order_no=...
pub async fn profit_sharing_query(
    data: AppStateData,
    query: web::Query<ProfitSharingQuery>,
) -> ActixResult<HttpResponse> {
    match profitsharing::profit_sharing_query(&data.pay, &query.transaction_id, &query.out_order_no)
        .await
    {
        Ok(result) => Ok(HttpResponse::Ok().json(ApiResponse::success(result))),
        Err(e) => Ok(gateway_error("profit sharing query failed", e)),
    }
}

/// 获取商户RSA公钥
///
/// GET /api/wxpay/getpublickey
pub async fn get_public_key(data: AppStateData) -> ActixResult<HttpResponse> {
    match publickey::get_public_key(&data.pay).await {
        Ok(pub_key) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success(serde_json::json!({ "pub_key": pub_key })))),
        Err(e) => Ok(gateway_error("get public key failed", e)),
    }
}
