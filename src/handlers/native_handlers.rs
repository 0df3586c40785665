// Native支付辅助API处理器
// 长链接转短链接的路由适配

use actix_web::{web, HttpResponse, Result as ActixResult};

use crate::handlers::gateway_error;
use crate::models::{ApiResponse, ShortUrlQuery};
use crate::state::AppStateData;
use crate::wxpay::native;

/// 长链接转短链接
///
/// GET /api/wxpay/shorturl?url=weixin%3A%2F%2Fwxpay%2Fbizpayurl...
pub async fn short_url(
    data: AppStateData,
    query: web::Query<ShortUrlQuery>,
) -> ActixResult<HttpResponse> {
    match native::short_url(&data.pay, &query.url).await {
        Ok(short) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success(serde_json::json!({ "short_url": short })))),
        Err(e) => Ok(gateway_error("short url conversion failed", e)),
    }
}
