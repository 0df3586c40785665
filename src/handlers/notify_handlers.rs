// 通知回调处理器
// 网关异步通知验签/解密后记录内容, 并按协议应答XML

use actix_web::{web, HttpResponse, Result as ActixResult};

use crate::state::AppStateData;
use crate::wxpay::server;

/// 按协议应答通知, 始终返回HTTP 200
fn xml_response(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/xml; charset=utf-8")
        .body(body)
}

/// 支付结果通知
///
/// POST /api/weixin/paymentnotify
///
/// 验签通过返回SUCCESS应答, 否则返回FAIL应答由网关重试
pub async fn payment_notify(data: AppStateData, body: web::Bytes) -> ActixResult<HttpResponse> {
    let text = String::from_utf8_lossy(&body);
    match server::payment_notify(&data.pay, &text) {
        Ok(params) => {
            log::info!(
                "payment notify received, out_trade_no: {}, transaction_id: {}, total_fee: {}",
                params.get("out_trade_no").map(String::as_str).unwrap_or(""),
                params.get("transaction_id").map(String::as_str).unwrap_or(""),
                params.get("total_fee").map(String::as_str).unwrap_or(""),
            );
            // 商户订单业务在此接入
            Ok(xml_response(server::response_success()))
        }
        Err(e) => {
            log::error!("payment notify rejected: {}", e);
            Ok(xml_response(server::response_fail("FAIL")))
        }
    }
}

/// 退款结果通知
///
/// POST /api/weixin/refundnotify
pub async fn refund_notify(data: AppStateData, body: web::Bytes) -> ActixResult<HttpResponse> {
    let text = String::from_utf8_lossy(&body);
    match server::refund_notify(&data.pay, &text) {
        Ok(params) => {
            log::info!(
                "refund notify received, out_refund_no: {}, refund_status: {}",
                params.get("out_refund_no").map(String::as_str).unwrap_or(""),
                params.get("refund_status").map(String::as_str).unwrap_or(""),
            );
            // 商户退款业务在此接入
            Ok(xml_response(server::response_success()))
        }
        Err(e) => {
            log::error!("refund notify rejected: {}", e);
            Ok(xml_response(server::response_fail("FAIL")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App};

    use crate::state::AppState;
    use crate::wxpay::{sign, xml, Params, SignType};

    fn notify_app_state() -> AppStateData {
        web::Data::new(AppState::new_for_test())
    }

    #[actix_web::test]
    async fn test_payment_notify_acks_valid_body() {
        let state = notify_app_state();
        let api_key = state.pay.config.api_key.clone();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .route("/api/weixin/paymentnotify", web::post().to(payment_notify)),
        )
        .await;

        let mut params = Params::new();
        params.insert("return_code".to_string(), "SUCCESS".to_string());
        params.insert("result_code".to_string(), "SUCCESS".to_string());
        params.insert("out_trade_no".to_string(), "NO.10086".to_string());
        params.insert("total_fee".to_string(), "201".to_string());
        params.insert("nonce_str".to_string(), "ibuaiVcKdpRxkhJA".to_string());
        let signature = sign::sign(&params, &api_key, SignType::Md5);
        params.insert("sign".to_string(), signature);

        let req = test::TestRequest::post()
            .uri("/api/weixin/paymentnotify")
            .set_payload(xml::to_xml(&params))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let body = test::read_body(resp).await;
        let ack = xml::from_xml(std::str::from_utf8(&body).unwrap()).unwrap();
        assert_eq!(ack.get("return_code").unwrap(), "SUCCESS");
    }

    #[actix_web::test]
    async fn test_payment_notify_fails_bad_signature() {
        let app = test::init_service(
            App::new()
                .app_data(notify_app_state())
                .route("/api/weixin/paymentnotify", web::post().to(payment_notify)),
        )
        .await;

        let body = "<xml><return_code><![CDATA[SUCCESS]]></return_code><sign><![CDATA[BAD]]></sign></xml>";
        let req = test::TestRequest::post()
            .uri("/api/weixin/paymentnotify")
            .set_payload(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let body = test::read_body(resp).await;
        let ack = xml::from_xml(std::str::from_utf8(&body).unwrap()).unwrap();
        assert_eq!(ack.get("return_code").unwrap(), "FAIL");
    }
}
