// 健康检查和系统状态API处理器
// 提供服务健康状态与版本信息查询接口

use actix_web::{HttpResponse, Result as ActixResult};
use serde::Serialize;

use crate::models::ApiResponse;
use crate::state::AppStateData;

/// 系统健康检查响应
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// 服务状态
    pub status: String,
    /// 版本信息
    pub version: String,
    /// 是否沙箱模式
    pub sandbox: bool,
    /// 商户证书配置状态
    pub certificate: String,
    /// 当前时间戳
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// 基础健康检查
///
/// GET /health
///
/// 无需认证, 不触发网关调用
pub async fn health_check(data: AppStateData) -> ActixResult<HttpResponse> {
    let health = HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        sandbox: data.config.payment.sandbox,
        certificate: if data.config.payment.cert.is_some() {
            "configured".to_string()
        } else {
            "absent".to_string()
        },
        timestamp: chrono::Utc::now(),
    };

    Ok(HttpResponse::Ok().json(health))
}

/// 版本信息
///
/// GET /version
pub async fn version_info(data: AppStateData) -> ActixResult<HttpResponse> {
    let version_info = serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "sandbox": data.config.payment.sandbox,
    });

    Ok(HttpResponse::Ok().json(ApiResponse::success(version_info)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App};

    use crate::state::AppState;

    #[actix_web::test]
    async fn test_health_check() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::new_for_test()))
                .route("/health", web::get().to(health_check)),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["sandbox"], true);
        assert_eq!(body["certificate"], "absent");
    }

    #[actix_web::test]
    async fn test_version_info() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::new_for_test()))
                .route("/version", web::get().to(version_info)),
        )
        .await;

        let req = test::TestRequest::get().uri("/version").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
    }
}
