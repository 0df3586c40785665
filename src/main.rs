mod config;
mod handlers;
mod middleware;
mod models;
mod routes;
mod state;
mod wxpay;

use std::io;
use std::io::Write;

use actix_web::{web, App, HttpServer};
use chrono::Local;
use log::{info, warn};

use crate::config::Config;
use crate::middleware::AccessLog;
use crate::routes::{notify_routes, public_routes, wxpay_routes};
use crate::state::AppState;
use crate::wxpay::{sandbox, WxPay};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志
    let mut log_builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    log_builder
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S %:z"),
                record.level(),
                record.args()
            )
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e)) // 转换为 io::Result
        })
        .init();

    // 加载配置
    let config = Config::from_env()?;
    config.validate()?;

    // 构建网关客户端
    let mut pay = WxPay::new(wxpay::Config {
        appid: config.payment.appid.clone(),
        mchid: config.payment.mchid.clone(),
        api_key: config.payment.api_key.clone(),
        cert: config.payment.cert.clone(),
        sandbox: config.payment.sandbox,
    })?;

    // 沙箱模式下换取沙箱签名密钥, 此后API密钥只读
    if config.payment.sandbox {
        match sandbox::get_sign_key(&pay).await {
            Ok(sign_key) => {
                info!("sandbox sign key acquired");
                pay.set_api_key(sign_key);
            }
            Err(e) => warn!("sandbox sign key exchange failed, keeping APIKEY: {}", e),
        }
    }

    let bind_address = config.bind_address().to_string();
    let shutdown_timeout = config.server.shutdown_timeout;
    let app_state = web::Data::new(AppState::new(config, pay));

    info!("wxpay demo server listening on {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(AccessLog)
            .app_data(app_state.clone())
            .service(notify_routes())
            .service(wxpay_routes())
            .service(public_routes())
    })
    .bind(&bind_address)?
    .shutdown_timeout(shutdown_timeout)
    .run()
    .await?;

    Ok(())
}
