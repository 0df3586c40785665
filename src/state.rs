// 应用状态管理
// 持有只读配置与网关客户端, 启动后不再变更

use actix_web::web;

use crate::config::Config;
use crate::wxpay::WxPay;

/// 应用全局状态
pub struct AppState {
    /// 应用配置
    pub config: Config,
    /// 微信支付网关客户端
    pub pay: WxPay,
}

impl AppState {
    /// 创建新的应用状态实例
    ///
    /// # Arguments
    /// * `config` - 应用配置
    /// * `pay` - 网关客户端 (沙箱密钥换取已完成)
    ///
    /// # Returns
    /// * 应用状态实例
    pub fn new(config: Config, pay: WxPay) -> Self {
        Self { config, pay }
    }

    /// 创建测试用的应用状态
    #[cfg(test)]
    pub fn new_for_test() -> Self {
        let config = Config::for_test();
        let pay = WxPay::new(crate::wxpay::Config {
            appid: config.payment.appid.clone(),
            mchid: config.payment.mchid.clone(),
            api_key: config.payment.api_key.clone(),
            cert: None,
            sandbox: true,
        })
        .expect("Failed to build test gateway client");
        Self::new(config, pay)
    }
}

/// 应用状态数据类型别名
pub type AppStateData = web::Data<AppState>;
