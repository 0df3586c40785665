// 中间件模块
// 包含请求访问日志中间件

pub mod logging;

// 重新导出中间件
pub use logging::*;
