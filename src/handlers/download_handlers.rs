// 对账下载API处理器
// 交易账单、资金账单、评价数据的路由适配, 应答为账单原文

use actix_web::{web, HttpResponse, Result as ActixResult};

use crate::handlers::gateway_error;
use crate::models::{BillQuery, CommentQuery};
use crate::state::AppStateData;
use crate::wxpay::download::{
    self, BatchQueryCommentParams, DownloadBillParams, DownloadFundFlowParams,
};
use crate::wxpay::types;

/// 账单压缩时的应答类型
fn bill_content_type(tar_type: &str) -> &'static str {
    if tar_type.is_empty() {
        "text/plain; charset=utf-8"
    } else {
        "application/octet-stream"
    }
}

/// 下载交易账单
///
/// GET /api/wxpay/downloadbill?date=20200812
pub async fn download_bill(
    data: AppStateData,
    query: web::Query<BillQuery>,
) -> ActixResult<HttpResponse> {
    let query = query.into_inner();
    let tar_type = query.tar_type.unwrap_or_default();

    let params = DownloadBillParams {
        bill_date: query.date,
        bill_type: types::BILL_TYPE_ALL.to_string(),
        tar_type: tar_type.clone(),
    };

    match download::download_bill(&data.pay, params).await {
        Ok(bill) => Ok(HttpResponse::Ok()
            .content_type(bill_content_type(&tar_type))
            .body(bill)),
        Err(e) => Ok(gateway_error("download bill failed", e)),
    }
}

/// 下载资金账单
///
/// GET /api/wxpay/downloadfundflow?date=20200812
pub async fn download_fund_flow(
    data: AppStateData,
    query: web::Query<BillQuery>,
) -> ActixResult<HttpResponse> {
    let query = query.into_inner();
    let tar_type = query.tar_type.unwrap_or_default();

    let params = DownloadFundFlowParams {
        bill_date: query.date,
        account_type: types::ACCOUNT_TYPE_BASIC.to_string(),
        tar_type: tar_type.clone(),
    };

    match download::download_fund_flow(&data.pay, params).await {
        Ok(bill) => Ok(HttpResponse::Ok()
            .content_type(bill_content_type(&tar_type))
            .body(bill)),
        Err(e) => Ok(gateway_error("download fund flow failed", e)),
    }
}

/// 批量拉取评价数据
///
/// GET /api/wxpay/batchquerycomment?begin_time=20200724000000&end_time=20200812000000
pub async fn batch_query_comment(
    data: AppStateData,
    query: web::Query<CommentQuery>,
) -> ActixResult<HttpResponse> {
    let query = query.into_inner();

    let params = BatchQueryCommentParams {
        begin_time: query.begin_time,
        end_time: query.end_time,
        offset: query.offset.unwrap_or_else(|| "0".to_string()),
        limit: query.limit.unwrap_or_else(|| "100".to_string()),
    };

    match download::batch_query_comment(&data.pay, params).await {
        Ok(comments) => Ok(HttpResponse::Ok()
            .content_type("text/plain; charset=utf-8")
            .body(comments)),
        Err(e) => Ok(gateway_error("batch query comment failed", e)),
    }
}
