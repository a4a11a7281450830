use actix_web::{HttpResponse, Responder, web};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::model::{LeaveStatus, LeaveType, LeaveWithEmployee};
use crate::service::{
    LeaveQuery, LeaveService, LeaveUpdate, NewLeaveRequest, ReportFilter, ReportRow,
};
use crate::store::MySqlStore;

type Service = web::Data<LeaveService<MySqlStore>>;

#[derive(Deserialize, ToSchema)]
pub struct CreateLeave {
    #[schema(example = 1)]
    pub employee_id: u64,
    #[schema(example = "annual")]
    pub leave_type: LeaveType,
    #[schema(example = "2026-01-01", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2026-01-03", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    #[schema(example = "family vacation", nullable = true)]
    pub reason: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateLeave {
    #[schema(example = "sick")]
    pub leave_type: LeaveType,
    #[schema(example = "2026-01-01", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2026-01-03", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    #[schema(example = "pending")]
    pub status: LeaveStatus,
    #[schema(example = "bad flu", nullable = true)]
    pub reason: Option<String>,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct LeaveFilterQuery {
    #[schema(example = 1)]
    /// Filter by employee ID
    pub employee_id: Option<u64>,
    #[schema(example = "annual")]
    /// Filter by leave type
    pub leave_type: Option<LeaveType>,
    #[schema(example = "pending")]
    /// Filter by leave status
    pub status: Option<LeaveStatus>,
    #[param(value_type = String, format = "date")]
    #[schema(value_type = String, format = "date")]
    /// Only requests starting on or after this date
    pub start_date: Option<NaiveDate>,
    #[param(value_type = String, format = "date")]
    #[schema(value_type = String, format = "date")]
    /// Only requests ending on or before this date
    pub end_date: Option<NaiveDate>,
    #[schema(example = "vacation")]
    /// Substring match on the reason text
    pub keyword: Option<String>,
    #[schema(example = 1)]
    /// Pagination page number (start with 1)
    pub page: Option<u32>,
    #[schema(example = 10)]
    /// Pagination page size
    pub page_size: Option<u32>,
    #[schema(example = "start_date")]
    /// Sort field; unknown names fall back to creation time descending
    pub sort_by: Option<String>,
    #[schema(example = "desc")]
    /// "desc"/"descending" for descending, anything else ascending
    pub sort_order: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct LeaveResponse {
    #[schema(example = 1)]
    /// leave application id
    pub id: u64,
    /// employee id for whom the leave is applied
    #[schema(example = 1)]
    pub employee_id: u64,
    #[schema(example = "John Doe")]
    pub employee_name: String,
    #[schema(example = "annual")]
    pub leave_type: LeaveType,
    #[schema(example = "2026-01-01", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2026-01-03", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    #[schema(example = "pending")]
    pub status: LeaveStatus,
    #[schema(example = "family vacation", nullable = true)]
    pub reason: Option<String>,
    #[schema(example = "2026-01-01T00:00:00Z", format = "date-time", value_type = String)]
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, ToSchema)]
#[schema(example = json!({
    "data": [
        {
            "id": 1,
            "employee_id": 1,
            "employee_name": "John Doe",
            "leave_type": "annual",
            "start_date": "2025-04-20",
            "end_date": "2025-04-25",
            "status": "pending",
            "reason": "Vacation",
            "created_at": "2025-04-15T00:00:00Z"
        }
    ],
    "current_page": 1,
    "page_size": 10,
    "total_count": 1,
    "total_pages": 1
}))]
pub struct PagedLeaveResponse {
    pub data: Vec<LeaveResponse>,
    #[schema(example = 1)]
    pub current_page: u32,
    #[schema(example = 10)]
    pub page_size: u32,
    #[schema(example = 1)]
    pub total_count: u64,
    #[schema(example = 1)]
    pub total_pages: u32,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct ReportQuery {
    #[schema(example = 2025)]
    /// Calendar year of the leave start date
    pub year: Option<i32>,
    #[schema(example = "IT")]
    /// Exact department name
    pub department: Option<String>,
    #[param(value_type = String, format = "date")]
    #[schema(value_type = String, format = "date")]
    pub start_date: Option<NaiveDate>,
    #[param(value_type = String, format = "date")]
    #[schema(value_type = String, format = "date")]
    pub end_date: Option<NaiveDate>,
}

#[derive(Serialize, ToSchema)]
pub struct LeaveReportRow {
    #[schema(example = "John Doe")]
    pub employee_name: String,
    #[schema(example = "IT")]
    pub department: String,
    #[schema(example = 8)]
    pub total_leaves: i64,
    #[schema(example = 6)]
    pub annual_leaves: i64,
    #[schema(example = 2)]
    pub sick_leaves: i64,
    #[schema(example = 0)]
    pub other_leaves: i64,
}

fn to_response(row: LeaveWithEmployee) -> LeaveResponse {
    LeaveResponse {
        id: row.request.id,
        employee_id: row.request.employee_id,
        employee_name: row.full_name,
        leave_type: row.request.leave_type,
        start_date: row.request.start_date,
        end_date: row.request.end_date,
        status: row.request.status,
        reason: row.request.reason,
        created_at: row.request.created_at,
    }
}

fn to_report_row(row: ReportRow) -> LeaveReportRow {
    LeaveReportRow {
        employee_name: row.employee_name,
        department: row.department,
        total_leaves: row.total_leaves,
        annual_leaves: row.annual_leaves,
        sick_leaves: row.sick_leaves,
        other_leaves: row.other_leaves,
    }
}

/* =========================
List leave requests
========================= */
#[utoipa::path(
    get,
    path = "/api/leaverequests",
    params(LeaveFilterQuery),
    responses(
        (status = 200, description = "Paginated leave list", body = PagedLeaveResponse)
    ),
    tag = "Leave"
)]
pub async fn leave_list(
    svc: Service,
    query: web::Query<LeaveFilterQuery>,
) -> actix_web::Result<impl Responder> {
    let query = query.into_inner();

    let domain = LeaveQuery {
        employee_id: query.employee_id,
        leave_type: query.leave_type,
        status: query.status,
        start_date: query.start_date,
        end_date: query.end_date,
        keyword: query.keyword,
        page: query.page.unwrap_or(1).max(1),
        page_size: query.page_size.unwrap_or(10).clamp(1, 100),
        sort_by: query.sort_by,
        sort_order: query.sort_order,
    };

    let page = svc.list(domain).await?;

    Ok(HttpResponse::Ok().json(PagedLeaveResponse {
        data: page.data.into_iter().map(to_response).collect(),
        current_page: page.current_page,
        page_size: page.page_size,
        total_count: page.total_count,
        total_pages: page.total_pages,
    }))
}

/* =========================
Create leave request
========================= */
#[utoipa::path(
    post,
    path = "/api/leaverequests",
    request_body(
        content = CreateLeave,
        description = "Leave request payload",
        content_type = "application/json"
    ),
    responses(
        (status = 201, description = "Leave request created", body = LeaveResponse),
        (status = 400, description = "Business rule violated", body = Object, example = json!({
            "message": "sick leave requires a non-empty reason"
        })),
        (status = 404, description = "Employee not found")
    ),
    tag = "Leave"
)]
pub async fn create_leave(
    svc: Service,
    payload: web::Json<CreateLeave>,
) -> actix_web::Result<impl Responder> {
    let payload = payload.into_inner();

    let created = svc
        .create(NewLeaveRequest {
            employee_id: payload.employee_id,
            leave_type: payload.leave_type,
            start_date: payload.start_date,
            end_date: payload.end_date,
            reason: payload.reason,
        })
        .await?;

    Ok(HttpResponse::Created().json(to_response(created)))
}

/* =========================
Update leave request
========================= */
#[utoipa::path(
    put,
    path = "/api/leaverequests/{id}",
    params(
        ("id" = u64, Path, description = "ID of the leave request to update")
    ),
    request_body = UpdateLeave,
    responses(
        (status = 200, description = "Leave request updated", body = LeaveResponse),
        (status = 400, description = "Business rule violated"),
        (status = 404, description = "Leave request not found", body = Object, example = json!({
            "message": "leave request with id 5 not found"
        }))
    ),
    tag = "Leave"
)]
pub async fn update_leave(
    svc: Service,
    path: web::Path<u64>,
    payload: web::Json<UpdateLeave>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();
    let payload = payload.into_inner();

    let updated = svc
        .update(
            id,
            LeaveUpdate {
                leave_type: payload.leave_type,
                start_date: payload.start_date,
                end_date: payload.end_date,
                status: payload.status,
                reason: payload.reason,
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(to_response(updated)))
}

/* =========================
Delete leave request
========================= */
#[utoipa::path(
    delete,
    path = "/api/leaverequests/{id}",
    params(
        ("id" = u64, Path, description = "ID of the leave request to delete")
    ),
    responses(
        (status = 204, description = "Leave request deleted"),
        (status = 404, description = "Leave request not found")
    ),
    tag = "Leave"
)]
pub async fn delete_leave(svc: Service, path: web::Path<u64>) -> actix_web::Result<impl Responder> {
    svc.delete(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/* =========================
Approve leave request
========================= */
#[utoipa::path(
    post,
    path = "/api/leaverequests/{id}/approve",
    params(
        ("id" = u64, Path, description = "ID of the leave request to approve")
    ),
    responses(
        (status = 200, description = "Leave request approved", body = LeaveResponse),
        (status = 400, description = "Request is not pending", body = Object, example = json!({
            "message": "only pending leave requests can be approved, current status is approved"
        })),
        (status = 404, description = "Leave request not found")
    ),
    tag = "Leave"
)]
pub async fn approve_leave(
    svc: Service,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let approved = svc.approve(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(to_response(approved)))
}

/* =========================
Departmental leave report
========================= */
#[utoipa::path(
    get,
    path = "/api/leaverequests/report",
    params(ReportQuery),
    responses(
        (status = 200, description = "Approved leave days per employee", body = [LeaveReportRow])
    ),
    tag = "Leave"
)]
pub async fn leave_report(
    svc: Service,
    query: web::Query<ReportQuery>,
) -> actix_web::Result<impl Responder> {
    let query = query.into_inner();

    let rows = svc
        .report(ReportFilter {
            year: query.year,
            department: query.department,
            start_date: query.start_date,
            end_date: query.end_date,
        })
        .await?;

    let rows: Vec<LeaveReportRow> = rows.into_iter().map(to_report_row).collect();
    Ok(HttpResponse::Ok().json(rows))
}
