use crate::api::leave_request::{
    CreateLeave, LeaveFilterQuery, LeaveReportRow, LeaveResponse, PagedLeaveResponse, ReportQuery,
    UpdateLeave,
};
use crate::model::{Employee, LeaveStatus, LeaveType};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Leave Desk API",
        version = "1.0.0",
        description = r#"
## Employee Leave Management

This API manages employee leave requests end to end.

### 🔹 Key Features
- **Leave Requests**
  - Create, update, delete and approve leave requests
  - Filtered, sorted and paginated listing
- **Business Rules**
  - No overlapping leave per employee
  - 20-day annual leave quota per calendar year
  - Sick leave requires a reason
- **Reporting**
  - Approved leave days per employee, filtered by year, department or date range

### 📦 Response Format
- JSON-based RESTful responses
- Pagination supported for list endpoints

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::leave_request::leave_list,
        crate::api::leave_request::create_leave,
        crate::api::leave_request::update_leave,
        crate::api::leave_request::delete_leave,
        crate::api::leave_request::approve_leave,
        crate::api::leave_request::leave_report
    ),
    components(
        schemas(
            CreateLeave,
            UpdateLeave,
            LeaveFilterQuery,
            LeaveResponse,
            PagedLeaveResponse,
            ReportQuery,
            LeaveReportRow,
            LeaveType,
            LeaveStatus,
            Employee
        )
    ),
    tags(
        (name = "Leave", description = "Leave management APIs"),
    )
)]
pub struct ApiDoc;
