use std::cmp::Ordering;
use std::str::FromStr;

use chrono::NaiveDate;
use strum_macros::EnumString;

use crate::model::{LeaveStatus, LeaveType, LeaveWithEmployee};

/// Filter, sort and pagination inputs for the list endpoint. The handler
/// clamps page and page_size before this reaches the pipeline.
#[derive(Debug, Clone)]
pub struct LeaveQuery {
    pub employee_id: Option<u64>,
    pub leave_type: Option<LeaveType>,
    pub status: Option<LeaveStatus>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub keyword: Option<String>,
    pub page: u32,
    pub page_size: u32,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

impl Default for LeaveQuery {
    fn default() -> Self {
        Self {
            employee_id: None,
            leave_type: None,
            status: None,
            start_date: None,
            end_date: None,
            keyword: None,
            page: 1,
            page_size: 10,
            sort_by: None,
            sort_order: None,
        }
    }
}

#[derive(Debug)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub current_page: u32,
    pub page_size: u32,
    pub total_count: u64,
    pub total_pages: u32,
}

/// Closed set of sortable attributes. A sort_by value that parses to none of
/// these is silently ignored and the default order applies, so there is no
/// way to smuggle an arbitrary expression into the ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "snake_case")]
enum SortField {
    Id,
    EmployeeId,
    LeaveType,
    StartDate,
    EndDate,
    Status,
    Reason,
    CreatedAt,
}

/// Predicates apply conjunctively, then ordering, then the total is counted
/// over the whole filtered set before offset/limit carve out the page.
pub fn run(query: &LeaveQuery, mut rows: Vec<LeaveWithEmployee>) -> Page<LeaveWithEmployee> {
    rows.retain(|row| matches(query, row));

    let field = query
        .sort_by
        .as_deref()
        .and_then(|s| SortField::from_str(s).ok());
    let descending = query
        .sort_order
        .as_deref()
        .map(|s| {
            let s = s.to_ascii_lowercase();
            s == "desc" || s == "descending"
        })
        .unwrap_or(false);

    rows.sort_by(|a, b| compare(field, descending, a, b));

    let total_count = rows.len() as u64;
    let page = query.page.max(1);
    let page_size = query.page_size.max(1);
    let total_pages = u32::try_from(total_count.div_ceil(page_size as u64)).unwrap_or(u32::MAX);

    let data = rows
        .into_iter()
        .skip((page as usize - 1) * page_size as usize)
        .take(page_size as usize)
        .collect();

    Page {
        data,
        current_page: page,
        page_size,
        total_count,
        total_pages,
    }
}

fn matches(query: &LeaveQuery, row: &LeaveWithEmployee) -> bool {
    let r = &row.request;

    if let Some(employee_id) = query.employee_id {
        if r.employee_id != employee_id {
            return false;
        }
    }
    if let Some(leave_type) = query.leave_type {
        if r.leave_type != leave_type {
            return false;
        }
    }
    if let Some(status) = query.status {
        if r.status != status {
            return false;
        }
    }
    if let Some(lower) = query.start_date {
        if r.start_date < lower {
            return false;
        }
    }
    if let Some(upper) = query.end_date {
        if r.end_date > upper {
            return false;
        }
    }
    if let Some(keyword) = query.keyword.as_deref() {
        let needle = keyword.to_lowercase();
        let hit = r
            .reason
            .as_deref()
            .is_some_and(|reason| reason.to_lowercase().contains(&needle));
        if !hit {
            return false;
        }
    }

    true
}

/// Ties always break by id ascending so pagination stays stable across pages.
fn compare(
    field: Option<SortField>,
    descending: bool,
    a: &LeaveWithEmployee,
    b: &LeaveWithEmployee,
) -> Ordering {
    let (a, b) = (&a.request, &b.request);

    let primary = match field {
        // Default order: newest first.
        None => b.created_at.cmp(&a.created_at),
        Some(f) => {
            let ord = match f {
                SortField::Id => a.id.cmp(&b.id),
                SortField::EmployeeId => a.employee_id.cmp(&b.employee_id),
                SortField::LeaveType => a.leave_type.cmp(&b.leave_type),
                SortField::StartDate => a.start_date.cmp(&b.start_date),
                SortField::EndDate => a.end_date.cmp(&b.end_date),
                SortField::Status => a.status.cmp(&b.status),
                SortField::Reason => a.reason.as_deref().cmp(&b.reason.as_deref()),
                SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            };
            if descending { ord.reverse() } else { ord }
        }
    };

    primary.then_with(|| a.id.cmp(&b.id))
}
