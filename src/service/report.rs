use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::model::{LeaveStatus, LeaveType, LeaveWithEmployee};

/// Optional restrictions on the departmental report. All filters are
/// conjunctive; year matches the calendar year of the start date.
#[derive(Debug, Clone, Default)]
pub struct ReportFilter {
    pub year: Option<i32>,
    pub department: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// One row per employee with at least one matching approved request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub employee_id: u64,
    pub employee_name: String,
    pub department: String,
    pub total_leaves: i64,
    pub annual_leaves: i64,
    pub sick_leaves: i64,
    pub other_leaves: i64,
}

/// Only approved requests count. Grouped by employee, ordered by employee id
/// so the output is deterministic for a given input.
pub fn aggregate(filter: &ReportFilter, rows: &[LeaveWithEmployee]) -> Vec<ReportRow> {
    let mut groups: BTreeMap<u64, ReportRow> = BTreeMap::new();

    for row in rows {
        let r = &row.request;
        if r.status != LeaveStatus::Approved {
            continue;
        }
        if let Some(year) = filter.year {
            if r.start_year() != year {
                continue;
            }
        }
        if let Some(department) = filter.department.as_deref() {
            if row.department != department {
                continue;
            }
        }
        if let Some(lower) = filter.start_date {
            if r.start_date < lower {
                continue;
            }
        }
        if let Some(upper) = filter.end_date {
            if r.end_date > upper {
                continue;
            }
        }

        let entry = groups.entry(r.employee_id).or_insert_with(|| ReportRow {
            employee_id: r.employee_id,
            employee_name: row.full_name.clone(),
            department: row.department.clone(),
            total_leaves: 0,
            annual_leaves: 0,
            sick_leaves: 0,
            other_leaves: 0,
        });

        let days = r.days();
        entry.total_leaves += days;
        match r.leave_type {
            LeaveType::Annual => entry.annual_leaves += days,
            LeaveType::Sick => entry.sick_leaves += days,
            LeaveType::Other => entry.other_leaves += days,
        }
    }

    groups.into_values().collect()
}
