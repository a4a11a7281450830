use crate::error::LeaveError;
use crate::model::{LeaveRequest, LeaveStatus, LeaveType};

/// Maximum inclusive days of annual leave an employee may hold starting
/// within one calendar year, counting pending and approved requests.
pub const MAX_ANNUAL_LEAVE_DAYS: i64 = 20;

/// Checks run in a fixed order and stop at the first failure, so the caller
/// always sees the same error when several rules would fire at once:
/// overlap, then quota, then reason.
pub fn validate_create(
    candidate: &LeaveRequest,
    existing: &[LeaveRequest],
) -> Result<(), LeaveError> {
    check_overlap(candidate, existing, None)?;
    if candidate.leave_type == LeaveType::Annual {
        check_annual_quota(candidate, existing, None)?;
    }
    check_sick_reason(candidate.leave_type, candidate.reason.as_deref())
}

/// Update path: the record being replaced is excluded from the comparison
/// set, and the quota check fires when either side of the change is annual so
/// that type changes into and out of annual are both accounted for.
pub fn validate_update(
    original: &LeaveRequest,
    proposed: &LeaveRequest,
    existing: &[LeaveRequest],
) -> Result<(), LeaveError> {
    if proposed.start_date > proposed.end_date {
        return Err(LeaveError::InvalidRange);
    }
    check_overlap(proposed, existing, Some(original.id))?;
    if proposed.leave_type == LeaveType::Annual || original.leave_type == LeaveType::Annual {
        check_annual_quota(proposed, existing, Some(original.id))?;
    }
    check_sick_reason(proposed.leave_type, proposed.reason.as_deref())
}

fn check_overlap(
    candidate: &LeaveRequest,
    existing: &[LeaveRequest],
    exclude: Option<u64>,
) -> Result<(), LeaveError> {
    let clash = existing
        .iter()
        .filter(|r| exclude != Some(r.id))
        .filter(|r| r.status != LeaveStatus::Rejected)
        .find(|r| r.overlaps(candidate.start_date, candidate.end_date));

    match clash {
        Some(r) => Err(LeaveError::Overlap {
            start: r.start_date,
            end: r.end_date,
        }),
        None => Ok(()),
    }
}

fn check_annual_quota(
    candidate: &LeaveRequest,
    existing: &[LeaveRequest],
    exclude: Option<u64>,
) -> Result<(), LeaveError> {
    let year = candidate.start_year();

    let booked: i64 = existing
        .iter()
        .filter(|r| exclude != Some(r.id))
        .filter(|r| {
            r.leave_type == LeaveType::Annual
                && r.status != LeaveStatus::Rejected
                && r.start_year() == year
        })
        .map(|r| r.days())
        .sum();

    let requested = if candidate.leave_type == LeaveType::Annual {
        candidate.days()
    } else {
        0
    };

    if booked + requested > MAX_ANNUAL_LEAVE_DAYS {
        return Err(LeaveError::QuotaExceeded {
            limit: MAX_ANNUAL_LEAVE_DAYS,
        });
    }
    Ok(())
}

fn check_sick_reason(leave_type: LeaveType, reason: Option<&str>) -> Result<(), LeaveError> {
    if leave_type == LeaveType::Sick && reason.map(str::trim).unwrap_or("").is_empty() {
        return Err(LeaveError::MissingReason);
    }
    Ok(())
}
