use chrono::NaiveDate;

use leavedesk::error::LeaveError;
use leavedesk::model::{Employee, LeaveStatus, LeaveType};
use leavedesk::service::{
    LeaveQuery, LeaveService, LeaveUpdate, NewLeaveRequest, ReportFilter,
};
use leavedesk::store::MemoryStore;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn service() -> LeaveService<MemoryStore> {
    let store = MemoryStore::with_employees(vec![
        Employee {
            id: 1,
            full_name: "John Doe".into(),
            department: "IT".into(),
            joining_date: date(2022, 1, 15),
        },
        Employee {
            id: 2,
            full_name: "Jane Smith".into(),
            department: "HR".into(),
            joining_date: date(2021, 6, 10),
        },
    ]);
    LeaveService::new(store)
}

fn new_request(
    employee_id: u64,
    leave_type: LeaveType,
    start: NaiveDate,
    end: NaiveDate,
    reason: Option<&str>,
) -> NewLeaveRequest {
    NewLeaveRequest {
        employee_id,
        leave_type,
        start_date: start,
        end_date: end,
        reason: reason.map(str::to_owned),
    }
}

fn update_from(created: &leavedesk::model::LeaveWithEmployee) -> LeaveUpdate {
    let r = &created.request;
    LeaveUpdate {
        leave_type: r.leave_type,
        start_date: r.start_date,
        end_date: r.end_date,
        status: r.status,
        reason: r.reason.clone(),
    }
}

#[actix_web::test]
async fn create_persists_pending_with_assigned_id() {
    let svc = service();

    let created = svc
        .create(new_request(
            1,
            LeaveType::Annual,
            date(2025, 4, 20),
            date(2025, 4, 25),
            Some("Vacation"),
        ))
        .await
        .unwrap();

    assert_eq!(created.request.id, 1);
    assert_eq!(created.request.status, LeaveStatus::Pending);
    assert_eq!(created.full_name, "John Doe");
    assert_eq!(created.department, "IT");
}

#[actix_web::test]
async fn create_fails_for_unknown_employee() {
    let svc = service();

    let err = svc
        .create(new_request(
            99,
            LeaveType::Other,
            date(2025, 1, 1),
            date(2025, 1, 2),
            None,
        ))
        .await
        .unwrap_err();

    assert!(matches!(err, LeaveError::NotFound { entity: "employee", id: 99 }));
}

#[actix_web::test]
async fn create_rejects_inverted_date_range() {
    let svc = service();

    let err = svc
        .create(new_request(
            1,
            LeaveType::Other,
            date(2025, 2, 10),
            date(2025, 2, 5),
            None,
        ))
        .await
        .unwrap_err();

    assert!(matches!(err, LeaveError::InvalidRange));
}

#[actix_web::test]
async fn overlapping_create_fails_and_persists_nothing() {
    let svc = service();
    svc.create(new_request(
        1,
        LeaveType::Annual,
        date(2025, 4, 20),
        date(2025, 4, 25),
        Some("Vacation"),
    ))
    .await
    .unwrap();

    let err = svc
        .create(new_request(
            1,
            LeaveType::Other,
            date(2025, 4, 22),
            date(2025, 4, 23),
            None,
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, LeaveError::Overlap { .. }));

    let page = svc.list(LeaveQuery::default()).await.unwrap();
    assert_eq!(page.total_count, 1);
}

#[actix_web::test]
async fn overlap_is_scoped_per_employee() {
    let svc = service();
    svc.create(new_request(
        1,
        LeaveType::Annual,
        date(2025, 4, 20),
        date(2025, 4, 25),
        None,
    ))
    .await
    .unwrap();

    // Same window for a different employee is fine.
    svc.create(new_request(
        2,
        LeaveType::Annual,
        date(2025, 4, 20),
        date(2025, 4, 25),
        None,
    ))
    .await
    .unwrap();
}

#[actix_web::test]
async fn rejected_request_frees_its_date_range() {
    let svc = service();
    let created = svc
        .create(new_request(
            1,
            LeaveType::Other,
            date(2025, 4, 20),
            date(2025, 4, 25),
            None,
        ))
        .await
        .unwrap();

    let mut update = update_from(&created);
    update.status = LeaveStatus::Rejected;
    svc.update(created.request.id, update).await.unwrap();

    svc.create(new_request(
        1,
        LeaveType::Other,
        date(2025, 4, 22),
        date(2025, 4, 23),
        None,
    ))
    .await
    .unwrap();
}

#[actix_web::test]
async fn annual_quota_allows_twenty_days_then_rejects_the_twenty_first() {
    let svc = service();

    // 6 approved days.
    let first = svc
        .create(new_request(
            1,
            LeaveType::Annual,
            date(2025, 4, 20),
            date(2025, 4, 25),
            Some("Vacation"),
        ))
        .await
        .unwrap();
    svc.approve(first.request.id).await.unwrap();

    // 14 more days, exactly 20 in total.
    svc.create(new_request(
        1,
        LeaveType::Annual,
        date(2025, 4, 26),
        date(2025, 5, 9),
        None,
    ))
    .await
    .unwrap();

    // One extra day over the quota.
    let err = svc
        .create(new_request(
            1,
            LeaveType::Annual,
            date(2025, 5, 10),
            date(2025, 5, 10),
            None,
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, LeaveError::QuotaExceeded { limit: 20 }));
}

#[actix_web::test]
async fn fifteen_day_request_on_top_of_six_exceeds_quota() {
    let svc = service();
    let first = svc
        .create(new_request(
            1,
            LeaveType::Annual,
            date(2025, 4, 20),
            date(2025, 4, 25),
            Some("Vacation"),
        ))
        .await
        .unwrap();
    svc.approve(first.request.id).await.unwrap();

    let err = svc
        .create(new_request(
            1,
            LeaveType::Annual,
            date(2025, 4, 26),
            date(2025, 5, 10),
            None,
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, LeaveError::QuotaExceeded { limit: 20 }));
}

#[actix_web::test]
async fn sick_leave_without_reason_never_persists() {
    let svc = service();

    for reason in [None, Some(""), Some("   ")] {
        let err = svc
            .create(new_request(
                1,
                LeaveType::Sick,
                date(2025, 6, 1),
                date(2025, 6, 2),
                reason,
            ))
            .await
            .unwrap_err();
        assert!(matches!(err, LeaveError::MissingReason));
    }

    let page = svc.list(LeaveQuery::default()).await.unwrap();
    assert_eq!(page.total_count, 0);
}

#[actix_web::test]
async fn update_of_missing_request_is_not_found() {
    let svc = service();

    let err = svc
        .update(
            42,
            LeaveUpdate {
                leave_type: LeaveType::Other,
                start_date: date(2025, 1, 1),
                end_date: date(2025, 1, 2),
                status: LeaveStatus::Pending,
                reason: None,
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, LeaveError::NotFound { entity: "leave request", id: 42 }));
}

#[actix_web::test]
async fn update_can_move_within_its_own_old_range() {
    let svc = service();
    let created = svc
        .create(new_request(
            1,
            LeaveType::Other,
            date(2025, 3, 1),
            date(2025, 3, 5),
            None,
        ))
        .await
        .unwrap();

    let mut update = update_from(&created);
    update.start_date = date(2025, 3, 2);
    update.end_date = date(2025, 3, 6);
    let updated = svc.update(created.request.id, update).await.unwrap();

    assert_eq!(updated.request.start_date, date(2025, 3, 2));
    assert_eq!(updated.request.end_date, date(2025, 3, 6));
}

#[actix_web::test]
async fn update_sets_status_directly_without_approval_guard() {
    let svc = service();
    let created = svc
        .create(new_request(
            1,
            LeaveType::Other,
            date(2025, 3, 1),
            date(2025, 3, 5),
            None,
        ))
        .await
        .unwrap();

    let mut update = update_from(&created);
    update.status = LeaveStatus::Approved;
    let updated = svc.update(created.request.id, update).await.unwrap();
    assert_eq!(updated.request.status, LeaveStatus::Approved);
}

#[actix_web::test]
async fn retyping_to_annual_is_checked_against_the_quota() {
    let svc = service();

    // Fill the 2025 quota completely.
    let annual = svc
        .create(new_request(
            1,
            LeaveType::Annual,
            date(2025, 1, 1),
            date(2025, 1, 20),
            None,
        ))
        .await
        .unwrap();
    svc.approve(annual.request.id).await.unwrap();

    let sick = svc
        .create(new_request(
            1,
            LeaveType::Sick,
            date(2025, 6, 1),
            date(2025, 6, 5),
            Some("flu"),
        ))
        .await
        .unwrap();

    let mut update = update_from(&sick);
    update.leave_type = LeaveType::Annual;
    let err = svc.update(sick.request.id, update).await.unwrap_err();
    assert!(matches!(err, LeaveError::QuotaExceeded { .. }));

    // Retyping the annual block to other releases the quota for the sick one.
    let mut release = update_from(&annual);
    release.leave_type = LeaveType::Other;
    release.status = LeaveStatus::Approved;
    svc.update(annual.request.id, release).await.unwrap();

    let mut retry = update_from(&sick);
    retry.leave_type = LeaveType::Annual;
    svc.update(sick.request.id, retry).await.unwrap();
}

#[actix_web::test]
async fn approve_is_a_one_way_transition() {
    let svc = service();
    let created = svc
        .create(new_request(
            1,
            LeaveType::Annual,
            date(2025, 4, 20),
            date(2025, 4, 25),
            None,
        ))
        .await
        .unwrap();

    let approved = svc.approve(created.request.id).await.unwrap();
    assert_eq!(approved.request.status, LeaveStatus::Approved);

    // Second approve fails.
    let err = svc.approve(created.request.id).await.unwrap_err();
    assert!(matches!(
        err,
        LeaveError::InvalidState { status: LeaveStatus::Approved }
    ));

    // Approving a rejected request fails too.
    let rejected = svc
        .create(new_request(
            1,
            LeaveType::Other,
            date(2025, 6, 1),
            date(2025, 6, 2),
            None,
        ))
        .await
        .unwrap();
    let mut update = update_from(&rejected);
    update.status = LeaveStatus::Rejected;
    svc.update(rejected.request.id, update).await.unwrap();

    let err = svc.approve(rejected.request.id).await.unwrap_err();
    assert!(matches!(
        err,
        LeaveError::InvalidState { status: LeaveStatus::Rejected }
    ));
}

#[actix_web::test]
async fn approve_of_missing_request_is_not_found() {
    let svc = service();
    let err = svc.approve(7).await.unwrap_err();
    assert!(matches!(err, LeaveError::NotFound { entity: "leave request", id: 7 }));
}

#[actix_web::test]
async fn delete_removes_regardless_of_status_then_not_found() {
    let svc = service();
    let created = svc
        .create(new_request(
            1,
            LeaveType::Annual,
            date(2025, 4, 20),
            date(2025, 4, 25),
            None,
        ))
        .await
        .unwrap();
    svc.approve(created.request.id).await.unwrap();

    svc.delete(created.request.id).await.unwrap();

    let err = svc.delete(created.request.id).await.unwrap_err();
    assert!(matches!(err, LeaveError::NotFound { .. }));

    let page = svc.list(LeaveQuery::default()).await.unwrap();
    assert_eq!(page.total_count, 0);
}

#[actix_web::test]
async fn listing_filters_and_paginates() {
    let svc = service();
    for month in 1..=5u32 {
        svc.create(new_request(
            1,
            LeaveType::Other,
            date(2025, month, 1),
            date(2025, month, 2),
            Some("offsite"),
        ))
        .await
        .unwrap();
    }
    svc.create(new_request(
        2,
        LeaveType::Sick,
        date(2025, 7, 1),
        date(2025, 7, 3),
        Some("flu"),
    ))
    .await
    .unwrap();

    let page = svc
        .list(LeaveQuery {
            employee_id: Some(1),
            page_size: 2,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.total_count, 5);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.data.len(), 2);

    // Beyond the last page: empty data, same totals.
    let page = svc
        .list(LeaveQuery {
            employee_id: Some(1),
            page: 9,
            page_size: 2,
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(page.data.is_empty());
    assert_eq!(page.total_count, 5);

    let page = svc
        .list(LeaveQuery {
            keyword: Some("FLU".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.total_count, 1);
    assert_eq!(page.data[0].request.employee_id, 2);
}

#[actix_web::test]
async fn report_counts_only_approved_leave_in_the_window() {
    let svc = service();

    let annual = svc
        .create(new_request(
            1,
            LeaveType::Annual,
            date(2025, 4, 20),
            date(2025, 4, 25),
            Some("Vacation"),
        ))
        .await
        .unwrap();
    svc.approve(annual.request.id).await.unwrap();

    let sick = svc
        .create(new_request(
            1,
            LeaveType::Sick,
            date(2025, 5, 5),
            date(2025, 5, 6),
            Some("flu"),
        ))
        .await
        .unwrap();
    svc.approve(sick.request.id).await.unwrap();

    // Pending request for Jane, must not appear.
    svc.create(new_request(
        2,
        LeaveType::Annual,
        date(2025, 3, 1),
        date(2025, 3, 10),
        None,
    ))
    .await
    .unwrap();

    let rows = svc
        .report(ReportFilter {
            year: Some(2025),
            department: Some("IT".into()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    let john = &rows[0];
    assert_eq!(john.employee_name, "John Doe");
    assert_eq!(john.annual_leaves, 6);
    assert_eq!(john.sick_leaves, 2);
    assert_eq!(john.total_leaves, 8);

    let hr_rows = svc
        .report(ReportFilter {
            year: Some(2025),
            department: Some("HR".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(hr_rows.is_empty());
}
