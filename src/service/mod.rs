use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, Utc};
use futures::lock::Mutex as AsyncMutex;
use tracing::info;

use crate::error::LeaveError;
use crate::model::{LeaveRequest, LeaveStatus, LeaveType, LeaveWithEmployee};
use crate::store::LeaveStore;

pub mod pipeline;
pub mod report;
pub mod validation;

pub use pipeline::{LeaveQuery, Page};
pub use report::{ReportFilter, ReportRow};

/// Fields accepted when creating a request. Status and creation timestamp are
/// never taken from the caller.
#[derive(Debug, Clone)]
pub struct NewLeaveRequest {
    pub employee_id: u64,
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: Option<String>,
}

/// Full replacement of a request's mutable fields. Status is caller-settable
/// here while approve goes through the guarded transition; see DESIGN.md.
#[derive(Debug, Clone)]
pub struct LeaveUpdate {
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: LeaveStatus,
    pub reason: Option<String>,
}

/// Orchestrates validation, the store and the status state machine. The only
/// component with side effects.
pub struct LeaveService<S> {
    store: S,
    // Validation reads and the final write are not atomic in the store, so
    // mutations on one employee's requests serialize on a per-employee lock.
    // The registry grows with distinct employee ids, bounded by headcount.
    locks: Mutex<HashMap<u64, Arc<AsyncMutex<()>>>>,
}

impl<S: LeaveStore> LeaveService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            locks: Mutex::new(HashMap::new()),
        }
    }

    fn employee_lock(&self, employee_id: u64) -> Arc<AsyncMutex<()>> {
        let mut locks = self.locks.lock().expect("employee lock registry poisoned");
        locks
            .entry(employee_id)
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }

    pub async fn create(&self, input: NewLeaveRequest) -> Result<LeaveWithEmployee, LeaveError> {
        let employee = self
            .store
            .get_employee(input.employee_id)
            .await?
            .ok_or(LeaveError::NotFound {
                entity: "employee",
                id: input.employee_id,
            })?;

        if input.start_date > input.end_date {
            return Err(LeaveError::InvalidRange);
        }

        let lock = self.employee_lock(input.employee_id);
        let _guard = lock.lock().await;

        let existing = self.store.requests_for_employee(input.employee_id).await?;

        let mut record = LeaveRequest {
            id: 0,
            employee_id: input.employee_id,
            leave_type: input.leave_type,
            start_date: input.start_date,
            end_date: input.end_date,
            status: LeaveStatus::Pending,
            reason: input.reason,
            created_at: Utc::now(),
        };
        validation::validate_create(&record, &existing)?;

        record.id = self.store.insert_leave_request(&record).await?;
        info!(leave_id = record.id, employee_id = record.employee_id, "Leave request created");

        Ok(LeaveWithEmployee {
            request: record,
            full_name: employee.full_name,
            department: employee.department,
        })
    }

    pub async fn update(
        &self,
        id: u64,
        input: LeaveUpdate,
    ) -> Result<LeaveWithEmployee, LeaveError> {
        // First read only learns the owning employee; the authoritative read
        // happens under that employee's lock.
        let probe = self.fetch_request(id).await?;
        let lock = self.employee_lock(probe.employee_id);
        let _guard = lock.lock().await;

        let original = self.fetch_request(id).await?;
        let existing = self
            .store
            .requests_for_employee(original.employee_id)
            .await?;

        let proposed = LeaveRequest {
            id: original.id,
            employee_id: original.employee_id,
            leave_type: input.leave_type,
            start_date: input.start_date,
            end_date: input.end_date,
            status: input.status,
            reason: input.reason,
            created_at: original.created_at,
        };
        validation::validate_update(&original, &proposed, &existing)?;

        self.store.update_leave_request(&proposed).await?;
        info!(leave_id = id, "Leave request updated");

        self.join_employee(proposed).await
    }

    pub async fn delete(&self, id: u64) -> Result<(), LeaveError> {
        self.fetch_request(id).await?;
        self.store.delete_leave_request(id).await?;
        info!(leave_id = id, "Leave request deleted");
        Ok(())
    }

    /// The one guarded transition: Pending -> Approved, nothing else.
    pub async fn approve(&self, id: u64) -> Result<LeaveWithEmployee, LeaveError> {
        let probe = self.fetch_request(id).await?;
        let lock = self.employee_lock(probe.employee_id);
        let _guard = lock.lock().await;

        let mut request = self.fetch_request(id).await?;
        if request.status != LeaveStatus::Pending {
            return Err(LeaveError::InvalidState {
                status: request.status,
            });
        }

        request.status = LeaveStatus::Approved;
        self.store.update_leave_request(&request).await?;
        info!(leave_id = id, employee_id = request.employee_id, "Leave request approved");

        self.join_employee(request).await
    }

    pub async fn list(&self, query: LeaveQuery) -> Result<Page<LeaveWithEmployee>, LeaveError> {
        let rows = self.store.fetch_joined().await?;
        Ok(pipeline::run(&query, rows))
    }

    pub async fn report(&self, filter: ReportFilter) -> Result<Vec<ReportRow>, LeaveError> {
        let rows = self.store.fetch_joined().await?;
        Ok(report::aggregate(&filter, &rows))
    }

    async fn fetch_request(&self, id: u64) -> Result<LeaveRequest, LeaveError> {
        self.store
            .get_leave_request(id)
            .await?
            .ok_or(LeaveError::NotFound {
                entity: "leave request",
                id,
            })
    }

    async fn join_employee(
        &self,
        request: LeaveRequest,
    ) -> Result<LeaveWithEmployee, LeaveError> {
        let employee = self
            .store
            .get_employee(request.employee_id)
            .await?
            .ok_or(LeaveError::NotFound {
                entity: "employee",
                id: request.employee_id,
            })?;

        Ok(LeaveWithEmployee {
            request,
            full_name: employee.full_name,
            department: employee.department,
        })
    }
}
