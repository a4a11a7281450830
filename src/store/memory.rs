use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::model::{Employee, LeaveRequest, LeaveWithEmployee};
use crate::store::LeaveStore;

/// In-memory store used by the test suite. Same contract as the MySQL
/// store, ids assigned sequentially.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    employees: BTreeMap<u64, Employee>,
    requests: BTreeMap<u64, LeaveRequest>,
    next_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_employees(employees: Vec<Employee>) -> Self {
        let store = Self::default();
        {
            let mut inner = store.inner.lock().expect("memory store poisoned");
            for employee in employees {
                inner.employees.insert(employee.id, employee);
            }
        }
        store
    }
}

impl LeaveStore for MemoryStore {
    async fn get_employee(&self, id: u64) -> Result<Option<Employee>, sqlx::Error> {
        let inner = self.inner.lock().expect("memory store poisoned");
        Ok(inner.employees.get(&id).cloned())
    }

    async fn get_leave_request(&self, id: u64) -> Result<Option<LeaveRequest>, sqlx::Error> {
        let inner = self.inner.lock().expect("memory store poisoned");
        Ok(inner.requests.get(&id).cloned())
    }

    async fn requests_for_employee(
        &self,
        employee_id: u64,
    ) -> Result<Vec<LeaveRequest>, sqlx::Error> {
        let inner = self.inner.lock().expect("memory store poisoned");
        Ok(inner
            .requests
            .values()
            .filter(|r| r.employee_id == employee_id)
            .cloned()
            .collect())
    }

    async fn fetch_joined(&self) -> Result<Vec<LeaveWithEmployee>, sqlx::Error> {
        let inner = self.inner.lock().expect("memory store poisoned");
        Ok(inner
            .requests
            .values()
            .filter_map(|r| {
                inner.employees.get(&r.employee_id).map(|e| LeaveWithEmployee {
                    request: r.clone(),
                    full_name: e.full_name.clone(),
                    department: e.department.clone(),
                })
            })
            .collect())
    }

    async fn insert_leave_request(&self, record: &LeaveRequest) -> Result<u64, sqlx::Error> {
        let mut inner = self.inner.lock().expect("memory store poisoned");
        inner.next_id += 1;
        let id = inner.next_id;
        let mut stored = record.clone();
        stored.id = id;
        inner.requests.insert(id, stored);
        Ok(id)
    }

    async fn update_leave_request(&self, record: &LeaveRequest) -> Result<(), sqlx::Error> {
        let mut inner = self.inner.lock().expect("memory store poisoned");
        inner.requests.insert(record.id, record.clone());
        Ok(())
    }

    async fn delete_leave_request(&self, id: u64) -> Result<(), sqlx::Error> {
        let mut inner = self.inner.lock().expect("memory store poisoned");
        inner.requests.remove(&id);
        Ok(())
    }
}
