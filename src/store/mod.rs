use crate::model::{Employee, LeaveRequest, LeaveWithEmployee};

pub mod memory;
pub mod mysql;

pub use memory::MemoryStore;
pub use mysql::MySqlStore;

/// Durable storage of employee and leave-request records. The service is the
/// only caller; it owns the decision to mutate, the store owns durability.
#[allow(async_fn_in_trait)]
pub trait LeaveStore: Send + Sync {
    async fn get_employee(&self, id: u64) -> Result<Option<Employee>, sqlx::Error>;

    async fn get_leave_request(&self, id: u64) -> Result<Option<LeaveRequest>, sqlx::Error>;

    /// Every request belonging to one employee, the working set for
    /// overlap and quota validation.
    async fn requests_for_employee(
        &self,
        employee_id: u64,
    ) -> Result<Vec<LeaveRequest>, sqlx::Error>;

    /// All requests joined with their owning employee, ordered by request id.
    async fn fetch_joined(&self) -> Result<Vec<LeaveWithEmployee>, sqlx::Error>;

    /// Persists a new record and returns the assigned id; `record.id` is ignored.
    async fn insert_leave_request(&self, record: &LeaveRequest) -> Result<u64, sqlx::Error>;

    async fn update_leave_request(&self, record: &LeaveRequest) -> Result<(), sqlx::Error>;

    async fn delete_leave_request(&self, id: u64) -> Result<(), sqlx::Error>;
}
