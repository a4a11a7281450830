use sqlx::MySqlPool;

use crate::model::{Employee, LeaveRequest, LeaveWithEmployee};
use crate::store::LeaveStore;

/// MySQL-backed store. Queries are bound at runtime; the schema lives in
/// `migrations/` and is applied on startup.
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

const LEAVE_COLUMNS: &str =
    "id, employee_id, leave_type, start_date, end_date, status, reason, created_at";

impl LeaveStore for MySqlStore {
    async fn get_employee(&self, id: u64) -> Result<Option<Employee>, sqlx::Error> {
        sqlx::query_as::<_, Employee>(
            "SELECT id, full_name, department, joining_date FROM employees WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_leave_request(&self, id: u64) -> Result<Option<LeaveRequest>, sqlx::Error> {
        let sql = format!("SELECT {LEAVE_COLUMNS} FROM leave_requests WHERE id = ?");
        sqlx::query_as::<_, LeaveRequest>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn requests_for_employee(
        &self,
        employee_id: u64,
    ) -> Result<Vec<LeaveRequest>, sqlx::Error> {
        let sql =
            format!("SELECT {LEAVE_COLUMNS} FROM leave_requests WHERE employee_id = ? ORDER BY id");
        sqlx::query_as::<_, LeaveRequest>(&sql)
            .bind(employee_id)
            .fetch_all(&self.pool)
            .await
    }

    async fn fetch_joined(&self) -> Result<Vec<LeaveWithEmployee>, sqlx::Error> {
        sqlx::query_as::<_, LeaveWithEmployee>(
            r#"
            SELECT
                lr.id, lr.employee_id, lr.leave_type, lr.start_date, lr.end_date,
                lr.status, lr.reason, lr.created_at,
                e.full_name, e.department
            FROM leave_requests lr
            JOIN employees e ON e.id = lr.employee_id
            ORDER BY lr.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn insert_leave_request(&self, record: &LeaveRequest) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO leave_requests
                (employee_id, leave_type, start_date, end_date, status, reason, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.employee_id)
        .bind(record.leave_type)
        .bind(record.start_date)
        .bind(record.end_date)
        .bind(record.status)
        .bind(record.reason.as_deref())
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_id())
    }

    async fn update_leave_request(&self, record: &LeaveRequest) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE leave_requests
            SET leave_type = ?, start_date = ?, end_date = ?, status = ?, reason = ?
            WHERE id = ?
            "#,
        )
        .bind(record.leave_type)
        .bind(record.start_date)
        .bind(record.end_date)
        .bind(record.status)
        .bind(record.reason.as_deref())
        .bind(record.id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_leave_request(&self, id: u64) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM leave_requests WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
