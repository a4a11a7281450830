pub mod employee;
pub mod leave_request;

pub use employee::Employee;
pub use leave_request::{LeaveRequest, LeaveStatus, LeaveType, LeaveWithEmployee, inclusive_days};
