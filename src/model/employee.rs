use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "full_name": "John Doe",
        "department": "IT",
        "joining_date": "2022-01-15"
    })
)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = "John Doe")]
    pub full_name: String,

    #[schema(example = "IT")]
    pub department: String,

    #[schema(
        example = "2022-01-15",
        value_type = String,
        format = "date"
    )]
    pub joining_date: NaiveDate,
}
