use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct PersonalInfoRow {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ExperienceRow {
    pub id: i32,
    pub company_name: String,
    pub position: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub personal_info_id: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct SkillRow {
    pub id: i32,
    pub name: String,
    pub proficiency: String,
    pub description: Option<String>,
    pub personal_info_id: i32,
}
