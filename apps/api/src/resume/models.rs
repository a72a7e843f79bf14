//! Wire types for the résumé API: incoming payloads, validated inputs handed to
//! the store, and the camelCase views returned to clients.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::resume::{ExperienceRow, PersonalInfoRow, SkillRow};

// ────────────────────────────────────────────────────────────────────────────
// Request payloads (every field optional so missing ones surface as 400s)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperiencePayload {
    pub company_name: Option<String>,
    pub position: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillPayload {
    pub name: Option<String>,
    pub proficiency: Option<String>,
    pub description: Option<String>,
}

/// An owner id sent either as a JSON number or as a numeric string.
#[derive(Deserialize)]
#[serde(untagged)]
enum OwnerId {
    Number(i32),
    Text(String),
}

/// Accepts `1` and `"1"`; a blank string counts as absent.
fn deserialize_owner_id<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<OwnerId>::deserialize(deserializer)? {
        None => Ok(None),
        Some(OwnerId::Number(id)) => Ok(Some(id)),
        Some(OwnerId::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(OwnerId::Text(text)) => text
            .trim()
            .parse::<i32>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// POST /api/resume
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResumeRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub summary: Option<String>,
    pub experiences: Option<Vec<ExperiencePayload>>,
    pub skills: Option<Vec<SkillPayload>>,
}

/// PUT /api/resume/:id
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePersonalInfoRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub summary: Option<String>,
}

/// POST /api/resume/experiences
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExperienceRequest {
    pub company_name: Option<String>,
    pub position: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_owner_id")]
    pub personal_info_id: Option<i32>,
}

/// POST /api/resume/skills
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSkillRequest {
    pub name: Option<String>,
    pub proficiency: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_owner_id")]
    pub personal_info_id: Option<i32>,
}

// ────────────────────────────────────────────────────────────────────────────
// Validated inputs (what the store is allowed to write)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct PersonalInfoFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExperienceFields {
    pub company_name: String,
    pub position: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkillFields {
    pub name: String,
    pub proficiency: String,
    pub description: Option<String>,
}

/// A personal info record plus the children to insert under it, in list order.
#[derive(Debug, Clone, PartialEq)]
pub struct NewResume {
    pub personal_info: PersonalInfoFields,
    pub experiences: Vec<ExperienceFields>,
    pub skills: Vec<SkillFields>,
}

// ────────────────────────────────────────────────────────────────────────────
// Response views
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub summary: Option<String>,
}

impl From<PersonalInfoRow> for PersonalInfo {
    fn from(row: PersonalInfoRow) -> Self {
        PersonalInfo {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            summary: row.summary,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: i32,
    pub company_name: String,
    pub position: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub description: Option<String>,
    /// Omitted when the experience is listed inside its own aggregate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personal_info_id: Option<i32>,
}

impl Experience {
    pub fn nested(row: ExperienceRow) -> Self {
        Experience {
            personal_info_id: None,
            ..Experience::from(row)
        }
    }
}

impl From<ExperienceRow> for Experience {
    fn from(row: ExperienceRow) -> Self {
        Experience {
            id: row.id,
            company_name: row.company_name,
            position: row.position,
            start_date: row.start_date,
            end_date: row.end_date,
            description: row.description,
            personal_info_id: Some(row.personal_info_id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: i32,
    pub name: String,
    pub proficiency: String,
    pub description: Option<String>,
    /// Omitted when the skill is listed inside its own aggregate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personal_info_id: Option<i32>,
}

impl Skill {
    pub fn nested(row: SkillRow) -> Self {
        Skill {
            personal_info_id: None,
            ..Skill::from(row)
        }
    }
}

impl From<SkillRow> for Skill {
    fn from(row: SkillRow) -> Self {
        Skill {
            id: row.id,
            name: row.name,
            proficiency: row.proficiency,
            description: row.description,
            personal_info_id: Some(row.personal_info_id),
        }
    }
}

/// The personal info root together with every experience and skill referencing it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeAggregate {
    pub personal_info: PersonalInfo,
    pub experiences: Vec<Experience>,
    pub skills: Vec<Skill>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeCreatedResponse {
    pub message: String,
    pub personal_info_id: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeUpdatedResponse {
    pub message: String,
    pub updated_personal_info: PersonalInfo,
}

#[derive(Debug, Serialize)]
pub struct ExperienceCreatedResponse {
    pub message: String,
    pub experience: Experience,
}

#[derive(Debug, Serialize)]
pub struct SkillCreatedResponse {
    pub message: String,
    pub skill: Skill,
}
