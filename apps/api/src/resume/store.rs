//! Persistence seam for the résumé aggregate.
//!
//! `ResumeService` only talks to `dyn ResumeStore`; `PgResumeStore` is the
//! production backend. Multi-statement writes run inside one transaction so a
//! failure part-way through never leaves a parent with a prefix of its children.

use async_trait::async_trait;
use sqlx::{PgExecutor, PgPool};
use tracing::debug;

use crate::errors::AppError;
use crate::models::resume::{ExperienceRow, PersonalInfoRow, SkillRow};
use crate::resume::models::{ExperienceFields, NewResume, PersonalInfoFields, SkillFields};

#[async_trait]
pub trait ResumeStore: Send + Sync {
    /// The personal info row with the lowest id, if any.
    async fn first_personal_info(&self) -> Result<Option<PersonalInfoRow>, AppError>;

    async fn find_personal_info(&self, id: i32) -> Result<Option<PersonalInfoRow>, AppError>;

    /// Experiences owned by `personal_info_id`, in insertion order.
    async fn experiences_for(&self, personal_info_id: i32) -> Result<Vec<ExperienceRow>, AppError>;

    /// Skills owned by `personal_info_id`, in insertion order.
    async fn skills_for(&self, personal_info_id: i32) -> Result<Vec<SkillRow>, AppError>;

    /// Inserts the parent, then its experiences, then its skills. All or nothing.
    /// Returns the generated personal info id.
    async fn create_aggregate(&self, resume: &NewResume) -> Result<i32, AppError>;

    /// Returns `None` when no row has this id.
    async fn update_personal_info(
        &self,
        id: i32,
        fields: &PersonalInfoFields,
    ) -> Result<Option<PersonalInfoRow>, AppError>;

    /// Deletes experiences, skills, then the parent. Returns `false` (and changes
    /// nothing) when the parent does not exist.
    async fn delete_aggregate(&self, id: i32) -> Result<bool, AppError>;

    async fn insert_experience(
        &self,
        personal_info_id: i32,
        fields: &ExperienceFields,
    ) -> Result<ExperienceRow, AppError>;

    async fn insert_skill(
        &self,
        personal_info_id: i32,
        fields: &SkillFields,
    ) -> Result<SkillRow, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// PostgreSQL backend
// ────────────────────────────────────────────────────────────────────────────

pub struct PgResumeStore {
    pool: PgPool,
}

impl PgResumeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const INSERT_EXPERIENCE: &str = r#"
    INSERT INTO experiences
        (company_name, position, start_date, end_date, description, personal_info_id)
    VALUES ($1, $2, $3, $4, $5, $6)
    RETURNING id, company_name, position, start_date, end_date, description, personal_info_id
"#;

const INSERT_SKILL: &str = r#"
    INSERT INTO skills (name, proficiency, description, personal_info_id)
    VALUES ($1, $2, $3, $4)
    RETURNING id, name, proficiency, description, personal_info_id
"#;

async fn insert_experience_with<'e>(
    executor: impl PgExecutor<'e>,
    personal_info_id: i32,
    exp: &ExperienceFields,
) -> Result<ExperienceRow, sqlx::Error> {
    sqlx::query_as::<_, ExperienceRow>(INSERT_EXPERIENCE)
        .bind(&exp.company_name)
        .bind(&exp.position)
        .bind(exp.start_date)
        .bind(exp.end_date)
        .bind(&exp.description)
        .bind(personal_info_id)
        .fetch_one(executor)
        .await
}

async fn insert_skill_with<'e>(
    executor: impl PgExecutor<'e>,
    personal_info_id: i32,
    skill: &SkillFields,
) -> Result<SkillRow, sqlx::Error> {
    sqlx::query_as::<_, SkillRow>(INSERT_SKILL)
        .bind(&skill.name)
        .bind(&skill.proficiency)
        .bind(&skill.description)
        .bind(personal_info_id)
        .fetch_one(executor)
        .await
}

#[async_trait]
impl ResumeStore for PgResumeStore {
    async fn first_personal_info(&self) -> Result<Option<PersonalInfoRow>, AppError> {
        Ok(sqlx::query_as::<_, PersonalInfoRow>(
            "SELECT id, name, email, phone, summary FROM personal_info ORDER BY id LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn find_personal_info(&self, id: i32) -> Result<Option<PersonalInfoRow>, AppError> {
        Ok(sqlx::query_as::<_, PersonalInfoRow>(
            "SELECT id, name, email, phone, summary FROM personal_info WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn experiences_for(&self, personal_info_id: i32) -> Result<Vec<ExperienceRow>, AppError> {
        Ok(sqlx::query_as::<_, ExperienceRow>(
            r#"
            SELECT id, company_name, position, start_date, end_date, description, personal_info_id
            FROM experiences
            WHERE personal_info_id = $1
            ORDER BY id
            "#,
        )
        .bind(personal_info_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn skills_for(&self, personal_info_id: i32) -> Result<Vec<SkillRow>, AppError> {
        Ok(sqlx::query_as::<_, SkillRow>(
            r#"
            SELECT id, name, proficiency, description, personal_info_id
            FROM skills
            WHERE personal_info_id = $1
            ORDER BY id
            "#,
        )
        .bind(personal_info_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn create_aggregate(&self, resume: &NewResume) -> Result<i32, AppError> {
        let mut tx = self.pool.begin().await?;

        let info = &resume.personal_info;
        let personal_info_id: i32 = sqlx::query_scalar(
            "INSERT INTO personal_info (name, email, phone, summary) VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(&info.name)
        .bind(&info.email)
        .bind(&info.phone)
        .bind(&info.summary)
        .fetch_one(&mut *tx)
        .await?;

        for exp in &resume.experiences {
            insert_experience_with(&mut *tx, personal_info_id, exp).await?;
        }
        for skill in &resume.skills {
            insert_skill_with(&mut *tx, personal_info_id, skill).await?;
        }

        // Dropping `tx` on any `?` above rolls the whole aggregate back.
        tx.commit().await?;
        Ok(personal_info_id)
    }

    async fn update_personal_info(
        &self,
        id: i32,
        fields: &PersonalInfoFields,
    ) -> Result<Option<PersonalInfoRow>, AppError> {
        Ok(sqlx::query_as::<_, PersonalInfoRow>(
            r#"
            UPDATE personal_info
            SET name = $1, email = $2, phone = $3, summary = $4
            WHERE id = $5
            RETURNING id, name, email, phone, summary
            "#,
        )
        .bind(&fields.name)
        .bind(&fields.email)
        .bind(&fields.phone)
        .bind(&fields.summary)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn delete_aggregate(&self, id: i32) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        // Children first (foreign key constraint)
        let experiences = sqlx::query("DELETE FROM experiences WHERE personal_info_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let skills = sqlx::query("DELETE FROM skills WHERE personal_info_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let parent = sqlx::query("DELETE FROM personal_info WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if parent.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        tx.commit().await?;
        debug!(
            "Deleted personal_info {id} with {} experiences and {} skills",
            experiences.rows_affected(),
            skills.rows_affected()
        );
        Ok(true)
    }

    async fn insert_experience(
        &self,
        personal_info_id: i32,
        fields: &ExperienceFields,
    ) -> Result<ExperienceRow, AppError> {
        Ok(insert_experience_with(&self.pool, personal_info_id, fields).await?)
    }

    async fn insert_skill(
        &self,
        personal_info_id: i32,
        fields: &SkillFields,
    ) -> Result<SkillRow, AppError> {
        Ok(insert_skill_with(&self.pool, personal_info_id, fields).await?)
    }
}
