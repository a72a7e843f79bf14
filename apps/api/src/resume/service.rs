//! Résumé aggregate service: composes the personal info root with its
//! experiences and skills on reads, and decomposes payloads into store writes.
//!
//! Every operation validates its input before the first store call, so an
//! `InvalidInput` never leaves anything behind.

use std::sync::Arc;

use tracing::info;

use crate::config::ParentIdCheck;
use crate::errors::AppError;
use crate::resume::models::{
    CreateExperienceRequest, CreateResumeRequest, CreateSkillRequest, Experience, PersonalInfo,
    ResumeAggregate, Skill, UpdatePersonalInfoRequest,
};
use crate::resume::store::ResumeStore;
use crate::resume::validation::{
    validate_new_experience, validate_new_resume, validate_new_skill,
    validate_personal_info_update,
};

#[derive(Clone)]
pub struct ResumeService {
    store: Arc<dyn ResumeStore>,
    parent_id_check: ParentIdCheck,
}

impl ResumeService {
    pub fn new(store: Arc<dyn ResumeStore>, parent_id_check: ParentIdCheck) -> Self {
        Self {
            store,
            parent_id_check,
        }
    }

    /// Reads the aggregate rooted at `id`, or the first one stored when `id` is `None`.
    pub async fn get_resume(&self, id: Option<i32>) -> Result<ResumeAggregate, AppError> {
        let root = match id {
            Some(id) => self.store.find_personal_info(id).await?,
            None => self.store.first_personal_info().await?,
        }
        .ok_or_else(|| AppError::NotFound("No resume information found".to_string()))?;

        let experiences = self.store.experiences_for(root.id).await?;
        let skills = self.store.skills_for(root.id).await?;

        Ok(ResumeAggregate {
            personal_info: PersonalInfo::from(root),
            experiences: experiences.into_iter().map(Experience::nested).collect(),
            skills: skills.into_iter().map(Skill::nested).collect(),
        })
    }

    /// Creates a personal info record with its nested children. Returns the new id.
    pub async fn create_resume(&self, req: CreateResumeRequest) -> Result<i32, AppError> {
        let resume = validate_new_resume(req)?;
        let id = self.store.create_aggregate(&resume).await?;
        info!(
            "Created resume {id} with {} experiences and {} skills",
            resume.experiences.len(),
            resume.skills.len()
        );
        Ok(id)
    }

    /// Updates personal info fields only; experiences and skills are untouched.
    pub async fn update_personal_info(
        &self,
        id: i32,
        req: UpdatePersonalInfoRequest,
    ) -> Result<PersonalInfo, AppError> {
        let fields = validate_personal_info_update(req)?;
        let row = self
            .store
            .update_personal_info(id, &fields)
            .await?
            .ok_or_else(AppError::resume_not_found)?;
        info!("Updated personal info {id}");
        Ok(row.into())
    }

    /// Deletes the personal info record and every child referencing it.
    pub async fn delete_resume(&self, id: i32) -> Result<(), AppError> {
        if !self.store.delete_aggregate(id).await? {
            return Err(AppError::resume_not_found());
        }
        info!("Deleted resume {id}");
        Ok(())
    }

    pub async fn add_experience(&self, req: CreateExperienceRequest) -> Result<Experience, AppError> {
        let (owner, fields) = validate_new_experience(req)?;
        self.ensure_parent(owner).await?;
        let row = self.store.insert_experience(owner, &fields).await?;
        info!("Added experience {} to resume {owner}", row.id);
        Ok(row.into())
    }

    pub async fn add_skill(&self, req: CreateSkillRequest) -> Result<Skill, AppError> {
        let (owner, fields) = validate_new_skill(req)?;
        self.ensure_parent(owner).await?;
        let row = self.store.insert_skill(owner, &fields).await?;
        info!("Added skill {} to resume {owner}", row.id);
        Ok(row.into())
    }

    async fn ensure_parent(&self, personal_info_id: i32) -> Result<(), AppError> {
        match self.parent_id_check {
            ParentIdCheck::TrustStore => Ok(()),
            ParentIdCheck::Validate => self
                .store
                .find_personal_info(personal_info_id)
                .await?
                .map(|_| ())
                .ok_or_else(AppError::resume_not_found),
        }
    }
}
