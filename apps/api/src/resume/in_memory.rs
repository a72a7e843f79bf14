//! In-memory `ResumeStore` used by service and router tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::resume::{ExperienceRow, PersonalInfoRow, SkillRow};
use crate::resume::models::{ExperienceFields, NewResume, PersonalInfoFields, SkillFields};
use crate::resume::store::ResumeStore;

#[derive(Clone, Default)]
struct Tables {
    next_id: i32,
    personal_info: Vec<PersonalInfoRow>,
    experiences: Vec<ExperienceRow>,
    skills: Vec<SkillRow>,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn has_parent(&self, id: i32) -> bool {
        self.personal_info.iter().any(|p| p.id == id)
    }

    fn experience(&mut self, personal_info_id: i32, exp: &ExperienceFields) -> ExperienceRow {
        ExperienceRow {
            id: self.next_id(),
            company_name: exp.company_name.clone(),
            position: exp.position.clone(),
            start_date: exp.start_date,
            end_date: exp.end_date,
            description: exp.description.clone(),
            personal_info_id,
        }
    }

    fn skill(&mut self, personal_info_id: i32, skill: &SkillFields) -> SkillRow {
        SkillRow {
            id: self.next_id(),
            name: skill.name.clone(),
            proficiency: skill.proficiency.clone(),
            description: skill.description.clone(),
            personal_info_id,
        }
    }
}

pub struct InMemoryResumeStore {
    tables: Mutex<Tables>,
    failing: AtomicBool,
    /// Row writes still allowed before every further write fails; `None` is unlimited.
    writes_left: Mutex<Option<usize>>,
    enforce_foreign_keys: bool,
}

impl Default for InMemoryResumeStore {
    fn default() -> Self {
        Self {
            tables: Mutex::new(Tables::default()),
            failing: AtomicBool::new(false),
            writes_left: Mutex::new(None),
            enforce_foreign_keys: true,
        }
    }
}

impl InMemoryResumeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose child tables have no foreign key, so orphans are accepted.
    pub fn without_foreign_keys() -> Self {
        Self {
            enforce_foreign_keys: false,
            ..Self::default()
        }
    }

    /// Makes every subsequent call fail as if the database were unreachable.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Lets `n` more row writes succeed, then fails every write after them.
    pub fn fail_after_writes(&self, n: usize) {
        *self.writes_left.lock().unwrap() = Some(n);
    }

    pub fn counts(&self) -> (usize, usize, usize) {
        let t = self.tables.lock().unwrap();
        (t.personal_info.len(), t.experiences.len(), t.skills.len())
    }

    pub fn orphan_count(&self) -> usize {
        let t = self.tables.lock().unwrap();
        t.experiences
            .iter()
            .map(|e| e.personal_info_id)
            .chain(t.skills.iter().map(|s| s.personal_info_id))
            .filter(|id| !t.has_parent(*id))
            .count()
    }

    fn check(&self) -> Result<(), AppError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }

    /// Spends one unit of the write budget, failing once it is exhausted.
    fn write(&self) -> Result<(), AppError> {
        let mut left = self.writes_left.lock().unwrap();
        match left.as_mut() {
            Some(0) => Err(AppError::Database(sqlx::Error::Protocol(
                "connection reset during write".to_string(),
            ))),
            Some(n) => {
                *n -= 1;
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn check_parent(&self, tables: &Tables, personal_info_id: i32) -> Result<(), AppError> {
        if self.enforce_foreign_keys && !tables.has_parent(personal_info_id) {
            return Err(AppError::Database(sqlx::Error::Protocol(format!(
                "foreign key violation: personal_info {personal_info_id} does not exist"
            ))));
        }
        Ok(())
    }
}

#[async_trait]
impl ResumeStore for InMemoryResumeStore {
    async fn first_personal_info(&self) -> Result<Option<PersonalInfoRow>, AppError> {
        self.check()?;
        let t = self.tables.lock().unwrap();
        Ok(t.personal_info.iter().min_by_key(|p| p.id).cloned())
    }

    async fn find_personal_info(&self, id: i32) -> Result<Option<PersonalInfoRow>, AppError> {
        self.check()?;
        let t = self.tables.lock().unwrap();
        Ok(t.personal_info.iter().find(|p| p.id == id).cloned())
    }

    async fn experiences_for(&self, personal_info_id: i32) -> Result<Vec<ExperienceRow>, AppError> {
        self.check()?;
        let t = self.tables.lock().unwrap();
        Ok(t.experiences
            .iter()
            .filter(|e| e.personal_info_id == personal_info_id)
            .cloned()
            .collect())
    }

    async fn skills_for(&self, personal_info_id: i32) -> Result<Vec<SkillRow>, AppError> {
        self.check()?;
        let t = self.tables.lock().unwrap();
        Ok(t.skills
            .iter()
            .filter(|s| s.personal_info_id == personal_info_id)
            .cloned()
            .collect())
    }

    async fn create_aggregate(&self, resume: &NewResume) -> Result<i32, AppError> {
        self.check()?;
        let mut t = self.tables.lock().unwrap();

        // Writes go to a staged copy that only replaces the tables on success.
        let mut staged = t.clone();
        let id = staged.next_id();
        let info = &resume.personal_info;
        self.write()?;
        staged.personal_info.push(PersonalInfoRow {
            id,
            name: info.name.clone(),
            email: info.email.clone(),
            phone: info.phone.clone(),
            summary: info.summary.clone(),
        });
        for exp in &resume.experiences {
            self.write()?;
            let row = staged.experience(id, exp);
            staged.experiences.push(row);
        }
        for skill in &resume.skills {
            self.write()?;
            let row = staged.skill(id, skill);
            staged.skills.push(row);
        }

        *t = staged;
        Ok(id)
    }

    async fn update_personal_info(
        &self,
        id: i32,
        fields: &PersonalInfoFields,
    ) -> Result<Option<PersonalInfoRow>, AppError> {
        self.check()?;
        self.write()?;
        let mut t = self.tables.lock().unwrap();
        Ok(t.personal_info.iter_mut().find(|p| p.id == id).map(|row| {
            row.name = fields.name.clone();
            row.email = fields.email.clone();
            row.phone = fields.phone.clone();
            row.summary = fields.summary.clone();
            row.clone()
        }))
    }

    async fn delete_aggregate(&self, id: i32) -> Result<bool, AppError> {
        self.check()?;
        let mut t = self.tables.lock().unwrap();

        let mut staged = t.clone();
        self.write()?;
        staged.experiences.retain(|e| e.personal_info_id != id);
        self.write()?;
        staged.skills.retain(|s| s.personal_info_id != id);
        self.write()?;
        let before = staged.personal_info.len();
        staged.personal_info.retain(|p| p.id != id);
        if staged.personal_info.len() == before {
            // Parent missing: discard the child deletes as well.
            return Ok(false);
        }

        *t = staged;
        Ok(true)
    }

    async fn insert_experience(
        &self,
        personal_info_id: i32,
        fields: &ExperienceFields,
    ) -> Result<ExperienceRow, AppError> {
        self.check()?;
        let mut t = self.tables.lock().unwrap();
        self.check_parent(&t, personal_info_id)?;
        self.write()?;
        let row = t.experience(personal_info_id, fields);
        t.experiences.push(row.clone());
        Ok(row)
    }

    async fn insert_skill(
        &self,
        personal_info_id: i32,
        fields: &SkillFields,
    ) -> Result<SkillRow, AppError> {
        self.check()?;
        let mut t = self.tables.lock().unwrap();
        self.check_parent(&t, personal_info_id)?;
        self.write()?;
        let row = t.skill(personal_info_id, fields);
        t.skills.push(row.clone());
        Ok(row)
    }
}
