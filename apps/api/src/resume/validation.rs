use crate::errors::AppError;
use crate::resume::models::{
    CreateExperienceRequest, CreateResumeRequest, CreateSkillRequest, ExperienceFields,
    ExperiencePayload, NewResume, PersonalInfoFields, SkillFields, SkillPayload,
    UpdatePersonalInfoRequest,
};

const PERSONAL_INFO_REQUIRED: &str = "The fields name, email and phone are required";
const EXPERIENCE_REQUIRED: &str = "The fields companyName, position and startDate are required";
const SKILL_REQUIRED: &str = "The fields name and proficiency are required";
const PARENT_REQUIRED: &str = "The field personalInfoId is required";

/// Returns the value only if it holds something other than whitespace.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn personal_info_fields(
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    summary: Option<String>,
) -> Result<PersonalInfoFields, AppError> {
    match (present(name), present(email), present(phone)) {
        (Some(name), Some(email), Some(phone)) => Ok(PersonalInfoFields {
            name,
            email,
            phone,
            summary,
        }),
        _ => Err(AppError::InvalidInput(PERSONAL_INFO_REQUIRED.to_string())),
    }
}

/// Validates a single experience; `context` prefixes the message for nested items.
fn experience_fields(
    payload: ExperiencePayload,
    context: Option<String>,
) -> Result<ExperienceFields, AppError> {
    let with_context = |msg: &str| match &context {
        Some(ctx) => AppError::InvalidInput(format!("{ctx}: {msg}")),
        None => AppError::InvalidInput(msg.to_string()),
    };

    let (company_name, position, start_date) = match (
        present(payload.company_name),
        present(payload.position),
        payload.start_date,
    ) {
        (Some(c), Some(p), Some(s)) => (c, p, s),
        _ => return Err(with_context(EXPERIENCE_REQUIRED)),
    };

    Ok(ExperienceFields {
        company_name,
        position,
        start_date,
        end_date: payload.end_date,
        description: payload.description,
    })
}

fn skill_fields(payload: SkillPayload, context: Option<String>) -> Result<SkillFields, AppError> {
    match (present(payload.name), present(payload.proficiency)) {
        (Some(name), Some(proficiency)) => Ok(SkillFields {
            name,
            proficiency,
            description: payload.description,
        }),
        _ => Err(AppError::InvalidInput(match context {
            Some(ctx) => format!("{ctx}: {SKILL_REQUIRED}"),
            None => SKILL_REQUIRED.to_string(),
        })),
    }
}

fn parent_id(personal_info_id: Option<i32>) -> Result<i32, AppError> {
    personal_info_id
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::InvalidInput(PARENT_REQUIRED.to_string()))
}

/// Validates an aggregate create, including every nested child.
pub fn validate_new_resume(req: CreateResumeRequest) -> Result<NewResume, AppError> {
    let personal_info = personal_info_fields(req.name, req.email, req.phone, req.summary)?;

    let experiences = req
        .experiences
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(i, exp)| experience_fields(exp, Some(format!("experiences[{i}]"))))
        .collect::<Result<Vec<_>, _>>()?;

    let skills = req
        .skills
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(i, skill)| skill_fields(skill, Some(format!("skills[{i}]"))))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(NewResume {
        personal_info,
        experiences,
        skills,
    })
}

pub fn validate_personal_info_update(
    req: UpdatePersonalInfoRequest,
) -> Result<PersonalInfoFields, AppError> {
    personal_info_fields(req.name, req.email, req.phone, req.summary)
}

/// Validates an independent experience create, returning the owner id alongside the fields.
pub fn validate_new_experience(
    req: CreateExperienceRequest,
) -> Result<(i32, ExperienceFields), AppError> {
    let owner = req.personal_info_id;
    let fields = experience_fields(
        ExperiencePayload {
            company_name: req.company_name,
            position: req.position,
            start_date: req.start_date,
            end_date: req.end_date,
            description: req.description,
        },
        None,
    )?;
    Ok((parent_id(owner)?, fields))
}

/// Validates an independent skill create, returning the owner id alongside the fields.
pub fn validate_new_skill(req: CreateSkillRequest) -> Result<(i32, SkillFields), AppError> {
    let owner = req.personal_info_id;
    let fields = skill_fields(
        SkillPayload {
            name: req.name,
            proficiency: req.proficiency,
            description: req.description,
        },
        None,
    )?;
    Ok((parent_id(owner)?, fields))
}
