/// Job profile prompt template.
/// Replace: {role_name}, {job_level}, {role_purpose}
pub const JOB_PROFILE_PROMPT_TEMPLATE: &str = r#"Generate a concise job profile for the following role:
Role: {role_name}
Level: {job_level}
Purpose: {role_purpose}

Structure the output using markdown with these sections:
## Job Requirements
- Provide 5 to 7 key requirements as bullet points.

## Job Description
- Write a brief paragraph summarizing the role's responsibilities.

## Key Competencies
- List 5 essential competencies as bullet points."#;

pub const JOB_PROFILE_MAX_TOKENS: u32 = 400;
pub const JOB_PROFILE_TEMPERATURE: f32 = 0.6;
