use super::dto::{ErrorResponse, StatusResponse, UploadForm};
use super::routes;
use crate::domain::types::{
    AnalyzeRequest, CritiqueResult, InterviewQuestion, MatchRequest, ResumeUpload, SkillData,
    SkillGap, SkillRecord, UploadStatus,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "Interview Coach API"),
    paths(
        routes::status::status_handler,
        routes::interview::analyze_stream_handler,
        routes::interview::roles_handler,
        routes::interview::questions_handler,
        routes::skills::match_skills_handler,
        routes::skills::upload_resume_handler
    ),
    components(
        schemas(
            StatusResponse,
            ErrorResponse,
            AnalyzeRequest,
            MatchRequest,
            SkillData,
            SkillGap,
            SkillRecord,
            CritiqueResult,
            InterviewQuestion,
            UploadForm,
            ResumeUpload,
            UploadStatus
        )
    ),
    tags(
        (name = "status", description = "Service liveness"),
        (name = "interview", description = "Answer critique and reference data"),
        (name = "skills", description = "Resume against role competencies")
    )
)]
pub(super) struct ApiDoc;
