pub mod types;

pub use types::{
    AnalyzeRequest, CritiqueResult, InterviewQuestion, MatchRequest, ResumeUpload, SkillData,
    SkillGap, SkillRecord, UploadStatus,
};
