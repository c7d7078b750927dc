use crate::{ClassificationTag, ConfidenceLevel};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub text: String,
    pub file_label: String,
    pub drag_active: bool,
    /// False while a request is in flight.
    pub submit_enabled: bool,
    pub submission: SubmissionView,
    pub copy_acknowledged: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionView {
    #[default]
    Idle,
    Loading,
    Result(AnalysisView),
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisView {
    pub classification: String,
    pub tag: ClassificationTag,
    pub analysis: String,
    pub suggested_reply: String,
    pub confidence: Option<u8>,
    pub confidence_level: Option<ConfidenceLevel>,
    pub keywords: Vec<String>,
}
