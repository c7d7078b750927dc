/// Verdict returned by the analysis service.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnalysisResult {
    pub classification: String,
    pub analysis: String,
    pub suggested_reply: String,
    /// Service confidence, 0 to 100.
    pub confidence: Option<u8>,
    pub keywords: Vec<String>,
}

impl AnalysisResult {
    pub fn new(
        classification: impl Into<String>,
        analysis: impl Into<String>,
        suggested_reply: impl Into<String>,
    ) -> Self {
        Self {
            classification: classification.into(),
            analysis: analysis.into(),
            suggested_reply: suggested_reply.into(),
            confidence: None,
            keywords: Vec::new(),
        }
    }

    pub fn tag(&self) -> ClassificationTag {
        ClassificationTag::from_classification(&self.classification)
    }

    pub fn confidence_level(&self) -> Option<ConfidenceLevel> {
        self.confidence.map(ConfidenceLevel::from_score)
    }
}

const UNPRODUCTIVE_MARKERS: [&str; 2] = ["unproductive", "improdutivo"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassificationTag {
    Productive,
    Unproductive,
}

impl ClassificationTag {
    /// Case-insensitive substring match; anything without an unproductive
    /// marker counts as productive.
    pub fn from_classification(classification: &str) -> Self {
        let lowered = classification.to_lowercase();
        if UNPRODUCTIVE_MARKERS
            .iter()
            .any(|marker| lowered.contains(marker))
        {
            ClassificationTag::Unproductive
        } else {
            ClassificationTag::Productive
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ClassificationTag::Productive => "productive",
            ClassificationTag::Unproductive => "unproductive",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceLevel {
    High,
    Medium,
}

impl ConfidenceLevel {
    pub fn from_score(score: u8) -> Self {
        if score > 80 {
            ConfidenceLevel::High
        } else {
            ConfidenceLevel::Medium
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ConfidenceLevel::High => "High",
            ConfidenceLevel::Medium => "Medium",
        }
    }
}
