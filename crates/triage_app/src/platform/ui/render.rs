use triage_core::{AnalysisView, AppViewModel, ClassificationTag, SubmissionView};

const LOADING_TEXT: &str = "Analyzing...";
const COPY_LABEL: &str = "[copy] Copy reply";
const COPIED_LABEL: &str = "[copy] Copied!";

pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    let input_line = if view.text.is_empty() {
        format!("File: {}", view.file_label)
    } else {
        format!("Text: {} chars | File: {}", view.text.chars().count(), view.file_label)
    };
    lines.push(input_line);
    if view.drag_active {
        lines.push("(drop files to upload)".to_string());
    }

    match &view.submission {
        SubmissionView::Idle => {}
        SubmissionView::Loading => lines.push(LOADING_TEXT.to_string()),
        SubmissionView::Result(result) => {
            lines.extend(render_result(result, view.copy_acknowledged))
        }
        SubmissionView::Error(message) => lines.push(format!("Error: {message}")),
    }

    if !view.submit_enabled {
        lines.push("(submit disabled while analyzing)".to_string());
    }
    lines
}

fn render_result(result: &AnalysisView, copy_acknowledged: bool) -> Vec<String> {
    let mut lines = vec![format!(
        "[{}] {}",
        tag_label(result.tag),
        result.classification
    )];
    match (result.confidence, result.confidence_level) {
        (Some(score), Some(level)) => {
            lines.push(format!("Confidence: {} ({score}%)", level.label()))
        }
        (Some(score), None) => lines.push(format!("Confidence: {score}%")),
        _ => {}
    }
    lines.push(format!("Analysis: {}", result.analysis));
    if !result.keywords.is_empty() {
        lines.push(format!("Keywords: {}", result.keywords.join(", ")));
    }
    lines.push("Suggested reply:".to_string());
    lines.extend(result.suggested_reply.lines().map(|line| format!("  {line}")));
    lines.push(if copy_acknowledged { COPIED_LABEL } else { COPY_LABEL }.to_string());
    lines
}

fn tag_label(tag: ClassificationTag) -> &'static str {
    match tag {
        ClassificationTag::Productive => "PRODUCTIVE",
        ClassificationTag::Unproductive => "UNPRODUCTIVE",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage_core::{ConfidenceLevel, NO_FILE_LABEL};

    fn base_view() -> AppViewModel {
        AppViewModel {
            file_label: NO_FILE_LABEL.to_string(),
            submit_enabled: true,
            ..AppViewModel::default()
        }
    }

    #[test]
    fn loading_view_shows_spinner_text_and_disabled_submit() {
        let view = AppViewModel {
            submission: SubmissionView::Loading,
            submit_enabled: false,
            ..base_view()
        };
        let lines = render(&view);
        assert_eq!(lines[0], "File: No file selected.");
        assert!(lines.contains(&LOADING_TEXT.to_string()));
        assert!(lines.contains(&"(submit disabled while analyzing)".to_string()));
    }

    #[test]
    fn result_view_lists_verdict_and_copy_state() {
        let result = AnalysisView {
            classification: "Improdutivo".to_string(),
            tag: ClassificationTag::Unproductive,
            analysis: "Greeting only".to_string(),
            suggested_reply: "Obrigado!\nAbs".to_string(),
            confidence: Some(91),
            confidence_level: Some(ConfidenceLevel::High),
            keywords: vec!["greeting".to_string()],
        };
        let view = AppViewModel {
            text: "Feliz natal".to_string(),
            submission: SubmissionView::Result(result),
            copy_acknowledged: true,
            ..base_view()
        };

        let lines = render(&view);
        assert_eq!(
            lines,
            vec![
                "Text: 11 chars | File: No file selected.",
                "[UNPRODUCTIVE] Improdutivo",
                "Confidence: High (91%)",
                "Analysis: Greeting only",
                "Keywords: greeting",
                "Suggested reply:",
                "  Obrigado!",
                "  Abs",
                COPIED_LABEL,
            ]
        );
    }

    #[test]
    fn error_view_shows_message() {
        let view = AppViewModel {
            submission: SubmissionView::Error("empty file".to_string()),
            ..base_view()
        };
        assert_eq!(render(&view).last().unwrap(), "Error: empty file");
    }
}
