use std::sync::Once;

use triage_core::{
    update, AppState, Effect, FileHandle, InputChannel, InputModeController, Msg, NO_FILE_LABEL,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(triage_logging::initialize_for_tests);
}

fn mail(name: &str) -> FileHandle {
    FileHandle::new(format!("/tmp/inbox/{name}"))
}

fn assert_exclusive(input: &InputModeController) {
    match input.channel() {
        InputChannel::Text(content) => {
            assert!(!content.trim().is_empty());
            assert_eq!(input.file_label(), NO_FILE_LABEL);
        }
        InputChannel::File(handle) => {
            assert_eq!(input.channel().text(), "");
            assert_eq!(input.file_label(), handle.name);
        }
        InputChannel::Empty => assert_eq!(input.file_label(), NO_FILE_LABEL),
    }
}

enum Edit {
    Text(&'static str),
    Pick(&'static str),
    Drop(&'static str),
    Clear,
}

#[test]
fn channels_stay_exclusive_over_mixed_edits() {
    init_logging();
    let mut input = InputModeController::new();
    let edits = [
        Edit::Text("hello"),
        Edit::Pick("a.txt"),
        Edit::Text(""),
        Edit::Text("  "),
        Edit::Text("reply soon"),
        Edit::Drop("b.pdf"),
        Edit::Clear,
        Edit::Text("again"),
    ];

    for edit in edits {
        match edit {
            Edit::Text(content) => input.set_text(content),
            Edit::Pick(name) => input.set_file(mail(name)),
            Edit::Drop(name) => input.drop_files(vec![mail(name)]),
            Edit::Clear => input.clear_file(),
        };
        assert_exclusive(&input);
    }
    assert_eq!(input.channel(), &InputChannel::Text("again".to_string()));
}

#[test]
fn empty_text_keeps_file_but_real_text_clears_it() {
    init_logging();
    let mut input = InputModeController::new();
    input.set_file(mail("report.docx"));

    assert!(!input.set_text(""));
    assert_eq!(input.channel().file(), Some(&mail("report.docx")));
    assert_eq!(input.file_label(), "report.docx");

    assert!(input.set_text("hello"));
    assert_eq!(input.channel(), &InputChannel::Text("hello".to_string()));
    assert_eq!(input.file_label(), NO_FILE_LABEL);
}

#[test]
fn blank_text_after_text_empties_channel() {
    let mut input = InputModeController::new();
    input.set_text("draft");
    assert!(input.set_text(""));
    assert!(input.channel().is_empty());
}

#[test]
fn blank_draft_stays_visible_without_opening_channel() {
    init_logging();
    let (mut state, _) = update(AppState::new(), Msg::TextEdited("  \n ".into()));

    assert!(state.consume_dirty());
    assert_eq!(state.view().text, "  \n ");
    assert!(state.input().channel().is_empty());

    let (_, effects) = update(state, Msg::SubmitClicked);
    assert!(matches!(
        effects.as_slice(),
        [Effect::ShowValidationPrompt { .. }]
    ));
}

#[test]
fn picking_file_discards_text() {
    let mut input = InputModeController::new();
    input.set_text("draft");
    assert!(input.set_file(mail("a.txt")));
    assert_eq!(input.channel(), &InputChannel::File(mail("a.txt")));
}

#[test]
fn clear_file_leaves_text_alone() {
    let mut input = InputModeController::new();
    input.set_text("draft");
    assert!(!input.clear_file());
    assert_eq!(input.channel().text(), "draft");
}

#[test]
fn drop_without_files_changes_nothing() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::TextEdited("keep me".into()));
    let (state, _) = update(state, Msg::DragOver);
    assert!(state.view().drag_active);

    let (state, effects) = update(state, Msg::Dropped(Vec::new()));

    assert!(effects.is_empty());
    assert!(!state.view().drag_active);
    assert_eq!(state.input().channel(), &InputChannel::Text("keep me".into()));
}

#[test]
fn drop_keeps_only_first_file() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::TextEdited("old".into()));
    let (state, _) = update(state, Msg::DragOver);
    let (state, _) = update(
        state,
        Msg::Dropped(vec![mail("first.txt"), mail("second.txt"), mail("third.txt")]),
    );

    let view = state.view();
    assert_eq!(view.file_label, "first.txt");
    assert_eq!(view.text, "");
    assert!(!view.drag_active);
}

#[test]
fn drag_leave_unmarks_affordance() {
    let (mut state, _) = update(AppState::new(), Msg::DragOver);
    assert!(state.consume_dirty());
    let (mut state, _) = update(state, Msg::DragOver);
    assert!(!state.consume_dirty());
    let (mut state, _) = update(state, Msg::DragLeave);
    assert!(state.consume_dirty());
    assert!(!state.view().drag_active);
}

#[test]
fn upload_box_click_opens_picker_and_cancel_clears_file() {
    let (state, effects) = update(AppState::new(), Msg::UploadBoxClicked);
    assert_eq!(effects, vec![Effect::OpenFilePicker]);

    let (state, _) = update(state, Msg::FilePicked(Some(mail("a.txt"))));
    assert_eq!(state.view().file_label, "a.txt");

    let (state, _) = update(state, Msg::FilePicked(None));
    assert!(state.input().channel().is_empty());
    assert_eq!(state.view().file_label, NO_FILE_LABEL);
}
