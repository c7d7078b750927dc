use std::path::{Path, PathBuf};

/// Label shown when no file is held by the file channel.
pub const NO_FILE_LABEL: &str = "No file selected.";

/// A file chosen by the user, either from the picker or a drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    pub path: PathBuf,
    pub name: String,
}

impl FileHandle {
    /// Builds a handle whose display name is the final path component.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = display_name(&path);
        Self { path, name }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// The active input source. Text and file are never live at the same time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InputChannel {
    #[default]
    Empty,
    Text(String),
    File(FileHandle),
}

impl InputChannel {
    pub fn is_empty(&self) -> bool {
        matches!(self, InputChannel::Empty)
    }

    /// Text content, or the empty string for any other channel.
    pub fn text(&self) -> &str {
        match self {
            InputChannel::Text(content) => content,
            _ => "",
        }
    }

    pub fn file(&self) -> Option<&FileHandle> {
        match self {
            InputChannel::File(handle) => Some(handle),
            _ => None,
        }
    }
}

/// Owns the text/file mutual exclusion and the drag-and-drop affordance.
///
/// Every mutator returns `true` when something observable changed, so the
/// caller can decide whether a re-render is needed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InputModeController {
    channel: InputChannel,
    /// Text box content as typed, blank or not. Only non-blank text reaches
    /// the channel.
    draft: String,
    drag_active: bool,
}

impl InputModeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn channel(&self) -> &InputChannel {
        &self.channel
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn is_drag_active(&self) -> bool {
        self.drag_active
    }

    /// Human-readable name of the held file, or [`NO_FILE_LABEL`].
    pub fn file_label(&self) -> &str {
        self.channel
            .file()
            .map(|handle| handle.name.as_str())
            .unwrap_or(NO_FILE_LABEL)
    }

    /// Applies a text edit.
    ///
    /// Non-blank text takes over the channel and drops any held file. Blank
    /// text only empties a text channel; it never clears a held file, so a user
    /// deleting leftover text does not lose their upload.
    pub fn set_text(&mut self, content: impl Into<String>) -> bool {
        let content = content.into();
        let draft_changed = self.draft != content;
        self.draft.clone_from(&content);
        let next = if !content.trim().is_empty() {
            InputChannel::Text(content)
        } else if matches!(self.channel, InputChannel::File(_)) {
            return draft_changed;
        } else {
            InputChannel::Empty
        };
        self.replace(next) || draft_changed
    }

    /// Makes `handle` the active input, discarding any text.
    pub fn set_file(&mut self, handle: FileHandle) -> bool {
        let draft_cleared = !std::mem::take(&mut self.draft).is_empty();
        self.replace(InputChannel::File(handle)) || draft_cleared
    }

    /// Drops a held file. Text content is left alone.
    pub fn clear_file(&mut self) -> bool {
        if matches!(self.channel, InputChannel::File(_)) {
            self.channel = InputChannel::Empty;
            true
        } else {
            false
        }
    }

    pub fn drag_over(&mut self) -> bool {
        !std::mem::replace(&mut self.drag_active, true)
    }

    pub fn drag_leave(&mut self) -> bool {
        std::mem::replace(&mut self.drag_active, false)
    }

    /// Ends a drag. Only the first dropped file is kept; an empty drop leaves
    /// the channel untouched.
    pub fn drop_files(&mut self, files: Vec<FileHandle>) -> bool {
        let unmarked = self.drag_leave();
        match files.into_iter().next() {
            Some(first) => self.set_file(first) || unmarked,
            None => unmarked,
        }
    }

    fn replace(&mut self, next: InputChannel) -> bool {
        if self.channel == next {
            return false;
        }
        self.channel = next;
        true
    }
}
