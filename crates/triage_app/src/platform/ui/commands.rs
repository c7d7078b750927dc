//! Terminal input vocabulary. Each command stands in for one page event.

use std::path::PathBuf;

use thiserror::Error;
use triage_core::{FileHandle, Msg};

/// Line that ends a `paste` block.
pub const PASTE_TERMINATOR: &str = ".";

pub const HELP_TEXT: &str = "\
Commands:
  text <content>      set the e-mail text (empty to clear it)
  paste               enter multi-line text, end with a line containing only '.'
  file <path>         select a file to upload
  browse              open the file picker
  drag | leave        start or abandon dragging over the upload box
  drop <path>         drop a file on the upload box
  drop \"<a>\" \"<b>\"    drop several quoted paths (only the first is kept)
  submit              send the text or file for analysis
  copy                copy the suggested reply
  help                show this help
  quit                exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Text(String),
    Paste,
    File(PathBuf),
    Browse,
    DragOver,
    DragLeave,
    Drop(Vec<PathBuf>),
    Submit,
    Copy,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command {0:?}; type 'help' for a list")]
    Unknown(String),
    #[error("'{0}' needs a path")]
    MissingPath(&'static str),
    #[error("unbalanced quote in {0:?}")]
    UnbalancedQuote(String),
}

pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest),
        None => (trimmed, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        // Text keeps its inner whitespace; only the separator is dropped.
        "text" => Command::Text(rest.to_string()),
        "paste" => Command::Paste,
        "file" => {
            let path = rest.trim();
            if path.is_empty() {
                return Err(CommandError::MissingPath("file"));
            }
            Command::File(PathBuf::from(path))
        }
        "browse" => Command::Browse,
        "drag" => Command::DragOver,
        "leave" => Command::DragLeave,
        "drop" => Command::Drop(drop_paths(rest)?),
        "submit" | "analyze" => Command::Submit,
        "copy" => Command::Copy,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

/// Paths of a `drop` line. Without quotes the whole remainder is one path,
/// matching `file`; with quotes every quoted span is a path of its own.
fn drop_paths(rest: &str) -> Result<Vec<PathBuf>, CommandError> {
    let rest = rest.trim();
    if !rest.contains('"') {
        return Ok(if rest.is_empty() {
            Vec::new()
        } else {
            vec![PathBuf::from(rest)]
        });
    }

    let spans: Vec<&str> = rest.split('"').collect();
    if spans.len() % 2 == 0 {
        return Err(CommandError::UnbalancedQuote(rest.to_string()));
    }
    let mut paths = Vec::new();
    for (index, span) in spans.into_iter().enumerate() {
        if index % 2 == 1 {
            if !span.is_empty() {
                paths.push(PathBuf::from(span));
            }
        } else {
            paths.extend(span.split_whitespace().map(PathBuf::from));
        }
    }
    Ok(paths)
}

impl Command {
    /// Messages equivalent to this command. Local commands map to none.
    pub fn into_msgs(self) -> Vec<Msg> {
        match self {
            Command::Text(content) => vec![Msg::TextEdited(content)],
            Command::File(path) => vec![Msg::FilePicked(Some(FileHandle::new(path)))],
            Command::Browse => vec![Msg::UploadBoxClicked],
            Command::DragOver => vec![Msg::DragOver],
            Command::DragLeave => vec![Msg::DragLeave],
            Command::Drop(paths) => vec![
                Msg::DragOver,
                Msg::Dropped(paths.into_iter().map(FileHandle::new).collect()),
            ],
            Command::Submit => vec![Msg::SubmitClicked],
            Command::Copy => vec![Msg::CopyReplyClicked],
            Command::Paste | Command::Help | Command::Quit => Vec::new(),
        }
    }
}

/// Answer to an open picker: a path, or nothing to cancel.
pub fn picker_answer(line: &str) -> Msg {
    let path = line.trim();
    if path.is_empty() {
        Msg::FilePicked(None)
    } else {
        Msg::FilePicked(Some(FileHandle::new(path)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_keeps_content_verbatim() {
        assert_eq!(
            parse_command("text  Hello,   team \n").unwrap(),
            Some(Command::Text(" Hello,   team ".to_string()))
        );
        assert_eq!(
            parse_command("text").unwrap(),
            Some(Command::Text(String::new()))
        );
    }

    #[test]
    fn drop_expands_to_drag_then_drop() {
        let msgs = parse_command(r#"drop "a.txt" "b.txt""#)
            .unwrap()
            .unwrap()
            .into_msgs();
        assert_eq!(
            msgs,
            vec![
                Msg::DragOver,
                Msg::Dropped(vec![FileHandle::new("a.txt"), FileHandle::new("b.txt")]),
            ]
        );
    }

    #[test]
    fn drop_keeps_spaces_in_paths() {
        assert_eq!(
            parse_command("drop /tmp/my mail.txt").unwrap(),
            Some(Command::Drop(vec![PathBuf::from("/tmp/my mail.txt")]))
        );
        assert_eq!(
            parse_command(r#"drop "/tmp/my mail.txt" /tmp/other.txt"#).unwrap(),
            Some(Command::Drop(vec![
                PathBuf::from("/tmp/my mail.txt"),
                PathBuf::from("/tmp/other.txt"),
            ]))
        );
        assert_eq!(parse_command("drop").unwrap(), Some(Command::Drop(Vec::new())));
        assert!(matches!(
            parse_command(r#"drop "/tmp/my mail.txt"#),
            Err(CommandError::UnbalancedQuote(_))
        ));
    }

    #[test]
    fn file_requires_path() {
        assert_eq!(
            parse_command("file   "),
            Err(CommandError::MissingPath("file"))
        );
        assert_eq!(
            parse_command("FILE /tmp/my mail.txt").unwrap(),
            Some(Command::File(PathBuf::from("/tmp/my mail.txt")))
        );
    }

    #[test]
    fn blank_and_unknown_lines() {
        assert_eq!(parse_command("   ").unwrap(), None);
        assert!(matches!(
            parse_command("frobnicate"),
            Err(CommandError::Unknown(_))
        ));
    }

    #[test]
    fn empty_picker_answer_cancels() {
        assert_eq!(picker_answer("  \n"), Msg::FilePicked(None));
        assert_eq!(
            picker_answer("/tmp/a.pdf\n"),
            Msg::FilePicked(Some(FileHandle::new("/tmp/a.pdf")))
        );
    }
}
