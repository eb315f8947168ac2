use std::path::PathBuf;

use docqa_core::Msg;

use super::constants::*;

#[derive(Debug, Clone, PartialEq)]
pub enum InputAction {
    Dispatch(Vec<Msg>),
    Quit,
}

/// Maps one stdin line to core messages. Lines starting with `/` are commands;
/// everything else is a question.
pub fn parse_line(line: &str) -> InputAction {
    let Some(command) = line.trim().strip_prefix('/') else {
        return InputAction::Dispatch(vec![
            Msg::InputChanged(line.to_string()),
            Msg::QuerySubmitted,
        ]);
    };

    let (name, rest) = command
        .split_once(char::is_whitespace)
        .unwrap_or((command, ""));
    let msgs = match name {
        COMMAND_UPLOAD => {
            let files: Vec<PathBuf> = split_args(rest).into_iter().map(PathBuf::from).collect();
            if files.is_empty() {
                vec![Msg::UploadSubmitted]
            } else {
                vec![Msg::FilesSelected(files), Msg::UploadSubmitted]
            }
        }
        COMMAND_CLEAR => vec![Msg::ClearHistoryRequested],
        COMMAND_SUMMARY => vec![Msg::SummaryRequested],
        COMMAND_HELP => vec![Msg::Notice(HELP_TEXT.to_string())],
        COMMAND_QUIT | COMMAND_EXIT => return InputAction::Quit,
        other => vec![Msg::Notice(format!("Unknown command: /{other}"))],
    };
    InputAction::Dispatch(msgs)
}

/// Splits on whitespace; single or double quotes group a path containing spaces.
/// An unterminated quote runs to the end of the line.
fn split_args(text: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_arg = false;
    let mut quote: Option<char> = None;

    for ch in text.chars() {
        match quote {
            Some(open) if ch == open => quote = None,
            Some(_) => current.push(ch),
            None if ch == '"' || ch == '\'' => {
                quote = Some(ch);
                in_arg = true;
            }
            None if ch.is_whitespace() => {
                if in_arg {
                    args.push(std::mem::take(&mut current));
                    in_arg = false;
                }
            }
            None => {
                current.push(ch);
                in_arg = true;
            }
        }
    }
    if in_arg {
        args.push(current);
    }
    args
}
