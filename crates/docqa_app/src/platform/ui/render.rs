use docqa_core::{AppViewModel, UploadPhase};

use super::constants::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalCommand {
    PrintLine(String),
    ShowPrompt(&'static str),
}

/// What has already been written to the terminal.
#[derive(Debug, Default)]
pub struct RenderCursor {
    printed_entries: usize,
    /// Entry whose panel was printed last.
    panel_entry: Option<usize>,
    last_prompt: Option<&'static str>,
}

/// Emits only what changed since the previous call: new entries up to the
/// scroll anchor, the info panel of each new answer, and the prompt.
pub fn render(view: &AppViewModel, cursor: &mut RenderCursor) -> Vec<TerminalCommand> {
    let mut cmds = Vec::new();

    let visible = view.scroll_to.map_or(0, |index| index + 1).min(view.entries.len());
    for entry in view.entries.iter().take(visible).skip(cursor.printed_entries) {
        cmds.extend(entry.lines.iter().cloned().map(TerminalCommand::PrintLine));
        cmds.push(TerminalCommand::PrintLine(String::new()));
    }
    cursor.printed_entries = cursor.printed_entries.max(visible);

    if let (Some(items), Some(entry)) = (&view.info_panel, view.info_panel_entry) {
        if entry < visible && cursor.panel_entry != Some(entry) {
            cmds.push(TerminalCommand::PrintLine(format!(
                "[{}]",
                items.join(INFO_PANEL_SEPARATOR)
            )));
            cmds.push(TerminalCommand::PrintLine(String::new()));
            cursor.panel_entry = Some(entry);
        }
    }

    let prompt = if !view.submit_enabled {
        PROMPT_PROCESSING
    } else if view.upload_phase == UploadPhase::Uploading {
        PROMPT_UPLOADING
    } else {
        PROMPT_READY
    };
    if !cmds.is_empty() || cursor.last_prompt != Some(prompt) {
        cmds.push(TerminalCommand::ShowPrompt(prompt));
        cursor.last_prompt = Some(prompt);
    }

    cmds
}

#[cfg(test)]
mod tests {
    use docqa_core::{update, AppState, Msg, QueryAnswer, Reply};

    use super::{render, RenderCursor, TerminalCommand};

    fn lines(cmds: &[TerminalCommand]) -> Vec<String> {
        cmds.iter()
            .filter_map(|cmd| match cmd {
                TerminalCommand::PrintLine(line) => Some(line.clone()),
                TerminalCommand::ShowPrompt(_) => None,
            })
            .collect()
    }

    fn submitted(question: &str) -> AppState {
        let (state, _) = update(AppState::new(), Msg::InputChanged(question.to_string()));
        let (state, _) = update(state, Msg::QuerySubmitted);
        state
    }

    #[test]
    fn empty_view_only_shows_prompt() {
        let mut cursor = RenderCursor::default();
        let cmds = render(&AppState::new().view(), &mut cursor);
        assert_eq!(cmds, vec![TerminalCommand::ShowPrompt("> ")]);

        // Nothing changed: nothing to do.
        assert!(render(&AppState::new().view(), &mut cursor).is_empty());
    }

    #[test]
    fn new_entries_are_printed_once_with_busy_prompt() {
        let state = submitted("hello");
        let mut cursor = RenderCursor::default();

        let cmds = render(&state.view(), &mut cursor);
        assert_eq!(lines(&cmds), vec!["You:", "hello", ""]);
        assert_eq!(
            cmds.last(),
            Some(&TerminalCommand::ShowPrompt("(processing...) "))
        );

        assert!(render(&state.view(), &mut cursor).is_empty());
    }

    #[test]
    fn upload_in_flight_changes_prompt() {
        let (state, _) = update(
            AppState::new(),
            Msg::FilesSelected(vec![std::path::PathBuf::from("a.txt")]),
        );
        let (state, _) = update(state, Msg::UploadSubmitted);
        let mut cursor = RenderCursor::default();

        let cmds = render(&state.view(), &mut cursor);
        assert_eq!(lines(&cmds), vec!["Assistant:", "Uploading 1 file(s)...", ""]);
        assert_eq!(
            cmds.last(),
            Some(&TerminalCommand::ShowPrompt("(uploading...) > "))
        );
    }

    #[test]
    fn answer_prints_entry_then_info_panel() {
        let state = submitted("hello");
        let mut cursor = RenderCursor::default();
        render(&state.view(), &mut cursor);

        let answer = QueryAnswer {
            response: Some("hi".to_string()),
            confidence: Some("low".to_string()),
            documents_found: Some(2),
            ..QueryAnswer::default()
        };
        let (state, _) = update(state, Msg::QueryCompleted(Reply::Success(answer)));
        let cmds = render(&state.view(), &mut cursor);

        assert_eq!(
            lines(&cmds),
            vec![
                "Assistant:",
                "hi",
                "",
                "🔴 Confidence: low",
                "",
                "[documents: 2 | confidence: LOW]",
                "",
            ]
        );
        assert_eq!(cmds.last(), Some(&TerminalCommand::ShowPrompt("> ")));

        let (state, _) = update(state, Msg::InputChanged("again".to_string()));
        let (state, _) = update(state, Msg::QuerySubmitted);
        render(&state.view(), &mut cursor);
        let answer = QueryAnswer {
            response: Some("hi".to_string()),
            confidence: Some("low".to_string()),
            documents_found: Some(2),
            ..QueryAnswer::default()
        };
        let (state, _) = update(state, Msg::QueryCompleted(Reply::Success(answer)));
        let cmds = render(&state.view(), &mut cursor);

        assert_eq!(
            lines(&cmds),
            vec![
                "Assistant:",
                "hi",
                "",
                "🔴 Confidence: low",
                "",
                "[documents: 2 | confidence: LOW]",
                "",
            ]
        );
    }

    #[test]
    fn default_answers_in_a_row_each_print_a_panel() {
        let mut cursor = RenderCursor::default();
        let mut state = AppState::new();
        for question in ["one", "two"] {
            let (next, _) = update(state, Msg::InputChanged(question.to_string()));
            let (next, _) = update(next, Msg::QuerySubmitted);
            render(&next.view(), &mut cursor);
            let (next, _) = update(next, Msg::QueryCompleted(Reply::Success(QueryAnswer::default())));
            let cmds = render(&next.view(), &mut cursor);
            assert_eq!(
                lines(&cmds),
                vec![
                    "Assistant:",
                    "Response received.",
                    "",
                    "Confidence: unknown",
                    "",
                    "[documents: 0 | confidence: UNKNOWN]",
                    "",
                ]
            );
            state = next;
        }
    }

    #[test]
    fn busy_notice_keeps_processing_prompt() {
        let state = submitted("first");
        let mut cursor = RenderCursor::default();
        render(&state.view(), &mut cursor);

        let (state, _) = update(state, Msg::InputChanged("second".to_string()));
        let (state, _) = update(state, Msg::QuerySubmitted);
        let cmds = render(&state.view(), &mut cursor);

        assert_eq!(
            lines(&cmds),
            vec![
                "Assistant:",
                "Still processing the previous question; not sent.",
                "",
            ]
        );
        assert_eq!(
            cmds.last(),
            Some(&TerminalCommand::ShowPrompt("(processing...) "))
        );
    }
}
