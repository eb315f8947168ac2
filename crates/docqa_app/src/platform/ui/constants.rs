pub const COMMAND_UPLOAD: &str = "upload";
pub const COMMAND_CLEAR: &str = "clear";
pub const COMMAND_SUMMARY: &str = "summary";
pub const COMMAND_HELP: &str = "help";
pub const COMMAND_QUIT: &str = "quit";
pub const COMMAND_EXIT: &str = "exit";

pub const PROMPT_READY: &str = "> ";
pub const PROMPT_PROCESSING: &str = "(processing...) ";
pub const PROMPT_UPLOADING: &str = "(uploading...) > ";
pub const INFO_PANEL_SEPARATOR: &str = " | ";

pub const HELP_TEXT: &str = "Type a question and press Enter to ask it.\n\
/upload <file>... uploads documents (no files: retry the last selection)\n\
/upload \"annual report.pdf\" quotes a path that contains spaces\n\
/summary shows the server-side conversation summary\n\
/clear forgets the server-side conversation history\n\
/quit exits";
