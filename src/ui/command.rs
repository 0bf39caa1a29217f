//! Input-line commands.

use std::path::PathBuf;

/// A slash command typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Chat text that starts with `/`, typed as `//text`.
    Say(String),
    /// Pick a file (when given) and upload the current selection.
    Upload(Option<PathBuf>),
    /// Fetch and render the stored history.
    History,
    /// Write the transcript as HTML.
    Export(PathBuf),
    /// Empty the visible message list.
    Clear,
    Help,
    Quit,
    /// Recognized command with a bad argument, or an unknown command.
    Invalid(String),
}

/// Parse a slash command. Returns `None` for ordinary chat text.
pub fn parse_command(input: &str) -> Option<Command> {
    let input = input.trim();
    if let Some(literal) = input.strip_prefix("//") {
        return Some(Command::Say(format!("/{literal}")));
    }
    let rest = input.strip_prefix('/')?;

    let mut parts = rest.splitn(2, ' ');
    let command = parts.next()?.to_lowercase();
    let argument = parts.next().map(str::trim).filter(|s| !s.is_empty());

    let result = match command.as_str() {
        "upload" => Command::Upload(argument.map(PathBuf::from)),
        "history" => Command::History,
        "export" | "save" => match argument {
            Some(path) => Command::Export(PathBuf::from(path)),
            None => Command::Invalid("/export requires a file path".to_string()),
        },
        "clear" => Command::Clear,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => Command::Invalid(format!("Unknown command: /{other}")),
    };
    Some(result)
}

pub fn help_text() -> &'static str {
    r"Available commands:
  <text>                 Send a chat message
  //<text>               Send a message that starts with '/'
  /upload [path]         Select a file (optional) and upload it
  /history               Load the stored conversation history
  /export <file>         Save the transcript as HTML
  /clear                 Clear the visible messages
  /help                  Show this help message
  /quit                  Exit"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_not_a_command() {
        assert_eq!(parse_command("hello there"), None);
        assert_eq!(parse_command("  what is /upload?"), None);
    }

    #[test]
    fn upload_with_and_without_path() {
        assert_eq!(parse_command("/upload"), Some(Command::Upload(None)));
        assert_eq!(
            parse_command("/upload  notes/syllabus.pdf "),
            Some(Command::Upload(Some(PathBuf::from("notes/syllabus.pdf"))))
        );
    }

    #[test]
    fn export_requires_path() {
        assert!(matches!(parse_command("/export"), Some(Command::Invalid(_))));
        assert_eq!(
            parse_command("/EXPORT out.html"),
            Some(Command::Export(PathBuf::from("out.html")))
        );
    }

    #[test]
    fn double_slash_sends_literal_text() {
        assert_eq!(
            parse_command("//etc/hosts looks wrong"),
            Some(Command::Say("/etc/hosts looks wrong".to_string()))
        );
        assert_eq!(parse_command("//"), Some(Command::Say("/".to_string())));
    }

    #[test]
    fn aliases() {
        assert_eq!(parse_command("/q"), Some(Command::Quit));
        assert_eq!(parse_command("/?"), Some(Command::Help));
        assert!(matches!(parse_command("/bogus"), Some(Command::Invalid(_))));
    }

    #[test]
    fn help_text_mentions_upload() {
        assert!(help_text().contains("/upload"));
        assert!(help_text().contains("//<text>"));
    }
}
