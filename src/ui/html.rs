//! Transcript rendering as HTML.

use std::fmt::Write as _;

use crate::message::ChatMessage;

/// Render messages as `<div class="message user-message">` entries.
///
/// Message text is escaped; nothing else is sanitized.
pub fn render_transcript<'a>(messages: impl IntoIterator<Item = &'a ChatMessage>) -> String {
    let mut out = String::from("<div id=\"chat-box\">\n");
    for message in messages {
        let _ = writeln!(
            out,
            "  <div class=\"message {}\">{}</div>",
            message.sender.css_class(),
            escape(&message.text)
        );
    }
    out.push_str("</div>\n");
    out
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_classes_and_order() {
        let messages = [ChatMessage::user("hello"), ChatMessage::bot("hi")];
        let html = render_transcript(&messages);

        let user = html.find("message user-message\">hello<").unwrap();
        let bot = html.find("message bot-message\">hi<").unwrap();
        assert!(user < bot);
    }

    #[test]
    fn test_text_is_escaped() {
        let messages = [ChatMessage::bot("<script>alert(\"x\") & co</script>")];
        let html = render_transcript(&messages);

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&quot;x&quot;) &amp; co&lt;/script&gt;"));
    }

    #[test]
    fn test_empty_transcript() {
        assert_eq!(render_transcript(&[]), "<div id=\"chat-box\">\n</div>\n");
    }
}
