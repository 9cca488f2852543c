use inksac::prelude::*;

use crate::core::commands::is_builtin;
use crate::core::tokenizer::is_delimiter;

#[derive(Debug, Clone, Copy)]
pub struct SyntaxHighlighter {
    color_support: ColorSupport,
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxHighlighter {
    pub fn new() -> Self {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self {
            color_support: support,
        }
    }

    /// Never emits escape codes, for output that is not a terminal.
    pub fn plain() -> Self {
        Self {
            color_support: ColorSupport::NoColor,
        }
    }

    fn is_plain(&self) -> bool {
        matches!(self.color_support, ColorSupport::NoColor)
    }

    /// Colours the arguments of an input line while keeping every delimiter in
    /// place, so cursor positions in the editor stay valid.
    pub fn highlight_command(&self, input: &str) -> String {
        if self.is_plain() {
            return input.to_string();
        }

        let mut result = String::with_capacity(input.len() * 2);
        let mut token_index = 0;
        let mut rest = input;

        while !rest.is_empty() {
            let split = rest
                .find(|c: char| is_delimiter(c) != rest.starts_with(is_delimiter))
                .unwrap_or(rest.len());
            let (chunk, tail) = rest.split_at(split);

            if chunk.starts_with(is_delimiter) {
                result.push_str(chunk);
            } else {
                result.push_str(&self.style_token(chunk, token_index));
                token_index += 1;
            }
            rest = tail;
        }

        result
    }

    fn style_token(&self, token: &str, index: usize) -> String {
        let style = if index == 0 && token.starts_with('!') {
            Style::builder().foreground(Color::Yellow).bold().build()
        } else if index == 0 && is_builtin(token) {
            Style::builder().foreground(Color::Green).bold().build()
        } else if index == 0 {
            Style::builder().foreground(Color::Cyan).bold().build()
        } else if token.starts_with('-') {
            Style::builder().foreground(Color::Yellow).build()
        } else {
            return token.to_string();
        };
        token.style(style).to_string()
    }

    pub fn highlight_error(&self, error: &str) -> String {
        if self.is_plain() {
            return error.to_string();
        }

        let error_style = Style::builder().foreground(Color::Red).bold().build();
        error.style(error_style).to_string()
    }

    pub fn highlight_hint(&self, hint: &str) -> String {
        if self.is_plain() {
            return hint.to_string();
        }

        let hint_style = Style::builder()
            .foreground(Color::RGB(128, 128, 128))
            .build();
        hint.style(hint_style).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_leaves_text_alone() {
        let highlighter = SyntaxHighlighter::plain();
        let line = "ls  -l |wc";
        assert_eq!(highlighter.highlight_command(line), line);
        assert_eq!(highlighter.highlight_error("oops"), "oops");
        assert_eq!(highlighter.highlight_hint("hint"), "hint");
    }
}
