//! Terminal styling as data
//!
//! Renderers describe emphasis with [`Style`] values attached to text spans.
//! Escape sequences only appear when a [`Line`] is turned into a string with
//! [`Styling::Ansi`].

use colored::{Color, ColoredString, Colorize};

/// Foreground colour roles used by the report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Applied batch headers
    Success,
    /// Applied migration names and timestamps
    Accent,
}

impl Tone {
    fn color(self) -> Color {
        match self {
            Tone::Success => Color::AnsiColor(46),
            Tone::Accent => Color::AnsiColor(33),
        }
    }
}

/// Orthogonal emphasis attributes for one span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub bold: bool,
    pub faint: bool,
    pub tone: Option<Tone>,
}

impl Style {
    #[must_use]
    pub fn plain() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    #[must_use]
    pub fn faint(mut self, faint: bool) -> Self {
        self.faint = faint;
        self
    }

    #[must_use]
    pub fn tone(mut self, tone: Tone) -> Self {
        self.tone = Some(tone);
        self
    }

    fn apply(self, text: &str) -> ColoredString {
        let mut styled = text.normal();
        if self.bold {
            styled = styled.bold();
        }
        if self.faint {
            styled = styled.dimmed();
        }
        if let Some(tone) = self.tone {
            styled = styled.color(tone.color());
        }
        styled
    }
}

/// A run of text sharing one style
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: Style,
}

impl Span {
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Style::plain())
    }
}

/// One output row
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn push(mut self, span: Span) -> Self {
        self.spans.push(span);
        self
    }

    /// Concatenated text of all spans, without styling
    #[must_use]
    pub fn text(&self) -> String {
        self.spans.iter().map(|span| span.text.as_str()).collect()
    }

    /// Render the line for output
    #[must_use]
    pub fn render(&self, styling: Styling) -> String {
        match styling {
            Styling::Plain => self.text(),
            Styling::Ansi => self
                .spans
                .iter()
                .map(|span| {
                    if span.style == Style::plain() {
                        span.text.clone()
                    } else {
                        span.style.apply(&span.text).to_string()
                    }
                })
                .collect(),
        }
    }
}

/// How styled lines become text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Styling {
    /// No escape sequences
    #[default]
    Plain,
    /// ANSI escape sequences through `colored`, subject to its global control
    Ansi,
}
