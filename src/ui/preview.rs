//! Text block builder for walkthrough and step details
//!
//! Produces the same layout with or without color so `show` output stays
//! readable when piped.

use colored::*;

use super::codicon::Codicon;

const SEPARATOR: &str = "───────────────────────────────────";

pub struct PreviewBuilder {
    lines: Vec<String>,
    color: bool,
}

impl PreviewBuilder {
    pub fn new(color: bool) -> Self {
        Self {
            lines: Vec::new(),
            color,
        }
    }

    /// Icon + title followed by a separator line
    pub fn header(mut self, icon: Option<Codicon>, title: &str) -> Self {
        let icon_str = icon.map(|i| format!("{}  ", char::from(i))).unwrap_or_default();
        let heading = format!("{icon_str}{title}");
        if self.color {
            self.lines.push(heading.magenta().bold().to_string());
            self.lines.push(SEPARATOR.dimmed().to_string());
        } else {
            self.lines.push(heading);
            self.lines.push(SEPARATOR.to_string());
        }
        self
    }

    pub fn text(mut self, content: &str) -> Self {
        for line in content.lines() {
            self.lines.push(line.to_string());
        }
        self
    }

    pub fn subtext(mut self, content: &str) -> Self {
        let line = if self.color {
            content.dimmed().to_string()
        } else {
            content.to_string()
        };
        self.lines.push(line);
        self
    }

    /// Labeled field, e.g. `When: isWeb`
    pub fn field(mut self, label: &str, value: &str) -> Self {
        let label = format!("{label}:");
        let label = if self.color {
            label.dimmed().to_string()
        } else {
            label
        };
        self.lines.push(format!("{label} {value}"));
        self
    }

    pub fn field_if(self, label: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.field(label, value),
            None => self,
        }
    }

    pub fn bullet(mut self, content: &str) -> Self {
        self.lines.push(format!("  • {content}"));
        self
    }

    pub fn bullets<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for item in items {
            self = self.bullet(item.as_ref());
        }
        self
    }

    pub fn blank(mut self) -> Self {
        self.lines.push(String::new());
        self
    }

    pub fn build_string(self) -> String {
        self.lines.join("\n")
    }
}
