//! Entity types for the welcome page content
//!
//! Entries, categories and steps are built once with the builder methods below
//! and only read afterwards.

use std::fmt;

use crate::ui::codicon::Codicon;

use super::link;

/// A user-facing message together with the key it is translated under.
///
/// Only the default message is stored; catalogs are resolved elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Localized {
    pub key: Option<String>,
    pub message: String,
}

impl Localized {
    pub fn new(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            message: message.into(),
        }
    }

    /// Text that has no translation key
    pub fn literal(message: impl Into<String>) -> Self {
        Self {
            key: None,
            message: message.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Localized {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// A link rendered inline in a description as `[label](target)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: Localized,
    pub target: String,
}

impl Button {
    pub fn new(label: Localized, target: impl Into<String>) -> Self {
        Self {
            label,
            target: target.into(),
        }
    }

    pub fn markdown(&self) -> String {
        format!("[{}]({})", self.label.message, self.target)
    }
}

/// Description text whose `{n}` placeholders are filled by `buttons[n]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description {
    pub text: Localized,
    pub buttons: Vec<Button>,
}

impl Description {
    pub fn new(text: Localized) -> Self {
        Self {
            text,
            buttons: Vec::new(),
        }
    }

    pub fn button(mut self, button: Button) -> Self {
        self.buttons.push(button);
        self
    }

    /// Placeholder indices in the order they appear in the template
    pub fn placeholders(&self) -> Vec<usize> {
        link::placeholders(&self.text.message)
            .into_iter()
            .map(|(_, index)| index)
            .collect()
    }

    /// Template with every resolvable placeholder replaced by its button
    pub fn render(&self) -> String {
        let template = &self.text.message;
        let mut out = String::with_capacity(template.len());
        let mut last = 0;

        for (range, index) in link::placeholders(template) {
            out.push_str(&template[last..range.start]);
            match self.buttons.get(index) {
                Some(button) => out.push_str(&button.markdown()),
                None => out.push_str(&template[range.clone()]),
            }
            last = range.end;
        }
        out.push_str(&template[last..]);
        out
    }

    /// Link targets in rendered order
    pub fn links(&self) -> Vec<link::Link> {
        link::extract_links(&self.render())
    }
}

impl From<Localized> for Description {
    fn from(text: Localized) -> Self {
        Description::new(text)
    }
}

/// Visibility predicate, evaluated by the host against its context keys
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct When(String);

impl When {
    pub fn new(expression: impl Into<String>) -> Self {
        Self(expression.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for When {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Event identifier that marks a step as done, e.g. `onCommand:<id>`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompletionEvent(String);

impl CompletionEvent {
    pub fn new(event: impl Into<String>) -> Self {
        Self(event.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Splits `onCommand:workbench.action.selectTheme` into its trigger and
    /// argument. The identifier is not checked against known triggers.
    pub fn trigger(&self) -> Option<(&str, &str)> {
        self.0.split_once(':')
    }
}

impl fmt::Display for CompletionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reference to an icon by id, resolved by the host's icon registry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ThemeIcon {
    pub id: String,
}

impl ThemeIcon {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn codicon(&self) -> Option<Codicon> {
        Codicon::from_id(&self.id)
    }
}

impl From<Codicon> for ThemeIcon {
    fn from(icon: Codicon) -> Self {
        ThemeIcon::new(icon.id())
    }
}

/// Icon contributed by the welcome page, falling back to a codicon glyph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconDefinition {
    pub id: String,
    pub default: Codicon,
    pub description: Localized,
}

impl IconDefinition {
    pub fn new(id: impl Into<String>, default: Codicon, description: Localized) -> Self {
        Self {
            id: id.into(),
            default,
            description,
        }
    }

    pub fn icon(&self) -> ThemeIcon {
        ThemeIcon::new(self.id.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeKind {
    Light,
    Dark,
    HighContrast,
    HighContrastLight,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImagePath {
    Single(String),
    Themed {
        hc: String,
        hc_light: Option<String>,
        light: String,
        dark: String,
    },
}

impl ImagePath {
    /// Path to show under the given theme; light high contrast falls back to light
    pub fn for_theme(&self, theme: ThemeKind) -> &str {
        match self {
            ImagePath::Single(path) => path.as_str(),
            ImagePath::Themed {
                hc,
                hc_light,
                light,
                dark,
            } => match theme {
                ThemeKind::Light => light.as_str(),
                ThemeKind::Dark => dark.as_str(),
                ThemeKind::HighContrast => hc.as_str(),
                ThemeKind::HighContrastLight => hc_light.as_deref().unwrap_or(light.as_str()),
            },
        }
    }

    pub fn paths(&self) -> Vec<&str> {
        match self {
            ImagePath::Single(path) => vec![path.as_str()],
            ImagePath::Themed {
                hc,
                hc_light,
                light,
                dark,
            } => {
                let mut paths = vec![hc.as_str(), light.as_str(), dark.as_str()];
                if let Some(hc_light) = hc_light {
                    paths.push(hc_light.as_str());
                }
                paths
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Svg,
    Markdown,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Svg => "svg",
            MediaKind::Markdown => "markdown",
        }
    }

    pub fn parse(kind: &str) -> Option<MediaKind> {
        match kind {
            "image" => Some(MediaKind::Image),
            "svg" => Some(MediaKind::Svg),
            "markdown" => Some(MediaKind::Markdown),
            _ => None,
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Illustration shown next to a step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Media {
    Image { path: ImagePath, alt_text: String },
    Svg { path: String, alt_text: String },
    /// `path` names a markdown document or a built-in generator such as `theme_picker`
    Markdown { path: String },
}

impl Media {
    pub fn image(path: impl Into<String>, alt_text: impl Into<String>) -> Self {
        Media::Image {
            path: ImagePath::Single(path.into()),
            alt_text: alt_text.into(),
        }
    }

    pub fn svg(path: impl Into<String>, alt_text: impl Into<String>) -> Self {
        Media::Svg {
            path: path.into(),
            alt_text: alt_text.into(),
        }
    }

    pub fn markdown(path: impl Into<String>) -> Self {
        Media::Markdown { path: path.into() }
    }

    pub fn kind(&self) -> MediaKind {
        match self {
            Media::Image { .. } => MediaKind::Image,
            Media::Svg { .. } => MediaKind::Svg,
            Media::Markdown { .. } => MediaKind::Markdown,
        }
    }

    pub fn alt_text(&self) -> Option<&str> {
        match self {
            Media::Image { alt_text, .. } | Media::Svg { alt_text, .. } => Some(alt_text),
            Media::Markdown { .. } => None,
        }
    }

    pub fn paths(&self) -> Vec<&str> {
        match self {
            Media::Image { path, .. } => path.paths(),
            Media::Svg { path, .. } | Media::Markdown { path } => vec![path.as_str()],
        }
    }

    /// True when any path is empty, i.e. the illustration is not authored yet
    pub fn is_placeholder(&self) -> bool {
        self.paths().iter().any(|path| path.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub id: String,
    pub title: Localized,
    pub description: Description,
    pub completion_events: Vec<CompletionEvent>,
    pub when: Option<When>,
    pub media: Media,
}

impl Step {
    pub fn new(
        id: impl Into<String>,
        title: Localized,
        description: impl Into<Description>,
        media: Media,
    ) -> Self {
        Self {
            id: id.into(),
            title,
            description: description.into(),
            completion_events: Vec::new(),
            when: None,
            media,
        }
    }

    pub fn when(mut self, expression: impl Into<String>) -> Self {
        self.when = Some(When::new(expression));
        self
    }

    pub fn completion_event(mut self, event: impl Into<String>) -> Self {
        self.completion_events.push(CompletionEvent::new(event));
        self
    }
}

/// A walkthrough: an ordered list of steps on one feature area
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub title: Localized,
    pub description: Description,
    pub is_featured: bool,
    /// Category suggested once this one is finished
    pub next: Option<String>,
    pub icon: ThemeIcon,
    pub when: Option<When>,
    pub steps: Vec<Step>,
}

impl Category {
    pub fn new(
        id: impl Into<String>,
        title: Localized,
        description: impl Into<Description>,
        icon: ThemeIcon,
    ) -> Self {
        Self {
            id: id.into(),
            title,
            description: description.into(),
            is_featured: false,
            next: None,
            icon,
            when: None,
            steps: Vec::new(),
        }
    }

    pub fn featured(mut self, featured: bool) -> Self {
        self.is_featured = featured;
        self
    }

    pub fn next(mut self, category: impl Into<String>) -> Self {
        self.next = Some(category.into());
        self
    }

    pub fn when(mut self, expression: impl Into<String>) -> Self {
        self.when = Some(When::new(expression));
        self
    }

    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    pub fn step_by_id(&self, id: &str) -> Option<&Step> {
        self.steps.iter().find(|step| step.id == id)
    }
}

/// Top-level shortcut that runs a command directly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartEntry {
    pub id: String,
    pub title: Localized,
    pub description: Description,
    pub icon: ThemeIcon,
    pub when: Option<When>,
    /// `command:` link run when the entry is activated
    pub command: String,
}

impl StartEntry {
    pub fn new(
        id: impl Into<String>,
        title: Localized,
        description: impl Into<Description>,
        icon: ThemeIcon,
        command: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title,
            description: description.into(),
            icon,
            when: None,
            command: command.into(),
        }
    }

    pub fn when(mut self, expression: impl Into<String>) -> Self {
        self.when = Some(When::new(expression));
        self
    }

    pub fn target(&self) -> Result<link::LinkTarget, link::LinkError> {
        link::LinkTarget::parse(&self.command)
    }
}
