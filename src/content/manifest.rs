//! Content files: welcome content stored as TOML or JSON
//!
//! The on-disk shape follows the literal table the built-in content is written
//! from (`startEntries`, `walkthroughs`, `media.type`, `media.altText`, ...).
//! Text fields take either a plain string or `{ key, message }`.
//!
//! Loading is strict: a media block that does not match its declared `type`,
//! or any validation error, rejects the whole file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ui::codicon::Codicon;

use super::model::{
    Button, Category, CompletionEvent, Description, IconDefinition, ImagePath, Localized, Media,
    MediaKind, StartEntry, Step, ThemeIcon, When,
};
use super::registry::Registry;
use super::validate::{ContentError, ValidationErrors, step_owner};

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unsupported content file {} (expected .toml or .json)", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("failed to parse TOML content: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to serialize TOML content: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("failed to parse JSON content: {0}")]
    Json(#[from] serde_json::Error),

    #[error("icon '{icon}' falls back to unknown codicon '{glyph}'")]
    UnknownCodicon { icon: String, glyph: String },

    #[error(transparent)]
    Invalid(#[from] ValidationErrors),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentFormat {
    Toml,
    Json,
}

impl ContentFormat {
    pub fn from_path(path: &Path) -> Option<ContentFormat> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "toml" => Some(ContentFormat::Toml),
            "json" => Some(ContentFormat::Json),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ContentFormat::Toml => "toml",
            ContentFormat::Json => "json",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextRecord {
    Plain(String),
    Keyed { key: String, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonRecord {
    pub label: TextRecord,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DescriptionRecord {
    Plain(String),
    Rich {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        key: Option<String>,
        message: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        buttons: Vec<ButtonRecord>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathRecord {
    Single(String),
    Themed {
        hc: String,
        #[serde(rename = "hcLight", default, skip_serializing_if = "Option::is_none")]
        hc_light: Option<String>,
        light: String,
        dark: String,
    },
}

/// Media as written by authors; checked against its `type` on load
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaRecord {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub completion_events: Vec<String>,
    pub title: TextRecord,
    pub description: DescriptionRecord,
    pub media: MediaRecord,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRecord {
    pub id: String,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<String>,
    pub title: TextRecord,
    pub description: DescriptionRecord,
    #[serde(default)]
    pub steps: Vec<StepRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartEntryRecord {
    pub id: String,
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<String>,
    pub command: String,
    pub title: TextRecord,
    pub description: DescriptionRecord,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconRecord {
    pub id: String,
    /// Codicon id shown when the theme does not override the icon
    pub default: String,
    pub description: TextRecord,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentFile {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub icons: Vec<IconRecord>,
    #[serde(default)]
    pub start_entries: Vec<StartEntryRecord>,
    #[serde(default)]
    pub walkthroughs: Vec<CategoryRecord>,
}

impl ContentFile {
    pub fn parse(contents: &str, format: ContentFormat) -> Result<ContentFile, ManifestError> {
        Ok(match format {
            ContentFormat::Toml => toml::from_str(contents)?,
            ContentFormat::Json => serde_json::from_str(contents)?,
        })
    }

    pub fn render(&self, format: ContentFormat) -> Result<String, ManifestError> {
        Ok(match format {
            ContentFormat::Toml => toml::to_string_pretty(self)?,
            ContentFormat::Json => serde_json::to_string_pretty(self)?,
        })
    }

    /// Builds a validated registry, reporting every media shape problem at once
    pub fn into_registry(self) -> Result<Registry, ManifestError> {
        let icons = self
            .icons
            .into_iter()
            .map(IconRecord::into_definition)
            .collect::<Result<Vec<_>, _>>()?;

        let start_entries = self
            .start_entries
            .into_iter()
            .map(StartEntryRecord::into_entry)
            .collect();

        let mut shape_errors = Vec::new();
        let mut walkthroughs = Vec::with_capacity(self.walkthroughs.len());
        for record in self.walkthroughs {
            walkthroughs.push(record.into_category(&mut shape_errors));
        }

        let registry = Registry::new(icons, start_entries, walkthroughs);
        if shape_errors.is_empty() {
            return Ok(registry.validated()?);
        }

        // Steps with malformed media were dropped; check what remains.
        shape_errors.extend(registry.validate().errors);
        Err(ValidationErrors(shape_errors).into())
    }
}

impl From<&Registry> for ContentFile {
    fn from(registry: &Registry) -> Self {
        ContentFile {
            icons: registry.icons().iter().map(IconRecord::from).collect(),
            start_entries: registry
                .start_entries()
                .iter()
                .map(StartEntryRecord::from)
                .collect(),
            walkthroughs: registry
                .walkthroughs()
                .iter()
                .map(CategoryRecord::from)
                .collect(),
        }
    }
}

/// Reads and validates a content file, picking the format from its extension
pub fn load(path: &Path) -> Result<Registry, ManifestError> {
    let format = ContentFormat::from_path(path)
        .ok_or_else(|| ManifestError::UnsupportedFormat(path.to_path_buf()))?;
    let contents = fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    ContentFile::parse(&contents, format)?.into_registry()
}

pub fn export(registry: &Registry, format: ContentFormat) -> Result<String, ManifestError> {
    ContentFile::from(registry).render(format)
}

impl From<TextRecord> for Localized {
    fn from(record: TextRecord) -> Self {
        match record {
            TextRecord::Plain(message) => Localized::literal(message),
            TextRecord::Keyed { key, message } => Localized::new(key, message),
        }
    }
}

impl From<&Localized> for TextRecord {
    fn from(text: &Localized) -> Self {
        match &text.key {
            Some(key) => TextRecord::Keyed {
                key: key.clone(),
                message: text.message.clone(),
            },
            None => TextRecord::Plain(text.message.clone()),
        }
    }
}

impl From<DescriptionRecord> for Description {
    fn from(record: DescriptionRecord) -> Self {
        match record {
            DescriptionRecord::Plain(message) => Description::new(Localized::literal(message)),
            DescriptionRecord::Rich {
                key,
                message,
                buttons,
            } => Description {
                text: Localized { key, message },
                buttons: buttons
                    .into_iter()
                    .map(|button| Button::new(button.label.into(), button.target))
                    .collect(),
            },
        }
    }
}

impl From<&Description> for DescriptionRecord {
    fn from(description: &Description) -> Self {
        if description.text.key.is_none() && description.buttons.is_empty() {
            return DescriptionRecord::Plain(description.text.message.clone());
        }
        DescriptionRecord::Rich {
            key: description.text.key.clone(),
            message: description.text.message.clone(),
            buttons: description
                .buttons
                .iter()
                .map(|button| ButtonRecord {
                    label: TextRecord::from(&button.label),
                    target: button.target.clone(),
                })
                .collect(),
        }
    }
}

impl IconRecord {
    fn into_definition(self) -> Result<IconDefinition, ManifestError> {
        let default =
            Codicon::from_id(&self.default).ok_or_else(|| ManifestError::UnknownCodicon {
                icon: self.id.clone(),
                glyph: self.default.clone(),
            })?;
        Ok(IconDefinition::new(self.id, default, self.description.into()))
    }
}

impl From<&IconDefinition> for IconRecord {
    fn from(icon: &IconDefinition) -> Self {
        IconRecord {
            id: icon.id.clone(),
            default: icon.default.id().to_string(),
            description: TextRecord::from(&icon.description),
        }
    }
}

impl StartEntryRecord {
    fn into_entry(self) -> StartEntry {
        StartEntry {
            id: self.id,
            title: self.title.into(),
            description: self.description.into(),
            icon: ThemeIcon::new(self.icon),
            when: self.when.map(When::new),
            command: self.command,
        }
    }
}

impl From<&StartEntry> for StartEntryRecord {
    fn from(entry: &StartEntry) -> Self {
        StartEntryRecord {
            id: entry.id.clone(),
            icon: entry.icon.id.clone(),
            when: entry.when.as_ref().map(|w| w.as_str().to_string()),
            command: entry.command.clone(),
            title: TextRecord::from(&entry.title),
            description: DescriptionRecord::from(&entry.description),
        }
    }
}

impl CategoryRecord {
    /// Steps whose media is malformed are dropped and reported in `errors`
    fn into_category(self, errors: &mut Vec<ContentError>) -> Category {
        let mut steps = Vec::with_capacity(self.steps.len());
        for step in self.steps {
            let owner = step_owner(&self.id, &step.id);
            match step.media.into_media(&owner) {
                Ok(media) => steps.push(Step {
                    id: step.id,
                    title: step.title.into(),
                    description: step.description.into(),
                    completion_events: step
                        .completion_events
                        .into_iter()
                        .map(CompletionEvent::new)
                        .collect(),
                    when: step.when.map(When::new),
                    media,
                }),
                Err(error) => errors.push(error),
            }
        }

        Category {
            id: self.id,
            title: self.title.into(),
            description: self.description.into(),
            is_featured: self.is_featured,
            next: self.next,
            icon: ThemeIcon::new(self.icon),
            when: self.when.map(When::new),
            steps,
        }
    }
}

impl From<&Category> for CategoryRecord {
    fn from(category: &Category) -> Self {
        CategoryRecord {
            id: category.id.clone(),
            is_featured: category.is_featured,
            next: category.next.clone(),
            icon: category.icon.id.clone(),
            when: category.when.as_ref().map(|w| w.as_str().to_string()),
            title: TextRecord::from(&category.title),
            description: DescriptionRecord::from(&category.description),
            steps: category.steps.iter().map(StepRecord::from).collect(),
        }
    }
}

impl From<&Step> for StepRecord {
    fn from(step: &Step) -> Self {
        StepRecord {
            id: step.id.clone(),
            when: step.when.as_ref().map(|w| w.as_str().to_string()),
            completion_events: step
                .completion_events
                .iter()
                .map(|event| event.as_str().to_string())
                .collect(),
            title: TextRecord::from(&step.title),
            description: DescriptionRecord::from(&step.description),
            media: MediaRecord::from(&step.media),
        }
    }
}

impl MediaRecord {
    fn into_media(self, owner: &str) -> Result<Media, ContentError> {
        let shape = |reason: String| ContentError::MediaShape {
            owner: owner.to_string(),
            reason,
        };

        let declared = self
            .kind
            .ok_or_else(|| shape("media type is missing".to_string()))?;
        let kind = MediaKind::parse(&declared)
            .ok_or_else(|| shape(format!("unknown media type '{declared}'")))?;

        let missing = |field: &'static str| ContentError::MissingMediaField {
            owner: owner.to_string(),
            kind,
            field,
        };

        match kind {
            MediaKind::Image => {
                let path = match self.path.ok_or_else(|| missing("path"))? {
                    PathRecord::Single(path) => ImagePath::Single(path),
                    PathRecord::Themed {
                        hc,
                        hc_light,
                        light,
                        dark,
                    } => ImagePath::Themed {
                        hc,
                        hc_light,
                        light,
                        dark,
                    },
                };
                let alt_text = self.alt_text.ok_or_else(|| missing("altText"))?;
                Ok(Media::Image { path, alt_text })
            }
            MediaKind::Svg => {
                let path = match self.path.ok_or_else(|| missing("path"))? {
                    PathRecord::Single(path) => path,
                    PathRecord::Themed { .. } => {
                        return Err(shape(
                            "per-theme paths are only valid for image media, not svg".to_string(),
                        ));
                    }
                };
                let alt_text = self.alt_text.ok_or_else(|| missing("altText"))?;
                Ok(Media::Svg { path, alt_text })
            }
            MediaKind::Markdown => {
                if self.alt_text.is_some() {
                    return Err(shape(
                        "altText belongs to image or svg media, not markdown".to_string(),
                    ));
                }
                match self.path.ok_or_else(|| missing("path"))? {
                    PathRecord::Single(path) => Ok(Media::Markdown { path }),
                    PathRecord::Themed { .. } => Err(shape(
                        "per-theme paths are only valid for image media, not markdown"
                            .to_string(),
                    )),
                }
            }
        }
    }
}

impl From<&Media> for MediaRecord {
    fn from(media: &Media) -> Self {
        let path = match media {
            Media::Image {
                path: ImagePath::Single(path),
                ..
            }
            | Media::Svg { path, .. }
            | Media::Markdown { path } => PathRecord::Single(path.clone()),
            Media::Image {
                path:
                    ImagePath::Themed {
                        hc,
                        hc_light,
                        light,
                        dark,
                    },
                ..
            } => PathRecord::Themed {
                hc: hc.clone(),
                hc_light: hc_light.clone(),
                light: light.clone(),
                dark: dark.clone(),
            },
        };

        MediaRecord {
            kind: Some(media.kind().as_str().to_string()),
            alt_text: media.alt_text().map(str::to_string),
            path: Some(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[[startEntries]]
id = "openFolder"
icon = "folder-opened"
command = "command:workbench.action.files.openFolder"
title = { key = "openFolder.title", message = "Open Folder..." }
description = "Open a folder to start working"

[[walkthroughs]]
id = "A"
isFeatured = true
next = "B"
icon = "zap"
title = "First"
description = { key = "a.description", message = "Start here.\n{0}", buttons = [{ label = "Open Settings", target = "command:toSide:workbench.action.openSettings" }] }

[[walkthroughs.steps]]
id = "theme"
completionEvents = ["onCommand:workbench.action.selectTheme"]
title = "Choose your theme"
description = "Pick one"
media = { type = "image", altText = "Theme picker", path = { hc = "hc.png", light = "light.png", dark = "dark.png" } }

[[walkthroughs]]
id = "B"
icon = "lightbulb"
title = "Second"
description = ""

[[walkthroughs.steps]]
id = "docs"
title = "Read the docs"
description = "More reading"
media = { type = "markdown", path = "docs" }
"#;

    fn parse_sample(contents: &str) -> Result<Registry, ManifestError> {
        ContentFile::parse(contents, ContentFormat::Toml)?.into_registry()
    }

    fn sample_with(replace: &str, with: &str) -> Result<Registry, ManifestError> {
        parse_sample(&SAMPLE.replace(replace, with))
    }

    #[test]
    fn loads_toml_content() {
        let registry = parse_sample(SAMPLE).unwrap();

        let entry = registry.start_entry("openFolder").unwrap();
        assert_eq!(entry.title.key.as_deref(), Some("openFolder.title"));
        assert!(entry.target().unwrap().is_command());

        let first = registry.category("A").unwrap();
        assert!(first.is_featured);
        assert_eq!(
            first.description.render(),
            "Start here.\n[Open Settings](command:toSide:workbench.action.openSettings)"
        );
        let theme = &first.steps[0];
        assert_eq!(theme.media.kind(), MediaKind::Image);
        assert_eq!(theme.completion_events.len(), 1);

        let ids: Vec<_> = registry.walkthroughs().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B"]);
    }

    #[test]
    fn dangling_next_rejects_the_file() {
        let error = sample_with("next = \"B\"", "next = \"C\"").unwrap_err();
        match error {
            ManifestError::Invalid(errors) => assert_eq!(
                errors.errors(),
                &[ContentError::DanglingNext {
                    category: "A".into(),
                    next: "C".into()
                }]
            ),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn themed_path_with_svg_type_is_a_shape_error() {
        let error = sample_with("type = \"image\"", "type = \"svg\"").unwrap_err();
        match error {
            ManifestError::Invalid(errors) => assert!(matches!(
                errors.errors(),
                [ContentError::MediaShape { owner, .. }] if owner == "A/theme"
            )),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn shape_errors_do_not_hide_other_errors() {
        let contents = SAMPLE
            .replace("type = \"image\"", "type = \"svg\"")
            .replace("next = \"B\"", "next = \"C\"")
            .replace("id = \"B\"", "id = \"A\"");

        let errors = match parse_sample(&contents).unwrap_err() {
            ManifestError::Invalid(errors) => errors.0,
            other => panic!("expected validation errors, got {other}"),
        };
        assert!(matches!(
            &errors[0],
            ContentError::MediaShape { owner, .. } if owner == "A/theme"
        ));
        assert!(errors.contains(&ContentError::DuplicateCategory { id: "A".into() }));
        assert!(errors.contains(&ContentError::DanglingNext {
            category: "A".into(),
            next: "C".into()
        }));
    }

    #[test]
    fn markdown_media_rejects_alt_text() {
        let error = sample_with(
            "{ type = \"markdown\", path = \"docs\" }",
            "{ type = \"markdown\", path = \"docs\", altText = \"Docs\" }",
        )
        .unwrap_err();
        assert!(matches!(error, ManifestError::Invalid(_)));
    }

    #[test]
    fn missing_media_fields_are_reported() {
        let record = MediaRecord {
            kind: Some("svg".into()),
            alt_text: None,
            path: Some(PathRecord::Single("x.svg".into())),
        };
        assert_eq!(
            record.into_media("A/x"),
            Err(ContentError::MissingMediaField {
                owner: "A/x".into(),
                kind: MediaKind::Svg,
                field: "altText"
            })
        );

        let untyped = MediaRecord::default();
        assert!(matches!(
            untyped.into_media("A/x"),
            Err(ContentError::MediaShape { .. })
        ));

        let unknown = MediaRecord {
            kind: Some("video".into()),
            ..MediaRecord::default()
        };
        assert!(matches!(
            unknown.into_media("A/x"),
            Err(ContentError::MediaShape { reason, .. }) if reason.contains("video")
        ));
    }

    #[test]
    fn unknown_icon_default_is_rejected() {
        let file = ContentFile {
            icons: vec![IconRecord {
                id: "custom".into(),
                default: "sparkle-unknown".into(),
                description: TextRecord::Plain("Custom".into()),
            }],
            ..ContentFile::default()
        };
        assert!(matches!(
            file.into_registry(),
            Err(ManifestError::UnknownCodicon { .. })
        ));
    }

    #[test]
    fn builtin_round_trips_through_json() {
        let builtin = Registry::builtin();
        let json = export(builtin, ContentFormat::Json).unwrap();
        let reloaded = ContentFile::parse(&json, ContentFormat::Json)
            .unwrap()
            .into_registry()
            .unwrap();
        assert_eq!(&reloaded, builtin);
    }

    #[test]
    fn builtin_round_trips_through_toml() {
        let builtin = Registry::builtin();
        let toml = export(builtin, ContentFormat::Toml).unwrap();
        let reloaded = ContentFile::parse(&toml, ContentFormat::Toml)
            .unwrap()
            .into_registry()
            .unwrap();
        assert_eq!(&reloaded, builtin);
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(
            ContentFormat::from_path(Path::new("content/welcome.TOML")),
            Some(ContentFormat::Toml)
        );
        assert_eq!(
            ContentFormat::from_path(Path::new("welcome.json")),
            Some(ContentFormat::Json)
        );
        assert_eq!(ContentFormat::from_path(Path::new("welcome.yaml")), None);
        assert!(matches!(
            load(Path::new("welcome.yaml")),
            Err(ManifestError::UnsupportedFormat(_))
        ));
    }
}
