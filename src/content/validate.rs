//! Authoring checks for welcome content
//!
//! Errors are structural defects (duplicate ids, dangling `next` references,
//! malformed links, media missing required fields). Warnings flag content that
//! renders but looks unfinished, such as a step whose illustration path is empty.

use std::collections::HashSet;
use std::fmt;

use thiserror::Error;

use super::link::{self, LinkError, LinkTarget};
use super::model::{Category, Description, MediaKind, StartEntry, Step};
use super::registry::Registry;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    #[error("{owner}: id is empty")]
    EmptyId { owner: String },

    #[error("duplicate start entry id '{id}'")]
    DuplicateStartEntry { id: String },

    #[error("duplicate icon id '{id}'")]
    DuplicateIcon { id: String },

    #[error("duplicate walkthrough id '{id}'")]
    DuplicateCategory { id: String },

    #[error("{category}: duplicate step id '{step}'")]
    DuplicateStep { category: String, step: String },

    #[error("{category}: next walkthrough '{next}' does not exist")]
    DanglingNext { category: String, next: String },

    #[error("{owner}: {kind} media is missing {field}")]
    MissingMediaField {
        owner: String,
        kind: MediaKind,
        field: &'static str,
    },

    #[error("{owner}: invalid media ({reason})")]
    MediaShape { owner: String, reason: String },

    #[error("{owner}: completion event #{index} is empty")]
    EmptyCompletionEvent { owner: String, index: usize },

    #[error("{owner}: when clause is empty")]
    EmptyWhen { owner: String },

    #[error("{owner}: icon reference is empty")]
    EmptyIcon { owner: String },

    #[error("{owner}: {source}")]
    InvalidLink { owner: String, source: LinkError },

    #[error("{owner}: start entry command must be a command: link, got '{target}'")]
    NonCommandEntry { owner: String, target: String },

    #[error("{owner}: placeholder {{{index}}} has no button")]
    MissingButton { owner: String, index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentWarning {
    /// Media with an empty path; hosts show the step without an illustration
    PlaceholderMedia { owner: String, kind: MediaKind },
    UnusedButton { owner: String, index: usize },
    SelfNext { category: String },
}

impl ContentWarning {
    pub fn code(&self) -> &'static str {
        match self {
            ContentWarning::PlaceholderMedia { .. } => "placeholder_media",
            ContentWarning::UnusedButton { .. } => "unused_button",
            ContentWarning::SelfNext { .. } => "self_next",
        }
    }
}

impl fmt::Display for ContentWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentWarning::PlaceholderMedia { owner, kind } => {
                write!(f, "{owner}: {kind} media path is empty (placeholder)")
            }
            ContentWarning::UnusedButton { owner, index } => {
                write!(f, "{owner}: button {index} is not referenced by the description")
            }
            ContentWarning::SelfNext { category } => {
                write!(f, "{category}: next walkthrough points at itself")
            }
        }
    }
}

/// Non-empty list of errors that made content unusable
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{} content error(s): {}", .0.len(), join_errors(.0))]
pub struct ValidationErrors(pub Vec<ContentError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[ContentError] {
        &self.0
    }
}

fn join_errors(errors: &[ContentError]) -> String {
    errors
        .iter()
        .map(|error| error.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<ContentError>,
    pub warnings: Vec<ContentWarning>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    /// Whether the content should be rejected; strict mode also rejects warnings
    pub fn failed(&self, strict: bool) -> bool {
        !self.errors.is_empty() || (strict && !self.warnings.is_empty())
    }

    pub fn into_result(self) -> Result<Vec<ContentWarning>, ValidationErrors> {
        if self.errors.is_empty() {
            Ok(self.warnings)
        } else {
            Err(ValidationErrors(self.errors))
        }
    }

    fn error(&mut self, error: ContentError) {
        self.errors.push(error);
    }

    fn warn(&mut self, warning: ContentWarning) {
        self.warnings.push(warning);
    }
}

pub fn step_owner(category: &str, step: &str) -> String {
    format!("{category}/{step}")
}

pub fn entry_owner(id: &str) -> String {
    format!("start:{id}")
}

pub fn validate(registry: &Registry) -> ValidationReport {
    let mut report = ValidationReport::default();

    let mut icon_ids = HashSet::new();
    for (index, icon) in registry.icons().iter().enumerate() {
        if icon.id.trim().is_empty() {
            report.error(ContentError::EmptyId {
                owner: format!("icon #{index}"),
            });
        } else if !icon_ids.insert(icon.id.as_str()) {
            report.error(ContentError::DuplicateIcon {
                id: icon.id.clone(),
            });
        }
    }

    let mut entry_ids = HashSet::new();
    for (index, entry) in registry.start_entries().iter().enumerate() {
        if !entry.id.is_empty() && !entry_ids.insert(entry.id.as_str()) {
            report.error(ContentError::DuplicateStartEntry {
                id: entry.id.clone(),
            });
        }
        check_start_entry(index, entry, &mut report);
    }

    let category_ids: HashSet<&str> = registry
        .walkthroughs()
        .iter()
        .map(|category| category.id.as_str())
        .collect();

    let mut seen = HashSet::new();
    for (index, category) in registry.walkthroughs().iter().enumerate() {
        if !category.id.is_empty() && !seen.insert(category.id.as_str()) {
            report.error(ContentError::DuplicateCategory {
                id: category.id.clone(),
            });
        }
        check_category(index, category, &category_ids, &mut report);
    }

    report
}

fn check_start_entry(index: usize, entry: &StartEntry, report: &mut ValidationReport) {
    let owner = if entry.id.is_empty() {
        report.error(ContentError::EmptyId {
            owner: format!("start entry #{index}"),
        });
        format!("start entry #{index}")
    } else {
        entry_owner(&entry.id)
    };

    if entry.icon.id.trim().is_empty() {
        report.error(ContentError::EmptyIcon {
            owner: owner.clone(),
        });
    }
    if entry.when.as_ref().is_some_and(|w| w.as_str().trim().is_empty()) {
        report.error(ContentError::EmptyWhen {
            owner: owner.clone(),
        });
    }

    match LinkTarget::parse(&entry.command) {
        Ok(target) if target.is_command() => {}
        Ok(_) => report.error(ContentError::NonCommandEntry {
            owner: owner.clone(),
            target: entry.command.clone(),
        }),
        Err(source) => report.error(ContentError::InvalidLink {
            owner: owner.clone(),
            source,
        }),
    }

    check_description(&owner, &entry.description, report);
}

fn check_category(
    index: usize,
    category: &Category,
    category_ids: &HashSet<&str>,
    report: &mut ValidationReport,
) {
    let owner = if category.id.is_empty() {
        report.error(ContentError::EmptyId {
            owner: format!("walkthrough #{index}"),
        });
        format!("walkthrough #{index}")
    } else {
        category.id.clone()
    };

    if let Some(next) = &category.next {
        if *next == category.id {
            report.warn(ContentWarning::SelfNext {
                category: owner.clone(),
            });
        } else if !category_ids.contains(next.as_str()) {
            report.error(ContentError::DanglingNext {
                category: owner.clone(),
                next: next.clone(),
            });
        }
    }

    if category.icon.id.trim().is_empty() {
        report.error(ContentError::EmptyIcon {
            owner: owner.clone(),
        });
    }
    if category.when.as_ref().is_some_and(|w| w.as_str().trim().is_empty()) {
        report.error(ContentError::EmptyWhen {
            owner: owner.clone(),
        });
    }
    check_description(&owner, &category.description, report);

    // Step ids only need to be unique inside their own walkthrough.
    let mut step_ids = HashSet::new();
    for (step_index, step) in category.steps.iter().enumerate() {
        if !step.id.is_empty() && !step_ids.insert(step.id.as_str()) {
            report.error(ContentError::DuplicateStep {
                category: owner.clone(),
                step: step.id.clone(),
            });
        }
        check_step(&owner, step_index, step, report);
    }
}

fn check_step(category: &str, index: usize, step: &Step, report: &mut ValidationReport) {
    let owner = if step.id.is_empty() {
        let owner = step_owner(category, &format!("#{index}"));
        report.error(ContentError::EmptyId {
            owner: owner.clone(),
        });
        owner
    } else {
        step_owner(category, &step.id)
    };

    if step.when.as_ref().is_some_and(|w| w.as_str().trim().is_empty()) {
        report.error(ContentError::EmptyWhen {
            owner: owner.clone(),
        });
    }

    for (event_index, event) in step.completion_events.iter().enumerate() {
        if event.as_str().trim().is_empty() {
            report.error(ContentError::EmptyCompletionEvent {
                owner: owner.clone(),
                index: event_index,
            });
        }
    }

    let kind = step.media.kind();
    if step.media.alt_text().is_some_and(|alt| alt.trim().is_empty()) {
        report.error(ContentError::MissingMediaField {
            owner: owner.clone(),
            kind,
            field: "altText",
        });
    }
    if step.media.is_placeholder() {
        report.warn(ContentWarning::PlaceholderMedia {
            owner: owner.clone(),
            kind,
        });
    }

    check_description(&owner, &step.description, report);
}

fn check_description(owner: &str, description: &Description, report: &mut ValidationReport) {
    let placeholders = description.placeholders();

    for index in &placeholders {
        if *index >= description.buttons.len() {
            report.error(ContentError::MissingButton {
                owner: owner.to_string(),
                index: *index,
            });
        }
    }

    for (index, button) in description.buttons.iter().enumerate() {
        if !placeholders.contains(&index) {
            report.warn(ContentWarning::UnusedButton {
                owner: owner.to_string(),
                index,
            });
        }
        if let Err(source) = LinkTarget::parse(&button.target) {
            report.error(ContentError::InvalidLink {
                owner: owner.to_string(),
                source,
            });
        }
    }

    for inline in link::extract_links(&description.text.message) {
        if let Err(source) = inline.parse_target() {
            report.error(ContentError::InvalidLink {
                owner: owner.to_string(),
                source,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::builtin;
    use crate::content::model::{Button, IconDefinition, Localized, Media, ThemeIcon};
    use crate::ui::codicon::Codicon;

    fn category(id: &str) -> Category {
        Category::new(
            id,
            Localized::literal(id),
            Localized::literal(""),
            Codicon::Zap.into(),
        )
        .step(step("only"))
    }

    fn step(id: &str) -> Step {
        Step::new(
            id,
            Localized::literal(id),
            Localized::literal(""),
            Media::svg("illustration.svg", "An illustration"),
        )
    }

    fn registry(walkthroughs: Vec<Category>) -> Registry {
        Registry::new(Vec::new(), Vec::new(), walkthroughs)
    }

    #[test]
    fn next_must_reference_existing_walkthrough() {
        let valid = registry(vec![category("A").next("B"), category("B")]);
        assert!(validate(&valid).is_clean());

        let dangling = registry(vec![category("A").next("C"), category("B")]);
        let report = validate(&dangling);
        assert_eq!(
            report.errors,
            vec![ContentError::DanglingNext {
                category: "A".into(),
                next: "C".into()
            }]
        );
    }

    #[test]
    fn self_next_is_only_a_warning() {
        let report = validate(&registry(vec![category("A").next("A")]));
        assert!(report.errors.is_empty());
        assert_eq!(
            report.warnings,
            vec![ContentWarning::SelfNext {
                category: "A".into()
            }]
        );
        assert!(!report.failed(false));
        assert!(report.failed(true));
    }

    #[test]
    fn duplicate_ids_are_scoped() {
        let shared_step_ids = registry(vec![category("A"), category("B")]);
        assert!(validate(&shared_step_ids).errors.is_empty());

        let duplicated = registry(vec![category("A").step(step("only")), category("A")]);
        let errors = validate(&duplicated).errors;
        assert!(errors.contains(&ContentError::DuplicateStep {
            category: "A".into(),
            step: "only".into()
        }));
        assert!(errors.contains(&ContentError::DuplicateCategory { id: "A".into() }));
    }

    #[test]
    fn duplicate_start_entries_are_rejected() {
        let entry = StartEntry::new(
            "open",
            Localized::literal("Open"),
            Localized::literal("Open something"),
            Codicon::FolderOpened.into(),
            "command:workbench.action.files.openFolder",
        );
        let registry = Registry::new(Vec::new(), vec![entry.clone(), entry], Vec::new());
        assert_eq!(
            validate(&registry).errors,
            vec![ContentError::DuplicateStartEntry { id: "open".into() }]
        );
    }

    #[test]
    fn icon_ids_must_be_unique_and_present() {
        let icons = vec![
            IconDefinition::new("custom", Codicon::Zap, Localized::literal("Custom")),
            IconDefinition::new("custom", Codicon::Lightbulb, Localized::literal("Again")),
            IconDefinition::new("", Codicon::Lightbulb, Localized::literal("Nameless")),
        ];
        let registry = Registry::new(icons, Vec::new(), Vec::new());
        assert_eq!(
            validate(&registry).errors,
            vec![
                ContentError::DuplicateIcon {
                    id: "custom".into()
                },
                ContentError::EmptyId {
                    owner: "icon #2".into()
                },
            ]
        );
    }

    #[test]
    fn start_entry_commands_must_be_command_links() {
        let entry = StartEntry::new(
            "docs",
            Localized::literal("Docs"),
            Localized::literal(""),
            ThemeIcon::new(""),
            "https://example.com",
        );
        let errors = validate(&Registry::new(Vec::new(), vec![entry], Vec::new())).errors;
        assert!(errors.contains(&ContentError::NonCommandEntry {
            owner: "start:docs".into(),
            target: "https://example.com".into()
        }));
        assert!(errors.contains(&ContentError::EmptyIcon {
            owner: "start:docs".into()
        }));
    }

    #[test]
    fn empty_media_path_warns_but_empty_alt_text_fails() {
        let placeholder = category("A").step(Step::new(
            "draft",
            Localized::literal("Draft"),
            Localized::literal(""),
            Media::svg("", "Draft illustration"),
        ));
        let report = validate(&registry(vec![placeholder]));
        assert!(report.errors.is_empty());
        assert_eq!(
            report.warnings,
            vec![ContentWarning::PlaceholderMedia {
                owner: "A/draft".into(),
                kind: MediaKind::Svg
            }]
        );

        let missing_alt = category("A").step(Step::new(
            "bare",
            Localized::literal("Bare"),
            Localized::literal(""),
            Media::image("bare.png", " "),
        ));
        assert_eq!(
            validate(&registry(vec![missing_alt])).errors,
            vec![ContentError::MissingMediaField {
                owner: "A/bare".into(),
                kind: MediaKind::Image,
                field: "altText"
            }]
        );
    }

    #[test]
    fn descriptions_need_a_button_per_placeholder() {
        let description = Description::new(Localized::literal("Try it.\n{0} {1}")).button(
            Button::new(Localized::literal("Run"), "command:run.it"),
        );
        let with_gap = category("A").step(Step::new(
            "gap",
            Localized::literal("Gap"),
            description,
            Media::markdown("doc"),
        ));
        assert_eq!(
            validate(&registry(vec![with_gap])).errors,
            vec![ContentError::MissingButton {
                owner: "A/gap".into(),
                index: 1
            }]
        );
    }

    #[test]
    fn oversized_placeholder_needs_a_button() {
        let overflowing = category("A").step(Step::new(
            "huge",
            Localized::literal("Huge"),
            Localized::literal("x {99999999999999999999999}"),
            Media::markdown("doc"),
        ));
        assert_eq!(
            validate(&registry(vec![overflowing])).errors,
            vec![ContentError::MissingButton {
                owner: "A/huge".into(),
                index: usize::MAX
            }]
        );
    }

    #[test]
    fn unused_buttons_and_bad_targets() {
        let description = Description::new(Localized::literal("No placeholder here"))
            .button(Button::new(Localized::literal("Broken"), "ftp://example.com"));
        let broken = category("A").step(Step::new(
            "broken",
            Localized::literal("Broken"),
            description,
            Media::markdown("doc"),
        ));
        let report = validate(&registry(vec![broken]));
        assert_eq!(
            report.warnings,
            vec![ContentWarning::UnusedButton {
                owner: "A/broken".into(),
                index: 0
            }]
        );
        assert!(matches!(
            report.errors.as_slice(),
            [ContentError::InvalidLink {
                source: LinkError::Unsupported(_),
                ..
            }]
        ));
    }

    #[test]
    fn blank_predicates_and_events_fail() {
        let blank = category("A").when("  ").step(
            step("events")
                .completion_event("onCommand:x")
                .completion_event("")
                .when(""),
        );
        let errors = validate(&registry(vec![blank])).errors;
        assert!(errors.contains(&ContentError::EmptyWhen { owner: "A".into() }));
        assert!(errors.contains(&ContentError::EmptyWhen {
            owner: "A/events".into()
        }));
        assert!(errors.contains(&ContentError::EmptyCompletionEvent {
            owner: "A/events".into(),
            index: 1
        }));
    }

    #[test]
    fn builtin_content_only_warns_about_placeholders() {
        let registry = Registry::new(
            builtin::icons(),
            builtin::start_entries(),
            builtin::walkthroughs(),
        );
        let report = validate(&registry);
        assert!(report.errors.is_empty(), "{:?}", report.errors);

        let placeholders: Vec<_> = report
            .warnings
            .iter()
            .map(|warning| match warning {
                ContentWarning::PlaceholderMedia { owner, .. } => owner.as_str(),
                other => panic!("unexpected warning: {other}"),
            })
            .collect();
        assert_eq!(
            placeholders,
            vec![
                "SetupWeb/reviewFindingsWeb",
                "Beginner/agents",
                "Beginner/assets",
                "Beginner/findings",
                "Beginner/actions",
                "Beginner/approvals",
            ]
        );
    }

    #[test]
    fn validation_errors_display_every_error() {
        let errors = ValidationErrors(vec![
            ContentError::DuplicateCategory { id: "A".into() },
            ContentError::MissingButton {
                owner: "A/x".into(),
                index: 2,
            },
        ]);
        assert_eq!(
            errors.to_string(),
            "2 content error(s): duplicate walkthrough id 'A'; A/x: placeholder {2} has no button"
        );
    }
}
