use std::sync::OnceLock;

use super::builtin;
use crate::ui::codicon::Codicon;

use super::model::{Category, IconDefinition, StartEntry, Step, ThemeIcon};
use super::validate::{self, ValidationErrors, ValidationReport};

/// Ordered, read-only welcome content handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    icons: Vec<IconDefinition>,
    start_entries: Vec<StartEntry>,
    walkthroughs: Vec<Category>,
}

/// Built-in content, constructed on first access
static BUILTIN: OnceLock<Registry> = OnceLock::new();

impl Registry {
    pub fn new(
        icons: Vec<IconDefinition>,
        start_entries: Vec<StartEntry>,
        walkthroughs: Vec<Category>,
    ) -> Self {
        Self {
            icons,
            start_entries,
            walkthroughs,
        }
    }

    pub fn builtin() -> &'static Registry {
        BUILTIN.get_or_init(|| {
            Registry::new(
                builtin::icons(),
                builtin::start_entries(),
                builtin::walkthroughs(),
            )
        })
    }

    pub fn icons(&self) -> &[IconDefinition] {
        &self.icons
    }

    pub fn start_entries(&self) -> &[StartEntry] {
        &self.start_entries
    }

    pub fn walkthroughs(&self) -> &[Category] {
        &self.walkthroughs
    }

    pub fn icon_definition(&self, id: &str) -> Option<&IconDefinition> {
        self.icons.iter().find(|icon| icon.id == id)
    }

    /// Glyph for an icon reference: a codicon directly, or a definition's default
    pub fn glyph(&self, icon: &ThemeIcon) -> Option<Codicon> {
        icon.codicon()
            .or_else(|| self.icon_definition(&icon.id).map(|definition| definition.default))
    }

    pub fn start_entry(&self, id: &str) -> Option<&StartEntry> {
        self.start_entries.iter().find(|entry| entry.id == id)
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.walkthroughs.iter().find(|category| category.id == id)
    }

    pub fn step(&self, category: &str, step: &str) -> Option<&Step> {
        self.category(category)?.step_by_id(step)
    }

    /// Walkthrough suggested after `category`, if it names one that exists
    pub fn next_category(&self, category: &Category) -> Option<&Category> {
        category.next.as_deref().and_then(|next| self.category(next))
    }

    pub fn featured(&self) -> impl Iterator<Item = &Category> {
        self.walkthroughs.iter().filter(|category| category.is_featured)
    }

    pub fn step_count(&self) -> usize {
        self.walkthroughs
            .iter()
            .map(|category| category.steps.len())
            .sum()
    }

    pub fn validate(&self) -> ValidationReport {
        validate::validate(self)
    }

    /// Consumes the registry, keeping it only if it has no validation errors
    pub fn validated(self) -> Result<Self, ValidationErrors> {
        self.validate().into_result()?;
        Ok(self)
    }
}
