//! Welcome page content: start entries and walkthroughs
//!
//! Provides the built-in table, content-file loading, and authoring checks.
//! Visibility predicates, icons, commands and media paths are stored for the
//! host to evaluate and resolve; nothing here interprets them.

pub mod builtin;
pub mod link;
pub mod manifest;
pub mod model;
pub mod registry;
pub mod validate;

pub use link::{Link, LinkError, LinkTarget};
pub use manifest::{ContentFile, ContentFormat, ManifestError};
pub use model::{
    Button, Category, CompletionEvent, Description, IconDefinition, ImagePath, Localized, Media,
    MediaKind, StartEntry, Step, ThemeIcon, ThemeKind, When,
};
pub use registry::Registry;
pub use validate::{ContentError, ContentWarning, ValidationErrors, ValidationReport};
