//! Link targets embedded in welcome content
//!
//! Descriptions carry buttons as markdown links, `[label](target)`, and start
//! entries carry a `command:` link. Targets are classified here; running them
//! is up to the host.

use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

const COMMAND_SCHEME: &str = "command:";
const TO_SIDE_PREFIX: &str = "toSide:";

static LINK_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
static PLACEHOLDER_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();

fn link_pattern() -> Option<&'static Regex> {
    LINK_PATTERN
        .get_or_init(|| Regex::new(r"\[([^\]]*)\]\(([^)\s]*)\)").ok())
        .as_ref()
}

fn placeholder_pattern() -> Option<&'static Regex> {
    PLACEHOLDER_PATTERN
        .get_or_init(|| Regex::new(r"\{(\d+)\}").ok())
        .as_ref()
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinkError {
    #[error("link target is empty")]
    Empty,

    #[error("command link '{0}' has no command id")]
    MissingCommand(String),

    #[error("unsupported link target '{0}' (expected command: or http(s) URL)")]
    Unsupported(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// `command:<id>`, or `command:toSide:<id>` to open beside the welcome page
    Command { id: String, to_side: bool },
    External(String),
}

impl LinkTarget {
    pub fn parse(target: &str) -> Result<LinkTarget, LinkError> {
        let target = target.trim();
        if target.is_empty() {
            return Err(LinkError::Empty);
        }

        if let Some(rest) = target.strip_prefix(COMMAND_SCHEME) {
            let (id, to_side) = match rest.strip_prefix(TO_SIDE_PREFIX) {
                Some(id) => (id, true),
                None => (rest, false),
            };
            if id.is_empty() {
                return Err(LinkError::MissingCommand(target.to_string()));
            }
            return Ok(LinkTarget::Command {
                id: id.to_string(),
                to_side,
            });
        }

        let is_web = ["https://", "http://"].iter().any(|scheme| {
            target
                .strip_prefix(scheme)
                .is_some_and(|host| !host.is_empty())
        });
        if is_web {
            Ok(LinkTarget::External(target.to_string()))
        } else {
            Err(LinkError::Unsupported(target.to_string()))
        }
    }

    pub fn is_command(&self) -> bool {
        matches!(self, LinkTarget::Command { .. })
    }
}

impl std::fmt::Display for LinkTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LinkTarget::Command { id, to_side: true } => write!(f, "{COMMAND_SCHEME}{TO_SIDE_PREFIX}{id}"),
            LinkTarget::Command { id, to_side: false } => write!(f, "{COMMAND_SCHEME}{id}"),
            LinkTarget::External(url) => f.write_str(url),
        }
    }
}

/// A `[label](target)` occurrence in rendered text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub label: String,
    pub target: String,
}

impl Link {
    pub fn parse_target(&self) -> Result<LinkTarget, LinkError> {
        LinkTarget::parse(&self.target)
    }
}

pub fn extract_links(text: &str) -> Vec<Link> {
    let Some(re) = link_pattern() else {
        return Vec::new();
    };

    re.captures_iter(text)
        .map(|caps| Link {
            label: caps[1].to_string(),
            target: caps[2].to_string(),
        })
        .collect()
}

/// `{n}` placeholders with their byte ranges, in template order
pub fn placeholders(template: &str) -> Vec<(Range<usize>, usize)> {
    let Some(re) = placeholder_pattern() else {
        return Vec::new();
    };

    re.captures_iter(template)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            // Digits only, so parsing fails only on overflow; no button can match.
            let index = caps[1].parse::<usize>().unwrap_or(usize::MAX);
            Some((whole.range(), index))
        })
        .collect()
}
