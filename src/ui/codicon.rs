/// Product icon glyphs referenced by the welcome content
///
/// Only the glyphs the built-in walkthroughs use are listed. Nerd Fonts ship
/// the codicon set at the upstream code points, so the glyphs render in any
/// patched terminal font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Codicon {
    GoToFile,     // 
    FolderOpened, // 
    Checklist,    // 
    Remote,       // 
    Zap,          // 
    Lightbulb,    // 
}

impl Codicon {
    pub const ALL: &'static [Codicon] = &[
        Codicon::GoToFile,
        Codicon::FolderOpened,
        Codicon::Checklist,
        Codicon::Remote,
        Codicon::Zap,
        Codicon::Lightbulb,
    ];

    /// Identifier used by theme icon references
    pub const fn id(&self) -> &'static str {
        match self {
            Self::GoToFile => "go-to-file",
            Self::FolderOpened => "folder-opened",
            Self::Checklist => "checklist",
            Self::Remote => "remote",
            Self::Zap => "zap",
            Self::Lightbulb => "lightbulb",
        }
    }

    pub const fn unicode(&self) -> char {
        match self {
            Self::GoToFile => '\u{ea94}',
            Self::FolderOpened => '\u{eaf7}',
            Self::Checklist => '\u{eb3b}',
            Self::Remote => '\u{eb3a}',
            Self::Zap => '\u{ea86}',
            Self::Lightbulb => '\u{ea61}',
        }
    }

    pub fn from_id(id: &str) -> Option<Codicon> {
        Self::ALL.iter().copied().find(|icon| icon.id() == id)
    }
}

impl std::fmt::Display for Codicon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.unicode())
    }
}

impl From<Codicon> for char {
    fn from(icon: Codicon) -> Self {
        icon.unicode()
    }
}
