//! Built-in welcome page content
//!
//! Declaration order is display order: entries appear on the start list in
//! the order below, and steps appear inside their walkthrough the same way.

use crate::ui::codicon::Codicon;

use super::model::{
    Button, Category, Description, IconDefinition, Localized, Media, StartEntry, Step, ThemeIcon,
};

pub const SETUP_ICON: &str = "getting-started-setup";
pub const BEGINNER_ICON: &str = "getting-started-beginner";

/// Setting that opts a user into the notebook walkthrough
const NOTEBOOK_OPEN_GETTING_STARTED: &str = "notebook.experimental.openGettingStarted";

fn text(key: &str, message: &str) -> Localized {
    Localized::new(key, message)
}

fn button(key: &str, label: &str, target: &str) -> Button {
    Button::new(Localized::new(key, label), target)
}

/// Description with one trailing button substituted for `{0}`
fn with_button(key: &str, message: &str, button: Button) -> Description {
    Description::new(Localized::new(key, message)).button(button)
}

pub fn icons() -> Vec<IconDefinition> {
    vec![
        IconDefinition::new(
            SETUP_ICON,
            Codicon::Zap,
            text(
                "getting-started-setup-icon",
                "Icon used for the setup category of welcome page",
            ),
        ),
        IconDefinition::new(
            BEGINNER_ICON,
            Codicon::Lightbulb,
            text(
                "getting-started-beginner-icon",
                "Icon used for the beginner category of welcome page",
            ),
        ),
    ]
}

pub fn start_entries() -> Vec<StartEntry> {
    vec![
        StartEntry::new(
            "welcome.openAgentExplorer",
            text("gettingStarted.agentExplorer.title", "View agent sessions..."),
            text(
                "gettingStarted.agentExplorer.description",
                "View the SSH agent sessions established during the assessment.",
            ),
            Codicon::GoToFile.into(),
            "command:welcome.openAgentExplorer",
        ),
        StartEntry::new(
            "viewElements",
            text(
                "gettingStarted.viewElements.title",
                "View found assets and elements...",
            ),
            text(
                "gettingStarted.viewElements.description",
                "View the assets and elements discovered.",
            ),
            Codicon::GoToFile.into(),
            "command:workbench.view.extension.exploreViewContainer",
        )
        .when("isWeb || !isMac"),
        StartEntry::new(
            "viewFindings",
            text("gettingStarted.viewFindings.title", "View findings..."),
            text(
                "gettingStarted.viewFindings.description",
                "View findings from the assessment.",
            ),
            Codicon::GoToFile.into(),
            "command:workbench.view.extension.findingsViewContainer",
        )
        .when("isWeb || !isMac"),
        StartEntry::new(
            "viewActions",
            text(
                "gettingStarted.viewActions.title",
                "View assessment actions...",
            ),
            text(
                "gettingStarted.viewActions.description",
                "View the actions that were run against the assets found.",
            ),
            Codicon::GoToFile.into(),
            "command:workbench.view.extension.actionsViewContainer",
        )
        .when("isWeb || !isMac"),
        StartEntry::new(
            "topLevelOpenFolder",
            text("gettingStarted.openFolder.title", "Open Folder..."),
            text(
                "gettingStarted.openFolder.description",
                "Open a folder to start working",
            ),
            Codicon::FolderOpened.into(),
            "command:workbench.action.files.openFolder",
        )
        .when("!isWeb && !isMac"),
        StartEntry::new(
            "topLevelShowWalkthroughs",
            text(
                "gettingStarted.topLevelShowWalkthroughs.title",
                "Open a Walkthrough...",
            ),
            text(
                "gettingStarted.topLevelShowWalkthroughs.description",
                "View a walkthrough on the editor or an extension",
            ),
            Codicon::Checklist.into(),
            "command:welcome.showAllWalkthroughs",
        )
        .when("allWalkthroughsHidden"),
        StartEntry::new(
            "topLevelRemoteOpen",
            text("gettingStarted.topLevelRemoteOpen.title", "Connect to..."),
            text(
                "gettingStarted.topLevelRemoteOpen.description",
                "Connect to remote development workspaces.",
            ),
            Codicon::Remote.into(),
            "command:workbench.action.remote.showMenu",
        )
        .when("!isWeb"),
    ]
}

pub fn walkthroughs() -> Vec<Category> {
    vec![setup(), setup_web(), beginner(), notebooks()]
}

fn pick_color_theme(id: &str) -> Step {
    Step::new(
        id,
        text("gettingStarted.pickColor.title", "Choose your theme"),
        with_button(
            "gettingStarted.pickColor.description.interpolated",
            "The right theme helps you focus on your code, is easy on your eyes, and is simply more fun to use.\n{0}",
            button(
                "titleID",
                "Browse Color Themes",
                "command:workbench.action.selectTheme",
            ),
        ),
        Media::markdown("theme_picker"),
    )
    .completion_event("onSettingChanged:workbench.colorTheme")
    .completion_event("onCommand:workbench.action.selectTheme")
}

fn open_folder_step(id: &str, command: &str, when: &str) -> Step {
    Step::new(
        id,
        text("gettingStarted.setup.OpenFolder.title", "Open up your code"),
        with_button(
            "gettingStarted.setup.OpenFolder.description.interpolated",
            "You're all set to start coding. Open a project folder to get your files into VS Code.\n{0}",
            button("pickFolder", "Pick a Folder", command),
        ),
        Media::svg(
            "openFolder.svg",
            "Explorer view showing buttons for opening folder and cloning repository.",
        ),
    )
    .when(when)
}

fn setup() -> Category {
    Category::new(
        "Setup",
        text("gettingStarted.setup.title", "Get Started with VS Code"),
        text(
            "gettingStarted.setup.description",
            "Customize your editor, learn the basics, and start coding",
        ),
        ThemeIcon::new(SETUP_ICON),
    )
    .featured(true)
    .when("!isWeb")
    .next("Beginner")
    .step(pick_color_theme("pickColorTheme"))
    .step(
        Step::new(
            "extensionsWeb",
            text("gettingStarted.extensions.title", "Code with extensions"),
            with_button(
                "gettingStarted.extensionsWeb.description.interpolated",
                "Extensions are VS Code's power-ups. A growing number are becoming available in the web.\n{0}",
                button(
                    "browsePopularWeb",
                    "Browse Popular Web Extensions",
                    "command:workbench.extensions.action.showPopularExtensions",
                ),
            ),
            Media::svg(
                "extensions-web.svg",
                "VS Code extension marketplace with featured language extensions",
            ),
        )
        .when("workspacePlatform == 'webworker'"),
    )
    .step(Step::new(
        "settings",
        text("gettingStarted.settings.title", "Tune your settings"),
        with_button(
            "gettingStarted.settings.description.interpolated",
            "Customize every aspect of VS Code and your extensions to your liking. Commonly used settings are listed first to get you started.\n{0}",
            button(
                "tweakSettings",
                "Open Settings",
                "command:toSide:workbench.action.openSettings",
            ),
        ),
        Media::svg("settings.svg", "VS Code Settings"),
    ))
    .step(
        Step::new(
            "settingsSync",
            text(
                "gettingStarted.settingsSync.title",
                "Sync settings across devices",
            ),
            with_button(
                "gettingStarted.settingsSync.description.interpolated",
                "Keep your essential customizations backed up and updated across all your devices.\n{0}",
                button(
                    "enableSync",
                    "Backup and Sync Settings",
                    "command:workbench.userDataSync.actions.turnOn",
                ),
            ),
            Media::svg(
                "settingsSync.svg",
                "The \"Turn on Sync\" entry in the settings gear menu.",
            ),
        )
        .when("syncStatus != uninitialized")
        .completion_event("onEvent:sync-enabled"),
    )
    .step(Step::new(
        "commandPaletteTask",
        text(
            "gettingStarted.commandPalette.title",
            "Unlock productivity with the Command Palette ",
        ),
        with_button(
            "gettingStarted.commandPalette.description.interpolated",
            "Run commands without reaching for your mouse to accomplish any task in VS Code.\n{0}",
            button(
                "commandPalette",
                "Open Command Palette",
                "command:workbench.action.showCommands",
            ),
        ),
        Media::svg(
            "commandPalette.svg",
            "Command Palette overlay for searching and executing commands.",
        ),
    ))
    .step(open_folder_step(
        "pickAFolderTask-Mac",
        "command:workbench.action.files.openFileFolder",
        "isMac && workspaceFolderCount == 0",
    ))
    .step(open_folder_step(
        "pickAFolderTask-Other",
        "command:workbench.action.files.openFolder",
        "!isMac && workspaceFolderCount == 0",
    ))
    .step(
        Step::new(
            "quickOpen",
            text(
                "gettingStarted.quickOpen.title",
                "Quickly navigate between your files",
            ),
            with_button(
                "gettingStarted.quickOpen.description.interpolated",
                "Navigate between files in an instant with one keystroke. Tip: Open multiple files by pressing the right arrow key.\n{0}",
                button(
                    "quickOpen",
                    "Quick Open a File",
                    "command:toSide:workbench.action.quickOpen",
                ),
            ),
            Media::svg("search.svg", "Go to file in quick search."),
        )
        .when("workspaceFolderCount != 0"),
    )
    .step(Step::new(
        "videoTutorial",
        text("gettingStarted.videoTutorial.title", "Watch video tutorials"),
        with_button(
            "gettingStarted.videoTutorial.description.interpolated",
            "Watch the first in a series of short & practical video tutorials for VS Code's key features.\n{0}",
            button(
                "watch",
                "Watch Tutorial",
                "https://aka.ms/vscode-getting-started-video",
            ),
        ),
        Media::svg("learn.svg", "VS Code Settings"),
    ))
}

fn setup_web() -> Category {
    Category::new(
        "SetupWeb",
        text(
            "gettingStarted.setupWeb.title",
            "Welcome to the Enlight\u{2122} Amplify Environment",
        ),
        text(
            "gettingStarted.setupWeb.description",
            "View risks around your assets, map attack paths, and interact with created agents all within one integrated penetration test environment.",
        ),
        ThemeIcon::new(SETUP_ICON),
    )
    .featured(true)
    .when("isWeb")
    .next("Beginner")
    .step(pick_color_theme("pickColorThemeWeb"))
    .step(
        Step::new(
            "reviewFindingsWeb",
            text("gettingStarted.setup.ReviewFindings.title", "Review Findings"),
            with_button(
                "gettingStarted.setup.ReviewFindings.description.interpolated",
                "Let's gain some visibility into your attack surface.The best place to start is to see if there are any low hanging fruits that can be fixed/exploited.\n{0}\n",
                button(
                    "viewFindings",
                    "Open Findings",
                    "command:workbench.view.extension.findingsViewContainer",
                ),
            ),
            Media::svg("", "Open findings page"),
        )
        .completion_event("onView:workbench.view.extension.findingsViewContainer"),
    )
}

fn beginner() -> Category {
    Category::new(
        "Beginner",
        text("gettingStarted.beginner.title", "Amplify Fundamentals"),
        text(
            "gettingStarted.beginner.description",
            "Get an overview of important concepts",
        ),
        ThemeIcon::new(BEGINNER_ICON),
    )
    .featured(false)
    .step(Step::new(
        "agents",
        text("gettingStarted.agents.title", "Understanding agents"),
        with_button(
            "gettingStarted.agents.description.interpolated",
            "Agent sessions are remote access sessions that Enlight was able to establish either through found credentials or exploited RCE.\n{0}",
            button(
                "viewAgents",
                "Open Agents",
                "command:workbench.extensions.action.viewAgents",
            ),
        ),
        Media::svg("", "agent view"),
    ))
    .step(Step::new(
        "assets",
        text(
            "gettingStarted.assets.title",
            "Understanding assets and elements",
        ),
        with_button(
            "gettingStarted.assets.description.interpolated",
            "Explore the elements that Enlight found. Take a deeper dive into information found about a subnet, host, found hash, credential, ports, and more.\n{0}",
            button(
                "viewElements",
                "Open element explorer",
                "command:workbench.view.extension.exploreViewContainer",
            ),
        ),
        Media::svg("", "Integrated terminal running a few npm commands"),
    ))
    .step(Step::new(
        "findings",
        text("gettingStarted.findings.title", "Understanding findings"),
        with_button(
            "gettingStarted.findings.description.interpolated",
            "Findings are risks and vulnerabilities that Enlight found during your assessment. Filter by criticality to prioritize what's most important..\n{0}",
            button(
                "viewFindings",
                "Open Findings",
                "command:workbench.view.extension.findingsViewContainer",
            ),
        ),
        Media::svg("", "Integrated terminal running a few npm commands"),
    ))
    .step(Step::new(
        "actions",
        text(
            "gettingStarted.actions.title",
            "Undertanding assessment actions",
        ),
        with_button(
            "gettingStarted.actions.description.interpolated",
            "Take a look at what was run on what element, from kerberoasting to vulnerability checks.\n{0}",
            button(
                "viewActions",
                "Open actions",
                "command:workbench.view.extension.actionsViewContainer",
            ),
        ),
        Media::svg("", "Run and debug view."),
    ))
    .step(Step::new(
        "approvals",
        text("gettingStarted.approvals.title", "Understanding approvals"),
        with_button(
            "gettingStarted.approvals.description.interpolated",
            "Sometimes Enlight will find an exploit that could cause disruption in the system. See what actions that Enlight need's human in the loop approval before continuing. (COMING SOON) \n{0}",
            button(
                "openApprovals",
                "Open Approvals",
                "command:approvalsView.showApprovals",
            ),
        ),
        Media::svg("", "Interactive shortcuts."),
    ))
}

fn notebooks() -> Category {
    Category::new(
        "notebooks",
        text("gettingStarted.notebook.title", "Customize Notebooks"),
        Localized::literal(""),
        ThemeIcon::new(SETUP_ICON),
    )
    .featured(false)
    .when(format!(
        "config.{NOTEBOOK_OPEN_GETTING_STARTED} && userHasOpenedNotebook"
    ))
    .step(
        Step::new(
            "notebookProfile",
            text(
                "gettingStarted.notebookProfile.title",
                "Select the layout for your notebooks",
            ),
            text(
                "gettingStarted.notebookProfile.description",
                "Get notebooks to feel just the way you prefer",
            ),
            Media::markdown("notebookProfile"),
        )
        .completion_event("onCommand:notebook.setProfile")
        .when("userHasOpenedNotebook"),
    )
}
