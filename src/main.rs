use clap::Parser;

use getting_started::commands::{Commands, handle_command};
use getting_started::config::Config;
use getting_started::ui::{self, Level, OutputFormat};

#[derive(Parser, Debug)]
#[command(name = "getting-started")]
#[command(about = "Inspect and validate welcome page walkthrough content", long_about = None)]
#[command(version)]
struct Cli {
    /// Activate debug mode
    #[arg(short, long, global = true)]
    debug: bool,

    /// Emit JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();
    ui::set_debug_mode(cli.debug);

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            ui::emit(Level::Error, "config.load.error", &format!("{e:#}"), None);
            std::process::exit(1);
        }
    };

    let format = if cli.json {
        OutputFormat::Json
    } else {
        config.output.into()
    };
    let no_color_env = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
    let color = config.color && !cli.no_color && !no_color_env;
    colored::control::set_override(color);
    ui::init(format, color);

    ui::emit(
        Level::Debug,
        "cli.start",
        &format!("Running {:?}", cli.command),
        None,
    );

    if let Err(e) = handle_command(&cli.command, &config) {
        ui::emit(
            Level::Error,
            "cli.error",
            &format!("Error: {e:#}"),
            Some(serde_json::json!({ "error": format!("{e:#}") })),
        );
        std::process::exit(1);
    }
}
