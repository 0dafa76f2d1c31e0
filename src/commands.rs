//! Command handling for the content inspection CLI

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Subcommand, ValueEnum};
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};
use serde_json::json;

use crate::config::Config;
use crate::content::manifest::{self, ContentFormat, ManifestError};
use crate::content::validate::ValidationReport;
use crate::content::{Category, LinkTarget, Media, Registry, Step};
use crate::ui::preview::PreviewBuilder;
use crate::ui::prelude::*;

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List start entries in display order
    Entries,
    /// List walkthrough categories in display order
    Walkthroughs,
    /// Show a walkthrough, or one of its steps
    Show {
        /// Walkthrough id, e.g. Setup
        category: String,
        /// Step id inside the walkthrough
        step: Option<String>,
    },
    /// List icons defined by the welcome page
    Icons,
    /// Validate the built-in content or the given content files
    Validate {
        /// Treat warnings as failures
        #[arg(long)]
        strict: bool,
        /// TOML or JSON content files (defaults to content_files from config)
        files: Vec<PathBuf>,
    },
    /// Write the built-in content as a content file
    Export {
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Toml)]
        format: ExportFormat,
        /// Output path (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Toml,
    Json,
}

impl From<ExportFormat> for ContentFormat {
    fn from(format: ExportFormat) -> Self {
        match format {
            ExportFormat::Toml => ContentFormat::Toml,
            ExportFormat::Json => ContentFormat::Json,
        }
    }
}

pub fn handle_command(command: &Commands, config: &Config) -> Result<()> {
    let registry = Registry::builtin();

    match command {
        Commands::Entries => list_entries(registry),
        Commands::Walkthroughs => list_walkthroughs(registry),
        Commands::Show { category, step } => show(registry, category, step.as_deref()),
        Commands::Icons => list_icons(registry),
        Commands::Validate { strict, files } => {
            let files = if files.is_empty() {
                config.content_files.clone()
            } else {
                files.clone()
            };
            validate(registry, &files, *strict || config.strict)
        }
        Commands::Export { format, output } => export(registry, (*format).into(), output.as_ref()),
    }
}

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.iter().copied());
    table
}

fn when_text(when: Option<&crate::content::When>) -> String {
    when.map(|w| w.as_str().to_string()).unwrap_or_default()
}

fn list_entries(registry: &Registry) -> Result<()> {
    if matches!(get_output_format(), OutputFormat::Json) {
        let entries: Vec<_> = registry
            .start_entries()
            .iter()
            .map(|entry| {
                json!({
                    "id": entry.id,
                    "title": entry.title.as_str(),
                    "description": entry.description.render(),
                    "icon": entry.icon.id,
                    "when": entry.when.as_ref().map(|w| w.as_str()),
                    "command": entry.command,
                })
            })
            .collect();
        print_json(&json!(entries));
        return Ok(());
    }

    let mut table = new_table(&["Id", "Title", "Command", "When"]);
    for entry in registry.start_entries() {
        table.add_row(vec![
            entry.id.clone(),
            entry.title.to_string(),
            entry.command.clone(),
            when_text(entry.when.as_ref()),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn list_walkthroughs(registry: &Registry) -> Result<()> {
    if matches!(get_output_format(), OutputFormat::Json) {
        let walkthroughs: Vec<_> = registry
            .walkthroughs()
            .iter()
            .map(|category| {
                json!({
                    "id": category.id,
                    "title": category.title.as_str(),
                    "featured": category.is_featured,
                    "next": category.next,
                    "when": category.when.as_ref().map(|w| w.as_str()),
                    "steps": category.steps.iter().map(|s| s.id.as_str()).collect::<Vec<_>>(),
                })
            })
            .collect();
        print_json(&json!(walkthroughs));
        return Ok(());
    }

    let mut table = new_table(&["Id", "Title", "Steps", "Featured", "Next", "When"]);
    for category in registry.walkthroughs() {
        table.add_row(vec![
            category.id.clone(),
            category.title.to_string(),
            category.steps.len().to_string(),
            if category.is_featured { "yes" } else { "" }.to_string(),
            category.next.clone().unwrap_or_default(),
            when_text(category.when.as_ref()),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn list_icons(registry: &Registry) -> Result<()> {
    if matches!(get_output_format(), OutputFormat::Json) {
        let icons: Vec<_> = registry
            .icons()
            .iter()
            .map(|icon| {
                json!({
                    "id": icon.id,
                    "default": icon.default.id(),
                    "description": icon.description.as_str(),
                })
            })
            .collect();
        print_json(&json!(icons));
        return Ok(());
    }

    let mut table = new_table(&["Id", "Default", "Description"]);
    for icon in registry.icons() {
        table.add_row(vec![
            icon.id.clone(),
            format!("{} {}", icon.default, icon.default.id()),
            icon.description.to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn media_summary(media: &Media) -> String {
    let paths = media.paths().join(", ");
    let paths = if media.is_placeholder() {
        format!("{paths} (placeholder)")
    } else {
        paths
    };
    match media.alt_text() {
        Some(alt) => format!("{} {} \"{}\"", media.kind(), paths, alt),
        None => format!("{} {}", media.kind(), paths),
    }
}

fn link_summary(label: &str, target: &str) -> String {
    match LinkTarget::parse(target) {
        Ok(LinkTarget::Command { id, to_side: true }) => format!("{label} → command {id} (to side)"),
        Ok(LinkTarget::Command { id, .. }) => format!("{label} → command {id}"),
        Ok(LinkTarget::External(url)) => format!("{label} → {url}"),
        Err(e) => format!("{label} → invalid link: {e}"),
    }
}

fn step_json(step: &Step) -> serde_json::Value {
    json!({
        "id": step.id,
        "title": step.title.as_str(),
        "description": step.description.render(),
        "when": step.when.as_ref().map(|w| w.as_str()),
        "completionEvents": step.completion_events.iter().map(|e| e.as_str()).collect::<Vec<_>>(),
        "media": {
            "type": step.media.kind().as_str(),
            "paths": step.media.paths(),
            "altText": step.media.alt_text(),
            "placeholder": step.media.is_placeholder(),
        },
        "links": step.description.links().iter().map(|l| json!({
            "label": l.label,
            "target": l.target,
        })).collect::<Vec<_>>(),
    })
}

fn show(registry: &Registry, category_id: &str, step_id: Option<&str>) -> Result<()> {
    let Some(category) = registry.category(category_id) else {
        let known: Vec<_> = registry.walkthroughs().iter().map(|c| c.id.as_str()).collect();
        bail!(
            "Unknown walkthrough '{}' (available: {})",
            category_id,
            known.join(", ")
        );
    };

    match step_id {
        Some(step_id) => {
            let step = category.step_by_id(step_id).with_context(|| {
                format!("Walkthrough '{}' has no step '{}'", category.id, step_id)
            })?;
            show_step(category, step)
        }
        None => show_category(registry, category),
    }
}

fn show_category(registry: &Registry, category: &Category) -> Result<()> {
    if matches!(get_output_format(), OutputFormat::Json) {
        print_json(&json!({
            "id": category.id,
            "title": category.title.as_str(),
            "description": category.description.render(),
            "icon": category.icon.id,
            "featured": category.is_featured,
            "next": category.next,
            "when": category.when.as_ref().map(|w| w.as_str()),
            "steps": category.steps.iter().map(step_json).collect::<Vec<_>>(),
        }));
        return Ok(());
    }

    let next = registry
        .next_category(category)
        .map(|next| format!("{} ({})", next.title, next.id));

    let mut preview = PreviewBuilder::new(crate::ui::color_enabled())
        .header(registry.glyph(&category.icon), category.title.as_str())
        .text(&category.description.render())
        .blank()
        .field("Id", &category.id)
        .field("Featured", if category.is_featured { "yes" } else { "no" })
        .field_if("Next", next.as_deref())
        .field_if("When", category.when.as_ref().map(|w| w.as_str()))
        .blank()
        .subtext("Steps:");

    for (index, step) in category.steps.iter().enumerate() {
        let mut line = format!("{}. {} ({})", index + 1, step.title, step.id);
        if step.media.is_placeholder() {
            line.push_str(" [placeholder media]");
        }
        preview = preview.bullet(&line);
    }

    println!("{}", preview.build_string());
    Ok(())
}

fn show_step(category: &Category, step: &Step) -> Result<()> {
    if matches!(get_output_format(), OutputFormat::Json) {
        print_json(&step_json(step));
        return Ok(());
    }

    let links: Vec<_> = step
        .description
        .links()
        .iter()
        .map(|link| link_summary(&link.label, &link.target))
        .collect();
    let events: Vec<_> = step
        .completion_events
        .iter()
        .map(|event| event.to_string())
        .collect();

    let mut preview = PreviewBuilder::new(crate::ui::color_enabled())
        .header(None, step.title.as_str())
        .text(&step.description.render())
        .blank()
        .field("Walkthrough", &category.id)
        .field("Id", &step.id)
        .field("Media", &media_summary(&step.media))
        .field_if("When", step.when.as_ref().map(|w| w.as_str()));

    if !links.is_empty() {
        preview = preview.blank().subtext("Links:").bullets(&links);
    }
    if !events.is_empty() {
        preview = preview.blank().subtext("Completed by:").bullets(&events);
    }

    println!("{}", preview.build_string());
    Ok(())
}

fn report_issues(source: &str, report: &ValidationReport) {
    for error in &report.errors {
        emit(
            Level::Error,
            "content.validate.error",
            &format!("{}: {}", source, error),
            Some(json!({ "source": source, "error": error.to_string() })),
        );
    }
    for warning in &report.warnings {
        emit(
            Level::Warn,
            "content.validate.warning",
            &format!("{}: {}", source, warning),
            Some(json!({
                "source": source,
                "kind": warning.code(),
                "warning": warning.to_string(),
            })),
        );
    }
}

fn summarize(source: &str, registry: &Registry, report: &ValidationReport) {
    emit(
        Level::Success,
        "content.validate.ok",
        &format!(
            "{}: {} start entries, {} walkthroughs, {} steps, {} warning(s)",
            source,
            registry.start_entries().len(),
            registry.walkthroughs().len(),
            registry.step_count(),
            report.warnings.len()
        ),
        Some(json!({
            "source": source,
            "startEntries": registry.start_entries().len(),
            "walkthroughs": registry.walkthroughs().len(),
            "steps": registry.step_count(),
            "warnings": report.warnings.len(),
        })),
    );
}

fn validate(builtin: &Registry, files: &[PathBuf], strict: bool) -> Result<()> {
    if files.is_empty() {
        emit(
            Level::Debug,
            "content.validate.builtin",
            "Validating built-in content",
            None,
        );
        let report = builtin.validate();
        report_issues("built-in", &report);
        if report.failed(strict) {
            bail!("Built-in content failed validation");
        }
        summarize("built-in", builtin, &report);
        return Ok(());
    }

    let mut failed = 0usize;
    for path in files {
        let source = path.display().to_string();
        emit(
            Level::Debug,
            "content.validate.file",
            &format!("Validating {}", source),
            None,
        );

        match manifest::load(path) {
            Ok(registry) => {
                let report = registry.validate();
                report_issues(&source, &report);
                if report.failed(strict) {
                    failed += 1;
                } else {
                    summarize(&source, &registry, &report);
                }
            }
            Err(ManifestError::Invalid(errors)) => {
                let report = ValidationReport {
                    errors: errors.0,
                    warnings: Vec::new(),
                };
                report_issues(&source, &report);
                failed += 1;
            }
            Err(e) => {
                emit(
                    Level::Error,
                    "content.load.error",
                    &format!("{}: {}", source, e),
                    Some(json!({ "source": source, "error": e.to_string() })),
                );
                failed += 1;
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} content file(s) failed validation", failed, files.len());
    }
    Ok(())
}

fn export(registry: &Registry, format: ContentFormat, output: Option<&PathBuf>) -> Result<()> {
    let rendered = manifest::export(registry, format).context("serializing built-in content")?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating directory {}", parent.display()))?;
            }
            fs::write(path, &rendered)
                .with_context(|| format!("writing content file to {}", path.display()))?;
            emit(
                Level::Success,
                "content.export.ok",
                &format!("Exported built-in content to {}", path.display()),
                Some(json!({ "path": path.display().to_string(), "format": format.extension() })),
            );
        }
        None => print!("{rendered}"),
    }
    Ok(())
}
