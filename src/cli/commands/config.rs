use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::config::migrate::{fill_missing_fields, missing_fields};
use crate::errors::{AppError, AppResult};
use crate::models::Theme;
use crate::ui::messages::{error, info, success, warning};
use std::process::Command;

fn default_editor() -> String {
    std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        })
}

fn run_editor(editor: &str) -> bool {
    matches!(
        Command::new(editor).arg(Config::config_file()).status(),
        Ok(s) if s.success()
    )
}

/// Handle the `config` subcommand
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Config {
        print_config,
        check,
        migrate,
        edit_config,
        editor,
        theme,
    } = &cli.command
    else {
        return Ok(());
    };
    let path = Config::config_file();

    if *print_config {
        println!("📄 Current configuration ({}):\n", path.display());
        let mut shown = cfg.clone();
        if !shown.admin_secret.is_empty() {
            shown.admin_secret = "********".to_string();
        }
        println!("{}", serde_yaml::to_string(&shown)?);
    }

    if *check {
        let missing = missing_fields(&path)?;
        if missing.is_empty() {
            success("Configuration file is complete.");
        } else {
            warning(format!("Missing fields: {}", missing.join(", ")));
            info("Run `dtasks config --migrate` to add them with default values.");
        }
    }

    if *migrate {
        if cli.test {
            info("Test mode: configuration file left untouched.");
        } else {
            let added = fill_missing_fields(&path)?;
            if added.is_empty() {
                info("Nothing to migrate.");
            } else {
                success(format!("Added fields: {}", added.join(", ")));
            }
        }
    }

    if let Some(code) = theme {
        let theme = Theme::from_code(code)
            .ok_or_else(|| AppError::Validation(format!("unknown theme '{code}'")))?;
        let mut updated = cfg.clone();
        updated.theme = theme;
        if !cli.test {
            updated.save()?;
        }
        success(format!("Theme set to {}", theme.as_str()));
    }

    if *edit_config {
        let fallback = default_editor();
        let requested = editor.clone().unwrap_or_else(|| fallback.clone());

        if run_editor(&requested) {
            success(format!("Configuration file edited using '{requested}'"));
        } else if requested != fallback {
            warning(format!(
                "Editor '{requested}' not available, falling back to '{fallback}'"
            ));
            if run_editor(&fallback) {
                success(format!("Configuration file edited using '{fallback}'"));
            } else {
                error(format!("Failed to edit configuration file using '{fallback}'"));
            }
        } else {
            error(format!("Failed to edit configuration file using '{requested}'"));
        }
    }

    Ok(())
}
