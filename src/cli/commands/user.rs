use crate::cli::context::AppContext;
use crate::cli::parser::{Cli, Commands, UserAction};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::SessionPatch;
use crate::ui::messages::{info, success};

/// Store `user_id` as the remembered user (not in test mode).
fn remember(user_id: &str, is_test: bool) -> AppResult<()> {
    if is_test {
        return Ok(());
    }
    let mut updated = Config::load()?;
    updated.user_id = Some(user_id.to_string());
    updated.save()
}

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::User { action } = &cli.command else {
        return Ok(());
    };

    match action {
        UserAction::Create => {
            let ctx = AppContext::open(cfg)?;
            let user = ctx.backend().create_user()?;
            ctx.backend()
                .create_session(&user.id, &SessionPatch::cleared())?;

            remember(&user.id, cli.test)?;
            ctx.log("user_create", &user.id, "user and empty session created");
            success(format!("User created: {}", user.id));
            info(format!("Backend: {}", ctx.backend().name()));
        }
        UserAction::Use { id } => {
            let id = id.trim();
            if id.is_empty() {
                return Err(AppError::Validation("user id must not be empty".into()));
            }
            remember(id, cli.test)?;
            success(format!("Now acting as user {id}"));
        }
        UserAction::Show => {
            let id = cfg.user_id.as_deref().ok_or(AppError::NoUser)?;
            println!("{id}");
        }
    }

    Ok(())
}
