use crate::cli::context::AppContext;
use crate::cli::parser::{CategoryAction, Commands};
use crate::config::Config;
use crate::core::store::TaskStore;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::ui::prompt::confirm;
use crate::ui::views::short_id;
use crate::utils::colors::{RESET, swatch};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Category { action } = cmd else {
        return Ok(());
    };

    let ctx = AppContext::open(cfg)?;
    let user_id = ctx.user_id()?;
    let mut store = TaskStore::load(ctx.backend(), user_id)?;

    match action {
        CategoryAction::Add { name, color } => {
            let created = store.add_category(name, color)?;
            ctx.log(
                "category_add",
                &created.id,
                &format!("{} {}", created.name, created.color),
            );
            success(format!(
                "Category '{}' added ({})",
                created.name,
                short_id(&created.id)
            ));
        }
        CategoryAction::List => {
            if store.categories().is_empty() {
                info("No categories yet. Add one with `dtasks category add`.");
                return Ok(());
            }
            let mut table = Table::new(vec![
                Column::left("Id"),
                Column::left("Name"),
                Column::left("Color"),
            ]);
            for c in store.categories() {
                table.add_row(vec![
                    short_id(&c.id).to_string(),
                    c.name.clone(),
                    format!("{}●{} {}", swatch(c.rgb(), cfg.theme), RESET, c.color),
                ]);
            }
            print!("{}", table.render());
        }
        CategoryAction::Del { category, yes } => {
            let found = store.find_category(category)?;
            let prompt = format!(
                "Delete category '{}'? Its tasks will show as uncategorized.",
                found.name
            );
            if !*yes && !confirm(&prompt) {
                info("Operation cancelled.");
                return Ok(());
            }

            let deleted = store.delete_category(category)?;
            ctx.log("category_del", &deleted.id, &deleted.name);
            success(format!("Category '{}' deleted", deleted.name));
        }
    }

    Ok(())
}
