use crate::errors::{AppError, AppResult};
use crate::ui::prompt::confirm;
use std::path::Path;

/// Refuse to clobber an existing file unless `force` is set or the user agrees.
pub(crate) fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if force || !path.exists() {
        return Ok(());
    }

    let prompt = format!("'{}' already exists. Overwrite it?", path.display());
    if confirm(&prompt) {
        Ok(())
    } else {
        Err(AppError::Export(format!(
            "{} left untouched (use --force to overwrite)",
            path.display()
        )))
    }
}
