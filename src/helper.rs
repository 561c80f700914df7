use std::fs;
use std::path::Path;

use chrono::{Local, NaiveDateTime, SubsecRound};

use crate::errors::AppError;

/// Current local time, truncated to microseconds.
pub fn timestamp() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(6)
}

pub fn create_file_parent(path: &Path) -> Result<(), AppError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
