use dirs::home_dir;
use std::{
    env, fs,
    path::{Path, PathBuf},
    sync::Once,
};

use crate::errors::CashflowError;

const DEFAULT_DIR_NAME: &str = ".cashflow_core";
const WORKBOOK_FILE: &str = "months.json";
const CONFIG_FILE: &str = "config.json";

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("cashflow_core=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
    });
}

/// Returns the application-specific data directory, defaulting to `~/.cashflow_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("CASHFLOW_CORE_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Canonical path of the persisted workbook file.
pub fn workbook_file_in(base: &Path) -> PathBuf {
    base.join(WORKBOOK_FILE)
}

/// Canonical path of the configuration file.
pub fn config_file_in(base: &Path) -> PathBuf {
    base.join(CONFIG_FILE)
}

/// Creates `path` and any missing parents.
pub fn ensure_dir(path: &Path) -> Result<(), CashflowError> {
    fs::create_dir_all(path)?;
    Ok(())
}
