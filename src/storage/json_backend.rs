use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    domain::{MonthKey, Workbook},
    utils::{app_data_dir, ensure_dir, workbook_file_in},
};

use super::{Result, StorageBackend};

const TMP_SUFFIX: &str = "tmp";

/// JSON-on-disk storage rooted at the application data directory.
#[derive(Clone)]
pub struct JsonStorage {
    root: PathBuf,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let root = root.unwrap_or_else(app_data_dir);
        ensure_dir(&root)?;
        Ok(Self { root })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None)
    }

    pub fn workbook_path(&self) -> PathBuf {
        workbook_file_in(&self.root)
    }

    /// Loads the persisted workbook. A missing file is not an error: the
    /// result is a fresh workbook seeded with the current month, matching
    /// first-run behavior.
    pub fn load_workbook(&self) -> Result<Workbook> {
        let path = self.workbook_path();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no workbook on disk, seeding");
            return Ok(Workbook::seeded(MonthKey::current()));
        }
        let data = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Writes the workbook atomically by staging to a temporary file.
    pub fn save_workbook(&self, workbook: &Workbook) -> Result<()> {
        let path = self.workbook_path();
        let json = serde_json::to_string_pretty(workbook)?;
        write_atomic(&path, &json)?;
        tracing::debug!(path = %path.display(), months = workbook.month_count(), "workbook saved");
        Ok(())
    }
}

impl StorageBackend for JsonStorage {
    fn load_workbook(&self) -> Result<Workbook> {
        JsonStorage::load_workbook(self)
    }

    fn save_workbook(&self, workbook: &Workbook) -> Result<()> {
        JsonStorage::save_workbook(self, workbook)
    }

    fn workbook_path(&self) -> PathBuf {
        JsonStorage::workbook_path(self)
    }
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    let tmp = path.with_extension(TMP_SUFFIX);
    fs::write(&tmp, data)?;
    fs::rename(tmp, path)?;
    Ok(())
}
