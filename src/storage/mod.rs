//! Persistence for workbooks.

pub mod json_backend;

use std::path::PathBuf;

use crate::{domain::Workbook, errors::CashflowError};

pub use json_backend::JsonStorage;

pub type Result<T> = std::result::Result<T, CashflowError>;

/// Trait that abstracts interaction with the persistence layer.
pub trait StorageBackend: Send + Sync {
    /// Loads the workbook, seeding a fresh one when none exists yet.
    fn load_workbook(&self) -> Result<Workbook>;
    fn save_workbook(&self, workbook: &Workbook) -> Result<()>;
    fn workbook_path(&self) -> PathBuf;
}
