//! CSV item import batch task.
//!
//! Favors maximal partial progress: one malformed row never aborts a
//! file's import, but an unreadable file aborts the whole run.

use std::fs;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use groundwork_database::{DbError, Item, ItemWriter, TxManager};
use tracing::{debug, error, info};

use crate::types::errors::ItemError;

/// Per-file tally of what an import run did.
///
/// A malformed or failed row counts as skipped and contributes one entry
/// to `errors`, so `items_created + items_skipped` equals the number of
/// data rows in the file.
#[derive(Debug, Default)]
pub struct ImportResult {
    pub file_path: PathBuf,
    pub items_created: usize,
    pub items_skipped: usize,
    pub errors: Vec<String>,
}

impl ImportResult {
    fn add_error(&mut self, text: String) {
        error!("{text}");
        self.errors.push(text);
        self.items_skipped += 1;
    }
}

/// Batch usecase importing items from CSV files in a directory.
pub struct ItemImportService<R> {
    tx: TxManager,
    items: R,
}

impl<R> ItemImportService<R>
where
    R: ItemWriter + Clone + Send + Sync + 'static,
{
    pub fn new(tx: TxManager, items: R) -> Self {
        Self { tx, items }
    }

    /// Import every `.csv` file in `source_dir` (non-recursive).
    ///
    /// Directories and files with other extensions are skipped silently.
    /// Returns the per-file results; a structural failure (unreadable
    /// directory, unopenable file, unparseable CSV) aborts the run.
    pub async fn import_items(
        &self,
        source_dir: &Path,
        dry_run: bool,
    ) -> Result<Vec<ImportResult>, ItemError> {
        info!(source_dir = %source_dir.display(), dry_run, "starting item import");

        let entries = fs::read_dir(source_dir).map_err(|source| ItemError::SourceDir {
            path: source_dir.to_path_buf(),
            source,
        })?;

        let mut results = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| ItemError::SourceDir {
                path: source_dir.to_path_buf(),
                source,
            })?;

            let path = entry.path();
            if path.is_dir() || path.extension().and_then(|ext| ext.to_str()) != Some("csv") {
                continue;
            }

            let result = self.import_csv_file(&path, dry_run).await?;
            info!(
                file = %path.display(),
                created = result.items_created,
                skipped = result.items_skipped,
                errors = result.errors.len(),
                "import completed"
            );
            results.push(result);
        }

        let total_created: usize = results.iter().map(|r| r.items_created).sum();
        let total_skipped: usize = results.iter().map(|r| r.items_skipped).sum();
        let total_errors: usize = results.iter().map(|r| r.errors.len()).sum();
        info!(
            files_processed = results.len(),
            total_created, total_skipped, total_errors, "import summary"
        );

        Ok(results)
    }

    async fn import_csv_file(&self, path: &Path, dry_run: bool) -> Result<ImportResult, ItemError> {
        let mut result = ImportResult {
            file_path: path.to_path_buf(),
            ..ImportResult::default()
        };

        let file = fs::File::open(path).map_err(|source| ItemError::OpenFile {
            path: path.to_path_buf(),
            source,
        })?;

        // Rows may legitimately have the wrong number of columns; that is
        // a per-row problem, not a parse failure.
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        for (index, record) in reader.records().enumerate() {
            let line = index + 2; // the header occupies line 1

            let record = record.map_err(|source| ItemError::ParseCsv {
                path: path.to_path_buf(),
                source,
            })?;

            if record.len() < 3 {
                result.add_error(format!(
                    "invalid CSV format at line {line}: expected 3 columns (type_id,name,description), got {}",
                    record.len()
                ));
                continue;
            }

            let raw_type = record.get(0).unwrap_or_default();
            let name = record.get(1).unwrap_or_default();

            if raw_type.is_empty() {
                result.add_error(format!("empty type_id for item {name} at line {line}"));
                continue;
            }

            let type_id = match raw_type.parse::<i64>() {
                Ok(value) if value < 0 => {
                    result.add_error(format!(
                        "negative type_id '{value}' for item {name} at line {line}"
                    ));
                    continue;
                }
                Ok(value) => match u32::try_from(value) {
                    Ok(type_id) => type_id,
                    Err(_) => {
                        result.add_error(format!(
                            "type_id '{raw_type}' out of range for item {name} at line {line}"
                        ));
                        continue;
                    }
                },
                Err(err) => {
                    result.add_error(format!(
                        "invalid type_id '{raw_type}' for item {name} at line {line}: {err}"
                    ));
                    continue;
                }
            };

            let item = Item::new(type_id);

            if dry_run {
                info!(id = %item.id(), type_id = item.type_id(), "dry run: would create item");
                result.items_created += 1;
                continue;
            }

            // One transaction per row so a failed row never poisons its
            // neighbours.
            let repo = self.items.clone();
            let row_item = item.clone();
            let outcome: Result<(), DbError> = self
                .tx
                .run(move |session| {
                    Box::pin(async move {
                        repo.create_item(&session, &row_item).await.map(|_| ())
                    })
                })
                .await;

            match outcome {
                Ok(()) => {
                    result.items_created += 1;
                    debug!(id = %item.id(), type_id = item.type_id(), "item created");
                }
                Err(err) => {
                    result.add_error(format!("failed to create item at line {line}: {err}"));
                }
            }
        }

        Ok(result)
    }
}
