//! Process-wide transistor catalog.
//!
//! A [`TransistorCatalog`] only comes into existence through
//! [`TransistorCatalog::install`], which fills a single process-wide slot.
//! The first install wins; every later one fails with
//! [`CatalogError::SingletonViolation`] instead of handing back the catalog
//! that is already there.
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::bjt::BjtRecord;
use crate::blueprint::TransistorBlueprint;
use crate::error::CatalogError;

static GLOBAL_SLOT: CatalogSlot = CatalogSlot::new();

#[derive(Debug)]
pub struct TransistorCatalog {
    /// Records in blueprint order.
    records: Vec<BjtRecord>,
    index: HashMap<String, usize>,
}

impl TransistorCatalog {
    /// Install the process-wide catalog. Succeeds once per process.
    pub fn install(
        blueprint: &TransistorBlueprint,
    ) -> Result<&'static TransistorCatalog, CatalogError> {
        GLOBAL_SLOT.install(blueprint)
    }

    /// The process-wide catalog, if it has been installed.
    pub fn global() -> Option<&'static TransistorCatalog> {
        GLOBAL_SLOT.get()
    }

    pub fn is_installed() -> bool {
        GLOBAL_SLOT.get().is_some()
    }

    fn from_blueprint(blueprint: &TransistorBlueprint) -> Result<Self, CatalogError> {
        let mut records = Vec::with_capacity(blueprint.len());
        let mut index = HashMap::with_capacity(blueprint.len());

        for entry in &blueprint.entries {
            if entry.current_gain == 0 {
                return Err(CatalogError::ZeroCurrentGain {
                    model: entry.model.clone(),
                });
            }
            if index.contains_key(&entry.model) {
                tracing::debug!(model = %entry.model, "duplicate blueprint entry ignored");
                continue;
            }
            index.insert(entry.model.clone(), records.len());
            records.push(entry.to_record());
        }

        Ok(Self { records, index })
    }

    pub fn lookup(&self, model: &str) -> Result<&BjtRecord, CatalogError> {
        self.index
            .get(model)
            .map(|&i| &self.records[i])
            .ok_or_else(|| CatalogError::ModelNotFound {
                model: model.to_string(),
            })
    }

    pub fn contains(&self, model: &str) -> bool {
        self.index.contains_key(model)
    }

    pub fn records(&self) -> impl Iterator<Item = &BjtRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records ordered by model name; ties keep blueprint order.
    pub fn sorted_by_name(&self) -> Vec<&BjtRecord> {
        let mut sorted: Vec<_> = self.records.iter().collect();
        sorted.sort_by(|a, b| a.model().cmp(b.model()));
        sorted
    }

    /// Records ordered by ascending gain; ties keep blueprint order.
    pub fn sorted_by_gain(&self) -> Vec<&BjtRecord> {
        let mut sorted: Vec<_> = self.records.iter().collect();
        sorted.sort_by_key(|record| record.sort_key());
        sorted
    }
}

/// Write-once holder for a [`TransistorCatalog`]. Outside this crate's own
/// tests the only instance is `GLOBAL_SLOT`.
///
/// The check-and-set goes through [`OnceLock`], so two threads racing to
/// install can never both succeed.
#[derive(Debug)]
pub(crate) struct CatalogSlot {
    cell: OnceLock<TransistorCatalog>,
}

impl CatalogSlot {
    pub(crate) const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    pub(crate) fn install(
        &self,
        blueprint: &TransistorBlueprint,
    ) -> Result<&TransistorCatalog, CatalogError> {
        if self.cell.get().is_none() {
            let catalog = TransistorCatalog::from_blueprint(blueprint)?;
            let count = catalog.len();

            // a racing thread may fill the cell first; only our closure marks a win
            let mut installed = false;
            let catalog = self.cell.get_or_init(|| {
                installed = true;
                catalog
            });
            if installed {
                tracing::debug!(records = count, "installed transistor catalog");
                return Ok(catalog);
            }
        }

        tracing::warn!("rejected second transistor catalog");
        Err(CatalogError::SingletonViolation)
    }

    pub(crate) fn get(&self) -> Option<&TransistorCatalog> {
        self.cell.get()
    }
}
