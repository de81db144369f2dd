//! # evat-io: Registration Data Ingestion
//!
//! CSV loading for the EV adoption dataset and the optional policy
//! incentives dataset.
//!
//! ## Design Philosophy
//!
//! **Tolerant headers**: real registration exports name their columns
//! inconsistently (`EV_Count`, `ev units`, `Year `). Headers are
//! lowercased and trimmed, then the required columns are located by
//! keyword substring match rather than exact name.
//!
//! **Partial loads with diagnostics**: rows missing a state or year are
//! skipped and counted, not fatal. The caller receives the usable records
//! together with [`LoadDiagnostics`] describing what was dropped.

pub mod loader;

pub use loader::{
    load_adoption_csv, load_policy_csv, AdoptionLoad, LoadDiagnostics,
};
