//! # evat-core: EV Adoption Analytics Core
//!
//! Fundamental data structures for EV-vs-ICE registration analytics:
//! raw registration rows, derived per-state/year aggregates, readiness
//! scoring types, forecast results, and the unified error surface shared
//! by the whole toolkit.
//!
//! ## Design Philosophy
//!
//! Everything downstream of the loader is a pure function over these
//! types: no persistence, no shared mutable state, no caching. Each
//! invocation recomputes its outputs from the records it is handed, so
//! identical inputs always produce identical outputs.
//!
//! ## Quick Start
//!
//! ```rust
//! use evat_core::{ScoreWeights, VehicleRecord};
//!
//! let record = VehicleRecord {
//!     state: "Delhi".to_string(),
//!     year: 2023,
//!     segment: "2W".to_string(),
//!     ev_count: 1_200,
//!     ice_count: 8_800,
//! };
//! assert_eq!(record.total(), 10_000);
//!
//! // Scoring weights are configuration, validated to sum to 1.
//! let weights = ScoreWeights::new(0.6, 0.4).unwrap();
//! assert_eq!(weights.penetration, 0.6);
//! ```

pub mod error;
pub mod records;
pub mod weights;

pub use error::{EvatError, EvatResult};
pub use records::{
    ForecastResult, MarketSummary, PolicyRecord, ReadinessInput, ReadinessScore, Scope,
    StateYearAggregate, TrendPoint, VehicleRecord,
};
pub use weights::ScoreWeights;
