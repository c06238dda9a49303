//! Deterministic port tariff calculation engine.
//!
//! Loads a validated, immutable set of tariff rules once, then answers
//! structured queries about a vessel call with an itemized, reproducible
//! cost breakdown. No free text, no inference, no retrieval: the
//! surrounding system handles those and exchanges plain data with this
//! crate through [`rules::load_dataset`] and [`compute_total`].

pub mod calc;
pub mod error;
pub mod model;
pub mod rules;

pub use calc::engine::compute_total;
pub use calc::outcome::{
    CalculationResult, Charge, LineItem, LineOutcome, NotApplicableReason,
};
pub use error::TariffError;
pub use model::{QueryParameters, TariffComponent, VesselType};
pub use rules::{load_dataset, parse_dataset, TariffDatabase};
