//! Liability calculations for the new tax regime.
//!
//! Each stage is a pure function; [`TaxEngine`] wires them into the full
//! pipeline.

pub mod common;
pub mod engine;
pub mod installments;
pub mod slab;
pub mod surcharge;

pub use engine::{TaxEngine, compute_tax};
pub use installments::build_installments;
pub use slab::{marginal_relief, slab_tax};
pub use surcharge::surcharge;
