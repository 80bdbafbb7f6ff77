//! Onset detection modules
//!
//! Energy-flux onset detection feeding the tempo estimator.

pub mod energy_flux;

pub use energy_flux::{compute_energy_flux, detect_energy_flux_onsets};
