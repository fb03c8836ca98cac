use qbias_parts::{CatalogError, ResistorRole};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CircuitError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("resistor blueprint is missing the {role}")]
    MissingResistorRole { role: ResistorRole },

    #[error("{role} must be a finite, non-negative resistance, got {ohms} ohm")]
    InvalidResistance { role: ResistorRole, ohms: f64 },

    #[error("base loop resistance must be positive, got {ohms} ohm")]
    DegenerateResistance { ohms: f64 },

    #[error("supply voltage must be finite, got {volts} V")]
    InvalidSupplyVoltage { volts: f64 },

    #[error("transistor catalog not initialised; call initialise_transistors first")]
    UninitializedCatalog,
}
