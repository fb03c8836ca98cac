use qbias_parts::{ResistorBlueprint, TransistorBlueprint, TransistorCatalog};

use crate::{
    CircuitConfig,
    bias::{self, BiasPoint},
    error::CircuitError,
};

/// A single transistor stage: resistor values plus the transistor catalog
/// it was set up with.
///
/// The catalog is not built until [`Circuit::initialise_transistors`], which
/// installs it as the process-wide [`TransistorCatalog`]. Only the circuit
/// that installed it can run calculations; any later circuit in the process
/// gets [`qbias_parts::CatalogError::SingletonViolation`] and stays
/// uninitialised.
#[derive(Debug)]
pub struct Circuit {
    transistors: TransistorBlueprint,
    resistors: ResistorBlueprint,
    config: CircuitConfig,
    catalog: Option<&'static TransistorCatalog>,
}

impl Circuit {
    pub fn new(transistors: TransistorBlueprint, resistors: ResistorBlueprint) -> Self {
        Self::with_config(transistors, resistors, CircuitConfig::default())
    }

    pub fn with_config(
        transistors: TransistorBlueprint,
        resistors: ResistorBlueprint,
        config: CircuitConfig,
    ) -> Self {
        Self {
            transistors,
            resistors,
            config,
            catalog: None,
        }
    }

    pub fn initialise_transistors(&mut self) -> Result<(), CircuitError> {
        let catalog = TransistorCatalog::install(&self.transistors)?;
        self.catalog = Some(catalog);
        Ok(())
    }

    pub fn catalog(&self) -> Result<&'static TransistorCatalog, CircuitError> {
        self.catalog.ok_or(CircuitError::UninitializedCatalog)
    }

    pub fn is_initialised(&self) -> bool {
        self.catalog.is_some()
    }

    pub fn resistors(&self) -> &ResistorBlueprint {
        &self.resistors
    }

    pub fn config(&self) -> &CircuitConfig {
        &self.config
    }

    pub fn collector_feedback(&self, model: &str) -> Result<BiasPoint, CircuitError> {
        let _span = tracing::info_span!("collector_feedback", model).entered();

        let record = self.catalog()?.lookup(model)?;
        let bias = bias::collector_feedback(record, &self.resistors, &self.config)?;

        tracing::debug!(
            base_current = bias.base_current,
            collector_current = bias.collector_current,
            region = %bias.region,
            "bias point"
        );
        Ok(bias)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Installing the catalog is process-wide; those paths live in tests/.

    #[test]
    fn calculation_before_initialise_fails() {
        let circuit = Circuit::new(TransistorBlueprint::builtin(), ResistorBlueprint::builtin());
        assert!(!circuit.is_initialised());
        assert_eq!(
            circuit.collector_feedback("2N2222").unwrap_err(),
            CircuitError::UninitializedCatalog
        );
        assert_eq!(circuit.catalog().unwrap_err(), CircuitError::UninitializedCatalog);
    }

    #[test]
    fn config_overrides_supply() {
        let config = CircuitConfig {
            supply_voltage: 9.0,
        };
        let circuit = Circuit::with_config(
            TransistorBlueprint::builtin(),
            ResistorBlueprint::new(1.0),
            config,
        );
        assert_eq!(circuit.config().supply_voltage, 9.0);
        assert!(circuit.resistors().values.is_empty());
    }
}
