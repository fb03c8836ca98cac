pub mod bias;
pub mod circuit;
pub mod error;

pub use bias::{BiasPoint, OperatingRegion};
pub use circuit::Circuit;
pub use error::CircuitError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircuitConfig {
    /// Single supply rail feeding the collector resistor (V).
    pub supply_voltage: f64,
}

impl Default for CircuitConfig {
    fn default() -> Self {
        Self {
            supply_voltage: 12.0,
        }
    }
}
