//! Collector-feedback DC bias point.
//!
//! The base resistor returns to the collector node rather than the supply:
//!
//! ```text
//!   Vcc ── Rc ──┬── collector
//!               │
//!               Rb
//!               │
//!               └── base ─ (Vbe) ─ emitter ── Re ── gnd
//! ```
//!
//! Rc carries both the collector and the base current, i.e. the emitter
//! current `(β + 1)·Ib`. Walking the loop Vcc → Rc → Rb → B-E → Re → gnd:
//!
//! ```text
//! Vcc = (β + 1)·Ib·Rc + Ib·Rb + Vbe + (β + 1)·Ib·Re
//! Ib  = (Vcc − Vbe) / (Rb + (β + 1)(Rc + Re))
//! ```
//!
//! Since `Vcb = Ib·Rb >= 0` the stage can't saturate; it is either active or,
//! when the supply doesn't clear Vbe, cut off.
use std::fmt;

use qbias_parts::{BjtRecord, JunctionType, ResistorBlueprint, ResistorRole};
use serde::Serialize;

use crate::{CircuitConfig, error::CircuitError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperatingRegion {
    Active,
    Cutoff,
}

impl fmt::Display for OperatingRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperatingRegion::Active => f.write_str("active"),
            OperatingRegion::Cutoff => f.write_str("cutoff"),
        }
    }
}

/// DC operating point of a single stage. Currents in amperes, voltages in
/// volts, all as magnitudes; PNP polarity is carried by `junction_type`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BiasPoint {
    pub model: String,
    pub junction_type: JunctionType,
    pub current_gain: u32,
    pub region: OperatingRegion,
    pub supply_voltage: f64,
    pub base_current: f64,
    pub collector_current: f64,
    pub emitter_current: f64,
    /// Drop across Rc.
    pub collector_drop: f64,
    /// Drop across Re.
    pub emitter_drop: f64,
    /// Drop across Rb (equal to Vcb).
    pub base_drop: f64,
    pub collector_voltage: f64,
    pub base_voltage: f64,
    pub emitter_voltage: f64,
    pub collector_emitter_voltage: f64,
}

fn resistance(resistors: &ResistorBlueprint, role: ResistorRole) -> Result<f64, CircuitError> {
    let ohms = resistors
        .ohms(role)
        .ok_or(CircuitError::MissingResistorRole { role })?;
    if !ohms.is_finite() || ohms < 0.0 {
        return Err(CircuitError::InvalidResistance { role, ohms });
    }
    Ok(ohms)
}

pub fn collector_feedback(
    record: &BjtRecord,
    resistors: &ResistorBlueprint,
    config: &CircuitConfig,
) -> Result<BiasPoint, CircuitError> {
    let rb = resistance(resistors, ResistorRole::Base)?;
    let rc = resistance(resistors, ResistorRole::Collector)?;
    let re = resistance(resistors, ResistorRole::Emitter)?;

    let vcc = config.supply_voltage;
    if !vcc.is_finite() {
        return Err(CircuitError::InvalidSupplyVoltage { volts: vcc });
    }
    let vbe = record.base_emitter_drop();
    let beta = f64::from(record.current_gain());

    let loop_resistance = rb + (beta + 1.0) * (rc + re);
    if !loop_resistance.is_finite() || loop_resistance <= 0.0 {
        return Err(CircuitError::DegenerateResistance {
            ohms: loop_resistance,
        });
    }

    let headroom = vcc - vbe;
    let (region, base_current) = if headroom > 0.0 {
        (OperatingRegion::Active, headroom / loop_resistance)
    } else {
        (OperatingRegion::Cutoff, 0.0)
    };

    let collector_current = beta * base_current;
    let emitter_current = (beta + 1.0) * base_current;

    let collector_drop = emitter_current * rc;
    let emitter_drop = emitter_current * re;
    let base_drop = base_current * rb;

    let collector_voltage = vcc - collector_drop;
    let emitter_voltage = emitter_drop;
    let base_voltage = match region {
        OperatingRegion::Active => emitter_voltage + vbe,
        // open junction: no current through Rb, base floats at the collector
        OperatingRegion::Cutoff => collector_voltage,
    };

    Ok(BiasPoint {
        model: record.model().to_string(),
        junction_type: record.junction_type(),
        current_gain: record.current_gain(),
        region,
        supply_voltage: vcc,
        base_current,
        collector_current,
        emitter_current,
        collector_drop,
        emitter_drop,
        base_drop,
        collector_voltage,
        base_voltage,
        emitter_voltage,
        collector_emitter_voltage: collector_voltage - emitter_voltage,
    })
}

impl fmt::Display for BiasPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Collector feedback bias: {} ({}, hfe {}), {} region, Vcc = {} V",
            self.model, self.junction_type, self.current_gain, self.region, self.supply_voltage
        )?;
        writeln!(f, "  Ib  = {:.4} uA", self.base_current * 1e6)?;
        writeln!(f, "  Ic  = {:.4} mA", self.collector_current * 1e3)?;
        writeln!(f, "  Ie  = {:.4} mA", self.emitter_current * 1e3)?;
        writeln!(f, "  VRc = {:.4} V", self.collector_drop)?;
        writeln!(f, "  VRe = {:.4} V", self.emitter_drop)?;
        writeln!(f, "  VRb = {:.4} V", self.base_drop)?;
        writeln!(f, "  Vc  = {:.4} V", self.collector_voltage)?;
        writeln!(f, "  Vb  = {:.4} V", self.base_voltage)?;
        writeln!(f, "  Ve  = {:.4} V", self.emitter_voltage)?;
        write!(f, "  Vce = {:.4} V", self.collector_emitter_voltage)
    }
}
