//! Datasheet record for a single bipolar junction transistor.
//!
//! A [`BjtRecord`] is built once from a blueprint entry and never changes
//! afterwards. Fields are private; read them through the accessors.
//!
//! ```compile_fail
//! use qbias_parts::{BjtRecord, JunctionType};
//!
//! let mut record = BjtRecord::new("2N2222", 60, JunctionType::Npn);
//! record.current_gain = 120;
//! ```
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BlueprintError;

pub const DEFAULT_BASE_EMITTER_DROP: f64 = 0.7;
pub const DEFAULT_INTERNAL_EMITTER_DROP: f64 = 0.025;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum JunctionType {
    #[default]
    Npn,
    Pnp,
}

impl JunctionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JunctionType::Npn => "NPN",
            JunctionType::Pnp => "PNP",
        }
    }
}

impl FromStr for JunctionType {
    type Err = BlueprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "NPN" => Ok(JunctionType::Npn),
            "PNP" => Ok(JunctionType::Pnp),
            _ => Err(BlueprintError::InvalidJunctionType { s: s.to_string() }),
        }
    }
}

impl TryFrom<String> for JunctionType {
    type Error = BlueprintError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<JunctionType> for String {
    fn from(junction: JunctionType) -> Self {
        junction.as_str().to_string()
    }
}

impl fmt::Display for JunctionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BjtRecord {
    model: String,
    /// hfe / beta: collector current over base current in the active region.
    current_gain: u32,
    junction_type: JunctionType,
    /// Forward drop across the base-emitter junction (V).
    base_emitter_drop: f64,
    /// Thermal constant behind the dynamic emitter resistance (V).
    /// Carried for gain calculations; the DC bias formulas don't read it.
    internal_emitter_drop: f64,
    #[serde(skip)]
    sort_key: u32,
}

impl BjtRecord {
    pub fn new(model: impl Into<String>, current_gain: u32, junction_type: JunctionType) -> Self {
        Self::with_drops(
            model,
            current_gain,
            junction_type,
            DEFAULT_BASE_EMITTER_DROP,
            DEFAULT_INTERNAL_EMITTER_DROP,
        )
    }

    pub fn with_drops(
        model: impl Into<String>,
        current_gain: u32,
        junction_type: JunctionType,
        base_emitter_drop: f64,
        internal_emitter_drop: f64,
    ) -> Self {
        Self {
            model: model.into(),
            current_gain,
            junction_type,
            base_emitter_drop,
            internal_emitter_drop,
            sort_key: current_gain,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn current_gain(&self) -> u32 {
        self.current_gain
    }

    pub fn junction_type(&self) -> JunctionType {
        self.junction_type
    }

    pub fn base_emitter_drop(&self) -> f64 {
        self.base_emitter_drop
    }

    pub fn internal_emitter_drop(&self) -> f64 {
        self.internal_emitter_drop
    }

    /// Ordering key for gain sorts; always equal to the current gain.
    pub fn sort_key(&self) -> u32 {
        self.sort_key
    }
}

impl fmt::Display for BjtRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Model: {}, Type: {}, Hfe: {}, Vbe: {}",
            self.model, self.junction_type, self.current_gain, self.base_emitter_drop
        )
    }
}
