use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;

use crate::bjt::{
    BjtRecord, DEFAULT_BASE_EMITTER_DROP, DEFAULT_INTERNAL_EMITTER_DROP, JunctionType,
};
use crate::error::{BlueprintError, PartsError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransistorBlueprintEntry {
    pub model: String,
    pub current_gain: u32,
    #[serde(default)]
    pub junction_type: JunctionType,
    #[serde(default = "default_base_emitter_drop")]
    pub base_emitter_drop: f64,
    #[serde(default = "default_internal_emitter_drop")]
    pub internal_emitter_drop: f64,
}

fn default_base_emitter_drop() -> f64 {
    DEFAULT_BASE_EMITTER_DROP
}

fn default_internal_emitter_drop() -> f64 {
    DEFAULT_INTERNAL_EMITTER_DROP
}

impl TransistorBlueprintEntry {
    pub fn new(model: impl Into<String>, current_gain: u32, junction_type: JunctionType) -> Self {
        Self {
            model: model.into(),
            current_gain,
            junction_type,
            base_emitter_drop: DEFAULT_BASE_EMITTER_DROP,
            internal_emitter_drop: DEFAULT_INTERNAL_EMITTER_DROP,
        }
    }

    pub fn set_base_emitter_drop(&mut self, value: f64) {
        self.base_emitter_drop = value;
    }

    pub fn set_internal_emitter_drop(&mut self, value: f64) {
        self.internal_emitter_drop = value;
    }

    pub(crate) fn to_record(&self) -> BjtRecord {
        BjtRecord::with_drops(
            self.model.clone(),
            self.current_gain,
            self.junction_type,
            self.base_emitter_drop,
            self.internal_emitter_drop,
        )
    }
}

impl From<(&str, u32)> for TransistorBlueprintEntry {
    fn from((model, current_gain): (&str, u32)) -> Self {
        Self::new(model, current_gain, JunctionType::default())
    }
}

impl From<(&str, u32, JunctionType)> for TransistorBlueprintEntry {
    fn from((model, current_gain, junction_type): (&str, u32, JunctionType)) -> Self {
        Self::new(model, current_gain, junction_type)
    }
}

/// Ordered list of transistor entries. Order decides which entry wins when
/// a model name repeats.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransistorBlueprint {
    pub entries: Vec<TransistorBlueprintEntry>,
}

impl TransistorBlueprint {
    pub fn new(entries: Vec<TransistorBlueprintEntry>) -> Self {
        Self { entries }
    }

    pub fn builtin() -> Self {
        [("2N2222", 60u32), ("2N2223", 100u32)].into_iter().collect()
    }

    pub fn from_json_str(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, PartsError> {
        read_json(path.as_ref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<E: Into<TransistorBlueprintEntry>> FromIterator<E> for TransistorBlueprint {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResistorRole {
    Base,
    Collector,
    Emitter,
}

impl ResistorRole {
    /// Key of this role in a resistor blueprint.
    pub fn key(&self) -> &'static str {
        match self {
            ResistorRole::Base => "rb",
            ResistorRole::Collector => "rc",
            ResistorRole::Emitter => "re",
        }
    }
}

impl fmt::Display for ResistorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResistorRole::Base => "base",
            ResistorRole::Collector => "collector",
            ResistorRole::Emitter => "emitter",
        };
        write!(f, "{name} resistor ({})", self.key())
    }
}

/// Resistor magnitudes by role name, plus the multiplier that scales every
/// magnitude into ohms (e.g. `1000` when magnitudes are in kΩ).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResistorBlueprint {
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
    #[serde(flatten)]
    pub values: BTreeMap<String, f64>,
}

fn default_multiplier() -> f64 {
    1.0
}

impl Default for ResistorBlueprint {
    fn default() -> Self {
        Self {
            multiplier: default_multiplier(),
            values: BTreeMap::new(),
        }
    }
}

impl ResistorBlueprint {
    pub fn new(multiplier: f64) -> Self {
        Self {
            multiplier,
            values: BTreeMap::new(),
        }
    }

    pub fn builtin() -> Self {
        Self::new(1e3)
            .with("rb", 410.0)
            .with("rc", 47.0)
            .with("re", 0.1)
    }

    pub fn with(mut self, key: impl Into<String>, value: f64) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: f64) -> Option<f64> {
        self.values.insert(key.into(), value)
    }

    pub fn remove(&mut self, key: &str) -> Option<f64> {
        self.values.remove(key)
    }

    /// Unscaled magnitude stored for `role`.
    pub fn get(&self, role: ResistorRole) -> Option<f64> {
        self.values.get(role.key()).copied()
    }

    /// Magnitude for `role` scaled by the multiplier.
    pub fn ohms(&self, role: ResistorRole) -> Option<f64> {
        self.get(role).map(|value| value * self.multiplier)
    }

    pub fn from_json_str(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, PartsError> {
        read_json(path.as_ref())
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, PartsError> {
    let content = std::fs::read_to_string(path).map_err(|error| BlueprintError::Io {
        path: path.to_path_buf(),
        error,
    })?;
    let value = serde_json::from_str(&content).map_err(|error| BlueprintError::Json {
        path: path.to_path_buf(),
        error,
    })?;
    tracing::debug!(path = %path.display(), "loaded blueprint");
    Ok(value)
}
