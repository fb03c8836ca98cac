pub mod bjt;
pub mod blueprint;
pub mod catalog;
pub mod error;

pub use bjt::{BjtRecord, JunctionType};
pub use blueprint::{ResistorBlueprint, ResistorRole, TransistorBlueprint, TransistorBlueprintEntry};
pub use catalog::TransistorCatalog;
pub use error::{BlueprintError, CatalogError, PartsError};
