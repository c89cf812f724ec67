//! Personal configuration management
//!
//! The personal `config.js` holds user-identifying values. It may be read,
//! captured in memory and written back, but it is never overwritten by a
//! template and never packaged.

mod settings;
mod store;

pub use settings::{PersonalFields, PersonalSettings};
pub use store::{AppliedFields, ConfigBlob, ConfigStore, Materialized, PLACEHOLDERS, Placeholders};
