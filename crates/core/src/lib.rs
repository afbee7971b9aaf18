//! Core logic for settings-form
//!
//! Decodes the settings payload served at `json` and writes it onto the
//! controls of the settings form. Platform-neutral: the browser bindings
//! live in `settings-form-ui`.

pub mod config;
pub mod control;
pub mod error;
pub mod form;
pub mod lifecycle;
pub mod payload;
pub mod populate;
pub mod transport;

pub use config::PopulatorConfig;
pub use control::{coerce, Assignment, ControlKind};
pub use error::{FetchError, FormError, PopulateError};
pub use form::{FormControls, MemoryForm};
pub use lifecycle::{Populator, ReadyLatch, RequestState};
pub use payload::{SettingValue, SettingsPayload};
pub use populate::{
    apply_payload, fetch_settings, populate_settings_form, try_populate, PopulateReport,
};
pub use transport::{RawResponse, SettingsTransport};
