//! Fetch the settings document and copy it onto the settings form
//!
//! The public entry point is best-effort: every failure is absorbed and the
//! form keeps whatever state it had. Diagnostics go to `tracing` at debug
//! level and are silent unless a subscriber is installed.

use tracing::{debug, trace};

use crate::config::PopulatorConfig;
use crate::control::coerce;
use crate::error::{FetchError, FormError, PopulateError};
use crate::form::FormControls;
use crate::lifecycle::Populator;
use crate::payload::SettingsPayload;
use crate::transport::{decode_response, SettingsTransport};

/// What happened to each payload key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopulateReport {
    /// Keys written onto a control
    pub applied: Vec<String>,
    /// Keys with no control of that name
    pub unmatched: Vec<String>,
    /// Keys whose control cannot hold the value (file inputs, objects...)
    pub unassignable: Vec<String>,
}

/// Write every payload entry onto the control of the same name
///
/// Keys are visited in payload order. Unknown names are skipped. A failing
/// write stops the run and leaves earlier writes in place.
pub fn apply_payload<F>(payload: &SettingsPayload, form: &mut F) -> Result<PopulateReport, FormError>
where
    F: FormControls + ?Sized,
{
    let mut report = PopulateReport::default();

    for (key, value) in payload.iter() {
        let Some(kind) = form.control_kind(key) else {
            trace!(key, "no control for key");
            report.unmatched.push(key.to_string());
            continue;
        };
        let Some(assignment) = coerce(&kind, value) else {
            trace!(key, ?kind, value = value.type_name(), "control cannot take value");
            report.unassignable.push(key.to_string());
            continue;
        };
        form.assign(key, &assignment)?;
        report.applied.push(key.to_string());
    }

    Ok(report)
}

/// GET the settings document and decode it
pub async fn fetch_settings<T>(transport: &T, config: &PopulatorConfig) -> Result<SettingsPayload, FetchError>
where
    T: SettingsTransport + ?Sized,
{
    debug!(endpoint = %config.endpoint, "requesting settings");
    let response = transport.get(&config.endpoint).await?;
    debug!(status = response.status, bytes = response.body.len(), "settings response");
    decode_response(&response)
}

/// Run one request and populate the form, reporting failures
///
/// The form is resolved only once the payload has been decoded.
pub async fn try_populate<T, F, R>(
    populator: &Populator,
    transport: &T,
    config: &PopulatorConfig,
    resolve_form: R,
) -> Result<PopulateReport, PopulateError>
where
    T: SettingsTransport + ?Sized,
    F: FormControls,
    R: FnOnce(&str) -> Result<F, FormError>,
{
    let _in_flight = populator.begin()?;
    let payload = fetch_settings(transport, config).await?;
    let mut form = resolve_form(&config.form_id)?;
    let report = apply_payload(&payload, &mut form)?;
    debug!(
        applied = report.applied.len(),
        unmatched = report.unmatched.len(),
        unassignable = report.unassignable.len(),
        "settings applied"
    );
    Ok(report)
}

/// Best-effort populate: no retry, no user-visible failure
///
/// Returns the report on success and `None` when any stage failed. Failures
/// are only emitted as debug diagnostics.
pub async fn populate_settings_form<T, F, R>(
    populator: &Populator,
    transport: &T,
    config: &PopulatorConfig,
    resolve_form: R,
) -> Option<PopulateReport>
where
    T: SettingsTransport + ?Sized,
    F: FormControls,
    R: FnOnce(&str) -> Result<F, FormError>,
{
    match try_populate(populator, transport, config, resolve_form).await {
        Ok(report) => Some(report),
        Err(err) => {
            debug!(error = %err, "settings not applied");
            None
        }
    }
}
