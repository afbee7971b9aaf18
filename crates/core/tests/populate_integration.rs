mod common;

use common::MockEndpoint;
use settings_form_core::{
    populate_settings_form, try_populate, FormError, MemoryForm, PopulateError, PopulateReport,
    Populator, PopulatorConfig, RequestState,
};

fn settings_form() -> MemoryForm {
    MemoryForm::new()
        .with_text("username", "")
        .with_checkbox("notify", false)
        .with_text("ssid", "factory")
        .with_radio_group("leds", &["3", "4"])
        .with_select("mode", &["rainbow", "fire", "strobe"], false)
}

async fn populate(endpoint: &MockEndpoint, form: &mut MemoryForm) -> Option<PopulateReport> {
    let populator = Populator::new();
    let config = PopulatorConfig::default();
    populate_settings_form(&populator, endpoint, &config, move |_| Ok(form)).await
}

/// Named fields take the payload values
#[tokio::test]
async fn username_and_notify_are_populated() {
    let endpoint = MockEndpoint::json(r#"{"username": "alice", "notify": true}"#);
    let mut form = settings_form();

    let report = populate(&endpoint, &mut form).await.expect("populated");

    assert_eq!(report.applied, vec!["username", "notify"]);
    assert_eq!(form.value("username").as_deref(), Some("alice"));
    assert_eq!(form.checked("notify"), Some(true));
    assert_eq!(form.value("ssid").as_deref(), Some("factory"));
}

/// One GET to the fixed relative path
#[tokio::test]
async fn requests_the_json_endpoint_once() {
    let endpoint = MockEndpoint::json("{}");
    let mut form = settings_form();

    populate(&endpoint, &mut form).await;

    assert_eq!(endpoint.requests(), vec!["json"]);
}

/// The form is looked up by its id after the response arrived
#[tokio::test]
async fn resolves_the_settings_form_by_id() {
    let endpoint = MockEndpoint::json(r#"{"ssid": "lamp"}"#);
    let populator = Populator::new();
    let config = PopulatorConfig::default();
    let mut form = settings_form();
    let mut seen_id = None;
    let (form_ref, seen) = (&mut form, &mut seen_id);

    let report = populate_settings_form(&populator, &endpoint, &config, move |id| {
        *seen = Some(id.to_string());
        Ok(form_ref)
    })
    .await;

    assert!(report.is_some());
    assert_eq!(seen_id.as_deref(), Some("settings-form"));
    assert_eq!(form.value("ssid").as_deref(), Some("lamp"));
}

#[tokio::test]
async fn empty_object_changes_nothing() {
    let endpoint = MockEndpoint::json("{}");
    let mut form = settings_form();
    let before = form.clone();

    let report = populate(&endpoint, &mut form).await.expect("populated");

    assert_eq!(report, PopulateReport::default());
    assert_eq!(form, before);
}

#[tokio::test]
async fn unknown_keys_are_ignored() {
    let endpoint = MockEndpoint::json(r#"{"nonexistent_field": "x"}"#);
    let mut form = settings_form();
    let before = form.clone();

    let report = populate(&endpoint, &mut form).await.expect("populated");

    assert_eq!(report.unmatched, vec!["nonexistent_field"]);
    assert_eq!(form, before);
}

#[tokio::test]
async fn server_error_is_absorbed() {
    let endpoint = MockEndpoint::status(500, r#"{"username": "mallory"}"#);
    let mut form = settings_form();
    let before = form.clone();

    assert!(populate(&endpoint, &mut form).await.is_none());
    assert_eq!(form, before);
}

#[tokio::test]
async fn malformed_body_is_absorbed() {
    for body in ["{\"username\": ", "<html>oops</html>", "", "[\"username\"]"] {
        let endpoint = MockEndpoint::json(body);
        let mut form = settings_form();
        let before = form.clone();

        assert!(populate(&endpoint, &mut form).await.is_none(), "body {body:?}");
        assert_eq!(form, before);
    }
}

#[tokio::test]
async fn network_failure_is_absorbed() {
    let endpoint = MockEndpoint::network_down();
    let mut form = settings_form();
    let before = form.clone();

    assert!(populate(&endpoint, &mut form).await.is_none());
    assert_eq!(form, before);
}

#[tokio::test]
async fn missing_form_is_absorbed() {
    let endpoint = MockEndpoint::json(r#"{"username": "alice"}"#);
    let populator = Populator::new();
    let config = PopulatorConfig::default();

    let report = populate_settings_form(&populator, &endpoint, &config, |id| {
        Err::<MemoryForm, _>(FormError::MissingForm(id.to_string()))
    })
    .await;

    assert!(report.is_none());
    assert_eq!(populator.state(), RequestState::Idle);
}

#[tokio::test]
async fn repeated_runs_are_idempotent() {
    let body = r#"{"username": "bob", "notify": 1, "leds": "4", "mode": "fire"}"#;
    let endpoint = MockEndpoint::json(body);

    let mut once = settings_form();
    populate(&endpoint, &mut once).await.expect("populated");

    let mut twice = settings_form();
    populate(&endpoint, &mut twice).await.expect("populated");
    populate(&endpoint, &mut twice).await.expect("populated");

    assert_eq!(once, twice);
    assert_eq!(twice.value("leds").as_deref(), Some("4"));
    assert_eq!(twice.selected("mode"), Some(vec!["fire".to_string()]));
}

/// Errors stay visible through the reporting entry point
#[tokio::test]
async fn try_populate_reports_the_failure() {
    let endpoint = MockEndpoint::status(404, "not found");
    let populator = Populator::new();
    let config = PopulatorConfig::default();
    let mut form = settings_form();

    let form_ref = &mut form;
    let err = try_populate(&populator, &endpoint, &config, move |_| Ok(form_ref))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("404"), "{err}");
    assert!(matches!(err, PopulateError::Fetch(_)));
    assert_eq!(populator.state(), RequestState::Idle);
}

/// A second run while the first is outstanding does nothing
#[tokio::test]
async fn overlapping_run_is_refused() {
    let endpoint = MockEndpoint::json(r#"{"username": "carol"}"#);
    let populator = Populator::new();
    let config = PopulatorConfig::default();
    let mut form = settings_form();

    let _outstanding = populator.begin().unwrap();
    let form_ref = &mut form;
    let report = populate_settings_form(&populator, &endpoint, &config, move |_| Ok(form_ref)).await;

    assert!(report.is_none());
    assert!(endpoint.requests().is_empty());
    assert_eq!(form.value("username").as_deref(), Some(""));
}
