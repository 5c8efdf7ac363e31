use shadowkit::{ShadowkitErrorKind, TracingConfig, init_tracing, init_tracing_with_config};

#[test]
fn subscriber_installs_once() {
    init_tracing_with_config(&TracingConfig::default().with_json(true)).unwrap();

    tracing::info!(mime_type = "audio/opus", "Logged through the installed subscriber");

    let err = init_tracing().unwrap_err();
    assert!(matches!(err.kind(), ShadowkitErrorKind::Config(_)));
}
