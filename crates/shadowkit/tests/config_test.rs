use shadowkit::{
    CapabilityDescriptor, ConfigSource, FormatSpec, ShadowkitConfig, ShadowkitErrorKind, names,
};
use std::fs;

#[test]
fn bundled_defaults() {
    let config = ShadowkitConfig::bundled().unwrap();

    assert_eq!(config.properties().file_name(), "shadowkit.properties");
    assert_eq!(*config.properties().cache_capacity(), 3);
    assert!(config.properties().resource_roots().is_empty());
    assert_eq!(config.tracing().filter(), "info,shadowkit=debug");
    assert!(!config.tracing().json());
    assert_eq!(config.feature_catalog(), shadowkit::FeatureCatalog::default());
}

#[test]
fn from_file_reads_every_section() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shadowkit.toml");
    fs::write(
        &path,
        r#"
[properties]
file_name = "codecs.properties"
cache_capacity = 5
resource_roots = ["/opt/a", "/opt/b"]

[tracing]
json = true

[[features.decoder]]
name = "Zeta"
value = 4

[[features.decoder]]
name = "Alpha"
value = 1
"#,
    )
    .unwrap();

    let config = ShadowkitConfig::from_file(&path).unwrap();

    assert_eq!(config.properties().file_name(), "codecs.properties");
    assert_eq!(*config.properties().cache_capacity(), 5);
    assert_eq!(config.properties().resource_roots().len(), 2);
    assert!(*config.tracing().json());
    assert_eq!(config.tracing().filter(), "info,shadowkit=debug");

    let catalog = config.feature_catalog();
    let order: Vec<&str> = catalog
        .decoder()
        .iter()
        .map(|feature| feature.name().as_str())
        .collect();
    assert_eq!(order, vec!["Zeta", "Alpha"]);
    assert_eq!(
        catalog.encoder().value_of(names::INTRA_REFRESH),
        Some(1),
        "encoder registry keeps platform defaults"
    );

    let loader_config = config.properties_loader_config();
    assert_eq!(loader_config.file_name(), "codecs.properties");
    assert_eq!(*loader_config.capacity(), 5);
}

#[test]
fn configured_catalog_drives_the_builder() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("features.toml");
    fs::write(
        &path,
        r#"
[[features.encoder]]
name = "Turbo"
value = 16
"#,
    )
    .unwrap();
    let catalog = ShadowkitConfig::from_file(&path).unwrap().feature_catalog();

    let descriptor = CapabilityDescriptor::builder()
        .format(FormatSpec::new("audio/opus").with_feature("Turbo", true))
        .is_encoder(true)
        .profile_levels(Vec::<shadowkit::ProfileLevel>::new())
        .features(catalog)
        .build()
        .unwrap();

    assert_eq!(descriptor.supported_feature_mask(), 16);
    assert!(descriptor.is_feature_supported("Turbo"));
}

#[test]
fn missing_file_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ShadowkitConfig::from_file(dir.path().join("absent.toml")).unwrap_err();

    match err.kind() {
        ShadowkitErrorKind::Config(config) => {
            assert!(
                matches!(&config.origin, ConfigSource::File(path) if path.ends_with("absent.toml")),
                "unexpected origin {}",
                config.origin
            );
            assert_eq!(config.source_section(), None);
            assert!(config.message.starts_with("Failed to read configuration"));
        }
        other => panic!("expected config error, got {other}"),
    }
}

#[test]
fn invalid_toml_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[properties\nfile_name = ").unwrap();

    let err = ShadowkitConfig::from_file(&path).unwrap_err();
    match err.kind() {
        ShadowkitErrorKind::Config(config) => {
            assert!(matches!(&config.origin, ConfigSource::File(_)));
            assert!(err.to_string().contains("broken.toml"));
        }
        other => panic!("expected config error, got {other}"),
    }
}

#[test]
fn zero_capacity_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("zero.toml");
    fs::write(&path, "[properties]\ncache_capacity = 0\n").unwrap();

    let err = ShadowkitConfig::from_file(&path).unwrap_err();
    match err.kind() {
        ShadowkitErrorKind::Config(config) => {
            assert!(config.message.contains("cache_capacity"));
            assert_eq!(config.source_section(), Some("properties"));
            assert!(err.to_string().contains("section [properties]"));
        }
        other => panic!("expected config error, got {other}"),
    }
}

#[test]
fn loader_reads_configured_roots() {
    let roots = tempfile::tempdir().unwrap();
    let namespace_dir = roots.path().join("com/example");
    fs::create_dir_all(&namespace_dir).unwrap();
    fs::write(namespace_dir.join("shadowkit.properties"), "sdk=34\n").unwrap();

    let config = ShadowkitConfig::default().with_properties(
        shadowkit::PropertiesSection::default().with_resource_roots(vec![roots.path().to_path_buf()]),
    );
    let mut loader = config.properties_loader();

    let properties = loader.load("com.example").unwrap().unwrap();
    assert_eq!(properties.get("sdk"), Some("34"));
    assert!(loader.load("org.unknown").unwrap().is_none());
}
