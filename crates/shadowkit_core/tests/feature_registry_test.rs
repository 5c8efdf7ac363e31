use shadowkit_core::{Feature, FeatureCatalog, FeatureRegistry, FormatSpec, names};

#[test]
fn platform_registries_differ_by_role() {
    let catalog = FeatureCatalog::default();

    assert_eq!(catalog.for_role(false).value_of(names::MULTIPLE_FRAMES), Some(1 << 5));
    assert_eq!(catalog.for_role(true).value_of(names::MULTIPLE_FRAMES), Some(1 << 1));
    assert_eq!(catalog.for_role(false).value_of(names::INTRA_REFRESH), None);
    assert_eq!(catalog.for_role(true).value_of(names::FRAME_PARSING), None);
}

#[test]
fn registry_enumerates_in_registration_order() {
    let registry = FeatureRegistry::from_pairs([("B", 2), ("A", 1), ("C", 4)]);
    let order: Vec<&str> = registry.iter().map(|feature| feature.name().as_str()).collect();

    assert_eq!(order, vec!["B", "A", "C"]);
    assert_eq!(registry.len(), 3);
    assert!(!registry.is_empty());
}

#[test]
fn mask_requires_present_and_enabled() {
    let registry = FeatureRegistry::decoder_defaults();
    let format = FormatSpec::new("video/avc")
        .with_feature(names::ADAPTIVE_PLAYBACK, true)
        .with_feature(names::TUNNELED_PLAYBACK, false)
        .with_feature("NotAFeature", true);

    assert_eq!(registry.supported_mask(&format), 1);
}

#[test]
fn mask_is_zero_without_features() {
    let registry = FeatureRegistry::encoder_defaults();
    assert_eq!(registry.supported_mask(&FormatSpec::new("audio/opus")), 0);
}

#[test]
fn empty_registry_matches_nothing() {
    let registry = FeatureRegistry::default();
    let format = FormatSpec::new("audio/opus").with_features([names::LOW_LATENCY]);

    assert!(registry.is_empty());
    assert_eq!(registry.supported_mask(&format), 0);
    assert!(!registry.is_supported(names::LOW_LATENCY, u32::MAX));
}

#[test]
fn every_enabled_decoder_feature_sets_its_bit() {
    let registry = FeatureRegistry::decoder_defaults();
    let all_names: Vec<String> = registry.iter().map(|feature| feature.name().clone()).collect();
    let format = FormatSpec::new("video/hevc").with_features(all_names);

    let expected = registry.iter().fold(0, |mask, feature| mask | feature.value());
    assert_eq!(registry.supported_mask(&format), expected);
    assert_eq!(expected, 0x3FF);
}

#[test]
fn is_supported_checks_the_named_bit() {
    let registry = FeatureRegistry::new([Feature::new("Fast", 0b10)]);

    assert!(registry.is_supported("Fast", 0b10));
    assert!(!registry.is_supported("Fast", 0b01));
    assert!(!registry.is_supported("Slow", 0b11));
}

#[test]
fn uniform_catalog_shares_one_registry() {
    let catalog = FeatureCatalog::uniform(FeatureRegistry::from_pairs([("Only", 1)]));
    assert!(std::sync::Arc::ptr_eq(catalog.decoder(), catalog.encoder()));
}

#[test]
fn registry_collects_from_iterator() {
    let registry: FeatureRegistry = [Feature::new("X", 8), Feature::new("Y", 16)]
        .into_iter()
        .collect();
    assert_eq!(registry.value_of("Y"), Some(16));
}
