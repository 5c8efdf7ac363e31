use shadowkit_core::{
    BuilderErrorKind, CapabilityDescriptor, CodecFlags, FormatSpec, IdentityDescriptor,
    ProfileLevel, names,
};

const AAC: &str = "audio/mp4a-latm";
const VP9: &str = "video/x-vnd.on2.vp9";

fn aac_capabilities() -> CapabilityDescriptor {
    CapabilityDescriptor::builder()
        .format(FormatSpec::new(AAC).with_feature(names::DYNAMIC_TIMESTAMP, true))
        .is_encoder(true)
        .profile_levels([ProfileLevel::new(39, 0)])
        .color_formats(Vec::<i32>::new())
        .build()
        .unwrap()
}

fn vp9_capabilities() -> CapabilityDescriptor {
    CapabilityDescriptor::builder()
        .format(FormatSpec::new(VP9).with_feature(names::SECURE_PLAYBACK, true))
        .profile_levels([ProfileLevel::new(0x08, 0x2000)])
        .color_formats([19, 21])
        .build()
        .unwrap()
}

#[test]
fn aac_encoder_identity() {
    let aac = aac_capabilities();
    let encoder = IdentityDescriptor::builder()
        .name("test.encoder.aac")
        .flags((CodecFlags::ENCODER | CodecFlags::VENDOR).bits())
        .unwrap()
        .capabilities(vec![aac.clone()])
        .build();

    assert_eq!(encoder.name(), "test.encoder.aac");
    assert!(encoder.is_encoder());
    assert!(encoder.is_vendor());
    assert!(!encoder.is_software_only());
    assert!(!encoder.is_hardware_accelerated());
    assert_eq!(encoder.supported_mime_types(), vec![AAC]);
    assert_eq!(encoder.capability_for(AAC), Some(&aac));
    assert!(encoder.capability_for("video/avc").is_none());
}

#[test]
fn vp9_decoder_identity() {
    let decoder = IdentityDescriptor::builder()
        .name("test.decoder.vp9")
        .flags(CodecFlags::HARDWARE_ACCELERATED.bits())
        .unwrap()
        .capabilities(vec![vp9_capabilities()])
        .build();

    assert!(!decoder.is_encoder());
    assert!(!decoder.is_vendor());
    assert!(!decoder.is_software_only());
    assert!(decoder.is_hardware_accelerated());
    assert_eq!(decoder.supported_mime_types(), vec![VP9]);
    assert!(decoder.capability_for(VP9).is_some());
}

#[test]
fn unsupported_flags_are_rejected() {
    let err = IdentityDescriptor::builder()
        .flags(!CodecFlags::all().bits())
        .unwrap_err();

    match err.kind() {
        BuilderErrorKind::InvalidFlags { flags, unsupported } => {
            assert_eq!(*flags, !CodecFlags::all().bits());
            assert_eq!(*unsupported, !0b1111);
        }
        other => panic!("expected invalid flags, got {other}"),
    }
}

#[test]
fn single_unknown_bit_is_rejected() {
    assert!(IdentityDescriptor::builder().flags(1 << 4).is_err());
    assert!(IdentityDescriptor::builder().flags(CodecFlags::ENCODER.bits() | 1 << 31).is_err());
}

#[test]
fn every_recognized_combination_is_accepted() {
    for flags in 0..=CodecFlags::all().bits() {
        let identity = IdentityDescriptor::builder().flags(flags).unwrap().build();
        assert_eq!(identity.flags().bits(), flags);
    }
}

#[test]
fn empty_builder_uses_defaults() {
    let identity = IdentityDescriptor::builder().build();

    assert_eq!(identity.name(), "");
    assert_eq!(identity.canonical_name(), "");
    assert_eq!(identity.flags(), CodecFlags::empty());
    assert!(identity.capabilities().is_empty());
    assert!(identity.supported_mime_types().is_empty());
    assert!(identity.capability_for(AAC).is_none());
}

#[test]
fn canonical_name_can_differ_from_alias() {
    let identity = IdentityDescriptor::builder()
        .name("alias.decoder.vp9")
        .canonical_name("c2.vendor.vp9.decoder")
        .build();

    assert_eq!(identity.name(), "alias.decoder.vp9");
    assert_eq!(identity.canonical_name(), "c2.vendor.vp9.decoder");
}

#[test]
fn mime_types_are_distinct_in_first_seen_order() {
    let first_aac = aac_capabilities();
    let second_aac = CapabilityDescriptor::builder()
        .format(FormatSpec::new(AAC))
        .profile_levels(Vec::<ProfileLevel>::new())
        .build()
        .unwrap();

    let identity = IdentityDescriptor::builder()
        .capabilities(vec![
            first_aac.clone(),
            vp9_capabilities(),
            second_aac,
        ])
        .build();

    assert_eq!(identity.supported_mime_types(), vec![AAC, VP9]);
    assert_eq!(identity.capability_for(AAC), Some(&first_aac));
}

#[test]
fn capability_lookup_is_exact() {
    let identity = IdentityDescriptor::builder()
        .capabilities(vec![vp9_capabilities()])
        .build();

    assert!(identity.capability_for("VIDEO/X-VND.ON2.VP9").is_none());
}

#[test]
fn rejected_flags_leave_no_partial_state() {
    let builder = IdentityDescriptor::builder().name("codec");
    let kept = builder.clone();
    assert!(builder.flags(0x100).is_err());

    let identity = kept.flags(CodecFlags::SOFTWARE_ONLY.bits()).unwrap().build();
    assert!(identity.is_software_only());
    assert_eq!(identity.name(), "codec");
}
