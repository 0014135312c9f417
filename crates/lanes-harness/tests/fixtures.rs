use lanes_harness::{AccelPath, Binding, FixtureShape, Variant, generate_fixture};
use lanes_kind::NumericKind;
use lanes_random::RandomSource;
use proptest::prelude::*;

const VARIANT: Variant = Variant::new(AccelPath::Emulated, Binding::C);

#[test]
fn every_kind_renders_a_balanced_group() {
    for kind in NumericKind::ALL {
        let shape = FixtureShape::new(kind, 3, 5);
        let (text, record) =
            generate_fixture(&shape, &mut RandomSource::seeded(2024), VARIANT).expect("fixture");
        assert_eq!(text.matches('{').count(), 4, "{kind}: {text}");
        assert_eq!(text.matches('}').count(), 4, "{kind}: {text}");
        assert!(text.ends_with(" } },\n"), "{kind}: {text}");
        assert_eq!(record.kind, kind.name());
        assert_eq!(record.variant, "emul/c");
        assert_eq!(record.sha256.len(), 64);
    }
}

#[test]
fn record_serializes_for_the_stderr_summary() {
    let shape = FixtureShape::new(NumericKind::I32, 2, 4);
    let (_, record) =
        generate_fixture(&shape, &mut RandomSource::seeded(7), VARIANT).expect("fixture");
    let json = serde_json::to_value(&record).expect("serialize record");
    assert_eq!(json["kind"], "i32");
    assert_eq!(json["seed"], 7);
    assert_eq!(json["vectors"], 2);
    assert_eq!(json["lanes"], 4);
}

proptest! {
    #[test]
    fn generated_groups_hold_every_lane(seed in any::<u64>(), vectors in 2_usize..6, lanes in 1_usize..20) {
        let shape = FixtureShape::new(NumericKind::U16, vectors, lanes);
        let (text, record) = generate_fixture(&shape, &mut RandomSource::seeded(seed), VARIANT)
            .expect("fixture");
        let literals = text.matches("UINT16_C(").count() + text.matches("UINT16_MAX").count();
        prop_assert_eq!(literals, vectors * lanes);
        prop_assert_eq!(text.matches(',').count(), vectors * lanes);
        prop_assert_eq!(record.seed, seed);
    }
}
