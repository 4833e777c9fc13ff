//! Section parsing properties.

use proptest::prelude::*;
use simdgen_defs::{parse_all, parse_definition, Section};

/// Fragment lines that can never be mistaken for a label.
fn fragment() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z0-9 +=;()_]{0,12}", 0..5).prop_map(|lines| {
        lines.into_iter().map(|l| l + "\n").collect::<String>()
    })
}

proptest! {
    #[test]
    fn prop_label_order_does_not_matter(
        setup in fragment(),
        body in fragment(),
        remainder in fragment(),
        order in Just(Section::ALL.to_vec()).prop_shuffle(),
    ) {
        let mut text = String::new();
        for section in &order {
            text.push_str(section.label());
            text.push('\n');
            text.push_str(match section {
                Section::Setup => &setup,
                Section::Body => &body,
                Section::Remainder => &remainder,
            });
        }

        let spec = parse_definition("metric", &text).unwrap();
        prop_assert_eq!(spec.setup(), setup.as_str());
        prop_assert_eq!(spec.body(), body.as_str());
        prop_assert_eq!(spec.remainder(), remainder.as_str());
    }

    #[test]
    fn prop_repeated_label_keeps_last(first in fragment(), last in fragment()) {
        let text = format!("BODY\n{first}SETUP\nREMAINDER\nBODY\n{last}");
        let spec = parse_definition("metric", &text).unwrap();
        prop_assert_eq!(spec.body(), last.as_str());
    }
}

#[test]
fn neighbouring_definitions_do_not_change_a_metric() {
    let alone = tempfile::tempdir().unwrap();
    let crowded = tempfile::tempdir().unwrap();
    let foo = "SETUP\nx += 1;\nBODY\ny += x;\nREMAINDER\nreturn y;\n";

    std::fs::write(alone.path().join("foo.def"), foo).unwrap();

    // Neighbours sorting before and after `foo`, one leaving a section open
    // at end of file and one repeating a label.
    std::fs::write(
        crowded.path().join("bar.def"),
        "SETUP\nBODY\nacc += a;\nREMAINDER\nreturn acc;\ntrailing();\n",
    )
    .unwrap();
    std::fs::write(crowded.path().join("foo.def"), foo).unwrap();
    std::fs::write(
        crowded.path().join("zed.def"),
        "BODY\nfirst;\nSETUP\ns;\nREMAINDER\nBODY\nsecond;\n",
    )
    .unwrap();

    let single = parse_all(alone.path()).unwrap();
    let many = parse_all(crowded.path()).unwrap();
    assert_eq!(many.names(), vec!["bar", "foo", "zed"]);
    assert_eq!(many.get("foo"), single.get("foo"));
    assert_eq!(many.get("zed").unwrap().body(), "second;\n");
}
