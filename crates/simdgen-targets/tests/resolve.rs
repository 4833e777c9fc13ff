//! Resolution properties over the built-in catalog.

use proptest::prelude::*;
use simdgen_targets::{Catalog, CpuFamily, TargetError};

#[test]
fn every_entry_resolves_to_its_prefix() {
    let catalog = Catalog::builtin();
    for (family, sets) in catalog.families() {
        for (pos, set) in sets.iter().enumerate() {
            let resolved = catalog.resolve(set.name()).unwrap();
            assert_eq!(resolved.family, family);
            assert_eq!(resolved.len(), pos + 1);
            assert_eq!(resolved.architectures.as_slice(), &sets[..=pos]);
        }
    }
}

#[test]
fn file_tags_are_unique() {
    let catalog = Catalog::builtin();
    let mut tags: Vec<String> = catalog
        .families()
        .flat_map(|(_, sets)| sets.iter().map(|s| s.file_tag()))
        .collect();
    let total = tags.len();
    tags.sort();
    tags.dedup();
    assert_eq!(tags.len(), total);
}

#[test]
fn arm_target_never_includes_x86() {
    let catalog = Catalog::builtin();
    let resolved = catalog.resolve("neon").unwrap();
    assert_eq!(resolved.family, CpuFamily::Arm);
    assert!(resolved
        .iter()
        .all(|s| catalog.locate(s.name()).map(|(f, _)| f) == Some(CpuFamily::Arm)));
}

proptest! {
    #[test]
    fn prop_uncatalogued_strings_fail(target in "[a-z0-9_<>:]{0,16}") {
        let catalog = Catalog::builtin();
        prop_assume!(catalog.locate(&target).is_none());
        let err = catalog.resolve(&target).unwrap_err();
        let is_unknown = matches!(err, TargetError::UnknownArchitecture { .. });
        prop_assert!(is_unknown);
    }

    #[test]
    fn prop_resolution_is_a_prefix(idx in 0usize..17) {
        let catalog = Catalog::builtin();
        let all: Vec<_> = catalog
            .families()
            .flat_map(|(_, sets)| sets.iter().cloned())
            .collect();
        let target = &all[idx % all.len()];
        let resolved = catalog.resolve(target.name()).unwrap();
        let family = catalog.family(resolved.family);
        prop_assert_eq!(resolved.target(), target);
        prop_assert_eq!(resolved.architectures.as_slice(), &family[..resolved.len()]);
    }
}
