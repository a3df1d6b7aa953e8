use camino::Utf8PathBuf;
use scentguard_refdata::{DATASET_FILES, ReferenceStore, load_reference_data};

fn fixtures_data_dir() -> Utf8PathBuf {
    let manifest_dir = Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let mut dir = manifest_dir.as_path();
    loop {
        let candidate = dir.join("tests").join("fixtures").join("data");
        if candidate.is_dir() {
            return candidate;
        }
        dir = dir.parent().expect("reached filesystem root without fixtures");
    }
}

#[test]
fn bundled_fixture_datasets_are_all_present_and_parse() {
    let dir = fixtures_data_dir();
    for name in DATASET_FILES {
        assert!(dir.join(name).is_file(), "missing fixture dataset {name}");
    }

    let data = load_reference_data(&dir).expect("load fixture data");
    let counts = data.counts();
    assert!(counts.restrictions > 0);
    assert!(counts.allergens > 0);
    assert!(counts.volatiles > 0);
    assert!(counts.volatile_limits > 0);
    assert!(counts.donors > 0);
    assert!(counts.naturals > 0);
    assert!(counts.prop65 > 0);
    assert!(counts.canada_hotlist > 0);
    assert!(counts.reach > 0);
}

#[test]
fn store_serves_fixture_data() {
    let store = ReferenceStore::new(fixtures_data_dir());
    let data = store.load().expect("load");
    assert!(data.restriction("5392-40-5").is_some());
    assert!(data.is_natural("8008-56-8"));
}
