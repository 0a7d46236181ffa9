use super::*;

#[test]
fn defaults_cover_every_simulation() {
    let s = SettingsStore::defaults();
    assert_eq!(s.group("sw_").count(), 6);
    assert_eq!(s.group("ch_").count(), 2);
    assert_eq!(s.group("cw_").count(), 3);
    assert_eq!(s.group("lw_").count(), 4);
    assert_eq!(s.keys().count(), 15);
    for key in s.keys() {
        s.get(key).unwrap().validate().unwrap();
    }
}

#[test]
fn unknown_key_is_a_config_error() {
    let s = SettingsStore::defaults();
    assert!(s.get("sw_colour").unwrap_err().is_config());
    assert!(s.resolve("nope", Some(1.0)).unwrap_err().is_config());
}

#[test]
fn resolve_clamps_requested_values() {
    let s = SettingsStore::defaults();
    assert_eq!(s.resolve("sw_tension", None).unwrap(), 10.0);
    assert_eq!(s.resolve("sw_tension", Some(500.0)).unwrap(), 200.0);
    assert_eq!(s.resolve("sw_tension", Some(0.0)).unwrap(), 0.1);
    assert_eq!(s.resolve_count("lw_particles", Some(2)).unwrap(), 20);
    assert_eq!(s.resolve_count("ch_n", None).unwrap(), 3);
    assert!(s.resolve("sw_tension", Some(f64::NAN)).is_err());
}

#[test]
fn with_range_returns_new_store_and_validates() {
    let s = SettingsStore::defaults();
    let edited = s.with_range("cw_n", 4.0, 8.0).unwrap();
    assert_eq!(edited.get("cw_n").unwrap().min, 4.0);
    assert_eq!(s.get("cw_n").unwrap().min, 2.0);
    // default 3 now clamps to the new minimum
    assert_eq!(edited.resolve_count("cw_n", None).unwrap(), 4);

    let err = s.with_range("cw_n", 8.0, 8.0).unwrap_err();
    assert!(err.is_config());
    assert_eq!(edited.reset(), SettingsStore::defaults());
}

#[test]
fn json_overrides_merge_onto_defaults() {
    let s = SettingsStore::from_json_str(r#"{"sw_tension": {"max": 50.0}, "lw_n": {"default": 2}}"#)
        .unwrap();
    let t = s.get("sw_tension").unwrap();
    assert_eq!((t.min, t.max, t.default), (0.1, 50.0, 10.0));
    assert_eq!(s.resolve_count("lw_n", None).unwrap(), 2);
    assert_eq!(s.get("ch_m").unwrap(), SettingsStore::defaults().get("ch_m").unwrap());
}

#[test]
fn json_rejects_bad_input() {
    assert!(matches!(
        SettingsStore::from_json_str("not json"),
        Err(WavelabError::Serde(_))
    ));
    assert!(SettingsStore::from_json_str(r#"{"zz": {"max": 1.0}}"#).unwrap_err().is_config());
    assert!(
        SettingsStore::from_json_str(r#"{"sw_length": {"min": 5.0, "max": 1.0}}"#)
            .unwrap_err()
            .is_config()
    );
}

#[test]
fn json_roundtrip_preserves_store() {
    let s = SettingsStore::defaults().with_range("ch_n", 2.0, 9.0).unwrap();
    let text = s.to_json_string().unwrap();
    assert_eq!(SettingsStore::from_json_str(&text).unwrap(), s);
}
