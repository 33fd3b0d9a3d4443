use super::*;

#[test]
fn defaults_match_canonical_timing() {
    let o = AnimationOpts::default();
    assert_eq!(o.tick_interval(), Duration::from_millis(8));
    assert_eq!(o.pause(), Duration::from_millis(500));
    assert_eq!(o.canvas, Canvas::default());
    o.validate().unwrap();
}

#[test]
fn json_fills_missing_fields_with_defaults() {
    let o = AnimationOpts::from_json_str(r#"{ "pause_ms": 250 }"#).unwrap();
    assert_eq!(o.pause_ms, 250);
    assert_eq!(o.tick_interval_ms, 8);
}

#[test]
fn json_rejects_unknown_fields_and_zero_tick() {
    let err = AnimationOpts::from_json_str(r#"{ "speed": 2 }"#).unwrap_err();
    assert!(err.to_string().contains("serialization error:"));

    let err = AnimationOpts::from_json_str(r#"{ "tick_interval_ms": 0 }"#).unwrap_err();
    assert!(err.to_string().contains("validation error:"));
}

#[test]
fn overrides_apply_and_validate() {
    let o = AnimationOpts::default()
        .with_overrides_from(|k| match k {
            ENV_TICK_MS => Some("16".to_string()),
            ENV_PAUSE_MS => Some(" 100 ".to_string()),
            _ => None,
        })
        .unwrap();
    assert_eq!((o.tick_interval_ms, o.pause_ms), (16, 100));

    assert!(
        AnimationOpts::default()
            .with_overrides_from(|k| (k == ENV_TICK_MS).then(|| "fast".to_string()))
            .is_err()
    );
}
