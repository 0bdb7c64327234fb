use broadside::{Battle, EngineConfig, TileMap, VisionConfig, WindConfig};
use validator::ValidationErrors;

#[test]
fn test_config_validation() {
    let config = EngineConfig {
        rowing_impulse: 11, // invalid (too big)
        drag: -1,           // invalid
        wind_propulsion: 0, // valid (but becalmed)
        vision: VisionConfig {
            base_radius: 0,      // invalid
            fog_allowance: -0.5, // invalid
        },
        wind: WindConfig {
            max_turns_before_change_roll: 1, // valid
        },
    };

    let err = Battle::new(config, TileMap::new(4, 4), None, Vec::new())
        .unwrap_err();
    assert_eq!(err.to_string(), "invalid config");
    let validation_errors = err.downcast::<ValidationErrors>().unwrap();
    let mut error_fields = validation_errors
        .errors()
        .keys()
        .copied()
        .collect::<Vec<&str>>();
    error_fields.sort_unstable();
    assert_eq!(
        error_fields,
        vec!["drag", "rowing_impulse", "vision"],
        "incorrect validation errors in {:#?}",
        validation_errors
    );
}

#[test]
fn test_wind_config_validation() {
    let config = EngineConfig {
        wind: WindConfig {
            max_turns_before_change_roll: 0, // invalid
        },
        ..Default::default()
    };
    let err = Battle::new(config, TileMap::new(4, 4), None, Vec::new())
        .unwrap_err();
    let validation_errors = err.downcast::<ValidationErrors>().unwrap();
    assert!(validation_errors.errors().contains_key("wind"));
}

#[test]
fn test_partial_config_uses_defaults() {
    let config: EngineConfig =
        serde_json::from_str(r#"{"drag": 2, "vision": {"base_radius": 6}}"#)
            .unwrap();
    assert_eq!(config.drag, 2);
    assert_eq!(config.rowing_impulse, 1);
    assert_eq!(config.vision.base_radius, 6);
    assert_eq!(config.vision.fog_allowance, 2.0);
    assert_eq!(config.wind, WindConfig::default());
}
