use super::*;

#[test]
fn defaults() {
    let cfg = BootstrapConfig::default();
    assert_eq!(cfg.canvas_id, DEFAULT_CANVAS_ID);
    assert_eq!(cfg.module_path, DEFAULT_MODULE_PATH);
    assert_eq!(cfg.level_filter().unwrap(), log::LevelFilter::Info);
}

#[test]
fn default_module_path_is_relative_to_bundle() {
    assert!(DEFAULT_MODULE_PATH.starts_with("./"));
    assert!(!DEFAULT_MODULE_PATH.contains("pkg/"));
}

#[test]
fn blank_input_means_defaults() {
    assert_eq!(BootstrapConfig::from_json("").unwrap(), BootstrapConfig::default());
    assert_eq!(BootstrapConfig::from_json("  \n").unwrap(), BootstrapConfig::default());
}

#[test]
fn empty_object_means_defaults() {
    assert_eq!(BootstrapConfig::from_json("{}").unwrap(), BootstrapConfig::default());
}

#[test]
fn partial_object_keeps_other_defaults() {
    let cfg = BootstrapConfig::from_json(r#"{"canvas_id": "stage"}"#).unwrap();
    assert_eq!(cfg.canvas_id, "stage");
    assert_eq!(cfg.module_path, DEFAULT_MODULE_PATH);
    assert_eq!(cfg.log_level, DEFAULT_LOG_LEVEL);
}

#[test]
fn full_object() {
    let cfg = BootstrapConfig::from_json(r#"{"canvas_id": "c", "module_path": "./sim.js", "log_level": "DEBUG"}"#)
        .unwrap();
    assert_eq!(cfg.module_path, "./sim.js");
    assert_eq!(cfg.level_filter().unwrap(), log::LevelFilter::Debug);
}

#[test]
fn malformed_json_is_config_error() {
    let err = BootstrapConfig::from_json("{canvas_id:").unwrap_err();
    assert!(matches!(err, BootstrapError::Config(_)));
}

#[test]
fn unknown_field_is_rejected() {
    let err = BootstrapConfig::from_json(r#"{"canvas": "c"}"#).unwrap_err();
    assert!(matches!(err, BootstrapError::Config(msg) if msg.contains("canvas")));
}

#[test]
fn empty_canvas_id_is_rejected() {
    let err = BootstrapConfig::from_json(r#"{"canvas_id": " "}"#).unwrap_err();
    assert_eq!(err, BootstrapError::Config("canvas_id must not be empty".into()));
}

#[test]
fn empty_module_path_is_rejected() {
    let err = BootstrapConfig::from_json(r#"{"module_path": ""}"#).unwrap_err();
    assert_eq!(err, BootstrapError::Config("module_path must not be empty".into()));
}

#[test]
fn unknown_log_level_is_rejected() {
    let err = BootstrapConfig::from_json(r#"{"log_level": "verbose"}"#).unwrap_err();
    assert_eq!(err, BootstrapError::Config("unknown log level `verbose`".into()));
}

#[test]
fn all_levels_parse() {
    for (raw, level) in [
        ("off", log::LevelFilter::Off),
        ("error", log::LevelFilter::Error),
        ("warn", log::LevelFilter::Warn),
        ("info", log::LevelFilter::Info),
        ("debug", log::LevelFilter::Debug),
        ("trace", log::LevelFilter::Trace),
    ] {
        assert_eq!(parse_level(raw).unwrap(), level);
    }
}
