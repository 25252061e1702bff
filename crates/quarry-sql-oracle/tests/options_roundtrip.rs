//! Provider options as they appear in data-source configuration.

use quarry_sql_oracle::{OracleCompatibility, OracleOptions};

#[test]
fn options_deserialize_from_config_json() {
    let options: OracleOptions =
        serde_json::from_str(r#"{"compatibility":"11","default_schema":"APP"}"#).unwrap();
    assert_eq!(options.compatibility, OracleCompatibility::Legacy);
    assert_eq!(options.default_schema.as_deref(), Some("APP"));
}

#[test]
fn invalid_compatibility_is_rejected_at_parse_time() {
    let err = serde_json::from_str::<OracleOptions>(r#"{"compatibility":"10"}"#).unwrap_err();
    assert!(err.to_string().contains("invalid SQL compatibility"));
}

#[test]
fn options_serialize_with_string_tags() {
    let options = OracleOptions::new(OracleCompatibility::Modern).with_default_schema("APP");
    let json = serde_json::to_string(&options).unwrap();
    assert_eq!(json, r#"{"compatibility":"12","default_schema":"APP"}"#);
}

#[test]
fn missing_fields_take_defaults() {
    let options: OracleOptions = serde_json::from_str("{}").unwrap();
    assert_eq!(options.compatibility, OracleCompatibility::Modern);
    assert!(options.default_schema.is_none());
}
