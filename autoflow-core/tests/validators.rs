use autoflow_core::validate::{
    validate_api_key, validate_content_size, validate_file_name, validate_path_segment,
    validate_secret_name, validate_workflow_update, MAX_CODE_BYTES,
};
use autoflow_core::{Runtime, UpdateWorkflowRequest};

#[test]
fn file_names() {
    assert!(validate_file_name("step_1.py").is_ok());
    assert!(validate_file_name("transform-v2.ts").is_ok());
    assert!(validate_file_name("").is_err());
    assert!(validate_file_name("../etc/passwd").is_err());
    assert!(validate_file_name(".hidden").is_err());
    assert!(validate_file_name("with space.py").is_err());
    assert!(validate_file_name(&"a".repeat(256)).is_err());
}

#[test]
fn secret_names() {
    assert!(validate_secret_name("DATABASE_URL").is_ok());
    assert!(validate_secret_name("K2").is_ok());
    assert!(validate_secret_name("database_url").is_err());
    assert!(validate_secret_name("2FA").is_err());
    assert!(validate_secret_name("").is_err());
}

#[test]
fn content_size_limit() {
    assert!(validate_content_size("print(1)").is_ok());
    let big = "x".repeat(MAX_CODE_BYTES + 1);
    let err = validate_content_size(&big).unwrap_err();
    assert_eq!(err.violations[0].path, "content");
}

#[test]
fn api_key_shape() {
    assert!(validate_api_key("af_live_0123456789abcdef").is_ok());
    assert!(validate_api_key("").is_err());
    assert!(validate_api_key("has space").is_err());
    assert!(validate_api_key("tab\there").is_err());
}

#[test]
fn path_segments() {
    assert!(validate_path_segment("id", "wf_123").is_ok());
    assert!(validate_path_segment("id", "  ").is_err());
    assert!(validate_path_segment("id", "a/b").is_err());
    assert!(validate_path_segment("id", ".").is_err());
    assert!(validate_path_segment("id", "..").is_err());
    assert!(validate_path_segment("id", "v1.2").is_ok());
}

#[test]
fn update_only_checks_present_fields() {
    assert!(validate_workflow_update(&UpdateWorkflowRequest::default()).is_ok());
    let update = UpdateWorkflowRequest {
        steps: Some(vec![]),
        ..Default::default()
    };
    assert!(validate_workflow_update(&update).is_err());
}

#[test]
fn runtime_aliases_normalize() {
    assert_eq!("Python3".parse::<Runtime>().unwrap(), Runtime::Python);
    assert_eq!("node".parse::<Runtime>().unwrap(), Runtime::JavaScript);
    assert_eq!("ts".parse::<Runtime>().unwrap(), Runtime::TypeScript);
    let err = "ruby".parse::<Runtime>().unwrap_err();
    assert!(err.to_string().contains("python, javascript, typescript"));
    assert_eq!(Runtime::TypeScript.extension(), "ts");
}
