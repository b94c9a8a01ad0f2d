// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    bare_tag = { "infinite_job", "infinite_job", serde_json::json!({}) },
    with_payload = {
        r#"file_job:{"actions":[{"mode":"read","path":"/tmp/x"}]}"#,
        "file_job",
        serde_json::json!({"actions": [{"mode": "read", "path": "/tmp/x"}]})
    },
    empty_object_payload = { "system_job:{}", "system_job", serde_json::json!({}) },
)]
fn parse_splits_tag_from_payload(spec: &str, expected_tag: &str, expected_payload: serde_json::Value) {
    let (tag, payload) = parse(spec).unwrap();
    assert_eq!(tag, expected_tag);
    assert_eq!(payload, expected_payload);
}

#[test]
fn malformed_json_payload_is_an_error() {
    let err = parse("file_job:{not json}").unwrap_err();
    assert!(err.to_string().contains("file_job"));
}
