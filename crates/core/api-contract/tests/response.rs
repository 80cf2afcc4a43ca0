use api_contract::ApiResponse;
use serde_json::Value;

#[test]
fn api_response_success() {
    let response = ApiResponse::success("ok");
    assert!(response.success);
    assert!(response.data.is_some());
    assert!(response.error.is_none());
}

#[test]
fn api_response_error() {
    let response = ApiResponse::<()>::error("INVALID.REQUEST", "unknown system: radar");
    assert!(!response.success);
    assert!(response.data.is_none());
    let value = serde_json::to_value(response).expect("serialize");
    assert_eq!(value["error"]["code"], Value::from("INVALID.REQUEST"));
    assert!(value["data"].is_null());
}
