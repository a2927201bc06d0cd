//! Assertions on API responses

use axum::http::StatusCode;
use axum_test::TestResponse;

/// Assert the status and the `{"error", "status"}` body of an error response
///
/// Returns the error message for further checks.
pub fn assert_error(response: &TestResponse, status: StatusCode) -> String {
    assert_eq!(response.status_code(), status, "body: {}", response.text());

    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], status.as_u16(), "body: {}", body);
    body["error"]
        .as_str()
        .unwrap_or_else(|| panic!("error body without message: {}", body))
        .to_string()
}

/// Assert that a string contains a substring
macro_rules! assert_contains {
    ($haystack:expr, $needle:expr) => {
        assert!(
            $haystack.contains($needle),
            "Expected {:?} to contain {:?}",
            $haystack,
            $needle
        );
    };
}
