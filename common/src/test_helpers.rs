//! Helpers shared by the integration tests of `processing` and `paysim`.
//!
//! Tests return [`TestResult`] and use `?` instead of unwrapping, so a failing
//! step reports which operation broke rather than a bare panic location.

#[derive(Debug, thiserror::Error)]
pub enum TestError {
    #[error("Assertion failed: {message}")]
    AssertionFailure { message: String },

    #[error("HTTP error: {source}")]
    HttpError {
        #[from]
        source: http::Error,
    },

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("Test setup failed: {message}")]
    Generic { message: String },
}

impl TestError {
    pub fn assertion_failure(message: impl Into<String>) -> Self {
        Self::AssertionFailure {
            message: message.into(),
        }
    }

    /// Wraps any other failure, usually an error from the crate under test.
    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }
}

pub type TestResult<T = ()> = Result<T, TestError>;

/// `assert!` that returns a [`TestError`] from the enclosing test.
#[macro_export]
macro_rules! test_assert {
    ($condition:expr) => {
        if !($condition) {
            return Err($crate::test_helpers::TestError::assertion_failure(
                concat!("assertion failed: ", stringify!($condition)),
            ));
        }
    };
    ($condition:expr, $($fmt:tt)+) => {
        if !($condition) {
            return Err($crate::test_helpers::TestError::assertion_failure(
                format!($($fmt)+),
            ));
        }
    };
}

/// `assert_eq!` that returns a [`TestError`] from the enclosing test.
#[macro_export]
macro_rules! test_assert_eq {
    ($left:expr, $right:expr) => {
        match (&$left, &$right) {
            (left, right) => {
                if !(*left == *right) {
                    return Err($crate::test_helpers::TestError::assertion_failure(format!(
                        "`{}` != `{}`\n  left: {:?}\n right: {:?}",
                        stringify!($left),
                        stringify!($right),
                        left,
                        right
                    )));
                }
            }
        }
    };
    ($left:expr, $right:expr, $($fmt:tt)+) => {
        match (&$left, &$right) {
            (left, right) => {
                if !(*left == *right) {
                    return Err($crate::test_helpers::TestError::assertion_failure(
                        format!($($fmt)+),
                    ));
                }
            }
        }
    };
}

pub mod test_utils {
    use super::{TestError, TestResult};

    pub fn build_request(
        method: &str,
        uri: &str,
        body: Option<String>,
    ) -> TestResult<http::Request<String>> {
        Ok(http::Request::builder()
            .uri(uri)
            .method(method)
            .body(body.unwrap_or_default())?)
    }

    /// `application/x-www-form-urlencoded` POST carrying `fields` in order.
    pub fn build_form_request(
        uri: &str,
        fields: &[(&str, &str)],
    ) -> TestResult<http::Request<String>> {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields)
            .finish();

        Ok(http::Request::builder()
            .uri(uri)
            .method("POST")
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)?)
    }

    pub fn check_status_code(
        actual: http::StatusCode,
        expected: http::StatusCode,
    ) -> TestResult<()> {
        if actual != expected {
            return Err(TestError::assertion_failure(format!(
                "status code mismatch: expected {}, got {}",
                expected, actual
            )));
        }
        Ok(())
    }

    pub fn check_error_contains(
        error: &dyn std::error::Error,
        expected_substring: &str,
    ) -> TestResult<()> {
        let message = error.to_string();
        if !message.contains(expected_substring) {
            return Err(TestError::assertion_failure(format!(
                "error '{}' does not contain '{}'",
                message, expected_substring
            )));
        }
        Ok(())
    }
}
