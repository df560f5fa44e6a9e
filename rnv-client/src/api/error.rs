//! Start.Info client error types.

use crate::domain::InvalidParameter;

/// Errors from the Start.Info HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum RnvError {
    /// A parameter was missing, empty or out of range. Raised before any I/O.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    /// The API answered with a status other than 200.
    #[error("server returned {status} for {endpoint} with parameters {params:?}")]
    Remote {
        status: u16,
        endpoint: String,
        params: Vec<(String, String)>,
    },

    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not valid JSON (or did not fit a model)
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// The client could not be constructed from its configuration
    #[error("configuration error: {0}")]
    Config(String),
}

impl RnvError {
    /// HTTP status of a [`RnvError::Remote`] error.
    pub fn status(&self) -> Option<u16> {
        match self {
            RnvError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, RnvError::InvalidArgument { .. })
    }
}

impl From<InvalidParameter> for RnvError {
    fn from(err: InvalidParameter) -> Self {
        RnvError::InvalidArgument {
            name: err.name,
            reason: err.reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = RnvError::InvalidArgument {
            name: "hafasID",
            reason: "must not be empty".into(),
        };
        assert_eq!(err.to_string(), "invalid argument `hafasID`: must not be empty");

        let err = RnvError::Remote {
            status: 404,
            endpoint: "/regions/rnv/modules/ticker".into(),
            params: vec![("lines".into(), "1;5".into())],
        };
        assert_eq!(
            err.to_string(),
            r#"server returned 404 for /regions/rnv/modules/ticker with parameters [("lines", "1;5")]"#
        );
        assert_eq!(err.status(), Some(404));

        let err = RnvError::Config("API token not set".into());
        assert_eq!(err.to_string(), "configuration error: API token not set");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn invalid_parameter_converts() {
        let err: RnvError = crate::domain::TourType::try_from(1).unwrap_err().into();
        assert!(err.is_invalid_argument());
        match err {
            RnvError::InvalidArgument { name, .. } => assert_eq!(name, "tourType"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
