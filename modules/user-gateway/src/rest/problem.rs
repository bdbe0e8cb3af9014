//! RFC 9457 Problem Details responses.

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::{HeaderValue, StatusCode, header};
use serde::{Serialize, Serializer};
use user_service_sdk::UserServiceError;

use crate::error::GatewayError;

/// Content type for Problem Details as per RFC 9457.
pub const APPLICATION_PROBLEM_JSON: &str = "application/problem+json";

#[allow(clippy::trivially_copy_pass_by_ref)] // serde requires &T signature
fn serialize_status_code<S>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u16(status.as_u16())
}

#[derive(Debug, Clone, Serialize)]
#[must_use]
pub struct Problem {
    #[serde(rename = "type")]
    pub type_url: String,
    pub title: String,
    /// Serialized as a bare number.
    #[serde(serialize_with = "serialize_status_code")]
    pub status: StatusCode,
    pub detail: String,
    /// Machine-readable error code.
    pub code: String,
}

impl Problem {
    pub fn new(status: StatusCode, title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            type_url: "about:blank".to_owned(),
            title: title.into(),
            status,
            detail: detail.into(),
            code: String::new(),
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }
}

pub fn bad_request(detail: impl Into<String>) -> Problem {
    Problem::new(StatusCode::BAD_REQUEST, "Bad Request", detail)
}

pub fn bad_gateway(detail: impl Into<String>) -> Problem {
    Problem::new(StatusCode::BAD_GATEWAY, "Bad Gateway", detail)
}

pub fn internal_error(detail: impl Into<String>) -> Problem {
    Problem::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", detail)
}

impl From<GatewayError> for Problem {
    fn from(err: GatewayError) -> Self {
        let detail = err.to_string();
        match err {
            GatewayError::InvalidId { .. } => bad_request(detail).with_code("INVALID_ID"),
            GatewayError::Upstream { source, .. } => match source {
                UserServiceError::InvalidArgument { .. } => {
                    bad_request(detail).with_code("INVALID_ARGUMENT")
                }
                UserServiceError::Transport(_) => {
                    tracing::warn!(error = %detail, "user service unreachable");
                    bad_gateway(detail).with_code("UPSTREAM_UNAVAILABLE")
                }
                UserServiceError::Internal { .. } => {
                    tracing::error!(error = %detail, "user service failed");
                    internal_error(detail).with_code("UPSTREAM_INTERNAL")
                }
            },
        }
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status = self.status;
        let mut resp = Json(self).into_response();
        *resp.status_mut() = status;
        resp.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(APPLICATION_PROBLEM_JSON),
        );
        resp
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        Problem::from(self).into_response()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn upstream(source: UserServiceError) -> GatewayError {
        GatewayError::upstream("get user")(source)
    }

    #[test]
    fn error_kinds_map_to_statuses() {
        let cases = [
            (
                GatewayError::InvalidId {
                    value: "x".to_owned(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                upstream(UserServiceError::invalid_argument("bad id")),
                StatusCode::BAD_REQUEST,
            ),
            (
                upstream(UserServiceError::Transport("connection refused".to_owned())),
                StatusCode::BAD_GATEWAY,
            ),
            (
                upstream(UserServiceError::internal("get user failed: boom")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(Problem::from(err).status, status);
        }
    }

    #[test]
    fn response_is_problem_json_with_numeric_status() {
        let resp = bad_request("invalid user id 'x'").into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let ct = resp
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");
        assert_eq!(ct, APPLICATION_PROBLEM_JSON);

        let json = serde_json::to_value(internal_error("boom")).unwrap();
        assert_eq!(json["status"], 500);
        assert_eq!(json["type"], "about:blank");
    }

    #[test]
    fn detail_keeps_action_and_cause() {
        let problem = Problem::from(upstream(UserServiceError::internal("get user failed: boom")));
        assert_eq!(problem.detail, "get user failed: internal error: get user failed: boom");
    }
}
