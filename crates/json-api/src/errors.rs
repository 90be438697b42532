//! JSON error responses.

use salvo::{
    Depot, Request, Response, Writer, async_trait,
    http::StatusCode,
    oapi::{self, Components, Content, EndpointOutRegister, Operation, ToSchema},
    writing::Json,
};
use serde::{Deserialize, Serialize};

/// Message returned for every server-side failure.
pub(crate) const SERVER_ERROR_MESSAGE: &str = "Server error";

/// Error Response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct ErrorResponse {
    /// Fixed, caller-safe error message
    pub error: String,

    /// Failure detail, only populated by operational endpoints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// An HTTP error rendered as an [`ErrorResponse`] body.
#[derive(Debug)]
pub(crate) struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl ApiError {
    /// A 500 with the fixed message and no detail.
    pub(crate) fn server_error() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: ErrorResponse {
                error: SERVER_ERROR_MESSAGE.to_string(),
                details: None,
            },
        }
    }

    /// A 500 that also exposes `details` to the caller.
    pub(crate) fn server_error_with_details(details: impl Into<String>) -> Self {
        let mut error = Self::server_error();
        error.body.details = Some(details.into());
        error
    }
}

#[async_trait]
impl Writer for ApiError {
    async fn write(self, _req: &mut Request, _depot: &mut Depot, res: &mut Response) {
        res.status_code(self.status);
        res.render(Json(self.body));
    }
}

impl EndpointOutRegister for ApiError {
    fn register(components: &mut Components, operation: &mut Operation) {
        operation.responses.insert(
            StatusCode::INTERNAL_SERVER_ERROR.as_str(),
            oapi::Response::new("Server error")
                .add_content("application/json", Content::new(ErrorResponse::to_schema(components))),
        );
    }
}
