use std::convert::Infallible;

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use tracing::debug;

use super::dto::RegisterRequest;

/// Reads a `RegisterRequest` from a JSON or url-encoded body.
///
/// Never rejects: an unsupported content type or an undecodable body yields an
/// empty request, which then fails validation on the first field.
pub struct RegisterPayload(pub RegisterRequest);

#[async_trait]
impl<S> FromRequest<S> for RegisterPayload
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let payload = if content_type.starts_with("application/json") {
            match Json::<RegisterRequest>::from_request(req, state).await {
                Ok(Json(p)) => p,
                Err(e) => {
                    debug!(error = %e.body_text(), "undecodable json body");
                    RegisterRequest::default()
                }
            }
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            match Form::<RegisterRequest>::from_request(req, state).await {
                Ok(Form(p)) => p,
                Err(e) => {
                    debug!(error = %e.body_text(), "undecodable form body");
                    RegisterRequest::default()
                }
            }
        } else {
            debug!(%content_type, "unsupported content type");
            RegisterRequest::default()
        };

        Ok(RegisterPayload(payload))
    }
}
