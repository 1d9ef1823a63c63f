use std::future::Future;

use http::StatusCode;
use tracing::warn;

use crate::error::{ApiError, Result};
use crate::observability::metrics::get_metrics;
use crate::transport::TransportResponse;

/// Sends with `token`; on 401 renews once and sends again.
///
/// `renew` receives the rejected token so concurrent callers holding the
/// same one can share a single replacement.
///
/// A second 401 becomes `ApiError::Authentication`. Every other response,
/// successful or not, is handed back to the caller untouched.
pub async fn run_with_auth_retry<S, SFut, R, RFut>(
    token: String,
    mut send: S,
    renew: R,
) -> Result<TransportResponse>
where
    S: FnMut(String) -> SFut,
    SFut: Future<Output = Result<TransportResponse>>,
    R: FnOnce(String) -> RFut,
    RFut: Future<Output = Result<String>>,
{
    let response = send(token.clone()).await?;
    if !is_auth_failure(&response) {
        return Ok(response);
    }

    warn!(status = %response.status, "request rejected as unauthenticated, renewing token and retrying once");
    get_metrics().auth_retries.inc();

    let renewed = renew(token).await?;
    let response = send(renewed).await?;
    if is_auth_failure(&response) {
        return Err(ApiError::Authentication {
            status: response.status.as_u16(),
            body: response.body,
        });
    }
    Ok(response)
}

pub fn is_auth_failure(response: &TransportResponse) -> bool {
    response.status == StatusCode::UNAUTHORIZED
}
