//! Token endpoint round-trip shared by the authenticators.

use serde::Deserialize;
use tracing::debug;

use salesforce_rest_client::SfHttpClient;

use crate::error::{Error, ErrorKind, Result};
use crate::token::TokenResponse;

/// OAuth error response.
#[derive(Debug, Deserialize)]
struct OAuthErrorResponse {
    error: String,
    #[serde(default)]
    error_description: String,
}

/// POST a form to the token endpoint and parse the JSON token response.
///
/// Salesforce answers failed grants with an OAuth error body
/// (`{"error": ..., "error_description": ...}`); those become
/// [`ErrorKind::OAuth`].
pub(crate) async fn request_token(
    http: &SfHttpClient,
    auth_url: &str,
    form: Vec<(&'static str, String)>,
) -> Result<TokenResponse> {
    let request = http.post(auth_url).form(form);
    let response = http.execute_raw(&request).await?;
    let status = response.status();

    if !(200..300).contains(&status) {
        let body = response.text().await.unwrap_or_default();
        debug!(status, "Token endpoint rejected the grant");

        return Err(match serde_json::from_str::<OAuthErrorResponse>(&body) {
            Ok(error) => Error::new(ErrorKind::OAuth {
                error: error.error,
                description: error.error_description,
            }),
            Err(_) => Error::new(ErrorKind::Http(format!(
                "Unable to connect to Salesforce: token endpoint returned HTTP {}",
                status
            ))),
        });
    }

    Ok(response.json().await?)
}
