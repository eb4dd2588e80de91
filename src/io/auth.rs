use reqwest::blocking::{Client, multipart::Form};
use reqwest::header::ACCEPT;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::config::{Credentials, SessionToken, join_url};
use crate::error::{Result, ToolError};

#[derive(Debug, Deserialize)]
struct AuthResponse {
    success: bool,
    #[serde(default)]
    member_token: Option<String>,
}

/// Exchanges member credentials for a session token.
#[instrument(level = "info", skip(client, credentials), fields(email = %credentials.email))]
pub fn authenticate(client: &Client, base_url: &str, credentials: &Credentials) -> Result<SessionToken> {
    let form = Form::new()
        .text("Member_Email", credentials.email.clone())
        .text("Member_Password", credentials.password.clone());

    let response = client
        .post(join_url(base_url, "member/authenticate"))
        .header(ACCEPT, "application/json")
        .multipart(form)
        .send()?;

    let status = response.status();
    if !status.is_success() {
        return Err(ToolError::Authentication(format!(
            "API returned status {status}"
        )));
    }

    let body = response.text()?;
    let token = parse_auth_response(&body)?;
    info!("authenticated");
    Ok(token)
}

/// Interprets the body of the authenticate endpoint.
pub fn parse_auth_response(body: &str) -> Result<SessionToken> {
    let response: AuthResponse = serde_json::from_str(body)?;
    match response {
        AuthResponse {
            success: true,
            member_token: Some(token),
        } if !token.is_empty() => Ok(SessionToken::new(token)),
        AuthResponse { success: true, .. } => Err(ToolError::Authentication(
            "response did not include a member token".into(),
        )),
        AuthResponse { success: false, .. } => {
            Err(ToolError::Authentication("credentials rejected".into()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_successful_response() {
        let token = parse_auth_response(r#"{"success": true, "member_token": "abc123"}"#)
            .expect("token parsed");
        assert_eq!(token.expose(), "abc123");
    }

    #[test]
    fn rejects_failed_login() {
        let err = parse_auth_response(r#"{"success": false}"#).unwrap_err();
        assert!(matches!(err, ToolError::Authentication(_)));
    }

    #[test]
    fn rejects_missing_token() {
        let err = parse_auth_response(r#"{"success": true, "member_token": ""}"#).unwrap_err();
        assert!(matches!(err, ToolError::Authentication(_)));
    }
}
