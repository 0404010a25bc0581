use reqwest::{Client, StatusCode, Url};

use crate::{
    config::Config,
    error::BridgeError,
    types::{RefreshedToken, TokenPair},
};

/// Scope requested during the one-time authorization.
pub const SCOPE: &str = "user-read-currently-playing";

/// Client for the provider's OAuth token endpoint.
///
/// Both grants authenticate with HTTP Basic using the application's client id
/// and secret, and both accept only a `200 OK` answer. There is no retry: a
/// failed exchange is reported once and left to the caller.
#[derive(Debug, Clone)]
pub struct OAuthClient {
    http: Client,
    client_id: String,
    client_secret: String,
    token_url: String,
    auth_url: String,
}

impl OAuthClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: Client::new(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            token_url: config.token_url.clone(),
            auth_url: config.auth_url.clone(),
        }
    }

    /// Builds the provider authorize URL the user is redirected to.
    ///
    /// # Example
    ///
    /// ```
    /// let url = oauth.authorize_url("http://127.0.0.1:8787/callback")?;
    /// // https://accounts.spotify.com/authorize?response_type=code&client_id=...
    /// ```
    pub fn authorize_url(&self, redirect_url: &str) -> Result<String, BridgeError> {
        Url::parse_with_params(
            &self.auth_url,
            &[
                ("response_type", "code"),
                ("client_id", self.client_id.as_str()),
                ("scope", SCOPE),
                ("redirect_uri", redirect_url),
            ],
        )
        .map(String::from)
        .map_err(|e| BridgeError::Config(format!("SPOTIFY_API_AUTH_URL is invalid: {e}")))
    }

    /// Exchanges an authorization code for the initial token pair.
    ///
    /// # Arguments
    ///
    /// * `code` - The `code` query parameter the provider appended to the redirect
    /// * `redirect_url` - Must be identical to the one used for the authorize request
    ///
    /// # Errors
    ///
    /// - [`BridgeError::Upstream`] for any status other than 200
    /// - [`BridgeError::Transport`] when the request fails or the body is not a token pair
    pub async fn exchange_authorization_code(
        &self,
        code: &str,
        redirect_url: &str,
    ) -> Result<TokenPair, BridgeError> {
        let res = self
            .http
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", redirect_url),
            ])
            .send()
            .await?;

        if res.status() != StatusCode::OK {
            return Err(BridgeError::Upstream {
                status: res.status(),
            });
        }

        Ok(res.json::<TokenPair>().await?)
    }

    /// Trades a refresh token for a new access token.
    ///
    /// The returned `refresh_token` is `Some` only when the provider rotated it;
    /// otherwise the stored one stays valid and must be kept.
    ///
    /// # Errors
    ///
    /// Same contract as [`OAuthClient::exchange_authorization_code`].
    pub async fn refresh_access_token(
        &self,
        refresh_token: &str,
    ) -> Result<RefreshedToken, BridgeError> {
        let res = self
            .http
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
                ("client_id", self.client_id.as_str()),
            ])
            .send()
            .await?;

        if res.status() != StatusCode::OK {
            return Err(BridgeError::Upstream {
                status: res.status(),
            });
        }

        Ok(res.json::<RefreshedToken>().await?)
    }
}
