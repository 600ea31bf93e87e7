//! Interactive Google credential acquisition
//!
//! Implements the `ICredentialBroker` port for desktop Linux: an OAuth2
//! Authorization Code flow with PKCE against Google's endpoints, with a
//! loopback HTTP server receiving the redirect. The token exchange is
//! asked for an ID token (`openid` scope), which is what the rest of the
//! sign-in pipeline consumes.
//!
//! ## Components
//!
//! - [`BrokerConfig`] - Redirect port and scope configuration
//! - [`PkceFlow`] - Authorization URL generation and code exchange
//! - [`LoopbackCallbackServer`] - One-shot localhost redirect receiver
//! - [`GoogleCredentialBroker`] - The port implementation tying it together

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use lnxauth_core::ports::{Credential, CredentialRequest, ICredentialBroker};
use oauth2::{
    basic::{BasicErrorResponseType, BasicTokenType},
    AuthUrl, AuthorizationCode, Client, ClientId, CsrfToken, EndpointNotSet, EndpointSet,
    ExtraTokenFields, PkceCodeChallenge, PkceCodeVerifier, RedirectUrl,
    RevocationErrorResponseType, Scope, StandardErrorResponse, StandardRevocableToken,
    StandardTokenIntrospectionResponse, StandardTokenResponse, TokenUrl,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Google OAuth2 authorization endpoint
const AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";

/// Google OAuth2 token endpoint
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Default loopback port for the redirect URI
const DEFAULT_REDIRECT_PORT: u16 = 8791;

// ============================================================================
// BrokerConfig
// ============================================================================

/// Configuration for the interactive credential broker
#[derive(Debug, Clone)]
pub struct BrokerConfig {
    /// Loopback port the callback server binds to
    pub redirect_port: u16,
    /// OAuth2 scopes to request; `openid` is what yields the ID token
    pub scopes: Vec<String>,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            redirect_port: DEFAULT_REDIRECT_PORT,
            scopes: vec![
                "openid".to_string(),
                "email".to_string(),
                "profile".to_string(),
            ],
        }
    }
}

impl BrokerConfig {
    /// Returns the loopback redirect URI for the configured port
    pub fn redirect_uri(&self) -> String {
        format!("http://127.0.0.1:{}/callback", self.redirect_port)
    }
}

// ============================================================================
// PkceFlow
// ============================================================================

/// Extra token-response fields Google returns alongside the access token.
///
/// The basic OAuth2 token response discards unknown fields, and the ID
/// token is the one field this flow actually exists for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleTokenFields {
    /// OpenID Connect ID token (JWT), present when `openid` was requested
    pub id_token: Option<String>,
}

impl ExtraTokenFields for GoogleTokenFields {}

/// Token response type that keeps Google's `id_token` field
pub type GoogleTokenResponse = StandardTokenResponse<GoogleTokenFields, BasicTokenType>;

type GoogleOAuthClient = Client<
    StandardErrorResponse<BasicErrorResponseType>,
    GoogleTokenResponse,
    StandardTokenIntrospectionResponse<GoogleTokenFields, BasicTokenType>,
    StandardRevocableToken,
    StandardErrorResponse<RevocationErrorResponseType>,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// OAuth2 PKCE flow implementation using the `oauth2` crate
///
/// Handles generating authorization URLs with PKCE challenges and
/// exchanging authorization codes for a token response that carries
/// Google's ID token.
pub struct PkceFlow {
    client: GoogleOAuthClient,
    scopes: Vec<String>,
    select_account: bool,
}

impl PkceFlow {
    /// Creates a new PkceFlow for the given client ID and redirect URI
    pub fn new(
        client_id: &str,
        redirect_uri: &str,
        scopes: &[String],
        select_account: bool,
    ) -> Result<Self> {
        let client = Client::new(ClientId::new(client_id.to_string()))
            .set_auth_uri(AuthUrl::new(AUTH_URL.to_string()).context("Invalid authorization URL")?)
            .set_token_uri(TokenUrl::new(TOKEN_URL.to_string()).context("Invalid token URL")?)
            .set_redirect_uri(
                RedirectUrl::new(redirect_uri.to_string()).context("Invalid redirect URI")?,
            );

        Ok(Self {
            client,
            scopes: scopes.to_vec(),
            select_account,
        })
    }

    /// Generates an authorization URL with a PKCE challenge
    ///
    /// # Returns
    /// A tuple of `(authorization_url, csrf_token, pkce_verifier)`.
    /// The `pkce_verifier` must be kept until the code exchange step.
    pub fn generate_auth_url(&self) -> (String, CsrfToken, PkceCodeVerifier) {
        let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();

        let mut auth_request = self.client.authorize_url(CsrfToken::new_random);

        for scope in &self.scopes {
            auth_request = auth_request.add_scope(Scope::new(scope.clone()));
        }

        if self.select_account {
            auth_request = auth_request.add_extra_param("prompt", "select_account");
        }

        let (auth_url, csrf_token) = auth_request.set_pkce_challenge(pkce_challenge).url();

        debug!("Generated authorization URL");
        (auth_url.to_string(), csrf_token, pkce_verifier)
    }

    /// Exchanges an authorization code for a Google ID token
    ///
    /// # Arguments
    /// * `code` - The authorization code received from the callback
    /// * `pkce_verifier` - The PKCE verifier generated alongside the auth URL
    ///
    /// # Returns
    /// The ID token (JWT) on success
    pub async fn exchange_code(
        &self,
        code: String,
        pkce_verifier: PkceCodeVerifier,
    ) -> Result<String> {
        info!("Exchanging authorization code for tokens");

        let http_client = reqwest::Client::new();
        let token_result = self
            .client
            .exchange_code(AuthorizationCode::new(code))
            .set_pkce_verifier(pkce_verifier)
            .request_async(&http_client)
            .await
            .context("Failed to exchange authorization code")?;

        let id_token = token_result
            .extra_fields()
            .id_token
            .clone()
            .filter(|t| !t.is_empty())
            .context("Token response did not include an ID token")?;

        info!("Successfully obtained Google ID token");
        Ok(id_token)
    }
}

// ============================================================================
// LoopbackCallbackServer
// ============================================================================

/// Minimal HTTP server that listens on localhost for the OAuth2 redirect callback.
///
/// Starts an HTTP server on the configured loopback port and waits for the
/// provider to redirect the user's browser back with an authorization code.
/// Once the code is received, it responds with a success HTML page and
/// shuts down.
pub struct LoopbackCallbackServer;

/// Parameters extracted from the OAuth2 callback
#[derive(Debug)]
pub struct CallbackParams {
    /// The authorization code
    pub code: String,
    /// The CSRF state parameter
    pub state: String,
}

impl LoopbackCallbackServer {
    /// Starts the local callback server and waits for the OAuth redirect
    ///
    /// # Returns
    /// The callback parameters (code and state) extracted from the redirect URL
    pub async fn start(port: u16) -> Result<CallbackParams> {
        use http_body_util::Full;
        use hyper::body::Bytes;
        use hyper::server::conn::http1;
        use hyper::service::service_fn;
        use hyper::{Request, Response, StatusCode};
        use hyper_util::rt::TokioIo;
        use tokio::net::TcpListener;
        use tokio::sync::oneshot;

        let addr = format!("127.0.0.1:{}", port);
        info!("Starting local OAuth callback server on {}", addr);

        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind callback server to {}", addr))?;

        let (tx, rx) = oneshot::channel::<CallbackParams>();
        let tx = std::sync::Arc::new(tokio::sync::Mutex::new(Some(tx)));

        // Accept a single connection
        let (stream, _addr) = listener
            .accept()
            .await
            .context("Failed to accept connection on callback server")?;

        let io = TokioIo::new(stream);
        let tx_clone = tx.clone();

        let service = service_fn(move |req: Request<hyper::body::Incoming>| {
            let tx_inner = tx_clone.clone();
            async move {
                let uri = req.uri().to_string();
                debug!("Callback server received request: {}", uri);

                // Parse query parameters from the URI
                let params = parse_callback_params(&uri);

                match params {
                    Some(callback_params) => {
                        // Send the params through the channel
                        if let Some(sender) = tx_inner.lock().await.take() {
                            let _ = sender.send(callback_params);
                        }

                        // Return success page
                        let html = success_html();
                        Ok::<_, hyper::Error>(
                            Response::builder()
                                .status(StatusCode::OK)
                                .header("Content-Type", "text/html; charset=utf-8")
                                .body(Full::new(Bytes::from(html)))
                                .unwrap(),
                        )
                    }
                    None => {
                        // Return error page
                        let html = error_html("Missing authorization code in callback");
                        Ok(Response::builder()
                            .status(StatusCode::BAD_REQUEST)
                            .header("Content-Type", "text/html; charset=utf-8")
                            .body(Full::new(Bytes::from(html)))
                            .unwrap())
                    }
                }
            }
        });

        // Serve the single connection
        tokio::spawn(async move {
            if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                warn!("Callback server connection error: {}", e);
            }
        });

        // Wait for the callback parameters
        let params = rx
            .await
            .context("Callback server channel closed without receiving parameters")?;

        info!("Received OAuth callback with authorization code");
        Ok(params)
    }
}

/// Parses the authorization code and state from a callback URI
fn parse_callback_params(uri: &str) -> Option<CallbackParams> {
    let url = url::Url::parse(&format!("http://localhost{}", uri)).ok()?;
    let mut code = None;
    let mut state = None;

    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "code" => code = Some(value.to_string()),
            "state" => state = Some(value.to_string()),
            _ => {}
        }
    }

    Some(CallbackParams {
        code: code?,
        state: state.unwrap_or_default(),
    })
}

/// Returns the HTML for a successful authentication page
fn success_html() -> String {
    r#"<!DOCTYPE html>
<html>
<head><title>LNXAuth - Sign-In Successful</title></head>
<body style="font-family: sans-serif; text-align: center; padding-top: 50px;">
    <h1>Sign-In Successful</h1>
    <p>You have signed in with your Google account.</p>
    <p>You can close this window and return to LNXAuth.</p>
    <script>setTimeout(function() { window.close(); }, 3000);</script>
</body>
</html>"#
        .to_string()
}

/// Returns the HTML for an authentication error page
fn error_html(message: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>LNXAuth - Sign-In Error</title></head>
<body style="font-family: sans-serif; text-align: center; padding-top: 50px;">
    <h1>Sign-In Error</h1>
    <p>{}</p>
    <p>Please close this window and try again.</p>
</body>
</html>"#,
        message
    )
}

// ============================================================================
// GoogleCredentialBroker
// ============================================================================

/// Credential broker that runs the full interactive Google sign-in flow.
///
/// Combines [`PkceFlow`], [`LoopbackCallbackServer`], and browser launching:
///
/// 1. Generates a PKCE authorization URL for the requested client ID
/// 2. Opens the user's browser to the Google sign-in page
/// 3. Starts a loopback callback server to receive the redirect
/// 4. Exchanges the authorization code for an ID token
/// 5. Wraps the ID token as a credential for the sign-in use case
pub struct GoogleCredentialBroker {
    config: BrokerConfig,
}

impl GoogleCredentialBroker {
    /// Creates a new broker with the given configuration
    pub fn new(config: BrokerConfig) -> Self {
        Self { config }
    }

    /// Returns a reference to the current configuration
    pub fn config(&self) -> &BrokerConfig {
        &self.config
    }
}

#[async_trait]
impl ICredentialBroker for GoogleCredentialBroker {
    async fn get_credential(&self, request: &CredentialRequest) -> Result<Credential> {
        info!("Starting interactive Google sign-in flow");

        let flow = PkceFlow::new(
            &request.server_client_id,
            &self.config.redirect_uri(),
            &self.config.scopes,
            request.allow_new_accounts,
        )?;

        let (auth_url, csrf_token, pkce_verifier) = flow.generate_auth_url();

        info!("Opening browser for authentication");
        webbrowser::open(&auth_url).context("Failed to open browser for authentication")?;

        let callback = LoopbackCallbackServer::start(self.config.redirect_port).await?;

        if callback.state != *csrf_token.secret() {
            bail!("State parameter mismatch in OAuth callback");
        }

        let id_token = flow.exchange_code(callback.code, pkce_verifier).await?;

        info!("Interactive Google sign-in flow completed");
        Ok(Credential::google(id_token))
    }
}
