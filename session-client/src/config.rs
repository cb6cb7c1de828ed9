use std::path::PathBuf;

use clap::Args;
use line_auth::oauth::DEFAULT_AUTH_BASE_URL;
use line_auth::oauth::providers::line::DEFAULT_SCOPE;

/// Client-side LINE Login settings.
#[derive(Args, Clone, Debug)]
pub struct ClientConfig {
    /// The LINE Login channel ID. Login is refused while this is empty.
    #[arg(long, env, default_value = "")]
    pub line_channel_id: String,

    /// Base URL of the backend serving /api/lineCallback. Leave empty to
    /// receive a placeholder profile without contacting LINE.
    #[arg(long, env, default_value = "http://localhost:7071")]
    pub line_backend_url: String,

    /// Redirect URI registered with LINE. The backend must use the same value.
    #[arg(long, env, default_value = "http://localhost:3000/callback")]
    pub line_redirect_uri: String,

    /// Base URL of the LINE authorization host.
    #[arg(long, env, default_value = DEFAULT_AUTH_BASE_URL)]
    pub line_auth_base_url: String,

    /// Space separated scopes requested on the authorize redirect.
    #[arg(long, env, default_value = DEFAULT_SCOPE)]
    pub line_scope: String,

    /// File holding the cached profile between runs.
    #[arg(long, env, default_value = ".line_session.json")]
    pub line_session_file: PathBuf,
}
