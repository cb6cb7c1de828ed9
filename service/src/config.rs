use clap::builder::TypedValueParser as _;
use clap::Parser;
use dotenvy::dotenv;
use log::LevelFilter;
use std::fmt;
use std::str::FromStr;

/// Default LINE authorization host (user consent screen).
pub const DEFAULT_LINE_AUTH_BASE_URL: &str = "https://access.line.me";

/// Default LINE API host (token and profile endpoints).
pub const DEFAULT_LINE_API_BASE_URL: &str = "https://api.line.me";

/// Scopes requested on the authorize redirect when `LINE_SCOPE` is not set.
pub const DEFAULT_LINE_SCOPE: &str = "profile openid email";

#[derive(Clone, Debug, PartialEq)]
pub enum RustEnv {
    Development,
    Production,
    Staging,
}

#[derive(Debug, PartialEq, Eq)]
pub struct RustEnvParseError;

impl FromStr for RustEnv {
    type Err = RustEnvParseError;
    fn from_str(level: &str) -> Result<RustEnv, Self::Err> {
        match level.to_lowercase().as_str() {
            "development" => Ok(RustEnv::Development),
            "production" => Ok(RustEnv::Production),
            "staging" => Ok(RustEnv::Staging),
            _ => Err(RustEnvParseError),
        }
    }
}

impl fmt::Display for RustEnv {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RustEnv::Development => write!(f, "development"),
            RustEnv::Production => write!(f, "production"),
            RustEnv::Staging => write!(f, "staging"),
        }
    }
}

#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// A list of CORS origin prefixes that are allowed to receive server responses.
    #[arg(
        long,
        env,
        value_delimiter = ',',
        use_value_delimiter = true,
        default_value = "http://localhost:3000,http://localhost:3001"
    )]
    pub allowed_origins: Vec<String>,

    /// The LINE Login channel ID (OAuth client id).
    #[arg(long, env)]
    line_channel_id: Option<String>,

    /// The LINE Login channel secret (OAuth client secret).
    #[arg(long, env)]
    line_channel_secret: Option<String>,

    /// The redirect URI registered with LINE. Must exactly match the URI used
    /// on the authorize redirect.
    #[arg(long, env, default_value = "http://localhost:3000/callback")]
    line_redirect_uri: String,

    /// Base URL of the LINE authorization host.
    /// Override in tests to point at a mock server.
    #[arg(long, env, default_value = DEFAULT_LINE_AUTH_BASE_URL)]
    line_auth_base_url: String,

    /// Base URL of the LINE API host serving the token and profile endpoints.
    /// Override in tests to point at a mock server.
    #[arg(long, env, default_value = DEFAULT_LINE_API_BASE_URL)]
    line_api_base_url: String,

    /// Space separated scopes requested on the authorize redirect.
    #[arg(long, env, default_value = DEFAULT_LINE_SCOPE)]
    line_scope: String,

    /// Timeout in seconds applied to every outbound call to LINE
    #[arg(long, env, default_value_t = 10)]
    pub http_timeout_secs: u64,

    /// The host interface to listen for incoming connections
    #[arg(short, long, env, default_value = "127.0.0.1")]
    pub interface: Option<String>,

    /// The host TCP port to listen for incoming connections
    #[arg(short, long, env, default_value_t = 7071)]
    pub port: u16,

    /// Set the log level verbosity threshold (level) to control what gets displayed on console output
    #[arg(
        short,
        long,
        env,
        default_value_t = LevelFilter::Info,
        value_parser = clap::builder::PossibleValuesParser::new(["OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"])
            .map(|s| s.parse::<LevelFilter>().unwrap()),
        )]
    pub log_level_filter: LevelFilter,

    /// Set the Rust runtime environment to use.
    #[arg(
    short,
    long,
    env,
    default_value_t = RustEnv::Development,
    value_parser = clap::builder::PossibleValuesParser::new([
        "DEVELOPMENT", "PRODUCTION", "STAGING",
        "development", "production", "staging"
    ])
        .map(|s| s.parse::<RustEnv>().unwrap()),
    )]
    pub runtime_env: RustEnv,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        // Load .env file first
        dotenv().ok();
        // Then parse the command line parameters and flags
        Config::parse()
    }

    pub fn set_line_channel_credentials(
        mut self,
        channel_id: impl Into<String>,
        channel_secret: impl Into<String>,
    ) -> Self {
        self.line_channel_id = Some(channel_id.into());
        self.line_channel_secret = Some(channel_secret.into());
        self
    }

    pub fn set_line_base_urls(
        mut self,
        auth_base_url: impl Into<String>,
        api_base_url: impl Into<String>,
    ) -> Self {
        self.line_auth_base_url = auth_base_url.into();
        self.line_api_base_url = api_base_url.into();
        self
    }

    /// Returns the LINE channel ID, treating an empty value as unset.
    pub fn line_channel_id(&self) -> Option<String> {
        self.line_channel_id.clone().filter(|id| !id.is_empty())
    }

    /// Returns the LINE channel secret, treating an empty value as unset.
    pub fn line_channel_secret(&self) -> Option<String> {
        self.line_channel_secret
            .clone()
            .filter(|secret| !secret.is_empty())
    }

    pub fn line_redirect_uri(&self) -> &str {
        &self.line_redirect_uri
    }

    pub fn line_auth_base_url(&self) -> &str {
        &self.line_auth_base_url
    }

    pub fn line_api_base_url(&self) -> &str {
        &self.line_api_base_url
    }

    pub fn line_scope(&self) -> &str {
        &self.line_scope
    }

    /// True when both halves of the LINE client credentials are present.
    pub fn line_login_enabled(&self) -> bool {
        self.line_channel_id().is_some() && self.line_channel_secret().is_some()
    }
}
