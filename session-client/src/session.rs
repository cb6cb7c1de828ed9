//! Client-side LINE login session.

use line_auth::oauth::{authorization_url, CsrfState, Endpoints, DEFAULT_API_BASE_URL};
use line_auth::UserProfile;
use log::*;

use crate::callback::CallbackParams;
use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind};
use crate::exchange::CodeExchanger;
use crate::storage::Storage;

pub const USER_KEY: &str = "line_user_data";
pub const STATE_KEY: &str = "line_state";
pub const NONCE_KEY: &str = "line_nonce";
pub const ACCESS_TOKEN_KEY: &str = "line_access_token";
pub const ID_TOKEN_KEY: &str = "line_id_token";

const SESSION_KEYS: [&str; 5] = [USER_KEY, STATE_KEY, NONCE_KEY, ACCESS_TOKEN_KEY, ID_TOKEN_KEY];

/// The signed-in LINE user, if any, plus the in-flight login attempt.
///
/// The cached profile lives in `store`. The CSRF nonce lives in `nonce_store`,
/// which is scoped to this process.
pub struct Session {
    config: ClientConfig,
    store: Box<dyn Storage>,
    nonce_store: Box<dyn Storage>,
    exchanger: Box<dyn CodeExchanger>,
    user: Option<UserProfile>,
}

impl Session {
    /// Open a session, restoring any cached profile.
    ///
    /// A cached profile that cannot be read is logged and ignored.
    pub fn new(
        config: ClientConfig,
        store: Box<dyn Storage>,
        nonce_store: Box<dyn Storage>,
        exchanger: Box<dyn CodeExchanger>,
    ) -> Self {
        let user = match store.get(USER_KEY) {
            Ok(Some(saved)) => serde_json::from_str::<UserProfile>(&saved)
                .map_err(|e| warn!("Failed to parse stored user data: {e}"))
                .ok(),
            Ok(None) => None,
            Err(e) => {
                warn!("Failed to read stored user data: {e}");
                None
            }
        };

        Self {
            config,
            store,
            nonce_store,
            exchanger,
            user,
        }
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    /// Start a login: store a fresh CSRF nonce and return the LINE authorize
    /// URL to send the whole page to.
    pub fn login(&mut self) -> Result<String, Error> {
        if self.config.line_channel_id.is_empty() {
            warn!("LINE_CHANNEL_ID is not configured");
            return Err(Error::new(ErrorKind::NotConfigured));
        }

        let state = CsrfState::generate();
        self.nonce_store.set(STATE_KEY, state.as_str())?;

        let endpoints =
            Endpoints::from_bases(&self.config.line_auth_base_url, DEFAULT_API_BASE_URL);
        let request = authorization_url(
            &endpoints,
            &self.config.line_channel_id,
            &self.config.line_redirect_uri,
            &state,
            &self.config.line_scope,
        )?;

        info!("Redirecting to LINE OAuth: {}", request.url);
        Ok(request.url)
    }

    /// Finish a login from the parameters LINE redirected back with.
    ///
    /// The stored nonce is consumed before it is compared, so a callback can
    /// be attempted at most once per `login`. Nothing is sent to the backend
    /// unless the echoed state matches.
    pub async fn complete_login(&mut self, params: CallbackParams) -> Result<&UserProfile, Error> {
        let stored_state = self.nonce_store.get(STATE_KEY)?;
        self.nonce_store.remove(STATE_KEY)?;
        self.nonce_store.remove(NONCE_KEY)?;

        let state_matches = match (stored_state, params.state.as_deref()) {
            (Some(stored), Some(echoed)) => CsrfState::from_string(stored).matches(echoed),
            _ => false,
        };
        if !state_matches {
            warn!("State mismatch on LINE callback");
            return Err(Error::new(ErrorKind::CsrfMismatch));
        }

        let code = params
            .code
            .as_deref()
            .filter(|code| !code.is_empty())
            .ok_or_else(|| Error::new(ErrorKind::MissingCode))?;

        let user = self.exchanger.exchange(code).await?;
        self.store.set(USER_KEY, &serde_json::to_string(&user)?)?;

        info!("Logged in as {} ({})", user.display_name, user.user_id);
        Ok(self.user.insert(user))
    }

    /// Forget the user and every LINE-related key. Safe to call repeatedly.
    ///
    /// Every key is attempted in both stores even when one removal fails; the
    /// first failure is returned afterwards.
    pub fn logout(&mut self) -> Result<(), Error> {
        self.user = None;

        let mut first_error = None;
        for key in SESSION_KEYS {
            for store in [&mut self.store, &mut self.nonce_store] {
                if let Err(e) = store.remove(key) {
                    warn!("Failed to remove {key} during logout: {e}");
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => {
                debug!("Cleared LINE session");
                Ok(())
            }
        }
    }
}
