use url::Url;

use crate::error::{Error, ErrorKind};

/// What LINE appended to the redirect URI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
}

impl CallbackParams {
    /// Read `code` and `state` from the full URL the browser landed on.
    pub fn from_redirect_url(redirect_url: &str) -> Result<Self, Error> {
        let url = Url::parse(redirect_url.trim())
            .map_err(|e| Error::with_source(ErrorKind::InvalidRedirectUrl, e))?;

        let mut params = CallbackParams::default();
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "code" if params.code.is_none() => params.code = Some(value.into_owned()),
                "state" if params.state.is_none() => params.state = Some(value.into_owned()),
                _ => {}
            }
        }
        Ok(params)
    }
}
