//! Signed session cookie carrying the quiz token for the browser flow.
//!
//! The cookie value is `<token>.<hex hmac-sha256(token)>`; anything that does
//! not verify is treated as if no cookie was sent.

use axum::http::{header, HeaderMap, HeaderValue};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

pub const SESSION_COOKIE: &str = "quiz_session";

#[derive(Clone)]
pub struct CookieSigner {
    key: Vec<u8>,
}

impl std::fmt::Debug for CookieSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CookieSigner").finish_non_exhaustive()
    }
}

impl CookieSigner {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            key: secret.as_ref().to_vec(),
        }
    }

    fn mac(&self) -> Option<HmacSha256> {
        HmacSha256::new_from_slice(&self.key).ok()
    }

    pub fn sign(&self, token: &str) -> Option<String> {
        let mut mac = self.mac()?;
        mac.update(token.as_bytes());
        Some(format!("{}.{}", token, hex::encode(mac.finalize().into_bytes())))
    }

    pub fn verify(&self, value: &str) -> Option<String> {
        let (token, signature) = value.rsplit_once('.')?;
        let signature = hex::decode(signature).ok()?;
        let mut mac = self.mac()?;
        mac.update(token.as_bytes());
        mac.verify_slice(&signature).ok()?;
        Some(token.to_string())
    }

    pub fn set_cookie_header(&self, token: &str) -> Option<HeaderValue> {
        let cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            SESSION_COOKIE,
            self.sign(token)?
        );
        HeaderValue::from_str(&cookie).ok()
    }

    /// Extracts and verifies the session token from the request's `Cookie` headers.
    pub fn token_from_headers(&self, headers: &HeaderMap) -> Option<String> {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|raw| raw.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == SESSION_COOKIE)
            .and_then(|(_, value)| self.verify(value))
    }
}
