//! Share targets derived from the widget inputs.
//!
//! Everything here is a pure function of the username, the library name and
//! the page origin. Nothing is cached beyond the lifetime of the inputs.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Label used when no library name is supplied.
pub const DEFAULT_LIBRARY_NAME: &str = "Classical Music Library";

/// Path prefix of the public library page.
pub const LIBRARY_PATH: &str = "/library/";

const WHATSAPP_BASE: &str = "https://wa.me/?text=";

/// Errors raised while building share targets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShareError {
    #[error("username must not be empty")]
    EmptyUsername,
    #[error("invalid page origin: {0}")]
    InvalidOrigin(String),
}

/// Result type for share target construction.
pub type ShareResult<T> = Result<T, ShareError>;

/// Inputs of the share widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareProps {
    /// Whose library page the link points at.
    pub username: String,
    /// Display name of the library (falls back to [`DEFAULT_LIBRARY_NAME`]).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub library_name: Option<String>,
}

impl ShareProps {
    /// Props for a user's library with the default label.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            library_name: None,
        }
    }

    /// Set the library display name.
    pub fn with_library_name(mut self, name: impl Into<String>) -> Self {
        self.library_name = Some(name.into());
        self
    }

    /// The library name to show, with empty strings treated as absent.
    pub fn library_name(&self) -> &str {
        match self.library_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => DEFAULT_LIBRARY_NAME,
        }
    }
}

/// The outbound links offered by the share panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareTargets {
    /// Public URL of the library page.
    pub share_url: String,
    /// Human-readable invitation text.
    pub share_message: String,
    /// WhatsApp deep link carrying message and URL.
    pub whatsapp_link: String,
    /// Mail client deep link with subject and body.
    pub mailto_link: String,
}

impl ShareTargets {
    /// Build the targets for `props` relative to the page `origin`.
    pub fn new(origin: &str, props: &ShareProps) -> ShareResult<Self> {
        if props.username.is_empty() {
            return Err(ShareError::EmptyUsername);
        }
        let origin = normalize_origin(origin)?;

        // The username goes into the path verbatim.
        let share_url = format!("{}{}{}", origin, LIBRARY_PATH, props.username);
        let share_message = format!("Check out my {} on MySTRO!", props.library_name());

        let whatsapp_text = format!("{} {}", share_message, share_url);
        let whatsapp_link = format!("{}{}", WHATSAPP_BASE, encode_component(&whatsapp_text));

        let mail_body = format!("Here's my library: {}", share_url);
        let mailto_link = format!(
            "mailto:?subject={}&body={}",
            encode_component(&share_message),
            encode_component(&mail_body),
        );

        Ok(Self {
            share_url,
            share_message,
            whatsapp_link,
            mailto_link,
        })
    }
}

/// Percent-encode a URI component the way browsers' `encodeURIComponent`
/// does: `urlencoding` keeps only `A-Za-z0-9-_.~`, browsers also keep `!'()*`.
pub fn encode_component(text: &str) -> String {
    let encoded = urlencoding::encode(text);
    if !text.contains(['!', '\'', '(', ')', '*']) {
        return encoded.into_owned();
    }
    encoded
        .replace("%21", "!")
        .replace("%27", "'")
        .replace("%28", "(")
        .replace("%29", ")")
        .replace("%2A", "*")
}

/// Reduce a page location to `scheme://host[:port]`.
pub fn normalize_origin(origin: &str) -> ShareResult<String> {
    let parsed = Url::parse(origin.trim())
        .map_err(|e| ShareError::InvalidOrigin(format!("{}: {}", origin, e)))?;
    let origin = parsed.origin();
    if !origin.is_tuple() {
        return Err(ShareError::InvalidOrigin(origin.ascii_serialization()));
    }
    Ok(origin.ascii_serialization())
}
