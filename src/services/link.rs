//! Lesson link extraction
//!
//! Recognizes shared lesson links, pulls out the embedded media playlist URL
//! and derives the player link that the "watch" button points to.

use regex::Regex;
use tracing::debug;
use url::Url;
use crate::config::LinkConfig;
use crate::utils::errors::{LessonRelayError, LinkError, Result};

/// A validated lesson link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonLink {
    /// The lesson URL as found in the message
    pub source: String,
    /// Decoded media playlist URL
    pub media_url: String,
    /// Player URL embedding the re-encoded media URL
    pub player_link: String,
}

/// Finds lesson links in message text
#[derive(Debug, Clone)]
pub struct LinkExtractor {
    config: LinkConfig,
    pattern: Regex,
}

impl LinkExtractor {
    /// Build an extractor for the configured host, path and parameter
    pub fn new(config: LinkConfig) -> Result<Self> {
        let pattern = format!(
            r"(?i)(?:https?://)?[^\s/]*{}{}\?(?:[^\s#]*&)?{}=[^\s]*",
            regex::escape(&config.source_host),
            regex::escape(&config.source_path),
            regex::escape(&config.query_param),
        );
        let pattern = Regex::new(&pattern)
            .map_err(|e| LessonRelayError::Config(format!("Invalid lesson link pattern: {}", e)))?;

        Ok(Self { config, pattern })
    }

    /// Whether `text` contains something shaped like a lesson link
    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    /// Extract and validate the lesson link contained in `text`
    pub fn extract(&self, text: &str) -> std::result::Result<LessonLink, LinkError> {
        let source = self
            .pattern
            .find(text)
            .map(|m| m.as_str().to_string())
            .ok_or(LinkError::NoMatch)?;

        let absolute = if source.to_ascii_lowercase().starts_with("http") {
            source.clone()
        } else {
            format!("https://{}", source)
        };
        let url = Url::parse(&absolute).map_err(|e| LinkError::Malformed(e.to_string()))?;

        let parameter = url
            .query_pairs()
            .find(|(key, _)| key.eq_ignore_ascii_case(&self.config.query_param))
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| LinkError::MissingParameter(self.config.query_param.clone()))?;

        // Share links often carry the media URL encoded twice
        let media_url = urlencoding::decode(&parameter)
            .map_err(|e| LinkError::Malformed(e.to_string()))?
            .into_owned();

        if !media_url.ends_with(&self.config.media_extension) {
            return Err(LinkError::NotMediaPlaylist {
                url: media_url,
                extension: self.config.media_extension.clone(),
            });
        }

        let player_link = self.player_link(&media_url);
        debug!(media_url = %media_url, player_link = %player_link, "Lesson link extracted");

        Ok(LessonLink {
            source,
            media_url,
            player_link,
        })
    }

    /// Player URL for a decoded media URL
    pub fn player_link(&self, media_url: &str) -> String {
        let separator = if self.config.player_base_url.contains('?') { '&' } else { '?' };
        format!(
            "{}{}{}={}",
            self.config.player_base_url,
            separator,
            self.config.player_param,
            urlencoding::encode(media_url)
        )
    }
}
