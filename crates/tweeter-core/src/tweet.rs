//! Tweet model.
//!
//! A tweet is a shared header (id, author, timestamp, text) plus a
//! [`TweetBody`] carrying the fields that only one variant has. Every
//! variant-dependent operation (rendering, editing, equality) is a single
//! `match` on the body.
//!
//! Construction always validates. There is no way to obtain a `Tweet` whose
//! text is empty or longer than [`MAX_TEXT_CHARS`], or an image tweet without
//! a URL.

use std::{fmt, sync::Arc, time::SystemTime};

use crate::error::ValidationError;

/// Tweet identifier. Assigned by the manager, never reused.
pub type TweetId = u64;

/// Maximum tweet length, in characters.
pub const MAX_TEXT_CHARS: usize = 140;

/// Which variant a tweet is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TweetKind {
    /// Plain text.
    Text,
    /// Text with an attached image.
    Image,
    /// Text quoting another tweet.
    Quote,
}

impl fmt::Display for TweetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Image => f.write_str("image"),
            Self::Quote => f.write_str("quote"),
        }
    }
}

/// Variant-specific tweet data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TweetBody {
    /// Plain text tweet, no extra data.
    Text,
    /// Image tweet.
    Image {
        /// Location of the attached image.
        url: String,
    },
    /// Quote tweet.
    ///
    /// Holds a snapshot of the quoted tweet as it was when the quote was
    /// composed. Later edits or deletion of the original do not affect it.
    Quote {
        /// The quoted tweet.
        quoted: Arc<Tweet>,
    },
}

/// A single authored, timestamped tweet.
///
/// Equality is structural: two tweets are equal when id, timestamp, author,
/// text and body all match. Tweets of different kinds are never equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tweet {
    id: TweetId,
    author: String,
    created_at: SystemTime,
    text: String,
    body: TweetBody,
}

/// Check the text rule shared by all variants.
pub fn validate_text(text: &str) -> Result<(), ValidationError> {
    if text.is_empty() {
        return Err(ValidationError::EmptyText);
    }

    let len = text.chars().count();
    if len > MAX_TEXT_CHARS {
        return Err(ValidationError::TextTooLong { len, max: MAX_TEXT_CHARS });
    }

    Ok(())
}

/// Check the rules for an image tweet: the text rule, then a non-empty URL.
pub fn validate_image(text: &str, url: &str) -> Result<(), ValidationError> {
    validate_text(text)?;
    if url.is_empty() {
        return Err(ValidationError::MissingImageUrl);
    }
    Ok(())
}

impl Tweet {
    /// Create a plain text tweet.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyText` or `ValidationError::TextTooLong`.
    pub(crate) fn new_text(
        id: TweetId,
        author: impl Into<String>,
        created_at: SystemTime,
        text: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let text = text.into();
        validate_text(&text)?;
        Ok(Self { id, author: author.into(), created_at, text, body: TweetBody::Text })
    }

    /// Create an image tweet.
    ///
    /// # Errors
    ///
    /// Text errors as for [`Tweet::new_text`], then
    /// `ValidationError::MissingImageUrl` if `url` is empty.
    pub(crate) fn new_image(
        id: TweetId,
        author: impl Into<String>,
        created_at: SystemTime,
        text: impl Into<String>,
        url: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let text = text.into();
        let url = url.into();
        validate_image(&text, &url)?;
        Ok(Self { id, author: author.into(), created_at, text, body: TweetBody::Image { url } })
    }

    /// Create a quote tweet.
    ///
    /// # Errors
    ///
    /// Text errors as for [`Tweet::new_text`]. The quoted tweet is already valid
    /// by construction.
    pub(crate) fn new_quote(
        id: TweetId,
        author: impl Into<String>,
        created_at: SystemTime,
        text: impl Into<String>,
        quoted: impl Into<Arc<Self>>,
    ) -> Result<Self, ValidationError> {
        let text = text.into();
        validate_text(&text)?;
        Ok(Self {
            id,
            author: author.into(),
            created_at,
            text,
            body: TweetBody::Quote { quoted: quoted.into() },
        })
    }

    /// Tweet identifier.
    pub fn id(&self) -> TweetId {
        self.id
    }

    /// Name of the user who wrote the tweet.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// When the tweet was composed.
    pub fn created_at(&self) -> SystemTime {
        self.created_at
    }

    /// Tweet text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Variant-specific data.
    pub fn body(&self) -> &TweetBody {
        &self.body
    }

    /// Which variant this tweet is.
    pub fn kind(&self) -> TweetKind {
        match self.body {
            TweetBody::Text => TweetKind::Text,
            TweetBody::Image { .. } => TweetKind::Image,
            TweetBody::Quote { .. } => TweetKind::Quote,
        }
    }

    /// Image URL, for image tweets.
    pub fn image_url(&self) -> Option<&str> {
        match &self.body {
            TweetBody::Image { url } => Some(url),
            _ => None,
        }
    }

    /// Quoted tweet, for quote tweets.
    pub fn quoted(&self) -> Option<&Self> {
        match &self.body {
            TweetBody::Quote { quoted } => Some(quoted),
            _ => None,
        }
    }

    /// Replace the text in place.
    ///
    /// Only plain text tweets can be edited. On error the tweet is unchanged.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::NotSupported` for image and quote tweets,
    /// otherwise the same errors as construction.
    pub fn set_text(&mut self, text: impl Into<String>) -> Result<(), ValidationError> {
        match self.body {
            TweetBody::Text => {},
            TweetBody::Image { .. } | TweetBody::Quote { .. } => {
                return Err(ValidationError::NotSupported(self.kind()));
            },
        }

        let text = text.into();
        validate_text(&text)?;
        self.text = text;
        Ok(())
    }

    /// Human-readable form.
    ///
    /// `[<id>] @<author>: <text>`, followed by the image URL on its own line
    /// for image tweets, or by the quoted tweet's rendering in double quotes
    /// for quote tweets.
    pub fn render(&self) -> String {
        let header = format!("[{}] @{}: {}", self.id, self.author, self.text);
        match &self.body {
            TweetBody::Text => header,
            TweetBody::Image { url } => format!("{header}\n{url}"),
            TweetBody::Quote { quoted } => format!("{header}\n\"{}\"", quoted.render()),
        }
    }
}

impl fmt::Display for Tweet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use proptest::prelude::*;

    use super::*;

    fn at(secs: u64) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
    }

    #[test]
    fn can_set_text_tweet_text() {
        let mut tweet = Tweet::new_text(0, "root", at(0), "first").unwrap();
        tweet.set_text("second").unwrap();
        assert_eq!(tweet.text(), "second");
    }

    #[test]
    fn text_tweet_requires_text() {
        let result = Tweet::new_text(0, "root", at(0), "");
        assert_eq!(result, Err(ValidationError::EmptyText));
    }

    #[test]
    fn text_limit_is_inclusive() {
        let exactly = "a".repeat(MAX_TEXT_CHARS);
        assert!(Tweet::new_text(0, "root", at(0), exactly).is_ok());

        let over = "a".repeat(MAX_TEXT_CHARS + 1);
        let result = Tweet::new_text(0, "root", at(0), over);
        assert_eq!(result, Err(ValidationError::TextTooLong { len: 141, max: 140 }));
    }

    #[test]
    fn text_limit_counts_characters_not_bytes() {
        // 140 characters, 280 bytes
        let text = "ñ".repeat(MAX_TEXT_CHARS);
        assert_eq!(text.len(), 2 * MAX_TEXT_CHARS);
        assert!(Tweet::new_text(0, "root", at(0), text).is_ok());
    }

    #[test]
    fn failed_edit_leaves_text_unchanged() {
        let mut tweet = Tweet::new_text(0, "root", at(0), "first").unwrap();
        assert_eq!(tweet.set_text(""), Err(ValidationError::EmptyText));
        assert_eq!(tweet.text(), "first");
    }

    #[test]
    fn image_tweet_requires_url() {
        let result = Tweet::new_image(0, "root", at(0), "unimportant text", "");
        assert_eq!(result, Err(ValidationError::MissingImageUrl));
    }

    #[test]
    fn image_tweet_checks_text_before_url() {
        let result = Tweet::new_image(0, "root", at(0), "", "");
        assert_eq!(result, Err(ValidationError::EmptyText));
    }

    #[test]
    fn only_text_tweets_are_editable() {
        let original = Tweet::new_text(0, "root", at(0), "original").unwrap();
        let mut image = Tweet::new_image(1, "root", at(0), "pic", "https://a.b/c.png").unwrap();
        let mut quote = Tweet::new_quote(2, "root", at(0), "this", original).unwrap();

        assert_eq!(image.set_text("x"), Err(ValidationError::NotSupported(TweetKind::Image)));
        assert_eq!(quote.set_text("x"), Err(ValidationError::NotSupported(TweetKind::Quote)));
    }

    #[test]
    fn compare_text_tweets() {
        let first = Tweet::new_text(0, "root", at(0), "first text").unwrap();
        let second = Tweet::new_text(1, "root", at(0), "second text").unwrap();

        assert_eq!(first, first.clone());
        assert_ne!(second, first);
    }

    #[test]
    fn compare_image_tweets() {
        let first = Tweet::new_image(0, "root", at(0), "text", "https://google.com.ar").unwrap();
        let second = Tweet::new_image(0, "root", at(0), "text", "https://facebook.com.ar").unwrap();

        assert_eq!(first, first.clone());
        assert_ne!(second, first);
    }

    #[test]
    fn compare_quote_tweets() {
        let quoted_a = Tweet::new_text(0, "root", at(0), "unimportant text").unwrap();
        let quoted_b = Tweet::new_text(1, "root", at(0), "boring text").unwrap();

        let first = Tweet::new_quote(2, "root", at(0), "text", quoted_a).unwrap();
        let second = Tweet::new_quote(2, "root", at(0), "text", quoted_b).unwrap();

        assert_eq!(first, first.clone());
        assert_ne!(second, first);
    }

    #[test]
    fn different_kinds_are_never_equal() {
        let text = Tweet::new_text(0, "root", at(0), "same").unwrap();
        let image = Tweet::new_image(0, "root", at(0), "same", "u").unwrap();
        assert_ne!(text, image);
    }

    #[test]
    fn timestamp_is_part_of_equality() {
        let a = Tweet::new_text(0, "root", at(0), "same").unwrap();
        let b = Tweet::new_text(0, "root", at(1), "same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn render_text() {
        let tweet = Tweet::new_text(0, "root", at(0), "hello").unwrap();
        insta::assert_snapshot!(tweet.render(), @"[0] @root: hello");
    }

    #[test]
    fn render_image_puts_url_on_next_line() {
        let tweet = Tweet::new_image(4, "root", at(0), "look", "https://a.b/c.png").unwrap();
        assert_eq!(tweet.render(), "[4] @root: look\nhttps://a.b/c.png");
    }

    #[test]
    fn render_quote_wraps_quoted_rendering() {
        let quoted = Tweet::new_text(0, "alice", at(0), "hello").unwrap();
        let quote = Tweet::new_quote(1, "bob", at(0), "so true", quoted).unwrap();
        assert_eq!(quote.to_string(), "[1] @bob: so true\n\"[0] @alice: hello\"");
    }

    #[test]
    fn accessors_expose_variant_data() {
        let quoted = Tweet::new_text(0, "alice", at(0), "hello").unwrap();
        let image = Tweet::new_image(1, "bob", at(5), "pic", "u").unwrap();
        let quote = Tweet::new_quote(2, "bob", at(6), "yes", quoted.clone()).unwrap();

        assert_eq!(image.kind(), TweetKind::Image);
        assert_eq!(image.image_url(), Some("u"));
        assert_eq!(image.quoted(), None);
        assert_eq!(image.created_at(), at(5));

        assert_eq!(quote.kind(), TweetKind::Quote);
        assert_eq!(quote.quoted(), Some(&quoted));
        assert_eq!(quote.image_url(), None);
    }

    proptest! {
        #[test]
        fn prop_validation_matches_char_count(text in "\\PC{0,160}") {
            let len = text.chars().count();
            let result = Tweet::new_text(0, "root", at(0), text);

            if len == 0 {
                prop_assert_eq!(result, Err(ValidationError::EmptyText));
            } else if len > MAX_TEXT_CHARS {
                prop_assert_eq!(
                    result,
                    Err(ValidationError::TextTooLong { len, max: MAX_TEXT_CHARS })
                );
            } else {
                prop_assert!(result.is_ok());
            }
        }
    }
}
