// Common data models for caption verification

use serde::{Deserialize, Serialize};
use std::fmt;

/// Video hosting platforms with a caption metadata API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    /// Kaltura (tenant-hosted, entry id + partner id)
    Kaltura,
    /// YouTube (single video id, many URL shapes)
    YouTube,
}

impl Platform {
    /// Order in which the dispatcher tries each platform's matcher
    pub const ALL: [Platform; 2] = [Platform::YouTube, Platform::Kaltura];

    /// How this platform judges caption language
    pub fn language_policy(&self) -> LanguagePolicy {
        match self {
            // Kaltura caption assets carry no generation method
            Self::Kaltura => LanguagePolicy::AnyTrack,
            Self::YouTube => LanguagePolicy::ManualTracksOnly,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kaltura => write!(f, "kaltura"),
            Self::YouTube => write!(f, "youtube"),
        }
    }
}

/// A link recognised as a video on one platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoReference {
    pub platform: Platform,
    /// YouTube video id or Kaltura entry id
    pub primary_id: String,
    /// Kaltura partner id
    pub secondary_id: Option<String>,
}

impl VideoReference {
    pub fn youtube(video_id: impl Into<String>) -> Self {
        Self {
            platform: Platform::YouTube,
            primary_id: video_id.into(),
            secondary_id: None,
        }
    }

    pub fn kaltura(entry_id: impl Into<String>, partner_id: impl Into<String>) -> Self {
        Self {
            platform: Platform::Kaltura,
            primary_id: entry_id.into(),
            secondary_id: Some(partner_id.into()),
        }
    }
}

/// One caption stream as reported by a platform API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionTrack {
    /// Platform-supplied language code ("en", "en-US", "fr"...), casing untouched
    pub language_code: String,
    /// Produced by automatic speech recognition
    pub is_auto_generated: bool,
}

impl CaptionTrack {
    pub fn manual(language_code: impl Into<String>) -> Self {
        Self {
            language_code: language_code.into(),
            is_auto_generated: false,
        }
    }

    pub fn auto_generated(language_code: impl Into<String>) -> Self {
        Self {
            language_code: language_code.into(),
            is_auto_generated: true,
        }
    }
}

/// Tri-state result handed back to the rule engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerificationOutcome {
    /// A caption defect was confirmed by a successful API call
    Fail,
    /// Could not verify; route to manual review
    Indeterminate,
    /// Compliant, or the link is not a video on this platform
    Pass,
}

impl VerificationOutcome {
    pub fn is_fail(&self) -> bool {
        matches!(self, Self::Fail)
    }

    pub fn needs_manual_review(&self) -> bool {
        matches!(self, Self::Indeterminate)
    }
}

impl fmt::Display for VerificationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fail => write!(f, "fail"),
            Self::Indeterminate => write!(f, "indeterminate"),
            Self::Pass => write!(f, "pass"),
        }
    }
}

/// Which caption check the rule engine asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckMode {
    /// Any caption track at all
    Presence,
    /// At least one human-made track
    AutoGenStatus,
    /// Tracks in the given language
    LanguageMatch(String),
}

impl fmt::Display for CheckMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Presence => write!(f, "presence"),
            Self::AutoGenStatus => write!(f, "auto-generated"),
            Self::LanguageMatch(lang) => write!(f, "language({})", lang),
        }
    }
}

/// Per-platform rule for the language check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguagePolicy {
    /// Only non-ASR tracks satisfy the language; unmatched ASR-only lists pass
    ManualTracksOnly,
    /// First track in the target language passes, regardless of generation
    AnyTrack,
}

/// Static API credentials for one platform
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct Credentials {
    pub api_key: String,
    /// Kaltura user id; unused by YouTube
    #[serde(default)]
    pub account: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, account: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            account: account.into(),
        }
    }

    /// YouTube only needs an API key
    pub fn api_key_only(api_key: impl Into<String>) -> Self {
        Self::new(api_key, "")
    }

    /// True when verification against `platform` cannot be attempted
    pub fn is_blank_for(&self, platform: Platform) -> bool {
        let key_blank = self.api_key.trim().is_empty();
        match platform {
            Platform::YouTube => key_blank,
            Platform::Kaltura => key_blank || self.account.trim().is_empty(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("account", &self.account)
            .finish()
    }
}

/// Detailed result of one check, for manual-review messages
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    /// None when no platform recognised the link
    pub platform: Option<Platform>,
    pub video_id: Option<String>,
    pub outcome: VerificationOutcome,
    /// Human-readable explanation for Fail / Indeterminate
    pub reason: Option<String>,
}

impl CheckReport {
    pub fn not_applicable() -> Self {
        Self {
            platform: None,
            video_id: None,
            outcome: VerificationOutcome::Pass,
            reason: None,
        }
    }
}
