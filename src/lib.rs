//! Closed-caption compliance checks for video links in course content.
//!
//! Recognises YouTube and Kaltura links, asks the platform for the video's
//! caption tracks and answers Pass / Fail / Indeterminate for the rule
//! engine. Anything that prevents a definitive answer is Indeterminate.

pub mod captions;

pub use captions::{
    CaptionChecker, CaptionError, CaptionSource, CaptionTrack, CheckMode, CheckReport, Credentials,
    ErrorKind, KalturaCaptionSource, Platform, PlatformVerifier, VerificationOutcome,
    VerifierConfig, VideoReference, YouTubeCaptionSource,
};
