// Caption verification module - matchers, platform sources, evaluator

pub mod config;
pub mod errors;
pub mod evaluator;
pub mod matchers;
pub mod models;
pub mod orchestrator;
pub mod sources;
pub mod traits;
pub mod utils;
pub mod verifier;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::VerifierConfig;
pub use errors::{CaptionError, ErrorKind};
pub use models::{
    CaptionTrack, CheckMode, CheckReport, Credentials, LanguagePolicy, Platform,
    VerificationOutcome, VideoReference,
};
pub use orchestrator::CaptionChecker;
pub use sources::{KalturaCaptionSource, YouTubeCaptionSource};
pub use traits::CaptionSource;
pub use verifier::PlatformVerifier;
