// Caption source trait definition

use async_trait::async_trait;

use super::config::VerifierConfig;
use super::errors::CaptionError;
use super::models::{CaptionTrack, Credentials, Platform, VideoReference};

/// A platform's caption metadata API
///
/// Implementations make one attempt per call and keep no per-call state;
/// any client or session lives only for the duration of `fetch_tracks`.
#[async_trait]
pub trait CaptionSource: Send + Sync {
    /// Platform served by this source (for matching and logging)
    fn platform(&self) -> Platform;

    /// List the caption tracks of `reference`
    async fn fetch_tracks(
        &self,
        reference: &VideoReference,
        credentials: &Credentials,
        config: &VerifierConfig,
    ) -> Result<Vec<CaptionTrack>, CaptionError>;
}
