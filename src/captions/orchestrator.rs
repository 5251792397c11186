// Dispatcher - routes a link to the verifier of the platform that hosts it

use tracing::debug;

use super::config::VerifierConfig;
use super::matchers::match_any;
use super::models::{CheckMode, CheckReport, Credentials, Platform, VerificationOutcome};
use super::sources::{KalturaCaptionSource, YouTubeCaptionSource};
use super::traits::CaptionSource;
use super::verifier::PlatformVerifier;

/// One verifier per supported platform behind a single entry point
pub struct CaptionChecker<Y = YouTubeCaptionSource, K = KalturaCaptionSource> {
    youtube: PlatformVerifier<Y>,
    kaltura: PlatformVerifier<K>,
}

impl CaptionChecker {
    /// Checker talking to the real YouTube and Kaltura APIs
    pub fn new(
        config: VerifierConfig,
        youtube_credentials: Credentials,
        kaltura_credentials: Credentials,
    ) -> Self {
        Self::with_sources(
            YouTubeCaptionSource::new(),
            KalturaCaptionSource::new(),
            config,
            youtube_credentials,
            kaltura_credentials,
        )
    }
}

impl<Y: CaptionSource, K: CaptionSource> CaptionChecker<Y, K> {
    pub fn with_sources(
        youtube_source: Y,
        kaltura_source: K,
        config: VerifierConfig,
        youtube_credentials: Credentials,
        kaltura_credentials: Credentials,
    ) -> Self {
        Self {
            youtube: PlatformVerifier::new(youtube_source, youtube_credentials, config.clone()),
            kaltura: PlatformVerifier::new(kaltura_source, kaltura_credentials, config),
        }
    }

    pub fn youtube(&self) -> &PlatformVerifier<Y> {
        &self.youtube
    }

    pub fn kaltura(&self) -> &PlatformVerifier<K> {
        &self.kaltura
    }

    pub async fn check_captions_presence(&self, url: &str) -> VerificationOutcome {
        self.check(url, &CheckMode::Presence).await
    }

    pub async fn check_captions_auto_generated(&self, url: &str) -> VerificationOutcome {
        self.check(url, &CheckMode::AutoGenStatus).await
    }

    pub async fn check_captions_language(
        &self,
        url: &str,
        target_language: &str,
    ) -> VerificationOutcome {
        self.check(url, &CheckMode::LanguageMatch(target_language.to_string()))
            .await
    }

    pub async fn check(&self, url: &str, mode: &CheckMode) -> VerificationOutcome {
        self.inspect(url, mode).await.outcome
    }

    /// Try each platform's matcher in turn; unrecognised links pass
    pub async fn inspect(&self, url: &str, mode: &CheckMode) -> CheckReport {
        let Some(reference) = match_any(url) else {
            debug!("[Checker] No video platform recognised: {}", url.trim());
            return CheckReport::not_applicable();
        };

        match reference.platform {
            Platform::YouTube => self.youtube.verify_reference(&reference, mode).await,
            Platform::Kaltura => self.kaltura.verify_reference(&reference, mode).await,
        }
    }
}
