// Platform verifier - matcher, source and evaluator behind one contract
//
// Per call: NotApplicable -> Pass, NoCredentials -> Indeterminate,
// fetch error -> Indeterminate, otherwise the evaluator decides.
// The verifier holds only immutable configuration, so `&self` checks can
// run concurrently.

use tracing::{debug, info, warn};

use super::config::{effective_language, VerifierConfig};
use super::errors::CaptionError;
use super::evaluator::evaluate;
use super::models::{
    CheckMode, CheckReport, Credentials, Platform, VerificationOutcome, VideoReference,
};
use super::traits::CaptionSource;

pub struct PlatformVerifier<S> {
    source: S,
    credentials: Credentials,
    config: VerifierConfig,
}

impl<S: CaptionSource> PlatformVerifier<S> {
    pub fn new(source: S, credentials: Credentials, config: VerifierConfig) -> Self {
        if credentials.is_blank_for(source.platform()) {
            info!(
                "[{}] No credentials configured; every check will need manual review",
                source.platform()
            );
        }
        Self {
            source,
            credentials,
            config,
        }
    }

    pub fn platform(&self) -> Platform {
        self.source.platform()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// Fail when the video has no captions at all
    pub async fn check_captions_presence(&self, url: &str) -> VerificationOutcome {
        self.check(url, &CheckMode::Presence).await
    }

    /// Fail when every caption track is auto-generated
    pub async fn check_captions_auto_generated(&self, url: &str) -> VerificationOutcome {
        self.check(url, &CheckMode::AutoGenStatus).await
    }

    /// Fail when maintained captions exist but none is in `target_language`.
    /// A blank target uses the configured course language.
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

    /// Run a check and explain the outcome
    pub async fn inspect(&self, url: &str, mode: &CheckMode) -> CheckReport {
        match self.platform().match_url(url) {
            Some(reference) => self.verify_reference(&reference, mode).await,
            None => {
                debug!("[{}] Not applicable: {}", self.platform(), url.trim());
                CheckReport::not_applicable()
            }
        }
    }

    /// Check an already-matched reference
    pub(crate) async fn verify_reference(
        &self,
        reference: &VideoReference,
        mode: &CheckMode,
    ) -> CheckReport {
        let platform = self.platform();
        let mode = self.resolve_mode(mode);

        if self.credentials.is_blank_for(platform) {
            return indeterminate(reference, CaptionError::MissingCredentials(platform));
        }

        let fetched = tokio::time::timeout(
            self.config.timeout(),
            self.source.fetch_tracks(reference, &self.credentials, &self.config),
        )
        .await
        .unwrap_or(Err(CaptionError::Timeout {
            secs: self.config.timeout_seconds,
        }));

        let tracks = match fetched {
            Ok(tracks) => tracks,
            Err(e) => {
                warn!(
                    video_id = %reference.primary_id,
                    kind = ?e.kind(),
                    "[{}] Caption lookup failed: {}",
                    platform,
                    e
                );
                return indeterminate(reference, e);
            }
        };

        let outcome = evaluate(&tracks, &mode, platform.language_policy());
        debug!(
            video_id = %reference.primary_id,
            tracks = tracks.len(),
            "[{}] {} check -> {}",
            platform,
            mode,
            outcome
        );

        CheckReport {
            platform: Some(platform),
            video_id: Some(reference.primary_id.clone()),
            outcome,
            reason: outcome.is_fail().then(|| fail_reason(&mode)),
        }
    }

    fn resolve_mode(&self, mode: &CheckMode) -> CheckMode {
        match mode {
            CheckMode::LanguageMatch(target) if target.trim().is_empty() => {
                CheckMode::LanguageMatch(self.config.target_language().to_string())
            }
            CheckMode::LanguageMatch(target) => {
                CheckMode::LanguageMatch(effective_language(target).to_string())
            }
            other => other.clone(),
        }
    }
}

fn indeterminate(reference: &VideoReference, error: CaptionError) -> CheckReport {
    CheckReport {
        platform: Some(reference.platform),
        video_id: Some(reference.primary_id.clone()),
        outcome: VerificationOutcome::Indeterminate,
        reason: Some(error.to_string()),
    }
}

fn fail_reason(mode: &CheckMode) -> String {
    match mode {
        CheckMode::Presence => "video has no captions".to_string(),
        CheckMode::AutoGenStatus => "video only has auto-generated captions".to_string(),
        CheckMode::LanguageMatch(lang) => {
            format!("no captions in the course language ({})", lang)
        }
    }
}
