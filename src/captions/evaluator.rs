// Caption evaluator - decision rules over a fetched track list
//
// Only called after a successful fetch, so every Fail here is backed by a
// definitive answer from the platform.

use super::models::{CaptionTrack, CheckMode, LanguagePolicy, VerificationOutcome};

/// Apply the rules for `mode` to a successfully fetched track list
pub fn evaluate(
    tracks: &[CaptionTrack],
    mode: &CheckMode,
    policy: LanguagePolicy,
) -> VerificationOutcome {
    match mode {
        CheckMode::Presence => check_presence(tracks),
        CheckMode::AutoGenStatus => check_auto_generated(tracks),
        CheckMode::LanguageMatch(target) => check_language(tracks, target, policy),
    }
}

/// Empty list fails, anything else passes
pub fn check_presence(tracks: &[CaptionTrack]) -> VerificationOutcome {
    if tracks.is_empty() {
        VerificationOutcome::Fail
    } else {
        VerificationOutcome::Pass
    }
}

/// Passes when at least one track was made by a human
pub fn check_auto_generated(tracks: &[CaptionTrack]) -> VerificationOutcome {
    if tracks.iter().any(|t| !t.is_auto_generated) {
        VerificationOutcome::Pass
    } else {
        VerificationOutcome::Fail
    }
}

/// Coarse language check on the first two characters of each code.
///
/// Fails only when manual tracks exist and none of the acceptable tracks is
/// in the target language. ASR-only lists without a match pass.
pub fn check_language(
    tracks: &[CaptionTrack],
    target: &str,
    policy: LanguagePolicy,
) -> VerificationOutcome {
    if tracks.is_empty() {
        return VerificationOutcome::Pass;
    }

    let target = language_prefix(target);
    let mut found_manual = false;

    for track in tracks {
        if !track.is_auto_generated {
            found_manual = true;
        }

        let same_language = language_prefix(&track.language_code) == target;
        let acceptable = match policy {
            LanguagePolicy::AnyTrack => true,
            LanguagePolicy::ManualTracksOnly => !track.is_auto_generated,
        };

        if same_language && acceptable {
            return VerificationOutcome::Pass;
        }
    }

    if found_manual {
        VerificationOutcome::Fail
    } else {
        VerificationOutcome::Pass
    }
}

/// First two characters, casing untouched
fn language_prefix(code: &str) -> &str {
    match code.char_indices().nth(2) {
        Some((idx, _)) => &code[..idx],
        None => code,
    }
}
