// YouTube Data API v3 caption source
//
// One GET to captions.list with the video id and API key as query
// parameters. Private, deleted and unlisted videos answer with 404.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::captions::config::VerifierConfig;
use crate::captions::errors::CaptionError;
use crate::captions::models::{CaptionTrack, Credentials, Platform, VideoReference};
use crate::captions::traits::CaptionSource;
use crate::captions::utils::{build_http_client, check_status};

/// Partial-response filter: only the two fields we evaluate
const FIELDS: &str = "items(snippet(trackKind,language))";
const ASR_TRACK_KIND: &str = "asr";

#[derive(Debug, Deserialize)]
struct CaptionListResponse {
    items: Vec<CaptionItem>,
}

#[derive(Debug, Deserialize)]
struct CaptionItem {
    snippet: CaptionSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionSnippet {
    track_kind: String,
    language: String,
}

impl From<CaptionSnippet> for CaptionTrack {
    fn from(snippet: CaptionSnippet) -> Self {
        Self {
            is_auto_generated: snippet.track_kind.eq_ignore_ascii_case(ASR_TRACK_KIND),
            language_code: snippet.language,
        }
    }
}

/// Caption tracks from the YouTube captions.list endpoint
#[derive(Debug, Clone, Copy, Default)]
pub struct YouTubeCaptionSource;

impl YouTubeCaptionSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CaptionSource for YouTubeCaptionSource {
    fn platform(&self) -> Platform {
        Platform::YouTube
    }

    async fn fetch_tracks(
        &self,
        reference: &VideoReference,
        credentials: &Credentials,
        config: &VerifierConfig,
    ) -> Result<Vec<CaptionTrack>, CaptionError> {
        let client = build_http_client(config)?;

        debug!(video_id = %reference.primary_id, "[YouTube] Listing caption tracks");

        let response = client
            .get(&config.youtube_endpoint)
            .query(&[
                ("part", "snippet"),
                ("fields", FIELDS),
                ("videoId", reference.primary_id.as_str()),
                ("key", credentials.api_key.trim()),
            ])
            .send()
            .await
            .map_err(|e| CaptionError::from_reqwest(e, config.timeout_seconds))?;

        check_status(Platform::YouTube, response.status())?;

        let list: CaptionListResponse = response
            .json()
            .await
            .map_err(|e| CaptionError::from_reqwest(e, config.timeout_seconds))?;

        Ok(list.into_tracks())
    }
}

impl CaptionListResponse {
    fn into_tracks(self) -> Vec<CaptionTrack> {
        self.items.into_iter().map(|item| item.snippet.into()).collect()
    }
}
