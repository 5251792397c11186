// Kaltura caption source
//
// Two calls against the api_v3 JSON endpoints:
// 1. session.start with the admin secret, user id and partner id -> KS token
// 2. caption_captionasset.list filtered by entry id, authenticated by the KS
//
// The session lives only for this lookup. Kaltura answers API errors with
// HTTP 200 and a KalturaAPIException object, so bodies are inspected too.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::captions::config::VerifierConfig;
use crate::captions::errors::CaptionError;
use crate::captions::models::{CaptionTrack, Credentials, Platform, VideoReference};
use crate::captions::traits::CaptionSource;
use crate::captions::utils::{build_http_client, check_status};

const SESSION_START_PATH: &str = "/api_v3/service/session/action/start";
const CAPTION_LIST_PATH: &str = "/api_v3/service/caption_captionasset/action/list";
const SESSION_TYPE_ADMIN: &str = "2";
const FORMAT_JSON: &str = "1";
const EXCEPTION_OBJECT_TYPE: &str = "KalturaAPIException";

#[derive(Debug, Deserialize)]
struct ApiException {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionAssetList {
    total_count: u64,
    #[serde(default)]
    objects: Option<Vec<CaptionAsset>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionAsset {
    #[serde(default)]
    language_code: Option<String>,
}

/// Caption assets from the Kaltura caption plugin
#[derive(Debug, Clone, Copy, Default)]
pub struct KalturaCaptionSource;

impl KalturaCaptionSource {
    pub fn new() -> Self {
        Self
    }

    async fn start_session(
        client: &reqwest::Client,
        config: &VerifierConfig,
        credentials: &Credentials,
        partner_id: &str,
    ) -> Result<String, CaptionError> {
        let url = service_url(config, SESSION_START_PATH);
        // POST form body keeps the admin secret out of URLs and access logs
        let response = client
            .post(&url)
            .form(&[
                ("format", FORMAT_JSON),
                ("secret", credentials.api_key.trim()),
                ("userId", credentials.account.trim()),
                ("type", SESSION_TYPE_ADMIN),
                ("partnerId", partner_id),
            ])
            .send()
            .await
            .map_err(|e| CaptionError::from_reqwest(e, config.timeout_seconds))?;

        check_status(Platform::Kaltura, response.status())?;

        // A body that is not JSON at all still counts as a failed login
        let value: Value = response
            .json()
            .await
            .map_err(|e| match CaptionError::from_reqwest(e, config.timeout_seconds) {
                CaptionError::MalformedResponse(message) => session_failed(message),
                other => other,
            })?;

        parse_session(value)
    }

    async fn list_captions(
        client: &reqwest::Client,
        config: &VerifierConfig,
        ks: &str,
        entry_id: &str,
    ) -> Result<Vec<CaptionTrack>, CaptionError> {
        let url = service_url(config, CAPTION_LIST_PATH);
        let response = client
            .post(&url)
            .form(&[
                ("format", FORMAT_JSON),
                ("ks", ks),
                ("filter[objectType]", "KalturaAssetFilter"),
                ("filter[entryIdIn]", entry_id),
                ("pager[objectType]", "KalturaFilterPager"),
            ])
            .send()
            .await
            .map_err(|e| CaptionError::from_reqwest(e, config.timeout_seconds))?;

        check_status(Platform::Kaltura, response.status())?;

        let value: Value = response
            .json()
            .await
            .map_err(|e| CaptionError::from_reqwest(e, config.timeout_seconds))?;

        parse_caption_list(value)
    }
}

#[async_trait]
impl CaptionSource for KalturaCaptionSource {
    fn platform(&self) -> Platform {
        Platform::Kaltura
    }

    async fn fetch_tracks(
        &self,
        reference: &VideoReference,
        credentials: &Credentials,
        config: &VerifierConfig,
    ) -> Result<Vec<CaptionTrack>, CaptionError> {
        let partner_id = reference.secondary_id.as_deref().ok_or_else(|| CaptionError::Api {
            platform: Platform::Kaltura,
            code: "MISSING_PARTNER_ID".to_string(),
            message: format!("no partner id for entry {}", reference.primary_id),
        })?;

        let client = build_http_client(config)?;

        debug!(
            entry_id = %reference.primary_id,
            partner_id = %partner_id,
            "[Kaltura] Starting session"
        );
        let ks = Self::start_session(&client, config, credentials, partner_id).await?;

        debug!(entry_id = %reference.primary_id, "[Kaltura] Listing caption assets");
        Self::list_captions(&client, config, &ks, &reference.primary_id).await
    }
}

fn service_url(config: &VerifierConfig, path: &str) -> String {
    format!("{}{}", config.kaltura_service_url.trim_end_matches('/'), path)
}

/// KalturaAPIException body, if that is what we got
fn api_exception(value: &Value) -> Option<CaptionError> {
    if value.get("objectType").and_then(Value::as_str) != Some(EXCEPTION_OBJECT_TYPE) {
        return None;
    }
    let exception: ApiException = serde_json::from_value(value.clone()).ok()?;
    Some(CaptionError::Api {
        platform: Platform::Kaltura,
        code: exception.code.unwrap_or_else(|| "UNKNOWN".to_string()),
        message: exception.message.unwrap_or_default(),
    })
}

/// Anything unexpected while authenticating counts as an access failure
fn session_failed(message: String) -> CaptionError {
    CaptionError::Api {
        platform: Platform::Kaltura,
        code: "SESSION_START_FAILED".to_string(),
        message,
    }
}

/// session.start answers with a bare JSON string holding the KS
fn parse_session(value: Value) -> Result<String, CaptionError> {
    if let Some(err) = api_exception(&value) {
        return Err(err);
    }

    match value.as_str().map(str::trim) {
        Some(ks) if !ks.is_empty() => Ok(ks.to_string()),
        _ => Err(session_failed("no session token in response".to_string())),
    }
}

/// A zero totalCount is a valid, empty listing; a positive one needs objects
fn parse_caption_list(value: Value) -> Result<Vec<CaptionTrack>, CaptionError> {
    if let Some(err) = api_exception(&value) {
        return Err(err);
    }

    let list: CaptionAssetList = serde_json::from_value(value)?;
    if list.total_count == 0 {
        return Ok(Vec::new());
    }

    let objects = match list.objects {
        Some(objects) if !objects.is_empty() => objects,
        _ => {
            return Err(CaptionError::MalformedResponse(format!(
                "totalCount {} but no caption objects",
                list.total_count
            )))
        }
    };

    // Caption assets carry no generation method
    Ok(objects
        .into_iter()
        .map(|asset| CaptionTrack::manual(asset.language_code.unwrap_or_default()))
        .collect())
}
