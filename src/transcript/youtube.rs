//! YouTube caption fetching.
//!
//! Looks up the innertube API key from the watch page, asks the player
//! endpoint for the caption track list, then downloads and parses the
//! timed-text XML of the best matching track.

use super::{Transcript, TranscriptSegment, TranscriptSource};
use crate::error::{QaError, Result};
use async_trait::async_trait;
use regex::Regex;
use reqwest::header::ACCEPT_LANGUAGE;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, instrument};
use url::Url;

const DEFAULT_BASE_URL: &str = "https://www.youtube.com";

/// Innertube client identity used for player requests.
const CLIENT_NAME: &str = "ANDROID";
const CLIENT_VERSION: &str = "20.10.38";

/// A caption track advertised by the player response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionTrack {
    base_url: String,
    language_code: String,
    #[serde(default)]
    kind: Option<String>,
}

impl CaptionTrack {
    fn is_generated(&self) -> bool {
        self.kind.as_deref() == Some("asr")
    }
}

/// Transcript source backed by YouTube's caption endpoints.
pub struct YoutubeTranscriptSource {
    client: reqwest::Client,
    base_url: String,
    video_id_regex: Regex,
    api_key_regex: Regex,
    text_regex: Regex,
    start_regex: Regex,
    dur_regex: Regex,
    tag_regex: Regex,
}

impl YoutubeTranscriptSource {
    /// Create a new source with the given request timeout.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| QaError::Config(format!("Failed to create HTTP client: {}", e)))?;

        // Matches various YouTube URL formats and bare video IDs
        let video_id_regex = compile(
            r"(?x)
            (?:
                # Full YouTube URLs
                (?:https?://)?
                (?:www\.|m\.)?
                (?:youtube\.com/watch\?(?:.*&)?v=|youtu\.be/|youtube\.com/embed/|youtube\.com/v/|youtube\.com/shorts/)
                ([a-zA-Z0-9_-]{11})
            )
            |
            # Bare video ID (11 characters)
            ^([a-zA-Z0-9_-]{11})$
        ",
        )?;

        Ok(Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            video_id_regex,
            api_key_regex: compile(r#""INNERTUBE_API_KEY":\s*"([a-zA-Z0-9_-]+)""#)?,
            text_regex: compile(r"(?s)<text\b([^>]*)>(.*?)</text>")?,
            start_regex: compile(r#"\bstart="([^"]*)""#)?,
            dur_regex: compile(r#"\bdur="([^"]*)""#)?,
            tag_regex: compile(r"<[^>]*>")?,
        })
    }

    /// Point the source at a different host (used for testing).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Extract video ID from a YouTube URL or bare ID.
    pub fn extract_video_id(&self, input: &str) -> Option<String> {
        let caps = self.video_id_regex.captures(input.trim())?;

        // Try group 1 (URL format) then group 2 (bare ID)
        caps.get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str().to_string())
    }

    async fn fetch_watch_html(&self, video_id: &str) -> Result<String> {
        let url = format!("{}/watch?v={}", self.base_url, video_id);

        let response = self
            .client
            .get(&url)
            .header(ACCEPT_LANGUAGE, "en-US")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(QaError::VideoUnavailable(format!(
                "{}: watch page returned {}",
                video_id,
                response.status()
            )));
        }

        Ok(response.text().await?)
    }

    fn extract_api_key(&self, html: &str, video_id: &str) -> Result<String> {
        if let Some(caps) = self.api_key_regex.captures(html) {
            return Ok(caps[1].to_string());
        }

        if html.contains("class=\"g-recaptcha\"") {
            Err(QaError::VideoUnavailable(format!(
                "{}: request was blocked by a captcha",
                video_id
            )))
        } else {
            Err(QaError::VideoUnavailable(format!(
                "{}: could not find the innertube API key",
                video_id
            )))
        }
    }

    async fn fetch_player(&self, video_id: &str, api_key: &str) -> Result<serde_json::Value> {
        let url = format!("{}/youtubei/v1/player?key={}", self.base_url, api_key);
        let body = serde_json::json!({
            "context": {
                "client": {
                    "clientName": CLIENT_NAME,
                    "clientVersion": CLIENT_VERSION,
                }
            },
            "videoId": video_id,
        });

        let response = self.client.post(&url).json(&body).send().await?;

        if !response.status().is_success() {
            return Err(QaError::VideoUnavailable(format!(
                "{}: player endpoint returned {}",
                video_id,
                response.status()
            )));
        }

        Ok(response.json().await?)
    }

    async fn fetch_segments(&self, track: &CaptionTrack) -> Result<Vec<TranscriptSegment>> {
        if track.base_url.contains("&exp=xpe") {
            return Err(QaError::VideoUnavailable(
                "caption track requires a proof-of-origin token".to_string(),
            ));
        }

        let url = strip_format_param(&track.base_url)?;
        debug!("Fetching timed text from {}", url);

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(QaError::TranscriptFetch(format!(
                "timed text endpoint returned {}",
                response.status()
            )));
        }

        let xml = response.text().await?;
        Ok(self.parse_timed_text(&xml))
    }

    /// Parse timed-text XML into segments, dropping empty fragments.
    fn parse_timed_text(&self, xml: &str) -> Vec<TranscriptSegment> {
        self.text_regex
            .captures_iter(xml)
            .filter_map(|caps| {
                let attrs = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
                let raw = caps.get(2).map(|m| m.as_str()).unwrap_or_default();

                // YouTube escapes the caption text twice.
                let unescaped = unescape_entities(&unescape_entities(raw));
                let text = self.tag_regex.replace_all(&unescaped, "").trim().to_string();
                if text.is_empty() {
                    return None;
                }

                let start = attr_f64(&self.start_regex, attrs);
                let duration = attr_f64(&self.dur_regex, attrs);
                Some(TranscriptSegment::new(start, start + duration, text))
            })
            .collect()
    }
}

#[async_trait]
impl TranscriptSource for YoutubeTranscriptSource {
    #[instrument(skip(self, languages))]
    async fn fetch(&self, video: &str, languages: &[String]) -> Result<Transcript> {
        let video_id = self.extract_video_id(video).ok_or_else(|| {
            QaError::InvalidInput(format!("Invalid YouTube video ID or URL: {}", video))
        })?;

        let html = self.fetch_watch_html(&video_id).await?;
        let api_key = self.extract_api_key(&html, &video_id)?;
        let player = self.fetch_player(&video_id, &api_key).await?;

        check_playability(&video_id, &player)?;
        let track = select_track(&video_id, &player, languages)?;
        let segments = self.fetch_segments(&track).await?;

        info!(
            "Fetched {} caption fragments for {} ({}{})",
            segments.len(),
            video_id,
            track.language_code,
            if track.is_generated() { ", generated" } else { "" }
        );

        Ok(Transcript::new(
            video_id,
            track.language_code.clone(),
            track.is_generated(),
            segments,
        ))
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| QaError::Config(format!("Invalid regex: {}", e)))
}

fn attr_f64(regex: &Regex, attrs: &str) -> f64 {
    regex
        .captures(attrs)
        .and_then(|c| c[1].parse().ok())
        .unwrap_or(0.0)
}

fn check_playability(video_id: &str, player: &serde_json::Value) -> Result<()> {
    let status = &player["playabilityStatus"];
    match status["status"].as_str() {
        None | Some("OK") => Ok(()),
        Some(other) => {
            let reason = status["reason"].as_str().unwrap_or("no reason given");
            Err(QaError::VideoUnavailable(format!(
                "{}: {} ({})",
                video_id, other, reason
            )))
        }
    }
}

/// Pick a track for the first preferred language that has one; manual
/// captions win over generated ones.
fn select_track(
    video_id: &str,
    player: &serde_json::Value,
    languages: &[String],
) -> Result<CaptionTrack> {
    let tracks = player
        .pointer("/captions/playerCaptionsTracklistRenderer/captionTracks")
        .cloned()
        .ok_or_else(|| QaError::TranscriptsDisabled(video_id.to_string()))?;

    let tracks: Vec<CaptionTrack> = serde_json::from_value(tracks)?;
    if tracks.is_empty() {
        return Err(QaError::TranscriptsDisabled(video_id.to_string()));
    }

    for language in languages {
        let manual = tracks
            .iter()
            .find(|t| &t.language_code == language && !t.is_generated());
        let generated = tracks
            .iter()
            .find(|t| &t.language_code == language && t.is_generated());

        if let Some(track) = manual.or(generated) {
            return Ok(track.clone());
        }
    }

    Err(QaError::NoTranscriptFound {
        video_id: video_id.to_string(),
        languages: languages.to_vec(),
    })
}

/// Remove the `fmt` query parameter so the endpoint answers with plain XML.
fn strip_format_param(base_url: &str) -> Result<Url> {
    let mut url = Url::parse(base_url)
        .map_err(|e| QaError::TranscriptFetch(format!("Invalid caption URL: {}", e)))?;

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != "fmt")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    if pairs.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(pairs.iter());
    }

    Ok(url)
}

/// Decode named and numeric HTML entities.
fn unescape_entities(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];

        let decoded = after
            .find(';')
            .filter(|&semi| semi <= 10)
            .and_then(|semi| decode_entity(&after[..semi]).map(|ch| (ch, semi)));

        match decoded {
            Some((ch, semi)) => {
                out.push(ch);
                rest = &after[semi + 1..];
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            if let Some(hex) = entity
                .strip_prefix("#x")
                .or_else(|| entity.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = entity.strip_prefix('#') {
                dec.parse::<u32>().ok().and_then(char::from_u32)
            } else {
                None
            }
        }
    }
}
