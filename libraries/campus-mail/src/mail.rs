//! Mail provider message API

use crate::credential::Credential;
use crate::error::{MailError, Result};
use base64::alphabet::URL_SAFE;
use base64::engine::general_purpose::GeneralPurpose;
use base64::engine::{DecodePaddingMode, GeneralPurposeConfig};
use base64::Engine;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

/// Longest body forwarded for summarization, in characters.
pub const MAX_BODY_CHARS: usize = 4000;

/// Search used to pick recent messages.
pub const RECENT_QUERY: &str = "is:unread OR newer_than:7d";

/// Message bodies arrive URL-safe encoded, with or without padding.
const BODY_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Debug, Deserialize)]
struct MessageList {
    #[serde(default)]
    messages: Vec<MessageRef>,
}

#[derive(Debug, Deserialize)]
struct MessageRef {
    id: String,
}

#[derive(Debug, Deserialize)]
struct Message {
    payload: MessagePart,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MessagePart {
    #[serde(default)]
    mime_type: String,
    #[serde(default)]
    body: PartBody,
    #[serde(default)]
    parts: Option<Vec<MessagePart>>,
}

#[derive(Debug, Default, Deserialize)]
struct PartBody {
    #[serde(default)]
    data: Option<String>,
}

impl MessagePart {
    /// Encoded text: the first `text/plain` part of a multipart message,
    /// otherwise the payload's own body.
    fn text_data(&self) -> Option<&str> {
        match &self.parts {
            Some(parts) => parts
                .iter()
                .find(|p| p.mime_type == "text/plain")
                .and_then(|p| p.body.data.as_deref()),
            None => self.body.data.as_deref(),
        }
    }
}

/// Client for the Gmail-style message API of the signed-in user.
#[derive(Debug, Clone)]
pub struct MailClient {
    http: Client,
    base_url: String,
}

impl MailClient {
    pub fn new(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Ids of recent inbox messages, newest first as the provider orders them.
    pub async fn list_recent_messages(
        &self,
        credential: &Credential,
        max_results: u32,
    ) -> Result<Vec<String>> {
        let url = format!("{}/gmail/v1/users/me/messages", self.base_url);
        debug!(max_results, "Listing recent messages");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&credential.access_token)
            .query(&[
                ("labelIds", "INBOX"),
                ("q", RECENT_QUERY),
                ("maxResults", max_results.to_string().as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MailError::from_response(response).await);
        }

        let list: MessageList = response
            .json()
            .await
            .map_err(|e| MailError::Parse(format!("Failed to parse message list: {}", e)))?;

        Ok(list.messages.into_iter().map(|m| m.id).collect())
    }

    /// Plain-text body of a message, `None` if it carries no body data.
    pub async fn fetch_body(&self, credential: &Credential, message_id: &str) -> Result<Option<String>> {
        let url = format!("{}/gmail/v1/users/me/messages/{}", self.base_url, message_id);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&credential.access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MailError::from_response(response).await);
        }

        let message: Message = response
            .json()
            .await
            .map_err(|e| MailError::Parse(format!("Failed to parse message {}: {}", message_id, e)))?;

        match message.payload.text_data() {
            Some(data) if !data.is_empty() => decode_body(data).map(Some),
            _ => {
                debug!(message_id = %message_id, "Message has no text body");
                Ok(None)
            }
        }
    }
}

/// Decode a message body and cut it down to [`MAX_BODY_CHARS`].
pub fn decode_body(data: &str) -> Result<String> {
    let bytes = BODY_ENGINE
        .decode(data.trim())
        .map_err(|e| MailError::Parse(format!("message body is not base64: {}", e)))?;

    Ok(lossy_utf8(&bytes).chars().take(MAX_BODY_CHARS).collect())
}

/// UTF-8 decode that drops invalid sequences instead of replacing them.
fn lossy_utf8(mut bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    loop {
        match std::str::from_utf8(bytes) {
            Ok(valid) => {
                out.push_str(valid);
                return out;
            }
            Err(e) => {
                let (valid, rest) = bytes.split_at(e.valid_up_to());
                out.push_str(std::str::from_utf8(valid).unwrap_or_default());
                let skip = e.error_len().unwrap_or(rest.len());
                bytes = &rest[skip..];
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;

    fn part(mime_type: &str, data: Option<&str>) -> MessagePart {
        MessagePart {
            mime_type: mime_type.to_string(),
            body: PartBody {
                data: data.map(str::to_string),
            },
            parts: None,
        }
    }

    #[test]
    fn test_multipart_picks_first_plain_part() {
        let payload = MessagePart {
            mime_type: "multipart/alternative".to_string(),
            body: PartBody::default(),
            parts: Some(vec![
                part("text/html", Some("html")),
                part("text/plain", Some("plain-1")),
                part("text/plain", Some("plain-2")),
            ]),
        };
        assert_eq!(payload.text_data(), Some("plain-1"));
    }

    #[test]
    fn test_multipart_without_plain_part_has_no_text() {
        let payload = MessagePart {
            mime_type: "multipart/mixed".to_string(),
            body: PartBody {
                data: Some("ignored".to_string()),
            },
            parts: Some(vec![part("text/html", Some("html"))]),
        };
        assert_eq!(payload.text_data(), None);
    }

    #[test]
    fn test_single_part_uses_payload_body() {
        assert_eq!(part("text/plain", Some("abc")).text_data(), Some("abc"));
        assert_eq!(part("text/plain", None).text_data(), None);
    }

    #[test]
    fn test_decode_accepts_padded_and_unpadded() {
        let text = "Meeting moved to 3pm?";
        let unpadded = URL_SAFE_NO_PAD.encode(text);
        let padded = base64::engine::general_purpose::URL_SAFE.encode(text);

        assert_eq!(decode_body(&unpadded).unwrap(), text);
        assert_eq!(decode_body(&padded).unwrap(), text);
    }

    #[test]
    fn test_decode_truncates_to_limit() {
        let text = "é".repeat(MAX_BODY_CHARS + 10);
        let decoded = decode_body(&URL_SAFE_NO_PAD.encode(&text)).unwrap();
        assert_eq!(decoded.chars().count(), MAX_BODY_CHARS);
    }

    #[test]
    fn test_invalid_utf8_is_dropped() {
        assert_eq!(lossy_utf8(b"ab\xffcd\xe2\x82"), "abcd");
        assert_eq!(lossy_utf8("naïve".as_bytes()), "naïve");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(decode_body("***"), Err(MailError::Parse(_))));
    }
}
