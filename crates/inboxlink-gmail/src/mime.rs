//! RFC 2822 multipart message assembly
//!
//! Builds the raw `message/rfc822` text handed to the Gmail upload endpoint:
//! a `multipart/mixed` body carrying a plain-text part, an HTML part and one
//! base64 part per attachment. Composition never fails; missing fields just
//! produce a message the provider may reject.
//!
//! See <https://tools.ietf.org/html/rfc2822>.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

const CRLF: &str = "\r\n";
const BASE64_LINE_LEN: usize = 76;
const SUBJECT_PREFIX: &str = "=?utf-8?B?";
const SUBJECT_SUFFIX: &str = "?=";

/// Structured parameters of an outbound email
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MailParams {
    /// Sender mailbox address
    #[schema(example = "owner@example.com")]
    pub from_email: String,
    /// Comma-joined recipient list
    #[schema(example = "user1@example.com, user2@example.com")]
    pub to_emails: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bcc: Option<String>,
    #[serde(default)]
    #[schema(example = "Quarterly report")]
    pub subject: String,
    #[serde(default)]
    pub text_plain: String,
    #[serde(default)]
    pub text_html: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    /// Conversation to reply into
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,
}

/// File attached to an outbound email
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    #[schema(example = "application/pdf")]
    pub mime_type: String,
    #[schema(example = "report.pdf")]
    pub filename: String,
    /// Raw payload; accepts a byte array, a Node `Buffer` object or a string
    #[serde(deserialize_with = "deserialize_attachment_data")]
    #[schema(value_type = Vec<u8>)]
    pub data: Vec<u8>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AttachmentData {
    Bytes(Vec<u8>),
    Buffer { data: Vec<u8> },
    Text(String),
}

fn deserialize_attachment_data<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match AttachmentData::deserialize(deserializer)? {
        AttachmentData::Bytes(bytes) | AttachmentData::Buffer { data: bytes } => bytes,
        AttachmentData::Text(text) => text.into_bytes(),
    })
}

/// Wrap a subject in an RFC 2047 base64 encoded-word
pub fn encode_subject(subject: &str) -> String {
    format!("{SUBJECT_PREFIX}{}{SUBJECT_SUFFIX}", STANDARD.encode(subject))
}

/// Inverse of [`encode_subject`]; `None` when the value is not a UTF-8 base64 encoded-word
pub fn decode_subject(encoded: &str) -> Option<String> {
    let prefix = encoded.get(..SUBJECT_PREFIX.len())?;
    if !prefix.eq_ignore_ascii_case(SUBJECT_PREFIX) {
        return None;
    }
    let payload = encoded[SUBJECT_PREFIX.len()..].strip_suffix(SUBJECT_SUFFIX)?;
    let bytes = STANDARD.decode(payload).ok()?;
    String::from_utf8(bytes).ok()
}

/// Builds multipart MIME messages from [`MailParams`]
#[derive(Debug, Clone)]
pub struct MessageComposer {
    boundary: Option<String>,
    boundary_source: fn() -> String,
}

impl Default for MessageComposer {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageComposer {
    /// Composer drawing a fresh random boundary for every message
    pub fn new() -> Self {
        Self::with_boundary_source(random_boundary)
    }

    /// Composer drawing boundaries from `source`; a draw found in a text body is discarded
    pub fn with_boundary_source(source: fn() -> String) -> Self {
        Self {
            boundary: None,
            boundary_source: source,
        }
    }

    /// Composer reusing one boundary for every message
    pub fn with_boundary(boundary: impl Into<String>) -> Self {
        Self {
            boundary: Some(boundary.into()),
            boundary_source: random_boundary,
        }
    }

    pub fn compose(&self, params: &MailParams) -> String {
        let boundary = self.boundary_for(params);
        let delimiter = format!("--{boundary}");

        let mut lines: Vec<String> = vec![
            "MIME-Version: 1.0".to_string(),
            format!("To: {}", header_value(&params.to_emails)),
            format!("From: <{}>", header_value(&params.from_email)),
            format!("Subject: {}", encode_subject(&params.subject)),
        ];

        if let Some(cc) = non_empty(params.cc.as_deref()) {
            lines.push(format!("Cc: {}", header_value(cc)));
        }
        if let Some(bcc) = non_empty(params.bcc.as_deref()) {
            lines.push(format!("Bcc: {}", header_value(bcc)));
        }

        lines.push(format!(
            "Content-Type: multipart/mixed; boundary=\"{boundary}\""
        ));
        lines.push(String::new());

        push_text_part(&mut lines, &delimiter, "text/plain", &params.text_plain);
        push_text_part(&mut lines, &delimiter, "text/html", &params.text_html);

        for attachment in &params.attachments {
            let body = wrapped_base64(&attachment.data);
            let filename = quoted(&attachment.filename);

            lines.push(delimiter.clone());
            lines.push(format!(
                "Content-Type: {}; name=\"{filename}\"",
                header_value(&attachment.mime_type)
            ));
            lines.push(format!("Content-Length: {}", body.len()));
            lines.push(format!(
                "Content-Disposition: attachment; filename=\"{filename}\""
            ));
            lines.push("Content-Transfer-Encoding: base64".to_string());
            lines.push(String::new());
            lines.push(body);
        }

        lines.push(format!("{delimiter}--"));

        let mut message = lines.join(CRLF);
        message.push_str(CRLF);
        message
    }

    fn boundary_for(&self, params: &MailParams) -> String {
        if let Some(boundary) = &self.boundary {
            return boundary.clone();
        }
        loop {
            let candidate = (self.boundary_source)();
            // Attachment bodies are base64 and cannot contain '_'
            if !params.text_plain.contains(&candidate) && !params.text_html.contains(&candidate) {
                return candidate;
            }
        }
    }
}

fn random_boundary() -> String {
    format!("__inboxlink_{}__", Uuid::new_v4().simple())
}

fn push_text_part(lines: &mut Vec<String>, delimiter: &str, content_type: &str, body: &str) {
    lines.push(delimiter.to_string());
    lines.push(format!("Content-Type: {content_type}; charset=UTF-8"));
    lines.push("Content-Transfer-Encoding: 8bit".to_string());
    lines.push(String::new());
    lines.push(body.to_string());
}

fn wrapped_base64(data: &[u8]) -> String {
    let encoded = STANDARD.encode(data);
    encoded
        .as_bytes()
        .chunks(BASE64_LINE_LEN)
        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
        .collect::<Vec<_>>()
        .join(CRLF)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Header values must stay on one line
fn header_value(value: &str) -> String {
    value.replace(['\r', '\n'], " ")
}

fn quoted(value: &str) -> String {
    header_value(value).replace('\\', "\\\\").replace('"', "\\\"")
}
