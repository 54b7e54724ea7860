//! Reply payload assembly
//!
//! Commands build a `ReplyPayload` — title, ordered labeled fields, optional
//! logo thumbnail — and convert it into a Poise reply exactly once per
//! invocation.

use poise::serenity_prelude::{CreateAttachment, CreateEmbed};
use poise::CreateReply;

/// Accent color for all embeds.
pub const EMBED_COLOR: u32 = 0x0099ff;

/// Filename the logo is attached under; embeds reference it as
/// `attachment://kaspa_logo.png`.
pub const LOGO_FILENAME: &str = "kaspa_logo.png";

/// Bundled logo image.
pub const LOGO_BYTES: &[u8] = include_bytes!("../assets/kaspa_logo.png");

/// One display field of a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyField {
    pub label: String,
    pub value: String,
    pub inline: bool,
}

/// Structured reply content, assembled once per command invocation.
#[derive(Debug, Clone)]
pub struct ReplyPayload {
    title: String,
    description: Option<String>,
    fields: Vec<ReplyField>,
    with_logo: bool,
}

impl ReplyPayload {
    /// Start a payload with the given embed title. The logo thumbnail is
    /// attached by default.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            fields: Vec::new(),
            with_logo: true,
        }
    }

    /// Set the embed description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append a display field; order is preserved.
    pub fn field(
        mut self,
        label: impl Into<String>,
        value: impl Into<String>,
        inline: bool,
    ) -> Self {
        self.fields.push(ReplyField {
            label: label.into(),
            value: value.into(),
            inline,
        });
        self
    }

    /// The fields appended so far, in order.
    pub fn fields(&self) -> &[ReplyField] {
        &self.fields
    }

    /// The embed title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Convert into a sendable Poise reply with embed and logo attachment.
    pub fn into_reply(self) -> CreateReply {
        let mut embed = CreateEmbed::new().title(self.title).color(EMBED_COLOR);

        if let Some(description) = self.description {
            embed = embed.description(description);
        }

        for field in self.fields {
            embed = embed.field(field.label, field.value, field.inline);
        }

        let mut reply = CreateReply::default();
        if self.with_logo {
            embed = embed.thumbnail(format!("attachment://{LOGO_FILENAME}"));
            reply = reply.attachment(CreateAttachment::bytes(LOGO_BYTES, LOGO_FILENAME));
        }

        reply.embed(embed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_order_preserved() {
        let payload = ReplyPayload::new("Title")
            .field("first", "1", true)
            .field("second", "2", false)
            .field("third", "3", true);

        let labels: Vec<&str> = payload.fields().iter().map(|f| f.label.as_str()).collect();
        assert_eq!(labels, vec!["first", "second", "third"]);
        assert!(payload.fields()[0].inline);
        assert!(!payload.fields()[1].inline);
    }

    #[test]
    fn test_logo_bytes_are_a_png() {
        assert_eq!(&LOGO_BYTES[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_into_reply_consumes_payload() {
        let payload = ReplyPayload::new("Title")
            .description("desc")
            .field("label", "value", false);
        // conversion must not panic; embed internals are opaque to us
        let _reply = payload.into_reply();
    }
}
