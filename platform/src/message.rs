//! Outgoing message model.
//!
//! Deliberately small: a text body, at most one embed, and optional buttons.
//! The gateway adapter renders it into whatever the platform expects.

/// Embed colours used across the bot.
pub mod color {
    pub const BLURPLE: u32 = 0x5865f2;
    pub const GREEN: u32 = 0x57f287;
    pub const ORANGE: u32 = 0xf4900c;
    pub const RED: u32 = 0xed4245;
    pub const DARK: u32 = 0x2b2d31;
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Embed {
    pub title: Option<String>,
    pub description: Option<String>,
    pub color: u32,
    pub fields: Vec<EmbedField>,
    pub footer: Option<String>,
}

impl Embed {
    pub fn new(color: u32) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonStyle {
    Success,
    Danger,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Button {
    pub custom_id: String,
    pub label: String,
    pub style: ButtonStyle,
}

/// A message to send, or the body of an interaction reply.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Message {
    pub content: Option<String>,
    pub embed: Option<Embed>,
    pub buttons: Vec<Button>,
}

impl Message {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn embed(embed: Embed) -> Self {
        Self {
            embed: Some(embed),
            ..Self::default()
        }
    }

    pub fn button(mut self, button: Button) -> Self {
        self.buttons.push(button);
        self
    }

    /// Everything a reader would see, flattened into one string. Handy for
    /// logs and assertions.
    pub fn plain_text(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        if let Some(content) = &self.content {
            parts.push(content);
        }
        if let Some(embed) = &self.embed {
            parts.extend(embed.title.as_deref());
            parts.extend(embed.description.as_deref());
            for field in &embed.fields {
                parts.push(&field.name);
                parts.push(&field.value);
            }
            parts.extend(embed.footer.as_deref());
        }
        parts.join("\n")
    }
}

/// A single-input modal form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Form {
    pub custom_id: String,
    pub title: String,
    pub input_id: String,
    pub label: String,
    pub min_length: u16,
}
