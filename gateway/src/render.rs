//! Outgoing message model to serenity builders.

use serenity::all::{
    ButtonStyle as SerenityButtonStyle, CreateActionRow, CreateButton, CreateEmbed,
    CreateEmbedFooter, CreateInputText, CreateInteractionResponseMessage, CreateMessage,
    CreateModal, EditInteractionResponse, InputTextStyle,
};
use warden_platform::{Button, ButtonStyle, Embed, Form, Message};

pub fn embed(embed: &Embed) -> CreateEmbed {
    let mut out = CreateEmbed::new().colour(embed.color);
    if let Some(title) = &embed.title {
        out = out.title(title);
    }
    if let Some(description) = &embed.description {
        out = out.description(description);
    }
    for field in &embed.fields {
        out = out.field(&field.name, &field.value, field.inline);
    }
    if let Some(footer) = &embed.footer {
        out = out.footer(CreateEmbedFooter::new(footer));
    }
    out
}

fn button(button: &Button) -> CreateButton {
    let style = match button.style {
        ButtonStyle::Success => SerenityButtonStyle::Success,
        ButtonStyle::Danger => SerenityButtonStyle::Danger,
    };
    CreateButton::new(&button.custom_id)
        .label(&button.label)
        .style(style)
}

fn components(message: &Message) -> Vec<CreateActionRow> {
    if message.buttons.is_empty() {
        return Vec::new();
    }
    vec![CreateActionRow::Buttons(
        message.buttons.iter().map(button).collect(),
    )]
}

pub fn create_message(message: &Message) -> CreateMessage {
    let mut out = CreateMessage::new();
    if let Some(content) = &message.content {
        out = out.content(content);
    }
    if let Some(e) = &message.embed {
        out = out.embed(embed(e));
    }
    let rows = components(message);
    if !rows.is_empty() {
        out = out.components(rows);
    }
    out
}

pub fn interaction_message(message: &Message, ephemeral: bool) -> CreateInteractionResponseMessage {
    let mut out = CreateInteractionResponseMessage::new().ephemeral(ephemeral);
    if let Some(content) = &message.content {
        out = out.content(content);
    }
    if let Some(e) = &message.embed {
        out = out.embed(embed(e));
    }
    let rows = components(message);
    if !rows.is_empty() {
        out = out.components(rows);
    }
    out
}

/// Replacement body for a deferred response.
pub fn edit_response(message: &Message) -> EditInteractionResponse {
    let mut out = EditInteractionResponse::new();
    if let Some(content) = &message.content {
        out = out.content(content);
    }
    if let Some(e) = &message.embed {
        out = out.embed(embed(e));
    }
    let rows = components(message);
    if !rows.is_empty() {
        out = out.components(rows);
    }
    out
}

pub fn modal(form: &Form) -> CreateModal {
    let input = CreateInputText::new(InputTextStyle::Short, &form.label, &form.input_id)
        .min_length(form.min_length)
        .required(true);
    CreateModal::new(&form.custom_id, &form.title)
        .components(vec![CreateActionRow::InputText(input)])
}
