//! Reply channel of one interaction.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serenity::all::{CreateInteractionResponse, CreateInteractionResponseMessage, Http, InteractionId};
use serenity::builder::Builder;
use warden_platform::{Form, Message, PlatformError, Responder};

use crate::render;

/// Answers one interaction. The first reply creates the response; once the
/// interaction is deferred or answered, later replies edit it.
pub struct InteractionResponder {
    http: Arc<Http>,
    id: InteractionId,
    token: String,
    acknowledged: AtomicBool,
}

impl InteractionResponder {
    pub fn new(http: Arc<Http>, id: InteractionId, token: impl Into<String>) -> Self {
        Self {
            http,
            id,
            token: token.into(),
            acknowledged: AtomicBool::new(false),
        }
    }

    async fn create(&self, response: CreateInteractionResponse) -> Result<(), PlatformError> {
        response
            .execute(&self.http, (self.id, &self.token))
            .await
            .map_err(|e| PlatformError::Http(e.to_string()))?;
        self.acknowledged.store(true, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl Responder for InteractionResponder {
    async fn defer(&self, ephemeral: bool) -> Result<(), PlatformError> {
        self.create(CreateInteractionResponse::Defer(
            CreateInteractionResponseMessage::new().ephemeral(ephemeral),
        ))
        .await
    }

    async fn reply(&self, message: Message, ephemeral: bool) -> Result<(), PlatformError> {
        if self.acknowledged.load(Ordering::SeqCst) {
            render::edit_response(&message)
                .execute(&self.http, &self.token)
                .await
                .map_err(|e| PlatformError::Http(e.to_string()))?;
            return Ok(());
        }
        self.create(CreateInteractionResponse::Message(
            render::interaction_message(&message, ephemeral),
        ))
        .await
    }

    async fn show_form(&self, form: Form) -> Result<(), PlatformError> {
        self.create(CreateInteractionResponse::Modal(render::modal(&form)))
            .await
    }
}
