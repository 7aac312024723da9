//! Nullable interaction reply channel: records responses in order.

use std::sync::Mutex;

use async_trait::async_trait;
use warden_platform::{Form, Message, PlatformError, Responder};

/// One thing the bot did with the interaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Response {
    Deferred { ephemeral: bool },
    Replied { message: Message, ephemeral: bool },
    Form(Form),
}

pub struct NullResponder {
    responses: Mutex<Vec<Response>>,
}

impl NullResponder {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(Vec::new()),
        }
    }

    pub fn responses(&self) -> Vec<Response> {
        self.responses.lock().unwrap().clone()
    }

    /// The last reply sent, with its ephemeral flag.
    pub fn last_reply(&self) -> Option<(Message, bool)> {
        self.responses
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find_map(|response| match response {
                Response::Replied { message, ephemeral } => Some((message.clone(), *ephemeral)),
                _ => None,
            })
    }

    /// Text of the last reply; empty if nothing was replied.
    pub fn last_text(&self) -> String {
        self.last_reply()
            .map(|(message, _)| message.plain_text())
            .unwrap_or_default()
    }

    pub fn deferred(&self) -> Option<bool> {
        self.responses
            .lock()
            .unwrap()
            .iter()
            .find_map(|response| match response {
                Response::Deferred { ephemeral } => Some(*ephemeral),
                _ => None,
            })
    }

    pub fn form(&self) -> Option<Form> {
        self.responses
            .lock()
            .unwrap()
            .iter()
            .find_map(|response| match response {
                Response::Form(form) => Some(form.clone()),
                _ => None,
            })
    }
}

impl Default for NullResponder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Responder for NullResponder {
    async fn defer(&self, ephemeral: bool) -> Result<(), PlatformError> {
        self.responses
            .lock()
            .unwrap()
            .push(Response::Deferred { ephemeral });
        Ok(())
    }

    async fn reply(&self, message: Message, ephemeral: bool) -> Result<(), PlatformError> {
        self.responses
            .lock()
            .unwrap()
            .push(Response::Replied { message, ephemeral });
        Ok(())
    }

    async fn show_form(&self, form: Form) -> Result<(), PlatformError> {
        self.responses.lock().unwrap().push(Response::Form(form));
        Ok(())
    }
}
