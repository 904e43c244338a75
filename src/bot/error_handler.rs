//! Error handling for Discord bot commands.

use log::error;
use poise::CreateReply;
use poise::FrameworkError;

use crate::bot::Data;
use crate::bot::commands::Error;
use crate::service::error::ServiceError;

/// Handles framework errors and sends appropriate responses to users.
pub struct ErrorHandler;

impl ErrorHandler {
    pub async fn handle(error: FrameworkError<'_, Data, Error>) {
        match error {
            FrameworkError::Command { error, ctx, .. } => {
                error!(
                    "Error in command `{}`: {:?}",
                    ctx.command().qualified_name,
                    error
                );
                let message = Self::classify_error(&error);
                let _ = ctx
                    .send(CreateReply::default().content(message).ephemeral(true))
                    .await;
            }
            error => {
                if let Err(e) = poise::builtins::on_error(error).await {
                    error!("Error while handling error: {}", e);
                }
            }
        }
    }

    fn classify_error(error: &Error) -> String {
        if let Some(service_error) = error.downcast_ref::<ServiceError>() {
            format!("❌ Service error: {}", service_error)
        } else {
            "❌ An unexpected error occurred. Please try again later.".to_string()
        }
    }
}
