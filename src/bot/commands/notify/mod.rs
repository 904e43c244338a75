use crate::bot::commands::Cog;
use crate::bot::commands::Context;
use crate::bot::commands::Error;
use crate::bot::commands::notify::handlers::CommandRequest;

pub mod handlers;

pub struct NotifyCog;

impl NotifyCog {
    /// Subscribe for voice notifications for this server
    #[poise::command(slash_command)]
    pub async fn subscribe(ctx: Context<'_>) -> Result<(), Error> {
        let request = request_from_context(&ctx);
        let service = ctx.data().service.voice_subscription.clone();
        let response = handlers::subscribe(&service, &request).await;
        ctx.say(response.content).await?;
        Ok(())
    }

    /// Unsubscribe from voice notifications for this server
    #[poise::command(slash_command)]
    pub async fn unsubscribe(ctx: Context<'_>) -> Result<(), Error> {
        let request = request_from_context(&ctx);
        let service = ctx.data().service.voice_subscription.clone();
        let response = handlers::unsubscribe(&service, &request).await;
        ctx.say(response.content).await?;
        Ok(())
    }

    /// Unsubscribe from voice notifications for all servers
    #[poise::command(slash_command, rename = "unsubscribe-all")]
    pub async fn unsubscribe_all(ctx: Context<'_>) -> Result<(), Error> {
        let request = request_from_context(&ctx);
        let service = ctx.data().service.voice_subscription.clone();
        let response = handlers::unsubscribe_all(&service, &request).await;
        ctx.say(response.content).await?;
        Ok(())
    }
}

impl Cog for NotifyCog {
    fn commands(&self) -> Vec<poise::Command<crate::bot::Data, Error>> {
        vec![
            Self::subscribe(),
            Self::unsubscribe(),
            Self::unsubscribe_all(),
        ]
    }
}

fn request_from_context(ctx: &Context<'_>) -> CommandRequest {
    CommandRequest {
        guild_id: ctx.guild_id().map(|id| id.to_string()),
        user_id: Some(ctx.author().id.to_string()),
    }
}
