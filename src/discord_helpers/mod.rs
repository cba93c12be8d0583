use serenity::all::{
    Colour, Command, CommandInteraction, ComponentInteraction, CreateCommand, CreateEmbed,
};
use serenity::builder::{CreateInteractionResponse, CreateInteractionResponseMessage};
use serenity::client::Context;

use crate::error::Result;
use crate::nay;

pub mod multipage_embed;

/// Discord's limit for an embed description.
pub const EMBED_DESCRIPTION_LIMIT: usize = 4096;

pub async fn command_response<S: Into<String>>(
    ctx: &Context,
    command: &CommandInteraction,
    msg: S,
) {
    let data = CreateInteractionResponseMessage::new().content(msg.into());
    let builder = CreateInteractionResponse::Message(data);
    if let Err(err) = command.create_response(&ctx.http, builder).await {
        nay!("Failed to respond to command: {}", err)
    }
}

/// Ephemeral red notice shown only to whoever pressed the component.
pub async fn component_notice<S: Into<String>>(
    ctx: &Context,
    component: &ComponentInteraction,
    msg: S,
) -> Result<()> {
    let embed = CreateEmbed::new()
        .description(msg.into())
        .color(Colour::RED);
    let data = CreateInteractionResponseMessage::new()
        .embed(embed)
        .ephemeral(true);
    component
        .create_response(&ctx.http, CreateInteractionResponse::Message(data))
        .await?;
    Ok(())
}

pub async fn register_command(ctx: &Context, cmd: CreateCommand) {
    if let Err(e) = Command::create_global_command(&ctx.http, cmd).await {
        nay!("Failed to register a command: {}", e);
    }
}

/// Split text into chunks of at most `max_chars` characters, never cutting a
/// character in half. Prefers to break on the last newline inside a chunk.
pub fn split_into_pages(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut pages = Vec::new();
    let mut rest = text;

    while rest.chars().count() > max_chars {
        // byte offset of the first char that does not fit
        let Some((cut, _)) = rest.char_indices().nth(max_chars) else {
            break;
        };

        let split_at = match rest[..cut].rfind('\n') {
            Some(nl) if nl > 0 => nl + 1,
            _ => cut,
        };

        let (page, tail) = rest.split_at(split_at);
        pages.push(page.to_string());
        rest = tail;
    }

    if !rest.is_empty() || pages.is_empty() {
        pages.push(rest.to_string());
    }

    pages
}
