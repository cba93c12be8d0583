use embed_paginator::config::ConfigSettings;
use embed_paginator::{hey, nay, say, yay, Paginator};
use serenity::all::GatewayIntents;
use serenity::Client;
use std::env;
use std::sync::Arc;

use crate::discord_handler::Handler;

mod commands;
mod discord_handler;

#[tokio::main]
async fn main() {
    yay!("📄 Paginator Bot is starting up!");

    if let Err(e) = dotenv::dotenv() {
        hey!("No .env file loaded: {}", e);
    }

    let Ok(token) = env::var("DISCORD_TOKEN") else {
        nay!("DISCORD_TOKEN not found in environment");
        return;
    };

    let intents = GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    say!("Loading config...");
    let config = ConfigSettings::get();
    say!("Config loaded!");

    let Ok(mut client) = Client::builder(token, intents)
        .event_handler(Handler {
            paginator: Paginator::new(config.max_sessions()),
            config: Arc::new(config),
        })
        .await
    else {
        nay!("Error creating client");
        return;
    };

    if let Err(err) = client.start().await {
        nay!("Client error: {}", err);
    }
}
