use std::sync::Arc;

use embed_paginator::config::ConfigSettings;
use embed_paginator::discord_helpers::{command_response, register_command};
use embed_paginator::{hey, nay, yay, Paginator};
use serenity::{
    all::{
        ActivityData, Context, EventHandler, Interaction, Message, OnlineStatus, Ready,
        ResumedEvent,
    },
    async_trait,
};

use crate::commands;

pub(crate) struct Handler {
    pub paginator: Paginator,
    pub config: Arc<ConfigSettings>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: Message) {
        // Ignore messages from bots
        if msg.author.bot {
            return;
        }

        if msg.content.starts_with(commands::pages::MESSAGE_TRIGGER) {
            let defaults = self.config.paginator_options();
            commands::pages::run_message(&ctx, &msg, &self.paginator, &defaults).await;
        }
    }

    async fn ready(&self, ctx: Context, ready: Ready) {
        register_command(&ctx, commands::pages::register()).await;

        yay!("{} is connected!", ready.user.name);

        ctx.set_presence(
            Some(ActivityData::custom("Turning pages")),
            OnlineStatus::Online,
        );
    }

    async fn resume(&self, _: Context, _: ResumedEvent) {
        hey!("Resumed");
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        match interaction {
            Interaction::Command(command) => {
                let command_name = command.data.name.as_str();
                let command_options = &command.data.options();

                match command_name {
                    "pages" => {
                        let defaults = self.config.paginator_options();
                        commands::pages::run(
                            command_options,
                            &ctx,
                            &command,
                            &self.paginator,
                            &defaults,
                        )
                        .await;
                    }
                    _ => {
                        command_response(&ctx, &command, "Unknown command!").await;
                    }
                }
            }
            Interaction::Component(component) => {
                match self.paginator.handle_component(&ctx, &component).await {
                    Ok(true) => {}
                    Ok(false) => {
                        hey!("Unhandled component: {}", component.data.custom_id);
                    }
                    Err(e) => {
                        nay!("Failed to handle paginator button: {}", e);
                    }
                }
            }
            _ => {}
        }
    }
}
