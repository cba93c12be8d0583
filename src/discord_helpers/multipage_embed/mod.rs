/*
 * Embeds with multiple traversable pages.
 * Each page is an embed, and users move through them with previous / next buttons.
 *
 * State lives in a bounded SessionStore keyed by message id. Sessions are dropped
 * once their timeout passes without a button press; the message then loses its
 * buttons and gets a footer note saying it is no longer interactive. Nothing is
 * persisted, so a restart leaves old paginators answering "expired".
 */

pub mod controls;
pub mod options;
pub mod session;
pub mod store;

use std::sync::Arc;
use std::time::Instant;

use serenity::all::{
    CommandInteraction, ComponentInteraction, Context, CreateActionRow, CreateEmbed,
    CreateEmbedFooter, CreateInteractionResponse, CreateInteractionResponseMessage, CreateMessage,
    EditInteractionResponse, EditMessage, Message, MessageId,
};
use serenity::http::Http;

pub use controls::{build_controls, NavAction};
pub use options::{ButtonAppearance, ControlAppearance, ControlStyle, PaginatorOptions};
pub use session::{Direction, Navigate, PaginationSession};
pub use store::{ExpiredSession, Expiry, PageView, SessionStore};

use crate::discord_helpers::component_notice;
use crate::error::{PaginatorError, Result};
use crate::{hey, nay};

pub const NOT_OWNER_MESSAGE: &str =
    "You cannot control this pagination because you did not execute it.";
pub const EXPIRED_MESSAGE: &str = "This paginator has expired. Run the command again.";
pub const INACTIVE_FOOTER: &str = "This paginator is no longer interactive.";

/// Sends paginated embeds and answers their button presses.
///
/// Cheap to clone; every clone shares the same session store.
#[derive(Clone)]
pub struct Paginator {
    store: Arc<SessionStore<CreateEmbed>>,
}

impl Paginator {
    pub fn new(capacity: usize) -> Self {
        Self {
            store: Arc::new(SessionStore::new(capacity)),
        }
    }

    pub fn store(&self) -> &SessionStore<CreateEmbed> {
        &self.store
    }

    /// Answer a slash command with the first page and its controls.
    ///
    /// Fails with `InvalidArgument` before anything is sent when `pages` is empty
    /// or the initial page is out of range.
    pub async fn start(
        &self,
        ctx: &Context,
        command: &CommandInteraction,
        pages: Vec<CreateEmbed>,
        options: PaginatorOptions,
    ) -> Result<MessageId> {
        let session = PaginationSession::new(pages, command.user.id, &options)?;

        let data = CreateInteractionResponseMessage::new()
            .embed(session.current_page().clone())
            .components(render_controls(&session))
            .ephemeral(session.ephemeral());
        command
            .create_response(&ctx.http, CreateInteractionResponse::Message(data))
            .await?;

        let message = match command.get_response(&ctx.http).await {
            Ok(message) => message,
            Err(e) => {
                nay!("Paginator sent but its message could not be fetched: {}", e);
                // without a message id there is no session, so take the buttons back off
                let strip = EditInteractionResponse::new().components(vec![]);
                if let Err(e) = command.edit_response(&ctx.http, strip).await {
                    nay!("Failed to disable orphaned paginator: {}", e);
                }
                return Err(e.into());
            }
        };
        self.register(&ctx.http, &message, session).await;

        Ok(message.id)
    }

    /// Reply to a plain message with the first page and its controls.
    /// The author of `trigger` becomes the owner. Ephemeral is ignored here.
    pub async fn start_from_message(
        &self,
        ctx: &Context,
        trigger: &Message,
        pages: Vec<CreateEmbed>,
        options: PaginatorOptions,
    ) -> Result<MessageId> {
        let options = PaginatorOptions {
            ephemeral: false,
            ..options
        };
        let session = PaginationSession::new(pages, trigger.author.id, &options)?;

        let builder = CreateMessage::new()
            .embed(session.current_page().clone())
            .components(render_controls(&session))
            .reference_message(trigger);
        let message = trigger.channel_id.send_message(&ctx.http, builder).await?;
        self.register(&ctx.http, &message, session).await;

        Ok(message.id)
    }

    /// Route a component interaction.
    ///
    /// Returns `Ok(false)` when the component does not belong to a paginator so the
    /// caller can try its other handlers.
    pub async fn handle_component(
        &self,
        ctx: &Context,
        component: &ComponentInteraction,
    ) -> Result<bool> {
        let Some(action) = NavAction::from_custom_id(&component.data.custom_id) else {
            return Ok(false);
        };

        let Some(direction) = action.direction() else {
            // the counter is disabled, but acknowledge anyway
            component
                .create_response(&ctx.http, CreateInteractionResponse::Acknowledge)
                .await?;
            return Ok(true);
        };

        let outcome = self
            .store
            .navigate(
                component.message.id,
                component.user.id,
                direction,
                Instant::now(),
            )
            .await;

        match outcome {
            Ok(view) => {
                let data = CreateInteractionResponseMessage::new()
                    .embed(view.page)
                    .components(build_controls(&view.controls, view.index, view.total));
                component
                    .create_response(&ctx.http, CreateInteractionResponse::UpdateMessage(data))
                    .await?;
            }
            Err(PaginatorError::PermissionDenied) => {
                component_notice(ctx, component, NOT_OWNER_MESSAGE).await?;
            }
            Err(PaginatorError::MissingSession(id)) => {
                hey!("Button press on unknown paginator message {}", id);
                component_notice(ctx, component, EXPIRED_MESSAGE).await?;
                // the press may have beaten the expiry watcher to a lapsed session
                for expired in self.store.evict_expired(Instant::now()).await {
                    retire(&ctx.http, expired).await;
                }
            }
            Err(e) => return Err(e),
        }

        Ok(true)
    }

    /// Dispose of a session before its timeout. Returns whether one existed.
    pub async fn stop(&self, http: &Arc<Http>, message: MessageId) -> bool {
        let Some(removed) = self.store.remove(message).await else {
            return false;
        };

        retire(http, removed).await;
        true
    }

    async fn register(
        &self,
        http: &Arc<Http>,
        message: &Message,
        session: PaginationSession<CreateEmbed>,
    ) {
        let evicted = self
            .store
            .insert(message.id, message.channel_id, session, Instant::now())
            .await;

        for expired in evicted {
            retire(http, expired).await;
        }

        self.watch_expiry(Arc::clone(http), message.id);
    }

    fn watch_expiry(&self, http: Arc<Http>, message: MessageId) {
        let store = Arc::clone(&self.store);

        tokio::spawn(async move {
            loop {
                match store.check_expiry(message, Instant::now()).await {
                    // disposed, or already swept by another watcher
                    Expiry::Gone => return,
                    Expiry::Pending(deadline) => {
                        let wait = deadline.saturating_duration_since(Instant::now());
                        tokio::time::sleep(wait).await;
                    }
                    Expiry::Swept(expired) => {
                        for session in expired {
                            retire(&http, session).await;
                        }
                    }
                }
            }
        });
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(store::DEFAULT_CAPACITY)
    }
}

fn render_controls<P>(session: &PaginationSession<P>) -> Vec<CreateActionRow> {
    build_controls(session.controls(), session.current_index(), session.total())
}

/// Strip the buttons off a message whose session has ended.
async fn retire(http: &Arc<Http>, expired: ExpiredSession<CreateEmbed>) {
    // ephemeral messages can only be edited through the original interaction token
    if expired.session.ephemeral() {
        return;
    }

    let embed = expired
        .session
        .current_page()
        .clone()
        .footer(CreateEmbedFooter::new(INACTIVE_FOOTER));
    let builder = EditMessage::new().embed(embed).components(vec![]);

    if let Err(e) = expired
        .channel
        .edit_message(http, expired.message, builder)
        .await
    {
        nay!("Failed to disable paginator {}: {}", expired.message, e);
    }
}
