use embed_paginator::discord_helpers::{
    command_response, split_into_pages, EMBED_DESCRIPTION_LIMIT,
};
use embed_paginator::{nay, Paginator, PaginatorError, PaginatorOptions};
use serenity::all::{
    Colour, CommandInteraction, CommandOptionType, Context, CreateCommand, CreateCommandOption,
    CreateEmbed, CreateEmbedFooter, Message, ResolvedOption, ResolvedValue,
};

pub const DEFAULT_PAGE_SIZE: usize = 400;
pub const MESSAGE_TRIGGER: &str = "!pages";

/// Everything `/pages` and `!pages` need to build a paginator.
#[derive(Debug, Clone, PartialEq)]
pub struct PagesRequest {
    pub text: String,
    pub page_size: usize,
    /// 1-based, as typed by the user.
    pub start: i64,
    pub owner_only: Option<bool>,
    pub ephemeral: Option<bool>,
}

impl PagesRequest {
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            page_size: DEFAULT_PAGE_SIZE,
            start: 1,
            owner_only: None,
            ephemeral: None,
        }
    }

    pub fn from_options(options: &[ResolvedOption<'_>]) -> Option<Self> {
        let mut request = None::<Self>;
        let mut page_size = None;
        let mut start = None;
        let mut owner_only = None;
        let mut ephemeral = None;

        for option in options {
            match (option.name, &option.value) {
                ("text", ResolvedValue::String(text)) => request = Some(Self::new(*text)),
                ("page_size", ResolvedValue::Integer(size)) => page_size = Some(*size),
                ("start", ResolvedValue::Integer(page)) => start = Some(*page),
                ("owner_only", ResolvedValue::Boolean(flag)) => owner_only = Some(*flag),
                ("ephemeral", ResolvedValue::Boolean(flag)) => ephemeral = Some(*flag),
                _ => {}
            }
        }

        let mut request = request?;
        if let Some(size) = page_size {
            request.page_size = usize::try_from(size).unwrap_or(DEFAULT_PAGE_SIZE);
        }
        request.start = start.unwrap_or(1);
        request.owner_only = owner_only;
        request.ephemeral = ephemeral;
        Some(request)
    }

    /// Layer this request over the configured defaults.
    pub fn options(&self, defaults: &PaginatorOptions) -> PaginatorOptions {
        // page 0 or below maps to an index that start() rejects
        let initial_index = usize::try_from(self.start.saturating_sub(1)).unwrap_or(usize::MAX);

        let mut options = defaults.clone().initial_index(initial_index);
        if let Some(owner_only) = self.owner_only {
            options = options.restrict_to_owner(owner_only);
        }
        if let Some(ephemeral) = self.ephemeral {
            options = options.ephemeral(ephemeral);
        }
        options
    }

    pub fn embeds(&self, requested_by: &str) -> Vec<CreateEmbed> {
        let size = self.page_size.clamp(1, EMBED_DESCRIPTION_LIMIT);
        split_into_pages(&self.text, size)
            .into_iter()
            .map(|chunk| {
                CreateEmbed::new()
                    .title("📄 Pages")
                    .description(chunk)
                    .color(Colour::GOLD)
                    .footer(CreateEmbedFooter::new(format!(
                        "Requested by {}",
                        requested_by
                    )))
            })
            .collect()
    }
}

pub async fn run(
    options: &[ResolvedOption<'_>],
    ctx: &Context,
    cmd: &CommandInteraction,
    paginator: &Paginator,
    defaults: &PaginatorOptions,
) {
    let Some(request) = PagesRequest::from_options(options) else {
        command_response(ctx, cmd, "You must specify some text to paginate!").await;
        return;
    };

    let pages = request.embeds(&cmd.user.name);
    let total = pages.len();

    match paginator
        .start(ctx, cmd, pages, request.options(defaults))
        .await
    {
        Ok(_) => {}
        Err(PaginatorError::InvalidArgument(_)) => {
            command_response(
                ctx,
                cmd,
                format!("Start page must be between 1 and {}!", total),
            )
            .await;
        }
        Err(e) => nay!("Failed to start paginator: {}", e),
    }
}

pub async fn run_message(
    ctx: &Context,
    msg: &Message,
    paginator: &Paginator,
    defaults: &PaginatorOptions,
) {
    let text = msg
        .content
        .strip_prefix(MESSAGE_TRIGGER)
        .unwrap_or_default()
        .trim();
    if text.is_empty() {
        if let Err(e) = msg
            .reply(&ctx.http, format!("Usage: `{} <text>`", MESSAGE_TRIGGER))
            .await
        {
            nay!("Failed to send message: {}", e);
        }
        return;
    }

    let request = PagesRequest::new(text);
    let pages = request.embeds(&msg.author.name);

    if let Err(e) = paginator
        .start_from_message(ctx, msg, pages, request.options(defaults))
        .await
    {
        nay!("Failed to start paginator: {}", e);
    }
}

pub fn register() -> CreateCommand {
    CreateCommand::new("pages")
        .description("Split text into pages you can flip through")
        .add_option(
            CreateCommandOption::new(CommandOptionType::String, "text", "The text to paginate")
                .required(true),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::Integer,
                "page_size",
                "Characters per page",
            )
            .min_int_value(1)
            .max_int_value(4096),
        )
        .add_option(CreateCommandOption::new(
            CommandOptionType::Integer,
            "start",
            "Page to open on",
        ))
        .add_option(CreateCommandOption::new(
            CommandOptionType::Boolean,
            "owner_only",
            "Only you can turn the pages",
        ))
        .add_option(CreateCommandOption::new(
            CommandOptionType::Boolean,
            "ephemeral",
            "Only you can see the pages",
        ))
        .dm_permission(true)
}
