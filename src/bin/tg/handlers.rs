use teloxide::payloads::SendMessageSetters;
use teloxide::prelude::*;
use teloxide::types::MessageId;
use time::OffsetDateTime;
use tracing::{error, info, warn};

use pocket_ledger::constants::DEFAULT_RECENT_LIMIT;
use pocket_ledger::utils::{parse_amount, parse_record_id};
use pocket_ledger::{LedgerError, Period};

use crate::constants::{
    CANCEL_CALLBACK, CATEGORY_CALLBACK_PREFIX, CONFIRM_NO_CALLBACK, CONFIRM_YES_CALLBACK,
    DELETE_USAGE_TEXT, GENERIC_FAILURE_TEXT, HELP_TEXT, WELCOME_TEXT,
};
use crate::helpers::{
    category_keyboard, cleanup_expired_drafts, confirm_keyboard, format_amount,
    format_confirmation, format_recent, format_saved, format_server_time, format_summary,
    get_draft, parse_command, put_draft, take_draft, telegram_user_id,
};
use crate::models::{BotError, BotState, ContextKey, Draft, DraftStep};

// ---------------------------------------------------------------------------
// Top-level dispatch
// ---------------------------------------------------------------------------

pub async fn handle_message(bot: Bot, msg: Message, state: BotState) -> Result<(), BotError> {
    cleanup_expired_drafts(&state).await;

    if let Err(err) = process_message(&bot, &msg, &state).await {
        report_error(&bot, &state, msg.chat.id, err).await;
    }
    Ok(())
}

pub async fn handle_callback(bot: Bot, q: CallbackQuery, state: BotState) -> Result<(), BotError> {
    cleanup_expired_drafts(&state).await;

    let chat_id = q.message.as_ref().map(|m| m.chat().id);
    if let Err(err) = process_callback(&bot, &q, &state).await {
        match chat_id {
            Some(chat_id) => report_error(&bot, &state, chat_id, err).await,
            None => error!(error = %err, "callback handling failed"),
        }
    }
    Ok(())
}

/// Logs the failure, tells the user, and forwards it to the admin chat when configured.
async fn report_error(bot: &Bot, state: &BotState, chat_id: ChatId, err: BotError) {
    error!(chat_id = chat_id.0, error = %err, "update handling failed");

    if let Err(e) = bot.send_message(chat_id, GENERIC_FAILURE_TEXT).await {
        warn!(chat_id = chat_id.0, error = %e, "failed to send failure reply");
    }

    if let Some(admin_id) = state.admin_chat_id
        && let Err(e) = bot
            .send_message(ChatId(admin_id), format!("Bot error: {}", err))
            .await
    {
        warn!(error = %e, "failed to notify admin");
    }
}

async fn process_message(bot: &Bot, msg: &Message, state: &BotState) -> Result<(), BotError> {
    let Some(text) = msg.text() else {
        return Ok(());
    };

    let user_id = match telegram_user_id(msg) {
        Ok(value) => value,
        Err(message) => {
            bot.send_message(msg.chat.id, message).await?;
            return Ok(());
        }
    };
    let key: ContextKey = (msg.chat.id.0, user_id);

    if let Some((command, args)) = parse_command(text) {
        return match command.as_str() {
            "start" => send_text(bot, msg.chat.id, WELCOME_TEXT).await,
            "help" => send_text(bot, msg.chat.id, HELP_TEXT).await,
            "add" => start_add(bot, msg.chat.id, state, key).await,
            "cancel" => cancel_add(bot, msg.chat.id, state, key).await,
            "skip" => handle_skip(bot, msg.chat.id, state, key).await,
            "today" => send_summary(bot, msg.chat.id, state, user_id, Period::Day).await,
            "week" => send_summary(bot, msg.chat.id, state, user_id, Period::Week).await,
            "month" => send_summary(bot, msg.chat.id, state, user_id, Period::Month).await,
            "year" => send_summary(bot, msg.chat.id, state, user_id, Period::Year).await,
            "recent" => send_recent(bot, msg.chat.id, state, user_id).await,
            "delete" => handle_delete(bot, msg.chat.id, state, user_id, args).await,
            "status" => send_status(bot, msg.chat.id, state, user_id).await,
            _ => send_text(bot, msg.chat.id, "Unknown command. Use /help.").await,
        };
    }

    match get_draft(state, key).await {
        Some(draft) => handle_draft_text(bot, msg.chat.id, state, key, draft, text.trim()).await,
        None => send_text(bot, msg.chat.id, "Use /add to record a transaction.").await,
    }
}

async fn send_text(bot: &Bot, chat_id: ChatId, text: &str) -> Result<(), BotError> {
    bot.send_message(chat_id, text).await?;
    Ok(())
}

// ---------------------------------------------------------------------------
// /add dialogue
// ---------------------------------------------------------------------------

async fn start_add(
    bot: &Bot,
    chat_id: ChatId,
    state: &BotState,
    key: ContextKey,
) -> Result<(), BotError> {
    put_draft(state, key, Draft::new(DraftStep::ChooseCategory)).await;
    bot.send_message(chat_id, "Select category:")
        .reply_markup(category_keyboard())
        .await?;
    Ok(())
}

async fn cancel_add(
    bot: &Bot,
    chat_id: ChatId,
    state: &BotState,
    key: ContextKey,
) -> Result<(), BotError> {
    take_draft(state, key).await;
    send_text(bot, chat_id, "Operation cancelled.").await
}

async fn handle_skip(
    bot: &Bot,
    chat_id: ChatId,
    state: &BotState,
    key: ContextKey,
) -> Result<(), BotError> {
    match get_draft(state, key).await.map(|d| d.step) {
        Some(DraftStep::EnterDescription { category, amount }) => {
            ask_confirmation(bot, chat_id, state, key, category, amount, None).await
        }
        _ => send_text(bot, chat_id, "Nothing to skip right now.").await,
    }
}

async fn handle_draft_text(
    bot: &Bot,
    chat_id: ChatId,
    state: &BotState,
    key: ContextKey,
    draft: Draft,
    text: &str,
) -> Result<(), BotError> {
    match draft.step {
        DraftStep::EnterAmount { category } => match parse_amount(text) {
            Ok(amount) => {
                put_draft(
                    state,
                    key,
                    Draft::new(DraftStep::EnterDescription {
                        category,
                        amount,
                    }),
                )
                .await;
                bot.send_message(
                    chat_id,
                    format!(
                        "Amount: {}\n\nEnter description (optional), or /skip:",
                        format_amount(amount)
                    ),
                )
                .await?;
                Ok(())
            }
            Err(LedgerError::Validation(message)) => {
                bot.send_message(
                    chat_id,
                    format!("{}.\n\nTry again (example: 15.50):", message),
                )
                .await?;
                Ok(())
            }
            Err(e) => Err(e.into()),
        },
        DraftStep::EnterDescription { category, amount } => {
            ask_confirmation(
                bot,
                chat_id,
                state,
                key,
                category,
                amount,
                Some(text.to_string()),
            )
            .await
        }
        DraftStep::ChooseCategory | DraftStep::Confirm { .. } => {
            send_text(bot, chat_id, "Please use the buttons above, or /cancel.").await
        }
    }
}

async fn ask_confirmation(
    bot: &Bot,
    chat_id: ChatId,
    state: &BotState,
    key: ContextKey,
    category: String,
    amount: f64,
    description: Option<String>,
) -> Result<(), BotError> {
    let text = format_confirmation(&category, amount, description.as_deref());
    put_draft(
        state,
        key,
        Draft::new(DraftStep::Confirm {
            category,
            amount,
            description,
        }),
    )
    .await;
    bot.send_message(chat_id, text)
        .reply_markup(confirm_keyboard())
        .await?;
    Ok(())
}

async fn process_callback(bot: &Bot, q: &CallbackQuery, state: &BotState) -> Result<(), BotError> {
    bot.answer_callback_query(q.id.clone()).await?;

    let (Some(data), Some(message)) = (q.data.as_deref(), q.message.as_ref()) else {
        return Ok(());
    };
    let chat_id = message.chat().id;
    let message_id = message.id();
    let user_id = i64::try_from(q.from.id.0).map_err(|_| "Invalid Telegram user id.")?;
    let key: ContextKey = (chat_id.0, user_id);

    if data == CANCEL_CALLBACK || data == CONFIRM_NO_CALLBACK {
        take_draft(state, key).await;
        return edit_text(bot, chat_id, message_id, "Transaction cancelled.").await;
    }

    if let Some(category) = data.strip_prefix(CATEGORY_CALLBACK_PREFIX) {
        if !matches!(
            get_draft(state, key).await.map(|d| d.step),
            Some(DraftStep::ChooseCategory)
        ) {
            return edit_text(bot, chat_id, message_id, "This selection has expired. Use /add.")
                .await;
        }
        put_draft(
            state,
            key,
            Draft::new(DraftStep::EnterAmount {
                category: category.to_string(),
            }),
        )
        .await;
        let prompt = format!(
            "Category: {}\n\nEnter amount (example: 15.50 or 100):",
            category
        );
        return edit_text(bot, chat_id, message_id, &prompt).await;
    }

    if data == CONFIRM_YES_CALLBACK {
        return confirm_add(bot, chat_id, message_id, state, key, user_id).await;
    }

    Ok(())
}

async fn confirm_add(
    bot: &Bot,
    chat_id: ChatId,
    message_id: MessageId,
    state: &BotState,
    key: ContextKey,
    user_id: i64,
) -> Result<(), BotError> {
    let Some(DraftStep::Confirm {
        category,
        amount,
        description,
    }) = take_draft(state, key).await.map(|d| d.step)
    else {
        return edit_text(bot, chat_id, message_id, "Nothing to confirm. Use /add.").await;
    };

    match state
        .ledgers
        .add(user_id, amount, &category, description.as_deref())
        .await
    {
        Ok(record) => {
            info!(user_id, id = record.id, "transaction saved via bot");
            edit_text(bot, chat_id, message_id, &format_saved(&record)).await
        }
        Err(LedgerError::Validation(message)) => {
            edit_text(bot, chat_id, message_id, &format!("Not saved: {}", message)).await
        }
        Err(e) => {
            edit_text(bot, chat_id, message_id, "Transaction was NOT saved.").await?;
            Err(e.into())
        }
    }
}

async fn edit_text(
    bot: &Bot,
    chat_id: ChatId,
    message_id: MessageId,
    text: &str,
) -> Result<(), BotError> {
    bot.edit_message_text(chat_id, message_id, text).await?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

async fn send_summary(
    bot: &Bot,
    chat_id: ChatId,
    state: &BotState,
    user_id: i64,
    period: Period,
) -> Result<(), BotError> {
    let summary = state.ledgers.summarize(user_id, period).await;
    send_text(bot, chat_id, &format_summary(period, &summary)).await
}

async fn send_recent(
    bot: &Bot,
    chat_id: ChatId,
    state: &BotState,
    user_id: i64,
) -> Result<(), BotError> {
    let records = state
        .ledgers
        .list_recent(user_id, DEFAULT_RECENT_LIMIT)
        .await;
    send_text(bot, chat_id, &format_recent(&records)).await
}

async fn send_status(
    bot: &Bot,
    chat_id: ChatId,
    state: &BotState,
    user_id: i64,
) -> Result<(), BotError> {
    let store = state.ledgers.open(user_id).await;
    let data_dir = store
        .path()
        .parent()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    let now = OffsetDateTime::now_utc().to_offset(state.ledgers.offset());

    let text = format!(
        "Bot status\n\n\
         - Bot is running\n\
         - Your transactions: {}\n\
         - Data location: {}\n\
         - Server time: {}",
        store.len(),
        data_dir,
        format_server_time(now)
    );
    send_text(bot, chat_id, &text).await
}

// ---------------------------------------------------------------------------
// /delete
// ---------------------------------------------------------------------------

async fn handle_delete(
    bot: &Bot,
    chat_id: ChatId,
    state: &BotState,
    user_id: i64,
    args: Option<&str>,
) -> Result<(), BotError> {
    let Some(args) = args else {
        return send_text(bot, chat_id, DELETE_USAGE_TEXT).await;
    };

    let first = args.split_whitespace().next().unwrap_or_default();
    let id = match parse_record_id(first) {
        Ok(id) => id,
        Err(_) => return send_text(bot, chat_id, "Please enter a valid ID number").await,
    };

    if state.ledgers.delete(user_id, id).await? {
        send_text(bot, chat_id, &format!("Deleted transaction #{}", id)).await
    } else {
        send_text(bot, chat_id, &format!("Transaction #{} not found", id)).await
    }
}
