use std::collections::HashMap;
use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::BotCommand;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use pocket_ledger::config::Config;
use pocket_ledger::{LedgerService, health, telemetry};

mod constants;
mod handlers;
mod helpers;
mod models;

use models::{BotError, BotState};

#[tokio::main]
async fn main() -> Result<(), BotError> {
    dotenv::dotenv().ok();
    telemetry::init_tracing();

    let config = Config::from_env().map_err(|e| format!("Configuration error: {}", e))?;

    let ledgers = LedgerService::with_offset(config.storage.clone(), config.offset());
    let data_dir = ledgers.storage().resolve().await;
    info!(data_dir = %data_dir.display(), "starting expenses tracker");

    let bind_address = config.bind_address();
    tokio::spawn(async move {
        if let Err(e) = health::serve(&bind_address).await {
            error!(address = %bind_address, error = %e, "health server stopped");
        }
    });

    let bot = Bot::new(config.bot_token.clone());
    register_commands(&bot).await;

    let state = BotState {
        ledgers,
        admin_chat_id: config.admin_chat_id,
        drafts: Arc::new(RwLock::new(HashMap::new())),
    };

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(handlers::handle_message))
        .branch(Update::filter_callback_query().endpoint(handlers::handle_callback));

    info!("bot is running");
    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}

async fn register_commands(bot: &Bot) {
    let commands: Vec<BotCommand> = constants::BOT_COMMANDS
        .iter()
        .map(|(command, description)| BotCommand::new(*command, *description))
        .collect();

    match bot.set_my_commands(commands).await {
        Ok(_) => info!("bot command menu set"),
        Err(e) => warn!(error = %e, "failed to set bot command menu"),
    }
}
