//! Command handlers module
//!
//! This module contains handlers for all bot commands like /start, /help, etc.

pub mod block;
pub mod chatinfo;
pub mod help;
pub mod start;

use teloxide::{prelude::*, types::Message, utils::command::{BotCommands, ParseError}};
use crate::middleware::AdminUser;
use crate::services::ServiceFactory;
use crate::utils::errors::Result;

/// All available bot commands
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "LessonRelay commands:")]
pub enum Command {
    #[command(description = "Show the welcome message")]
    Start,
    #[command(description = "Show help information")]
    Help,
    #[command(description = "Pick a destination for the finished block")]
    Done,
    #[command(description = "Save the finished block for later")]
    Save,
    #[command(description = "Post a saved block here: /post <id>", parse_with = parse_block_id)]
    Post(String),
    #[command(description = "Leave the current field blank")]
    Empty,
    #[command(description = "Show ids of this chat, topic and replied message")]
    Chatinfo,
}

/// `/post` takes the whole remainder as the id, possibly empty
fn parse_block_id(input: String) -> std::result::Result<(String,), ParseError> {
    Ok((input.trim().to_string(),))
}

/// Main command dispatcher
pub async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    services: ServiceFactory,
    admin: AdminUser,
) -> Result<()> {
    match cmd {
        Command::Start => start::handle_start(bot, msg, services).await,
        Command::Help => help::handle_help(bot, msg).await,
        Command::Done => block::handle_done(bot, msg, services, admin).await,
        Command::Save => block::handle_save(bot, msg, services, admin).await,
        Command::Post(block_id) => block::handle_post(bot, msg, services, admin, block_id).await,
        Command::Empty => block::handle_empty(bot, msg, services, admin).await,
        Command::Chatinfo => chatinfo::handle_chatinfo(bot, msg).await,
    }
}
