//! Help command handler

use teloxide::{prelude::*, types::Message, utils::command::BotCommands};
use crate::handlers::commands::Command;
use crate::utils::errors::Result;

/// Help text: command list followed by the collection flow
pub fn help_text() -> String {
    format!(
        "{}\n\n\
         How it works:\n\
         1. Send a lesson link in a private chat.\n\
         2. Answer with the title, the date and the notes link (/empty skips a field).\n\
         3. Pick a destination, or /save the block and /post it later.\n\n\
         Inside channels only /chatinfo is answered.",
        Command::descriptions()
    )
}

/// Handle /help command
pub async fn handle_help(bot: Bot, msg: Message) -> Result<()> {
    bot.send_message(msg.chat.id, help_text()).await?;
    Ok(())
}
