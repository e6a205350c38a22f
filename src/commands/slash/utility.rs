//! Utility slash commands: /ping

use serenity::builder::CreateApplicationCommand;

pub fn create_ping_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("ping")
        .description("Check that the bot is alive")
        .to_owned()
}
