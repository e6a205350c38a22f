//! Admin slash commands: /reload

use serenity::builder::CreateApplicationCommand;

pub fn create_reload_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("reload")
        .description("Reload the command catalog and re-register slash commands (Admin)")
        .to_owned()
}
