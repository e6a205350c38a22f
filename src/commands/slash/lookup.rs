//! # Lookup Commands
//!
//! `/lookup` resolves a Roblox account by username; `/designation` checks a raw Roblox ID.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 1.1.0: Add /designation
//! - 1.0.0: Initial implementation

use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::CommandOptionType;

pub fn create_lookup_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("lookup")
        .description("Look up a Roblox user and their designation status")
        .create_option(|option| {
            option
                .name("username")
                .description("The Roblox username to look up")
                .kind(CommandOptionType::String)
                .required(true)
                .min_length(3)
                .max_length(20)
        });
    command
}

pub fn create_designation_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("designation")
        .description("Check whether a Roblox ID is designated as a threat")
        .create_option(|option| {
            option
                .name("id")
                .description("The Roblox user ID")
                .kind(CommandOptionType::Integer)
                .required(true)
                .min_int_value(1)
        });
    command
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_lookup_command() {
        let lookup = create_lookup_command();
        let name = lookup.0.get("name").unwrap().as_str().unwrap();
        assert_eq!(name, "lookup");

        let options = lookup.0.get("options").unwrap().as_array().unwrap();
        assert_eq!(options.len(), 1);
        assert_eq!(options[0]["name"], "username");
        assert_eq!(options[0]["required"], true);
    }

    #[test]
    fn test_create_designation_command() {
        let designation = create_designation_command();
        let name = designation.0.get("name").unwrap().as_str().unwrap();
        assert_eq!(name, "designation");
    }
}
