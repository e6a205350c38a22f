//! # Configuration
//!
//! Environment-driven settings for the bot. Everything is read once at startup
//! and shared read-only afterwards.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Handler timeout and Roblox API base URL
//! - 1.0.0: Token, permission role lists and embed colors

use anyhow::{anyhow, Context as _, Result};
use std::collections::HashSet;
use std::time::Duration;

use crate::core::embeds::EmbedColors;
use crate::features::permissions::PermissionConfig;

pub const DEFAULT_DATABASE_PATH: &str = "warden.db";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_HANDLER_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_ROBLOX_API_BASE: &str = "https://users.roblox.com";

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    /// Register commands for a single guild instead of globally (instant updates while developing)
    pub discord_guild_id: Option<u64>,
    pub database_path: String,
    pub log_level: String,
    pub permissions: PermissionConfig,
    pub embed_colors: EmbedColors,
    pub handler_timeout: Duration,
    pub roblox_api_base: String,
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    ///
    /// Blank values are treated the same as missing ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let discord_token = get("DISCORD_TOKEN")
            .ok_or_else(|| anyhow!("DISCORD_TOKEN not defined in environment or .env file"))?;

        let discord_guild_id = get("DISCORD_GUILD_ID")
            .map(|raw| {
                raw.parse::<u64>()
                    .with_context(|| format!("DISCORD_GUILD_ID must be a numeric guild ID, got {raw:?}"))
            })
            .transpose()?;

        let permissions = PermissionConfig::new(
            parse_role_list("PERMISSIONS_ALL", get("PERMISSIONS_ALL"))?,
            parse_role_list("PERMISSIONS_FETCH", get("PERMISSIONS_FETCH"))?,
            parse_role_list("PERMISSIONS_DESIGNATE", get("PERMISSIONS_DESIGNATE"))?,
        );

        let defaults = EmbedColors::default();
        let embed_colors = EmbedColors {
            info: parse_color_var("EMBED_COLOR_INFO", get("EMBED_COLOR_INFO"), defaults.info)?,
            success: parse_color_var(
                "EMBED_COLOR_SUCCESS",
                get("EMBED_COLOR_SUCCESS"),
                defaults.success,
            )?,
            error: parse_color_var("EMBED_COLOR_ERROR", get("EMBED_COLOR_ERROR"), defaults.error)?,
        };

        let handler_timeout_secs = match get("HANDLER_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| anyhow!("HANDLER_TIMEOUT_SECS must be a positive integer, got {raw:?}"))?,
            None => DEFAULT_HANDLER_TIMEOUT_SECS,
        };

        Ok(Config {
            discord_token,
            discord_guild_id,
            database_path: get("DATABASE_PATH").unwrap_or_else(|| DEFAULT_DATABASE_PATH.to_string()),
            log_level: get("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            permissions,
            embed_colors,
            handler_timeout: Duration::from_secs(handler_timeout_secs),
            roblox_api_base: get("ROBLOX_API_BASE")
                .map(|base| base.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_ROBLOX_API_BASE.to_string()),
        })
    }
}

/// Parse a comma-separated list of Discord role IDs
fn parse_role_list(key: &str, raw: Option<String>) -> Result<HashSet<u64>> {
    let Some(raw) = raw else {
        return Ok(HashSet::new());
    };

    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| {
            id.parse::<u64>()
                .with_context(|| format!("{key} contains an invalid role ID: {id:?}"))
        })
        .collect()
}

fn parse_color_var(key: &str, raw: Option<String>, default: u32) -> Result<u32> {
    match raw {
        Some(raw) => parse_color(&raw).with_context(|| format!("{key} is not a valid color")),
        None => Ok(default),
    }
}

/// Parse a color name (Blue, Green, ...) or a hex value (`#RRGGBB`, `0xRRGGBB`)
pub fn parse_color(raw: &str) -> Result<u32> {
    let named = match raw.to_ascii_lowercase().as_str() {
        "blue" => Some(0x3498DB),
        "green" => Some(0x57F287),
        "red" => Some(0xED4245),
        "yellow" => Some(0xFFFF00),
        "orange" => Some(0xE67E22),
        "purple" => Some(0x9B59B6),
        "grey" | "gray" => Some(0x95A5A6),
        "white" => Some(0xFFFFFF),
        "black" => Some(0x000000),
        _ => None,
    };
    if let Some(color) = named {
        return Ok(color);
    }

    let hex = raw
        .strip_prefix('#')
        .or_else(|| raw.strip_prefix("0x"))
        .or_else(|| raw.strip_prefix("0X"))
        .unwrap_or(raw);
    let color = u32::from_str_radix(hex, 16).map_err(|e| anyhow!("{raw:?}: {e}"))?;
    if color > 0xFFFFFF {
        return Err(anyhow!("{raw:?} is outside the 24-bit RGB range"));
    }
    Ok(color)
}
