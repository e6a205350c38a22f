//! # Message Components
//!
//! Button handling for designation records. Every button custom ID carries its action and
//! the Roblox ID it applies to, e.g. `designate:156`.
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 2.0.0: Designate/Undesignate buttons with the target encoded in the custom ID
//! - 1.0.0: Initial component handler

use anyhow::Result;
use log::{error, info, warn};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

use crate::core::embeds::Reply;
use crate::features::designation::{DesignationError, DesignationService};
use crate::features::permissions::PermissionConfig;
use crate::interactions::{ComponentAction, InteractionResponder};
use crate::router::{generic_error_reply, no_permission_reply, RouteOutcome};

const DESIGNATE_PREFIX: &str = "designate";
const UNDESIGNATE_PREFIX: &str = "undesignate";

/// What a button press asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    Designate(u64),
    Undesignate(u64),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ButtonParseError {
    #[error("unknown button action in '{0}'")]
    UnknownAction(String),
    #[error("button '{0}' carries no Roblox ID")]
    MissingId(String),
    #[error("button '{0}' carries an invalid Roblox ID")]
    InvalidId(String),
}

impl ButtonAction {
    pub fn parse(custom_id: &str) -> Result<Self, ButtonParseError> {
        let Some((action, id)) = custom_id.split_once(':') else {
            return match custom_id {
                DESIGNATE_PREFIX | UNDESIGNATE_PREFIX => {
                    Err(ButtonParseError::MissingId(custom_id.to_string()))
                }
                _ => Err(ButtonParseError::UnknownAction(custom_id.to_string())),
            };
        };

        let constructor: fn(u64) -> ButtonAction = match action {
            DESIGNATE_PREFIX => ButtonAction::Designate,
            UNDESIGNATE_PREFIX => ButtonAction::Undesignate,
            _ => return Err(ButtonParseError::UnknownAction(custom_id.to_string())),
        };

        if id.is_empty() {
            return Err(ButtonParseError::MissingId(custom_id.to_string()));
        }
        match id.parse::<u64>() {
            Ok(id) if id > 0 => Ok(constructor(id)),
            _ => Err(ButtonParseError::InvalidId(custom_id.to_string())),
        }
    }

    pub fn roblox_id(&self) -> u64 {
        match self {
            ButtonAction::Designate(id) | ButtonAction::Undesignate(id) => *id,
        }
    }

    pub fn custom_id(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ButtonAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ButtonAction::Designate(id) => write!(f, "{DESIGNATE_PREFIX}:{id}"),
            ButtonAction::Undesignate(id) => write!(f, "{UNDESIGNATE_PREFIX}:{id}"),
        }
    }
}

impl FromStr for ButtonAction {
    type Err = ButtonParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ButtonAction::parse(s)
    }
}

/// Handler for all message component interactions
#[derive(Clone)]
pub struct MessageComponentHandler {
    designations: DesignationService,
    permissions: Arc<PermissionConfig>,
}

impl MessageComponentHandler {
    pub fn new(designations: DesignationService, permissions: Arc<PermissionConfig>) -> Self {
        Self {
            designations,
            permissions,
        }
    }

    /// Defer, authorize, then apply the button's action. Always ends in one reply edit.
    pub async fn handle_component_interaction(
        &self,
        action: &ComponentAction,
        responder: &dyn InteractionResponder,
    ) -> Result<RouteOutcome> {
        let custom_id = &action.custom_id;
        info!(
            "Processing component interaction: {custom_id} from user: {}",
            action.invoker.id
        );

        responder.defer(true).await?;
        let author = action.invoker.attribution();

        if !self.permissions.can_designate(&action.invoker.roles) {
            warn!(
                "🚫 {} ({}) lacks permission for button {custom_id}",
                action.invoker.name, action.invoker.id
            );
            responder.edit(&no_permission_reply().with_author(author)).await?;
            return Ok(RouteOutcome::Denied);
        }

        let button = match ButtonAction::parse(custom_id) {
            Ok(button) => button,
            Err(e) => {
                warn!("⚠️ {e}");
                let reply = Reply::error("Invalid Button", "This button is no longer valid")
                    .with_author(author);
                responder.edit(&reply).await?;
                return Ok(RouteOutcome::Failed);
            }
        };

        let (reply, outcome) = match self.apply(button).await {
            Ok(reply) => (reply, RouteOutcome::Completed),
            Err(e) => {
                error!("❌ Designation update for {custom_id} failed: {e}");
                (generic_error_reply(), RouteOutcome::Failed)
            }
        };
        responder.edit(&reply.with_author(author)).await?;
        Ok(outcome)
    }

    /// Apply a button action, mapping expected conditions to replies. Only storage
    /// failures come back as errors.
    async fn apply(&self, button: ButtonAction) -> Result<Reply, DesignationError> {
        match button {
            ButtonAction::Designate(id) => match self.designations.designate(id).await {
                Ok(()) => Ok(Reply::success(
                    "Designation Successful",
                    "Successfully designated this user as a threat",
                )),
                Err(DesignationError::AlreadyMarked(_)) => Ok(Reply::error(
                    "User Already Designated",
                    "This user has already been designated as a threat",
                )),
                Err(e) => Err(e),
            },
            ButtonAction::Undesignate(id) => match self.designations.undesignate(id).await {
                Ok(()) => Ok(Reply::success(
                    "Undesignation Successful",
                    "Successfully undesignated this user as a threat",
                )),
                Err(DesignationError::NotMarked(_)) => Ok(Reply::error(
                    "User Not Designated",
                    "This user has not been designated as a threat",
                )),
                Err(e) => Err(e),
            },
        }
    }
}
