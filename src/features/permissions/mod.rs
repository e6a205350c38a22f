//! # Feature: Permissions
//!
//! Role-based command gating. Each command declares a tier; a tier resolves to a set of
//! role IDs, and holders of any role in that set (or in the superuser `all` set) may run it.
//! Tiers are independent sets, not a ladder.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

use std::collections::HashSet;
use std::fmt;

/// Permission tier a command requires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PermissionTier {
    /// Superuser roles only
    All,
    Fetch,
    Designate,
    /// Anyone may run the command
    #[default]
    None,
}

impl fmt::Display for PermissionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PermissionTier::All => "all",
            PermissionTier::Fetch => "fetch",
            PermissionTier::Designate => "designate",
            PermissionTier::None => "none",
        };
        f.write_str(name)
    }
}

/// Role ID sets per tier, loaded once at startup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionConfig {
    pub all: HashSet<u64>,
    pub fetch: HashSet<u64>,
    pub designate: HashSet<u64>,
}

impl PermissionConfig {
    pub fn new(all: HashSet<u64>, fetch: HashSet<u64>, designate: HashSet<u64>) -> Self {
        Self {
            all,
            fetch,
            designate,
        }
    }

    /// Role set a tier resolves to; `None` for the open tier
    pub fn roles_for(&self, tier: PermissionTier) -> Option<&HashSet<u64>> {
        match tier {
            PermissionTier::All => Some(&self.all),
            PermissionTier::Fetch => Some(&self.fetch),
            PermissionTier::Designate => Some(&self.designate),
            PermissionTier::None => None,
        }
    }

    /// True iff `roles ∩ (tier roles ∪ all) ≠ ∅`, or the tier is open.
    pub fn authorize(&self, tier: PermissionTier, roles: &[u64]) -> bool {
        match self.roles_for(tier) {
            None => true,
            Some(tier_roles) => self.holds_any(roles, tier_roles),
        }
    }

    /// Button actions on designation records are gated by `designate ∪ all` directly.
    pub fn can_designate(&self, roles: &[u64]) -> bool {
        self.authorize_roles(&[&self.designate], roles)
    }

    /// True iff the member holds a role from any of `sets`, or from `all`.
    pub fn authorize_roles(&self, sets: &[&HashSet<u64>], roles: &[u64]) -> bool {
        sets.iter().any(|set| self.holds_any(roles, set))
    }

    fn holds_any(&self, roles: &[u64], tier_roles: &HashSet<u64>) -> bool {
        roles
            .iter()
            .any(|role| tier_roles.contains(role) || self.all.contains(role))
    }
}
