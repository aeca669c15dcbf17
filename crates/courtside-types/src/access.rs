//! Role-based access control.
//!
//! The identity collaborator authenticates a request and hands the engines a
//! [`Caller`]; nothing here reads ambient session state.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{CourtsideError, Result, UserId};

/// A single grantable capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ManageBills,
    ManagePartyBills,
    ManageDebts,
    MarkPayments,
    OrganizeBrackets,
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ManageBills => write!(f, "MANAGE_BILLS"),
            Self::ManagePartyBills => write!(f, "MANAGE_PARTY_BILLS"),
            Self::ManageDebts => write!(f, "MANAGE_DEBTS"),
            Self::MarkPayments => write!(f, "MARK_PAYMENTS"),
            Self::OrganizeBrackets => write!(f, "ORGANIZE_BRACKETS"),
        }
    }
}

/// Preset permission bundles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    /// Handles money: bills, party bills, debts, payments.
    Treasurer,
    /// Runs tournaments.
    Organizer,
    Member,
}

impl Role {
    #[must_use]
    pub fn permissions(self) -> BTreeSet<Permission> {
        use Permission::{ManageBills, ManageDebts, ManagePartyBills, MarkPayments, OrganizeBrackets};
        match self {
            Self::Admin => [ManageBills, ManagePartyBills, ManageDebts, MarkPayments, OrganizeBrackets]
                .into_iter()
                .collect(),
            Self::Treasurer => [ManageBills, ManagePartyBills, ManageDebts, MarkPayments]
                .into_iter()
                .collect(),
            Self::Organizer => [OrganizeBrackets].into_iter().collect(),
            Self::Member => BTreeSet::new(),
        }
    }
}

/// An authenticated caller and what they may do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    pub user_id: UserId,
    pub permissions: BTreeSet<Permission>,
}

impl Caller {
    #[must_use]
    pub fn new(user_id: UserId, permissions: BTreeSet<Permission>) -> Self {
        Self {
            user_id,
            permissions,
        }
    }

    #[must_use]
    pub fn with_roles(user_id: UserId, roles: &[Role]) -> Self {
        let permissions = roles.iter().flat_map(|r| r.permissions()).collect();
        Self::new(user_id, permissions)
    }

    #[must_use]
    pub fn can(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }

    pub fn require(&self, permission: Permission) -> Result<()> {
        if self.can(permission) {
            Ok(())
        } else {
            Err(CourtsideError::PermissionDenied {
                user: self.user_id,
                permission,
            })
        }
    }
}
