//! Authorization actions.
//!
//! Each policy answers one question per action. Actions are a closed set so
//! dispatch is a `match`, not a method lookup by name.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::GateError;

/// An action a principal wants to perform on an entity.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    ViewAny,
    View,
    Create,
    Update,
    Delete,
    Restore,
    ForceDelete,
}

/// Coarse access level an action needs.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Access {
    Read,
    Write,
}

impl Access {
    pub fn as_str(&self) -> &'static str {
        match self {
            Access::Read => "read",
            Access::Write => "write",
        }
    }
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::ViewAny,
        Action::View,
        Action::Create,
        Action::Update,
        Action::Delete,
        Action::Restore,
        Action::ForceDelete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::ViewAny => "view_any",
            Action::View => "view",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Restore => "restore",
            Action::ForceDelete => "force_delete",
        }
    }

    pub fn access(&self) -> Access {
        match self {
            Action::ViewAny | Action::View => Access::Read,
            Action::Create
            | Action::Update
            | Action::Delete
            | Action::Restore
            | Action::ForceDelete => Access::Write,
        }
    }
}

impl core::fmt::Display for Action {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = GateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GateError::UnknownAction(s.to_string()))
    }
}
