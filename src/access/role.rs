//! Caller roles
//!
//! A role is the caller's standing relative to the organisation and
//! project, derived per request from membership relations (project
//! moderators, organisation initiators) by the surrounding layer and
//! passed in as a plain value. The evaluator never traverses
//! relationships itself.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EvalError;

/// The caller's standing for a permission decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Not signed in
    Anonymous,
    /// Signed-in participant without privileges
    User,
    /// Moderator of the project
    Moderator,
    /// Initiator of the organisation
    Initiator,
    /// Platform administrator
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Anonymous => "anonymous",
            Self::User => "user",
            Self::Moderator => "moderator",
            Self::Initiator => "initiator",
            Self::Admin => "admin",
        };
        write!(f, "{s}")
    }
}

impl FromStr for Role {
    type Err = EvalError;

    /// Parses a role name, failing closed on anything unknown.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "anonymous" => Ok(Self::Anonymous),
            "user" => Ok(Self::User),
            "moderator" => Ok(Self::Moderator),
            "initiator" => Ok(Self::Initiator),
            "admin" => Ok(Self::Admin),
            other => Err(EvalError::UnknownRole(other.to_string())),
        }
    }
}
