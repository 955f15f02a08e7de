/*
 * Responsibility
 * - tenant role (bpo_side / client_side / admin) の定義
 * - role id (UUID or small integer) -> Role の静的な対応表
 * - 起動時に一度だけ組み立て、以降は読み取り専用で共有する
 */
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::AppEnv;

/// Production id of the BPO operator role.
pub const PRODUCTION_BPO_ROLE_ID: &str = "3e979a41-1ddb-452a-a6f8-7053b894856c";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    BpoSide,
    ClientSide,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::BpoSide => "bpo_side",
            Role::ClientSide => "client_side",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RoleMapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "bpo_side" => Ok(Role::BpoSide),
            "client_side" => Ok(Role::ClientSide),
            "admin" => Ok(Role::Admin),
            other => Err(RoleMapError::UnknownRoleName(other.to_string())),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoleMapError {
    #[error("unknown role name: {0}")]
    UnknownRoleName(String),
    #[error("malformed role map entry: {0}")]
    MalformedEntry(String),
}

/// Immutable lookup from opaque role id to [`Role`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleMap {
    entries: HashMap<String, Role>,
}

impl RoleMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn production() -> Self {
        Self::new().with(PRODUCTION_BPO_ROLE_ID, Role::BpoSide)
    }

    pub fn development() -> Self {
        Self::new()
            .with("1", Role::BpoSide)
            .with("2", Role::ClientSide)
            .with("3", Role::Admin)
    }

    pub fn for_env(app_env: AppEnv) -> Self {
        if app_env.is_production() {
            Self::production()
        } else {
            Self::development()
        }
    }

    pub fn with(mut self, role_id: impl Into<String>, role: Role) -> Self {
        self.entries.insert(role_id.into(), role);
        self
    }

    /// Merge `id=role,id=role` entries over the current table.
    ///
    /// Later entries win, so an environment can override a default id.
    pub fn merge_entries(mut self, entries: &str) -> Result<Self, RoleMapError> {
        for entry in entries.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (id, role) = entry
                .split_once('=')
                .ok_or_else(|| RoleMapError::MalformedEntry(entry.to_string()))?;

            let id = id.trim();
            if id.is_empty() {
                return Err(RoleMapError::MalformedEntry(entry.to_string()));
            }

            self.entries.insert(id.to_string(), role.parse()?);
        }
        Ok(self)
    }

    pub fn lookup(&self, role_id: &str) -> Option<Role> {
        self.entries.get(role_id).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
