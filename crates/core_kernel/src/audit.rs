//! Audit metadata carried by every mutable aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of the user or system performing an operation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Actor(String);

impl Actor {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Creation and last-modification stamps
///
/// `created_*` are written once by [`AuditInfo::created`]. Only
/// [`AuditInfo::touch`] moves the `last_modified_*` pair afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditInfo {
    created_by: Actor,
    created_on: DateTime<Utc>,
    last_modified_by: Actor,
    last_modified_on: DateTime<Utc>,
}

impl AuditInfo {
    /// Stamps a freshly created aggregate; last-modified mirrors creation
    pub fn created(actor: &Actor, at: DateTime<Utc>) -> Self {
        Self {
            created_by: actor.clone(),
            created_on: at,
            last_modified_by: actor.clone(),
            last_modified_on: at,
        }
    }

    /// Records an accepted mutation
    pub fn touch(&mut self, actor: &Actor, at: DateTime<Utc>) {
        self.last_modified_by = actor.clone();
        self.last_modified_on = at;
    }

    pub fn created_by(&self) -> &Actor {
        &self.created_by
    }

    pub fn created_on(&self) -> DateTime<Utc> {
        self.created_on
    }

    pub fn last_modified_by(&self) -> &Actor {
        &self.last_modified_by
    }

    pub fn last_modified_on(&self) -> DateTime<Utc> {
        self.last_modified_on
    }
}
