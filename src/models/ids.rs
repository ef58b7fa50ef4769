//! Entity identifiers.
//!
//! The upstream data source is inconsistent about id types: the same
//! `team_id` shows up as `7` in one payload and `"7"` in another. Every id
//! is therefore stored as a string and accepts either JSON form.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An entity identifier, string-backed.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EntityId(String);

impl EntityId {
    /// Create a new EntityId, trimming surrounding whitespace.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        if id.trim().len() == id.len() {
            Self(id)
        } else {
            Self(id.trim().to_string())
        }
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<u64> for EntityId {
    fn from(n: u64) -> Self {
        Self::new(n.to_string())
    }
}

struct EntityIdVisitor;

impl<'de> Visitor<'de> for EntityIdVisitor {
    type Value = EntityId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string or integer id")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<EntityId, E> {
        Ok(EntityId::new(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<EntityId, E> {
        Ok(EntityId::new(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<EntityId, E> {
        Ok(EntityId::from(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<EntityId, E> {
        Ok(EntityId::new(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<EntityId, E> {
        // `12.0` is an integer id that went through a float somewhere upstream.
        if v.is_finite() && v.fract() == 0.0 {
            Ok(EntityId::new(format!("{}", v as i64)))
        } else {
            Err(E::invalid_value(de::Unexpected::Float(v), &self))
        }
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(EntityIdVisitor)
    }
}

/// Type alias for player/coach ids
pub type ParticipantId = EntityId;

/// Type alias for match ids
pub type MatchId = EntityId;

/// Type alias for team ids
pub type TeamId = EntityId;

/// Type alias for championship ids
pub type ChampionshipId = EntityId;

/// Type alias for agent ids
pub type AgentId = EntityId;

/// Type alias for map ids
pub type MapId = EntityId;
