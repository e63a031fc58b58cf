//! Auth/session capability consumed by catalog views
//!
//! The engine never stores saved items itself. Views ask the session whether
//! a user is logged in and forward save/unsave gestures to it.

use crate::error::{Error, Result};
use std::collections::BTreeSet;

pub trait SessionCapability {
    fn is_authenticated(&self) -> bool;

    fn is_saved(&self, item_id: i64) -> bool;

    /// Mark an item saved for the current user
    fn save_item(&mut self, item_id: i64) -> Result<()>;

    /// Mark an item unsaved for the current user
    fn unsave_item(&mut self, item_id: i64) -> Result<()>;

    /// Flip the saved flag; returns the new state
    fn toggle_saved(&mut self, item_id: i64) -> Result<bool> {
        if self.is_saved(item_id) {
            self.unsave_item(item_id)?;
            Ok(false)
        } else {
            self.save_item(item_id)?;
            Ok(true)
        }
    }
}

/// Nobody logged in
#[derive(Debug, Default, Clone, Copy)]
pub struct GuestSession;

impl SessionCapability for GuestSession {
    fn is_authenticated(&self) -> bool {
        false
    }

    fn is_saved(&self, _item_id: i64) -> bool {
        false
    }

    fn save_item(&mut self, _item_id: i64) -> Result<()> {
        Err(Error::NotAuthenticated)
    }

    fn unsave_item(&mut self, _item_id: i64) -> Result<()> {
        Err(Error::NotAuthenticated)
    }
}

/// Logged-in user with an in-memory saved list
#[derive(Debug, Clone)]
pub struct LocalSession {
    pub username: String,
    saved: BTreeSet<i64>,
}

impl LocalSession {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            saved: BTreeSet::new(),
        }
    }

    pub fn with_saved(username: impl Into<String>, saved: impl IntoIterator<Item = i64>) -> Self {
        Self {
            username: username.into(),
            saved: saved.into_iter().collect(),
        }
    }
}

impl SessionCapability for LocalSession {
    fn is_authenticated(&self) -> bool {
        true
    }

    fn is_saved(&self, item_id: i64) -> bool {
        self.saved.contains(&item_id)
    }

    fn save_item(&mut self, item_id: i64) -> Result<()> {
        self.saved.insert(item_id);
        Ok(())
    }

    fn unsave_item(&mut self, item_id: i64) -> Result<()> {
        self.saved.remove(&item_id);
        Ok(())
    }
}
