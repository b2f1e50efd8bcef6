//! Local key/value flags: onboarding, premium entitlement, and the domain
//! handed over by the share flow.
//!
//! Flags live in a small JSON file. A missing file reads as all defaults so
//! a first launch needs no setup.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::PreferencesError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub has_seen_tutorial: bool,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_queried_domain: Option<String>,
}

/// File-backed store for [`Preferences`].
#[derive(Debug, Clone)]
pub struct PreferencesStore {
    path: PathBuf,
}

impl PreferencesStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the current flags. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`PreferencesError::Read`] on I/O failure or
    /// [`PreferencesError::Parse`] if the file is not valid JSON.
    pub fn load(&self) -> Result<Preferences, PreferencesError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Preferences::default());
            }
            Err(e) => {
                return Err(PreferencesError::Read {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };
        serde_json::from_str(&content).map_err(|e| PreferencesError::Parse {
            path: self.path.clone(),
            source: e,
        })
    }

    /// Writes `prefs`, replacing whatever was stored.
    ///
    /// # Errors
    ///
    /// Returns [`PreferencesError::Write`] if the file cannot be written.
    pub fn save(&self, prefs: &Preferences) -> Result<(), PreferencesError> {
        let body = serde_json::to_string_pretty(prefs).map_err(|e| PreferencesError::Parse {
            path: self.path.clone(),
            source: e,
        })?;
        std::fs::write(&self.path, body).map_err(|e| PreferencesError::Write {
            path: self.path.clone(),
            source: e,
        })
    }

    fn update<F>(&self, f: F) -> Result<Preferences, PreferencesError>
    where
        F: FnOnce(&mut Preferences),
    {
        let mut prefs = self.load()?;
        f(&mut prefs);
        self.save(&prefs)?;
        Ok(prefs)
    }

    /// `true` until the onboarding tutorial has been dismissed once.
    ///
    /// # Errors
    ///
    /// See [`PreferencesStore::load`].
    pub fn should_show_tutorial(&self) -> Result<bool, PreferencesError> {
        Ok(!self.load()?.has_seen_tutorial)
    }

    /// # Errors
    ///
    /// See [`PreferencesStore::save`].
    pub fn mark_tutorial_seen(&self) -> Result<(), PreferencesError> {
        self.update(|p| p.has_seen_tutorial = true)?;
        tracing::info!(path = %self.path.display(), "tutorial marked as seen");
        Ok(())
    }

    /// # Errors
    ///
    /// See [`PreferencesStore::save`].
    pub fn reset_tutorial(&self) -> Result<(), PreferencesError> {
        self.update(|p| p.has_seen_tutorial = false)?;
        Ok(())
    }

    /// # Errors
    ///
    /// See [`PreferencesStore::load`].
    pub fn is_premium(&self) -> Result<bool, PreferencesError> {
        Ok(self.load()?.is_premium)
    }

    /// # Errors
    ///
    /// See [`PreferencesStore::save`].
    pub fn set_premium(&self, premium: bool) -> Result<(), PreferencesError> {
        self.update(|p| p.is_premium = premium)?;
        tracing::info!(premium, "premium entitlement updated");
        Ok(())
    }

    /// Records the host handed over by the share flow.
    ///
    /// # Errors
    ///
    /// See [`PreferencesStore::save`].
    pub fn set_last_queried_domain(&self, domain: &str) -> Result<(), PreferencesError> {
        let domain = domain.to_owned();
        self.update(|p| p.last_queried_domain = Some(domain))?;
        Ok(())
    }

    /// Returns and clears the host handed over by the share flow.
    ///
    /// # Errors
    ///
    /// See [`PreferencesStore::load`] and [`PreferencesStore::save`].
    pub fn take_last_queried_domain(&self) -> Result<Option<String>, PreferencesError> {
        let mut prefs = self.load()?;
        let taken = prefs.last_queried_domain.take();
        if taken.is_some() {
            self.save(&prefs)?;
        }
        Ok(taken)
    }
}
