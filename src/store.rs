//! Client-side application state: theme preference and signed-in session.
//!
//! The state is hydrated once at startup from a JSON file, mutated through
//! [`Store`], and written back after every change. Views never read the file
//! or the store directly; they receive the [`Appearance`] produced by [`apply`].

use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::roles::Role;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_name: String,
    pub company: String,
    pub role: Role,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppState {
    pub theme: ThemeMode,
    pub session: Option<Session>,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode state: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Persisted application state
#[derive(Debug)]
pub struct Store {
    /// `None` keeps the store in memory only
    path: Option<PathBuf>,
    state: AppState,
}

impl Store {
    /// Load state from `path`. A missing file hydrates the defaults.
    pub fn hydrate(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let state = match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).map_err(|source| StoreError::Parse {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!("No saved state at {:?}, starting fresh", path);
                AppState::default()
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        tracing::debug!("Hydrated state from {:?}: {:?}", path, state);
        Ok(Self {
            path: Some(path),
            state,
        })
    }

    pub fn in_memory(state: AppState) -> Self {
        Self { path: None, state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn set_theme(&mut self, theme: ThemeMode) -> Result<(), StoreError> {
        self.state.theme = theme;
        self.persist()
    }

    pub fn toggle_theme(&mut self) -> Result<(), StoreError> {
        self.set_theme(self.state.theme.toggled())
    }

    pub fn sign_in(&mut self, session: Session) -> Result<(), StoreError> {
        tracing::info!("Signed in as {} ({})", session.user_name, session.company);
        self.state.session = Some(session);
        self.persist()
    }

    pub fn sign_out(&mut self) -> Result<(), StoreError> {
        self.state.session = None;
        self.persist()
    }

    fn persist(&self) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let io_err = |source| StoreError::Io {
            path: path.clone(),
            source,
        };
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(io_err)?;
        }
        let encoded = serde_json::to_string_pretty(&self.state)?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, encoded).map_err(io_err)?;
        std::fs::rename(&tmp, path).map_err(io_err)
    }
}

/// What the views need to know about the application state
#[derive(Debug, Clone)]
pub struct Appearance {
    pub theme: iced::Theme,
    pub dark: bool,
    /// Header line, e.g. "Priya Nair · Acme Corp"
    pub headline: String,
    pub role: Option<Role>,
}

/// Project application state onto view-level appearance.
pub fn apply(state: &AppState) -> Appearance {
    let (theme, dark) = match state.theme {
        ThemeMode::Dark => (iced::Theme::Dark, true),
        ThemeMode::Light => (iced::Theme::Light, false),
    };
    let (headline, role) = match &state.session {
        Some(session) => (
            format!("{} · {}", session.user_name, session.company),
            Some(session.role),
        ),
        None => ("Not signed in".to_string(), None),
    };
    Appearance {
        theme,
        dark,
        headline,
        role,
    }
}

/// Default location of the persisted state file
pub fn default_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_default()
        .join(".config")
        .join("hrdesk")
        .join("state.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn session() -> Session {
        Session {
            user_name: "Priya Nair".to_string(),
            company: "Acme Corp".to_string(),
            role: Role::Hr,
        }
    }

    #[test]
    fn missing_file_hydrates_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::hydrate(dir.path().join("state.json")).unwrap();
        assert_eq!(store.state(), &AppState::default());
    }

    #[test]
    fn changes_survive_rehydration() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");

        let mut store = Store::hydrate(&path).unwrap();
        store.toggle_theme().unwrap();
        store.sign_in(session()).unwrap();

        let again = Store::hydrate(&path).unwrap();
        assert_eq!(again.state().theme, ThemeMode::Light);
        assert_eq!(again.state().session, Some(session()));
    }

    #[test]
    fn corrupt_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = Store::hydrate(&path).unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, r#"{"theme":"light"}"#).unwrap();

        let store = Store::hydrate(&path).unwrap();
        assert_eq!(store.state().theme, ThemeMode::Light);
        assert_eq!(store.state().session, None);
    }

    #[test]
    fn in_memory_store_never_writes() {
        let mut store = Store::in_memory(AppState::default());
        store.sign_in(session()).unwrap();
        store.sign_out().unwrap();
        assert_eq!(store.state().session, None);
    }

    #[test]
    fn apply_projects_theme_and_session() {
        let signed_out = apply(&AppState::default());
        assert!(signed_out.dark);
        assert_eq!(signed_out.headline, "Not signed in");
        assert_eq!(signed_out.role, None);

        let signed_in = apply(&AppState {
            theme: ThemeMode::Light,
            session: Some(session()),
        });
        assert!(!signed_in.dark);
        assert_eq!(signed_in.headline, "Priya Nair · Acme Corp");
        assert_eq!(signed_in.role, Some(Role::Hr));
    }
}
