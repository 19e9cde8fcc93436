use crate::error::Result;

pub const THEME_KEY: &str = "theme-mode";
pub const THEME_ATTRIBUTE: &str = "data-theme";
pub const LIGHT_SCHEME_QUERY: &str = "(prefers-color-scheme: light)";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Stored values other than `"light"` resolve to the dark default.
    pub fn from_stored(value: &str) -> Self {
        match value {
            "light" => Self::Light,
            _ => Self::Dark,
        }
    }

    pub fn from_system(prefers_light: bool) -> Self {
        if prefers_light {
            Self::Light
        } else {
            Self::Dark
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Value for the root `data-theme` attribute; dark removes it.
    pub fn root_marker(self) -> Option<&'static str> {
        match self {
            Self::Light => Some("light"),
            Self::Dark => None,
        }
    }

    pub fn icon_class(self) -> &'static str {
        match self {
            Self::Light => "fas fa-sun",
            Self::Dark => "fas fa-moon",
        }
    }

    pub fn pressed(self) -> bool {
        matches!(self, Self::Light)
    }

    pub fn toggle_title(self) -> String {
        let next = self.toggled().as_str();
        format!("Switch to {next} theme")
    }
}

/// Key-value persistence for the theme choice.
pub trait PreferenceStore {
    fn load(&self, key: &str) -> Result<Option<String>>;
    fn save(&self, key: &str, value: &str) -> Result<()>;
}

fn stored_preference<S: PreferenceStore>(store: &S) -> Result<Option<Theme>> {
    Ok(store
        .load(THEME_KEY)?
        .filter(|value| !value.is_empty())
        .map(|value| Theme::from_stored(&value)))
}

/// Dark/light state with a persisted user override and a system fallback.
pub struct ThemeMachine<S> {
    store: S,
    current: Theme,
}

impl<S: PreferenceStore> ThemeMachine<S> {
    pub fn init(store: S, system_prefers_light: bool) -> Self {
        let current = match stored_preference(&store) {
            Ok(Some(saved)) => saved,
            Ok(None) => Theme::from_system(system_prefers_light),
            Err(error) => {
                tracing::debug!(%error, "theme preference unreadable, using dark");
                Theme::Dark
            }
        };

        Self { store, current }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    /// Flips the applied theme and persists it; a failed write keeps the in-memory state.
    pub fn toggle(&mut self) -> Theme {
        let next = self.current.toggled();
        self.current = next;

        if let Err(error) = self.store.save(THEME_KEY, next.as_str()) {
            tracing::debug!(%error, theme = next.as_str(), "theme preference not persisted");
        }

        next
    }

    /// Follows the system scheme only while no explicit choice is stored.
    pub fn system_changed(&mut self, prefers_light: bool) -> Option<Theme> {
        match stored_preference(&self.store) {
            Ok(None) => {
                self.current = Theme::from_system(prefers_light);
                Some(self.current)
            }
            Ok(Some(_)) | Err(_) => None,
        }
    }
}
