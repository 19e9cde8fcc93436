pub const ACTIVE_CLASS: &str = "active";
pub const MENU_OPEN_CLASS: &str = "menu-open";

const NAVBAR_SHADOW: &str = "0 4px 24px rgba(0,0,0,0.6)";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NavMenu {
    Open,
    #[default]
    Closed,
}

impl NavMenu {
    pub fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Open => Self::Closed,
            Self::Closed => Self::Open,
        }
    }

    /// Following a nav link always closes the menu.
    pub fn link_followed(self) -> Self {
        Self::Closed
    }
}

pub fn navbar_shadow(scroll_y: f64, threshold: f64) -> &'static str {
    if scroll_y > threshold {
        NAVBAR_SHADOW
    } else {
        "none"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_flips_between_states() {
        let menu = NavMenu::default();
        assert!(!menu.is_open());
        assert!(menu.toggled().is_open());
        assert!(!menu.toggled().toggled().is_open());
    }

    #[test]
    fn link_click_always_closes() {
        assert_eq!(NavMenu::Open.link_followed(), NavMenu::Closed);
        assert_eq!(NavMenu::Closed.link_followed(), NavMenu::Closed);
    }

    #[test]
    fn shadow_appears_past_the_threshold() {
        assert_eq!(navbar_shadow(0.0, 40.0), "none");
        assert_eq!(navbar_shadow(40.0, 40.0), "none");
        assert_eq!(navbar_shadow(41.0, 40.0), "0 4px 24px rgba(0,0,0,0.6)");
    }
}
