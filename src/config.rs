use serde::Deserialize;

use crate::error::Result;

pub const CONFIG_ELEMENT_ID: &str = "fx-config";

const DEFAULT_ROLE: &str = "Web Developer | IT Student | UI/UX & Digital Marketing Enthusiast";
const DEFAULT_REVEAL_MARGIN: &str = "0px";
const PAGE_REVEAL_MARGIN: &str = "0px 0px -60px 0px";

const THRESHOLD_BOUNDS: (f64, f64) = (0.0, 1.0);
const REVEAL_OFFSET_PX_BOUNDS: (f64, f64) = (0.0, 400.0);
const REVEAL_DURATION_S_BOUNDS: (f64, f64) = (0.0, 10.0);
const REVEAL_STAGGER_S_BOUNDS: (f64, f64) = (0.0, 5.0);
const TYPING_STEP_MS_BOUNDS: (u32, u32) = (1, 10_000);
const TYPING_HOLD_MS_BOUNDS: (u32, u32) = (0, 60_000);
const COUNTER_DURATION_MS_BOUNDS: (f64, f64) = (1.0, 60_000.0);
const DOT_COUNT_BOUNDS: (usize, usize) = (0, 1_000);
const DOT_RADIUS_BOUNDS: (f64, f64) = (0.1, 50.0);
const DOT_SPEED_BOUNDS: (f64, f64) = (0.0, 20.0);
const DOT_OPACITY_BOUNDS: (f64, f64) = (0.0, 1.0);
const DOT_FADE_BOUNDS: (f64, f64) = (0.0, 0.5);
const DOT_EDGE_MARGIN_BOUNDS: (f64, f64) = (0.0, 200.0);
const HEADER_OFFSET_BOUNDS: (f64, f64) = (0.0, 1_000.0);
const NAVBAR_SHADOW_AFTER_BOUNDS: (f64, f64) = (0.0, 10_000.0);

/// Which page the bundle is running on, read from `<body data-page>`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PagePreset {
    #[default]
    Home,
    About,
    Contact,
    Projects,
}

impl PagePreset {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::About => "about",
            Self::Contact => "contact",
            Self::Projects => "projects",
        }
    }

    pub fn from_attr(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "about" => Self::About,
            "contact" => Self::Contact,
            "projects" | "project" => Self::Projects,
            _ => Self::Home,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct RevealGroup {
    pub selectors: Vec<String>,
    pub threshold: f64,
    pub root_margin: String,
    pub offset_px: f64,
    pub duration_s: f64,
    pub stagger_s: f64,
    /// When false the stylesheet owns the hidden state and only the class is toggled.
    pub inline_styles: bool,
    pub first_match_only: bool,
}

impl Default for RevealGroup {
    fn default() -> Self {
        Self {
            selectors: vec![".reveal".to_string()],
            threshold: 0.1,
            root_margin: DEFAULT_REVEAL_MARGIN.to_string(),
            offset_px: 24.0,
            duration_s: 0.7,
            stagger_s: 0.0,
            inline_styles: false,
            first_match_only: false,
        }
    }
}

impl RevealGroup {
    fn page_group(selectors: &[&str]) -> Self {
        Self {
            selectors: selectors.iter().map(|value| (*value).to_string()).collect(),
            root_margin: PAGE_REVEAL_MARGIN.to_string(),
            inline_styles: true,
            ..Self::default()
        }
    }

    /// Selector list joined so a single query returns matches in document order.
    pub fn joined_selector(&self) -> String {
        self.selectors.join(", ")
    }

    fn sanitized(self) -> Self {
        let defaults = Self::default();
        Self {
            selectors: self
                .selectors
                .into_iter()
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .collect(),
            threshold: within_bounds(self.threshold, defaults.threshold, THRESHOLD_BOUNDS),
            root_margin: Some(self.root_margin.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or(defaults.root_margin),
            offset_px: within_bounds(self.offset_px, defaults.offset_px, REVEAL_OFFSET_PX_BOUNDS),
            duration_s: within_bounds(
                self.duration_s,
                defaults.duration_s,
                REVEAL_DURATION_S_BOUNDS,
            ),
            stagger_s: within_bounds(self.stagger_s, defaults.stagger_s, REVEAL_STAGGER_S_BOUNDS),
            inline_styles: self.inline_styles,
            first_match_only: self.first_match_only,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct TypingConfig {
    pub roles: Vec<String>,
    pub type_ms: u32,
    pub hold_full_ms: u32,
    pub delete_ms: u32,
    pub hold_empty_ms: u32,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            roles: vec![DEFAULT_ROLE.to_string()],
            type_ms: 55,
            hold_full_ms: 2_800,
            delete_ms: 30,
            hold_empty_ms: 400,
        }
    }
}

impl TypingConfig {
    fn sanitized(self) -> Self {
        let defaults = Self::default();
        Self {
            roles: self.roles,
            type_ms: within_bounds(self.type_ms, defaults.type_ms, TYPING_STEP_MS_BOUNDS),
            hold_full_ms: within_bounds(
                self.hold_full_ms,
                defaults.hold_full_ms,
                TYPING_HOLD_MS_BOUNDS,
            ),
            delete_ms: within_bounds(self.delete_ms, defaults.delete_ms, TYPING_STEP_MS_BOUNDS),
            hold_empty_ms: within_bounds(
                self.hold_empty_ms,
                defaults.hold_empty_ms,
                TYPING_HOLD_MS_BOUNDS,
            ),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    pub threshold: f64,
    pub duration_ms: f64,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            duration_ms: 1_200.0,
        }
    }
}

impl CounterConfig {
    fn sanitized(self) -> Self {
        let defaults = Self::default();
        Self {
            threshold: within_bounds(self.threshold, defaults.threshold, THRESHOLD_BOUNDS),
            duration_ms: within_bounds(
                self.duration_ms,
                defaults.duration_ms,
                COUNTER_DURATION_MS_BOUNDS,
            ),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct DotsConfig {
    pub enabled: bool,
    pub count: usize,
    pub min_radius: f64,
    pub max_radius: f64,
    pub min_speed: f64,
    pub max_speed: f64,
    pub min_opacity: f64,
    pub max_opacity: f64,
    pub min_fade: f64,
    pub max_fade: f64,
    pub edge_margin: f64,
    pub pause_when_hidden: bool,
}

impl Default for DotsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            count: 80,
            min_radius: 1.0,
            max_radius: 2.2,
            min_speed: 0.08,
            max_speed: 0.20,
            min_opacity: 0.06,
            max_opacity: 0.22,
            min_fade: 0.0003,
            max_fade: 0.0007,
            edge_margin: 4.0,
            pause_when_hidden: false,
        }
    }
}

impl DotsConfig {
    fn sanitized(self) -> Self {
        let defaults = Self::default();
        let (min_radius, max_radius) = ordered_pair(
            within_bounds(self.min_radius, defaults.min_radius, DOT_RADIUS_BOUNDS),
            within_bounds(self.max_radius, defaults.max_radius, DOT_RADIUS_BOUNDS),
            (defaults.min_radius, defaults.max_radius),
        );
        let (min_speed, max_speed) = ordered_pair(
            within_bounds(self.min_speed, defaults.min_speed, DOT_SPEED_BOUNDS),
            within_bounds(self.max_speed, defaults.max_speed, DOT_SPEED_BOUNDS),
            (defaults.min_speed, defaults.max_speed),
        );
        let (min_opacity, max_opacity) = ordered_pair(
            within_bounds(self.min_opacity, defaults.min_opacity, DOT_OPACITY_BOUNDS),
            within_bounds(self.max_opacity, defaults.max_opacity, DOT_OPACITY_BOUNDS),
            (defaults.min_opacity, defaults.max_opacity),
        );
        let (min_fade, max_fade) = ordered_pair(
            within_bounds(self.min_fade, defaults.min_fade, DOT_FADE_BOUNDS),
            within_bounds(self.max_fade, defaults.max_fade, DOT_FADE_BOUNDS),
            (defaults.min_fade, defaults.max_fade),
        );

        Self {
            enabled: self.enabled,
            count: within_bounds(self.count, defaults.count, DOT_COUNT_BOUNDS),
            min_radius,
            max_radius,
            min_speed,
            max_speed,
            min_opacity,
            max_opacity,
            min_fade,
            max_fade,
            edge_margin: within_bounds(
                self.edge_margin,
                defaults.edge_margin,
                DOT_EDGE_MARGIN_BOUNDS,
            ),
            pause_when_hidden: self.pause_when_hidden,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub header_offset: f64,
    pub navbar_shadow_after: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            header_offset: 80.0,
            navbar_shadow_after: 40.0,
        }
    }
}

impl ScrollConfig {
    fn sanitized(self) -> Self {
        let defaults = Self::default();
        Self {
            header_offset: within_bounds(
                self.header_offset,
                defaults.header_offset,
                HEADER_OFFSET_BOUNDS,
            ),
            navbar_shadow_after: within_bounds(
                self.navbar_shadow_after,
                defaults.navbar_shadow_after,
                NAVBAR_SHADOW_AFTER_BOUNDS,
            ),
        }
    }
}

/// Everything the page bootstrap needs to build its controllers.
#[derive(Clone, Debug, PartialEq)]
pub struct FxConfig {
    pub page: PagePreset,
    pub reveal: Vec<RevealGroup>,
    pub typing: TypingConfig,
    pub counters: CounterConfig,
    pub dots: DotsConfig,
    pub scroll: ScrollConfig,
}

/// Shape of the optional `#fx-config` JSON block. Absent sections keep the preset.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FxOverrides {
    page: Option<PagePreset>,
    reveal: Option<Vec<RevealGroup>>,
    typing: Option<TypingConfig>,
    counters: Option<CounterConfig>,
    dots: Option<DotsConfig>,
    scroll: Option<ScrollConfig>,
}

impl FxConfig {
    pub fn for_page(page: PagePreset) -> Self {
        let mut reveal = vec![RevealGroup::default()];

        match page {
            PagePreset::Home => {}
            PagePreset::About => reveal.push(RevealGroup {
                threshold: 0.15,
                ..RevealGroup::page_group(&[
                    ".intro-grid",
                    ".highlights-grid",
                    ".skills-cols",
                    ".certs-grid",
                    ".about-cta-section .cta-box",
                ])
            }),
            PagePreset::Contact => reveal.push(RevealGroup {
                first_match_only: true,
                ..RevealGroup::page_group(&[".contact-form-col", ".contact-info-col", ".cta-box"])
            }),
            PagePreset::Projects => reveal.push(RevealGroup {
                offset_px: 28.0,
                stagger_s: 0.08,
                ..RevealGroup::page_group(&[".feat-card", ".proj-mini-card", ".cta-box"])
            }),
        }

        Self {
            page,
            reveal,
            typing: TypingConfig::default(),
            counters: CounterConfig::default(),
            dots: DotsConfig::default(),
            scroll: ScrollConfig::default(),
        }
    }

    /// Builds the page preset, then layers the JSON block over it.
    pub fn from_json(page: PagePreset, raw: &str) -> Result<Self> {
        let overrides: FxOverrides = serde_json::from_str(raw)?;
        let mut config = Self::for_page(overrides.page.unwrap_or(page));

        if let Some(reveal) = overrides.reveal {
            config.reveal = reveal;
        }
        if let Some(typing) = overrides.typing {
            config.typing = typing;
        }
        if let Some(counters) = overrides.counters {
            config.counters = counters;
        }
        if let Some(dots) = overrides.dots {
            config.dots = dots;
        }
        if let Some(scroll) = overrides.scroll {
            config.scroll = scroll;
        }

        Ok(config.sanitized())
    }

    /// Never fails: a broken JSON block is logged and the preset is used.
    pub fn resolve(page_attr: Option<&str>, raw_json: Option<&str>) -> Self {
        let page = page_attr.map(PagePreset::from_attr).unwrap_or_default();

        let Some(raw_json) = raw_json.map(str::trim).filter(|value| !value.is_empty()) else {
            return Self::for_page(page);
        };

        match Self::from_json(page, raw_json) {
            Ok(config) => config,
            Err(error) => {
                tracing::warn!(page = page.as_str(), %error, "ignoring effects config block");
                Self::for_page(page)
            }
        }
    }

    fn sanitized(self) -> Self {
        Self {
            page: self.page,
            reveal: self
                .reveal
                .into_iter()
                .map(RevealGroup::sanitized)
                .filter(|group| !group.selectors.is_empty())
                .collect(),
            typing: self.typing.sanitized(),
            counters: self.counters.sanitized(),
            dots: self.dots.sanitized(),
            scroll: self.scroll.sanitized(),
        }
    }
}

fn within_bounds<T: PartialOrd + Copy>(value: T, default: T, bounds: (T, T)) -> T {
    if value >= bounds.0 && value <= bounds.1 {
        value
    } else {
        default
    }
}

fn ordered_pair(min: f64, max: f64, default: (f64, f64)) -> (f64, f64) {
    if min <= max {
        (min, max)
    } else {
        default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_page_attr_falls_back_to_home() {
        assert_eq!(PagePreset::from_attr("blog"), PagePreset::Home);
        assert_eq!(PagePreset::from_attr(" About "), PagePreset::About);
        assert_eq!(PagePreset::from_attr("project"), PagePreset::Projects);
    }

    #[test]
    fn every_page_keeps_the_base_reveal_group() {
        for page in [
            PagePreset::Home,
            PagePreset::About,
            PagePreset::Contact,
            PagePreset::Projects,
        ] {
            let config = FxConfig::for_page(page);
            assert_eq!(config.reveal[0], RevealGroup::default());
            assert!(!config.reveal[0].inline_styles);
        }

        assert_eq!(FxConfig::for_page(PagePreset::Home).reveal.len(), 1);
    }

    #[test]
    fn projects_preset_staggers_its_cards() {
        let config = FxConfig::for_page(PagePreset::Projects);
        let group = &config.reveal[1];

        assert_eq!(group.stagger_s, 0.08);
        assert_eq!(group.offset_px, 28.0);
        assert_eq!(group.root_margin, "0px 0px -60px 0px");
        assert_eq!(group.joined_selector(), ".feat-card, .proj-mini-card, .cta-box");
    }

    #[test]
    fn contact_preset_matches_first_element_per_selector() {
        let config = FxConfig::for_page(PagePreset::Contact);
        assert!(config.reveal[1].first_match_only);
        assert_eq!(config.reveal[1].threshold, 0.1);
    }

    #[test]
    fn json_overrides_merge_over_page_preset() {
        let config = FxConfig::from_json(
            PagePreset::About,
            r#"{ "typing": { "roles": ["Rustacean"] }, "dots": { "count": 12 } }"#,
        )
        .expect("valid config");

        assert_eq!(config.page, PagePreset::About);
        assert_eq!(config.reveal.len(), 2);
        assert_eq!(config.reveal[1].threshold, 0.15);
        assert_eq!(config.typing.roles, vec!["Rustacean".to_string()]);
        assert_eq!(config.typing.type_ms, 55);
        assert_eq!(config.dots.count, 12);
        assert_eq!(config.dots.max_opacity, 0.22);
    }

    #[test]
    fn json_page_wins_over_body_attribute() {
        let config = FxConfig::resolve(Some("home"), Some(r#"{ "page": "projects" }"#));
        assert_eq!(config.page, PagePreset::Projects);
        assert_eq!(config.reveal.len(), 2);
    }

    #[test]
    fn out_of_bounds_values_fall_back_to_defaults() {
        let config = FxConfig::from_json(
            PagePreset::Home,
            r#"{
                "counters": { "threshold": 1.5, "duration_ms": 0 },
                "dots": { "count": 5000, "min_opacity": 0.5, "max_opacity": 0.2 },
                "scroll": { "header_offset": -10 }
            }"#,
        )
        .expect("valid config");

        assert_eq!(config.counters, CounterConfig::default());
        assert_eq!(config.dots.count, 80);
        assert_eq!(config.dots.min_opacity, 0.06);
        assert_eq!(config.dots.max_opacity, 0.22);
        assert_eq!(config.scroll.header_offset, 80.0);
    }

    #[test]
    fn reveal_groups_without_selectors_are_dropped() {
        let config = FxConfig::from_json(
            PagePreset::Home,
            r#"{ "reveal": [ { "selectors": ["  "] }, { "selectors": [".card"], "stagger_s": 0.1 } ] }"#,
        )
        .expect("valid config");

        assert_eq!(config.reveal.len(), 1);
        assert_eq!(config.reveal[0].selectors, vec![".card".to_string()]);
        assert_eq!(config.reveal[0].stagger_s, 0.1);
    }

    #[test]
    fn broken_json_keeps_the_preset() {
        let config = FxConfig::resolve(Some("contact"), Some("{ not json"));
        assert_eq!(config, FxConfig::for_page(PagePreset::Contact));

        let unknown_field = FxConfig::resolve(Some("contact"), Some(r#"{ "colour": "red" }"#));
        assert_eq!(unknown_field, FxConfig::for_page(PagePreset::Contact));
    }

    #[test]
    fn blank_json_block_is_ignored() {
        let config = FxConfig::resolve(None, Some("   "));
        assert_eq!(config, FxConfig::for_page(PagePreset::Home));
    }
}
