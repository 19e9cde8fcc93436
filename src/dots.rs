use crate::config::DotsConfig;

pub const CANVAS_ID: &str = "dots-bg";

const LIGHT_RGB: &str = "15,23,36";
const DARK_RGB: &str = "255,255,255";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dot {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub vx: f64,
    pub vy: f64,
    pub opacity: f64,
    pub fade: f64,
    pub fade_dir: f64,
}

fn between<R: FnMut() -> f64>(rng: &mut R, min: f64, max: f64) -> f64 {
    rng() * (max - min) + min
}

impl Dot {
    fn random<R: FnMut() -> f64>(
        config: &DotsConfig,
        width: f64,
        height: f64,
        rng: &mut R,
    ) -> Self {
        let vy = between(rng, -config.max_speed, config.max_speed);

        Self {
            x: between(rng, 0.0, width),
            y: between(rng, 0.0, height),
            radius: between(rng, config.min_radius, config.max_radius),
            vx: between(rng, -config.max_speed, config.max_speed),
            vy: if vy == 0.0 { config.min_speed } else { vy },
            opacity: between(rng, config.min_opacity, config.max_opacity),
            fade: between(rng, config.min_fade, config.max_fade),
            fade_dir: if rng() > 0.5 { 1.0 } else { -1.0 },
        }
    }

    fn advance(&mut self, config: &DotsConfig, width: f64, height: f64) {
        let margin = config.edge_margin;

        self.x += self.vx;
        self.y += self.vy;

        if self.x < -margin {
            self.x = width + margin;
        } else if self.x > width + margin {
            self.x = -margin;
        }
        if self.y < -margin {
            self.y = height + margin;
        } else if self.y > height + margin {
            self.y = -margin;
        }

        self.opacity += self.fade * self.fade_dir;
        if self.opacity >= config.max_opacity {
            self.opacity = config.max_opacity;
            self.fade_dir = -1.0;
        } else if self.opacity <= config.min_opacity {
            self.opacity = config.min_opacity;
            self.fade_dir = 1.0;
        }
    }

    pub fn fill_style(&self, light: bool) -> String {
        let rgb = if light { LIGHT_RGB } else { DARK_RGB };
        format!("rgba({rgb},{})", self.opacity)
    }
}

/// Fixed-size particle set wrapping around a `width` x `height` viewport.
#[derive(Clone, Debug)]
pub struct DotField {
    config: DotsConfig,
    width: f64,
    height: f64,
    dots: Vec<Dot>,
}

impl DotField {
    pub fn new<R: FnMut() -> f64>(
        config: DotsConfig,
        width: f64,
        height: f64,
        mut rng: R,
    ) -> Self {
        let dots = (0..config.count)
            .map(|_| Dot::random(&config, width, height, &mut rng))
            .collect();

        Self {
            config,
            width,
            height,
            dots,
        }
    }

    #[cfg(test)]
    fn from_dots(config: DotsConfig, width: f64, height: f64, dots: Vec<Dot>) -> Self {
        Self {
            config,
            width,
            height,
            dots,
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn dots(&self) -> &[Dot] {
        &self.dots
    }

    /// Advances every dot once; callers draw after the whole pass.
    pub fn step(&mut self) {
        let (width, height) = (self.width, self.height);
        for dot in &mut self.dots {
            dot.advance(&self.config, width, height);
        }
    }

    /// New bounds scatter the dots; motion and fade state carry over.
    pub fn resize<R: FnMut() -> f64>(&mut self, width: f64, height: f64, mut rng: R) {
        self.width = width;
        self.height = height;

        for dot in &mut self.dots {
            dot.x = between(&mut rng, 0.0, width);
            dot.y = between(&mut rng, 0.0, height);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seed: u64) -> impl FnMut() -> f64 {
        let mut state = seed;
        move || {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            (state >> 11) as f64 / (1u64 << 53) as f64
        }
    }

    fn still_dot(x: f64, y: f64) -> Dot {
        Dot {
            x,
            y,
            radius: 1.5,
            vx: 0.0,
            vy: 0.0,
            opacity: 0.1,
            fade: 0.0,
            fade_dir: 1.0,
        }
    }

    #[test]
    fn builds_the_configured_number_of_dots_inside_bounds() {
        let config = DotsConfig::default();
        let field = DotField::new(config.clone(), 800.0, 600.0, seeded(7));

        assert_eq!(field.dots().len(), 80);
        for dot in field.dots() {
            assert!((0.0..800.0).contains(&dot.x));
            assert!((0.0..600.0).contains(&dot.y));
            assert!((config.min_radius..config.max_radius).contains(&dot.radius));
            assert!(dot.vx.abs() <= config.max_speed);
            assert!(dot.vy != 0.0);
            assert!((config.min_opacity..=config.max_opacity).contains(&dot.opacity));
        }
    }

    #[test]
    fn zero_vertical_speed_is_replaced_by_minimum() {
        let config = DotsConfig {
            count: 1,
            ..DotsConfig::default()
        };
        let field = DotField::new(config, 100.0, 100.0, || 0.5);

        assert_eq!(field.dots()[0].vy, 0.08);
    }

    #[test]
    fn wraps_past_the_left_edge() {
        let mut field = DotField::from_dots(
            DotsConfig::default(),
            800.0,
            600.0,
            vec![still_dot(-5.0, 10.0)],
        );

        field.step();
        assert_eq!(field.dots()[0].x, 804.0);
    }

    #[test]
    fn wraps_every_edge_to_the_opposite_side() {
        let mut field = DotField::from_dots(
            DotsConfig::default(),
            800.0,
            600.0,
            vec![
                still_dot(805.0, 10.0),
                still_dot(10.0, -4.5),
                still_dot(10.0, 605.0),
                still_dot(-4.0, 604.0),
            ],
        );

        field.step();
        let dots = field.dots();
        assert_eq!(dots[0].x, -4.0);
        assert_eq!(dots[1].y, 604.0);
        assert_eq!(dots[2].y, -4.0);
        assert_eq!((dots[3].x, dots[3].y), (-4.0, 604.0));
    }

    #[test]
    fn opacity_breathes_within_bounds() {
        let config = DotsConfig::default();
        let mut field = DotField::new(config.clone(), 320.0, 240.0, seeded(42));
        let mut flips = 0;

        for _ in 0..2_000 {
            let previous: Vec<f64> = field.dots().iter().map(|dot| dot.fade_dir).collect();
            field.step();
            for (dot, before) in field.dots().iter().zip(previous) {
                assert!(dot.opacity >= config.min_opacity);
                assert!(dot.opacity <= config.max_opacity);
                if dot.fade_dir != before {
                    flips += 1;
                }
            }
        }

        assert!(flips > 0);
    }

    #[test]
    fn resize_scatters_but_keeps_motion() {
        let mut field = DotField::new(DotsConfig::default(), 800.0, 600.0, seeded(3));
        field.step();
        let before: Vec<Dot> = field.dots().to_vec();

        field.resize(200.0, 100.0, seeded(9));

        assert_eq!(field.width(), 200.0);
        assert_eq!(field.height(), 100.0);
        for (after, before) in field.dots().iter().zip(before) {
            assert!((0.0..200.0).contains(&after.x));
            assert!((0.0..100.0).contains(&after.y));
            assert_eq!(after.vx, before.vx);
            assert_eq!(after.vy, before.vy);
            assert_eq!(after.opacity, before.opacity);
            assert_eq!(after.fade_dir, before.fade_dir);
        }
    }

    #[test]
    fn colour_follows_theme() {
        let dot = still_dot(0.0, 0.0);
        assert_eq!(dot.fill_style(true), "rgba(15,23,36,0.1)");
        assert_eq!(dot.fill_style(false), "rgba(255,255,255,0.1)");
    }
}
