use std::time::Duration;

pub const MIN_SCALE: f64 = 0.3;
pub const MAX_SCALE: f64 = 5.0;
pub const ZOOM_IN_FACTOR: f64 = 1.2;
pub const ZOOM_OUT_FACTOR: f64 = 0.8;
pub const ZOOM_DURATION: Duration = Duration::from_millis(300);
pub const RESET_DURATION: Duration = Duration::from_millis(500);

/// Pan/zoom mapping from layout space to surface space:
/// `screen = translate + k * point`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub k: f64,
    pub x: f64,
    pub y: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ViewTransform {
    pub const IDENTITY: Self = Self {
        k: 1.0,
        x: 0.0,
        y: 0.0,
    };

    pub fn translated(x: f64, y: f64) -> Self {
        Self { k: 1.0, x, y }
    }

    /// Rescales by `factor` keeping the surface point `anchor` fixed.
    /// Non-finite or non-positive factors leave the transform unchanged.
    pub fn scaled_about(self, factor: f64, anchor: (f64, f64)) -> Self {
        if !factor.is_finite() || factor <= 0.0 {
            return self;
        }
        let k = (self.k * factor).clamp(MIN_SCALE, MAX_SCALE);
        let ratio = k / self.k;
        Self {
            k,
            x: anchor.0 - (anchor.0 - self.x) * ratio,
            y: anchor.1 - (anchor.1 - self.y) * ratio,
        }
    }

    pub fn panned(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    pub fn apply(&self, point: (f64, f64)) -> (f64, f64) {
        (self.x + self.k * point.0, self.y + self.k * point.1)
    }

    pub fn invert(&self, screen: (f64, f64)) -> (f64, f64) {
        ((screen.0 - self.x) / self.k, (screen.1 - self.y) / self.k)
    }

    pub fn lerp(self, to: Self, t: f64) -> Self {
        Self {
            k: self.k + (to.k - self.k) * t,
            x: self.x + (to.x - self.x) * t,
            y: self.y + (to.y - self.y) * t,
        }
    }

    pub fn svg_attr(&self) -> String {
        format!("translate({:.2}, {:.2}) scale({:.4})", self.x, self.y, self.k)
    }
}

fn ease_cubic_in_out(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformAnimation {
    pub from: ViewTransform,
    pub to: ViewTransform,
    pub duration: Duration,
    pub elapsed: Duration,
}

impl TransformAnimation {
    pub fn new(from: ViewTransform, to: ViewTransform, duration: Duration) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn advance(&mut self, dt: Duration) -> ViewTransform {
        self.elapsed = (self.elapsed + dt).min(self.duration);
        self.current()
    }

    pub fn current(&self) -> ViewTransform {
        if self.duration.is_zero() || self.is_finished() {
            return self.to;
        }
        let t = self.elapsed.as_secs_f64() / self.duration.as_secs_f64();
        self.from.lerp(self.to, ease_cubic_in_out(t))
    }
}

/// Viewing transform of one rendered thread. Button zooms and reset are
/// animated; wheel and drag gestures apply immediately.
#[derive(Debug, Clone)]
pub struct Camera {
    current: ViewTransform,
    home: ViewTransform,
    viewport: (f64, f64),
    animation: Option<TransformAnimation>,
}

impl Camera {
    pub fn new(home: ViewTransform, viewport: (f64, f64)) -> Self {
        Self {
            current: home,
            home,
            viewport,
            animation: None,
        }
    }

    pub fn transform(&self) -> ViewTransform {
        self.current
    }

    /// Where the camera ends up once any running animation completes.
    pub fn target(&self) -> ViewTransform {
        self.animation.map(|a| a.to).unwrap_or(self.current)
    }

    pub fn home(&self) -> ViewTransform {
        self.home
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn zoom_in(&mut self) {
        self.zoom_by(ZOOM_IN_FACTOR);
    }

    pub fn zoom_out(&mut self) {
        self.zoom_by(ZOOM_OUT_FACTOR);
    }

    fn zoom_by(&mut self, factor: f64) {
        let center = (self.viewport.0 / 2.0, self.viewport.1 / 2.0);
        let to = self.target().scaled_about(factor, center);
        self.animate_to(to, ZOOM_DURATION);
    }

    pub fn reset(&mut self) {
        self.animate_to(self.home, RESET_DURATION);
    }

    fn animate_to(&mut self, to: ViewTransform, duration: Duration) {
        self.animation = Some(TransformAnimation::new(self.current, to, duration));
    }

    pub fn wheel(&mut self, factor: f64, anchor: (f64, f64)) {
        self.animation = None;
        self.current = self.current.scaled_about(factor, anchor);
    }

    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.animation = None;
        self.current = self.current.panned(dx, dy);
    }

    pub fn tick(&mut self, dt: Duration) {
        let Some(animation) = self.animation.as_mut() else {
            return;
        };
        self.current = animation.advance(dt);
        if animation.is_finished() {
            self.animation = None;
        }
    }

    pub fn finish(&mut self) {
        if let Some(animation) = self.animation.take() {
            self.current = animation.to;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn camera() -> Camera {
        Camera::new(ViewTransform::translated(90.0, 60.0), (1200.0, 700.0))
    }

    #[test]
    fn zoom_in_keeps_viewport_center_fixed() {
        let mut cam = camera();
        cam.zoom_in();
        cam.finish();
        let t = cam.transform();
        assert!((t.k - 1.2).abs() < 1e-9);

        let before = ViewTransform::translated(90.0, 60.0).invert((600.0, 350.0));
        let after = t.invert((600.0, 350.0));
        assert!((before.0 - after.0).abs() < 1e-9);
        assert!((before.1 - after.1).abs() < 1e-9);
    }

    #[test]
    fn animation_reaches_target_after_duration() {
        let mut cam = camera();
        cam.zoom_out();
        assert!(cam.is_animating());
        cam.tick(Duration::from_millis(150));
        let mid = cam.transform().k;
        assert!(mid < 1.0 && mid > 0.8);
        cam.tick(Duration::from_millis(200));
        assert!(!cam.is_animating());
        assert!((cam.transform().k - 0.8).abs() < 1e-9);
    }

    #[test]
    fn quick_clicks_compound_from_pending_target() {
        let mut cam = camera();
        cam.zoom_in();
        cam.zoom_in();
        cam.finish();
        assert!((cam.transform().k - 1.44).abs() < 1e-9);
    }

    #[test]
    fn reset_returns_home() {
        let mut cam = camera();
        cam.pan(40.0, -12.0);
        cam.wheel(2.0, (10.0, 10.0));
        cam.reset();
        cam.tick(RESET_DURATION);
        assert_eq!(cam.transform(), ViewTransform::translated(90.0, 60.0));
    }

    #[test]
    fn gestures_cancel_running_animation() {
        let mut cam = camera();
        cam.zoom_in();
        cam.pan(5.0, 5.0);
        assert!(!cam.is_animating());
        assert_eq!(cam.transform(), ViewTransform::translated(95.0, 65.0));
    }

    #[test]
    fn degenerate_wheel_factors_are_ignored() {
        let mut cam = camera();
        cam.wheel(2.0, (10.0, 10.0));
        let before = cam.transform();
        for factor in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 0.0, -1.5] {
            cam.wheel(factor, (10.0, 10.0));
            assert_eq!(cam.transform(), before);
        }
        cam.zoom_in();
        cam.finish();
        assert!(cam.transform().k.is_finite());
    }

    #[test]
    fn invert_undoes_apply() {
        let t = ViewTransform {
            k: 2.5,
            x: -30.0,
            y: 12.0,
        };
        let p = t.apply((7.0, 9.0));
        let back = t.invert(p);
        assert!((back.0 - 7.0).abs() < 1e-9 && (back.1 - 9.0).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn scale_stays_in_range(ops in prop::collection::vec(0u8..8, 0..60)) {
            let mut cam = camera();
            for op in ops {
                match op {
                    0 => cam.zoom_in(),
                    1 => cam.zoom_out(),
                    2 => cam.wheel(1.7, (300.0, 200.0)),
                    3 => cam.wheel(f64::NAN, (300.0, 200.0)),
                    4 => cam.wheel(f64::INFINITY, (300.0, 200.0)),
                    5 => cam.wheel(f64::NEG_INFINITY, (300.0, 200.0)),
                    6 => cam.wheel(0.0, (300.0, 200.0)),
                    _ => cam.tick(Duration::from_millis(120)),
                }
                let k = cam.transform().k;
                prop_assert!((MIN_SCALE..=MAX_SCALE).contains(&k));
                prop_assert!((MIN_SCALE..=MAX_SCALE).contains(&cam.target().k));
            }
        }
    }

    #[test]
    fn repeated_zoom_in_saturates_at_max() {
        let mut cam = camera();
        for _ in 0..50 {
            cam.zoom_in();
        }
        cam.finish();
        assert_eq!(cam.transform().k, MAX_SCALE);

        for _ in 0..50 {
            cam.zoom_out();
        }
        cam.finish();
        assert_eq!(cam.transform().k, MIN_SCALE);
    }
}
