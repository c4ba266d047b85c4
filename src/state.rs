//! Frame state advanced by the running effects.
//!
//! Everything here is plain math over plain data so it compiles and tests on
//! the host; randomness is injected as a closure and drawing happens through
//! callbacks so the wasm side stays a thin painting layer.

/// Alphabet the rain effect samples glyphs from.
pub const RAIN_GLYPHS: &str = "アカサタナハマヤラワ0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Logical glyph cell size in CSS pixels.
pub const RAIN_GLYPH_SIZE: f64 = 18.0;

/// Probability that a column past the bottom edge restarts on a given frame.
const RAIN_RESET_CHANCE: f64 = 0.025;

/// Per-column fall positions for the glyph rain.
///
/// Positions are measured in glyph cells; a column resets to the top with
/// small probability once it has fallen past the viewport, so the sequence
/// runs forever without converging.
pub struct RainField {
    glyph: f64,
    drops: Vec<f64>,
}

impl RainField {
    pub fn new(viewport_width: f64, glyph: f64) -> Self {
        let mut field = RainField {
            glyph,
            drops: Vec::new(),
        };
        field.resize(viewport_width);
        field
    }

    /// Rebuilds the column array for a new viewport width. Fall positions do
    /// not survive a resize.
    pub fn resize(&mut self, viewport_width: f64) {
        let columns = (viewport_width / self.glyph).floor().max(1.0) as usize;
        self.drops = vec![0.0; columns];
    }

    pub fn columns(&self) -> usize {
        self.drops.len()
    }

    pub fn glyph_size(&self) -> f64 {
        self.glyph
    }

    /// Advances every column one frame. `draw` receives the `(x, y)` of each
    /// glyph cell before the column moves.
    pub fn step(
        &mut self,
        viewport_height: f64,
        rand: &mut dyn FnMut() -> f64,
        draw: &mut dyn FnMut(f64, f64),
    ) {
        for (i, drop) in self.drops.iter_mut().enumerate() {
            let x = i as f64 * self.glyph;
            let y = *drop * self.glyph;
            draw(x, y);
            if y > viewport_height && rand() > 1.0 - RAIN_RESET_CHANCE {
                *drop = 0.0;
            }
            *drop += 1.0;
        }
    }
}

/// One particle of the pointer trail.
#[derive(Clone, Copy, Debug)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub age: f64,
    pub ttl: f64,
    pub size: f64,
    pub hue: f64,
}

impl Particle {
    /// Fades linearly from 1 at spawn to 0 at end of life.
    pub fn alpha(&self) -> f64 {
        (1.0 - self.age / self.ttl).max(0.0)
    }
}

/// Bounded pool of live trail particles.
pub struct TrailField {
    particles: Vec<Particle>,
    cap: usize,
}

impl TrailField {
    /// Hard cap on live particles; spawns above it are skipped.
    pub const CAP: usize = 220;

    pub fn new(cap: usize) -> Self {
        TrailField {
            particles: Vec::with_capacity(cap),
            cap,
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Spawns 1-6 particles at `(x, y)` with randomized velocity, lifetime
    /// and hue. Returns how many were actually added after cap enforcement.
    pub fn spawn(&mut self, x: f64, y: f64, rand: &mut dyn FnMut() -> f64) -> usize {
        let wanted = 1 + (rand() * 6.0).floor().min(5.0) as usize;
        let mut spawned = 0;
        for _ in 0..wanted {
            if self.particles.len() >= self.cap {
                break;
            }
            self.particles.push(Particle {
                x,
                y,
                vx: (rand() - 0.5) * 0.8,
                vy: (rand() - 0.5) * 0.8,
                age: 0.0,
                ttl: 80.0 + rand() * 60.0,
                size: 1.4 + rand() * 1.5,
                hue: 150.0 + rand() * 90.0,
            });
            spawned += 1;
        }
        spawned
    }

    /// Advances one frame: ages every particle, moves it by its velocity,
    /// applies mild velocity growth, and drops particles past their lifetime.
    pub fn step(&mut self) {
        for p in &mut self.particles {
            p.age += 1.0;
            p.x += p.vx * 16.0;
            p.y += p.vy * 16.0;
            p.vx *= 1.015;
            p.vy *= 1.015;
        }
        self.particles.retain(|p| p.age < p.ttl);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

/// Scroll position mapped to `[0, 1]`.
///
/// A non-positive (or NaN) scrollable span yields 0; out-of-range scroll
/// offsets clamp instead of overshooting.
pub fn scroll_progress(scroll_y: f64, scroll_height: f64, client_height: f64) -> f64 {
    let span = scroll_height - client_height;
    if !(span > 0.0) {
        return 0.0;
    }
    (scroll_y / span).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic stand-in for Math.random.
    fn fixed(value: f64) -> impl FnMut() -> f64 {
        move || value
    }

    #[test]
    fn rain_columns_floor_of_width_over_glyph() {
        let field = RainField::new(100.0, RAIN_GLYPH_SIZE);
        assert_eq!(field.columns(), 5);
        // Never zero columns, even on a degenerate viewport.
        let narrow = RainField::new(4.0, RAIN_GLYPH_SIZE);
        assert_eq!(narrow.columns(), 1);
    }

    #[test]
    fn rain_resize_rebuilds_positions() {
        let mut field = RainField::new(180.0, RAIN_GLYPH_SIZE);
        let mut rand = fixed(0.0);
        field.step(1000.0, &mut rand, &mut |_, _| {});
        field.resize(90.0);
        assert_eq!(field.columns(), 5);
        let mut tops = Vec::new();
        field.step(1000.0, &mut rand, &mut |_, y| tops.push(y));
        assert!(tops.iter().all(|&y| y == 0.0));
    }

    #[test]
    fn rain_column_resets_past_viewport() {
        let mut field = RainField::new(RAIN_GLYPH_SIZE, RAIN_GLYPH_SIZE);
        let mut always_reset = fixed(1.0);
        let height = 36.0;
        // Fall well past the bottom edge without triggering resets.
        let mut never_reset = fixed(0.0);
        for _ in 0..10 {
            field.step(height, &mut never_reset, &mut |_, _| {});
        }
        let mut before = 0.0;
        field.step(height, &mut never_reset, &mut |_, y| before = y);
        assert!(before > height);
        // Next frame with a reset-favouring roll restarts the column.
        field.step(height, &mut always_reset, &mut |_, _| {});
        let mut after = f64::MAX;
        field.step(height, &mut always_reset, &mut |_, y| after = y);
        assert_eq!(after, RAIN_GLYPH_SIZE);
    }

    #[test]
    fn trail_count_never_exceeds_cap() {
        let mut field = TrailField::new(TrailField::CAP);
        let mut rand = fixed(0.99);
        for _ in 0..1000 {
            field.spawn(10.0, 10.0, &mut rand);
        }
        assert_eq!(field.len(), TrailField::CAP);
        // Aging frees room for new spawns again.
        for _ in 0..200 {
            field.step();
        }
        assert!(field.is_empty());
        assert!(field.spawn(0.0, 0.0, &mut rand) > 0);
    }

    #[test]
    fn trail_spawn_count_between_one_and_six() {
        let mut low = TrailField::new(64);
        let mut rand = fixed(0.0);
        assert_eq!(low.spawn(0.0, 0.0, &mut rand), 1);

        let mut high = TrailField::new(64);
        let mut rand = fixed(0.999);
        assert_eq!(high.spawn(0.0, 0.0, &mut rand), 6);
    }

    #[test]
    fn trail_particles_fade_and_expire() {
        let mut field = TrailField::new(8);
        let mut rand = fixed(0.0);
        field.spawn(5.0, 5.0, &mut rand);
        let ttl = field.iter().next().map(|p| p.ttl).unwrap();
        assert_eq!(ttl, 80.0);

        field.step();
        let p = field.iter().next().copied().unwrap();
        assert!(p.alpha() < 1.0 && p.alpha() > 0.0);

        for _ in 0..80 {
            field.step();
        }
        assert!(field.is_empty());
    }

    #[test]
    fn progress_clamps_to_unit_interval() {
        assert_eq!(scroll_progress(0.0, 2000.0, 800.0), 0.0);
        assert_eq!(scroll_progress(1200.0, 2000.0, 800.0), 1.0);
        assert_eq!(scroll_progress(600.0, 2000.0, 800.0), 0.5);
        // Out-of-range offsets clamp rather than overshoot.
        assert_eq!(scroll_progress(-50.0, 2000.0, 800.0), 0.0);
        assert_eq!(scroll_progress(99999.0, 2000.0, 800.0), 1.0);
    }

    #[test]
    fn progress_degenerate_span_is_zero() {
        // Page shorter than the viewport: nothing to scroll.
        assert_eq!(scroll_progress(10.0, 500.0, 800.0), 0.0);
        assert_eq!(scroll_progress(10.0, 800.0, 800.0), 0.0);
        assert_eq!(scroll_progress(10.0, f64::NAN, 800.0), 0.0);
    }
}
