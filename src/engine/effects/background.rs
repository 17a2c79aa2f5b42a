//! Decorative page animations — stars, snow, rain, and pyrotechnics.
//!
//! These run for the whole life of a slide, are prepended to the effect
//! list (so content paints over them), and never gate the ending
//! animation's start frame.

use rand::Rng;
use rand::rngs::ThreadRng;

use crate::screen::Screen;
use crate::types::{Attr, Cell, CharStyle, NamedColour};

use super::Tick;

// ---------------------------------------------------------------------------
// Stars
// ---------------------------------------------------------------------------

const TWINKLE: &[char] = &['.', '+', '*', '+', '.', ' ', 'x', ' '];

#[derive(Debug)]
struct Star {
    x: i64,
    y: i64,
    phase: usize,
    last: char,
}

#[derive(Debug)]
pub struct Stars {
    count: usize,
    stars: Vec<Star>,
}

impl Stars {
    pub fn new(count: usize) -> Stars {
        Stars {
            count,
            stars: Vec::new(),
        }
    }

    fn seed(&mut self, screen: &Screen) {
        let mut rng = rand::thread_rng();
        let w = screen.width() as i64;
        let h = screen.height() as i64;
        self.stars = (0..self.count)
            .map(|_| Star {
                x: rng.gen_range(0..w.max(1)),
                y: rng.gen_range(0..h.max(1)),
                phase: rng.gen_range(0..TWINKLE.len()),
                last: ' ',
            })
            .collect();
    }
}

impl Tick for Stars {
    fn reset(&mut self) {
        self.stars.clear();
    }

    fn update(&mut self, screen: &mut Screen, t: usize) {
        if self.stars.is_empty() {
            self.seed(screen);
        }
        for star in &mut self.stars {
            // Stars only live in empty space; they yield to anything
            // another effect has drawn over them.
            let occupied = screen
                .get_view(star.x, star.y)
                .map(|c| !c.is_blank() && c.ch != star.last)
                .unwrap_or(true);
            if occupied {
                continue;
            }
            let ch = TWINKLE[(t + star.phase) % TWINKLE.len()];
            screen.put_view(star.x, star.y, ch, CharStyle::default());
            star.last = ch;
        }
    }
}

// ---------------------------------------------------------------------------
// Snow
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct Flake {
    x: i64,
    y: f64,
    speed: f64,
    under: Option<Cell>,
}

#[derive(Debug)]
pub struct Snow {
    flakes: Vec<Flake>,
}

impl Snow {
    pub fn new() -> Snow {
        Snow { flakes: Vec::new() }
    }
}

impl Default for Snow {
    fn default() -> Self {
        Snow::new()
    }
}

impl Tick for Snow {
    fn reset(&mut self) {
        self.flakes.clear();
    }

    fn update(&mut self, screen: &mut Screen, _t: usize) {
        let mut rng = rand::thread_rng();
        let w = screen.width() as i64;
        let h = screen.height() as f64;

        if self.flakes.len() < screen.width() / 3 && rng.gen_bool(0.5) {
            self.flakes.push(Flake {
                x: rng.gen_range(0..w.max(1)),
                y: 0.0,
                speed: rng.gen_range(0.2..0.7),
                under: None,
            });
        }

        for flake in &mut self.flakes {
            let old = (flake.x, flake.y.floor() as i64);
            flake.y += flake.speed;
            if flake.y >= h {
                // Restore what the flake covered and respawn at the top.
                if let Some(under) = flake.under.take() {
                    screen.put_view(old.0, old.1, under.ch, under.style);
                }
                flake.x = rng.gen_range(0..w.max(1));
                flake.y = 0.0;
                flake.speed = rng.gen_range(0.2..0.7);
                continue;
            }
            let new = (flake.x, flake.y.floor() as i64);
            if new != old {
                if let Some(under) = flake.under.take() {
                    screen.put_view(old.0, old.1, under.ch, under.style);
                }
                flake.under = screen.get_view(new.0, new.1);
                screen.put_view(new.0, new.1, '*', CharStyle::default());
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Rain
// ---------------------------------------------------------------------------

/// Lifetime cap on spawned drops, after which the rain dries up.
const RAIN_BUDGET: usize = 2000;

#[derive(Debug)]
struct Drop {
    x: i64,
    y: f64,
    speed: f64,
    under: Option<Cell>,
}

#[derive(Debug)]
pub struct Rain {
    drops: Vec<Drop>,
    spawned: usize,
}

impl Rain {
    pub fn new() -> Rain {
        Rain {
            drops: Vec::new(),
            spawned: 0,
        }
    }

    fn glyph(speed: f64) -> char {
        if speed < 1.0 {
            '\''
        } else if speed < 1.6 {
            ':'
        } else {
            '|'
        }
    }
}

impl Default for Rain {
    fn default() -> Self {
        Rain::new()
    }
}

impl Tick for Rain {
    fn reset(&mut self) {
        self.drops.clear();
        self.spawned = 0;
    }

    fn update(&mut self, screen: &mut Screen, _t: usize) {
        let mut rng = rand::thread_rng();
        let w = screen.width() as i64;
        let h = screen.height() as f64;

        for _ in 0..3 {
            if self.spawned >= RAIN_BUDGET || self.drops.len() >= screen.width() {
                break;
            }
            self.drops.push(Drop {
                x: rng.gen_range(0..w.max(1)),
                y: 0.0,
                speed: rng.gen_range(0.6..2.2),
                under: None,
            });
            self.spawned += 1;
        }

        self.drops.retain_mut(|drop| {
            let old = (drop.x, drop.y.floor() as i64);
            drop.y += drop.speed;
            if drop.y >= h {
                if let Some(under) = drop.under.take() {
                    screen.put_view(old.0, old.1, under.ch, under.style);
                }
                return false;
            }
            let new = (drop.x, drop.y.floor() as i64);
            if new != old {
                if let Some(under) = drop.under.take() {
                    screen.put_view(old.0, old.1, under.ch, under.style);
                }
                drop.under = screen.get_view(new.0, new.1);
                screen.put_view(new.0, new.1, Self::glyph(drop.speed), CharStyle::fg(NamedColour::Cyan));
            }
            true
        });
    }
}

// ---------------------------------------------------------------------------
// Fireworks / explosion bursts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurstMode {
    Fireworks,
    Explosion,
}

#[derive(Debug)]
struct Spark {
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
    colour: NamedColour,
    under: Option<Cell>,
    last_pos: Option<(i64, i64)>,
}

#[derive(Debug)]
pub struct Burst {
    sparks: Vec<Spark>,
    age: usize,
    life: usize,
}

impl Burst {
    fn new(x: i64, y: i64, spark_count: usize, life: usize, rng: &mut ThreadRng) -> Burst {
        let colours = [
            NamedColour::Red,
            NamedColour::Yellow,
            NamedColour::Green,
            NamedColour::Cyan,
            NamedColour::Magenta,
            NamedColour::White,
        ];
        let sparks = (0..spark_count)
            .map(|_| {
                let angle = rng.gen_range(0.0..std::f64::consts::TAU);
                let speed = rng.gen_range(0.3..1.2);
                Spark {
                    x: x as f64,
                    y: y as f64,
                    vx: angle.cos() * speed * 2.0,
                    vy: angle.sin() * speed,
                    colour: colours[rng.gen_range(0..colours.len())],
                    under: None,
                    last_pos: None,
                }
            })
            .collect();
        Burst {
            sparks,
            age: 0,
            life,
        }
    }

    /// Advance one tick; false once the burst has burned out.
    fn step(&mut self, screen: &mut Screen) -> bool {
        let fading = self.age * 3 > self.life * 2;
        for spark in &mut self.sparks {
            if let (Some((ox, oy)), Some(under)) = (spark.last_pos, spark.under.take()) {
                screen.put_view(ox, oy, under.ch, under.style);
            }
            spark.vy += 0.04; // gentle gravity on the embers
            spark.x += spark.vx;
            spark.y += spark.vy;
            let nx = spark.x.round() as i64;
            let ny = spark.y.round() as i64;
            if nx < 0
                || ny < 0
                || nx as usize >= screen.width()
                || ny as usize >= screen.height()
            {
                spark.last_pos = None;
                continue;
            }
            spark.under = screen.get_view(nx, ny);
            let (ch, attr) = if fading {
                ('.', Attr::Normal)
            } else {
                ('*', Attr::Bold)
            };
            screen.put_view(
                nx,
                ny,
                ch,
                CharStyle {
                    fg: spark.colour,
                    attr,
                    bg: NamedColour::Black,
                },
            );
            spark.last_pos = Some((nx, ny));
        }
        self.age += 1;
        if self.age >= self.life {
            for spark in &mut self.sparks {
                if let (Some((ox, oy)), Some(under)) = (spark.last_pos, spark.under.take()) {
                    screen.put_view(ox, oy, under.ch, under.style);
                }
            }
            return false;
        }
        true
    }
}

#[derive(Debug)]
pub struct Bursts {
    mode: BurstMode,
    active: Vec<Burst>,
}

impl Bursts {
    pub fn new(mode: BurstMode) -> Bursts {
        Bursts {
            mode,
            active: Vec::new(),
        }
    }

    /// Burst origins keep clear of the side margins: x ∈ [3, width-4],
    /// y within the upper two thirds of the viewport.
    pub fn random_origin(width: usize, height: usize, rng: &mut ThreadRng) -> (i64, i64) {
        let x_max = (width as i64 - 4).max(3);
        let y_max = (height as i64 * 2 / 3).max(2);
        (rng.gen_range(3..=x_max), rng.gen_range(1..=y_max))
    }
}

impl Tick for Bursts {
    fn reset(&mut self) {
        self.active.clear();
    }

    fn update(&mut self, screen: &mut Screen, _t: usize) {
        let mut rng = rand::thread_rng();
        let (spawn, spark_count, life, max_active) = match self.mode {
            BurstMode::Fireworks => (rng.gen_bool(0.12), 24, 22, 3),
            BurstMode::Explosion => (rng.gen_bool(0.04), 70, 30, 1),
        };
        if spawn && self.active.len() < max_active {
            let (x, y) = Self::random_origin(screen.width(), screen.height(), &mut rng);
            self.active.push(Burst::new(x, y, spark_count, life, &mut rng));
        }
        self.active.retain_mut(|burst| burst.step(screen));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_origins_stay_inside_margins() {
        let mut rng = rand::thread_rng();
        for _ in 0..500 {
            let (x, y) = Bursts::random_origin(80, 24, &mut rng);
            assert!((3..=76).contains(&x), "x out of bounds: {x}");
            assert!(y >= 1 && y < 24, "y out of bounds: {y}");
        }
    }

    #[test]
    fn origin_bounds_survive_tiny_screens() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let (x, _) = Bursts::random_origin(6, 4, &mut rng);
            assert!(x >= 3);
        }
    }

    #[test]
    fn fireworks_tick_without_panicking_and_stay_in_bounds() {
        let mut s = Screen::new(40, 12);
        let mut b = Bursts::new(BurstMode::Fireworks);
        for t in 0..300 {
            b.update(&mut s, t);
            for burst in &b.active {
                for spark in &burst.sparks {
                    if let Some((x, y)) = spark.last_pos {
                        assert!(x >= 0 && (x as usize) < 40);
                        assert!(y >= 0 && (y as usize) < 12);
                    }
                }
            }
        }
    }

    #[test]
    fn explosion_keeps_a_single_active_burst() {
        let mut s = Screen::new(40, 12);
        let mut b = Bursts::new(BurstMode::Explosion);
        for t in 0..600 {
            b.update(&mut s, t);
            assert!(b.active.len() <= 1);
        }
    }

    #[test]
    fn snow_and_rain_tick_headless() {
        let mut s = Screen::new(30, 10);
        let mut snow = Snow::new();
        let mut rain = Rain::new();
        let mut stars = Stars::new(20);
        for t in 0..200 {
            snow.update(&mut s, t);
            rain.update(&mut s, t);
            stars.update(&mut s, t);
        }
        assert!(rain.spawned <= RAIN_BUDGET);
    }
}
