//! Particle endings — the visible screen breaks into falling or flying
//! characters.
//!
//! Both primitives capture every non-blank viewport cell at activation
//! time (never a stale snapshot: a re-entered slide repaints, and a fresh
//! capture happens on the next arming), then simulate until a fixed
//! duration elapses.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::screen::Screen;
use crate::types::{Cell, CharStyle};

use super::{Command, Tick};

#[derive(Debug)]
struct Particle {
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
    cell: Cell,
    start_tick: usize,
    last_pos: Option<(i64, i64)>,
}

fn capture(screen: &Screen) -> Vec<Particle> {
    let mut out = Vec::new();
    for (y, row) in screen.view().iter().enumerate() {
        for (x, cell) in row.iter().enumerate() {
            if !cell.is_blank() {
                out.push(Particle {
                    x: x as f64,
                    y: y as f64,
                    vx: 0.0,
                    vy: 0.0,
                    cell: *cell,
                    start_tick: 0,
                    last_pos: Some((x as i64, y as i64)),
                });
            }
        }
    }
    out
}

fn step_particles(particles: &mut [Particle], screen: &mut Screen, t: usize, gravity: f64) {
    for p in particles.iter_mut() {
        if t < p.start_tick {
            continue;
        }
        if let Some((ox, oy)) = p.last_pos {
            screen.put_view(ox, oy, ' ', CharStyle::default());
        }
        p.vy += gravity;
        p.x += p.vx;
        p.y += p.vy;
        let nx = p.x.round() as i64;
        let ny = p.y.round() as i64;
        if nx >= 0 && (nx as usize) < screen.width() && ny >= 0 && (ny as usize) < screen.height() {
            screen.put_view(nx, ny, p.cell.ch, p.cell.style);
            p.last_pos = Some((nx, ny));
        } else {
            p.last_pos = None;
        }
    }
}

// ---------------------------------------------------------------------------
// Gravity drop
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct ParticleDrop {
    duration: usize,
    particles: Vec<Particle>,
    captured: bool,
    go: bool,
    current: usize,
    completed: bool,
}

impl ParticleDrop {
    pub fn new(duration: usize) -> ParticleDrop {
        ParticleDrop {
            duration,
            particles: Vec::new(),
            captured: false,
            go: false,
            current: 0,
            completed: false,
        }
    }
}

impl Tick for ParticleDrop {
    fn reset(&mut self) {
        self.particles.clear();
        self.captured = false;
        self.go = false;
        self.current = 0;
        self.completed = false;
    }

    fn update(&mut self, screen: &mut Screen, t: usize) {
        if !self.go {
            return;
        }
        if self.current >= self.duration {
            self.completed = true;
            return;
        }
        if !self.captured {
            self.captured = true;
            self.particles = capture(screen);
            // Randomized release order, spread over the first half of
            // the run.
            let mut rng = rand::thread_rng();
            self.particles.shuffle(&mut rng);
            let n = self.particles.len().max(1);
            let window = self.duration / 2;
            for (i, p) in self.particles.iter_mut().enumerate() {
                p.start_tick = t + i * window / n;
            }
        }
        step_particles(&mut self.particles, screen, t, 0.3);
        self.current += 1;
    }

    fn is_finished(&self) -> bool {
        self.completed
    }

    fn completed(&self) -> bool {
        self.completed
    }

    fn consume(&mut self, cmd: Command) -> bool {
        if !self.go && cmd == Command::Advance {
            self.go = true;
            return true;
        }
        false
    }
}

// ---------------------------------------------------------------------------
// Radial shoot
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct ParticleShoot {
    duration: usize,
    particles: Vec<Particle>,
    captured: bool,
    go: bool,
    current: usize,
    completed: bool,
}

impl ParticleShoot {
    pub fn new(duration: usize) -> ParticleShoot {
        ParticleShoot {
            duration,
            particles: Vec::new(),
            captured: false,
            go: false,
            current: 0,
            completed: false,
        }
    }

    fn launch(&mut self, screen: &Screen, now: usize) {
        let cx = screen.width() as f64 / 2.0;
        let cy = screen.height() as f64 / 2.0;
        self.particles = capture(screen);
        // Closest to the centre launches first and fastest: velocity is
        // inversely proportional to the (clamped) distance.
        self.particles.sort_by(|a, b| {
            let da = (a.x - cx).hypot(a.y - cy);
            let db = (b.x - cx).hypot(b.y - cy);
            da.total_cmp(&db)
        });
        let mut rng = rand::thread_rng();
        let n = self.particles.len().max(1);
        let window = self.duration / 2;
        for (i, p) in self.particles.iter_mut().enumerate() {
            let dx = p.x - cx;
            let dy = p.y - cy;
            let dist = dx.hypot(dy).clamp(2.0, 30.0);
            let speed = 6.0 / dist + rng.gen_range(0.0..0.3);
            p.vx = dx / dist * speed * 2.0; // cells are taller than wide
            p.vy = dy / dist * speed;
            p.start_tick = now + i * window / n;
        }
    }
}

impl Tick for ParticleShoot {
    fn reset(&mut self) {
        self.particles.clear();
        self.captured = false;
        self.go = false;
        self.current = 0;
        self.completed = false;
    }

    fn update(&mut self, screen: &mut Screen, t: usize) {
        if !self.go {
            return;
        }
        if self.current >= self.duration {
            self.completed = true;
            return;
        }
        if !self.captured {
            self.captured = true;
            self.launch(screen, t);
        }
        step_particles(&mut self.particles, screen, t, 0.0);
        self.current += 1;
    }

    fn is_finished(&self) -> bool {
        self.completed
    }

    fn completed(&self) -> bool {
        self.completed
    }

    fn consume(&mut self, cmd: Command) -> bool {
        if !self.go && cmd == Command::Advance {
            self.go = true;
            return true;
        }
        false
    }
}
