//! Animation primitives and their timing wrapper.
//!
//! Every primitive implements the same per-frame contract (`Tick`) and is
//! dispatched through a closed sum type (`Primitive`) with exhaustive
//! matching — the same struct-per-variant pattern the slide content types
//! use. A `TimedEffect` pairs a primitive with its frame window; the
//! engine computes those windows once at composition time and the player
//! only ever compares frame numbers.

mod background;
mod cycle;
mod fire;
mod matrix;
mod mirage;
mod noise;
mod particles;
mod print;
mod scroll;
mod typing;
mod wipe;

pub use background::{Burst, BurstMode, Bursts, Rain, Snow, Stars};
pub use cycle::Cycle;
pub use fire::Fire;
pub use matrix::MatrixDissolve;
pub use mirage::Mirage;
pub use noise::Noise;
pub use particles::{ParticleDrop, ParticleShoot};
pub use print::Print;
pub use scroll::Scroll;
pub use typing::Typing;
pub use wipe::Wipe;

use crate::screen::Screen;

/// Navigation intents, decoded from raw key events by the player.
/// Ending primitives get first refusal on `Advance` (arming).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Advance,
    Back,
    ToList,
    Quit,
}

/// The uniform per-frame update contract.
///
/// `update` receives the tick count *local to the effect* (0 on its start
/// frame) and is invoked exactly once per rendered frame while the
/// effect's window is active.
pub trait Tick {
    /// Return to the state the primitive should be in when its owning
    /// slide (re-)starts.
    fn reset(&mut self);

    fn update(&mut self, screen: &mut Screen, t: usize);

    /// Terminal state reached.
    fn is_finished(&self) -> bool {
        false
    }

    /// An ending primitive finished its run and the slide should
    /// transition.
    fn completed(&self) -> bool {
        false
    }

    /// Offer an input command; `true` means the primitive consumed it
    /// (used by disarmed ending primitives).
    fn consume(&mut self, _cmd: Command) -> bool {
        false
    }
}

/// Closed set of primitives. No string keys, no open dispatch.
#[derive(Debug)]
pub enum Primitive {
    Print(Print),
    Typing(Typing),
    Mirage(Mirage),
    Cycle(Cycle),
    Fire(Fire),
    Noise(Noise),
    Scroll(Scroll),
    MatrixDissolve(MatrixDissolve),
    Wipe(Wipe),
    ParticleDrop(ParticleDrop),
    ParticleShoot(ParticleShoot),
    Stars(Stars),
    Snow(Snow),
    Rain(Rain),
    Bursts(Bursts),
}

/// Exhaustive static dispatch over every primitive variant.
macro_rules! each_primitive {
    ($self:expr, $p:ident => $body:expr) => {
        match $self {
            Primitive::Print($p) => $body,
            Primitive::Typing($p) => $body,
            Primitive::Mirage($p) => $body,
            Primitive::Cycle($p) => $body,
            Primitive::Fire($p) => $body,
            Primitive::Noise($p) => $body,
            Primitive::Scroll($p) => $body,
            Primitive::MatrixDissolve($p) => $body,
            Primitive::Wipe($p) => $body,
            Primitive::ParticleDrop($p) => $body,
            Primitive::ParticleShoot($p) => $body,
            Primitive::Stars($p) => $body,
            Primitive::Snow($p) => $body,
            Primitive::Rain($p) => $body,
            Primitive::Bursts($p) => $body,
        }
    };
}

impl Primitive {
    pub fn reset(&mut self) {
        each_primitive!(self, p => p.reset())
    }

    pub fn update(&mut self, screen: &mut Screen, t: usize) {
        each_primitive!(self, p => p.update(screen, t))
    }

    pub fn is_finished(&self) -> bool {
        each_primitive!(self, p => p.is_finished())
    }

    pub fn completed(&self) -> bool {
        each_primitive!(self, p => p.completed())
    }

    pub fn consume(&mut self, cmd: Command) -> bool {
        each_primitive!(self, p => p.consume(cmd))
    }
}

/// A primitive tagged with its frame window.
///
/// `stop_frame` is inclusive: the effect is updated for every frame in
/// `start_frame..=stop_frame`. `None` means open-ended — either "until
/// resolved by the scheduler" (content effects) or "until the slide ends"
/// (decorative and ending effects).
#[derive(Debug)]
pub struct TimedEffect {
    pub start_frame: usize,
    pub stop_frame: Option<usize>,
    pub primitive: Primitive,
}

impl TimedEffect {
    pub fn open(start_frame: usize, primitive: Primitive) -> TimedEffect {
        TimedEffect {
            start_frame,
            stop_frame: None,
            primitive,
        }
    }

    pub fn windowed(start_frame: usize, stop_frame: usize, primitive: Primitive) -> TimedEffect {
        TimedEffect {
            start_frame,
            stop_frame: Some(stop_frame),
            primitive,
        }
    }

    pub fn is_active(&self, frame: usize) -> bool {
        frame >= self.start_frame && self.stop_frame.is_none_or(|s| frame <= s)
    }

    /// Advance one frame if the window is active.
    pub fn update(&mut self, screen: &mut Screen, frame: usize) {
        if self.is_active(frame) {
            let t = frame - self.start_frame;
            self.primitive.update(screen, t);
        }
    }
}
