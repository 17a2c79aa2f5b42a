//! Engine — the effect scheduler.
//!
//! Turns one slide's content list plus its animation choices into an
//! ordered list of `TimedEffect`s. All cross-effect ordering is decided
//! here, once, as frame-number arithmetic: content effects get their
//! windows, open-ended stops are resolved against the latest content
//! stop, and the ending animation is anchored strictly after every
//! content effect so no frame shows both.
//!
//! Composition is pure apart from the UML render cache; it touches no
//! terminal, which keeps every scheduling rule unit-testable.

pub mod effects;

use std::path::Path;

use crate::deck::{
    Animation, ColourSpec, ContentItem, ContentType, EndAnimation, PageAnimation, Slide,
    StartAnimation,
};
use crate::errors::{ConfigError, SlideError};
use crate::render::{
    Renderable, UmlCache, boxed_text, colour_image, figlet_text, mono_image, plain_text, rainbow,
    table_text, uml_text,
};
use crate::types::{CharStyle, NamedColour};

use effects::{
    BurstMode, Bursts, Cycle, Fire, MatrixDissolve, Mirage, Noise, ParticleDrop, ParticleShoot,
    Primitive, Print, Rain, Scroll, Snow, Stars, TimedEffect, Typing, Wipe,
};

/// Flicker window of the mirage animation, in frames.
const MIRAGE_FLICKER_FRAMES: usize = 30;
/// Plain-reveal window chained directly after the flicker.
const MIRAGE_PRINT_FRAMES: usize = 10;
/// Matrix dissolve run length.
const MATRIX_FRAMES: usize = 30;
/// Particle ending run lengths.
const DROP_FRAMES: usize = 60;
const SHOOT_FRAMES: usize = 60;

const STAR_COUNT: usize = 100;

/// Everything composition needs besides the slide itself: the viewport
/// dimensions, where relative image paths resolve from, and the shared
/// diagram cache.
pub struct ComposeCtx<'a> {
    pub width: usize,
    pub height: usize,
    pub base_dir: &'a Path,
    pub uml: &'a mut UmlCache,
}

/// Compose a slide into its ordered, timed effect list.
///
/// Any validation or render failure aborts the whole slide; no partial
/// effect list is ever returned.
pub fn compose_slide(
    ctx: &mut ComposeCtx,
    name: &str,
    slide: &Slide,
) -> Result<Vec<TimedEffect>, SlideError> {
    if slide.content.is_empty() {
        return Err(ConfigError::MissingField {
            slide: name.to_owned(),
            field: "content",
        }
        .into());
    }

    let mut effects = Vec::new();
    for item in &slide.content {
        validate_item(name, item)?;
        compose_item(ctx, name, slide, item, &mut effects)?;
    }

    // Every content effect gets a terminal frame before any end/page
    // anchor is computed.
    resolve_stop_frames(&mut effects);

    if slide.start_animation == Some(StartAnimation::Scroll) {
        let scroll = Scroll::new(ctx.height, 1, false);
        let stop = scroll.duration();
        effects.push(TimedEffect::windowed(0, stop, Primitive::Scroll(scroll)));
    }

    if let Some(end) = slide.end_animation {
        let anchor = end_anchor(&effects);
        let primitive = match end {
            EndAnimation::Scroll => Primitive::Scroll(Scroll::new(ctx.height, 1, true)),
            EndAnimation::Matrix => Primitive::MatrixDissolve(MatrixDissolve::new(
                ctx.width,
                ctx.height,
                MATRIX_FRAMES,
                true,
            )),
            EndAnimation::Shoot => Primitive::ParticleShoot(ParticleShoot::new(SHOOT_FRAMES)),
            EndAnimation::Drop => Primitive::ParticleDrop(ParticleDrop::new(DROP_FRAMES)),
            EndAnimation::Wipe => Primitive::Wipe(Wipe::new(ctx.width, ctx.height)),
        };
        effects.push(TimedEffect::open(anchor, primitive));
    }

    if let Some(page) = slide.page_animation {
        let primitive = match page {
            PageAnimation::Stars => Primitive::Stars(Stars::new(STAR_COUNT)),
            PageAnimation::Snow => Primitive::Snow(Snow::new()),
            PageAnimation::Rain => Primitive::Rain(Rain::new()),
            PageAnimation::Explosion => Primitive::Bursts(Bursts::new(BurstMode::Explosion)),
            PageAnimation::Fireworks => Primitive::Bursts(Bursts::new(BurstMode::Fireworks)),
        };
        // Decorative only: prepended so content paints over it, and
        // deliberately absent from the end-anchor computation above.
        effects.insert(0, TimedEffect::open(0, primitive));
    }

    Ok(effects)
}

/// The ending animation starts strictly after every resolved stop frame;
/// two effects never share a frame across that boundary.
fn end_anchor(effects: &[TimedEffect]) -> usize {
    effects
        .iter()
        .filter_map(|e| e.stop_frame)
        .max()
        .map_or(1, |m| m + 1)
}

/// Resolve open-ended content effects to the latest known stop frame, or
/// to `start + 1` when nothing declared a duration.
fn resolve_stop_frames(effects: &mut [TimedEffect]) {
    let max_stop = effects.iter().filter_map(|e| e.stop_frame).max();
    for effect in effects.iter_mut() {
        if effect.stop_frame.is_none() {
            let floor = effect.start_frame + 1;
            effect.stop_frame = Some(max_stop.map_or(floor, |m| m.max(floor)));
        }
    }
}

// ---------------------------------------------------------------------------
// Per-item validation and composition
// ---------------------------------------------------------------------------

fn validate_item(slide: &str, item: &ContentItem) -> Result<(), ConfigError> {
    if item.colour == Some(ColourSpec::Cycle) {
        if let Some(anim @ (Animation::Typing | Animation::Mirage | Animation::Fire)) =
            item.animation
        {
            return Err(ConfigError::Conflict {
                slide: slide.to_owned(),
                a: "cycle",
                b: anim.name(),
            });
        }
    }
    if let Some(anim @ (Animation::Fire | Animation::Noise)) = item.animation {
        if item.kind != ContentType::Figlet {
            return Err(ConfigError::InvalidValue {
                slide: slide.to_owned(),
                field: "animation",
                reason: format!("'{}' is only valid with type=figlet", anim.name()),
            });
        }
    }
    Ok(())
}

fn text_payload<'a>(slide: &str, item: &'a ContentItem) -> Result<&'a str, ConfigError> {
    item.content
        .as_ref()
        .and_then(serde_yaml::Value::as_str)
        .ok_or_else(|| ConfigError::MissingField {
            slide: slide.to_owned(),
            field: item.kind.payload_field(),
        })
}

fn table_payload(slide: &str, item: &ContentItem) -> Result<Vec<Vec<String>>, ConfigError> {
    let missing = || ConfigError::MissingField {
        slide: slide.to_owned(),
        field: item.kind.payload_field(),
    };
    let rows = item
        .content
        .as_ref()
        .and_then(serde_yaml::Value::as_sequence)
        .ok_or_else(missing)?;
    rows.iter()
        .map(|row| {
            let cells = row.as_sequence().ok_or_else(missing)?;
            Ok(cells.iter().map(scalar_to_string).collect())
        })
        .collect()
}

fn scalar_to_string(v: &serde_yaml::Value) -> String {
    match v {
        serde_yaml::Value::String(s) => s.clone(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Null => String::new(),
        other => format!("{other:?}"),
    }
}

fn render_item(
    ctx: &mut ComposeCtx,
    slide: &str,
    item: &ContentItem,
) -> Result<Renderable, SlideError> {
    let rend = match item.kind {
        ContentType::Text => plain_text(text_payload(slide, item)?),
        ContentType::Figlet => figlet_text(text_payload(slide, item)?),
        ContentType::Box => boxed_text(text_payload(slide, item)?),
        ContentType::Uml => uml_text(ctx.uml, text_payload(slide, item)?)?,
        ContentType::Table => table_text(&table_payload(slide, item)?, item.has_header),
        ContentType::Image => {
            let path = ctx.base_dir.join(text_payload(slide, item)?);
            mono_image(&path, ctx.width.saturating_sub(2), ctx.height.saturating_sub(2))?
        }
        ContentType::ColorImage => {
            let path = ctx.base_dir.join(text_payload(slide, item)?);
            colour_image(&path, ctx.width.saturating_sub(2), ctx.height.saturating_sub(2))?
        }
    };
    Ok(rend)
}

fn compose_item(
    ctx: &mut ComposeCtx,
    name: &str,
    slide: &Slide,
    item: &ContentItem,
    effects: &mut Vec<TimedEffect>,
) -> Result<(), SlideError> {
    let rend = render_item(ctx, name, item)?;

    // Scroll-in parks content one screenful below the fold; afterStart
    // additionally holds its start frame until the scroll has finished.
    let scroll_in = slide.start_animation == Some(StartAnimation::Scroll);
    let delay = item.delay.unwrap_or(0) as usize;
    let start = delay + if scroll_in && item.after_start { ctx.height } else { 0 };
    let mut y = item.y.unwrap_or((ctx.height / 2) as i64);
    if scroll_in {
        y += ctx.height as i64;
    }
    let x = item
        .x
        .unwrap_or_else(|| ((ctx.width as i64 - rend.max_width as i64) / 2).max(0));

    let colour = item.colour.unwrap_or(ColourSpec::White);
    if colour == ColourSpec::Cycle {
        effects.push(TimedEffect::open(start, Primitive::Cycle(Cycle::new(rend, x, y))));
        return Ok(());
    }

    // Rainbow supplies per-character colour; the fixed style falls back
    // to white.
    let (rend, fg) = match colour {
        ColourSpec::Rainbow => (rainbow(rend), NamedColour::White),
        other => (rend, other.named().unwrap_or(NamedColour::White)),
    };
    let style = CharStyle {
        fg,
        attr: item.attr.unwrap_or_default(),
        bg: item.bg.unwrap_or(NamedColour::Black),
    };

    match item.animation {
        None => {
            effects.push(TimedEffect::open(start, Primitive::Print(Print::new(rend, x, y, style))));
        }
        Some(Animation::Typing) => {
            let typing = Typing::new(rend, x, y, style);
            let stop = start + typing.frame_count();
            effects.push(TimedEffect::windowed(start, stop, Primitive::Typing(typing)));
        }
        Some(Animation::Mirage) => {
            let flicker_stop = start + MIRAGE_FLICKER_FRAMES - 1;
            effects.push(TimedEffect::windowed(
                start,
                flicker_stop,
                Primitive::Mirage(Mirage::new(rend.clone(), x, y, style)),
            ));
            effects.push(TimedEffect::windowed(
                flicker_stop + 1,
                flicker_stop + MIRAGE_PRINT_FRAMES,
                Primitive::Print(Print::new(rend, x, y, style)),
            ));
        }
        Some(Animation::Fire) => {
            // Flames sized from the text's bounding box, bottom-aligned
            // behind it; three layers share one start frame.
            let fire_w = rend.max_width;
            let fire_h = (rend.max_height as f64 * 2.5).round() as usize;
            let fire_y = y + rend.max_height as i64 - fire_h as i64;
            effects.push(TimedEffect::open(
                start,
                Primitive::Fire(Fire::new(x, fire_y, fire_w, fire_h)),
            ));
            effects.push(TimedEffect::open(
                start,
                Primitive::Print(Print::silhouette(rend.clone(), x, y)),
            ));
            effects.push(TimedEffect::open(start, Primitive::Print(Print::new(rend, x, y, style))));
        }
        Some(Animation::Noise) => {
            effects.push(TimedEffect::open(start, Primitive::Noise(Noise::new(rend, x, y, style))));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::SlideDeck;
    use crate::screen::Screen;

    fn compose(width: usize, height: usize, yaml: &str) -> Result<Vec<TimedEffect>, SlideError> {
        let deck = SlideDeck::parse(yaml).expect("deck parses");
        let (name, slide) = &deck.slides[0];
        let mut uml = UmlCache::new();
        let mut ctx = ComposeCtx {
            width,
            height,
            base_dir: Path::new("."),
            uml: &mut uml,
        };
        compose_slide(&mut ctx, name, slide)
    }

    #[test]
    fn content_never_overlaps_the_ending() {
        let effects = compose(
            80,
            24,
            "s:\n  endAnimation: scroll\n  content:\n    - type: text\n      content: alpha\n      animation: typing\n    - type: text\n      content: beta\n      delay: 7\n",
        )
        .unwrap();
        let end = effects.last().unwrap();
        assert!(matches!(end.primitive, Primitive::Scroll(_)));
        for content in &effects[..effects.len() - 1] {
            assert!(content.stop_frame.unwrap() <= end.start_frame - 1);
        }
    }

    #[test]
    fn table_without_data_names_the_slide() {
        let err = compose(
            80,
            24,
            "prices:\n  content:\n    - type: table\n",
        )
        .unwrap_err();
        match err {
            SlideError::Config(ConfigError::MissingField { slide, field }) => {
                assert_eq!(slide, "prices");
                assert_eq!(field, "data");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn cycle_with_typing_is_a_conflict() {
        let err = compose(
            80,
            24,
            "s:\n  content:\n    - type: text\n      content: hi\n      animation: typing\n      colour: cycle\n",
        )
        .unwrap_err();
        match err {
            SlideError::Config(ConfigError::Conflict { a, b, .. }) => {
                assert_eq!(a, "cycle");
                assert_eq!(b, "typing");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn fire_requires_figlet() {
        let err = compose(
            80,
            24,
            "s:\n  content:\n    - type: text\n      content: hi\n      animation: fire\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("figlet"));
    }

    #[test]
    fn mirage_is_two_contiguous_effects() {
        let effects = compose(
            80,
            24,
            "s:\n  content:\n    - type: text\n      content: shimmer\n      animation: mirage\n      delay: 4\n",
        )
        .unwrap();
        assert_eq!(effects.len(), 2);
        let flicker = &effects[0];
        let reveal = &effects[1];
        assert_eq!(flicker.start_frame, 4);
        assert_eq!(flicker.stop_frame.unwrap() - flicker.start_frame + 1, 30);
        assert_eq!(reveal.start_frame, flicker.stop_frame.unwrap() + 1);
        assert_eq!(reveal.stop_frame.unwrap() - reveal.start_frame + 1, 10);
    }

    #[test]
    fn typing_scenario_single_effect_runs_to_completion() {
        let mut effects = compose(
            80,
            24,
            "s:\n  duration: -1\n  content:\n    - type: text\n      content: Hi\n      animation: typing\n",
        )
        .unwrap();
        assert_eq!(effects.len(), 1);
        let effect = &mut effects[0];
        assert_eq!(effect.start_frame, 0);

        let mut screen = Screen::new(80, 24);
        let budget = effect.stop_frame.unwrap();
        for frame in 0..=budget {
            effect.update(&mut screen, frame);
        }
        assert!(effect.primitive.is_finished());
        let y = 12;
        let x = (80 - 2) / 2;
        assert_eq!(screen.get(x, y).unwrap().ch, 'H');
        assert_eq!(screen.get(x + 1, y).unwrap().ch, 'i');
    }

    #[test]
    fn scroll_in_offsets_start_frame_and_y() {
        let effects = compose(
            80,
            20,
            "s:\n  startAnimation: scroll\n  content:\n    - type: text\n      content: below\n      y: 5\n      afterStart: true\n",
        )
        .unwrap();
        // Content effect plus the scroll-in itself.
        assert_eq!(effects.len(), 2);
        let content = &effects[0];
        assert_eq!(content.start_frame, 20);
        match &content.primitive {
            Primitive::Print(p) => assert_eq!(p.y, 25),
            other => panic!("expected print, got a different primitive: {}", other_name(other)),
        }
        let scroll = &effects[1];
        assert_eq!(scroll.start_frame, 0);
        assert_eq!(scroll.stop_frame, Some(20));
    }

    #[test]
    fn open_stops_resolve_to_latest_content_stop() {
        let effects = compose(
            80,
            24,
            "s:\n  content:\n    - type: text\n      content: typed out slowly\n      animation: typing\n    - type: text\n      content: static\n",
        )
        .unwrap();
        let typing_stop = effects[0].stop_frame.unwrap();
        assert_eq!(effects[1].stop_frame, Some(typing_stop));
    }

    #[test]
    fn lone_open_effect_resolves_to_start_plus_one() {
        let effects = compose(
            80,
            24,
            "s:\n  content:\n    - type: text\n      content: static\n      delay: 3\n",
        )
        .unwrap();
        assert_eq!(effects[0].stop_frame, Some(4));
    }

    #[test]
    fn fire_emits_three_layers_sharing_a_start() {
        let effects = compose(
            80,
            24,
            "s:\n  content:\n    - type: figlet\n      content: HOT\n      animation: fire\n      colour: red\n",
        )
        .unwrap();
        assert_eq!(effects.len(), 3);
        assert!(matches!(effects[0].primitive, Primitive::Fire(_)));
        assert!(effects.iter().all(|e| e.start_frame == effects[0].start_frame));
    }

    #[test]
    fn page_animation_is_prepended_and_never_gates_the_ending() {
        let effects = compose(
            80,
            24,
            "s:\n  endAnimation: wipe\n  pageAnimation: fireworks\n  content:\n    - type: text\n      content: party\n",
        )
        .unwrap();
        assert!(matches!(effects[0].primitive, Primitive::Bursts(_)));
        assert_eq!(effects[0].start_frame, 0);
        assert!(effects[0].stop_frame.is_none());
        // Ending anchored to the content stop (start+1 = 1, anchor = 2),
        // unaffected by the open-ended page effect.
        let end = effects.last().unwrap();
        assert!(matches!(end.primitive, Primitive::Wipe(_)));
        assert_eq!(end.start_frame, 2);
    }

    #[test]
    fn reentry_randomization_ticks_within_bounds() {
        // Compose the same fireworks slide twice (as slide re-entry
        // does) and drive both lists; must not panic, and the bursts
        // module asserts placement bounds in its own tests.
        for _ in 0..2 {
            let mut effects = compose(
                40,
                12,
                "s:\n  pageAnimation: fireworks\n  content:\n    - type: text\n      content: again\n",
            )
            .unwrap();
            let mut screen = Screen::new(40, 12);
            for frame in 0..200 {
                for effect in effects.iter_mut() {
                    effect.update(&mut screen, frame);
                }
            }
        }
    }

    #[test]
    fn rainbow_forces_white_fixed_style() {
        let effects = compose(
            80,
            24,
            "s:\n  content:\n    - type: text\n      content: prism\n      colour: rainbow\n",
        )
        .unwrap();
        match &effects[0].primitive {
            Primitive::Print(p) => {
                assert_eq!(p.style.fg, NamedColour::White);
                assert!(p.rend.colour_at(0, 0).is_some());
            }
            _ => panic!("expected print"),
        }
    }

    #[test]
    fn cycle_colour_always_yields_cycle_effect() {
        let effects = compose(
            80,
            24,
            "s:\n  content:\n    - type: text\n      content: loop\n      colour: cycle\n",
        )
        .unwrap();
        assert!(matches!(effects[0].primitive, Primitive::Cycle(_)));
    }

    #[test]
    fn empty_content_is_a_config_error() {
        let err = compose(80, 24, "s:\n  notes: nothing here\n").unwrap_err();
        assert!(err.to_string().contains("content"));
    }

    fn other_name(p: &Primitive) -> &'static str {
        match p {
            Primitive::Print(_) => "print",
            Primitive::Typing(_) => "typing",
            Primitive::Mirage(_) => "mirage",
            Primitive::Cycle(_) => "cycle",
            Primitive::Fire(_) => "fire",
            Primitive::Noise(_) => "noise",
            Primitive::Scroll(_) => "scroll",
            Primitive::MatrixDissolve(_) => "matrix",
            Primitive::Wipe(_) => "wipe",
            Primitive::ParticleDrop(_) => "drop",
            Primitive::ParticleShoot(_) => "shoot",
            Primitive::Stars(_) => "stars",
            Primitive::Snow(_) => "snow",
            Primitive::Rain(_) => "rain",
            Primitive::Bursts(_) => "bursts",
        }
    }
}
