use std::path::Path;
use std::process;

use anyhow::{Context, Result, bail};
use crossterm::terminal;

use termdeck::deck::SlideDeck;
use termdeck::engine::{ComposeCtx, compose_slide};
use termdeck::player::{Player, SessionEnd};
use termdeck::render::UmlCache;

const USAGE: &str = "termdeck <deck.yaml>";

const MIN_WIDTH: u16 = 40;
const MIN_HEIGHT: u16 = 12;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let path = match args.next().as_deref() {
        Some(p) if !p.starts_with('-') => p.to_owned(),
        _ => bail!("termdeck — animated slide decks in the terminal\n\nUsage:\n  {USAGE}"),
    };

    let path = Path::new(&path);
    let deck = SlideDeck::load(path).with_context(|| format!("failed to load {}", path.display()))?;
    let base_dir = path.parent().unwrap_or(Path::new(".")).to_owned();

    let mut uml = UmlCache::new();
    let mut resume = 0usize;

    // The session restarts from scratch when the terminal is resized,
    // resuming at the slide that was showing.
    loop {
        let (width, height) = terminal::size().context("failed to query terminal size")?;
        if width < MIN_WIDTH || height < MIN_HEIGHT {
            bail!("terminal too small: need at least {MIN_WIDTH}x{MIN_HEIGHT}, have {width}x{height}");
        }
        let (width, height) = (width as usize, height as usize);

        // Compose every slide up front so bad decks fail before the
        // terminal is taken over. The results are discarded; playback
        // recomposes per entry.
        for (name, slide) in &deck.slides {
            let mut ctx = ComposeCtx {
                width,
                height,
                base_dir: &base_dir,
                uml: &mut uml,
            };
            compose_slide(&mut ctx, name, slide)
                .with_context(|| format!("failed to prepare slide '{name}'"))?;
        }

        let mut player = Player::new(&deck, &base_dir, &mut uml, width, height, resume);
        match player.play()? {
            SessionEnd::Quit => return Ok(()),
            SessionEnd::Resized { index } => resume = index,
        }
    }
}
