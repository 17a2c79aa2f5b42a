//! Player — the interactive playback session.
//!
//! Owns the terminal for the lifetime of one session and drives two
//! views: the slide list (pick a slide, read its notes) and the slide
//! view (fixed 50 ms ticks feeding the active effects). The player never
//! decides *what* an animation looks like; it only advances frame
//! numbers, routes key presses, and flushes the screen diff.
//!
//! A terminal resize is not handled in place: the session returns
//! `SessionEnd::Resized` carrying the current slide index, and the
//! caller rebuilds everything at the new size and resumes there.

use std::io::{self, Write};
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{cursor, event, execute, queue, style, terminal};

use crate::deck::SlideDeck;
use crate::engine::effects::{Command, TimedEffect};
use crate::engine::{ComposeCtx, compose_slide};
use crate::render::{UmlCache, wrap_line};
use crate::screen::Screen;
use crate::screen::term::TermFlusher;

/// Frame cadence of the slide view.
const TICK: Duration = Duration::from_millis(50);

/// Why the session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Quit,
    /// The terminal changed size; restart at this slide.
    Resized { index: usize },
}

enum ListOutcome {
    Play(usize),
    Quit,
    Resized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlideStep {
    Next,
    Prev,
    ToList,
    Resized,
}

/// Outcome of a keyboard advance: an armed ending consumes it first, and
/// at the last slide it is a no-op — only effect completion or duration
/// expiry leaves the deck's end.
fn advance_step(consumed: bool, index: usize, len: usize) -> Option<SlideStep> {
    if consumed || index + 1 >= len {
        None
    } else {
        Some(SlideStep::Next)
    }
}

pub struct Player<'a> {
    deck: &'a SlideDeck,
    base_dir: &'a Path,
    uml: &'a mut UmlCache,
    width: usize,
    height: usize,
    /// List cursor; doubles as the resume point across a resize restart.
    selected: usize,
}

impl<'a> Player<'a> {
    pub fn new(
        deck: &'a SlideDeck,
        base_dir: &'a Path,
        uml: &'a mut UmlCache,
        width: usize,
        height: usize,
        resume: usize,
    ) -> Player<'a> {
        Player {
            deck,
            base_dir,
            uml,
            width,
            height,
            selected: resume.min(deck.len().saturating_sub(1)),
        }
    }

    /// Run one full session.
    ///
    /// Sets up the terminal, alternates between list and slide views, and
    /// restores the terminal on exit (even on error).
    pub fn play(&mut self) -> Result<SessionEnd> {
        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All),
        )?;

        let result = self.run_session(&mut stdout);

        // Always restore terminal state.
        let _ = execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();

        result
    }

    fn run_session(&mut self, stdout: &mut io::Stdout) -> Result<SessionEnd> {
        loop {
            match self.run_list(stdout)? {
                ListOutcome::Quit => return Ok(SessionEnd::Quit),
                ListOutcome::Resized => {
                    return Ok(SessionEnd::Resized {
                        index: self.selected,
                    });
                }
                ListOutcome::Play(index) => match self.run_slides(stdout, index)? {
                    SlideStep::Resized => {
                        return Ok(SessionEnd::Resized {
                            index: self.selected,
                        });
                    }
                    // Back to the list, cursor left on the last slide
                    // shown.
                    _ => {}
                },
            }
        }
    }

    // -----------------------------------------------------------------------
    // List view
    // -----------------------------------------------------------------------

    fn run_list(&mut self, stdout: &mut io::Stdout) -> Result<ListOutcome> {
        self.draw_list(stdout)?;
        loop {
            match event::read()? {
                event::Event::Key(key) => {
                    use event::KeyCode::*;
                    match key.code {
                        Char('q') | Esc => return Ok(ListOutcome::Quit),
                        Enter | Right | Char(' ') => {
                            return Ok(ListOutcome::Play(self.selected));
                        }
                        Up => {
                            self.selected = self.selected.saturating_sub(1);
                            self.draw_list(stdout)?;
                        }
                        Down => {
                            if self.selected + 1 < self.deck.len() {
                                self.selected += 1;
                            }
                            self.draw_list(stdout)?;
                        }
                        Home => {
                            self.selected = 0;
                            self.draw_list(stdout)?;
                        }
                        End => {
                            self.selected = self.deck.len() - 1;
                            self.draw_list(stdout)?;
                        }
                        _ => {}
                    }
                }
                event::Event::Resize(_, _) => return Ok(ListOutcome::Resized),
                _ => {}
            }
        }
    }

    fn draw_list(&self, stdout: &mut io::Stdout) -> Result<()> {
        queue!(stdout, terminal::Clear(terminal::ClearType::All))?;

        let title_x = centred_x(self.width, &self.deck.title);
        let mut title_style = style::ContentStyle::default();
        title_style.attributes.set(style::Attribute::Bold);
        queue!(
            stdout,
            cursor::MoveTo(title_x as u16, 0),
            style::PrintStyledContent(style::StyledContent::new(title_style, &self.deck.title)),
        )?;

        // Slide names fill the upper pane; the selected slide's notes get
        // the rows below the divider.
        let notes_row = (self.height * 2) / 3;
        let visible = notes_row.saturating_sub(2);
        let first = self.selected.saturating_sub(visible.saturating_sub(1));
        for (row, index) in (first..self.deck.len()).take(visible).enumerate() {
            let (name, _) = &self.deck.slides[index];
            let mut cs = style::ContentStyle::default();
            if index == self.selected {
                cs.attributes.set(style::Attribute::Reverse);
            }
            queue!(
                stdout,
                cursor::MoveTo(2, (row + 2) as u16),
                style::PrintStyledContent(style::StyledContent::new(cs, name)),
            )?;
        }

        let mut divider_style = style::ContentStyle::default();
        divider_style.attributes.set(style::Attribute::Dim);
        queue!(
            stdout,
            cursor::MoveTo(0, notes_row as u16),
            style::PrintStyledContent(style::StyledContent::new(
                divider_style,
                "─".repeat(self.width),
            )),
        )?;
        let notes = &self.deck.slides[self.selected].1.notes;
        let notes_rows = self.height.saturating_sub(notes_row + 2);
        let wrapped = wrap_notes(notes, self.width.saturating_sub(4));
        for (i, line) in wrapped.iter().take(notes_rows).enumerate() {
            queue!(
                stdout,
                cursor::MoveTo(2, (notes_row + 1 + i) as u16),
                style::Print(line),
            )?;
        }

        let help = " ↑↓: select | Enter: play | q: quit ";
        queue!(
            stdout,
            cursor::MoveTo(0, (self.height - 1) as u16),
            style::PrintStyledContent(style::StyledContent::new(divider_style, help)),
        )?;
        stdout.flush()?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Slide view
    // -----------------------------------------------------------------------

    fn run_slides(&mut self, stdout: &mut io::Stdout, start: usize) -> Result<SlideStep> {
        let mut index = start;
        loop {
            self.selected = index;
            match self.play_slide(stdout, index)? {
                SlideStep::Next => {
                    if index + 1 < self.deck.len() {
                        index += 1;
                    } else {
                        // Only completion or duration expiry reaches
                        // here at the last slide; both end in the list.
                        return Ok(SlideStep::ToList);
                    }
                }
                SlideStep::Prev => {
                    if index == 0 {
                        return Ok(SlideStep::ToList);
                    }
                    index -= 1;
                }
                step @ (SlideStep::ToList | SlideStep::Resized) => return Ok(step),
            }
        }
    }

    /// Drive one slide from frame 0 until navigation.
    fn play_slide(&mut self, stdout: &mut io::Stdout, index: usize) -> Result<SlideStep> {
        let (name, slide) = &self.deck.slides[index];
        let mut ctx = ComposeCtx {
            width: self.width,
            height: self.height,
            base_dir: self.base_dir,
            uml: &mut *self.uml,
        };
        // Recomposed on every entry so particles, bursts and dissolves
        // re-randomize.
        let mut effects: Vec<TimedEffect> = compose_slide(&mut ctx, name, slide)?;

        let mut screen = Screen::new(self.width, self.height);
        let mut flusher = TermFlusher::new(self.width, self.height);
        execute!(stdout, terminal::Clear(terminal::ClearType::All))?;

        let mut frame: usize = 0;
        loop {
            let deadline = Instant::now() + TICK;

            for effect in effects.iter_mut() {
                effect.update(&mut screen, frame);
            }
            flusher.flush(&screen, stdout)?;

            if effects.iter().any(|e| e.primitive.completed()) {
                return Ok(SlideStep::Next);
            }
            if slide.duration >= 0 && frame >= slide.duration as usize {
                return Ok(SlideStep::Next);
            }

            // Poll for input until the next tick is due.
            loop {
                let now = Instant::now();
                if now >= deadline {
                    break;
                }
                if !event::poll(deadline - now)? {
                    break;
                }
                match event::read()? {
                    event::Event::Key(key) => {
                        if let Some(cmd) = decode_key(key.code) {
                            match cmd {
                                Command::Advance => {
                                    // A disarmed ending gets first
                                    // refusal; otherwise skip ahead.
                                    let consumed = effects
                                        .iter_mut()
                                        .any(|e| e.primitive.consume(Command::Advance));
                                    if let Some(step) =
                                        advance_step(consumed, index, self.deck.len())
                                    {
                                        return Ok(step);
                                    }
                                }
                                Command::Back => return Ok(SlideStep::Prev),
                                Command::ToList | Command::Quit => {
                                    return Ok(SlideStep::ToList);
                                }
                            }
                        }
                    }
                    event::Event::Resize(_, _) => return Ok(SlideStep::Resized),
                    _ => {}
                }
            }

            frame += 1;
        }
    }
}

/// Centring column for a piece of text, counted in characters.
fn centred_x(width: usize, text: &str) -> usize {
    width.saturating_sub(text.chars().count()) / 2
}

/// Word-wrap speaker notes to the pane width, one row per wrapped line.
fn wrap_notes(notes: &str, width: usize) -> Vec<String> {
    notes
        .lines()
        .flat_map(|line| wrap_line(line, width.max(1)))
        .collect()
}

/// Map a key press to a navigation command. Unbound keys are ignored.
pub fn decode_key(code: event::KeyCode) -> Option<Command> {
    use event::KeyCode::*;
    match code {
        Right | Char(' ') => Some(Command::Advance),
        Left => Some(Command::Back),
        Char('q') | Esc | Enter => Some(Command::ToList),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use event::KeyCode;

    #[test]
    fn keys_map_to_commands() {
        assert_eq!(decode_key(KeyCode::Char(' ')), Some(Command::Advance));
        assert_eq!(decode_key(KeyCode::Right), Some(Command::Advance));
        assert_eq!(decode_key(KeyCode::Left), Some(Command::Back));
        assert_eq!(decode_key(KeyCode::Char('q')), Some(Command::ToList));
        assert_eq!(decode_key(KeyCode::Esc), Some(Command::ToList));
        assert_eq!(decode_key(KeyCode::Enter), Some(Command::ToList));
        assert_eq!(decode_key(KeyCode::Char('x')), None);
        assert_eq!(decode_key(KeyCode::Tab), None);
    }

    #[test]
    fn keyboard_advance_is_a_noop_at_the_last_slide() {
        assert_eq!(advance_step(false, 0, 3), Some(SlideStep::Next));
        assert_eq!(advance_step(false, 1, 3), Some(SlideStep::Next));
        assert_eq!(advance_step(false, 2, 3), None);
        assert_eq!(advance_step(false, 0, 1), None);
    }

    #[test]
    fn an_armed_ending_swallows_the_advance() {
        assert_eq!(advance_step(true, 0, 3), None);
    }

    #[test]
    fn notes_wrap_to_the_pane_width() {
        let wrapped = wrap_notes("remember to breathe deeply\nshort", 10);
        assert!(wrapped.len() > 2);
        assert!(wrapped.iter().all(|l| l.chars().count() <= 10));
        assert_eq!(wrapped.last().map(String::as_str), Some("short"));
    }

    #[test]
    fn titles_centre_by_character_count() {
        assert_eq!(centred_x(20, "déjà"), 8);
        assert_eq!(centred_x(20, "abcd"), 8);
        assert_eq!(centred_x(2, "too wide to fit"), 0);
    }
}
