//! UML diagram adapter — external renderer with a process-lifetime cache.
//!
//! Diagram text is handed to a local `plantuml` binary in text-art output
//! mode. Rendered output is cached keyed by a hash of the input so each
//! distinct diagram is rendered at most once per process. The cache never
//! evicts; decks are small and short-lived, so unbounded growth is the
//! accepted policy.

use std::collections::HashMap;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::io::Write;
use std::process::{Command, Stdio};

use crate::errors::RenderError;

use super::Renderable;

#[derive(Debug, Default)]
pub struct UmlCache {
    rendered: HashMap<u64, Vec<String>>,
}

impl UmlCache {
    pub fn new() -> UmlCache {
        UmlCache::default()
    }

    pub fn len(&self) -> usize {
        self.rendered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rendered.is_empty()
    }
}

fn key_of(text: &str) -> u64 {
    let mut h = DefaultHasher::new();
    text.hash(&mut h);
    h.finish()
}

/// Render diagram text via `plantuml -pipe -utxt`, through the cache.
pub fn uml_text(cache: &mut UmlCache, text: &str) -> Result<Renderable, RenderError> {
    let key = key_of(text);
    if let Some(lines) = cache.rendered.get(&key) {
        return Ok(Renderable::from_lines(lines.clone()));
    }

    let lines = invoke_plantuml(text)?;
    cache.rendered.insert(key, lines.clone());
    Ok(Renderable::from_lines(lines))
}

fn invoke_plantuml(text: &str) -> Result<Vec<String>, RenderError> {
    let fail = |reason: String| RenderError::Uml {
        content: text.to_owned(),
        reason,
    };

    let mut child = Command::new("plantuml")
        .args(["-pipe", "-utxt"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| fail(format!("failed to launch plantuml: {e}")))?;

    child
        .stdin
        .take()
        .ok_or_else(|| fail("plantuml stdin unavailable".to_owned()))?
        .write_all(text.as_bytes())
        .map_err(|e| fail(format!("failed to write diagram text: {e}")))?;

    let out = child
        .wait_with_output()
        .map_err(|e| fail(format!("plantuml did not finish: {e}")))?;
    if !out.status.success() {
        return Err(fail(format!(
            "plantuml exited with {}: {}",
            out.status,
            String::from_utf8_lossy(&out.stderr).trim(),
        )));
    }

    let rendered = String::from_utf8_lossy(&out.stdout);
    Ok(rendered.lines().map(str::to_owned).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_starts_empty_and_keys_are_stable() {
        let cache = UmlCache::new();
        assert!(cache.is_empty());
        assert_eq!(key_of("a -> b"), key_of("a -> b"));
        assert_ne!(key_of("a -> b"), key_of("b -> a"));
    }
}
