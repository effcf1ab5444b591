//! Character source with one step of pushback
//!
//! The text is never copied or mutated: the reader is an offset into the
//! borrowed buffer plus the single position saved before the last read.

use crate::utils::Position;

#[derive(Debug, Clone)]
pub struct CharacterSource<'a> {
    text: &'a str,
    position: Position,
    /// Position before the most recent successful `next()`
    saved: Option<Position>,
}

impl<'a> CharacterSource<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            position: Position::start(),
            saved: None,
        }
    }

    /// Next character, or `None` once the input is exhausted
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<char> {
        let ch = self.text[self.position.offset..].chars().next()?;
        self.saved = Some(self.position);
        self.position = self.position.advance(ch);
        Some(ch)
    }

    /// Step back over `ch`, the value just returned by `next()`.
    ///
    /// Retracting the end sentinel is a no-op. Only one step of pushback is
    /// kept; a second retract without an intervening `next()` does nothing.
    pub fn retract(&mut self, ch: Option<char>) {
        if ch.is_none() {
            return;
        }
        if let Some(previous) = self.saved.take() {
            self.position = previous;
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn is_at_end(&self) -> bool {
        self.position.offset >= self.text.len()
    }

    pub fn text(&self) -> &'a str {
        self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_in_order_then_sentinel() {
        let mut source = CharacterSource::new("ab");
        assert_eq!(source.next(), Some('a'));
        assert_eq!(source.next(), Some('b'));
        assert_eq!(source.next(), None);
        assert_eq!(source.next(), None);
        assert!(source.is_at_end());
    }

    #[test]
    fn test_retract_rereads_character() {
        let mut source = CharacterSource::new("x:=");
        source.next();
        let ch = source.next();
        assert_eq!(ch, Some(':'));
        source.retract(ch);
        assert_eq!(source.position().offset, 1);
        assert_eq!(source.next(), Some(':'));
    }

    #[test]
    fn test_retract_sentinel_is_noop() {
        let mut source = CharacterSource::new("a");
        source.next();
        let end = source.next();
        source.retract(end);
        assert!(source.is_at_end());
        assert_eq!(source.next(), None);
    }

    #[test]
    fn test_only_one_step_of_pushback() {
        let mut source = CharacterSource::new("abc");
        source.next();
        let b = source.next();
        source.retract(b);
        source.retract(Some('a'));
        assert_eq!(source.next(), Some('b'));
    }

    #[test]
    fn test_tracks_line_and_column() {
        let mut source = CharacterSource::new("a\nbc");
        source.next();
        source.next();
        source.next();
        assert_eq!(source.position(), Position::new(3, 2, 2));
    }
}
