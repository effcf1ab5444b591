//! Scanner states and the static transition table

use super::classifier::CharacterClass;
use crate::tokens::TokenKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LexState {
    Start,

    // === INTERMEDIATE ===
    Identifier,
    Number,
    Slash,
    Comment,
    /// Inside a comment, just saw `*`
    CommentStar,
    Colon,
    Equals,
    LessThan,
    GreaterThan,
    Exclamation,

    // === IMMEDIATE FINALS ===
    Plus,
    Minus,
    Star,
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comma,
    Semicolon,
    Dot,
    Assign,
    EqualsEquals,
    LessEqual,
    NotEqual,
    GreaterEqual,
}

impl LexState {
    pub const COUNT: usize = 26;

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Token kind recognised when the scan stops in this state
    pub const fn accepting_kind(self) -> Option<TokenKind> {
        match self {
            LexState::Start
            | LexState::Comment
            | LexState::CommentStar
            | LexState::Colon
            | LexState::Exclamation => None,
            LexState::Identifier => Some(TokenKind::Identifier),
            LexState::Number => Some(TokenKind::Number),
            LexState::Slash => Some(TokenKind::Slash),
            LexState::Equals => Some(TokenKind::AssignEquals),
            LexState::LessThan => Some(TokenKind::Less),
            LexState::GreaterThan => Some(TokenKind::Greater),
            LexState::Plus => Some(TokenKind::Plus),
            LexState::Minus => Some(TokenKind::Minus),
            LexState::Star => Some(TokenKind::Star),
            LexState::LeftParen => Some(TokenKind::LeftParen),
            LexState::RightParen => Some(TokenKind::RightParen),
            LexState::LeftBrace => Some(TokenKind::LeftBrace),
            LexState::RightBrace => Some(TokenKind::RightBrace),
            LexState::Comma => Some(TokenKind::Comma),
            LexState::Semicolon => Some(TokenKind::Semicolon),
            LexState::Dot => Some(TokenKind::Dot),
            LexState::Assign => Some(TokenKind::Assign),
            LexState::EqualsEquals => Some(TokenKind::Equals),
            LexState::LessEqual => Some(TokenKind::LessEqual),
            LexState::NotEqual => Some(TokenKind::NotEqual),
            LexState::GreaterEqual => Some(TokenKind::GreaterEqual),
        }
    }

    /// No transition leaves this state, so its token is returned at once
    pub const fn is_immediate(self) -> bool {
        matches!(
            self,
            LexState::Plus
                | LexState::Minus
                | LexState::Star
                | LexState::LeftParen
                | LexState::RightParen
                | LexState::LeftBrace
                | LexState::RightBrace
                | LexState::Comma
                | LexState::Semicolon
                | LexState::Dot
                | LexState::Assign
                | LexState::EqualsEquals
                | LexState::LessEqual
                | LexState::NotEqual
                | LexState::GreaterEqual
        )
    }

    /// Entering these states discards the accumulated text
    pub const fn is_skip(self) -> bool {
        matches!(
            self,
            LexState::Start | LexState::Comment | LexState::CommentStar
        )
    }

    pub fn transition(self, class: CharacterClass) -> Option<LexState> {
        TRANSITIONS[self.index()][class.index()]
    }
}

type TransitionTable = [[Option<LexState>; CharacterClass::COUNT]; LexState::COUNT];

const fn set(
    mut table: TransitionTable,
    from: LexState,
    on: CharacterClass,
    to: LexState,
) -> TransitionTable {
    table[from.index()][on.index()] = Some(to);
    table
}

/// Every class except end of input moves `from` to `to`
const fn fill_row(mut table: TransitionTable, from: LexState, to: LexState) -> TransitionTable {
    let mut class = 0;
    while class < CharacterClass::COUNT {
        if class != CharacterClass::EndOfInput.index() {
            table[from.index()][class] = Some(to);
        }
        class += 1;
    }
    table
}

const fn build_transitions() -> TransitionTable {
    use CharacterClass as C;
    use LexState as S;

    let mut t: TransitionTable = [[None; CharacterClass::COUNT]; LexState::COUNT];

    t = set(t, S::Start, C::Whitespace, S::Start);
    t = set(t, S::Start, C::Letter, S::Identifier);
    t = set(t, S::Start, C::Digit, S::Number);
    t = set(t, S::Start, C::Plus, S::Plus);
    t = set(t, S::Start, C::Minus, S::Minus);
    t = set(t, S::Start, C::Star, S::Star);
    t = set(t, S::Start, C::Slash, S::Slash);
    t = set(t, S::Start, C::Colon, S::Colon);
    t = set(t, S::Start, C::Equals, S::Equals);
    t = set(t, S::Start, C::Exclamation, S::Exclamation);
    t = set(t, S::Start, C::LessThan, S::LessThan);
    t = set(t, S::Start, C::GreaterThan, S::GreaterThan);
    t = set(t, S::Start, C::LeftParen, S::LeftParen);
    t = set(t, S::Start, C::RightParen, S::RightParen);
    t = set(t, S::Start, C::LeftBrace, S::LeftBrace);
    t = set(t, S::Start, C::RightBrace, S::RightBrace);
    t = set(t, S::Start, C::Comma, S::Comma);
    t = set(t, S::Start, C::Semicolon, S::Semicolon);
    t = set(t, S::Start, C::Dot, S::Dot);

    t = set(t, S::Identifier, C::Letter, S::Identifier);
    t = set(t, S::Identifier, C::Digit, S::Identifier);
    t = set(t, S::Number, C::Digit, S::Number);

    // /* ... */ comments
    t = set(t, S::Slash, C::Star, S::Comment);
    t = fill_row(t, S::Comment, S::Comment);
    t = fill_row(t, S::CommentStar, S::Comment);
    t = set(t, S::Comment, C::Star, S::CommentStar);
    t = set(t, S::CommentStar, C::Star, S::CommentStar);
    t = set(t, S::CommentStar, C::Slash, S::Start);

    t = set(t, S::Colon, C::Equals, S::Assign);
    t = set(t, S::Equals, C::Equals, S::EqualsEquals);
    t = set(t, S::LessThan, C::Equals, S::LessEqual);
    t = set(t, S::LessThan, C::GreaterThan, S::NotEqual);
    t = set(t, S::GreaterThan, C::Equals, S::GreaterEqual);
    t = set(t, S::Exclamation, C::Equals, S::NotEqual);

    t
}

/// `TRANSITIONS[state][class]`; `None` rejects
pub static TRANSITIONS: TransitionTable = build_transitions();

#[cfg(test)]
mod tests {
    use super::*;
    use CharacterClass as C;
    use LexState as S;

    const ALL_STATES: [LexState; LexState::COUNT] = [
        S::Start,
        S::Identifier,
        S::Number,
        S::Slash,
        S::Comment,
        S::CommentStar,
        S::Colon,
        S::Equals,
        S::LessThan,
        S::GreaterThan,
        S::Exclamation,
        S::Plus,
        S::Minus,
        S::Star,
        S::LeftParen,
        S::RightParen,
        S::LeftBrace,
        S::RightBrace,
        S::Comma,
        S::Semicolon,
        S::Dot,
        S::Assign,
        S::EqualsEquals,
        S::LessEqual,
        S::NotEqual,
        S::GreaterEqual,
    ];

    #[test]
    fn test_state_indices_are_dense() {
        for (i, state) in ALL_STATES.iter().enumerate() {
            assert_eq!(state.index(), i);
        }
    }

    #[test]
    fn test_immediate_states_have_no_exits() {
        for state in ALL_STATES.iter().filter(|s| s.is_immediate()) {
            assert!(state.accepting_kind().is_some(), "{:?}", state);
            for class in CharacterClass::ALL {
                assert_eq!(state.transition(class), None, "{:?} on {:?}", state, class);
            }
        }
    }

    #[test]
    fn test_end_of_input_never_transitions() {
        for state in ALL_STATES {
            assert_eq!(state.transition(C::EndOfInput), None, "{:?}", state);
        }
    }

    #[test]
    fn test_start_rejects_other() {
        assert_eq!(S::Start.transition(C::Other), None);
        assert_eq!(S::Start.transition(C::Whitespace), Some(S::Start));
    }

    #[test]
    fn test_comment_rows() {
        assert_eq!(S::Slash.transition(C::Star), Some(S::Comment));
        assert_eq!(S::Comment.transition(C::Letter), Some(S::Comment));
        assert_eq!(S::Comment.transition(C::Star), Some(S::CommentStar));
        assert_eq!(S::CommentStar.transition(C::Star), Some(S::CommentStar));
        assert_eq!(S::CommentStar.transition(C::Slash), Some(S::Start));
        assert_eq!(S::CommentStar.transition(C::Other), Some(S::Comment));
    }

    #[test]
    fn test_two_character_operators() {
        assert_eq!(S::Colon.transition(C::Equals), Some(S::Assign));
        assert_eq!(S::LessThan.transition(C::GreaterThan), Some(S::NotEqual));
        assert_eq!(S::Exclamation.transition(C::Equals), Some(S::NotEqual));
        assert_eq!(S::Colon.transition(C::Letter), None);
    }
}
