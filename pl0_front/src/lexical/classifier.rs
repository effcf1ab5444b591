//! Character classes: the column index of the scanner's transition table

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterClass {
    Letter,
    Digit,
    Whitespace,
    Plus,
    Minus,
    Star,
    Slash,
    Colon,
    Equals,
    Exclamation,
    LessThan,
    GreaterThan,
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comma,
    Semicolon,
    Dot,
    EndOfInput,
    Other,
}

impl CharacterClass {
    pub const COUNT: usize = 21;

    pub const ALL: [CharacterClass; CharacterClass::COUNT] = [
        CharacterClass::Letter,
        CharacterClass::Digit,
        CharacterClass::Whitespace,
        CharacterClass::Plus,
        CharacterClass::Minus,
        CharacterClass::Star,
        CharacterClass::Slash,
        CharacterClass::Colon,
        CharacterClass::Equals,
        CharacterClass::Exclamation,
        CharacterClass::LessThan,
        CharacterClass::GreaterThan,
        CharacterClass::LeftParen,
        CharacterClass::RightParen,
        CharacterClass::LeftBrace,
        CharacterClass::RightBrace,
        CharacterClass::Comma,
        CharacterClass::Semicolon,
        CharacterClass::Dot,
        CharacterClass::EndOfInput,
        CharacterClass::Other,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Map a character, or `None` for end of input, to its class
pub fn classify(ch: Option<char>) -> CharacterClass {
    let Some(ch) = ch else {
        return CharacterClass::EndOfInput;
    };

    match ch {
        'a'..='z' | 'A'..='Z' => CharacterClass::Letter,
        '0'..='9' => CharacterClass::Digit,
        ' ' | '\t' | '\n' | '\r' => CharacterClass::Whitespace,
        '+' => CharacterClass::Plus,
        '-' => CharacterClass::Minus,
        '*' => CharacterClass::Star,
        '/' => CharacterClass::Slash,
        ':' => CharacterClass::Colon,
        '=' => CharacterClass::Equals,
        '!' => CharacterClass::Exclamation,
        '<' => CharacterClass::LessThan,
        '>' => CharacterClass::GreaterThan,
        '(' => CharacterClass::LeftParen,
        ')' => CharacterClass::RightParen,
        '{' => CharacterClass::LeftBrace,
        '}' => CharacterClass::RightBrace,
        ',' => CharacterClass::Comma,
        ';' => CharacterClass::Semicolon,
        '.' => CharacterClass::Dot,
        _ => CharacterClass::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_match_declaration_order() {
        for (i, class) in CharacterClass::ALL.iter().enumerate() {
            assert_eq!(class.index(), i);
        }
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify(Some('q')), CharacterClass::Letter);
        assert_eq!(classify(Some('Q')), CharacterClass::Letter);
        assert_eq!(classify(Some('7')), CharacterClass::Digit);
        assert_eq!(classify(Some('\r')), CharacterClass::Whitespace);
        assert_eq!(classify(Some('!')), CharacterClass::Exclamation);
        assert_eq!(classify(Some('}')), CharacterClass::RightBrace);
        assert_eq!(classify(None), CharacterClass::EndOfInput);
    }

    #[test]
    fn test_non_ascii_is_other() {
        assert_eq!(classify(Some('é')), CharacterClass::Other);
        assert_eq!(classify(Some('٣')), CharacterClass::Other);
        assert_eq!(classify(Some('#')), CharacterClass::Other);
        assert_eq!(classify(Some('_')), CharacterClass::Other);
    }
}
