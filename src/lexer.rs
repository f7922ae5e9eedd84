//! JSON lexer/tokenizer.
//!
//! Scans the input left to right and produces one classified token per
//! call, skipping insignificant whitespace. The lexer owns the cursor and
//! all character-level validation: escape decoding, numeric-literal
//! syntax, and keyword matching. Input arrives as `&str`, so UTF-8
//! validity is guaranteed by the type and multi-byte characters are
//! copied through verbatim.

use crate::error::{ErrorKind, ParseError, ParseResult};

/// Token types produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Left brace `{`
    LeftBrace,
    /// Right brace `}`
    RightBrace,
    /// Left bracket `[`
    LeftBracket,
    /// Right bracket `]`
    RightBracket,
    /// Colon `:`
    Colon,
    /// Comma `,`
    Comma,
    /// Null literal
    Null,
    /// True literal
    True,
    /// False literal
    False,
    /// String value with escapes decoded
    String(String),
    /// Number value converted to a double
    Number(f64),
    /// End of input
    Eof,
}

/// JSON lexer that tokenizes input.
pub struct Lexer<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
    token_start: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            pos: 0,
            token_start: 0,
        }
    }

    /// Byte offset at which the most recently returned token starts.
    ///
    /// For [`Token::Eof`] this is the input length.
    pub fn token_start(&self) -> usize {
        self.token_start
    }

    /// Peek at the current byte without consuming it.
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    /// Consume and return the current byte.
    fn advance(&mut self) -> Option<u8> {
        let b = self.bytes.get(self.pos).copied();
        if b.is_some() {
            self.pos += 1;
        }
        b
    }

    /// Skip whitespace characters (space, tab, newline, carriage return).
    fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            match b {
                b' ' | b'\t' | b'\n' | b'\r' => {
                    self.advance();
                }
                _ => break,
            }
        }
    }

    /// Read the next token from the input.
    pub fn next_token(&mut self) -> ParseResult<Token> {
        self.skip_whitespace();
        self.token_start = self.pos;

        match self.peek() {
            None => Ok(Token::Eof),
            Some(b'{') => {
                self.advance();
                Ok(Token::LeftBrace)
            }
            Some(b'}') => {
                self.advance();
                Ok(Token::RightBrace)
            }
            Some(b'[') => {
                self.advance();
                Ok(Token::LeftBracket)
            }
            Some(b']') => {
                self.advance();
                Ok(Token::RightBracket)
            }
            Some(b':') => {
                self.advance();
                Ok(Token::Colon)
            }
            Some(b',') => {
                self.advance();
                Ok(Token::Comma)
            }
            Some(b'"') => self.read_string(),
            Some(b'-') | Some(b'0'..=b'9') => self.read_number(),
            Some(b't') => self.read_keyword(b"true", Token::True),
            Some(b'f') => self.read_keyword(b"false", Token::False),
            Some(b'n') => self.read_keyword(b"null", Token::Null),
            Some(_) => Err(ParseError::new(ErrorKind::UnexpectedCharacter, self.pos)),
        }
    }

    /// Read a string token, decoding escape sequences.
    fn read_string(&mut self) -> ParseResult<Token> {
        // Consume opening quote
        self.advance();

        let mut text = String::new();

        loop {
            match self.peek() {
                None => {
                    return Err(ParseError::new(ErrorKind::UnterminatedString, self.pos));
                }
                Some(b'"') => {
                    self.advance();
                    break;
                }
                Some(b'\\') => {
                    let esc_start = self.pos;
                    self.advance();
                    let decoded = self.read_escape(esc_start)?;
                    text.push(decoded);
                }
                Some(b) if b < 0x20 => {
                    // Raw control characters are not allowed in strings
                    return Err(ParseError::new(ErrorKind::UnexpectedCharacter, self.pos));
                }
                Some(b) if b < 0x80 => {
                    self.advance();
                    text.push(b as char);
                }
                Some(_) => {
                    // Multi-byte character; pos is always on a char boundary
                    let ch = self.input[self.pos..]
                        .chars()
                        .next()
                        .ok_or(ParseError::new(ErrorKind::UnexpectedCharacter, self.pos))?;
                    self.pos += ch.len_utf8();
                    text.push(ch);
                }
            }
        }

        Ok(Token::String(text))
    }

    /// Decode the escape sequence after a backslash.
    ///
    /// `esc_start` is the offset of the backslash, used for reporting
    /// surrogate-pairing failures that span several characters.
    fn read_escape(&mut self, esc_start: usize) -> ParseResult<char> {
        match self.peek() {
            None => Err(ParseError::new(ErrorKind::UnterminatedString, self.pos)),
            Some(b'"') => {
                self.advance();
                Ok('"')
            }
            Some(b'\\') => {
                self.advance();
                Ok('\\')
            }
            Some(b'/') => {
                self.advance();
                Ok('/')
            }
            Some(b'b') => {
                self.advance();
                Ok('\x08')
            }
            Some(b'f') => {
                self.advance();
                Ok('\x0C')
            }
            Some(b'n') => {
                self.advance();
                Ok('\n')
            }
            Some(b'r') => {
                self.advance();
                Ok('\r')
            }
            Some(b't') => {
                self.advance();
                Ok('\t')
            }
            Some(b'u') => {
                self.advance();
                self.read_unicode_escape(esc_start)
            }
            Some(_) => Err(ParseError::new(ErrorKind::InvalidEscape, self.pos)),
        }
    }

    /// Decode a `\uXXXX` escape, combining surrogate pairs for characters
    /// outside the Basic Multilingual Plane.
    fn read_unicode_escape(&mut self, esc_start: usize) -> ParseResult<char> {
        let unit = self.read_hex4()?;

        // High surrogate: must be followed by \uXXXX low surrogate
        if (0xD800..=0xDBFF).contains(&unit) {
            if self.peek() != Some(b'\\') {
                return Err(ParseError::new(ErrorKind::InvalidEscape, esc_start));
            }
            self.advance();
            if self.peek() != Some(b'u') {
                return Err(ParseError::new(ErrorKind::InvalidEscape, esc_start));
            }
            self.advance();
            let low = self.read_hex4()?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return Err(ParseError::new(ErrorKind::InvalidEscape, esc_start));
            }
            let combined =
                0x10000 + ((u32::from(unit) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
            return char::from_u32(combined)
                .ok_or(ParseError::new(ErrorKind::InvalidEscape, esc_start));
        }

        // Lone low surrogate
        if (0xDC00..=0xDFFF).contains(&unit) {
            return Err(ParseError::new(ErrorKind::InvalidEscape, esc_start));
        }

        char::from_u32(u32::from(unit)).ok_or(ParseError::new(ErrorKind::InvalidEscape, esc_start))
    }

    /// Read 4 hex digits and return the UTF-16 code unit value.
    fn read_hex4(&mut self) -> ParseResult<u16> {
        let mut value: u16 = 0;
        for _ in 0..4 {
            let digit = match self.peek() {
                None => {
                    return Err(ParseError::new(ErrorKind::UnterminatedString, self.pos));
                }
                Some(b @ b'0'..=b'9') => b - b'0',
                Some(b @ b'a'..=b'f') => b - b'a' + 10,
                Some(b @ b'A'..=b'F') => b - b'A' + 10,
                Some(_) => {
                    return Err(ParseError::new(ErrorKind::InvalidEscape, self.pos));
                }
            };
            self.advance();
            value = (value << 4) | u16::from(digit);
        }
        Ok(value)
    }

    /// Read a number token.
    ///
    /// Consumes the maximal run matching the JSON number grammar; any byte
    /// not extending the grammar ends the literal without being consumed,
    /// so no specific terminator is required.
    fn read_number(&mut self) -> ParseResult<Token> {
        let start = self.pos;

        // Optional minus sign
        if self.peek() == Some(b'-') {
            self.advance();
        }

        // Integer part
        match self.peek() {
            Some(b'0') => {
                self.advance();
                // After a leading zero, further digits are an error
                if let Some(b'0'..=b'9') = self.peek() {
                    return Err(ParseError::new(ErrorKind::InvalidNumber, self.pos));
                }
            }
            Some(b'1'..=b'9') => {
                self.advance();
                while let Some(b'0'..=b'9') = self.peek() {
                    self.advance();
                }
            }
            _ => return Err(ParseError::new(ErrorKind::InvalidNumber, self.pos)),
        }

        // Fractional part
        if self.peek() == Some(b'.') {
            self.advance();
            match self.peek() {
                Some(b'0'..=b'9') => {
                    while let Some(b'0'..=b'9') = self.peek() {
                        self.advance();
                    }
                }
                _ => return Err(ParseError::new(ErrorKind::InvalidNumber, self.pos)),
            }
        }

        // Exponent
        if let Some(b'e') | Some(b'E') = self.peek() {
            self.advance();
            if let Some(b'+') | Some(b'-') = self.peek() {
                self.advance();
            }
            match self.peek() {
                Some(b'0'..=b'9') => {
                    while let Some(b'0'..=b'9') = self.peek() {
                        self.advance();
                    }
                }
                _ => return Err(ParseError::new(ErrorKind::InvalidNumber, self.pos)),
            }
        }

        let value: f64 = self.input[start..self.pos]
            .parse()
            .map_err(|_| ParseError::new(ErrorKind::InvalidNumber, start))?;

        Ok(Token::Number(value))
    }

    /// Match a literal keyword as an exact byte run.
    ///
    /// The slice lookup is bounds-checked, so a truncated keyword at the
    /// end of input fails cleanly instead of reading past the buffer.
    fn read_keyword(&mut self, expected: &'static [u8], token: Token) -> ParseResult<Token> {
        match self.bytes.get(self.pos..self.pos + expected.len()) {
            Some(run) if run == expected => {
                self.pos += expected.len();
                Ok(token)
            }
            _ => Err(ParseError::new(ErrorKind::InvalidLiteral, self.pos)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(input: &str) -> ParseResult<Vec<Token>> {
        let mut lexer = Lexer::new(input);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token()?;
            if token == Token::Eof {
                break;
            }
            tokens.push(token);
        }
        Ok(tokens)
    }

    #[test]
    fn test_structural_tokens() {
        let tokens = lex("{}[],:").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::LeftBrace,
                Token::RightBrace,
                Token::LeftBracket,
                Token::RightBracket,
                Token::Comma,
                Token::Colon,
            ]
        );
    }

    #[test]
    fn test_literals() {
        let tokens = lex("null true false").unwrap();
        assert_eq!(tokens, vec![Token::Null, Token::True, Token::False]);
    }

    #[test]
    fn test_truncated_literal() {
        let err = lex("tru").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidLiteral);
        assert_eq!(err.offset(), 0);
    }

    #[test]
    fn test_misspelled_literal() {
        let err = lex("nill").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidLiteral);
    }

    #[test]
    fn test_string() {
        let tokens = lex(r#""hello""#).unwrap();
        assert_eq!(tokens, vec![Token::String("hello".to_string())]);
    }

    #[test]
    fn test_string_escapes() {
        let tokens = lex(r#""a\nb\tc""#).unwrap();
        assert_eq!(tokens, vec![Token::String("a\nb\tc".to_string())]);
    }

    #[test]
    fn test_all_simple_escapes() {
        let tokens = lex(r#""\"\\\/\b\f\n\r\t""#).unwrap();
        assert_eq!(tokens, vec![Token::String("\"\\/\x08\x0C\n\r\t".to_string())]);
    }

    #[test]
    fn test_unicode_escape() {
        let mut lexer = Lexer::new("\"\\u0041\"");
        let token = lexer.next_token().unwrap();
        assert_eq!(token, Token::String("A".to_string()));
    }

    #[test]
    fn test_surrogate_pair() {
        // 😀 combines to U+1F600
        let mut lexer = Lexer::new("\"\\uD83D\\uDE00\"");
        let token = lexer.next_token().unwrap();
        assert_eq!(token, Token::String("\u{1F600}".to_string()));
    }

    #[test]
    fn test_unpaired_high_surrogate() {
        let err = lex(r#""\uD800""#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidEscape);
    }

    #[test]
    fn test_lone_low_surrogate() {
        let err = lex(r#""\uDC00""#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidEscape);
    }

    #[test]
    fn test_multibyte_passthrough() {
        let tokens = lex("\"héllo \u{1F980}\"").unwrap();
        assert_eq!(tokens, vec![Token::String("héllo \u{1F980}".to_string())]);
    }

    #[test]
    fn test_invalid_escape_offset() {
        // The 'q' after the backslash is the offending character
        let err = lex(r#""\q""#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidEscape);
        assert_eq!(err.offset(), 2);
    }

    #[test]
    fn test_bad_hex_digit() {
        let err = lex(r#""\u00G1""#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidEscape);
        assert_eq!(err.offset(), 5);
    }

    #[test]
    fn test_unterminated_string() {
        let err = lex(r#""abc"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnterminatedString);
        assert_eq!(err.offset(), 4);
    }

    #[test]
    fn test_unterminated_mid_escape() {
        let err = lex(r#""abc\"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnterminatedString);
    }

    #[test]
    fn test_control_character_rejected() {
        let err = lex("\"a\tb\"").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedCharacter);
        assert_eq!(err.offset(), 2);
    }

    #[test]
    fn test_integers() {
        let tokens = lex("42 -123 0").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Number(42.0),
                Token::Number(-123.0),
                Token::Number(0.0),
            ]
        );
    }

    #[test]
    fn test_fractions_and_exponents() {
        let tokens = lex("3.14 -0.5 1e10 2.5E-3 6e+2").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Number(3.14),
                Token::Number(-0.5),
                Token::Number(1e10),
                Token::Number(2.5e-3),
                Token::Number(6e2),
            ]
        );
    }

    #[test]
    fn test_leading_zero_rejected() {
        let err = lex("01").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidNumber);
        assert_eq!(err.offset(), 1);
    }

    #[test]
    fn test_bare_minus_rejected() {
        let err = lex("-").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidNumber);
    }

    #[test]
    fn test_trailing_decimal_point_rejected() {
        let err = lex("1.").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidNumber);
        assert_eq!(err.offset(), 2);
    }

    #[test]
    fn test_empty_exponent_rejected() {
        let err = lex("1e").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidNumber);

        let err = lex("1e+").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidNumber);
    }

    #[test]
    fn test_number_terminates_without_specific_terminator() {
        // End of input, whitespace, and structural bytes all end a number
        let tokens = lex("1 2,3]").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Number(1.0),
                Token::Number(2.0),
                Token::Comma,
                Token::Number(3.0),
                Token::RightBracket,
            ]
        );
    }

    #[test]
    fn test_unexpected_character() {
        let err = lex("@").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedCharacter);
        assert_eq!(err.offset(), 0);
    }

    #[test]
    fn test_token_start_tracks_offsets() {
        let mut lexer = Lexer::new("  {  \"a\"");
        assert_eq!(lexer.next_token().unwrap(), Token::LeftBrace);
        assert_eq!(lexer.token_start(), 2);
        assert_eq!(lexer.next_token().unwrap(), Token::String("a".to_string()));
        assert_eq!(lexer.token_start(), 5);
        assert_eq!(lexer.next_token().unwrap(), Token::Eof);
        assert_eq!(lexer.token_start(), 8);
    }
}
