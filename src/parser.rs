//! Recursive-descent JSON parser.
//!
//! Consumes tokens from the [`Lexer`] and builds the value tree. Each
//! container parse loops over its own members and recursively calls
//! [`Parser::parse_value`] for nested values, so a container is
//! well-formed exactly when its own descent terminates at the matching
//! close token. No lookahead beyond the single buffered token is needed.
//!
//! The buffered token is held as a `ParseResult`: fetching the lookahead
//! one past a complete value must not fail the parse by itself, because
//! at the top level anything after the value — lexable or not — is
//! trailing content, not a token error. A stored lex failure surfaces
//! only when the parser actually needs that token.

use std::collections::BTreeMap;

use crate::error::{ErrorKind, ParseError, ParseResult};
use crate::lexer::{Lexer, Token};
use crate::limits::Limits;
use crate::value::Value;

/// Recursive-descent parser over a token stream.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: ParseResult<Token>,
    current_pos: usize,
    limits: Limits,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given input.
    pub fn new(input: &'a str, limits: Limits) -> Self {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token();
        let current_pos = lexer.token_start();
        Self {
            lexer,
            current,
            current_pos,
            limits,
            depth: 0,
        }
    }

    /// Parse one complete document and return its value.
    ///
    /// Anything left after the top-level value other than whitespace is
    /// a [`ErrorKind::TrailingCharacters`] error at the offset where the
    /// leftover content starts, whether or not it lexes as a token.
    pub fn parse(&mut self) -> ParseResult<Value> {
        let value = self.parse_value()?;

        if !matches!(self.current, Ok(Token::Eof)) {
            return Err(ParseError::new(
                ErrorKind::TrailingCharacters,
                self.current_pos,
            ));
        }

        Ok(value)
    }

    /// Advance to the next token, deferring any lex failure until the
    /// token is inspected.
    fn advance(&mut self) {
        self.current = self.lexer.next_token();
        self.current_pos = self.lexer.token_start();
    }

    /// The buffered token, raising a deferred lex failure if there is one.
    fn current_token(&self) -> ParseResult<&Token> {
        match &self.current {
            Ok(token) => Ok(token),
            Err(err) => Err(*err),
        }
    }

    /// Parse a single JSON value, dispatching on the current token.
    fn parse_value(&mut self) -> ParseResult<Value> {
        match self.current_token()? {
            Token::Null => {
                self.advance();
                Ok(Value::Null)
            }
            Token::True => {
                self.advance();
                Ok(Value::Bool(true))
            }
            Token::False => {
                self.advance();
                Ok(Value::Bool(false))
            }
            Token::String(s) => {
                let value = Value::String(s.clone());
                self.advance();
                Ok(value)
            }
            Token::Number(n) => {
                let value = Value::Number(*n);
                self.advance();
                Ok(value)
            }
            Token::LeftBrace => self.parse_object(),
            Token::LeftBracket => self.parse_array(),
            _ => Err(ParseError::new(
                ErrorKind::UnexpectedCharacter,
                self.current_pos,
            )),
        }
    }

    /// Parse a JSON object.
    fn parse_object(&mut self) -> ParseResult<Value> {
        let open_pos = self.current_pos;
        self.depth += 1;
        if self.depth > self.limits.max_nesting_depth {
            return Err(ParseError::new(ErrorKind::NestingTooDeep, open_pos));
        }

        // Consume opening brace
        self.advance();

        let mut map = BTreeMap::new();

        // Empty object
        if matches!(self.current_token()?, Token::RightBrace) {
            self.advance();
            self.depth -= 1;
            return Ok(Value::Object(map));
        }

        loop {
            // Expect string key
            let key = match self.current_token()? {
                Token::String(s) => s.clone(),
                _ => {
                    return Err(ParseError::new(
                        ErrorKind::UnexpectedCharacter,
                        self.current_pos,
                    ));
                }
            };
            self.advance();

            // Expect colon
            if !matches!(self.current_token()?, Token::Colon) {
                return Err(ParseError::new(
                    ErrorKind::MalformedKeyValuePair,
                    self.current_pos,
                ));
            }
            self.advance();

            // Parse value; a repeated key overwrites (last write wins)
            let value = self.parse_value()?;
            map.insert(key, value);

            // Expect comma or closing brace
            match self.current_token()? {
                Token::Comma => {
                    self.advance();
                    // Trailing comma is not allowed in JSON
                    if matches!(self.current_token()?, Token::RightBrace) {
                        return Err(ParseError::new(
                            ErrorKind::UnexpectedCharacter,
                            self.current_pos,
                        ));
                    }
                }
                Token::RightBrace => {
                    self.advance();
                    break;
                }
                _ => {
                    return Err(ParseError::new(
                        ErrorKind::UnexpectedCharacter,
                        self.current_pos,
                    ));
                }
            }
        }

        self.depth -= 1;
        Ok(Value::Object(map))
    }

    /// Parse a JSON array.
    fn parse_array(&mut self) -> ParseResult<Value> {
        let open_pos = self.current_pos;
        self.depth += 1;
        if self.depth > self.limits.max_nesting_depth {
            return Err(ParseError::new(ErrorKind::NestingTooDeep, open_pos));
        }

        // Consume opening bracket
        self.advance();

        let mut arr = Vec::new();

        // Empty array
        if matches!(self.current_token()?, Token::RightBracket) {
            self.advance();
            self.depth -= 1;
            return Ok(Value::Array(arr));
        }

        loop {
            let value = self.parse_value()?;
            arr.push(value);

            // Expect comma or closing bracket
            match self.current_token()? {
                Token::Comma => {
                    self.advance();
                    // Trailing comma is not allowed in JSON
                    if matches!(self.current_token()?, Token::RightBracket) {
                        return Err(ParseError::new(
                            ErrorKind::UnexpectedCharacter,
                            self.current_pos,
                        ));
                    }
                }
                Token::RightBracket => {
                    self.advance();
                    break;
                }
                _ => {
                    return Err(ParseError::new(
                        ErrorKind::UnexpectedCharacter,
                        self.current_pos,
                    ));
                }
            }
        }

        self.depth -= 1;
        Ok(Value::Array(arr))
    }
}

/// Parse a JSON document with default limits.
///
/// Leading and trailing whitespace around the top-level value is
/// permitted; any other trailing content is a [`ErrorKind::TrailingCharacters`]
/// error.
pub fn parse(input: &str) -> ParseResult<Value> {
    parse_with_limits(input, Limits::default())
}

/// Parse a JSON document with custom limits.
pub fn parse_with_limits(input: &str, limits: Limits) -> ParseResult<Value> {
    let mut parser = Parser::new(input, limits);
    parser.parse()
}
