// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! DOT tokenizer.
use std::borrow::Cow;

use crate::error::DotError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TokenKind<'a> {
    /// Identifier, numeral, quoted string or HTML string.
    Id { text: Cow<'a, str>, quoted: bool },
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Semi,
    Comma,
    Colon,
    Equals,
    Plus,
    /// `->`
    DirectedEdge,
    /// `--`
    UndirectedEdge,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token<'a> {
    pub(crate) kind: TokenKind<'a>,
    pub(crate) line: usize,
    pub(crate) column: usize,
}

/// Tokenized input plus the position just past the last character.
#[derive(Debug)]
pub(crate) struct Tokens<'a> {
    pub(crate) tokens: Vec<Token<'a>>,
    pub(crate) end: (usize, usize),
}

pub(crate) fn tokenize(src: &str) -> Result<Tokens<'_>, DotError> {
    let mut lexer = Lexer::new(src);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token()? {
        tokens.push(token);
    }
    Ok(Tokens {
        tokens,
        end: (lexer.line, lexer.column),
    })
}

struct Lexer<'a> {
    src: &'a str,
    pos: usize,
    line: usize,
    column: usize,
    /// Only whitespace seen since the last newline (`#` lines are discarded there).
    line_start: bool,
}

fn is_id_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

fn is_id_continue(c: char) -> bool {
    is_id_start(c) || c.is_ascii_digit()
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            line: 1,
            column: 1,
            line_start: true,
        }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        let mut chars = self.src[self.pos..].chars();
        chars.next();
        chars.next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
            self.line_start = true;
        } else {
            self.column += 1;
            if !c.is_whitespace() {
                self.line_start = false;
            }
        }
        Some(c)
    }

    fn skip_line(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.bump();
        }
    }

    fn skip_trivia(&mut self) -> Result<(), DotError> {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                Some('#') if self.line_start => self.skip_line(),
                Some('/') if self.peek_second() == Some('/') => self.skip_line(),
                Some('/') if self.peek_second() == Some('*') => {
                    let (line, column) = (self.line, self.column);
                    self.bump();
                    self.bump();
                    loop {
                        match self.bump() {
                            None => {
                                return Err(DotError::new(line, column, "unterminated comment"))
                            }
                            Some('*') if self.peek() == Some('/') => {
                                self.bump();
                                break;
                            }
                            Some(_) => {}
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn next_token(&mut self) -> Result<Option<Token<'a>>, DotError> {
        self.skip_trivia()?;
        let (line, column) = (self.line, self.column);
        let Some(c) = self.peek() else {
            return Ok(None);
        };
        let single = match c {
            '{' => Some(TokenKind::LBrace),
            '}' => Some(TokenKind::RBrace),
            '[' => Some(TokenKind::LBracket),
            ']' => Some(TokenKind::RBracket),
            ';' => Some(TokenKind::Semi),
            ',' => Some(TokenKind::Comma),
            ':' => Some(TokenKind::Colon),
            '=' => Some(TokenKind::Equals),
            '+' => Some(TokenKind::Plus),
            _ => None,
        };
        let kind = if let Some(kind) = single {
            self.bump();
            kind
        } else {
            match c {
                '-' => match self.peek_second() {
                    Some('>') => {
                        self.bump();
                        self.bump();
                        TokenKind::DirectedEdge
                    }
                    Some('-') => {
                        self.bump();
                        self.bump();
                        TokenKind::UndirectedEdge
                    }
                    Some(d) if d.is_ascii_digit() || d == '.' => self.numeral(line, column)?,
                    _ => {
                        return Err(DotError::new(
                            line,
                            column,
                            "expected `->`, `--` or a number after `-`",
                        ))
                    }
                },
                '"' => self.quoted(line, column)?,
                '<' => self.html(line, column)?,
                c if c.is_ascii_digit() || c == '.' => self.numeral(line, column)?,
                c if is_id_start(c) => self.identifier(),
                other => {
                    return Err(DotError::new(
                        line,
                        column,
                        format!("unexpected character {other:?}"),
                    ))
                }
            }
        };
        Ok(Some(Token { kind, line, column }))
    }

    fn identifier(&mut self) -> TokenKind<'a> {
        let start = self.pos;
        while self.peek().is_some_and(is_id_continue) {
            self.bump();
        }
        TokenKind::Id {
            text: Cow::Borrowed(&self.src[start..self.pos]),
            quoted: false,
        }
    }

    fn numeral(&mut self, line: usize, column: usize) -> Result<TokenKind<'a>, DotError> {
        let start = self.pos;
        if self.peek() == Some('-') {
            self.bump();
        }
        let mut digits = 0usize;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
            digits += 1;
        }
        if self.peek() == Some('.') {
            self.bump();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.bump();
                digits += 1;
            }
        }
        if digits == 0 {
            return Err(DotError::new(line, column, "malformed number"));
        }
        Ok(TokenKind::Id {
            text: Cow::Borrowed(&self.src[start..self.pos]),
            quoted: false,
        })
    }

    fn quoted(&mut self, line: usize, column: usize) -> Result<TokenKind<'a>, DotError> {
        self.bump();
        let mut text = String::new();
        loop {
            match self.bump() {
                None => return Err(DotError::new(line, column, "unterminated string")),
                Some('"') => break,
                Some('\\') => match self.peek() {
                    Some('"') => {
                        self.bump();
                        text.push('"');
                    }
                    Some('\n') => {
                        self.bump();
                    }
                    Some('\r') if self.peek_second() == Some('\n') => {
                        self.bump();
                        self.bump();
                    }
                    _ => text.push('\\'),
                },
                Some(c) => text.push(c),
            }
        }
        Ok(TokenKind::Id {
            text: Cow::Owned(text),
            quoted: true,
        })
    }

    fn html(&mut self, line: usize, column: usize) -> Result<TokenKind<'a>, DotError> {
        self.bump();
        let start = self.pos;
        let mut depth = 1usize;
        loop {
            match self.bump() {
                None => return Err(DotError::new(line, column, "unterminated HTML string")),
                Some('<') => depth += 1,
                Some('>') => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                Some(_) => {}
            }
        }
        Ok(TokenKind::Id {
            text: Cow::Borrowed(&self.src[start..self.pos - 1]),
            quoted: true,
        })
    }
}
