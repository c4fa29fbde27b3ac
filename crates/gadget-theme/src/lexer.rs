use crate::error::ParseError;

// ── Token ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Ident(String),
    Str(String),
    Number(f32),
    /// Straight-alpha RGBA bytes parsed from `#rrggbb` or `#rrggbbaa`.
    Color([u8; 4]),
    Colon,
    LBrace,
    RBrace,
    Eof,
}

/// A token plus the 1-based position of its first character.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenWithPos {
    pub token: Token,
    pub line: usize,
    pub col: usize,
}

// ── Lexer ─────────────────────────────────────────────────────────────────

pub struct Lexer<'s> {
    src: &'s str,
    pos: usize,
    line: usize,
    col: usize,
}

impl<'s> Lexer<'s> {
    pub fn new(src: &'s str) -> Self {
        Self { src, pos: 0, line: 1, col: 1 }
    }

    pub fn tokenize(mut self) -> Result<Vec<TokenWithPos>, ParseError> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace_and_comments();
            let (line, col) = (self.line, self.col);
            let token = self.next_token()?;
            let eof = token == Token::Eof;
            tokens.push(TokenWithPos { token, line, col });
            if eof {
                break;
            }
        }
        Ok(tokens)
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.src[self.pos..].chars().next()?;
        self.pos += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    fn err(&self, msg: impl Into<String>) -> ParseError {
        ParseError::new(msg, self.line, self.col)
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            while matches!(self.peek(), Some(c) if c.is_whitespace()) {
                self.advance();
            }
            let rest = &self.src[self.pos..];
            if rest.starts_with("//") {
                while !matches!(self.peek(), None | Some('\n')) {
                    self.advance();
                }
            } else if rest.starts_with("/*") {
                self.advance();
                self.advance();
                loop {
                    if self.src[self.pos..].starts_with("*/") {
                        self.advance();
                        self.advance();
                        break;
                    }
                    if self.advance().is_none() {
                        break;
                    }
                }
            } else {
                break;
            }
        }
    }

    fn next_token(&mut self) -> Result<Token, ParseError> {
        let Some(ch) = self.peek() else {
            return Ok(Token::Eof);
        };

        match ch {
            ':' => { self.advance(); Ok(Token::Colon) }
            '{' => { self.advance(); Ok(Token::LBrace) }
            '}' => { self.advance(); Ok(Token::RBrace) }
            '"' => self.lex_string(),
            '#' => self.lex_color(),
            c if c.is_ascii_digit() || c == '-' => self.lex_number(),
            c if c.is_alphabetic() || c == '_' => Ok(self.lex_ident()),
            other => Err(self.err(format!("unexpected character {other:?}"))),
        }
    }

    fn lex_string(&mut self) -> Result<Token, ParseError> {
        self.advance(); // opening quote
        let mut s = String::new();
        loop {
            match self.advance() {
                None | Some('\n') => return Err(self.err("unterminated string literal")),
                Some('"') => break,
                Some('\\') => match self.advance() {
                    Some('n') => s.push('\n'),
                    Some('t') => s.push('\t'),
                    Some(c) => s.push(c),
                    None => return Err(self.err("unterminated escape sequence")),
                },
                Some(c) => s.push(c),
            }
        }
        Ok(Token::Str(s))
    }

    fn lex_color(&mut self) -> Result<Token, ParseError> {
        self.advance(); // `#`
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_hexdigit()) {
            self.advance();
        }
        let hex = &self.src[start..self.pos];
        if hex.len() != 6 && hex.len() != 8 {
            return Err(self.err(format!(
                "color literal must be #rrggbb or #rrggbbaa, got {} digits",
                hex.len()
            )));
        }

        let mut rgba = [0u8, 0, 0, 255];
        for (i, channel) in rgba.iter_mut().enumerate().take(hex.len() / 2) {
            *channel = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16)
                .map_err(|_| self.err(format!("invalid color literal #{hex}")))?;
        }
        Ok(Token::Color(rgba))
    }

    fn lex_number(&mut self) -> Result<Token, ParseError> {
        let start = self.pos;
        if self.peek() == Some('-') {
            self.advance();
        }
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.advance();
        }
        if self.peek() == Some('.') {
            self.advance();
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                self.advance();
            }
        }
        let s = &self.src[start..self.pos];
        s.parse::<f32>()
            .map(Token::Number)
            .map_err(|_| self.err(format!("invalid number {s:?}")))
    }

    fn lex_ident(&mut self) -> Token {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_') {
            self.advance();
        }
        Token::Ident(self.src[start..self.pos].to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(src: &str) -> Vec<Token> {
        Lexer::new(src).tokenize().unwrap().into_iter().map(|t| t.token).collect()
    }

    #[test]
    fn lexes_node_with_props() {
        assert_eq!(
            tokens(r#"Part "time_text" { size: 44 }"#),
            vec![
                Token::Ident("Part".into()),
                Token::Str("time_text".into()),
                Token::LBrace,
                Token::Ident("size".into()),
                Token::Colon,
                Token::Number(44.0),
                Token::RBrace,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn six_digit_color_is_opaque() {
        assert_eq!(tokens("#102030"), vec![Token::Color([0x10, 0x20, 0x30, 0xff]), Token::Eof]);
    }

    #[test]
    fn eight_digit_color_keeps_alpha() {
        assert_eq!(tokens("#1e1e24cc"), vec![Token::Color([0x1e, 0x1e, 0x24, 0xcc]), Token::Eof]);
    }

    #[test]
    fn tracks_line_and_column() {
        let toks = Lexer::new("// header\n  Theme").tokenize().unwrap();
        assert_eq!((toks[0].line, toks[0].col), (2, 3));
    }

    #[test]
    fn error_reports_position() {
        let err = Lexer::new("Theme {\n  x: $").tokenize().unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(err.col, 6);
    }
}
