use crate::ast::{Document, Node, Prop, Value};
use crate::error::ParseError;
use crate::lexer::{Lexer, Token, TokenWithPos};

// ── Parser ────────────────────────────────────────────────────────────────

pub struct Parser {
    tokens: Vec<TokenWithPos>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<TokenWithPos>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn current_pos(&self) -> (usize, usize) {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map(|t| (t.line, t.col))
            .unwrap_or((1, 1))
    }

    fn peek(&self) -> &Token {
        self.tokens.get(self.pos).map(|t| &t.token).unwrap_or(&Token::Eof)
    }

    fn peek_ahead(&self, offset: usize) -> &Token {
        self.tokens.get(self.pos + offset).map(|t| &t.token).unwrap_or(&Token::Eof)
    }

    fn advance(&mut self) -> Token {
        let tok = self.peek().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn err(&self, msg: impl Into<String>) -> ParseError {
        let (line, col) = self.current_pos();
        ParseError::new(msg, line, col)
    }

    fn expect_ident(&mut self) -> Result<String, ParseError> {
        match self.peek() {
            Token::Ident(s) => {
                let s = s.clone();
                self.advance();
                Ok(s)
            }
            tok => Err(self.err(format!("expected identifier, got {tok:?}"))),
        }
    }

    // ── Document ──────────────────────────────────────────────────────────

    pub fn parse_document(&mut self) -> Result<Document, ParseError> {
        let mut nodes = Vec::new();
        while self.peek() != &Token::Eof {
            nodes.push(self.parse_node()?);
        }
        if nodes.is_empty() {
            return Err(self.err("empty theme document"));
        }
        Ok(Document { nodes })
    }

    // ── Node ──────────────────────────────────────────────────────────────

    fn parse_node(&mut self) -> Result<Node, ParseError> {
        let (line, _) = self.current_pos();
        let kind = self.expect_ident()?;

        let name = match self.peek() {
            Token::Str(s) => {
                let s = s.clone();
                self.advance();
                Some(s)
            }
            _ => None,
        };

        let (props, children) = if self.peek() == &Token::LBrace {
            self.parse_block()?
        } else {
            (Vec::new(), Vec::new())
        };

        Ok(Node { kind, name, props, children, line })
    }

    // ── Block ─────────────────────────────────────────────────────────────

    /// Parses `{ item* }`. `Ident ":"` starts a property, any other `Ident`
    /// starts a child node.
    fn parse_block(&mut self) -> Result<(Vec<Prop>, Vec<Node>), ParseError> {
        self.advance(); // `{`
        let mut props = Vec::new();
        let mut children = Vec::new();

        loop {
            match self.peek() {
                Token::RBrace => {
                    self.advance();
                    break;
                }
                Token::Eof => return Err(self.err("unclosed '{' block")),
                Token::Ident(_) if self.peek_ahead(1) == &Token::Colon => {
                    props.push(self.parse_prop()?);
                }
                Token::Ident(_) => children.push(self.parse_node()?),
                tok => {
                    return Err(self.err(format!(
                        "unexpected {tok:?} inside block; expected `key: value` or a node"
                    )));
                }
            }
        }

        Ok((props, children))
    }

    fn parse_prop(&mut self) -> Result<Prop, ParseError> {
        let (line, _) = self.current_pos();
        let key = self.expect_ident()?;
        self.advance(); // `:`
        let value = self.parse_value()?;
        Ok(Prop { key, value, line })
    }

    fn parse_value(&mut self) -> Result<Value, ParseError> {
        let value = match self.peek() {
            Token::Str(s) => Value::Str(s.clone()),
            Token::Number(n) => Value::Number(*n),
            Token::Color(c) => Value::Color(*c),
            Token::Ident(s) => Value::Ident(s.clone()),
            tok => return Err(self.err(format!("expected a value, got {tok:?}"))),
        };
        self.advance();
        Ok(value)
    }
}

// ── Public parse entry point ──────────────────────────────────────────────

/// Parses a `.gtheme` source string into a [`Document`].
pub fn parse_str(src: &str) -> Result<Document, ParseError> {
    let tokens = Lexer::new(src).tokenize()?;
    Parser::new(tokens).parse_document()
}
