//! Recursive-descent parser over the token stream.
//!
//! One method per grammar production, each operating on the lexer's
//! single current token. Values are built through a [`ValueFactory`];
//! the parser itself stores nothing but the lexer. The first syntax
//! error aborts parsing: partially built containers are owned by the
//! call frames and dropped as the error propagates, so no partial tree
//! survives a failure.

use crate::{
    error::ParseError,
    factory::ValueFactory,
    lexer::{Lexer, Token},
    stream::ByteSource,
};

pub(crate) struct Parser<'f, S, F> {
    lex: Lexer<S>,
    factory: &'f F,
}

impl<'f, S: ByteSource, F: ValueFactory> Parser<'f, S, F> {
    pub(crate) fn new(source: S, factory: &'f F) -> Self {
        Self {
            lex: Lexer::new(source),
            factory,
        }
    }

    /// Parses a whole document: a root container followed by end of
    /// input.
    pub(crate) fn document(mut self) -> Result<F::Value, ParseError> {
        self.lex.scan();
        if !matches!(self.lex.token, Token::LeftBrace | Token::LeftBracket) {
            return Err(self.error("'[' or '{' expected"));
        }
        let root = self.value()?;

        self.lex.scan();
        if !matches!(self.lex.token, Token::Eof) {
            return Err(self.error("end of file expected"));
        }
        Ok(root)
    }

    /// Builds the value for the current token.
    fn value(&mut self) -> Result<F::Value, ParseError> {
        match self.lex.token {
            Token::String(ref s) => Ok(self.factory.new_string(s)),
            Token::Integer(n) => Ok(self.factory.new_integer(n)),
            Token::Real(n) => Ok(self.factory.new_real(n)),
            Token::True => Ok(self.factory.new_bool(true)),
            Token::False => Ok(self.factory.new_bool(false)),
            Token::Null => Ok(self.factory.new_null()),
            Token::LeftBrace => self.object(),
            Token::LeftBracket => self.array(),
            Token::Invalid => Err(self.error("invalid token")),
            _ => Err(self.error("unexpected token")),
        }
    }

    /// Parses the members of an object, `{` already consumed.
    fn object(&mut self) -> Result<F::Value, ParseError> {
        let mut object = self.factory.new_object();

        self.lex.scan();
        if matches!(self.lex.token, Token::RightBrace) {
            return Ok(self.factory.from_object(object));
        }

        loop {
            let key = match self.lex.token {
                // The payload is gone once the colon is scanned, so the
                // key is copied out here.
                Token::String(ref s) => s.clone(),
                _ => return Err(self.error("string or '}' expected")),
            };

            self.lex.scan();
            if !matches!(self.lex.token, Token::Colon) {
                return Err(self.error("':' expected"));
            }

            self.lex.scan();
            let value = self.value()?;
            self.factory.set_member(&mut object, &key, value);

            self.lex.scan();
            if !matches!(self.lex.token, Token::Comma) {
                break;
            }
            self.lex.scan();
        }

        if !matches!(self.lex.token, Token::RightBrace) {
            return Err(self.error("'}' expected"));
        }
        Ok(self.factory.from_object(object))
    }

    /// Parses the elements of an array, `[` already consumed.
    fn array(&mut self) -> Result<F::Value, ParseError> {
        let mut array = self.factory.new_array();

        self.lex.scan();
        if matches!(self.lex.token, Token::RightBracket) {
            return Ok(self.factory.from_array(array));
        }

        // Stopping at end of input keeps a truncated array on the
        // "']' expected" path below.
        while !matches!(self.lex.token, Token::Eof) {
            let element = self.value()?;
            self.factory.append_element(&mut array, element);

            self.lex.scan();
            if !matches!(self.lex.token, Token::Comma) {
                break;
            }
            self.lex.scan();
        }

        if !matches!(self.lex.token, Token::RightBracket) {
            return Err(self.error("']' expected"));
        }
        Ok(self.factory.from_array(array))
    }

    fn error(&self, msg: &str) -> ParseError {
        ParseError::at(self.lex.line, self.lex.raw_text(), msg)
    }
}
