use crate::{
    ast::{
        Arg, Comparable, Comparator, Direction, FilterExpr, Literal, OrderByExpr, OrderTerm,
        Reference, Segment, Token,
    },
    lexer::{Lexer, SyntaxError},
};
use std::mem;

/// Recursive-descent parser for the filter and order-by languages.
///
/// Construct one per query string, then call [`parse_filter`] or
/// [`parse_order_by`] depending on which language the string is written in.
///
/// [`parse_filter`]: Parser::parse_filter
/// [`parse_order_by`]: Parser::parse_order_by
pub struct Parser {
    lexer: Lexer,
    current_token: Token,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Result<Self, SyntaxError> {
        let current_token = lexer.next_token()?;
        Ok(Parser {
            lexer,
            current_token,
        })
    }

    fn advance(&mut self) -> Result<(), SyntaxError> {
        self.current_token = self.lexer.next_token()?;
        Ok(())
    }

    /// Replaces the current token with `Eof` and returns it, advancing past
    /// it. Used where the token's payload is moved into the tree.
    fn take(&mut self) -> Result<Token, SyntaxError> {
        let token = mem::replace(&mut self.current_token, Token::Eof);
        self.advance()?;
        Ok(token)
    }

    fn check(&self, token: &Token) -> bool {
        mem::discriminant(&self.current_token) == mem::discriminant(token)
    }

    fn expect(&mut self, expected: Token) -> Result<(), SyntaxError> {
        if !self.check(&expected) {
            return Err(self.unexpected(&format!("expected {expected:?}")));
        }
        self.advance()
    }

    fn unexpected(&self, context: &str) -> SyntaxError {
        SyntaxError::new(
            format!("{context}, got {:?}", self.current_token),
            self.lexer.position(),
        )
    }

    //
    // Filter grammar
    //

    /// Parses a complete filter. An empty filter is `None`, which is
    /// distinct from any predicate at all.
    pub fn parse_filter(&mut self) -> Result<Option<FilterExpr>, SyntaxError> {
        if self.check(&Token::Eof) {
            return Ok(None);
        }
        let expr = self.parse_expression()?;
        self.expect(Token::Eof)?;
        Ok(Some(expr))
    }

    /// expression : sequence (AND sequence)*
    fn parse_expression(&mut self) -> Result<FilterExpr, SyntaxError> {
        let mut sequences = vec![self.parse_sequence()?];
        while self.check(&Token::And) {
            self.advance()?;
            sequences.push(self.parse_sequence()?);
        }
        Ok(Self::conjoin(sequences))
    }

    /// sequence : factor (factor)*
    ///
    /// Adjacency is implicit conjunction. A new factor begins at any token
    /// that can start a term; `AND`, `OR`, `)` and end of input all end the
    /// sequence.
    fn parse_sequence(&mut self) -> Result<FilterExpr, SyntaxError> {
        let mut factors = vec![self.parse_factor()?];
        while self.starts_term() {
            factors.push(self.parse_factor()?);
        }
        Ok(Self::conjoin(factors))
    }

    fn starts_term(&self) -> bool {
        matches!(
            self.current_token,
            Token::Identifier(_) | Token::Not | Token::Minus | Token::LParen
        )
    }

    /// factor : term (OR term)*
    fn parse_factor(&mut self) -> Result<FilterExpr, SyntaxError> {
        let mut terms = vec![self.parse_term()?];
        while self.check(&Token::Or) {
            self.advance()?;
            terms.push(self.parse_term()?);
        }
        if terms.len() == 1 {
            Ok(terms.pop().unwrap())
        } else {
            Ok(FilterExpr::Or(terms))
        }
    }

    /// term : [NOT | -] simple
    fn parse_term(&mut self) -> Result<FilterExpr, SyntaxError> {
        if self.check(&Token::Not) || self.check(&Token::Minus) {
            self.advance()?;
            let simple = self.parse_simple()?;
            return Ok(FilterExpr::Not(Box::new(simple)));
        }
        self.parse_simple()
    }

    /// simple : restriction | ( expression )
    fn parse_simple(&mut self) -> Result<FilterExpr, SyntaxError> {
        if self.check(&Token::LParen) {
            self.advance()?;
            let expr = self.parse_expression()?;
            self.expect(Token::RParen)?;
            return Ok(expr);
        }
        self.parse_restriction()
    }

    /// restriction : comparable [comparator arg]
    fn parse_restriction(&mut self) -> Result<FilterExpr, SyntaxError> {
        let comparable = self.parse_comparable()?;
        let comparison = match self.comparator() {
            Some(comparator) => {
                self.advance()?;
                Some((comparator, self.parse_arg()?))
            }
            None => None,
        };
        Ok(FilterExpr::Restriction {
            comparable,
            comparison,
        })
    }

    fn comparator(&self) -> Option<Comparator> {
        match self.current_token {
            Token::Equals => Some(Comparator::Equals),
            Token::NotEquals => Some(Comparator::NotEquals),
            Token::LessThan => Some(Comparator::LessThan),
            Token::LessEquals => Some(Comparator::LessEquals),
            Token::GreaterThan => Some(Comparator::GreaterThan),
            Token::GreaterEquals => Some(Comparator::GreaterEquals),
            Token::Has => Some(Comparator::Has),
            _ => None,
        }
    }

    /// comparable : member | function
    ///
    /// A function name must be a plain identifier; a dotted reference
    /// followed by `(` is malformed.
    fn parse_comparable(&mut self) -> Result<Comparable, SyntaxError> {
        let reference = self.parse_reference()?;

        if self.check(&Token::LParen) {
            if !reference.segments.is_empty() {
                return Err(self.unexpected("function names cannot be dotted"));
            }
            self.advance()?;
            let args = self.parse_arg_list()?;
            self.expect(Token::RParen)?;
            return Ok(Comparable::Function {
                name: reference.variable,
                args,
            });
        }

        Ok(Comparable::Member(reference))
    }

    /// reference : variable (.attribute | [arg])*
    fn parse_reference(&mut self) -> Result<Reference, SyntaxError> {
        let variable = self.parse_identifier()?;
        let mut segments = Vec::new();

        loop {
            if self.check(&Token::Dot) {
                self.advance()?;
                segments.push(Segment::Attribute(self.parse_identifier()?));
            } else if self.check(&Token::LBracket) {
                self.advance()?;
                let index = self.parse_arg()?;
                self.expect(Token::RBracket)?;
                segments.push(Segment::Index(index));
            } else {
                break;
            }
        }

        Ok(Reference { variable, segments })
    }

    fn parse_identifier(&mut self) -> Result<String, SyntaxError> {
        if !self.check(&Token::Identifier(String::new())) {
            return Err(self.unexpected("expected identifier"));
        }
        match self.take()? {
            Token::Identifier(name) => Ok(name),
            _ => unreachable!(),
        }
    }

    fn parse_arg_list(&mut self) -> Result<Vec<Arg>, SyntaxError> {
        let mut args = Vec::new();
        if self.check(&Token::RParen) {
            return Ok(args);
        }
        args.push(self.parse_arg()?);
        while self.check(&Token::Comma) {
            self.advance()?;
            args.push(self.parse_arg()?);
        }
        Ok(args)
    }

    /// arg : comparable | ( expression ) | literal
    fn parse_arg(&mut self) -> Result<Arg, SyntaxError> {
        match &self.current_token {
            Token::Identifier(_) => Ok(Arg::Comparable(self.parse_comparable()?)),
            Token::LParen => {
                self.advance()?;
                let expr = self.parse_expression()?;
                self.expect(Token::RParen)?;
                Ok(Arg::Composite(Box::new(expr)))
            }
            _ => Ok(Arg::Literal(self.parse_literal()?)),
        }
    }

    /// literal : [+ | -] number | boolean | string
    fn parse_literal(&mut self) -> Result<Literal, SyntaxError> {
        let negative = if self.check(&Token::Minus) {
            self.advance()?;
            true
        } else {
            if self.check(&Token::Plus) {
                self.advance()?;
            }
            false
        };

        match self.take()? {
            Token::Integer(n) => Ok(Literal::Integer(if negative { -n } else { n })),
            Token::Float(n) => Ok(Literal::Float(if negative { -n } else { n })),
            Token::Boolean(b) if !negative => Ok(Literal::Boolean(b)),
            Token::String(s) if !negative => Ok(Literal::String(s)),
            token => Err(SyntaxError::new(
                format!("expected literal, got {token:?}"),
                self.lexer.position(),
            )),
        }
    }

    fn conjoin(mut children: Vec<FilterExpr>) -> FilterExpr {
        if children.len() == 1 {
            children.pop().unwrap()
        } else {
            FilterExpr::And(children)
        }
    }

    //
    // Order-by grammar
    //

    /// Parses a complete order-by. An empty order-by is `None`, never an
    /// empty term list.
    pub fn parse_order_by(&mut self) -> Result<Option<OrderByExpr>, SyntaxError> {
        if self.check(&Token::Eof) {
            return Ok(None);
        }

        let mut terms = vec![self.parse_order_term()?];
        while self.check(&Token::Comma) {
            self.advance()?;
            terms.push(self.parse_order_term()?);
        }
        self.expect(Token::Eof)?;

        Ok(Some(OrderByExpr { terms }))
    }

    /// term : field [desc]
    ///
    /// `desc` is case-sensitive; any other trailing identifier is an error.
    fn parse_order_term(&mut self) -> Result<OrderTerm, SyntaxError> {
        let field = self.parse_reference()?;
        let direction = match &self.current_token {
            Token::Identifier(word) if word == "desc" => {
                self.advance()?;
                Direction::Descending
            }
            _ => Direction::Ascending,
        };
        Ok(OrderTerm { field, direction })
    }
}
