//! Precedence-climbing parser over a caller-supplied operator table.

use tracing::debug;

use crate::lexer::{Token, TokenKind};
use crate::parser::{Node, OperatorTable, ParseError, ParseErrorKind, PrecedenceGroup, Span};

/// Default maximum nesting depth for parsing.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Parse a token sequence with the default nesting limit.
pub fn parse(tokens: &[Token], operators: &OperatorTable) -> Result<Node, ParseError> {
    parse_with_max_depth(tokens, operators, DEFAULT_MAX_DEPTH)
}

/// Parse a token sequence with a custom nesting limit.
///
/// Nesting counts groups, call arguments, stacked prefix operators and
/// ternary branches. The height of the resulting tree is held to the same
/// limit, so a long operator chain fails just like deep nesting does.
pub fn parse_with_max_depth(
    tokens: &[Token],
    operators: &OperatorTable,
    max_depth: usize,
) -> Result<Node, ParseError> {
    Parser::new(tokens, operators, max_depth).root()
}

/// Rebuilds the source line from token positions, padding gaps with spaces.
fn source_line(tokens: &[Token]) -> String {
    let mut line = String::new();
    for token in tokens {
        while line.len() < token.position {
            line.push(' ');
        }
        line.push_str(&token.text);
    }
    line
}

/// A parsed subtree and its height in nodes.
struct Parsed {
    node: Node,
    height: usize,
}

impl Parsed {
    fn leaf(node: Node) -> Self {
        Self { node, height: 1 }
    }
}

struct Parser<'a> {
    /// Non-skip tokens, always terminated by an end-of-input token.
    tokens: Vec<Token>,
    cursor: usize,
    source: String,
    operators: &'a OperatorTable,
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &[Token], operators: &'a OperatorTable, max_depth: usize) -> Self {
        let source = source_line(tokens);
        let mut filtered: Vec<Token> = tokens
            .iter()
            .filter(|token| token.kind != TokenKind::Skip)
            .cloned()
            .collect();
        if filtered.last().is_none_or(|t| t.kind != TokenKind::EndOfInput) {
            filtered.push(Token::end_of_input(source.len()));
        }
        Self {
            tokens: filtered,
            cursor: 0,
            source,
            operators,
            depth: 0,
            max_depth,
        }
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.cursor]
    }

    /// Consumes the current token. Stays on end of input once reached.
    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.cursor + 1 < self.tokens.len() {
            self.cursor += 1;
        }
        token
    }

    fn error(&self, kind: ParseErrorKind, span: Span) -> ParseError {
        ParseError::new(kind, self.source.clone(), span)
    }

    fn too_deep(&self, depth: usize, span: Span) -> ParseError {
        self.error(
            ParseErrorKind::MaxDepthExceeded {
                depth,
                max_depth: self.max_depth,
            },
            span,
        )
    }

    /// Runs `f` one nesting level deeper.
    fn nested<T>(
        &mut self,
        token: &Token,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= self.max_depth {
            return Err(self.too_deep(self.depth, token.span()));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Builds a node over children of height `children`, failing if the
    /// tree would grow past the depth limit.
    fn wrap(&self, span: Span, children: usize, node: Node) -> Result<Parsed, ParseError> {
        let height = children + 1;
        if height > self.max_depth {
            return Err(self.too_deep(height, span));
        }
        Ok(Parsed { node, height })
    }

    fn root(&mut self) -> Result<Node, ParseError> {
        if self.peek().kind == TokenKind::EndOfInput {
            return Err(self.error(ParseErrorKind::EmptyExpression, self.peek().span()));
        }
        let parsed = self.expression()?;
        let next = self.peek();
        if next.kind != TokenKind::EndOfInput {
            return Err(self.error(
                ParseErrorKind::TrailingInput {
                    found: next.describe(),
                },
                next.span(),
            ));
        }
        debug!(
            nodes = parsed.node.size(),
            height = parsed.height,
            tree = %parsed.node,
            "compiled expression"
        );
        Ok(parsed.node)
    }

    fn expression(&mut self) -> Result<Parsed, ParseError> {
        self.climb(self.operators.len())
    }

    /// Parses an expression using only groups below `limit`.
    ///
    /// Operators are folded in a loop. Only operands recurse, so a nested
    /// operand costs the same few frames however many groups the table has.
    /// After a group has been applied, only that group and looser ones may
    /// continue the expression.
    fn climb(&mut self, limit: usize) -> Result<Parsed, ParseError> {
        let operators = self.operators;
        let (mut left, mut floor) = match self.prefix_group(limit) {
            Some(index) => {
                let token = self.advance();
                let operand = self.nested(&token, |p| p.climb(index + 1))?;
                let node = Node::unary(token.text.clone(), operand.node);
                (self.wrap(token.span(), operand.height, node)?, index + 1)
            }
            None => (self.method_chain()?, 0),
        };

        while let Some(index) = self.infix_group(floor, limit) {
            let token = self.advance();
            match operators.get(index) {
                Some(PrecedenceGroup::Binary(_)) => {
                    let right = self.climb(index)?;
                    let height = left.height.max(right.height);
                    let node = Node::binary(token.text.clone(), left.node, right.node);
                    left = self.wrap(token.span(), height, node)?;
                    floor = index;
                }
                Some(PrecedenceGroup::Ternary { open, close }) => {
                    left = self.ternary(left, &token, index, open, close)?;
                    floor = index + 1;
                }
                Some(PrecedenceGroup::Unary(_)) | None => break,
            }
        }
        Ok(left)
    }

    /// The loosest unary group below `limit` holding the current sign.
    fn prefix_group(&self, limit: usize) -> Option<usize> {
        let token = self.peek();
        if token.kind != TokenKind::Operator {
            return None;
        }
        let groups = self.operators.groups();
        groups[..limit.min(groups.len())].iter().rposition(|group| {
            matches!(group, PrecedenceGroup::Unary(signs) if signs.contains(&token.text))
        })
    }

    /// The tightest binary or ternary group in `floor..limit` that the
    /// current sign continues.
    fn infix_group(&self, floor: usize, limit: usize) -> Option<usize> {
        let token = self.peek();
        if token.kind != TokenKind::Operator {
            return None;
        }
        (floor..limit).find(|&index| match self.operators.get(index) {
            Some(PrecedenceGroup::Binary(signs)) => signs.contains(&token.text),
            Some(PrecedenceGroup::Ternary { open, .. }) => *open == token.text,
            _ => false,
        })
    }

    /// The branches of `condition open then close else`, after `open` has
    /// been consumed. Both branches may hold another ternary of this group.
    fn ternary(
        &mut self,
        condition: Parsed,
        open_token: &Token,
        index: usize,
        open: &str,
        close: &str,
    ) -> Result<Parsed, ParseError> {
        let then_branch = self.nested(open_token, |p| p.climb(index + 1))?;

        let separator = self.advance();
        if !separator.is(TokenKind::Operator, close) {
            return Err(self.error(
                ParseErrorKind::TernaryCloseExpected {
                    expected: close.to_string(),
                    found: separator.describe(),
                },
                separator.span(),
            ));
        }
        let else_branch = self.nested(&separator, |p| p.climb(index + 1))?;
        let height = condition
            .height
            .max(then_branch.height)
            .max(else_branch.height);
        let node = Node::ternary(
            format!("{open}{close}"),
            condition.node,
            then_branch.node,
            else_branch.node,
        );
        self.wrap(open_token.span(), height, node)
    }

    /// An operand followed by any number of `#name(args)` calls, applied
    /// left to right.
    fn method_chain(&mut self) -> Result<Parsed, ParseError> {
        let mut parsed = self.factor()?;
        while self.peek().kind == TokenKind::MethodReference {
            let reference = self.advance();
            let method = self.advance();
            if method.kind != TokenKind::Method {
                return Err(self.error(
                    ParseErrorKind::MethodExpected {
                        reference: reference.text,
                        found: method.describe(),
                    },
                    method.span(),
                ));
            }
            let (args, height) = self.arguments(&method)?;
            let height = height.max(parsed.height);
            let span = method.span();
            parsed = self.wrap(span, height, Node::method(method.text, parsed.node, args))?;
        }
        Ok(parsed)
    }

    fn factor(&mut self) -> Result<Parsed, ParseError> {
        let token = self.advance();
        match token.kind {
            TokenKind::Function => {
                let (args, height) = self.arguments(&token)?;
                let span = token.span();
                self.wrap(span, height, Node::function(token.text, args))
            }
            TokenKind::Condition => Ok(Parsed::leaf(Node::condition(token.text))),
            TokenKind::VariableMarker => {
                let next = self.advance();
                if next.kind != TokenKind::Condition {
                    return Err(self.error(
                        ParseErrorKind::ConditionExpected {
                            marker: token.text,
                            found: next.describe(),
                        },
                        next.span(),
                    ));
                }
                Ok(Parsed::leaf(Node::condition(next.text)))
            }
            TokenKind::GroupOpen => {
                let inner = self.nested(&token, |p| p.expression())?;
                let close = self.advance();
                if close.kind != TokenKind::GroupClose {
                    return Err(self.error(
                        ParseErrorKind::MissingClosingGroup {
                            found: close.describe(),
                        },
                        close.span(),
                    ));
                }
                Ok(inner)
            }
            _ => Err(self.error(
                ParseErrorKind::UnknownCondition {
                    found: token.describe(),
                },
                token.span(),
            )),
        }
    }

    /// `( expr , expr ... )` after a function or method name. Returns the
    /// arguments and the height of the tallest one.
    fn arguments(&mut self, callee: &Token) -> Result<(Vec<Node>, usize), ParseError> {
        let open = self.advance();
        if open.kind != TokenKind::GroupOpen {
            return Err(self.error(
                ParseErrorKind::ExpectedGroupOpen {
                    callee: callee.text.clone(),
                    found: open.describe(),
                },
                open.span(),
            ));
        }

        let mut args = Vec::new();
        let mut height = 0;
        if self.peek().kind == TokenKind::GroupClose {
            self.advance();
            return Ok((args, height));
        }
        loop {
            let arg = self.nested(&open, |p| p.expression())?;
            height = height.max(arg.height);
            args.push(arg.node);
            let next = self.advance();
            match next.kind {
                TokenKind::Delimiter => continue,
                TokenKind::GroupClose => return Ok((args, height)),
                _ => {
                    return Err(self.error(
                        ParseErrorKind::ExpectedDelimiter {
                            found: next.describe(),
                        },
                        next.span(),
                    ));
                }
            }
        }
    }
}
