use pretty_assertions::assert_eq;

use super::precedence_test::{language, try_ast};
use crate::lexer::{Token, TokenKind};
use crate::parser::{
    DEFAULT_MAX_DEPTH, Node, OperatorEntry, OperatorTable, ParseErrorKind, Span, parse,
    parse_with_max_depth,
};
use crate::test_utils;

fn ast(source: &str) -> Node {
    try_ast(source).unwrap_or_else(|e| panic!("Expression parsing failed: {}\n{}", source, e))
}

fn error_kind(source: &str) -> ParseErrorKind {
    try_ast(source).unwrap_err().kind
}

#[test]
fn test_binary_chain_folds_left() {
    test_utils::init_test_logging();
    assert_eq!(
        ast("1+1-1+1-1"),
        Node::binary(
            "-",
            Node::binary(
                "+",
                Node::binary(
                    "-",
                    Node::binary("+", Node::condition("1"), Node::condition("1")),
                    Node::condition("1"),
                ),
                Node::condition("1"),
            ),
            Node::condition("1"),
        )
    );
}

#[test]
fn test_stacked_prefixes() {
    assert_eq!(
        ast("---5"),
        Node::unary(
            "-",
            Node::unary("-", Node::unary("-", Node::condition("5")))
        )
    );
}

#[test]
fn test_ternary_node_is_named_after_both_signs() {
    assert_eq!(
        ast("a ? 1 : b ? 2 : 3"),
        Node::ternary(
            "?:",
            Node::condition("a"),
            Node::condition("1"),
            Node::ternary(
                "?:",
                Node::condition("b"),
                Node::condition("2"),
                Node::condition("3"),
            ),
        )
    );
}

#[test]
fn test_method_chain() {
    let node = ast("$obj#m1()#m2()");
    assert_eq!(
        node,
        Node::method(
            "m2",
            Node::method("m1", Node::condition("obj"), vec![]),
            vec![]
        )
    );
    assert_eq!(node.to_string(), "obj.m1().m2()");
}

#[test]
fn test_method_arguments_stay_apart_from_context() {
    assert_eq!(
        ast("a#get(1, b + c)"),
        Node::method(
            "get",
            Node::condition("a"),
            vec![
                Node::condition("1"),
                Node::binary("+", Node::condition("b"), Node::condition("c")),
            ],
        )
    );
}

#[test]
fn test_function_calls() {
    assert_eq!(ast("max()"), Node::function("max", vec![]));
    assert_eq!(
        ast("max(1, min(2, 3))"),
        Node::function(
            "max",
            vec![
                Node::condition("1"),
                Node::function("min", vec![Node::condition("2"), Node::condition("3")]),
            ],
        )
    );
}

#[test]
fn test_variable_marker_yields_condition() {
    assert_eq!(ast("$max"), Node::condition("max"));
    assert_eq!(ast("$x + 1"), ast("x + 1"));
}

#[test]
fn test_empty_expression() {
    assert_eq!(error_kind(""), ParseErrorKind::EmptyExpression);
    assert_eq!(error_kind("   "), ParseErrorKind::EmptyExpression);
}

#[test]
fn test_missing_closing_group() {
    let err = try_ast("(a + b").unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::MissingClosingGroup {
            found: "end of input".to_string()
        }
    );
    assert_eq!(err.span, Span::new(6, 6));
    assert_eq!(err.source, "(a + b");
}

#[test]
fn test_function_without_arguments_group() {
    assert_eq!(
        error_kind("max + 1"),
        ParseErrorKind::ExpectedGroupOpen {
            callee: "max".to_string(),
            found: "operator '+'".to_string(),
        }
    );
}

#[test]
fn test_arguments_need_delimiters() {
    assert_eq!(
        error_kind("max(1 2)"),
        ParseErrorKind::ExpectedDelimiter {
            found: "condition '2'".to_string()
        }
    );
}

#[test]
fn test_ternary_close_expected() {
    let err = try_ast("a ? b c").unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::TernaryCloseExpected {
            expected: ":".to_string(),
            found: "condition 'c'".to_string(),
        }
    );
    assert_eq!(err.span, Span::new(6, 7));
}

#[test]
fn test_method_reference_needs_method() {
    let err = try_ast("a# m()").unwrap_err();
    // Only a method may follow the reference, so the space is not a token.
    assert_eq!(err.kind, ParseErrorKind::UnknownToken { found: " ".to_string() });

    let tokens = vec![
        Token::new(TokenKind::Condition, "a", 0),
        Token::new(TokenKind::MethodReference, "#", 1),
        Token::new(TokenKind::Condition, "b", 2),
        Token::end_of_input(3),
    ];
    let (_, operators) = language();
    assert_eq!(
        parse(&tokens, &operators).unwrap_err().kind,
        ParseErrorKind::MethodExpected {
            reference: "#".to_string(),
            found: "condition 'b'".to_string(),
        }
    );
}

#[test]
fn test_variable_marker_needs_condition() {
    let tokens = vec![
        Token::new(TokenKind::VariableMarker, "$", 0),
        Token::new(TokenKind::Operator, "+", 1),
        Token::end_of_input(2),
    ];
    let err = parse(&tokens, &OperatorTable::new()).unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::ConditionExpected {
            marker: "$".to_string(),
            found: "operator '+'".to_string(),
        }
    );
    assert_eq!(err.span, Span::new(1, 2));
}

#[test]
fn test_operator_without_operand() {
    let err = try_ast("a + * b").unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::UnknownCondition {
            found: "operator '*'".to_string()
        }
    );
    assert_eq!(err.span, Span::new(4, 5));
}

#[test]
fn test_trailing_input() {
    assert_eq!(
        error_kind("a b"),
        ParseErrorKind::TrailingInput {
            found: "condition 'b'".to_string()
        }
    );
    assert_eq!(
        error_kind("(a))"),
        ParseErrorKind::TrailingInput {
            found: "group close ')'".to_string()
        }
    );
}

#[test]
fn test_error_carries_reconstructed_source() {
    let err = try_ast("a  +   ?").unwrap_err();
    assert_eq!(err.source, "a  +   ?");
    assert_eq!(err.to_string().lines().last(), Some("       ^"));
}

#[test]
fn test_max_depth() {
    let (lexer, operators) = language();
    let tokens = lexer.analyze("((((a))))").unwrap();
    assert!(parse_with_max_depth(&tokens, &operators, 4).is_ok());

    let err = parse_with_max_depth(&tokens, &operators, 3).unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::MaxDepthExceeded {
            depth: 3,
            max_depth: 3
        }
    );
    assert_eq!(err.span, Span::new(3, 4));
}

#[test]
fn test_deep_prefix_chain_is_bounded() {
    let source = "-".repeat(600) + "a";
    assert!(matches!(
        error_kind(&source),
        ParseErrorKind::MaxDepthExceeded { .. }
    ));
}

#[test]
fn test_chain_height_counts_toward_depth() {
    let (lexer, operators) = language();
    let tokens = lexer.analyze("a+b+c").unwrap();
    assert!(parse_with_max_depth(&tokens, &operators, 3).is_ok());

    let err = parse_with_max_depth(&tokens, &operators, 2).unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::MaxDepthExceeded {
            depth: 3,
            max_depth: 2
        }
    );
    assert_eq!(err.span, Span::new(3, 4));
}

#[test]
fn test_long_flat_chain_is_rejected() {
    let source = format!("1{}", "+1".repeat(200_000));
    assert!(matches!(
        error_kind(&source),
        ParseErrorKind::MaxDepthExceeded { .. }
    ));

    let method_chain = format!("a{}", "#m()".repeat(1_000));
    assert!(matches!(
        error_kind(&method_chain),
        ParseErrorKind::MaxDepthExceeded { .. }
    ));
}

#[test]
fn test_nesting_cost_does_not_grow_with_groups() {
    let (lexer, mut operators) = language();
    for i in 0..100 {
        operators
            .add_group(vec![OperatorEntry::binary(format!("op{i}"))])
            .unwrap();
    }
    let source = format!(
        "{}a{}",
        "(".repeat(DEFAULT_MAX_DEPTH),
        ")".repeat(DEFAULT_MAX_DEPTH)
    );
    let tokens = lexer.analyze(&source).unwrap();
    let parsed = std::thread::Builder::new()
        .stack_size(2 * 1024 * 1024)
        .spawn(move || parse(&tokens, &operators))
        .unwrap()
        .join()
        .unwrap();
    assert_eq!(parsed.unwrap(), Node::condition("a"));
}
