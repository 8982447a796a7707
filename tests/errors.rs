use exprkit::{Error, Severity, Span, render_error_to_string_no_color};
use exprkit::evaluator::ResourceExceededError;
use exprkit::{CompilationOptions, Dynamic, ExecutionOptions, Node};
use pretty_assertions::assert_eq;

mod cases;

use cases::{ENGINE, eval};

/// Compiles `source` and returns the single diagnostic's code and span.
fn diagnostic(source: &str) -> (String, Span) {
    match ENGINE.compile(source).unwrap_err() {
        Error::Compilation {
            diagnostics,
            source: reported,
        } => {
            assert_eq!(reported, source);
            assert_eq!(diagnostics.len(), 1);
            assert_eq!(diagnostics[0].severity, Severity::Error);
            let diag = &diagnostics[0];
            (diag.code.clone().unwrap_or_default(), diag.span.clone())
        }
        other => panic!("expected a compilation error, got {other:?}"),
    }
}

#[test]
fn test_unknown_token() {
    assert_eq!(diagnostic("1 @ 2"), ("P001".to_string(), Span::new(2, 3)));
}

#[test]
fn test_empty_expression() {
    assert_eq!(diagnostic("   ").0, "P002");
    assert_eq!(diagnostic("").0, "P002");
}

#[test]
fn test_unclosed_group() {
    assert_eq!(diagnostic("(1 + 2").0, "P003");
}

#[test]
fn test_unfinished_argument_list() {
    assert_eq!(diagnostic("max(1, 2").0, "P005");
    assert_eq!(diagnostic("max(1 2)").0, "P005");
}

#[test]
fn test_function_needs_group() {
    assert_eq!(diagnostic("abs 1").0, "P004");
}

#[test]
fn test_ternary_needs_close() {
    assert_eq!(diagnostic("true ? 1 2").0, "P006");
}

#[test]
fn test_marker_needs_condition() {
    assert_eq!(diagnostic("$(1)").0, "P001");
}

#[test]
fn test_trailing_input() {
    assert_eq!(diagnostic("1 2"), ("P010".to_string(), Span::new(2, 3)));
    assert_eq!(diagnostic("(1))").0, "P010");
}

#[test]
fn test_missing_operand() {
    let (code, span) = diagnostic("1 +");
    assert_eq!(code, "P009");
    assert_eq!(span, Span::new(3, 3));
}

#[test]
fn test_compile_depth_limit() {
    let deep = format!("{}1{}", "(".repeat(20), ")".repeat(20));
    assert!(ENGINE.compile(&deep).is_ok());

    let options = CompilationOptions { max_depth: 10 };
    match ENGINE.compile_with_options(&deep, &options).unwrap_err() {
        Error::Compilation { diagnostics, .. } => {
            assert_eq!(diagnostics[0].code.as_deref(), Some("P011"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

/// Runs `f` on a thread with the default test stack size.
fn on_small_stack<T: Send + 'static>(f: impl FnOnce() -> T + Send + 'static) -> T {
    std::thread::Builder::new()
        .stack_size(2 * 1024 * 1024)
        .spawn(f)
        .unwrap()
        .join()
        .unwrap()
}

#[test]
fn test_default_limits_fit_a_small_stack() {
    let max = CompilationOptions::default().max_depth;
    let nested = format!("{}1{}", "(".repeat(max), ")".repeat(max));
    let chain = format!("1{}", " + 1".repeat(max - 1));
    let results = on_small_stack(move || {
        (
            ENGINE.eval(&nested, None, None).map_err(|e| e.to_string()),
            ENGINE.eval(&chain, None, None).map_err(|e| e.to_string()),
        )
    });
    assert_eq!(results.0, Ok(Dynamic::Number(1.0)));
    assert_eq!(results.1, Ok(Dynamic::Number(max as f64)));

    let height = ExecutionOptions::default().max_depth;
    let mut tree = Node::condition("1");
    for _ in 1..height {
        tree = Node::unary("-", tree);
    }
    let result =
        on_small_stack(move || ENGINE.execute(&tree, None, None).map_err(|e| e.to_string()));
    let expected = if height % 2 == 0 { -1.0 } else { 1.0 };
    assert_eq!(result, Ok(Dynamic::Number(expected)));
}

#[test]
fn test_oversized_input_fails_cleanly() {
    let chain = format!("1{}", "+1".repeat(200_000));
    let nested = format!("{}1{}", "(".repeat(490), ")".repeat(490));
    let codes = on_small_stack(move || {
        [chain, nested].map(|source| match ENGINE.compile(&source) {
            Err(Error::Compilation { diagnostics, .. }) => diagnostics[0].code.clone(),
            _ => None,
        })
    });
    assert_eq!(codes, [Some("P011".to_string()), Some("P011".to_string())]);

    let mut tree = Node::condition("1");
    for _ in 0..ExecutionOptions::default().max_depth {
        tree = Node::unary("-", tree);
    }
    let overflowed = on_small_stack(move || {
        matches!(
            ENGINE.execute(&tree, None, None),
            Err(Error::ResourceExceeded(
                ResourceExceededError::StackOverflow { .. }
            ))
        )
    });
    assert!(overflowed);
}

#[test]
fn test_execution_depth_limit() {
    let chain = format!("1{}", " + 1".repeat(50));
    let expr = ENGINE.compile(&chain).unwrap();
    assert!(expr.run(&ENGINE, None, None).is_ok());

    let options = ExecutionOptions { max_depth: 10 };
    match expr.run_with_options(&ENGINE, None, None, &options).unwrap_err() {
        Error::ResourceExceeded(ResourceExceededError::StackOverflow { depth, max_depth }) => {
            assert_eq!(depth, 10);
            assert_eq!(max_depth, 10);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_error_messages() {
    assert_eq!(
        eval("1 / 0").unwrap_err().to_string(),
        "Runtime error: \"/\" failed: division by zero"
    );
    assert_eq!(
        eval("1 @").unwrap_err().to_string(),
        "Compilation failed with 1 error(s): Unknown token '@'"
    );
}

#[test]
fn test_rendered_compilation_error() {
    let err = ENGINE.compile("max(1, 2 ? 3)").unwrap_err();
    let output = render_error_to_string_no_color(&err);
    assert!(output.contains("P006"));
    assert!(output.contains("max(1, 2 ? 3)"));
}
