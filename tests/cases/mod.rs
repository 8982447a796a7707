#![allow(dead_code)]

use exprkit::{Bindings, Dynamic, Engine, EngineOptions, Error, MethodTable, stdlib};
use once_cell::sync::Lazy;

/// The arithmetic preset, built once per test binary.
pub static ENGINE: Lazy<Engine<(), Dynamic>> = Lazy::new(|| {
    Engine::from_builder(
        stdlib::arithmetic().expect("preset should configure"),
        EngineOptions::default(),
    )
    .expect("preset should build")
});

pub fn eval(source: &str) -> Result<Dynamic, Error> {
    ENGINE.eval(source, None, None)
}

pub fn eval_with(source: &str, locals: &dyn Bindings<Dynamic>) -> Result<Dynamic, Error> {
    ENGINE.eval(source, None, Some(locals))
}

pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A host object with `x()`, `y()`, `scale(k)` and variadic `sum(...)`.
pub fn point(x: f64, y: f64) -> Dynamic {
    MethodTable::new("Point", Point { x, y })
        .method("x", 0, |p, _| Ok(Dynamic::Number(p.x)))
        .method("y", 0, |p, _| Ok(Dynamic::Number(p.y)))
        .method("scale", 1, |p, args| {
            let k = args[0].as_number().ok_or("scale expects a number")?;
            Ok(point(p.x * k, p.y * k))
        })
        .variadic("sum", |p, args| {
            let extra: f64 = args.iter().filter_map(Dynamic::as_number).sum();
            Ok(Dynamic::Number(p.x + p.y + extra))
        })
        .into_value()
}

/// Declares a test that compiles `input` with the shared engine, checks the
/// canonical rendering of the tree, then checks the value.
#[macro_export]
macro_rules! test_case {
    (
        name: $name:ident,
        input: $input:expr,
        formatted: { $formatted:expr },
        value: { $value:expr } $(,)?
    ) => {
        #[test]
        fn $name() {
            let expr = $crate::cases::ENGINE.compile($input).unwrap();
            pretty_assertions::assert_eq!(expr.tree().to_string(), $formatted);
            pretty_assertions::assert_eq!(
                expr.run(&$crate::cases::ENGINE, None, None).unwrap(),
                exprkit::Dynamic::from($value)
            );
        }
    };
}
