use pretty_assertions::assert_eq;

use crate::evaluator::HostError;
use crate::values::{Dynamic, MethodTable, Object};

struct Counter {
    start: f64,
}

fn counter() -> MethodTable<Counter> {
    MethodTable::new("Counter", Counter { start: 10.0 })
        .method("get", 0, |c, _| Ok(Dynamic::Number(c.start)))
        .method("add", 1, |c, args| match args[0].as_number() {
            Some(n) => Ok(Dynamic::Number(c.start + n)),
            None => Err(HostError::new("add expects a number")),
        })
        .variadic("count", |_, args| Ok(Dynamic::from(args.len() as i64)))
}

#[test]
fn test_call_by_name_and_arity() {
    let counter = counter();
    assert_eq!(counter.call_method("get", &[]).unwrap(), Dynamic::Number(10.0));
    assert_eq!(
        counter.call_method("add", &[Dynamic::Number(5.0)]).unwrap(),
        Dynamic::Number(15.0)
    );
    assert_eq!(
        counter
            .call_method("count", &[Dynamic::Null, Dynamic::Null])
            .unwrap(),
        Dynamic::Number(2.0)
    );
}

#[test]
fn test_has_method_checks_arity() {
    let counter = counter();
    assert!(counter.has_method("add", &[Dynamic::Null]));
    assert!(!counter.has_method("add", &[]));
    assert!(counter.has_method("count", &[]));
    assert!(!counter.has_method("missing", &[]));
    assert_eq!(counter.method_names(), vec!["get", "add", "count"]);
}

#[test]
fn test_failures() {
    let counter = counter();
    assert_eq!(
        counter.call_method("missing", &[]).unwrap_err().message(),
        "Counter has no method 'missing'"
    );
    assert_eq!(
        counter.call_method("get", &[Dynamic::Null]).unwrap_err().message(),
        "Counter.get does not take 1 argument(s)"
    );
    assert_eq!(
        counter.call_method("add", &[Dynamic::from("x")]).unwrap_err().message(),
        "add expects a number"
    );
}
