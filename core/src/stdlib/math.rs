//! Numeric functions of the arithmetic preset.
//!
//! Every function takes and returns `Dynamic::Number`; other argument types
//! are reported as handler failures.

use crate::evaluator::{HandlerResult, HostError};
use crate::values::Dynamic;

pub(super) fn number(value: &Dynamic) -> Result<f64, HostError> {
    value.as_number().ok_or_else(|| {
        HostError::new(format!("expected a number, found {}", value.type_name()))
    })
}

pub(super) fn expect_arity(name: &str, args: &[Dynamic], arity: usize) -> Result<(), HostError> {
    if args.len() == arity {
        Ok(())
    } else {
        Err(HostError::new(format!(
            "{name} takes {arity} argument(s), got {}",
            args.len()
        )))
    }
}

/// Wraps a one-argument float function, e.g. `abs` or `sqrt`.
pub(super) fn unary(
    name: &'static str,
    f: fn(f64) -> f64,
) -> impl Fn(Vec<Dynamic>) -> HandlerResult<Dynamic> + Send + Sync + 'static {
    move |args| {
        expect_arity(name, &args, 1)?;
        Ok(Dynamic::Number(f(number(&args[0])?)))
    }
}

pub(super) fn signum(x: f64) -> f64 {
    if x == 0.0 { 0.0 } else { x.signum() }
}

pub(super) fn pow(args: Vec<Dynamic>) -> HandlerResult<Dynamic> {
    expect_arity("pow", &args, 2)?;
    Ok(Dynamic::Number(number(&args[0])?.powf(number(&args[1])?)))
}

/// `log(base, x)`.
pub(super) fn log(args: Vec<Dynamic>) -> HandlerResult<Dynamic> {
    expect_arity("log", &args, 2)?;
    let base = number(&args[0])?;
    let x = number(&args[1])?;
    Ok(Dynamic::Number(x.log(base)))
}

fn fold(
    name: &str,
    args: &[Dynamic],
    pick: fn(f64, f64) -> f64,
) -> HandlerResult<Dynamic> {
    let (first, rest) = args
        .split_first()
        .ok_or_else(|| HostError::new(format!("{name} needs at least one argument")))?;
    let mut acc = number(first)?;
    for arg in rest {
        acc = pick(acc, number(arg)?);
    }
    Ok(Dynamic::Number(acc))
}

pub(super) fn min(args: Vec<Dynamic>) -> HandlerResult<Dynamic> {
    fold("min", &args, f64::min)
}

pub(super) fn max(args: Vec<Dynamic>) -> HandlerResult<Dynamic> {
    fold("max", &args, f64::max)
}

pub(super) fn divide(a: Dynamic, b: Dynamic) -> HandlerResult<Dynamic> {
    let divisor = nonzero(&b)?;
    Ok(Dynamic::Number(number(&a)? / divisor))
}

/// Division truncated toward zero.
pub(super) fn divide_whole(a: Dynamic, b: Dynamic) -> HandlerResult<Dynamic> {
    let divisor = nonzero(&b)?;
    Ok(Dynamic::Number((number(&a)? / divisor).trunc()))
}

pub(super) fn remainder(a: Dynamic, b: Dynamic) -> HandlerResult<Dynamic> {
    let divisor = nonzero(&b)?;
    Ok(Dynamic::Number(number(&a)? % divisor))
}

fn nonzero(value: &Dynamic) -> Result<f64, HostError> {
    let n = number(value)?;
    if n == 0.0 {
        return Err(HostError::new("division by zero"));
    }
    Ok(n)
}
