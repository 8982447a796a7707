use tracing::{debug, trace};

use crate::evaluator::{
    Bindings, ExecutionError, HandlerKind, Handlers, HostError, ResourceExceededError::*,
    RuntimeError,
};
use crate::parser::Node;
use crate::values::Value;

/// Default maximum evaluation depth.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Walks expression trees against a fixed set of handlers.
///
/// The interpreter holds no per-call state, so one instance can evaluate any
/// number of trees, from several threads if `C` and `V` allow it.
#[derive(Debug)]
pub struct Interpreter<C, V> {
    handlers: Handlers<C, V>,
}

impl<C, V: Value> Interpreter<C, V> {
    pub fn new(handlers: Handlers<C, V>) -> Self {
        Self { handlers }
    }

    pub fn handlers(&self) -> &Handlers<C, V> {
        &self.handlers
    }

    /// Evaluate `node` with the default depth limit.
    pub fn execute(
        &self,
        node: &Node,
        context: Option<&C>,
        locals: Option<&dyn Bindings<V>>,
    ) -> Result<V, ExecutionError> {
        self.execute_with_limits(node, context, locals, DEFAULT_MAX_DEPTH)
    }

    /// Evaluate `node`, failing once the recursion goes deeper than
    /// `max_depth` nodes.
    pub fn execute_with_limits(
        &self,
        node: &Node,
        context: Option<&C>,
        locals: Option<&dyn Bindings<V>>,
        max_depth: usize,
    ) -> Result<V, ExecutionError> {
        Evaluation {
            handlers: &self.handlers,
            context,
            locals,
            depth: 0,
            max_depth,
        }
        .eval(node)
    }
}

/// State of a single `execute` call.
struct Evaluation<'a, C, V> {
    handlers: &'a Handlers<C, V>,
    context: Option<&'a C>,
    locals: Option<&'a dyn Bindings<V>>,
    depth: usize,
    max_depth: usize,
}

impl<C, V: Value> Evaluation<'_, C, V> {
    fn eval(&mut self, node: &Node) -> Result<V, ExecutionError> {
        // Check depth before recursing
        if self.depth >= self.max_depth {
            return Err(StackOverflow {
                depth: self.depth,
                max_depth: self.max_depth,
            }
            .into());
        }

        self.depth += 1;
        let result = self.eval_inner(node);
        self.depth -= 1;

        result
    }

    fn eval_all(&mut self, nodes: &[Node]) -> Result<Vec<V>, ExecutionError> {
        nodes.iter().map(|node| self.eval(node)).collect()
    }

    /// Dispatch only. Each node kind is evaluated in its own function so a
    /// level of recursion pays for one kind's locals, not all of them.
    fn eval_inner(&mut self, node: &Node) -> Result<V, ExecutionError> {
        trace!(
            kind = node.kind_name(),
            name = node.name(),
            depth = self.depth,
            "eval"
        );
        match node {
            Node::Condition { name } => self.resolve(name),
            Node::Unary { name, operand } => self.eval_unary(name, operand),
            Node::Binary { name, left, right } => self.eval_binary(name, left, right),
            Node::Ternary {
                name,
                condition,
                then_branch,
                else_branch,
            } => self.eval_ternary(name, condition, then_branch, else_branch),
            Node::Function { name, args } => self.eval_function(name, args),
            Node::Method {
                name,
                context,
                args,
            } => self.eval_method(name, context, args),
        }
    }

    fn eval_unary(&mut self, name: &str, operand: &Node) -> Result<V, ExecutionError> {
        let operand = self.eval(operand)?;
        let handler = self
            .handlers
            .unary(name)
            .ok_or_else(|| missing(HandlerKind::Unary, name))?;
        Ok(handler(operand).map_err(|source| failed(name, source))?)
    }

    fn eval_binary(&mut self, name: &str, left: &Node, right: &Node) -> Result<V, ExecutionError> {
        let left = self.eval(left)?;
        let right = self.eval(right)?;
        let handler = self
            .handlers
            .binary(name)
            .ok_or_else(|| missing(HandlerKind::Binary, name))?;
        Ok(handler(left, right).map_err(|source| failed(name, source))?)
    }

    // Both branches are evaluated before the condition is looked at.
    fn eval_ternary(
        &mut self,
        name: &str,
        condition: &Node,
        then_branch: &Node,
        else_branch: &Node,
    ) -> Result<V, ExecutionError> {
        let condition = self.eval(condition)?;
        let then_value = self.eval(then_branch)?;
        let else_value = self.eval(else_branch)?;
        let handler = self
            .handlers
            .ternary(name)
            .ok_or_else(|| missing(HandlerKind::Ternary, name))?;
        let flag = condition
            .as_bool()
            .ok_or_else(|| RuntimeError::NonBooleanCondition {
                name: name.to_string(),
            })?;
        Ok(handler(flag, then_value, else_value).map_err(|source| failed(name, source))?)
    }

    fn eval_function(&mut self, name: &str, args: &[Node]) -> Result<V, ExecutionError> {
        let args = self.eval_all(args)?;
        let handler = self
            .handlers
            .function(name)
            .ok_or_else(|| missing(HandlerKind::Function, name))?;
        Ok(handler(args).map_err(|source| failed(name, source))?)
    }

    fn eval_method(
        &mut self,
        name: &str,
        context: &Node,
        args: &[Node],
    ) -> Result<V, ExecutionError> {
        let target = self.eval(context)?;
        let args = self.eval_all(args)?;
        let object = target
            .as_object()
            .ok_or_else(|| RuntimeError::InvalidMethodTarget {
                context: context.to_string(),
                method: name.to_string(),
            })?;
        Ok(object
            .call_method(name, &args)
            .map_err(|source| RuntimeError::MethodFailed {
                method: name.to_string(),
                source,
            })?)
    }

    /// Locals first, then the first matching condition pattern, then the
    /// fallback resolver.
    fn resolve(&self, name: &str) -> Result<V, ExecutionError> {
        if let Some(value) = self.locals.and_then(|locals| locals.lookup(name)) {
            return Ok(value.clone());
        }
        if let Some(rule) = self.handlers.condition(name) {
            return Ok(rule
                .resolve(self.context, name)
                .map_err(|source| failed(name, source))?);
        }
        if let Some(fallback) = self.handlers.fallback() {
            debug!(name, "condition resolved by fallback");
            return Ok(fallback(name).map_err(|source| failed(name, source))?);
        }
        Err(RuntimeError::UnknownCondition {
            name: name.to_string(),
        }
        .into())
    }
}

fn missing(kind: HandlerKind, name: &str) -> RuntimeError {
    RuntimeError::MissingHandler {
        kind,
        name: name.to_string(),
    }
}

fn failed(name: &str, source: HostError) -> RuntimeError {
    RuntimeError::HandlerFailed {
        name: name.to_string(),
        source,
    }
}
