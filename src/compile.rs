use crate::{CompileError, Compiler, Node, Param, Predicate, Rule};

pub(crate) fn compile(compiler: &Compiler, nodes: &[Node]) -> Result<Vec<Rule>, CompileError> {
    let span = tracing::debug_span!("compile", nodes = nodes.len());
    let _enter = span.enter();

    let rules = compile_nodes(compiler, nodes, 1).map_err(|err| {
        tracing::debug!(error = %err, "rule compilation failed");
        err
    })?;
    tracing::debug!(rules = rules.len(), "compiled rule ast");
    Ok(rules)
}

pub(crate) fn visit(compiler: &Compiler, node: &Node) -> Result<Rule, CompileError> {
    visit_node(compiler, node, 1)
}

fn compile_nodes(
    compiler: &Compiler,
    nodes: &[Node],
    depth: usize,
) -> Result<Vec<Rule>, CompileError> {
    nodes
        .iter()
        .map(|node| visit_node(compiler, node, depth))
        .collect()
}

/// Tag dispatch. `depth` is the nesting level of `node`, starting at 1.
fn visit_node(compiler: &Compiler, node: &Node, depth: usize) -> Result<Rule, CompileError> {
    if depth > compiler.max_depth {
        return Err(CompileError::DepthLimitExceeded {
            limit: compiler.max_depth,
        });
    }
    tracing::trace!(tag = node.tag(), depth, "visit");

    let next = depth + 1;
    match node {
        Node::Predicate { name, params } => visit_predicate(compiler, name, params),
        Node::Check {
            name,
            predicate,
            keys,
        } => Ok(Rule::Check {
            rule: Box::new(visit_node(compiler, predicate, next)?),
            name: name.clone(),
            keys: keys.clone().unwrap_or_else(|| vec![name.clone()]),
        }),
        Node::Not(inner) => Ok(visit_node(compiler, inner, next)?.negation()),
        Node::Key { name, predicate } => Ok(Rule::Key {
            rule: Box::new(visit_node(compiler, predicate, next)?),
            name: name.clone(),
        }),
        Node::Attr { name, predicate } => Ok(Rule::Attr {
            rule: Box::new(visit_node(compiler, predicate, next)?),
            name: name.clone(),
        }),
        Node::Val(inner) => Ok(Rule::Value(Box::new(visit_node(compiler, inner, next)?))),
        Node::Set(nodes) => Ok(Rule::Set(compile_nodes(compiler, nodes, next)?)),
        Node::Each(inner) => Ok(Rule::Each(Box::new(visit_node(compiler, inner, next)?))),
        Node::And(a, b) => {
            let (a, b) = visit_pair(compiler, a, b, next)?;
            Ok(a.and(b))
        }
        Node::Or(a, b) => {
            let (a, b) = visit_pair(compiler, a, b, next)?;
            Ok(a.or(b))
        }
        Node::Xor(a, b) => {
            let (a, b) = visit_pair(compiler, a, b, next)?;
            Ok(a.xor(b))
        }
        Node::Implication(a, b) => {
            let (a, b) = visit_pair(compiler, a, b, next)?;
            Ok(a.implication(b))
        }
    }
}

fn visit_pair(
    compiler: &Compiler,
    left: &Node,
    right: &Node,
    depth: usize,
) -> Result<(Rule, Rule), CompileError> {
    let left = visit_node(compiler, left, depth)?;
    let right = visit_node(compiler, right, depth)?;
    Ok((left, right))
}

/// With at most one param the predicate is returned as registered: the
/// single slot is the value under test, supplied at evaluation time.
/// Otherwise the bound param values are curried in order, skipping unbound
/// placeholders.
fn visit_predicate(compiler: &Compiler, name: &str, params: &[Param]) -> Result<Rule, CompileError> {
    let predicate = compiler
        .predicates
        .lookup(name)
        .ok_or_else(|| CompileError::UnknownPredicate {
            name: name.to_owned(),
        })?;

    if params.len() <= 1 {
        return Ok(Rule::Predicate(predicate.clone()));
    }

    let args: Vec<_> = params.iter().filter_map(|p| p.value.clone()).collect();
    tracing::trace!(predicate = name, bound = args.len(), "curry");
    let curried: Predicate = predicate.curry(args)?;
    Ok(Rule::Predicate(curried))
}
