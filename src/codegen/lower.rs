use tracing::debug;

use super::js_ast::{JsBinaryOp, JsLiteral, JsNode};
use crate::error::{Error, Result};
use crate::parser::Node;

/// Recursion bound for lowering
///
/// The parser enforces its own nesting limit, but an AST handed to
/// `codegen` directly may be arbitrarily deep.
const MAX_DEPTH: usize = 1000;

/// Lowers a Squirrel AST into the JavaScript expression AST
///
/// Output is semantically equivalent to direct evaluation for every form
/// with a defined mapping; anything else is a `CodegenUnsupported` error.
pub fn codegen(node: &Node) -> Result<JsNode> {
    debug!(kind = node.kind_name(), "lowering expression");
    lower(node, 0)
}

fn lower(node: &Node, depth: usize) -> Result<JsNode> {
    if depth > MAX_DEPTH {
        return Err(Error::StackExhausted { limit: MAX_DEPTH });
    }

    match node {
        Node::Number(n) => Ok(JsNode::Literal(JsLiteral::Number(*n))),
        Node::Bool(b) => Ok(JsNode::Literal(JsLiteral::Bool(*b))),
        Node::Str(s) => Ok(JsNode::Literal(JsLiteral::Str(s.clone()))),
        Node::Symbol(name) => Ok(JsNode::Identifier(identifier(name))),

        Node::List {
            elements,
            vector: true,
        } => Ok(JsNode::ArrayLiteral(lower_all(elements, depth)?)),

        Node::List {
            elements,
            vector: false,
        } => lower_list(elements, depth),

        Node::Dictionary(_) => Err(Error::CodegenUnsupported {
            form: "dictionary literal".to_string(),
        }),
        Node::Function(_) => Err(Error::CodegenUnsupported {
            form: "function value".to_string(),
        }),
    }
}

fn lower_list(elements: &[Node], depth: usize) -> Result<JsNode> {
    if let Node::Symbol(name) = &elements[0] {
        let args = &elements[1..];
        match name.as_str() {
            // Stateful and quoting forms have no expression mapping
            "def" | "set" | "if" | "quote" => {
                return Err(Error::CodegenUnsupported {
                    form: format!("special form {}", name),
                });
            }

            // A comma expression preserves left-to-right evaluation order
            // and yields its last operand, matching do
            "do" => {
                if args.is_empty() {
                    return Err(Error::arguments("do", "expected at least one expression"));
                }
                return Ok(JsNode::SequenceExpression(lower_all(args, depth)?));
            }

            "lambda" => return lower_lambda(args, depth),

            "list" => return Ok(JsNode::ArrayLiteral(lower_all(args, depth)?)),

            _ => {
                if let Some(op) = binary_op(name) {
                    if args.len() != 2 {
                        return Err(Error::arguments(
                            name.clone(),
                            format!("expected 2 arguments, got {}", args.len()),
                        ));
                    }
                    return Ok(JsNode::BinaryOp {
                        op,
                        left: Box::new(lower(&args[0], depth + 1)?),
                        right: Box::new(lower(&args[1], depth + 1)?),
                    });
                }
            }
        }
    }

    // Ordinary application
    Ok(JsNode::Call {
        callee: Box::new(lower(&elements[0], depth + 1)?),
        args: lower_all(&elements[1..], depth)?,
    })
}

/// `lambda` maps to an arrow function; free variables ride on the target's
/// native closures, no environment object is emitted
fn lower_lambda(args: &[Node], depth: usize) -> Result<JsNode> {
    if args.len() != 2 {
        return Err(Error::arguments(
            "lambda",
            format!("expected 2 arguments, got {}", args.len()),
        ));
    }
    let params = match &args[0] {
        Node::List { elements, .. } => {
            let mut params = Vec::with_capacity(elements.len());
            for element in elements {
                match element {
                    Node::Symbol(name) => params.push(identifier(name)),
                    other => {
                        return Err(Error::type_error("list of symbols", other.kind_name()))
                    }
                }
            }
            params
        }
        other => return Err(Error::type_error("list of symbols", other.kind_name())),
    };

    Ok(JsNode::AnonymousFunction {
        params,
        body: Box::new(lower(&args[1], depth + 1)?),
    })
}

fn lower_all(nodes: &[Node], depth: usize) -> Result<Vec<JsNode>> {
    nodes.iter().map(|node| lower(node, depth + 1)).collect()
}

/// Hyphens are valid in Squirrel symbols but not in JavaScript identifiers
fn identifier(name: &str) -> String {
    name.replace('-', "_")
}

fn binary_op(name: &str) -> Option<JsBinaryOp> {
    match name {
        "add" => Some(JsBinaryOp::Add),
        "sub" => Some(JsBinaryOp::Sub),
        "mul" => Some(JsBinaryOp::Mul),
        "div" => Some(JsBinaryOp::Div),
        "mod" => Some(JsBinaryOp::Mod),
        "pow" => Some(JsBinaryOp::Pow),
        "eq" => Some(JsBinaryOp::Eq),
        "neq" => Some(JsBinaryOp::NotEq),
        "lt" => Some(JsBinaryOp::Lt),
        "gt" => Some(JsBinaryOp::Gt),
        "lte" => Some(JsBinaryOp::LtEq),
        "gte" => Some(JsBinaryOp::GtEq),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;
    use crate::parser::parse;

    fn lower_source(source: &str) -> Result<JsNode> {
        codegen(&parse(lex(source)?)?)
    }

    #[test]
    fn test_literals() {
        assert_eq!(
            lower_source("1").unwrap(),
            JsNode::Literal(JsLiteral::Number(1.0))
        );
        assert_eq!(
            lower_source("true").unwrap(),
            JsNode::Literal(JsLiteral::Bool(true))
        );
    }

    #[test]
    fn test_arithmetic_becomes_infix() {
        let js = lower_source("(add 1 2)").unwrap();
        assert_eq!(
            js,
            JsNode::BinaryOp {
                op: JsBinaryOp::Add,
                left: Box::new(JsNode::Literal(JsLiteral::Number(1.0))),
                right: Box::new(JsNode::Literal(JsLiteral::Number(2.0))),
            }
        );
    }

    #[test]
    fn test_vector_and_list_become_arrays() {
        assert_eq!(
            lower_source("[1 2]").unwrap(),
            JsNode::ArrayLiteral(vec![
                JsNode::Literal(JsLiteral::Number(1.0)),
                JsNode::Literal(JsLiteral::Number(2.0)),
            ])
        );
        assert_eq!(
            lower_source("(list 1 2)").unwrap(),
            lower_source("[1 2]").unwrap()
        );
    }

    #[test]
    fn test_symbol_identifiers_are_js_safe() {
        assert_eq!(
            lower_source("foo-bar").unwrap(),
            JsNode::Identifier("foo_bar".to_string())
        );
    }

    #[test]
    fn test_lambda_becomes_anonymous_function() {
        let js = lower_source("(lambda (x y) (add x y))").unwrap();
        match js {
            JsNode::AnonymousFunction { params, .. } => {
                assert_eq!(params, vec!["x".to_string(), "y".to_string()]);
            }
            other => panic!("expected anonymous function, got {:?}", other),
        }
    }

    #[test]
    fn test_deeply_nested_ast_is_an_error_not_a_crash() {
        // Built directly, bypassing the parser's own nesting limit
        let mut node = Node::Number(1.0);
        for _ in 0..5_000 {
            node = Node::vector(vec![node]);
        }
        assert!(matches!(
            codegen(&node),
            Err(Error::StackExhausted { .. })
        ));
    }

    #[test]
    fn test_unsupported_forms() {
        for source in ["(def x 1)", "(if true 1 2)", "'foo", "{\"k\" 1}"] {
            assert!(
                matches!(
                    lower_source(source),
                    Err(Error::CodegenUnsupported { .. })
                ),
                "{} should be unsupported",
                source
            );
        }
    }
}
