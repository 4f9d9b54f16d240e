use super::js_ast::{JsBinaryOp, JsLiteral, JsNode};

/// Renders the JavaScript AST to source text
///
/// Every binary operation, sequence expression and anonymous function is
/// wrapped in explicit parentheses: nested rewrites can change the
/// associativity a sub-expression needs, so the output never leans on the
/// target's operator-precedence table.
pub fn serialize(node: &JsNode) -> String {
    match node {
        JsNode::Literal(JsLiteral::Number(n)) => n.to_string(),
        JsNode::Literal(JsLiteral::Bool(b)) => b.to_string(),
        JsNode::Literal(JsLiteral::Str(s)) => format!("\"{}\"", escape_string(s)),
        JsNode::Identifier(name) => name.clone(),
        JsNode::BinaryOp { op, left, right } => {
            let mut lhs = serialize(left);
            // The target grammar forbids a bare unary minus on the left of
            // `**`; a negative number literal needs its own parentheses
            if *op == JsBinaryOp::Pow && is_negative_literal(left) {
                lhs = format!("({})", lhs);
            }
            format!("({} {} {})", lhs, op.symbol(), serialize(right))
        }
        JsNode::ArrayLiteral(elements) => format!("[{}]", serialize_all(elements)),
        JsNode::Call { callee, args } => {
            format!("{}({})", serialize(callee), serialize_all(args))
        }
        JsNode::AnonymousFunction { params, body } => {
            format!("(({}) => {})", params.join(", "), serialize(body))
        }
        JsNode::SequenceExpression(elements) => format!("({})", serialize_all(elements)),
    }
}

fn is_negative_literal(node: &JsNode) -> bool {
    matches!(node, JsNode::Literal(JsLiteral::Number(n)) if n.is_sign_negative())
}

fn serialize_all(nodes: &[JsNode]) -> String {
    nodes
        .iter()
        .map(serialize)
        .collect::<Vec<_>>()
        .join(", ")
}

fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}
