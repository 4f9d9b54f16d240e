/// JavaScript expression AST targeted by the codegen backend
///
/// Only the expression forms the lowering pass can produce are modeled;
/// statements never appear since every Squirrel program is a single
/// expression.
#[derive(Debug, Clone, PartialEq)]
pub enum JsNode {
    /// Literal value
    Literal(JsLiteral),
    /// Variable reference (lambda parameters and free variables)
    Identifier(String),
    /// Infix binary operation
    BinaryOp {
        /// Operator
        op: JsBinaryOp,
        /// Left operand
        left: Box<JsNode>,
        /// Right operand
        right: Box<JsNode>,
    },
    /// Array literal `[a, b, c]`
    ArrayLiteral(Vec<JsNode>),
    /// Function call `callee(a, b)`
    Call {
        /// Called expression
        callee: Box<JsNode>,
        /// Arguments
        args: Vec<JsNode>,
    },
    /// Arrow function `(a, b) => body`; free variables are captured by the
    /// target's native closure mechanism
    AnonymousFunction {
        /// Parameter names
        params: Vec<String>,
        /// Body expression
        body: Box<JsNode>,
    },
    /// Comma expression `(a, b, c)`: evaluates left to right, yields the
    /// last operand
    SequenceExpression(Vec<JsNode>),
}

/// Literal values in the target grammar
#[derive(Debug, Clone, PartialEq)]
pub enum JsLiteral {
    /// Number literal
    Number(f64),
    /// Boolean literal
    Bool(bool),
    /// String literal
    Str(String),
}

/// Infix operators the lowering pass emits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsBinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Mod,
    /// `**`
    Pow,
    /// `===`
    Eq,
    /// `!==`
    NotEq,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `<=`
    LtEq,
    /// `>=`
    GtEq,
}

impl JsBinaryOp {
    /// The operator's source text
    pub fn symbol(&self) -> &'static str {
        match self {
            JsBinaryOp::Add => "+",
            JsBinaryOp::Sub => "-",
            JsBinaryOp::Mul => "*",
            JsBinaryOp::Div => "/",
            JsBinaryOp::Mod => "%",
            JsBinaryOp::Pow => "**",
            JsBinaryOp::Eq => "===",
            JsBinaryOp::NotEq => "!==",
            JsBinaryOp::Lt => "<",
            JsBinaryOp::Gt => ">",
            JsBinaryOp::LtEq => "<=",
            JsBinaryOp::GtEq => ">=",
        }
    }
}
