use std::{fmt, rc::Rc};

use crate::interpreter::lexer::Position;

/// The root of a parsed source text: an ordered sequence of statements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    /// The top-level statements, in source order.
    pub statements: Vec<Statement>,
}

/// A brace-delimited sequence of statements.
///
/// Blocks are the bodies of functions and `if` branches, and may also appear
/// on their own as a block statement. Evaluating a block opens a new scope.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    /// Statements inside the block.
    pub statements: Vec<Statement>,
}

/// A statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `let name = value;` creates a binding in the innermost scope.
    Let {
        /// The name being bound.
        name:     String,
        /// The bound expression.
        value:    Expr,
        /// Position of the `let` keyword.
        position: Position,
    },
    /// `name = value;` updates the nearest existing binding of `name`.
    Assign {
        /// The name being reassigned.
        name:     String,
        /// The new value.
        value:    Expr,
        /// Position of the assigned identifier.
        position: Position,
    },
    /// `return value;`
    Return {
        /// The returned expression. `return;` returns `null`.
        value:    Option<Expr>,
        /// Position of the `return` keyword.
        position: Position,
    },
    /// An expression evaluated for its value.
    Expression {
        /// The expression.
        expr:     Expr,
        /// Position of the first token of the expression.
        position: Position,
    },
    /// A nested block statement.
    Block(Block),
}

/// A function literal: `fn(a, b) { ... }`.
///
/// Function literals are shared between the tree and the closures created from
/// them, so a closure keeps its body alive after the program that defined it
/// has been dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionLiteral {
    /// The parameter names, in order.
    pub parameters: Vec<String>,
    /// The body evaluated on each call.
    pub body:       Block,
}

/// An expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Reference to a binding by name.
    Identifier {
        /// The name to resolve.
        name:     String,
        /// Where the identifier appears.
        position: Position,
    },
    /// An integer literal.
    Integer(i64),
    /// A float literal.
    Float(f64),
    /// `true` or `false`.
    Boolean(bool),
    /// A string literal, already unescaped.
    Str(String),
    /// `null`.
    Null,
    /// A prefix operation such as `-x` or `!ok`.
    Prefix {
        /// The operator.
        op:       PrefixOperator,
        /// The operand.
        right:    Box<Self>,
        /// Position of the operator.
        position: Position,
    },
    /// A binary operation such as `a + b`.
    Infix {
        /// Left operand.
        left:     Box<Self>,
        /// The operator.
        op:       InfixOperator,
        /// Right operand.
        right:    Box<Self>,
        /// Position of the operator.
        position: Position,
    },
    /// `if condition { ... } else { ... }`
    If {
        /// The condition, tested for truthiness.
        condition:   Box<Self>,
        /// Block evaluated when the condition is truthy.
        consequence: Block,
        /// Block evaluated otherwise. An `else if` is an alternative holding a
        /// single nested `if` expression.
        alternative: Option<Block>,
    },
    /// A function literal.
    Function(Rc<FunctionLiteral>),
    /// A call such as `f(1, 2)`.
    Call {
        /// The expression producing the callee.
        function:  Box<Self>,
        /// The argument expressions, evaluated left to right.
        arguments: Vec<Self>,
        /// Position of the opening parenthesis.
        position:  Position,
    },
    /// An array literal `[a, b, c]`.
    Array(Vec<Self>),
    /// An index expression `collection[index]`.
    Index {
        /// The indexed collection.
        left:     Box<Self>,
        /// The index or key.
        index:    Box<Self>,
        /// Position of the opening bracket.
        position: Position,
    },
    /// A hash literal `{key: value, ...}`.
    Hash {
        /// Key and value expressions, in source order.
        pairs:    Vec<(Self, Self)>,
        /// Position of the opening brace.
        position: Position,
    },
}

/// A prefix operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PrefixOperator {
    /// Arithmetic negation (`-x`).
    Negate,
    /// Logical not (`!x`).
    Not,
}

/// A binary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InfixOperator {
    /// Addition or string concatenation (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Remainder (`%`)
    Mod,
    /// Exponentiation (`**`)
    Pow,
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Short-circuit logical and (`&&`)
    And,
    /// Short-circuit logical or (`||`)
    Or,
}

impl InfixOperator {
    /// Returns `true` for the comparison operators, which always produce a
    /// boolean.
    #[must_use]
    pub const fn is_comparison(self) -> bool {
        matches!(self,
                 Self::Less
                 | Self::Greater
                 | Self::LessEqual
                 | Self::GreaterEqual
                 | Self::Equal
                 | Self::NotEqual)
    }
}

impl fmt::Display for PrefixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Negate => write!(f, "-"),
            Self::Not => write!(f, "!"),
        }
    }
}

impl fmt::Display for InfixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operator = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Pow => "**",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::And => "&&",
            Self::Or => "||",
        };
        write!(f, "{operator}")
    }
}

/// Writes `items` separated by `", "`.
fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

// The `Display` impls below produce a canonical, fully parenthesised,
// source-like rendering of the tree. It is meant for echoing and debugging and
// is not guaranteed to parse back to the same tree.

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, statement) in self.statements.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{statement}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.statements.is_empty() {
            return write!(f, "{{}}");
        }
        write!(f, "{{")?;
        for statement in &self.statements {
            write!(f, " {statement}")?;
        }
        write!(f, " }}")
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Let { name, value, .. } => write!(f, "let {name} = {value};"),
            Self::Assign { name, value, .. } => write!(f, "{name} = {value};"),
            Self::Return { value: Some(value),
                           .. } => write!(f, "return {value};"),
            Self::Return { value: None, .. } => write!(f, "return;"),
            Self::Expression { expr, .. } => write!(f, "{expr}"),
            Self::Block(block) => write!(f, "{block}"),
        }
    }
}

impl fmt::Display for FunctionLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fn(")?;
        write_list(f, &self.parameters)?;
        write!(f, ") {}", self.body)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier { name, .. } => write!(f, "{name}"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value:?}"),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::Str(value) => write!(f, "{value:?}"),
            Self::Null => write!(f, "null"),
            Self::Prefix { op, right, .. } => write!(f, "({op}{right})"),
            Self::Infix { left, op, right, .. } => write!(f, "({left} {op} {right})"),
            Self::If { condition,
                       consequence,
                       alternative, } => {
                write!(f, "if {condition} {consequence}")?;
                if let Some(alternative) = alternative {
                    write!(f, " else {alternative}")?;
                }
                Ok(())
            },
            Self::Function(literal) => write!(f, "{literal}"),
            Self::Call { function,
                         arguments,
                         .. } => {
                write!(f, "{function}(")?;
                write_list(f, arguments)?;
                write!(f, ")")
            },
            Self::Array(elements) => {
                write!(f, "[")?;
                write_list(f, elements)?;
                write!(f, "]")
            },
            Self::Index { left, index, .. } => write!(f, "({left}[{index}])"),
            Self::Hash { pairs, .. } => {
                write!(f, "{{")?;
                for (index, (key, value)) in pairs.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, "}}")
            },
        }
    }
}
