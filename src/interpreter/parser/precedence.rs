use crate::{ast::InfixOperator, interpreter::lexer::TokenKind};

/// Binding precedence levels, from loosest to tightest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// The starting level of every full expression.
    Lowest,
    /// `||`
    LogicalOr,
    /// `&&`
    LogicalAnd,
    /// `==` and `!=`
    Equals,
    /// `<`, `>`, `<=` and `>=`
    LessGreater,
    /// `+` and `-`
    Sum,
    /// `*`, `/` and `%`
    Product,
    /// `**`
    Power,
    /// Unary `-` and `!`
    Prefix,
    /// `f(...)`
    Call,
    /// `a[...]`
    Index,
}

impl Precedence {
    /// Returns the level immediately below `self`.
    #[must_use]
    pub const fn lower(self) -> Self {
        match self {
            Self::Lowest | Self::LogicalOr => Self::Lowest,
            Self::LogicalAnd => Self::LogicalOr,
            Self::Equals => Self::LogicalAnd,
            Self::LessGreater => Self::Equals,
            Self::Sum => Self::LessGreater,
            Self::Product => Self::Sum,
            Self::Power => Self::Product,
            Self::Prefix => Self::Power,
            Self::Call => Self::Prefix,
            Self::Index => Self::Call,
        }
    }
}

/// How a chain of operators of equal precedence groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    /// `a - b - c` is `(a - b) - c`.
    Left,
    /// `a ** b ** c` is `a ** (b ** c)`.
    Right,
}

/// The rule that parses an expression starting at a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixRule {
    /// An identifier reference.
    Identifier,
    /// An integer literal.
    Integer,
    /// A float literal.
    Float,
    /// A string literal.
    Str,
    /// `true` or `false`.
    Boolean,
    /// `null`.
    Null,
    /// A prefix operator (`-` or `!`).
    Operator,
    /// A parenthesised expression.
    Grouped,
    /// An `if` expression.
    If,
    /// A function literal.
    Function,
    /// An array literal.
    Array,
    /// A hash literal.
    Hash,
}

/// The rule that continues an expression at an infix token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixRule {
    /// A binary operator.
    Operator(InfixOperator),
    /// A call argument list.
    Call,
    /// An index expression.
    Index,
}

/// One infix row of the Pratt table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfixEntry {
    /// How to parse the continuation.
    pub rule:          InfixRule,
    /// The binding precedence of the token.
    pub precedence:    Precedence,
    /// How equal-precedence chains group.
    pub associativity: Associativity,
}

impl InfixEntry {
    const fn left(rule: InfixRule, precedence: Precedence) -> Self {
        Self { rule,
               precedence,
               associativity: Associativity::Left }
    }

    const fn right(rule: InfixRule, precedence: Precedence) -> Self {
        Self { rule,
               precedence,
               associativity: Associativity::Right }
    }

    /// The minimum precedence used to parse the right-hand operand.
    ///
    /// Left-associative operators parse their operand at their own level, so
    /// an equal-precedence operator that follows is left for the outer loop.
    /// Right-associative operators parse one level lower, so it is absorbed
    /// into the operand.
    ///
    /// # Example
    /// ```
    /// use jet::interpreter::{
    ///     lexer::TokenKind,
    ///     parser::precedence::{Precedence, infix_rule},
    /// };
    ///
    /// let minus = infix_rule(TokenKind::Minus).unwrap();
    /// let power = infix_rule(TokenKind::Power).unwrap();
    ///
    /// assert_eq!(minus.operand_precedence(), Precedence::Sum);
    /// assert_eq!(power.operand_precedence(), Precedence::Product);
    /// ```
    #[must_use]
    pub const fn operand_precedence(&self) -> Precedence {
        match self.associativity {
            Associativity::Left => self.precedence,
            Associativity::Right => self.precedence.lower(),
        }
    }
}

/// Returns the prefix rule for a token kind, or `None` if the token cannot
/// start an expression.
#[must_use]
pub const fn prefix_rule(kind: TokenKind) -> Option<PrefixRule> {
    Some(match kind {
             TokenKind::Ident => PrefixRule::Identifier,
             TokenKind::Int => PrefixRule::Integer,
             TokenKind::Float => PrefixRule::Float,
             TokenKind::Str => PrefixRule::Str,
             TokenKind::True | TokenKind::False => PrefixRule::Boolean,
             TokenKind::Null => PrefixRule::Null,
             TokenKind::Minus | TokenKind::Bang => PrefixRule::Operator,
             TokenKind::LParen => PrefixRule::Grouped,
             TokenKind::If => PrefixRule::If,
             TokenKind::Function => PrefixRule::Function,
             TokenKind::LBracket => PrefixRule::Array,
             TokenKind::LBrace => PrefixRule::Hash,
             _ => return None,
         })
}

/// Returns the infix row for a token kind, or `None` if the token cannot
/// continue an expression.
///
/// # Example
/// ```
/// use jet::{
///     ast::InfixOperator,
///     interpreter::{
///         lexer::TokenKind,
///         parser::precedence::{Associativity, InfixRule, Precedence, infix_rule},
///     },
/// };
///
/// let entry = infix_rule(TokenKind::Asterisk).unwrap();
///
/// assert_eq!(entry.rule, InfixRule::Operator(InfixOperator::Mul));
/// assert_eq!(entry.precedence, Precedence::Product);
/// assert_eq!(entry.associativity, Associativity::Left);
/// assert!(infix_rule(TokenKind::Semicolon).is_none());
/// ```
#[must_use]
pub const fn infix_rule(kind: TokenKind) -> Option<InfixEntry> {
    use InfixOperator::{
        Add, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mod, Mul, NotEqual, Or, Pow,
        Sub,
    };
    use InfixRule::Operator;

    Some(match kind {
             TokenKind::Or => InfixEntry::left(Operator(Or), Precedence::LogicalOr),
             TokenKind::And => InfixEntry::left(Operator(And), Precedence::LogicalAnd),
             TokenKind::Equal => InfixEntry::left(Operator(Equal), Precedence::Equals),
             TokenKind::NotEqual => InfixEntry::left(Operator(NotEqual), Precedence::Equals),
             TokenKind::Less => InfixEntry::left(Operator(Less), Precedence::LessGreater),
             TokenKind::Greater => InfixEntry::left(Operator(Greater), Precedence::LessGreater),
             TokenKind::LessEqual => InfixEntry::left(Operator(LessEqual), Precedence::LessGreater),
             TokenKind::GreaterEqual => {
                 InfixEntry::left(Operator(GreaterEqual), Precedence::LessGreater)
             },
             TokenKind::Plus => InfixEntry::left(Operator(Add), Precedence::Sum),
             TokenKind::Minus => InfixEntry::left(Operator(Sub), Precedence::Sum),
             TokenKind::Asterisk => InfixEntry::left(Operator(Mul), Precedence::Product),
             TokenKind::Slash => InfixEntry::left(Operator(Div), Precedence::Product),
             TokenKind::Percent => InfixEntry::left(Operator(Mod), Precedence::Product),
             TokenKind::Power => InfixEntry::right(Operator(Pow), Precedence::Power),
             TokenKind::LParen => InfixEntry::left(InfixRule::Call, Precedence::Call),
             TokenKind::LBracket => InfixEntry::left(InfixRule::Index, Precedence::Index),
             _ => return None,
         })
}

/// Returns the binding precedence of a token in infix position, or
/// [`Precedence::Lowest`] if it has no infix rule.
#[must_use]
pub const fn infix_precedence(kind: TokenKind) -> Precedence {
    match infix_rule(kind) {
        Some(entry) => entry.precedence,
        None => Precedence::Lowest,
    }
}
