use crate::value::Value;

///
/// Predicate AST
///
/// Backend-agnostic boolean tree handed to the storage collaborator.
/// Column names are allow-listed before they reach this layer; values are
/// comparable primitives (or a list of them for `In`).
///

///
/// CompareOp
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[repr(u8)]
pub enum CompareOp {
    Eq = 0x01,
    Lt = 0x03,
    Gt = 0x05,
    In = 0x07,
}

impl CompareOp {
    #[must_use]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::In => "IN",
        }
    }
}

///
/// ComparePredicate
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ComparePredicate {
    pub column: String,
    pub op: CompareOp,
    pub value: Value,
}

impl ComparePredicate {
    fn new(column: String, op: CompareOp, value: Value) -> Self {
        Self { column, op, value }
    }

    #[must_use]
    pub fn eq(column: impl Into<String>, value: Value) -> Self {
        Self::new(column.into(), CompareOp::Eq, value)
    }

    #[must_use]
    pub fn lt(column: impl Into<String>, value: Value) -> Self {
        Self::new(column.into(), CompareOp::Lt, value)
    }

    #[must_use]
    pub fn gt(column: impl Into<String>, value: Value) -> Self {
        Self::new(column.into(), CompareOp::Gt, value)
    }

    #[must_use]
    pub fn in_(column: impl Into<String>, values: Vec<Value>) -> Self {
        Self::new(column.into(), CompareOp::In, Value::List(values))
    }
}

///
/// Predicate
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Predicate {
    True,
    And(Vec<Self>),
    Or(Vec<Self>),
    Compare(ComparePredicate),
}

impl Predicate {
    /// Conjunction that drops `True` children and collapses trivial arity.
    #[must_use]
    pub fn and(preds: Vec<Self>) -> Self {
        let mut preds: Vec<Self> = preds.into_iter().filter(|p| !p.is_true()).collect();

        match preds.len() {
            0 => Self::True,
            1 => preds.remove(0),
            _ => Self::And(preds),
        }
    }

    #[must_use]
    pub const fn or(preds: Vec<Self>) -> Self {
        Self::Or(preds)
    }

    #[must_use]
    pub fn eq(column: impl Into<String>, value: Value) -> Self {
        Self::Compare(ComparePredicate::eq(column, value))
    }

    #[must_use]
    pub fn lt(column: impl Into<String>, value: Value) -> Self {
        Self::Compare(ComparePredicate::lt(column, value))
    }

    #[must_use]
    pub fn gt(column: impl Into<String>, value: Value) -> Self {
        Self::Compare(ComparePredicate::gt(column, value))
    }

    #[must_use]
    pub fn in_(column: impl Into<String>, values: Vec<Value>) -> Self {
        Self::Compare(ComparePredicate::in_(column, values))
    }

    #[must_use]
    pub const fn is_true(&self) -> bool {
        matches!(self, Self::True)
    }
}

impl std::fmt::Display for Predicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn join(
            f: &mut std::fmt::Formatter<'_>,
            children: &[Predicate],
            sep: &str,
        ) -> std::fmt::Result {
            f.write_str("(")?;
            for (idx, child) in children.iter().enumerate() {
                if idx > 0 {
                    f.write_str(sep)?;
                }
                write!(f, "{child}")?;
            }
            f.write_str(")")
        }

        match self {
            Self::True => f.write_str("true"),
            Self::And(children) => join(f, children, " AND "),
            Self::Or(children) => join(f, children, " OR "),
            Self::Compare(cmp) => write!(f, "{} {} {}", cmp.column, cmp.op.symbol(), cmp.value),
        }
    }
}
