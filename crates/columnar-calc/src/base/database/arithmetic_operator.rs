use core::fmt::{self, Display, Formatter};
use serde::{Deserialize, Serialize};

/// The binary arithmetic operators over numeric columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArithmeticOperator {
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
}

impl ArithmeticOperator {
    /// Every operator, ordered by [`ArithmeticOperator::index`].
    pub const ALL: [ArithmeticOperator; 5] = [
        ArithmeticOperator::Add,
        ArithmeticOperator::Sub,
        ArithmeticOperator::Mul,
        ArithmeticOperator::Div,
        ArithmeticOperator::Mod,
    ];

    /// Dense index of this operator, suitable for table lookups.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            ArithmeticOperator::Add => 0,
            ArithmeticOperator::Sub => 1,
            ArithmeticOperator::Mul => 2,
            ArithmeticOperator::Div => 3,
            ArithmeticOperator::Mod => 4,
        }
    }

    /// The SQL symbol of the operator.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            ArithmeticOperator::Add => "+",
            ArithmeticOperator::Sub => "-",
            ArithmeticOperator::Mul => "*",
            ArithmeticOperator::Div => "/",
            ArithmeticOperator::Mod => "%",
        }
    }
}

impl Display for ArithmeticOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
