//! Gate operators and the stat they act on

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Arithmetic printed on a gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub const ALL: [Operator; 4] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
    ];

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => 'x',
            Operator::Divide => '/',
        }
    }

    pub fn from_symbol(symbol: char) -> Result<Self, SettingsError> {
        match symbol {
            '+' => Ok(Operator::Add),
            '-' => Ok(Operator::Subtract),
            'x' | 'X' | '*' => Ok(Operator::Multiply),
            '/' => Ok(Operator::Divide),
            other => Err(SettingsError::InvalidOperator(other)),
        }
    }

    /// `+` and `x` help the player; only colour and mood depend on this
    pub fn is_beneficial(self) -> bool {
        matches!(self, Operator::Add | Operator::Multiply)
    }

    /// `x` and `/` roll small operands, `+` and `-` large ones
    pub fn is_scaling(self) -> bool {
        matches!(self, Operator::Multiply | Operator::Divide)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Which stat a gate variant tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatKind {
    /// Head count: full arithmetic, floor 0
    Count,
    /// Equipment level: steps of 1 or operand, floor 1
    Power,
}

impl StatKind {
    pub fn floor(self) -> u64 {
        match self {
            StatKind::Count => 0,
            StatKind::Power => 1,
        }
    }
}

/// Value before and after an effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatChange {
    pub before: u64,
    pub after: u64,
}

/// The single numeric resource a gate variant is about
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatTracker {
    kind: StatKind,
    value: u64,
}

impl StatTracker {
    /// Start value is raised to the kind's floor
    pub fn new(kind: StatKind, initial: u64) -> Self {
        Self {
            kind,
            value: initial.max(kind.floor()),
        }
    }

    pub fn kind(&self) -> StatKind {
        self.kind
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    /// Count has run out (power never does)
    pub fn is_depleted(&self) -> bool {
        self.value == 0
    }

    /// Apply one gate effect; no upper clamp
    pub fn apply(&mut self, op: Operator, operand: u64) -> StatChange {
        let before = self.value;
        let after = match self.kind {
            StatKind::Count => match op {
                Operator::Add => before.saturating_add(operand),
                Operator::Multiply => before.saturating_mul(operand),
                Operator::Subtract => before.saturating_sub(operand),
                // Zero operands are rejected by settings; leave the count alone if one slips in
                Operator::Divide => before.checked_div(operand).unwrap_or(before),
            },
            StatKind::Power => match op {
                Operator::Add => before.saturating_add(1),
                Operator::Multiply => before.saturating_add(operand),
                Operator::Subtract => before.saturating_sub(1),
                Operator::Divide => before.saturating_sub(operand),
            },
        };
        self.value = after.max(self.kind.floor());
        StatChange {
            before,
            after: self.value,
        }
    }
}
