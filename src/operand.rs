use serde::{Deserialize, Serialize};
use std::fmt;

pub const NUM_REGS: usize = 10;

/// General-purpose register index, always in `0..NUM_REGS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reg(u8);

impl Reg {
    pub fn new(idx: u8) -> Option<Self> {
        ((idx as usize) < NUM_REGS).then_some(Self(idx))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}", self.0)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OperandError {
    #[error("malformed register operand '{0}' (expected R0..R9)")]
    BadRegister(String),
    #[error("malformed immediate operand '{0}'")]
    BadImmediate(String),
    #[error("malformed label operand '{0}'")]
    BadLabel(String),
    #[error("{mnemonic}: missing operand {index}")]
    Missing { mnemonic: &'static str, index: usize },
    #[error("{mnemonic}: unexpected operand '{token}'")]
    Unexpected { mnemonic: &'static str, token: String },
}

/// `R` followed by exactly one decimal digit.
pub fn parse_reg(tok: &str) -> Result<Reg, OperandError> {
    let bad = || OperandError::BadRegister(tok.to_string());
    let digits = tok.strip_prefix('R').ok_or_else(bad)?;
    match digits.as_bytes() {
        [d] if d.is_ascii_digit() => Reg::new(d - b'0').ok_or_else(bad),
        _ => Err(bad()),
    }
}

pub fn parse_imm(tok: &str) -> Result<i32, OperandError> {
    tok.parse::<i32>()
        .map_err(|_| OperandError::BadImmediate(tok.to_string()))
}

pub fn parse_label(tok: &str) -> Result<String, OperandError> {
    if tok.is_empty() || tok.contains(':') {
        return Err(OperandError::BadLabel(tok.to_string()));
    }
    Ok(tok.to_string())
}
