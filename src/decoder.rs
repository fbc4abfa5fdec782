use crate::instructions::{InstrDesc, Op, Shape};
use crate::operand::{parse_imm, parse_label, parse_reg, OperandError, Reg};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Instruction {
    Load { rd: Reg, imm: i32 },
    Store { rs: Reg, addr: i32 },
    LoadM { rd: Reg, addr: i32 },
    Add { rd: Reg, rs: Reg },
    Sub { rd: Reg, rs: Reg },
    Mul { rd: Reg, rs: Reg },
    Div { rd: Reg, rs: Reg },
    Mov { rd: Reg, rs: Reg },
    Cmp { ra: Reg, rb: Reg },
    Jmp { label: String },
    Jne { label: String },
    Jeq { label: String },
    Jgt { label: String },
    Jlt { label: String },
    Print { rd: Reg },
    And { rd: Reg, rs: Reg },
    Or { rd: Reg, rs: Reg },
    Xor { rd: Reg, rs: Reg },
    Not { rd: Reg },
}

impl Instruction {
    pub fn op(&self) -> Op {
        match self {
            Instruction::Load { .. } => Op::Load,
            Instruction::Store { .. } => Op::Store,
            Instruction::LoadM { .. } => Op::LoadM,
            Instruction::Add { .. } => Op::Add,
            Instruction::Sub { .. } => Op::Sub,
            Instruction::Mul { .. } => Op::Mul,
            Instruction::Div { .. } => Op::Div,
            Instruction::Mov { .. } => Op::Mov,
            Instruction::Cmp { .. } => Op::Cmp,
            Instruction::Jmp { .. } => Op::Jmp,
            Instruction::Jne { .. } => Op::Jne,
            Instruction::Jeq { .. } => Op::Jeq,
            Instruction::Jgt { .. } => Op::Jgt,
            Instruction::Jlt { .. } => Op::Jlt,
            Instruction::Print { .. } => Op::Print,
            Instruction::And { .. } => Op::And,
            Instruction::Or { .. } => Op::Or,
            Instruction::Xor { .. } => Op::Xor,
            Instruction::Not { .. } => Op::Not,
        }
    }

    /// Jump target, if this is one of the jump family.
    pub fn target(&self) -> Option<&str> {
        match self {
            Instruction::Jmp { label }
            | Instruction::Jne { label }
            | Instruction::Jeq { label }
            | Instruction::Jgt { label }
            | Instruction::Jlt { label } => Some(label),
            _ => None,
        }
    }
}

enum Operands {
    RegImm(Reg, i32),
    RegReg(Reg, Reg),
    Reg(Reg),
    Label(String),
}

/// Builds a typed instruction from a descriptor and its raw operand tokens.
pub fn decode(desc: &InstrDesc, tokens: &[&str]) -> Result<Instruction, OperandError> {
    let arity = desc.shape.arity();
    if let Some(extra) = tokens.get(arity) {
        return Err(OperandError::Unexpected {
            mnemonic: desc.mnemonic,
            token: extra.to_string(),
        });
    }
    let tok = |index: usize| {
        tokens.get(index).copied().ok_or(OperandError::Missing {
            mnemonic: desc.mnemonic,
            index: index + 1,
        })
    };

    let ops = match desc.shape {
        Shape::RegImm | Shape::RegAddr => {
            Operands::RegImm(parse_reg(tok(0)?)?, parse_imm(tok(1)?)?)
        }
        Shape::RegReg => Operands::RegReg(parse_reg(tok(0)?)?, parse_reg(tok(1)?)?),
        Shape::Reg => Operands::Reg(parse_reg(tok(0)?)?),
        Shape::Label => Operands::Label(parse_label(tok(0)?)?),
    };

    let insn = match (desc.op, ops) {
        (Op::Load, Operands::RegImm(rd, imm)) => Instruction::Load { rd, imm },
        (Op::Store, Operands::RegImm(rs, addr)) => Instruction::Store { rs, addr },
        (Op::LoadM, Operands::RegImm(rd, addr)) => Instruction::LoadM { rd, addr },
        (Op::Add, Operands::RegReg(rd, rs)) => Instruction::Add { rd, rs },
        (Op::Sub, Operands::RegReg(rd, rs)) => Instruction::Sub { rd, rs },
        (Op::Mul, Operands::RegReg(rd, rs)) => Instruction::Mul { rd, rs },
        (Op::Div, Operands::RegReg(rd, rs)) => Instruction::Div { rd, rs },
        (Op::Mov, Operands::RegReg(rd, rs)) => Instruction::Mov { rd, rs },
        (Op::Cmp, Operands::RegReg(ra, rb)) => Instruction::Cmp { ra, rb },
        (Op::Jmp, Operands::Label(label)) => Instruction::Jmp { label },
        (Op::Jne, Operands::Label(label)) => Instruction::Jne { label },
        (Op::Jeq, Operands::Label(label)) => Instruction::Jeq { label },
        (Op::Jgt, Operands::Label(label)) => Instruction::Jgt { label },
        (Op::Jlt, Operands::Label(label)) => Instruction::Jlt { label },
        (Op::Print, Operands::Reg(rd)) => Instruction::Print { rd },
        (Op::And, Operands::RegReg(rd, rs)) => Instruction::And { rd, rs },
        (Op::Or, Operands::RegReg(rd, rs)) => Instruction::Or { rd, rs },
        (Op::Xor, Operands::RegReg(rd, rs)) => Instruction::Xor { rd, rs },
        (Op::Not, Operands::Reg(rd)) => Instruction::Not { rd },
        (op, _) => unreachable!("TABLE shape mismatch for {op:?}"),
    };
    Ok(insn)
}
