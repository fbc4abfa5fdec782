use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Op {
    Load,
    Store,
    LoadM,
    Add,
    Sub,
    Mul,
    Div,
    Mov,
    Cmp,
    Jmp,
    Jne,
    Jeq,
    Jgt,
    Jlt,
    Print,
    And,
    Or,
    Xor,
    Not,
}

/// Operand layout of an opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// `Rd, imm`
    RegImm,
    /// `Rd, addr`
    RegAddr,
    /// `Rd, Rs`
    RegReg,
    /// `Rd`
    Reg,
    /// `label`
    Label,
}

impl Shape {
    pub fn arity(self) -> usize {
        match self {
            Shape::RegImm | Shape::RegAddr | Shape::RegReg => 2,
            Shape::Reg | Shape::Label => 1,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct InstrDesc {
    pub op: Op,
    pub mnemonic: &'static str,
    pub shape: Shape,
}

const fn desc(op: Op, mnemonic: &'static str, shape: Shape) -> InstrDesc {
    InstrDesc { op, mnemonic, shape }
}

pub const TABLE: &[InstrDesc] = &[
    desc(Op::Load, "LOAD", Shape::RegImm),
    desc(Op::Store, "STORE", Shape::RegAddr),
    desc(Op::LoadM, "LOADM", Shape::RegAddr),
    desc(Op::Add, "ADD", Shape::RegReg),
    desc(Op::Sub, "SUB", Shape::RegReg),
    desc(Op::Mul, "MUL", Shape::RegReg),
    desc(Op::Div, "DIV", Shape::RegReg),
    desc(Op::Mov, "MOV", Shape::RegReg),
    desc(Op::Cmp, "CMP", Shape::RegReg),
    desc(Op::Jmp, "JMP", Shape::Label),
    desc(Op::Jne, "JNE", Shape::Label),
    desc(Op::Jeq, "JEQ", Shape::Label),
    desc(Op::Jgt, "JGT", Shape::Label),
    desc(Op::Jlt, "JLT", Shape::Label),
    desc(Op::Print, "PRINT", Shape::Reg),
    desc(Op::And, "AND", Shape::RegReg),
    desc(Op::Or, "OR", Shape::RegReg),
    desc(Op::Xor, "XOR", Shape::RegReg),
    desc(Op::Not, "NOT", Shape::Reg),
];

/// Exact, case-sensitive mnemonic lookup.
pub fn lookup(mnemonic: &str) -> Option<&'static InstrDesc> {
    TABLE.iter().find(|d| d.mnemonic == mnemonic)
}

impl Op {
    pub fn desc(self) -> &'static InstrDesc {
        // every variant has exactly one row
        TABLE
            .iter()
            .find(|d| d.op == self)
            .unwrap_or_else(|| unreachable!("{self:?} missing from TABLE"))
    }

    pub fn mnemonic(self) -> &'static str {
        self.desc().mnemonic
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
