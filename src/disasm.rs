use crate::decoder::Instruction;
use std::fmt;

pub fn fmt_instruction(i: &Instruction) -> String {
    let mn = i.op().mnemonic();
    match i {
        Instruction::Load { rd, imm } => format!("{mn} {rd}, {imm}"),
        Instruction::Store { rs, addr } => format!("{mn} {rs}, {addr}"),
        Instruction::LoadM { rd, addr } => format!("{mn} {rd}, {addr}"),
        Instruction::Add { rd, rs }
        | Instruction::Sub { rd, rs }
        | Instruction::Mul { rd, rs }
        | Instruction::Div { rd, rs }
        | Instruction::Mov { rd, rs }
        | Instruction::And { rd, rs }
        | Instruction::Or { rd, rs }
        | Instruction::Xor { rd, rs } => rr(mn, *rd, *rs),
        Instruction::Cmp { ra, rb } => rr(mn, *ra, *rb),
        Instruction::Jmp { label }
        | Instruction::Jne { label }
        | Instruction::Jeq { label }
        | Instruction::Jgt { label }
        | Instruction::Jlt { label } => format!("{mn} {label}"),
        Instruction::Print { rd } | Instruction::Not { rd } => format!("{mn} {rd}"),
    }
}

fn rr(mn: &str, a: crate::operand::Reg, b: crate::operand::Reg) -> String {
    format!("{mn} {a}, {b}")
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&fmt_instruction(self))
    }
}
