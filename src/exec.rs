use crate::cpu::{CmpFlag, Cpu, Site, Trap};
use crate::decoder::Instruction;
use crate::loader::Program;
use crate::memory::Bus;
use std::io::Write;

pub trait Executor {
    /// Applies `insn`. On entry `cpu.pc` already points past it; jumps overwrite it.
    fn exec<B: Bus, W: Write>(
        &self,
        cpu: &mut Cpu,
        bus: &mut B,
        prog: &Program,
        insn: &Instruction,
        at: Site,
        out: &mut W,
    ) -> Result<(), Trap>;
}

/// 32-bit wrapping integer semantics.
pub struct IntExecutor;

impl Executor for IntExecutor {
    fn exec<B: Bus, W: Write>(
        &self,
        cpu: &mut Cpu,
        bus: &mut B,
        prog: &Program,
        insn: &Instruction,
        at: Site,
        out: &mut W,
    ) -> Result<(), Trap> {
        let r = &mut cpu.regs;
        match insn {
            Instruction::Load { rd, imm } => {
                r[rd.index()] = *imm;
            }
            Instruction::Store { rs, addr } => {
                bus.write_word(*addr, r[rs.index()])
                    .map_err(|source| Trap::MemoryOutOfBounds { at, source })?;
            }
            Instruction::LoadM { rd, addr } => {
                r[rd.index()] = bus
                    .read_word(*addr)
                    .map_err(|source| Trap::MemoryOutOfBounds { at, source })?;
            }
            Instruction::Add { rd, rs } => {
                r[rd.index()] = r[rd.index()].wrapping_add(r[rs.index()]);
            }
            Instruction::Sub { rd, rs } => {
                r[rd.index()] = r[rd.index()].wrapping_sub(r[rs.index()]);
            }
            Instruction::Mul { rd, rs } => {
                r[rd.index()] = r[rd.index()].wrapping_mul(r[rs.index()]);
            }
            Instruction::Div { rd, rs } => {
                let divisor = r[rs.index()];
                if divisor == 0 {
                    return Err(Trap::DivisionByZero { at });
                }
                // i32::MIN / -1 wraps to i32::MIN
                r[rd.index()] = r[rd.index()].wrapping_div(divisor);
            }
            Instruction::Mov { rd, rs } => {
                r[rd.index()] = r[rs.index()];
            }
            Instruction::Cmp { ra, rb } => {
                cpu.flag = CmpFlag::from(r[ra.index()].cmp(&r[rb.index()]));
            }
            Instruction::Jmp { label } => jump(cpu, prog, label, at, true)?,
            Instruction::Jne { label } => {
                let taken = cpu.flag != CmpFlag::Equal;
                jump(cpu, prog, label, at, taken)?
            }
            Instruction::Jeq { label } => {
                let taken = cpu.flag == CmpFlag::Equal;
                jump(cpu, prog, label, at, taken)?
            }
            Instruction::Jgt { label } => {
                let taken = cpu.flag == CmpFlag::Greater;
                jump(cpu, prog, label, at, taken)?
            }
            Instruction::Jlt { label } => {
                let taken = cpu.flag == CmpFlag::Less;
                jump(cpu, prog, label, at, taken)?
            }
            Instruction::Print { rd } => {
                writeln!(out, "Value in {rd}: {}", r[rd.index()])?;
                out.flush()?;
            }
            Instruction::And { rd, rs } => {
                r[rd.index()] &= r[rs.index()];
            }
            Instruction::Or { rd, rs } => {
                r[rd.index()] |= r[rs.index()];
            }
            Instruction::Xor { rd, rs } => {
                r[rd.index()] ^= r[rs.index()];
            }
            Instruction::Not { rd } => {
                r[rd.index()] = !r[rd.index()];
            }
        }
        Ok(())
    }
}

/// Labels are looked up only when the jump is taken.
fn jump(cpu: &mut Cpu, prog: &Program, label: &str, at: Site, taken: bool) -> Result<(), Trap> {
    if taken {
        cpu.pc = prog
            .labels
            .resolve(label)
            .map_err(|e| Trap::UndefinedLabel { at, label: e.0 })?;
    }
    Ok(())
}
