use crate::exec::Executor;
use crate::loader::Program;
use crate::memory::{Bus, BusError};
use crate::operand::NUM_REGS;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::io::{self, Write};
use tracing::{trace, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpuConfig {
    /// Abort with [`Trap::StepLimit`] after this many retired instructions.
    pub max_steps: Option<u64>,
}

/// Result of the last CMP.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CmpFlag {
    Less,
    #[default]
    Equal,
    Greater,
}

impl From<Ordering> for CmpFlag {
    fn from(o: Ordering) -> Self {
        match o {
            Ordering::Less => CmpFlag::Less,
            Ordering::Equal => CmpFlag::Equal,
            Ordering::Greater => CmpFlag::Greater,
        }
    }
}

/// Where a trap happened: instruction address and its source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Site {
    pub pc: usize,
    pub line: usize,
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {} (pc {})", self.line, self.pc)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Trap {
    #[error("{at}: undefined label {label}")]
    UndefinedLabel { at: Site, label: String },
    #[error("{at}: division by zero")]
    DivisionByZero { at: Site },
    #[error("{at}: memory access out of bounds: {source}")]
    MemoryOutOfBounds {
        at: Site,
        #[source]
        source: BusError,
    },
    #[error("step limit of {limit} instructions reached")]
    StepLimit { limit: u64 },
    #[error("output error: {0}")]
    Output(#[from] io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    Halted,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cpu {
    pub pc: usize,
    pub regs: [i32; NUM_REGS],
    pub flag: CmpFlag,
    /// Instructions retired since reset
    pub steps: u64,
    pub cfg: CpuConfig,
}

impl Cpu {
    pub fn new(cfg: CpuConfig) -> Self {
        Self {
            pc: 0,
            regs: [0; NUM_REGS],
            flag: CmpFlag::default(),
            steps: 0,
            cfg,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.cfg);
    }

    pub fn status(&self, prog: &Program) -> Status {
        if self.pc < prog.len() {
            Status::Running
        } else {
            Status::Halted
        }
    }

    /// Executes one instruction. Stepping a halted machine is a no-op.
    pub fn step<B: Bus, X: Executor, W: Write>(
        &mut self,
        prog: &Program,
        bus: &mut B,
        exec: &X,
        out: &mut W,
    ) -> Result<Status, Trap> {
        let pc = self.pc;
        let Some(insn) = prog.get(pc) else {
            return Ok(Status::Halted);
        };
        if let Some(limit) = self.cfg.max_steps {
            if self.steps >= limit {
                return Err(Trap::StepLimit { limit });
            }
        }
        let at = Site {
            pc,
            line: prog.line_of(pc).unwrap_or_default(),
        };
        trace!(pc, line = at.line, insn = %insn, "step");
        // jumps overwrite this
        self.pc = pc + 1;
        exec.exec(self, bus, prog, insn, at, out)?;
        self.steps += 1;
        Ok(self.status(prog))
    }

    /// Runs until the pc leaves the program or a trap is raised.
    pub fn run<B: Bus, X: Executor, W: Write>(
        &mut self,
        prog: &Program,
        bus: &mut B,
        exec: &X,
        out: &mut W,
    ) -> Result<(), Trap> {
        loop {
            match self.step(prog, bus, exec, out) {
                Ok(Status::Running) => {}
                Ok(Status::Halted) => return Ok(()),
                Err(trap) => {
                    warn!(%trap, steps = self.steps, "machine trapped");
                    return Err(trap);
                }
            }
        }
    }

    pub fn dump_registers<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for (i, v) in self.regs.iter().enumerate() {
            writeln!(out, "R{i} = {v}")?;
        }
        out.flush()
    }
}
