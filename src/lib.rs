pub mod cpu;
pub mod decoder;
pub mod disasm;
pub mod exec;
pub mod instructions;
pub mod labels;
pub mod loader;
pub mod memory;
pub mod operand;

pub use cpu::{CmpFlag, Cpu, CpuConfig, Site, Status, Trap};
pub use decoder::Instruction;
pub use exec::{Executor, IntExecutor};
pub use labels::{LabelTable, UndefinedLabel};
pub use loader::{load, LoadError, Program};
pub use memory::{Bus, BusError, LinearMemory, MEMORY_WORDS};
pub use operand::{OperandError, Reg, NUM_REGS};
