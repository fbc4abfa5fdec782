use serde::{Deserialize, Serialize};

pub const MEMORY_WORDS: usize = 1000;

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusError {
    #[error("address {addr} outside [0, {size})")]
    OutOfBounds { addr: i32, size: usize },
}

/// Word-addressed data memory.
pub trait Bus {
    fn read_word(&self, addr: i32) -> Result<i32, BusError>;
    fn write_word(&mut self, addr: i32, val: i32) -> Result<(), BusError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinearMemory {
    pub mem: Vec<i32>,
}

impl LinearMemory {
    pub fn new(size: usize) -> Self {
        Self { mem: vec![0; size] }
    }

    fn offset(&self, addr: i32) -> Result<usize, BusError> {
        usize::try_from(addr)
            .ok()
            .filter(|&off| off < self.mem.len())
            .ok_or(BusError::OutOfBounds {
                addr,
                size: self.mem.len(),
            })
    }
}

impl Default for LinearMemory {
    fn default() -> Self {
        Self::new(MEMORY_WORDS)
    }
}

impl Bus for LinearMemory {
    fn read_word(&self, addr: i32) -> Result<i32, BusError> {
        Ok(self.mem[self.offset(addr)?])
    }
    fn write_word(&mut self, addr: i32, val: i32) -> Result<(), BusError> {
        let off = self.offset(addr)?;
        self.mem[off] = val;
        Ok(())
    }
}
