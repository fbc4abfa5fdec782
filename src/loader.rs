use crate::decoder::{decode, Instruction};
use crate::instructions::lookup;
use crate::labels::LabelTable;
use crate::operand::OperandError;
use serde::{Deserialize, Serialize};
use tracing::debug;

const COMMENT_CHAR: char = ';';
const LABEL_SUFFIX: char = ':';

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("line {line}: unknown instruction {mnemonic}")]
    UnknownInstruction { line: usize, mnemonic: String },
    #[error("line {line}: {source}")]
    Operand {
        line: usize,
        #[source]
        source: OperandError,
    },
    #[error("line {line}: empty label name")]
    EmptyLabel { line: usize },
    #[error("line {line}: unexpected text after label '{name}'")]
    TrailingLabelText { line: usize, name: String },
    #[error("line {line}: label '{name}' already defined on line {first}")]
    DuplicateLabel {
        line: usize,
        name: String,
        first: usize,
    },
}

impl LoadError {
    pub fn line(&self) -> usize {
        match self {
            LoadError::UnknownInstruction { line, .. }
            | LoadError::Operand { line, .. }
            | LoadError::EmptyLabel { line }
            | LoadError::TrailingLabelText { line, .. }
            | LoadError::DuplicateLabel { line, .. } => *line,
        }
    }
}

/// A loaded program: instructions in execution order plus the label table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub instructions: Vec<Instruction>,
    pub labels: LabelTable,
    /// 1-based source line of each instruction
    pub lines: Vec<usize>,
}

impl Program {
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn get(&self, addr: usize) -> Option<&Instruction> {
        self.instructions.get(addr)
    }

    pub fn line_of(&self, addr: usize) -> Option<usize> {
        self.lines.get(addr).copied()
    }

    /// Jump sites whose target is not in the label table, as (address, label).
    pub fn undefined_targets(&self) -> Vec<(usize, &str)> {
        self.instructions
            .iter()
            .enumerate()
            .filter_map(|(addr, i)| i.target().map(|t| (addr, t)))
            .filter(|(_, t)| !self.labels.contains(t))
            .collect()
    }
}

enum Line<'a> {
    Label(&'a str),
    Instr(&'a str, Vec<&'a str>),
}

fn classify(raw: &str, line: usize) -> Result<Option<Line<'_>>, LoadError> {
    let s = match raw.find(COMMENT_CHAR) {
        Some(p) => &raw[..p],
        None => raw,
    };
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }
    if let Some((name, rest)) = s.split_once(LABEL_SUFFIX) {
        let name = name.trim();
        if name.is_empty() {
            return Err(LoadError::EmptyLabel { line });
        }
        if !rest.trim().is_empty() {
            return Err(LoadError::TrailingLabelText {
                line,
                name: name.to_string(),
            });
        }
        return Ok(Some(Line::Label(name)));
    }
    let mut toks = s
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty());
    // s is non-empty after trim, so at least one token exists
    let mn = toks.next().unwrap_or_default();
    Ok(Some(Line::Instr(mn, toks.collect())))
}

/// Parses program text into instructions and labels.
///
/// Labels bind to the address of the next instruction emitted; label lines
/// themselves take no slot. Jump targets are not checked here, they are
/// resolved when the jump executes.
pub fn load(text: &str) -> Result<Program, LoadError> {
    let mut prog = Program::default();
    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        match classify(raw, line)? {
            None => {}
            Some(Line::Label(name)) => {
                let addr = prog.instructions.len();
                prog.labels
                    .define(name, addr, line)
                    .map_err(|prev| LoadError::DuplicateLabel {
                        line,
                        name: name.to_string(),
                        first: prev.line,
                    })?;
                debug!(label = name, addr, line, "label");
            }
            Some(Line::Instr(mn, operands)) => {
                let desc = lookup(mn).ok_or_else(|| LoadError::UnknownInstruction {
                    line,
                    mnemonic: mn.to_string(),
                })?;
                let insn = decode(desc, &operands)
                    .map_err(|source| LoadError::Operand { line, source })?;
                prog.instructions.push(insn);
                prog.lines.push(line);
            }
        }
    }
    debug!(
        instructions = prog.instructions.len(),
        labels = prog.labels.len(),
        "program loaded"
    );
    Ok(prog)
}
