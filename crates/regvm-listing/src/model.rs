use regvm::Program;
use serde::Serialize;
use std::fmt::Write;

#[derive(Debug, Clone, Serialize)]
pub struct Line {
    pub addr: usize,
    /// 1-based source line
    pub line: usize,
    /// Labels bound to this address
    pub labels: Vec<String>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    pub addr: usize,
    pub line: usize,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Listing {
    pub lines: Vec<Line>,
    /// Labels that bind past the last instruction (jumping there halts)
    pub trailing_labels: Vec<String>,
    pub warnings: Vec<Warning>,
}

pub fn build_listing(prog: &Program) -> Listing {
    let mut by_addr: Vec<Vec<String>> = vec![Vec::new(); prog.len() + 1];
    for (name, e) in prog.labels.iter() {
        by_addr[e.addr].push(name.to_string());
    }
    let trailing_labels = by_addr.pop().unwrap_or_default();

    let lines = prog
        .instructions
        .iter()
        .zip(by_addr)
        .enumerate()
        .map(|(addr, (insn, labels))| Line {
            addr,
            line: prog.line_of(addr).unwrap_or_default(),
            labels,
            text: insn.to_string(),
        })
        .collect();

    let warnings = prog
        .undefined_targets()
        .into_iter()
        .map(|(addr, label)| Warning {
            addr,
            line: prog.line_of(addr).unwrap_or_default(),
            message: format!("jump to undefined label '{label}'"),
        })
        .collect();

    Listing {
        lines,
        trailing_labels,
        warnings,
    }
}

pub fn render_text(l: &Listing) -> String {
    let mut buf = String::new();
    for line in &l.lines {
        for name in &line.labels {
            let _ = writeln!(buf, "{name}:");
        }
        let _ = writeln!(buf, "{:04}  {:>4} | {}", line.addr, line.line, line.text);
    }
    for name in &l.trailing_labels {
        let _ = writeln!(buf, "{name}:");
    }
    for w in &l.warnings {
        let _ = writeln!(buf, "warning: line {}: {}", w.line, w.message);
    }
    buf
}
