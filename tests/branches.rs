use regvm::{load, CmpFlag, Cpu, CpuConfig, IntExecutor, LinearMemory, Status};

fn run(src: &str) -> Cpu {
    let prog = load(src).unwrap();
    let mut mem = LinearMemory::default();
    let mut cpu = Cpu::new(CpuConfig::default());
    cpu.run(&prog, &mut mem, &IntExecutor, &mut std::io::sink())
        .unwrap();
    cpu
}

fn flag_after(a: i32, b: i32, ra: &str, rb: &str) -> CmpFlag {
    run(&format!("LOAD R1, {a}\nLOAD R2, {b}\nCMP {ra}, {rb}")).flag
}

#[test]
fn cmp_sets_tristate_flag() {
    assert_eq!(flag_after(1, 2, "R1", "R2"), CmpFlag::Less);
    assert_eq!(flag_after(2, 2, "R1", "R2"), CmpFlag::Equal);
    assert_eq!(flag_after(3, 2, "R1", "R2"), CmpFlag::Greater);
    assert_eq!(flag_after(-5, 2, "R1", "R2"), CmpFlag::Less);
}

#[test]
fn cmp_is_antisymmetric() {
    for (a, b) in [(1, 2), (2, 2), (7, -3), (i32::MIN, i32::MAX)] {
        let fwd = flag_after(a, b, "R1", "R2");
        let rev = flag_after(a, b, "R2", "R1");
        let expect = match fwd {
            CmpFlag::Less => CmpFlag::Greater,
            CmpFlag::Equal => CmpFlag::Equal,
            CmpFlag::Greater => CmpFlag::Less,
        };
        assert_eq!(rev, expect, "a={a} b={b}");
    }
}

#[test]
fn counting_loop_terminates() {
    // R0 counts up by 1 until it equals R1
    let cpu = run("LOAD R0, 0\n\
                   LOAD R1, 3\n\
                   LOAD R2, 1\n\
                   LOAD R3, 0\n\
                   loop:\n\
                   ADD R0, R2\n\
                   ADD R3, R0\n\
                   CMP R0, R1\n\
                   JNE loop\n");
    assert_eq!(cpu.regs[0], 3);
    assert_eq!(cpu.regs[3], 1 + 2 + 3);
    assert_eq!(cpu.flag, CmpFlag::Equal);
}

#[test]
fn forward_label_resolves() {
    let cpu = run("LOAD R0, 1\n\
                   JMP skip\n\
                   LOAD R0, 99\n\
                   skip:\n\
                   LOAD R1, 2\n");
    assert_eq!(cpu.regs[0], 1);
    assert_eq!(cpu.regs[1], 2);
}

#[test]
fn conditional_jumps_follow_flag() {
    // each taken branch skips a poison LOAD into R9
    let cpu = run("LOAD R1, 1\n\
                   LOAD R2, 2\n\
                   CMP R1, R2\n\
                   JLT a\n\
                   LOAD R9, 1\n\
                   a:\n\
                   JGT bad\n\
                   JEQ bad\n\
                   CMP R2, R1\n\
                   JGT b\n\
                   LOAD R9, 2\n\
                   b:\n\
                   CMP R1, R1\n\
                   JEQ c\n\
                   LOAD R9, 3\n\
                   c:\n\
                   JNE bad\n\
                   JMP end\n\
                   bad:\n\
                   LOAD R9, 4\n\
                   end:\n");
    assert_eq!(cpu.regs[9], 0);
}

#[test]
fn jump_to_trailing_label_halts() {
    let cpu = run("JMP out\nLOAD R0, 1\nout:\n");
    assert_eq!(cpu.regs[0], 0);
    assert_eq!(cpu.pc, 2);
}

#[test]
fn step_reports_status() {
    let prog = load("LOAD R0, 1\nJMP end\nLOAD R0, 2\nend:").unwrap();
    let mut mem = LinearMemory::default();
    let mut cpu = Cpu::new(CpuConfig::default());
    let mut out = std::io::sink();
    assert_eq!(cpu.step(&prog, &mut mem, &IntExecutor, &mut out).unwrap(), Status::Running);
    assert_eq!(cpu.pc, 1);
    assert_eq!(cpu.step(&prog, &mut mem, &IntExecutor, &mut out).unwrap(), Status::Halted);
    assert_eq!(cpu.pc, 3);
    assert_eq!(cpu.step(&prog, &mut mem, &IntExecutor, &mut out).unwrap(), Status::Halted);
    assert_eq!(cpu.steps, 2);
}

#[test]
fn untaken_jump_to_missing_label_is_harmless() {
    let cpu = run("LOAD R0, 1\nCMP R0, R0\nJNE nowhere\nLOAD R1, 5");
    assert_eq!(cpu.regs[1], 5);
}
