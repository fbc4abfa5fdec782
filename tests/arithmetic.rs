use regvm::{load, Cpu, CpuConfig, IntExecutor, LinearMemory};

fn regs_after(src: &str) -> [i32; 10] {
    let prog = load(src).unwrap();
    let mut mem = LinearMemory::default();
    let mut cpu = Cpu::new(CpuConfig::default());
    cpu.run(&prog, &mut mem, &IntExecutor, &mut std::io::sink())
        .unwrap();
    cpu.regs
}

#[test]
fn straight_line_fold() {
    let r = regs_after(
        "LOAD R0, 10\n\
         LOAD R1, 4\n\
         LOAD R2, 3\n\
         SUB R0, R1\n\
         MUL R0, R2\n\
         MOV R3, R0\n\
         DIV R3, R1\n\
         ADD R3, R2\n",
    );
    // (10 - 4) * 3 = 18; 18 / 4 = 4; 4 + 3 = 7
    assert_eq!(r[0], 18);
    assert_eq!(r[3], 7);
    assert_eq!(&r[4..], &[0; 6]);
}

#[test]
fn division_truncates_toward_zero() {
    let r = regs_after("LOAD R0, -7\nLOAD R1, 2\nDIV R0, R1\nLOAD R2, 7\nLOAD R3, -2\nDIV R2, R3");
    assert_eq!(r[0], -3);
    assert_eq!(r[2], -3);
}

#[test]
fn arithmetic_wraps() {
    let r = regs_after(
        "LOAD R0, 2147483647\n\
         LOAD R1, 1\n\
         ADD R0, R1\n\
         LOAD R2, -2147483648\n\
         LOAD R3, -1\n\
         DIV R2, R3\n\
         LOAD R4, 65536\n\
         MUL R4, R4\n",
    );
    assert_eq!(r[0], i32::MIN);
    assert_eq!(r[2], i32::MIN);
    assert_eq!(r[4], 0);
}

#[test]
fn and_or_xor_not() {
    let r = regs_after(
        "LOAD R1, 61680\n\
         LOAD R2, 4080\n\
         MOV R3, R1\n\
         AND R3, R2\n\
         MOV R4, R1\n\
         OR R4, R2\n\
         MOV R5, R1\n\
         XOR R5, R2\n\
         LOAD R6, 0\n\
         NOT R6\n\
         MOV R7, R1\n\
         NOT R7\n",
    );
    assert_eq!(r[3], 0x00F0);
    assert_eq!(r[4], 0xFFF0);
    assert_eq!(r[5], 0xFF00);
    assert_eq!(r[6], -1);
    assert_eq!(r[7], !0xF0F0);
}

#[test]
fn register_aliasing() {
    let r = regs_after("LOAD R0, 6\nADD R0, R0\nMUL R0, R0\nSUB R1, R1\nXOR R0, R0");
    assert_eq!(r[0], 0);
    assert_eq!(r[1], 0);
}
