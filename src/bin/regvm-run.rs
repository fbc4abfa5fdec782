use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use regvm::{load, Cpu, CpuConfig, IntExecutor, LinearMemory};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Run a register-machine assembly program"
)]
struct Opts {
    /// Stop with an error after N instructions (default: unlimited)
    #[arg(long, value_name = "N")]
    max_steps: Option<u64>,
    /// Write the final machine state as JSON after a normal halt
    #[arg(long, value_name = "FILE")]
    state_json: Option<PathBuf>,
    #[arg(value_name = "PROGRAM")]
    input: PathBuf,
}

fn run(opts: &Opts) -> Result<()> {
    let text = std::fs::read_to_string(&opts.input)
        .with_context(|| format!("Cannot open file {}", opts.input.display()))?;
    let prog = load(&text)?;

    let mut cpu = Cpu::new(CpuConfig {
        max_steps: opts.max_steps,
    });
    let mut mem = LinearMemory::default();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    cpu.run(&prog, &mut mem, &IntExecutor, &mut out)?;
    cpu.dump_registers(&mut out)?;

    if let Some(path) = &opts.state_json {
        let json = serde_json::to_string_pretty(&cpu)?;
        std::fs::write(path, json)
            .with_context(|| format!("Cannot write state to {}", path.display()))?;
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let opts = match Opts::try_parse() {
        Ok(opts) => opts,
        Err(e) => {
            // --help and --version land here too
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(&opts) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
