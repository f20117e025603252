//! SFMT check CLI
//!
//! Usage: sfmt_check [options]
//!
//! Options:
//!   --mexp <M>       Mersenne exponent of the parameter set (default: 19937)
//!   -p, --params     Print the parameter set
//!   -b32, --check    Print the check output and verify bulk against single output (default)
//!   -s, --speed      Compare bulk and single generation speed
//!   --help, -h       Show help
//!
//! Example: sfmt_check --mexp 607 -b32 > SFMT.607.out.txt

use sfmt_engine::domain::reference_format::format_check_output;
use sfmt_engine::{
    DEFAULT_MEXP, ParameterSet, REFERENCE_BLOCK, REFERENCE_KEY, REFERENCE_PRINTED, REFERENCE_SEED,
    SUPPORTED_MEXPS, Sfmt, SfmtError,
};
use std::env;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Values compared from the second bulk block, as the published check does
const SECOND_BLOCK_CHECKED: usize = 700;

/// Timed repetitions per speed measurement
const SPEED_ROUNDS: usize = 10;

/// Blocks generated per speed repetition
const SPEED_BLOCKS: usize = 100;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    Params,
    Check,
    Speed,
}

struct Args {
    mexp: u32,
    mode: Mode,
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} [options]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --mexp <M>       Mersenne exponent (default: {})", DEFAULT_MEXP);
    eprintln!("  -p, --params     Print the parameter set");
    eprintln!("  -b32, --check    Print the check output and verify bulk output (default)");
    eprintln!("  -s, --speed      Compare bulk and single generation speed");
    eprintln!("  --help, -h       Show this help message");
    eprintln!();
    eprintln!("Supported MEXP values: {:?}", SUPPORTED_MEXPS);
}

fn parse_args() -> Result<Args, String> {
    let args: Vec<String> = env::args().collect();

    let mut mexp = DEFAULT_MEXP;
    let mut mode = Mode::Check;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--mexp" => {
                i += 1;
                let value = args.get(i).ok_or("Missing value for --mexp")?;
                mexp = value
                    .parse()
                    .map_err(|_| format!("Invalid MEXP value: {}", value))?;
            }
            "-p" | "--params" => mode = Mode::Params,
            "-b32" | "--check" => mode = Mode::Check,
            "-s" | "--speed" => mode = Mode::Speed,
            "--help" | "-h" => {
                print_usage(&args[0]);
                std::process::exit(0);
            }
            _ => return Err(format!("Unknown option: {}", args[i])),
        }
        i += 1;
    }

    Ok(Args { mexp, mode })
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
}

/// Two bulk blocks and the single-value run that must reproduce them
fn verify_blocks(mut bulk: Sfmt, mut single: Sfmt) -> Result<Vec<u32>, String> {
    let mut first = vec![0u32; REFERENCE_BLOCK];
    let mut second = vec![0u32; REFERENCE_BLOCK];
    bulk.fill_array32(&mut first).map_err(|e| e.to_string())?;
    bulk.fill_array32(&mut second).map_err(|e| e.to_string())?;

    let expected = first.iter().chain(&second[..SECOND_BLOCK_CHECKED]);
    for (i, &value) in expected.enumerate() {
        let r = single.gen_rand_u32().map_err(|e| e.to_string())?;
        if r != value {
            return Err(format!(
                "mismatch at {} array32:{:x} gen:{:x}",
                i, value, r
            ));
        }
    }

    first.truncate(REFERENCE_PRINTED);
    Ok(first)
}

fn run_check(params: &'static ParameterSet) -> Result<(), String> {
    let gen_rand = verify_blocks(
        Sfmt::from_seed(params, REFERENCE_SEED),
        Sfmt::from_seed(params, REFERENCE_SEED),
    )?;
    let by_array = verify_blocks(
        Sfmt::from_key(params, &REFERENCE_KEY),
        Sfmt::from_key(params, &REFERENCE_KEY),
    )?;

    print!("{}", format_check_output(params, &gen_rand, &by_array));
    tracing::info!(mexp = params.mexp, "bulk output matches single output");
    Ok(())
}

fn run_speed(params: &'static ParameterSet) -> Result<(), SfmtError> {
    let mut buf = vec![0u32; REFERENCE_BLOCK];
    let total = (REFERENCE_BLOCK * SPEED_BLOCKS) as u64;

    let mut sfmt = Sfmt::from_seed(params, REFERENCE_SEED);
    let mut best_block = f64::MAX;
    for _ in 0..SPEED_ROUNDS {
        let start = Instant::now();
        for _ in 0..SPEED_BLOCKS {
            sfmt.fill_array32(&mut buf)?;
        }
        best_block = best_block.min(start.elapsed().as_secs_f64());
    }

    let mut sfmt = Sfmt::from_seed(params, REFERENCE_SEED);
    let mut best_seq = f64::MAX;
    let mut acc = 0u32;
    for _ in 0..SPEED_ROUNDS {
        let start = Instant::now();
        for _ in 0..total {
            acc ^= sfmt.gen_rand_u32()?;
        }
        best_seq = best_seq.min(start.elapsed().as_secs_f64());
    }

    println!("{}", params.id_string());
    println!("32 bit BLOCK:{:.0}ms for {} randoms generation", best_block * 1000.0, total);
    println!("32 bit SEQUE:{:.0}ms for {} randoms generation", best_seq * 1000.0, total);
    tracing::debug!(checksum = acc, "sequential speed run finished");
    Ok(())
}

fn main() {
    let args = match parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            print_usage(&env::args().next().unwrap_or_default());
            std::process::exit(1);
        }
    };

    init_logging();

    let params = match ParameterSet::for_mexp(args.mexp) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Supported MEXP values: {:?}", SUPPORTED_MEXPS);
            std::process::exit(1);
        }
    };

    let result = match args.mode {
        Mode::Params => {
            print!("{}", params.dump());
            Ok(())
        }
        Mode::Check => run_check(params),
        Mode::Speed => run_speed(params).map_err(|e| e.to_string()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
