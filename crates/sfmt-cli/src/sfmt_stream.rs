//! SFMT byte stream CLI
//!
//! Usage: sfmt_stream [options]
//!
//! Writes generator output as little-endian 32-bit words, for piping into
//! statistical test suites or saving to a file.
//!
//! Options:
//!   --mexp <M>          Mersenne exponent of the parameter set (default: 19937)
//!   --seed <S>          Seed with init_gen_rand
//!   --key <K1,K2,..>    Seed with init_by_array (default: 0x1234,0x5678,0x9abc,0xdef0)
//!   --count <C>         Number of 32-bit values to write (default: unbounded)
//!   --output <PATH>     Output file (default: stdout)
//!   --help, -h          Show help
//!
//! Example: sfmt_stream --seed 4357 --count 1000000 --output sfmt.bin

use sfmt_engine::infra::stream_io::{StreamError, write_u32_stream};
use sfmt_engine::{DEFAULT_MEXP, ParameterSet, REFERENCE_KEY, SUPPORTED_MEXPS, Sfmt};
use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use tracing_subscriber::EnvFilter;

/// Values written per call when the stream is unbounded
const CHUNK: u64 = 1 << 16;

enum Seeding {
    Seed(u32),
    Key(Vec<u32>),
}

struct Args {
    mexp: u32,
    seeding: Seeding,
    count: Option<u64>,
    output: Option<String>,
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} [options]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --mexp <M>          Mersenne exponent (default: {})", DEFAULT_MEXP);
    eprintln!("  --seed <S>          Seed with init_gen_rand");
    eprintln!("  --key <K1,K2,..>    Seed with init_by_array (default: reference key)");
    eprintln!("  --count <C>         Number of 32-bit values (default: unbounded)");
    eprintln!("  --output <PATH>     Output file (default: stdout)");
    eprintln!("  --help, -h          Show this help message");
    eprintln!();
    eprintln!("Supported MEXP values: {:?}", SUPPORTED_MEXPS);
}

/// Parse a decimal or 0x-prefixed hexadecimal u32
fn parse_u32(s: &str) -> Result<u32, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|_| format!("Invalid 32-bit value: {}", s))
}

fn parse_args() -> Result<Args, String> {
    let args: Vec<String> = env::args().collect();

    let mut mexp = DEFAULT_MEXP;
    let mut seeding: Option<Seeding> = None;
    let mut count: Option<u64> = None;
    let mut output: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        let option = args[i].as_str();
        match option {
            "--help" | "-h" => {
                print_usage(&args[0]);
                std::process::exit(0);
            }
            "--mexp" | "--seed" | "--key" | "--count" | "--output" => {
                i += 1;
                let value = args
                    .get(i)
                    .ok_or_else(|| format!("Missing value for {}", option))?;

                match option {
                    "--mexp" => {
                        mexp = value
                            .parse()
                            .map_err(|_| format!("Invalid MEXP value: {}", value))?
                    }
                    "--seed" | "--key" if seeding.is_some() => {
                        return Err("Only one of --seed and --key may be given".to_string());
                    }
                    "--seed" => seeding = Some(Seeding::Seed(parse_u32(value)?)),
                    "--key" => {
                        let key = value
                            .split(',')
                            .filter(|k| !k.is_empty())
                            .map(parse_u32)
                            .collect::<Result<Vec<_>, _>>()?;
                        seeding = Some(Seeding::Key(key));
                    }
                    "--count" => {
                        count = Some(
                            value
                                .parse()
                                .map_err(|_| format!("Invalid count: {}", value))?,
                        )
                    }
                    _ => output = Some(value.clone()),
                }
            }
            _ => return Err(format!("Unknown option: {}", option)),
        }
        i += 1;
    }

    Ok(Args {
        mexp,
        seeding: seeding.unwrap_or_else(|| Seeding::Key(REFERENCE_KEY.to_vec())),
        count,
        output,
    })
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();
}

fn run(args: Args, params: &'static ParameterSet) -> Result<(), StreamError> {
    let mut sfmt = match &args.seeding {
        Seeding::Seed(seed) => Sfmt::from_seed(params, *seed),
        Seeding::Key(key) => Sfmt::from_key(params, key),
    };

    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    match args.count {
        Some(count) => {
            write_u32_stream(&mut writer, &mut sfmt, count)?;
            tracing::info!(mexp = params.mexp, count, "stream written");
        }
        None => loop {
            write_u32_stream(&mut writer, &mut sfmt, CHUNK)?;
        },
    }

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

    match run(args, params) {
        Ok(()) => {}
        // reader went away, e.g. `sfmt_stream | head -c 100`
        Err(StreamError::Io(e)) if e.kind() == io::ErrorKind::BrokenPipe => {
            tracing::debug!("output closed by reader");
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
