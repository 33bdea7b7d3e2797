//! Command-line interface for `blockkit`.

#![forbid(unsafe_code)]

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use blockkit_codec::{base64, parse_lenient, parse_lenient_as, to_byte_sequence, utf8, ByteSource};
use blockkit_core::{expand_key, pad, unpad, CodecConfig, PaddingPolicy, BLOCK_SIZE};
use clap::{Args, Parser, Subcommand};
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Block padding and text codec CLI.
#[derive(Parser)]
#[command(
    name = "blockkit",
    version,
    author,
    about = "Padding, Base64 and extended UTF-8 tools for 8-byte block ciphers"
)]
struct Cli {
    /// JSON (or near-JSON) file with default `padding` and `block-size`.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

/// Input and output locations; stdin/stdout when omitted.
#[derive(Args)]
struct IoArgs {
    /// Input file.
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,
    /// Output file.
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Pad raw bytes to the 8-byte block size.
    Pad {
        /// Padding policy (defaults to the configured one).
        #[arg(long)]
        policy: Option<PaddingPolicy>,
        #[command(flatten)]
        io: IoArgs,
    },
    /// Strip padding from raw bytes.
    Unpad {
        /// Padding policy (defaults to the configured one).
        #[arg(long)]
        policy: Option<PaddingPolicy>,
        #[command(flatten)]
        io: IoArgs,
    },
    /// Encode raw bytes as wrapped Base64.
    B64Encode {
        #[command(flatten)]
        io: IoArgs,
    },
    /// Decode Base64 text to raw bytes.
    B64Decode {
        /// Round the output up to a multiple of this many bytes (0 disables).
        #[arg(long)]
        block_size: Option<usize>,
        #[command(flatten)]
        io: IoArgs,
    },
    /// Encode text with extended UTF-8 and print it as hex.
    Utf8Encode {
        #[command(flatten)]
        io: IoArgs,
    },
    /// Decode hex-encoded extended UTF-8 bytes to text.
    Utf8Decode {
        #[command(flatten)]
        io: IoArgs,
    },
    /// Expand a key to the 576-bit minimum and print it as hex.
    ExpandKey {
        /// Key bytes as hex.
        #[arg(long, value_name = "HEX")]
        key_hex: String,
    },
    /// Parse near-JSON text and print it as JSON.
    FixJson {
        #[command(flatten)]
        io: IoArgs,
    },
    /// Run random data through pad, Base64 and back for every policy.
    Demo {
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
        /// Number of samples per policy.
        #[arg(long, default_value_t = 4)]
        samples: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = load_config(cli.config.as_deref())?;
    debug!(padding = %config.padding, block_size = config.block_size, "effective config");

    match cli.command {
        Commands::Pad { policy, io: files } => cmd_pad(policy.unwrap_or(config.padding), &files),
        Commands::Unpad { policy, io: files } => cmd_unpad(policy.unwrap_or(config.padding), &files),
        Commands::B64Encode { io: files } => cmd_b64_encode(&files),
        Commands::B64Decode { block_size, io: files } => {
            cmd_b64_decode(block_size.unwrap_or(config.block_size), &files)
        }
        Commands::Utf8Encode { io: files } => cmd_utf8_encode(&files),
        Commands::Utf8Decode { io: files } => cmd_utf8_decode(&files),
        Commands::ExpandKey { key_hex } => cmd_expand_key(&key_hex),
        Commands::FixJson { io: files } => cmd_fix_json(&files),
        Commands::Demo { seed, samples } => cmd_demo(seed, samples),
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<CodecConfig> {
    let Some(path) = path else {
        return Ok(CodecConfig::default());
    };
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse_lenient_as(&text).with_context(|| format!("parse config {}", path.display()))
}

fn cmd_pad(policy: PaddingPolicy, files: &IoArgs) -> Result<()> {
    let data = read_input(files)?;
    let padded = pad(&data, policy);
    info!(policy = %policy, added = padded.len() - data.len(), "padded input");
    write_output(files, &padded)
}

fn cmd_unpad(policy: PaddingPolicy, files: &IoArgs) -> Result<()> {
    let data = read_input(files)?;
    let stripped = unpad(&data, policy);
    info!(policy = %policy, removed = data.len() - stripped.len(), "unpadded input");
    write_output(files, &stripped)
}

fn cmd_b64_encode(files: &IoArgs) -> Result<()> {
    let data = read_input(files)?;
    let mut text = base64::encode(&data);
    text.push('\n');
    write_output(files, text.as_bytes())
}

fn cmd_b64_decode(block_size: usize, files: &IoArgs) -> Result<()> {
    let text = read_text(files)?;
    write_output(files, &base64::decode_with_block_size(&text, block_size))
}

fn cmd_utf8_encode(files: &IoArgs) -> Result<()> {
    let text = read_text(files)?;
    let bytes = to_byte_sequence(ByteSource::Text(&text));
    write_output(files, format!("{}\n", hex::encode(bytes)).as_bytes())
}

fn cmd_utf8_decode(files: &IoArgs) -> Result<()> {
    let text = read_text(files)?;
    let bytes = hex::decode(text.trim()).context("decode input hex")?;
    write_output(files, utf8::decode(&bytes).as_bytes())
}

fn cmd_expand_key(key_hex: &str) -> Result<()> {
    let key = hex::decode(key_hex.trim()).context("decode key hex")?;
    if key.is_empty() {
        bail!("key must contain at least one byte");
    }
    let expanded = expand_key(&key);
    println!("{}", hex::encode(&expanded));
    info!(input = key.len(), expanded = expanded.len(), "expanded key");
    Ok(())
}

fn cmd_fix_json(files: &IoArgs) -> Result<()> {
    let text = read_text(files)?;
    let value = parse_lenient(&text).context("recover JSON")?;
    let mut pretty = serde_json::to_string_pretty(&value).context("render JSON")?;
    pretty.push('\n');
    write_output(files, pretty.as_bytes())
}

fn cmd_demo(seed: Option<u64>, samples: usize) -> Result<()> {
    let mut rng = seeded_rng(seed);
    for policy in PaddingPolicy::ALL {
        for _ in 0..samples {
            let len = rng.gen_range(1..48);
            let mut plaintext = vec![0u8; len];
            rng.fill_bytes(&mut plaintext);
            // Printable final byte so shape-based unpadding is unambiguous.
            plaintext[len - 1] = rng.gen_range(b'A'..=b'Z');

            let padded = pad(&to_byte_sequence(ByteSource::Bytes(&plaintext)), policy);
            let wire = base64::encode(&padded);
            let decoded = base64::decode_with_block_size(&wire, BLOCK_SIZE);
            let recovered = unpad(&decoded, policy);

            println!("{:>14} {} -> {}", policy, hex::encode(&plaintext), wire);
            if recovered != plaintext {
                bail!("demo roundtrip failed for policy {}", policy);
            }
        }
    }
    Ok(())
}

fn read_input(files: &IoArgs) -> Result<Vec<u8>> {
    match &files.input {
        Some(path) => fs::read(path).with_context(|| format!("read {}", path.display())),
        None => {
            let mut data = Vec::new();
            io::stdin().read_to_end(&mut data).context("read stdin")?;
            Ok(data)
        }
    }
}

fn read_text(files: &IoArgs) -> Result<String> {
    let data = read_input(files)?;
    String::from_utf8(data).context("input is not valid UTF-8 text")
}

fn write_output(files: &IoArgs, data: &[u8]) -> Result<()> {
    match &files.output {
        Some(path) => fs::write(path, data).with_context(|| format!("write {}", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(data).context("write stdout")?;
            stdout.flush().context("flush stdout")
        }
    }
}

fn seeded_rng(seed: Option<u64>) -> ChaCha20Rng {
    match seed {
        Some(value) => ChaCha20Rng::seed_from_u64(value),
        None => {
            let mut seed_bytes = [0u8; 32];
            rand::rngs::OsRng.fill_bytes(&mut seed_bytes);
            ChaCha20Rng::from_seed(seed_bytes)
        }
    }
}
