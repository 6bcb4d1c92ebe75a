//! ubridge - CLI
//!
//! Loads a class manifest, boxes a sample object of one class and checks it
//! against another, the way native-call glue would.
//!
//! ```bash
//! ubridge-cli shapes.toml Circle Shape
//! ubridge-cli shapes.toml Circle Shape --exact
//! ubridge-cli shapes.toml Circle "const Shape" --address 0xABC --log-level trace
//! ```

use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::{info, LevelFilter};

use ubridge_core::{BoxedObject, BridgeError, RawAddress, Stack, TypeRegistry};
use ubridge_host::{check_class, protected};

mod manifest;

use manifest::Manifest;

/// Check a boxed object against a requested class
#[derive(Parser, Debug)]
#[command(name = "ubridge-cli")]
#[command(version, about, long_about = None)]
struct Args {
    /// Class manifest (TOML)
    manifest: PathBuf,

    /// Class the sample object is created as
    runtime_type: String,

    /// Class requested by the check
    requested_type: String,

    /// Require the exact class instead of accepting descendants
    #[arg(long)]
    exact: bool,

    /// Address stored in the sample object
    #[arg(long, default_value = "0x1000", value_parser = parse_address)]
    address: RawAddress,

    /// Print every class with its ancestor chain before checking
    #[arg(long)]
    list: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() {
    let args = Args::parse();

    let level = match args.log_level.as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "error" => LevelFilter::Error,
        "off" => LevelFilter::Off,
        _ => LevelFilter::Warn,
    };
    env_logger::Builder::new().filter_level(level).init();

    let manifest = match Manifest::load(&args.manifest) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let registry = match manifest.build_registry() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    info!("loaded {} records from {}", registry.len(), args.manifest.display());

    if args.list {
        print_classes(&registry);
    }

    let Some(runtime) = registry.lookup(&args.runtime_type) else {
        eprintln!("Error: {}", BridgeError::UnknownType(args.runtime_type.clone()));
        process::exit(1);
    };

    let mut stack = Stack::with_config(&manifest.config);
    if let Err(e) = stack.push(BoxedObject::new(args.address, runtime).into()) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    let result = protected(|| {
        check_class(&mut stack, &registry, -1, &args.requested_type, args.exact)
    });
    match result {
        Ok(address) => println!("ok: {} at {}", args.requested_type, address),
        Err(e) => {
            eprintln!("Check failed: {}", e);
            process::exit(1);
        }
    }
}

fn print_classes(registry: &TypeRegistry) {
    let mut names: Vec<&str> = (0..registry.len() as u32)
        .filter_map(|raw| registry.type_name(raw.into()))
        .collect();
    names.sort_unstable();

    for name in names {
        let Some(id) = registry.lookup(name) else {
            continue;
        };
        let chain: Vec<&str> = registry.ancestors(id).map(|(_, r)| r.type_name()).collect();
        println!("{}", chain.join(" -> "));
    }
}

fn parse_address(text: &str) -> Result<RawAddress, String> {
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => usize::from_str_radix(hex, 16),
        None => text.parse::<usize>(),
    };
    parsed
        .map(RawAddress)
        .map_err(|e| format!("invalid address `{}`: {}", text, e))
}
