//! # KeyDeck Host Daemon
//!
//! Main entry point: one deterministic boot over simulated devices.

use keydeckd::{boot, parse_key_script, BootReport, CONFIG_PATH};
use sim_device::SimDeviceSet;
use std::env;
use std::fs;
use std::process;

#[derive(Debug, Default)]
struct Options {
    /// Host file whose contents become the onboard config
    config: Option<String>,
    /// Preloaded resources, as (device path, host file) pairs
    files: Vec<(String, String)>,
    /// Host file holding the key script
    keys: Option<String>,
    /// Assert the manual recovery pin for this boot
    override_pin: bool,
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let options = parse_args(&args).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        print_usage(&args[0]);
        process::exit(1);
    });

    let sims = SimDeviceSet::new();

    if let Some(path) = &options.config {
        let contents = read_host_file(path);
        sims.onboard.preload(CONFIG_PATH, &contents);
    }
    for (dest, src) in &options.files {
        let contents = read_host_file(src);
        match storage::StorageKind::select(dest) {
            storage::StorageKind::Onboard => sims.onboard.preload(dest, &contents),
            storage::StorageKind::Removable => sims.removable.preload(dest, &contents),
        }
    }
    if let Some(path) = &options.keys {
        let text = String::from_utf8_lossy(&read_host_file(path)).into_owned();
        let events = parse_key_script(&text).unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            process::exit(1);
        });
        sims.keyboard.push_all(events);
    }
    if options.override_pin {
        sims.override_pin.assert_pin();
    }

    let mut ctx = sims.context();
    let report = boot(&mut ctx).unwrap_or_else(|e| {
        eprintln!("Boot failed: {}", e);
        process::exit(1);
    });

    for entry in ctx.log.entries() {
        eprintln!("{}", entry);
    }
    for line in sims.display.lines() {
        println!("{}", line);
    }
    println!("boot finished: {:?}", report);

    if let BootReport::Recovery(health::BootDecision::Halt) = report {
        process::exit(2);
    }
}

fn read_host_file(path: &str) -> Vec<u8> {
    fs::read(path).unwrap_or_else(|e| {
        eprintln!("Failed to read {}: {}", path, e);
        process::exit(1);
    })
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options::default();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --config".to_string());
                }
                options.config = Some(args[i].clone());
            }
            "--file" | "-f" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --file".to_string());
                }
                let (dest, src) = args[i]
                    .split_once('=')
                    .ok_or_else(|| format!("Expected DEST=SRC, got: {}", args[i]))?;
                options.files.push((dest.to_string(), src.to_string()));
            }
            "--keys" | "-k" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --keys".to_string());
                }
                options.keys = Some(args[i].clone());
            }
            "--override" => {
                options.override_pin = true;
            }
            "--help" | "-h" => {
                print_usage(&args[0]);
                process::exit(0);
            }
            other => {
                return Err(format!("Unknown option: {}", other));
            }
        }
        i += 1;
    }

    Ok(options)
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} [OPTIONS]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -c, --config <FILE>      Host file to install as {}", CONFIG_PATH);
    eprintln!("  -f, --file <DEST=SRC>    Preload host file SRC at device path DEST");
    eprintln!("                           (repeatable; DEST is routed by prefix)");
    eprintln!("  -k, --keys <FILE>        Key script to feed the keyboard");
    eprintln!("  --override               Assert the manual recovery pin");
    eprintln!("  -h, --help               Show this help message");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} --config demo/config.json --file /boot.ks=demo/boot.ks", program);
    eprintln!("  {} --keys demo/edit_config.keys", program);
}
