mod console;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;

use console::Console;
use vmm::{AddressSource, FileBackingStore, Translation, Translator};

#[derive(Parser)]
#[command(name = "vmsim")]
#[command(about = "Translates a list of logical addresses through a demand-paged TLB and page table")]
struct Args {
    /// Text file with one logical address per line
    #[arg(short, long, default_value = "addresses.txt")]
    addresses: PathBuf,

    /// Binary file holding the contents of every page
    #[arg(short, long, default_value = "BACKING_STORE.bin")]
    backing_store: PathBuf,

    /// Only print the summary, not one line per address
    #[arg(short, long)]
    quiet: bool,

    /// Most verbose log level to emit on stderr
    #[arg(long, value_enum)]
    log_level: Option<LogLevel>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Formats one translation as a report line.
fn format_translation(translation: &Translation) -> String {
    format!(
        "Virtual Address: {} | Physical Address: {} | Value: {}",
        translation.logical,
        translation.physical,
        translation.signed_value()
    )
}

fn simulate(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    // A missing store fails here, before any output.
    let store = FileBackingStore::open(&args.backing_store)?;
    let addresses = AddressSource::open(&args.addresses);
    log::info!(
        "translating {} addresses against {}",
        addresses.len(),
        store.path().display()
    );

    let mut translator = Translator::new(store);
    let statistics = translator.run(addresses, |translation| {
        if !args.quiet {
            println!("{}", format_translation(translation));
        }
    })?;

    if !args.quiet {
        println!();
    }
    println!("{}", statistics);

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    Console::init(args.log_level.map(LevelFilter::from))?;

    simulate(args)
}
