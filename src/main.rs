use clap::Parser;
use smbios_processor::{ProcessorInformation, Result, decode_hex, processor_from_bytes, processors};
use std::fs;

#[derive(Parser)]
#[command(name = "smbios-processor")]
#[command(about = "Decode SMBIOS Processor Information structures", long_about = None)]
struct Cli {
    /// Raw structure file (e.g. /sys/firmware/dmi/entries/4-0/raw) or, with --table, a
    /// structure table. With --hex, the hex-encoded bytes themselves.
    input: String,

    /// Treat the input as a whole structure table (e.g. /sys/firmware/dmi/tables/DMI)
    #[arg(short, long)]
    table: bool,

    /// Read the input argument as hex text instead of a file path
    #[arg(long)]
    hex: bool,
}

fn load(cli: &Cli) -> Result<Vec<ProcessorInformation>> {
    let data = if cli.hex {
        decode_hex(&cli.input)?
    } else {
        fs::read(&cli.input)?
    };

    if cli.table {
        processors(&data)
    } else {
        Ok(vec![processor_from_bytes(&data)?])
    }
}

fn main() {
    let cli = Cli::parse();

    match load(&cli) {
        Ok(found) => {
            if found.is_empty() {
                eprintln!("No Processor Information structures found.");
                std::process::exit(1);
            }
            for processor in &found {
                println!("{}\n", processor);
            }
        }
        Err(e) => {
            eprintln!("ERROR: Failed to decode processor information");
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    }
}
