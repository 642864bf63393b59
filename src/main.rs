use clap::Parser;
use std::path::PathBuf;

use proposal_docx::proposal::{OUTPUT_FILE, SUCCESS_MESSAGE};

#[derive(Parser)]
#[command(name = "proposal-docx", version, about = "Generate the Aegis-X project proposal as DOCX")]
struct Args {
    /// Output DOCX file
    #[arg(short, long, default_value = OUTPUT_FILE)]
    output: PathBuf,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = proposal_docx::build_and_save(&args.output) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    println!("{SUCCESS_MESSAGE}");
}
