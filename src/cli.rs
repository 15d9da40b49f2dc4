use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "rota-export",
    version,
    about = "Extract person rota data from one or more Public API instances and export it as CSV"
)]
pub struct Cli {
    #[arg(short, long, help = "Print progress")]
    pub verbose: bool,
    #[arg(
        short,
        long = "iso-dates",
        alias = "iso_dates",
        help = "Use international date format for date values"
    )]
    pub iso_dates: bool,
    #[arg(
        short,
        long,
        value_name = "DIR",
        help = "Directory to create the CSV output file in (stdout if omitted)"
    )]
    pub csv: Option<PathBuf>,
    #[arg(
        short,
        long,
        value_name = "DIR",
        help = "Directory holding tokens.json (defaults to the current directory)"
    )]
    pub tokens: Option<PathBuf>,
    #[arg(
        short,
        long,
        value_name = "DIR",
        help = "Directory holding settings.json (defaults to the current directory)"
    )]
    pub settings: Option<PathBuf>,
}
