// Fri Oct 16 2026 - Alex

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "heap-narrower")]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "Narrow a live memory buffer down to the offset of one value", long_about = None)]
pub struct Args {
    /// File to map read/write as the memory buffer
    #[arg(short, long)]
    pub buffer: Option<PathBuf>,

    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Default view width in bits (8, 16 or 32)
    #[arg(short, long)]
    pub width: Option<u32>,

    #[arg(short, long)]
    pub log_level: Option<String>,

    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[arg(long)]
    pub no_color: bool,

    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(path) = &self.buffer {
            if !path.exists() {
                return Err(format!("Buffer file does not exist: {:?}", path));
            }
        }
        if let Some(width) = self.width {
            if ![8, 16, 32].contains(&width) {
                return Err(format!("width must be 8, 16 or 32, got {}", width));
            }
        }
        Ok(())
    }
}
