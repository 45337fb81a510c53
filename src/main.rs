//! CLI entry point for the parallelogram mosaic renderer

use clap::Parser;
use paratile::io::cli::{Cli, MosaicProcessor};

fn main() -> paratile::Result<()> {
    let cli = Cli::parse();
    let processor = MosaicProcessor::new(cli);
    processor.process()
}
