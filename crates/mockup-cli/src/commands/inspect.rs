use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use mockup_core::codec::natural_size;

use super::options::load_source;

#[derive(Args)]
pub struct InspectArgs {
    /// Product image file
    pub file: PathBuf,
}

pub fn run(args: &InspectArgs) -> Result<()> {
    let source = load_source(&args.file)?;

    println!("File:        {}", source.name);
    println!("Media type:  {}", source.media_type);
    match natural_size(&source.payload) {
        Ok(size) => println!("Dimensions:  {}x{}", size.width, size.height),
        Err(e) => println!("Dimensions:  unknown ({e})"),
    }

    let payload_kb = source.payload.len() as f64 / 1024.0;
    println!("Payload:     {:.1} KB base64", payload_kb);

    Ok(())
}
