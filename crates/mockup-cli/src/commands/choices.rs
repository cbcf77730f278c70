use anyhow::Result;

use crate::summary;

pub fn run() -> Result<()> {
    summary::print_choices();
    Ok(())
}
