use anyhow::Result;
use clap::Args;
use mockup_core::prompt::compile;

use super::options::MockupArgs;

#[derive(Args)]
pub struct PromptArgs {
    #[command(flatten)]
    pub mockup: MockupArgs,
}

/// Print the compiled prompt without calling the generation service.
pub fn run(args: &PromptArgs) -> Result<()> {
    let studio = args.mockup.load()?;
    studio.mockup.validate()?;
    print!("{}", compile(&studio.mockup));
    Ok(())
}
