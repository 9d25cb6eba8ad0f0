//! Implementation of the `noaqh-dev generate` command.

use crate::cli::GenerateArgs;
use crate::error::Result;
use crate::prompt::{GenerateOptions, generate};

/// Execute the `generate` command.
///
/// Renders the installable prompt set into the output directory. Per-file
/// progress lines come from the generation pipeline itself.
pub fn cmd_generate(args: GenerateArgs) -> Result<()> {
    let options = GenerateOptions {
        template_dir: args.template_dir,
        output_dir: args.output_dir,
    };
    generate(&options)?;

    println!("Prompt generation complete.");
    Ok(())
}
