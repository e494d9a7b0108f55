use serde::Serialize;

use crate::cli::OutputFormat;

/// Print a value: pretty JSON in JSON mode, the text rendering otherwise.
pub fn output<T: Serialize>(
    output_format: OutputFormat,
    value: &T,
    text: impl FnOnce() -> String,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Text => println!("{}", text()),
    }
    Ok(())
}
