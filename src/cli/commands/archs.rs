use colored::Colorize;

use crate::arch::Architecture;
use crate::cli::args::OutputFormat;
use crate::error::Result;
use crate::output::json::format_json;

/// Handle the archs command
pub fn archs(format: OutputFormat) -> Result<String> {
    let names: Vec<&str> = Architecture::ALL.iter().map(|arch| arch.as_str()).collect();

    match format {
        OutputFormat::Pretty => Ok(format!(
            "{} {}",
            "Valid architectures:".cyan(),
            names.join(", ")
        )),
        OutputFormat::Json => format_json(&names),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_archs_pretty_lists_everything() {
        let output = archs(OutputFormat::Pretty).unwrap();
        for arch in Architecture::ALL {
            assert!(output.contains(arch.as_str()));
        }
    }

    #[test]
    fn test_archs_json_is_array() {
        let value: serde_json::Value =
            serde_json::from_str(&archs(OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(value.as_array().unwrap().len(), Architecture::ALL.len());
        assert_eq!(value[0], "all");
    }
}
