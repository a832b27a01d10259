use anyhow::Result;
use log::info;

use super::{load_reference, Settings};
use lri_screen::validator::validate_reference;

/// Validate the reference tables
pub fn run(settings: &Settings, json: bool) -> Result<()> {
    info!("Reference Data Check");
    info!("====================");

    let reference = load_reference(settings)?;
    let source = format!(
        "{} + {}",
        settings.substances.display(),
        settings.alkanes.display()
    );
    let report = validate_reference(&reference, &source);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.format_colored());
    }

    // Exit with error code if validation failed
    if report.has_failures() {
        std::process::exit(1);
    }

    Ok(())
}
