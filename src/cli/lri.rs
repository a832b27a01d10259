use anyhow::Result;

use super::{load_reference, recorder, render, Settings};
use lri_screen::method::Method;
use lri_screen::screen::Screener;

/// Compute the LRI of an observed retention time
pub fn run(settings: &Settings, rt: f64, method: Option<Method>, json: bool) -> Result<()> {
    let reference = load_reference(settings)?;
    let recorder = recorder(settings);
    let report = Screener::new(&reference, recorder.as_ref())
        .retention_index(method.unwrap_or(settings.method), rt)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render::lri(&report));
    }
    Ok(())
}
