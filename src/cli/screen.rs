use anyhow::Result;
use log::info;

use super::{load_reference, recorder, render, Settings};
use lri_screen::fragments::parse_fragment_input;
use lri_screen::method::Method;
use lri_screen::query::{Query, Tolerance};
use lri_screen::screen::Screener;

/// Screen substances by RT window and fragments
pub fn run(
    settings: &Settings,
    rt: f64,
    method: Option<Method>,
    tolerance: Option<u8>,
    fragments: Option<&str>,
    json: bool,
) -> Result<()> {
    let tolerance = match tolerance {
        Some(percent) => Tolerance::new(percent)?,
        None => settings.tolerance,
    };
    let fragments = fragments.map(parse_fragment_input).unwrap_or_default();
    let query = Query::new(method.unwrap_or(settings.method), rt, tolerance)?
        .with_fragments(fragments);
    info!("{}", query.describe());

    let reference = load_reference(settings)?;
    let recorder = recorder(settings);
    let report = Screener::new(&reference, recorder.as_ref()).screen(&query);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render::screen(&report));
    }
    Ok(())
}
