use anyhow::Result;

use super::{load_reference, recorder, render, Settings};
use lri_screen::screen::Screener;

/// Search substances by name
pub fn run(settings: &Settings, text: &str, json: bool) -> Result<()> {
    let reference = load_reference(settings)?;
    let recorder = recorder(settings);
    let screener = Screener::new(&reference, recorder.as_ref());

    let report = screener.search_name(text);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render::name_search(&report));
    }
    Ok(())
}
