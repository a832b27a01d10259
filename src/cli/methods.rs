use anyhow::Result;

use lri_screen::method::Method;

/// List the supported methods and their table columns
pub fn run() -> Result<()> {
    println!("{:<18} {:<20} {}", "Method", "RT column", "LRI column");
    for method in Method::ALL {
        println!(
            "{:<18} {:<20} {}",
            method.label(),
            method.rt_column(),
            method.lri_column()
        );
    }
    Ok(())
}
