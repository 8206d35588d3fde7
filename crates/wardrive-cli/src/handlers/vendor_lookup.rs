use std::path::PathBuf;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use wardrive_engine::VendorDirectory;
use wardrive_types::Mac;

pub fn handle(mac: &str, oui_csv: Option<PathBuf>) -> Result<()> {
    let mac = Mac::parse(mac)?;

    let vendors = match &oui_csv {
        Some(path) => VendorDirectory::from_oui_csv(path)
            .with_context(|| format!("Failed to read OUI registry: {}", path.display()))?,
        None => VendorDirectory::empty(),
    };

    if oui_csv.is_none() && !mac.is_locally_administered() {
        eprintln!("Warning: no OUI registry configured; pass --oui or set oui_csv in the config");
    }

    println!("{}  {}", mac.as_str().bold(), vendors.resolve(&mac));

    Ok(())
}
