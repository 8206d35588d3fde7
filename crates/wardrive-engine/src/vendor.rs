use std::collections::HashMap;
use std::path::Path;

use wardrive_types::Mac;

use crate::Result;

/// Vendor name for locally-administered (privacy-randomized) addresses.
pub const VENDOR_RANDOMIZED: &str = "Randomized";
/// Vendor name when the prefix has no registry entry.
pub const VENDOR_UNKNOWN: &str = "Unknown";

/// Prefix -> manufacturer lookup built from the IEEE OUI registry.
///
/// The registry file itself is fetched and cached by an external
/// collaborator; this directory is handed a finished table (or a path to
/// the cached CSV) and only does resolution. An empty directory is a
/// valid degraded mode: every non-randomized MAC resolves to Unknown.
#[derive(Debug, Default)]
pub struct VendorDirectory {
    table: HashMap<String, String>,
}

impl VendorDirectory {
    /// Directory with no registry data (degraded mode).
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_table(table: HashMap<String, String>) -> Self {
        Self { table }
    }

    /// Build the table from a cached IEEE OUI registry CSV
    /// (`Assignment`, `Organization Name` columns).
    ///
    /// Rows with a malformed assignment or empty name are skipped; the
    /// registry has plenty of both.
    pub fn from_oui_csv(path: &Path) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path)?;

        let headers = reader.headers()?.clone();
        let assignment_idx = headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case("Assignment"));
        let name_idx = headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case("Organization Name"));

        let mut table = HashMap::new();
        if let (Some(assignment_idx), Some(name_idx)) = (assignment_idx, name_idx) {
            for record in reader.records() {
                let record = match record {
                    Ok(record) => record,
                    Err(_) => continue,
                };
                let assignment = record
                    .get(assignment_idx)
                    .unwrap_or("")
                    .trim()
                    .to_uppercase();
                let name = record.get(name_idx).unwrap_or("").trim();
                if assignment.len() == 6
                    && assignment.bytes().all(|b| b.is_ascii_hexdigit())
                    && !name.is_empty()
                {
                    let prefix = format!(
                        "{}:{}:{}",
                        &assignment[0..2],
                        &assignment[2..4],
                        &assignment[4..6]
                    );
                    table.insert(prefix, name.to_string());
                }
            }
        }

        Ok(Self { table })
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Resolve a MAC to its manufacturer name.
    ///
    /// The locally-administered bit takes priority over the table: a
    /// randomized address never corresponds to a registered manufacturer,
    /// whatever its prefix happens to collide with.
    pub fn resolve(&self, mac: &Mac) -> &str {
        if mac.is_locally_administered() {
            return VENDOR_RANDOMIZED;
        }
        self.table
            .get(mac.oui_prefix())
            .map(String::as_str)
            .unwrap_or(VENDOR_UNKNOWN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn directory_with(prefix: &str, name: &str) -> VendorDirectory {
        let mut table = HashMap::new();
        table.insert(prefix.to_string(), name.to_string());
        VendorDirectory::from_table(table)
    }

    #[test]
    fn test_resolves_registered_prefix() {
        let dir = directory_with("C0:A3:6E", "AcmeNet Devices");
        let mac = Mac::parse("C0:A3:6E:11:22:33").unwrap();
        assert_eq!(dir.resolve(&mac), "AcmeNet Devices");
    }

    #[test]
    fn test_unregistered_prefix_is_unknown() {
        let dir = directory_with("C0:A3:6E", "AcmeNet Devices");
        let mac = Mac::parse("00:11:22:33:44:55").unwrap();
        assert_eq!(dir.resolve(&mac), VENDOR_UNKNOWN);
    }

    #[test]
    fn test_randomized_beats_registry_content() {
        // Prefix present in the table, but the locally-administered bit wins
        let dir = directory_with("02:AA:BB", "Should Not Appear");
        let mac = Mac::parse("02:AA:BB:CC:DD:EE").unwrap();
        assert_eq!(dir.resolve(&mac), VENDOR_RANDOMIZED);
    }

    #[test]
    fn test_empty_directory_degrades_to_unknown() {
        let dir = VendorDirectory::empty();
        let mac = Mac::parse("C0:A3:6E:11:22:33").unwrap();
        assert_eq!(dir.resolve(&mac), VENDOR_UNKNOWN);
    }

    #[test]
    fn test_loads_ieee_registry_csv() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Registry,Assignment,Organization Name,Organization Address").unwrap();
        writeln!(file, "MA-L,C0A36E,AcmeNet Devices,1 Acme Way").unwrap();
        writeln!(file, "MA-L,BADHEX,Broken Row,nowhere").unwrap();
        writeln!(file, "MA-L,AABBCC,,no name").unwrap();

        let dir = VendorDirectory::from_oui_csv(file.path()).unwrap();
        assert_eq!(dir.len(), 1);

        let mac = Mac::parse("C0:A3:6E:00:00:01").unwrap();
        assert_eq!(dir.resolve(&mac), "AcmeNet Devices");
    }
}
