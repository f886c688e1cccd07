//! Seed catalog.

use crate::registry::Package;

/// `(name, version, description, installed)`
const SEED: &[(&str, &str, &str, bool)] = &[
    ("git", "2.34.1", "Fast, scalable, distributed revision control system", true),
    ("python3", "3.9.2", "Interactive high-level object-oriented language", true),
    ("nodejs", "16.14.0", "Event-based server-side JavaScript engine", true),
    ("nano", "6.2", "Small, friendly text editor inspired by Pico", true),
    ("vim", "8.2", "Vi IMproved - enhanced vi editor", true),
    ("curl", "7.81.0", "Command line tool for transferring data with URL syntax", false),
    ("wget", "1.21.2", "Retrieves files from the web", false),
    ("htop", "3.0.5", "Interactive process viewer", false),
    ("tree", "1.8.0", "Displays directories as trees", false),
    ("zip", "3.0", "Archiver for .zip files", false),
];

/// The packages every new registry starts with.
pub fn default_catalog() -> Vec<Package> {
    SEED.iter()
        .map(|&(name, version, description, installed)| Package {
            name: name.to_string(),
            version: version.to_string(),
            description: description.to_string(),
            installed,
        })
        .collect()
}
