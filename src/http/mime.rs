//! MIME type detection based on file extensions.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};

/// Extension to mime-type mapping. Keys are stored lowercase without a dot.
#[derive(Debug, Clone, Default)]
pub struct MimeTable {
    types: HashMap<String, String>,
}

impl MimeTable {
    pub fn from_map(map: HashMap<String, String>) -> Self {
        let types = map
            .into_iter()
            .map(|(ext, mime)| (normalize_extension(&ext), mime))
            .collect();

        Self { types }
    }

    /// Load a YAML (or JSON) mapping of extension to mime type.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("unable to read mime types file {}", path.display()))?;

        let map: HashMap<String, String> = serde_yaml::from_str(&text)
            .with_context(|| format!("unable to parse mime types file {}", path.display()))?;

        Ok(Self::from_map(map))
    }

    /// Look up an extension, ignoring case.
    pub fn lookup(&self, ext: &str) -> Option<&str> {
        self.types
            .get(&normalize_extension(ext))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MimeTable {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::from_map(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

fn normalize_extension(ext: &str) -> String {
    ext.trim_start_matches('.').to_ascii_lowercase()
}

/// Pick the Content-Type for a file.
///
/// The extension is whatever follows the last `.` of the file name. Files
/// without one, or with an extension missing from the table, get `default`.
///
/// ```
/// # use statik::http::mime::{mime_type_for, MimeTable};
/// # use std::path::Path;
/// let table: MimeTable = [("css", "text/css")].into_iter().collect();
/// assert_eq!(mime_type_for(Path::new("/srv/site.CSS"), &table, "text/html"), "text/css");
/// assert_eq!(mime_type_for(Path::new("/srv/README"), &table, "text/html"), "text/html");
/// ```
pub fn mime_type_for<'a>(path: &Path, table: &'a MimeTable, default: &'a str) -> &'a str {
    let Some(name) = path.file_name() else {
        return default;
    };
    let name = name.to_string_lossy();

    match name.rfind('.') {
        Some(dot) if dot + 1 < name.len() => table.lookup(&name[dot + 1..]).unwrap_or(default),
        _ => default,
    }
}
