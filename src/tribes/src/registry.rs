//! Object id registries.
//!
//! The game source registers object constants in dedicated asset files:
//!
//! ```wurst
//! public let ITEM_STEEL_AXE = compiletime(ITEM_ID_GEN.next())
//!     ..registerObjectID("ITEM_STEEL_AXE")
//! ```
//!
//! [`ObjectRegistry`] snapshots those declarations into a constant -> registered
//! name map. Registries are loaded once per run and passed by reference into
//! the extractors; they are never mutated mid-scan.

use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Read-only snapshot of constant -> registered object name.
#[derive(Debug, Default, Clone)]
pub struct ObjectRegistry {
    entries: HashMap<String, String>,
}

impl ObjectRegistry {
    /// Load a registry for one constant prefix (`ITEM_`, `UNIT_`, ...) from a
    /// list of candidate files. Earlier files win on conflicting keys; a
    /// missing file contributes nothing.
    pub fn load(files: &[PathBuf], prefix: &str) -> Self {
        // Primary pattern: declaration and register call on one logical line,
        // the expression kept on the same line. The fallback lets the
        // expression span lines before the register call.
        let strict = Regex::new(&format!(
            r#"public\s+let\s+({prefix}\w+)\s*=\s*[^\n]*?\.\.registerObjectID\(["']([^"']+)["']\)"#
        ))
        .unwrap();
        let permissive = Regex::new(&format!(
            r#"(?s)public\s+let\s+({prefix}\w+)\s*=.*?registerObjectID\(["']([^"']+)["']\)"#
        ))
        .unwrap();

        let mut entries: HashMap<String, String> = HashMap::new();
        for file in files {
            let Ok(content) = fs::read_to_string(file) else {
                // Missing registry file: empty contribution, not an error.
                continue;
            };
            for caps in strict.captures_iter(&content) {
                entries
                    .entry(caps[1].to_string())
                    .or_insert_with(|| caps[2].to_string());
            }
            for caps in permissive.captures_iter(&content) {
                entries
                    .entry(caps[1].to_string())
                    .or_insert_with(|| caps[2].to_string());
            }
        }

        ObjectRegistry { entries }
    }

    pub fn get(&self, constant: &str) -> Option<&str> {
        self.entries.get(constant).map(String::as_str)
    }

    /// Resolve a constant to its registered name, falling back to the
    /// constant itself when it was never registered.
    pub fn resolve<'a>(&'a self, constant: &'a str) -> &'a str {
        self.get(constant).unwrap_or(constant)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in sorted key order, for serialization with stable ordering.
    pub fn sorted_entries(&self) -> std::collections::BTreeMap<String, String> {
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_single_line_declaration() {
        let dir = TempDir::new().unwrap();
        let file = write_file(
            &dir,
            "LocalObjectIDs.wurst",
            "public let ITEM_STEEL_AXE = compiletime(ITEM_ID_GEN.next())..registerObjectID(\"ITEM_STEEL_AXE\")\n",
        );
        let registry = ObjectRegistry::load(&[file], "ITEM_");
        assert_eq!(registry.get("ITEM_STEEL_AXE"), Some("ITEM_STEEL_AXE"));
    }

    #[test]
    fn test_multi_line_declaration() {
        let dir = TempDir::new().unwrap();
        let file = write_file(
            &dir,
            "LocalObjectIDs.wurst",
            "public let UNIT_FORGE = compiletime(UNIT_ID_GEN.next())\n    ..registerObjectID(\"UNIT_FORGE\")\n",
        );
        let registry = ObjectRegistry::load(&[file], "UNIT_");
        assert_eq!(registry.get("UNIT_FORGE"), Some("UNIT_FORGE"));
    }

    #[test]
    fn test_earlier_file_wins_on_conflict() {
        let dir = TempDir::new().unwrap();
        let first = write_file(
            &dir,
            "LocalObjectIDs.wurst",
            "public let ITEM_HIDE = compiletime(x)..registerObjectID(\"ITEM_HIDE\")\n",
        );
        let second = write_file(
            &dir,
            "LocalObjectIDs2.wurst",
            "public let ITEM_HIDE = compiletime(y)..registerObjectID(\"ITEM_HIDE_OTHER\")\n",
        );
        let registry = ObjectRegistry::load(&[first, second], "ITEM_");
        assert_eq!(registry.get("ITEM_HIDE"), Some("ITEM_HIDE"));
    }

    #[test]
    fn test_missing_file_is_empty_contribution() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.wurst");
        let registry = ObjectRegistry::load(&[missing], "ITEM_");
        assert!(registry.is_empty());
    }

    #[test]
    fn test_resolve_falls_back_to_constant() {
        let registry = ObjectRegistry::default();
        assert_eq!(registry.resolve("ITEM_MYSTERY"), "ITEM_MYSTERY");
    }
}
