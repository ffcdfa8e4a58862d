//! Class catalog loader.

use std::collections::HashSet;
use std::path::Path;

use battle_core::ClassDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron};

/// Class catalog structure for RON files.
///
/// Player classes and enemy kinds share one catalog; an enemy is simply a
/// class with a non-zero `experience_reward`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassCatalog {
    pub classes: Vec<ClassDefinition>,
}

/// Loader for class catalogs from RON files.
pub struct ClassLoader;

impl ClassLoader {
    /// Load class definitions from a RON file.
    ///
    /// # Errors
    ///
    /// Fails on unreadable or malformed files and on duplicate class ids.
    /// Ability names are checked later, against the ability catalog.
    pub fn load(path: &Path) -> LoadResult<Vec<ClassDefinition>> {
        let catalog: ClassCatalog = parse_ron(path, "class catalog")?;

        let mut seen = HashSet::new();
        for class in &catalog.classes {
            if !seen.insert(class.id.as_str()) {
                anyhow::bail!(
                    "Duplicate class '{}' in class catalog {}",
                    class.id,
                    path.display()
                );
            }
        }

        Ok(catalog.classes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAGE: &str = r#"(
        id: "mage",
        name: "Mage",
        max_hp: 16,
        max_sp: 12,
        stats: (attack: 3, defense: 2, intelligence: 9, resilience: 5, accuracy: 5, speed: 4),
        unlocks: [(level: 1, ability: "Fire"), (level: 3, ability: "Cure")],
    )"#;

    fn write(contents: &str) -> tempfile::NamedTempFile {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), contents).unwrap();
        file
    }

    #[test]
    fn loads_classes_with_defaults() {
        let file = write(&format!("(classes: [{MAGE}])"));
        let classes = ClassLoader::load(file.path()).unwrap();

        assert_eq!(classes.len(), 1);
        let mage = &classes[0];
        assert_eq!(mage.stats.intelligence, 9);
        assert_eq!(mage.experience_reward, 0);
        assert_eq!(mage.unlocks_up_to(2).collect::<Vec<_>>(), ["Fire"]);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let file = write(&format!("(classes: [{MAGE}, {MAGE}])"));
        let err = ClassLoader::load(file.path()).unwrap_err().to_string();
        assert!(err.contains("Duplicate class 'mage'"), "{err}");
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ClassLoader::load(&dir.path().join("classes.ron"))
            .unwrap_err()
            .to_string();
        assert!(err.starts_with("Failed to read file"), "{err}");
    }
}
