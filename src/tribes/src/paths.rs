//! Fixed locations inside the game source tree and the data directory.

use std::path::{Path, PathBuf};

/// Root of the game's Wurst source tree, with the fixed subdirectories the
/// extractors scan. The tree is read-only input.
#[derive(Debug, Clone)]
pub struct SourceTree {
    root: PathBuf,
}

impl SourceTree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        SourceTree { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn abilities_dir(&self) -> PathBuf {
        self.root.join("objects").join("abilities")
    }

    pub fn units_dir(&self) -> PathBuf {
        self.root.join("objects").join("units")
    }

    pub fn buildings_dir(&self) -> PathBuf {
        self.units_dir().join("Buildings")
    }

    pub fn items_dir(&self) -> PathBuf {
        self.root.join("objects").join("items")
    }

    /// Crafting system directories, newest first.
    pub fn crafting_dirs(&self) -> Vec<PathBuf> {
        vec![
            self.root.join("systems").join("craftingV2"),
            self.root.join("systems").join("crafting"),
        ]
    }

    pub fn crafting_dir(&self) -> PathBuf {
        self.root.join("systems").join("craftingV2")
    }

    pub fn assets_dir(&self) -> PathBuf {
        self.root.join("assets")
    }

    /// Candidate object id registry files, in precedence order. Both item and
    /// unit constants are declared here.
    pub fn registry_files(&self) -> Vec<PathBuf> {
        vec![
            self.assets_dir().join("LocalObjectIDs.wurst"),
            self.assets_dir().join("LocalObjectIDs2.wurst"),
        ]
    }

    pub fn unit_text_constants_file(&self) -> PathBuf {
        self.units_dir().join("TrollUnitTextConstant.wurst")
    }

    pub fn unit_factory_file(&self) -> PathBuf {
        self.units_dir().join("TrollUnitFactory.wurst")
    }
}

/// Directory holding the intermediate record files produced by extraction and
/// consumed by generation.
#[derive(Debug, Clone)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DataDir { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn abilities_json(&self) -> PathBuf {
        self.root.join("abilities.json")
    }

    pub fn ability_descriptions_json(&self) -> PathBuf {
        self.root.join("ability_descriptions.json")
    }

    pub fn buildings_json(&self) -> PathBuf {
        self.root.join("buildings.json")
    }

    pub fn units_json(&self) -> PathBuf {
        self.root.join("units.json")
    }

    pub fn item_stats_json(&self) -> PathBuf {
        self.root.join("item_stats.json")
    }

    pub fn recipes_json(&self) -> PathBuf {
        self.root.join("recipes.json")
    }
}

/// Directory the generated modules are written into, laid out the way the
/// consuming web application imports them.
#[derive(Debug, Clone)]
pub struct SiteDataDir {
    root: PathBuf,
}

impl SiteDataDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        SiteDataDir { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Per-category ability modules live in their own subdirectory.
    pub fn abilities_dir(&self) -> PathBuf {
        self.root.join("abilities")
    }

    pub fn ability_category_file(&self, category: &str) -> PathBuf {
        self.abilities_dir().join(format!("abilities.{category}.ts"))
    }

    pub fn abilities_types_file(&self) -> PathBuf {
        self.abilities_dir().join("abilities.types.ts")
    }

    pub fn abilities_index_file(&self) -> PathBuf {
        self.abilities_dir().join("abilities.index.ts")
    }

    pub fn abilities_reexport_file(&self) -> PathBuf {
        self.root.join("abilities.ts")
    }

    pub fn item_category_file(&self, category: &str) -> PathBuf {
        self.root.join(format!("items.{category}.ts"))
    }

    pub fn items_file(&self) -> PathBuf {
        self.root.join("items.ts")
    }

    pub fn buildings_file(&self) -> PathBuf {
        self.root.join("buildings.ts")
    }

    pub fn classes_file(&self) -> PathBuf {
        self.root.join("classes.ts")
    }

    pub fn derived_classes_file(&self) -> PathBuf {
        self.root.join("derivedClasses.ts")
    }
}
