//! Heuristic category classification.
//!
//! Classification is an ordered rule list evaluated top-down, first match
//! wins. The rule order is part of the observable contract: class path
//! keywords outrank the generic building/item path rules, which outrank the
//! id-keyword rules, which outrank the defaults. Reordering changes
//! classification outcomes, so the rules live here as data and are tested
//! without touching the filesystem.

use std::path::Path;

/// Category plus optional refinement assigned by a classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub category: &'static str,
    pub subcategory: Option<&'static str>,
}

/// One troll-class rule: path keywords that select the class, plus ordered
/// keyword -> subcategory overrides checked within the matched class.
struct ClassRule {
    keywords: &'static [&'static str],
    category: &'static str,
    overrides: &'static [(&'static str, &'static str)],
}

/// Troll class rules in evaluation order.
const CLASS_RULES: &[ClassRule] = &[
    ClassRule {
        keywords: &["hunter", "warrior", "tracker"],
        category: "hunter",
        overrides: &[
            ("juggernaut", "superclass"),
            ("warrior", "subclass"),
            ("tracker", "subclass"),
        ],
    },
    ClassRule {
        keywords: &["beastmaster", "druid", "shapeshifter"],
        category: "beastmaster",
        overrides: &[
            ("jungle", "superclass"),
            ("ultimate", "superclass"),
            ("druid", "subclass"),
            ("shapeshifter", "subclass"),
        ],
    },
    ClassRule {
        keywords: &["mage", "elementalist", "hypnotist"],
        category: "mage",
        overrides: &[
            ("dementia", "superclass"),
            ("elementalist", "subclass"),
            ("hypnotist", "subclass"),
            ("dreamwalker", "subclass"),
        ],
    },
    ClassRule {
        keywords: &["priest", "booster", "masterhealer"],
        category: "priest",
        overrides: &[
            ("sage", "superclass"),
            ("booster", "subclass"),
            ("masterhealer", "subclass"),
        ],
    },
    ClassRule {
        keywords: &["thief", "rogue", "telethief"],
        category: "thief",
        overrides: &[
            ("assassin", "superclass"),
            ("rogue", "subclass"),
            ("telethief", "subclass"),
            ("contortionist", "subclass"),
        ],
    },
    ClassRule {
        keywords: &["scout", "observer", "trapper"],
        category: "scout",
        overrides: &[
            ("spy", "superclass"),
            ("observer", "subclass"),
            ("trapper", "subclass"),
        ],
    },
    ClassRule {
        keywords: &["gatherer", "alchemist", "herb"],
        category: "gatherer",
        overrides: &[
            ("omni", "superclass"),
            ("alchemist", "subclass"),
            ("herb", "subclass"),
            ("radar", "subclass"),
        ],
    },
];

/// Classify an ability by its source file path and canonical id.
pub fn classify_ability(file_path: &Path, ability_id: &str) -> Classification {
    let path_str = file_path.to_string_lossy().to_lowercase();
    let id_lower = ability_id.to_lowercase();

    for rule in CLASS_RULES {
        if rule.keywords.iter().any(|kw| path_str.contains(kw)) {
            let subcategory = rule
                .overrides
                .iter()
                .find(|(needle, _)| path_str.contains(needle))
                .map(|(_, value)| *value);
            return Classification {
                category: rule.category,
                subcategory,
            };
        }
    }

    if path_str.contains("building") {
        return Classification {
            category: "building",
            subcategory: None,
        };
    }
    if path_str.contains("item") || path_str.contains("spellbook") {
        return Classification {
            category: "item",
            subcategory: None,
        };
    }
    if ["sleep", "eat", "hibernate"]
        .iter()
        .any(|term| id_lower.contains(term))
    {
        return Classification {
            category: "basic",
            subcategory: None,
        };
    }

    Classification {
        category: "unknown",
        subcategory: None,
    }
}

/// One item rule: id keywords selecting a category, plus ordered keyword
/// groups selecting a subcategory within it.
struct ItemRule {
    keywords: &'static [&'static str],
    category: &'static str,
    subcategories: &'static [(&'static [&'static str], &'static str)],
}

/// Item rules in evaluation order. The final `tools` default is applied by
/// [`classify_item`] when nothing matches.
const ITEM_RULES: &[ItemRule] = &[
    ItemRule {
        keywords: &[
            "axe", "spear", "staff", "sword", "bow", "blowgun", "dagger", "club", "mace",
        ],
        category: "weapons",
        subcategories: &[],
    },
    ItemRule {
        keywords: &[
            "armor", "gloves", "boots", "coat", "shield", "helmet", "paws",
        ],
        category: "armor",
        subcategories: &[],
    },
    ItemRule {
        keywords: &["potion", "elixir", "brew"],
        category: "potions",
        subcategories: &[],
    },
    ItemRule {
        keywords: &["scroll"],
        category: "scrolls",
        subcategories: &[],
    },
    ItemRule {
        keywords: &[
            "hide", "meat", "herb", "seed", "crystal", "essence", "ingot", "ore", "bone", "fur",
            "skin", "feather", "horn", "claw", "fang", "venom", "spirit",
        ],
        category: "raw-materials",
        subcategories: &[
            (&["herb", "seed"], "herbs"),
            (
                &[
                    "hide", "meat", "fur", "skin", "bone", "feather", "horn", "claw", "fang",
                ],
                "animal-parts",
            ),
            (&["crystal", "essence", "spirit"], "essences"),
            (&["ore", "ingot"], "metals"),
        ],
    },
    ItemRule {
        keywords: &["net", "bomb", "trap", "kit", "lure", "rope", "bag"],
        category: "tools",
        subcategories: &[],
    },
    ItemRule {
        keywords: &["hut", "house", "forge", "workshop", "tower"],
        category: "buildings",
        subcategories: &[],
    },
];

/// Classify an item by its canonical id. Falls back to `tools`.
pub fn classify_item(item_id: &str) -> Classification {
    let id_lower = item_id.to_lowercase();

    for rule in ITEM_RULES {
        if rule.keywords.iter().any(|kw| id_lower.contains(kw)) {
            let subcategory = rule
                .subcategories
                .iter()
                .find(|(needles, _)| needles.iter().any(|kw| id_lower.contains(kw)))
                .map(|(_, value)| *value);
            return Classification {
                category: rule.category,
                subcategory,
            };
        }
    }

    Classification {
        category: "tools",
        subcategory: None,
    }
}

/// Fixed item categories in emission order. Generation writes one module per
/// category even when it is empty.
pub const ITEM_CATEGORIES: &[&str] = &[
    "raw-materials",
    "weapons",
    "armor",
    "tools",
    "potions",
    "scrolls",
    "buildings",
];
