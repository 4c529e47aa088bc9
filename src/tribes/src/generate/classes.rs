//! Troll class module generation.
//!
//! Splits the unit records into base classes and derived classes (sub and
//! super tiers) and emits `classes.ts` and `derivedClasses.ts`. The class
//! relationship table is maintained here; the game source declares the units
//! but not the tree between them.

use std::fmt::Write;

use super::{format_float, load_doc, write_module, GenerateError};
use crate::generate::escape::escape_single_quoted;
use crate::paths::{DataDir, SiteDataDir};
use crate::record::{UnitRecord, UnitsDoc};

const PLACEHOLDER_SUMMARY: &str = "Extracted from game source.";

/// Stat defaults for units the factory scan produced no value for.
const DEFAULT_ATTACK_SPEED: f64 = 1.8;
const DEFAULT_MOVE_SPEED: u32 = 300;
const DEFAULT_HP: u32 = 192;
const DEFAULT_MANA: u32 = 192;

const BASE_CLASSES: &[&str] = &[
    "hunter",
    "beastmaster",
    "mage",
    "priest",
    "thief",
    "scout",
    "gatherer",
];

struct ClassRelationship {
    parent: &'static str,
    subclasses: &'static [&'static str],
    superclasses: &'static [&'static str],
}

/// Class tree per base class, slugs in canonical form.
const CLASS_RELATIONSHIPS: &[ClassRelationship] = &[
    ClassRelationship {
        parent: "hunter",
        subclasses: &["warrior", "tracker"],
        superclasses: &["juggernaut"],
    },
    ClassRelationship {
        parent: "beastmaster",
        subclasses: &[
            "druid",
            "shapeshifter-wolf",
            "shapeshifter-bear",
            "shapeshifter-panther",
            "shapeshifter-tiger",
            "dire-wolf",
            "dire-bear",
        ],
        superclasses: &["jungle-tyrant"],
    },
    ClassRelationship {
        parent: "mage",
        subclasses: &["elementalist", "hypnotist", "dreamwalker"],
        superclasses: &["dementia-master"],
    },
    ClassRelationship {
        parent: "priest",
        subclasses: &["booster", "master-healer"],
        superclasses: &["sage"],
    },
    ClassRelationship {
        parent: "thief",
        subclasses: &["rogue", "telethief", "escape-artist", "contortionist"],
        superclasses: &["assassin"],
    },
    ClassRelationship {
        parent: "scout",
        subclasses: &["observer", "trapper"],
        superclasses: &["spy"],
    },
    ClassRelationship {
        parent: "gatherer",
        subclasses: &["radar-gatherer", "herb-master", "alchemist"],
        superclasses: &["omnigatherer"],
    },
];

/// Where a unit slug sits in the class tree: base, or derived from a parent.
#[derive(Debug, PartialEq, Eq)]
pub enum ClassTier {
    Base,
    Sub(&'static str),
    Super(&'static str),
}

pub fn class_tier(slug: &str) -> Option<ClassTier> {
    if BASE_CLASSES.contains(&slug) {
        return Some(ClassTier::Base);
    }
    for rel in CLASS_RELATIONSHIPS {
        if rel.subclasses.contains(&slug) {
            return Some(ClassTier::Sub(rel.parent));
        }
        if rel.superclasses.contains(&slug) {
            return Some(ClassTier::Super(rel.parent));
        }
    }
    None
}

fn relationship(slug: &str) -> Option<&'static ClassRelationship> {
    CLASS_RELATIONSHIPS.iter().find(|rel| rel.parent == slug)
}

fn write_stat_fields(out: &mut String, unit: &UnitRecord) {
    let _ = writeln!(
        out,
        "    growth: {{ strength: {}, agility: {}, intelligence: {} }},",
        format_float(unit.growth.strength),
        format_float(unit.growth.agility),
        format_float(unit.growth.intelligence)
    );
    let _ = writeln!(
        out,
        "    baseAttackSpeed: {},",
        format_float(unit.base_attack_speed.unwrap_or(DEFAULT_ATTACK_SPEED))
    );
    let _ = writeln!(
        out,
        "    baseMoveSpeed: {},",
        unit.base_move_speed.unwrap_or(DEFAULT_MOVE_SPEED)
    );
    let _ = writeln!(out, "    baseHp: {},", unit.base_hp.unwrap_or(DEFAULT_HP));
    let _ = writeln!(out, "    baseMana: {},", unit.base_mana.unwrap_or(DEFAULT_MANA));
}

pub fn format_base_class(unit: &UnitRecord) -> String {
    let mut out = String::from("  {\n");
    let _ = writeln!(out, "    slug: '{}',", unit.id);
    let _ = writeln!(out, "    name: '{}',", escape_single_quoted(&unit.name));
    let _ = writeln!(out, "    summary: '{PLACEHOLDER_SUMMARY}',");

    let rel = relationship(&unit.id);
    let subclasses: &[&str] = match rel {
        Some(rel) => rel.subclasses,
        None => &[],
    };
    let quoted: Vec<String> = subclasses.iter().map(|s| format!("'{s}'")).collect();
    let _ = writeln!(out, "    subclasses: [{}],", quoted.join(", "));
    if let Some(rel) = rel {
        if !rel.superclasses.is_empty() {
            let quoted: Vec<String> =
                rel.superclasses.iter().map(|s| format!("'{s}'")).collect();
            let _ = writeln!(out, "    superclasses: [{}],", quoted.join(", "));
        }
    }

    write_stat_fields(&mut out, unit);
    out.push_str("  },\n");
    out
}

pub fn format_derived_class(unit: &UnitRecord, parent: &str, tier: &str) -> String {
    let mut out = String::from("  {\n");
    let _ = writeln!(out, "    slug: '{}',", unit.id);
    let _ = writeln!(out, "    name: '{}',", escape_single_quoted(&unit.name));
    let _ = writeln!(out, "    parentSlug: '{parent}',");
    let _ = writeln!(out, "    type: '{tier}',");
    let _ = writeln!(out, "    summary: '{PLACEHOLDER_SUMMARY}',");
    write_stat_fields(&mut out, unit);
    out.push_str("  },\n");
    out
}

pub fn render_classes(base_classes: &[&UnitRecord]) -> String {
    let mut out = String::from(
        "export type TrollClassData = {\n\
         \x20 slug: string;\n\
         \x20 name: string;\n\
         \x20 summary: string;\n\
         \x20 iconSrc?: string;\n\
         \x20 subclasses: string[];\n\
         \x20 superclasses?: string[];\n\
         \x20 tips?: string[];\n\
         \x20 growth: { strength: number; agility: number; intelligence: number };\n\
         \x20 baseAttackSpeed: number;\n\
         \x20 baseMoveSpeed: number;\n\
         \x20 baseHp: number;\n\
         \x20 baseMana: number;\n\
         };\n\n\
         export const BASE_TROLL_CLASSES: TrollClassData[] = [\n",
    );
    for unit in base_classes {
        out.push_str(&format_base_class(unit));
    }
    out.push_str(
        "];\n\n\
         export function getClassBySlug(slug: string): TrollClassData | undefined {\n\
         \x20 return BASE_TROLL_CLASSES.find(cls => cls.slug === slug);\n\
         }\n\n\
         export const BASE_TROLL_CLASS_SLUGS = BASE_TROLL_CLASSES.map(cls => cls.slug);\n",
    );
    out
}

pub fn render_derived_classes(derived: &[(&UnitRecord, &'static str, &'static str)]) -> String {
    let mut out = String::from(
        "export type DerivedClassType = 'sub' | 'super';\n\n\
         export type DerivedClassData = {\n\
         \x20 slug: string;\n\
         \x20 name: string;\n\
         \x20 parentSlug: string;\n\
         \x20 type: DerivedClassType;\n\
         \x20 summary: string;\n\
         \x20 iconSrc?: string;\n\
         \x20 tips?: string[];\n\
         \x20 growth: { strength: number; agility: number; intelligence: number };\n\
         \x20 baseAttackSpeed: number;\n\
         \x20 baseMoveSpeed: number;\n\
         \x20 baseHp: number;\n\
         \x20 baseMana: number;\n\
         };\n\n\
         export const DERIVED_CLASSES: DerivedClassData[] = [\n",
    );
    for (unit, parent, tier) in derived {
        out.push_str(&format_derived_class(unit, parent, tier));
    }
    out.push_str(
        "];\n\n\
         export const SUBCLASS_SLUGS = DERIVED_CLASSES.filter(c => c.type === 'sub').map(c => c.slug);\n\
         export const SUPERCLASS_SLUGS = DERIVED_CLASSES.filter(c => c.type === 'super').map(c => c.slug);\n\n\
         export function getDerivedBySlug(slug: string): DerivedClassData | undefined {\n\
         \x20 return DERIVED_CLASSES.find(c => c.slug === slug);\n\
         }\n\n\
         export function getSubclassesByParentSlug(parentSlug: string): DerivedClassData[] {\n\
         \x20 return DERIVED_CLASSES.filter(c => c.parentSlug === parentSlug && c.type === 'sub');\n\
         }\n\n\
         export function getSupersByParentSlug(parentSlug: string): DerivedClassData[] {\n\
         \x20 return DERIVED_CLASSES.filter(c => c.parentSlug === parentSlug && c.type === 'super');\n\
         }\n",
    );
    out
}

/// Split units into base classes and derived classes, record order preserved.
/// Units outside the class tree (creeps, buildings) are dropped.
pub fn separate_classes(
    units: &[UnitRecord],
) -> (Vec<&UnitRecord>, Vec<(&UnitRecord, &'static str, &'static str)>) {
    let mut base = Vec::new();
    let mut derived = Vec::new();
    for unit in units {
        match class_tier(&unit.id) {
            Some(ClassTier::Base) => base.push(unit),
            Some(ClassTier::Sub(parent)) => derived.push((unit, parent, "sub")),
            Some(ClassTier::Super(parent)) => derived.push((unit, parent, "super")),
            None => {}
        }
    }
    (base, derived)
}

/// Generate the class modules. Returns the number of files written.
pub fn generate_and_write(data: &DataDir, site: &SiteDataDir) -> Result<usize, GenerateError> {
    let doc: UnitsDoc = load_doc(&data.units_json())?;
    let (base, derived) = separate_classes(&doc.units);

    write_module(&site.classes_file(), &render_classes(&base))?;
    write_module(
        &site.derived_classes_file(),
        &render_derived_classes(&derived),
    )?;
    println!(
        "Created classes.ts with {} base and derivedClasses.ts with {} derived classes",
        base.len(),
        derived.len()
    );
    Ok(2)
}
