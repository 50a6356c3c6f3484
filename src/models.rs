//! Wire models for the item query API.
//!
//! The query API returns camelCase JSON; fields are renamed on the way in.
//! Stat fields are optional because older servers omit them entirely — rows
//! fall back to per-layout placeholders when they are missing.

use serde::Deserialize;

/// Class id of the hellfire torch large charm.
pub const TORCH_CLASSID: u32 = 604;

/// Class id of the annihilus small charm.
pub const ANNIVERSARY_CLASSID: u32 = 603;

/// Item quality ordinal that marks a unique item.
pub const UNIQUE_QUALITY: u8 = 7;

/// Fixed realm-name table, indexed by the `accountRealm` ordinal.
const REALM_NAMES: [&str; 5] = ["uswest", "useast", "asia", "europe", "resurrected"];

/// Name-column accent per quality ordinal, as the display surface's
/// stylesheet spells them. Out-of-range ordinals get no accent.
const QUALITY_ACCENTS: [&str; 9] = [
    "", "colorb", "colorb", "colorb", "color3", "color2", "color9", "color4", "color8",
];

/// Resolve a realm ordinal to its name. Unknown ordinals fall back to
/// "useast", matching the server's historical default realm.
pub fn realm_name(realm: u8) -> &'static str {
    REALM_NAMES.get(realm as usize).copied().unwrap_or("useast")
}

/// Resolve a quality ordinal to the name-column accent class.
pub fn quality_accent(quality: u8) -> &'static str {
    QUALITY_ACCENTS.get(quality as usize).copied().unwrap_or("")
}

/// Which stat-column layout an item renders with.
///
/// Derived from `(item_quality, item_classid)`, never stored. The page header
/// uses the first item's display type while each row uses its own — pages
/// mixing item types render headers that do not match every row, a behavior
/// kept for compatibility with the existing admin surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayType {
    /// Hellfire torch: class, stat, resistance columns.
    Torch,
    /// Annihilus: stat, resistance, experience columns.
    Anniversary,
    /// Everything else: enhanced-defense and sockets columns.
    #[default]
    Normal,
}

impl DisplayType {
    /// Classify an item by its quality and class id.
    pub fn of(quality: u8, classid: u32) -> Self {
        if quality == UNIQUE_QUALITY && classid == TORCH_CLASSID {
            DisplayType::Torch
        } else if quality == UNIQUE_QUALITY && classid == ANNIVERSARY_CLASSID {
            DisplayType::Anniversary
        } else {
            DisplayType::Normal
        }
    }
}

/// One game-item record as returned by the query API.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct Item {
    /// Unique, stable id within a single page response.
    #[serde(rename = "itemId")]
    pub item_id: i64,
    /// Quality ordinal, 0–8.
    #[serde(rename = "itemQuality", default)]
    pub item_quality: u8,
    #[serde(rename = "itemClassid", default)]
    pub item_classid: u32,
    #[serde(rename = "itemType", default)]
    pub item_type: String,
    #[serde(rename = "itemLocation", default)]
    pub item_location: u8,
    #[serde(rename = "itemName", default)]
    pub item_name: String,
    #[serde(rename = "itemImage", default)]
    pub item_image: String,
    #[serde(rename = "itemDescription", default)]
    pub item_description: String,
    #[serde(rename = "itemMD5", default)]
    pub item_md5: String,
    #[serde(rename = "accountLogin", default)]
    pub account_login: String,
    /// Realm ordinal, resolved through [`realm_name`].
    #[serde(rename = "accountRealm", default)]
    pub account_realm: u8,
    #[serde(rename = "charName", default)]
    pub char_name: String,

    // Per-item stats, when the server provides them. Rows render placeholders
    // for absent values ("unid" on charm columns, blank on normal columns).
    #[serde(rename = "class", default)]
    pub stat_class: Option<String>,
    #[serde(rename = "stat", default)]
    pub stat: Option<String>,
    #[serde(rename = "res", default)]
    pub res: Option<String>,
    #[serde(rename = "exp", default)]
    pub exp: Option<String>,
    #[serde(rename = "ed", default)]
    pub ed: Option<String>,
    #[serde(rename = "sockets", default)]
    pub sockets: Option<String>,
}

impl Item {
    /// The stat-column layout this item renders with.
    pub fn display_type(&self) -> DisplayType {
        DisplayType::of(self.item_quality, self.item_classid)
    }
}

/// One page of the filtered item collection.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct ItemPage {
    pub items: Vec<Item>,
    /// Total matching items across all pages.
    pub total: u64,
    /// Total page count, `ceil(total / perPage)` as computed by the server.
    pub pages: u64,
}
