//! Position maps for card layouts.
//!
//! The OCR service only reports reading order, so name fields are located by
//! position. A `CardLayout` holds that knowledge so other card designs can
//! supply their own map without touching the pattern rules.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Name fields that are located by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameField {
    FirstName,
    LastName,
}

/// Header cut-off and position map for one card design.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardLayout {
    /// Fragments with `order <= skip_through` are header text and ignored.
    pub skip_through: u32,

    /// Reading-order position to the name field printed there.
    pub positions: BTreeMap<u32, NameField>,
}

impl CardLayout {
    /// Layout with the given header cut-off and no positions.
    pub fn new(skip_through: u32) -> Self {
        Self {
            skip_through,
            positions: BTreeMap::new(),
        }
    }

    pub fn with_position(mut self, order: u32, field: NameField) -> Self {
        self.positions.insert(order, field);
        self
    }

    /// Whether a fragment at `order` is header text.
    pub fn is_header(&self, order: u32) -> bool {
        order <= self.skip_through
    }

    /// Name field printed at `order`, if any.
    pub fn field_at(&self, order: u32) -> Option<NameField> {
        self.positions.get(&order).copied()
    }
}

impl Default for CardLayout {
    /// Two header lines, then first name and last name.
    fn default() -> Self {
        Self::new(2)
            .with_position(3, NameField::FirstName)
            .with_position(4, NameField::LastName)
    }
}
