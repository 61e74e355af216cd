//! Die faces.

use serde::{Deserialize, Serialize};

/// One face of a six-sided die.
///
/// Faces 1-5 score their pip value. Face 6 is the worm: it scores 5 and is
/// the face the optional worm rule asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Face(u8);

impl Face {
    /// The worm face.
    pub const WORM: Face = Face(6);

    /// All six faces in pip order.
    pub const ALL: [Face; 6] = [Face(1), Face(2), Face(3), Face(4), Face(5), Face(6)];

    /// Create a face, returning `None` outside 1..=6.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value >= 1 && value <= 6 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Pip value (1..=6).
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn is_worm(self) -> bool {
        self.0 == Self::WORM.0
    }

    /// Contribution of one die showing this face to the running total.
    #[must_use]
    pub const fn weight(self) -> u32 {
        if self.is_worm() {
            5
        } else {
            self.0 as u32
        }
    }

    /// Zero-based slot for per-face tables.
    #[must_use]
    pub(crate) const fn slot(self) -> usize {
        (self.0 - 1) as usize
    }
}

impl TryFrom<u8> for Face {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Face::new(value).ok_or_else(|| format!("die face must be 1-6, got {value}"))
    }
}

impl From<Face> for u8 {
    fn from(face: Face) -> u8 {
        face.0
    }
}

impl std::fmt::Display for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_worm() {
            write!(f, "worm")
        } else {
            write!(f, "{}", self.0)
        }
    }
}
