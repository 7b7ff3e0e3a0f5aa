//! The print-kit catalog: sizes, frames, pricing, and SKU derivation.
//!
//! The catalog is fixed at compile time. A product variant is one
//! (size, frame) pair; its base price is the sum of the two component
//! prices, and its SKU and display name are derived deterministically so
//! the external inventory mirror always produces the same item for the
//! same pair.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A print size from the ISO A series.
///
/// Ordered smallest to largest; `ALL` preserves that order, which the
/// upload quality check relies on when recommending an alternative size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrintSize {
    A4,
    A3,
    A2,
    A1,
    A0,
}

impl PrintSize {
    /// All sizes, smallest first.
    pub const ALL: [Self; 5] = [Self::A4, Self::A3, Self::A2, Self::A1, Self::A0];

    /// Kit price for this size, in rand.
    #[must_use]
    pub fn price(self) -> Decimal {
        match self {
            Self::A4 => Decimal::new(49_999, 2),
            Self::A3 => Decimal::new(69_999, 2),
            Self::A2 => Decimal::new(89_999, 2),
            Self::A1 => Decimal::new(129_999, 2),
            Self::A0 => Decimal::new(169_999, 2),
        }
    }

    /// Physical dimensions, for display.
    #[must_use]
    pub const fn dimensions_mm(self) -> (u32, u32) {
        match self {
            Self::A4 => (210, 297),
            Self::A3 => (297, 420),
            Self::A2 => (420, 594),
            Self::A1 => (594, 841),
            Self::A0 => (841, 1189),
        }
    }

    /// Minimum pixel count on the image's smaller dimension for a
    /// print of acceptable quality at this size (300 DPI).
    #[must_use]
    pub const fn min_pixels(self) -> u32 {
        match self {
            Self::A4 => 1748,
            Self::A3 => 2480,
            Self::A2 => 3508,
            Self::A1 => 4961,
            Self::A0 => 7016,
        }
    }

    /// Catalog identifier ("A4" .. "A0").
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::A4 => "A4",
            Self::A3 => "A3",
            Self::A2 => "A2",
            Self::A1 => "A1",
            Self::A0 => "A0",
        }
    }
}

impl fmt::Display for PrintSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl std::str::FromStr for PrintSize {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A4" => Ok(Self::A4),
            "A3" => Ok(Self::A3),
            "A2" => Ok(Self::A2),
            "A1" => Ok(Self::A1),
            "A0" => Ok(Self::A0),
            _ => Err(CatalogError::UnknownSize(s.to_owned())),
        }
    }
}

/// Framing option for a kit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameKind {
    None,
    Standard,
    Premium,
}

impl FrameKind {
    /// All frame options.
    pub const ALL: [Self; 3] = [Self::None, Self::Standard, Self::Premium];

    /// Price of the framing option, in rand.
    #[must_use]
    pub fn price(self) -> Decimal {
        match self {
            Self::None => Decimal::ZERO,
            Self::Standard => Decimal::new(34_999, 2),
            Self::Premium => Decimal::new(69_999, 2),
        }
    }

    /// Catalog identifier ("none", "standard", "premium").
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Standard => "standard",
            Self::Premium => "premium",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::None => "No Frame",
            Self::Standard => "Standard Frame",
            Self::Premium => "Premium Frame",
        }
    }
}

impl fmt::Display for FrameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl std::str::FromStr for FrameKind {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "standard" => Ok(Self::Standard),
            "premium" => Ok(Self::Premium),
            _ => Err(CatalogError::UnknownFrame(s.to_owned())),
        }
    }
}

/// Errors when resolving a catalog identifier.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CatalogError {
    #[error("unknown print size: {0}")]
    UnknownSize(String),
    #[error("unknown frame kind: {0}")]
    UnknownFrame(String),
}

/// Base price of a (size, frame) variant: size price plus frame price.
#[must_use]
pub fn kit_price(size: PrintSize, frame: FrameKind) -> Decimal {
    size.price() + frame.price()
}

/// Human-readable inventory item name for a variant.
#[must_use]
pub fn kit_name(size: PrintSize, frame: FrameKind) -> String {
    format!(
        "ChartedArt Kit - {} - {} Frame",
        size.id(),
        frame.display_name()
    )
}

/// Deterministic SKU for a variant: `CA-{size}-{FRAME}` with the frame
/// segment upper-cased.
#[must_use]
pub fn kit_sku(size: PrintSize, frame: FrameKind) -> String {
    format!("CA-{}-{}", size.id(), frame.id().to_uppercase())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_kit_price_sums_components() {
        assert_eq!(
            kit_price(PrintSize::A3, FrameKind::None),
            Decimal::new(69_999, 2)
        );
        assert_eq!(
            kit_price(PrintSize::A4, FrameKind::Standard),
            Decimal::new(84_998, 2)
        );
        assert_eq!(
            kit_price(PrintSize::A0, FrameKind::Premium),
            Decimal::new(239_998, 2)
        );
    }

    #[test]
    fn test_sku_is_deterministic_and_uppercases_frame() {
        assert_eq!(kit_sku(PrintSize::A3, FrameKind::None), "CA-A3-NONE");
        assert_eq!(kit_sku(PrintSize::A1, FrameKind::Premium), "CA-A1-PREMIUM");
        // Same arguments, same SKU
        assert_eq!(
            kit_sku(PrintSize::A2, FrameKind::Standard),
            kit_sku(PrintSize::A2, FrameKind::Standard)
        );
    }

    #[test]
    fn test_kit_name() {
        assert_eq!(
            kit_name(PrintSize::A4, FrameKind::Standard),
            "ChartedArt Kit - A4 - Standard Frame Frame"
        );
        // The unframed option reads awkwardly but matches the inventory
        // items already provisioned upstream; do not "fix" the format.
        assert_eq!(
            kit_name(PrintSize::A4, FrameKind::None),
            "ChartedArt Kit - A4 - No Frame Frame"
        );
    }

    #[test]
    fn test_sizes_ordered_smallest_first() {
        let pixels: Vec<u32> = PrintSize::ALL.iter().map(|s| s.min_pixels()).collect();
        let mut sorted = pixels.clone();
        sorted.sort_unstable();
        assert_eq!(pixels, sorted);
    }

    #[test]
    fn test_id_roundtrip() {
        for size in PrintSize::ALL {
            assert_eq!(size.id().parse::<PrintSize>().unwrap(), size);
        }
        for frame in FrameKind::ALL {
            assert_eq!(frame.id().parse::<FrameKind>().unwrap(), frame);
        }
    }
}
