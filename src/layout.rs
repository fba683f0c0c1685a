//! Single-axis sprite layout.
//!
//! Places every base icon (and its validated retina counterpart) one after
//! another along the stacking axis and records the background offsets the
//! stylesheet needs. Offsets are computed in one forward pass and never
//! revisited, so the order of `icons` is the order of the composite.

use std::path::PathBuf;

use serde::Deserialize;

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::discovery::find_retina;

/// Diagnostic code for a retina file that is not exactly twice its base icon.
pub const RETINA_RATIO_MISMATCH: &str = "less_sprites::retina::ratio";

/// Pixel dimensions of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Half of this size, rounded up.
    pub fn half_ceil(self) -> Size {
        Size::new(half_ceil(self.width), half_ceil(self.height))
    }
}

/// Axis along which tiles are appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Right,
    #[default]
    Down,
}

impl Direction {
    /// Extent of `size` along the stacking axis.
    pub fn along(self, size: Size) -> u32 {
        match self {
            Direction::Right => size.width,
            Direction::Down => size.height,
        }
    }

    /// Extent of `size` across the stacking axis.
    pub fn across(self, size: Size) -> u32 {
        match self {
            Direction::Right => size.height,
            Direction::Down => size.width,
        }
    }

    /// Build a `(x, y)` pair from stacking-axis and cross-axis components.
    fn point(self, along: i64, across: i64) -> (i64, i64) {
        match self {
            Direction::Right => (along, across),
            Direction::Down => (across, along),
        }
    }

    fn size(self, along: u32, across: u32) -> Size {
        match self {
            Direction::Right => Size::new(along, across),
            Direction::Down => Size::new(across, along),
        }
    }
}

/// A discovered icon file with its probed dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconSpec {
    /// File basename without the extension (and without the retina marker).
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub source_path: PathBuf,
}

impl IconSpec {
    pub fn new(name: impl Into<String>, size: Size, source_path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            width: size.width,
            height: size.height,
            source_path: source_path.into(),
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Retina icons share the shape of base icons.
pub type RetinaSpec = IconSpec;

/// Placement of one base icon and its optional retina variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutEntry {
    pub icon: IconSpec,
    pub retina: Option<RetinaSpec>,
    pub offset_x: i64,
    pub offset_y: i64,
    pub retina_offset_x: i64,
    pub retina_offset_y: i64,
}

/// Ordered placements for one build.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    pub direction: Direction,
    pub border: u32,
    pub entries: Vec<LayoutEntry>,
}

impl Layout {
    /// Entries with a validated retina variant, in layout order.
    pub fn retina_entries(&self) -> impl Iterator<Item = (&LayoutEntry, &RetinaSpec)> {
        self.entries
            .iter()
            .filter_map(|e| e.retina.as_ref().map(|r| (e, r)))
    }

    pub fn has_retina(&self) -> bool {
        self.entries.iter().any(|e| e.retina.is_some())
    }

    /// Size the base composite will have once every tile is appended with
    /// its border.
    pub fn extent(&self) -> Size {
        extent(
            self.direction,
            self.border,
            self.entries.iter().map(|e| e.icon.size()),
        )
    }

    /// Size the retina composite will have, in device pixels.
    pub fn retina_extent(&self) -> Option<Size> {
        if !self.has_retina() {
            return None;
        }
        Some(extent(
            self.direction,
            retina_border(self.border),
            self.retina_entries().map(|(_, r)| r.size()),
        ))
    }
}

/// Border applied around retina tiles, in device pixels.
///
/// The retina composite is shown at half size, so doubling the border keeps
/// its tiles on the same CSS pixel grid as the base composite.
pub fn retina_border(border: u32) -> u32 {
    border * 2
}

/// Compute the placement of every base icon.
///
/// `icons` must be in the order the tiles are appended to the composite.
/// Retina files whose dimensions are not exactly double their base icon are
/// dropped and reported in the returned diagnostics.
pub fn compute_layout(
    icons: &[IconSpec],
    retinas: &[RetinaSpec],
    direction: Direction,
    border: u32,
) -> (Layout, Diagnostics) {
    let mut diagnostics = Diagnostics::new();
    let mut entries = Vec::with_capacity(icons.len());

    let padding = 2 * i64::from(border);
    let start = -i64::from(border);
    let mut cursor = start;
    let mut retina_cursor = start;

    for icon in icons {
        let retina = find_retina(icon, retinas)
            .filter(|retina| {
                let ok = is_double(icon.size(), retina.size());
                if !ok {
                    diagnostics.push(ratio_mismatch(icon, retina));
                }
                ok
            })
            .cloned();

        let (offset_x, offset_y) = direction.point(cursor, start);

        let (retina_offset_x, retina_offset_y) = match &retina {
            Some(r) => {
                let point = direction.point(retina_cursor, start);
                retina_cursor -= i64::from(half_ceil(direction.along(r.size()))) + padding;
                point
            }
            None => (0, 0),
        };

        cursor -= i64::from(direction.along(icon.size())) + padding;

        entries.push(LayoutEntry {
            icon: icon.clone(),
            retina,
            offset_x,
            offset_y,
            retina_offset_x,
            retina_offset_y,
        });
    }

    let layout = Layout {
        direction,
        border,
        entries,
    };
    (layout, diagnostics)
}

fn is_double(icon: Size, retina: Size) -> bool {
    retina.width == icon.width * 2 && retina.height == icon.height * 2
}

fn ratio_mismatch(icon: &IconSpec, retina: &RetinaSpec) -> Diagnostic {
    Diagnostic::new(
        RETINA_RATIO_MISMATCH,
        format!(
            "retina icon for \"{}\" is {}x{} but the base icon is {}x{}",
            icon.name, retina.width, retina.height, icon.width, icon.height
        ),
    )
    .with_help(format!(
        "Resize {} to {}x{} or remove it",
        retina.source_path.display(),
        icon.width * 2,
        icon.height * 2
    ))
}

fn half_ceil(n: u32) -> u32 {
    n.div_ceil(2)
}

fn extent(direction: Direction, border: u32, sizes: impl Iterator<Item = Size>) -> Size {
    let mut along = 0;
    let mut across = 0;
    for size in sizes {
        along += direction.along(size) + 2 * border;
        across = across.max(direction.across(size) + 2 * border);
    }
    direction.size(along, across)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn icon(name: &str, w: u32, h: u32) -> IconSpec {
        IconSpec::new(name, Size::new(w, h), format!("{}.png", name))
    }

    fn retina(name: &str, w: u32, h: u32) -> RetinaSpec {
        IconSpec::new(name, Size::new(w, h), format!("{}@2x.png", name))
    }

    fn offsets(layout: &Layout) -> Vec<(i64, i64)> {
        layout
            .entries
            .iter()
            .map(|e| (e.offset_x, e.offset_y))
            .collect()
    }

    #[test]
    fn test_down_without_border() {
        let icons = vec![icon("a", 10, 10), icon("b", 20, 20)];
        let (layout, diagnostics) = compute_layout(&icons, &[], Direction::Down, 0);

        assert!(diagnostics.is_empty());
        assert_eq!(offsets(&layout), vec![(0, 0), (0, -10)]);
        assert_eq!(layout.extent(), Size::new(20, 30));
    }

    #[test]
    fn test_right_with_border() {
        let icons = vec![icon("a", 10, 4), icon("b", 6, 8), icon("c", 3, 3)];
        let (layout, _) = compute_layout(&icons, &[], Direction::Right, 2);

        assert_eq!(offsets(&layout), vec![(-2, -2), (-16, -2), (-26, -2)]);
        assert_eq!(layout.extent(), Size::new(31, 12));
    }

    #[test]
    fn test_gaps_match_previous_tile() {
        let icons = vec![
            icon("a", 5, 7),
            icon("b", 9, 1),
            icon("c", 3, 12),
            icon("d", 16, 16),
        ];
        let border = 3;
        let (layout, _) = compute_layout(&icons, &[], Direction::Down, border);

        assert_eq!(layout.entries[0].offset_y, -3);
        for pair in layout.entries.windows(2) {
            let gap = pair[0].offset_y - pair[1].offset_y;
            assert_eq!(gap, i64::from(pair[0].icon.height + 2 * border));
            assert_eq!(pair[1].offset_x, -3);
        }
    }

    #[test]
    fn test_preserves_insertion_order() {
        let icons = vec![icon("zeta", 4, 4), icon("alpha", 4, 4), icon("mid", 4, 4)];
        let (layout, _) = compute_layout(&icons, &[], Direction::Down, 0);

        let names: Vec<&str> = layout.entries.iter().map(|e| e.icon.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_matched_retina() {
        let icons = vec![icon("a", 10, 10), icon("b", 8, 6), icon("c", 4, 4)];
        let retinas = vec![retina("c", 8, 8), retina("a", 20, 20)];
        let (layout, diagnostics) = compute_layout(&icons, &retinas, Direction::Down, 2);

        assert!(diagnostics.is_empty());
        let a = &layout.entries[0];
        let b = &layout.entries[1];
        let c = &layout.entries[2];

        assert!(a.retina.is_some());
        assert_eq!((a.retina_offset_x, a.retina_offset_y), (-2, -2));
        assert!(b.retina.is_none());
        assert!(c.retina.is_some());
        // retina cursor skips b: -2 - (20 / 2 + 4)
        assert_eq!((c.retina_offset_x, c.retina_offset_y), (-2, -16));
        // base cursor counts every icon
        assert_eq!(c.offset_y, -2 - 14 - 10);

        assert_eq!(layout.retina_extent(), Some(Size::new(28, 44)));
        assert_eq!(layout.retina_extent().map(Size::half_ceil), Some(Size::new(14, 22)));
    }

    #[test]
    fn test_ratio_mismatch_is_dropped() {
        let icons = vec![icon("icon", 10, 10)];
        let retinas = vec![retina("icon", 15, 15)];
        let (layout, diagnostics) = compute_layout(&icons, &retinas, Direction::Down, 0);

        assert!(layout.entries[0].retina.is_none());
        assert!(!layout.has_retina());
        assert_eq!(layout.retina_extent(), None);
        assert_eq!(diagnostics.len(), 1);
        let message = &diagnostics.iter().next().unwrap().message;
        assert!(message.contains("\"icon\""));
        assert!(message.contains("15x15"));
        assert!(message.contains("10x10"));
    }

    #[test]
    fn test_ratio_must_hold_on_both_axes() {
        let icons = vec![icon("wide", 10, 5)];
        let retinas = vec![retina("wide", 20, 12)];
        let (layout, diagnostics) = compute_layout(&icons, &retinas, Direction::Right, 1);

        assert!(layout.entries[0].retina.is_none());
        assert!(diagnostics.contains_code(RETINA_RATIO_MISMATCH));
    }

    #[test]
    fn test_empty_layout() {
        let (layout, diagnostics) = compute_layout(&[], &[], Direction::Down, 2);
        assert!(layout.entries.is_empty());
        assert!(diagnostics.is_empty());
        assert_eq!(layout.extent(), Size::new(0, 0));
    }

    #[test]
    fn test_half_ceil() {
        assert_eq!(Size::new(21, 20).half_ceil(), Size::new(11, 10));
        assert_eq!(Size::new(0, 1).half_ceil(), Size::new(0, 1));
    }

    #[test]
    fn test_direction_deserialize() {
        let right: Direction = serde_json::from_str("\"right\"").unwrap();
        let down: Direction = serde_json::from_str("\"down\"").unwrap();
        assert_eq!(right, Direction::Right);
        assert_eq!(down, Direction::Down);
        assert!(serde_json::from_str::<Direction>("\"diagonal\"").is_err());
        assert_eq!(Direction::default(), Direction::Down);
    }
}
