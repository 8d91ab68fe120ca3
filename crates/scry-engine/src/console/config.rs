use std::fmt;
use std::str::FromStr;

use crate::coords::Vec2;
use crate::paint::Color;

use super::ConsoleError;

/// Direction in which new lines push older ones.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum Orientation {
    /// Newest line at the bottom, like a terminal.
    #[default]
    ScrollUp,
    /// Newest line at the top.
    ScrollDown,
}

impl Orientation {
    pub const NAMES: [&'static str; 2] = ["scroll-up", "scroll-down"];

    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::ScrollUp => "scroll-up",
            Orientation::ScrollDown => "scroll-down",
        }
    }
}

/// Horizontal reference edge of the grid relative to `pos`.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum AnchorX {
    #[default]
    Left,
    Right,
    Center,
}

impl AnchorX {
    pub const NAMES: [&'static str; 3] = ["left", "right", "center"];

    pub fn as_str(self) -> &'static str {
        match self {
            AnchorX::Left => "left",
            AnchorX::Right => "right",
            AnchorX::Center => "center",
        }
    }
}

/// Vertical reference edge of the grid relative to `pos`.
///
/// `Middle` and `Center` are synonyms.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum AnchorY {
    #[default]
    Top,
    Middle,
    Center,
    Bottom,
}

impl AnchorY {
    pub const NAMES: [&'static str; 4] = ["top", "middle", "center", "bottom"];

    pub fn as_str(self) -> &'static str {
        match self {
            AnchorY::Top => "top",
            AnchorY::Middle => "middle",
            AnchorY::Center => "center",
            AnchorY::Bottom => "bottom",
        }
    }
}

macro_rules! named_enum {
    ($ty:ident, $field:literal, [$($name:literal => $variant:ident),+ $(,)?]) => {
        impl FromStr for $ty {
            type Err = ConsoleError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok($ty::$variant),)+
                    other => Err(ConsoleError::validation($field, other, &$ty::NAMES)),
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

named_enum!(Orientation, "orientation", [
    "scroll-up" => ScrollUp,
    "scroll-down" => ScrollDown,
]);
named_enum!(AnchorX, "anchor_x", [
    "left" => Left,
    "right" => Right,
    "center" => Center,
]);
named_enum!(AnchorY, "anchor_y", [
    "top" => Top,
    "middle" => Middle,
    "center" => Center,
    "bottom" => Bottom,
]);

/// Construction parameters for a [`Console`](super::Console).
///
/// Grid dimensions and anchors are fixed for the console's lifetime; position,
/// color and scale can be changed later through setters.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleConfig {
    pub pos: Vec2,
    pub color: Color,
    /// Integer magnification; values below 1 are raised to 1.
    pub scale: u32,
    pub rows: usize,
    pub cols: usize,
    pub orientation: Orientation,
    pub anchor_x: AnchorX,
    pub anchor_y: AnchorY,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            pos: Vec2::zero(),
            color: Color::from_straight(0.0, 0.0, 0.0, 1.0),
            scale: 1,
            rows: 24,
            cols: 80,
            orientation: Orientation::ScrollUp,
            anchor_x: AnchorX::Left,
            anchor_y: AnchorY::Top,
        }
    }
}

impl ConsoleConfig {
    pub fn with_pos(mut self, x: f32, y: f32) -> Self {
        self.pos = Vec2::new(x, y);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_grid(mut self, rows: usize, cols: usize) -> Self {
        self.rows = rows;
        self.cols = cols;
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_anchor(mut self, anchor_x: AnchorX, anchor_y: AnchorY) -> Self {
        self.anchor_x = anchor_x;
        self.anchor_y = anchor_y;
        self
    }

    /// Sets orientation and anchors from their names, e.g. `"scroll-down"`,
    /// `"center"`, `"bottom"`.
    pub fn with_names(
        mut self,
        orientation: &str,
        anchor_x: &str,
        anchor_y: &str,
    ) -> Result<Self, ConsoleError> {
        self.orientation = orientation.parse()?;
        self.anchor_x = anchor_x.parse()?;
        self.anchor_y = anchor_y.parse()?;
        Ok(self)
    }

    /// Checks everything the type system cannot.
    pub fn validate(&self) -> Result<(), ConsoleError> {
        if self.rows == 0 {
            return Err(ConsoleError::out_of_range("rows", self.rows, "a positive integer"));
        }
        if self.cols == 0 {
            return Err(ConsoleError::out_of_range("cols", self.cols, "a positive integer"));
        }
        if !self.pos.is_finite() {
            return Err(ConsoleError::out_of_range(
                "pos",
                format!("({}, {})", self.pos.x, self.pos.y),
                "finite coordinates",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_parse_to_variants() {
        assert_eq!("scroll-down".parse::<Orientation>(), Ok(Orientation::ScrollDown));
        assert_eq!("right".parse::<AnchorX>(), Ok(AnchorX::Right));
        assert_eq!("middle".parse::<AnchorY>(), Ok(AnchorY::Middle));
        assert_eq!("center".parse::<AnchorY>(), Ok(AnchorY::Center));
    }

    #[test]
    fn display_matches_parse() {
        for name in Orientation::NAMES {
            assert_eq!(name.parse::<Orientation>().unwrap().to_string(), name);
        }
        for name in AnchorX::NAMES {
            assert_eq!(name.parse::<AnchorX>().unwrap().to_string(), name);
        }
        for name in AnchorY::NAMES {
            assert_eq!(name.parse::<AnchorY>().unwrap().to_string(), name);
        }
    }

    #[test]
    fn unknown_orientation_lists_allowed_values() {
        let err = "sideways".parse::<Orientation>().unwrap_err();
        assert_eq!(
            err,
            ConsoleError::Validation {
                field: "orientation",
                value: "sideways".to_string(),
                allowed: "scroll-up, scroll-down".to_string(),
            }
        );
        assert_eq!(
            err.to_string(),
            "invalid orientation \"sideways\"; expected one of: scroll-up, scroll-down"
        );
    }

    #[test]
    fn names_are_case_sensitive() {
        assert!("Left".parse::<AnchorX>().is_err());
        assert!("TOP".parse::<AnchorY>().is_err());
    }

    #[test]
    fn zero_grid_is_rejected() {
        assert!(ConsoleConfig::default().with_grid(0, 10).validate().is_err());
        assert!(ConsoleConfig::default().with_grid(3, 0).validate().is_err());
        assert!(ConsoleConfig::default().with_grid(1, 1).validate().is_ok());
    }

    #[test]
    fn range_errors_name_the_expected_range() {
        let err = ConsoleConfig::default().with_grid(0, 10).validate().unwrap_err();
        assert_eq!(err.to_string(), "invalid rows 0: expected a positive integer");

        let err = ConsoleConfig::default().with_grid(3, 0).validate().unwrap_err();
        assert!(matches!(err, ConsoleError::OutOfRange { field: "cols", .. }));

        let err = ConsoleConfig::default().with_pos(f32::INFINITY, 0.0).validate().unwrap_err();
        assert_eq!(err.to_string(), "invalid pos (inf, 0): expected finite coordinates");
    }

    #[test]
    fn with_names_parses_all_three() {
        let c = ConsoleConfig::default()
            .with_names("scroll-down", "center", "bottom")
            .unwrap();
        assert_eq!(c.orientation, Orientation::ScrollDown);
        assert_eq!((c.anchor_x, c.anchor_y), (AnchorX::Center, AnchorY::Bottom));

        let err = ConsoleConfig::default()
            .with_names("scroll-up", "middle", "top")
            .unwrap_err();
        assert!(matches!(err, ConsoleError::Validation { field: "anchor_x", .. }));
    }

    #[test]
    fn defaults() {
        let c = ConsoleConfig::default();
        assert_eq!((c.rows, c.cols, c.scale), (24, 80, 1));
        assert_eq!(c.orientation, Orientation::ScrollUp);
        assert_eq!((c.anchor_x, c.anchor_y), (AnchorX::Left, AnchorY::Top));
    }
}
