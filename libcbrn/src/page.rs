use crate::utils::round_ratio;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
    Square,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// `height / width`, rounded to 4 decimal places.
    pub fn ratio(&self) -> f64 {
        round_ratio(self.height as f64 / self.width as f64)
    }

    pub fn orientation(&self) -> Orientation {
        if self.width > self.height {
            Orientation::Horizontal
        } else if self.width < self.height {
            Orientation::Vertical
        } else {
            Orientation::Square
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Layout {
    Single,
    SpreadHorizontal,
    SpreadVertical,
    IrregularHorizontal,
    IrregularVertical,
}

impl Layout {
    pub fn is_spread(self) -> bool {
        matches!(self, Layout::SpreadHorizontal | Layout::SpreadVertical)
    }

    pub fn is_irregular(self) -> bool {
        matches!(self, Layout::IrregularHorizontal | Layout::IrregularVertical)
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Layout::Single => "single",
            Layout::SpreadHorizontal => "horizontal spread",
            Layout::SpreadVertical => "vertical spread",
            Layout::IrregularHorizontal => "irregular horizontal",
            Layout::IrregularVertical => "irregular vertical",
        };
        f.write_str(label)
    }
}

/// A file to be numbered, as handed to the planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageInput {
    pub file_name: String,
    pub extension: String,
    pub size: Size,
}

impl PageInput {
    /// Keeps the file's own extension; falls back to the sniffed one when the
    /// name has none.
    pub fn new(file_name: impl Into<String>, sniffed_extension: &str, size: Size) -> Self {
        let file_name = file_name.into();
        let extension = std::path::Path::new(&file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty())
            .unwrap_or(sniffed_extension)
            .to_string();
        Self {
            file_name,
            extension,
            size,
        }
    }
}

/// A classified page, before numbering.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub index: usize,
    pub file_name: String,
    pub extension: String,
    pub size: Size,
    pub ratio: f64,
    pub layout: Layout,
    pub slot_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberedPage {
    #[serde(flatten)]
    pub page: Page,
    pub number: String,
    pub target_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_is_height_over_width() {
        assert_eq!(Size::new(1000, 1500).ratio(), 1.5);
        assert_eq!(Size::new(2000, 1400).ratio(), 0.7);
        assert_eq!(Size::new(3, 1).ratio(), 0.3333);
    }

    #[test]
    fn orientation_follows_longer_side() {
        assert_eq!(Size::new(2, 1).orientation(), Orientation::Horizontal);
        assert_eq!(Size::new(1, 2).orientation(), Orientation::Vertical);
        assert_eq!(Size::new(5, 5).orientation(), Orientation::Square);
    }

    #[test]
    fn input_keeps_original_extension() {
        let input = PageInput::new("scan 01.JPEG", "jpg", Size::new(1, 2));
        assert_eq!(input.extension, "JPEG");

        let bare = PageInput::new("cover", "png", Size::new(1, 2));
        assert_eq!(bare.extension, "png");
    }
}
