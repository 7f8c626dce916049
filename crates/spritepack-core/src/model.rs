use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (pixels). `x,y` is top-left; `w,h` are sizes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
    /// Exclusive right edge coordinate (`x + w`).
    pub fn right(&self) -> u32 {
        self.x + self.w
    }
    /// Exclusive bottom edge coordinate (`y + h`).
    pub fn bottom(&self) -> u32 {
        self.y + self.h
    }
    pub fn area(&self) -> u64 {
        self.w as u64 * self.h as u64
    }
    /// Returns true if `r` is fully inside `self`.
    pub fn contains(&self, r: &Rect) -> bool {
        r.x >= self.x && r.y >= self.y && r.right() <= self.right() && r.bottom() <= self.bottom()
    }
    /// Returns true if the interiors of `self` and `r` overlap.
    pub fn intersects(&self, r: &Rect) -> bool {
        !(self.x >= r.right() || r.x >= self.right() || self.y >= r.bottom() || r.y >= self.bottom())
    }
}

/// Where a sprite landed in the bin.
///
/// `left,top` is the upper-left corner of the placed rectangle. When
/// `rotated` is set, the sprite was turned 90 degrees clockwise and the
/// occupied region is `height x width` of the size handed to the packer.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Placement {
    pub left: u32,
    pub top: u32,
    pub rotated: bool,
}

impl Placement {
    /// Footprint of a `(w, h)` sprite placed here, accounting for rotation.
    pub fn footprint(&self, w: u32, h: u32) -> Rect {
        let (ew, eh) = if self.rotated { (h, w) } else { (w, h) };
        Rect::new(self.left, self.top, ew, eh)
    }
}

/// Offsets and original dimensions recorded when a sprite is alpha-trimmed,
/// so consumers can reposition it in its untrimmed coordinate frame.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrimInfo {
    /// Left edge of the trimmed region within the original image.
    pub offset_left: u32,
    /// Top edge of the trimmed region within the original image.
    pub offset_top: u32,
    /// Width of the image before trimming.
    pub origin_width: u32,
    /// Height of the image before trimming.
    pub origin_height: u32,
}

/// One packed sprite: name, trimmed size handed to the packer
/// (pre-rotation), trim metadata, and final placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpriteFrame {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub trim: TrimInfo,
    pub placement: Placement,
}

impl SpriteFrame {
    /// Region of the bin this sprite occupies.
    pub fn footprint(&self) -> Rect {
        self.placement.footprint(self.width, self.height)
    }
}

/// The finished layout: bin dimensions, occupancy and one frame per input
/// sprite, in directory-scan order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtlasLayout {
    pub width: u32,
    pub height: u32,
    pub occupancy: f64,
    pub sprites: Vec<SpriteFrame>,
}
