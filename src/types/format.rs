#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};

use crate::Extents3D;

/// Pixel/texel formats supported by the resource layer. Naming mirrors the
/// conventions most backends share; the wire-level enum values of any given
/// backend are out of scope here.
#[allow(non_camel_case_types)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub enum Format {
    UNDEFINED,
    R8_UNORM,
    R8G8_UNORM,
    R8G8B8A8_UNORM,
    R8G8B8A8_SRGB,
    B8G8R8A8_UNORM,
    R16_SFLOAT,
    R16G16B16A16_SFLOAT,
    R32_SFLOAT,
    R32G32_SFLOAT,
    R32G32B32A32_SFLOAT,
    R32_UINT,
    D32_SFLOAT,
    D24_UNORM_S8_UINT,
    BC1_RGBA_UNORM_BLOCK,
    BC3_UNORM_BLOCK,
}

impl Default for Format {
    fn default() -> Self {
        Self::UNDEFINED
    }
}

impl Format {
    /// Width/height of one compression block, in texels. 1x1 for
    /// uncompressed formats.
    pub fn block_dimensions(self) -> (u32, u32) {
        match self {
            Self::BC1_RGBA_UNORM_BLOCK | Self::BC3_UNORM_BLOCK => (4, 4),
            _ => (1, 1),
        }
    }

    /// Bytes per block (per texel for uncompressed formats).
    pub fn block_size_in_bytes(self) -> u64 {
        match self {
            Self::UNDEFINED => 0,
            Self::R8_UNORM => 1,
            Self::R8G8_UNORM => 2,
            Self::R8G8B8A8_UNORM
            | Self::R8G8B8A8_SRGB
            | Self::B8G8R8A8_UNORM
            | Self::R32_SFLOAT
            | Self::R32_UINT
            | Self::D32_SFLOAT
            | Self::D24_UNORM_S8_UINT => 4,
            Self::R16_SFLOAT => 2,
            Self::R16G16B16A16_SFLOAT | Self::R32G32_SFLOAT | Self::BC1_RGBA_UNORM_BLOCK => 8,
            Self::R32G32B32A32_SFLOAT | Self::BC3_UNORM_BLOCK => 16,
        }
    }

    pub fn has_depth(self) -> bool {
        matches!(self, Self::D32_SFLOAT | Self::D24_UNORM_S8_UINT)
    }

    pub fn has_stencil(self) -> bool {
        matches!(self, Self::D24_UNORM_S8_UINT)
    }

    pub fn is_compressed(self) -> bool {
        matches!(self, Self::BC1_RGBA_UNORM_BLOCK | Self::BC3_UNORM_BLOCK)
    }

    /// Extents of the given mip level: base extents halved per level,
    /// floored, never below one.
    pub fn level_extents(base: Extents3D, level: u32) -> Extents3D {
        Extents3D {
            width: base.width.checked_shr(level).unwrap_or(0).max(1),
            height: base.height.checked_shr(level).unwrap_or(0).max(1),
            depth: base.depth.checked_shr(level).unwrap_or(0).max(1),
        }
    }

    /// Byte size of one slice of one mip level, from the block math. For
    /// compressed formats partial blocks round up.
    pub fn level_size_in_bytes(self, base: Extents3D, level: u32) -> u64 {
        let extents = Self::level_extents(base, level);
        let (block_w, block_h) = self.block_dimensions();
        let blocks_x = (extents.width + block_w - 1) / block_w;
        let blocks_y = (extents.height + block_h - 1) / block_h;
        u64::from(blocks_x) * u64::from(blocks_y) * u64::from(extents.depth)
            * self.block_size_in_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_extents_floor_at_one() {
        let base = Extents3D {
            width: 20,
            height: 5,
            depth: 1,
        };
        let level2 = Format::level_extents(base, 2);
        assert_eq!((level2.width, level2.height, level2.depth), (5, 1, 1));
        let level6 = Format::level_extents(base, 6);
        assert_eq!((level6.width, level6.height, level6.depth), (1, 1, 1));
        // Past the shift width the chain stays pinned at one texel.
        let level40 = Format::level_extents(base, 40);
        assert_eq!((level40.width, level40.height, level40.depth), (1, 1, 1));
    }

    #[test]
    fn uncompressed_level_sizes() {
        let base = Extents3D {
            width: 16,
            height: 16,
            depth: 1,
        };
        assert_eq!(Format::R8G8B8A8_UNORM.level_size_in_bytes(base, 0), 16 * 16 * 4);
        assert_eq!(Format::R8G8B8A8_UNORM.level_size_in_bytes(base, 1), 8 * 8 * 4);
        assert_eq!(Format::R8G8B8A8_UNORM.level_size_in_bytes(base, 4), 4);
    }

    #[test]
    fn compressed_partial_blocks_round_up() {
        let base = Extents3D {
            width: 10,
            height: 6,
            depth: 1,
        };
        // 10x6 texels is 3x2 blocks of 4x4.
        assert_eq!(Format::BC1_RGBA_UNORM_BLOCK.level_size_in_bytes(base, 0), 3 * 2 * 8);
        // Every level at or below the block size still costs one block.
        assert_eq!(Format::BC1_RGBA_UNORM_BLOCK.level_size_in_bytes(base, 3), 8);
    }
}
