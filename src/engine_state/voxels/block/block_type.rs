//! # Block Type Module
//!
//! This module defines the sixteen block materials of the world together with their
//! names, transparency classes and per-face material substitutions.

use num_derive::FromPrimitive;
use phf::phf_map;

use super::BlockTypeSize;

/// Enumerates all possible block types in the voxel world.
///
/// The discriminant is the block id stored in chunks and packed into vertices, so the
/// order of the variants is part of the shader's wire format.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
#[repr(u8)]
pub enum BlockType {
    /// Empty space.
    AIR,
    DIRT,
    /// Grass-on-dirt side texture, only drawn on the sides of grass blocks.
    TOPSOIL,
    GRASS,
    LEAVES,
    WOOD,
    STONE,
    SAND,
    WATER,
    GLASS,
    BRICK,
    ORE,
    /// Ring pattern drawn on the caps of wood blocks.
    WOODRINGS,
    WHITE,
    BLACK,
    XY,
}

/// Transparency class for every block id.
///
/// `0` is opaque. Non-zero values group blocks that hide each other's faces; class `1`
/// (leaves) never hides anything.
pub static TRANSPARENCY: [u8; 16] = [2, 0, 0, 0, 1, 0, 0, 0, 3, 4, 0, 0, 0, 0, 0, 0];

/// Transparency class that never blocks line of sight.
pub const SEE_THROUGH_CLASS: u8 = 1;

static BLOCK_NAMES: [&str; 16] = [
    "air", "dirt", "topsoil", "grass", "leaves", "wood", "stone", "sand", "water", "glass",
    "brick", "ore", "woodrings", "white", "black", "x-y",
];

static BLOCK_TYPES_BY_NAME: phf::Map<&'static str, BlockType> = phf_map! {
    "air" => BlockType::AIR,
    "dirt" => BlockType::DIRT,
    "topsoil" => BlockType::TOPSOIL,
    "grass" => BlockType::GRASS,
    "leaves" => BlockType::LEAVES,
    "wood" => BlockType::WOOD,
    "stone" => BlockType::STONE,
    "sand" => BlockType::SAND,
    "water" => BlockType::WATER,
    "glass" => BlockType::GLASS,
    "brick" => BlockType::BRICK,
    "ore" => BlockType::ORE,
    "woodrings" => BlockType::WOODRINGS,
    "white" => BlockType::WHITE,
    "black" => BlockType::BLACK,
    "x-y" => BlockType::XY,
};

impl BlockType {
    /// Converts a raw block id to a `BlockType`.
    ///
    /// Only the low four bits are significant, so every id maps to a block.
    pub fn get_block_type_from_int(btype: BlockTypeSize) -> Self {
        num::FromPrimitive::from_u8(btype & 0xf).unwrap_or(BlockType::AIR)
    }

    /// Looks a block type up by its human readable name.
    pub fn from_name(name: &str) -> Option<Self> {
        BLOCK_TYPES_BY_NAME.get(name).copied()
    }

    /// The raw id stored in chunks.
    pub fn id(self) -> BlockTypeSize {
        self as BlockTypeSize
    }

    /// Human readable name.
    pub fn name(self) -> &'static str {
        BLOCK_NAMES[self as usize]
    }

    /// Transparency class, see [`TRANSPARENCY`].
    pub fn transparency(self) -> u8 {
        TRANSPARENCY[self as usize]
    }

    /// Materials drawn on the top, bottom and sides of this block.
    ///
    /// Grass shows dirt underneath and topsoil on its sides; wood shows rings on both
    /// caps. Everything else uses its own id on every face.
    pub fn face_materials(self) -> FaceMaterials {
        let id = self.id();
        match self {
            BlockType::GRASS => FaceMaterials {
                top: id,
                bottom: BlockType::DIRT.id(),
                side: BlockType::TOPSOIL.id(),
            },
            BlockType::WOOD => FaceMaterials {
                top: BlockType::WOODRINGS.id(),
                bottom: BlockType::WOODRINGS.id(),
                side: id,
            },
            _ => FaceMaterials {
                top: id,
                bottom: id,
                side: id,
            },
        }
    }
}

/// Material ids used for each face orientation of a block.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FaceMaterials {
    pub top: BlockTypeSize,
    pub bottom: BlockTypeSize,
    pub side: BlockTypeSize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_through_names() {
        for id in 0..16u8 {
            let block = BlockType::get_block_type_from_int(id);
            assert_eq!(block.id(), id);
            assert_eq!(BlockType::from_name(block.name()), Some(block));
        }
        assert_eq!(BlockType::from_name("bedrock"), None);
    }

    #[test]
    fn high_bits_are_ignored() {
        assert_eq!(BlockType::get_block_type_from_int(0x18), BlockType::WATER);
    }

    #[test]
    fn transparency_classes() {
        assert_eq!(BlockType::AIR.transparency(), 2);
        assert_eq!(BlockType::LEAVES.transparency(), SEE_THROUGH_CLASS);
        assert_eq!(BlockType::WATER.transparency(), 3);
        assert_eq!(BlockType::GLASS.transparency(), 4);
        assert_eq!(BlockType::STONE.transparency(), 0);
    }

    #[test]
    fn grass_and_wood_substitute_materials() {
        let grass = BlockType::GRASS.face_materials();
        assert_eq!((grass.top, grass.bottom, grass.side), (3, 1, 2));

        let wood = BlockType::WOOD.face_materials();
        assert_eq!((wood.top, wood.bottom, wood.side), (12, 12, 5));

        let brick = BlockType::BRICK.face_materials();
        assert_eq!((brick.top, brick.bottom, brick.side), (10, 10, 10));
    }
}
