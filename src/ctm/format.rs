// In: src/ctm/format.rs

//! Defines all on-disk structures and constants for the CTM (CharPad) tile-map
//! format, version 5. This is the single source of truth for the byte layout
//! shared by the decoder and the encoder.
//!
//! ```text
//! "CTM" | 0x05 | screenColour | multicolor1 | multicolor2 | charColour |
//! colouringMethod | flags | (charCount-1):u16le | (tileCount-1):u16le |
//! tileWidth | tileHeight | mapWidth:u16le | mapHeight:u16le |
//! charset[] | charAttributes[] | tiles[] | tileColours[] | map[]
//! ```
//!
//! Sections carry no length prefixes; every section length is derived from the
//! header.

use bitflags::bitflags;
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::PipelineError;

//==================================================================================
// I. Constants
//==================================================================================

/// The signature identifying a CTM file.
pub const CTM_SIGNATURE: &[u8; 3] = b"CTM";
/// The only CTM version this codec understands.
pub const CTM_VERSION: u8 = 5;
/// Signature + version + fixed header fields.
pub const HEADER_SIZE: usize = 20;

/// Bytes per character definition (8 rows of 8 pixels).
pub const CHAR_SIZE: usize = 8;
/// Bytes of attributes per character.
pub const CHAR_ATTRIBUTE_SIZE: usize = 1;
/// Bytes per tile cell (a little-endian character index).
pub const TILE_CELL_SIZE: usize = 2;
/// Bytes of colour per tile, present only for per-tile colouring.
pub const TILE_COLOUR_SIZE: usize = 1;
/// Bytes per map cell (a little-endian tile index).
pub const MAP_CELL_SIZE: usize = 2;
/// Both derived counts are stored as `count - 1` in a 16-bit word.
pub const MAX_COUNT: usize = u16::MAX as usize + 1;

//==================================================================================
// II. Enumerated Header Values
//==================================================================================

/// How colours are assigned to the map. Stored as one header byte.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ColouringMethod {
    /// One colour for the whole map.
    Global,
    /// One colour per tile (enables the tile colour section).
    PerTile,
    /// One colour per character, carried in the character attributes.
    PerChar,
}

impl ColouringMethod {
    pub fn as_byte(self) -> u8 {
        match self {
            ColouringMethod::Global => 0,
            ColouringMethod::PerTile => 1,
            ColouringMethod::PerChar => 2,
        }
    }
}

impl TryFrom<u8> for ColouringMethod {
    type Error = PipelineError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ColouringMethod::Global),
            1 => Ok(ColouringMethod::PerTile),
            2 => Ok(ColouringMethod::PerChar),
            unknown => Err(PipelineError::InvalidFormat(format!(
                "Unknown colouring method {}",
                unknown
            ))),
        }
    }
}

impl fmt::Display for ColouringMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

bitflags! {
    /// The header flags byte. The decoder uses `from_bits_retain`, so bits
    /// without a name survive a decode/encode round trip.
    #[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[serde(transparent)]
    pub struct CtmFlags: u8 {
        const TILE_SYSTEM = 0x01;
        const EXPANDED_DATA = 0x02;
        const MULTICOLOR = 0x04;
    }
}

//==================================================================================
// III. Header & File
//==================================================================================

/// The raw, byte-exact header as stored on disk, for zero-copy parsing.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub(crate) struct RawHeader {
    pub signature: [u8; 3],
    pub version: u8,
    pub screen_colour: u8,
    pub multicolor_1: u8,
    pub multicolor_2: u8,
    pub char_colour: u8,
    pub colouring_method: u8,
    pub flags: u8,
    pub char_count_minus_one: [u8; 2],
    pub tile_count_minus_one: [u8; 2],
    pub tile_width: u8,
    pub tile_height: u8,
    pub map_width: [u8; 2],
    pub map_height: [u8; 2],
}

const _: () = assert!(std::mem::size_of::<RawHeader>() == HEADER_SIZE);

/// The typed CTM5 header. The character and tile counts are not stored here:
/// they are derived from the section lengths of a `CtmFile`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CtmHeader {
    pub screen_colour: u8,
    pub multicolor_1: u8,
    pub multicolor_2: u8,
    pub char_colour: u8,
    pub colouring_method: ColouringMethod,
    pub flags: CtmFlags,
    pub tile_width: u8,
    pub tile_height: u8,
    pub map_width: u16,
    pub map_height: u16,
}

impl CtmHeader {
    /// Bytes occupied by one tile in the tile section.
    pub fn tile_size(&self) -> usize {
        usize::from(self.tile_width) * usize::from(self.tile_height) * TILE_CELL_SIZE
    }

    /// Bytes of tile colour per tile, which depends on the colouring method.
    pub fn tile_colour_size(&self) -> usize {
        match self.colouring_method {
            ColouringMethod::PerTile => TILE_COLOUR_SIZE,
            ColouringMethod::Global | ColouringMethod::PerChar => 0,
        }
    }

    /// Bytes occupied by one map row.
    pub fn map_row_size(&self) -> usize {
        usize::from(self.map_width) * MAP_CELL_SIZE
    }

    /// Bytes occupied by the whole map section.
    pub fn map_size(&self) -> usize {
        self.map_row_size() * usize::from(self.map_height)
    }
}

/// The five sections of a CTM file, in on-disk order.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum CtmSection {
    Charset,
    CharAttributes,
    Tiles,
    TileColours,
    Map,
}

impl CtmSection {
    /// All sections in on-disk order.
    pub const ALL: [CtmSection; 5] = [
        CtmSection::Charset,
        CtmSection::CharAttributes,
        CtmSection::Tiles,
        CtmSection::TileColours,
        CtmSection::Map,
    ];
}

impl fmt::Display for CtmSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CtmSection::Charset => "charset",
            CtmSection::CharAttributes => "char attributes",
            CtmSection::Tiles => "tiles",
            CtmSection::TileColours => "tile colours",
            CtmSection::Map => "map",
        };
        f.write_str(name)
    }
}

/// A complete CTM5 file in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CtmFile {
    pub header: CtmHeader,
    pub charset: Vec<u8>,
    pub char_attributes: Vec<u8>,
    pub tiles: Vec<u8>,
    pub tile_colours: Vec<u8>,
    pub map: Vec<u8>,
}

impl CtmFile {
    /// Number of character definitions, derived from the charset length.
    pub fn charset_char_count(&self) -> usize {
        self.charset.len() / CHAR_SIZE
    }

    /// Number of tiles, derived from the tile section length.
    pub fn tile_count(&self) -> usize {
        match self.header.tile_size() {
            0 => 0,
            size => self.tiles.len() / size,
        }
    }

    pub fn section(&self, section: CtmSection) -> &[u8] {
        match section {
            CtmSection::Charset => &self.charset,
            CtmSection::CharAttributes => &self.char_attributes,
            CtmSection::Tiles => &self.tiles,
            CtmSection::TileColours => &self.tile_colours,
            CtmSection::Map => &self.map,
        }
    }
}
