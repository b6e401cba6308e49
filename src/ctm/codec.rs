// In: src/ctm/codec.rs

//! The authoritative reader and writer for CTM5.
//!
//! Decoding is all-or-nothing: a buffer is either parsed in full into a
//! `CtmFile` or rejected. The decoder must consume the buffer exactly, which is
//! what makes `encode(decode(bytes)) == bytes` hold for every accepted buffer.

use crate::ctm::format::*;
use crate::error::PipelineError;
use crate::output::Output;

//==================================================================================
// 1. Decoding
//==================================================================================

/// Parses a complete CTM5 file.
pub fn decode(bytes: &[u8]) -> Result<CtmFile, PipelineError> {
    if bytes.get(..CTM_SIGNATURE.len()) != Some(CTM_SIGNATURE.as_slice()) {
        return Err(PipelineError::InvalidFormat(
            "Missing CTM signature".to_string(),
        ));
    }
    match bytes.get(CTM_SIGNATURE.len()) {
        Some(&CTM_VERSION) => {}
        Some(other) => {
            return Err(PipelineError::InvalidFormat(format!(
                "Unsupported CTM version {}, expected {}",
                other, CTM_VERSION
            )))
        }
        None => {
            return Err(PipelineError::InvalidFormat(
                "Missing CTM version byte".to_string(),
            ))
        }
    }

    let header_bytes = bytes.get(..HEADER_SIZE).ok_or_else(|| {
        PipelineError::InvalidFormat(format!(
            "Truncated CTM header: need {} bytes, got {}",
            HEADER_SIZE,
            bytes.len()
        ))
    })?;
    let raw: &RawHeader = bytemuck::try_from_bytes(header_bytes)
        .map_err(|e| PipelineError::InvalidFormat(format!("Unreadable CTM header: {}", e)))?;

    let header = CtmHeader {
        screen_colour: raw.screen_colour,
        multicolor_1: raw.multicolor_1,
        multicolor_2: raw.multicolor_2,
        char_colour: raw.char_colour,
        colouring_method: ColouringMethod::try_from(raw.colouring_method)?,
        flags: CtmFlags::from_bits_retain(raw.flags),
        tile_width: raw.tile_width,
        tile_height: raw.tile_height,
        map_width: u16::from_le_bytes(raw.map_width),
        map_height: u16::from_le_bytes(raw.map_height),
    };
    if header.tile_width == 0 || header.tile_height == 0 {
        return Err(PipelineError::InvalidFormat(format!(
            "Tile dimensions must be non-zero, got {}x{}",
            header.tile_width, header.tile_height
        )));
    }

    let char_count = usize::from(u16::from_le_bytes(raw.char_count_minus_one)) + 1;
    let tile_count = usize::from(u16::from_le_bytes(raw.tile_count_minus_one)) + 1;

    let mut reader = SectionReader {
        bytes,
        pos: HEADER_SIZE,
    };
    let charset = reader.take(CtmSection::Charset, char_count, CHAR_SIZE)?;
    let char_attributes =
        reader.take(CtmSection::CharAttributes, char_count, CHAR_ATTRIBUTE_SIZE)?;
    let tiles = reader.take(CtmSection::Tiles, tile_count, header.tile_size())?;
    let tile_colours =
        reader.take(CtmSection::TileColours, tile_count, header.tile_colour_size())?;
    let map = reader.take(
        CtmSection::Map,
        usize::from(header.map_height),
        header.map_row_size(),
    )?;

    if reader.remaining() != 0 {
        return Err(PipelineError::InvalidFormat(format!(
            "{} trailing bytes after the map section",
            reader.remaining()
        )));
    }

    log::debug!(
        "decoded CTM{}: {} chars, {} tiles of {}x{}, map {}x{}, {} colouring",
        CTM_VERSION,
        char_count,
        tile_count,
        header.tile_width,
        header.tile_height,
        header.map_width,
        header.map_height,
        header.colouring_method
    );

    Ok(CtmFile {
        header,
        charset,
        char_attributes,
        tiles,
        tile_colours,
        map,
    })
}

/// Consumes consecutive sections with no gaps.
struct SectionReader<'b> {
    bytes: &'b [u8],
    pos: usize,
}

impl SectionReader<'_> {
    fn take(
        &mut self,
        section: CtmSection,
        units: usize,
        unit_size: usize,
    ) -> Result<Vec<u8>, PipelineError> {
        let len = units.checked_mul(unit_size).ok_or_else(|| {
            PipelineError::InvalidFormat(format!("The {} section length overflows", section))
        })?;
        let end = self.pos.checked_add(len).filter(|&end| end <= self.bytes.len());
        let Some(end) = end else {
            return Err(PipelineError::InvalidFormat(format!(
                "Truncated {} section: need {} bytes at offset {}, only {} remain",
                section,
                len,
                self.pos,
                self.remaining()
            )));
        };
        let data = self.bytes[self.pos..end].to_vec();
        self.pos = end;
        Ok(data)
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }
}

//==================================================================================
// 2. Encoding
//==================================================================================

/// Serializes a `CtmFile`. The section lengths must be consistent with each
/// other and with the header, since the decoder derives them from it.
pub fn encode(file: &CtmFile) -> Result<Vec<u8>, PipelineError> {
    let header = &file.header;

    let char_count = unit_count(CtmSection::Charset, file.charset.len(), CHAR_SIZE)?;
    expect_len(
        CtmSection::CharAttributes,
        file.char_attributes.len(),
        char_count * CHAR_ATTRIBUTE_SIZE,
    )?;

    if header.tile_size() == 0 {
        return Err(PipelineError::IllegalInput(format!(
            "Tile dimensions must be non-zero, got {}x{}",
            header.tile_width, header.tile_height
        )));
    }
    let tile_count = unit_count(CtmSection::Tiles, file.tiles.len(), header.tile_size())?;
    expect_len(
        CtmSection::TileColours,
        file.tile_colours.len(),
        tile_count * header.tile_colour_size(),
    )?;
    expect_len(CtmSection::Map, file.map.len(), header.map_size())?;

    let raw = RawHeader {
        signature: *CTM_SIGNATURE,
        version: CTM_VERSION,
        screen_colour: header.screen_colour,
        multicolor_1: header.multicolor_1,
        multicolor_2: header.multicolor_2,
        char_colour: header.char_colour,
        colouring_method: header.colouring_method.as_byte(),
        flags: header.flags.bits(),
        char_count_minus_one: count_word(CtmSection::Charset, char_count)?,
        tile_count_minus_one: count_word(CtmSection::Tiles, tile_count)?,
        tile_width: header.tile_width,
        tile_height: header.tile_height,
        map_width: header.map_width.to_le_bytes(),
        map_height: header.map_height.to_le_bytes(),
    };

    let total = HEADER_SIZE
        + CtmSection::ALL
            .iter()
            .map(|&s| file.section(s).len())
            .sum::<usize>();
    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(bytemuck::bytes_of(&raw));
    for section in CtmSection::ALL {
        out.extend_from_slice(file.section(section));
    }
    Ok(out)
}

impl CtmFile {
    /// Encodes this file and writes it to `output` in a single call, placing the
    /// codec at the tail of a pipeline.
    pub fn write_to(&self, output: &mut dyn Output) -> Result<(), PipelineError> {
        let bytes = encode(self)?;
        output.write(&bytes)
    }
}

/// Number of `unit_size` units in a non-empty section, bounded by what a
/// 16-bit `count - 1` word can express.
fn unit_count(section: CtmSection, len: usize, unit_size: usize) -> Result<usize, PipelineError> {
    if len == 0 || len % unit_size != 0 {
        return Err(PipelineError::IllegalInput(format!(
            "The {} section must be a non-empty multiple of {} bytes, got {}",
            section, unit_size, len
        )));
    }
    let count = len / unit_size;
    if count > MAX_COUNT {
        return Err(PipelineError::IllegalInput(format!(
            "The {} section holds {} entries, at most {} fit in a CTM file",
            section, count, MAX_COUNT
        )));
    }
    Ok(count)
}

fn expect_len(section: CtmSection, actual: usize, expected: usize) -> Result<(), PipelineError> {
    if actual != expected {
        return Err(PipelineError::IllegalInput(format!(
            "The {} section must be {} bytes, got {}",
            section, expected, actual
        )));
    }
    Ok(())
}

/// `count - 1` as a little-endian word.
fn count_word(section: CtmSection, count: usize) -> Result<[u8; 2], PipelineError> {
    count
        .checked_sub(1)
        .and_then(|stored| u16::try_from(stored).ok())
        .map(u16::to_le_bytes)
        .ok_or_else(|| {
            PipelineError::IllegalInput(format!(
                "The {} section holds {} entries, which a CTM count word cannot store",
                section, count
            ))
        })
}
