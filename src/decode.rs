//! Top-level decode driver: reads a whole CIF stream and turns it into an
//! [`Image`] plus [`ImageInfo`].
//!
//! Grounded on `cifex_decode` in `decode.c`, which first slurps the entire
//! input via `cx_read_all` (seeking to the end to find its length, then
//! seeking back to the start) before running the grammar over the buffer
//! in memory -- CIF has no streaming or partial-decode mode, so there is no
//! reason to parse as bytes arrive.

use std::io::{Read, Seek, SeekFrom};

use crate::alloc::{Allocator, SystemAllocator};
use crate::cursor::Cursor;
use crate::error::{CifexError, DecodeError, DomainError};
use crate::header;
use crate::image::{Image, ImageInfo, Metadata};
use crate::pixels;

fn read_all<R: Read + Seek>(reader: &mut R) -> std::io::Result<Vec<u8>> {
    let len = reader.seek(SeekFrom::End(0))?;
    reader.seek(SeekFrom::Start(0))?;
    let mut buf = Vec::with_capacity(len as usize);
    reader.read_to_end(&mut buf)?;
    Ok(buf)
}

fn run<A: Allocator>(cursor: &mut Cursor, allocator: &A) -> Result<(Image, ImageInfo), DomainError> {
    if cursor.is_eof() {
        return Err(DomainError::EmptyImageFile);
    }
    let flags = header::parse_flags(cursor)?;
    let version = header::parse_version(cursor)?;
    let mut image = header::parse_dimensions(cursor, allocator)?;
    let mut metadata = Metadata::new();
    header::parse_metadata(cursor, &mut metadata)?;
    pixels::parse_pixels(cursor, &mut image)?;
    Ok((
        image,
        ImageInfo {
            version,
            flags,
            metadata,
        },
    ))
}

/// Decodes a complete CIF stream, allocating pixel storage through the
/// default [`SystemAllocator`].
pub fn decode<R: Read + Seek>(reader: &mut R) -> Result<(Image, ImageInfo), DecodeError> {
    decode_with_allocator(reader, &SystemAllocator)
}

/// Decodes a complete CIF stream, allocating pixel storage through the
/// given allocator.
///
/// On failure, the returned [`DecodeError`] is stamped with the line and
/// byte position the cursor had reached at the point of failure. For a
/// malformed pixel, that is the first offending pixel, not the last one
/// scanned (see [`crate::pixels`]).
pub fn decode_with_allocator<R: Read + Seek, A: Allocator>(
    reader: &mut R,
    allocator: &A,
) -> Result<(Image, ImageInfo), DecodeError> {
    let buffer = read_all(reader).map_err(|e| DecodeError {
        error: CifexError::Io(e),
        line: 0,
        byte: 0,
    })?;

    let mut cursor = Cursor::new(&buffer);
    run(&mut cursor, allocator).map_err(|error| DecodeError {
        error: CifexError::Domain(error),
        line: cursor.line(),
        byte: cursor.position(),
    })
}
