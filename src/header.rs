//! Header and metadata: the `CIF:`, `WERSJA`, `ROZMIAR` and `METADANE`
//! lines.
//!
//! Grounded on `cx_dec_parse_flags`, `cx_dec_parse_version`,
//! `cx_dec_parse_dimensions`, `cx_dec_parse_metadata_field` and
//! `cx_dec_parse_metadata` in `decode.c`, and their encode-side
//! counterparts sketched in `encode.c`'s `cx_enc_dump_flags`.

use crate::alloc::Allocator;
use crate::cursor::Cursor;
use crate::error::{CifexError, DomainError};
use crate::image::{Channels, Flags, Image, ImageInfo, Metadata};
use crate::numeral;

/// The only format version this library knows how to decode or produce.
pub const FORMAT_VERSION: u32 = 1;

pub(crate) fn parse_flags(cursor: &mut Cursor) -> Result<Flags, DomainError> {
    if !cursor.match_literal("CIF:") || !cursor.match_ws() {
        return Err(DomainError::SyntaxError);
    }
    // `polish` is the only language this library understands; any other
    // word here is a syntax error rather than an "unsupported language"
    // domain error, since the spec places other languages out of scope
    // entirely rather than modeling them as a recognized-but-rejected case.
    if !cursor.match_literal("polish") || !cursor.match_lf() {
        return Err(DomainError::SyntaxError);
    }
    Ok(Flags { polish: true })
}

pub(crate) fn parse_version(cursor: &mut Cursor) -> Result<u32, DomainError> {
    if !cursor.match_literal("WERSJA") || !cursor.match_ws() {
        return Err(DomainError::SyntaxError);
    }
    let version = numeral::parse_number(cursor).ok_or(DomainError::SyntaxError)?;
    if !cursor.match_lf() {
        return Err(DomainError::SyntaxError);
    }
    if version == 0 {
        return Err(DomainError::InvalidVersion);
    }
    if version > FORMAT_VERSION {
        return Err(DomainError::UnsupportedVersion);
    }
    Ok(version)
}

pub(crate) fn parse_dimensions<A: Allocator>(
    cursor: &mut Cursor,
    allocator: &A,
) -> Result<Image, DomainError> {
    if !cursor.match_literal("ROZMIAR") || !cursor.match_ws() {
        return Err(DomainError::SyntaxError);
    }

    if !cursor.match_literal("szerokość:") || !cursor.match_ws() {
        return Err(DomainError::SyntaxError);
    }
    let width = numeral::parse_number(cursor).ok_or(DomainError::SyntaxError)?;
    if !cursor.match_byte(b',') || !cursor.match_ws() {
        return Err(DomainError::SyntaxError);
    }

    if !cursor.match_literal("wysokość:") || !cursor.match_ws() {
        return Err(DomainError::SyntaxError);
    }
    let height = numeral::parse_number(cursor).ok_or(DomainError::SyntaxError)?;
    if !cursor.match_byte(b',') || !cursor.match_ws() {
        return Err(DomainError::SyntaxError);
    }

    if !cursor.match_literal("bitów_na_piksel:") || !cursor.match_ws() {
        return Err(DomainError::SyntaxError);
    }
    let bpp = numeral::parse_number(cursor).ok_or(DomainError::SyntaxError)?;
    if !cursor.match_lf() {
        return Err(DomainError::SyntaxError);
    }

    if bpp == 0 || bpp % 8 != 0 {
        return Err(DomainError::InvalidBpp);
    }
    let channels = Channels::try_from(bpp / 8).map_err(|_| DomainError::InvalidBpp)?;

    Ok(Image::alloc(allocator, width, height, channels))
}

/// Parses one `METADANE <key> <value>\n` line, if present.
///
/// Returns `Ok(None)` without consuming anything when the input does not
/// begin with the literal `METADANE` followed by whitespace -- this is how
/// the metadata section knows it has ended and pixel data begins.
///
/// An empty key (the mandatory separator run of spaces runs straight into
/// the line feed, leaving nothing to scan as a key) is rejected with
/// [`DomainError::EmptyMetadataKey`] rather than silently accepted, so the
/// decoder rejects exactly what [`crate::encode`] refuses to produce.
fn parse_metadata_field(cursor: &mut Cursor) -> Result<Option<(Vec<u8>, Vec<u8>)>, DomainError> {
    let checkpoint = *cursor;
    if !cursor.match_literal("METADANE") || !cursor.match_ws() {
        *cursor = checkpoint;
        return Ok(None);
    }

    let key = cursor.scan_until_either(b' ', b'\n').to_vec();
    if key.is_empty() {
        return Err(DomainError::EmptyMetadataKey);
    }
    if !cursor.match_ws() {
        return Err(DomainError::SyntaxError);
    }

    let value = cursor.scan_until(b'\n').to_vec();
    if !cursor.match_lf() {
        return Err(DomainError::SyntaxError);
    }

    Ok(Some((key, value)))
}

pub(crate) fn parse_metadata(cursor: &mut Cursor, metadata: &mut Metadata) -> Result<(), DomainError> {
    while let Some((key, value)) = parse_metadata_field(cursor)? {
        metadata.push(key, value);
    }
    Ok(())
}

pub(crate) fn emit_flags(writer: &mut impl std::io::Write, flags: Flags) -> Result<(), CifexError> {
    if !flags.polish {
        return Err(CifexError::Domain(DomainError::MissingLanguage));
    }
    writer.write_all(b"CIF: polish\n").map_err(CifexError::Io)
}

pub(crate) fn emit_version(writer: &mut impl std::io::Write, version: u32) -> Result<(), CifexError> {
    writer.write_all(b"WERSJA ").map_err(CifexError::Io)?;
    numeral::emit_number(writer, version)?;
    writer.write_all(b"\n").map_err(CifexError::Io)
}

pub(crate) fn emit_dimensions(
    writer: &mut impl std::io::Write,
    width: u32,
    height: u32,
    channels: Channels,
) -> Result<(), CifexError> {
    writer
        .write_all(b"ROZMIAR szerokość: ")
        .map_err(CifexError::Io)?;
    numeral::emit_number(writer, width)?;
    writer.write_all(b", wysokość: ").map_err(CifexError::Io)?;
    numeral::emit_number(writer, height)?;
    writer
        .write_all(", bitów_na_piksel: ".as_bytes())
        .map_err(CifexError::Io)?;
    numeral::emit_number(writer, channels.count() * 8)?;
    writer.write_all(b"\n").map_err(CifexError::Io)
}

pub(crate) fn emit_metadata(
    writer: &mut impl std::io::Write,
    metadata: &Metadata,
) -> Result<(), CifexError> {
    for entry in metadata.iter() {
        if entry.key.is_empty() {
            return Err(CifexError::Domain(DomainError::EmptyMetadataKey));
        }
        if entry.key.contains(&b' ') {
            return Err(CifexError::Domain(DomainError::InvalidMetadataKey));
        }
        if entry.value.contains(&b'\n') {
            return Err(CifexError::Domain(DomainError::InvalidMetadataValue));
        }
        writer.write_all(b"METADANE ").map_err(CifexError::Io)?;
        writer.write_all(&entry.key).map_err(CifexError::Io)?;
        writer.write_all(b" ").map_err(CifexError::Io)?;
        writer.write_all(&entry.value).map_err(CifexError::Io)?;
        writer.write_all(b"\n").map_err(CifexError::Io)?;
    }
    Ok(())
}

pub(crate) fn emit_info(writer: &mut impl std::io::Write, info: &ImageInfo, image: &Image) -> Result<(), CifexError> {
    emit_flags(writer, info.flags)?;
    emit_version(writer, info.version)?;
    emit_dimensions(writer, image.width, image.height, image.channels)?;
    emit_metadata(writer, &info.metadata)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alloc::SystemAllocator;

    #[test]
    fn parse_flags_accepts_canonical_line() {
        let mut c = Cursor::new(b"CIF: polish\nrest");
        assert_eq!(parse_flags(&mut c), Ok(Flags { polish: true }));
        assert_eq!(c.remaining(), b"rest");
    }

    #[test]
    fn parse_flags_rejects_unknown_language() {
        let mut c = Cursor::new(b"CIF: klingon\n");
        assert_eq!(parse_flags(&mut c), Err(DomainError::SyntaxError));
    }

    #[test]
    fn parse_version_rejects_zero() {
        let mut c = Cursor::new(b"WERSJA zero\n");
        assert_eq!(parse_version(&mut c), Err(DomainError::InvalidVersion));
    }

    #[test]
    fn parse_version_rejects_future_version() {
        let mut c = Cursor::new(b"WERSJA dwa\n");
        assert_eq!(parse_version(&mut c), Err(DomainError::UnsupportedVersion));
    }

    #[test]
    fn parse_dimensions_builds_image() {
        let mut c = Cursor::new(
            "ROZMIAR szerokość: dwa, wysokość: trzy, bitów_na_piksel: dwadzieścia cztery\n"
                .as_bytes(),
        );
        let image = parse_dimensions(&mut c, &SystemAllocator).unwrap();
        assert_eq!(image.width, 2);
        assert_eq!(image.height, 3);
        assert_eq!(image.channels, Channels::Rgb);
        assert_eq!(image.data.len(), 2 * 3 * 3);
    }

    #[test]
    fn parse_dimensions_rejects_non_byte_aligned_bpp() {
        let mut c = Cursor::new(
            "ROZMIAR szerokość: jeden, wysokość: jeden, bitów_na_piksel: dziesięć\n".as_bytes(),
        );
        assert_eq!(
            parse_dimensions(&mut c, &SystemAllocator),
            Err(DomainError::InvalidBpp)
        );
    }

    #[test]
    fn metadata_terminates_on_non_metadane_line() {
        let mut c = Cursor::new(b"METADANE author Ada\nrest");
        let mut metadata = Metadata::new();
        parse_metadata(&mut c, &mut metadata).unwrap();
        assert_eq!(metadata.len(), 1);
        assert_eq!(c.remaining(), b"rest");
    }

    #[test]
    fn metadata_rejects_empty_key() {
        let mut c = Cursor::new(b"METADANE \n");
        assert_eq!(parse_metadata_field(&mut c), Err(DomainError::EmptyMetadataKey));
    }

    #[test]
    fn metadata_preserves_duplicate_keys_in_order() {
        let mut c = Cursor::new(b"METADANE a 1\nMETADANE a 2\n");
        let mut metadata = Metadata::new();
        parse_metadata(&mut c, &mut metadata).unwrap();
        let entries: Vec<_> = metadata.iter().collect();
        assert_eq!(entries[0].value, b"1");
        assert_eq!(entries[1].value, b"2");
    }

    #[test]
    fn emit_dimensions_matches_canonical_spelling() {
        let mut buf = Vec::new();
        emit_dimensions(&mut buf, 2, 3, Channels::Rgb).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "ROZMIAR szerokość: dwa, wysokość: trzy, bitów_na_piksel: dwadzieścia cztery\n"
        );
    }

    #[test]
    fn emit_metadata_rejects_key_with_space() {
        let mut metadata = Metadata::new();
        metadata.push(b"a key".to_vec(), b"value".to_vec());
        let mut buf = Vec::new();
        assert!(matches!(
            emit_metadata(&mut buf, &metadata),
            Err(CifexError::Domain(DomainError::InvalidMetadataKey))
        ));
    }

    #[test]
    fn emit_metadata_rejects_value_with_line_feed() {
        let mut metadata = Metadata::new();
        metadata.push(b"key".to_vec(), b"line1\nline2".to_vec());
        let mut buf = Vec::new();
        assert!(matches!(
            emit_metadata(&mut buf, &metadata),
            Err(CifexError::Domain(DomainError::InvalidMetadataValue))
        ));
    }

    #[test]
    fn emit_flags_rejects_missing_polish() {
        let mut buf = Vec::new();
        assert!(matches!(
            emit_flags(&mut buf, Flags { polish: false }),
            Err(CifexError::Domain(DomainError::MissingLanguage))
        ));
    }
}
