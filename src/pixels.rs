//! The pixel body: one `R; G; B[; A]` line per pixel, row-major.
//!
//! Grounded on `cx_dec_parse_pixels` in `decode.c`, with one deliberate
//! behavior change from the original: where the C code scans every pixel
//! regardless of earlier failures and reports whichever of the last syntax
//! error or the last range error it saw (preferring syntax), this decoder
//! stops at the *first* offending pixel. The two are equivalent on a
//! well-formed prefix, and failing fast means a caller is told about the
//! one problem actually blocking decode instead of whichever happened to
//! be scanned last.

use crate::cursor::Cursor;
use crate::error::{CifexError, DomainError};
use crate::image::Image;
use crate::numeral;

pub(crate) fn parse_pixels(cursor: &mut Cursor, image: &mut Image) -> Result<(), DomainError> {
    let channels = image.channels.count() as usize;
    let width = image.width as usize;
    let height = image.height as usize;

    for y in 0..height {
        for x in 0..width {
            let offset = (y * width + x) * channels;
            let mut values = [0u32; 4];
            let mut syntax_ok = true;

            for (c, slot) in values.iter_mut().enumerate().take(channels) {
                if c > 0 {
                    syntax_ok = cursor.match_byte(b';') && cursor.match_ws();
                    if !syntax_ok {
                        break;
                    }
                }
                match numeral::parse_number(cursor) {
                    Some(v) => *slot = v,
                    None => {
                        syntax_ok = false;
                        break;
                    }
                }
            }
            if !syntax_ok {
                return Err(DomainError::SyntaxError);
            }

            // Checked before consuming the line feed, so a range error
            // reports the line the offending pixel is actually on.
            if values[..channels].iter().any(|&v| v > 255) {
                return Err(DomainError::ChannelOutOfRange);
            }

            if !cursor.match_lf() {
                return Err(DomainError::SyntaxError);
            }

            for (slot, &v) in image.data[offset..offset + channels].iter_mut().zip(&values) {
                *slot = v as u8;
            }
        }
    }
    Ok(())
}

pub(crate) fn emit_pixels(writer: &mut impl std::io::Write, image: &Image) -> Result<(), CifexError> {
    let channels = image.channels.count() as usize;
    let width = image.width as usize;
    let height = image.height as usize;

    for y in 0..height {
        for x in 0..width {
            let offset = (y * width + x) * channels;
            for c in 0..channels {
                if c > 0 {
                    writer.write_all(b"; ").map_err(CifexError::Io)?;
                }
                numeral::emit_number(writer, image.data[offset + c] as u32)?;
            }
            writer.write_all(b"\n").map_err(CifexError::Io)?;
        }
    }
    Ok(())
}
