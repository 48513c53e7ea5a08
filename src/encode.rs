//! Top-level encode driver and the buffered writer CIF output is assembled
//! through.
//!
//! Grounded on `cx_encoder_t` / `cx_enc_flush` / `cx_enc_write` in
//! `encode.c`: the original keeps a fixed 256-byte stack buffer and flushes
//! it to the underlying writer whenever the next write would overflow it,
//! rather than performing a syscall (or, here, a `Write::write_all` call)
//! per token. `Encoder` reproduces that buffering as a small `std::io::Write`
//! adapter, so every other encode-side function can just write through it
//! with the ordinary `Write` API.

use std::io::{self, Write};

use crate::error::CifexError;
use crate::header;
use crate::image::{Image, ImageInfo};
use crate::pixels;

const BUFFER_SIZE: usize = 256;

/// Canonical default metadata this library stamps onto images it produces
/// when the caller hasn't supplied their own [`ImageInfo`].
///
/// Mirrors `cx_default_image_info` in `encode.c`.
pub fn default_image_info() -> ImageInfo {
    let mut info = ImageInfo::default();
    info.metadata.push(b"encoder".to_vec(), b"DJ Cifex".to_vec());
    info
}

/// A buffered `Write` adapter matching `cx_encoder_t`'s fixed-size flush
/// discipline.
struct Encoder<W: Write> {
    inner: W,
    buf: [u8; BUFFER_SIZE],
    len: usize,
}

impl<W: Write> Encoder<W> {
    fn new(inner: W) -> Self {
        Self {
            inner,
            buf: [0; BUFFER_SIZE],
            len: 0,
        }
    }

    fn flush_buffer(&mut self) -> io::Result<()> {
        if self.len > 0 {
            self.inner.write_all(&self.buf[..self.len])?;
            self.len = 0;
        }
        Ok(())
    }
}

impl<W: Write> Write for Encoder<W> {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        if data.is_empty() {
            return Ok(0);
        }
        if self.len + data.len() > BUFFER_SIZE {
            self.flush_buffer()?;
        }
        if data.len() >= BUFFER_SIZE {
            // Larger than the whole buffer (e.g. a long metadata value):
            // write what fits directly and let the caller's write_all loop
            // come back for the rest.
            let chunk_len = BUFFER_SIZE;
            self.inner.write_all(&data[..chunk_len])?;
            return Ok(chunk_len);
        }
        self.buf[self.len..self.len + data.len()].copy_from_slice(data);
        self.len += data.len();
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flush_buffer()?;
        self.inner.flush()
    }
}

/// Encodes `image`/`info` as a complete CIF stream.
///
/// Flushes the staging buffer unconditionally before returning, even on
/// failure -- a caller inspecting `writer` after an `Err` sees exactly
/// whatever had already been buffered up to the point of failure, matching
/// spec.md §7's "Partial output" clause rather than silently swallowing it.
pub fn encode<W: Write>(writer: W, image: &Image, info: &ImageInfo) -> Result<(), CifexError> {
    let mut encoder = Encoder::new(writer);
    let result = header::emit_info(&mut encoder, info, image)
        .and_then(|()| pixels::emit_pixels(&mut encoder, image));
    let flush_result = encoder.flush_buffer();
    result?;
    flush_result.map_err(CifexError::Io)
}

/// Encodes `image` with the canonical default [`ImageInfo`] (see
/// [`default_image_info`]).
pub fn encode_default<W: Write>(writer: W, image: &Image) -> Result<(), CifexError> {
    encode(writer, image, &default_image_info())
}
