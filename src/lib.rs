//! `cifex` reads and writes CIF (polish variant) image files: an ASCII
//! interchange format whose version, dimensions, bit depth and channel
//! values are all spelled out as Polish number words instead of digits.
//!
//! ```text
//! CIF: polish
//! WERSJA jeden
//! ROZMIAR szerokość: dwa, wysokość: jeden, bitów_na_piksel: dwadzieścia cztery
//! METADANE encoder DJ Cifex
//! zero; zero; zero
//! dwieście pięćdziesiąt pięć; zero; zero
//! ```
//!
//! The entry points are [`decode`] / [`decode_with_allocator`] and
//! [`encode`] / [`encode_default`]; everything else is the grammar and data
//! model they're built from.
//!
//! Out of scope: random-access decode, partial/streaming decode,
//! compression, languages other than Polish, and numbers of 1,000,000 or
//! more.

pub mod alloc;
pub mod cursor;
mod decode;
mod encode;
mod error;
mod header;
mod image;
pub mod numeral;
mod pixels;

pub use alloc::{Allocator, SystemAllocator};
pub use decode::{decode, decode_with_allocator};
pub use encode::{default_image_info, encode, encode_default};
pub use error::{CifexError, DecodeError, DomainError};
pub use image::{Channels, Flags, Image, ImageInfo, Metadata, MetadataEntry};
