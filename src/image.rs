//! The decoded/encodable data model: pixel storage, metadata, and the
//! per-image info that travels alongside the pixels (version, flags,
//! metadata).
//!
//! Grounded on `cifex_image_t`, `cifex_channels_t` and the metadata linked
//! list in `libcifex.h`, reshaped into owned Rust collections: the
//! original's intrusive singly-linked list with a cached tail pointer
//! becomes a plain `Vec`, which already supports O(1) amortized push and
//! preserves insertion order and duplicate keys without extra bookkeeping.

use crate::alloc::Allocator;

/// Channel layout of a pixel, derived from `bitów_na_piksel / 8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channels {
    /// 24 bits per pixel: red, green, blue.
    Rgb,
    /// 32 bits per pixel: red, green, blue, alpha.
    Rgba,
}

impl Channels {
    /// Number of bytes per pixel this layout occupies.
    pub fn count(self) -> u32 {
        match self {
            Channels::Rgb => 3,
            Channels::Rgba => 4,
        }
    }
}

impl TryFrom<u32> for Channels {
    type Error = ();

    fn try_from(bytes_per_pixel: u32) -> Result<Self, Self::Error> {
        match bytes_per_pixel {
            3 => Ok(Channels::Rgb),
            4 => Ok(Channels::Rgba),
            _ => Err(()),
        }
    }
}

/// Format flags carried on the `CIF:` line. CIF (polish) only ever sets
/// `polish`; the line format reserves room for other languages the spec
/// explicitly places out of scope.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Flags {
    pub polish: bool,
}

/// A single `METADANE <key> <value>` entry.
///
/// Keys are not required to be unique; a decoded image preserves every
/// entry in file order, duplicates included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataEntry {
    pub key: Vec<u8>,
    pub value: Vec<u8>,
}

/// The ordered sequence of metadata entries attached to an image.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Metadata(Vec<MetadataEntry>);

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.0.push(MetadataEntry { key, value });
    }

    pub fn iter(&self) -> impl Iterator<Item = &MetadataEntry> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Everything about an image other than its pixels: the declared format
/// version, flags, and metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInfo {
    pub version: u32,
    pub flags: Flags,
    pub metadata: Metadata,
}

impl Default for ImageInfo {
    fn default() -> Self {
        Self {
            version: 1,
            flags: Flags { polish: true },
            metadata: Metadata::new(),
        }
    }
}

/// A decoded or about-to-be-encoded image: dimensions, channel layout, and
/// row-major, interleaved pixel data (`width * height * channels.count()`
/// bytes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub width: u32,
    pub height: u32,
    pub channels: Channels,
    pub data: Vec<u8>,
}

impl Image {
    /// An image with no pixels at all.
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            channels: Channels::Rgb,
            data: Vec::new(),
        }
    }

    /// Allocates a fresh image of the given dimensions and channel layout.
    ///
    /// Mirrors `cifex_alloc_image`: a width or height of zero is legal and
    /// yields an empty pixel buffer.
    pub fn alloc<A: Allocator>(allocator: &A, width: u32, height: u32, channels: Channels) -> Self {
        let mut image = Self::empty();
        image.realloc(allocator, width, height, channels);
        image
    }

    /// Resizes this image in place, reusing the existing buffer when it is
    /// already large enough (matching `cifex_alloc_image`'s reuse-if-large-
    /// enough behavior) instead of always allocating anew.
    pub fn realloc<A: Allocator>(&mut self, allocator: &A, width: u32, height: u32, channels: Channels) {
        let needed = width as usize * height as usize * channels.count() as usize;
        if needed == 0 {
            self.data.clear();
        } else if self.data.len() < needed {
            self.data = allocator.allocate(needed);
        } else {
            self.data.truncate(needed);
            self.data.iter_mut().for_each(|b| *b = 0);
        }
        self.width = width;
        self.height = height;
        self.channels = channels;
    }
}
