//! A thin command-line front end over the `cifex` library: `encode` turns a
//! raw RGB(A) byte dump into a CIF (polish) file, `decode` does the
//! reverse. This binary is a convenience collaborator, not part of the
//! library's public contract -- `cifex` the crate never depends on it.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use cifex::{decode, encode_default, Channels};

#[derive(Parser)]
#[command(name = "cifex", about = "Encode and decode CIF (polish) images")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode a CIF file and print its header and pixel count.
    Decode {
        /// Path to the CIF file to read.
        input: PathBuf,
    },
    /// Wrap a raw interleaved RGB or RGBA byte dump in a CIF header.
    Encode {
        /// Path to the raw pixel data.
        input: PathBuf,
        /// Path to write the CIF file to.
        output: PathBuf,
        /// Image width in pixels.
        #[arg(long)]
        width: u32,
        /// Image height in pixels.
        #[arg(long)]
        height: u32,
        /// Whether the raw data carries an alpha channel.
        #[arg(long)]
        rgba: bool,
    },
}

fn main() -> Result<()> {
    match Cli::parse().command {
        Command::Decode { input } => run_decode(input),
        Command::Encode {
            input,
            output,
            width,
            height,
            rgba,
        } => run_encode(input, output, width, height, rgba),
    }
}

fn run_decode(input: PathBuf) -> Result<()> {
    let mut file =
        File::open(&input).with_context(|| format!("opening {}", input.display()))?;
    let (image, info) = decode(&mut file)
        .map_err(|e| anyhow::anyhow!("{e}"))
        .with_context(|| format!("decoding {}", input.display()))?;

    println!("version: {}", info.version);
    println!("{}x{} {:?}", image.width, image.height, image.channels);
    for entry in info.metadata.iter() {
        println!(
            "metadata: {} = {}",
            String::from_utf8_lossy(&entry.key),
            String::from_utf8_lossy(&entry.value)
        );
    }
    println!("pixel bytes: {}", image.data.len());
    Ok(())
}

fn run_encode(input: PathBuf, output: PathBuf, width: u32, height: u32, rgba: bool) -> Result<()> {
    let channels = if rgba { Channels::Rgba } else { Channels::Rgb };
    let expected = width as usize * height as usize * channels.count() as usize;

    let mut data = Vec::with_capacity(expected);
    BufReader::new(File::open(&input).with_context(|| format!("opening {}", input.display()))?)
        .read_to_end(&mut data)
        .with_context(|| format!("reading {}", input.display()))?;
    anyhow::ensure!(
        data.len() == expected,
        "{} holds {} bytes, expected {width}x{height} at {} bytes/pixel ({expected} bytes)",
        input.display(),
        data.len(),
        channels.count(),
    );

    let image = cifex::Image {
        width,
        height,
        channels,
        data,
    };

    let writer = BufWriter::new(
        File::create(&output).with_context(|| format!("creating {}", output.display()))?,
    );
    encode_default(writer, &image)
        .map_err(|e| anyhow::anyhow!("{e}"))
        .with_context(|| format!("encoding {}", output.display()))
}
