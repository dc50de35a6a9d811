//! PNG encoding for rendered maps.
//!
//! Two layouts are written:
//! - **Indexed (color type 3)** when the image has at most 256 distinct
//!   colours. Classified maps without anti-aliasing always qualify.
//! - **RGBA (color type 6)** otherwise.
//!
//! [`encode_png`] picks between them.

use std::collections::HashMap;
use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use rayon::prelude::*;
use tracing::debug;

use crate::error::{RenderError, Result};

const SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Largest palette an indexed PNG can carry.
const MAX_PALETTE_SIZE: usize = 256;

/// Rows per parallel work unit when counting colours.
const ROWS_PER_CHUNK: usize = 64;

type Rgba = [u8; 4];

/// Encode RGBA pixels, choosing indexed output when the colours fit.
pub fn encode_png(pixels: &[u8], width: usize, height: usize) -> Result<Vec<u8>> {
    check_len(pixels, width, height, 4)?;

    match build_palette(pixels, width) {
        Some((palette, indices)) => {
            debug!(width, height, colors = palette.len(), "Encoding indexed PNG");
            encode_indexed(&palette, &indices, width, height)
        }
        None => {
            debug!(width, height, "Too many colours for a palette, encoding RGBA PNG");
            encode_rgba(pixels, width, height)
        }
    }
}

/// Encode an indexed PNG from a palette and one index byte per pixel.
pub fn encode_indexed(
    palette: &[Rgba],
    indices: &[u8],
    width: usize,
    height: usize,
) -> Result<Vec<u8>> {
    check_len(indices, width, height, 1)?;

    let mut png = SIGNATURE.to_vec();
    write_chunk(&mut png, b"IHDR", &header(width, height, 3));

    let plte: Vec<u8> = palette.iter().flat_map(|c| [c[0], c[1], c[2]]).collect();
    write_chunk(&mut png, b"PLTE", &plte);

    if palette.iter().any(|c| c[3] < 255) {
        let trns: Vec<u8> = palette.iter().map(|c| c[3]).collect();
        write_chunk(&mut png, b"tRNS", &trns);
    }

    write_chunk(&mut png, b"IDAT", &compress_scanlines(indices, width, height, 1)?);
    write_chunk(&mut png, b"IEND", &[]);
    Ok(png)
}

/// Encode a truecolour-with-alpha PNG.
pub fn encode_rgba(pixels: &[u8], width: usize, height: usize) -> Result<Vec<u8>> {
    check_len(pixels, width, height, 4)?;

    let mut png = SIGNATURE.to_vec();
    write_chunk(&mut png, b"IHDR", &header(width, height, 6));
    write_chunk(&mut png, b"IDAT", &compress_scanlines(pixels, width, height, 4)?);
    write_chunk(&mut png, b"IEND", &[]);
    Ok(png)
}

fn check_len(buf: &[u8], width: usize, height: usize, bpp: usize) -> Result<()> {
    let expected = width * height * bpp;
    if buf.len() != expected {
        return Err(RenderError::BufferSize {
            expected,
            actual: buf.len(),
        });
    }
    Ok(())
}

fn header(width: usize, height: usize, color_type: u8) -> [u8; 13] {
    let mut ihdr = [0u8; 13];
    ihdr[0..4].copy_from_slice(&(width as u32).to_be_bytes());
    ihdr[4..8].copy_from_slice(&(height as u32).to_be_bytes());
    ihdr[8] = 8; // bit depth
    ihdr[9] = color_type;
    // compression, filter and interlace methods stay 0
    ihdr
}

/// Prefix each scanline with filter type 0 and zlib-compress.
fn compress_scanlines(data: &[u8], width: usize, height: usize, bpp: usize) -> Result<Vec<u8>> {
    let stride = width * bpp;
    let mut encoder = ZlibEncoder::new(
        Vec::with_capacity(height * (stride + 1) / 2),
        Compression::default(),
    );
    for row in data.chunks_exact(stride.max(1)).take(height) {
        encoder.write_all(&[0])?;
        encoder.write_all(row)?;
    }
    Ok(encoder.finish()?)
}

fn write_chunk(png: &mut Vec<u8>, kind: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    let crc_start = png.len();
    png.extend_from_slice(kind);
    png.extend_from_slice(data);
    let crc = crc32fast::hash(&png[crc_start..]);
    png.extend_from_slice(&crc.to_be_bytes());
}

/// Collect a palette and per-pixel indices, or `None` past 256 colours.
///
/// Rows are scanned in parallel chunks for distinct colours first; the
/// index pass only runs once the palette is known to fit.
fn build_palette(pixels: &[u8], width: usize) -> Option<(Vec<Rgba>, Vec<u8>)> {
    let chunk_bytes = (width * 4 * ROWS_PER_CHUNK).max(4);

    let distinct: Vec<Vec<Rgba>> = pixels
        .par_chunks(chunk_bytes)
        .map(|chunk| {
            let mut seen: Vec<Rgba> = Vec::new();
            let mut lookup: HashMap<Rgba, ()> = HashMap::new();
            for px in chunk.chunks_exact(4) {
                let c = [px[0], px[1], px[2], px[3]];
                if lookup.insert(c, ()).is_none() {
                    seen.push(c);
                    if seen.len() > MAX_PALETTE_SIZE {
                        break;
                    }
                }
            }
            seen
        })
        .collect();

    let mut palette: Vec<Rgba> = Vec::new();
    let mut index_of: HashMap<Rgba, u8> = HashMap::new();
    for c in distinct.into_iter().flatten() {
        if !index_of.contains_key(&c) {
            if palette.len() == MAX_PALETTE_SIZE {
                return None;
            }
            index_of.insert(c, palette.len() as u8);
            palette.push(c);
        }
    }

    let indices: Vec<u8> = pixels
        .par_chunks_exact(4)
        .map(|px| index_of.get(&[px[0], px[1], px[2], px[3]]).copied().unwrap_or(0))
        .collect();

    Some((palette, indices))
}
