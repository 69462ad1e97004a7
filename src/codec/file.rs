use std::{
    fs::File,
    io::{BufReader, BufWriter, ErrorKind, Read, Write},
    path::Path,
};

use crate::codec::header::{HEADER_LEN, MAGIC, RawHeader};
use crate::foundation::error::{CsapError, CsapResult};
use crate::raster::buffer::{Image, try_alloc_zeroed};
use crate::raster::view::ImageView;

/// Read a CSAP RAW image from disk.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn read_raw_image(path: &Path) -> CsapResult<Image> {
    let f = File::open(path)?;
    let img = read_raw_from(BufReader::new(f))?;
    tracing::debug!(
        height = img.height(),
        width = img.width(),
        channels = img.channels(),
        "read raw image"
    );
    Ok(img)
}

/// Write `img` to disk in CSAP RAW format, replacing any existing file.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn write_raw_image(path: &Path, img: &Image) -> CsapResult<()> {
    // Validate before creating the file so a bad image leaves nothing behind.
    RawHeader::for_shape(img.height(), img.width(), img.channels())?;
    let f = File::create(path)?;
    let mut w = BufWriter::new(f);
    write_raw_to(&mut w, img.view())?;
    w.flush()?;
    tracing::debug!(bytes = HEADER_LEN + img.data().len(), "wrote raw image");
    Ok(())
}

/// Decode a CSAP RAW stream. Bytes after the declared payload are not consumed.
pub fn read_raw_from<R: Read>(mut r: R) -> CsapResult<Image> {
    let mut head = [0u8; HEADER_LEN];
    let got = read_full(&mut r, &mut head)?;
    if got < HEADER_LEN {
        if got >= MAGIC.len() && head[..MAGIC.len()] != MAGIC {
            return Err(CsapError::InvalidMagic {
                found: [head[0], head[1], head[2], head[3]],
            });
        }
        return Err(CsapError::truncated(HEADER_LEN, got));
    }
    let header = RawHeader::parse(&head)?;

    let len = header.payload_len()?;
    let mut data = try_alloc_zeroed(len)?;
    let got = read_full(&mut r, &mut data)?;
    if got < len {
        return Err(CsapError::truncated(len, got));
    }
    Image::new(header.height, header.width, header.channels(), data)
}

/// Encode header and samples to `w`. Channel counts other than 3 or 4 are rejected.
pub fn write_raw_to<W: Write>(mut w: W, img: ImageView<'_>) -> CsapResult<()> {
    let header = RawHeader::for_shape(img.height(), img.width(), img.channels())?;
    w.write_all(&header.to_bytes())?;
    w.write_all(img.data())?;
    Ok(())
}

/// Decode a complete in-memory CSAP RAW blob into an owned image.
pub fn decode_raw(bytes: &[u8]) -> CsapResult<Image> {
    read_raw_from(bytes)
}

/// Encode an image into a freshly allocated CSAP RAW blob.
pub fn encode_raw(img: &Image) -> CsapResult<Vec<u8>> {
    let mut out = Vec::with_capacity(HEADER_LEN + img.data().len());
    write_raw_to(&mut out, img.view())?;
    Ok(out)
}

fn read_full<R: Read>(r: &mut R, buf: &mut [u8]) -> CsapResult<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match r.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}

#[cfg(test)]
#[path = "../../tests/unit/codec/file.rs"]
mod tests;
