use tiny_skia::Pixmap;

use super::{new_pixmap, RasterError};

/// Resolution multiplier used by surfaces that anti-alias by supersampling.
pub const SUPERSAMPLE: u32 = 2;

/// Box-filters `src` down by `factor` in each dimension.
///
/// Each output pixel is the rounded mean of a `factor × factor` block. Averaging
/// premultiplied channels keeps the output premultiplied.
pub fn downsample(src: &Pixmap, factor: u32) -> Result<Pixmap, RasterError> {
    let (sw, sh) = (src.width(), src.height());
    if factor == 0 || sw % factor != 0 || sh % factor != 0 {
        return Err(RasterError::NotDivisible { width: sw, height: sh, factor });
    }
    let (dw, dh) = (sw / factor, sh / factor);
    let mut dst = new_pixmap(dw, dh)?;
    if factor == 1 {
        dst.data_mut().copy_from_slice(src.data());
        return Ok(dst);
    }

    let n = factor * factor;
    let data = src.data();
    let row = sw as usize * 4;
    let out = dst.data_mut();

    for dy in 0..dh {
        for dx in 0..dw {
            let mut acc = [0u32; 4];
            for sy in dy * factor..(dy + 1) * factor {
                let base = sy as usize * row;
                for sx in dx * factor..(dx + 1) * factor {
                    let i = base + sx as usize * 4;
                    for (c, a) in acc.iter_mut().enumerate() {
                        *a += data[i + c] as u32;
                    }
                }
            }
            let o = (dy as usize * dw as usize + dx as usize) * 4;
            for (c, a) in acc.iter().enumerate() {
                out[o + c] = ((a + n / 2) / n) as u8;
            }
        }
    }
    Ok(dst)
}
