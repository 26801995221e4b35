//! Texture compilation: any format `image` decodes, written as RGBA8 DDS.

use ddsfile::{AlphaMode, D3D10ResourceDimension, Dds, DxgiFormat, NewDxgiParams};
use image::RgbaImage;

use crate::error::GraphicsError;

/// How texel values are interpreted by the sampler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorSpace {
    /// Color data, sampled with sRGB decoding.
    Srgb,
    /// Normals, masks and other non-color data.
    Linear,
}

impl ColorSpace {
    pub fn for_kind(kind: ember_core::material::MaterialTextureType) -> Self {
        if kind.is_color() {
            Self::Srgb
        } else {
            Self::Linear
        }
    }

    fn dxgi_format(self) -> DxgiFormat {
        match self {
            Self::Srgb => DxgiFormat::R8G8B8A8_UNorm_sRGB,
            Self::Linear => DxgiFormat::R8G8B8A8_UNorm,
        }
    }
}

/// Number of levels in a full chain down to 1x1.
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}

/// Halve an image with a 2x2 box filter. Odd edges reuse the last texel.
fn downsample(src: &RgbaImage) -> RgbaImage {
    let (w, h) = src.dimensions();
    let (nw, nh) = ((w / 2).max(1), (h / 2).max(1));
    RgbaImage::from_fn(nw, nh, |x, y| {
        let x0 = (x * 2).min(w - 1);
        let y0 = (y * 2).min(h - 1);
        let x1 = (x0 + 1).min(w - 1);
        let y1 = (y0 + 1).min(h - 1);
        let mut sum = [0u32; 4];
        for (sx, sy) in [(x0, y0), (x1, y0), (x0, y1), (x1, y1)] {
            for (acc, c) in sum.iter_mut().zip(src.get_pixel(sx, sy).0) {
                *acc += c as u32;
            }
        }
        image::Rgba(sum.map(|c| ((c + 2) / 4) as u8))
    })
}

/// Decode `source` and encode it as a DDS file.
pub fn compile_texture(
    source: &[u8],
    color_space: ColorSpace,
    mipmaps: bool,
) -> Result<Vec<u8>, GraphicsError> {
    let decoded = image::load_from_memory(source)
        .map_err(|e| GraphicsError::TextureCompilationFailed(format!("decode: {e}")))?
        .to_rgba8();
    let (width, height) = decoded.dimensions();
    let levels = if mipmaps {
        mip_level_count(width, height)
    } else {
        1
    };

    let mut data = decoded.as_raw().clone();
    let mut level = decoded;
    for _ in 1..levels {
        level = downsample(&level);
        data.extend_from_slice(level.as_raw());
    }

    let params = NewDxgiParams {
        height,
        width,
        depth: None,
        format: color_space.dxgi_format(),
        mipmap_levels: Some(levels),
        array_layers: Some(1),
        caps2: None,
        is_cubemap: false,
        resource_dimension: D3D10ResourceDimension::Texture2D,
        alpha_mode: AlphaMode::Unknown,
    };

    let mut dds = Dds::new_dxgi(params)
        .map_err(|e| GraphicsError::TextureCompilationFailed(format!("dds header: {e}")))?;
    dds.data = data;

    let mut out = Vec::new();
    dds.write(&mut out)
        .map_err(|e| GraphicsError::TextureCompilationFailed(format!("dds write: {e}")))?;
    Ok(out)
}

#[cfg(test)]
pub(crate) fn png_bytes(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    let image = image::DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, image::Rgba(rgba)));
    let mut bytes = std::io::Cursor::new(Vec::new());
    image
        .write_to(&mut bytes, image::ImageOutputFormat::Png)
        .unwrap();
    bytes.into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::square(256, 256, 9)]
    #[case::wide(512, 64, 10)]
    #[case::odd(5, 3, 3)]
    #[case::single(1, 1, 1)]
    fn test_mip_level_count(#[case] width: u32, #[case] height: u32, #[case] expected: u32) {
        assert_eq!(mip_level_count(width, height), expected);
    }

    #[test]
    fn test_downsample_averages() {
        let mut src = RgbaImage::new(2, 2);
        src.put_pixel(0, 0, image::Rgba([0, 0, 0, 255]));
        src.put_pixel(1, 0, image::Rgba([255, 0, 0, 255]));
        src.put_pixel(0, 1, image::Rgba([0, 255, 0, 255]));
        src.put_pixel(1, 1, image::Rgba([255, 255, 0, 255]));
        let dst = downsample(&src);
        assert_eq!(dst.dimensions(), (1, 1));
        assert_eq!(dst.get_pixel(0, 0).0, [128, 128, 0, 255]);
    }

    #[rstest]
    #[case::color(ColorSpace::Srgb, DxgiFormat::R8G8B8A8_UNorm_sRGB)]
    #[case::data(ColorSpace::Linear, DxgiFormat::R8G8B8A8_UNorm)]
    fn test_compile_writes_dds(#[case] space: ColorSpace, #[case] format: DxgiFormat) {
        let blob = compile_texture(&png_bytes(4, 4, [10, 20, 30, 255]), space, true).unwrap();
        let dds = Dds::read(&mut std::io::Cursor::new(blob)).unwrap();
        assert_eq!(dds.get_width(), 4);
        assert_eq!(dds.get_height(), 4);
        assert_eq!(dds.get_num_mipmap_levels(), 3);
        assert_eq!(dds.get_dxgi_format(), Some(format));
        // 4x4 + 2x2 + 1x1 RGBA texels
        assert_eq!(dds.data.len(), (16 + 4 + 1) * 4);
    }

    #[test]
    fn test_without_mipmaps() {
        let blob = compile_texture(&png_bytes(8, 8, [0; 4]), ColorSpace::Linear, false).unwrap();
        let dds = Dds::read(&mut std::io::Cursor::new(blob)).unwrap();
        assert_eq!(dds.get_num_mipmap_levels(), 1);
        assert_eq!(dds.data.len(), 8 * 8 * 4);
    }

    #[test]
    fn test_garbage_is_rejected() {
        let err = compile_texture(b"not an image", ColorSpace::Srgb, true).unwrap_err();
        assert!(matches!(err, GraphicsError::TextureCompilationFailed(_)));
    }
}
