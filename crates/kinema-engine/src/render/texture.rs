use std::path::Path;

use anyhow::{Context, Result};

/// Sampled 2D RGBA texture with its own view and sampler.
pub struct Texture2d {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub size: (u32, u32),
}

impl Texture2d {
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

    /// Creates a texture from tightly packed RGBA8 pixels (`width * height * 4` bytes).
    pub fn from_rgba8(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        width: u32,
        height: u32,
        pixels: &[u8],
    ) -> Self {
        debug_assert_eq!(pixels.len(), (width * height * 4) as usize);

        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
            size: (width, height),
        }
    }

    /// Decodes an image file and uploads it, flipped so that UV (0, 0) is the
    /// bottom-left corner.
    pub fn load(device: &wgpu::Device, queue: &wgpu::Queue, path: &Path) -> Result<Self> {
        let (width, height, pixels) = decode_rgba_flipped(path)?;
        log::info!("loaded texture {} ({width}x{height})", path.display());
        Ok(Self::from_rgba8(
            device,
            queue,
            &path.display().to_string(),
            width,
            height,
            &pixels,
        ))
    }

    /// Like [`Texture2d::load`], but falls back to a checker texture when the
    /// file is missing or cannot be decoded.
    pub fn load_or_checker(device: &wgpu::Device, queue: &wgpu::Queue, path: &Path) -> Self {
        match Self::load(device, queue, path) {
            Ok(t) => t,
            Err(e) => {
                log::warn!("texture unavailable, using checker fallback: {e:#}");
                Self::checker(device, queue, "checker fallback")
            }
        }
    }

    /// 64x64 magenta/grey checker.
    pub fn checker(device: &wgpu::Device, queue: &wgpu::Queue, label: &str) -> Self {
        const SIZE: u32 = 64;
        let pixels = checker_pixels(SIZE, 8, [255, 0, 255, 255], [64, 64, 64, 255]);
        Self::from_rgba8(device, queue, label, SIZE, SIZE, &pixels)
    }
}

/// Decodes an image file to RGBA8, flipped vertically.
pub fn decode_rgba_flipped(path: &Path) -> Result<(u32, u32, Vec<u8>)> {
    let img = image::open(path)
        .with_context(|| format!("failed to decode image {}", path.display()))?;
    let rgba = img.flipv().to_rgba8();
    let (w, h) = rgba.dimensions();
    Ok((w, h, rgba.into_raw()))
}

/// Square checkerboard of `size` pixels with `cell`-pixel squares.
pub fn checker_pixels(size: u32, cell: u32, a: [u8; 4], b: [u8; 4]) -> Vec<u8> {
    let cell = cell.max(1);
    (0..size)
        .flat_map(|y| (0..size).map(move |x| (x, y)))
        .flat_map(|(x, y)| if (x / cell + y / cell) % 2 == 0 { a } else { b })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checker_alternates_cells() {
        let a = [1, 2, 3, 4];
        let b = [9, 9, 9, 9];
        let px = checker_pixels(4, 2, a, b);
        assert_eq!(px.len(), 4 * 4 * 4);

        let at = |x: usize, y: usize| &px[(y * 4 + x) * 4..(y * 4 + x) * 4 + 4];
        assert_eq!(at(0, 0), a);
        assert_eq!(at(1, 1), a);
        assert_eq!(at(2, 0), b);
        assert_eq!(at(0, 2), b);
        assert_eq!(at(3, 3), a);
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = decode_rgba_flipped(Path::new("/definitely/not/here.png"));
        assert!(err.is_err());
    }

    #[test]
    fn decoded_rows_are_flipped() {
        let mut img = image::RgbaImage::new(1, 2);
        img.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
        img.put_pixel(0, 1, image::Rgba([0, 0, 255, 255]));

        let path = std::env::temp_dir().join(format!("kinema-flip-{}.png", std::process::id()));
        img.save(&path).expect("write temp png");

        let (w, h, px) = decode_rgba_flipped(&path).expect("decode temp png");
        let _ = std::fs::remove_file(&path);

        assert_eq!((w, h), (1, 2));
        assert_eq!(&px[0..4], &[0, 0, 255, 255]);
        assert_eq!(&px[4..8], &[255, 0, 0, 255]);
    }
}
