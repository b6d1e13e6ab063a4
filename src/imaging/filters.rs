/// The two fixed filters offered by the app
///
/// Both take an optional image and return a new one: `None` in gives
/// `None` out, and the input is never modified.

use image::{DynamicImage, ImageBuffer, Pixel};

/// Neighborhood radius of the median filter (1 = 3x3 footprint)
const MEDIAN_RADIUS: i64 = 1;
const MEDIAN_WINDOW: usize = ((2 * MEDIAN_RADIUS + 1) * (2 * MEDIAN_RADIUS + 1)) as usize;

/// Suppress impulse (salt and pepper) noise with a 3x3 median filter.
///
/// 8-bit images keep their color type; wider formats are filtered as RGBA8.
pub fn remove_noise(image: Option<&DynamicImage>) -> Option<DynamicImage> {
    let filtered = match image? {
        DynamicImage::ImageLuma8(buf) => DynamicImage::ImageLuma8(median_filter(buf)),
        DynamicImage::ImageLumaA8(buf) => DynamicImage::ImageLumaA8(median_filter(buf)),
        DynamicImage::ImageRgb8(buf) => DynamicImage::ImageRgb8(median_filter(buf)),
        DynamicImage::ImageRgba8(buf) => DynamicImage::ImageRgba8(median_filter(buf)),
        other => DynamicImage::ImageRgba8(median_filter(&other.to_rgba8())),
    };
    Some(filtered)
}

/// Spread each RGB channel's histogram so its cumulative distribution is
/// close to uniform. The result is always RGB8 (alpha is dropped).
pub fn equalize_histogram(image: Option<&DynamicImage>) -> Option<DynamicImage> {
    let mut rgb = image?.to_rgb8();

    let mut histograms = [[0u64; 256]; 3];
    for pixel in rgb.pixels() {
        for (channel, &value) in pixel.0.iter().enumerate() {
            histograms[channel][value as usize] += 1;
        }
    }

    let luts = histograms.map(|histogram| equalization_lut(&histogram));

    for pixel in rgb.pixels_mut() {
        for (channel, value) in pixel.0.iter_mut().enumerate() {
            *value = luts[channel][*value as usize];
        }
    }

    Some(DynamicImage::ImageRgb8(rgb))
}

/// Median of every channel over a clamped (edge-replicated) neighborhood
fn median_filter<P>(src: &ImageBuffer<P, Vec<u8>>) -> ImageBuffer<P, Vec<u8>>
where
    P: Pixel<Subpixel = u8>,
{
    let (width, height) = src.dimensions();
    let mut out: ImageBuffer<P, Vec<u8>> = ImageBuffer::new(width, height);
    if width == 0 || height == 0 {
        return out;
    }

    let channels = P::CHANNEL_COUNT as usize;
    let row_len = width as usize * channels;
    let max_x = width as i64 - 1;
    let max_y = height as i64 - 1;

    let input: &[u8] = src.as_raw();
    let output: &mut [u8] = &mut out;
    let mut window = [0u8; MEDIAN_WINDOW];

    for y in 0..height as i64 {
        for x in 0..width as i64 {
            let base = y as usize * row_len + x as usize * channels;

            for channel in 0..channels {
                let mut n = 0;
                for dy in -MEDIAN_RADIUS..=MEDIAN_RADIUS {
                    let ny = (y + dy).clamp(0, max_y) as usize;
                    for dx in -MEDIAN_RADIUS..=MEDIAN_RADIUS {
                        let nx = (x + dx).clamp(0, max_x) as usize;
                        window[n] = input[ny * row_len + nx * channels + channel];
                        n += 1;
                    }
                }

                window.sort_unstable();
                output[base + channel] = window[MEDIAN_WINDOW / 2];
            }
        }
    }

    out
}

/// Lookup table mapping one channel onto an equalized range.
///
/// Channels with a single populated bin (or too few pixels to spread)
/// get the identity table.
fn equalization_lut(histogram: &[u64; 256]) -> [u8; 256] {
    let identity: [u8; 256] = std::array::from_fn(|i| i as u8);

    let populated: Vec<u64> = histogram.iter().copied().filter(|&count| count > 0).collect();
    let last = match populated.last() {
        Some(&last) if populated.len() > 1 => last,
        _ => return identity,
    };

    let step = (populated.iter().sum::<u64>() - last) / 255;
    if step == 0 {
        return identity;
    }

    let mut lut = [0u8; 256];
    let mut n = step / 2;
    for (slot, &count) in lut.iter_mut().zip(histogram.iter()) {
        *slot = (n / step).min(255) as u8;
        n += count;
    }
    lut
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};

    fn noisy_rgb() -> DynamicImage {
        let img = RgbImage::from_fn(16, 12, |x, y| {
            if (x * 7 + y * 3) % 11 == 0 {
                Rgb([255, 255, 255])
            } else {
                Rgb([(x * 10) as u8, (y * 15) as u8, 90])
            }
        });
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn test_absent_input_gives_absent_output() {
        assert!(remove_noise(None).is_none());
        assert!(equalize_histogram(None).is_none());
    }

    #[test]
    fn test_filters_do_not_mutate_input() {
        let image = noisy_rgb();
        let before = image.clone();

        let denoised = remove_noise(Some(&image)).unwrap();
        let equalized = equalize_histogram(Some(&image)).unwrap();

        assert_eq!(image, before);
        assert_ne!(denoised, before);
        assert_eq!(equalized.dimensions(), before.dimensions());
    }

    #[test]
    fn test_median_removes_isolated_impulse() {
        let mut img = GrayImage::from_pixel(5, 5, Luma([80]));
        img.put_pixel(2, 2, Luma([255]));
        img.put_pixel(0, 0, Luma([0]));

        let out = remove_noise(Some(&DynamicImage::ImageLuma8(img))).unwrap();
        let out = out.as_luma8().unwrap();

        assert!(out.pixels().all(|p| p.0[0] == 80));
    }

    #[test]
    fn test_median_preserves_step_edge() {
        let img = GrayImage::from_fn(8, 6, |x, _| if x < 4 { Luma([0]) } else { Luma([255]) });
        let input = DynamicImage::ImageLuma8(img);

        let out = remove_noise(Some(&input)).unwrap();
        assert_eq!(out, input);
    }

    #[test]
    fn test_median_keeps_alpha_channel() {
        let img = RgbaImage::from_pixel(4, 4, Rgba([10, 20, 30, 128]));
        let out = remove_noise(Some(&DynamicImage::ImageRgba8(img.clone()))).unwrap();
        assert_eq!(out.as_rgba8(), Some(&img));
    }

    #[test]
    fn test_median_on_wide_format_falls_back_to_rgba8() {
        let wide = DynamicImage::new_rgb16(3, 3);
        let out = remove_noise(Some(&wide)).unwrap();
        assert!(out.as_rgba8().is_some());
    }

    #[test]
    fn test_equalize_stretches_narrow_histogram() {
        // Four vertical bands of 100..=103, 256 pixels each
        let img = GrayImage::from_fn(32, 32, |x, _| Luma([100 + (x / 8) as u8]));
        let out = equalize_histogram(Some(&DynamicImage::ImageLuma8(img))).unwrap();
        let out = out.as_rgb8().unwrap();

        assert_eq!(out.get_pixel(0, 0), &Rgb([0, 0, 0]));
        assert_eq!(out.get_pixel(8, 0), &Rgb([85, 85, 85]));
        assert_eq!(out.get_pixel(16, 0), &Rgb([171, 171, 171]));
        assert_eq!(out.get_pixel(31, 31), &Rgb([255, 255, 255]));
    }

    #[test]
    fn test_equalize_leaves_flat_image_alone() {
        let img = RgbImage::from_pixel(10, 10, Rgb([12, 200, 77]));
        let out = equalize_histogram(Some(&DynamicImage::ImageRgb8(img.clone()))).unwrap();
        assert_eq!(out.as_rgb8(), Some(&img));
    }

    #[test]
    fn test_equalize_converts_to_rgb() {
        let img = RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 4]));
        let out = equalize_histogram(Some(&DynamicImage::ImageRgba8(img))).unwrap();
        assert!(out.as_rgb8().is_some());
    }
}
