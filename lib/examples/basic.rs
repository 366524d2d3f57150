/// Basic example: render a synthetic image in the current terminal
///
/// Builds a gray square with a white disc and a red diagonal, then draws it
/// once plain and once negated and mirrored.
use glyphcast::{GlyphRamp, ImageFormat, RampPreset, RasterImage, TerminalSurface};
use image::{Rgb, RgbImage};
use std::io;
use std::thread;
use std::time::Duration;

fn main() -> io::Result<()> {
    let width = 160;
    let height = 160;
    let mut img = RgbImage::from_pixel(width, height, Rgb([100, 100, 100]));

    // White disc with a black rim
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;
    let radius = 50.0;
    for y in 0..height {
        for x in 0..width {
            let dx = x as f32 - center_x;
            let dy = y as f32 - center_y;
            let dist = (dx * dx + dy * dy).sqrt();

            if dist < radius {
                img.put_pixel(x, y, Rgb([255, 255, 255]));
            } else if (dist - radius).abs() < 5.0 {
                img.put_pixel(x, y, Rgb([0, 0, 0]));
            }
        }
    }

    // Diagonal, so the mirror is visible
    for i in 0..width.min(height) {
        img.put_pixel(i, i, Rgb([255, 0, 0]));
    }

    let mut image = RasterImage::from_raw(img, ImageFormat::Bitmap, "synthetic", GlyphRamp::default());
    let mut surface = TerminalSurface::stdout();

    image.display(&mut surface)?;
    println!("Dense ramp, {}x{} source", image.width(), image.height());
    thread::sleep(Duration::from_secs(2));

    image.negate_image();
    image.mirror_image();
    image.set_ramp(RampPreset::Sparse.ramp());
    image.display(&mut surface)?;
    println!("Negated, mirrored, sparse ramp");

    Ok(())
}
