use image::Rgb;

/// White comes out of the round trip as 254.99999999999997 without this
const TRUNCATION_EPSILON: f64 = 1e-9;

/// One decoded RGB sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelSample {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl PixelSample {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Reduce the sample to an 8-bit perceptual luminance
    ///
    /// Each channel is linearized with the sRGB transfer curve, weighted with
    /// the BT.709 coefficients, and the resulting linear luminance is gamma
    /// compressed again. The final scale to [0, 255] truncates, after
    /// absorbing accumulated floating-point error so white stays 255.
    pub fn grey(&self) -> u8 {
        let r = srgb_to_linear(self.red);
        let g = srgb_to_linear(self.green);
        let b = srgb_to_linear(self.blue);

        let linear = 0.2126 * r + 0.7152 * g + 0.0722 * b;

        let compressed = if linear <= 0.0031308 {
            linear * 12.92
        } else {
            1.055 * linear.powf(1.0 / 2.4) - 0.055
        };

        // `as` saturates above 255
        (compressed * 255.0 + TRUNCATION_EPSILON) as u8
    }
}

fn srgb_to_linear(channel: u8) -> f64 {
    let v = channel as f64 / 255.0;
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

impl From<Rgb<u8>> for PixelSample {
    fn from(Rgb([red, green, blue]): Rgb<u8>) -> Self {
        Self { red, green, blue }
    }
}

impl From<PixelSample> for Rgb<u8> {
    fn from(p: PixelSample) -> Self {
        Rgb([p.red, p.green, p.blue])
    }
}
