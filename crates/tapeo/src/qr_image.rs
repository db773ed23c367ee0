//! QR code PNG rendering.

use anyhow::Context;
use image::codecs::png::PngEncoder;
use image::Luma;

/// Lower bound for the rendered image, so printed codes stay sharp.
const MIN_SIZE: u32 = 512;

/// Renders the scan URL as a PNG image.
pub fn render_png(url: &str) -> anyhow::Result<Vec<u8>> {
    let code = qrcode::QrCode::new(url.as_bytes()).context("QR encoding failed")?;
    let image = code
        .render::<Luma<u8>>()
        .min_dimensions(MIN_SIZE, MIN_SIZE)
        .build();

    let mut png = Vec::new();
    image
        .write_with_encoder(PngEncoder::new(&mut png))
        .context("PNG encoding failed")?;
    Ok(png)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn renders_a_png() {
        let png = render_png("https://tapeo.example/qr/CP-MESA-1").unwrap();

        assert_eq!(&png[..8], &PNG_MAGIC);
    }

    #[test]
    fn long_urls_still_encode() {
        let url = format!("https://tapeo.example/qr/{}", "A".repeat(120));
        let png = render_png(&url).unwrap();

        assert_eq!(&png[..8], &PNG_MAGIC);
    }
}
