//! Share-card rendering for a finished session.
//!
//! Produces a fixed 500x500 PNG: soft radial background, the elicited color
//! as a drop-shadowed disc with a dark ring, a title, the hex code, and a
//! translucent watermark. There is no platform share sheet on this target,
//! so the card plus [`share_caption`] is the shareable artifact.

use std::io;
use std::path::Path;

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::color::Rgb;

const CARD_SIZE: u32 = 500;
const DISC_CENTER: (i32, i32) = (250, 200);
const DISC_RADIUS: i32 = 117;
const RING_RADIUS: i32 = 122;
const SHADOW_OFFSET: i32 = 10;

/// Background gradient endpoints, near-white center fading to a cool gray.
const BG_INNER: (u8, u8, u8) = (253, 251, 251);
const BG_OUTER: (u8, u8, u8) = (233, 236, 239);

/// Caption text to accompany the card.
pub fn share_caption(color: Rgb) -> String {
    format!("I found my perfect color: {}", color.to_hex())
}

/// Render the share card for `color` to `path` as a PNG.
pub fn render_share_card<P: AsRef<Path>>(color: Rgb, path: P) -> io::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let backend = BitMapBackend::new(path, (CARD_SIZE, CARD_SIZE));
    let drawing_area = backend.into_drawing_area();

    for y in 0..CARD_SIZE as i32 {
        for x in 0..CARD_SIZE as i32 {
            drawing_area
                .draw_pixel((x, y), &background_pixel(x, y))
                .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
        }
    }

    let shadow_center = (DISC_CENTER.0, DISC_CENTER.1 + SHADOW_OFFSET);
    drawing_area
        .draw(&Circle::new(
            shadow_center,
            RING_RADIUS,
            BLACK.mix(0.3).filled(),
        ))
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
    drawing_area
        .draw(&Circle::new(
            DISC_CENTER,
            RING_RADIUS,
            RGBColor(51, 51, 51).filled(),
        ))
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
    drawing_area
        .draw(&Circle::new(
            DISC_CENTER,
            DISC_RADIUS,
            RGBColor(color.r, color.g, color.b).filled(),
        ))
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;

    let centered = Pos::new(HPos::Center, VPos::Center);
    let title = FontDesc::new(FontFamily::SansSerif, 32.0, FontStyle::Bold)
        .color(&RGBColor(34, 34, 34))
        .pos(centered);
    drawing_area
        .draw_text("My Perfect Color", &title, (250, 360))
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;

    let hex_label = FontDesc::new(FontFamily::SansSerif, 28.0, FontStyle::Normal)
        .color(&RGBColor(85, 85, 85))
        .pos(centered);
    drawing_area
        .draw_text(&color.to_hex(), &hex_label, (250, 410))
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;

    let watermark = FontDesc::new(FontFamily::SansSerif, 16.0, FontStyle::Normal)
        .color(&BLACK.mix(0.3))
        .pos(Pos::new(HPos::Right, VPos::Bottom));
    drawing_area
        .draw_text("Perfect Color", &watermark, (490, 490))
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;

    drawing_area
        .present()
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))
}

/// Radial gradient sample at pixel (x, y). Flat near the disc, easing to the
/// outer tone by the card edge.
fn background_pixel(x: i32, y: i32) -> RGBColor {
    let center = CARD_SIZE as f32 / 2.0;
    let dx = x as f32 - center;
    let dy = y as f32 - center;
    let t = ((dx.hypot(dy) - 50.0) / 200.0).clamp(0.0, 1.0);
    RGBColor(
        lerp_channel(BG_INNER.0, BG_OUTER.0, t),
        lerp_channel(BG_INNER.1, BG_OUTER.1, t),
        lerp_channel(BG_INNER.2, BG_OUTER.2, t),
    )
}

fn lerp_channel(from: u8, to: u8, t: f32) -> u8 {
    (from as f32 + (to as f32 - from as f32) * t).round() as u8
}
