//! Social preview card rendering.
//!
//! Cards are composed directly on an RGBA canvas with `image`; text is
//! rasterised with `imageproc` from an embedded DejaVu Sans Bold face.

use std::io::Cursor;

use ab_glyph::{FontRef, PxScale};
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, Pixel, Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};
use v0mon_core::element::TypePair;

/// Card width in pixels.
pub const OG_WIDTH: u32 = 1200;
/// Card height in pixels.
pub const OG_HEIGHT: u32 = 630;

static CARD_FONT: &[u8] = include_bytes!("../../assets/DejaVuSans-Bold.ttf");

const BRAND: &str = "v0mon";

const PLACEHOLDER_BG: u32 = 0xF3F4F6;
const PLACEHOLDER_TEXT: u32 = 0x374151;
const PLACEHOLDER_TEXT_SIZE: f32 = 48.0;

const HOME_BG: u32 = 0x0F0F23;
const HOME_DOT: u32 = 0x333333;
const HOME_GRADIENT: (u32, u32) = (0x667EEA, 0x764BA2);
const HOME_BANNER: (u32, u32) = (640, 160);
const HOME_BANNER_Y: u32 = 150;
const HOME_TITLE_SIZE: f32 = 96.0;
const HOME_SUBTITLE: &str = "Generate your v0mon with @handle";
const HOME_SUBTITLE_Y: u32 = 350;
const HOME_SUBTITLE_SIZE: f32 = 36.0;
const HOME_SUBTITLE_COLOR: u32 = 0xE2E8F0;
const HOME_TAGLINE: &str = "Transform your X/Twitter profile into a unique creature";
const HOME_TAGLINE_Y: u32 = 420;
const HOME_TAGLINE_SIZE: f32 = 24.0;
const HOME_TAGLINE_COLOR: u32 = 0x94A3B8;

const WHITE: u32 = 0xFFFFFF;
const DARK_LABEL: u32 = 0x000000;

/// Edge of the square foreground artwork frame.
const ARTWORK_FRAME: u32 = 600;
const ARTWORK_PADDING: u32 = 20;
const ARTWORK_RADIUS: u32 = 48;
const CARD_PADDING: u32 = 60;
/// Width of the left column holding the artwork.
const ARTWORK_COLUMN: u32 = 700;

/// Background brightness multiplier.
const BACKGROUND_BRIGHTNESS: f32 = 0.2;
/// Downscale factor used to blur the background.
const BLUR_FACTOR: u32 = 24;

/// Left edge of the right-hand text column.
const TEXT_X: u32 = CARD_PADDING + ARTWORK_COLUMN + 40;
const TEXT_MAX_WIDTH: u32 = OG_WIDTH - TEXT_X - 20;

const NAME_Y: u32 = 170;
const NAME_SIZE: f32 = 64.0;
const HANDLE_Y: u32 = 254;
const HANDLE_SIZE: f32 = 24.0;
const HANDLE_COLOR: u32 = 0xCCCCCC;

const BADGE_WIDTH: u32 = 180;
const BADGE_HEIGHT: u32 = 52;
const BADGE_GAP: u32 = 12;
const BADGE_LABEL_SIZE: f32 = 22.0;
/// Top-left corner of the first type badge.
const BADGE_X: u32 = TEXT_X;
const BADGE_Y: u32 = 306;

const BRAND_Y: u32 = 398;
const BRAND_SIZE: f32 = 32.0;

const DOT_SPACING: u32 = 100;
const DOT_RADIUS: u32 = 3;

/// Errors while composing a card.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to decode artwork: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Failed to encode card: {0}")]
    Encode(#[source] image::ImageError),

    #[error("Failed to load the card font")]
    Font,
}

fn rgb(hex: u32) -> Rgba<u8> {
    Rgba([(hex >> 16) as u8, (hex >> 8) as u8, hex as u8, 255])
}

fn card_font() -> Result<FontRef<'static>, RenderError> {
    FontRef::try_from_slice(CARD_FONT).map_err(|_| RenderError::Font)
}

/// Flat light card used when no artwork is available, reading
/// "Creature for @{handle}".
pub fn placeholder_card(handle: &str) -> Result<RgbaImage, RenderError> {
    let font = card_font()?;
    let mut canvas = RgbaImage::from_pixel(OG_WIDTH, OG_HEIGHT, rgb(PLACEHOLDER_BG));
    draw_text_centered(
        &mut canvas,
        &font,
        &format!("Creature for @{handle}"),
        OG_WIDTH / 2,
        (OG_HEIGHT - PLACEHOLDER_TEXT_SIZE as u32) / 2,
        PLACEHOLDER_TEXT_SIZE,
        OG_WIDTH - 2 * CARD_PADDING,
        rgb(PLACEHOLDER_TEXT),
    );
    Ok(canvas)
}

/// Static home card: dark background, dot grid, a gradient banner with
/// the site name and two lines of copy.
pub fn home_card() -> Result<RgbaImage, RenderError> {
    let font = card_font()?;
    let mut canvas = RgbaImage::from_pixel(OG_WIDTH, OG_HEIGHT, rgb(HOME_BG));

    let dot = rgb(HOME_DOT);
    for ty in 0..=OG_HEIGHT / DOT_SPACING {
        for tx in 0..=OG_WIDTH / DOT_SPACING {
            for offset in [DOT_SPACING / 4, DOT_SPACING * 3 / 4] {
                fill_circle(
                    &mut canvas,
                    tx * DOT_SPACING + offset,
                    ty * DOT_SPACING + offset,
                    DOT_RADIUS,
                    dot,
                );
            }
        }
    }

    let (banner_w, banner_h) = HOME_BANNER;
    fill_rounded_rect(
        &mut canvas,
        (OG_WIDTH - banner_w) / 2,
        HOME_BANNER_Y,
        banner_w,
        banner_h,
        banner_h / 2,
        |fx| lerp_color(HOME_GRADIENT.0, HOME_GRADIENT.1, fx),
    );

    let max_width = OG_WIDTH - 2 * CARD_PADDING;
    draw_text_centered(
        &mut canvas,
        &font,
        BRAND,
        OG_WIDTH / 2,
        HOME_BANNER_Y + (banner_h - HOME_TITLE_SIZE as u32) / 2,
        HOME_TITLE_SIZE,
        banner_w,
        rgb(WHITE),
    );
    draw_text_centered(
        &mut canvas,
        &font,
        HOME_SUBTITLE,
        OG_WIDTH / 2,
        HOME_SUBTITLE_Y,
        HOME_SUBTITLE_SIZE,
        max_width,
        rgb(HOME_SUBTITLE_COLOR),
    );
    draw_text_centered(
        &mut canvas,
        &font,
        HOME_TAGLINE,
        OG_WIDTH / 2,
        HOME_TAGLINE_Y,
        HOME_TAGLINE_SIZE,
        max_width,
        rgb(HOME_TAGLINE_COLOR),
    );

    Ok(canvas)
}

/// Full creature card: blurred, darkened artwork as background, the
/// artwork itself with rounded corners on the left, and on the right the
/// creature name, the handle, one labelled badge per type and the brand.
pub fn creature_card(
    artwork: &DynamicImage,
    name: &str,
    handle: &str,
    types: &TypePair,
) -> Result<RgbaImage, RenderError> {
    let font = card_font()?;
    let mut canvas = blurred_background(artwork);

    let inner = ARTWORK_FRAME - 2 * ARTWORK_PADDING;
    let foreground = artwork.resize(inner, inner, FilterType::Triangle).to_rgba8();
    let frame_x = CARD_PADDING + (ARTWORK_COLUMN - ARTWORK_FRAME) / 2;
    let frame_y = (OG_HEIGHT - ARTWORK_FRAME) / 2;
    let fg_x = frame_x + ARTWORK_PADDING + (inner - foreground.width()) / 2;
    let fg_y = frame_y + ARTWORK_PADDING + (inner - foreground.height()) / 2;
    draw_rounded(&mut canvas, &foreground, fg_x, fg_y, ARTWORK_RADIUS);

    draw_text(&mut canvas, &font, name, TEXT_X, NAME_Y, NAME_SIZE, rgb(WHITE));
    draw_text(
        &mut canvas,
        &font,
        &format!("@{handle}"),
        TEXT_X,
        HANDLE_Y,
        HANDLE_SIZE,
        rgb(HANDLE_COLOR),
    );

    for (i, element) in types.iter().enumerate() {
        let x = BADGE_X + i as u32 * (BADGE_WIDTH + BADGE_GAP);
        let color = element.badge_color();
        fill_rounded_rect(
            &mut canvas,
            x,
            BADGE_Y,
            BADGE_WIDTH,
            BADGE_HEIGHT,
            BADGE_HEIGHT / 2,
            |_| rgb(color),
        );
        let label_color = if element.prefers_dark_text() {
            DARK_LABEL
        } else {
            WHITE
        };
        draw_text_centered(
            &mut canvas,
            &font,
            &element.label(),
            x + BADGE_WIDTH / 2,
            BADGE_Y + (BADGE_HEIGHT - BADGE_LABEL_SIZE as u32) / 2,
            BADGE_LABEL_SIZE,
            BADGE_WIDTH - 24,
            rgb(label_color),
        );
    }

    draw_text(&mut canvas, &font, BRAND, TEXT_X, BRAND_Y, BRAND_SIZE, rgb(WHITE));

    Ok(canvas)
}

/// Decode `artwork` and compose a creature card as PNG bytes.
pub fn render_creature_png(
    artwork: &[u8],
    name: &str,
    handle: &str,
    types: &TypePair,
) -> Result<Vec<u8>, RenderError> {
    let artwork = image::load_from_memory(artwork).map_err(RenderError::Decode)?;
    encode_png(&creature_card(&artwork, name, handle, types)?)
}

pub fn encode_png(canvas: &RgbaImage) -> Result<Vec<u8>, RenderError> {
    let mut buf = Vec::new();
    canvas
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .map_err(RenderError::Encode)?;
    Ok(buf)
}

// ---------------------------------------------------------------------------
// Drawing helpers
// ---------------------------------------------------------------------------

/// Cover-fit the artwork to the card, blur it by down- then up-sampling,
/// and darken it.
fn blurred_background(artwork: &DynamicImage) -> RgbaImage {
    let cover = artwork.resize_to_fill(OG_WIDTH, OG_HEIGHT, FilterType::Triangle);
    let small = cover.resize_exact(
        (OG_WIDTH / BLUR_FACTOR).max(1),
        (OG_HEIGHT / BLUR_FACTOR).max(1),
        FilterType::Triangle,
    );
    let mut blurred = small
        .resize_exact(OG_WIDTH, OG_HEIGHT, FilterType::Triangle)
        .to_rgba8();

    for pixel in blurred.pixels_mut() {
        for channel in &mut pixel.0[..3] {
            *channel = (f32::from(*channel) * BACKGROUND_BRIGHTNESS).round() as u8;
        }
        pixel.0[3] = 255;
    }
    blurred
}

/// Whether `(x, y)` lies inside a `w`x`h` rectangle with corner radius `r`.
fn inside_rounded_rect(x: u32, y: u32, w: u32, h: u32, r: u32) -> bool {
    if x >= w || y >= h {
        return false;
    }
    let r = r.min(w / 2).min(h / 2);
    let cx = if x < r {
        r
    } else if x >= w - r {
        w - r - 1
    } else {
        return true;
    };
    let cy = if y < r {
        r
    } else if y >= h - r {
        h - r - 1
    } else {
        return true;
    };
    let dx = i64::from(x) - i64::from(cx);
    let dy = i64::from(y) - i64::from(cy);
    dx * dx + dy * dy <= i64::from(r) * i64::from(r)
}

/// Draw `img` at `(x0, y0)` clipped to rounded corners, blending any
/// translucent pixels over the canvas.
fn draw_rounded(canvas: &mut RgbaImage, img: &RgbaImage, x0: u32, y0: u32, radius: u32) {
    let (w, h) = img.dimensions();
    for (dx, dy, pixel) in img.enumerate_pixels() {
        let (x, y) = (x0 + dx, y0 + dy);
        if x >= canvas.width() || y >= canvas.height() || !inside_rounded_rect(dx, dy, w, h, radius)
        {
            continue;
        }
        match pixel.0[3] {
            0 => {}
            255 => canvas.put_pixel(x, y, *pixel),
            _ => canvas.get_pixel_mut(x, y).blend(pixel),
        }
    }
}

/// Fill a rounded rectangle. `color` receives the horizontal position
/// across the rectangle in `0.0..=1.0`.
fn fill_rounded_rect(
    canvas: &mut RgbaImage,
    x0: u32,
    y0: u32,
    w: u32,
    h: u32,
    radius: u32,
    color: impl Fn(f32) -> Rgba<u8>,
) {
    let span = w.saturating_sub(1).max(1) as f32;
    for dy in 0..h {
        for dx in 0..w {
            let (x, y) = (x0 + dx, y0 + dy);
            if x < canvas.width() && y < canvas.height() && inside_rounded_rect(dx, dy, w, h, radius)
            {
                canvas.put_pixel(x, y, color(dx as f32 / span));
            }
        }
    }
}

fn fill_circle(canvas: &mut RgbaImage, cx: u32, cy: u32, radius: u32, color: Rgba<u8>) {
    let r = i64::from(radius);
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy > r * r {
                continue;
            }
            let x = i64::from(cx) + dx;
            let y = i64::from(cy) + dy;
            if x >= 0 && y >= 0 && x < i64::from(canvas.width()) && y < i64::from(canvas.height()) {
                canvas.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

/// Scale for `text` at `size`, shrunk so it is at most `max_width` wide.
fn fit_scale(font: &FontRef<'_>, text: &str, size: f32, max_width: u32) -> PxScale {
    let (width, _) = text_size(PxScale::from(size), font, text);
    if width > max_width {
        PxScale::from(size * max_width as f32 / width as f32)
    } else {
        PxScale::from(size)
    }
}

/// Draw left-aligned text in the right-hand column.
fn draw_text(
    canvas: &mut RgbaImage,
    font: &FontRef<'_>,
    text: &str,
    x: u32,
    y: u32,
    size: f32,
    color: Rgba<u8>,
) {
    let scale = fit_scale(font, text, size, TEXT_MAX_WIDTH);
    draw_text_mut(canvas, color, x as i32, y as i32, scale, font, text);
}

/// Draw text horizontally centred on `center_x`.
#[allow(clippy::too_many_arguments)]
fn draw_text_centered(
    canvas: &mut RgbaImage,
    font: &FontRef<'_>,
    text: &str,
    center_x: u32,
    y: u32,
    size: f32,
    max_width: u32,
    color: Rgba<u8>,
) {
    let scale = fit_scale(font, text, size, max_width);
    let (width, _) = text_size(scale, font, text);
    let x = center_x as i32 - (width / 2) as i32;
    draw_text_mut(canvas, color, x, y as i32, scale, font, text);
}

fn lerp_color(from: u32, to: u32, t: f32) -> Rgba<u8> {
    let a = rgb(from).0;
    let b = rgb(to).0;
    let mix = |i: usize| (f32::from(a[i]) + (f32::from(b[i]) - f32::from(a[i])) * t).round() as u8;
    Rgba([mix(0), mix(1), mix(2), 255])
}
