//! The fixed meme template catalog.

use super::model::{
    Align, CanvasSize, Point, Rgb, StrokeMode, TemplateDescriptor, TextOverlaySpec, WrapMode,
};
use Align::{Center, Left, Right};

/// Returned by random selection when no template asset is present on disk.
pub const FALLBACK_TEMPLATE_ID: &str = "disaster_girl";

const CANVAS: CanvasSize = CanvasSize::new(600, 500);

/// White or gold caption with a black outline, the only style the catalog uses.
#[allow(clippy::too_many_arguments)]
const fn caption(
    x: i32,
    y: i32,
    text_template: &'static str,
    font_size: u32,
    color: Rgb,
    stroke_width: u32,
    max_width: u32,
    align: Align,
) -> TextOverlaySpec {
    TextOverlaySpec {
        position: Point::new(x, y),
        text_template,
        font_size,
        color,
        stroke_color: Rgb::BLACK,
        stroke: if stroke_width == 0 {
            StrokeMode::NoStroke
        } else {
            StrokeMode::Stroke(stroke_width)
        },
        wrap: WrapMode::WrapAt(max_width),
        align,
    }
}

#[rustfmt::skip]
const DISASTER_GIRL: &[TextOverlaySpec] = &[
    caption(50, 30, "My Crush's DMs after I sent a risky text", 40, Rgb::WHITE, 2, 500, Left),
    caption(50, 400, "Me, having a Rizz Score of {score} and not caring", 35, Rgb::WHITE, 2, 500, Left),
];

#[rustfmt::skip]
const SPIDERMAN_POINTING: &[TextOverlaySpec] = &[
    caption(100, 50, "Me", 45, Rgb::WHITE, 3, 200, Center),
    caption(100, 100, "RIZZ SCORE: {score}", 40, Rgb::GOLD, 2, 200, Center),
    caption(400, 50, "The guy she told you not to worry about", 35, Rgb::WHITE, 2, 200, Center),
];

#[rustfmt::skip]
const SUCCESS_KID: &[TextOverlaySpec] = &[
    caption(50, 30, "Got left on read for 3 hours", 40, Rgb::WHITE, 2, 500, Left),
    caption(50, 400, "Still has a higher Rizz Score than my friend.", 35, Rgb::WHITE, 2, 500, Left),
    caption(300, 200, "{score}/100", 50, Rgb::GOLD, 3, 200, Center),
];

#[rustfmt::skip]
const DOGE: &[TextOverlaySpec] = &[
    caption(50, 30, "wow.", 35, Rgb::WHITE, 2, 150, Left),
    caption(450, 30, "such rizz.", 35, Rgb::WHITE, 2, 150, Right),
    caption(50, 200, "very calculate.", 35, Rgb::WHITE, 2, 150, Left),
    caption(450, 200, "{score}/100.", 40, Rgb::GOLD, 3, 150, Right),
    caption(50, 400, "much score.", 35, Rgb::WHITE, 2, 150, Left),
    caption(450, 400, "Amaze.", 35, Rgb::WHITE, 2, 150, Right),
];

pub static CATALOG: &[TemplateDescriptor] = &[
    TemplateDescriptor {
        id: "disaster_girl",
        name: "Disaster Girl",
        image_path: "templates/disaster_girl.jpg",
        canvas_size: CANVAS,
        overlays: DISASTER_GIRL,
    },
    TemplateDescriptor {
        id: "spiderman_pointing",
        name: "Spider-Man Pointing",
        image_path: "templates/spiderman_pointing.jpg",
        canvas_size: CANVAS,
        overlays: SPIDERMAN_POINTING,
    },
    TemplateDescriptor {
        id: "success_kid",
        name: "Success Kid",
        image_path: "templates/success_kid.jpg",
        canvas_size: CANVAS,
        overlays: SUCCESS_KID,
    },
    TemplateDescriptor {
        id: "doge",
        name: "Doge",
        image_path: "templates/doge.jpg",
        canvas_size: CANVAS,
        overlays: DOGE,
    },
];

/// The hard-coded fallback entry.
pub fn fallback_template() -> &'static TemplateDescriptor {
    // CATALOG is a literal whose first entry is the fallback.
    &CATALOG[0]
}
