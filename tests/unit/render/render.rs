use super::*;
use crate::controller::{Animapper, AnimapperConfig, FetchMode};
use crate::loader::MemoryLoader;

const FLIPBOOK: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="2">
  <g id="blink_animated">
    <rect x="0" y="0" width="2" height="2" fill="#ff0000" style="display:block"/>
    <rect x="2" y="0" width="2" height="2" fill="#0000ff" style="display:none"/>
  </g>
</svg>"##;

#[test]
fn rasterize_fills_opaque_pixels() {
    let img = rasterize_svg(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="2" height="2"><rect width="2" height="2" fill="#00ff00"/></svg>"##,
        1.0,
    )
    .unwrap();
    assert_eq!(img.dimensions(), (2, 2));
    assert_eq!(img.get_pixel(0, 0).0, [0, 255, 0, 255]);
}

#[test]
fn rasterize_rejects_bad_scale_and_bad_svg() {
    let ok = r#"<svg xmlns="http://www.w3.org/2000/svg" width="1" height="1"/>"#;
    assert!(rasterize_svg(ok, 0.0).is_err());
    assert!(rasterize_svg(ok, f32::NAN).is_err());
    assert!(matches!(
        rasterize_svg("<svg", 1.0),
        Err(AnimapperError::Render(_))
    ));
}

#[test]
fn demultiply_restores_straight_alpha() {
    let mut px = [64u8, 0, 128, 128, 10, 20, 30, 0, 1, 2, 3, 255];
    demultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[..4], &[128, 0, 255, 128]);
    assert_eq!(&px[4..8], &[10, 20, 30, 0]);
    assert_eq!(&px[8..], &[1, 2, 3, 255]);
}

#[test]
fn render_ticks_follows_the_animation() {
    let loader = MemoryLoader::new()
        .with("f.svg", FLIPBOOK)
        .with("f.json", "{}");
    let mut page = Page::from_markup(r#"<div id="mount"/>"#, loader).unwrap();
    let mount = page.document().root();
    let cfg = AnimapperConfig::new("f.svg", "f.json").with_fetch_mode(FetchMode::Blocking);
    let id = page.attach(Animapper::new(cfg, mount)).unwrap();

    let frames = render_ticks(&mut page, id, 2, 1.0).unwrap();
    assert_eq!(frames.len(), 3);

    let red = [255, 0, 0, 255];
    let blue = [0, 0, 255, 255];
    assert_eq!(frames[0].get_pixel(0, 0).0, red);
    assert_eq!(frames[0].get_pixel(3, 0).0[3], 0);
    assert_eq!(frames[1].get_pixel(3, 0).0, blue);
    assert_eq!(frames[1].get_pixel(0, 0).0[3], 0);
    assert_eq!(frames[2].get_pixel(0, 0).0, red);
    assert_eq!(page.now(), crate::Millis(160));
}

#[test]
fn snapshot_requires_a_mounted_graphic() {
    let loader = MemoryLoader::new();
    let mut page = Page::from_markup(r#"<div id="mount"/>"#, loader).unwrap();
    let mount = page.document().root();
    let id = page
        .attach(Animapper::new(AnimapperConfig::new("x.svg", "x.json"), mount))
        .unwrap();
    assert!(snapshot_svg(&page, id).is_err());
}
