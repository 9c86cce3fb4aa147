use std::io::Cursor;

use super::*;

fn png_1x1(rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_raw(1, 1, rgba.to_vec()).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_image_png_dimensions_and_premul() {
    let prepared = decode_image(&png_1x1([100, 50, 200, 128])).unwrap();
    assert_eq!((prepared.width, prepared.height), (1, 1));
    assert_eq!(
        prepared.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_asset_sniffs_svg() {
    let svg = br#"<?xml version="1.0"?>
<svg xmlns="http://www.w3.org/2000/svg" width="4" height="2"><rect width="4" height="2" fill="red"/></svg>"#;
    let DecodedAsset::Svg(tree) = decode_asset(svg).unwrap() else {
        panic!("expected svg");
    };
    let raster = rasterize_svg(&tree, 8, 4).unwrap();
    assert_eq!(raster.rgba8_premul.len(), 8 * 4 * 4);
    assert_eq!(&raster.rgba8_premul[..4], &[255, 0, 0, 255]);
    assert!(rasterize_svg(&tree, 0, 4).is_err());

    assert!(matches!(
        decode_asset(&png_1x1([1, 2, 3, 255])).unwrap(),
        DecodedAsset::Raster(_)
    ));
    assert!(decode_asset(b"garbage").is_err());
    assert!(parse_svg(b"<svg").is_err());
}

#[test]
fn pixmap_checks_byte_len() {
    assert!(pixmap_from_premul_bytes(&[0u8; 8], 1, 1).is_err());
    assert!(pixmap_from_premul_bytes(&[0u8; 4], 70_000, 1).is_err());
    let img = decode_image(&png_1x1([0, 0, 0, 0])).unwrap();
    assert_eq!(img.rgba8_premul.as_slice(), &[0, 0, 0, 0]);
    let paint = ImagePaint::from_prepared(&img).unwrap();
    assert_eq!((paint.width, paint.height), (1, 1));
}
