use super::*;

fn encode_png(img: &image::RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decodes_png_to_straight_rgba() {
    let mut img = image::RgbaImage::new(2, 2);
    img.put_pixel(1, 0, image::Rgba([200, 100, 50, 128]));
    let decoded = decode_image(&encode_png(&img)).unwrap();
    assert_eq!((decoded.width, decoded.height), (2, 2));
    assert_eq!(&decoded.rgba8[4..8], &[200, 100, 50, 128]);
    assert_eq!(&decoded.rgba8[0..4], &[0, 0, 0, 0]);
}

#[test]
fn garbage_bytes_fail_to_decode() {
    assert!(decode_image(b"not an image").is_err());
}

#[test]
fn from_rgba8_checks_length() {
    assert!(DecodedImage::from_rgba8(2, 2, vec![0; 15]).is_err());
    assert!(DecodedImage::from_rgba8(2, 2, vec![0; 16]).is_ok());
}

#[test]
fn premultiply_scales_color_by_alpha() {
    let img = DecodedImage::from_rgba8(2, 1, vec![200, 100, 50, 128, 9, 9, 9, 0]).unwrap();
    assert_eq!(img.to_premultiplied(), vec![100, 50, 25, 128, 0, 0, 0, 0]);
    assert_eq!(&img.rgba8[..4], &[200, 100, 50, 128]);
}
