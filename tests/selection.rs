use ndarray::Array3;
use wandmask::{
    extract_contours, magic_wand_select_detailed, Channel, Connectivity, ImageView, MaskBounds,
    NdImage, PixelFormat, SelectionBuilder, SelectionError, SelectionOptions,
};

/// 5x5 black RGB image with a white pixel at (4, 4).
fn black_with_white_corner() -> Array3<u8> {
    let mut img = Array3::<u8>::zeros((5, 5, 3));
    for c in 0..3 {
        img[[4, 4, c]] = 255;
    }
    img
}

#[test_log::test]
fn test_ndarray_source() {
    let img = black_with_white_corner();
    let image = NdImage::infer(img.view()).unwrap();

    let strict = SelectionBuilder::new(&image, 0, 0, 0.0).unwrap();
    assert_eq!(strict.mask().pixel_count(), 24);
    assert!(!strict.mask().is_selected(4, 4));

    let loose = SelectionBuilder::new(&image, 0, 0, 100.0).unwrap();
    assert_eq!(loose.mask().pixel_count(), 25);
}

#[test]
fn test_mask_matches_array_view() {
    let img = black_with_white_corner();
    let flat: Vec<u8> = img.iter().copied().collect();

    let from_nd = SelectionBuilder::new(&NdImage::infer(img.view()).unwrap(), 2, 2, 0.0)
        .unwrap()
        .into_mask();
    let from_raw = SelectionBuilder::new(&ImageView::new(&flat, 5, 5, PixelFormat::RGB).unwrap(), 2, 2, 0.0)
        .unwrap()
        .into_mask();
    assert_eq!(from_nd, from_raw);
    assert_eq!(from_nd.to_array()[[4, 4]], 0);
}

#[test]
fn test_sixteen_bit_ndarray() {
    let mut img = Array3::<u16>::zeros((3, 3, 1));
    img[[1, 1, 0]] = 40000;
    let image = NdImage::new(img.view(), PixelFormat::GRAY).unwrap();

    // 60% of 65535 = 39321, short of the 40000 step
    let partial = SelectionBuilder::new(&image, 0, 0, 60.0).unwrap();
    assert_eq!(partial.mask().pixel_count(), 8);

    let full = SelectionBuilder::new(&image, 0, 0, 62.0).unwrap();
    assert_eq!(full.mask().pixel_count(), 9);
}

#[test]
fn test_custom_channel_order() {
    // Alpha first, then gray: two pixels that differ only in alpha
    let format = PixelFormat::new(&[Channel::Alpha, Channel::Gray]).unwrap();
    let data = [255u8, 80, 0, 80];
    let image = ImageView::new(&data, 2, 1, format).unwrap();
    let selection = SelectionBuilder::new(&image, 0, 0, 0.0).unwrap();
    assert_eq!(selection.mask().as_slice(), &[255, 0]);
}

#[test]
fn test_ring_leaves_hole() {
    // White ring around a white center separated by a black moat
    let size = 9;
    let mut img = Array3::<u8>::zeros((size, size, 4));
    for y in 0..size {
        for x in 0..size {
            let d = (x as i32 - 4).abs().max((y as i32 - 4).abs());
            let v = if d == 4 || d == 0 { 255 } else { 0 };
            for c in 0..3 {
                img[[y, x, c]] = v;
            }
            img[[y, x, 3]] = 255;
        }
    }
    let flat: Vec<u8> = img.iter().copied().collect();

    let result = magic_wand_select_detailed(&flat, size, size, 0, 0, 0.0, true).unwrap();
    assert_eq!(result.pixel_count, 32);
    assert_eq!(
        result.bounds,
        Some(MaskBounds { x: 0, y: 0, width: 9, height: 9 })
    );
    assert_eq!(result.mask[4 * size + 4], 0);

    let global = magic_wand_select_detailed(&flat, size, size, 0, 0, 0.0, false).unwrap();
    assert_eq!(global.pixel_count, 33);
}

#[test]
fn test_outline_of_selection() {
    let img = black_with_white_corner();
    let image = NdImage::infer(img.view()).unwrap();
    let mut mask = SelectionBuilder::new(&image, 0, 0, 0.0).unwrap().into_mask();

    let outlines = extract_contours(&mask);
    assert_eq!(outlines.len(), 1);

    mask.invert();
    assert_eq!(mask.pixel_count(), 1);
    assert_eq!(mask.bounds(), Some(MaskBounds { x: 4, y: 4, width: 1, height: 1 }));

    let tinted = mask.to_alpha_image(0, 120, 255);
    assert_eq!(&tinted[tinted.len() - 4..], &[0, 120, 255, 255]);
    assert_eq!(tinted[3], 0);
}

#[test]
fn test_connectivity_option() {
    // Two black squares touching at a corner
    let mut img = Array3::<u8>::from_elem((4, 4, 1), 255);
    for (x, y) in [(0, 0), (1, 0), (0, 1), (1, 1), (2, 2), (3, 2), (2, 3), (3, 3)] {
        img[[y, x, 0]] = 0;
    }
    let image = NdImage::infer(img.view()).unwrap();

    let eight = SelectionBuilder::new(&image, 0, 0, 0.0).unwrap();
    assert_eq!(eight.mask().pixel_count(), 8);

    let options = SelectionOptions::new().connectivity(Connectivity::Four);
    let four = SelectionBuilder::with_options(&image, 0, 0, &options).unwrap();
    assert_eq!(four.mask().pixel_count(), 4);
}

#[test]
fn test_errors_before_scanning() {
    let img = Array3::<u8>::zeros((2, 2, 3));
    assert!(matches!(
        NdImage::new(img.view(), PixelFormat::RGBA),
        Err(SelectionError::UnsupportedPixelFormat(_))
    ));

    let image = NdImage::infer(img.view()).unwrap();
    assert!(matches!(
        SelectionBuilder::new(&image, 2, 1, 0.0),
        Err(SelectionError::OutOfBounds { x: 2, y: 1, .. })
    ));
    assert!(matches!(
        SelectionBuilder::new(&image, 0, 0, -5.0),
        Err(SelectionError::InvalidTolerance(_))
    ));
}
