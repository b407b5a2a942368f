use super::*;

const RED: Rgba = [255, 0, 0, 255];
const BLUE: Rgba = [0, 0, 255, 255];

// --- Construction ---

#[test]
fn new_surface_is_blank() {
    let s = PixelSurface::new(4, 3).unwrap();
    assert_eq!(s.backing_size(), Size::new(4, 3));
    assert_eq!(s.as_bytes().len(), 4 * 3 * BYTES_PER_PIXEL);
    assert!(s.is_blank());
}

#[test]
fn default_surface_is_zero_sized() {
    let s = PixelSurface::default();
    assert_eq!(s.backing_size(), Size::ZERO);
    assert!(s.as_bytes().is_empty());
}

// --- Pixel access ---

#[test]
fn set_and_read_pixel() {
    let mut s = PixelSurface::new(4, 4).unwrap();
    s.set_pixel(2, 1, RED);
    assert_eq!(s.pixel(2, 1), Some(RED));
    assert_eq!(s.pixel(1, 2), Some(TRANSPARENT));
    assert!(!s.is_blank());
}

#[test]
fn out_of_bounds_pixel_is_none_and_write_is_dropped() {
    let mut s = PixelSurface::new(4, 4).unwrap();
    s.set_pixel(4, 0, RED);
    assert_eq!(s.pixel(4, 0), None);
    assert!(s.is_blank());
}

#[test]
fn fill_rect_clips_to_bounds() {
    let mut s = PixelSurface::new(4, 4).unwrap();
    s.fill_rect(Rect::new(2, 2, 10, 10), BLUE);
    assert_eq!(s.pixel(3, 3), Some(BLUE));
    assert_eq!(s.pixel(2, 2), Some(BLUE));
    assert_eq!(s.pixel(1, 2), Some(TRANSPARENT));
}

// --- Resize ---

#[test]
fn set_backing_size_clears_content() {
    let mut s = PixelSurface::new(4, 4).unwrap();
    s.fill_rect(s.bounds(), RED);
    s.set_backing_size(Size::new(8, 2)).unwrap();
    assert_eq!(s.backing_size(), Size::new(8, 2));
    assert!(s.is_blank());
}

#[test]
fn new_rejects_unaddressable_size() {
    let err = PixelSurface::new(u32::MAX, u32::MAX).unwrap_err();
    assert_eq!(err, SurfaceError::TooLarge(Size::new(u32::MAX, u32::MAX)));
}

#[test]
fn oversized_backing_size_leaves_surface_unchanged() {
    let mut s = PixelSurface::new(4, 4).unwrap();
    s.set_pixel(1, 1, RED);
    let before = s.clone();

    let huge = Size::new(u32::MAX, u32::MAX);
    assert_eq!(s.set_backing_size(huge), Err(SurfaceError::TooLarge(huge)));
    assert_eq!(s, before);
}

#[test]
fn capture_of_unaddressable_region_fails() {
    let s = PixelSurface::new(4, 4).unwrap();
    let rect = Rect::new(0, 0, u32::MAX, u32::MAX);
    assert_eq!(s.capture(rect).unwrap_err(), SurfaceError::TooLarge(rect.size()));
}

#[test]
fn set_backing_size_to_same_size_still_clears() {
    let mut s = PixelSurface::new(4, 4).unwrap();
    s.set_pixel(0, 0, RED);
    s.set_backing_size(Size::new(4, 4)).unwrap();
    assert!(s.is_blank());
}

// --- Capture ---

#[test]
fn capture_empty_region_fails() {
    let s = PixelSurface::new(4, 4).unwrap();
    let err = s.capture(Rect::new(0, 0, 0, 4)).unwrap_err();
    assert_eq!(err, SurfaceError::EmptyRegion(Rect::new(0, 0, 0, 4)));
}

#[test]
fn capture_full_surface_copies_bytes() {
    let mut s = PixelSurface::new(3, 2).unwrap();
    s.set_pixel(2, 1, RED);
    let frame = s.capture(s.bounds()).unwrap();
    assert_eq!(frame.rect, Rect::new(0, 0, 3, 2));
    assert_eq!(frame.pixels, s.as_bytes());
}

#[test]
fn capture_past_bounds_pads_with_transparent() {
    let mut s = PixelSurface::new(2, 2).unwrap();
    s.fill_rect(s.bounds(), RED);
    let frame = s.capture(Rect::new(1, 1, 3, 3)).unwrap();
    assert_eq!(frame.pixels.len(), 9 * BYTES_PER_PIXEL);
    assert_eq!(&frame.pixels[0..4], &RED);
    assert!(frame.pixels[4..].iter().all(|&b| b == 0));
}

// --- Restore ---

#[test]
fn restore_at_offset_places_frame() {
    let mut src = PixelSurface::new(2, 2).unwrap();
    src.set_pixel(0, 0, RED);
    let frame = src.capture(src.bounds()).unwrap();

    let mut dst = PixelSurface::new(5, 5).unwrap();
    dst.restore(&frame, 3, 2).unwrap();
    assert_eq!(dst.pixel(3, 2), Some(RED));
    assert_eq!(dst.pixel(0, 0), Some(TRANSPARENT));
}

#[test]
fn restore_clips_to_smaller_surface() {
    let mut src = PixelSurface::new(4, 4).unwrap();
    src.fill_rect(src.bounds(), BLUE);
    let frame = src.capture(src.bounds()).unwrap();

    let mut dst = PixelSurface::new(2, 3).unwrap();
    dst.restore(&frame, 0, 0).unwrap();
    for y in 0..3 {
        for x in 0..2 {
            assert_eq!(dst.pixel(x, y), Some(BLUE));
        }
    }
}

#[test]
fn restore_fully_outside_is_noop() {
    let mut src = PixelSurface::new(2, 2).unwrap();
    src.fill_rect(src.bounds(), BLUE);
    let frame = src.capture(src.bounds()).unwrap();

    let mut dst = PixelSurface::new(2, 2).unwrap();
    dst.restore(&frame, 2, 0).unwrap();
    assert!(dst.is_blank());
}

#[test]
fn restore_onto_zero_sized_surface_is_noop() {
    let mut src = PixelSurface::new(2, 2).unwrap();
    src.set_pixel(1, 1, RED);
    let frame = src.capture(src.bounds()).unwrap();

    let mut dst = PixelSurface::default();
    assert!(dst.restore(&frame, 0, 0).is_ok());
}

#[test]
fn restore_rejects_mismatched_frame() {
    let frame = CapturedFrame { rect: Rect::new(0, 0, 2, 2), pixels: vec![0; 3] };
    let mut dst = PixelSurface::new(2, 2).unwrap();
    let err = dst.restore(&frame, 0, 0).unwrap_err();
    assert_eq!(err, SurfaceError::FrameLength { expected: 16, actual: 3 });
}
