// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Remove one vertical seam from an image, in place.

use crate::error::CarveError;
use crate::pixelbuffer::{PixelBuffer, CHANNELS};

/// Slide every pixel to the right of the seam one place left, row by
/// row, over the seam pixel.  The last pixel of each row goes stale
/// and the logical width drops by one.  The seam is checked against
/// the image before anything moves.
pub fn remove_vertical_seam(image: &mut PixelBuffer, seam: &[u32]) -> Result<(), CarveError> {
    let (width, height) = image.dimensions();
    if width <= 1 {
        return Err(CarveError::ImageTooSmall { width, height });
    }
    if seam.len() != height as usize {
        return Err(CarveError::SeamLength {
            expected: height as usize,
            actual: seam.len(),
        });
    }
    if let Some((row, &column)) = seam.iter().enumerate().find(|(_, x)| **x >= width) {
        return Err(CarveError::InvalidSeam { row, column, width });
    }

    for (y, &x) in seam.iter().enumerate() {
        let at = x as usize * CHANNELS;
        image.row_mut(y as u32).copy_within(at + CHANNELS.., at);
    }
    image.shrink_width(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    // A 4x3 image, stride 5 pixels, each pixel tagged with its own
    // coordinates: (x, y, 0, 255).  Padding is 0xEE.
    fn tagged_image() -> PixelBuffer {
        let mut raw = Vec::new();
        for y in 0..3u8 {
            for x in 0..4u8 {
                raw.extend_from_slice(&[x, y, 0, 255]);
            }
            raw.extend_from_slice(&[0xEE; 4]);
        }
        PixelBuffer::new(raw, 20, 4, 3).unwrap()
    }

    fn columns(image: &PixelBuffer, y: u32) -> Vec<u8> {
        image.row(y).chunks(CHANNELS).map(|p| p[0]).collect()
    }

    #[test]
    fn removes_one_pixel_per_row() {
        let mut image = tagged_image();
        remove_vertical_seam(&mut image, &[1, 2, 3]).unwrap();
        assert_eq!(image.dimensions(), (3, 3));
        assert_eq!(image.stride(), 20);
        assert_eq!(columns(&image, 0), vec![0, 2, 3]);
        assert_eq!(columns(&image, 1), vec![0, 1, 3]);
        assert_eq!(columns(&image, 2), vec![0, 1, 2]);
        // Row data never spills into the stride padding.
        assert_eq!(&image.as_raw()[16..20], &[0xEE; 4]);
    }

    #[test]
    fn carves_down_to_a_single_column() {
        let mut image = tagged_image();
        for _ in 0..3 {
            remove_vertical_seam(&mut image, &[0, 0, 0]).unwrap();
        }
        assert_eq!(image.dimensions(), (1, 3));
        assert_eq!(columns(&image, 1), vec![3]);
        assert!(matches!(
            remove_vertical_seam(&mut image, &[0, 0, 0]),
            Err(CarveError::ImageTooSmall { width: 1, height: 3 })
        ));
    }

    #[test]
    fn rejects_seams_that_do_not_fit() {
        let mut image = tagged_image();
        assert!(matches!(
            remove_vertical_seam(&mut image, &[0, 0]),
            Err(CarveError::SeamLength { expected: 3, actual: 2 })
        ));
        assert!(matches!(
            remove_vertical_seam(&mut image, &[0, 4, 0]),
            Err(CarveError::InvalidSeam { row: 1, column: 4, width: 4 })
        ));
        assert_eq!(image.width(), 4);
        assert_eq!(columns(&image, 1), vec![0, 1, 2, 3]);
    }
}
