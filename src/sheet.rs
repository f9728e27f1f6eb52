/// Side of the platform's base graphic unit, in pixels.
pub const TILE_SIZE: usize = 8;

/// Geometry of a packed sprite-sheet, everything in tile units. One
/// animation occupies one row of frames; pixels are palette-indexed,
/// one byte each.
#[derive(Clone, Copy, Debug)]
pub struct SheetGeometry {
    pub width_tiles: usize,
    pub height_tiles: usize,
    pub frame_width_tiles: usize,
    pub frame_height_tiles: usize,
}

impl SheetGeometry {
    // Trailing tile columns that do not fill a whole frame are dropped.
    pub fn frames_per_row(&self) -> usize {
        self.width_tiles / self.frame_width_tiles
    }

    pub fn frame_width_px(&self) -> usize {
        self.frame_width_tiles * TILE_SIZE
    }

    pub fn frame_height_px(&self) -> usize {
        self.frame_height_tiles * TILE_SIZE
    }

    pub(crate) fn stride(&self) -> usize {
        self.width_tiles * TILE_SIZE
    }

    fn frame_x0(&self, column: usize) -> usize {
        column * self.frame_width_px()
    }

    fn frame_y0(&self, row: usize) -> usize {
        row * self.frame_height_px()
    }
}

/// Slices one animation row out of the sheet, left to right.
pub fn extract_frames(pixels: &[u8], geometry: &SheetGeometry, row: usize) -> Vec<Vec<u8>> {
    (0..geometry.frames_per_row())
        .map(|column| sub_image(pixels, geometry, column, row))
        .collect()
}

fn sub_image(pixels: &[u8], geometry: &SheetGeometry, column: usize, row: usize) -> Vec<u8> {
    let x0 = geometry.frame_x0(column);
    let y0 = geometry.frame_y0(row);
    let width = geometry.frame_width_px();
    let stride = geometry.stride();

    let mut out = Vec::with_capacity(width * geometry.frame_height_px());

    for y in y0..y0 + geometry.frame_height_px() {
        let offset = y * stride + x0;
        out.extend_from_slice(&pixels[offset..offset + width]);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn extracts_floor_of_width_ratio() {
        let geometry = SheetGeometry {
            width_tiles: 17,
            height_tiles: 1,
            frame_width_tiles: 5,
            frame_height_tiles: 1,
        };

        let pixels = vec![0; geometry.stride() * geometry.frame_height_px()];
        let frames = extract_frames(&pixels, &geometry, 0);

        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0].len(), 5 * 8 * 8);
    }

    #[test]
    fn copies_the_right_sub_rectangle() {
        let geometry = SheetGeometry {
            width_tiles: 2,
            height_tiles: 2,
            frame_width_tiles: 1,
            frame_height_tiles: 1,
        };

        // Each frame cell filled with its own marker value.
        let mut pixels = vec![0u8; 16 * 16];

        for y in 0..16 {
            for x in 0..16 {
                let marker = ((y / 8) * 2 + x / 8) as u8 + 1;
                pixels[y * 16 + x] = marker;
            }
        }

        let top = extract_frames(&pixels, &geometry, 0);
        let bottom = extract_frames(&pixels, &geometry, 1);

        assert_eq!(top.len(), 2);
        assert!(top[0].iter().all(|&p| p == 1));
        assert!(top[1].iter().all(|&p| p == 2));
        assert!(bottom[0].iter().all(|&p| p == 3));
        assert!(bottom[1].iter().all(|&p| p == 4));
    }

    #[test]
    fn remainder_columns_never_leak_into_a_frame() {
        let geometry = SheetGeometry {
            width_tiles: 3,
            height_tiles: 1,
            frame_width_tiles: 2,
            frame_height_tiles: 1,
        };

        // Remainder column carries a marker that must not show up.
        let mut pixels = vec![0u8; geometry.stride() * 8];

        for y in 0..8 {
            for x in 16..24 {
                pixels[y * geometry.stride() + x] = 0xEE;
            }
        }

        let frames = extract_frames(&pixels, &geometry, 0);

        assert_eq!(frames.len(), 1);
        assert!(frames[0].iter().all(|&p| p != 0xEE));
    }
}
