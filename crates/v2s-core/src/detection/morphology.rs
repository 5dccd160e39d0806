use ndarray::Array2;

/// Morphological opening (erosion then dilation) with a square kernel of the
/// given radius. Strips thin UI strokes and text while keeping solid blobs.
pub fn opening(mask: &Array2<bool>, radius: usize) -> Array2<bool> {
    if radius == 0 {
        return mask.clone();
    }
    let eroded = sweep(mask, radius, true);
    sweep(&eroded, radius, false)
}

/// One square-kernel pass. `erode` requires every neighbour set (pixels
/// outside the frame count as unset); otherwise any set neighbour suffices.
fn sweep(mask: &Array2<bool>, radius: usize, erode: bool) -> Array2<bool> {
    let (h, w) = mask.dim();
    let mut out = Array2::from_elem((h, w), false);

    for row in 0..h {
        for col in 0..w {
            if erode && !mask[[row, col]] {
                continue;
            }
            let inside = row >= radius && col >= radius && row + radius < h && col + radius < w;
            if erode && !inside {
                continue;
            }
            let r0 = row.saturating_sub(radius);
            let r1 = (row + radius).min(h - 1);
            let c0 = col.saturating_sub(radius);
            let c1 = (col + radius).min(w - 1);

            let mut neighbours = (r0..=r1).flat_map(|r| (c0..=c1).map(move |c| (r, c)));
            out[[row, col]] = if erode {
                neighbours.all(|(r, c)| mask[[r, c]])
            } else {
                neighbours.any(|(r, c)| mask[[r, c]])
            };
        }
    }

    out
}
