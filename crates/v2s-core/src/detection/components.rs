use std::collections::BTreeMap;

use ndarray::Array2;

use super::types::BoundingBox;

/// A connected foreground region of a binary mask.
#[derive(Clone, Debug, PartialEq)]
pub struct Blob {
    /// Number of pixels in the region.
    pub area: usize,
    pub bbox: BoundingBox,
}

impl Blob {
    /// Region area divided by bounding box area.
    pub fn fill_ratio(&self) -> f64 {
        let box_area = self.bbox.width as f64 * self.bbox.height as f64;
        if box_area == 0.0 {
            0.0
        } else {
            self.area as f64 / box_area
        }
    }

    /// Long side over short side of the bounding box (>= 1.0).
    pub fn aspect_ratio(&self) -> f64 {
        let long = self.bbox.width.max(self.bbox.height) as f64;
        let short = self.bbox.width.min(self.bbox.height).max(1) as f64;
        long / short
    }
}

/// Label 4-connected regions with two-pass union-find.
///
/// Blobs are returned in reading order of their bounding boxes: top to
/// bottom, then left to right.
pub fn find_blobs(mask: &Array2<bool>) -> Vec<Blob> {
    let (h, w) = mask.dim();
    if h == 0 || w == 0 {
        return Vec::new();
    }

    let mut labels = Array2::<u32>::zeros((h, w));
    // Index 0 is background.
    let mut parent: Vec<u32> = vec![0];

    for row in 0..h {
        for col in 0..w {
            if !mask[[row, col]] {
                continue;
            }
            let up = if row > 0 { labels[[row - 1, col]] } else { 0 };
            let left = if col > 0 { labels[[row, col - 1]] } else { 0 };

            labels[[row, col]] = match (up, left) {
                (0, 0) => {
                    let next = parent.len() as u32;
                    parent.push(next);
                    next
                }
                (l, 0) | (0, l) => l,
                (a, b) => {
                    union(&mut parent, a, b);
                    a.min(b)
                }
            };
        }
    }

    // Keyed by root label so iteration order is deterministic.
    let mut blobs = BTreeMap::<u32, (usize, [usize; 4])>::new();
    for row in 0..h {
        for col in 0..w {
            let label = labels[[row, col]];
            if label == 0 {
                continue;
            }
            let root = find(&parent, label);
            let entry = blobs.entry(root).or_insert((0, [row, row, col, col]));
            entry.0 += 1;
            let b = &mut entry.1;
            b[0] = b[0].min(row);
            b[1] = b[1].max(row);
            b[2] = b[2].min(col);
            b[3] = b[3].max(col);
        }
    }

    let mut out: Vec<Blob> = blobs
        .into_values()
        .map(|(area, [min_row, max_row, min_col, max_col])| Blob {
            area,
            bbox: BoundingBox::new(
                min_col as u32,
                min_row as u32,
                (max_col - min_col + 1) as u32,
                (max_row - min_row + 1) as u32,
            ),
        })
        .collect();
    out.sort_by_key(|b| (b.bbox.y, b.bbox.x));
    out
}

fn find(parent: &[u32], mut x: u32) -> u32 {
    while parent[x as usize] != x {
        x = parent[x as usize];
    }
    x
}

fn union(parent: &mut [u32], a: u32, b: u32) {
    let ra = find(parent, a);
    let rb = find(parent, b);
    if ra != rb {
        let (small, big) = if ra < rb { (ra, rb) } else { (rb, ra) };
        parent[big as usize] = small;
    }
}
