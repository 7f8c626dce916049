use tracing::trace;

use crate::config::MaxRectsHeuristic;
use crate::error::{Result, SpritePackError};
use crate::model::{Placement, Rect};

/// Outcome of one successful packer run: a placement for every input size
/// (index-aligned) and the fraction of the bin the inputs cover.
#[derive(Debug, Clone)]
pub struct PackingRun {
    pub heuristic: MaxRectsHeuristic,
    pub placements: Vec<Placement>,
    pub occupancy: f64,
}

/// MaxRects free-list packer over a single fixed-size bin.
///
/// The free list holds every *maximal* free rectangle; entries may overlap
/// each other but never a placed rectangle, and no entry is contained in
/// another. Each placement splits the intersecting free rectangles into
/// full-span strips and prunes the list back to that invariant.
pub struct MaxRectsPacker {
    bin: Rect,
    free: Vec<Rect>,
    used: Vec<Rect>,
    heuristic: MaxRectsHeuristic,
    allow_rotation: bool,
}

/// Candidate ordering key. Lower is better; compared lexicographically:
/// the heuristic's score pair, then free-rect y, x, input index, and
/// normal orientation before rotated.
type CandidateKey = (i64, i64, u32, u32, usize, bool);

impl MaxRectsPacker {
    pub fn new(
        bin_width: u32,
        bin_height: u32,
        heuristic: MaxRectsHeuristic,
        allow_rotation: bool,
    ) -> Self {
        let bin = Rect::new(0, 0, bin_width, bin_height);
        Self {
            bin,
            free: vec![bin],
            used: Vec::new(),
            heuristic,
            allow_rotation,
        }
    }

    /// Maximal free rectangles currently tracked.
    pub fn free_rects(&self) -> &[Rect] {
        &self.free
    }

    /// Rectangles placed so far.
    pub fn used_rects(&self) -> &[Rect] {
        &self.used
    }

    /// Place every input size, choosing at each step the globally best
    /// (input, free rectangle, orientation) candidate under the configured
    /// heuristic. The returned vector is index-aligned with `sizes`.
    pub fn pack_all(&mut self, sizes: &[(u32, u32)]) -> Result<Vec<Placement>> {
        let mut placements: Vec<Option<Placement>> = vec![None; sizes.len()];
        let mut unplaced: Vec<usize> = (0..sizes.len()).collect();

        while !unplaced.is_empty() {
            let best = self.select(sizes, &unplaced);
            let (idx, placement) = match best {
                Some(choice) => choice,
                None => {
                    let index = unplaced[0];
                    let (width, height) = sizes[index];
                    return Err(SpritePackError::Unplaceable {
                        index,
                        width,
                        height,
                    });
                }
            };
            let (w, h) = sizes[idx];
            let node = placement.footprint(w, h);
            trace!(?node, idx, rotated = placement.rotated, "place");
            self.place_rect(&node);
            placements[idx] = Some(placement);
            unplaced.retain(|&i| i != idx);
        }

        Ok(placements.into_iter().map(Option::unwrap_or_default).collect())
    }

    /// Fraction of the bin covered by placed rectangles.
    pub fn occupancy(&self) -> f64 {
        let used: u64 = self.used.iter().map(Rect::area).sum();
        used as f64 / self.bin.area() as f64
    }

    /// Scan every unplaced input against every free rectangle in both
    /// orientations and return the candidate with the minimal key.
    fn select(&self, sizes: &[(u32, u32)], unplaced: &[usize]) -> Option<(usize, Placement)> {
        let mut best: Option<(CandidateKey, usize, Placement)> = None;
        for &idx in unplaced {
            let (w, h) = sizes[idx];
            for fr in &self.free {
                if fr.w >= w && fr.h >= h {
                    let key = self.candidate_key(fr, w, h, idx, false);
                    if best.as_ref().map_or(true, |(k, _, _)| key < *k) {
                        best = Some((
                            key,
                            idx,
                            Placement {
                                left: fr.x,
                                top: fr.y,
                                rotated: false,
                            },
                        ));
                    }
                }
                if self.allow_rotation && fr.w >= h && fr.h >= w {
                    let key = self.candidate_key(fr, h, w, idx, true);
                    if best.as_ref().map_or(true, |(k, _, _)| key < *k) {
                        best = Some((
                            key,
                            idx,
                            Placement {
                                left: fr.x,
                                top: fr.y,
                                rotated: true,
                            },
                        ));
                    }
                }
            }
        }
        best.map(|(_, idx, p)| (idx, p))
    }

    /// Score a fitting candidate. `w,h` are the oriented dimensions (already
    /// swapped when `rotated`).
    fn candidate_key(&self, fr: &Rect, w: u32, h: u32, idx: usize, rotated: bool) -> CandidateKey {
        let leftover_w = (fr.w - w) as i64;
        let leftover_h = (fr.h - h) as i64;
        let short_fit = leftover_w.min(leftover_h);
        let long_fit = leftover_w.max(leftover_h);
        let area_fit = fr.area() as i64 - (w as u64 * h as u64) as i64;
        let (s1, s2) = match self.heuristic {
            MaxRectsHeuristic::BestShortSideFit => (short_fit, long_fit),
            MaxRectsHeuristic::BestLongSideFit => (long_fit, short_fit),
            MaxRectsHeuristic::BestAreaFit => (area_fit, short_fit),
            MaxRectsHeuristic::BottomLeft => ((fr.y + h) as i64, fr.x as i64),
            MaxRectsHeuristic::ContactPoint => {
                // maximize contact: negate for minimization
                (-self.contact_point_score(fr.x, fr.y, w, h), area_fit)
            }
        };
        (s1, s2, fr.y, fr.x, idx, rotated)
    }

    /// Total length of the candidate's edges touching the bin border or a
    /// previously placed rectangle. Collinear contact counts as overlap
    /// length.
    fn contact_point_score(&self, x: u32, y: u32, w: u32, h: u32) -> i64 {
        let node = Rect::new(x, y, w, h);
        let mut score = 0i64;
        if node.x == self.bin.x {
            score += node.h as i64;
        }
        if node.y == self.bin.y {
            score += node.w as i64;
        }
        if node.right() == self.bin.right() {
            score += node.h as i64;
        }
        if node.bottom() == self.bin.bottom() {
            score += node.w as i64;
        }
        for u in &self.used {
            // vertical contact (left/right edges)
            if node.x == u.right() || u.x == node.right() {
                score += overlap_1d(node.y, node.bottom(), u.y, u.bottom()) as i64;
            }
            // horizontal contact (top/bottom edges)
            if node.y == u.bottom() || u.y == node.bottom() {
                score += overlap_1d(node.x, node.right(), u.x, u.right()) as i64;
            }
        }
        score
    }

    /// Guillotine-split-then-prune: every free rectangle intersecting
    /// `node` is replaced by its full-span strips, then the list is pruned
    /// back to maximality.
    fn place_rect(&mut self, node: &Rect) {
        let mut new_free: Vec<Rect> = Vec::new();
        let mut i = 0usize;
        while i < self.free.len() {
            let fr = self.free[i];
            if fr.intersects(node) {
                self.free.swap_remove(i);
                split_free_node(fr, node, &mut new_free);
            } else {
                i += 1;
            }
        }
        self.prune_new_vs_old(&mut new_free);
        prune_within(&mut new_free);
        self.free.extend(new_free);
        self.prune_free_list();
        self.used.push(*node);
    }

    fn prune_new_vs_old(&mut self, new_free: &mut Vec<Rect>) {
        // Remove any new rect fully contained in any existing free rect
        new_free.retain(|nr| nr.w > 0 && nr.h > 0 && !self.free.iter().any(|of| of.contains(nr)));
        // Remove any existing free rect fully contained in any remaining new rect
        let mut i = 0;
        while i < self.free.len() {
            if new_free.iter().any(|nr| nr.contains(&self.free[i])) {
                self.free.swap_remove(i);
            } else {
                i += 1;
            }
        }
    }

    /// Pairwise containment pass over the whole list, to a fixed point.
    fn prune_free_list(&mut self) {
        let mut i = 0;
        while i < self.free.len() {
            let a = self.free[i];
            let mut j = i + 1;
            let mut remove_i = false;
            while j < self.free.len() {
                let b = self.free[j];
                if b.contains(&a) {
                    remove_i = true;
                    break;
                }
                if a.contains(&b) {
                    self.free.remove(j);
                    continue;
                }
                j += 1;
            }
            if remove_i {
                self.free.remove(i);
            } else {
                i += 1;
            }
        }
    }
}

/// Split `fr` around `node` into up to four maximal strips: left and right
/// span the full height of `fr`; top and bottom span its full width. The
/// strips overlap at the corners, which is what keeps the set maximal.
fn split_free_node(fr: Rect, node: &Rect, out: &mut Vec<Rect>) {
    // Left
    if node.x > fr.x && node.x < fr.right() {
        out.push(Rect::new(fr.x, fr.y, node.x - fr.x, fr.h));
    }
    // Right
    if node.right() < fr.right() {
        out.push(Rect::new(node.right(), fr.y, fr.right() - node.right(), fr.h));
    }
    // Top
    if node.y > fr.y && node.y < fr.bottom() {
        out.push(Rect::new(fr.x, fr.y, fr.w, node.y - fr.y));
    }
    // Bottom
    if node.bottom() < fr.bottom() {
        out.push(Rect::new(fr.x, node.bottom(), fr.w, fr.bottom() - node.bottom()));
    }
}

fn prune_within(v: &mut Vec<Rect>) {
    let mut i = 0;
    while i < v.len() {
        let a = v[i];
        let mut remove_i = false;
        let mut j = 0;
        while j < v.len() {
            if i != j && v[j].contains(&a) {
                remove_i = true;
                break;
            }
            j += 1;
        }
        if remove_i {
            v.swap_remove(i);
        } else {
            i += 1;
        }
    }
}

fn overlap_1d(a1: u32, a2: u32, b1: u32, b2: u32) -> u32 {
    let start = a1.max(b1);
    let end = a2.min(b2);
    end.saturating_sub(start)
}

/// Run one heuristic over `sizes` in a fresh `bin_width x bin_height` bin.
pub fn pack(
    bin_width: u32,
    bin_height: u32,
    sizes: &[(u32, u32)],
    heuristic: MaxRectsHeuristic,
    allow_rotation: bool,
) -> Result<PackingRun> {
    let mut packer = MaxRectsPacker::new(bin_width, bin_height, heuristic, allow_rotation);
    let placements = packer.pack_all(sizes)?;
    Ok(PackingRun {
        heuristic,
        placements,
        occupancy: packer.occupancy(),
    })
}
