use rand::{Rng, SeedableRng};
use spritepack_core::config::MaxRectsHeuristic;
use spritepack_core::model::{Placement, Rect};
use spritepack_core::packer::MaxRectsPacker;

const BIN_W: u32 = 128;
const BIN_H: u32 = 128;

fn random_sizes(seed: u64, count: usize) -> Vec<(u32, u32)> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| (rng.gen_range(4..=12), rng.gen_range(4..=12)))
        .collect()
}

fn footprints(sizes: &[(u32, u32)], placements: &[Placement]) -> Vec<Rect> {
    sizes
        .iter()
        .zip(placements)
        .map(|(&(w, h), p)| p.footprint(w, h))
        .collect()
}

/// Placed rectangles are disjoint, and together with the final free list
/// they cover every bin cell; free rectangles never overlap a placement.
fn check_coverage(placed: &[Rect], free: &[Rect]) {
    let mut owner = vec![0u8; (BIN_W * BIN_H) as usize];
    for r in placed {
        for y in r.y..r.bottom() {
            for x in r.x..r.right() {
                let cell = &mut owner[(y * BIN_W + x) as usize];
                assert_eq!(*cell, 0, "placements overlap at ({x},{y})");
                *cell = 1;
            }
        }
    }
    for r in free {
        for y in r.y..r.bottom() {
            for x in r.x..r.right() {
                let cell = &mut owner[(y * BIN_W + x) as usize];
                assert_ne!(*cell, 1, "free rect overlaps a placement at ({x},{y})");
                *cell = 2;
            }
        }
    }
    assert!(
        owner.iter().all(|&c| c != 0),
        "bin has cells covered by neither a placement nor a free rect"
    );
}

fn check_maximality(free: &[Rect]) {
    for i in 0..free.len() {
        for j in 0..free.len() {
            if i != j {
                assert!(
                    !free[j].contains(&free[i]),
                    "free rect {:?} is contained in {:?}",
                    free[i],
                    free[j]
                );
            }
        }
    }
}

#[test]
fn invariants_hold_for_every_heuristic() {
    let sizes = random_sizes(7, 20);
    for heuristic in MaxRectsHeuristic::PORTFOLIO {
        for allow_rotation in [false, true] {
            let mut packer = MaxRectsPacker::new(BIN_W, BIN_H, heuristic, allow_rotation);
            let placements = packer
                .pack_all(&sizes)
                .expect("small random set must pack");

            let placed = footprints(&sizes, &placements);
            // containment
            for fp in &placed {
                assert!(fp.right() <= BIN_W && fp.bottom() <= BIN_H);
            }
            // rotation flag only appears when allowed
            if !allow_rotation {
                assert!(placements.iter().all(|p| !p.rotated));
            }
            check_coverage(&placed, packer.free_rects());
            check_maximality(packer.free_rects());

            // occupancy equals the summed input area over the bin area
            let used: u64 = sizes.iter().map(|&(w, h)| w as u64 * h as u64).sum();
            let expected = used as f64 / (BIN_W as u64 * BIN_H as u64) as f64;
            assert!((packer.occupancy() - expected).abs() < 1e-12);
        }
    }
}

#[test]
fn maximality_holds_at_every_step() {
    let sizes = random_sizes(11, 16);
    let mut packer = MaxRectsPacker::new(
        BIN_W,
        BIN_H,
        MaxRectsHeuristic::BestShortSideFit,
        true,
    );
    // feed inputs one at a time so the free list is inspected mid-run
    for &size in &sizes {
        packer.pack_all(&[size]).expect("single size must fit");
        check_maximality(packer.free_rects());
        for fr in packer.free_rects() {
            assert!(fr.w > 0 && fr.h > 0);
            assert!(fr.right() <= BIN_W && fr.bottom() <= BIN_H);
            for used in packer.used_rects() {
                assert!(!fr.intersects(used), "free rect overlaps a placement");
            }
        }
    }
}
