use rand::{Rng, SeedableRng};
use spritepack_core::config::MaxRectsHeuristic;
use spritepack_core::packer::maxrects;

#[test]
fn identical_inputs_produce_identical_placements() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(42);
    let sizes: Vec<(u32, u32)> = (0..60)
        .map(|_| (rng.gen_range(4..=24), rng.gen_range(4..=24)))
        .collect();

    for heuristic in MaxRectsHeuristic::PORTFOLIO {
        for allow_rotation in [false, true] {
            let a = maxrects::pack(512, 512, &sizes, heuristic, allow_rotation)
                .expect("set fits a 512 bin");
            let b = maxrects::pack(512, 512, &sizes, heuristic, allow_rotation)
                .expect("set fits a 512 bin");

            assert_eq!(a.placements.len(), b.placements.len());
            for (pa, pb) in a.placements.iter().zip(b.placements.iter()) {
                assert_eq!(pa, pb);
            }
            assert_eq!(a.occupancy, b.occupancy);
        }
    }
}
