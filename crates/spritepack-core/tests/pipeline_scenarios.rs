use image::{Rgba, RgbaImage};
use spritepack_core::error::SpritePackError;
use spritepack_core::pipeline::{pack_sprites, InputSprite};
use spritepack_core::PackerConfig;

fn transparent(w: u32, h: u32) -> RgbaImage {
    RgbaImage::from_pixel(w, h, Rgba([0, 0, 0, 0]))
}

fn sprite(name: &str, image: RgbaImage) -> InputSprite {
    InputSprite {
        name: name.into(),
        image,
    }
}

#[test]
fn trimmed_sprite_lands_with_metadata() {
    // 8x8 canvas with an opaque 4x4 block at (2,1)
    let mut img = transparent(8, 8);
    for y in 1..5 {
        for x in 2..6 {
            img.put_pixel(x, y, Rgba([200, 100, 50, 255]));
        }
    }
    let cfg = PackerConfig::builder().with_bin_dimensions(16, 16).build();
    let out = pack_sprites(vec![sprite("block", img)], &cfg).expect("pack");

    let s = &out.layout.sprites[0];
    assert_eq!(s.name, "block");
    assert_eq!((s.width, s.height), (4, 4));
    assert_eq!((s.trim.offset_left, s.trim.offset_top), (2, 1));
    assert_eq!((s.trim.origin_width, s.trim.origin_height), (8, 8));
    assert_eq!((s.placement.left, s.placement.top), (0, 0));
    assert!((out.layout.occupancy - 16.0 / 256.0).abs() < 1e-12);

    // the trimmed block was composited at the placement
    for y in 0..4 {
        for x in 0..4 {
            assert_eq!(*out.atlas.get_pixel(x, y), Rgba([200, 100, 50, 255]));
        }
    }
    // the rest of the bin is untouched
    assert_eq!(*out.atlas.get_pixel(5, 5), Rgba([0, 0, 0, 0]));
}

#[test]
fn rotated_sprite_is_composited_clockwise() {
    // a 1x4 column can only fit a 4x1 bin when rotated
    let mut img = transparent(1, 4);
    for y in 0..4 {
        img.put_pixel(0, y, Rgba([y as u8 + 1, 0, 0, 255]));
    }
    let cfg = PackerConfig::builder()
        .with_bin_dimensions(4, 1)
        .allow_rotation(true)
        .build();
    let out = pack_sprites(vec![sprite("column", img)], &cfg).expect("pack");

    let p = out.layout.sprites[0].placement;
    assert!(p.rotated);
    assert_eq!((p.left, p.top), (0, 0));
    // clockwise rotation: the column reads bottom-to-top across the row
    for x in 0..4 {
        assert_eq!(*out.atlas.get_pixel(x, 0), Rgba([4 - x as u8, 0, 0, 255]));
    }
}

#[test]
fn border_overwrites_the_outer_ring() {
    let img = RgbaImage::from_pixel(3, 3, Rgba([0, 0, 255, 255]));
    let cfg = PackerConfig::builder()
        .with_bin_dimensions(8, 8)
        .border(true)
        .build();
    let out = pack_sprites(vec![sprite("bordered", img)], &cfg).expect("pack");

    let red = Rgba([255, 0, 0, 255]);
    assert_eq!(*out.atlas.get_pixel(0, 0), red);
    assert_eq!(*out.atlas.get_pixel(2, 0), red);
    assert_eq!(*out.atlas.get_pixel(0, 2), red);
    assert_eq!(*out.atlas.get_pixel(2, 2), red);
    // the single interior pixel keeps its color
    assert_eq!(*out.atlas.get_pixel(1, 1), Rgba([0, 0, 255, 255]));
    // border never grows the sprite
    assert_eq!(*out.atlas.get_pixel(3, 3), Rgba([0, 0, 0, 0]));
}

#[test]
fn fully_transparent_sprite_is_fatal() {
    let cfg = PackerConfig::default();
    let err = pack_sprites(vec![sprite("ghost", transparent(8, 8))], &cfg).unwrap_err();
    assert!(matches!(err, SpritePackError::FullyTransparent { .. }));
}

#[test]
fn oversize_sprite_fails_the_invocation() {
    let img = RgbaImage::from_pixel(5, 1, Rgba([255, 255, 255, 255]));
    let cfg = PackerConfig::builder()
        .with_bin_dimensions(4, 4)
        .allow_rotation(false)
        .build();
    let err = pack_sprites(vec![sprite("wide", img)], &cfg).unwrap_err();
    assert!(matches!(err, SpritePackError::PackingFailed));
}

#[test]
fn empty_input_is_rejected() {
    let cfg = PackerConfig::default();
    let err = pack_sprites(Vec::new(), &cfg).unwrap_err();
    assert!(matches!(err, SpritePackError::Empty));
}

#[test]
fn zero_bin_dimensions_are_rejected() {
    let img = RgbaImage::from_pixel(1, 1, Rgba([255, 255, 255, 255]));
    let cfg = PackerConfig::builder().with_bin_dimensions(0, 64).build();
    let err = pack_sprites(vec![sprite("dot", img)], &cfg).unwrap_err();
    assert!(matches!(err, SpritePackError::InvalidDimensions { .. }));
}

#[test]
fn repeated_runs_yield_identical_atlases() {
    let build_inputs = || {
        let mut inputs = Vec::new();
        for i in 0..6u32 {
            let w = 3 + i % 4;
            let h = 2 + (i * 7) % 5;
            let img = RgbaImage::from_pixel(w, h, Rgba([i as u8 * 40, 255 - i as u8 * 30, i as u8, 255]));
            inputs.push(sprite(&format!("s{i}"), img));
        }
        inputs
    };
    let cfg = PackerConfig::builder().with_bin_dimensions(32, 32).build();

    let a = pack_sprites(build_inputs(), &cfg).expect("pack");
    let b = pack_sprites(build_inputs(), &cfg).expect("pack");

    assert_eq!(a.atlas.as_raw(), b.atlas.as_raw());
    assert_eq!(a.layout.occupancy, b.layout.occupancy);
    for (sa, sb) in a.layout.sprites.iter().zip(b.layout.sprites.iter()) {
        assert_eq!(sa.placement, sb.placement);
        assert_eq!((sa.width, sa.height), (sb.width, sb.height));
    }
}

#[test]
fn sprites_never_overlap_in_the_atlas() {
    let mut inputs = Vec::new();
    for i in 0..8u32 {
        let w = 4 + i % 5;
        let h = 4 + (i * 3) % 5;
        inputs.push(sprite(
            &format!("s{i}"),
            RgbaImage::from_pixel(w, h, Rgba([255, 255, 255, 255])),
        ));
    }
    let cfg = PackerConfig::builder().with_bin_dimensions(64, 64).build();
    let out = pack_sprites(inputs, &cfg).expect("pack");

    let fps: Vec<_> = out.layout.sprites.iter().map(|s| s.footprint()).collect();
    for i in 0..fps.len() {
        assert!(fps[i].right() <= 64 && fps[i].bottom() <= 64);
        for j in (i + 1)..fps.len() {
            assert!(!fps[i].intersects(&fps[j]));
        }
    }
}
