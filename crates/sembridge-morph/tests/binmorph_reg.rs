//! Binary morphology regression test
//!
//! Checks the algebraic properties the segmenters rely on: dilation is
//! extensive, erosion anti-extensive, opening and closing idempotent, and
//! disk/square SELs have the expected support.
//!
//! Run with:
//! ```
//! cargo test -p sembridge-morph --test binmorph_reg
//! ```

use sembridge_core::BitMask;
use sembridge_morph::{Sel, close, dilate, erode, inner_boundary, open};
use sembridge_test::RegParams;

/// Blob-and-speckle mask exercising all operations.
fn test_mask() -> BitMask {
    let mut mask = BitMask::new(64, 64).unwrap();
    // one solid blob
    for y in 10..30 {
        for x in 10..34 {
            mask.set(x, y, true).unwrap();
        }
    }
    // a thin diagonal tail
    for i in 0..12 {
        mask.set(34 + i, 29 + i, true).unwrap();
    }
    // isolated speckles, kept clear of the border by the largest SEL
    for &(x, y) in &[(50u32, 10u32), (55, 12), (58, 50)] {
        mask.set(x, y, true).unwrap();
    }
    mask
}

#[test]
fn binmorph_reg() {
    let mut rp = RegParams::new("binmorph");

    let mask = test_mask();
    let orig_count = mask.count();
    eprintln!("Original foreground pixels: {}", orig_count);

    for radius in [1u32, 2, 4] {
        let sel = Sel::disk(radius).unwrap();

        let dilated = dilate(&mask, &sel).unwrap();
        rp.check(
            "dilation is extensive",
            dilated.count() >= orig_count
                && mask.iter_set().all(|(x, y)| dilated.get(x, y)),
        );

        let eroded = erode(&mask, &sel).unwrap();
        rp.check(
            "erosion is anti-extensive",
            eroded.count() <= orig_count
                && eroded.iter_set().all(|(x, y)| mask.get(x, y)),
        );

        let opened = open(&mask, &sel).unwrap();
        rp.check("opening removes, never adds", opened.count() <= orig_count);
        rp.check(
            "opening is idempotent",
            opened == open(&opened, &sel).unwrap(),
        );

        let closed = close(&mask, &sel).unwrap();
        rp.check("closing adds, never removes", closed.count() >= orig_count);
        rp.check(
            "closing is idempotent",
            closed == close(&closed, &sel).unwrap(),
        );
    }

    // opening with disk(1) drops the isolated speckles
    let opened = open(&mask, &Sel::disk(1).unwrap()).unwrap();
    rp.check("speckles opened away", !opened.get(50, 10) && !opened.get(58, 50));
    rp.check("blob interior survives", opened.get(20, 20));

    assert!(rp.cleanup());
}

#[test]
fn sel_support_reg() {
    let mut rp = RegParams::new("sel_support");

    // disk support grows like the discrete disk area
    for (radius, expected) in [(0u32, 1usize), (1, 5), (2, 13), (4, 49)] {
        let sel = Sel::disk(radius).unwrap();
        rp.compare_values(expected as f64, sel.element_count() as f64, 0.0);
        rp.compare_values((2 * radius + 1) as f64, sel.width() as f64, 0.0);
    }

    for size in [3u32, 5, 7] {
        let sel = Sel::square(size).unwrap();
        rp.compare_values((size * size) as f64, sel.element_count() as f64, 0.0);
    }

    assert!(rp.cleanup());
}

#[test]
fn boundary_reg() {
    let mut rp = RegParams::new("boundary");

    let mut mask = BitMask::new(32, 32).unwrap();
    for y in 8..24 {
        for x in 8..24 {
            mask.set(x, y, true).unwrap();
        }
    }

    let boundary = inner_boundary(&mask).unwrap();
    // 16x16 block: one-pixel ring of 60 pixels
    rp.compare_values(60.0, boundary.count() as f64, 0.0);
    rp.check("ring excludes interior", !boundary.get(16, 16));
    rp.check("ring includes corner", boundary.get(8, 8));
    rp.check(
        "boundary is a subset",
        boundary.iter_set().all(|(x, y)| mask.get(x, y)),
    );

    assert!(rp.cleanup());
}
