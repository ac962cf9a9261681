//! Stage-level regression test
//!
//! Runs the segmentation stages directly on the two-grain scene and checks
//! the geometry the end-to-end numbers rest on: the channel becomes one
//! crystal region, the slabs become two grains, their influence zones
//! overlap in the channel, and the channel region is classified bridging.
//!
//! Run with:
//! ```
//! cargo test -p sembridge-analysis --test stages_reg
//! ```

use sembridge_analysis::{
    AnalysisConfig, bridging_labels, classify_habits, contact_band, segment_crystals,
    segment_grains,
};
use sembridge_region::measure_regions;
use sembridge_test::{RegParams, synthetic};

#[test]
fn stages_reg() {
    let mut rp = RegParams::new("stages");
    let cfg = AnalysisConfig::default();

    let png = synthetic::to_png(&synthetic::two_grain_scene());
    let field = sembridge_io::decode_gray(&png).unwrap();

    let crystals = segment_crystals(&field, &cfg.crystals).unwrap();
    rp.check("segmentation valid", crystals.segmentation_ok);
    rp.compare_values(
        crystals.count as f64,
        crystals.labels.max_label() as f64,
        0.0,
    );

    // the channel is foreground and one region end to end
    let (px, py) = synthetic::channel_probe();
    let channel_label = crystals.labels.get(px, py);
    rp.check("channel segmented", channel_label != 0);
    rp.check(
        "channel spans the image",
        crystals.labels.get(px, 10) == channel_label
            && crystals.labels.get(px, 245) == channel_label,
    );

    let grains = segment_grains(&crystals.mask, &cfg.grains).unwrap();
    rp.compare_values(2.0, grains.count as f64, 0.0);
    rp.check("left slab is grain 1", grains.labels.get(30, 80) == 1);
    rp.check("right slab is grain 2", grains.labels.get(220, 80) == 2);

    let band = contact_band(&grains.labels, cfg.bridging.influence_radius).unwrap();
    rp.check("band non-empty", band.count() > 0);
    rp.check(
        "band confined to channel columns",
        band.iter_set().all(|(x, _)| crystals.mask.get(x, py)),
    );

    let regions = measure_regions(&crystals.labels);
    let bridging =
        bridging_labels(&regions, &grains.labels, &band, cfg.bridging.touch_radius).unwrap();
    rp.check("channel bridges", bridging.contains(&channel_label));
    rp.check("specks do not bridge", bridging.len() == 1);

    // the channel is an elongated solid region: needle habit
    let habits = classify_habits(&regions, &cfg.habits);
    let channel_habit = habits.iter().find(|h| h.label == channel_label).unwrap();
    rp.check(
        "channel is needle-like",
        channel_habit.habit == sembridge_analysis::Habit::NeedleLike,
    );

    assert!(rp.cleanup());
}

#[test]
fn label_permutation_reg() {
    // aggregate metrics must not depend on which positive integer a
    // region carries; permute the labeling and compare descriptors
    let mut rp = RegParams::new("label_permutation");
    let cfg = AnalysisConfig::default();

    let png = synthetic::to_png(&synthetic::two_grain_scene());
    let field = sembridge_io::decode_gray(&png).unwrap();
    let crystals = segment_crystals(&field, &cfg.crystals).unwrap();

    // swap labels 1 and 2
    let max = crystals.labels.max_label();
    rp.check("at least two regions", max >= 2);
    let permuted: Vec<u32> = crystals
        .labels
        .data()
        .iter()
        .map(|&l| match l {
            1 => 2,
            2 => 1,
            other => other,
        })
        .collect();
    let permuted = sembridge_core::LabelMap::from_data(
        crystals.labels.width(),
        crystals.labels.height(),
        permuted,
    )
    .unwrap();

    let mut areas_a: Vec<u32> = measure_regions(&crystals.labels)
        .iter()
        .map(|r| r.area)
        .collect();
    let mut areas_b: Vec<u32> = measure_regions(&permuted).iter().map(|r| r.area).collect();
    areas_a.sort_unstable();
    areas_b.sort_unstable();
    rp.check("area multiset invariant", areas_a == areas_b);

    let habits_a = classify_habits(&measure_regions(&crystals.labels), &cfg.habits);
    let habits_b = classify_habits(&measure_regions(&permuted), &cfg.habits);
    let count = |records: &[sembridge_analysis::HabitRecord],
                 habit: sembridge_analysis::Habit| {
        records.iter().filter(|r| r.habit == habit).count()
    };
    for habit in [
        sembridge_analysis::Habit::NeedleLike,
        sembridge_analysis::Habit::Spherical,
        sembridge_analysis::Habit::Blocky,
        sembridge_analysis::Habit::Other,
    ] {
        rp.compare_values(
            count(&habits_a, habit) as f64,
            count(&habits_b, habit) as f64,
            0.0,
        );
    }

    assert!(rp.cleanup());
}
