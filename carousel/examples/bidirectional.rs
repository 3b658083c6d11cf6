// Example: one carousel whose direction follows the sign of the offset.
use carousel::{Carousel, CarouselOptions, DirectionMode, ScrollDirection, ScrollOffset, Size};

fn main() {
    let offset = ScrollOffset::default();
    let mut c = Carousel::new(
        CarouselOptions::new_with_key((1..=5).collect::<Vec<u32>>(), |v: &u32| *v)
            .with_spacing(0.0)
            .with_direction(DirectionMode::Bidirectional {
                initial: ScrollDirection::Trailing,
            }),
        offset.clone(),
    );

    let width = |v: u32, batch: i64| if (v as i64 + batch) % 2 == 0 { 100.0 } else { 70.0 };
    let viewport = 400.0;

    for (step, delta) in [(0, 0.0), (40, 40.0), (40, -40.0)] {
        for _ in 0..step.max(10) {
            offset.add(delta);
            let measurements: Vec<_> = c
                .materialize()
                .into_iter()
                .map(|item| {
                    let w = width(*item.element, item.identity.batch);
                    (item.identity, Size::new(w, 100.0))
                })
                .collect();
            let total: f64 = measurements.iter().map(|(_, s)| s.width).sum();
            c.on_layout_pass(total, viewport, measurements);
        }
        let row: Vec<_> = c
            .identities()
            .into_iter()
            .map(|id| format!("{}/{}", id.key, id.batch))
            .collect();
        println!(
            "direction={:?} offset={:.1} base={} row={row:?}",
            c.direction(),
            c.scroll_offset(),
            c.base_offset()
        );
    }
}
