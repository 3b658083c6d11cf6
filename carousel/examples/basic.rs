// Example: grow the window, then scroll the first item out and watch it get trimmed.
use carousel::{Carousel, CarouselOptions, ScrollOffset, Size};

fn pass(c: &mut Carousel<&'static str, &'static str>, viewport: f64) {
    let measurements: Vec<_> = c
        .materialize()
        .into_iter()
        .map(|item| (item.identity, Size::new(100.0, 100.0)))
        .collect();
    let total = 100.0 * measurements.len() as f64 + 10.0 * (measurements.len() - 1) as f64;
    let outcome = c.on_layout_pass(total, viewport, measurements);
    let labels: Vec<_> = c
        .identities()
        .into_iter()
        .map(|id| format!("{}{}", id.key, id.batch))
        .collect();
    println!(
        "{outcome:?}: size={} base={} offset={} row={labels:?}",
        c.size(),
        c.base_offset(),
        c.scroll_offset()
    );
}

fn main() {
    let offset = ScrollOffset::default();
    let mut c = Carousel::new(
        CarouselOptions::new(["A", "B", "C"])
            .with_spacing(10.0)
            .with_max_offset_abs_delta(50.0)
            .with_safety_padding(0.0),
        offset.clone(),
    );

    for _ in 0..4 {
        pass(&mut c, 320.0);
    }

    // The animation driver owns the offset.
    offset.set(-151.0);
    for _ in 0..3 {
        pass(&mut c, 320.0);
    }
}
