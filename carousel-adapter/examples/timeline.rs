// Example: a ticking carousel with alternating item widths and no spacing.
use carousel::{Carousel, CarouselOptions, ScrollOffset, Size};
use carousel_adapter::{Controller, Drift};

#[derive(Debug)]
struct Tile {
    label: String,
    width: f64,
}

fn main() {
    let c = Carousel::new(
        CarouselOptions::new_with_key((1..=5).collect::<Vec<i64>>(), |v: &i64| *v)
            .with_spacing(0.0),
        ScrollOffset::new(0.0),
    );
    let mut ctl = Controller::new(c, |i: &i64, batch| Tile {
        label: format!("{i} (batch {batch})"),
        width: if (i + batch) % 2 == 0 { 100.0 } else { 70.0 },
    });
    let measure = |t: &Tile| Size::new(t.width, 100.0);

    let viewport = 300.0;
    ctl.settle(viewport, measure, 64);
    ctl.start_drift(Drift::new(-40.0, 200));

    let mut now_ms = 0u64;
    for frame in 0..600u64 {
        now_ms += 16;
        let outcome = ctl.frame(now_ms, viewport, measure);
        if outcome.changed_window() || frame % 60 == 0 {
            let first = ctl.materialize().into_iter().next().map(|(t, _)| t.label);
            println!(
                "t={now_ms}ms {outcome:?} size={} offset={:.1} first={first:?}",
                ctl.carousel().size(),
                ctl.carousel().scroll_offset()
            );
        }
    }
}
