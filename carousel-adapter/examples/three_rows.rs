// Example: three image rows drifting in alternating directions off one shared clock.
use carousel::{Carousel, CarouselOptions, DirectionMode, ScrollDirection, ScrollOffset, Size};
use carousel_adapter::{Controller, Drift};

fn row(
    color: &str,
    direction: ScrollDirection,
) -> Controller<String, String, (String, f64)> {
    let mut urls: Vec<String> = (1..=3)
        .map(|i| format!("https://dummyimage.com/200x100/{color}/0011ff.png&text={i}"))
        .collect();
    if direction == ScrollDirection::Trailing {
        urls.reverse();
    }
    let c = Carousel::new(
        CarouselOptions::new(urls).with_direction(DirectionMode::Fixed(direction)),
        ScrollOffset::default(),
    );
    let mut ctl = Controller::new(c, |url: &String, _| (url.clone(), 200.0));
    ctl.start_drift(Drift::toward(direction, 10.0, 200));
    ctl
}

fn main() {
    let viewport = 800.0;
    let measure = |(_, w): &(String, f64)| Size::new(*w, 100.0);
    let mut rows = [
        row("c99e1e", ScrollDirection::Trailing),
        row("86c71e", ScrollDirection::Leading),
        row("5b9bc2", ScrollDirection::Trailing),
    ];

    for frame in 0..1200u64 {
        let now_ms = frame * 16;
        for ctl in rows.iter_mut() {
            ctl.frame(now_ms, viewport, measure);
        }
        if frame % 120 == 0 {
            for (i, ctl) in rows.iter().enumerate() {
                let c = ctl.carousel();
                println!(
                    "t={now_ms}ms row{i}: size={} base={} offset={:.1}",
                    c.size(),
                    c.base_offset(),
                    c.scroll_offset()
                );
            }
        }
    }
}
