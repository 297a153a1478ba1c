//! Render a plot without a window and dump the recorded commands as JSON.
//!
//! Pass a JSON options object as the first argument to override defaults,
//! e.g. `cargo run --example headless -- '{"scaleX": 40, "scaleY": 40}'`.

use gpui_fnplot::{
    Color, Domain, Plot, PlotOptions, PlottableFunction, RenderList, SurfaceSize,
};

fn main() {
    let options = std::env::args()
        .nth(1)
        .and_then(|raw| match serde_json::from_str(&raw) {
            Ok(value) => Some(PlotOptions::from_json(&value)),
            Err(err) => {
                eprintln!("ignoring options: {err}");
                None
            }
        })
        .unwrap_or_else(|| PlotOptions {
            scale_x: 40.0,
            scale_y: 40.0,
            ..PlotOptions::default()
        });

    let mut plot = Plot::new(RenderList::with_size(SurfaceSize::new(640, 480)), options);
    let blue = Color::from_rgb8(0x1f, 0x77, 0xb4);
    plot.add_function(PlottableFunction::new(f64::sin).with_color(blue));
    plot.add_function(PlottableFunction::styled(
        |x| 0.25 * x * x - 2.0,
        Domain::new(-4.0, 4.0),
        Some(Color::from_rgb8(0xd6, 0x27, 0x28)),
    ));
    plot.redraw(true);

    let visible = plot.visible_viewport();
    eprintln!(
        "visible x {:.3}..{:.3}, y {:.3}..{:.3}, {} commands",
        visible.x.min,
        visible.x.max,
        visible.y.min,
        visible.y.max,
        plot.surface().commands().len()
    );
    eprintln!("options: {}", plot.options().to_json());

    match serde_json::to_string_pretty(plot.surface().commands()) {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("failed to serialize commands: {err}"),
    }
}
