use std::time::Duration;

use gpui::{
    AppContext, Application, AsyncWindowContext, Bounds, Timer, WindowBounds, WindowOptions, px,
    size,
};

use gpui_fnplot::{
    Color, Domain, GpuiPlotView, PartialPoint, Plot, PlotHandle, PlottableFunction, Theme,
};

fn build_plot() -> Plot {
    Plot::builder()
        .theme(Theme::dark())
        .scale(48.0, 48.0)
        .gestures(true)
        .function(PlottableFunction::new(f64::sin).with_color(Color::new(0.2, 0.75, 0.95, 1.0)))
        .function(PlottableFunction::styled(
            |x| x * x / 4.0 - 3.0,
            Domain::new(-6.0, 6.0),
            Some(Color::new(0.95, 0.55, 0.2, 1.0)),
        ))
        .function(
            PlottableFunction::new(|x: f64| 1.0 / x)
                .with_color(Color::new(0.55, 0.9, 0.65, 1.0)),
        )
        .build()
}

fn spawn_tour(
    window: &mut gpui::Window,
    cx: &mut gpui::App,
    view: gpui::Entity<GpuiPlotView>,
    handle: PlotHandle,
) {
    let stops = [
        PartialPoint::new(6.0, 2.0),
        PartialPoint::x(-8.0),
        PartialPoint::new(0.0, 0.0),
    ];
    window
        .spawn(cx, move |cx: &mut AsyncWindowContext| {
            let mut cx = cx.clone();
            async move {
                for stop in stops.into_iter().cycle() {
                    Timer::after(Duration::from_secs(4)).await;
                    handle.write(|plot| {
                        plot.animate_to_coordinate(stop, None, None);
                    });
                    let notified = cx.update(|_, cx| view.update(cx, |_view, cx| cx.notify()));
                    if notified.is_err() {
                        break;
                    }
                }
            }
        })
        .detach();
}

fn main() {
    Application::new().run(|cx| {
        let options = WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(Bounds::centered(
                None,
                size(px(900.0), px(640.0)),
                cx,
            ))),
            ..Default::default()
        };

        cx.open_window(options, |window, cx| {
            let view = GpuiPlotView::new(build_plot());
            let handle = view.plot_handle();
            let entity = cx.new(|_| view);
            spawn_tour(window, cx, entity.clone(), handle);
            entity
        })
        .unwrap();
    });
}
