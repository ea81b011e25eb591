//! Headless walk-through of a drawer: a drag that opens it, a short drag that
//! springs back, and a host-side close. Run with `RUST_LOG=debug` to see the
//! snap decisions.

use std::time::{Duration, Instant};

use toggle_drawer::prelude::*;

const SURFACE: Size = Size::new(390.0, 844.0);

struct Frames {
    start: Instant,
    frame: u64,
}

impl Frames {
    fn run<W: Widget>(&mut self, widget: &mut W, label: &str) {
        let mut ctx = PaintContext::new();
        loop {
            self.frame += 1;
            let now = self.start + Duration::from_millis(self.frame * 16);
            let animating = widget.advance_animations(now);
            if take_change_flags().contains(ChangeFlags::NEEDS_LAYOUT) {
                widget.layout(Constraints::tight(SURFACE));
            }
            ctx.clear();
            widget.paint(&mut ctx);
            if !animating {
                break;
            }
        }
        let panel_top = ctx.commands().first().and_then(DrawCommand::rect).map(|r| r.y);
        log::info!(
            "{}: settled after {} frames, panel top at {:?}",
            label,
            self.frame,
            panel_top
        );
    }
}

fn main() -> Result<(), DrawerError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let is_open = create_signal(false);
    let mut drawer = toggle_drawer(
        DrawerConfig::new(120.0, 480.0)
            .shadow_color(Color::BLACK.with_alpha(0.25))
            .shadow_radius(8.0),
        is_open.clone(),
        block(400.0, Color::from_hex(0x4A90D9)).corner_radius(12.0),
        block(60.0, Color::from_hex(0xD9824A)).corner_radius(12.0),
    )?;

    let mut frames = Frames {
        start: Instant::now(),
        frame: 0,
    };
    frames.run(&mut drawer, "mounted closed");

    let press_y = drawer.panel_rect().y + 20.0;
    let script = [
        Event::MouseDown {
            x: 195.0,
            y: press_y,
            button: MouseButton::Left,
        },
        Event::MouseMove {
            x: 195.0,
            y: press_y - 80.0,
        },
        Event::MouseMove {
            x: 195.0,
            y: press_y - 200.0,
        },
        Event::MouseUp {
            x: 195.0,
            y: press_y - 200.0,
            button: MouseButton::Left,
        },
    ];
    for event in &script {
        drawer.event(event);
    }
    frames.run(&mut drawer, "dragged up 200");

    let press_y = drawer.panel_rect().y + 20.0;
    drawer.event(&Event::MouseDown {
        x: 195.0,
        y: press_y,
        button: MouseButton::Left,
    });
    drawer.event(&Event::MouseMove {
        x: 195.0,
        y: press_y + 50.0,
    });
    drawer.event(&Event::MouseUp {
        x: 195.0,
        y: press_y + 50.0,
        button: MouseButton::Left,
    });
    frames.run(&mut drawer, "dragged down 50");

    is_open.set(false);
    frames.run(&mut drawer, "closed by host");

    Ok(())
}
