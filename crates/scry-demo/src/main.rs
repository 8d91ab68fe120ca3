//! Opens a window with a live console overlay.
//!
//! Type to compose a line, Enter writes it, Backspace edits, Escape clears
//! the console. Frame statistics are written periodically.

use anyhow::{Context, Result};
use clap::Parser;
use scry_engine::console::{AnchorX, AnchorY, Console, ConsoleConfig, Orientation};
use scry_engine::core::{App, AppControl, FrameCtx, InitCtx};
use scry_engine::device::GpuInit;
use scry_engine::input::Key;
use scry_engine::logging::{init_logging, LoggingConfig};
use scry_engine::paint::Color;
use scry_engine::render::DrawContext;
use scry_engine::window::{Runtime, RuntimeConfig, WindowId};

#[derive(Parser, Debug, Clone)]
#[command(name = "scry-demo")]
#[command(version)]
#[command(about = "GPU text console overlay demo", long_about = None)]
struct Args {
    #[arg(long, default_value_t = 24)]
    rows: usize,

    #[arg(long, default_value_t = 80)]
    cols: usize,

    /// scroll-up or scroll-down
    #[arg(long, default_value = "scroll-up")]
    orientation: Orientation,

    /// left, right or center
    #[arg(long, default_value = "left")]
    anchor_x: AnchorX,

    /// top, middle, center or bottom
    #[arg(long, default_value = "top")]
    anchor_y: AnchorY,

    /// Color name or hex spec (#rgb, #rrggbb, #rrggbbaa)
    #[arg(long, default_value = "#33ff66")]
    color: Color,

    /// Integer magnification of each glyph pixel
    #[arg(long, default_value_t = 2)]
    scale: u32,

    /// Anchor position in window pixels, top-left origin
    #[arg(long, num_args = 2, value_names = ["X", "Y"], default_values_t = [16.0, 16.0])]
    pos: Vec<f32>,

    /// Write frame statistics every N frames (0 disables)
    #[arg(long, default_value_t = 120)]
    stats_every: u64,
}

impl Args {
    fn console_config(&self) -> ConsoleConfig {
        let (x, y) = match self.pos.as_slice() {
            [x, y] => (*x, *y),
            _ => (0.0, 0.0),
        };
        ConsoleConfig::default()
            .with_grid(self.rows, self.cols)
            .with_orientation(self.orientation)
            .with_anchor(self.anchor_x, self.anchor_y)
            .with_color(self.color)
            .with_scale(self.scale)
            .with_pos(x, y)
    }
}

struct ConsoleDemo {
    config: ConsoleConfig,
    stats_every: u64,

    console: Option<Console>,
    line: String,
    title_dirty: bool,
}

impl ConsoleDemo {
    fn new(config: ConsoleConfig, stats_every: u64) -> Self {
        Self {
            config,
            stats_every,
            console: None,
            line: String::new(),
            title_dirty: true,
        }
    }
}

impl App for ConsoleDemo {
    fn on_initialize(&mut self, ctx: &mut InitCtx<'_, '_>) -> AppControl {
        let mut console = match Console::new(self.config.clone()) {
            Ok(c) => c,
            Err(e) => {
                log::error!("console: {e}");
                return AppControl::Exit;
            }
        };

        let info = ctx.gpu.adapter_info();
        console.write(format!("scry console {}x{}", console.rows(), console.cols()));
        console.write(format!("adapter: {} ({:?})", info.name, info.backend));
        console.write("type a line, Enter to write, Esc to clear");
        self.console = Some(console);
        AppControl::Continue
    }

    fn on_resize(&mut self, _window_id: WindowId, width: f32, height: f32) {
        if let Some(console) = self.console.as_mut() {
            console.write(format!("resized to {width:.0}x{height:.0}"));
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(console) = self.console.as_mut() else {
            return AppControl::Continue;
        };

        let input = ctx.input_frame;
        if !input.text.is_empty() {
            self.line.push_str(&input.text);
            self.title_dirty = true;
        }
        if input.pressed(Key::Backspace) && self.line.pop().is_some() {
            self.title_dirty = true;
        }
        if input.pressed(Key::Enter) {
            console.write(&self.line);
            self.line.clear();
            self.title_dirty = true;
        }
        if input.pressed(Key::Escape) {
            console.clear();
        }

        let time = ctx.time;
        if self.stats_every > 0 && time.frame_index % self.stats_every == 0 {
            console.write(format!(
                "frame {:>6}  {:6.1} fps  {:5.2} ms",
                time.frame_index,
                time.fps,
                time.dt * 1000.0
            ));
        }

        if self.title_dirty {
            ctx.window.set_title(&format!("scry > {}", self.line));
            self.title_dirty = false;
        }

        ctx.render(Color::from_srgb_u8(12, 14, 18, 255), |rctx, target| {
            let placement = DrawContext::pixel_space(rctx.viewport);
            console.draw(rctx, target, Some(&placement));
        })
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let args = Args::parse();
    let config = args.console_config();
    config.validate().context("invalid console configuration")?;

    log::debug!("{config:?}");

    Runtime::run(
        RuntimeConfig::default(),
        GpuInit::default(),
        ConsoleDemo::new(config, args.stats_every),
    )
}
