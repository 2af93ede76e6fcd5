//! Gallery Demo - a flung photo grid
//!
//! Lays out a grid of thumbnails, flings it upwards and prints where the
//! content lands frame by frame.
//!
//! Run with: RUST_LOG=fling=debug cargo run --example gallery -p fling
//!
//! Set `FLING_STYLE_FILE` to a YAML theme to override the defaults, e.g.
//!
//! ```yaml
//! types:
//!   FingerScroll: { scroll-mode: kinetic, decel-rate: 1.2 }
//!   IconView: { column-gap: 8, row-gap: 8, homogeneous-columns: true }
//! ```

use fling::prelude::*;
use fling::Stylable;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

const VIEWPORT: Size = Size::new(320.0, 240.0);
const FRAME: Duration = Duration::from_nanos(16_666_667);

/// Pointer grab owned by the demo's only widget.
#[derive(Default)]
struct Grab(bool);

impl PointerGrab for Grab {
    fn grab(&mut self) {
        self.0 = true;
    }

    fn ungrab(&mut self) {
        self.0 = false;
    }

    fn is_held(&self) -> bool {
        self.0
    }
}

struct Thumbnail(Size);

impl Cell for Thumbnail {
    fn set_attribute(&mut self, name: &str, value: &CellValue) {
        if let ("side", CellValue::Number(side)) = (name, value) {
            self.0 = Size::new(*side as f32, *side as f32);
        }
    }

    fn natural_size(&self) -> Size {
        self.0
    }
}

struct Thumbnails;

impl CellRenderer for Thumbnails {
    fn create_cell(&mut self) -> Option<Box<dyn Cell>> {
        Some(Box::new(Thumbnail(Size::default())))
    }
}

fn grid_config(store: &StyleStore, view: &dyn Stylable) -> Result<GridLayoutConfig> {
    let config = GridLayoutConfig::from_style(store, view)?;
    if store.sheet_count() > 0 {
        return Ok(config);
    }
    Ok(config
        .with_homogeneous_columns(true)
        .with_homogeneous_rows(true)
        .with_gap(8.0, 8.0)
        .with_align(0.5, 0.5))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let store = StyleStore::with_default_theme();

    let photos: Vec<Vec<CellValue>> = (0..120)
        .map(|i| {
            vec![
                CellValue::from(format!("IMG_{i:04}.jpg").as_str()),
                CellValue::from(f64::from(48 + (i % 3) * 8)),
            ]
        })
        .collect();

    let mut view = IconView::with_config(grid_config(&store, &Selector::new("IconView"))?);
    view.set_renderer(Thumbnails);
    view.add_attribute("side", 1);
    view.set_model(photos);

    let content = view.measure(AvailableExtent::width(VIEWPORT.width))?;
    let boxes = view.place(Size::new(VIEWPORT.width, content.height))?;
    println!(
        "{} thumbnails in {:.0}x{:.0}, first row at y={:.0}",
        boxes.len(),
        content.width,
        content.height,
        boxes.first().map_or(0.0, |b| b.y)
    );

    let mut target = AdjustmentPair::new(
        Adjustment::new(0.0, f64::from(content.width), 1.0, f64::from(VIEWPORT.width))?,
        Adjustment::new(0.0, f64::from(content.height), 64.0, f64::from(VIEWPORT.height))?,
    );

    let mut scroller = FingerScroll::from_style(&store, &Selector::new("FingerScroll"))?;
    if store.sheet_count() == 0 {
        scroller.set_config(KineticConfig::kinetic())?;
    }

    let mut grab = Grab::default();
    let start = Instant::now();
    let at = |frame: u32| start + FRAME * frame;

    scroller.handle_event(
        &PointerEvent::Press {
            position: Point::new(160.0, 200.0),
            button: MouseButton::Primary,
            timestamp: at(0),
        },
        &mut target,
        &mut grab,
    )?;
    for frame in 1..=4 {
        scroller.handle_event(
            &PointerEvent::Motion {
                position: Point::new(160.0, 200.0 - 25.0 * frame as f32),
                timestamp: at(frame),
            },
            &mut target,
            &mut grab,
        )?;
    }
    scroller.handle_event(
        &PointerEvent::Release {
            position: Point::new(160.0, 75.0),
            button: MouseButton::Primary,
            timestamp: at(5),
        },
        &mut target,
        &mut grab,
    )?;
    println!("released at y={:.1}", target.value(Axis::Vertical));

    let mut frames = 0;
    while scroller.on_frame(FRAME, &mut target)? == ScrollState::Decelerating {
        frames += 1;
        if frames % 10 == 0 {
            println!("frame {frames:>3}: y={:.1}", target.value(Axis::Vertical));
        }
    }
    println!(
        "settled at y={:.0} after {frames} frames",
        target.value(Axis::Vertical)
    );

    Ok(())
}
