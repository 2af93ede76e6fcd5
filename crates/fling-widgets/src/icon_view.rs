//! Model-backed icon view.
//!
//! Keeps one cell per model row, copies mapped model columns onto cell
//! attributes, and lays the cells out with the grid engine.

use fling_core::{Rect, Result, Size};
use fling_layout::{AvailableExtent, GridItem, GridLayout, GridLayoutConfig};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A value stored in a model column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Boolean
    Flag(bool),
    /// Number
    Number(f64),
    /// Text
    Text(String),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        Self::Flag(b)
    }
}

/// Row/column data source.
pub trait ListModel {
    /// Number of rows.
    fn row_count(&self) -> usize;

    /// Value at a row and column, if present.
    fn value(&self, row: usize, column: usize) -> Option<CellValue>;
}

impl ListModel for Vec<Vec<CellValue>> {
    fn row_count(&self) -> usize {
        self.len()
    }

    fn value(&self, row: usize, column: usize) -> Option<CellValue> {
        self.get(row)?.get(column).cloned()
    }
}

/// One item on screen.
pub trait Cell {
    /// Apply a mapped model value.
    fn set_attribute(&mut self, name: &str, value: &CellValue);

    /// Preferred size for layout.
    fn natural_size(&self) -> Size;
}

/// Factory for cells.
pub trait CellRenderer {
    /// Create a fresh cell. `None` signals the renderer cannot produce one.
    fn create_cell(&mut self) -> Option<Box<dyn Cell>>;
}

/// Mapping from a cell attribute to a model column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeMapping {
    /// Attribute name on the cell
    pub name: String,
    /// Source column in the model
    pub column: usize,
}

/// Icon view engine.
#[derive(Default)]
pub struct IconView {
    model: Option<Box<dyn ListModel>>,
    renderer: Option<Box<dyn CellRenderer>>,
    attributes: Vec<AttributeMapping>,
    cells: Vec<Box<dyn Cell>>,
    grid: GridLayout,
}

impl fmt::Debug for IconView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IconView")
            .field("rows", &self.model.as_ref().map(|m| m.row_count()))
            .field("has_renderer", &self.renderer.is_some())
            .field("attributes", &self.attributes)
            .field("cells", &self.cells.len())
            .field("grid", &self.grid)
            .finish()
    }
}

impl IconView {
    /// Empty icon view with a default grid.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty icon view with a grid configuration.
    #[must_use]
    pub fn with_config(config: GridLayoutConfig) -> Self {
        Self {
            grid: GridLayout::new(config),
            ..Self::default()
        }
    }

    /// Replace the grid configuration.
    pub fn set_config(&mut self, config: GridLayoutConfig) {
        self.grid.set_config(config);
    }

    /// Grid configuration.
    #[must_use]
    pub fn config(&self) -> &GridLayoutConfig {
        self.grid.config()
    }

    /// Replace the model and resynchronize.
    pub fn set_model(&mut self, model: impl ListModel + 'static) {
        self.model = Some(Box::new(model));
        self.model_changed();
    }

    /// Current model.
    #[must_use]
    pub fn model(&self) -> Option<&dyn ListModel> {
        self.model.as_deref()
    }

    /// Replace the renderer and resynchronize.
    pub fn set_renderer(&mut self, renderer: impl CellRenderer + 'static) {
        self.renderer = Some(Box::new(renderer));
        self.model_changed();
    }

    /// Map a model column onto a cell attribute and resynchronize.
    pub fn add_attribute(&mut self, name: impl Into<String>, column: usize) {
        self.attributes.push(AttributeMapping {
            name: name.into(),
            column,
        });
        self.model_changed();
    }

    /// Attribute mappings in the order they were added.
    #[must_use]
    pub fn attributes(&self) -> &[AttributeMapping] {
        &self.attributes
    }

    /// Cells, one per model row.
    #[must_use]
    pub fn cells(&self) -> &[Box<dyn Cell>] {
        &self.cells
    }

    /// Bring cells in line with the model. The host calls this whenever
    /// rows are added, removed, changed or reordered.
    ///
    /// Does nothing until both a model and a renderer are set.
    pub fn model_changed(&mut self) {
        let (Some(model), Some(renderer)) = (self.model.as_deref(), self.renderer.as_deref_mut())
        else {
            return;
        };
        let rows = model.row_count();

        while self.cells.len() < rows {
            match renderer.create_cell() {
                Some(cell) => self.cells.push(cell),
                None => {
                    tracing::warn!(
                        cells = self.cells.len(),
                        rows,
                        "cell renderer returned no cell"
                    );
                    break;
                }
            }
        }
        self.cells.truncate(rows);

        for (row, cell) in self.cells.iter_mut().enumerate() {
            for mapping in &self.attributes {
                if let Some(value) = model.value(row, mapping.column) {
                    cell.set_attribute(&mapping.name, &value);
                }
            }
        }

        self.grid.set_items(
            self.cells
                .iter()
                .map(|cell| GridItem::from(cell.natural_size())),
        );
        tracing::debug!(rows, cells = self.cells.len(), "icon view synchronized");
    }

    /// Content size for the offered space.
    pub fn measure(&mut self, available: AvailableExtent) -> Result<Size> {
        self.grid.measure(available)
    }

    /// Cell boxes for a final allocation, in row order.
    pub fn place(&mut self, allocation: Size) -> Result<Vec<Rect>> {
        self.grid.place(allocation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<(String, CellValue)>>>;

    struct Thumb {
        attrs: HashMap<String, CellValue>,
        log: Log,
    }

    impl Cell for Thumb {
        fn set_attribute(&mut self, name: &str, value: &CellValue) {
            self.attrs.insert(name.to_string(), value.clone());
            self.log.borrow_mut().push((name.to_string(), value.clone()));
        }

        fn natural_size(&self) -> Size {
            match self.attrs.get("width") {
                Some(CellValue::Number(w)) => Size::new(*w as f32, 10.0),
                _ => Size::new(10.0, 10.0),
            }
        }
    }

    struct Renderer {
        remaining: usize,
        log: Log,
    }

    impl Renderer {
        fn new(remaining: usize) -> (Self, Log) {
            let log = Log::default();
            (
                Self {
                    remaining,
                    log: Rc::clone(&log),
                },
                log,
            )
        }
    }

    impl CellRenderer for Renderer {
        fn create_cell(&mut self) -> Option<Box<dyn Cell>> {
            if self.remaining == 0 {
                return None;
            }
            self.remaining -= 1;
            Some(Box::new(Thumb {
                attrs: HashMap::new(),
                log: Rc::clone(&self.log),
            }))
        }
    }

    fn model(rows: usize) -> Vec<Vec<CellValue>> {
        (0..rows)
            .map(|i| vec![CellValue::from(format!("photo-{i}").as_str()), CellValue::from(10.0 + i as f64)])
            .collect()
    }

    #[test]
    fn test_no_renderer_is_noop() {
        let mut view = IconView::new();
        view.set_model(model(3));
        view.add_attribute("title", 0);
        assert!(view.cells().is_empty());
    }

    #[test]
    fn test_creates_one_cell_per_row() {
        let (renderer, log) = Renderer::new(100);
        let mut view = IconView::new();
        view.add_attribute("title", 0);
        view.set_model(model(4));
        view.set_renderer(renderer);

        assert_eq!(view.cells().len(), 4);
        let titles: Vec<CellValue> = log
            .borrow()
            .iter()
            .filter(|(name, _)| name == "title")
            .map(|(_, v)| v.clone())
            .collect();
        assert_eq!(titles[0], CellValue::from("photo-0"));
        assert_eq!(titles.len(), 4);
    }

    #[test]
    fn test_shrinks_with_model() {
        let (renderer, _) = Renderer::new(100);
        let mut view = IconView::new();
        view.set_renderer(renderer);
        view.set_model(model(5));
        assert_eq!(view.cells().len(), 5);
        view.set_model(model(2));
        assert_eq!(view.cells().len(), 2);
        view.set_model(Vec::<Vec<CellValue>>::new());
        assert!(view.cells().is_empty());
    }

    #[test]
    fn test_renderer_failure_stops_creation() {
        let (renderer, _) = Renderer::new(2);
        let mut view = IconView::new();
        view.set_renderer(renderer);
        view.set_model(model(5));
        assert_eq!(view.cells().len(), 2);
    }

    #[test]
    fn test_missing_column_skipped() {
        let (renderer, log) = Renderer::new(10);
        let mut view = IconView::new();
        view.set_renderer(renderer);
        view.add_attribute("missing", 7);
        view.set_model(model(2));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_layout_uses_cell_sizes() {
        let (renderer, _) = Renderer::new(10);
        let mut view = IconView::with_config(GridLayoutConfig::default().with_gap(0.0, 2.0));
        view.set_renderer(renderer);
        view.add_attribute("width", 1);
        view.set_model(model(3));

        // Widths 10, 11, 12 with a gap of 2.
        let size = view.measure(AvailableExtent::unbounded()).unwrap();
        assert_eq!(size, Size::new(37.0, 10.0));

        let boxes = view.place(Size::new(25.0, 100.0)).unwrap();
        assert_eq!(boxes[1], Rect::new(12.0, 0.0, 11.0, 10.0));
        assert_eq!(boxes[2], Rect::new(0.0, 10.0, 12.0, 10.0));
    }

    #[test]
    fn test_cell_value_display() {
        assert_eq!(CellValue::from("a").to_string(), "a");
        assert_eq!(CellValue::from(true).to_string(), "true");
        assert_eq!(CellValue::from(1.5).to_string(), "1.5");
    }
}
