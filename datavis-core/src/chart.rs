//! Declarative chart specifications
//!
//! A [`ChartSpec`] says what to draw: which columns feed which panel, with
//! which colours and labels. The renderer turns a spec plus a [`Table`] into a
//! PNG. The five stock charts are built by [`ChartSpec::for_kind`].

use crate::palette::ColorScale;
use crate::schema::{CUSTOMERS, EXPENSES, MONTH, PROFIT, SALES};
use crate::types::{DataError, Result, Table};
use plotters::style::RGBColor;
use std::fmt;

pub const DEFAULT_HISTOGRAM_BINS: usize = 8;

const BLUE: RGBColor = RGBColor(31, 119, 180);
const ORANGE: RGBColor = RGBColor(255, 127, 14);
const GREEN: RGBColor = RGBColor(44, 160, 44);
const PURPLE: RGBColor = RGBColor(128, 0, 128);
const RED: RGBColor = RGBColor(214, 39, 40);
const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);
const LIGHT_GREEN: RGBColor = RGBColor(144, 238, 144);
const LIGHT_CORAL: RGBColor = RGBColor(240, 128, 128);
const PLUM: RGBColor = RGBColor(221, 160, 221);

/// The chart kinds offered by the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    Line,
    Bar,
    Scatter,
    Histogram,
    Heatmap,
}

impl ChartKind {
    /// Every kind, in the order "generate all" renders them
    pub const ALL: [ChartKind; 5] = [
        ChartKind::Line,
        ChartKind::Bar,
        ChartKind::Scatter,
        ChartKind::Histogram,
        ChartKind::Heatmap,
    ];

    /// Prefix of the output file name
    pub fn file_stem(&self) -> &'static str {
        match self {
            ChartKind::Line => "line_plot",
            ChartKind::Bar => "bar_chart",
            ChartKind::Scatter => "scatter_plot",
            ChartKind::Histogram => "histogram",
            ChartKind::Heatmap => "heatmap",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartKind::Line => write!(f, "Line plot"),
            ChartKind::Bar => write!(f, "Bar chart"),
            ChartKind::Scatter => write!(f, "Scatter plot"),
            ChartKind::Histogram => write!(f, "Histogram"),
            ChartKind::Heatmap => write!(f, "Heatmap"),
        }
    }
}

/// Point marker drawn on trend lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerShape {
    Circle,
    Square,
    Triangle,
    Cross,
}

/// One numeric series with its display name and colour
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub column: String,
    pub color: RGBColor,
}

impl Series {
    pub fn new(column: impl Into<String>, color: RGBColor) -> Self {
        Self {
            column: column.into(),
            color,
        }
    }
}

/// A single plotting area inside a figure
#[derive(Debug, Clone, PartialEq)]
pub enum Panel {
    /// Numeric series against a categorical axis
    Trend {
        title: String,
        category: String,
        series: Series,
        y_label: String,
        marker: MarkerShape,
    },
    /// Several series side by side per category, with value labels
    GroupedBars {
        title: String,
        category: String,
        series: Vec<Series>,
        x_label: String,
        y_label: String,
    },
    /// `y` against `x`, points coloured by a third column, with a trend line
    Scatter {
        title: String,
        x: String,
        y: String,
        color_by: String,
        scale: ColorScale,
        x_label: String,
        y_label: String,
    },
    /// Frequency distribution of one column
    Distribution {
        title: String,
        series: Series,
        bins: usize,
        x_label: String,
    },
    /// Correlation matrix over every numeric column
    Correlation { scale: ColorScale },
}

impl Panel {
    /// Columns that must exist and hold numbers
    pub fn numeric_columns(&self) -> Vec<&str> {
        match self {
            Panel::Trend { series, .. } => vec![series.column.as_str()],
            Panel::GroupedBars { series, .. } => {
                series.iter().map(|s| s.column.as_str()).collect()
            }
            Panel::Scatter { x, y, color_by, .. } => {
                vec![x.as_str(), y.as_str(), color_by.as_str()]
            }
            Panel::Distribution { series, .. } => vec![series.column.as_str()],
            Panel::Correlation { .. } => Vec::new(),
        }
    }

    /// Categorical axis column; must exist, any type
    pub fn category_column(&self) -> Option<&str> {
        match self {
            Panel::Trend { category, .. } | Panel::GroupedBars { category, .. } => {
                Some(category.as_str())
            }
            _ => None,
        }
    }
}

/// A complete figure: title, grid layout, pixel size and panels
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    /// Grid as (rows, columns); panels fill it row by row
    pub layout: (usize, usize),
    /// Image size in pixels
    pub size: (u32, u32),
    pub panels: Vec<Panel>,
}

impl ChartSpec {
    /// The stock chart for a kind
    pub fn for_kind(kind: ChartKind) -> Self {
        match kind {
            ChartKind::Line => Self::line_trends(),
            ChartKind::Bar => Self::bar_comparison(),
            ChartKind::Scatter => Self::scatter_relationships(),
            ChartKind::Histogram => Self::distributions(DEFAULT_HISTOGRAM_BINS),
            ChartKind::Heatmap => Self::correlation_heatmap(),
        }
    }

    /// Sales, Profit, Customers and Expenses over months in a 2x2 grid
    pub fn line_trends() -> Self {
        let trend = |title: &str, column: &str, y_label: &str, color, marker| Panel::Trend {
            title: title.to_string(),
            category: MONTH.to_string(),
            series: Series::new(column, color),
            y_label: y_label.to_string(),
            marker,
        };
        Self {
            kind: ChartKind::Line,
            title: "Business Performance Trends".to_string(),
            layout: (2, 2),
            size: (1500, 1000),
            panels: vec![
                trend("Monthly Sales Trend", SALES, "Sales ($)", BLUE, MarkerShape::Circle),
                trend("Monthly Profit Trend", PROFIT, "Profit ($)", GREEN, MarkerShape::Square),
                trend(
                    "Customer Growth",
                    CUSTOMERS,
                    "Number of Customers",
                    PURPLE,
                    MarkerShape::Triangle,
                ),
                trend("Monthly Expenses", EXPENSES, "Expenses ($)", RED, MarkerShape::Cross),
            ],
        }
    }

    /// Sales, Expenses and Profit grouped per month
    pub fn bar_comparison() -> Self {
        Self {
            kind: ChartKind::Bar,
            title: "Monthly Financial Performance Comparison".to_string(),
            layout: (1, 1),
            size: (1400, 800),
            panels: vec![Panel::GroupedBars {
                title: String::new(),
                category: MONTH.to_string(),
                series: vec![
                    Series::new(SALES, BLUE),
                    Series::new(EXPENSES, ORANGE),
                    Series::new(PROFIT, GREEN),
                ],
                x_label: "Month".to_string(),
                y_label: "Amount ($)".to_string(),
            }],
        }
    }

    /// Sales vs Customers and Profit vs Expenses side by side
    pub fn scatter_relationships() -> Self {
        Self {
            kind: ChartKind::Scatter,
            title: "Relationship Analysis".to_string(),
            layout: (1, 2),
            size: (1500, 600),
            panels: vec![
                Panel::Scatter {
                    title: "Sales vs Customers (Color = Profit)".to_string(),
                    x: CUSTOMERS.to_string(),
                    y: SALES.to_string(),
                    color_by: PROFIT.to_string(),
                    scale: ColorScale::Viridis,
                    x_label: "Number of Customers".to_string(),
                    y_label: "Sales ($)".to_string(),
                },
                Panel::Scatter {
                    title: "Expenses vs Profit (Color = Sales)".to_string(),
                    x: EXPENSES.to_string(),
                    y: PROFIT.to_string(),
                    color_by: SALES.to_string(),
                    scale: ColorScale::Plasma,
                    x_label: "Expenses ($)".to_string(),
                    y_label: "Profit ($)".to_string(),
                },
            ],
        }
    }

    /// Frequency distributions of the four numeric columns
    pub fn distributions(bins: usize) -> Self {
        let dist = |title: &str, column: &str, color, x_label: &str| Panel::Distribution {
            title: title.to_string(),
            series: Series::new(column, color),
            bins,
            x_label: x_label.to_string(),
        };
        Self {
            kind: ChartKind::Histogram,
            title: "Data Distribution Analysis".to_string(),
            layout: (2, 2),
            size: (1400, 1000),
            panels: vec![
                dist("Sales Distribution", SALES, SKY_BLUE, "Sales ($)"),
                dist("Profit Distribution", PROFIT, LIGHT_GREEN, "Profit ($)"),
                dist("Expenses Distribution", EXPENSES, LIGHT_CORAL, "Expenses ($)"),
                dist("Customers Distribution", CUSTOMERS, PLUM, "Number of Customers"),
            ],
        }
    }

    /// Annotated correlation matrix of every numeric column
    pub fn correlation_heatmap() -> Self {
        Self {
            kind: ChartKind::Heatmap,
            title: "Correlation Matrix Heatmap".to_string(),
            layout: (1, 1),
            size: (1000, 800),
            panels: vec![Panel::Correlation {
                scale: ColorScale::CoolWarm,
            }],
        }
    }

    /// Check the table can feed every panel before anything is drawn
    pub fn validate(&self, table: &Table) -> Result<()> {
        if table.is_empty() {
            return Err(DataError::EmptyTable);
        }
        for panel in &self.panels {
            if let Some(category) = panel.category_column() {
                if table.column(category).is_none() {
                    return Err(DataError::MissingColumn(category.to_string()));
                }
            }
            for column in panel.numeric_columns() {
                table.numeric(column)?;
            }
            if matches!(panel, Panel::Correlation { .. }) && table.numeric_columns().is_empty() {
                return Err(DataError::NotNumeric("any column".to_string()));
            }
        }
        let (rows, cols) = self.layout;
        if self.panels.len() > rows * cols {
            return Err(DataError::Render(format!(
                "{} panels do not fit a {}x{} layout",
                self.panels.len(),
                rows,
                cols
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoadOptions;
    use crate::loader::from_reader;

    fn table(data: &str) -> Table {
        from_reader(data.as_bytes(), &LoadOptions::new()).unwrap()
    }

    #[test]
    fn test_stock_specs_fit_their_layouts() {
        for kind in ChartKind::ALL {
            let spec = ChartSpec::for_kind(kind);
            assert_eq!(spec.kind, kind);
            let (rows, cols) = spec.layout;
            assert!(spec.panels.len() <= rows * cols);
        }
        assert_eq!(ChartSpec::line_trends().panels.len(), 4);
        assert_eq!(ChartSpec::scatter_relationships().panels.len(), 2);
    }

    #[test]
    fn test_file_stems() {
        let stems: Vec<_> = ChartKind::ALL.iter().map(|k| k.file_stem()).collect();
        assert_eq!(
            stems,
            vec!["line_plot", "bar_chart", "scatter_plot", "histogram", "heatmap"]
        );
    }

    #[test]
    fn test_histogram_bin_count() {
        let spec = ChartSpec::for_kind(ChartKind::Histogram);
        for panel in &spec.panels {
            match panel {
                Panel::Distribution { bins, .. } => assert_eq!(*bins, 8),
                other => panic!("unexpected panel: {:?}", other),
            }
        }
    }

    #[test]
    fn test_validate_against_table() {
        let good = table("Month,Sales,Profit,Customers,Expenses\nJan,1,2,3,4\n");
        for kind in ChartKind::ALL {
            assert!(ChartSpec::for_kind(kind).validate(&good).is_ok());
        }

        let no_month = table("Sales,Profit,Customers,Expenses\n1,2,3,4\n");
        assert!(matches!(
            ChartSpec::line_trends().validate(&no_month),
            Err(DataError::MissingColumn(_))
        ));
        // The heatmap only needs numeric columns
        assert!(ChartSpec::correlation_heatmap().validate(&no_month).is_ok());

        let text_profit = table("Month,Sales,Profit,Customers,Expenses\nJan,1,high,3,4\n");
        assert!(matches!(
            ChartSpec::scatter_relationships().validate(&text_profit),
            Err(DataError::NotNumeric(_))
        ));

        let empty = table("Month,Sales,Profit,Customers,Expenses\n");
        assert!(matches!(
            ChartSpec::bar_comparison().validate(&empty),
            Err(DataError::EmptyTable)
        ));
    }
}
