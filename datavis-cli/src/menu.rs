//! Menu text and choice parsing

use datavis_core::ChartKind;

pub const RULE: &str = "============================================================";

pub const INTERRUPTED_MESSAGE: &str = "\n\nProgram interrupted by user. Goodbye!";

/// A validated menu selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// 1-5: one chart
    Render(ChartKind),
    /// 6: every chart in fixed order
    RenderAll,
    /// 7: data preview, no state change
    Preview,
    /// 8: write the report and leave
    Exit,
}

/// Why a line of input was not accepted
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChoiceError {
    #[error("Please enter a valid number.")]
    NotANumber,

    #[error("Please enter a number between {} and {}.", MenuChoice::MIN, MenuChoice::MAX)]
    OutOfRange(i64),
}

impl MenuChoice {
    pub const MIN: i64 = 1;
    pub const MAX: i64 = 8;

    pub fn from_number(n: i64) -> Option<Self> {
        match n {
            1 => Some(MenuChoice::Render(ChartKind::Line)),
            2 => Some(MenuChoice::Render(ChartKind::Bar)),
            3 => Some(MenuChoice::Render(ChartKind::Scatter)),
            4 => Some(MenuChoice::Render(ChartKind::Histogram)),
            5 => Some(MenuChoice::Render(ChartKind::Heatmap)),
            6 => Some(MenuChoice::RenderAll),
            7 => Some(MenuChoice::Preview),
            8 => Some(MenuChoice::Exit),
            _ => None,
        }
    }

    /// Parse one line of operator input
    pub fn parse(input: &str) -> Result<Self, ChoiceError> {
        let n: i64 = input.trim().parse().map_err(|_| ChoiceError::NotANumber)?;
        Self::from_number(n).ok_or(ChoiceError::OutOfRange(n))
    }
}

pub fn banner() -> String {
    format!(
        "{rule}\n           DATAVIS\n     Data Visualization Tool\n{rule}\n",
        rule = RULE
    )
}

pub fn menu_text() -> String {
    format!(
        "\n{rule}\nVISUALIZATION OPTIONS\n{rule}\n\
         1. Line Plot - Show trends over time\n\
         2. Bar Chart - Compare different metrics\n\
         3. Scatter Plot - Analyze relationships\n\
         4. Histogram - Show data distribution\n\
         5. Heatmap - Correlation analysis\n\
         6. Generate All Plots\n\
         7. Show Data Preview\n\
         8. Exit\n",
        rule = RULE
    )
}
