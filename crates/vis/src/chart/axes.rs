use serde::Serialize;
use stromschau_production::series::Label;
use stromschau_production::window::FilterWindow;

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisType {
    #[default]
    Linear,
    Category,
}

/// How the x axis ticks of the production chart are labelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickFormat {
    /// `day.month`, for windows that span at most a month.
    DayMonth,
    /// The short month name on the first day of each month and nothing
    /// otherwise.
    MonthStart,
    /// The label as is.
    Label,
}

impl TickFormat {
    pub fn for_window(window: FilterWindow) -> TickFormat {
        match window {
            FilterWindow::RecentDay | FilterWindow::CurrentMonth | FilterWindow::LastMonth => {
                TickFormat::DayMonth
            }
            FilterWindow::Year(_) => TickFormat::MonthStart,
            FilterWindow::All => TickFormat::Label,
        }
    }

    pub fn format(&self, label: &Label) -> String {
        let day = label.day();

        match self {
            TickFormat::DayMonth => format!("{}.{}", day.day(), day.month()),
            TickFormat::MonthStart if day.day() == 1 && !label.is_synthetic() => {
                MONTH_NAMES[day.month() as usize - 1].to_owned()
            }
            TickFormat::MonthStart => String::new(),
            TickFormat::Label => label.to_string(),
        }
    }
}
