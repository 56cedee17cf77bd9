use crate::error::HostError;
use std::fmt;
use std::sync::Arc;

/// Identifies the page (one script instance) inside the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageId(pub u64);

/// Handle of a line chart created by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineId(pub u64);

/// Handle of a cube chart created by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CubeId(pub u64);

/// Handle of a calculation item (a plotted series) created by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalcId(pub u64);

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page#{}", self.0)
    }
}

/// A visual property of a calculation item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Style<'a> {
    LineWidth(f64),
    StrokeStyle(&'a str),
    Format(&'a str),
    TextStyle(&'a str),
    BodyStyle(&'a str),
    Title(&'a str),
    Name(&'a str),
}

impl Style<'_> {
    /// The host's property name, also used as context when a setter fails.
    pub fn property(&self) -> &'static str {
        match self {
            Style::LineWidth(_) => "lineWidth",
            Style::StrokeStyle(_) => "strokeStyle",
            Style::Format(_) => "format",
            Style::TextStyle(_) => "textStyle",
            Style::BodyStyle(_) => "bodyStyle",
            Style::Title(_) => "title",
            Style::Name(_) => "name",
        }
    }
}

/// The charting runtime a page runs inside.
///
/// Implemented by the embedding application. Every call names the page it is
/// made on; the runtime owns all chart state, rendering and persistence.
pub trait Host: Send + Sync {
    /// Persists a page-scoped value under a numeric key.
    fn page_save(&self, page: PageId, key: u32, value: &str) -> Result<(), HostError>;

    fn page_read(&self, page: PageId, key: u32) -> Result<Option<String>, HostError>;

    /// Shows an error to the user. `source` names the failing operation.
    fn page_error(&self, page: PageId, source: &str, message: &str);

    /// The page gained focus.
    fn page_select(&self, page: PageId) -> Result<(), HostError>;

    /// Creates a line chart, optionally bound to a named UI element.
    fn make_line(&self, page: PageId, element: Option<&str>) -> Result<LineId, HostError>;

    fn line_push(&self, page: PageId, calc: CalcId, rate: f64, time: u64) -> Result<(), HostError>;

    fn make_cube(&self, page: PageId, element: Option<&str>) -> Result<CubeId, HostError>;

    fn cube_plus(&self, page: PageId, calc: CalcId, key: f64, size: f64) -> Result<(), HostError>;

    fn cube_dele(&self, page: PageId, calc: CalcId, key: f64) -> Result<(), HostError>;

    fn cube_save(&self, page: PageId, calc: CalcId, key: f64, size: f64) -> Result<(), HostError>;

    fn cube_read(&self, page: PageId, calc: CalcId, key: f64) -> Result<Option<f64>, HostError>;

    fn cube_free(&self, page: PageId, calc: CalcId) -> Result<(), HostError>;

    /// Publishes the item's pending cube cells; `save` also persists them.
    fn cube_push(&self, page: PageId, calc: CalcId, save: bool) -> Result<(), HostError>;

    fn make_calc(&self, page: PageId) -> Result<CalcId, HostError>;

    fn calc_style(&self, page: PageId, calc: CalcId, style: Style<'_>) -> Result<(), HostError>;

    /// Subscribes the page to the market-data feed of `symbol`.
    fn make_feed(&self, page: PageId, symbol: &str) -> Result<(), HostError>;
}

/// The injected host plus the page every delegated call is made on.
///
/// Cheap to clone; all wrappers hold their own copy.
#[derive(Clone)]
pub struct HostContext {
    host: Arc<dyn Host>,
    page: PageId,
}

impl HostContext {
    pub fn new(host: Arc<dyn Host>, page: PageId) -> Self {
        Self { host, page }
    }

    pub fn host(&self) -> &dyn Host {
        self.host.as_ref()
    }

    pub fn page(&self) -> PageId {
        self.page
    }

    /// Hands a failure to the host's error display instead of propagating it.
    pub(crate) fn report(&self, source: &str, error: &HostError) {
        tracing::warn!(page = %self.page, source, error = %error, "Host call failed.");
        self.host.page_error(self.page, source, &error.to_string());
    }
}

impl fmt::Debug for HostContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostContext").field("page", &self.page).finish_non_exhaustive()
    }
}
