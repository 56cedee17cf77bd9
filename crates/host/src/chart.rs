use crate::context::{CalcId, CubeId, HostContext, LineId, Style};
use crate::error::HostError;
use std::marker::PhantomData;

/// Marker for items drawn on a [`LineChart`].
#[derive(Debug)]
pub enum Line {}

/// Marker for items drawn on a [`CubeChart`].
#[derive(Debug)]
pub enum Cube {}

/// A plotted series owned by the host.
///
/// Style setters remember the value locally and forward it to the host. A host
/// failure is shown through the page's error display and never returned, so a
/// script keeps running with a partially styled item. Getters return the
/// remembered value only.
#[derive(Debug)]
pub struct CalcItem<K> {
    ctx: HostContext,
    calc: CalcId,
    line_width: Option<f64>,
    stroke_style: Option<String>,
    format: Option<String>,
    text_style: Option<String>,
    body_style: Option<String>,
    title: Option<String>,
    name: Option<String>,
    _kind: PhantomData<K>,
}

pub type LineItem = CalcItem<Line>;
pub type CubeItem = CalcItem<Cube>;

impl<K> CalcItem<K> {
    /// Asks the host for a new calculation item.
    ///
    /// A failure is reported to the page as `MakeCalc` and also returned.
    pub fn new(ctx: HostContext) -> Result<Self, HostError> {
        let calc = ctx
            .host()
            .make_calc(ctx.page())
            .inspect_err(|e| ctx.report("MakeCalc", e))?;
        Ok(Self {
            ctx,
            calc,
            line_width: None,
            stroke_style: None,
            format: None,
            text_style: None,
            body_style: None,
            title: None,
            name: None,
            _kind: PhantomData,
        })
    }

    pub fn calc(&self) -> CalcId {
        self.calc
    }

    fn forward(&self, style: Style<'_>) {
        if let Err(e) = self.ctx.host().calc_style(self.ctx.page(), self.calc, style) {
            self.ctx.report(style.property(), &e);
        }
    }

    pub fn set_line_width(&mut self, width: f64) {
        self.line_width = Some(width);
        self.forward(Style::LineWidth(width));
    }

    pub fn set_stroke_style(&mut self, style: &str) {
        self.stroke_style = Some(style.to_string());
        self.forward(Style::StrokeStyle(style));
    }

    pub fn set_format(&mut self, format: &str) {
        self.format = Some(format.to_string());
        self.forward(Style::Format(format));
    }

    pub fn set_text_style(&mut self, style: &str) {
        self.text_style = Some(style.to_string());
        self.forward(Style::TextStyle(style));
    }

    pub fn set_body_style(&mut self, style: &str) {
        self.body_style = Some(style.to_string());
        self.forward(Style::BodyStyle(style));
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
        self.forward(Style::Title(title));
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = Some(name.to_string());
        self.forward(Style::Name(name));
    }

    pub fn line_width(&self) -> Option<f64> {
        self.line_width
    }

    pub fn stroke_style(&self) -> Option<&str> {
        self.stroke_style.as_deref()
    }

    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    pub fn text_style(&self) -> Option<&str> {
        self.text_style.as_deref()
    }

    pub fn body_style(&self) -> Option<&str> {
        self.body_style.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// A time series chart.
#[derive(Debug)]
pub struct LineChart {
    ctx: HostContext,
    id: LineId,
}

impl LineChart {
    /// Creates the chart, bound to the UI element named `element` if given.
    pub fn new(ctx: HostContext, element: Option<&str>) -> Result<Self, HostError> {
        let id = ctx.host().make_line(ctx.page(), element)?;
        tracing::debug!(page = %ctx.page(), line = id.0, "Line chart created.");
        Ok(Self { ctx, id })
    }

    pub fn id(&self) -> LineId {
        self.id
    }

    /// Appends a point to `item`'s series.
    pub fn line_push(&self, item: &LineItem, rate: f64, time: u64) -> Result<(), HostError> {
        self.ctx.host().line_push(self.ctx.page(), item.calc(), rate, time)
    }
}

/// A chart of values bucketed by key, e.g. volume at price.
#[derive(Debug)]
pub struct CubeChart {
    ctx: HostContext,
    id: CubeId,
}

impl CubeChart {
    pub fn new(ctx: HostContext, element: Option<&str>) -> Result<Self, HostError> {
        let id = ctx.host().make_cube(ctx.page(), element)?;
        tracing::debug!(page = %ctx.page(), cube = id.0, "Cube chart created.");
        Ok(Self { ctx, id })
    }

    pub fn id(&self) -> CubeId {
        self.id
    }

    /// Adds `size` to the cell at `key`.
    pub fn cube_plus(&self, item: &CubeItem, key: f64, size: f64) -> Result<(), HostError> {
        self.ctx.host().cube_plus(self.ctx.page(), item.calc(), key, size)
    }

    pub fn cube_dele(&self, item: &CubeItem, key: f64) -> Result<(), HostError> {
        self.ctx.host().cube_dele(self.ctx.page(), item.calc(), key)
    }

    /// Overwrites the cell at `key` with `size`.
    pub fn cube_save(&self, item: &CubeItem, key: f64, size: f64) -> Result<(), HostError> {
        self.ctx.host().cube_save(self.ctx.page(), item.calc(), key, size)
    }

    pub fn cube_read(&self, item: &CubeItem, key: f64) -> Result<Option<f64>, HostError> {
        self.ctx.host().cube_read(self.ctx.page(), item.calc(), key)
    }

    /// Drops every cell of `item`.
    pub fn cube_free(&self, item: &CubeItem) -> Result<(), HostError> {
        self.ctx.host().cube_free(self.ctx.page(), item.calc())
    }

    pub fn cube_push(&self, item: &CubeItem, save: bool) -> Result<(), HostError> {
        self.ctx.host().cube_push(self.ctx.page(), item.calc(), save)
    }
}
