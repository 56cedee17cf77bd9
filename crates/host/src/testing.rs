//! A host that records every call, for exercising the wrappers.

use crate::context::{CalcId, CubeId, Host, LineId, PageId, Style};
use crate::error::HostError;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    PageSave { key: u32, value: String },
    PageRead { key: u32 },
    PageError { source: String, message: String },
    PageSelect,
    MakeLine(Option<String>),
    LinePush { calc: CalcId, rate: f64, time: u64 },
    MakeCube(Option<String>),
    CubePlus { calc: CalcId, key: f64, size: f64 },
    CubeDele { calc: CalcId, key: f64 },
    CubeSave { calc: CalcId, key: f64, size: f64 },
    CubeRead { calc: CalcId, key: f64 },
    CubeFree(CalcId),
    CubePush { calc: CalcId, save: bool },
    MakeCalc,
    CalcStyle { calc: CalcId, property: &'static str, value: String },
    MakeFeed(String),
}

#[derive(Default)]
pub struct RecordingHost {
    calls: Mutex<Vec<(PageId, Call)>>,
    store: Mutex<HashMap<(PageId, u32), String>>,
    cells: Mutex<HashMap<(u64, u64), f64>>,
    failing: Mutex<HashSet<&'static str>>,
    next_id: AtomicU64,
}

impl RecordingHost {
    /// Makes every later call to `op` fail.
    pub fn fail(&self, op: &'static str) {
        self.failing.lock().unwrap().insert(op);
    }

    pub fn calls(&self) -> Vec<(PageId, Call)> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls without their page, for pages that do not matter to a test.
    pub fn ops(&self) -> Vec<Call> {
        self.calls().into_iter().map(|(_, call)| call).collect()
    }

    fn record(&self, op: &'static str, page: PageId, call: Call) -> Result<(), HostError> {
        self.calls.lock().unwrap().push((page, call));
        if self.failing.lock().unwrap().contains(op) {
            return Err(HostError::call(op, "injected failure"));
        }
        Ok(())
    }

    fn next(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed) + 1
    }
}

impl Host for RecordingHost {
    fn page_save(&self, page: PageId, key: u32, value: &str) -> Result<(), HostError> {
        let call = Call::PageSave {
            key,
            value: value.to_string(),
        };
        self.record("page_save", page, call)?;
        self.store.lock().unwrap().insert((page, key), value.to_string());
        Ok(())
    }

    fn page_read(&self, page: PageId, key: u32) -> Result<Option<String>, HostError> {
        self.record("page_read", page, Call::PageRead { key })?;
        Ok(self.store.lock().unwrap().get(&(page, key)).cloned())
    }

    fn page_error(&self, page: PageId, source: &str, message: &str) {
        let call = Call::PageError {
            source: source.to_string(),
            message: message.to_string(),
        };
        self.calls.lock().unwrap().push((page, call));
    }

    fn page_select(&self, page: PageId) -> Result<(), HostError> {
        self.record("page_select", page, Call::PageSelect)
    }

    fn make_line(&self, page: PageId, element: Option<&str>) -> Result<LineId, HostError> {
        self.record("make_line", page, Call::MakeLine(element.map(str::to_string)))?;
        Ok(LineId(self.next()))
    }

    fn line_push(&self, page: PageId, calc: CalcId, rate: f64, time: u64) -> Result<(), HostError> {
        self.record("line_push", page, Call::LinePush { calc, rate, time })
    }

    fn make_cube(&self, page: PageId, element: Option<&str>) -> Result<CubeId, HostError> {
        self.record("make_cube", page, Call::MakeCube(element.map(str::to_string)))?;
        Ok(CubeId(self.next()))
    }

    fn cube_plus(&self, page: PageId, calc: CalcId, key: f64, size: f64) -> Result<(), HostError> {
        self.record("cube_plus", page, Call::CubePlus { calc, key, size })?;
        *self.cells.lock().unwrap().entry((calc.0, key.to_bits())).or_default() += size;
        Ok(())
    }

    fn cube_dele(&self, page: PageId, calc: CalcId, key: f64) -> Result<(), HostError> {
        self.record("cube_dele", page, Call::CubeDele { calc, key })?;
        self.cells.lock().unwrap().remove(&(calc.0, key.to_bits()));
        Ok(())
    }

    fn cube_save(&self, page: PageId, calc: CalcId, key: f64, size: f64) -> Result<(), HostError> {
        self.record("cube_save", page, Call::CubeSave { calc, key, size })?;
        self.cells.lock().unwrap().insert((calc.0, key.to_bits()), size);
        Ok(())
    }

    fn cube_read(&self, page: PageId, calc: CalcId, key: f64) -> Result<Option<f64>, HostError> {
        self.record("cube_read", page, Call::CubeRead { calc, key })?;
        Ok(self.cells.lock().unwrap().get(&(calc.0, key.to_bits())).copied())
    }

    fn cube_free(&self, page: PageId, calc: CalcId) -> Result<(), HostError> {
        self.record("cube_free", page, Call::CubeFree(calc))?;
        self.cells.lock().unwrap().retain(|(owner, _), _| *owner != calc.0);
        Ok(())
    }

    fn cube_push(&self, page: PageId, calc: CalcId, save: bool) -> Result<(), HostError> {
        self.record("cube_push", page, Call::CubePush { calc, save })
    }

    fn make_calc(&self, page: PageId) -> Result<CalcId, HostError> {
        self.record("make_calc", page, Call::MakeCalc)?;
        Ok(CalcId(self.next()))
    }

    fn calc_style(&self, page: PageId, calc: CalcId, style: Style<'_>) -> Result<(), HostError> {
        let value = match style {
            Style::LineWidth(width) => width.to_string(),
            Style::StrokeStyle(s)
            | Style::Format(s)
            | Style::TextStyle(s)
            | Style::BodyStyle(s)
            | Style::Title(s)
            | Style::Name(s) => s.to_string(),
        };
        let call = Call::CalcStyle {
            calc,
            property: style.property(),
            value,
        };
        self.record("calc_style", page, call)
    }

    fn make_feed(&self, page: PageId, symbol: &str) -> Result<(), HostError> {
        self.record("make_feed", page, Call::MakeFeed(symbol.to_string()))
    }
}
