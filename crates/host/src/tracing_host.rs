use crate::context::{CalcId, CubeId, Host, LineId, PageId, Style};
use crate::error::HostError;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// A stand-in runtime that logs every delegated call.
///
/// Page values and cube cells are kept in memory so reads return what was
/// written. Used to replay captured feeds outside the charting application.
#[derive(Debug, Default)]
pub struct TracingHost {
    next_id: AtomicU64,
    pages: Mutex<HashMap<(PageId, u32), String>>,
    cells: Mutex<HashMap<(CalcId, u64), f64>>,
}

impl TracingHost {
    pub fn new() -> Self {
        Self::default()
    }

    fn next(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn poisoned(op: &'static str) -> HostError {
        HostError::call(op, "state lock poisoned")
    }
}

impl Host for TracingHost {
    fn page_save(&self, page: PageId, key: u32, value: &str) -> Result<(), HostError> {
        tracing::debug!(%page, key, value, "page_save");
        let mut pages = self.pages.lock().map_err(|_| Self::poisoned("page_save"))?;
        pages.insert((page, key), value.to_string());
        Ok(())
    }

    fn page_read(&self, page: PageId, key: u32) -> Result<Option<String>, HostError> {
        let pages = self.pages.lock().map_err(|_| Self::poisoned("page_read"))?;
        Ok(pages.get(&(page, key)).cloned())
    }

    fn page_error(&self, page: PageId, source: &str, message: &str) {
        tracing::error!(%page, source, "{message}");
    }

    fn page_select(&self, page: PageId) -> Result<(), HostError> {
        tracing::debug!(%page, "page_select");
        Ok(())
    }

    fn make_line(&self, page: PageId, element: Option<&str>) -> Result<LineId, HostError> {
        let id = LineId(self.next());
        tracing::info!(%page, line = id.0, ?element, "make_line");
        Ok(id)
    }

    fn line_push(&self, page: PageId, calc: CalcId, rate: f64, time: u64) -> Result<(), HostError> {
        tracing::trace!(%page, calc = calc.0, rate, time, "line_push");
        Ok(())
    }

    fn make_cube(&self, page: PageId, element: Option<&str>) -> Result<CubeId, HostError> {
        let id = CubeId(self.next());
        tracing::info!(%page, cube = id.0, ?element, "make_cube");
        Ok(id)
    }

    fn cube_plus(&self, page: PageId, calc: CalcId, key: f64, size: f64) -> Result<(), HostError> {
        tracing::trace!(%page, calc = calc.0, key, size, "cube_plus");
        let mut cells = self.cells.lock().map_err(|_| Self::poisoned("cube_plus"))?;
        *cells.entry((calc, key.to_bits())).or_default() += size;
        Ok(())
    }

    fn cube_dele(&self, page: PageId, calc: CalcId, key: f64) -> Result<(), HostError> {
        tracing::trace!(%page, calc = calc.0, key, "cube_dele");
        let mut cells = self.cells.lock().map_err(|_| Self::poisoned("cube_dele"))?;
        cells.remove(&(calc, key.to_bits()));
        Ok(())
    }

    fn cube_save(&self, page: PageId, calc: CalcId, key: f64, size: f64) -> Result<(), HostError> {
        tracing::trace!(%page, calc = calc.0, key, size, "cube_save");
        let mut cells = self.cells.lock().map_err(|_| Self::poisoned("cube_save"))?;
        cells.insert((calc, key.to_bits()), size);
        Ok(())
    }

    fn cube_read(&self, _page: PageId, calc: CalcId, key: f64) -> Result<Option<f64>, HostError> {
        let cells = self.cells.lock().map_err(|_| Self::poisoned("cube_read"))?;
        Ok(cells.get(&(calc, key.to_bits())).copied())
    }

    fn cube_free(&self, page: PageId, calc: CalcId) -> Result<(), HostError> {
        tracing::debug!(%page, calc = calc.0, "cube_free");
        let mut cells = self.cells.lock().map_err(|_| Self::poisoned("cube_free"))?;
        cells.retain(|(owner, _), _| *owner != calc);
        Ok(())
    }

    fn cube_push(&self, page: PageId, calc: CalcId, save: bool) -> Result<(), HostError> {
        tracing::debug!(%page, calc = calc.0, save, "cube_push");
        Ok(())
    }

    fn make_calc(&self, page: PageId) -> Result<CalcId, HostError> {
        let id = CalcId(self.next());
        tracing::debug!(%page, calc = id.0, "make_calc");
        Ok(id)
    }

    fn calc_style(&self, page: PageId, calc: CalcId, style: Style<'_>) -> Result<(), HostError> {
        tracing::debug!(%page, calc = calc.0, property = style.property(), ?style, "calc_style");
        Ok(())
    }

    fn make_feed(&self, page: PageId, symbol: &str) -> Result<(), HostError> {
        tracing::info!(%page, symbol, "make_feed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remembers_page_values_per_page() {
        let host = TracingHost::new();
        host.page_save(PageId(1), 2001, "ESZ6").unwrap();
        assert_eq!(host.page_read(PageId(1), 2001).unwrap().as_deref(), Some("ESZ6"));
        assert_eq!(host.page_read(PageId(2), 2001).unwrap(), None);
    }

    #[test]
    fn cube_cells_accumulate_and_free() {
        let host = TracingHost::new();
        let calc = host.make_calc(PageId(1)).unwrap();
        host.cube_plus(PageId(1), calc, 10.0, 1.5).unwrap();
        host.cube_plus(PageId(1), calc, 10.0, 1.0).unwrap();
        assert_eq!(host.cube_read(PageId(1), calc, 10.0).unwrap(), Some(2.5));
        host.cube_free(PageId(1), calc).unwrap();
        assert_eq!(host.cube_read(PageId(1), calc, 10.0).unwrap(), None);
    }

    #[test]
    fn handles_are_unique() {
        let host = TracingHost::new();
        let line = host.make_line(PageId(1), None).unwrap();
        let calc = host.make_calc(PageId(1)).unwrap();
        assert_ne!(line.0, calc.0);
    }
}
