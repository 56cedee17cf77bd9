//! # Chartfeed Host
//!
//! The delegation layer between a charting script and the host runtime it is
//! loaded into. The runtime is injected as a [`Host`] trait object inside a
//! [`HostContext`]; every wrapper here forwards to it and owns no chart state
//! of its own.
//!
//! - [`Edit`]: page-persisted symbol and date inputs.
//! - [`LineChart`], [`CubeChart`] and their [`LineItem`] / [`CubeItem`] series.
//! - [`Feed`] / [`FeedHandle`]: market-data subscription and lifecycle callbacks.
//! - [`report_script_error`] and [`focus`]: page-level UI hooks.

pub mod chart;
pub mod context;
pub mod edit;
pub mod error;
pub mod feed;
pub mod page;
pub mod tracing_host;

#[cfg(test)]
mod testing;

pub use chart::{CalcItem, CubeChart, CubeItem, LineChart, LineItem};
pub use context::{CalcId, CubeId, Host, HostContext, LineId, PageId, Style};
pub use edit::{EDIT_DATE, EDIT_SYMBOL, Edit};
pub use error::HostError;
pub use feed::{Feed, FeedHandle, FeedSignal};
pub use page::{focus, report_script_error, script_error_text};
pub use tracing_host::TracingHost;
