//! Replays a capture through the host delegation layer.
//!
//! `ChartingFeed` is a small charting script: it plots trade prices on a line
//! chart, accumulates traded volume at price on a cube chart and encodes every
//! event it sees.

use crate::capture::CapturedEvent;
use core_types::NullablePrice;
use events::{JsonEncoder, PayloadRef, RawEvent, select_payload};
use host::{
    CubeChart, CubeItem, Edit, Feed, FeedHandle, FeedSignal, HostContext, HostError, LineChart,
    LineItem,
};
use serde_json::{Value, json};

/// What a replay did, reported once the feed stops.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplayStats {
    pub events: usize,
    pub trades_plotted: usize,
    pub encoded_bytes: usize,
    pub conflicts: usize,
    pub host_failures: usize,
    pub renders: usize,
}

pub struct ChartingFeed {
    encoder: JsonEncoder,
    prices: LineChart,
    price_item: LineItem,
    volume: CubeChart,
    volume_item: CubeItem,
    stats: ReplayStats,
}

impl ChartingFeed {
    pub fn new(ctx: &HostContext, encoder: JsonEncoder, symbol: &str) -> Result<Self, HostError> {
        let prices = LineChart::new(ctx.clone(), Some("prices"))?;
        let mut price_item = LineItem::new(ctx.clone())?;
        price_item.set_name("last");
        price_item.set_title(&format!("{symbol} last trade"));
        price_item.set_line_width(1.5);

        let volume = CubeChart::new(ctx.clone(), Some("volume"))?;
        let mut volume_item = CubeItem::new(ctx.clone())?;
        volume_item.set_name("volume");
        volume_item.set_title(&format!("{symbol} volume at price"));

        Ok(Self {
            encoder,
            prices,
            price_item,
            volume,
            volume_item,
            stats: ReplayStats::default(),
        })
    }

    fn plot_trade(&mut self, event: &RawEvent) -> Result<bool, HostError> {
        let Some(PayloadRef::TradeSummary(trade)) = select_payload(event) else {
            return Ok(false);
        };
        let Some(price) = trade.price.to_price() else {
            return Ok(false);
        };
        let time = event.header.as_ref().and_then(|h| h.transact_time).unwrap_or(0);
        self.prices.line_push(&self.price_item, price as f64, time)?;
        self.volume
            .cube_plus(&self.volume_item, price as f64, f64::from(trade.quantity))?;
        Ok(true)
    }
}

impl Feed for ChartingFeed {
    fn on_open(&mut self, meta: &Value) {
        tracing::info!(%meta, "Replay opened.");
    }

    fn on_event(&mut self, symbol: &str, event: &RawEvent, real_time: bool) {
        self.stats.events += 1;
        match self.encoder.event_to_json(event) {
            Ok(json) => {
                self.stats.encoded_bytes += json.len();
                tracing::trace!(symbol, real_time, %json, "Event encoded.");
            }
            Err(e) => {
                self.stats.conflicts += 1;
                tracing::warn!(symbol, error = %e, "Event could not be encoded.");
            }
        }
        match self.plot_trade(event) {
            Ok(true) => self.stats.trades_plotted += 1,
            Ok(false) => {}
            Err(e) => {
                self.stats.host_failures += 1;
                tracing::warn!(symbol, error = %e, "Failed to plot trade.");
            }
        }
    }

    fn on_render(&mut self) {
        self.stats.renders += 1;
        if let Err(e) = self.volume.cube_push(&self.volume_item, false) {
            self.stats.host_failures += 1;
            tracing::warn!(error = %e, "Failed to publish volume cube.");
        }
    }

    fn on_stop(&mut self) {
        if let Err(e) = self.volume.cube_push(&self.volume_item, true) {
            self.stats.host_failures += 1;
            tracing::warn!(error = %e, "Failed to save volume cube.");
        }
    }
}

/// Drives `events` through a [`ChartingFeed`] subscribed to `symbol`.
///
/// The host is asked to render after every `render_every` events and once
/// more after loading finishes.
pub fn run_replay(
    ctx: &HostContext,
    encoder: JsonEncoder,
    symbol: &str,
    events: Vec<CapturedEvent>,
    real_time: bool,
    render_every: usize,
) -> Result<ReplayStats, HostError> {
    Edit::new(ctx.clone()).set_symbol(symbol)?;
    host::focus(ctx)?;

    let feed = ChartingFeed::new(ctx, encoder, symbol)?;
    let mut handle = FeedHandle::open(ctx.clone(), symbol, feed)?;
    handle.dispatch(FeedSignal::Open(json!({ "symbol": symbol, "events": events.len() })));

    let render_every = render_every.max(1);
    for (index, captured) in events.into_iter().enumerate() {
        handle.dispatch(FeedSignal::Event {
            symbol: symbol.to_string(),
            event: captured.event,
            real_time,
        });
        if (index + 1) % render_every == 0 {
            handle.dispatch(FeedSignal::Render);
        }
    }

    handle.dispatch(FeedSignal::Load);
    handle.dispatch(FeedSignal::Render);
    handle.dispatch(FeedSignal::Stop);
    Ok(handle.into_feed().stats)
}
