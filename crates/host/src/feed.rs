use crate::context::HostContext;
use crate::error::HostError;
use events::RawEvent;
use serde_json::Value;

/// Callbacks the host drives once a page subscribes to a symbol's feed.
///
/// Every callback defaults to doing nothing; a script overrides the ones it
/// needs.
pub trait Feed {
    /// The feed opened; `meta` describes the instrument.
    fn on_open(&mut self, _meta: &Value) {}

    /// Historical events finished loading.
    fn on_load(&mut self) {}

    /// One market event. `real_time` is false while history is replayed.
    fn on_event(&mut self, _symbol: &str, _event: &RawEvent, _real_time: bool) {}

    /// The host is about to draw a frame.
    fn on_render(&mut self) {}

    fn on_stop(&mut self) {}
}

/// A lifecycle notification from the host to a feed.
#[derive(Debug, Clone)]
pub enum FeedSignal {
    Open(Value),
    Load,
    Event {
        symbol: String,
        event: RawEvent,
        real_time: bool,
    },
    Render,
    Stop,
}

/// A feed registered with the host for one symbol.
///
/// The host delivers [`FeedSignal`]s through [`FeedHandle::dispatch`]. After
/// `Stop` the feed receives nothing further.
#[derive(Debug)]
pub struct FeedHandle<F> {
    ctx: HostContext,
    symbol: String,
    feed: F,
    stopped: bool,
}

impl<F: Feed> FeedHandle<F> {
    /// Subscribes the page to `symbol` and attaches `feed` to it.
    pub fn open(ctx: HostContext, symbol: &str, feed: F) -> Result<Self, HostError> {
        ctx.host().make_feed(ctx.page(), symbol)?;
        tracing::info!(page = %ctx.page(), symbol, "Feed opened.");
        Ok(Self {
            ctx,
            symbol: symbol.to_string(),
            feed,
            stopped: false,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn context(&self) -> &HostContext {
        &self.ctx
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn feed(&self) -> &F {
        &self.feed
    }

    pub fn feed_mut(&mut self) -> &mut F {
        &mut self.feed
    }

    pub fn into_feed(self) -> F {
        self.feed
    }

    pub fn dispatch(&mut self, signal: FeedSignal) {
        if self.stopped {
            tracing::debug!(symbol = %self.symbol, ?signal, "Feed stopped, signal dropped.");
            return;
        }
        match signal {
            FeedSignal::Open(meta) => self.feed.on_open(&meta),
            FeedSignal::Load => self.feed.on_load(),
            FeedSignal::Event {
                symbol,
                event,
                real_time,
            } => self.feed.on_event(&symbol, &event, real_time),
            FeedSignal::Render => self.feed.on_render(),
            FeedSignal::Stop => {
                self.stopped = true;
                self.feed.on_stop();
                tracing::info!(symbol = %self.symbol, "Feed stopped.");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::PageId;
    use crate::testing::{Call, RecordingHost};
    use core_types::{Header, UnionId};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Arc;

    /// Uses only the default callbacks.
    struct Silent;

    impl Feed for Silent {}

    #[derive(Default)]
    struct Journal {
        entries: Vec<String>,
    }

    impl Feed for Journal {
        fn on_open(&mut self, meta: &Value) {
            self.entries.push(format!("open {}", meta["tick"]));
        }

        fn on_load(&mut self) {
            self.entries.push("load".to_string());
        }

        fn on_event(&mut self, symbol: &str, event: &RawEvent, real_time: bool) {
            let union_id = event.header.as_ref().and_then(Header::union_id);
            self.entries.push(format!("event {symbol} {union_id:?} {real_time}"));
        }

        fn on_stop(&mut self) {
            self.entries.push("stop".to_string());
        }
    }

    fn event() -> RawEvent {
        RawEvent {
            header: Some(Header::new(UnionId::VolumeUpdate)),
            ..RawEvent::default()
        }
    }

    #[test]
    fn open_subscribes_through_the_host() {
        let host = Arc::new(RecordingHost::default());
        let ctx = HostContext::new(host.clone(), PageId(2));
        let handle = FeedHandle::open(ctx, "CLZ6", Silent).unwrap();
        assert_eq!(handle.symbol(), "CLZ6");
        assert_eq!(host.calls(), vec![(PageId(2), Call::MakeFeed("CLZ6".to_string()))]);
    }

    #[test]
    fn signals_reach_the_feed_in_order() {
        let host = Arc::new(RecordingHost::default());
        let ctx = HostContext::new(host, PageId(1));
        let mut handle = FeedHandle::open(ctx, "ESZ6", Journal::default()).unwrap();

        handle.dispatch(FeedSignal::Open(json!({"tick": 25})));
        handle.dispatch(FeedSignal::Event {
            symbol: "ESZ6".to_string(),
            event: event(),
            real_time: false,
        });
        handle.dispatch(FeedSignal::Load);
        handle.dispatch(FeedSignal::Render);
        handle.dispatch(FeedSignal::Stop);
        handle.dispatch(FeedSignal::Load);

        assert!(handle.is_stopped());
        assert_eq!(
            handle.into_feed().entries,
            vec!["open 25", "event ESZ6 Some(VolumeUpdate) false", "load", "stop"]
        );
    }

    #[test]
    fn default_callbacks_are_no_ops() {
        let host = Arc::new(RecordingHost::default());
        let ctx = HostContext::new(host.clone(), PageId(1));
        let mut handle = FeedHandle::open(ctx, "GC", Silent).unwrap();
        handle.dispatch(FeedSignal::Open(Value::Null));
        handle.dispatch(FeedSignal::Render);
        assert_eq!(host.ops().len(), 1);
    }

    #[test]
    fn subscription_failure_propagates() {
        let host = Arc::new(RecordingHost::default());
        host.fail("make_feed");
        let result = FeedHandle::open(HostContext::new(host, PageId(1)), "GC", Silent);
        assert!(result.is_err());
    }
}
