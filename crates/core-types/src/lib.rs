//! # Chartfeed Core Types
//!
//! Wire-level vocabulary of the charting host's market-data feed: the numeric
//! enumerations, the price sentinels, the event header and every payload
//! struct. This crate has no knowledge of serialization strategy or of the
//! host itself.

pub mod enums;
pub mod error;
pub mod price;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{
    Aggressor, BookAction, BookType, DailyStatisticsType, EventIndicator, HaltReason, PutOrCall,
    SecurityEvent, SecurityType, SessionStatisticsType, SettleType, StateType, TransactionType,
    UnionId,
};
pub use error::CoreError;
pub use price::{GROUP_SETTLE_ID, NullablePrice, PRICE_NULL_32, PRICE_NULL_64};
pub use structs::{
    BookLevel, ChannelReset, ClearingPrice, DailyStatistics, Header, LimitsBanding, OrderBook,
    SecurityStatus, SessionStatistics, TradeMatch, TradeSummary, TransactionMarker, VolumeUpdate,
};
