use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The discriminant carried in every event header.
///
/// It decides which payload field of an event is populated. The numeric
/// values are wire-stable and must never be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum UnionId {
    /// Summary information about trades.
    TradeSummary = 0,
    /// A match of a trade event.
    TradeMatch = 1,
    /// Volume change after a `TradeSummary`, or on its own when two implied
    /// quotes are matched.
    VolumeUpdate = 2,
    /// A quote within the first n levels of the book.
    BookLevel = 3,
    /// A quote at any price level.
    OrderBook = 4,
    /// A security group market state change.
    SecurityStatus = 5,
    /// Information about a complete session.
    DailyStatistics = 6,
    /// Information about the session while it is running.
    SessionStatistics = 7,
    /// The daily limits for the current session.
    LimitsBanding = 8,
    /// The channel carrying the contract was reset.
    ChannelReset = 9,
    /// Start or end of a bundle the exchange processed together.
    TransactionMarker = 10,
    #[deprecated(note = "never carried a payload; kept for wire stability")]
    Test = 11,
    ClearingPrice = 12,
    /// The feed knows the message but has no mapping for it.
    NotMapped = 250,
    /// No variant selected.
    NotSet = 255,
}

impl UnionId {
    #[allow(deprecated)]
    pub const ALL: [UnionId; 15] = [
        UnionId::TradeSummary,
        UnionId::TradeMatch,
        UnionId::VolumeUpdate,
        UnionId::BookLevel,
        UnionId::OrderBook,
        UnionId::SecurityStatus,
        UnionId::DailyStatistics,
        UnionId::SessionStatistics,
        UnionId::LimitsBanding,
        UnionId::ChannelReset,
        UnionId::TransactionMarker,
        UnionId::Test,
        UnionId::ClearingPrice,
        UnionId::NotMapped,
        UnionId::NotSet,
    ];

    /// Returns the raw wire value.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Whether an event with this discriminant carries a payload at all.
    #[allow(deprecated)]
    pub fn carries_payload(self) -> bool {
        !matches!(self, UnionId::NotSet | UnionId::NotMapped | UnionId::Test)
    }

    /// The host's field name for the variant's payload, e.g. `tradeSummary`.
    #[allow(deprecated)]
    pub fn field_name(self) -> Option<&'static str> {
        let name = match self {
            UnionId::TradeSummary => "tradeSummary",
            UnionId::TradeMatch => "tradeMatch",
            UnionId::VolumeUpdate => "volumeUpdate",
            UnionId::BookLevel => "bookLevel",
            UnionId::OrderBook => "orderBook",
            UnionId::SecurityStatus => "securityStatus",
            UnionId::DailyStatistics => "dailyStatistics",
            UnionId::SessionStatistics => "sessionStatistics",
            UnionId::LimitsBanding => "limitsBanding",
            UnionId::ChannelReset => "channelReset",
            UnionId::TransactionMarker => "transactionMarker",
            UnionId::ClearingPrice => "clearingPrice",
            UnionId::Test | UnionId::NotMapped | UnionId::NotSet => return None,
        };
        Some(name)
    }
}

impl TryFrom<u8> for UnionId {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        UnionId::ALL
            .into_iter()
            .find(|id| id.as_u8() == value)
            .ok_or(CoreError::UnknownUnionId(value))
    }
}

impl From<UnionId> for u8 {
    fn from(value: UnionId) -> Self {
        value.as_u8()
    }
}

impl fmt::Display for UnionId {
    #[allow(deprecated)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UnionId::TradeSummary => "TradeSummary",
            UnionId::TradeMatch => "TradeMatch",
            UnionId::VolumeUpdate => "VolumeUpdate",
            UnionId::BookLevel => "BookLevel",
            UnionId::OrderBook => "OrderBook",
            UnionId::SecurityStatus => "SecurityStatus",
            UnionId::DailyStatistics => "DailyStatistics",
            UnionId::SessionStatistics => "SessionStatistics",
            UnionId::LimitsBanding => "LimitsBanding",
            UnionId::ChannelReset => "ChannelReset",
            UnionId::TransactionMarker => "TransactionMarker",
            UnionId::Test => "Test",
            UnionId::ClearingPrice => "ClearingPrice",
            UnionId::NotMapped => "NotMapped",
            UnionId::NotSet => "NotSet",
        };
        f.write_str(name)
    }
}

/// Declares a payload enumeration that travels as a single byte.
///
/// Codes outside the known set decode to `Other(code)` and encode back to the
/// same byte, so a newer feed never breaks decoding.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $value:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "u8", into = "u8")]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
            Other(u8),
        }

        impl From<u8> for $name {
            fn from(value: u8) -> Self {
                match value {
                    $( $value => $name::$variant, )+
                    other => $name::Other(other),
                }
            }
        }

        impl From<$name> for u8 {
            fn from(value: $name) -> Self {
                match value {
                    $( $name::$variant => $value, )+
                    $name::Other(other) => other,
                }
            }
        }
    };
}

wire_enum! {
    /// Side that initiated a trade.
    pub enum Aggressor {
        NoAggressor = 0,
        Buy = 1,
        Sell = 2,
    }
}

wire_enum! {
    pub enum HaltReason {
        NotSet = 255,
        GroupSchedule = 0,
        SurveillanceIntervention = 1,
        MarketEvent = 2,
        InstrumentActivation = 3,
        InstrumentExpiration = 4,
        Unknown = 5,
        RecoveryInProcess = 6,
    }
}

wire_enum! {
    /// Trading state of a security group.
    pub enum SecurityType {
        NotSet = 0,
        TradingHalt = 2,
        Close = 4,
        NewPriceIndication = 15,
        ReadyToTrade = 17,
        NotAvailableForTrading = 18,
        UnknownOrInvalid = 20,
        PreOpen = 21,
        PreCross = 24,
        Cross = 25,
        PostClose = 26,
        NoChange = 103,
        /// ICE only.
        PreClose = 150,
        /// EUREX only.
        Restricted = 200,
        /// EUREX only.
        Freeze = 201,
    }
}

wire_enum! {
    pub enum SecurityEvent {
        NoEvent = 0,
        NoCancel = 1,
        ResetStatistics = 4,
        ImpliedMatchingOn = 5,
        ImpliedMatchingOff = 6,
    }
}

wire_enum! {
    /// Book side of a quote. The codes are ASCII letters on the wire.
    pub enum BookType {
        NotSet = 85,
        Bid = 66,
        Ask = 83,
        ImpliedBid = 98,
        ImpliedAsk = 115,
        BookReset = 82,
    }
}

wire_enum! {
    pub enum DailyStatisticsType {
        SettlementPrice = 54,
        ClearedVolume = 66,
        OpenInterest = 67,
        FixingPrice = 87,
    }
}

wire_enum! {
    pub enum BookAction {
        NotSet = 255,
        New = 0,
        Change = 1,
        Delete = 2,
        DeleteThru = 3,
        DeleteFrom = 4,
        Overlay = 5,
        Replace = 6,
    }
}

wire_enum! {
    pub enum SessionStatisticsType {
        NotSet = 127,
        OpenPrice = 0,
        HighTrade = 1,
        LowTrade = 2,
        LastTrade = 3,
        HighestBid = 4,
        LowestAsk = 5,
        ClosePrice = 6,
    }
}

wire_enum! {
    pub enum StateType {
        NotSet = 255,
        DailyOpenPrice = 0,
        IndicativeOpeningPrice = 5,
        DailyClosePrice = 10,
    }
}

wire_enum! {
    pub enum PutOrCall {
        NotSet = 255,
        Put = 0,
        Call = 1,
    }
}

wire_enum! {
    /// Marks a `TransactionMarker` as the start or end of a bundle.
    pub enum TransactionType {
        NotSet = 255,
        TransactionStart = 0,
        TransactionEnd = 1,
    }
}

/// Declares a byte-wide bit set with named flags.
macro_rules! wire_flags {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $( $(#[$fmeta:meta])* const $flag:ident = $value:literal; )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u8);

        impl $name {
            $( $(#[$fmeta])* pub const $flag: Self = Self($value); )+

            pub fn bits(self) -> u8 {
                self.0
            }

            /// True when every bit of `other` is set in `self`.
            pub fn contains(self, other: Self) -> bool {
                self.0 & other.0 == other.0
            }
        }

        impl std::ops::BitOr for $name {
            type Output = Self;

            fn bitor(self, rhs: Self) -> Self {
                Self(self.0 | rhs.0)
            }
        }
    };
}

wire_flags! {
    /// Qualifiers of a settlement price.
    pub struct SettleType {
        const FINAL = 1;
        const ACTUAL = 2;
        const ROUNDED = 4;
        const INTRADAY = 8;
        const RESERVED_BITS = 16;
        const NULL_VALUE = 128;
    }
}

wire_flags! {
    /// Position of a message within the exchange event it belongs to.
    pub struct EventIndicator {
        const NOT_SET = 0;
        const LAST_OF_TYPE = 1;
        const END_OF_EVENT = 128;
    }
}
