use crate::enums::{
    Aggressor, BookAction, BookType, DailyStatisticsType, EventIndicator, HaltReason, PutOrCall,
    SecurityEvent, SecurityType, SessionStatisticsType, SettleType, StateType, TransactionType,
    UnionId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

// All structs use the host's camelCase keys on the wire.

/// Metadata shared by every event.
///
/// The header is copied field for field: a key the host did not send stays
/// absent, and keys this crate has no field for are kept in `extra` and
/// written back unchanged. `union_id` holds the raw tag as sent, so a value
/// outside the known set (or outside a byte) still decodes. Use
/// [`Header::union_id`] to resolve it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Header {
    #[serde(rename = "unionID", skip_serializing_if = "Option::is_none")]
    pub union_id: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence: Option<u64>,
    /// Nanoseconds since the Unix epoch at which the exchange sent the packet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sending_time: Option<u64>,
    /// Nanoseconds since the Unix epoch of the matching engine transaction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transact_time: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_indicator: Option<EventIndicator>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Header {
    /// A header carrying only the tag.
    pub fn new(union_id: UnionId) -> Self {
        Self {
            union_id: Some(Number::from(union_id.as_u8())),
            ..Self::default()
        }
    }

    /// The discriminant, or `None` when the tag is absent or not a known id.
    pub fn union_id(&self) -> Option<UnionId> {
        let raw = self.union_id.as_ref()?.as_u64()?;
        let raw = u8::try_from(raw).ok()?;
        UnionId::try_from(raw).ok()
    }

    pub fn transact_timestamp(&self) -> Option<DateTime<Utc>> {
        i64::try_from(self.transact_time?)
            .ok()
            .map(DateTime::from_timestamp_nanos)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionMarker {
    pub transaction_type: TransactionType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelReset {
    pub channel_id: u16,
    pub reset_time: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeSummary {
    /// Fixed-point trade price; `PRICE_NULL_64` when absent.
    pub price: i64,
    pub quantity: u32,
    pub number_of_orders: u32,
    pub aggressor: Aggressor,
    pub trade_id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeMatch {
    pub price: i64,
    pub quantity: u32,
    pub order_id: u64,
    pub aggressor: Aggressor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeUpdate {
    pub volume: u64,
}

/// A quote within the first `level` levels of the book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookLevel {
    pub price: i64,
    pub quantity: i32,
    pub number_of_orders: i32,
    pub level: u8,
    pub book_type: BookType,
    pub action: BookAction,
}

/// A single order at any price level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBook {
    pub order_id: u64,
    pub priority: u64,
    pub price: i64,
    pub quantity: i32,
    pub book_type: BookType,
    pub action: BookAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityStatus {
    pub group: String,
    pub asset: String,
    pub security_type: SecurityType,
    pub halt_reason: HaltReason,
    pub security_event: SecurityEvent,
    /// Trading date as `YYYYMMDD`.
    pub session_date: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStatistics {
    pub price: i64,
    pub size: i32,
    pub stat_type: DailyStatisticsType,
    pub settle_type: SettleType,
    pub session_date: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatistics {
    pub price: i64,
    pub size: i32,
    pub stat_type: SessionStatisticsType,
    pub state_type: StateType,
    pub action: BookAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitsBanding {
    pub high_limit_price: i64,
    pub low_limit_price: i64,
    pub max_price_variation: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearingPrice {
    /// 32-bit price; `PRICE_NULL_32` when absent.
    pub price: i32,
    pub settle_type: SettleType,
    pub put_or_call: PutOrCall,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn header_uses_host_key_names() {
        let header = Header {
            union_id: Some(Number::from(3_u8)),
            sequence: Some(10),
            sending_time: Some(1),
            transact_time: Some(2),
            event_indicator: Some(EventIndicator::END_OF_EVENT),
            extra: Map::new(),
        };
        let value = serde_json::to_value(&header).unwrap();
        assert_eq!(
            value,
            json!({
                "unionID": 3,
                "sequence": 10,
                "sendingTime": 1,
                "transactTime": 2,
                "eventIndicator": 128
            })
        );
    }

    #[test]
    fn absent_fields_stay_absent_and_unknown_keys_are_kept() {
        let sent = json!({"unionID": 255, "channel": 7, "extra": "x"});
        let header: Header = serde_json::from_value(sent.clone()).unwrap();
        assert_eq!(header.union_id(), Some(UnionId::NotSet));
        assert_eq!(header.sequence, None);
        assert_eq!(header.extra.get("channel"), Some(&json!(7)));
        assert_eq!(serde_json::to_value(&header).unwrap(), sent);
    }

    #[test]
    fn empty_header_has_no_tag() {
        let header: Header = serde_json::from_str("{}").unwrap();
        assert_eq!(header, Header::default());
        assert_eq!(header.union_id(), None);
        assert_eq!(serde_json::to_string(&header).unwrap(), "{}");
    }

    #[rstest]
    #[case::unknown("99")]
    #[case::wider_than_a_byte("300")]
    #[case::negative("-1")]
    #[case::fractional("2.5")]
    fn unrecognized_tags_decode_without_resolving(#[case] tag: &str) {
        let header: Header =
            serde_json::from_str(&format!(r#"{{"unionID": {tag}, "sequence": 1}}"#)).unwrap();
        assert_eq!(header.union_id(), None);
        assert_eq!(header.union_id.map(|n| n.to_string()).as_deref(), Some(tag));
        assert_eq!(header.sequence, Some(1));
    }

    #[test]
    fn transact_timestamp_from_nanos() {
        let mut header = Header::new(UnionId::TradeSummary);
        assert_eq!(header.transact_timestamp(), None);

        header.transact_time = Some(1_700_000_000_123_456_789);
        let ts = header.transact_timestamp().unwrap();
        assert_eq!(ts.timestamp(), 1_700_000_000);
        assert_eq!(ts.timestamp_subsec_nanos(), 123_456_789);

        header.transact_time = Some(u64::MAX);
        assert_eq!(header.transact_timestamp(), None);
    }

    #[test]
    fn payload_enums_are_numeric_codes() {
        let level = BookLevel {
            price: 101_250,
            quantity: 5,
            number_of_orders: 2,
            level: 1,
            book_type: BookType::Ask,
            action: BookAction::Change,
        };
        let value = serde_json::to_value(&level).unwrap();
        assert_eq!(value["bookType"], json!(83));
        assert_eq!(value["action"], json!(1));
        assert_eq!(value["numberOfOrders"], json!(2));
    }
}
