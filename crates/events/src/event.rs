use core_types::{
    BookLevel, ChannelReset, ClearingPrice, DailyStatistics, Header, LimitsBanding, OrderBook,
    SecurityStatus, SessionStatistics, TradeMatch, TradeSummary, TransactionMarker, UnionId,
    VolumeUpdate,
};
use serde::de::DeserializeOwned;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value};

/// One occurrence in a market-data feed: a header plus at most one payload.
///
/// The payload is a [`Payload`] sum type, so an event can never hold two
/// payloads, and the constructors keep `header.union_id` in step with the
/// payload variant. A payload is never present without a header.
///
/// Serialized in the host's shape: `{"header": {..}, "<payloadKey>": {..}}`.
/// Deserialization goes through [`RawEvent`] and [`event_copy`], so a tag the
/// crate does not know yields a header-only event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "RawEvent")]
pub struct Event {
    header: Option<Header>,
    payload: Option<Payload>,
}

impl Event {
    /// Builds an event carrying `payload`, stamping its tag into the header.
    pub fn new(mut header: Header, payload: Payload) -> Self {
        header.union_id = Some(Number::from(payload.union_id().as_u8()));
        Self {
            header: Some(header),
            payload: Some(payload),
        }
    }

    /// An event with no payload, e.g. for `NotSet` or an unmapped tag.
    pub fn header_only(header: Header) -> Self {
        Self {
            header: Some(header),
            payload: None,
        }
    }

    pub fn header(&self) -> Option<&Header> {
        self.header.as_ref()
    }

    pub fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    /// The resolved discriminant, `None` without a header or for an unknown tag.
    pub fn union_id(&self) -> Option<UnionId> {
        self.header.as_ref().and_then(Header::union_id)
    }

    pub fn into_parts(self) -> (Option<Header>, Option<Payload>) {
        (self.header, self.payload)
    }
}

impl Serialize for Event {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = usize::from(self.header.is_some()) + usize::from(self.payload.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        if let Some(header) = &self.header {
            map.serialize_entry("header", header)?;
        }
        if let Some(payload) = &self.payload {
            map.serialize_entry(payload.field_name(), &payload.view())?;
        }
        map.end()
    }
}

impl From<RawEvent> for Event {
    fn from(raw: RawEvent) -> Self {
        event_copy(&raw)
    }
}

/// Copies the header and the payload selected by its tag into a new [`Event`].
///
/// Never fails. Without a header the copy is empty; when the tag selects no
/// payload, or the selected payload field is absent, the copy is header-only.
/// Payload fields belonging to other variants are dropped.
pub fn event_copy(event: &RawEvent) -> Event {
    Event {
        header: event.header.clone(),
        payload: select_payload(event).map(|payload| payload.to_payload()),
    }
}

/// Reads one payload field of a [`RawEvent`]. A value that does not fit the
/// payload type reads as absent, like `null`. Only the field the tag selects is
/// ever copied, so a stray field of another variant cannot fail the event.
fn lenient_payload<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    match serde_json::from_value(value) {
        Ok(payload) => Ok(Some(payload)),
        Err(e) => {
            tracing::debug!(error = %e, "Payload field does not match its type, ignored.");
            Ok(None)
        }
    }
}

/// Generates the payload sum type, its borrowed view, the host-shaped
/// [`RawEvent`] record and the tag-driven selection between them.
macro_rules! event_payloads {
    ($( $variant:ident => $field:ident = $key:literal ),+ $(,)?) => {
        /// The typed payload of an event, one variant per payload-bearing tag.
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum Payload {
            $( $variant($variant), )+
        }

        /// A read-only view of the payload selected from a [`RawEvent`].
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum PayloadRef<'a> {
            $( $variant(&'a $variant), )+
        }

        /// An event as the host feed delivers it: a header plus one optional
        /// field per payload variant, discriminated only by `header.unionID`.
        ///
        /// A payload field that is `null` or does not match its variant's shape
        /// decodes as `None`.
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        pub struct RawEvent {
            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub header: Option<Header>,
            $(
                #[serde(
                    rename = $key,
                    default,
                    deserialize_with = "lenient_payload",
                    skip_serializing_if = "Option::is_none"
                )]
                pub $field: Option<$variant>,
            )+
        }

        impl Payload {
            pub fn union_id(&self) -> UnionId {
                match self {
                    $( Payload::$variant(_) => UnionId::$variant, )+
                }
            }

            /// The key this payload is stored under in the host's event object.
            pub fn field_name(&self) -> &'static str {
                match self {
                    $( Payload::$variant(_) => $key, )+
                }
            }

            pub fn view(&self) -> PayloadRef<'_> {
                match self {
                    $( Payload::$variant(payload) => PayloadRef::$variant(payload), )+
                }
            }
        }

        impl PayloadRef<'_> {
            pub fn union_id(&self) -> UnionId {
                match self {
                    $( PayloadRef::$variant(_) => UnionId::$variant, )+
                }
            }

            pub fn to_payload(&self) -> Payload {
                match *self {
                    $( PayloadRef::$variant(payload) => Payload::$variant(payload.clone()), )+
                }
            }
        }

        impl Serialize for PayloadRef<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                match self {
                    $( PayloadRef::$variant(payload) => payload.serialize(serializer), )+
                }
            }
        }

        /// Selects the payload field named by the event's tag.
        ///
        /// Pure and total: `None` without a header, for `NotSet`, `NotMapped`,
        /// the deprecated `Test` tag, any unknown tag, or when the selected
        /// field is absent.
        pub fn select_payload(event: &RawEvent) -> Option<PayloadRef<'_>> {
            match event.header.as_ref()?.union_id()? {
                $( UnionId::$variant => event.$field.as_ref().map(PayloadRef::$variant), )+
                _ => None,
            }
        }

        impl From<&Event> for RawEvent {
            fn from(event: &Event) -> Self {
                let mut raw = RawEvent {
                    header: event.header.clone(),
                    ..RawEvent::default()
                };
                match &event.payload {
                    $( Some(Payload::$variant(payload)) => raw.$field = Some(payload.clone()), )+
                    None => {}
                }
                raw
            }
        }
    };
}

event_payloads! {
    TransactionMarker => transaction_marker = "transactionMarker",
    ChannelReset => channel_reset = "channelReset",
    TradeSummary => trade_summary = "tradeSummary",
    TradeMatch => trade_match = "tradeMatch",
    VolumeUpdate => volume_update = "volumeUpdate",
    BookLevel => book_level = "bookLevel",
    OrderBook => order_book = "orderBook",
    SecurityStatus => security_status = "securityStatus",
    DailyStatistics => daily_statistics = "dailyStatistics",
    SessionStatistics => session_statistics = "sessionStatistics",
    LimitsBanding => limits_banding = "limitsBanding",
    ClearingPrice => clearing_price = "clearingPrice",
}

impl RawEvent {
    pub fn select_payload(&self) -> Option<PayloadRef<'_>> {
        select_payload(self)
    }
}
