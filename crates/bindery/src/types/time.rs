use time::{
    Date, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset,
    format_description::well_known::Rfc3339, macros::datetime,
};

use crate::{Value, encode::Encode, types::non_blank};

/// Zero value for instants: `0001-01-01T00:00:00`.
pub const DATETIME_ZERO: PrimitiveDateTime = datetime!(0001-01-01 0:00);

impl Encode for PrimitiveDateTime {
    fn encode(self) -> Value {
        Value::DateTime(self)
    }
}

impl Encode for OffsetDateTime {
    fn encode(self) -> Value {
        let utc = self.to_offset(UtcOffset::UTC);
        Value::DateTime(PrimitiveDateTime::new(utc.date(), utc.time()))
    }
}

impl Encode for Date {
    fn encode(self) -> Value {
        Value::DateTime(self.with_time(Time::MIDNIGHT))
    }
}

/// Parse an instant from its culture-independent textual form.
///
/// Text carrying an offset is converted to UTC. Local date-times may be `T` or space separated,
/// may omit seconds, and may carry up to nine fractional digits. A bare date is midnight.
pub(crate) fn parse(value: &str) -> Option<PrimitiveDateTime> {
    let value = non_blank(value)?;

    let offset = OffsetDateTime::parse(value, &Rfc3339)
        .or_else(|_| OffsetDateTime::parse(value, formats::OFFSET_DATE_TIME));
    if let Ok(dt) = offset {
        let utc = dt.to_offset(UtcOffset::UTC);
        return Some(PrimitiveDateTime::new(utc.date(), utc.time()));
    }

    if let Ok(dt) = PrimitiveDateTime::parse(value, formats::LOCAL_DATE_TIME) {
        return Some(dt);
    }

    Date::parse(value, formats::DATE)
        .ok()
        .map(|d| d.with_time(Time::MIDNIGHT))
}

mod formats {
    use time::format_description::{Component::*, FormatItem, FormatItem::*, modifier};

    const YEAR: FormatItem<'_> = Component(Year({
        let mut value = modifier::Year::default();
        value.repr = modifier::YearRepr::Full;
        value
    }));

    const MONTH: FormatItem<'_> = Component(Month(modifier::Month::default()));

    const DAY: FormatItem<'_> = Component(Day(modifier::Day::default()));

    const HOUR: FormatItem<'_> = Component(Hour({
        let mut value = modifier::Hour::default();
        value.is_12_hour_clock = false;
        value
    }));

    const MINUTE: FormatItem<'_> = Component(Minute(modifier::Minute::default()));

    const SECOND: FormatItem<'_> = Component(Second(modifier::Second::default()));

    const FRACTION: FormatItem<'_> = Component(Subsecond({
        let mut value = modifier::Subsecond::default();
        value.digits = modifier::SubsecondDigits::OneOrMore;
        value
    }));

    const OFFSET_HOUR: FormatItem<'_> = Component(OffsetHour({
        let mut value = modifier::OffsetHour::default();
        value.sign_is_mandatory = true;
        value
    }));

    const OFFSET_MINUTE: FormatItem<'_> = Component(OffsetMinute(modifier::OffsetMinute::default()));

    /// `YYYY-MM-DD`
    pub(super) const DATE: &[FormatItem<'_>] =
        &[YEAR, Literal(b"-"), MONTH, Literal(b"-"), DAY];

    const TIME_OF_DAY: &[FormatItem<'_>] = &[
        First(&[Literal(b"T"), Literal(b" ")]),
        HOUR,
        Literal(b":"),
        MINUTE,
        Optional(&Compound(&[Literal(b":"), SECOND])),
        Optional(&Compound(&[Literal(b"."), FRACTION])),
    ];

    /// A local date-time, `T` or space separated, with an optional trailing `Z`.
    pub(super) const LOCAL_DATE_TIME: &[FormatItem<'_>] = &[
        Compound(DATE),
        Compound(TIME_OF_DAY),
        Optional(&Literal(b"Z")),
    ];

    /// A date-time with a mandatory `+HH:MM` style offset, in either separator style.
    pub(super) const OFFSET_DATE_TIME: &[FormatItem<'_>] = &[
        Compound(DATE),
        Compound(TIME_OF_DAY),
        OFFSET_HOUR,
        Optional(&Compound(&[Optional(&Literal(b":")), OFFSET_MINUTE])),
    ];
}
