#[cfg(test)]
mod tests {
    use crate::dates::LedgerDate;
    use crate::keys::{BookingKey, KeyOrder, Timeslot};
    use chrono::{Duration, NaiveDate};
    use proptest::prelude::*;

    // Two-digit years only cover 1970..=2069, so stay inside that.
    fn ledger_date() -> impl Strategy<Value = LedgerDate> {
        (0..25_000i64).prop_map(|offset| {
            LedgerDate::new(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap() + Duration::days(offset))
        })
    }

    fn timeslot() -> impl Strategy<Value = Timeslot> {
        prop_oneof![Just(Timeslot::Am), Just(Timeslot::Pm), Just(Timeslot::AmPm)]
    }

    fn identity() -> impl Strategy<Value = String> {
        "[a-z0-9.\\-]{1,12}@[a-z\\-]{1,8}\\.org"
    }

    fn key_order() -> impl Strategy<Value = KeyOrder> {
        prop_oneof![Just(KeyOrder::DateFirst), Just(KeyOrder::IdentityFirst)]
    }

    proptest! {
        // Test that a key can always be read back, even with '-' in the identity
        #[test]
        fn test_key_parses_back(
            who in identity(),
            date in ledger_date(),
            slot in timeslot(),
            order in key_order(),
        ) {
            let key = BookingKey::new(who, date, slot);
            let parsed = BookingKey::parse(&key.encode(order), order).unwrap();
            prop_assert_eq!(parsed, key);
        }

        // Test that distinct triples never share an encoding
        #[test]
        fn test_distinct_keys_encode_differently(
            a in (identity(), ledger_date(), timeslot()),
            b in (identity(), ledger_date(), timeslot()),
            order in key_order(),
        ) {
            let key_a = BookingKey::new(a.0, a.1, a.2);
            let key_b = BookingKey::new(b.0, b.1, b.2);
            prop_assume!(key_a != key_b);
            prop_assert_ne!(key_a.encode(order), key_b.encode(order));
        }

        // Test that the short date form survives a parse
        #[test]
        fn test_short_date_round_trip(date in ledger_date()) {
            let short = date.to_short();
            prop_assert_eq!(short.len(), 8);
            prop_assert_eq!(LedgerDate::parse_short(&short).unwrap(), date);
        }
    }
}
