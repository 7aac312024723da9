use proptest::prelude::*;

use warden_types::{GuildId, Timestamp, UserId};

proptest! {
    /// Every numeric id survives a trip through its mention markup.
    #[test]
    fn mention_parses_back(raw in 1u64..u64::MAX) {
        let user = UserId::from(raw);
        prop_assert_eq!(UserId::parse_reference(&user.mention()), Some(user.clone()));
        prop_assert_eq!(UserId::parse_reference(&format!("<@!{raw}>")), Some(user));
    }

    /// Non-zero numeric ids are snowflakes.
    #[test]
    fn numeric_ids_are_snowflakes(raw in 1u64..u64::MAX) {
        prop_assert_eq!(GuildId::from(raw).as_u64(), Some(raw));
    }

    /// Ordering of timestamps follows the underlying epoch seconds.
    #[test]
    fn timestamp_ordering(a in 0i64..4_000_000_000, b in 0i64..4_000_000_000) {
        let ta = Timestamp::from_secs(a).unwrap();
        let tb = Timestamp::from_secs(b).unwrap();
        prop_assert_eq!(ta <= tb, a <= b);
        prop_assert_eq!(ta.as_secs(), a);
    }

    /// RFC 3339 rendering parses back to the same instant.
    #[test]
    fn rfc3339_parses_back(secs in 0i64..4_000_000_000) {
        let ts = Timestamp::from_secs(secs).unwrap();
        prop_assert_eq!(Timestamp::parse_rfc3339(&ts.to_rfc3339()), Some(ts));
    }
}
