use chrono::{NaiveDate, NaiveDateTime};

use crate::PortKey;

/// The end of a measurement interval and its length, as written in
/// `YYYY-MM-DD HH:MM:SS (N s)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Interval {
    pub(crate) end: NaiveDateTime,
    pub(crate) seconds: u64,
}

/// The four counters of a `conn-bi-direct` line, in the order they are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ConnCounts {
    pub(crate) below: u64,
    pub(crate) read: u64,
    pub(crate) write: u64,
    pub(crate) both: u64,
}

// Every public rule has to consume its whole input, so a rule either yields all of
// its parts or fails. Trailing garbage is a failure, never a partial match.
peg::parser! {
    pub(crate) grammar field_parser() for str {
        pub(crate) rule timestamp() -> NaiveDateTime
            = year:year() "-" month:two_digits() "-" day:two_digits() " "
              hour:two_digits() ":" minute:two_digits() ":" second:two_digits()
        {?
            // `and_hms_opt` refuses second 60, leap seconds are not valid here
            NaiveDate::from_ymd_opt(year, month, day)
                .and_then(|date| date.and_hms_opt(hour, minute, second))
                .ok_or("a valid calendar date and time")
        }

        pub(crate) rule interval() -> Interval
            = end:timestamp() " (" seconds:count() " s)" { Interval { end, seconds } }

        pub(crate) rule history() -> (Interval, Vec<u64>)
            = interval:interval() values:(" " v:(count() ** ",") { v })? {
                (interval, values.unwrap_or_default())
            }

        pub(crate) rule conn_bi_direct() -> (Interval, ConnCounts)
            = interval:interval() " " below:count() "," read:count() "," write:count() "," both:count() {
                (interval, ConnCounts { below, read, write, both })
            }

        pub(crate) rule count() -> u64
            = n:$(['0'..='9']+) {? n.parse().or(Err("a non-negative integer")) }

        // A percentage, returned as a fraction. The range is not checked here.
        pub(crate) rule ratio() -> f64
            = number:$([^'%']+) "%" {?
                number
                    .parse::<f64>()
                    .ok()
                    .filter(|n| n.is_finite())
                    .map(|n| n / 100.0)
                    .ok_or("a finite number followed by '%'")
            }

        pub(crate) rule keyed_counts() -> Vec<(&'input str, u64)>
            = pairs(<$([^'=' | ',']+)>)

        pub(crate) rule port_counts() -> Vec<(PortKey, u64)>
            = pairs(<port()>)

        pub(crate) rule locale_counts() -> Vec<(&'input str, u64)>
            = pairs(<$(['a'..='z' | 'A'..='Z' | '?']*<2>)>)

        pub(crate) rule label_counts() -> Vec<(&'input str, u64)>
            = pairs(<$([^'=' | ',' | ' ']+)>)

        pub(crate) rule hex_digest()
            = quiet!{ ['0'..='9' | 'a'..='f' | 'A'..='F']*<40> } / expected!("40 hexadecimal characters")

        pub(crate) rule nickname()
            = quiet!{ ['0'..='9' | 'a'..='z' | 'A'..='Z']*<1,19> } / expected!("1 to 19 alphanumeric characters")

        rule pairs<K>(key: rule<K>) -> Vec<(K, u64)>
            = (k:key() "=" v:count() { (k, v) }) ** ","

        rule port() -> PortKey
            = "other" { PortKey::Other }
            / n:$(['0'..='9']+) {?
                n.parse::<u16>()
                    .ok()
                    .filter(|port| *port != 0)
                    .map(PortKey::Port)
                    .ok_or("a port in 1..=65535")
            }

        rule year() -> i32
            = n:$(['0'..='9']*<4>) {? n.parse().or(Err("a four digit year")) }

        rule two_digits() -> u32
            = n:$(['0'..='9']*<2>) {? n.parse().or(Err("two digits")) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn at(year: i32, month: u32, day: u32, h: u32, m: u32, s: u32) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(year, month, day).and_then(|date| date.and_hms_opt(h, m, s))
    }

    #[test]
    fn test_timestamp() {
        assert_eq!(
            field_parser::timestamp("2012-05-03 12:07:50").ok(),
            at(2012, 5, 3, 12, 7, 50)
        );
    }

    #[rstest::rstest]
    #[case::empty("")]
    #[case::date_and_space("2012-05-03 ")]
    #[case::date_only("2012-05-03")]
    #[case::second_sixty("2012-05-03 12:07:60")]
    #[case::february_thirtieth("2012-02-30 12:07:50")]
    #[case::single_digit_month("2012-5-03 12:07:50")]
    #[case::trailing_space("2012-05-03 12:07:50 ")]
    fn test_timestamp_rejects(#[case] input: &str) {
        assert!(field_parser::timestamp(input).is_err());
    }

    #[test]
    fn test_interval() {
        let interval = field_parser::interval("2012-05-03 12:07:50 (500 s)").ok();
        assert_eq!(interval.map(|i| i.seconds), Some(500));
        assert_eq!(interval.map(|i| i.end), at(2012, 5, 3, 12, 7, 50));
    }

    #[rstest::rstest]
    #[case::no_space_before_unit("2012-05-03 12:07:50 (500s)")]
    #[case::unclosed("2012-05-03 12:07:50 (500 s")]
    #[case::no_unit("2012-05-03 12:07:50 (500 )")]
    #[case::values("2012-05-03 12:07:50 (500 s) 5")]
    fn test_interval_rejects(#[case] input: &str) {
        assert!(field_parser::interval(input).is_err());
    }

    #[rstest::rstest]
    #[case::nothing("", vec![])]
    #[case::space(" ", vec![])]
    #[case::values(" 50,11,5", vec![50, 11, 5])]
    fn test_history(#[case] values: &str, #[case] expected: Vec<u64>) {
        let input = format!("2012-05-03 12:07:50 (500 s){values}");
        let parsed = field_parser::history(&input).ok();
        assert_eq!(parsed.map(|(_, values)| values), Some(expected));
    }

    #[rstest::rstest]
    #[case::glued("2012-05-03 12:07:50 (500 s)11")]
    #[case::trailing_comma("2012-05-03 12:07:50 (500 s) 1,2,")]
    #[case::negative("2012-05-03 12:07:50 (500 s) 1,-2")]
    #[case::two_spaces("2012-05-03 12:07:50 (500 s)  1,2")]
    fn test_history_rejects(#[case] input: &str) {
        assert!(field_parser::history(input).is_err());
    }

    #[test]
    fn test_conn_bi_direct() {
        let parsed =
            field_parser::conn_bi_direct("2012-05-03 12:07:50 (500 s) 277431,12089,0,2134").ok();
        assert_eq!(
            parsed.map(|(_, counts)| counts),
            Some(ConnCounts {
                below: 277_431,
                read: 12_089,
                write: 0,
                both: 2134,
            })
        );
    }

    #[rstest::rstest]
    #[case("50%", 0.5)]
    #[case("0.00%", 0.0)]
    #[case("-5%", -0.05)]
    fn test_ratio(#[case] input: &str, #[case] expected: f64) {
        let parsed = field_parser::ratio(input).ok();
        assert!(parsed.is_some_and(|ratio| (ratio - expected).abs() < 1e-12));
    }

    #[rstest::rstest]
    #[case("")]
    #[case(" ")]
    #[case("100")]
    #[case("%")]
    #[case("5%%")]
    #[case("nan%")]
    #[case("inf%")]
    #[case("-infinity%")]
    fn test_ratio_rejects(#[case] input: &str) {
        assert!(field_parser::ratio(input).is_err());
    }

    #[test]
    fn test_port_counts() {
        assert_eq!(
            field_parser::port_counts("443=100,other=111").ok(),
            Some(vec![(PortKey::Port(443), 100), (PortKey::Other, 111)])
        );
        assert_eq!(field_parser::port_counts("").ok(), Some(vec![]));
        assert!(field_parser::port_counts("0=5").is_err());
        assert!(field_parser::port_counts("65536=5").is_err());
        assert!(field_parser::port_counts("others=5").is_err());
    }

    #[test]
    fn test_locale_counts() {
        assert_eq!(
            field_parser::locale_counts("uk=5,??=3").ok(),
            Some(vec![("uk", 5), ("??", 3)])
        );
        assert!(field_parser::locale_counts("u=5").is_err());
        assert!(field_parser::locale_counts("uk=5,").is_err());
    }

    #[test]
    fn test_identity_patterns() {
        assert!(field_parser::hex_digest("916A3CA8B7DF61473D5AE5B21711F35F301CE9E8").is_ok());
        assert!(field_parser::hex_digest("916a3ca8b7df61473d5ae5b21711f35f301ce9e8").is_ok());
        assert!(field_parser::hex_digest("916A3CA8B7DF61473D5AE5B21711F35F301CE9E").is_err());
        assert!(field_parser::nickname("ninja").is_ok());
        assert!(field_parser::nickname("").is_err());
        assert!(field_parser::nickname("a_very_long_nickname_indeed").is_err());
        assert!(field_parser::nickname("nin-ja").is_err());
    }
}
