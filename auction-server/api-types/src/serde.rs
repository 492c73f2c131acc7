pub mod datetime {
    use {
        serde::{
            de::Error,
            ser,
            Deserialize,
            Deserializer,
            Serializer,
        },
        time::{
            format_description::well_known::Rfc3339,
            OffsetDateTime,
        },
    };

    pub fn serialize<S>(b: &OffsetDateTime, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let formatted = b.format(&Rfc3339).map_err(ser::Error::custom)?;
        s.serialize_str(formatted.as_str())
    }

    pub fn deserialize<'de, D>(d: D) -> Result<OffsetDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: String = Deserialize::deserialize(d)?;
        OffsetDateTime::parse(s.as_str(), &Rfc3339).map_err(|err| D::Error::custom(err.to_string()))
    }
}

/// Trusted timestamps travel as `YYYY-MM-DD HH:MM:SS.nnnnnnnnn +0000 UTC`.
pub mod trusted_timestamp {
    use {
        serde::{
            de::Error,
            ser,
            Deserialize,
            Deserializer,
            Serializer,
        },
        time::{
            format_description::FormatItem,
            macros::format_description,
            OffsetDateTime,
            UtcOffset,
        },
    };

    const OUTPUT_FORMAT: &[FormatItem<'static>] = format_description!(
        "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:9] +0000 UTC"
    );

    // Sources may trim trailing zeros of the fraction, or drop it entirely.
    const INPUT_FORMAT: &[FormatItem<'static>] = format_description!(
        "[year]-[month]-[day] [hour]:[minute]:[second][optional [.[subsecond]]] [offset_hour sign:mandatory][offset_minute] UTC"
    );

    pub fn format(t: OffsetDateTime) -> Result<String, time::error::Format> {
        t.to_offset(UtcOffset::UTC).format(OUTPUT_FORMAT)
    }

    pub fn parse(s: &str) -> Result<OffsetDateTime, time::error::Parse> {
        OffsetDateTime::parse(s, INPUT_FORMAT).map(|t| t.to_offset(UtcOffset::UTC))
    }

    pub fn serialize<S>(b: &OffsetDateTime, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let formatted = format(*b).map_err(ser::Error::custom)?;
        s.serialize_str(formatted.as_str())
    }

    pub fn deserialize<'de, D>(d: D) -> Result<OffsetDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: String = Deserialize::deserialize(d)?;
        parse(s.as_str()).map_err(|err| D::Error::custom(err.to_string()))
    }

    #[cfg(test)]
    mod tests {
        use {
            super::*,
            time::macros::datetime,
        };

        #[test]
        fn test_format_pads_nanoseconds() {
            let t = datetime!(2024-07-09 15:37:13.8799 UTC);
            assert_eq!(
                format(t).unwrap(),
                "2024-07-09 15:37:13.879900000 +0000 UTC"
            );
        }

        #[test]
        fn test_format_normalizes_to_utc() {
            let t = datetime!(2024-07-09 17:37:13.000000001 +02:00);
            assert_eq!(
                format(t).unwrap(),
                "2024-07-09 15:37:13.000000001 +0000 UTC"
            );
        }

        #[test]
        fn test_parse_accepts_trimmed_fraction() {
            let parsed = parse("2025-06-25 19:59:59.31560409 +0000 UTC").unwrap();
            assert_eq!(parsed, datetime!(2025-06-25 19:59:59.31560409 UTC));

            let parsed = parse("2025-06-25 19:59:59 +0000 UTC").unwrap();
            assert_eq!(parsed, datetime!(2025-06-25 19:59:59 UTC));
        }

        #[test]
        fn test_parse_rejects_garbage() {
            assert!(parse("2025-06-25T19:59:59Z").is_err());
            assert!(parse("yesterday").is_err());
        }
    }
}
