use serde::{Deserialize, Deserializer};

/// Accepts either a JSON string or a JSON integer and yields a `String`.
///
/// Identity backends disagree on whether principal ids are numeric.
pub fn deserialize_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Signed(i64),
        Unsigned(u64),
    }

    match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => Ok(s),
        StringOrNumber::Signed(n) => Ok(n.to_string()),
        StringOrNumber::Unsigned(n) => Ok(n.to_string()),
    }
}
