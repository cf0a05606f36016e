//! Serialization boundary between records and their on-disk bytes.

use crate::error::BoxError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt::Debug;

/// Converts record values to bytes and back.
///
/// The driver never looks inside the bytes: it only appends a trailing newline
/// on write and hands the file content back on read. The [`extension`] doubles
/// as the storage suffix of every record file.
///
/// [`extension`]: Codec::extension
pub trait Codec: Debug + Send + Sync + 'static {
    /// File suffix without the leading dot, e.g. `json`.
    fn extension(&self) -> &'static str;

    /// Encodes `value`, preferably in an indented human-readable form.
    ///
    /// # Errors
    /// Returns the underlying serializer error.
    fn encode<T>(&self, value: &T) -> Result<Vec<u8>, BoxError>
    where
        T: Serialize + ?Sized;

    /// Decodes a record previously produced by [`Codec::encode`].
    ///
    /// # Errors
    /// Returns the underlying deserializer error.
    fn decode<T>(&self, bytes: &[u8]) -> Result<T, BoxError>
    where
        T: DeserializeOwned;
}

/// Pretty-printed JSON records stored as `<name>.json`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn encode<T>(&self, value: &T) -> Result<Vec<u8>, BoxError>
    where
        T: Serialize + ?Sized,
    {
        Ok(serde_json::to_vec_pretty(value)?)
    }

    fn decode<T>(&self, bytes: &[u8]) -> Result<T, BoxError>
    where
        T: DeserializeOwned,
    {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// Pretty-printed TOML records stored as `<name>.toml`.
///
/// TOML documents must be tables, so only struct- or map-shaped values encode.
#[cfg(feature = "toml")]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TomlCodec;

#[cfg(feature = "toml")]
impl Codec for TomlCodec {
    fn extension(&self) -> &'static str {
        "toml"
    }

    fn encode<T>(&self, value: &T) -> Result<Vec<u8>, BoxError>
    where
        T: Serialize + ?Sized,
    {
        Ok(toml::to_string_pretty(value)?.into_bytes())
    }

    fn decode<T>(&self, bytes: &[u8]) -> Result<T, BoxError>
    where
        T: DeserializeOwned,
    {
        Ok(toml::from_str(std::str::from_utf8(bytes)?)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Address {
        city: String,
        pincode: u32,
    }

    #[test]
    fn json_output_is_indented() {
        let bytes = JsonCodec
            .encode(&Address { city: "banglore".to_owned(), pincode: 302_028 })
            .unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("\n  \"city\": \"banglore\""), "got: {text}");
    }

    #[test]
    fn json_decode_tolerates_trailing_newline() {
        let decoded: Address =
            JsonCodec.decode(b"{\"city\":\"tokyo\",\"pincode\":100001}\n").unwrap();
        assert_eq!(decoded, Address { city: "tokyo".to_owned(), pincode: 100_001 });
    }

    #[test]
    fn json_decode_reports_malformed_input() {
        assert!(JsonCodec.decode::<Address>(b"{ not json").is_err());
    }

    #[cfg(feature = "toml")]
    #[test]
    fn toml_decodes_its_own_output() {
        let value = Address { city: "seattle".to_owned(), pincode: 98_052 };
        let bytes = TomlCodec.encode(&value).unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("city = \"seattle\""));
        assert_eq!(TomlCodec.decode::<Address>(&bytes).unwrap(), value);
    }
}
