use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Serializes a flake identifier as its raw `u64`.
///
/// ```
/// use serde::{Deserialize, Serialize};
/// use ulidflake::{UlidFlake, as_u64};
///
/// #[derive(Serialize, Deserialize)]
/// struct Row {
///     #[serde(with = "as_u64")]
///     event_id: UlidFlake,
/// }
/// ```
pub mod as_u64 {
    use super::*;
    use crate::FlakeId;

    pub fn serialize<ID, S>(id: &ID, s: S) -> Result<S::Ok, S::Error>
    where
        ID: FlakeId,
        S: Serializer,
    {
        id.to_u64().serialize(s)
    }

    pub fn deserialize<'de, ID, D>(d: D) -> Result<ID, D::Error>
    where
        ID: FlakeId,
        D: Deserializer<'de>,
    {
        let n = u64::deserialize(d)?;
        Ok(ID::from_u64(n))
    }
}

/// Serializes a flake identifier as its 13-character base32 string.
///
/// ```
/// use serde::{Deserialize, Serialize};
/// use ulidflake::{UlidFlakeScalable, as_base32};
///
/// #[derive(Serialize, Deserialize)]
/// struct Row {
///     #[serde(with = "as_base32")]
///     event_id: UlidFlakeScalable,
/// }
/// ```
pub mod as_base32 {
    use super::*;
    use crate::FlakeId;

    pub fn serialize<ID, S>(id: &ID, s: S) -> Result<S::Ok, S::Error>
    where
        ID: FlakeId,
        S: Serializer,
    {
        s.serialize_str(id.encode().as_str())
    }

    pub fn deserialize<'de, ID, D>(d: D) -> Result<ID, D::Error>
    where
        ID: FlakeId,
        D: Deserializer<'de>,
    {
        struct Base32Visitor<ID>(core::marker::PhantomData<ID>);

        impl<'de, ID> serde::de::Visitor<'de> for Base32Visitor<ID>
        where
            ID: FlakeId,
        {
            type Value = ID;

            fn expecting(&self, formatter: &mut core::fmt::Formatter) -> core::fmt::Result {
                formatter.write_str("a base32 encoded string")
            }

            #[inline]
            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                ID::decode(v).map_err(serde::de::Error::custom)
            }
        }

        d.deserialize_str(Base32Visitor(core::marker::PhantomData))
    }
}
