use crate::FlakeId;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

impl Serialize for FlakeId {
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_str(self.encode().as_str())
    }
}

impl<'de> Deserialize<'de> for FlakeId {
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct Base62Visitor;

        impl de::Visitor<'_> for Base62Visitor {
            type Value = FlakeId;

            fn expecting(&self, formatter: &mut core::fmt::Formatter) -> core::fmt::Result {
                formatter.write_str("a base62 encoded identifier")
            }

            #[inline]
            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                FlakeId::decode(v).map_err(de::Error::custom)
            }
        }

        d.deserialize_str(Base62Visitor)
    }
}
