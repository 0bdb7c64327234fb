use derive_more::Display;
use fnv::FnvHasher;
use serde::{de::Visitor, Deserialize, Deserializer, Serialize, Serializer};
use std::{
    convert::TryInto,
    fmt,
    hash::{Hash, Hasher},
};

/// Seed for the randomness that gets injected into a battle (wind change
/// rolls, mostly). The engine itself never owns an RNG; whoever drives the
/// turn loop builds one from this seed and passes it in, so replaying a
/// scenario with the same seed replays the same battle.
///
/// Deserializing accepts:
/// - An integer that fits into `u64`, used as-is
/// - A string that parses as a `u64`, used as the parsed value
/// - Any other string, kept as text and hashed when the seed is used
///
/// Anything else (negative or oversized number, float, bool, ...) is an
/// error.
///
/// Seeds always serialize as a **string**. JSON and TOML can't hold every
/// `u64`, and a stringified integer parses back into the same seed.
#[derive(Clone, Debug, Display, PartialEq, Eq)]
pub enum Seed {
    /// An integer seed, which can be used directly
    Int(u64),
    /// A textual seed, which is hashed into a `u64` before use
    Text(String),
}

impl Seed {
    /// Get the numeric form of the seed, for seeding an RNG
    pub fn to_u64(&self) -> u64 {
        match self {
            Self::Int(seed) => *seed,
            Self::Text(text) => {
                let mut hasher = FnvHasher::default();
                text.hash(&mut hasher);
                hasher.finish()
            }
        }
    }
}

impl Default for Seed {
    fn default() -> Self {
        Self::Int(0)
    }
}

impl From<u64> for Seed {
    fn from(seed: u64) -> Self {
        Self::Int(seed)
    }
}

// Numeric strings become int seeds, everything else stays text
impl From<&str> for Seed {
    fn from(seed_str: &str) -> Self {
        match seed_str.parse::<u64>() {
            Ok(seed) => Self::Int(seed),
            Err(_) => Self::Text(seed_str.into()),
        }
    }
}

impl Serialize for Seed {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Seed {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        // Seeds can come in as several types, so no type hint here
        deserializer.deserialize_any(SeedVisitor)
    }
}

macro_rules! impl_visit_int {
    ($fname:ident, $type:ty) => {
        fn $fname<E>(self, value: $type) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            value
                .try_into()
                .map(Seed::Int)
                .map_err(|_| E::custom(format!("seed out of range: {}", value)))
        }
    };
}

struct SeedVisitor;

impl<'de> Visitor<'de> for SeedVisitor {
    type Value = Seed;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a non-negative integer or string")
    }

    impl_visit_int!(visit_u8, u8);
    impl_visit_int!(visit_u16, u16);
    impl_visit_int!(visit_u32, u32);
    impl_visit_int!(visit_u64, u64);
    impl_visit_int!(visit_u128, u128);
    impl_visit_int!(visit_i8, i8);
    impl_visit_int!(visit_i16, i16);
    impl_visit_int!(visit_i32, i32);
    impl_visit_int!(visit_i64, i64);
    impl_visit_int!(visit_i128, i128);

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(value.into())
    }
}
