/// Defines a 64-bit flake layout from four components laid out from **most
/// significant bit (MSB)** to **least significant bit (LSB)**: `reserved`
/// (the sign bit, always 0), `timestamp`, `randomness`, `shard`.
///
/// The total number of bits must exactly equal 64, enforced by a
/// compile-time assertion. `shard: 0` produces a layout without a shard
/// field whose `shard_id()` is constantly 0.
macro_rules! define_flake {
    (
        $(#[$meta:meta])*
        $name:ident,
        reserved: $reserved_bits:expr,
        timestamp: $timestamp_bits:expr,
        randomness: $randomness_bits:expr,
        shard: $shard_bits:expr,
        max_entropy_bytes: $max_entropy:expr
    ) => {
        $(#[$meta])*
        #[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(transparent)]
        pub struct $name {
            id: u64,
        }

        const _: () = {
            // Compile-time check: total bit width _must_ equal the backing
            // type. This is to avoid aliasing surprises.
            assert!(
                $reserved_bits + $timestamp_bits + $randomness_bits + $shard_bits == u64::BITS,
                "Layout must match underlying type width"
            );
        };

        impl $name {
            pub const RESERVED_BITS: u32 = $reserved_bits;
            pub const TIMESTAMP_BITS: u32 = $timestamp_bits;
            pub const RANDOMNESS_BITS: u32 = $randomness_bits;
            pub const SHARD_BITS: u32 = $shard_bits;

            /// Widest entropy step, in bytes, for same-millisecond
            /// collision handling.
            pub const MAX_ENTROPY_BYTES: u8 = $max_entropy;

            pub const SHARD_SHIFT: u32 = 0;
            pub const RANDOMNESS_SHIFT: u32 = Self::SHARD_SHIFT + Self::SHARD_BITS;
            pub const TIMESTAMP_SHIFT: u32 = Self::RANDOMNESS_SHIFT + Self::RANDOMNESS_BITS;

            pub const TIMESTAMP_MASK: u64 = (1_u64 << Self::TIMESTAMP_BITS) - 1;
            pub const RANDOMNESS_MASK: u64 = (1_u64 << Self::RANDOMNESS_BITS) - 1;
            pub const SHARD_MASK: u64 = (1_u64 << Self::SHARD_BITS) - 1;

            /// Packs the components, masking each to its field width. The
            /// reserved sign bit is never set.
            #[must_use]
            pub const fn from_parts(timestamp: u64, randomness: u64, shard_id: u64) -> Self {
                let t = (timestamp & Self::TIMESTAMP_MASK) << Self::TIMESTAMP_SHIFT;
                let r = (randomness & Self::RANDOMNESS_MASK) << Self::RANDOMNESS_SHIFT;
                let s = shard_id & Self::SHARD_MASK;
                Self { id: t | r | s }
            }

            /// Extracts the timestamp from the packed ID.
            #[must_use]
            pub const fn timestamp(&self) -> u64 {
                (self.id >> Self::TIMESTAMP_SHIFT) & Self::TIMESTAMP_MASK
            }

            /// Extracts the randomness from the packed ID.
            #[must_use]
            pub const fn randomness(&self) -> u64 {
                (self.id >> Self::RANDOMNESS_SHIFT) & Self::RANDOMNESS_MASK
            }

            /// Extracts the shard id from the packed ID (0 when the layout
            /// has no shard field).
            #[must_use]
            pub const fn shard_id(&self) -> u64 {
                (self.id >> Self::SHARD_SHIFT) & Self::SHARD_MASK
            }

            /// Returns the maximum representable timestamp value.
            #[must_use]
            pub const fn max_timestamp() -> u64 {
                Self::TIMESTAMP_MASK
            }

            /// Returns the maximum representable randomness value.
            #[must_use]
            pub const fn max_randomness() -> u64 {
                Self::RANDOMNESS_MASK
            }

            /// Returns the maximum representable shard id.
            #[must_use]
            pub const fn max_shard_id() -> u64 {
                Self::SHARD_MASK
            }

            /// Converts this ID into its raw integer representation.
            #[must_use]
            pub const fn to_u64(&self) -> u64 {
                self.id
            }

            /// Wraps a raw integer as an ID.
            #[must_use]
            pub const fn from_u64(value: u64) -> Self {
                Self { id: value }
            }

            /// Returns the fixed 13-character base32 rendering.
            #[must_use]
            pub fn encode(&self) -> $crate::Base32Text {
                $crate::Base32Text::new(self.id)
            }

            /// Parses a 13-character base32 string.
            ///
            /// Input is uppercased before decoding, so lowercase digits are
            /// accepted here even though the codec itself is strict.
            ///
            /// # Errors
            ///
            /// - [`Error::InvalidLength`] if the input is not exactly 13
            ///   characters
            /// - [`Error::InvalidAscii`] for characters outside the alphabet
            ///   (including the lookalikes `I`, `L`, `O`, `U`)
            ///
            /// [`Error::InvalidLength`]: crate::Error::InvalidLength
            /// [`Error::InvalidAscii`]: crate::Error::InvalidAscii
            pub fn decode(text: &str) -> $crate::Result<Self> {
                if text.len() != $crate::ENCODED_LEN {
                    return Err($crate::Error::InvalidLength { len: text.len() });
                }
                let value = $crate::decode_base32(&text.to_ascii_uppercase())?;
                Ok(Self::from_u64(value))
            }

            /// Returns the `0x`-prefixed hexadecimal rendering of the raw
            /// value.
            #[must_use]
            pub fn hex(&self) -> String {
                format!("{:#x}", self.id)
            }

            /// Returns the `0b`-prefixed binary rendering of the raw value.
            #[must_use]
            pub fn bin(&self) -> String {
                format!("{:#b}", self.id)
            }
        }

        impl $crate::FlakeId for $name {
            fn from_components(timestamp: u64, randomness: u64, shard_id: u64) -> Self {
                // Randomness may legitimately carry more bits than the
                // field before masking; the timestamp never should.
                debug_assert!(timestamp <= Self::TIMESTAMP_MASK, "timestamp overflow");
                Self::from_parts(timestamp, randomness, shard_id)
            }

            fn from_u64(value: u64) -> Self {
                Self::from_u64(value)
            }

            fn to_u64(&self) -> u64 {
                self.to_u64()
            }

            fn timestamp(&self) -> u64 {
                self.timestamp()
            }

            fn randomness(&self) -> u64 {
                self.randomness()
            }

            fn shard_id(&self) -> u64 {
                self.shard_id()
            }

            fn max_timestamp() -> u64 {
                Self::TIMESTAMP_MASK
            }

            fn max_randomness() -> u64 {
                Self::RANDOMNESS_MASK
            }

            fn max_shard_id() -> u64 {
                Self::SHARD_MASK
            }

            fn max_entropy_bytes() -> u8 {
                Self::MAX_ENTROPY_BYTES
            }

            fn encode(&self) -> $crate::Base32Text {
                self.encode()
            }

            fn decode(text: &str) -> $crate::Result<Self> {
                Self::decode(text)
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.encode(), f)
            }
        }

        impl core::fmt::Debug for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                let mut dbg = f.debug_struct(stringify!($name));
                dbg.field(
                    "id",
                    &format_args!("{} ({})", self.to_u64(), self.encode()),
                );
                dbg.field("timestamp", &self.timestamp());
                dbg.field("randomness", &self.randomness());
                if Self::SHARD_BITS > 0 {
                    dbg.field("shard_id", &self.shard_id());
                }
                dbg.finish()
            }
        }

        impl core::str::FromStr for $name {
            type Err = $crate::Error;

            fn from_str(s: &str) -> $crate::Result<Self> {
                Self::decode(s)
            }
        }

        impl core::convert::TryFrom<&str> for $name {
            type Error = $crate::Error;

            fn try_from(s: &str) -> $crate::Result<Self> {
                Self::decode(s)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.to_u64()
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                Self::decode(other).map(|id| id == *self).unwrap_or(false)
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self == *other
            }
        }
    };
}

define_flake!(
    /// The standard 64-bit flake layout.
    ///
    /// - 1 reserved sign bit (always 0)
    /// - 43 bits timestamp (milliseconds since the generator epoch)
    /// - 20 bits randomness
    ///
    /// ```text
    ///  Bit Index:  63 62             20 19              0
    ///              +--+----------------+-----------------+
    ///  Field:      | 0| timestamp (43) | randomness (20) |
    ///              +--+----------------+-----------------+
    ///              |<---- MSB ---- 64 bits ---- LSB ---->|
    /// ```
    UlidFlake,
    reserved: 1,
    timestamp: 43,
    randomness: 20,
    shard: 0,
    max_entropy_bytes: 3
);

define_flake!(
    /// The scalable 64-bit flake layout: a narrower randomness field plus a
    /// 5-bit shard id so up to 32 independent generators cannot collide
    /// even with identical timestamp and randomness.
    ///
    /// ```text
    ///  Bit Index:  63 62             20 19              5 4         0
    ///              +--+----------------+-----------------+-----------+
    ///  Field:      | 0| timestamp (43) | randomness (15) | shard (5) |
    ///              +--+----------------+-----------------+-----------+
    ///              |<-------- MSB ------ 64 bits ------ LSB -------->|
    /// ```
    UlidFlakeScalable,
    reserved: 1,
    timestamp: 43,
    randomness: 15,
    shard: 5,
    max_entropy_bytes: 2
);
