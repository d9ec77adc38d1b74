//! Generators for primitive and well-known value types.
//!
//! Every generator takes a random source and a prefix. Only the string
//! generators use the prefix; it keeps generated text distinguishable per field.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use rand::{Rng, RngCore};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::descriptor::{AnyValue, EnumShape, Randomizable, TypeDescriptor};

/// Generate a boolean, uniformly true or false
pub fn random_bool(rng: &mut dyn RngCore, _prefix: &str) -> bool {
    rng.r#gen()
}

macro_rules! int_generators {
    ($($name:ident => $t:ty),* $(,)?) => {
        $(
            #[doc = concat!("Generate a `", stringify!($t), "` uniformly over its full range")]
            pub fn $name(rng: &mut dyn RngCore, _prefix: &str) -> $t {
                rng.r#gen()
            }
        )*
    };
}

int_generators!(
    random_sbyte => i8,
    random_short => i16,
    random_int => i32,
    random_long => i64,
    random_i128 => i128,
    random_isize => isize,
    random_byte => u8,
    random_ushort => u16,
    random_uint => u32,
    random_ulong => u64,
    random_u128 => u128,
    random_usize => usize,
);

/// Generate an `f32` in `[0, 10_000)` with three decimal places
pub fn random_float(rng: &mut dyn RngCore, _prefix: &str) -> f32 {
    rng.gen_range(0..10_000_000i32) as f32 / 1000.0
}

/// Generate an `f64` in `[0, 10_000)` with two decimal places
pub fn random_double(rng: &mut dyn RngCore, _prefix: &str) -> f64 {
    f64::from(rng.gen_range(0..1_000_000i32)) / 100.0
}

/// Generate a decimal in `[0, 10_000)` with scale 2
pub fn random_decimal(rng: &mut dyn RngCore, _prefix: &str) -> Decimal {
    Decimal::new(rng.gen_range(0..1_000_000), 2)
}

/// Generate a character: the leading digit of a random non-negative integer
pub fn random_char(rng: &mut dyn RngCore, _prefix: &str) -> char {
    rng.gen_range(0..i32::MAX)
        .to_string()
        .chars()
        .next()
        .unwrap_or('0')
}

/// Generate between 10 and 99 random bytes
pub fn random_bytes(rng: &mut dyn RngCore, _prefix: &str) -> Vec<u8> {
    let mut buffer = vec![0u8; rng.gen_range(10..100)];
    rng.fill_bytes(&mut buffer);
    buffer
}

/// Generate a date within 1000 days of today
pub fn random_date(rng: &mut dyn RngCore, _prefix: &str) -> NaiveDate {
    let today = Local::now().date_naive();
    let offset = chrono::Duration::days(rng.gen_range(-1000..=1000));
    today.checked_add_signed(offset).unwrap_or(today)
}

/// Generate midnight of a date within 1000 days of today
pub fn random_date_time(rng: &mut dyn RngCore, prefix: &str) -> NaiveDateTime {
    random_date(rng, prefix).and_time(NaiveTime::default())
}

/// Generate midnight UTC of a date within 1000 days of today
pub fn random_date_time_utc(rng: &mut dyn RngCore, prefix: &str) -> DateTime<Utc> {
    Utc.from_utc_datetime(&random_date_time(rng, prefix))
}

/// Generate a version 4 UUID from the random source
pub fn random_uuid(rng: &mut dyn RngCore, _prefix: &str) -> Uuid {
    let bytes: [u8; 16] = rng.r#gen();
    uuid::Builder::from_random_bytes(bytes).into_uuid()
}

/// Generate the prefix followed by a random non-negative integer
pub fn random_string(rng: &mut dyn RngCore, prefix: &str) -> String {
    format!("{}{}", prefix, rng.gen_range(0..i32::MAX))
}

/// Generate the prefix followed by a random identifier
pub fn random_identifier_string(rng: &mut dyn RngCore, prefix: &str) -> String {
    format!("{}{}", prefix, random_uuid(rng, prefix))
}

/// Pick one declared enumeration value uniformly; `None` for an empty enum
pub fn random_enum(rng: &mut dyn RngCore, shape: &EnumShape) -> Option<AnyValue> {
    if shape.variants.is_empty() {
        return None;
    }
    let index = rng.gen_range(0..shape.variants.len());
    (shape.variant)(index)
}

macro_rules! impl_scalar {
    ($($t:ty),* $(,)?) => {
        $(
            impl Randomizable for $t {
                fn descriptor() -> TypeDescriptor {
                    TypeDescriptor::scalar::<Self>()
                }
            }
        )*
    };
}

impl_scalar!(
    bool,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    char,
    String,
    Decimal,
    NaiveDate,
    NaiveDateTime,
    DateTime<Utc>,
    Uuid,
);

impl Randomizable for () {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::opaque::<Self>()
    }
}
