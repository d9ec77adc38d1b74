//! Process-wide table of primitive generators.
//!
//! The table maps type identity to a generator producing a value of exactly
//! that type. Both the plain and the `Option<_>` form of every primitive are
//! registered. It is built once on first use and never mutated afterwards.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rand::RngCore;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::descriptor::AnyValue;
use crate::primitives;

/// Generates a type-erased primitive value from a random source and prefix
pub type ScalarFn = fn(&mut dyn RngCore, &str) -> AnyValue;

/// The primitive kinds the populator knows how to generate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    I128,
    Isize,
    U8,
    U16,
    U32,
    U64,
    U128,
    Usize,
    F32,
    F64,
    Decimal,
    Char,
    String,
    Bytes,
    Date,
    DateTime,
    DateTimeUtc,
    Uuid,
}

/// A registered primitive generator
#[derive(Debug, Clone, Copy)]
pub struct ScalarGenerator {
    kind: ScalarKind,
    nullable: bool,
    generate: ScalarFn,
}

impl ScalarGenerator {
    pub fn kind(&self) -> ScalarKind {
        self.kind
    }

    /// Whether this entry produces the `Option<_>` form
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Generate a value of the registered type
    pub fn generate(&self, rng: &mut dyn RngCore, prefix: &str) -> AnyValue {
        (self.generate)(rng, prefix)
    }
}

macro_rules! register_scalars {
    ($table:ident; $($t:ty => $kind:ident via $generate:path),* $(,)?) => {
        $(
            $table.insert(
                TypeId::of::<$t>(),
                ScalarGenerator {
                    kind: ScalarKind::$kind,
                    nullable: false,
                    generate: |rng, prefix| Box::new($generate(rng, prefix)) as AnyValue,
                },
            );
            $table.insert(
                TypeId::of::<Option<$t>>(),
                ScalarGenerator {
                    kind: ScalarKind::$kind,
                    nullable: true,
                    generate: |rng, prefix| Box::new(Some($generate(rng, prefix))) as AnyValue,
                },
            );
        )*
    };
}

fn build_table() -> HashMap<TypeId, ScalarGenerator> {
    let mut table = HashMap::new();
    register_scalars!(table;
        bool => Bool via primitives::random_bool,
        i8 => I8 via primitives::random_sbyte,
        i16 => I16 via primitives::random_short,
        i32 => I32 via primitives::random_int,
        i64 => I64 via primitives::random_long,
        i128 => I128 via primitives::random_i128,
        isize => Isize via primitives::random_isize,
        u8 => U8 via primitives::random_byte,
        u16 => U16 via primitives::random_ushort,
        u32 => U32 via primitives::random_uint,
        u64 => U64 via primitives::random_ulong,
        u128 => U128 via primitives::random_u128,
        usize => Usize via primitives::random_usize,
        f32 => F32 via primitives::random_float,
        f64 => F64 via primitives::random_double,
        Decimal => Decimal via primitives::random_decimal,
        char => Char via primitives::random_char,
        String => String via primitives::random_string,
        Vec<u8> => Bytes via primitives::random_bytes,
        NaiveDate => Date via primitives::random_date,
        NaiveDateTime => DateTime via primitives::random_date_time,
        DateTime<Utc> => DateTimeUtc via primitives::random_date_time_utc,
        Uuid => Uuid via primitives::random_uuid,
    );
    table
}

static SCALAR_TABLE: OnceLock<HashMap<TypeId, ScalarGenerator>> = OnceLock::new();

fn table() -> &'static HashMap<TypeId, ScalarGenerator> {
    SCALAR_TABLE.get_or_init(build_table)
}

/// Look up the generator registered for a type, if any
pub fn lookup(type_id: TypeId) -> Option<ScalarGenerator> {
    table().get(&type_id).copied()
}
