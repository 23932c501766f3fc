//! `define_port_error!`: declare a port error enum in one block.
//!
//! Each variant lists its fields and a `thiserror` message. The macro emits
//! the enum plus, per variant, a snake_case constructor taking
//! `impl Into<FieldType>` arguments in declaration order and an `is_*`
//! predicate, so adapters build errors with `Error::status(503_u16, "..")`
//! and callers branch with `error.is_rate_limited()`.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        ::paste::paste! {
            impl $name {
                $(
                    #[doc = "Construct the `" $variant "` variant."]
                    pub fn [<$variant:snake>]($($($field: impl Into<$ty>),*)?) -> Self {
                        Self::$variant { $($($field: $field.into()),*)? }
                    }

                    #[doc = "Return whether this is the `" $variant "` variant."]
                    #[must_use]
                    pub fn [<is_ $variant:snake>](&self) -> bool {
                        matches!(self, Self::$variant { .. })
                    }
                )*
            }
        }
    };
}

pub(crate) use define_port_error;
