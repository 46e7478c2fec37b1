//! `define_port_error!`: declares a port error enum together with
//! snake_case constructors that accept `impl Into<T>` for each field.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
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

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum StockPortError {
            Unavailable { message: String } => "stock service unavailable: {message}",
            Short { missing: u32 } => "short by {missing} units",
            Rejected { sku: String, missing: u32 } => "rejected {sku}: short by {missing}",
            Gone => "record was removed",
        }
    }

    #[test]
    fn string_fields_accept_str() {
        let err = StockPortError::unavailable("timeout");
        assert_eq!(err.to_string(), "stock service unavailable: timeout");
    }

    #[test]
    fn other_fields_keep_their_type() {
        let err = StockPortError::short(3_u32);
        assert_eq!(err, StockPortError::Short { missing: 3 });
    }

    #[test]
    fn mixed_fields_are_supported() {
        let err = StockPortError::rejected("gpu-4090", 2_u32);
        assert_eq!(err.to_string(), "rejected gpu-4090: short by 2");
    }

    #[test]
    fn unit_variants_get_constructors() {
        assert_eq!(StockPortError::gone().to_string(), "record was removed");
    }
}
