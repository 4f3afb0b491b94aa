/// Declare a typed record together with its field table.
///
/// Each field names its Rust type and the upstream field it comes from;
/// the mapper kind is taken from the type. The record derives `Default`,
/// so absent optional fields come out as zero values.
///
/// ```ignore
/// flatstore::flat_record! {
///     pub struct TargetPrice {
///         pub average: f64 = optional("average"),
///         pub industry: String = optional("industry").hops(2),
///     }
/// }
/// ```
///
/// The calling crate must depend on `serde` with the `derive` feature.
#[macro_export]
macro_rules! flat_record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $fvis:vis $field:ident : $ty:ty = $spec:expr
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        $vis struct $name {
            $(
                $(#[$fmeta])*
                $fvis $field: $ty,
            )*
        }

        impl $crate::Record for $name {
            fn schema() -> &'static $crate::RecordSchema {
                static SCHEMA: $crate::RecordSchema = $crate::RecordSchema {
                    name: stringify!($name),
                    fields: &[
                        $( $spec.bind(stringify!($field), <$ty as $crate::FieldValue>::KIND), )*
                    ],
                };
                &SCHEMA
            }

            fn from_row(
                row: &$crate::Row<'_>,
                decoder: &$crate::Decoder<'_>,
            ) -> ::std::result::Result<Self, $crate::DecodeError> {
                let mut specs = <Self as $crate::Record>::schema().fields.iter();
                ::std::result::Result::Ok(Self {
                    $( $field: $crate::mapping::map_next(&mut specs, row, decoder)?, )*
                })
            }
        }
    };
}
