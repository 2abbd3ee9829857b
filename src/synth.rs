//! The `record!` front end: record types from a field descriptor list.

/// Declares a record type from a list of field descriptors.
///
/// Each field is written as `name: kind(args)`:
///
/// | Descriptor | Storage |
/// |---|---|
/// | `obj(T)` | `T` (a scalar or a nested record) |
/// | `array(T, N)` | `[T; N]` |
/// | `va_array(T)` | [`VarArray<T>`](crate::VarArray) |
///
/// The generated struct derives `Debug`, `PartialEq` and
/// [`Record`](crate::Record), and its `Default` is the zero-initialized value.
///
/// ```rust
/// use jsonwrap::{Text, record};
///
/// record! {
///     pub struct Son {
///         pub name: obj(Text),
///         pub age: obj(i32),
///     }
/// }
///
/// record! {
///     pub struct Family {
///         pub sons: array(Son, 2),
///         pub v_sons: va_array(Son),
///     }
/// }
///
/// let family = Family::default();
/// assert!(family.sons[1].name.is_null());
/// assert_eq!(family.v_sons.size(), 0);
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident { $($body:tt)* }
    ) => {
        $crate::record!(@fields [$(#[$meta])*] [$vis] $name [] $($body)*);
    };

    // Each rule below moves one descriptor into the accumulated field list.
    (@fields $metas:tt $vis:tt $name:ident [$($done:tt)*]
        $(#[$fmeta:meta])* $fvis:vis $field:ident : obj ( $ty:ty ) $(, $($rest:tt)*)?
    ) => {
        $crate::record!(@fields $metas $vis $name
            [$($done)* $(#[$fmeta])* $fvis $field: $ty,]
            $($($rest)*)?);
    };
    (@fields $metas:tt $vis:tt $name:ident [$($done:tt)*]
        $(#[$fmeta:meta])* $fvis:vis $field:ident : array ( $ty:ty, $len:expr ) $(, $($rest:tt)*)?
    ) => {
        $crate::record!(@fields $metas $vis $name
            [$($done)* $(#[$fmeta])* $fvis $field: [$ty; $len],]
            $($($rest)*)?);
    };
    (@fields $metas:tt $vis:tt $name:ident [$($done:tt)*]
        $(#[$fmeta:meta])* $fvis:vis $field:ident : va_array ( $ty:ty ) $(, $($rest:tt)*)?
    ) => {
        $crate::record!(@fields $metas $vis $name
            [$($done)* $(#[$fmeta])* $fvis $field: $crate::VarArray<$ty>,]
            $($($rest)*)?);
    };

    (@fields [$(#[$meta:meta])*] [$vis:vis] $name:ident [$($done:tt)*]) => {
        $(#[$meta])*
        #[derive(Debug, PartialEq, $crate::Record)]
        $vis struct $name {
            $($done)*
        }

        impl ::core::default::Default for $name {
            fn default() -> Self {
                <Self as $crate::Field>::zeroed()
            }
        }
    };
}
