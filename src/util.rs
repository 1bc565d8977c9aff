//! Macros which are used across the crate and needed a home

/// Shorter, bulk syntax for writing simple builder setters, which set a field to an argument or constant value.
macro_rules! setters {
    ( $(
        $( #[$attr:meta] )*
        $name:ident $( ( $($pname:ident: $ptype:ty),* $(,)? ) )?  => $field:ident $( .$subfield:ident )* = $value:expr
    ),* $(,)? ) => {
        $(
            $( #[$attr] )*
            #[must_use]
            pub fn $name(mut self $( , $( $pname: $ptype ),* )?) -> Self {
                self.$field $( .$subfield )* = $value;
                self
            }
        )*
    };
}

pub(crate) use setters;
