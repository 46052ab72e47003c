/// Converts errors from their error type (of the submodule) to that of
/// a `streetnav::Error` variant, or of another error enum.
///
/// ```rust,ignore
/// use streetnav::graph::GraphError;
/// streetnav::impl_err!(GraphError, Graph);
/// streetnav::impl_err!(CodecError, GraphError, Codec);
/// ```
pub mod err_macro {
    #[macro_export]
    macro_rules! impl_err {
        ($from:ty, $variant:ident) => {
            impl From<$from> for $crate::Error {
                fn from(value: $from) -> Self {
                    $crate::Error::$variant(value)
                }
            }
        };
        ($from:ty, $to:ty, $variant:ident) => {
            impl From<$from> for $to {
                fn from(value: $from) -> Self {
                    Self::$variant(value)
                }
            }
        };
    }

    pub use impl_err;
}
