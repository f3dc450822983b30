//! Shared shape of the read-only entity views.
//!
//! A view is a `(model, record)` pair: `Copy`, borrow-only, and able to walk
//! to any related entity through the model's arenas. Views compare and print
//! by identifier.

macro_rules! define_view {
    ($(#[$meta:meta])* $view:ident => $record:ident, $id:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy)]
        pub struct $view<'m> {
            pub(crate) model: &'m crate::Model,
            pub(crate) record: &'m crate::registry::$record,
        }

        impl<'m> $view<'m> {
            pub(crate) fn new(
                model: &'m crate::Model,
                record: &'m crate::registry::$record,
            ) -> Self {
                Self { model, record }
            }

            pub fn id(&self) -> &'m crate::ids::$id {
                &self.record.id
            }

            pub fn name(&self) -> &'m str {
                &self.record.name
            }

            /// Raw declaration options, including custom extensions.
            pub fn options(&self) -> &'m protolink_descriptor::Options {
                &self.record.options
            }

            pub fn comments(&self) -> &'m crate::comments::Comments {
                &self.record.comments
            }
        }

        impl PartialEq for $view<'_> {
            fn eq(&self, other: &Self) -> bool {
                self.record.id == other.record.id
            }
        }

        impl Eq for $view<'_> {}

        impl std::fmt::Debug for $view<'_> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_tuple(stringify!($view))
                    .field(&self.record.id.as_str())
                    .finish()
            }
        }

        impl std::fmt::Display for $view<'_> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.record.id.as_str())
            }
        }
    };
}
