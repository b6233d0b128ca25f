//! Macros for declaring dispatcher states.

/// Declare a state enum and its `State` implementation.
///
/// The optional `lifecycle: Initial => Running` clause also implements
/// `Lifecycle`, which enables `StateMachine::default()` and
/// `StateMachine::run()`.
///
/// # Example
///
/// ```
/// use tickfsm::core::{Lifecycle, State};
/// use tickfsm::state_enum;
///
/// state_enum! {
///     pub enum Door {
///         Closed,
///         Opening,
///         Open,
///     }
///     lifecycle: Closed => Opening
/// }
///
/// assert_eq!(Door::Open.name(), "Open");
/// assert_eq!(Door::initial(), Door::Closed);
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }

        $(lifecycle: $initial:ident => $running:ident)?
    ) => {
        $(#[$meta])*
        #[derive(
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            Debug,
            serde::Serialize,
            serde::Deserialize
        )]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }

        $(
            impl $crate::core::Lifecycle for $name {
                fn initial() -> Self {
                    Self::$initial
                }

                fn running() -> Self {
                    Self::$running
                }
            }
        )?
    };
}
