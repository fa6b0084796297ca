//! Macros for declaring node labels.

/// Generate a label enum with a `State` implementation.
///
/// The enum derives `Clone`, `Copy`, `PartialEq`, `Eq`, `Debug` and the
/// serde traits, so the calling crate needs `serde` as a dependency.
///
/// # Example
///
/// ```
/// use habitat::state_enum;
/// use habitat::core::State;
///
/// state_enum! {
///     pub enum Player {
///         Idle,
///         Running,
///         Paused,
///     }
/// }
///
/// assert_eq!(Player::Paused.name(), "Paused");
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
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Debug, serde::Serialize, serde::Deserialize)]
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
    };
}
