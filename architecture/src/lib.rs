//! Shared building blocks for the maintenance domains: response envelope,
//! aggregate marker, pagination and the repository abstractions every store
//! implements.

/// Declares `pub mod` and re-exports everything inside.
/// ```ignore
/// // code
/// make_re_export!(xxxx);
/// // gen
/// pub mod xxx;
/// pub use xxx::*;
/// ```
#[macro_export]
macro_rules! make_re_export {
    ($($(#[$meta:meta])*  $mod_name:ident ),*) => {
        $($(#[$meta])* pub mod $mod_name;)*
        $($(#[$meta])* pub use self::$mod_name::*;)*
    };
}

make_re_export!(base_dto, model, repository);
