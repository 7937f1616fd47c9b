//! Small macros shared by the HTTP apps.

#[cfg(feature = "actix")]
#[doc(hidden)]
pub use actix_web;

/// Generate a `routes` function registering actix services.
///
/// `route` entries are handler services declared in the current module,
/// `load` entries are child modules that provide their own `routes`.
///
/// ```ignore
/// macros_utils::routes! {
///     load health,
///     load check_status,
/// }
/// ```
#[cfg(feature = "actix")]
#[macro_export]
macro_rules! routes {
    ($(route $route:ident),+ $(,)?) => {
        pub fn routes(cfg: &mut $crate::actix_web::web::ServiceConfig) {
            $( cfg.service($route); )+
        }
    };
    ($(load $module:ident),+ $(,)?) => {
        $( mod $module; )+

        pub fn routes(cfg: &mut $crate::actix_web::web::ServiceConfig) {
            $( $module::routes(cfg); )+
        }
    };
}
