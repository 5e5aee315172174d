//! One client per API group.
//!
//! Every resource client is a cheap handle onto the shared
//! [`Caller`](crate::Caller) plus the [`CallOptions`](crate::CallOptions)
//! its calls run under. Obtain them from [`RivetClient`](crate::RivetClient).

/// Declares a resource client: the struct, `Clone`, `Debug` and the
/// constructor plus `with_options`.
macro_rules! resource_client {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        pub struct $name<C = $crate::HyperClient> {
            caller: std::sync::Arc<$crate::Caller<C>>,
            options: $crate::CallOptions,
        }

        impl<C> Clone for $name<C> {
            fn clone(&self) -> Self {
                Self {
                    caller: std::sync::Arc::clone(&self.caller),
                    options: self.options.clone(),
                }
            }
        }

        impl<C> std::fmt::Debug for $name<C> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("base_url", &self.caller.base_url().map(url::Url::as_str))
                    .field("options", &self.options)
                    .finish_non_exhaustive()
            }
        }

        impl<C> $name<C> {
            pub(crate) fn new(caller: std::sync::Arc<$crate::Caller<C>>) -> Self {
                Self {
                    caller,
                    options: $crate::CallOptions::default(),
                }
            }

            /// A copy of this client whose calls run under `options`.
            #[must_use]
            pub fn with_options(&self, options: $crate::CallOptions) -> Self {
                Self {
                    caller: std::sync::Arc::clone(&self.caller),
                    options,
                }
            }

            /// The options calls run under.
            #[must_use]
            pub const fn options(&self) -> &$crate::CallOptions {
                &self.options
            }
        }
    };
}

pub(crate) use resource_client;

pub mod common;
pub mod device_links;
pub mod group;
pub mod identity_events;
pub mod invites;
pub mod namespaces;
pub mod notifications;
pub mod servers;
