//! mediagen-routing: the provider adapter layer.
//!
//! Normalizes four heterogeneous generation vendors behind one contract:
//! a model route maps generation params to the vendor's request shape
//! (`{endpoint?, model_id?, request_data}`), and a response parser maps
//! the vendor's reply back to the shared result types. Routes are pure
//! apart from the CDN-upload side effect some vendors force; the HTTP
//! generation call itself belongs to the caller.

pub mod error;
pub mod fal;
pub mod kie;
pub mod modelscope;
pub mod ppio;
pub mod registry;

mod util;

pub use error::{ParseError, RouteError};
pub use registry::{ModelRoute, RouteContext, RouteRegistry};
