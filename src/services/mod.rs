//! Service layer: CSRF attachment, spec URL resolution, client construction
//! and the memoized process-wide client.

pub mod client_accessor;
pub mod client_factory;
pub mod csrf;
pub mod settings;
pub mod spec_url;

pub use client_accessor::{
    get_client, get_client_from_spec, process_client, ClientAccessor, ClientResult,
    SharedClientFuture, SpecClientLoader,
};
pub use client_factory::{make_client, ApiClient, ClientFactory};
pub use csrf::{attach_csrf, is_safe_method, should_send_csrf, CsrfInterceptor, CSRF_HEADER};
pub use settings::ProcessSettings;
pub use spec_url::{resolve_spec_url, PageLocation, DEFAULT_SPEC_PATH};
