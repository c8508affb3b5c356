//! Request middleware.
//!
//! - [`guard`]: role guards that turn session authority decisions into
//!   responses (`allow` → handler, `redirect` → 303, `pending` → 503)

pub mod guard;
