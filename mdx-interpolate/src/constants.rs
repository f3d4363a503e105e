//! Holds constant string values used throughout the interpolation pass.
#![allow(clippy::missing_docs_in_private_items)]

pub const COMPONENTS_IDENT: &str = "_components";

pub const JSX_FACTORY: &str = "_jsx";
pub const JSX_FACTORY_STATIC: &str = "_jsxs";
pub const JSX_FACTORY_DEV: &str = "_jsxDEV";

pub const CHILDREN: &str = "children";
