//! cmsquery resolver - folder descendant crawl and the bulk lookup query built from it

pub mod lookup;
pub mod resolver;

pub use lookup::{build_lookup, Lookup};
pub use resolver::{DescendantResolver, ResolveStats};
