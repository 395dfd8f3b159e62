//! The prelude

#[doc(inline)]
pub use crate::comp::{comp_keys, Comp};
#[doc(inline)]
pub use crate::key::{KeyMaker, SortKey};
#[doc(inline)]
pub use crate::port::{Port, PortResolver, ServiceLookup, StaticServices, SystemServices, Transport};
#[doc(inline)]
pub use crate::sort::{Entry, SortConfig};
#[doc(inline)]
pub use crate::url::UrlParts;
#[doc(inline)]
pub use crate::util::{err, get_reader, get_writer, Error, Result};

#[doc(inline)]
pub use std::cmp::Ordering;
#[doc(inline)]
pub use std::io::{BufRead, Read, Write};
