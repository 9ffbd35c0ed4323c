//! Localized screen text.
//!
//! Each screen has one struct of `&'static str` fields and one instance per
//! [`Language`]. Lookups are total over the closed language enum.

mod creative;
mod disposal;
mod notice;
mod scan;

pub use creative::CreativeText;
pub use disposal::DisposalText;
pub use notice::NoticeText;
pub use scan::ScanText;
