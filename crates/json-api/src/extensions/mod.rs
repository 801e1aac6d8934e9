//! Extension traits

mod amount;
mod depot;
mod labels;
mod point_in_time;
mod result;

pub(crate) use amount::parse_pesewas;
pub(crate) use depot::DepotExt as _;
pub(crate) use labels::{LabelExt as _, parse_label};
pub(crate) use point_in_time::PointInTimeExt as _;
pub(crate) use result::ResultExt as _;
