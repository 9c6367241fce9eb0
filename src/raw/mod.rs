mod arena;
mod handle;
mod node;
mod raw_pr_tree;

pub(crate) use handle::Handle;
pub(crate) use raw_pr_tree::{Descent, RawPrTree};
