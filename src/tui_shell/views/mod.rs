mod catalog;

pub(super) use self::catalog::{ProductsPane, ViewsPane};
