//! Product command handlers.

mod delete_product;
mod track_product_view;

pub use delete_product::{
    DeleteProductCommand, DeleteProductHandler, PRODUCT_NOT_FOUND, PRODUCT_NOT_FOUND_DETAIL,
};
pub use track_product_view::{TrackProductViewCommand, TrackProductViewHandler};
