pub mod delete;
pub mod get;
pub mod post;
pub mod restock;
pub mod update;

use serde::Deserialize;
use validator::Validate;

use crate::models::NewItem;

pub use delete::delete_item;
pub use get::get_items;
pub use post::new_item;
pub use restock::add_qty;
pub use update::update_item;

// Body of new_item and update_item
#[derive(Deserialize, Debug, Validate)]
pub struct ItemJson{
    #[validate(length(min = 1, max = 100))]
    pub nama_barang: String,
    #[validate(range(min = 0))]
    pub qty: i32,
    #[validate(range(min = 0.0))]
    pub harga_beli: f64,
    #[validate(range(min = 0.0))]
    pub harga_jual: f64
}

impl From<ItemJson> for NewItem {
    fn from(json: ItemJson) -> Self {
        NewItem{
            nama_barang: json.nama_barang,
            qty: json.qty,
            harga_beli: json.harga_beli,
            harga_jual: json.harga_jual
        }
    }
}
