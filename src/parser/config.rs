/// Class names and attributes the price page uses to tag its markup.
#[derive(Debug, Clone)]
pub struct Configuration {
    pub table_class: String,
    pub row_class: String,
    pub cell_class: String,
    pub empty_row_class: String,
    pub invisible_cell_class: String,
    pub name_attr: String,
    pub type_attr: String,
    pub rarity_attr: String,
    /// Length of the prefix glued to the color name in a cell's first class
    pub color_prefix_len: usize,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            table_class: String::from("priceTable"),
            row_class: String::from("itemRow"),
            cell_class: String::from("priceRange"),
            empty_row_class: String::from("emptyCell"),
            invisible_cell_class: String::from("invisibleColumn"),
            name_attr: String::from("data-itemfullname"),
            type_attr: String::from("data-itemtype"),
            rarity_attr: String::from("data-itemrarity"),
            color_prefix_len: 5,
        }
    }
}
