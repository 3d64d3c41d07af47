use crate::parser::{Configuration, PriceParser};
use crate::types::ItemRecord;
use scraper::{ElementRef, Html, Selector};
use indexmap::IndexMap;
use tracing::{debug, info, instrument, warn};

// The page glues hair spaces around the hyphen of a range. Depending on how
// the entity survives parsing it shows up raw or decoded.
const HAIRSP_HYPHEN: &str = "&hairsp-&hairsp";
const DECODED_HAIRSP_HYPHEN: &str = "\u{200A}-\u{200A}";
// Shown when a color has no price
const EM_DASH: char = '\u{2014}';

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ExtractError {
    #[error("{node} is missing its {field} attribute")]
    MissingField { node: &'static str, field: String },
    #[error("invalid selector {0:?}")]
    Selector(String),
}

/// An item row as found in the markup, before any normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRow {
    pub name: String,
    pub kind: String,
    pub rarity: String,
    pub cells: Vec<PriceCell>,
}

/// One paint color of an item row.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceCell {
    pub color: String,
    pub text: String,
}

impl From<ItemRow> for ItemRecord {
    fn from(row: ItemRow) -> Self {
        let prices: IndexMap<String, String> = row
            .cells
            .into_iter()
            .map(|cell| (cell.color, sanitize_price(&cell.text)))
            .collect();

        ItemRecord {
            name: row.name,
            kind: capitalize(&row.kind),
            rarity: normalize_rarity(&row.rarity),
            prices,
        }
    }
}

/// Uppercases the first character and leaves the rest alone.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `|black market|limited|` -> `Black market`
pub fn normalize_rarity(raw: &str) -> String {
    // Drop the enclosing delimiters
    let mut chars = raw.chars();
    chars.next();
    chars.next_back();

    let rarity = capitalize(chars.as_str());
    match rarity.split_once('|') {
        Some((first, _)) => first.to_owned(),
        None => rarity,
    }
}

pub fn sanitize_price(text: &str) -> String {
    text.replace(HAIRSP_HYPHEN, "-")
        .replace(DECODED_HAIRSP_HYPHEN, "-")
        .replace(EM_DASH, "")
}

/// Color name out of a class token such as `priceBlack` or `color-Red`.
pub fn color_from_class(token: &str, prefix_len: usize) -> String {
    let color: String = token.chars().skip(prefix_len).collect();
    match color.strip_prefix('-') {
        Some(stripped) => stripped.to_owned(),
        None => color,
    }
}

fn class_selector(class: &str) -> Result<Selector, ExtractError> {
    let selector = format!(".{}", class);
    Selector::parse(&selector).map_err(|_| ExtractError::Selector(selector.clone()))
}

fn has_class(element: &ElementRef, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

/// Parser for the rl.insider.gg price listing.
#[derive(Debug)]
pub struct InsiderParser {
    pub cfg: Configuration,
    table_selector: Selector,
    row_selector: Selector,
    cell_selector: Selector,
}

impl InsiderParser {
    pub fn new(cfg: Configuration) -> Result<Self, ExtractError> {
        Ok(InsiderParser {
            table_selector: class_selector(&cfg.table_class)?,
            row_selector: class_selector(&cfg.row_class)?,
            cell_selector: class_selector(&cfg.cell_class)?,
            cfg,
        })
    }

    fn attribute(&self, element: &ElementRef, field: &str) -> Result<String, ExtractError> {
        element
            .value()
            .attr(field)
            .map(String::from)
            .ok_or_else(|| ExtractError::MissingField {
                node: "item row",
                field: field.to_owned(),
            })
    }

    /// `None` for cells hidden on the page.
    pub fn read_cell(&self, element: ElementRef) -> Result<Option<PriceCell>, ExtractError> {
        if has_class(&element, &self.cfg.invisible_cell_class) {
            return Ok(None);
        }

        let first_class = element
            .value()
            .attr("class")
            .and_then(|classes| classes.split_whitespace().next())
            .ok_or_else(|| ExtractError::MissingField {
                node: "price cell",
                field: String::from("class"),
            })?;

        Ok(Some(PriceCell {
            color: color_from_class(first_class, self.cfg.color_prefix_len),
            text: element.text().collect::<String>(),
        }))
    }

    /// `None` for rows tagged as empty.
    pub fn read_row(&self, element: ElementRef) -> Result<Option<ItemRow>, ExtractError> {
        if has_class(&element, &self.cfg.empty_row_class) {
            return Ok(None);
        }

        let name = self.attribute(&element, &self.cfg.name_attr)?;
        let kind = self.attribute(&element, &self.cfg.type_attr)?;
        let rarity = self.attribute(&element, &self.cfg.rarity_attr)?;

        let mut cells = Vec::new();
        for cell in element.select(&self.cell_selector) {
            if let Some(cell) = self.read_cell(cell)? {
                cells.push(cell);
            }
        }

        Ok(Some(ItemRow {
            name,
            kind,
            rarity,
            cells,
        }))
    }
}

impl PriceParser for InsiderParser {
    #[instrument(level = "info", name = "Extracting prices", skip_all)]
    fn parse_document(&self, document: &Html) -> Vec<ItemRecord> {
        let mut records = Vec::new();

        for table in document.select(&self.table_selector) {
            for row in table.select(&self.row_selector) {
                match self.read_row(row) {
                    Ok(Some(item)) => {
                        debug!("Item detected! Name: {}", item.name);
                        records.push(ItemRecord::from(item));
                    }
                    Ok(None) => continue,
                    Err(e) => warn!("Skipping row: {}", e),
                }
            }
        }

        info!("Extracted {} items", records.len());
        records
    }
}
