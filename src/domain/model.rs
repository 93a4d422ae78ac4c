use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

/// 未分類國家的標準區域哨兵值
pub const NO_ZONE: i16 = -1;

/// A single cell value as read from the input table.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

static EMPTY_CELL: RawCell = RawCell::Empty;

impl RawCell {
    /// Empty cells and whitespace-only text carry no value.
    pub fn is_blank(&self) -> bool {
        match self {
            RawCell::Empty => true,
            RawCell::Text(text) => text.trim().is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for RawCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawCell::Empty => write!(f, "<empty>"),
            RawCell::Text(text) => write!(f, "'{}'", text),
            RawCell::Number(value) => write!(f, "{}", value),
            RawCell::Bool(value) => write!(f, "{}", value),
        }
    }
}

impl From<&str> for RawCell {
    fn from(value: &str) -> Self {
        RawCell::Text(value.to_string())
    }
}

impl From<String> for RawCell {
    fn from(value: String) -> Self {
        RawCell::Text(value)
    }
}

impl From<f64> for RawCell {
    fn from(value: f64) -> Self {
        RawCell::Number(value)
    }
}

impl From<i32> for RawCell {
    fn from(value: i32) -> Self {
        RawCell::Number(f64::from(value))
    }
}

/// 一列原始資料，`number` 為工作表中的列號 (從 1 開始)
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub number: usize,
    pub cells: Vec<RawCell>,
}

impl RawRow {
    pub fn new(number: usize, cells: Vec<RawCell>) -> Self {
        Self { number, cells }
    }

    /// Cells past the end of the row read as `Empty`.
    pub fn cell(&self, index: usize) -> &RawCell {
        self.cells.get(index).unwrap_or(&EMPTY_CELL)
    }
}

/// How zone cell values outside the 16-bit range are converted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ZoneOverflow {
    /// Truncate toward zero, then keep the low 16 bits.
    #[default]
    Truncate,
    /// Out-of-range values fail the row.
    Reject,
}

impl fmt::Display for ZoneOverflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneOverflow::Truncate => write!(f, "truncate"),
            ZoneOverflow::Reject => write!(f, "reject"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Express,
    Standard,
    Expedited,
}

impl Category {
    /// Output order of the category sheets.
    pub const ALL: [Category; 3] = [Category::Express, Category::Standard, Category::Expedited];

    pub fn default_sheet_name(self) -> &'static str {
        match self {
            Category::Express => "Express",
            Category::Standard => "Standard",
            Category::Expedited => "Expedited",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.default_sheet_name())
    }
}

/// 一個國家及其區域代碼
///
/// `is_expedited` implies `has_standard`; the constructors are the only way
/// to build a record so the pair can never disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    name: String,
    express_zone: i16,
    standard_zone: i16,
    has_standard: bool,
    is_expedited: bool,
}

impl Record {
    /// Express shipping only.
    pub fn express_only(name: impl Into<String>, express_zone: i16) -> Self {
        Self {
            name: name.into(),
            express_zone,
            standard_zone: NO_ZONE,
            has_standard: false,
            is_expedited: false,
        }
    }

    pub fn standard(name: impl Into<String>, express_zone: i16, standard_zone: i16) -> Self {
        Self {
            name: name.into(),
            express_zone,
            standard_zone,
            has_standard: true,
            is_expedited: false,
        }
    }

    pub fn expedited(name: impl Into<String>, express_zone: i16, expedited_zone: i16) -> Self {
        Self {
            name: name.into(),
            express_zone,
            standard_zone: expedited_zone,
            has_standard: true,
            is_expedited: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn express_zone(&self) -> i16 {
        self.express_zone
    }

    /// `NO_ZONE` when the country has no standard or expedited service.
    pub fn standard_zone(&self) -> i16 {
        self.standard_zone
    }

    pub fn has_standard(&self) -> bool {
        self.has_standard
    }

    pub fn is_expedited(&self) -> bool {
        self.is_expedited
    }

    /// The non-express category this record belongs to, with its zone.
    pub fn secondary(&self) -> Option<(Category, i16)> {
        if self.is_expedited {
            Some((Category::Expedited, self.standard_zone))
        } else if self.has_standard {
            Some((Category::Standard, self.standard_zone))
        } else {
            None
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Zone ID to country names. Duplicates are kept; order within a zone is
/// not meaningful.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZoneMap {
    zones: HashMap<i16, Vec<String>>,
}

impl ZoneMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, zone: i16, name: impl Into<String>) {
        self.zones.entry(zone).or_default().push(name.into());
    }

    pub fn get(&self, zone: i16) -> Option<&[String]> {
        self.zones.get(&zone).map(Vec::as_slice)
    }

    /// Flattened `(zone, name)` pairs in unspecified order.
    pub fn entries(&self) -> impl Iterator<Item = (i16, &str)> + '_ {
        self.zones
            .iter()
            .flat_map(|(zone, names)| names.iter().map(move |name| (*zone, name.as_str())))
    }

    pub fn zone_count(&self) -> usize {
        self.zones.len()
    }

    /// Total number of names across all zones.
    pub fn len(&self) -> usize {
        self.zones.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Sorted, duplicate-free view of the mapping.
    pub fn dedup(&self) -> BTreeMap<i16, BTreeSet<String>> {
        self.zones
            .iter()
            .map(|(zone, names)| (*zone, names.iter().cloned().collect()))
            .collect()
    }
}

/// The three category-scoped zone maps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryMaps {
    pub express: ZoneMap,
    pub standard: ZoneMap,
    pub expedited: ZoneMap,
}

impl CategoryMaps {
    pub fn get(&self, category: Category) -> &ZoneMap {
        match category {
            Category::Express => &self.express,
            Category::Standard => &self.standard,
            Category::Expedited => &self.expedited,
        }
    }

    pub fn get_mut(&mut self, category: Category) -> &mut ZoneMap {
        match category {
            Category::Express => &mut self.express,
            Category::Standard => &mut self.standard,
            Category::Expedited => &mut self.expedited,
        }
    }

    /// Splits into owned maps in `Category::ALL` order.
    pub fn into_parts(self) -> [(Category, ZoneMap); 3] {
        [
            (Category::Express, self.express),
            (Category::Standard, self.standard),
            (Category::Expedited, self.expedited),
        ]
    }
}

/// Column-oriented output grid. Row 0 of every column holds the zone ID,
/// the remaining rows the sorted country names. Columns may differ in
/// length; missing cells are simply absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PivotGrid {
    columns: Vec<Vec<String>>,
}

impl PivotGrid {
    pub fn new(columns: Vec<Vec<String>>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[Vec<String>] {
        &self.columns
    }

    pub fn column(&self, index: usize) -> Option<&[String]> {
        self.columns.get(index).map(Vec::as_slice)
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Length of the longest column.
    pub fn height(&self) -> usize {
        self.columns.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.columns
            .get(column)
            .and_then(|cells| cells.get(row))
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// A pivot grid ready to be written under its sheet name.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySheet {
    pub category: Category,
    pub name: String,
    pub grid: PivotGrid,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub record_count: usize,
    pub sheets: Vec<CategorySheet>,
}
