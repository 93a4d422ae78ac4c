#![allow(dead_code)]

use calamine::{open_workbook, Data, Reader, Xlsx};
use rust_xlsxwriter::Workbook;
use std::path::Path;

/// A fixture cell: text, number or blank.
pub enum Cell {
    Text(&'static str),
    Number(f64),
    Blank,
}

pub use self::Cell::{Blank, Number, Text};

pub fn write_zone_table(path: &Path, rows: &[Vec<Cell>]) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    for (row, cells) in rows.iter().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            match cell {
                Cell::Text(text) if text.is_empty() => {}
                Cell::Text(text) => {
                    worksheet.write_string(row as u32, col as u16, *text).unwrap();
                }
                Cell::Number(value) => {
                    worksheet.write_number(row as u32, col as u16, *value).unwrap();
                }
                Cell::Blank => {}
            }
        }
    }
    workbook.save(path).unwrap();
}

/// Reads a written sheet back as columns of strings, dropping blank cells.
pub fn read_columns(path: &Path, sheet: &str) -> Vec<Vec<String>> {
    let mut workbook: Xlsx<_> = open_workbook(path).unwrap();
    let range = workbook.worksheet_range(sheet).unwrap();

    let (height, width) = range.get_size();
    (0..width)
        .map(|col| {
            (0..height)
                .filter_map(|row| match range.get((row, col)) {
                    Some(Data::String(value)) => Some(value.clone()),
                    _ => None,
                })
                .collect()
        })
        .collect()
}

pub fn sheet_names(path: &Path) -> Vec<String> {
    let workbook: Xlsx<_> = open_workbook(path).unwrap();
    workbook.sheet_names()
}

pub fn column(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}
