use crate::domain::model::{RawCell, RawRow, Record, ZoneOverflow};
use crate::utils::error::{EtlError, Result};

pub const DEFAULT_COMMENT_MARKER: &str = "**";

const NAME_COLUMN: usize = 0;
const EXPRESS_COLUMN: usize = 1;
const STANDARD_COLUMN: usize = 2;
const EXPEDITED_COLUMN: usize = 3;

/// Outcome of classifying a single row.
#[derive(Debug, Clone, PartialEq)]
pub enum Classified {
    Record(Record),
    /// Annotation row carrying the comment marker.
    Skipped,
    /// Empty name cell: no more data.
    End,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassifiedRows {
    pub records: Vec<Record>,
    pub skipped: usize,
    /// Row number of the terminating row, if one was found.
    pub terminated_at: Option<usize>,
}

/// Turns raw input rows into `Record`s.
#[derive(Debug, Clone)]
pub struct Classifier {
    comment_marker: String,
    overflow: ZoneOverflow,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(DEFAULT_COMMENT_MARKER, ZoneOverflow::default())
    }
}

impl Classifier {
    pub fn new(comment_marker: impl Into<String>, overflow: ZoneOverflow) -> Self {
        Self {
            comment_marker: comment_marker.into(),
            overflow,
        }
    }

    pub fn classify(&self, row: &RawRow) -> Result<Classified> {
        let name = match row.cell(NAME_COLUMN) {
            RawCell::Empty => return Ok(Classified::End),
            RawCell::Text(text) if text.is_empty() => return Ok(Classified::End),
            RawCell::Text(text) => text,
            other => {
                return Err(parse_error(
                    row,
                    NAME_COLUMN,
                    format!("country name must be text, found {}", other),
                ))
            }
        };

        if name.contains(self.comment_marker.as_str()) {
            return Ok(Classified::Skipped);
        }

        let express = match self.optional_zone(row, EXPRESS_COLUMN)? {
            Some(zone) => zone,
            None => return Err(parse_error(row, EXPRESS_COLUMN, "missing express zone")),
        };

        // 第三欄優先：有值即為 standard，否則看第四欄是否為 expedited
        let record = if let Some(zone) = self.optional_zone(row, STANDARD_COLUMN)? {
            Record::standard(name.as_str(), express, zone)
        } else if let Some(zone) = self.optional_zone(row, EXPEDITED_COLUMN)? {
            Record::expedited(name.as_str(), express, zone)
        } else {
            Record::express_only(name.as_str(), express)
        };

        Ok(Classified::Record(record))
    }

    /// Classifies rows in order until the terminating row. Rows after it are
    /// never inspected.
    pub fn classify_rows<'a, I>(&self, rows: I) -> Result<ClassifiedRows>
    where
        I: IntoIterator<Item = &'a RawRow>,
    {
        let mut result = ClassifiedRows::default();

        for row in rows {
            match self.classify(row)? {
                Classified::Record(record) => {
                    tracing::trace!("Row {}: {:?}", row.number, record);
                    result.records.push(record);
                }
                Classified::Skipped => {
                    tracing::debug!("Skipping annotation row {}", row.number);
                    result.skipped += 1;
                }
                Classified::End => {
                    result.terminated_at = Some(row.number);
                    break;
                }
            }
        }

        Ok(result)
    }

    fn optional_zone(&self, row: &RawRow, column: usize) -> Result<Option<i16>> {
        match row.cell(column) {
            cell if cell.is_blank() => Ok(None),
            RawCell::Number(value) => self.zone_from_number(*value).map(Some).ok_or_else(|| {
                parse_error(
                    row,
                    column,
                    format!("zone ID {} is outside the 16-bit range", value),
                )
            }),
            other => Err(parse_error(
                row,
                column,
                format!("zone ID is not numeric: {}", other),
            )),
        }
    }

    fn zone_from_number(&self, value: f64) -> Option<i16> {
        match self.overflow {
            // 沿用舊版行為：先截斷成 32 位元，再保留低 16 位元
            ZoneOverflow::Truncate => Some((value as i32) as i16),
            ZoneOverflow::Reject => {
                let truncated = value.trunc();
                let in_range = truncated >= f64::from(i16::MIN) && truncated <= f64::from(i16::MAX);
                (value.is_finite() && in_range).then_some(truncated as i16)
            }
        }
    }
}

fn parse_error(row: &RawRow, column: usize, message: impl Into<String>) -> EtlError {
    EtlError::ParseError {
        row: row.number,
        column,
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(number: usize, cells: Vec<RawCell>) -> RawRow {
        RawRow::new(number, cells)
    }

    fn classify(cells: Vec<RawCell>) -> Result<Classified> {
        Classifier::default().classify(&row(1, cells))
    }

    #[test]
    fn test_third_cell_means_standard() {
        let result = classify(vec!["USA".into(), 10.into(), 20.into(), RawCell::Empty]).unwrap();
        assert_eq!(result, Classified::Record(Record::standard("USA", 10, 20)));
    }

    #[test]
    fn test_fourth_cell_means_expedited() {
        let result = classify(vec!["Canada".into(), 10.into(), RawCell::Empty, 20.into()]).unwrap();
        assert_eq!(result, Classified::Record(Record::expedited("Canada", 10, 20)));
    }

    #[test]
    fn test_third_cell_wins_over_fourth() {
        let result = classify(vec!["USA".into(), 10.into(), 20.into(), 30.into()]).unwrap();
        assert_eq!(result, Classified::Record(Record::standard("USA", 10, 20)));
    }

    #[test]
    fn test_express_only_row() {
        let result = classify(vec!["Mexico".into(), 10.into()]).unwrap();
        assert_eq!(result, Classified::Record(Record::express_only("Mexico", 10)));
    }

    #[test]
    fn test_empty_name_ends_input() {
        assert_eq!(classify(vec!["".into(), 0.into(), 0.into(), 0.into()]).unwrap(), Classified::End);
        assert_eq!(classify(vec![]).unwrap(), Classified::End);
    }

    #[test]
    fn test_comment_marker_anywhere_skips_row() {
        assert_eq!(classify(vec!["** note".into(), 0.into()]).unwrap(), Classified::Skipped);
        assert_eq!(classify(vec!["see note **".into()]).unwrap(), Classified::Skipped);
        assert_eq!(classify(vec!["a*b".into(), 1.into()]).unwrap(), Classified::Record(Record::express_only("a*b", 1)));
    }

    #[test]
    fn test_custom_comment_marker() {
        let classifier = Classifier::new("#", ZoneOverflow::Truncate);
        let result = classifier.classify(&row(1, vec!["# header".into(), "Express".into()])).unwrap();
        assert_eq!(result, Classified::Skipped);
    }

    #[test]
    fn test_non_numeric_express_reports_row() {
        let err = Classifier::default()
            .classify(&row(12, vec!["USA".into(), "ten".into()]))
            .unwrap_err();
        match err {
            EtlError::ParseError { row, column, .. } => {
                assert_eq!(row, 12);
                assert_eq!(column, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_express_is_an_error() {
        assert!(classify(vec!["USA".into(), RawCell::Empty, 20.into()]).is_err());
    }

    #[test]
    fn test_non_numeric_standard_is_an_error() {
        assert!(classify(vec!["USA".into(), 10.into(), RawCell::Bool(true)]).is_err());
        assert!(classify(vec!["USA".into(), 10.into(), "n/a".into()]).is_err());
    }

    #[test]
    fn test_blank_text_counts_as_absent() {
        let result = classify(vec!["Canada".into(), 10.into(), " ".into(), 20.into()]).unwrap();
        assert_eq!(result, Classified::Record(Record::expedited("Canada", 10, 20)));
    }

    #[test]
    fn test_numeric_name_is_an_error() {
        assert!(classify(vec![RawCell::Number(5.0), 10.into()]).is_err());
    }

    #[test]
    fn test_truncation_keeps_low_bits() {
        let result = classify(vec!["Far".into(), 70000.into(), RawCell::Number(20.9)]).unwrap();
        assert_eq!(result, Classified::Record(Record::standard("Far", 4464, 20)));

        let result = classify(vec!["Neg".into(), RawCell::Number(-3.7)]).unwrap();
        assert_eq!(result, Classified::Record(Record::express_only("Neg", -3)));
    }

    #[test]
    fn test_reject_policy_fails_out_of_range() {
        let classifier = Classifier::new(DEFAULT_COMMENT_MARKER, ZoneOverflow::Reject);
        assert!(classifier.classify(&row(3, vec!["Far".into(), 70000.into()])).is_err());
        assert!(classifier.classify(&row(3, vec!["Far".into(), RawCell::Number(f64::NAN)])).is_err());

        let result = classifier.classify(&row(3, vec!["Near".into(), RawCell::Number(32767.5)])).unwrap();
        assert_eq!(result, Classified::Record(Record::express_only("Near", 32767)));
    }

    #[test]
    fn test_classify_rows_stops_at_terminator() {
        let rows = vec![
            row(1, vec!["** note".into(), 0.into(), 0.into(), 0.into()]),
            row(2, vec!["Spain".into(), 30.into(), 40.into()]),
            row(3, vec!["".into(), 0.into(), 0.into(), 0.into()]),
            row(4, vec!["France".into(), "broken".into()]),
        ];

        let result = Classifier::default().classify_rows(&rows).unwrap();
        assert_eq!(result.records, vec![Record::standard("Spain", 30, 40)]);
        assert_eq!(result.skipped, 1);
        assert_eq!(result.terminated_at, Some(3));
    }

    #[test]
    fn test_classify_rows_without_terminator() {
        let rows = vec![row(1, vec!["Spain".into(), 30.into()])];
        let result = Classifier::default().classify_rows(&rows).unwrap();
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.terminated_at, None);
    }
}
