use std::iter::FusedIterator;

use serde::Serialize;

use crate::error::{Result, ZeroGenError};

/// Column names, in output order.
pub const HEADER: [&str; 2] = ["line", "message"];

const FILL: &str = "0";

/// One generated data unit. `message` is always `line` zeros long.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub line: usize,
    pub message: String,
}

impl Row {
    pub fn new(line: usize) -> Row {
        Row {
            line,
            message: FILL.repeat(line),
        }
    }
}

/// Describes a dataset of `n_max` rows without holding any of them.
///
/// Every call to [`RowGenerator::rows`] starts over at line 1, so the same
/// generator can be walked as many times as needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowGenerator {
    n_max: usize,
}

impl RowGenerator {
    pub fn new(n_max: usize) -> RowGenerator {
        RowGenerator { n_max }
    }

    pub fn len(&self) -> usize {
        self.n_max
    }

    pub fn is_empty(&self) -> bool {
        self.n_max == 0
    }

    pub fn rows(&self) -> Rows {
        Rows {
            next: 1,
            left: self.n_max,
        }
    }
}

impl<'a> IntoIterator for &'a RowGenerator {
    type Item = Row;
    type IntoIter = Rows;

    fn into_iter(self) -> Rows {
        self.rows()
    }
}

/// Lazy walk over lines `1..=n_max`.
#[derive(Debug, Clone)]
pub struct Rows {
    next: usize,
    left: usize,
}

impl Iterator for Rows {
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        if self.left == 0 {
            return None;
        }
        let row = Row::new(self.next);
        self.left -= 1;
        // next stays put after the last row so n_max == usize::MAX cannot overflow
        if self.left > 0 {
            self.next += 1;
        }
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.left, Some(self.left))
    }
}

impl ExactSizeIterator for Rows {}

impl FusedIterator for Rows {}

/// Fully materialized rows, kept in generation order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Dataset(Vec<Row>);

impl Dataset {
    /// Walk the generator once and keep every row.
    ///
    /// Room for all rows is reserved up front; a row count that can never fit
    /// in memory is an error instead of an allocation abort.
    pub fn materialize(gen: &RowGenerator) -> Result<Dataset> {
        let mut rows = Vec::new();
        rows.try_reserve_exact(gen.len()).map_err(|e| {
            ZeroGenError::Argument(format!("cannot hold {} rows in memory: {}", gen.len(), e))
        })?;
        let mut ds = Dataset(rows);
        for row in gen {
            ds.add(row);
        }
        Ok(ds)
    }

    pub fn add(&mut self, row: Row) {
        self.0.push(row);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl std::iter::FromIterator<Row> for Dataset {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Dataset {
        Dataset(iter.into_iter().collect())
    }
}

impl IntoIterator for Dataset {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[test]
fn test_rows_three() {
    let rows: Vec<Row> = RowGenerator::new(3).rows().collect();
    assert_eq!(
        rows,
        vec![
            Row { line: 1, message: "0".to_string() },
            Row { line: 2, message: "00".to_string() },
            Row { line: 3, message: "000".to_string() },
        ]
    );
}

#[test]
fn test_rows_empty() {
    let gen = RowGenerator::new(0);
    assert!(gen.is_empty());
    assert_eq!(gen.rows().next(), None);
    assert_eq!(gen.rows().len(), 0);
}

#[test]
fn test_rows_restart() {
    let gen = RowGenerator::new(50);
    let first: Vec<Row> = gen.rows().collect();
    let second: Vec<Row> = (&gen).into_iter().collect();
    assert_eq!(first, second);
    assert_eq!(first.len(), 50);
}

#[test]
fn test_message_len_matches_line() {
    let mut expect = 1;
    for row in RowGenerator::new(257).rows() {
        assert_eq!(row.line, expect, "lines must ascend from 1 without gaps");
        assert_eq!(row.message.len(), row.line);
        assert!(row.message.chars().all(|c| c == '0'));
        expect += 1;
    }
    assert_eq!(expect, 258);
}

#[test]
fn test_rows_size_hint_and_fuse() {
    let mut rows = RowGenerator::new(2).rows();
    assert_eq!(rows.size_hint(), (2, Some(2)));
    rows.next();
    assert_eq!(rows.len(), 1);
    rows.next();
    assert_eq!(rows.next(), None);
    assert_eq!(rows.next(), None);
    assert_eq!(rows.size_hint(), (0, Some(0)));
}

#[test]
fn test_rows_huge_count_no_overflow() {
    let mut rows = RowGenerator::new(usize::MAX).rows();
    assert_eq!(rows.size_hint(), (usize::MAX, Some(usize::MAX)));
    assert_eq!(rows.next(), Some(Row::new(1)));
    assert_eq!(rows.len(), usize::MAX - 1);
}

#[test]
fn test_dataset_matches_stream() {
    let gen = RowGenerator::new(20);
    let ds = Dataset::materialize(&gen).unwrap();
    assert_eq!(ds.len(), 20);

    let collected: Dataset = gen.rows().collect();
    assert_eq!(ds, collected);
    assert!(ds.into_iter().eq(gen.rows()));
}

#[test]
fn test_dataset_too_large() {
    match Dataset::materialize(&RowGenerator::new(usize::MAX)) {
        Err(ZeroGenError::Argument(msg)) => assert!(msg.contains("cannot hold"), "{}", msg),
        other => panic!("expected argument error, got {:?}", other),
    }
}
